use super::ui;
use crate::core::config::AppConfig;
use crate::core::{Conversion, CurrencyConverter};
use anyhow::{Result, bail};
use std::time::Duration;
use tracing::debug;

/// Values given on the command line; anything left out comes from the config.
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub api_key: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<i64>,
}

/// A fully resolved conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertRequest {
    pub base_url: String,
    pub access_key: String,
    pub timeout: Option<Duration>,
    pub from: String,
    pub to: String,
    pub amount: i64,
}

impl ConvertRequest {
    pub fn resolve(args: ConvertArgs, config: &AppConfig) -> Result<Self> {
        let access_key = args
            .api_key
            .or_else(|| config.provider.access_key.clone())
            .filter(|key| !key.is_empty());
        let Some(access_key) = access_key else {
            bail!("parameter --api-key is required");
        };

        let from = args.from.unwrap_or_else(|| config.defaults.from.clone());
        let to = args.to.unwrap_or_else(|| config.defaults.to.clone());
        if from.is_empty() || to.is_empty() {
            bail!("Currency codes must not be empty");
        }

        Ok(ConvertRequest {
            base_url: config.provider.base_url.clone(),
            access_key,
            timeout: config.provider.timeout(),
            from,
            to,
            amount: args.amount.unwrap_or(config.defaults.amount),
        })
    }
}

/// Runs the conversion and returns the report to print.
pub async fn convert(converter: &dyn CurrencyConverter, request: &ConvertRequest) -> Result<String> {
    let pb = ui::new_spinner(&format!("Fetching {} rates...", request.from));
    let result = converter
        .convert(&request.from, &request.to, request.amount)
        .await;
    pb.finish_and_clear();

    let conversion = result?;
    debug!(?conversion, "Conversion complete");
    Ok(render_report(request, &conversion))
}

pub fn render_report(request: &ConvertRequest, conversion: &Conversion) -> String {
    let mut output = format!(
        "~ A light application which converts an {} amount to a specific currency.\n",
        request.from
    );
    output.push_str(&ui::style_text(
        &format!("(using {})", request.base_url),
        ui::StyleType::Subtle,
    ));
    output.push_str("\n\n");
    output.push_str(&format!("{} {} equals\n", request.amount, request.from));
    output.push_str(&format!(
        "{} {}\n",
        ui::style_text(&conversion.value.to_string(), ui::StyleType::Value),
        ui::style_text(&request.to, ui::StyleType::Title)
    ));
    output.push_str(&format!("{} ~\n", conversion.published_at));
    output
}
