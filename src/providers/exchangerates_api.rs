use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::currency::{Conversion, CurrencyConverter, RateTable};
use crate::core::error::ConversionError;

/// Endpoint and credentials of an exchangeratesapi.io compatible service.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    pub base_url: String,
    pub access_key: String,
    pub timeout: Option<Duration>,
}

// ExchangeRatesConverter implementation for CurrencyConverter
pub struct ExchangeRatesConverter {
    config: ConverterConfig,
}

impl ExchangeRatesConverter {
    pub fn new(base_url: &str, access_key: &str) -> Self {
        ExchangeRatesConverter {
            config: ConverterConfig {
                base_url: base_url.to_string(),
                access_key: access_key.to_string(),
                timeout: None,
            },
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    #[cfg(test)]
    fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Rates are always requested with the conversion source as base currency.
    fn rates_url(&self, base: &str) -> String {
        format!(
            "{}?access_key={}&base={}",
            self.config.base_url, self.config.access_key, base
        )
    }

    fn client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent("fxconv/0.1");
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

#[async_trait]
impl CurrencyConverter for ExchangeRatesConverter {
    #[instrument(
        name = "ExchangeRatesConvert",
        skip(self),
        fields(from = %from, to = %to)
    )]
    async fn convert(
        &self,
        from: &str,
        to: &str,
        amount: i64,
    ) -> Result<Conversion, ConversionError> {
        let url = self.rates_url(from);
        debug!(base_url = %self.config.base_url, "Requesting exchange rates");

        let response = self
            .client()?
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "Received exchange rate response");

        if status != StatusCode::OK {
            let body = response.text().await?;
            return Err(ConversionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let table: RateTable = serde_json::from_slice(&body)?;

        table.convert(to, amount)
    }
}
