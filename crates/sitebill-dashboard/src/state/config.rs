//! # Configuration State
//!
//! Dashboard configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SITEBILL_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.
//! If hot-reloading is added later, we'd wrap in `RwLock`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sitebill_client::ApiConfig;

/// Dashboard configuration.
///
/// ## Fields
/// Most fields have sensible defaults for development.
/// Production deployments should configure these properly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Base URL of the billing backend.
    pub api_base_url: String,

    /// Bearer token forwarded to the backend, when the session has one.
    pub api_token: Option<String>,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Company name (shown in the dashboard header and on reports).
    pub company_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,
}

impl Default for DashboardConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Backend: http://localhost:3000
    /// - Company: "SiteBill Dev Builders"
    /// - Currency: USD ($)
    fn default() -> Self {
        DashboardConfig {
            api_base_url: "http://localhost:3000".to_string(),
            api_token: None,
            request_timeout_secs: 30,
            company_name: "SiteBill Dev Builders".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl DashboardConfig {
    /// Creates a new DashboardConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SITEBILL_API_URL`: Override backend base URL
    /// - `SITEBILL_API_TOKEN`: Bearer token for backend calls
    /// - `SITEBILL_COMPANY_NAME`: Override company name
    pub fn from_env() -> Self {
        let mut config = DashboardConfig::default();

        if let Ok(url) = std::env::var("SITEBILL_API_URL") {
            config.api_base_url = url;
        }

        if let Ok(token) = std::env::var("SITEBILL_API_TOKEN") {
            config.api_token = Some(token);
        }

        if let Ok(name) = std::env::var("SITEBILL_COMPANY_NAME") {
            config.company_name = name;
        }

        config
    }

    /// Builds the API client configuration from this dashboard config.
    pub fn api_config(&self) -> ApiConfig {
        let mut api = ApiConfig::new(self.api_base_url.clone())
            .timeout(Duration::from_secs(self.request_timeout_secs));
        if let Some(token) = &self.api_token {
            api = api.bearer_token(token.clone());
        }
        api
    }

    /// Formats a cent amount as a currency string.
    ///
    /// Used by the presentational cards and totals rows.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = DashboardConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_positive() {
        let config = DashboardConfig::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(100), "$1.00");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        // Credit bills render with a leading minus
        let config = DashboardConfig::default();
        assert_eq!(config.format_currency(-20_000), "-$200.00");
    }

    #[test]
    fn test_format_currency_large() {
        let config = DashboardConfig::default();
        assert_eq!(config.format_currency(123456789), "$1234567.89");
    }

    #[test]
    fn test_api_config_mapping() {
        let mut config = DashboardConfig::default();
        config.api_base_url = "https://billing.example.com/".to_string();
        config.api_token = Some("token".to_string());
        config.request_timeout_secs = 10;

        let api = config.api_config();
        assert_eq!(api.base_url, "https://billing.example.com");
        assert_eq!(api.bearer_token.as_deref(), Some("token"));
        assert_eq!(api.timeout, Duration::from_secs(10));
    }
}
