use std::str::FromStr;

use axum::http::HeaderValue;
use bidflow_core::quotation::{
    validate_tax_percentage, QuotationDefaults, DEFAULT_TAX_PERCENTAGE, DEFAULT_VALIDITY_MONTHS,
};
use rust_decimal::Decimal;

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected} (got '{value}')")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid CORS origin '{0}'")]
    CorsOrigin(String),
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for in-flight requests on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Values applied to newly created quotations.
    pub quotation: QuotationDefaults,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
            quotation: QuotationDefaults::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `3000`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`     | `30`                    |
    /// | `QUOTATION_TAX_PERCENTAGE`  | `7`                     |
    /// | `QUOTATION_VALIDITY_MONTHS` | `1`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = parse_var("PORT", 3000, "u16")?;

        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|o| HeaderValue::from_str(o).map_err(|_| ConfigError::CorsOrigin(o.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs: u64 = parse_var("REQUEST_TIMEOUT_SECS", 30, "u64")?;
        let shutdown_timeout_secs: u64 = parse_var("SHUTDOWN_TIMEOUT_SECS", 30, "u64")?;

        let tax_percentage: Decimal =
            parse_var("QUOTATION_TAX_PERCENTAGE", DEFAULT_TAX_PERCENTAGE, "decimal")?;
        validate_tax_percentage(tax_percentage).map_err(|_| ConfigError::Invalid {
            var: "QUOTATION_TAX_PERCENTAGE",
            expected: "percentage between 0 and 100",
            value: tax_percentage.to_string(),
        })?;
        let validity_months: u32 =
            parse_var("QUOTATION_VALIDITY_MONTHS", DEFAULT_VALIDITY_MONTHS, "u32")?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            quotation: QuotationDefaults {
                tax_percentage,
                validity_months,
            },
        })
    }
}

/// Read `var`, falling back to `default` when unset.
fn parse_var<T: FromStr>(
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_var_uses_default_when_unset() {
        let value: u32 = parse_var("BIDFLOW_TEST_UNSET_VAR", 5, "u32").unwrap();
        assert_eq!(value, 5);
    }

    #[test]
    fn default_config_carries_quotation_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.quotation.tax_percentage, dec!(7));
        assert_eq!(config.quotation.validity_months, 1);
    }
}
