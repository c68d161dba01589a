//! # Application Configuration
//!
//! This module manages configuration loaded from environment variables (and a
//! `.env` file via `dotenvy`). All configuration is validated on startup to
//! fail fast if misconfigured.
//!
//! ## Global Config Access
//!
//! Use [`core_config()`] to access the global configuration instance:
//!
//! ```rust,no_run
//! use lib_core::config::core_config;
//!
//! let config = core_config();
//! let rpc_url = &config.rpc_url;
//! ```
//!
//! The config must be initialized once at application startup using [`init_config()`].
//!
//! ## Variables
//!
//! | Variable | Default |
//! |---|---|
//! | `RPC_URL` | `http://127.0.0.1:8545` |
//! | `RPC_TIMEOUT_SECS` | `10` (at most 300) |
//! | `DEPLOYER_ADDRESS` | `0x603346539c3E2c41D7EC37e7e6c1D5175Ab76AC3` |
//! | `CONFIRMATIONS` | `1` |
//! | `CONFIRMATION_TIMEOUT_SECS` | `120` (at most one day) |
//! | `RECEIPT_POLL_MS` | `1000` |
//! | `POLICY_ATTACH_VALUE` | `false` |
//! | `POLICY_BIND_FORM` | `false` |
//! | `LINK_TOKEN_ADDRESS`, `WEATHER_ORACLE_ADDRESS`, `POLICY_AMOUNT_ETH`, `POLICY_DURATION_DAYS`, `LOCATION_LATITUDE`, `LOCATION_LONGITUDE` | preset policy |

use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use alloy_primitives::{address, utils::parse_ether, Address};
use lib_utils::{get_env_bool, get_env_or, get_env_parse_or};

use crate::dto::PolicyParameters;
use crate::error::{AppError, Result};

/// Upper bound on `CONFIRMATION_TIMEOUT_SECS` (one day).
pub const MAX_CONFIRMATION_TIMEOUT_SECS: u64 = 86_400;

/// Upper bound on `RPC_TIMEOUT_SECS`.
pub const MAX_RPC_TIMEOUT_SECS: u64 = 300;

/// Factory contract that deploys per-farm policy contracts.
pub const DEFAULT_DEPLOYER_ADDRESS: Address = address!("603346539c3E2c41D7EC37e7e6c1D5175Ab76AC3");

/// Local development node.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// JSON-RPC endpoint of the wallet provider
    pub rpc_url: String,

    /// Per-request HTTP timeout for JSON-RPC calls
    pub rpc_timeout_secs: u64,

    /// Deployer (factory) contract address
    pub deployer_address: Address,

    /// Blocks required on top of the inclusion block, counting it
    ///
    /// Valid range: 1-64
    pub confirmations: u64,

    /// Upper bound for the confirmation wait
    ///
    /// Expiry is reported as a transient failure, never waited out.
    pub confirmation_timeout_secs: u64,

    /// Receipt polling interval while waiting for confirmations
    pub receipt_poll_ms: u64,

    /// Send the policy amount as call value with `newWindFarm`
    pub attach_value: bool,

    /// Build policy parameters from the form instead of the preset
    pub bind_form: bool,

    /// Preset policy parameters
    pub policy_preset: PolicyParameters,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            rpc_timeout_secs: 10,
            deployer_address: DEFAULT_DEPLOYER_ADDRESS,
            confirmations: 1,
            confirmation_timeout_secs: 120,
            receipt_poll_ms: 1000,
            attach_value: false,
            bind_form: false,
            policy_preset: PolicyParameters::preset(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first if one is present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let preset = &defaults.policy_preset;

        let deployer_address = parse_address(
            "DEPLOYER_ADDRESS",
            &get_env_or("DEPLOYER_ADDRESS", &defaults.deployer_address.to_string()),
        )?;

        let policy_preset = PolicyParameters {
            link_token: parse_address(
                "LINK_TOKEN_ADDRESS",
                &get_env_or("LINK_TOKEN_ADDRESS", &preset.link_token.to_string()),
            )?,
            weather_oracle: parse_address(
                "WEATHER_ORACLE_ADDRESS",
                &get_env_or("WEATHER_ORACLE_ADDRESS", &preset.weather_oracle.to_string()),
            )?,
            amount: match std::env::var("POLICY_AMOUNT_ETH") {
                Ok(eth) => parse_ether(eth.trim()).map_err(|e| {
                    AppError::Config(format!("POLICY_AMOUNT_ETH must be an ether amount: {}", e))
                })?,
                Err(_) => preset.amount,
            },
            duration_days: get_env_parse_or("POLICY_DURATION_DAYS", preset.duration_days)?,
            latitude: get_env_or("LOCATION_LATITUDE", &preset.latitude),
            longitude: get_env_or("LOCATION_LONGITUDE", &preset.longitude),
        };

        Ok(Self {
            rpc_url: get_env_or("RPC_URL", &defaults.rpc_url),
            rpc_timeout_secs: get_env_parse_or("RPC_TIMEOUT_SECS", defaults.rpc_timeout_secs)?,
            deployer_address,
            confirmations: get_env_parse_or("CONFIRMATIONS", defaults.confirmations)?,
            confirmation_timeout_secs: get_env_parse_or(
                "CONFIRMATION_TIMEOUT_SECS",
                defaults.confirmation_timeout_secs,
            )?,
            receipt_poll_ms: get_env_parse_or("RECEIPT_POLL_MS", defaults.receipt_poll_ms)?,
            attach_value: get_env_bool("POLICY_ATTACH_VALUE", defaults.attach_value)?,
            bind_form: get_env_bool("POLICY_BIND_FORM", defaults.bind_form)?,
            policy_preset,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(AppError::Config("RPC_URL must be an http(s) URL".to_string()));
        }

        if self.rpc_timeout_secs == 0 || self.rpc_timeout_secs > MAX_RPC_TIMEOUT_SECS {
            return Err(AppError::Config(format!(
                "RPC_TIMEOUT_SECS must be between 1 and {}",
                MAX_RPC_TIMEOUT_SECS
            )));
        }

        if self.deployer_address == Address::ZERO {
            return Err(AppError::Config("DEPLOYER_ADDRESS must not be the zero address".to_string()));
        }

        if self.confirmations < 1 || self.confirmations > 64 {
            return Err(AppError::Config("CONFIRMATIONS must be between 1 and 64".to_string()));
        }

        if self.confirmation_timeout_secs == 0 || self.confirmation_timeout_secs > MAX_CONFIRMATION_TIMEOUT_SECS {
            return Err(AppError::Config(format!(
                "CONFIRMATION_TIMEOUT_SECS must be between 1 and {}",
                MAX_CONFIRMATION_TIMEOUT_SECS
            )));
        }

        if self.receipt_poll_ms == 0 || self.receipt_poll_interval() > self.confirmation_timeout() {
            return Err(AppError::Config(
                "RECEIPT_POLL_MS must be positive and shorter than the confirmation timeout".to_string(),
            ));
        }

        if self.policy_preset.duration_days == 0 {
            return Err(AppError::Config("POLICY_DURATION_DAYS must be greater than 0".to_string()));
        }

        Ok(())
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_ms)
    }
}

fn parse_address(name: &str, raw: &str) -> Result<Address> {
    Address::from_str(raw.trim())
        .map_err(|e| AppError::Config(format!("{} must be a 20-byte hex address: {}", name, e)))
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// This should be called once at application startup, before any services
/// that need configuration are used.
///
/// # Errors
///
/// Returns an error if:
/// - Environment variables are malformed
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<&'static Config> {
    let config = Config::from_env()?;
    config.validate()?;

    tracing::debug!(
        rpc_url = %config.rpc_url,
        deployer = %config.deployer_address,
        confirmations = config.confirmations,
        "Configuration loaded"
    );

    CONFIG
        .set(config)
        .map_err(|_| AppError::Config("Config has already been initialized".to_string()))?;
    Ok(core_config())
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet.
pub fn core_config() -> &'static Config {
    CONFIG.get().expect("Config must be initialized with init_config() before use")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.confirmations, 1);
        assert_eq!(config.confirmation_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_zero_confirmations_rejected() {
        let config = Config { confirmations: 0, ..Config::default() };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config { confirmation_timeout_secs: 0, ..Config::default() };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_huge_timeout_rejected_without_overflow() {
        let config = Config { confirmation_timeout_secs: u64::MAX, ..Config::default() };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let config = Config {
            confirmation_timeout_secs: MAX_CONFIRMATION_TIMEOUT_SECS,
            receipt_poll_ms: u64::MAX,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_timeout_at_upper_bound_accepted() {
        let config = Config { confirmation_timeout_secs: MAX_CONFIRMATION_TIMEOUT_SECS, ..Config::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rpc_timeout_bounds() {
        let config = Config { rpc_timeout_secs: u64::MAX, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_poll_longer_than_timeout_rejected() {
        let config = Config {
            confirmation_timeout_secs: 1,
            receipt_poll_ms: 5000,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_http_rpc_url_rejected() {
        let config = Config { rpc_url: "ws://127.0.0.1:8546".to_string(), ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_address_error_names_variable() {
        let err = parse_address("DEPLOYER_ADDRESS", "0x1234").unwrap_err();
        assert!(err.to_string().contains("DEPLOYER_ADDRESS"));
    }
}
