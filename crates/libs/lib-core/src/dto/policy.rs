//! # Policy DTOs
//!
//! [`PolicyParameters`] is everything the deployer contract needs to create a
//! wind-farm policy. [`PolicyForm`] is the raw text the user typed into the
//! dashboard form; it validates into parameters via [`PolicyForm::to_parameters`].
//!
//! Which of the two feeds a submission is decided by [`resolve_parameters`].

use alloy_primitives::{address, utils::format_ether, Address, U256};
use serde::{Deserialize, Serialize};

use lib_utils::validation::{validate_decimal_in_range, validate_not_empty, validate_positive_int};

use crate::config::Config;
use crate::error::{AppError, Result};

/// Chainlink LINK token on the test network the preset targets.
pub const LINK_TOKEN_ADDRESS: Address = address!("326C977E6efc84E512bB9C30f76E30c160eD06FB");

/// AccuWeather oracle the policy contracts query for wind speed.
pub const WEATHER_ORACLE_ADDRESS: Address = address!("B9756312523826A566e222a34793E414A81c88E1");

/// 0.03 ether in wei.
pub const POLICY_AMOUNT_WEI: u64 = 30_000_000_000_000_000;

pub const POLICY_DURATION_DAYS: u64 = 3;

/// Strathcona Park wind farm.
pub const LOCATION_LATITUDE: &str = "49.703168";
pub const LOCATION_LONGITUDE: &str = "-125.630035";

/// Daily premium is 5 per mille of the insured amount.
const DAILY_PREMIUM_PER_MILLE: u64 = 5;

/// Inputs to the deployer's `newWindFarm` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyParameters {
    /// LINK token used to pay the oracle
    pub link_token: Address,
    /// Weather oracle the policy reads wind speed from
    pub weather_oracle: Address,
    /// Insured amount in wei
    pub amount: U256,
    /// Policy length in days
    pub duration_days: u64,
    /// Decimal latitude, passed to the contract as text
    pub latitude: String,
    /// Decimal longitude, passed to the contract as text
    pub longitude: String,
}

impl PolicyParameters {
    /// The fixed demo policy.
    pub fn preset() -> Self {
        Self {
            link_token: LINK_TOKEN_ADDRESS,
            weather_oracle: WEATHER_ORACLE_ADDRESS,
            amount: U256::from(POLICY_AMOUNT_WEI),
            duration_days: POLICY_DURATION_DAYS,
            latitude: LOCATION_LATITUDE.to_string(),
            longitude: LOCATION_LONGITUDE.to_string(),
        }
    }

    /// Premium due per day, in wei.
    pub fn daily_premium(&self) -> U256 {
        self.amount * U256::from(DAILY_PREMIUM_PER_MILLE) / U256::from(1000u64)
    }

    pub fn amount_eth(&self) -> String {
        format_eth(self.amount)
    }

    pub fn daily_premium_eth(&self) -> String {
        format_eth(self.daily_premium())
    }
}

/// Format wei as ether without trailing zeros (`30000000000000000` → `0.03`).
pub fn format_eth(wei: U256) -> String {
    let formatted = format_ether(wei);
    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        formatted
    }
}

/// Raw contents of the "Create New Policy" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyForm {
    pub latitude: String,
    pub longitude: String,
    pub duration: String,
    pub turbine_manufacturer: String,
    pub turbine_age: String,
    pub ice_protection: bool,
    pub fire_suppression: bool,
}

/// Turbine details collected by the form. Descriptive only; the policy
/// contract has no fields for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurbineProfile {
    pub manufacturer: String,
    pub age_years: u32,
    pub ice_protection: bool,
    pub fire_suppression: bool,
}

impl PolicyForm {
    /// Form pre-filled with the preset location and duration.
    pub fn from_parameters(params: &PolicyParameters) -> Self {
        Self {
            latitude: params.latitude.clone(),
            longitude: params.longitude.clone(),
            duration: params.duration_days.to_string(),
            ..Self::default()
        }
    }

    /// Validate every field, reporting the first problem.
    ///
    /// Token, oracle and amount are not on the form and come from `base`.
    pub fn to_parameters(&self, base: &PolicyParameters) -> Result<PolicyParameters> {
        let latitude = validate_decimal_in_range(&self.latitude, -90.0, 90.0, "Latitude")
            .map_err(AppError::InvalidInput)?;
        let longitude = validate_decimal_in_range(&self.longitude, -180.0, 180.0, "Longitude")
            .map_err(AppError::InvalidInput)?;
        let duration_days = validate_positive_int(&self.duration, "Duration of Policy")
            .map_err(AppError::InvalidInput)?;
        self.turbine_profile()?;

        Ok(PolicyParameters {
            latitude,
            longitude,
            duration_days,
            ..base.clone()
        })
    }

    pub fn turbine_profile(&self) -> Result<TurbineProfile> {
        validate_not_empty(&self.turbine_manufacturer, "Turbine Manufacturer")
            .map_err(AppError::InvalidInput)?;
        validate_not_empty(&self.turbine_age, "Age of Turbines").map_err(AppError::InvalidInput)?;
        let age_years = self.turbine_age.trim().parse::<u32>().map_err(|_| {
            AppError::InvalidInput("Age of Turbines must be a whole number of years".to_string())
        })?;

        Ok(TurbineProfile {
            manufacturer: self.turbine_manufacturer.trim().to_string(),
            age_years,
            ice_protection: self.ice_protection,
            fire_suppression: self.fire_suppression,
        })
    }
}

/// Pick the parameters for a submission.
///
/// With `bind_form` off the preset is used as-is and the form is ignored.
pub fn resolve_parameters(config: &Config, form: &PolicyForm) -> Result<PolicyParameters> {
    if config.bind_form {
        form.to_parameters(&config.policy_preset)
    } else {
        Ok(config.policy_preset.clone())
    }
}
