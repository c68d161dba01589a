//! # Application State Types
//!
//! Everything the dashboard renders, plus the outcome of the policy
//! submission currently in flight.

use std::sync::Arc;
use std::time::Instant;

use alloy_primitives::{Address, B256};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use lib_core::dto::{example_policies, wind_cycle, LatestWindSpeed, PolicyRow, WindSample};
use lib_core::{PolicyForm, PolicyParameters};
use lib_evm::{DeployedPolicyHandle, FailureKind, WalletConnector, WalletProvider};

/// Outcome of the "Create Policy" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing submitted yet
    Idle,
    /// Waiting on wallet, confirmation or the policy list read
    Pending {
        attempt_id: Uuid,
        started_at: Instant,
        params: PolicyParameters,
    },
    Succeeded(PolicySummary),
    Failed {
        kind: FailureKind,
        message: String,
        retryable: bool,
    },
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending { .. })
    }

    pub fn attempt_id(&self) -> Option<Uuid> {
        match self {
            SubmissionState::Pending { attempt_id, .. } => Some(*attempt_id),
            _ => None,
        }
    }
}

/// What the success banner shows about a created policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySummary {
    pub address: Address,
    pub deployment_tx: B256,
    pub created_at: DateTime<Utc>,
}

/// The policy created by the last successful submission.
#[derive(Debug, Clone)]
pub struct LastPolicy {
    pub handle: DeployedPolicyHandle,
    pub params: PolicyParameters,
}

/// Follow-up actions on the last policy (premium payment, wind refresh).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Pending,
    Done(String),
    Failed(String),
}

impl ActionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, ActionState::Pending)
    }
}

/// Main application state
#[derive(Clone)]
pub struct AppState {
    pub wallet: WalletConnector,
    pub submission: SubmissionState,
    /// Handle from the last successful submission; replaced by the next one
    pub last_policy: Option<LastPolicy>,
    pub form: PolicyForm,
    /// First validation problem when the form drives submissions
    pub form_error: Option<String>,
    pub premium: ActionState,
    pub wind_refresh: ActionState,
    pub latest_wind: LatestWindSpeed,
    pub wind_cycle: Vec<WindSample>,
    pub example_policies: Vec<PolicyRow>,
    pub status_message: Option<String>,
    pub last_update: DateTime<Utc>,
}

impl AppState {
    pub fn new(provider: Arc<dyn WalletProvider>, preset: &PolicyParameters) -> Self {
        Self {
            wallet: WalletConnector::new(provider),
            submission: SubmissionState::Idle,
            last_policy: None,
            form: PolicyForm::from_parameters(preset),
            form_error: None,
            premium: ActionState::Idle,
            wind_refresh: ActionState::Idle,
            latest_wind: LatestWindSpeed::default(),
            wind_cycle: wind_cycle(),
            example_policies: example_policies(),
            status_message: None,
            last_update: lib_utils::now_utc(),
        }
    }

    /// Submit button is live only when connected and nothing is in flight.
    pub fn can_submit(&self) -> bool {
        self.wallet.is_active() && !self.submission.is_pending()
    }

    pub fn can_pay_premium(&self) -> bool {
        self.wallet.is_active() && self.last_policy.is_some() && !self.premium.is_pending()
    }

    pub fn can_refresh_wind(&self) -> bool {
        self.last_policy.is_some() && !self.wind_refresh.is_pending()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.last_update = lib_utils::now_utc();
    }
}
