//! # Policy Tasks
//!
//! Policy submission and the follow-up actions on the created policy.
//!
//! Each entry point checks and updates state under one write lock before
//! spawning, so a second click while a task is pending is dropped.

use std::sync::Arc;
use std::time::Instant;

use async_channel::Sender;
use lib_core::dto::resolve_parameters;
use lib_core::Config;
use lib_evm::{ConfirmationPolicy, PolicySubmitter};
use parking_lot::RwLock;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::app::events::AppEvent;
use crate::app::state::{ActionState, AppState, SubmissionState};

/// Start a policy submission unless one is already pending.
///
/// Returns the attempt id when a task was spawned.
pub(crate) fn submit_policy(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    submitter: PolicySubmitter,
    config: &Config,
) -> Option<Uuid> {
    let attempt_id = Uuid::new_v4();

    let (wallet, params) = {
        let mut state = state.write();
        if state.submission.is_pending() {
            debug!("Submission already pending, ignoring click");
            return None;
        }

        let params = match resolve_parameters(config, &state.form) {
            Ok(params) => params,
            Err(e) => {
                state.form_error = Some(e.user_message());
                return None;
            }
        };

        state.form_error = None;
        state.submission = SubmissionState::Pending {
            attempt_id,
            started_at: Instant::now(),
            params: params.clone(),
        };
        state.set_status("Creating policy...");
        (state.wallet.clone(), params)
    }; // Lock released before the task starts

    let span = info_span!("submit_policy", %attempt_id);
    tokio::spawn(
        async move {
            info!(amount_wei = %params.amount, duration_days = params.duration_days, "Submitting policy");
            let result = submitter.submit_new_policy(&wallet, &params).await;
            if let Err(e) = &result {
                warn!(error = %e, kind = ?e.kind(), "Policy submission failed");
            }
            let _ = event_tx.send(AppEvent::PolicySubmitted { attempt_id, result }).await;
        }
        .instrument(span),
    );

    Some(attempt_id)
}

/// Pay one day's premium into the last created policy.
pub(crate) fn pay_premium(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    confirmation: ConfirmationPolicy,
) {
    let (handle, premium) = {
        let mut state = state.write();
        if !state.can_pay_premium() {
            debug!("Premium payment not available");
            return;
        }
        let Some(last) = state.last_policy.clone() else {
            return;
        };
        state.premium = ActionState::Pending;
        (last.handle, last.params.daily_premium())
    };

    tokio::spawn(async move {
        let policy = handle.address();
        info!(%policy, premium_wei = %premium, "Paying premium");
        let result = handle
            .pay_premium(premium, &confirmation)
            .await
            .map(|receipt| receipt.transaction_hash)
            .map_err(|e| e.to_string());
        let _ = event_tx.send(AppEvent::PremiumPaid { policy, result }).await;
    });
}

/// Read the latest oracle wind speed from the last created policy.
pub(crate) fn refresh_wind_speed(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let handle = {
        let mut state = state.write();
        if !state.can_refresh_wind() {
            return;
        }
        let Some(last) = state.last_policy.clone() else {
            return;
        };
        state.wind_refresh = ActionState::Pending;
        last.handle
    };

    tokio::spawn(async move {
        let policy = handle.address();
        let result = handle.latest_wind_speed().await.map_err(|e| e.to_string());
        let _ = event_tx.send(AppEvent::WindSpeedRead { policy, result }).await;
    });
}
