//! # Application Orchestrator
//!
//! [`App`] ties the egui frame loop to background chain tasks.
//!
//! ```text
//! ┌──────────────── UI thread (egui) ────────────────┐
//! │ update() → on_tick() → handle_event()            │
//! │          → ui::render() → handle_*_click()       │
//! └──────────────┬───────────────────────▲───────────┘
//!                │ tokio::spawn          │ async_channel
//! ┌──────────────▼───────────────────────┴───────────┐
//! │ tasks::policy / handlers::wallet (Tokio)         │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! State lives in `Arc<RwLock<AppState>>`. Locks are taken briefly and never
//! held across an `.await`.

mod events;
mod handlers;
mod state;
mod tasks;

pub use events::AppEvent;
pub use state::*;

use std::sync::Arc;

use alloy_primitives::Address;
use async_channel::{unbounded, Receiver, Sender};
use lib_core::dto::LatestWindSpeed;
use lib_core::Config;
use lib_evm::{ConfirmationPolicy, PolicySubmitter, WalletProvider, WalletStatus};
use parking_lot::RwLock;
use uuid::Uuid;

/// Main application orchestrator
pub struct App {
    /// Thread-safe shared application state
    pub state: Arc<RwLock<AppState>>,
    /// Results from background tasks, drained every frame
    pub event_rx: Receiver<AppEvent>,
    event_tx: Sender<AppEvent>,
    config: Config,
    submitter: PolicySubmitter,
}

impl App {
    pub fn new(config: Config, provider: Arc<dyn WalletProvider>) -> Self {
        let state = AppState::new(provider, &config.policy_preset);
        let (event_tx, event_rx) = unbounded();
        let submitter = PolicySubmitter::from_config(&config);

        tracing::info!(
            deployer = %config.deployer_address,
            bind_form = config.bind_form,
            attach_value = config.attach_value,
            "Dashboard state initialized"
        );

        Self {
            state: Arc::new(RwLock::new(state)),
            event_rx,
            event_tx,
            config,
            submitter,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Called every frame to apply finished task results.
    pub fn on_tick(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        let mut state = self.state.write();

        match event {
            AppEvent::WalletConnected(_) if !matches!(state.wallet.status(), WalletStatus::Connecting) => {
                tracing::info!("Ignoring wallet connection result after disconnect");
            }
            AppEvent::WalletConnected(Ok((account, chain_id))) => {
                state.wallet.set_status(WalletStatus::Connected(account), chain_id);
                state.set_status(format!("Wallet connected: {}", account));
            }
            AppEvent::WalletConnected(Err(message)) => {
                state.wallet.set_status(WalletStatus::Error(message.clone()), None);
                state.set_status(format!("Wallet connection failed: {}", message));
            }
            AppEvent::PolicySubmitted { attempt_id, result } => {
                if state.submission.attempt_id() != Some(attempt_id) {
                    tracing::warn!(%attempt_id, "Dropping result of a stale submission attempt");
                    return;
                }

                match result {
                    Ok(handle) => {
                        let params = match &state.submission {
                            SubmissionState::Pending { params, .. } => params.clone(),
                            _ => self.config.policy_preset.clone(),
                        };
                        let summary = PolicySummary {
                            address: handle.address(),
                            deployment_tx: handle.deployment_tx(),
                            created_at: lib_utils::now_utc(),
                        };
                        tracing::info!(policy = %summary.address, tx = %summary.deployment_tx, "Policy created");
                        state.set_status(format!("Policy created at {}", summary.address));
                        state.submission = SubmissionState::Succeeded(summary);
                        state.last_policy = Some(LastPolicy { handle, params });
                        // A task still running for the previous policy keeps its action pending
                        if !state.premium.is_pending() {
                            state.premium = ActionState::Idle;
                        }
                        if !state.wind_refresh.is_pending() {
                            state.wind_refresh = ActionState::Idle;
                        }
                    }
                    Err(e) => {
                        state.set_status(e.user_message());
                        state.submission = SubmissionState::Failed {
                            kind: e.kind(),
                            message: e.user_message(),
                            retryable: e.is_retryable(),
                        };
                    }
                }
            }
            AppEvent::PremiumPaid { policy, result } if !is_current_policy(&state, policy) => {
                state.premium = ActionState::Idle;
                match result {
                    Ok(_) => state.set_status(format!("Premium paid into earlier policy {}", policy)),
                    Err(message) => {
                        state.set_status(format!("Premium payment into earlier policy {} failed: {}", policy, message))
                    }
                }
            }
            AppEvent::PremiumPaid { result: Ok(tx_hash), .. } => {
                state.premium = ActionState::Done(format!("Premium paid ({})", tx_hash));
                state.set_status("Premium payment confirmed");
            }
            AppEvent::PremiumPaid { result: Err(message), .. } => {
                state.premium = ActionState::Failed(message.clone());
                state.set_status(format!("Premium payment failed: {}", message));
            }
            AppEvent::WindSpeedRead { policy, .. } if !is_current_policy(&state, policy) => {
                tracing::debug!(%policy, "Dropping wind speed read for an earlier policy");
                state.wind_refresh = ActionState::Idle;
            }
            AppEvent::WindSpeedRead { result: Ok(tenths), .. } => {
                state.latest_wind = LatestWindSpeed::from_oracle_reading(tenths);
                state.wind_refresh = ActionState::Done(format!("{:.1} km/h", tenths as f64 / 10.0));
            }
            AppEvent::WindSpeedRead { result: Err(message), .. } => {
                state.wind_refresh = ActionState::Failed(message);
            }
            AppEvent::Status(message) => state.set_status(message),
        }
    }

    pub fn handle_wallet_connect_click(&mut self) {
        handlers::wallet::handle_wallet_connect_click(self.state.clone(), self.event_tx.clone());
    }

    pub fn handle_wallet_disconnect_click(&mut self) {
        handlers::wallet::handle_wallet_disconnect_click(self.state.clone());
    }

    /// Start a submission; `None` if one is pending or the form is invalid.
    pub fn handle_submit_click(&mut self) -> Option<Uuid> {
        tasks::policy::submit_policy(
            self.state.clone(),
            self.event_tx.clone(),
            self.submitter.clone(),
            &self.config,
        )
    }

    pub fn handle_pay_premium_click(&mut self) {
        tasks::policy::pay_premium(
            self.state.clone(),
            self.event_tx.clone(),
            ConfirmationPolicy::from_config(&self.config),
        );
    }

    pub fn handle_refresh_wind_click(&mut self) {
        tasks::policy::refresh_wind_speed(self.state.clone(), self.event_tx.clone());
    }

    pub fn event_tx(&self) -> Sender<AppEvent> {
        self.event_tx.clone()
    }
}

fn is_current_policy(state: &AppState, policy: Address) -> bool {
    state.last_policy.as_ref().map(|last| last.handle.address()) == Some(policy)
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.on_tick();
        crate::ui::render(ctx, self, frame);

        // Keep polling while tasks are out so results show without input.
        let busy = {
            let state = self.state.read();
            state.submission.is_pending()
                || state.premium.is_pending()
                || state.wind_refresh.is_pending()
                || matches!(state.wallet.status(), WalletStatus::Connecting)
        };
        if busy {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}
