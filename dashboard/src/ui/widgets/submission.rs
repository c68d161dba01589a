//! # Submission Panel
//!
//! "Create Policy" button and the banner reporting the current attempt.

use lib_core::PolicyParameters;
use lib_evm::FailureKind;

use crate::app::{AppState, SubmissionState};
use crate::ui::theme::Theme;
use crate::ui::UiAction;

/// Visual tone of the submission banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerTone {
    Info,
    Success,
    Warning,
    Error,
}

/// Banner tone and text for a submission state; `None` while idle.
pub fn banner(state: &SubmissionState) -> Option<(BannerTone, String)> {
    match state {
        SubmissionState::Idle => None,
        SubmissionState::Pending { started_at, .. } => Some((
            BannerTone::Info,
            format!(
                "Waiting for wallet approval and confirmation ({}s)",
                started_at.elapsed().as_secs()
            ),
        )),
        SubmissionState::Succeeded(summary) => Some((
            BannerTone::Success,
            format!("Policy created at {}", summary.address),
        )),
        SubmissionState::Failed { kind, message, retryable } => {
            let tone = match kind {
                FailureKind::Declined | FailureKind::NotConnected => BannerTone::Warning,
                _ => BannerTone::Error,
            };
            let text = if *retryable {
                format!("{} You can try again.", message)
            } else {
                message.clone()
            };
            Some((tone, text))
        }
    }
}

/// Why the button is disabled, if it is.
pub fn disabled_reason(state: &AppState) -> Option<&'static str> {
    if state.submission.is_pending() {
        Some("A policy submission is already in progress")
    } else if !state.wallet.is_active() {
        Some("Connect a wallet first")
    } else {
        None
    }
}

pub fn render_submit_section(
    ui: &mut egui::Ui,
    state: &AppState,
    preview: Option<&PolicyParameters>,
    theme: &Theme,
    actions: &mut Vec<UiAction>,
) {
    if let Some(params) = preview {
        ui.label(
            egui::RichText::new(format!(
                "Policy amount {} ETH · daily premium {} ETH · {} days",
                params.amount_eth(),
                params.daily_premium_eth(),
                params.duration_days
            ))
            .color(theme.dim),
        );
    }
    ui.add_space(6.0);

    let button = egui::Button::new(egui::RichText::new("Create Policy").strong()).min_size(egui::vec2(160.0, 30.0));
    let mut response = ui.add_enabled(state.can_submit(), button);
    if let Some(reason) = disabled_reason(state) {
        response = response.on_disabled_hover_text(reason);
    }
    if response.clicked() {
        actions.push(UiAction::SubmitPolicy);
    }

    let Some((tone, text)) = banner(&state.submission) else {
        return;
    };
    let color = match tone {
        BannerTone::Info => theme.dim,
        BannerTone::Success => theme.success,
        BannerTone::Warning => theme.warning,
        BannerTone::Error => theme.error,
    };

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if state.submission.is_pending() {
            ui.spinner();
        }
        ui.label(egui::RichText::new(text).color(color));
    });

    if let SubmissionState::Succeeded(summary) = &state.submission {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!(
                    "tx {} · {}",
                    summary.deployment_tx,
                    lib_utils::format_clock(summary.created_at)
                ))
                .color(theme.dim),
            );
            if ui.small_button("Copy address").clicked() {
                ui.ctx().copy_text(summary.address.to_string());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PolicySummary;
    use alloy_primitives::{Address, B256};
    use lib_evm::mock::MockProvider;
    use std::sync::Arc;
    use std::time::Instant;
    use uuid::Uuid;

    #[test]
    fn test_idle_has_no_banner() {
        assert_eq!(banner(&SubmissionState::Idle), None);
    }

    #[test]
    fn test_pending_banner() {
        let state = SubmissionState::Pending {
            attempt_id: Uuid::new_v4(),
            started_at: Instant::now(),
            params: PolicyParameters::preset(),
        };
        let (tone, text) = banner(&state).unwrap();
        assert_eq!(tone, BannerTone::Info);
        assert!(text.starts_with("Waiting for wallet approval"));
    }

    #[test]
    fn test_success_banner_names_policy() {
        let address = Address::new([0xbb; 20]);
        let state = SubmissionState::Succeeded(PolicySummary {
            address,
            deployment_tx: B256::ZERO,
            created_at: lib_utils::now_utc(),
        });
        let (tone, text) = banner(&state).unwrap();
        assert_eq!(tone, BannerTone::Success);
        assert!(text.contains(&address.to_string()));
    }

    #[test]
    fn test_declined_is_warning_with_retry_hint() {
        let state = SubmissionState::Failed {
            kind: FailureKind::Declined,
            message: "Transaction was rejected in the wallet.".to_string(),
            retryable: true,
        };
        let (tone, text) = banner(&state).unwrap();
        assert_eq!(tone, BannerTone::Warning);
        assert!(text.ends_with("You can try again."));
    }

    #[test]
    fn test_integrity_failure_is_error() {
        let state = SubmissionState::Failed {
            kind: FailureKind::Integrity,
            message: "bad list".to_string(),
            retryable: false,
        };
        assert_eq!(banner(&state), Some((BannerTone::Error, "bad list".to_string())));
    }

    #[test]
    fn test_disabled_reason_when_disconnected() {
        let state = AppState::new(Arc::new(MockProvider::new()), &PolicyParameters::preset());
        assert_eq!(disabled_reason(&state), Some("Connect a wallet first"));
    }
}
