use chrono::Utc;
use shared_types::AppConfig;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::service;
use crate::state::AppState;

/// Start the bill poller (only when the sheet is configured) and the OTP
/// regeneration ticker. The first poll runs immediately.
pub fn spawn_background_tasks(state: AppState, config: &AppConfig) -> Vec<JoinHandle<()>> {
    let mut handles = Vec::new();

    if state.sheet.is_some() {
        let poll = Duration::from_secs(config.sheet.poll_interval_secs.max(1));
        let poll_state = state.clone();
        handles.push(tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                service::refresh_bills(&poll_state).await;
            }
        }));
        tracing::info!(every_secs = poll.as_secs(), "Bill poller started");
    }

    let tick = Duration::from_secs(config.shifts.regen_tick_secs.max(1));
    handles.push(tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            regenerate_tick(&state).await;
        }
    }));

    handles
}

/// One pass of the OTP ticker. Returns how many codes were renewed.
pub async fn regenerate_tick(state: &AppState) -> usize {
    let renewed = state
        .workforce
        .write()
        .await
        .regenerate_expired_otps(Utc::now());
    if renewed > 0 {
        tracing::debug!(renewed, "Regenerated expired shift codes");
    }
    renewed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Workforce;
    use shared_types::{ShiftConfig, ShiftRequestType};

    #[tokio::test]
    async fn tick_renews_only_expired_codes() {
        let shifts = ShiftConfig { otp_ttl_secs: 0, regen_tick_secs: 1 };
        let state = AppState::new(Workforce::seeded(&shifts).shared(), None, None);
        {
            let mut wf = state.workforce.write().await;
            let past = Utc::now() - chrono::Duration::seconds(5);
            let req = wf.request_shift_action("2", ShiftRequestType::Start, past).unwrap();
            wf.generate_shift_otp("1", &req.id, past).unwrap();
            wf.request_shift_action("3", ShiftRequestType::Start, past).unwrap();
        }
        assert_eq!(regenerate_tick(&state).await, 1);
    }

    #[tokio::test]
    async fn offline_state_spawns_only_the_ticker() {
        let state = AppState::new(Workforce::seeded(&ShiftConfig::default()).shared(), None, None);
        let handles = spawn_background_tasks(state, &AppConfig::default());
        assert_eq!(handles.len(), 1);
        for h in handles {
            h.abort();
        }
    }
}
