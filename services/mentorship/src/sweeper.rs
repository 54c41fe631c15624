//! Periodic completion of accepted relations that ran past their end date.

use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;

use crate::state::AppState;
use crate::usecase::relation::CompleteOverdueRelationsUseCase;

/// Run forever, sweeping once per `period`. The first sweep happens immediately.
pub async fn run_overdue_sweeper(state: AppState, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let usecase = CompleteOverdueRelationsUseCase {
            relations: state.relation_repo(),
        };
        if let Err(e) = usecase.execute(Utc::now()).await {
            tracing::warn!(error = %e, "overdue relation sweep failed");
        }
    }
}
