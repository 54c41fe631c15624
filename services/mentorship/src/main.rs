use std::time::Duration;

use sea_orm::Database;
use tracing::info;

use mentorship_core::config::Config as _;
use mentorship_core::tracing::init_tracing;
use mentorship_service::config::MentorshipConfig;
use mentorship_service::router::build_router;
use mentorship_service::state::AppState;
use mentorship_service::sweeper::run_overdue_sweeper;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = MentorshipConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    let sweep_period = Duration::from_secs(config.complete_overdue_interval_secs.max(1));
    tokio::spawn(run_overdue_sweeper(state.clone(), sweep_period));

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.mentorship_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("mentorship service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
