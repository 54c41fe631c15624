use serde::Deserialize;

use mentorship_core::config::Config;

/// Mentorship service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct MentorshipConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `MENTORSHIP_PORT`.
    #[serde(default = "default_port")]
    pub mentorship_port: u16,
    /// Seconds between overdue-relation sweeps (default 3600).
    /// Env var: `COMPLETE_OVERDUE_INTERVAL_SECS`.
    #[serde(default = "default_complete_overdue_interval_secs")]
    pub complete_overdue_interval_secs: u64,
}

fn default_port() -> u16 {
    3114
}

fn default_complete_overdue_interval_secs() -> u64 {
    3600
}

impl Config for MentorshipConfig {}
