use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::repository::HealthCheck;

pub const DATABASE_CONNECTED: &str = "connected";
pub const DATABASE_UNAVAILABLE: &str = "unavailable";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.database == DATABASE_CONNECTED
    }
}

/// Probes the database. A failed probe degrades the report instead of
/// erroring so the endpoint itself stays answerable.
pub fn check_health<R>(repo: &R) -> HealthReport
where
    R: HealthCheck + ?Sized,
{
    let (status, database) = match repo.ping() {
        Ok(()) => ("ok", DATABASE_CONNECTED),
        Err(e) => {
            log::error!("Health probe failed: {e}");
            ("degraded", DATABASE_UNAVAILABLE)
        }
    };

    HealthReport {
        status,
        database,
        version: env!("CARGO_PKG_VERSION"),
        checked_at: Utc::now(),
    }
}
