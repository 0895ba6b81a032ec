//! Process status report.

use std::time::{Duration, Instant};

use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::http::server::AppState;

/// Body of `GET /status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub status: &'static str,
    /// Seconds since the server was created.
    pub uptime: f64,
    pub timestamp: String,
}

/// Monotonic process uptime.
#[derive(Debug, Clone, Copy)]
pub struct Uptime {
    started: Instant,
}

impl Uptime {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn report(&self) -> StatusReport {
        StatusReport {
            status: "up",
            uptime: self.elapsed().as_secs_f64(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl Default for Uptime {
    fn default() -> Self {
        Self::start()
    }
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusReport> {
    Json(state.uptime.report())
}
