//! # Profile Commands
//!
//! The logged-in user's cached data and the activity log. Passwords are
//! shown as stored.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shopfront_core::AuthPhase;
use shopfront_store::Storage;
use tracing::warn;

use crate::error::ApiError;
use crate::state::SessionState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub phase: AuthPhase,
    pub email: Option<String>,
    pub password: Option<String>,
    pub logged_in_at: Option<DateTime<Utc>>,
}

pub fn get_profile(session: &SessionState) -> ProfileResponse {
    let phase = session.phase();
    match session.session() {
        Some(s) => ProfileResponse {
            phase,
            email: Some(s.email),
            password: Some(s.password),
            logged_in_at: Some(s.logged_in_at),
        },
        None => ProfileResponse {
            phase,
            email: None,
            password: None,
            logged_in_at: None,
        },
    }
}

pub async fn get_logs(storage: &Storage) -> Result<Vec<String>, ApiError> {
    Ok(storage.logs().list().await?)
}

/// Appends an activity log line. A failed write is logged and dropped.
pub(crate) async fn record_activity(storage: &Storage, event: &str, at: DateTime<Utc>) {
    if let Err(e) = storage.logs().record(event, at).await {
        warn!(event, error = %e, "Failed to record activity");
    }
}
