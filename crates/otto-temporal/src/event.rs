//! Calendar event payloads built from spoken phrases

use crate::{is_iso_date, is_iso_time, resolve_date, resolve_time, DateContext, TemporalError};
use serde::{Deserialize, Serialize};

/// A calendar event request with date and time already normalized.
///
/// Fields that could not be resolved hold the caller's original phrase; the
/// downstream calendar service may reject those. Use [`EventRequest::validate`]
/// to catch them first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRequest {
    pub title: String,
    pub date: String,
    pub time: String,
}

impl EventRequest {
    pub fn from_phrases(title: &str, date: &str, time: &str, ctx: &DateContext) -> Self {
        Self {
            title: title.trim().to_string(),
            date: resolve_date(date, ctx),
            time: resolve_time(time),
        }
    }

    /// Check that both fields resolved to canonical values
    pub fn validate(&self) -> Result<(), TemporalError> {
        if !is_iso_date(&self.date) {
            return Err(TemporalError::UnresolvedDate(self.date.clone()));
        }
        if !is_iso_time(&self.time) {
            return Err(TemporalError::UnresolvedTime(self.time.clone()));
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
