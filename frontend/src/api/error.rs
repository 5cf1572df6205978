use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ErrorAction;

/// Anything that kept a fetch from producing data
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(String),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error("Server sent an impossible date {year}-{month}-{date}")]
    InvalidDate { year: i32, month: u32, date: u32 },
    /// Implementation-specific
    #[error("Unknown error")]
    Unknown,
}

impl FetchError {
    pub fn invalid_date(record: &common::AnniversaryRecord) -> Self {
        Self::InvalidDate {
            year: record.year,
            month: record.month,
            date: record.date,
        }
    }
}

impl ErrorAction for FetchError {
    fn should_log(&self) -> bool {
        // everything is logged, nothing is shown
        true
    }

    fn is_bug(&self) -> bool {
        match self {
            FetchError::Decode(_) | FetchError::InvalidDate { .. } => true,
            FetchError::Network(_) | FetchError::Status(_) | FetchError::Unknown => false,
        }
    }
}
