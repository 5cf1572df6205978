use std::future::Future;

use common::{AnniversaryRecord, UserRecord};
use error::FetchError;
use serde_json::Value;

pub mod dummy;
pub mod error;
pub mod real;

/// Path of the active d-day entry
pub const DDAY_PATH: &str = "/api/anniversary/dday";
/// Path of the month listing, takes `year` and `month` query params
pub const ANNIVERSARIES_PATH: &str = "/api/anniversary";
pub const TEST_PATH: &str = "/api/test";
pub const USERS_PATH: &str = "/api/usr";

/// Backend as seen by the components.
///
/// "No content" responses come back as empty lists, never as errors.
pub trait Api: Clone + Send + Sync + 'static {
    fn dday(&self) -> impl Future<Output = Result<Box<[AnniversaryRecord]>, FetchError>>;

    fn anniversaries(
        &self,
        year: i32,
        month: u32,
    ) -> impl Future<Output = Result<Box<[AnniversaryRecord]>, FetchError>>;

    fn test_message(&self) -> impl Future<Output = Result<Value, FetchError>>;

    fn users(&self) -> impl Future<Output = Result<Box<[UserRecord]>, FetchError>>;
}

/// Renders whatever `/api/test` sent: strings as is, anything else as json
pub fn message_text(message: &Value) -> String {
    match message {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
