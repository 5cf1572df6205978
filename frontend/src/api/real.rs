use std::sync::Arc;

use common::{AnniversaryRecord, UserRecord};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use web_sys::RequestCredentials;

use super::{error::FetchError, Api, ANNIVERSARIES_PATH, DDAY_PATH, TEST_PATH, USERS_PATH};
use crate::config::Config;

const NO_CONTENT: u16 = 204;

impl From<gloo_net::Error> for FetchError {
    fn from(value: gloo_net::Error) -> Self {
        match value {
            gloo_net::Error::SerdeError(err) => FetchError::Decode(err.to_string()),
            other => FetchError::Network(other.to_string()),
        }
    }
}

/// `Ok(false)` for "no content", `Ok(true)` if there's a body to decode
fn has_content(status: u16) -> Result<bool, FetchError> {
    match status {
        NO_CONTENT => Ok(false),
        200..=299 => Ok(true),
        other => Err(FetchError::Status(other)),
    }
}

/// Talks to the couple service over http
#[derive(Debug, Clone)]
pub struct RealApi {
    config: Arc<Config>,
}

impl RealApi {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    fn anniversaries_url(&self, year: i32, month: u32) -> String {
        format!(
            "{}?year={year}&month={month}",
            self.config.endpoint(ANNIVERSARIES_PATH)
        )
    }

    async fn get(&self, url: &str) -> Result<Option<Response>, FetchError> {
        // the server finds the couple by session cookie
        let response = Request::get(url)
            .credentials(RequestCredentials::Include)
            .send()
            .await?;
        Ok(has_content(response.status())?.then_some(response))
    }

    async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Box<[T]>, FetchError> {
        match self.get(url).await? {
            Some(response) => Ok(response.json::<Vec<T>>().await?.into_boxed_slice()),
            None => Ok(Box::default()),
        }
    }
}

impl Api for RealApi {
    async fn dday(&self) -> Result<Box<[AnniversaryRecord]>, FetchError> {
        self.get_list(&self.config.endpoint(DDAY_PATH)).await
    }

    async fn anniversaries(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Box<[AnniversaryRecord]>, FetchError> {
        self.get_list(&self.anniversaries_url(year, month)).await
    }

    async fn test_message(&self) -> Result<Value, FetchError> {
        match self.get(&self.config.endpoint(TEST_PATH)).await? {
            Some(response) => Ok(response.json::<Value>().await?),
            None => Ok(Value::Null),
        }
    }

    async fn users(&self) -> Result<Box<[UserRecord]>, FetchError> {
        self.get_list(&self.config.endpoint(USERS_PATH)).await
    }
}
