use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Datelike, Days, Local, NaiveDate};
use common::{AnniversaryRecord, UserId, UserRecord};
use fastrand::Rng as FastRng;
use leptos::logging;
use serde_json::Value;

use super::{error::FetchError, Api};

async fn server_response() {
    // imitate slow server response
    #[cfg(all(debug_assertions, target_arch = "wasm32"))]
    wasmtimer::tokio::sleep(std::time::Duration::from_millis(200)).await;
}

fn record_at(id: i64, date: NaiveDate, contents: &str) -> AnniversaryRecord {
    AnniversaryRecord::new(date.year(), date.month(), date.day(), contents).with_id(id)
}

#[derive(Debug)]
struct Data {
    rng: FastRng,
    failure_rate: f32,
    anniversaries: Vec<AnniversaryRecord>,
    users: Vec<UserRecord>,
    message: Value,
}

impl Data {
    fn server_failure(&mut self) -> Result<(), FetchError> {
        if self.rng.f32() < self.failure_rate {
            logging::warn!("Don't worry, it's a simulated error");
            return Err(FetchError::Unknown);
        }

        Ok(())
    }

    fn dday(&self) -> Box<[AnniversaryRecord]> {
        self.anniversaries
            .iter()
            .filter(|record| record.d_day)
            .cloned()
            .collect()
    }

    fn month(&self, year: i32, month: u32) -> Box<[AnniversaryRecord]> {
        let mut records = self
            .anniversaries
            .iter()
            .filter(|record| record.year == year && record.month == month)
            .cloned()
            .collect::<Vec<_>>();
        records.sort_by_key(|record| record.date);
        records.into_boxed_slice()
    }
}

/// In-memory stand-in for the couple service
#[derive(Debug, Clone)]
pub struct DummyApi {
    data: Arc<Mutex<Data>>,
}

impl Default for DummyApi {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyApi {
    /// A couple that started dating 99 days ago, so the d-day is tomorrow
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        let shifted = |days: i64| {
            let delta = Days::new(days.unsigned_abs());
            let date = if days < 0 {
                today.checked_sub_days(delta)
            } else {
                today.checked_add_days(delta)
            };
            date.unwrap_or(today)
        };

        let anniversaries = vec![
            record_at(1, shifted(-99), "first date"),
            record_at(2, shifted(1), "100 days").as_d_day(),
            record_at(3, shifted(-14), "movie night"),
            record_at(4, shifted(20), "trip to busan"),
        ];
        let users = vec![
            UserRecord {
                id: UserId::Text("admin".into()),
            },
            UserRecord {
                id: UserId::Text("partner".into()),
            },
        ];

        let api = Self::with_data(anniversaries, users, "hello from dummy api");
        if cfg!(debug_assertions) {
            api.set_failure_rate(0.05);
        }
        api
    }

    /// Deterministic instance, never fails unless told to
    pub fn with_data(
        anniversaries: impl Into<Vec<AnniversaryRecord>>,
        users: impl Into<Vec<UserRecord>>,
        message: impl Into<Value>,
    ) -> Self {
        Self {
            data: Arc::new(Mutex::new(Data {
                rng: FastRng::with_seed(42),
                failure_rate: 0.0,
                anniversaries: anniversaries.into(),
                users: users.into(),
                message: message.into(),
            })),
        }
    }

    pub fn set_failure_rate(&self, failure_rate: f32) {
        match self.lock_data() {
            Ok(mut data) => data.failure_rate = failure_rate,
            Err(_) => logging::warn!("Data poison on failure rate update"),
        }
    }

    fn lock_data(&self) -> Result<MutexGuard<'_, Data>, FetchError> {
        self.data.lock().map_err(|_| FetchError::Unknown)
    }
}

impl Api for DummyApi {
    async fn dday(&self) -> Result<Box<[AnniversaryRecord]>, FetchError> {
        server_response().await;
        let mut data = self.lock_data()?;
        data.server_failure()?;

        Ok(data.dday())
    }

    async fn anniversaries(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Box<[AnniversaryRecord]>, FetchError> {
        server_response().await;
        let mut data = self.lock_data()?;
        data.server_failure()?;

        Ok(data.month(year, month))
    }

    async fn test_message(&self) -> Result<Value, FetchError> {
        server_response().await;
        let mut data = self.lock_data()?;
        data.server_failure()?;

        Ok(data.message.clone())
    }

    async fn users(&self) -> Result<Box<[UserRecord]>, FetchError> {
        server_response().await;
        let mut data = self.lock_data()?;
        data.server_failure()?;

        Ok(data.users.clone().into_boxed_slice())
    }
}
