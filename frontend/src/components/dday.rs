use chrono::{Local, NaiveDate};
use common::{AnniversaryRecord, DdayState};
use leptos::prelude::*;
use thaw::Spinner;

use crate::{
    api::{error::FetchError, Api},
    fetch::{use_fetch, FetchState},
};

use core::marker::PhantomData;

/// Active d-day together with where today stands relative to it
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    pub record: AnniversaryRecord,
    pub state: DdayState,
}

impl Countdown {
    /// `None` unless the server sent exactly one record
    pub fn from_records(
        records: &[AnniversaryRecord],
        today: NaiveDate,
    ) -> Result<Option<Self>, FetchError> {
        let [record] = records else {
            return Ok(None);
        };
        let target = record
            .target_date()
            .ok_or_else(|| FetchError::invalid_date(record))?;
        Ok(Some(Self {
            record: record.clone(),
            state: DdayState::between(target, today),
        }))
    }
}

/// What the `Dday` component loads on mount
pub async fn load_countdown<A: Api>(
    api: A,
    today: NaiveDate,
) -> Result<Option<Countdown>, FetchError> {
    let records = api.dday().await?;
    Countdown::from_records(&records, today)
}

fn countdown_view(Countdown { record, state }: Countdown) -> impl IntoView {
    let date = record.date_label();
    view! {
        <div class="dday-container">
            <div class="dday-count">
                <div>{state.label()}</div>
            </div>
            <div class="dday-contents">{record.contents}</div>
            <div class="dday-date">{date}</div>
        </div>
    }
}

#[component]
pub fn Dday<A: Api>(#[prop(optional)] _ph: PhantomData<A>) -> impl IntoView {
    // taken once, the count stays as of mount
    let today = Local::now().date_naive();
    let countdown = use_fetch::<A, _, _>(move |api| load_countdown(api, today));

    view! {
        <div class="dday" data-state=move || countdown.get().kind()>
            {move || match countdown.get() {
                FetchState::Loading => view! { <Spinner /> }.into_any(),
                FetchState::Loaded(countdown) => countdown_view(countdown).into_any(),
                FetchState::Empty | FetchState::Failed(_) => ().into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use common::{AnniversaryRecord, DdayState, UserRecord};
    use futures::executor::block_on;
    use leptos::prelude::*;
    use serde_json::Value;

    use super::{load_countdown, Countdown};
    use crate::{
        api::{dummy::DummyApi, error::FetchError},
        fetch::{run_fetch, FetchState, MountGuard},
    };

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_record_today() {
        let record = AnniversaryRecord::new(2024, 3, 1, "Anniversary");
        let countdown = Countdown::from_records(&[record.clone()], day(2024, 3, 1))
            .unwrap()
            .unwrap();
        assert_eq!(countdown.state, DdayState::Today);
        assert_eq!(countdown.state.label(), "D - DAY");
        assert_eq!(countdown.record, record);
    }

    #[test]
    fn single_record_tomorrow() {
        let countdown = Countdown::from_records(
            &[AnniversaryRecord::new(2025, 1, 1, "new year")],
            day(2024, 12, 31),
        )
        .unwrap()
        .unwrap();
        assert_eq!(countdown.state.diff(), 1);
        assert_eq!(countdown.state.label(), "D - 1");
    }

    #[test]
    fn past_record() {
        let countdown = Countdown::from_records(
            &[AnniversaryRecord::new(2024, 2, 20, "first date")],
            day(2024, 3, 1),
        )
        .unwrap()
        .unwrap();
        assert_eq!(countdown.state.label(), "D + 10");
    }

    #[test]
    fn nothing_to_show() {
        let today = day(2024, 3, 1);
        assert_eq!(Countdown::from_records(&[], today), Ok(None));

        let two = [
            AnniversaryRecord::new(2024, 3, 1, "a"),
            AnniversaryRecord::new(2024, 4, 1, "b"),
        ];
        assert_eq!(Countdown::from_records(&two, today), Ok(None));
    }

    #[test]
    fn impossible_date() {
        assert_eq!(
            Countdown::from_records(&[AnniversaryRecord::new(2023, 2, 29, "")], day(2024, 3, 1)),
            Err(FetchError::InvalidDate {
                year: 2023,
                month: 2,
                date: 29
            })
        );
    }

    /// Mounts a component owner over a dummy backend holding `records`
    /// and runs the d-day fetch to completion
    fn mounted_dday(records: Vec<AnniversaryRecord>) -> FetchState<Countdown> {
        let owner = Owner::new();
        owner.set();
        provide_context(DummyApi::with_data(records, Vec::<UserRecord>::new(), Value::Null));

        let state = RwSignal::new(FetchState::Loading);
        let guard = MountGuard::for_owner();
        let api = expect_context::<DummyApi>();
        let today = day(2024, 3, 1);
        assert!(block_on(run_fetch(
            api,
            |api| load_countdown(api, today),
            state,
            guard
        )));
        state.get_untracked()
    }

    #[test]
    fn fetch_without_dday_is_empty() {
        assert_eq!(mounted_dday(vec![]), FetchState::Empty);
        assert_eq!(
            mounted_dday(vec![AnniversaryRecord::new(2024, 3, 1, "not flagged")]),
            FetchState::Empty
        );
    }

    #[test]
    fn fetch_single_dday() {
        let record = AnniversaryRecord::new(2024, 3, 1, "Anniversary").as_d_day();
        let state = mounted_dday(vec![record.clone()]);
        assert_eq!(
            state,
            FetchState::Loaded(Countdown {
                record,
                state: DdayState::Today
            })
        );
        assert_eq!(state.kind(), "loaded");
    }

    #[test]
    fn fetch_two_ddays_is_empty() {
        let state = mounted_dday(vec![
            AnniversaryRecord::new(2024, 3, 1, "a").as_d_day(),
            AnniversaryRecord::new(2024, 4, 1, "b").as_d_day(),
        ]);
        assert_eq!(state, FetchState::Empty);
    }

    #[test]
    fn fetch_failure_is_failed() {
        let owner = Owner::new();
        owner.set();
        let api = DummyApi::with_data(
            vec![AnniversaryRecord::new(2024, 3, 1, "x").as_d_day()],
            Vec::<UserRecord>::new(),
            Value::Null,
        );
        api.set_failure_rate(1.0);

        let state = RwSignal::new(FetchState::Loading);
        let guard = MountGuard::for_owner();
        block_on(run_fetch(
            api,
            |api| load_countdown(api, day(2024, 3, 1)),
            state,
            guard,
        ));
        assert_eq!(state.get_untracked(), FetchState::Failed(FetchError::Unknown));
    }

    #[test]
    fn response_after_unmount_is_dropped() {
        let page = Owner::new();
        page.set();
        provide_context(DummyApi::with_data(
            vec![AnniversaryRecord::new(2024, 3, 1, "Anniversary").as_d_day()],
            Vec::<UserRecord>::new(),
            Value::Null,
        ));
        let state = RwSignal::new(FetchState::<Countdown>::Loading);

        let component = page.child();
        let guard = component.with(MountGuard::for_owner);
        // torn down before the response arrives
        component.cleanup();

        let api = expect_context::<DummyApi>();
        let applied = block_on(run_fetch(
            api,
            |api| load_countdown(api, day(2024, 3, 1)),
            state,
            guard,
        ));
        assert!(!applied);
        assert_eq!(state.get_untracked(), FetchState::Loading);
    }
}
