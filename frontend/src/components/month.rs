use common::AnniversaryRecord;
use leptos::prelude::*;
use thaw::Spinner;

use crate::{
    api::Api,
    fetch::{non_empty, use_fetch, FetchState},
};

use core::marker::PhantomData;

fn anniversary_item(record: AnniversaryRecord) -> impl IntoView {
    let class = if record.d_day {
        "anniversary dday-marked"
    } else {
        "anniversary"
    };
    view! { <li class=class>{record.day_label()}</li> }
}

/// Everything the couple saved for one month
#[component]
pub fn MonthAnniversaries<A: Api>(
    #[prop(optional)] _ph: PhantomData<A>,
    year: i32,
    /// one-based
    month: u32,
) -> impl IntoView {
    let listing = use_fetch::<A, _, _>(move |api| async move {
        api.anniversaries(year, month).await.map(non_empty)
    });

    view! {
        <div class="month-anniversaries" data-state=move || listing.get().kind()>
            <h3>{format!("{year}년 {month}월")}</h3>
            {move || match listing.get() {
                FetchState::Loading => view! { <Spinner /> }.into_any(),
                FetchState::Loaded(records) => {
                    view! {
                        <ul>
                            {records.into_vec().into_iter().map(anniversary_item).collect_view()}
                        </ul>
                    }
                        .into_any()
                }
                FetchState::Empty | FetchState::Failed(_) => ().into_any(),
            }}
        </div>
    }
}
