use chrono::{Datelike, Local};
use leptos::prelude::*;

use crate::{
    api::Api,
    components::{Dday, MonthAnniversaries},
};

use core::marker::PhantomData;

#[component]
pub fn Page<A: Api>(#[prop(optional)] _ph: PhantomData<A>) -> impl IntoView {
    let today = Local::now().date_naive();

    view! {
        <Dday<A> />
        <MonthAnniversaries<A> year=today.year() month=today.month() />
    }
}
