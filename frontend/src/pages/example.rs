use leptos::prelude::*;

use crate::{
    api::Api,
    components::{TestMessage, UserList},
};

use core::marker::PhantomData;

/// Raw dump of the smoke-test endpoints
#[component]
pub fn Page<A: Api>(#[prop(optional)] _ph: PhantomData<A>) -> impl IntoView {
    view! {
        <div>
            <UserList<A> />
            <TestMessage<A> />
        </div>
    }
}
