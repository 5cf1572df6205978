use leptos::prelude::*;

use crate::{
    api::{error::FetchError, message_text, Api},
    fetch::{non_empty, use_fetch},
};

use core::marker::PhantomData;

/// Ids of every user the backend knows about
#[component]
pub fn UserList<A: Api>(#[prop(optional)] _ph: PhantomData<A>) -> impl IntoView {
    let users = use_fetch::<A, _, _>(|api| async move { api.users().await.map(non_empty) });

    view! {
        <div class="users" data-state=move || users.get().kind()>
            {move || {
                users
                    .get()
                    .loaded()
                    .map(|users| {
                        users
                            .into_vec()
                            .into_iter()
                            .map(|user| view! { <div>{user.id.to_string()}</div> })
                            .collect_view()
                    })
            }}
        </div>
    }
}

/// Whatever `/api/test` has to say
#[component]
pub fn TestMessage<A: Api>(#[prop(optional)] _ph: PhantomData<A>) -> impl IntoView {
    let message = use_fetch::<A, _, _>(|api| async move {
        let message = api.test_message().await?;
        Ok::<_, FetchError>((!message.is_null()).then(|| message_text(&message)))
    });

    view! {
        <div class="test-message" data-state=move || message.get().kind()>
            {move || message.get().loaded()}
        </div>
    }
}
