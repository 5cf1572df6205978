#![allow(async_fn_in_trait)]

pub mod api;
pub mod config;
pub mod fetch;

mod components;

mod pages;
use pages::{Example, Home};

use core::marker::PhantomData;

use api::{dummy::DummyApi, real::RealApi, Api};
use config::{Backend, Config};
use leptos::{component, logging, mount::mount_to_body, prelude::*, view, IntoView};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};
use thaw::{ConfigProvider, Theme};

pub trait ErrorAction: core::fmt::Display {
    fn should_log(&self) -> bool;

    fn is_bug(&self) -> bool;
}

fn not_found<A: Api>() -> impl IntoView {
    view! {
        <div>
            <p>"Not found :("</p>
            {expect_context::<AppRouter<A>>().anchor_home()}
        </div>
    }
}

#[derive(Clone)]
pub struct AppRouter<A: Api>(PhantomData<A>);

impl<A: Api> Default for AppRouter<A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! endpoint_anchor {
    ($name:ident, $path:literal, $($children:tt)+) => {
        pub fn $name(&self) -> impl IntoView {
            view! {
                <a href=$path >$($children)+</a>
            }
        }
    };
}

impl<A: Api> AppRouter<A> {
    #[inline]
    pub fn new() -> Self {
        Self(PhantomData)
    }

    pub fn routes(&self) -> impl IntoView {
        let fallback = not_found::<A>;
        view! {
            <Routes fallback>
                <Route path=path!("/") view=move || view! { <Home<A> /> } />
                <Route path=path!("/example") view=move || view! { <Example<A> /> } />
            </Routes>
        }
    }

    endpoint_anchor!(anchor_home, "/", "D-day");
    endpoint_anchor!(anchor_example, "/example", "Connectivity check");
}

#[component]
pub fn App<A: Api>(api: A) -> impl IntoView {
    provide_context(api);
    provide_context(AppRouter::<A>::new());
    let theme = RwSignal::new(Theme::light());
    view! {
        <ConfigProvider theme>
            <Router>
                <nav>
                    {expect_context::<AppRouter<A>>().anchor_home()}
                    " "
                    {expect_context::<AppRouter<A>>().anchor_example()}
                </nav>
                <main>{expect_context::<AppRouter<A>>().routes()}</main>
            </Router>
        </ConfigProvider>
    }
}

/// Mounts the app against whichever backend `config` names
pub fn start(config: Config) {
    match config.backend {
        Backend::Http => {
            logging::log!("Using couple service at {}", config.base_url);
            let api = RealApi::new(config);
            mount_to_body(move || view! { <App api /> });
        }
        Backend::Dummy => {
            logging::log!("Using dummy api, nothing is sent to {}", config.base_url);
            let api = DummyApi::new();
            mount_to_body(move || view! { <App api /> });
        }
    }
}
