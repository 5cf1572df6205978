use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use leptos::{
    logging,
    prelude::{expect_context, on_cleanup, ReadSignal, RwSignal, Set},
    task::spawn_local,
};

use crate::{api::error::FetchError, api::Api, ErrorAction};

/// Lifecycle of a single mount-time fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    /// server had nothing to show
    Empty,
    Loaded(T),
    Failed(FetchError),
}

impl<T> FetchState<T> {
    pub fn from_result(result: Result<Option<T>, FetchError>) -> Self {
        match result {
            Ok(Some(value)) => Self::Loaded(value),
            Ok(None) => Self::Empty,
            Err(err) => Self::Failed(err),
        }
    }

    /// Value for the `data-state` attribute of the rendered region
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Empty => "empty",
            Self::Loaded(_) => "loaded",
            Self::Failed(_) => "failed",
        }
    }

    pub fn loaded(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// `Some` for non-empty lists, so empty responses turn into [`FetchState::Empty`]
pub fn non_empty<T>(items: Box<[T]>) -> Option<Box<[T]>> {
    (!items.is_empty()).then_some(items)
}

/// Tells a pending fetch whether its component is still around
#[derive(Debug, Clone)]
pub struct MountGuard(Arc<AtomicBool>);

impl MountGuard {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Guard that unmounts together with the current reactive owner
    pub fn for_owner() -> Self {
        let guard = Self::new();
        on_cleanup({
            let guard = guard.clone();
            move || guard.unmount()
        });
        guard
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Runs `apply` only while mounted, returns whether it ran
    pub fn apply_if_mounted(&self, apply: impl FnOnce()) -> bool {
        let mounted = self.is_mounted();
        if mounted {
            apply();
        }
        mounted
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_error(error: &impl ErrorAction) {
    if !error.should_log() {
        return;
    }
    if error.is_bug() {
        logging::error!("{error}");
    } else {
        logging::warn!("{error}");
    }
}

/// Runs `fetch` and stores its outcome in `state` while `guard` is mounted.
///
/// Returns whether the outcome was stored.
pub async fn run_fetch<A, T, Fut>(
    api: A,
    fetch: impl FnOnce(A) -> Fut,
    state: RwSignal<FetchState<T>>,
    guard: MountGuard,
) -> bool
where
    A: Api,
    T: Send + Sync + 'static,
    Fut: Future<Output = Result<Option<T>, FetchError>>,
{
    let result = fetch(api).await;
    if let Err(error) = &result {
        log_error(error);
    }
    let applied = guard.apply_if_mounted(|| state.set(FetchState::from_result(result)));
    if !applied {
        logging::debug_warn!("Response arrived after unmount, dropped");
    }
    applied
}

/// Starts `fetch` once, for the lifetime of the calling component.
///
/// Result arriving after the component is gone is dropped.
///
/// ### Panics
/// If api context was never provided
pub fn use_fetch<A, T, Fut>(fetch: impl FnOnce(A) -> Fut + 'static) -> ReadSignal<FetchState<T>>
where
    A: Api,
    T: Send + Sync + 'static,
    Fut: Future<Output = Result<Option<T>, FetchError>> + 'static,
{
    let api = expect_context::<A>();
    let state = RwSignal::new(FetchState::Loading);
    let guard = MountGuard::for_owner();

    spawn_local(async move {
        run_fetch(api, fetch, state, guard).await;
    });

    state.read_only()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use leptos::prelude::Owner;

    use super::{non_empty, FetchState, MountGuard};
    use crate::api::error::FetchError;

    #[test]
    fn states_from_results() {
        assert_eq!(FetchState::from_result(Ok(Some(3))), FetchState::Loaded(3));
        assert_eq!(FetchState::<u8>::from_result(Ok(None)), FetchState::Empty);
        assert_eq!(
            FetchState::<u8>::from_result(Err(FetchError::Status(502))),
            FetchState::Failed(FetchError::Status(502))
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(FetchState::<()>::Loading.kind(), "loading");
        assert_eq!(FetchState::<()>::Empty.kind(), "empty");
        assert_eq!(FetchState::Loaded(()).kind(), "loaded");
        assert_eq!(FetchState::<()>::Failed(FetchError::Unknown).kind(), "failed");
        assert_eq!(FetchState::Loaded(1).loaded(), Some(1));
        assert_eq!(FetchState::<u8>::Empty.loaded(), None);
    }

    #[test]
    fn empty_lists() {
        assert_eq!(non_empty::<u8>(Box::default()), None);
        assert_eq!(non_empty(Box::from([1, 2])).as_deref(), Some(&[1, 2][..]));
    }

    #[test]
    fn guard_drops_late_results() {
        let guard = MountGuard::new();
        let spawned = guard.clone();
        let written = Cell::new(0);

        assert!(spawned.apply_if_mounted(|| written.set(1)));
        guard.unmount();
        assert!(!spawned.is_mounted());
        assert!(!spawned.apply_if_mounted(|| written.set(2)));
        assert_eq!(written.get(), 1);
    }

    #[test]
    fn owner_cleanup_unmounts() {
        let owner = Owner::new();
        owner.set();

        let component = owner.child();
        let guard = component.with(MountGuard::for_owner);
        assert!(guard.is_mounted());

        component.cleanup();
        assert!(!guard.is_mounted());
    }
}
