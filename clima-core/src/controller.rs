//! Search lifecycle: one request at a time, with the current [`SearchState`]
//! published on a `watch` channel so any number of views can follow it.

use tokio::sync::watch;

use crate::{
    error::ValidationError,
    model::{CityQuery, WeatherReading},
    provider::WeatherClient,
};

/// Shown for every failed lookup, whatever the underlying cause.
pub const FAILURE_MESSAGE: &str =
    "No encontramos esa ciudad en Colombia. Intenta verificar el nombre.";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Success(WeatherReading),
    Failed(String),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        match self {
            SearchState::Success(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SearchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Sole writer of the search state.
///
/// `submit` borrows the controller mutably for the whole request, so a second
/// submission cannot start while one is loading.
#[derive(Debug)]
pub struct SearchController<C> {
    client: C,
    state: watch::Sender<SearchState>,
}

impl<C: WeatherClient> SearchController<C> {
    pub fn new(client: C) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self { client, state }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// A receiver that sees every state published from now on.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Look up `city`.
    ///
    /// A blank city is rejected before anything changes. Otherwise the state
    /// moves to `Loading` (dropping any previous reading or error), exactly one
    /// request is issued, and the state settles on `Success` or `Failed`.
    pub async fn submit(&mut self, city: &str) -> Result<(), ValidationError> {
        let query = CityQuery::new(city)?;

        self.state.send_replace(SearchState::Loading);

        let settled = match self.client.fetch(&query).await {
            Ok(reading) => SearchState::Success(reading),
            Err(_) => SearchState::Failed(FAILURE_MESSAGE.to_string()),
        };
        self.state.send_replace(settled);

        Ok(())
    }

    /// Back to the welcome screen. Does nothing from `Idle`.
    pub fn reset(&mut self) {
        self.state.send_if_modified(|state| match state {
            SearchState::Success(_) | SearchState::Failed(_) => {
                *state = SearchState::Idle;
                true
            }
            SearchState::Idle | SearchState::Loading => false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        condition::ConditionCategory, error::QueryFailure, model::tests::bogota,
    };
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::{
        collections::VecDeque,
        sync::{Mutex, OnceLock},
    };

    /// Replays canned outcomes and records what it was asked, plus the state a
    /// subscriber could see at the moment the request went out.
    #[derive(Debug, Default)]
    struct ScriptedClient {
        outcomes: Mutex<VecDeque<Result<WeatherReading, QueryFailure>>>,
        queries: Mutex<Vec<String>>,
        seen_on_fetch: Mutex<Vec<SearchState>>,
        observer: OnceLock<watch::Receiver<SearchState>>,
    }

    impl ScriptedClient {
        fn with(outcomes: Vec<Result<WeatherReading, QueryFailure>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                ..Self::default()
            }
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }

        fn seen_on_fetch(&self) -> Vec<SearchState> {
            self.seen_on_fetch.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherClient for ScriptedClient {
        async fn fetch(&self, query: &CityQuery) -> Result<WeatherReading, QueryFailure> {
            self.queries.lock().unwrap().push(query.as_str().to_owned());
            if let Some(rx) = self.observer.get() {
                self.seen_on_fetch.lock().unwrap().push(rx.borrow().clone());
            }
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra request")
        }
    }

    fn unavailable() -> QueryFailure {
        QueryFailure::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "upstream down".into(),
        }
    }

    fn reading_named(name: &str) -> WeatherReading {
        let mut reading = bogota();
        reading.name = name.to_owned();
        reading
    }

    fn observed(client: ScriptedClient) -> SearchController<ScriptedClient> {
        let controller = SearchController::new(client);
        controller
            .client()
            .observer
            .set(controller.subscribe())
            .expect("observer set once");
        controller
    }

    #[test]
    fn starts_idle() {
        let controller = SearchController::new(ScriptedClient::default());
        assert_eq!(controller.state(), SearchState::Idle);
    }

    #[tokio::test]
    async fn successful_search_settles_on_reading() {
        let mut controller = observed(ScriptedClient::with(vec![Ok(bogota())]));

        controller.submit("Bogotá").await.unwrap();

        let state = controller.state();
        let reading = state.reading().expect("success state");
        assert_eq!(reading.name, "Bogotá");
        assert_eq!(reading.category(), ConditionCategory::Rain);
        assert_eq!(reading.rounded_temperature(), 18);

        assert_eq!(controller.client().queries(), vec!["Bogotá"]);
        assert_eq!(controller.client().seen_on_fetch(), vec![SearchState::Loading]);
    }

    #[tokio::test]
    async fn failure_collapses_to_fixed_message() {
        let mut controller = SearchController::new(ScriptedClient::with(vec![Err(unavailable())]));

        controller.submit("Medellín").await.unwrap();

        assert_eq!(controller.state(), SearchState::Failed(FAILURE_MESSAGE.to_string()));
        assert_eq!(controller.state().error(), Some(FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn not_found_and_outage_look_the_same() {
        let not_found = QueryFailure::Status {
            status: StatusCode::NOT_FOUND,
            body: r#"{"cod":"404"}"#.into(),
        };
        let mut controller =
            SearchController::new(ScriptedClient::with(vec![Err(not_found), Err(unavailable())]));

        controller.submit("Atlantis").await.unwrap();
        let first = controller.state();
        controller.submit("Cali").await.unwrap();

        assert_eq!(first, controller.state());
    }

    #[tokio::test]
    async fn blank_submission_changes_nothing() {
        let mut controller = SearchController::new(ScriptedClient::default());
        let mut rx = controller.subscribe();

        for blank in ["", "   ", "\n"] {
            assert_eq!(controller.submit(blank).await, Err(ValidationError::EmptyCity));
        }

        assert_eq!(controller.state(), SearchState::Idle);
        assert!(!rx.has_changed().unwrap());
        assert!(controller.client().queries().is_empty());
    }

    #[tokio::test]
    async fn blank_submission_keeps_previous_result() {
        let mut controller = SearchController::new(ScriptedClient::with(vec![Ok(bogota())]));
        controller.submit("Bogotá").await.unwrap();

        assert!(controller.submit("").await.is_err());

        assert_eq!(controller.state(), SearchState::Success(bogota()));
        assert_eq!(controller.client().queries().len(), 1);
    }

    #[tokio::test]
    async fn each_submission_issues_exactly_one_request() {
        let mut controller = SearchController::new(ScriptedClient::with(vec![
            Ok(reading_named("Cali")),
            Ok(reading_named("Pasto")),
        ]));

        controller.submit(" Cali ").await.unwrap();
        controller.submit("Pasto").await.unwrap();

        assert_eq!(controller.client().queries(), vec!["Cali", "Pasto"]);
    }

    #[tokio::test]
    async fn new_search_after_failure_clears_error_before_loading() {
        let mut controller = observed(ScriptedClient::with(vec![
            Err(unavailable()),
            Ok(reading_named("Cali")),
        ]));

        controller.submit("Medellín").await.unwrap();
        assert!(controller.state().error().is_some());

        controller.submit("Cali").await.unwrap();

        assert_eq!(
            controller.client().seen_on_fetch(),
            vec![SearchState::Loading, SearchState::Loading]
        );
        let state = controller.state();
        assert_eq!(state.reading().map(|r| r.name.as_str()), Some("Cali"));
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn new_search_after_success_drops_old_reading() {
        let mut controller = observed(ScriptedClient::with(vec![
            Ok(reading_named("Bogotá")),
            Err(unavailable()),
        ]));

        controller.submit("Bogotá").await.unwrap();
        controller.submit("Tunja").await.unwrap();

        assert_eq!(controller.client().seen_on_fetch()[1], SearchState::Loading);
        assert_eq!(controller.state().reading(), None);
    }

    #[tokio::test]
    async fn reset_returns_to_idle_from_success_and_failure() {
        let mut controller =
            SearchController::new(ScriptedClient::with(vec![Ok(bogota()), Err(unavailable())]));

        controller.submit("Bogotá").await.unwrap();
        controller.reset();
        assert_eq!(controller.state(), SearchState::Idle);

        controller.submit("Neiva").await.unwrap();
        controller.reset();
        let state = controller.state();
        assert_eq!(state, SearchState::Idle);
        assert_eq!(state.reading(), None);
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn reset_from_idle_does_not_notify() {
        let mut controller = SearchController::new(ScriptedClient::default());
        let mut rx = controller.subscribe();

        controller.reset();

        assert!(!rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SearchState::Idle);
    }

    #[tokio::test]
    async fn subscribers_follow_the_latest_state() {
        let mut controller = SearchController::new(ScriptedClient::with(vec![Ok(bogota())]));
        let mut rx = controller.subscribe();

        controller.submit("Bogotá").await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().reading().map(|r| r.name.as_str()), Some("Bogotá"));
    }
}
