//! Search/tap state machine.
//!
//! Every user action takes a fresh generation token and clears the session.
//! Results are only written back while that token is still the newest, so a
//! slow action that finishes after a newer one started is dropped instead of
//! overwriting newer data.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::{
    fetcher::fetch_all,
    model::{Coordinates, Snapshot},
    provider::WeatherApi,
    resolver::{Resolution, resolve_by_coordinates, resolve_by_name},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Searching,
    Found,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed(Phase),
    /// A newer action started before this one finished; nothing was written.
    Superseded,
}

#[derive(Debug, Default)]
struct State {
    generation: u64,
    phase: Phase,
    snapshot: Snapshot,
}

#[derive(Debug, Clone)]
pub struct Session {
    api: Arc<dyn WeatherApi>,
    state: Arc<Mutex<State>>,
}

impl Session {
    pub fn new(api: Arc<dyn WeatherApi>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().snapshot.clone()
    }

    /// Look up a place by name and fetch its weather.
    pub async fn search(&self, text: &str) -> ActionOutcome {
        let token = self.begin();
        let resolution = resolve_by_name(self.api.as_ref(), text).await;
        self.complete(token, resolution, None).await
    }

    /// Reverse-geocode a picked point and fetch the weather at that point.
    pub async fn tap(&self, at: Coordinates) -> ActionOutcome {
        let token = self.begin();
        let resolution = resolve_by_coordinates(self.api.as_ref(), at).await;
        self.complete(token, resolution, Some(at)).await
    }

    fn begin(&self) -> u64 {
        let mut state = self.state.lock();
        state.generation += 1;
        state.phase = Phase::Searching;
        state.snapshot = Snapshot::default();
        state.generation
    }

    /// Apply `write` if `token` is still the current generation.
    fn commit(&self, token: u64, write: impl FnOnce(&mut State)) -> bool {
        let mut state = self.state.lock();
        if state.generation != token {
            tracing::debug!(
                token,
                current = state.generation,
                "Dropping superseded result"
            );
            return false;
        }
        write(&mut state);
        true
    }

    async fn complete(
        &self,
        token: u64,
        resolution: Resolution,
        fetch_at: Option<Coordinates>,
    ) -> ActionOutcome {
        let Some(location) = resolution.into_location() else {
            return if self.commit(token, |s| s.phase = Phase::NotFound) {
                ActionOutcome::Completed(Phase::NotFound)
            } else {
                ActionOutcome::Superseded
            };
        };

        let at = fetch_at.unwrap_or_else(|| location.coordinates());

        let found = location.clone();
        if !self.commit(token, |s| {
            s.phase = Phase::Found;
            s.snapshot.location = Some(found);
        }) {
            return ActionOutcome::Superseded;
        }

        let results = fetch_all(self.api.as_ref(), at).await;
        let snapshot = results.into_snapshot(Some(location));

        if self.commit(token, |s| s.snapshot = snapshot) {
            ActionOutcome::Completed(Phase::Found)
        } else {
            ActionOutcome::Superseded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;

    fn start(api: FakeApi) -> (Session, Arc<FakeApi>) {
        let api = Arc::new(api);
        (Session::new(api.clone()), api)
    }

    #[tokio::test]
    async fn starts_idle() {
        let (session, _) = start(FakeApi::dublin());
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.generation(), 0);
        assert!(session.snapshot().is_empty());
    }

    #[tokio::test]
    async fn search_found_fills_snapshot() {
        let (session, api) = start(FakeApi::dublin());

        let outcome = session.search("Dublin, IE").await;
        assert_eq!(outcome, ActionOutcome::Completed(Phase::Found));
        assert_eq!(session.phase(), Phase::Found);

        let snapshot = session.snapshot();
        assert_eq!(
            snapshot.location.as_ref().map(|l| l.name.as_str()),
            Some("Dublin")
        );
        assert!(snapshot.current.is_some());
        assert!(snapshot.air_quality.is_some());
        assert!(snapshot.forecast.is_some());
        assert!(snapshot.air_quality_forecast.is_some());
        assert_eq!(api.fetched_at(), vec![Coordinates::new(53.3498, -6.2603)]);
    }

    #[tokio::test]
    async fn search_not_found_leaves_snapshot_empty() {
        let (session, api) = start(FakeApi::dublin());

        assert_eq!(
            session.search("Atlantis").await,
            ActionOutcome::Completed(Phase::NotFound)
        );
        assert!(session.snapshot().is_empty());
        assert!(api.fetched_at().is_empty());
    }

    #[tokio::test]
    async fn transport_error_is_reported_as_not_found() {
        let (session, _) = start(FakeApi::dublin().failing_geocode());

        assert_eq!(
            session.search("Dublin").await,
            ActionOutcome::Completed(Phase::NotFound)
        );
        assert_eq!(session.phase(), Phase::NotFound);
    }

    #[tokio::test]
    async fn new_search_clears_previous_location() {
        let (session, _) = start(FakeApi::dublin());

        session.search("Dublin").await;
        assert!(!session.snapshot().is_empty());

        session.search("Atlantis").await;
        assert!(session.snapshot().is_empty());
        assert_eq!(session.generation(), 2);
    }

    #[tokio::test]
    async fn tap_fetches_at_tapped_point() {
        let (session, api) = start(FakeApi::dublin());
        let tapped = Coordinates::new(53.41, -6.3);

        assert_eq!(
            session.tap(tapped).await,
            ActionOutcome::Completed(Phase::Found)
        );
        assert_eq!(api.fetched_at(), vec![tapped]);
        assert_eq!(
            session.snapshot().location.map(|l| l.country),
            Some("IE".to_string())
        );
    }

    #[tokio::test]
    async fn tap_in_the_ocean_is_not_found() {
        let (session, api) = start(FakeApi::dublin());

        let outcome = session.tap(Coordinates::new(0.0, -30.0)).await;
        assert_eq!(outcome, ActionOutcome::Completed(Phase::NotFound));
        assert!(api.fetched_at().is_empty());
    }

    #[tokio::test]
    async fn failed_resource_only_blanks_its_field() {
        let (session, _) = start(FakeApi::dublin().failing("forecast"));

        assert_eq!(
            session.search("Dublin").await,
            ActionOutcome::Completed(Phase::Found)
        );
        let snapshot = session.snapshot();
        assert!(snapshot.forecast.is_none());
        assert!(snapshot.current.is_some());
    }

    #[tokio::test]
    async fn stale_resolution_is_discarded() {
        let mut api = FakeApi::dublin().with_place("Slowtown", "NZ", -41.0, 174.0);
        let gate = api.gate_geocode("Slowtown");
        let (session, api) = start(api);

        let slow = tokio::spawn({
            let session = session.clone();
            async move { session.search("Slowtown").await }
        });
        gate.entered.notified().await;

        assert_eq!(session.phase(), Phase::Searching);
        assert!(session.snapshot().is_empty());

        assert_eq!(
            session.search("Dublin").await,
            ActionOutcome::Completed(Phase::Found)
        );

        gate.release.notify_one();
        assert_eq!(slow.await.unwrap(), ActionOutcome::Superseded);

        assert_eq!(session.phase(), Phase::Found);
        assert_eq!(
            session.snapshot().location.map(|l| l.name),
            Some("Dublin".to_string())
        );
        assert_eq!(api.fetched_at(), vec![Coordinates::new(53.3498, -6.2603)]);
    }

    #[tokio::test]
    async fn stale_fetch_is_discarded() {
        let mut api = FakeApi::dublin().with_place("Cork", "IE", 51.8985, -8.4756);
        let gate = api.gate_current(51.8985);
        let (session, _) = start(api);

        let slow = tokio::spawn({
            let session = session.clone();
            async move { session.search("Cork").await }
        });
        gate.entered.notified().await;

        assert_eq!(
            session.snapshot().location.map(|l| l.name),
            Some("Cork".to_string())
        );

        assert_eq!(
            session.search("Dublin").await,
            ActionOutcome::Completed(Phase::Found)
        );

        gate.release.notify_one();
        assert_eq!(slow.await.unwrap(), ActionOutcome::Superseded);

        let snapshot = session.snapshot();
        assert_eq!(
            snapshot.location.map(|l| l.name),
            Some("Dublin".to_string())
        );
        assert!(snapshot.current.is_some());
        assert_eq!(session.generation(), 2);
    }
}
