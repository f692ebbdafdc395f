//! Load and health-check orchestration.
//!
//! The controller is the only writer of the result fields of the snapshot.
//! Overlapping loads are not cancelled: whichever response resolves last
//! writes last.

use crate::api::{LeaderboardApi, LeaderboardQuery};
use crate::config::LATEST_DT;
use crate::store::{Snapshot, SnapshotPatch, Store};
use log::{error, info, warn};
use std::fmt;
use thiserror::Error;

pub const LOADING_MESSAGE: &str = "Loading leaderboard...";

/// Local rejection of a load, reported before any network or store access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Please enter a kingdom ID")]
    MissingKingdom,
    #[error("Please enter a date or select \"Use Latest\"")]
    MissingDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Success,
    Warning,
    Error,
}

impl StatusKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Loading => "loading",
            StatusKind::Success => "success",
            StatusKind::Warning => "warning",
            StatusKind::Error => "error",
        }
    }
}

/// One-line message shown above the controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Loading, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Error, message)
    }

    /// Class attribute for the status element.
    pub fn css_class(&self) -> String {
        format!("status {}", self.kind.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<LoadError> for Status {
    fn from(err: LoadError) -> Self {
        Status::error(err.to_string())
    }
}

/// Build the request for the current snapshot, or explain why not.
pub fn prepare_load(snapshot: &Snapshot) -> Result<LeaderboardQuery, LoadError> {
    if snapshot.kingdom.is_empty() {
        return Err(LoadError::MissingKingdom);
    }
    if !snapshot.use_latest && snapshot.dt.is_empty() {
        return Err(LoadError::MissingDate);
    }

    let dt = if snapshot.use_latest {
        LATEST_DT.to_string()
    } else {
        snapshot.dt.clone()
    };
    Ok(LeaderboardQuery {
        kingdom: snapshot.kingdom.clone(),
        metric: snapshot.metric,
        dt,
        limit: snapshot.limit,
    })
}

/// Fetch `query` and record the outcome in `store`.
pub async fn run_load<A: LeaderboardApi>(store: &Store, api: &A, query: LeaderboardQuery) -> Status {
    store.set(SnapshotPatch::new().loading(true).error(None));

    match api.fetch_leaderboard(&query).await {
        Ok(data) => {
            let status = Status::success(format!(
                "Loaded {} players for kingdom {} ({})",
                data.rows.len(),
                data.kingdom,
                data.dt
            ));
            info!("{}", status);
            store.set(SnapshotPatch::new().leaderboard_data(Some(data)).loading(false));
            status
        }
        Err(err) => {
            let message = err.to_string();
            error!("Failed to load leaderboard: {}", message);
            store.set(SnapshotPatch::new().error(Some(message.clone())).loading(false));
            Status::error(format!("Error: {}", message))
        }
    }
}

/// Validate the current snapshot and, if it passes, run the load.
///
/// Every status line change is passed to `report`: a rejection alone, or
/// the loading message followed by the outcome.
pub async fn load<A, F>(store: &Store, api: &A, report: F)
where
    A: LeaderboardApi,
    F: Fn(Status),
{
    match prepare_load(&store.get()) {
        Ok(query) => {
            report(Status::loading(LOADING_MESSAGE));
            report(run_load(store, api, query).await);
        }
        Err(err) => {
            warn!("Load rejected: {}", err);
            report(err.into());
        }
    }
}

/// Probe `/health` and record the result as `api_healthy`.
pub async fn check_health<A: LeaderboardApi>(store: &Store, api: &A) -> Status {
    match api.fetch_health().await {
        Ok(health) => {
            info!("API health check: {:?}", health);
            store.set(SnapshotPatch::new().api_healthy(true));
            Status::success(format!(
                "API is healthy ({} v{})",
                health.service, health.version
            ))
        }
        Err(err) => {
            warn!("API health check failed: {}", err);
            store.set(SnapshotPatch::new().api_healthy(false));
            Status::warning(format!("Warning: API health check failed - {}", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::model::{HealthStatus, Leaderboard, LeaderboardRow, Metric};
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeApi {
        leaderboards: RefCell<VecDeque<Result<Leaderboard, ApiError>>>,
        health: RefCell<Option<Result<HealthStatus, ApiError>>>,
        queries: RefCell<Vec<LeaderboardQuery>>,
    }

    impl FakeApi {
        fn answering(result: Result<Leaderboard, ApiError>) -> Self {
            let api = Self::default();
            api.leaderboards.borrow_mut().push_back(result);
            api
        }
    }

    impl LeaderboardApi for FakeApi {
        async fn fetch_leaderboard(
            &self,
            query: &LeaderboardQuery,
        ) -> Result<Leaderboard, ApiError> {
            self.queries.borrow_mut().push(query.clone());
            self.leaderboards
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(ApiError::Network("no canned response".to_string())))
        }

        async fn fetch_health(&self) -> Result<HealthStatus, ApiError> {
            self.health
                .borrow_mut()
                .take()
                .unwrap_or(Err(ApiError::HealthCheck(503)))
        }
    }

    fn power_board() -> Leaderboard {
        Leaderboard {
            kingdom: "3951".to_string(),
            metric: "power".to_string(),
            dt: "2024-01-01".to_string(),
            limit: None,
            rows: vec![LeaderboardRow {
                id: Some("1".to_string()),
                name: Some("A".to_string()),
                alliance: Some("X".to_string()),
                value: json!(1000),
            }],
        }
    }

    fn load_statuses(store: &Store, api: &FakeApi) -> Vec<Status> {
        let statuses = RefCell::new(Vec::new());
        block_on(load(store, api, |status| statuses.borrow_mut().push(status)));
        statuses.into_inner()
    }

    fn record_loading(store: &Store) -> Rc<RefCell<Vec<bool>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        // Dropping the handle leaves the listener registered
        let _sub = store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.loading));
        seen
    }

    #[test]
    fn successful_load_stores_payload() {
        let store = Store::default();
        store.set(SnapshotPatch::new().metric(Metric::Power).limit(50));
        store.set(SnapshotPatch::new().error(Some("stale".to_string())));
        let loading = record_loading(&store);
        let api = FakeApi::answering(Ok(power_board()));

        let statuses = load_statuses(&store, &api);

        assert_eq!(
            api.queries.borrow().as_slice(),
            &[LeaderboardQuery {
                kingdom: "3951".to_string(),
                metric: Metric::Power,
                dt: "latest".to_string(),
                limit: 50,
            }]
        );
        let snapshot = store.get();
        assert_eq!(snapshot.leaderboard_data, Some(power_board()));
        assert!(!snapshot.loading);
        assert_eq!(snapshot.error, None);
        assert_eq!(*loading.borrow(), vec![true, false]);
        assert_eq!(
            statuses,
            vec![
                Status::loading("Loading leaderboard..."),
                Status::success("Loaded 1 players for kingdom 3951 (2024-01-01)"),
            ]
        );
    }

    #[test]
    fn http_failure_records_server_message() {
        let store = Store::default();
        let api = FakeApi::answering(Err(ApiError::Http {
            status: 500,
            message: "kingdom not found".to_string(),
        }));

        let statuses = load_statuses(&store, &api);

        let snapshot = store.get();
        assert_eq!(snapshot.error.as_deref(), Some("kingdom not found"));
        assert!(!snapshot.loading);
        assert_eq!(snapshot.leaderboard_data, None);
        assert_eq!(statuses.last(), Some(&Status::error("Error: kingdom not found")));
    }

    #[test]
    fn failure_keeps_previous_payload() {
        let store = Store::default();
        let api = FakeApi::answering(Ok(power_board()));
        api.leaderboards
            .borrow_mut()
            .push_back(Err(ApiError::Network("offline".to_string())));

        load_statuses(&store, &api);
        load_statuses(&store, &api);

        let snapshot = store.get();
        assert_eq!(snapshot.leaderboard_data, Some(power_board()));
        assert_eq!(snapshot.error.as_deref(), Some("Network error: offline"));
    }

    #[test]
    fn missing_kingdom_is_rejected_without_store_writes() {
        let store = Store::default();
        store.set(SnapshotPatch::new().kingdom(""));
        let loading = record_loading(&store);
        let api = FakeApi::default();

        let statuses = load_statuses(&store, &api);

        assert_eq!(statuses, vec![Status::error("Please enter a kingdom ID")]);
        assert!(loading.borrow().is_empty());
        assert!(api.queries.borrow().is_empty());
    }

    #[test]
    fn missing_date_is_rejected_only_without_latest() {
        let mut snapshot = Snapshot::default();
        snapshot.use_latest = false;
        snapshot.dt = String::new();
        assert_eq!(prepare_load(&snapshot), Err(LoadError::MissingDate));

        snapshot.dt = "2024-03-01".to_string();
        assert_eq!(prepare_load(&snapshot).unwrap().dt, "2024-03-01");

        snapshot.use_latest = true;
        snapshot.dt = String::new();
        assert_eq!(prepare_load(&snapshot).unwrap().dt, "latest");
    }

    #[test]
    fn later_resolution_wins() {
        let store = Store::default();
        let mut older = power_board();
        older.dt = "2023-12-01".to_string();
        let api = FakeApi::default();
        api.leaderboards.borrow_mut().push_back(Ok(older));
        api.leaderboards.borrow_mut().push_back(Ok(power_board()));

        let query = prepare_load(&store.get()).unwrap();
        block_on(async {
            run_load(&store, &api, query.clone()).await;
            run_load(&store, &api, query).await;
        });

        assert_eq!(
            store.get().leaderboard_data.map(|data| data.dt),
            Some("2024-01-01".to_string())
        );
    }

    #[test]
    fn healthy_api_is_recorded() {
        let store = Store::default();
        let api = FakeApi::default();
        *api.health.borrow_mut() = Some(Ok(HealthStatus {
            status: Some("healthy".to_string()),
            service: "leaderboard-api".to_string(),
            version: "1.0.0".to_string(),
            request_id: None,
        }));

        let status = block_on(check_health(&store, &api));

        assert!(store.get().api_healthy);
        assert_eq!(status, Status::success("API is healthy (leaderboard-api v1.0.0)"));
    }

    #[test]
    fn unhealthy_api_is_a_warning() {
        let store = Store::default();
        store.set(SnapshotPatch::new().api_healthy(true));
        let api = FakeApi::default();

        let status = block_on(check_health(&store, &api));

        assert!(!store.get().api_healthy);
        assert_eq!(status.kind, StatusKind::Warning);
        assert_eq!(
            status.message,
            "Warning: API health check failed - Health check failed (503)"
        );
        assert_eq!(status.css_class(), "status warning");
    }
}
