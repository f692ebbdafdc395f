//! Leaderboard dashboard core: state store, API client and view logic.
//!
//! Everything here is independent of the DOM so it can be unit-tested
//! natively; the Yew components in the binary only render what [`view`]
//! describes and write user input back through [`store::Store::set`].

pub mod api;
pub mod config;
pub mod controller;
pub mod format;
pub mod logging;
pub mod model;
pub mod store;
pub mod validation;
pub mod view;

pub use api::{ApiError, HttpLeaderboardApi, LeaderboardApi, LeaderboardQuery};
pub use controller::{Status, StatusKind};
pub use model::{HealthStatus, Leaderboard, LeaderboardRow, Metric};
pub use store::{Snapshot, SnapshotPatch, Store, Subscription};
