//! Single source of truth for the dashboard state.
//!
//! A [`Store`] owns one [`Snapshot`]. Updates are partial merges
//! ([`SnapshotPatch`]) followed by a synchronous fan-out to every listener
//! registered at the time of the update.
//!
//! # Notification rules
//! - Listeners run in registration order. Each one receives the snapshot
//!   as it stands when that listener is called.
//! - The listener list is copied before the fan-out starts: a listener
//!   subscribed from inside a notification is first called on the *next*
//!   `set`.
//! - A listener unsubscribed from inside a notification is skipped for the
//!   remainder of that fan-out.
//! - A `set` issued from inside a listener runs its own complete fan-out
//!   before the outer one resumes. The remaining listeners of the outer
//!   fan-out then see the newer state, so every listener's last
//!   notification matches [`Store::get`].
//!
//! The store is single-threaded (`Rc`/`RefCell`), matching the browser event
//! loop it runs on.

use crate::config::{DEFAULT_KINGDOM, DEFAULT_LIMIT, LATEST_DT};
use crate::model::{Leaderboard, Metric};
use log::trace;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Full application state at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    // Query parameters
    pub kingdom: String,
    pub metric: Metric,
    pub dt: String,
    pub use_latest: bool,
    pub limit: u32,

    // Result/UI state
    pub leaderboard_data: Option<Leaderboard>,
    pub loading: bool,
    pub error: Option<String>,
    pub api_healthy: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            kingdom: DEFAULT_KINGDOM.to_string(),
            metric: Metric::default(),
            dt: LATEST_DT.to_string(),
            use_latest: true,
            limit: DEFAULT_LIMIT,
            leaderboard_data: None,
            loading: false,
            error: None,
            api_healthy: false,
        }
    }
}

/// A partial update. Fields left as `None` are untouched by [`Store::set`];
/// the nullable snapshot fields take an explicit `Option` so they can be
/// cleared.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct SnapshotPatch {
    pub kingdom: Option<String>,
    pub metric: Option<Metric>,
    pub dt: Option<String>,
    pub use_latest: Option<bool>,
    pub limit: Option<u32>,
    pub leaderboard_data: Option<Option<Leaderboard>>,
    pub loading: Option<bool>,
    pub error: Option<Option<String>>,
    pub api_healthy: Option<bool>,
}

impl SnapshotPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kingdom(mut self, kingdom: impl Into<String>) -> Self {
        self.kingdom = Some(kingdom.into());
        self
    }

    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }

    pub fn dt(mut self, dt: impl Into<String>) -> Self {
        self.dt = Some(dt.into());
        self
    }

    pub fn use_latest(mut self, use_latest: bool) -> Self {
        self.use_latest = Some(use_latest);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn leaderboard_data(mut self, data: Option<Leaderboard>) -> Self {
        self.leaderboard_data = Some(data);
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = Some(loading);
        self
    }

    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = Some(error);
        self
    }

    pub fn api_healthy(mut self, healthy: bool) -> Self {
        self.api_healthy = Some(healthy);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(self, snapshot: &mut Snapshot) {
        if let Some(kingdom) = self.kingdom {
            snapshot.kingdom = kingdom;
        }
        if let Some(metric) = self.metric {
            snapshot.metric = metric;
        }
        if let Some(dt) = self.dt {
            snapshot.dt = dt;
        }
        if let Some(use_latest) = self.use_latest {
            snapshot.use_latest = use_latest;
        }
        if let Some(limit) = self.limit {
            snapshot.limit = limit;
        }
        if let Some(data) = self.leaderboard_data {
            snapshot.leaderboard_data = data;
        }
        if let Some(loading) = self.loading {
            snapshot.loading = loading;
        }
        if let Some(error) = self.error {
            snapshot.error = error;
        }
        if let Some(healthy) = self.api_healthy {
            snapshot.api_healthy = healthy;
        }
    }
}

struct Listener {
    id: u64,
    active: Cell<bool>,
    callback: Box<dyn Fn(&Snapshot)>,
}

struct Shared {
    snapshot: RefCell<Snapshot>,
    listeners: RefCell<Vec<Rc<Listener>>>,
    next_id: Cell<u64>,
}

/// Cheaply clonable handle to shared dashboard state.
///
/// Clones share the same snapshot and listeners; two handles compare equal
/// only when they point at the same store.
#[derive(Clone)]
pub struct Store {
    shared: Rc<Shared>,
}

impl Store {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            shared: Rc::new(Shared {
                snapshot: RefCell::new(initial),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Returns a copy of the current snapshot.
    pub fn get(&self) -> Snapshot {
        self.shared.snapshot.borrow().clone()
    }

    /// Merges `patch` into the snapshot and notifies listeners.
    ///
    /// Never fails; an empty patch still triggers a notification.
    pub fn set(&self, patch: SnapshotPatch) {
        patch.apply(&mut self.shared.snapshot.borrow_mut());

        // Copy so listeners may (un)subscribe or `set` while we iterate.
        let listeners: Vec<Rc<Listener>> = self.shared.listeners.borrow().clone();
        trace!("Store updated, notifying {} listeners", listeners.len());

        for listener in listeners {
            if listener.active.get() {
                // Re-read: an earlier listener may have issued a nested `set`.
                let snapshot = self.get();
                (listener.callback)(&snapshot);
            }
        }
    }

    /// Registers `callback` for every future [`Store::set`].
    ///
    /// The listener stays registered until [`Subscription::unsubscribe`] is
    /// called; dropping the handle does not remove it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Snapshot) + 'static,
    {
        let id = self.shared.next_id.get();
        self.shared.next_id.set(id + 1);

        let listener = Rc::new(Listener {
            id,
            active: Cell::new(true),
            callback: Box::new(callback),
        });
        let handle = Subscription {
            id,
            listener: Rc::downgrade(&listener),
            shared: Rc::downgrade(&self.shared),
        };
        self.shared.listeners.borrow_mut().push(listener);
        handle
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.shared.listeners.borrow().len()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}

impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

/// Handle returned by [`Store::subscribe`].
#[must_use = "the listener can only be removed through this handle"]
pub struct Subscription {
    id: u64,
    listener: Weak<Listener>,
    shared: Weak<Shared>,
}

impl Subscription {
    /// Removes exactly this listener. Calling it again is a no-op.
    pub fn unsubscribe(&self) {
        if let Some(listener) = self.listener.upgrade() {
            listener.active.set(false);
        }
        if let Some(shared) = self.shared.upgrade() {
            shared
                .listeners
                .borrow_mut()
                .retain(|listener| listener.id != self.id);
        }
    }
}
