//! Push-based change feed over a record store.
//!
//! A subscriber registers a query for one user and receives the *full*
//! matching record set: once right away, and again after every append for
//! that user. Nothing incremental is ever delivered, so consumers simply
//! recompute their views from the set they were handed.
//!
//! ```text
//!   append(record) ──▶ store.append ──▶ publish(user)
//!                                          │ for each subscriber of user
//!                                          ▼
//!                                   store.query(user, query) ──▶ callback(&records)
//! ```
//!
//! Dropping the [`Subscription`] handle unregisters the callback.

use super::error::StoreError;
use super::record::{NewTaskRecord, RecordQuery, TaskRecord, UserId};
use super::store::RecordStore;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::{debug, error};

pub type FeedCallback = Box<dyn FnMut(&[TaskRecord]) + Send>;

pub trait ChangeFeed {
    fn subscribe(&self, user: &UserId, query: RecordQuery, callback: FeedCallback) -> Subscription;
}

struct Subscriber {
    id: u64,
    user: UserId,
    query: RecordQuery,
    callback: Arc<Mutex<FeedCallback>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Handle for a live subscription; unsubscribes when dropped.
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}

    /// False once the feed that issued this handle is gone.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.lock().subscribers.iter().any(|s| s.id == self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().subscribers.retain(|s| s.id != self.id);
            debug!(subscription = self.id, "feed subscription released");
        }
    }
}

/// A record store wrapped with a change feed.
pub struct LiveRecords<S: RecordStore> {
    store: S,
    registry: Arc<Mutex<Registry>>,
}

impl<S: RecordStore> LiveRecords<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append through the store, then push the new set to the user's subscribers.
    pub fn append(&self, record: &NewTaskRecord) -> Result<TaskRecord, StoreError> {
        let stored = self.store.append(record)?;
        self.publish(&stored.user_id);
        Ok(stored)
    }

    /// Number of live subscriptions, across all users.
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().subscribers.len()
    }

    fn publish(&self, user: &UserId) {
        let targets: Vec<(RecordQuery, Arc<Mutex<FeedCallback>>)> = self
            .registry
            .lock()
            .subscribers
            .iter()
            .filter(|s| &s.user == user)
            .map(|s| (s.query.clone(), Arc::clone(&s.callback)))
            .collect();

        for (query, callback) in targets {
            self.deliver(user, &query, &callback);
        }
    }

    fn deliver(&self, user: &UserId, query: &RecordQuery, callback: &Mutex<FeedCallback>) {
        let records = match self.store.query(user, query) {
            Ok(records) => records,
            Err(err) if err.is_precondition() => {
                error!(%user, error = %err, "record query needs a missing table or index, delivering empty set");
                Vec::new()
            }
            Err(err) => {
                error!(%user, error = %err, "record query failed, keeping previous delivery");
                return;
            }
        };

        // A callback that appends would re-enter its own delivery.
        match callback.try_lock() {
            Some(mut callback) => (&mut *callback)(&records),
            None => debug!(%user, "skipping re-entrant feed delivery"),
        }
    }
}

impl<S: RecordStore> ChangeFeed for LiveRecords<S> {
    fn subscribe(&self, user: &UserId, query: RecordQuery, callback: FeedCallback) -> Subscription {
        let callback = Arc::new(Mutex::new(callback));
        let id = {
            let mut registry = self.registry.lock();
            registry.next_id += 1;
            let id = registry.next_id;
            registry.subscribers.push(Subscriber {
                id,
                user: user.clone(),
                query: query.clone(),
                callback: Arc::clone(&callback),
            });
            id
        };
        debug!(%user, subscription = id, "feed subscription registered");

        self.deliver(user, &query, &callback);

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }
}
