//! Session context: the signed-in user and everything that follows them.
//!
//! Listeners are told explicitly about login and logout instead of polling
//! the identity. The [`Dashboard`] listener owns the live record subscription,
//! so signing out (or dropping the context) also releases the subscription.
//!
//! ```text
//!   login(u2) while u1 is active:
//!     on_logout()        every listener drops u1 state
//!     on_login(u2)       every listener subscribes for u2
//! ```

use super::feed::{ChangeFeed, Subscription};
use super::identity::Identity;
use super::record::{RecordQuery, TaskRecord, UserId};
use super::session::{self, Session};
use super::stats::{self, Overview};
use chrono::Local;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

pub trait SessionListener: Send {
    fn on_login(&mut self, user: &UserId);
    fn on_logout(&mut self);
}

pub type SharedListener = Arc<Mutex<dyn SessionListener>>;

#[derive(Default)]
pub struct SessionContext {
    current: Option<UserId>,
    listeners: Vec<SharedListener>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign in whoever the identity reports, if anyone.
    pub fn restore(&mut self, identity: &dyn Identity) {
        if let Some(user) = identity.current_user() {
            self.login(user);
        }
    }

    pub fn current_user(&self) -> Option<&UserId> {
        self.current.as_ref()
    }

    /// Late listeners are brought up to date with the current user.
    pub fn add_listener(&mut self, listener: SharedListener) {
        if let Some(user) = &self.current {
            listener.lock().on_login(user);
        }
        self.listeners.push(listener);
    }

    /// Returns false when `user` was already signed in.
    pub fn login(&mut self, user: UserId) -> bool {
        if self.current.as_ref() == Some(&user) {
            return false;
        }
        self.logout();

        info!(%user, "signed in");
        for listener in &self.listeners {
            listener.lock().on_login(&user);
        }
        self.current = Some(user);
        true
    }

    /// Returns false when nobody was signed in.
    pub fn logout(&mut self) -> bool {
        let Some(user) = self.current.take() else {
            return false;
        };

        info!(%user, "signed out");
        for listener in &self.listeners {
            listener.lock().on_logout();
        }
        true
    }
}

impl Drop for SessionContext {
    fn drop(&mut self) {
        self.logout();
    }
}

/// Derived views over the signed-in user's records, refreshed on every delivery.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub records: Vec<TaskRecord>,
    pub sessions: Vec<Session>,
    pub overview: Overview,
    pub deliveries: usize,
}

impl DashboardView {
    fn refresh(&mut self, records: &[TaskRecord]) {
        self.records = records.to_vec();
        self.sessions = session::pair(records);
        self.overview = stats::overview(records, &Local::now());
        self.deliveries += 1;
    }
}

/// Listener that keeps one live subscription for the signed-in user.
pub struct Dashboard {
    feed: Arc<dyn ChangeFeed + Send + Sync>,
    subscription: Option<Subscription>,
    view: Arc<Mutex<DashboardView>>,
}

impl Dashboard {
    pub fn new(feed: Arc<dyn ChangeFeed + Send + Sync>) -> Self {
        Self {
            feed,
            subscription: None,
            view: Arc::new(Mutex::new(DashboardView::default())),
        }
    }

    pub fn view(&self) -> DashboardView {
        self.view.lock().clone()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }
}

impl SessionListener for Dashboard {
    fn on_login(&mut self, user: &UserId) {
        // Replacing the handle drops any previous subscription first.
        self.subscription = None;
        *self.view.lock() = DashboardView::default();

        let view = Arc::clone(&self.view);
        let subscription = self.feed.subscribe(
            user,
            RecordQuery::all(),
            Box::new(move |records: &[TaskRecord]| view.lock().refresh(records)),
        );
        self.subscription = Some(subscription);
        debug!(%user, "dashboard subscribed");
    }

    fn on_logout(&mut self) {
        self.subscription = None;
        *self.view.lock() = DashboardView::default();
        debug!("dashboard unsubscribed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::feed::LiveRecords;
    use crate::libs::identity::StaticIdentity;
    use crate::libs::record::{NewTaskRecord, RecordKind};
    use crate::libs::store::MemoryStore;
    use chrono::Utc;

    #[derive(Default)]
    struct Journal(Vec<String>);

    impl SessionListener for Journal {
        fn on_login(&mut self, user: &UserId) {
            self.0.push(format!("in:{user}"));
        }

        fn on_logout(&mut self) {
            self.0.push("out".to_string());
        }
    }

    fn focus(user: &str) -> NewTaskRecord {
        NewTaskRecord {
            user_id: UserId::new(user),
            task: "write".to_string(),
            duration: 25,
            kind: RecordKind::Focus,
            completed: true,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn switching_users_logs_out_first_and_same_user_is_noop() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut context = SessionContext::new();
        context.add_listener(journal.clone());

        assert!(context.login(UserId::new("a")));
        assert!(!context.login(UserId::new("a")));
        assert!(context.login(UserId::new("b")));
        assert!(context.logout());
        assert!(!context.logout());

        assert_eq!(journal.lock().0, vec!["in:a", "out", "in:b", "out"]);
    }

    #[test]
    fn restore_signs_in_from_identity() {
        let mut context = SessionContext::new();
        context.restore(&StaticIdentity(Some(UserId::new("a"))));
        assert_eq!(context.current_user(), Some(&UserId::new("a")));

        let mut empty = SessionContext::new();
        empty.restore(&StaticIdentity(None));
        assert_eq!(empty.current_user(), None);
    }

    #[test]
    fn dashboard_holds_one_subscription_and_releases_it_on_logout() {
        let live = Arc::new(LiveRecords::new(MemoryStore::new()));
        let dashboard = Arc::new(Mutex::new(Dashboard::new(live.clone())));
        let mut context = SessionContext::new();
        context.add_listener(dashboard.clone());

        context.login(UserId::new("a"));
        live.append(&focus("a")).unwrap();
        assert_eq!(live.subscriber_count(), 1);
        assert_eq!(dashboard.lock().view().records.len(), 1);
        assert_eq!(dashboard.lock().view().sessions.len(), 1);

        context.login(UserId::new("b"));
        assert_eq!(live.subscriber_count(), 1);
        assert!(dashboard.lock().view().records.is_empty());

        context.logout();
        assert_eq!(live.subscriber_count(), 0);
        live.append(&focus("b")).unwrap();
        assert_eq!(dashboard.lock().view().deliveries, 0);
    }

    #[test]
    fn dropping_the_context_releases_the_subscription() {
        let live = Arc::new(LiveRecords::new(MemoryStore::new()));
        let mut context = SessionContext::new();
        context.add_listener(Arc::new(Mutex::new(Dashboard::new(live.clone()))));
        context.login(UserId::new("a"));
        assert_eq!(live.subscriber_count(), 1);

        drop(context);
        assert_eq!(live.subscriber_count(), 0);
    }
}
