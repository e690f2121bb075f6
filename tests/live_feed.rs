#[cfg(test)]
mod tests {
    use chrono::Utc;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};
    use tomato::db::db::Db;
    use tomato::db::records::Records;
    use tomato::libs::context::{Dashboard, SessionContext};
    use tomato::libs::cue::Silent;
    use tomato::libs::feed::LiveRecords;
    use tomato::libs::identity::FileIdentity;
    use tomato::libs::pomodoro::Pomodoro;
    use tomato::libs::record::{RecordKind, RecordQuery, UserId};
    use tomato::libs::store::RecordStore;
    use tomato::libs::timer::TimerSettings;

    struct LiveTestContext {
        temp_dir: TempDir,
        live: Arc<LiveRecords<Records>>,
    }

    impl AsyncTestContext for LiveTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("tomato.db")).unwrap();
            LiveTestContext {
                live: Arc::new(LiveRecords::new(Records::from_db(&db))),
                temp_dir,
            }
        }
    }

    impl LiveTestContext {
        fn identity(&self) -> FileIdentity {
            FileIdentity::at(self.temp_dir.path().join("session.json"))
        }

        fn signed_in(&self, user: &str) -> (SessionContext, Arc<Mutex<Dashboard>>) {
            let identity = self.identity();
            identity.login(&UserId::new(user)).unwrap();

            let dashboard = Arc::new(Mutex::new(Dashboard::new(self.live.clone())));
            let mut context = SessionContext::new();
            context.add_listener(dashboard.clone());
            context.restore(&identity);
            (context, dashboard)
        }
    }

    async fn run_cycle(pomodoro: &mut Pomodoro<Records>, user: &UserId) {
        while pomodoro.is_ticking() {
            pomodoro.next_tick().await;
            pomodoro.on_tick(Utc::now(), Some(user));
        }
    }

    #[test_context(LiveTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_timer_cycle_reaches_the_dashboard(ctx: &mut LiveTestContext) {
        let (context, dashboard) = ctx.signed_in("ana");
        let user = context.current_user().cloned().unwrap();
        assert_eq!(dashboard.lock().view().deliveries, 1);

        let mut pomodoro = Pomodoro::new(TimerSettings::new(1, 1), ctx.live.clone(), Box::new(Silent));
        pomodoro.set_task_label("write");
        pomodoro.start();
        run_cycle(&mut pomodoro, &user).await;

        let view = dashboard.lock().view();
        assert_eq!(view.deliveries, 3);
        assert_eq!(view.records.len(), 2);
        assert_eq!(view.records.iter().filter(|r| r.kind == RecordKind::Break).count(), 1);
        assert_eq!(view.sessions.len(), 1);
        assert_eq!(view.sessions[0].label(), "write");
        assert_eq!(view.overview.today.total_focus_minutes, 1);
        assert_eq!(view.overview.today.total_break_minutes, 1);
    }

    #[test_context(LiveTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_unlabelled_cycle_is_not_recorded(ctx: &mut LiveTestContext) {
        let (context, dashboard) = ctx.signed_in("ana");
        let user = context.current_user().cloned().unwrap();

        let mut pomodoro = Pomodoro::new(TimerSettings::new(1, 1), ctx.live.clone(), Box::new(Silent));
        pomodoro.start();
        run_cycle(&mut pomodoro, &user).await;

        assert!(ctx.live.store().query(&user, &RecordQuery::all()).unwrap().is_empty());
        assert_eq!(dashboard.lock().view().deliveries, 1);
    }

    #[test_context(LiveTestContext)]
    #[tokio::test]
    async fn test_other_users_records_are_not_delivered(ctx: &mut LiveTestContext) {
        let (_context, dashboard) = ctx.signed_in("ana");

        let mut pomodoro = Pomodoro::new(TimerSettings::new(1, 1), ctx.live.clone(), Box::new(Silent));
        pomodoro.set_task_label("read");
        pomodoro.start();
        for _ in 0..60 {
            pomodoro.on_tick(Utc::now(), Some(&UserId::new("bob")));
        }

        assert_eq!(ctx.live.store().query(&UserId::new("bob"), &RecordQuery::all()).unwrap().len(), 1);
        let view = dashboard.lock().view();
        assert_eq!(view.deliveries, 1);
        assert!(view.records.is_empty());
    }

    #[test_context(LiveTestContext)]
    #[tokio::test]
    async fn test_signing_out_releases_the_feed(ctx: &mut LiveTestContext) {
        let (mut context, dashboard) = ctx.signed_in("ana");
        assert!(dashboard.lock().is_subscribed());
        assert_eq!(ctx.live.subscriber_count(), 1);

        assert!(context.logout());
        assert!(!dashboard.lock().is_subscribed());
        assert_eq!(ctx.live.subscriber_count(), 0);

        assert!(ctx.identity().logout().unwrap());
        assert!(!ctx.identity().logout().unwrap());
    }
}
