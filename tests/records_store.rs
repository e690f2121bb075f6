#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tomato::db::db::Db;
    use tomato::db::records::Records;
    use tomato::libs::record::{NewTaskRecord, RecordKind, RecordQuery, UserId};
    use tomato::libs::session::pair;
    use tomato::libs::store::RecordStore;

    struct RecordsTestContext {
        _temp_dir: TempDir,
        records: Records,
    }

    impl TestContext for RecordsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("tomato.db")).unwrap();
            RecordsTestContext {
                records: Records::from_db(&db),
                _temp_dir: temp_dir,
            }
        }
    }

    fn record(user: &str, task: &str, kind: RecordKind, duration: u32, minute: i64) -> NewTaskRecord {
        NewTaskRecord {
            user_id: UserId::new(user),
            task: task.to_string(),
            duration,
            kind,
            completed: true,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap() + Duration::minutes(minute),
        }
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_append_returns_stored_record(ctx: &mut RecordsTestContext) {
        let new = record("ana", "write", RecordKind::Focus, 25, 25);
        let first = ctx.records.append(&new).unwrap();
        let second = ctx.records.append(&new).unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.task, "write");
        assert_eq!(first.kind, RecordKind::Focus);
        assert_eq!(first.timestamp, new.timestamp);
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_query_orders_newest_first(ctx: &mut RecordsTestContext) {
        for minute in [10, 40, 25] {
            ctx.records.append(&record("ana", "a", RecordKind::Focus, 5, minute)).unwrap();
        }

        let all = ctx.records.query(&UserId::new("ana"), &RecordQuery::all()).unwrap();
        let times: Vec<_> = all.iter().map(|r| r.timestamp).collect();
        let mut sorted = times.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(times, sorted);

        let latest = ctx.records.query(&UserId::new("ana"), &RecordQuery::all().limit(2)).unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].timestamp, all[0].timestamp);
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_query_filters_and_scopes_by_user(ctx: &mut RecordsTestContext) {
        ctx.records.append(&record("ana", "write", RecordKind::Focus, 25, 25)).unwrap();
        ctx.records.append(&record("ana", "write", RecordKind::Break, 5, 30)).unwrap();
        ctx.records.append(&record("ana", "read", RecordKind::Focus, 25, 60)).unwrap();
        ctx.records.append(&record("bob", "write", RecordKind::Focus, 25, 25)).unwrap();

        let ana = UserId::new("ana");
        assert_eq!(ctx.records.query(&ana, &RecordQuery::all()).unwrap().len(), 3);
        assert_eq!(ctx.records.query(&UserId::new("bob"), &RecordQuery::all()).unwrap().len(), 1);
        assert!(ctx.records.query(&UserId::new("eve"), &RecordQuery::all()).unwrap().is_empty());

        let focus = ctx.records.query(&ana, &RecordQuery::all().kind(RecordKind::Focus)).unwrap();
        assert_eq!(focus.len(), 2);
        assert!(focus.iter().all(|r| r.is_focus()));

        let write = ctx.records.query(&ana, &RecordQuery::all().task("write")).unwrap();
        assert_eq!(write.len(), 2);

        let since = Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap();
        let recent = ctx.records.query(&ana, &RecordQuery::all().since(since)).unwrap();
        assert_eq!(recent.len(), 2);
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_stored_records_pair_into_sessions(ctx: &mut RecordsTestContext) {
        // Focus ends at 09:25; the break starts at 09:26 and ends at 09:31.
        ctx.records.append(&record("ana", "write", RecordKind::Focus, 25, 25)).unwrap();
        ctx.records.append(&record("ana", "write", RecordKind::Break, 5, 31)).unwrap();

        let records = ctx.records.query(&UserId::new("ana"), &RecordQuery::all()).unwrap();
        let sessions = pair(&records);

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].break_minutes(), 5);
        assert_eq!(sessions[0].total_duration(), 30);
    }
}
