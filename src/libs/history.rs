//! History views: sessions by day, paging, and the month calendar.

use super::record::TaskRecord;
use super::session::Session;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub const PAGE_SIZE: usize = 10;

/// Sessions bucketed by the local calendar day their focus interval completed.
///
/// Days are returned newest first; sessions keep their incoming order.
pub fn group_by_day<Tz: TimeZone>(sessions: Vec<Session>, tz: &Tz) -> Vec<(NaiveDate, Vec<Session>)> {
    let mut days: BTreeMap<NaiveDate, Vec<Session>> = BTreeMap::new();
    for session in sessions {
        let day = local_day(&session.focus.timestamp, tz);
        days.entry(day).or_default().push(session);
    }
    days.into_iter().rev().collect()
}

fn local_day<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    timestamp.with_timezone(tz).date_naive()
}

/// One page of a longer list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number actually shown.
    pub page: usize,
    pub total_pages: usize,
}

/// Slice out a 1-based page, clamping out-of-range requests to the nearest page.
pub fn paginate<T>(items: &[T], page: usize) -> Page<'_, T> {
    let total_pages = items.len().div_ceil(PAGE_SIZE).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(items.len());

    Page {
        items: &items[start..end],
        page,
        total_pages,
    }
}

/// Days of the given month that have at least one record, in local time.
pub fn record_days<Tz: TimeZone>(records: &[TaskRecord], year: i32, month: u32, tz: &Tz) -> BTreeSet<u32> {
    records
        .iter()
        .map(|r| local_day(&r.timestamp, tz))
        .filter(|day| day.year() == year && day.month() == month)
        .map(|day| day.day())
        .collect()
}

/// Distinct non-empty focus labels, newest first, for task suggestions.
pub fn recent_labels(records: &[TaskRecord]) -> Vec<String> {
    let mut ordered: Vec<&TaskRecord> = records.iter().filter(|r| r.is_focus() && !r.task.trim().is_empty()).collect();
    ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut seen = HashSet::new();
    ordered
        .into_iter()
        .filter(|r| seen.insert(r.task.as_str()))
        .map(|r| r.task.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::record::{RecordKind, UserId};
    use crate::libs::session::pair;
    use chrono::Duration;

    fn rec(id: i64, task: &str, kind: RecordKind, at: DateTime<Utc>) -> TaskRecord {
        TaskRecord {
            id,
            user_id: UserId::new("u1"),
            task: task.to_string(),
            duration: 25,
            kind,
            completed: true,
            timestamp: at,
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn groups_sessions_by_day_newest_first() {
        let records = vec![
            rec(1, "a", RecordKind::Focus, at(9, 10)),
            rec(2, "b", RecordKind::Focus, at(10, 9)),
            rec(3, "c", RecordKind::Focus, at(10, 15)),
        ];

        let days = group_by_day(pair(&records), &Utc);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].0, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        let ids: Vec<i64> = days[0].1.iter().map(|s| s.focus.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(days[1].1.len(), 1);
    }

    #[test]
    fn paginate_clamps_requested_page() {
        let items: Vec<u32> = (0..23).collect();

        let first = paginate(&items, 0);
        assert_eq!(first.page, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.len(), 10);

        let last = paginate(&items, 9);
        assert_eq!(last.page, 3);
        assert_eq!(last.items, &[20, 21, 22]);
    }

    #[test]
    fn paginate_empty_list_has_one_empty_page() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn record_days_marks_only_the_requested_month() {
        let records = vec![
            rec(1, "a", RecordKind::Focus, at(3, 10)),
            rec(2, "a", RecordKind::Break, at(3, 11)),
            rec(3, "a", RecordKind::Focus, at(17, 10)),
            rec(4, "a", RecordKind::Focus, at(17, 10) + Duration::days(30)),
        ];

        let days = record_days(&records, 2025, 3, &Utc);
        assert_eq!(days.into_iter().collect::<Vec<_>>(), vec![3, 17]);
    }

    #[test]
    fn recent_labels_skip_blank_and_break_records() {
        let records = vec![
            rec(1, "old", RecordKind::Focus, at(1, 9)),
            rec(2, "new", RecordKind::Focus, at(5, 9)),
            rec(3, "", RecordKind::Focus, at(6, 9)),
            rec(4, "rest", RecordKind::Break, at(7, 9)),
            rec(5, "old", RecordKind::Focus, at(2, 9)),
        ];

        assert_eq!(recent_labels(&records), vec!["new".to_string(), "old".to_string()]);
    }
}
