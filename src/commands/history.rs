use super::require_user;
use crate::db::records::Records;
use crate::libs::history::{group_by_day, paginate, record_days};
use crate::libs::messages::Message;
use crate::libs::record::RecordQuery;
use crate::libs::session::pair;
use crate::libs::store::RecordStore;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_info, msg_print};
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Only sessions from this day (YYYY-MM-DD or "today")
    #[arg(short, long)]
    date: Option<String>,
    /// Page of sessions to show, 10 per page
    #[arg(short, long, default_value_t = 1)]
    page: usize,
    /// Show the calendar of a month (YYYY-MM) instead of sessions
    #[arg(short, long)]
    month: Option<String>,
}

pub fn parse_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    match input.trim() {
        "today" => Some(today),
        value => NaiveDate::parse_from_str(value, "%Y-%m-%d").ok(),
    }
}

/// First day of a `YYYY-MM` month.
pub fn parse_month(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d").ok()
}

pub fn cmd(args: HistoryArgs) -> Result<()> {
    let user = require_user()?;
    let records = Records::new()?.query(&user, &RecordQuery::all())?;

    if let Some(month) = args.month {
        let Some(first_day) = parse_month(&month) else {
            msg_bail_anyhow!(Message::InvalidMonth(month));
        };
        let marked = record_days(&records, first_day.year(), first_day.month(), &Local);
        msg_print!(Message::CalendarHeader(first_day.format("%B %Y").to_string()), true);
        return View::calendar(first_day, &marked);
    }

    let mut sessions = pair(&records);
    if let Some(date) = args.date {
        let Some(day) = parse_date(&date, Local::now().date_naive()) else {
            msg_bail_anyhow!(Message::InvalidDate(date));
        };
        sessions.retain(|s| s.focus.timestamp.with_timezone(&Local).date_naive() == day);
    }

    if sessions.is_empty() {
        msg_info!(Message::NoSessionsFound);
        return Ok(());
    }

    let page = paginate(&sessions, args.page);
    msg_print!(Message::HistoryHeader, true);
    for (day, day_sessions) in group_by_day(page.items.to_vec(), &Local) {
        View::sessions(&day, &day_sessions)?;
    }
    msg_print!(Message::PageInfo(page.page, page.total_pages));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_today_and_iso_dates() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(parse_date("today", today), Some(today));
        assert_eq!(parse_date("2025-01-31", today), NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(parse_date("31/01/2025", today), None);
    }

    #[test]
    fn parses_months() {
        assert_eq!(parse_month("2025-02"), NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(parse_month("2025-13"), None);
        assert_eq!(parse_month("feb"), None);
    }
}
