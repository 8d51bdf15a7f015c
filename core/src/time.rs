use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Builds a date permissively: month 13 rolls into January of the next
/// year, day overflow spills into the following month (13/45 lands in
/// February). Returns None only when the result leaves the representable
/// calendar range.
pub fn rollover_ymd(year: i32, month: i32, day: i64) -> Option<NaiveDate> {
    let month0 = month.checked_sub(1)?;
    let year = year.checked_add(month0.div_euclid(12))?;
    let month = month0.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_signed(Duration::try_days(day.checked_sub(1)?)?)
}

/// Calendar month addition keeping the day-of-month, with overflow
/// spilling forward (Jan 31 + 1 month lands on Mar 2 or Mar 3).
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let month = (date.month() as i32).checked_add(months)?;
    rollover_ymd(date.year(), month, i64::from(date.day()))
}

/// Next occurrence of `target` strictly after `from`. Asking for the
/// current weekday yields the one a full week out.
pub fn next_weekday(from: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let mut ahead = (i64::from(target.num_days_from_sunday())
        - i64::from(from.weekday().num_days_from_sunday()))
    .rem_euclid(7);
    if ahead == 0 {
        ahead = 7;
    }
    from.checked_add_signed(Duration::days(ahead))
}

pub fn format_stored(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.month(), date.day())
}

/// Reads a stored `MM/DD` string back into a date within `year`.
fn resolve_stored(stored: &str, year: i32) -> Option<NaiveDate> {
    let (month, day) = stored.split_once('/')?;
    let month: i32 = month.trim().parse().ok()?;
    let day: i64 = day.trim().parse().ok()?;
    rollover_ymd(year, month, day)
}

/// Display label for a stored `MM/DD` date. The date is first placed in
/// the current year; if that already passed, it rolls forward a year, so
/// yesterday's date reads as eleven-plus months away rather than "late".
/// Strings that don't parse come back unchanged.
pub fn display_label(stored: &str, now: NaiveDate) -> String {
    let Some(mut date) = resolve_stored(stored, now.year()) else {
        return stored.to_string();
    };
    if date < now {
        if let Some(rolled) =
            rollover_ymd(date.year() + 1, date.month() as i32, i64::from(date.day()))
        {
            date = rolled;
        }
    }
    if date == now {
        "Today".to_string()
    } else if now.succ_opt() == Some(date) {
        "Tomorrow".to_string()
    } else {
        stored.to_string()
    }
}

/// Overdue check for a stored `MM/DD` date. Unlike [`display_label`] this
/// never rolls the year forward: the stored date is pinned to the current
/// year and compared directly, so yesterday's date is overdue even though
/// its label shows next year's occurrence. Unparseable strings are never
/// overdue.
pub fn is_overdue(stored: &str, now: NaiveDate) -> bool {
    match resolve_stored(stored, now.year()) {
        Some(date) => date < now,
        None => false,
    }
}

/// Converts an edited date cell back to storable form. "Today" and
/// "Tomorrow" (exact case) become `MM/DD`; anything else is kept verbatim.
pub fn stored_from_label(value: &str, now: NaiveDate) -> String {
    match value {
        "Today" => format_stored(now),
        "Tomorrow" => match now.succ_opt() {
            Some(next) => format_stored(next),
            None => value.to_string(),
        },
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rollover_handles_month_and_day_overflow() {
        assert_eq!(rollover_ymd(2024, 13, 1), Some(day(2025, 1, 1)));
        assert_eq!(rollover_ymd(2024, 13, 45), Some(day(2025, 2, 14)));
        assert_eq!(rollover_ymd(2024, 2, 30), Some(day(2024, 3, 1)));
        assert_eq!(rollover_ymd(2023, 2, 30), Some(day(2023, 3, 2)));
        assert_eq!(rollover_ymd(2024, 6, 15), Some(day(2024, 6, 15)));
    }

    #[test]
    fn test_add_months_spills_past_short_months() {
        assert_eq!(add_months(day(2024, 1, 31), 1), Some(day(2024, 3, 2)));
        assert_eq!(add_months(day(2023, 1, 31), 1), Some(day(2023, 3, 3)));
        assert_eq!(add_months(day(2024, 12, 15), 1), Some(day(2025, 1, 15)));
        assert_eq!(add_months(day(2024, 3, 31), 12), Some(day(2025, 3, 31)));
    }

    #[test]
    fn test_next_weekday_is_strictly_future() {
        // 2024-01-01 is a Monday.
        let monday = day(2024, 1, 1);
        assert_eq!(next_weekday(monday, Weekday::Fri), Some(day(2024, 1, 5)));
        assert_eq!(next_weekday(monday, Weekday::Mon), Some(day(2024, 1, 8)));
        assert_eq!(next_weekday(monday, Weekday::Sun), Some(day(2024, 1, 7)));
    }

    #[test]
    fn test_format_stored_zero_pads() {
        assert_eq!(format_stored(day(2024, 1, 2)), "01/02");
        assert_eq!(format_stored(day(2024, 12, 25)), "12/25");
    }

    #[test]
    fn test_display_label_today_and_tomorrow() {
        let now = day(2024, 6, 1);
        assert_eq!(display_label("06/01", now), "Today");
        assert_eq!(display_label("06/02", now), "Tomorrow");
        assert_eq!(display_label("12/25", now), "12/25");
    }

    #[test]
    fn test_display_label_echoes_unparseable_input() {
        let now = day(2024, 6, 1);
        assert_eq!(display_label("soon", now), "soon");
        assert_eq!(display_label("", now), "");
        assert_eq!(display_label("1/2/3", now), "1/2/3");
        // Values outside the representable calendar echo instead of failing.
        let absurd = "1/9223372036854775807";
        assert_eq!(display_label(absurd, now), absurd);
        assert_eq!(display_label("-2147483648/5", now), "-2147483648/5");
    }

    #[test]
    fn test_label_rolls_forward_while_overdue_flags_same_string() {
        // A stored date earlier in the year is simultaneously labeled as a
        // far-future occurrence and flagged overdue. Both behaviors are
        // intentional and must not be "fixed" to agree.
        let now = day(2024, 6, 1);
        assert_eq!(display_label("01/15", now), "01/15");
        assert!(is_overdue("01/15", now));
        assert!(!is_overdue("12/25", now));
    }

    #[test]
    fn test_is_overdue_ignores_unparseable_strings() {
        let now = day(2024, 6, 1);
        assert!(!is_overdue("", now));
        assert!(!is_overdue("whenever", now));
        assert!(!is_overdue("1/9223372036854775807", now));
    }

    #[test]
    fn test_stored_from_label_round_trips_labels() {
        let now = day(2024, 6, 1);
        assert_eq!(stored_from_label("Today", now), "06/01");
        assert_eq!(stored_from_label("Tomorrow", now), "06/02");
        assert_eq!(stored_from_label("12/25", now), "12/25");
        // Lowercase is not a label, it stays as typed.
        assert_eq!(stored_from_label("today", now), "today");
    }
}
