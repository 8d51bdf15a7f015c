use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::{Captures, Regex};

use crate::time::{add_months, format_stored, next_weekday, rollover_ymd};

/// Outcome of scanning one line of raw input for schedule words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// The input exactly as typed.
    pub original: String,
    /// Recognized date in stored `MM/DD` form.
    pub date: Option<String>,
    /// Recognized time, e.g. `3:00 PM` or a verbatim `7:45`.
    pub time: Option<String>,
    /// The input with recognized fragments removed and whitespace collapsed.
    pub remaining: String,
}

struct TimeRule {
    pattern: Regex,
    render: fn(&Captures) -> Option<String>,
}

struct DateRule {
    pattern: Regex,
    resolve: fn(&Captures, NaiveDate) -> Option<NaiveDate>,
}

static TIME_RULES: LazyLock<Vec<TimeRule>> = LazyLock::new(|| {
    vec![
        TimeRule {
            pattern: Regex::new(r"(?i)\b(?:at\s+)?(noon|midday)\b").unwrap(),
            render: render_noon,
        },
        TimeRule {
            pattern: Regex::new(r"(?i)\b(?:at\s+)?midnight\b").unwrap(),
            render: render_midnight,
        },
        TimeRule {
            pattern: Regex::new(r"(?i)\b(?:at\s+)?(\d{1,2})\s*(am|pm)\b").unwrap(),
            render: render_bare_hour,
        },
        TimeRule {
            pattern: Regex::new(r"(?i)\b(?:at\s+)?(\d{1,2}):(\d{2})\s*(am|pm)?\b").unwrap(),
            render: render_clock,
        },
    ]
});

static DATE_RULES: LazyLock<Vec<DateRule>> = LazyLock::new(|| {
    vec![
        DateRule {
            pattern: Regex::new(r"(?i)\btoday\b").unwrap(),
            resolve: resolve_today,
        },
        DateRule {
            pattern: Regex::new(r"(?i)\btomorrow\b").unwrap(),
            resolve: resolve_tomorrow,
        },
        DateRule {
            pattern: Regex::new(r"(?i)\byesterday\b").unwrap(),
            resolve: resolve_yesterday,
        },
        DateRule {
            pattern: Regex::new(r"(?i)\bin\s+(\d+)\s+(day|days|week|weeks|month|months)\b")
                .unwrap(),
            resolve: resolve_relative,
        },
        DateRule {
            pattern: Regex::new(
                r"(?i)\bon\s+(january|february|march|april|may|june|july|august|september|october|november|december)\s+(\d{1,2})(?:st|nd|rd|th)?(?:\s+(\d{4}))?\b",
            )
            .unwrap(),
            resolve: resolve_month_day,
        },
        DateRule {
            pattern: Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?\b").unwrap(),
            resolve: resolve_slash,
        },
        DateRule {
            pattern: Regex::new(
                r"(?i)\bnext\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
            )
            .unwrap(),
            resolve: resolve_next_weekday,
        },
    ]
});

/// Scans `text` for a time and a date, each decided by the first matching
/// rule in a fixed order. Rules match against the original text, so an
/// earlier removal never changes which later rule fires; removal itself
/// happens on a working copy. Never fails: input that resolves to no
/// representable date simply comes back without one.
pub fn extract(text: &str, now: NaiveDate) -> ParseResult {
    let mut working = text.to_string();

    let mut time = None;
    for rule in TIME_RULES.iter() {
        if let Some(caps) = rule.pattern.captures(text) {
            time = (rule.render)(&caps);
            working = rule.pattern.replacen(&working, 1, "").into_owned();
            break;
        }
    }

    let mut date = None;
    for rule in DATE_RULES.iter() {
        if let Some(caps) = rule.pattern.captures(text) {
            date = (rule.resolve)(&caps, now);
            working = rule.pattern.replacen(&working, 1, "").into_owned();
            break;
        }
    }

    ParseResult {
        original: text.to_string(),
        date: date.map(format_stored),
        time,
        remaining: working.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

fn render_noon(_caps: &Captures) -> Option<String> {
    Some("12:00 PM".to_string())
}

fn render_midnight(_caps: &Captures) -> Option<String> {
    Some("12:00 AM".to_string())
}

fn render_bare_hour(caps: &Captures) -> Option<String> {
    // Leading zeros drop: "03 pm" reads as hour 3.
    let hour: u32 = caps[1].parse().ok()?;
    Some(format!("{}:00 {}", hour, caps[2].to_uppercase()))
}

fn render_clock(caps: &Captures) -> Option<String> {
    // Hour and minutes stay verbatim, so "09:05" keeps its zero.
    match caps.get(3) {
        Some(m) => Some(format!(
            "{}:{} {}",
            &caps[1],
            &caps[2],
            m.as_str().to_uppercase()
        )),
        None => Some(format!("{}:{}", &caps[1], &caps[2])),
    }
}

fn resolve_today(_caps: &Captures, now: NaiveDate) -> Option<NaiveDate> {
    Some(now)
}

fn resolve_tomorrow(_caps: &Captures, now: NaiveDate) -> Option<NaiveDate> {
    now.succ_opt()
}

fn resolve_yesterday(_caps: &Captures, now: NaiveDate) -> Option<NaiveDate> {
    now.pred_opt()
}

fn resolve_relative(caps: &Captures, now: NaiveDate) -> Option<NaiveDate> {
    let amount: i64 = caps[1].parse().ok()?;
    let unit = caps[2].to_lowercase();
    if unit.starts_with("day") {
        now.checked_add_signed(Duration::try_days(amount)?)
    } else if unit.starts_with("week") {
        now.checked_add_signed(Duration::try_days(amount.checked_mul(7)?)?)
    } else {
        add_months(now, i32::try_from(amount).ok()?)
    }
}

fn resolve_month_day(caps: &Captures, now: NaiveDate) -> Option<NaiveDate> {
    let month = month_number(&caps[1])?;
    let day: i64 = caps[2].parse().ok()?;
    let year = match caps.get(3) {
        Some(y) => y.as_str().parse().ok()?,
        None => now.year(),
    };
    rollover_ymd(year, month, day)
}

fn resolve_slash(caps: &Captures, now: NaiveDate) -> Option<NaiveDate> {
    let month: i32 = caps[1].parse().ok()?;
    let day: i64 = caps[2].parse().ok()?;
    let year = match caps.get(3) {
        // Two-digit years sit in the 2000s.
        Some(y) if y.as_str().len() == 2 => 2000 + y.as_str().parse::<i32>().ok()?,
        Some(y) => y.as_str().parse().ok()?,
        None => now.year(),
    };
    rollover_ymd(year, month, day)
}

fn resolve_next_weekday(caps: &Captures, now: NaiveDate) -> Option<NaiveDate> {
    next_weekday(now, weekday_number(&caps[1])?)
}

fn month_number(name: &str) -> Option<i32> {
    match name.to_lowercase().as_str() {
        "january" => Some(1),
        "february" => Some(2),
        "march" => Some(3),
        "april" => Some(4),
        "may" => Some(5),
        "june" => Some(6),
        "july" => Some(7),
        "august" => Some(8),
        "september" => Some(9),
        "october" => Some(10),
        "november" => Some(11),
        "december" => Some(12),
        _ => None,
    }
}

fn weekday_number(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "sunday" => Some(Weekday::Sun),
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        _ => None,
    }
}
