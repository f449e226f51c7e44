use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;
use wings_parser::Table;

/// Long, unambiguous rendering stored in the `<field>_formatted` companion.
pub const LONG_FORMAT: &str = "%d/%b/%Y";
/// Short rendering used for grid display.
pub const SHORT_FORMAT: &str = "%d-%b-%y";
pub const FORMATTED_SUFFIX: &str = "_formatted";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

// Day-first forms are listed before the month-first fallbacks so 01/02/2023 is 1 February.
const FOUR_DIGIT_YEAR_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d/%b/%Y",
    "%d %b %Y",
    "%d-%B-%Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%m/%d/%Y",
    "%m-%d-%Y",
];

const TWO_DIGIT_YEAR_FORMATS: &[&str] = &[
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
    "%d-%b-%y",
    "%d/%b/%y",
    "%d %b %y",
    "%m/%d/%y",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

const NULL_SENTINELS: &[&str] = &["na", "n/a", "nan", "nat", "null", "none", "-"];

/// How the original field's own value is rewritten when it parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InPlace {
    /// Leave the exported text as it was.
    Keep,
    /// Replace it with the short `DD-Mon-YY` rendering.
    Short,
}

/// Parses a spreadsheet date leniently, preferring day-first readings.
///
/// Returns `None` for blanks, spreadsheet error values (`#VALUE!`, `#N/A`, ...), null-like
/// sentinels and anything else that does not read as a calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() || value.starts_with('#') {
        return None;
    }
    if NULL_SENTINELS.iter().any(|s| value.eq_ignore_ascii_case(s)) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            if dt.year() >= 1000 {
                return Some(dt.date());
            }
        }
    }
    parse_date_only(value).or_else(|| {
        // Any date form followed by a clock time, e.g. `01-02-2023 10:20` or `1/2/23T10:00`.
        let (date, time) = value.rsplit_once(|c: char| c == 'T' || c.is_whitespace())?;
        let is_time = TIME_FORMATS
            .iter()
            .any(|format| NaiveTime::parse_from_str(time, format).is_ok());
        if is_time {
            parse_date_only(date.trim_end())
        } else {
            None
        }
    })
}

fn parse_date_only(value: &str) -> Option<NaiveDate> {
    for format in FOUR_DIGIT_YEAR_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            if date.year() >= 1000 {
                return Some(date);
            }
        }
    }
    TWO_DIGIT_YEAR_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

pub fn format_long(date: NaiveDate) -> String {
    date.format(LONG_FORMAT).to_string()
}

pub fn format_short(date: NaiveDate) -> String {
    date.format(SHORT_FORMAT).to_string()
}

/// Columns the date rule applies to: the name contains "date" (any case) and is not itself a
/// formatted companion.
pub fn date_columns(table: &Table) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|name| {
            name.to_ascii_lowercase().contains("date") && !name.ends_with(FORMATTED_SUFFIX)
        })
        .cloned()
        .collect()
}

/// Normalises every date-like column of `table` and adds a `<column>_formatted` companion.
///
/// Unparseable values become null in both the source column and the companion.
pub fn apply_date_rule(table: &mut Table, in_place: InPlace) {
    for column in date_columns(table) {
        let Some(src) = table.column_index(&column) else {
            continue;
        };
        let companion = table.ensure_column(&format!("{column}{FORMATTED_SUFFIX}"));

        let mut unparsed = 0usize;
        for row in 0..table.height() {
            let raw = table.get(row, src).map(str::to_string);
            let parsed = raw.as_deref().and_then(parse_date);

            if raw.is_some() && parsed.is_none() {
                unparsed += 1;
            }

            let rewritten = match (parsed, in_place) {
                (None, _) => None,
                (Some(date), InPlace::Short) => Some(format_short(date)),
                (Some(_), InPlace::Keep) => raw,
            };
            table.set(row, src, rewritten);
            table.set(row, companion, parsed.map(format_long));
        }

        if unparsed > 0 {
            debug!(
                sheet = table.kind.label(),
                column = column.as_str(),
                unparsed,
                "Cleared unparseable date values"
            );
        }
    }
}
