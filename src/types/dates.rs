// src/types/dates.rs
//! Canonical date representation for profile entries.
//!
//! Profile dates arrive in several shapes: `"2015"`, `"2015-09"`, `"2015-09-01"`,
//! serialized timestamps, `"09/2015"`, bare integer years, or free text such as
//! "Present". They are normalized once at deserialization time.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileDate {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
    Year(i32),
    Text(String),
}

impl ProfileDate {
    /// Parse a raw date string. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self::Day(ts.date_naive()));
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(Self::Day(date));
        }

        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d") {
            return Some(Self::Month {
                year: date.year(),
                month: date.month(),
            });
        }

        // `MM/YYYY`; chrono's %Y also accepts short years, so require four digits
        if let Some((_, year)) = raw.split_once('/') {
            if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(date) = NaiveDate::parse_from_str(&format!("01/{}", raw), "%d/%m/%Y") {
                    return Some(Self::Month {
                        year: date.year(),
                        month: date.month(),
                    });
                }
            }
        }

        if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(year) = raw.parse::<i32>() {
                return Some(Self::Year(year));
            }
        }

        Some(Self::Text(raw.to_string()))
    }

    /// Canonical ISO-like form used for serialization.
    pub fn to_iso(&self) -> String {
        match self {
            Self::Day(date) => date.format("%Y-%m-%d").to_string(),
            Self::Month { year, month } => format!("{:04}-{:02}", year, month),
            Self::Year(year) => format!("{:04}", year),
            Self::Text(text) => text.clone(),
        }
    }

    /// Day-precision display for one-off dates such as signatures.
    /// Month, year and text dates display as usual.
    pub fn long_form(&self) -> String {
        match self {
            Self::Day(date) => date.format("%-d %B %Y").to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ProfileDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%b %Y")),
            Self::Month { year, month } => match NaiveDate::from_ymd_opt(*year, *month, 1) {
                Some(date) => write!(f, "{}", date.format("%b %Y")),
                None => write!(f, "{}", year),
            },
            Self::Year(year) => write!(f, "{}", year),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl Serialize for ProfileDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Year(i64),
    Other(IgnoredAny),
}

impl RawDate {
    fn into_date(self) -> Option<ProfileDate> {
        match self {
            RawDate::Text(text) => ProfileDate::parse(&text),
            RawDate::Year(year) => i32::try_from(year).ok().map(ProfileDate::Year),
            RawDate::Other(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for ProfileDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawDate::deserialize(deserializer)?
            .into_date()
            .ok_or_else(|| serde::de::Error::custom("empty date"))
    }
}

/// `deserialize_with` helper: blank strings, nulls and values of any other
/// shape become `None`.
pub fn optional<'de, D>(deserializer: D) -> Result<Option<ProfileDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawDate::deserialize(deserializer)?.into_date())
}

/// Render `start – end`, with "Present" for ongoing entries.
pub fn format_range(
    start: Option<&ProfileDate>,
    end: Option<&ProfileDate>,
    current: bool,
) -> Option<String> {
    match (start, end) {
        (Some(start), _) if current => Some(format!("{} – Present", start)),
        (Some(start), Some(end)) => Some(format!("{} – {}", start, end)),
        (Some(start), None) => Some(format!("{} – Present", start)),
        (None, Some(end)) => Some(end.to_string()),
        (None, None) if current => Some("Present".to_string()),
        (None, None) => None,
    }
}
