//! Lenient field decoders for backend payloads. The backend serializes
//! `Decimal` columns as strings and timestamps in RFC 2822 form, so these
//! accept the few shapes it is known to emit.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, de};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accepts `12.5` or `"12.50"`.
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|err| de::Error::custom(format!("invalid amount {raw:?}: {err}"))),
    }
}

/// Accepts `"ACC-001"` or `1001`; account numbers are stored as text but
/// older rows come back numeric.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) if value.fract() == 0.0 => Ok(format!("{value:.0}")),
        NumberOrText::Number(value) => Ok(value.to_string()),
        NumberOrText::Text(raw) => Ok(raw),
    }
}

pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp {raw:?}")))
}

pub fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp {raw:?}"))),
    }
}

/// RFC 3339, RFC 2822, or a naive date-time taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::parse_timestamp;
    use chrono::{TimeZone, Utc};

    #[test]
    fn parses_known_timestamp_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 2, 10, 30, 0).single();
        assert!(expected.is_some());
        assert_eq!(parse_timestamp("2024-01-02T10:30:00Z"), expected);
        assert_eq!(parse_timestamp("2024-01-02T12:30:00+02:00"), expected);
        assert_eq!(parse_timestamp("Tue, 02 Jan 2024 10:30:00 GMT"), expected);
        assert_eq!(parse_timestamp("2024-01-02 10:30:00"), expected);
        assert_eq!(parse_timestamp("2024-01-02T10:30:00"), expected);
    }

    #[test]
    fn keeps_fractional_seconds() {
        let parsed = parse_timestamp("2024-01-02 10:30:00.250");
        let Some(parsed) = parsed else {
            panic!("expected timestamp");
        };
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
