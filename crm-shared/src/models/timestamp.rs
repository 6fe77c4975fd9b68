use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

const TEXT_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";
const DATE_FORMAT: &str = "%d.%m.%Y";

/// Server-computed timestamp.
///
/// The backend serializes `LocalDateTime` in several shapes depending on the
/// endpoint: ISO text with or without fraction, `yyyy-MM-dd HH:mm:ss.SSS`, a
/// bare date, or the numeric array `[year, month, day, hour, minute, second,
/// nanos]`. All of them normalize to one naive local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimestamp", into = "String")]
pub struct ServerTimestamp(pub NaiveDateTime);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Parts(Vec<i64>),
}

/// Raised when a timestamp matches none of the accepted shapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized timestamp: {0}")]
pub struct TimestampError(String);

impl ServerTimestamp {
    /// Parse any of the accepted text shapes.
    pub fn parse(text: &str) -> Result<Self, TimestampError> {
        let trimmed = text.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(with_offset.naive_utc()));
        }
        for format in TEXT_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self(parsed));
            }
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self)
            .ok_or_else(|| TimestampError(trimmed.to_string()))
    }

    fn from_parts(parts: &[i64]) -> Result<Self, TimestampError> {
        let invalid = || TimestampError(format!("{parts:?}"));
        if parts.len() < 3 {
            return Err(invalid());
        }
        let field = |index: usize| -> Result<u32, TimestampError> {
            let value = parts.get(index).copied().unwrap_or(0);
            u32::try_from(value).map_err(|_| invalid())
        };
        let year = i32::try_from(parts[0]).map_err(|_| invalid())?;
        let (month, day) = (field(1)?, field(2)?);
        let (hour, minute, second, nanos) = (field(3)?, field(4)?, field(5)?, field(6)?);
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_nano_opt(hour, minute, second, nanos))
            .map(Self)
            .ok_or_else(invalid)
    }

    /// `dd.mm.yyyy HH:MM`, the format every list and detail view uses.
    #[must_use]
    pub fn display(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }

    /// `dd.mm.yyyy`.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }

    /// ISO text accepted by the backend for request bodies.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.0.format(WIRE_FORMAT).to_string()
    }
}

impl TryFrom<RawTimestamp> for ServerTimestamp {
    type Error = TimestampError;

    fn try_from(raw: RawTimestamp) -> Result<Self, Self::Error> {
        match raw {
            RawTimestamp::Text(text) => Self::parse(&text),
            RawTimestamp::Parts(parts) => Self::from_parts(&parts),
        }
    }
}

impl From<ServerTimestamp> for String {
    fn from(value: ServerTimestamp) -> Self {
        value.to_wire()
    }
}

impl From<NaiveDateTime> for ServerTimestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl fmt::Display for ServerTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> ServerTimestamp {
        ServerTimestamp(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, mi, s)
                .unwrap(),
        )
    }

    #[test]
    fn parses_every_backend_text_shape() {
        let expected = at(2024, 2, 15, 9, 30, 0);
        for text in [
            "2024-02-15T09:30:00",
            "2024-02-15T09:30:00.000",
            "2024-02-15 09:30:00.000",
            "2024-02-15 09:30:00",
            "2024-02-15T09:30",
            "2024-02-15T09:30:00Z",
        ] {
            assert_eq!(ServerTimestamp::parse(text).unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn bare_date_is_midnight() {
        assert_eq!(
            ServerTimestamp::parse("2024-02-15").unwrap(),
            at(2024, 2, 15, 0, 0, 0)
        );
    }

    #[test]
    fn deserializes_array_form() {
        let parsed: ServerTimestamp = serde_json::from_str("[2024, 1, 20, 14, 5, 9, 0]").unwrap();
        assert_eq!(parsed, at(2024, 1, 20, 14, 5, 9));

        let date_only: ServerTimestamp = serde_json::from_str("[2024, 1, 20]").unwrap();
        assert_eq!(date_only, at(2024, 1, 20, 0, 0, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(ServerTimestamp::parse("yesterday").is_err());
        assert!(serde_json::from_str::<ServerTimestamp>("[2024]").is_err());
        assert!(serde_json::from_str::<ServerTimestamp>("[2024, 13, 1]").is_err());
    }

    #[test]
    fn serializes_as_iso_text() {
        let json = serde_json::to_string(&at(2024, 2, 15, 9, 30, 0)).unwrap();
        assert_eq!(json, "\"2024-02-15T09:30:00\"");
    }

    #[test]
    fn display_formats() {
        let ts = at(2024, 2, 5, 7, 3, 0);
        assert_eq!(ts.display(), "05.02.2024 07:03");
        assert_eq!(ts.display_date(), "05.02.2024");
        assert_eq!(ts.to_string(), "05.02.2024 07:03");
    }
}
