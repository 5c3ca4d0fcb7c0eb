use chrono::{DateTime, Datelike, FixedOffset, Offset, SecondsFormat, TimeZone, Utc};
use std::fmt::Display;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

/// Timestamps are formatted as prescribed from [RFC 3339], keeping
/// whatever UTC offset they were given with.
///
/// Two timestamps are equal if they refer to the same instant even if
/// their offsets differ.
///
/// [RFC 3339]: https://www.rfc-editor.org/rfc/rfc3339
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Creates a [`Timestamp`] object based on the current time
    /// in the system.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().into())
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        DateTime::parse_from_rfc3339(input)
            .map(Self)
            .map_err(ParseError)
    }

    #[must_use]
    pub fn into_inner(self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Only datetimes that survive a trip through their RFC 3339 text are
/// accepted. Offsets with a seconds part have no RFC 3339 form, so those
/// are moved to UTC instead.
impl<Tz: TimeZone> TryFrom<DateTime<Tz>> for Timestamp {
    type Error = OutOfRangeError;

    fn try_from(dt: DateTime<Tz>) -> Result<Self, Self::Error> {
        let offset = dt.offset().fix();
        let offset = if offset.local_minus_utc() % 60 == 0 {
            offset
        } else {
            Utc.fix()
        };

        let dt = dt.with_timezone(&offset);
        if !(0..=9999).contains(&dt.year()) {
            return Err(OutOfRangeError(dt.year()));
        }
        Ok(Self(dt))
    }
}

impl From<Timestamp> for DateTime<FixedOffset> {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(value: Timestamp) -> Self {
        value.0.with_timezone(&Utc)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `Z` for zero offsets, fractions only when there are any
        let s = self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        s.fmt(f)
    }
}

impl Deref for Timestamp {
    type Target = DateTime<FixedOffset>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Timestamp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> serde::Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("RFC 3339 timestamp")
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_str(&v)
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Timestamp::parse(v).map_err(|e| {
                    serde::de::Error::custom(format_args!("invalid timestamp {v:?}: {e}"))
                })
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

impl serde::Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Error)]
#[error("Timestamp year {0} is outside of 0000 to 9999")]
pub struct OutOfRangeError(i32);

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ParseError(chrono::ParseError);

impl From<ParseError> for chrono::ParseError {
    fn from(value: ParseError) -> Self {
        value.0
    }
}

impl Deref for ParseError {
    type Target = chrono::ParseError;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::Token;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Timestamp: Clone, Copy, Send, Sync, std::hash::Hash, FromStr);

    #[test]
    fn test_fmt_display_impl() {
        let timestamp = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
        assert_eq!("2024-01-01T00:00:00Z", timestamp.to_string());

        let timestamp = Timestamp::parse("2024-01-01T00:00:00+00:00").unwrap();
        assert_eq!("2024-01-01T00:00:00Z", timestamp.to_string());

        let timestamp = Timestamp::parse("2024-01-01T08:00:00.250+08:00").unwrap();
        assert_eq!("2024-01-01T08:00:00.250+08:00", timestamp.to_string());
    }

    #[test]
    fn test_equality_ignores_offset() {
        let utc = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
        let manila = Timestamp::parse("2024-01-01T08:00:00+08:00").unwrap();
        assert_eq!(utc, manila);
        assert_eq!(8 * 3600, manila.offset().local_minus_utc());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Timestamp::parse("not-a-date").is_err());
        assert!(Timestamp::parse("2024-01-01").is_err());
        assert!(Timestamp::parse("2024-13-01T00:00:00Z").is_err());
        assert!("yesterday".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_from_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timestamp = Timestamp::try_from(dt).unwrap();
        assert_eq!("2024-01-01T00:00:00Z", timestamp.to_string());
        assert_eq!(dt, DateTime::<Utc>::from(timestamp));
    }

    #[test]
    fn test_offset_with_seconds_moves_to_utc() {
        let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60 + 15).unwrap();
        let dt = offset.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let timestamp = Timestamp::try_from(dt).unwrap();
        assert_eq!("2023-12-31T18:29:45Z", timestamp.to_string());
        assert_eq!(dt, timestamp.into_inner());

        let reparsed = Timestamp::parse(&timestamp.to_string()).unwrap();
        assert_eq!(timestamp, reparsed);
    }

    #[test]
    fn test_year_out_of_range() {
        let dt = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        assert!(Timestamp::try_from(dt).is_err());

        let dt = Utc.with_ymd_and_hms(-1, 12, 31, 23, 59, 59).unwrap();
        assert!(Timestamp::try_from(dt).is_err());

        // the year that gets printed is the local one
        let offset = FixedOffset::west_opt(2 * 3600).unwrap();
        let dt = offset.with_ymd_and_hms(9999, 12, 31, 23, 0, 0).unwrap();
        let timestamp = Timestamp::try_from(dt).unwrap();
        assert_eq!("9999-12-31T23:00:00-02:00", timestamp.to_string());
        assert_eq!(timestamp, Timestamp::parse(&timestamp.to_string()).unwrap());
    }

    #[test]
    fn test_serde_impl() {
        let timestamp = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
        serde_test::assert_tokens(&timestamp, &[Token::Str("2024-01-01T00:00:00Z")]);
        serde_test::assert_de_tokens_error::<Timestamp>(
            &[Token::I64(5)],
            "invalid type: integer `5`, expected RFC 3339 timestamp",
        );
    }
}
