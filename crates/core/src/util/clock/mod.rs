// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail};
use jiff::{Timestamp, civil::Date, tz::TimeZone};

pub mod period;

pub type TimestampMillis = i64;

/// An _UTC_ timestamp with truncated millisecond precision.
///
/// The textual representation is the fixed RFC 3339 format with exactly
/// three fractional digits and a `Z` suffix, e.g. `2026-01-02T15:04:05.000Z`.
/// It is used both for rendering and for parsing ticker cursors.
#[derive(Clone, Debug, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTimeMs {
    unix_timestamp_millis: TimestampMillis,
}

impl UtcDateTimeMs {
    /// Returns `None` if the value is outside of the supported range.
    #[must_use]
    pub fn try_from_unix_timestamp_millis(unix_timestamp_millis: TimestampMillis) -> Option<Self> {
        Timestamp::from_millisecond(unix_timestamp_millis)
            .ok()
            .map(|timestamp| Self::from_timestamp(&timestamp))
    }

    #[must_use]
    pub const fn unix_timestamp_millis(&self) -> TimestampMillis {
        self.unix_timestamp_millis
    }

    #[must_use]
    pub fn from_timestamp(timestamp: &Timestamp) -> Self {
        Self {
            unix_timestamp_millis: timestamp.as_millisecond(),
        }
    }

    #[must_use]
    #[expect(clippy::missing_panics_doc, reason = "validated on construction")]
    pub fn to_timestamp(&self) -> Timestamp {
        Timestamp::from_millisecond(self.unix_timestamp_millis).expect("valid timestamp")
    }

    /// Midnight (UTC) of the given calendar date.
    pub fn from_date(date: Date) -> anyhow::Result<Self> {
        let zoned = date.to_zoned(TimeZone::UTC)?;
        Ok(Self::from_timestamp(&zoned.timestamp()))
    }

    #[must_use]
    pub fn now() -> Self {
        Self::from_timestamp(&Timestamp::now())
    }
}

impl From<Timestamp> for UtcDateTimeMs {
    fn from(from: Timestamp) -> Self {
        Self::from_timestamp(&from)
    }
}

impl From<UtcDateTimeMs> for Timestamp {
    fn from(from: UtcDateTimeMs) -> Self {
        from.to_timestamp()
    }
}

impl fmt::Display for UtcDateTimeMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.to_timestamp())
    }
}

impl FromStr for UtcDateTimeMs {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        // Only the canonical Zulu format is accepted, no numeric offsets.
        if input.as_bytes().get(10) != Some(&b'T') {
            bail!("missing date/time separator 'T' in '{input}'");
        }
        if !input.ends_with('Z') {
            bail!("missing UTC designator 'Z' in '{input}'");
        }
        input
            .parse::<Timestamp>()
            .map(Into::into)
            .map_err(|err| anyhow!("invalid timestamp '{input}': {err}"))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UtcDateTimeMs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UtcDateTimeMs {
    fn deserialize<D>(deserializer: D) -> Result<UtcDateTimeMs, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(UtcDateTimeMsDeserializeFromStr)
    }
}

#[cfg(feature = "serde")]
struct UtcDateTimeMsDeserializeFromStr;

#[cfg(feature = "serde")]
impl serde::de::Visitor<'_> for UtcDateTimeMsDeserializeFromStr {
    type Value = UtcDateTimeMs;

    fn visit_str<E>(self, input: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        input
            .parse()
            .map_err(|_| serde::de::Error::invalid_value(serde::de::Unexpected::Str(input), &self))
    }

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "a string containing an RFC 3339 timestamp in UTC")
    }
}

///////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////
