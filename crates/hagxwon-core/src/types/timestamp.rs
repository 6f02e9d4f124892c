// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::NaiveDateTime;
use chrono::SubsecRound;
use chrono::TimeDelta;
use serde::Deserialize;
use serde::Serialize;

/// Output format: ISO-8601 with microseconds.
const DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Input format. The fractional part is optional.
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A UTC timestamp without a timezone and with microsecond precision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(ndt: NaiveDateTime) -> Self {
        Self(ndt.trunc_subsecs(6))
    }

    /// Converts a timestamp into a `NaiveDateTime`.
    pub fn into_inner(self) -> NaiveDateTime {
        self.0
    }

    /// The current UTC timestamp.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self::new(chrono::Utc::now().naive_utc())
    }

    /// Parses a timestamp. Naive ISO-8601 strings are read as UTC; RFC 3339
    /// strings with an offset are converted to UTC.
    pub fn parse(value: &str) -> Result<Self, TimestampError> {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(value, PARSE_FORMAT) {
            return Ok(Self::new(ndt));
        }
        DateTime::parse_from_rfc3339(value)
            .map(|dt| Self::new(dt.naive_utc()))
            .map_err(|_| TimestampError {
                input: value.to_string(),
            })
    }

    /// Adds a number of whole days. Saturates at the ends of the calendar.
    pub fn plus_days(self, days: i64) -> Self {
        TimeDelta::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
            .unwrap_or(if days < 0 {
                Self::new(NaiveDateTime::MIN)
            } else {
                Self::new(NaiveDateTime::MAX)
            })
    }

    /// Whole days left before the end of the calendar. Adding at most this
    /// many days never saturates.
    pub fn days_until_end(self) -> i64 {
        Self::new(NaiveDateTime::MAX).days_since(self)
    }

    /// Whole days elapsed from `earlier` to `self`.
    pub fn days_since(self, earlier: Timestamp) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TimestampError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Timestamp::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> String {
        ts.to_string()
    }
}

/// A string that is not a valid timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct TimestampError {
    pub input: String,
}

impl Display for TimestampError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse timestamp: '{}'.", self.input)
    }
}

impl Error for TimestampError {}
