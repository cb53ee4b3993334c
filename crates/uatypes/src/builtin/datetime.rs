// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::UaString;
use crate::descriptor::TypeIndex;
use crate::error::Result;
use crate::ns0::types;
use crate::value::DataType;
use std::time::{SystemTime, UNIX_EPOCH};

const TICKS_PER_SECOND: i64 = 10_000_000;
const SECONDS_PER_DAY: i64 = 86_400;

/// Instant as 100 ns ticks since 1601-01-01 00:00 UTC.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTime(pub i64);

/// Calendar breakdown of a [`DateTime`] (UTC).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateTimeStruct {
    pub nano_sec: i16,
    pub micro_sec: i16,
    pub milli_sec: i16,
    pub sec: i16,
    pub min: i16,
    pub hour: i16,
    pub day: i16,
    pub month: i16,
    pub year: i16,
}

impl DateTime {
    /// Ticks between 1601-01-01 and 1970-01-01.
    pub const UNIX_EPOCH_TICKS: i64 = 116_444_736_000_000_000;

    /// Current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        let since_unix = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => duration_ticks(d),
            Err(e) => -duration_ticks(e.duration()),
        };
        Self(Self::UNIX_EPOCH_TICKS.saturating_add(since_unix))
    }

    /// Whole seconds plus nanoseconds since the Unix epoch.
    #[must_use]
    pub fn from_unix(secs: i64, nanos: u32) -> Self {
        Self(
            Self::UNIX_EPOCH_TICKS
                .saturating_add(secs.saturating_mul(TICKS_PER_SECOND))
                .saturating_add(i64::from(nanos / 100)),
        )
    }

    #[must_use]
    pub fn to_struct(self) -> DateTimeStruct {
        // Saturates near i64::MIN; the breakdown stays within i16 years.
        let ticks = self.0.saturating_sub(Self::UNIX_EPOCH_TICKS);
        let sub = ticks.rem_euclid(TICKS_PER_SECOND);
        let secs = ticks.div_euclid(TICKS_PER_SECOND);
        let days = secs.div_euclid(SECONDS_PER_DAY);
        let in_day = secs.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_days(days);

        DateTimeStruct {
            nano_sec: ((sub % 10) * 100) as i16,
            micro_sec: ((sub % 10_000) / 10) as i16,
            milli_sec: (sub / 10_000) as i16,
            sec: (in_day % 60) as i16,
            min: ((in_day % 3600) / 60) as i16,
            hour: (in_day / 3600) as i16,
            day: day as i16,
            month: month as i16,
            year: year as i16,
        }
    }

    /// `MM/DD/YYYY HH:MM:SS.mmm.uuu.nnn`, rendered through the bounded
    /// formatter.
    pub fn to_ua_string(self) -> Result<UaString> {
        let t = self.to_struct();
        UaString::copy_printf(format_args!(
            "{:02}/{:02}/{:04} {:02}:{:02}:{:02}.{:03}.{:03}.{:03}",
            t.month, t.day, t.year, t.hour, t.min, t.sec, t.milli_sec, t.micro_sec, t.nano_sec
        ))
    }
}

fn duration_ticks(d: std::time::Duration) -> i64 {
    let secs = i64::try_from(d.as_secs()).unwrap_or(i64::MAX);
    secs.saturating_mul(TICKS_PER_SECOND)
        .saturating_add(i64::from(d.subsec_nanos() / 100))
}

/// Proleptic Gregorian (year, month, day) for a day count since 1970-01-01.
/// H. Hinnant's `civil_from_days`.
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

impl DataType for DateTime {
    const TYPE_INDEX: TypeIndex = types::DATETIME;

    #[inline]
    fn try_copy(&self) -> Result<Self> {
        Ok(*self)
    }

    #[inline]
    fn delete_members(&mut self) {}
}
