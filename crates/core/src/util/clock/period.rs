// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, time::Duration};

const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;
const HOURS_PER_DAY: u64 = 24;
const DAYS_PER_WEEK: u64 = 7;
const WEEKS_PER_MONTH: u64 = 4;
const MONTHS_PER_YEAR: u64 = 12;

/// An elapsed time decomposed into calendar-like components.
///
/// Months are approximated by 4 weeks (28 days) and years by 12 of those
/// months. All components are floored. The number of whole weeks within
/// the current month is tracked but not rendered, i.e. the rendered
/// representation `P<Y>Y<M>M<D>D<H>H<M>M<S>S` only contains the days
/// of the current week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UptimePeriod {
    pub years: u64,
    pub months: u64,
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl UptimePeriod {
    #[must_use]
    pub const fn from_elapsed_secs(elapsed_secs: u64) -> Self {
        let seconds = elapsed_secs % SECONDS_PER_MINUTE;
        let total_minutes = elapsed_secs / SECONDS_PER_MINUTE;
        let minutes = total_minutes % MINUTES_PER_HOUR;
        let total_hours = total_minutes / MINUTES_PER_HOUR;
        let hours = total_hours % HOURS_PER_DAY;
        let total_days = total_hours / HOURS_PER_DAY;
        let days = total_days % DAYS_PER_WEEK;
        let total_weeks = total_days / DAYS_PER_WEEK;
        let weeks = total_weeks % WEEKS_PER_MONTH;
        let total_months = total_weeks / WEEKS_PER_MONTH;
        let months = total_months % MONTHS_PER_YEAR;
        let years = total_months / MONTHS_PER_YEAR;
        Self {
            years,
            months,
            weeks,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Sub-second fractions are discarded.
    #[must_use]
    pub const fn from_elapsed(elapsed: Duration) -> Self {
        Self::from_elapsed_secs(elapsed.as_secs())
    }

    /// Inverse of [`Self::from_elapsed_secs()`].
    #[must_use]
    pub const fn to_elapsed_secs(&self) -> u64 {
        let Self {
            years,
            months,
            weeks,
            days,
            hours,
            minutes,
            seconds,
        } = *self;
        let total_months = years * MONTHS_PER_YEAR + months;
        let total_weeks = total_months * WEEKS_PER_MONTH + weeks;
        let total_days = total_weeks * DAYS_PER_WEEK + days;
        let total_hours = total_days * HOURS_PER_DAY + hours;
        let total_minutes = total_hours * MINUTES_PER_HOUR + minutes;
        total_minutes * SECONDS_PER_MINUTE + seconds
    }
}

impl From<Duration> for UptimePeriod {
    fn from(from: Duration) -> Self {
        Self::from_elapsed(from)
    }
}

impl fmt::Display for UptimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            years,
            months,
            weeks: _,
            days,
            hours,
            minutes,
            seconds,
        } = self;
        write!(
            f,
            "P{years}Y{months}M{days}D{hours}H{minutes}M{seconds}S"
        )
    }
}

/// Renders the elapsed time as an ISO 8601 period string.
#[must_use]
pub fn format_uptime(elapsed: Duration) -> String {
    UptimePeriod::from_elapsed(elapsed).to_string()
}
