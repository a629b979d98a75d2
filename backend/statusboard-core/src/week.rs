// src/week.rs
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc, Weekday};

pub const DAYS_IN_WINDOW: usize = 7;

// Short Korean weekday names, Monday first
const WEEKDAY_KR: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];

pub fn weekday_kr(day: Weekday) -> &'static str {
    WEEKDAY_KR[day.num_days_from_monday() as usize]
}

// --- Clock ---

/// Source of the current instant. Production code reads the system clock;
/// tests and `--now` pin it.
pub trait Clock {
    fn now_utc(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.instant
    }
}

// --- Week Window ---

/// The Sunday..Saturday week containing "today" at a fixed UTC offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekWindow {
    dates: [NaiveDate; DAYS_IN_WINDOW],
    local_now: NaiveDateTime,
}

impl WeekWindow {
    pub fn containing(now_utc: DateTime<Utc>, offset: FixedOffset) -> Self {
        let local_now = now_utc.with_timezone(&offset).naive_local();
        let today = local_now.date();

        // num_days_from_monday: Mon=0 .. Sun=6, so Sun maps to 0 here
        let days_since_sunday = (today.weekday().num_days_from_monday() + 1) % 7;
        let sunday = today - Duration::days(i64::from(days_since_sunday));

        let mut dates = [sunday; DAYS_IN_WINDOW];
        for (i, date) in dates.iter_mut().enumerate() {
            *date = sunday + Duration::days(i as i64);
        }

        Self { dates, local_now }
    }

    pub fn from_clock(clock: &dyn Clock, offset: FixedOffset) -> Self {
        Self::containing(clock.now_utc(), offset)
    }

    pub fn dates(&self) -> &[NaiveDate; DAYS_IN_WINDOW] {
        &self.dates
    }

    pub fn first(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.dates[DAYS_IN_WINDOW - 1]
    }

    /// Wall-clock time at the window's offset, used for "Last Update" stamps.
    pub fn local_now(&self) -> NaiveDateTime {
        self.local_now
    }

    /// e.g. "2024.01.07 (일) ~ 01.13 (토)"
    pub fn display_range(&self) -> String {
        format!(
            "{} ({}) ~ {} ({})",
            self.first().format("%Y.%m.%d"),
            weekday_kr(self.first().weekday()),
            self.last().format("%m.%d"),
            weekday_kr(self.last().weekday()),
        )
    }
}

/// Offset from whole hours; `None` when outside chrono's +-24h range.
pub fn offset_from_hours(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn kst() -> FixedOffset {
        offset_from_hours(9).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn d(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn window_runs_sunday_to_saturday() {
        // Wednesday 2024-01-10 noon KST
        let window = WeekWindow::containing(utc(2024, 1, 10, 3, 0), kst());

        assert_eq!(window.first(), d("2024-01-07"));
        assert_eq!(window.last(), d("2024-01-13"));
        assert_eq!(window.first().weekday(), Weekday::Sun);
        assert_eq!(window.last().weekday(), Weekday::Sat);
    }

    #[test]
    fn sunday_starts_its_own_window() {
        let window = WeekWindow::containing(utc(2024, 1, 7, 1, 0), kst());
        assert_eq!(window.first(), d("2024-01-07"));
    }

    #[test]
    fn saturday_stays_in_the_window_that_started_the_previous_sunday() {
        let window = WeekWindow::containing(utc(2024, 1, 13, 5, 0), kst());
        assert_eq!(window.first(), d("2024-01-07"));
        assert_eq!(window.last(), d("2024-01-13"));
    }

    #[test]
    fn offset_moves_today_across_the_utc_date_line() {
        // Saturday 16:00 UTC is already Sunday 01:00 KST
        let now = utc(2024, 1, 13, 16, 0);

        let at_kst = WeekWindow::containing(now, kst());
        let at_utc = WeekWindow::containing(now, offset_from_hours(0).unwrap());

        assert_eq!(at_kst.first(), d("2024-01-14"));
        assert_eq!(at_utc.first(), d("2024-01-07"));
        assert_eq!(at_kst.local_now().format("%H:%M").to_string(), "01:00");
    }

    #[test]
    fn every_instant_over_several_weeks_yields_a_valid_window() {
        let start = utc(2023, 12, 20, 0, 0);
        for step in 0..(24 * 40) {
            let now = start + Duration::hours(step);
            let window = WeekWindow::containing(now, kst());
            let dates = window.dates();

            assert_eq!(dates[0].weekday(), Weekday::Sun, "at {}", now);
            assert_eq!(dates[6].weekday(), Weekday::Sat, "at {}", now);
            let unique: HashSet<_> = dates.iter().collect();
            assert_eq!(unique.len(), DAYS_IN_WINDOW);
            for pair in dates.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
            assert!(dates.contains(&window.local_now().date()));
        }
    }

    #[test]
    fn fixed_clock_drives_the_window() {
        let clock = FixedClock::new(utc(2024, 2, 29, 12, 0));
        let window = WeekWindow::from_clock(&clock, kst());
        assert_eq!(window.first(), d("2024-02-25"));
        assert_eq!(window.last(), d("2024-03-02"));
    }

    #[test]
    fn display_range_uses_korean_weekdays() {
        let window = WeekWindow::containing(utc(2024, 1, 10, 3, 0), kst());
        assert_eq!(window.display_range(), "2024.01.07 (일) ~ 01.13 (토)");
    }

    #[test]
    fn offset_hours_out_of_range_is_rejected() {
        assert!(offset_from_hours(9).is_some());
        assert!(offset_from_hours(-12).is_some());
        assert!(offset_from_hours(30).is_none());
    }
}
