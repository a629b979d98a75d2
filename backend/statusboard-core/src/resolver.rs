// src/resolver.rs
use chrono::NaiveDate;

use crate::roster::ScheduleEntry;

pub const MORNING_MARKER: &str = "오전";
pub const AFTERNOON_MARKER: &str = "오후";

/// Substrings that split a day into halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub morning: String,
    pub afternoon: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            morning: MORNING_MARKER.to_string(),
            afternoon: AFTERNOON_MARKER.to_string(),
        }
    }
}

impl Markers {
    pub fn is_morning(&self, entry_type: &str) -> bool {
        entry_type.contains(self.morning.as_str())
    }

    pub fn is_afternoon(&self, entry_type: &str) -> bool {
        entry_type.contains(self.afternoon.as_str())
    }
}

/// What one employee has on one date. A marker-less entry sits in the
/// morning slot and stands for the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySlots<'a> {
    pub morning: Option<&'a ScheduleEntry>,
    pub afternoon: Option<&'a ScheduleEntry>,
}

impl<'a> DaySlots<'a> {
    pub fn is_empty(&self) -> bool {
        self.morning.is_none() && self.afternoon.is_none()
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn applies_to<'a, 'q>(
    entries: &'a [ScheduleEntry],
    employee_name: &'q str,
    key: &'q str,
) -> impl Iterator<Item = &'a ScheduleEntry> + 'q
where
    'a: 'q,
{
    entries
        .iter()
        .filter(move |e| e.name == employee_name && e.covers(key))
}

/// Scans every entry in input order. When several entries claim the same
/// slot the last one wins.
pub fn resolve<'a>(
    entries: &'a [ScheduleEntry],
    employee_name: &str,
    target: NaiveDate,
    markers: &Markers,
) -> DaySlots<'a> {
    let key = date_key(target);
    let mut slots = DaySlots::default();

    for entry in applies_to(entries, employee_name, &key) {
        if markers.is_morning(&entry.entry_type) {
            slots.morning = Some(entry);
        } else if markers.is_afternoon(&entry.entry_type) {
            slots.afternoon = Some(entry);
        } else {
            slots.morning = Some(entry);
        }
    }

    slots
}

/// First entry in input order for the employee on that date. Used by the
/// single-entry board, which has no half-day split.
pub fn first_match<'a>(
    entries: &'a [ScheduleEntry],
    employee_name: &str,
    target: NaiveDate,
) -> Option<&'a ScheduleEntry> {
    let key = date_key(target);
    let found = applies_to(entries, employee_name, &key).next();
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, entry_type: &str, start: &str, end: &str) -> ScheduleEntry {
        ScheduleEntry {
            id: id.to_string(),
            name: name.to_string(),
            entry_type: entry_type.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            ..Default::default()
        }
    }

    fn d(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn no_entries_leaves_both_slots_empty() {
        let slots = resolve(&[], "Kim", d("2024-01-01"), &Markers::default());
        assert!(slots.is_empty());
    }

    #[test]
    fn morning_and_afternoon_markers_fill_their_slots() {
        let entries = vec![
            entry("1", "Lee", "오전외근", "2024-01-03", "2024-01-03"),
            entry("2", "Lee", "오후내근", "2024-01-03", "2024-01-03"),
        ];

        let slots = resolve(&entries, "Lee", d("2024-01-03"), &Markers::default());

        assert_eq!(slots.morning.map(|e| e.id.as_str()), Some("1"));
        assert_eq!(slots.afternoon.map(|e| e.id.as_str()), Some("2"));
    }

    #[test]
    fn entries_without_markers_take_the_morning_slot() {
        let entries = vec![entry("1", "Kim", "연차", "2024-01-01", "2024-01-05")];

        let slots = resolve(&entries, "Kim", d("2024-01-02"), &Markers::default());

        assert_eq!(slots.morning.map(|e| e.id.as_str()), Some("1"));
        assert!(slots.afternoon.is_none());
    }

    #[test]
    fn afternoon_only_entry() {
        let entries = vec![entry("1", "Kim", "오후반차", "2024-01-02", "2024-01-02")];

        let slots = resolve(&entries, "Kim", d("2024-01-02"), &Markers::default());

        assert!(slots.morning.is_none());
        assert_eq!(slots.afternoon.map(|e| e.id.as_str()), Some("1"));
    }

    #[test]
    fn later_entry_overwrites_earlier_one_in_the_same_slot() {
        let entries = vec![
            entry("first", "Kim", "연차", "2024-01-01", "2024-01-07"),
            entry("second", "Kim", "출장", "2024-01-03", "2024-01-03"),
        ];

        let slots = resolve(&entries, "Kim", d("2024-01-03"), &Markers::default());
        assert_eq!(slots.morning.map(|e| e.id.as_str()), Some("second"));

        // Outside the overlap only the first entry applies
        let slots = resolve(&entries, "Kim", d("2024-01-04"), &Markers::default());
        assert_eq!(slots.morning.map(|e| e.id.as_str()), Some("first"));
    }

    #[test]
    fn full_day_entry_listed_after_a_morning_entry_replaces_it() {
        let entries = vec![
            entry("am", "Kim", "오전외근", "2024-01-03", "2024-01-03"),
            entry("day", "Kim", "출장", "2024-01-03", "2024-01-03"),
        ];

        let slots = resolve(&entries, "Kim", d("2024-01-03"), &Markers::default());

        assert_eq!(slots.morning.map(|e| e.id.as_str()), Some("day"));
        assert!(slots.afternoon.is_none());
    }

    #[test]
    fn morning_marker_is_checked_before_afternoon_marker() {
        let entries = vec![entry("1", "Kim", "오전오후외근", "2024-01-03", "2024-01-03")];

        let slots = resolve(&entries, "Kim", d("2024-01-03"), &Markers::default());

        assert!(slots.morning.is_some());
        assert!(slots.afternoon.is_none());
    }

    #[test]
    fn names_must_match_exactly() {
        let entries = vec![
            entry("1", "kim", "연차", "2024-01-01", "2024-01-01"),
            entry("2", "Kim ", "연차", "2024-01-01", "2024-01-01"),
        ];

        let slots = resolve(&entries, "Kim", d("2024-01-01"), &Markers::default());
        assert!(slots.is_empty());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let entries = vec![entry("1", "Kim", "출장", "2024-01-02", "2024-01-04")];
        let markers = Markers::default();

        assert!(resolve(&entries, "Kim", d("2024-01-01"), &markers).is_empty());
        assert!(!resolve(&entries, "Kim", d("2024-01-02"), &markers).is_empty());
        assert!(!resolve(&entries, "Kim", d("2024-01-04"), &markers).is_empty());
        assert!(resolve(&entries, "Kim", d("2024-01-05"), &markers).is_empty());
    }

    #[test]
    fn first_match_keeps_input_order() {
        let entries = vec![
            entry("first", "Kim", "연차", "2024-01-01", "2024-01-07"),
            entry("second", "Kim", "출장", "2024-01-03", "2024-01-03"),
        ];

        let found = first_match(&entries, "Kim", d("2024-01-03"));
        assert_eq!(found.map(|e| e.id.as_str()), Some("first"));
        assert!(first_match(&entries, "Lee", d("2024-01-03")).is_none());
    }

    #[test]
    fn custom_markers() {
        let markers = Markers {
            morning: "AM".to_string(),
            afternoon: "PM".to_string(),
        };
        let entries = vec![entry("1", "Kim", "PM meeting", "2024-01-03", "2024-01-03")];

        let slots = resolve(&entries, "Kim", d("2024-01-03"), &markers);
        assert!(slots.afternoon.is_some());
    }
}
