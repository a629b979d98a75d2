// src/roster.rs
use tracing::{debug, info};

// Minimum field counts for a row to be accepted
const EMPLOYEE_MIN_FIELDS: usize = 2;
const SCHEDULE_MIN_FIELDS: usize = 6;

// --- Roster Records ---

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Employee {
    pub email: String,
    pub name: String, // Join key against ScheduleEntry::name, matched verbatim
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleEntry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub entry_type: String, // Free text, e.g. "연차", "오전외근"
    pub start_date: String, // "YYYY-MM-DD", inclusive
    pub end_date: String,   // "YYYY-MM-DD", inclusive
    pub reason: String,
    pub location: String,
    pub status: String,
}

impl ScheduleEntry {
    /// Inclusive containment, compared as strings. Only chronological when both
    /// bounds are zero-padded ISO dates.
    pub fn covers(&self, date_key: &str) -> bool {
        self.start_date.as_str() <= date_key && date_key <= self.end_date.as_str()
    }
}

// Trimmed field at `idx`, or "" when the row is too short
fn field(row: &[String], idx: usize) -> String {
    row.get(idx).map(|s| s.trim().to_string()).unwrap_or_default()
}

// --- Parsing ---

/// Builds employees from the `emp_data` tab (email, name, note).
/// The first row is the header. Rows with fewer than two fields are dropped.
pub fn parse_employees(rows: &[Vec<String>]) -> Vec<Employee> {
    if rows.len() < 2 {
        debug!("Employee sheet has no data rows ({} rows total)", rows.len());
        return Vec::new();
    }

    let employees: Vec<Employee> = rows[1..]
        .iter()
        .filter(|row| row.len() >= EMPLOYEE_MIN_FIELDS)
        .map(|row| Employee {
            email: field(row, 0),
            name: field(row, 1),
            note: field(row, 2),
        })
        .collect();

    info!("Parsed {} employees", employees.len());
    employees
}

/// Builds schedule entries from the `schedule_data` tab
/// (id, name, email, type, start_date, end_date, reason, location, status).
/// The first row is the header. Rows with fewer than six fields are dropped.
pub fn parse_schedules(rows: &[Vec<String>]) -> Vec<ScheduleEntry> {
    if rows.len() < 2 {
        debug!("Schedule sheet has no data rows ({} rows total)", rows.len());
        return Vec::new();
    }

    let schedules: Vec<ScheduleEntry> = rows[1..]
        .iter()
        .filter(|row| row.len() >= SCHEDULE_MIN_FIELDS)
        .map(|row| ScheduleEntry {
            id: field(row, 0),
            name: field(row, 1),
            email: field(row, 2),
            entry_type: field(row, 3),
            start_date: field(row, 4),
            end_date: field(row, 5),
            reason: field(row, 6),
            location: field(row, 7),
            status: field(row, 8),
        })
        .collect();

    info!("Parsed {} schedule entries", schedules.len());
    schedules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn employees_skip_header_and_trim_fields() {
        let input = rows(&[
            &["email", "name", "note"],
            &[" kim@x.com ", " Kim ", " 팀장 "],
            &["lee@x.com", "Lee"],
        ]);

        let employees = parse_employees(&input);

        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].email, "kim@x.com");
        assert_eq!(employees[0].name, "Kim");
        assert_eq!(employees[0].note, "팀장");
        assert_eq!(employees[1].note, "", "Missing note defaults to empty");
    }

    #[test]
    fn employees_drop_rows_with_a_single_field() {
        let input = rows(&[&["email", "name"], &["only-one"], &["a@x.com", "Park"]]);

        let employees = parse_employees(&input);

        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].name, "Park");
    }

    #[test]
    fn header_only_or_empty_sheet_yields_nothing() {
        assert!(parse_employees(&[]).is_empty());
        assert!(parse_employees(&rows(&[&["email", "name", "note"]])).is_empty());
        assert!(parse_schedules(&rows(&[&["id", "name"]])).is_empty());
    }

    #[test]
    fn schedules_map_columns_and_default_optional_fields() {
        let input = rows(&[
            &["id", "name", "email", "type", "start", "end", "reason", "location", "status"],
            &["1", "Kim", "e@x.com", "연차", "2024-01-01", "2024-01-01"],
            &["2", "Lee", "l@x.com", "출장", "2024-01-02", "2024-01-04", "고객사 방문", "부산", "승인"],
        ]);

        let schedules = parse_schedules(&input);

        assert_eq!(schedules.len(), 2);
        assert_eq!(schedules[0].entry_type, "연차");
        assert_eq!(schedules[0].reason, "");
        assert_eq!(schedules[0].status, "");
        assert_eq!(schedules[1].reason, "고객사 방문");
        assert_eq!(schedules[1].location, "부산");
        assert_eq!(schedules[1].status, "승인");
    }

    #[test]
    fn schedules_drop_rows_with_fewer_than_six_fields() {
        let input = rows(&[
            &["id", "name", "email", "type", "start", "end"],
            &["1", "Kim", "e@x.com", "연차", "2024-01-01"],
            &["2", "Kim", "e@x.com", "연차", "2024-01-01", "2024-01-02"],
        ]);

        let schedules = parse_schedules(&input);

        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].id, "2");
    }

    #[test]
    fn covers_is_inclusive_on_both_ends() {
        let entry = ScheduleEntry {
            start_date: "2024-01-02".to_string(),
            end_date: "2024-01-04".to_string(),
            ..Default::default()
        };

        assert!(!entry.covers("2024-01-01"));
        assert!(entry.covers("2024-01-02"));
        assert!(entry.covers("2024-01-03"));
        assert!(entry.covers("2024-01-04"));
        assert!(!entry.covers("2024-01-05"));
    }
}
