// src/board.rs
use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::classify::{Category, Classification, Classifier, LabelStyle};
use crate::resolver::{self, DaySlots, Markers};
use crate::roster::{Employee, ScheduleEntry};
use crate::week::WeekWindow;

// --- Board Configuration ---

/// Which board to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BoardVariant {
    /// Morning/afternoon aware board
    #[default]
    Split,
    /// One entry per day, first match wins, decorated labels
    Simple,
}

#[derive(Debug, Clone)]
pub struct BoardSettings {
    pub variant: BoardVariant,
    pub markers: Markers,
    pub weekend_days: Vec<Weekday>,
    pub classifier: Classifier,
}

impl BoardSettings {
    pub fn for_variant(variant: BoardVariant, weekend_days: Vec<Weekday>) -> Self {
        let classifier = match variant {
            BoardVariant::Split => Classifier::standard(LabelStyle::Plain),
            BoardVariant::Simple => Classifier::legacy(),
        };
        Self {
            variant,
            markers: Markers::default(),
            weekend_days,
            classifier,
        }
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend_days.contains(&date.weekday())
    }
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self::for_variant(BoardVariant::Split, vec![Weekday::Sat, Weekday::Sun])
    }
}

// --- Cell Model ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub category: Category,
    pub label: String,
    pub reason: Option<String>,
}

impl Section {
    fn from_entry(entry: &ScheduleEntry, classifier: &Classifier) -> Self {
        let Classification { category, label } = classifier.classify(&entry.entry_type);
        let reason = Some(entry.reason.clone()).filter(|r| !r.is_empty());
        Self {
            category,
            label,
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    /// Nothing scheduled on a weekend column
    Empty,
    /// Default office label spanning the cell
    Office,
    /// Default office label produced by an unmarked entry
    ScheduledOffice,
    /// Whole-day status line
    Full(Section),
    /// Explicit morning entry drawn in the top half
    MorningHalf(Section),
    /// Afternoon entry drawn in the bottom half
    AfternoonHalf(Section),
    /// Morning and afternoon stacked
    Split { morning: Section, afternoon: Section },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub date: NaiveDate,
    pub weekend: bool,
    pub content: CellContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    pub employee: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardGrid {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<BoardRow>,
}

// --- Layout Selection ---

/// Layout for the morning/afternoon board.
pub fn compose_split_cell(
    slots: DaySlots<'_>,
    weekend: bool,
    settings: &BoardSettings,
) -> CellContent {
    if slots.is_empty() {
        return if weekend {
            CellContent::Empty
        } else {
            CellContent::Office
        };
    }

    let classifier = &settings.classifier;
    match (slots.morning, slots.afternoon) {
        (None, None) => CellContent::Office,
        (Some(morning), Some(afternoon)) => CellContent::Split {
            morning: Section::from_entry(morning, classifier),
            afternoon: Section::from_entry(afternoon, classifier),
        },
        (Some(morning), None) => {
            let section = Section::from_entry(morning, classifier);
            if settings.markers.is_morning(&morning.entry_type) {
                CellContent::MorningHalf(section)
            } else if section.category == Category::Office {
                CellContent::ScheduledOffice
            } else {
                CellContent::Full(section)
            }
        }
        (None, Some(afternoon)) => {
            CellContent::AfternoonHalf(Section::from_entry(afternoon, classifier))
        }
    }
}

/// Layout for the single-entry board.
pub fn compose_simple_cell(
    entry: Option<&ScheduleEntry>,
    weekend: bool,
    settings: &BoardSettings,
) -> CellContent {
    match entry {
        None if weekend => CellContent::Empty,
        None => CellContent::Office,
        Some(entry) => {
            let section = Section::from_entry(entry, &settings.classifier);
            if section.category == Category::Office {
                CellContent::Office
            } else {
                CellContent::Full(section)
            }
        }
    }
}

/// Every employee against every date of the window. Rows keep employee order,
/// cells keep window order. Always produces a cell for each pair.
pub fn build_grid(
    employees: &[Employee],
    entries: &[ScheduleEntry],
    window: &WeekWindow,
    settings: &BoardSettings,
) -> BoardGrid {
    let dates: Vec<NaiveDate> = window.dates().to_vec();

    let rows = employees
        .iter()
        .map(|employee| {
            let cells = dates
                .iter()
                .map(|&date| {
                    let weekend = settings.is_weekend(date);
                    let content = match settings.variant {
                        BoardVariant::Split => {
                            let slots =
                                resolver::resolve(entries, &employee.name, date, &settings.markers);
                            compose_split_cell(slots, weekend, settings)
                        }
                        BoardVariant::Simple => {
                            let entry = resolver::first_match(entries, &employee.name, date);
                            compose_simple_cell(entry, weekend, settings)
                        }
                    };
                    Cell {
                        date,
                        weekend,
                        content,
                    }
                })
                .collect();
            BoardRow {
                employee: employee.name.clone(),
                cells,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "Built {:?} board grid: {} rows x {} days, {} classifier rules",
        settings.variant,
        rows.len(),
        dates.len(),
        settings.classifier.rules().len()
    );

    BoardGrid { dates, rows }
}
