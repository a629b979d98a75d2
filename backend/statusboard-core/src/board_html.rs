// src/board_html.rs
use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt::Write as _;

use crate::board::{BoardGrid, BoardSettings, BoardVariant, Cell, CellContent, Section};
use crate::classify::OFFICE_LABEL;
use crate::html::{document_head, escape, PageOptions};
use crate::week::WeekWindow;

const SCHEDULE_CSS: &str = include_str!("assets/schedule.css");
const BOARD_TITLE: &str = "주간 업무 및 출장 현황";
const BOARD_DESCRIPTION: &str = "주간 업무 및 출장 현황표입니다. 출장, 외근, 사내근무 일정을 확인할 수 있습니다.";

const DAY_HEADERS: [&str; 7] = [
    "월 (Mon)",
    "화 (Tue)",
    "수 (Wed)",
    "목 (Thu)",
    "금 (Fri)",
    "토 (Sat)",
    "일 (Sun)",
];

fn day_header(day: Weekday) -> &'static str {
    DAY_HEADERS[day.num_days_from_monday() as usize]
}

fn weekend_class(day: Weekday) -> &'static str {
    match day {
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
        _ => "weekend",
    }
}

// Joins non-empty class names into an attribute, or nothing at all
fn class_attr(classes: &[&str]) -> String {
    let joined = classes
        .iter()
        .filter(|c| !c.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", joined)
    }
}

// --- Cells ---

fn status_html(section: &Section) -> String {
    let mut html = format!(
        "<span class=\"status {}\">{}</span>",
        section.category.css_class(),
        escape(&section.label)
    );
    if let Some(reason) = &section.reason {
        let _ = write!(html, "<span class=\"desc\">{}</span>", escape(reason));
    }
    html
}

fn office_html() -> String {
    format!("<span class=\"office\">{}</span>", OFFICE_LABEL)
}

/// Inner markup and layout class for one cell.
pub fn cell_markup(content: &CellContent) -> (String, &'static str) {
    match content {
        CellContent::Empty => (String::new(), ""),
        CellContent::Office => (office_html(), ""),
        CellContent::ScheduledOffice => (office_html(), "full-status"),
        CellContent::Full(section) => (status_html(section), "full-status"),
        CellContent::MorningHalf(section) => (
            format!(
                "<div class=\"morning-content\">{}</div>",
                status_html(section)
            ),
            "morning-half",
        ),
        CellContent::AfternoonHalf(section) => (
            format!(
                "<div class=\"afternoon-content\">{}</div>",
                status_html(section)
            ),
            "afternoon-half",
        ),
        CellContent::Split { morning, afternoon } => (
            format!(
                "<span class=\"section morning\">{}</span><span class=\"section afternoon\">{}</span>",
                status_html(morning),
                status_html(afternoon)
            ),
            "split",
        ),
    }
}

fn cell_html(cell: &Cell) -> String {
    let (inner, layout_class) = cell_markup(&cell.content);
    let day_class = if cell.weekend {
        weekend_class(cell.date.weekday())
    } else {
        ""
    };
    format!("<td{}>{}</td>", class_attr(&[day_class, layout_class]), inner)
}

// --- Document ---

fn header_cells(dates: &[NaiveDate], settings: &BoardSettings) -> String {
    let mut html = String::new();
    for &date in dates {
        let day_class = if settings.is_weekend(date) {
            weekend_class(date.weekday())
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<th{}>{}<br><small>{}</small></th>",
            class_attr(&[day_class]),
            day_header(date.weekday()),
            date.format("%m/%d")
        );
    }
    html
}

fn body_rows(grid: &BoardGrid) -> String {
    let mut html = String::new();
    for row in &grid.rows {
        let _ = writeln!(html, "<tr>\n<td>{}</td>", escape(&row.employee));
        for cell in &row.cells {
            let _ = writeln!(html, "{}", cell_html(cell));
        }
        html.push_str("</tr>\n");
    }
    html
}

fn legend(variant: BoardVariant) -> &'static str {
    match variant {
        BoardVariant::Split => {
            "<span style=\"color:#64b5f6\">■ 외근/오전외근/오후외근</span>\n\
             <span style=\"color:#80d080\">■ 오전내근/오후내근</span>\n\
             <span style=\"color:#b39ddb\">■ 휴가/연차/반차</span>"
        }
        BoardVariant::Simple => {
            "<span style=\"color:#64b5f6\">■ 외근/오전외근/오후외근</span>\n\
             <span style=\"color:#b39ddb\">■ 휴가/연차/반차</span>"
        }
    }
}

/// Full board page. Output depends only on its inputs, so identical grids and
/// windows give identical bytes.
pub fn render_board_document(
    grid: &BoardGrid,
    window: &WeekWindow,
    settings: &BoardSettings,
    options: &PageOptions,
) -> String {
    let update_time = window.local_now().format("%Y-%m-%d %H:%M:%S");

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"ko\">\n\
         {head}\
         <body>\n\
         <div class=\"container\">\n\
         <header>\n\
         <div class=\"header-top\">\n\
         <h1>{title}</h1>\n\
         <div class=\"date-range\">{range}</div>\n\
         </div>\n\
         <div class=\"legend\">\n{legend}\n</div>\n\
         </header>\n\
         <div class=\"table-wrapper\">\n\
         <table>\n\
         <thead>\n<tr>\n<th>성명</th>\n{header}</tr>\n</thead>\n\
         <tbody>\n{body}</tbody>\n\
         </table>\n\
         </div>\n\
         <div class=\"update-time\">Last Update: {update_time} ({zone})</div>\n\
         </div>\n\
         </body>\n\
         </html>\n",
        head = document_head(BOARD_TITLE, BOARD_DESCRIPTION, options, SCHEDULE_CSS),
        title = BOARD_TITLE,
        range = window.display_range(),
        legend = legend(settings.variant),
        header = header_cells(&grid.dates, settings),
        body = body_rows(grid),
        update_time = update_time,
        zone = escape(&options.zone_label),
    )
}
