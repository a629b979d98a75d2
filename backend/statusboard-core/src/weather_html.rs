// src/weather_html.rs
use chrono::{DateTime, FixedOffset};
use std::fmt::Write as _;

use crate::html::{document_head, escape, PageOptions};
use crate::weather::{CityWeather, WeatherCard};

const CARDS_CSS: &str = include_str!("assets/weather_cards.css");
const MONITOR_CSS: &str = include_str!("assets/weather_monitor.css");
const MONITOR_JS: &str = include_str!("assets/weather_monitor.js");

const CARDS_TITLE: &str = "전국 날씨 대시보드";
const MONITOR_TITLE: &str = "한국 날씨 모니터";
const CARDS_DESCRIPTION: &str = "전국 주요 도시의 오늘 날씨와 최고/최저 기온";
const MONITOR_DESCRIPTION: &str = "한국 주요 도시의 실시간 날씨 정보와 주간 예보";

const KOREA_MAP_SVG: &str = "<svg class=\"map-svg\" viewBox=\"0 65 420 260\">\n\
<path class=\"land\" d=\"M 130,60 L 260,30 L 270,80 L 290,100 L 295,180 L 320,230 L 335,235 L 320,250 L 310,330 L 290,360 L 250,370 L 230,390 L 190,395 L 160,380 L 130,400 L 100,380 L 90,330 L 80,300 L 60,280 L 90,260 L 50,200 L 30,180 L 20,160 L 50,150 L 60,130 L 90,120 L 80,90 L 110,80 Z\" />\n\
<circle class=\"land\" cx=\"350\" cy=\"180\" r=\"8\" />\n\
</svg>";

/// JSON for a `<script>` body. `</` is split so the data cannot close the tag.
pub fn script_json(cities: &[CityWeather]) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(cities)?.replace("</", "<\\/"))
}

// --- Card Grid ---

fn card_html(card: &WeatherCard) -> String {
    format!(
        "<div class=\"card\">\n\
         <div class=\"loc-name\">{name}</div>\n\
         <div class=\"icon\">{icon}</div>\n\
         <div class=\"temps\"><span class=\"max\">{max}°</span> / <span class=\"min\">{min}°</span></div>\n\
         </div>\n",
        name = escape(&card.name),
        icon = card.icon,
        max = card.temp_max,
        min = card.temp_min,
    )
}

/// National card grid. Cards appear in the order given.
pub fn render_card_document(
    cards: &[WeatherCard],
    local_now: DateTime<FixedOffset>,
    options: &PageOptions,
) -> String {
    let mut grid = String::new();
    for card in cards {
        grid.push_str(&card_html(card));
    }

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"ko\">\n\
         {head}\
         <body>\n\
         <header>KR Weather Dashboard</header>\n\
         <div class=\"grid\">\n{grid}</div>\n\
         <footer>Last Update: {update_time} ({zone})</footer>\n\
         </body>\n\
         </html>\n",
        head = document_head(CARDS_TITLE, CARDS_DESCRIPTION, options, CARDS_CSS),
        grid = grid,
        update_time = local_now.format("%Y-%m-%d %H:%M"),
        zone = escape(&options.zone_label),
    )
}

// --- Monitor ---

/// Regional monitor: header clock, map markers and the weekly table are drawn
/// client-side from the inlined city list.
pub fn render_monitor_document(
    cities: &[CityWeather],
    local_now: DateTime<FixedOffset>,
    options: &PageOptions,
) -> Result<String, serde_json::Error> {
    let data = script_json(cities)?;

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n\
         <html lang=\"ko\">\n\
         {head}\
         <body>\n\
         <header>\n\
         <div class=\"title\">LIVE WEATHER MONITOR</div>\n\
         <div class=\"clock-container\">\n\
         <div id=\"currentDate\"></div>\n\
         <div id=\"currentTime\"></div>\n\
         </div>\n\
         </header>\n\
         <div class=\"main-content\">\n\
         <div class=\"left-panel\">\n\
         <div class=\"map-wrapper\" id=\"mapContainer\">\n{map}\n</div>\n\
         </div>\n\
         <div class=\"right-panel\">\n\
         <div class=\"forecast-table-container\">\n\
         <table id=\"forecastTable\">\n\
         <thead><tr id=\"tableHeaderRow\"><th>지역</th></tr></thead>\n\
         <tbody id=\"tableBody\"></tbody>\n\
         </table>\n\
         </div>\n\
         </div>\n\
         </div>\n\
         <div class=\"server-time\">Last Update: {update_time} ({zone})</div>\n\
         <script>\n\
         const weatherData = {data};\n\
         {script}\
         </script>\n\
         </body>\n\
         </html>\n",
        head = document_head(MONITOR_TITLE, MONITOR_DESCRIPTION, options, MONITOR_CSS),
        map = KOREA_MAP_SVG,
        update_time = local_now.format("%Y-%m-%d %H:%M:%S"),
        zone = escape(&options.zone_label),
        data = data,
        script = MONITOR_JS,
    );
    Ok(html)
}
