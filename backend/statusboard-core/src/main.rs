// src/main.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod board;
mod board_html;
mod classify;
mod config;
mod html;
mod output;
mod resolver;
mod roster;
mod sheets_client;
mod weather;
mod weather_client;
mod weather_html;
mod week;

use board::{build_grid, BoardVariant};
use board_html::render_board_document;
use config::EnvConfig;
use output::write_document;
use roster::{parse_employees, parse_schedules};
use sheets_client::SheetClient;
use weather::{collect_cards, collect_monitor, Region};
use weather_client::OpenMeteoClient;
use weather_html::{render_card_document, render_monitor_document};
use week::{Clock, FixedClock, SystemClock, WeekWindow};

const SCHEDULE_FILE_NAME: &str = "s1.html";

// --- Command Line ---

#[derive(Parser, Debug)]
#[command(
    name = "statusboard",
    version,
    about = "Renders the weekly schedule board and weather pages as static HTML"
)]
struct Cli {
    /// Directory for generated pages (overrides STATUSBOARD_OUTPUT_DIR)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Render as if it were this instant (RFC 3339, e.g. 2024-01-10T01:30:00Z)
    #[arg(long, global = true, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Weekly staff schedule board
    Schedule {
        #[arg(long, value_enum, default_value_t = BoardVariant::Split)]
        layout: BoardVariant,
        /// File name or path inside the output directory
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Weather card grid or regional monitor
    Weather {
        #[arg(value_enum)]
        region: Region,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Every page with its default file name
    All,
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

// --- Page Builders ---

fn file_name(target: &Path) -> String {
    target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

struct RunContext {
    config: EnvConfig,
    output_dir: PathBuf,
    clock: Box<dyn Clock>,
}

impl RunContext {
    fn target(&self, output: Option<&Path>, default_name: &str) -> PathBuf {
        self.output_dir
            .join(output.unwrap_or_else(|| Path::new(default_name)))
    }
}

async fn publish_schedule(ctx: &RunContext, layout: BoardVariant, target: &Path) -> Result<()> {
    let offset = ctx.config.offset()?;
    let settings = ctx.config.board_settings(layout)?;
    let client = SheetClient::new(ctx.config.sheet_config())
        .context("Failed to build the spreadsheet client")?;

    let employee_rows = client.fetch_rows_or_empty(&ctx.config.employee_tab).await;
    let schedule_rows = client.fetch_rows_or_empty(&ctx.config.schedule_tab).await;
    let employees = parse_employees(&employee_rows);
    let entries = parse_schedules(&schedule_rows);

    let window = WeekWindow::from_clock(ctx.clock.as_ref(), offset);
    info!(
        "Building {:?} board for {} .. {}",
        layout,
        window.first(),
        window.last()
    );
    let grid = build_grid(&employees, &entries, &window, &settings);
    let options = ctx.config.page_options_for(&file_name(target));
    let html = render_board_document(&grid, &window, &settings, &options);

    write_document(target, &html)
        .with_context(|| format!("Failed to write schedule board to {}", target.display()))?;
    Ok(())
}

async fn publish_weather(ctx: &RunContext, region: Region, target: &Path) -> Result<()> {
    let offset = ctx.config.offset()?;
    let client = OpenMeteoClient::new(ctx.config.forecast_config())
        .context("Failed to build the forecast client")?;
    let local_now = ctx.clock.now_utc().with_timezone(&offset);
    let options = ctx.config.page_options_for(&file_name(target));

    info!("Collecting {:?} forecasts", region);
    let html = if region.is_monitor() {
        let cities = collect_monitor(&client, region.locations()).await;
        render_monitor_document(&cities, local_now, &options)
            .context("Failed to serialize city forecasts")?
    } else {
        let cards = collect_cards(&client, region.locations()).await;
        render_card_document(&cards, local_now, &options)
    };

    write_document(target, &html)
        .with_context(|| format!("Failed to write weather page to {}", target.display()))?;
    Ok(())
}

// --- Main Application Entry Point ---
#[tokio::main]
async fn main() -> Result<()> {
    // --- Setup ---
    dotenv::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Setting the default tracing subscriber failed")?;

    let cli = Cli::parse();

    // --- Load Configuration ---
    let config = EnvConfig::from_env().context("Failed to load STATUSBOARD_* configuration")?;
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());
    let clock: Box<dyn Clock> = match cli.now {
        Some(instant) => {
            info!("Clock pinned to {}", instant.to_rfc3339());
            Box::new(FixedClock::new(instant))
        }
        None => Box::new(SystemClock),
    };
    info!("Configuration loaded. Output directory: {}", output_dir.display());

    let ctx = RunContext {
        config,
        output_dir,
        clock,
    };

    // --- Run Command ---
    match cli.command {
        Command::Schedule { layout, output } => {
            let target = ctx.target(output.as_deref(), SCHEDULE_FILE_NAME);
            publish_schedule(&ctx, layout, &target).await?;
        }
        Command::Weather { region, output } => {
            let target = ctx.target(output.as_deref(), region.default_file_name());
            publish_weather(&ctx, region, &target).await?;
        }
        Command::All => {
            let target = ctx.target(None, SCHEDULE_FILE_NAME);
            publish_schedule(&ctx, BoardVariant::Split, &target).await?;
            for region in Region::ALL {
                let target = ctx.target(None, region.default_file_name());
                publish_weather(&ctx, region, &target).await?;
            }
        }
    }

    info!("Done.");
    Ok(())
}
