mod app;
mod commands;
mod render;

use std::path::PathBuf;

use almanac_core::store::DateUnit;
use anyhow::Result;
use app::App;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "almanac")]
#[command(about = "A terminal calendar: month grid, day schedule, and timed events")]
struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid and the selected day's schedule
    Show {
        /// Move the cursor to this date first (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Move the cursor to today
    Today,
    /// Move the cursor to a specific date (YYYY-MM-DD)
    Goto { date: NaiveDate },
    /// Move the cursor forward
    Next {
        #[arg(value_enum, default_value_t = UnitArg::Day)]
        unit: UnitArg,

        /// How many units to move
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u16,
    },
    /// Move the cursor backward
    Prev {
        #[arg(value_enum, default_value_t = UnitArg::Day)]
        unit: UnitArg,

        /// How many units to move
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u16,
    },
    /// Create a new event
    New {
        title: String,

        /// Start: "YYYY-MM-DD HH:MM", or "HH:MM" on the cursor date
        #[arg(short, long)]
        start: String,

        /// End: "YYYY-MM-DD HH:MM", or "HH:MM" on the start's date
        #[arg(short, long)]
        end: Option<String>,

        /// Duration from start (e.g. "45m", "1h 30m")
        #[arg(short = 'D', long, conflicts_with = "end")]
        duration: Option<String>,
    },
    /// Delete an event by its schedule number
    Delete {
        /// The event's number in the day's schedule (see `show`)
        index: usize,

        /// The day to delete from (defaults to the cursor date)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List all stored events
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Day,
    Month,
    Year,
}

impl From<UnitArg> for DateUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Day => DateUnit::Day,
            UnitArg::Month => DateUnit::Month,
            UnitArg::Year => DateUnit::Year,
        }
    }
}

fn main() -> Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?
        .log_to_stderr()
        .start()?;

    let cli = Cli::parse();
    let mut app = App::load(cli.dir)?;

    match cli.command {
        None => commands::show::run(&mut app, None)?,
        Some(Commands::Show { date }) => commands::show::run(&mut app, date)?,
        Some(Commands::Today) => commands::nav::today(&mut app)?,
        Some(Commands::Goto { date }) => commands::nav::goto(&mut app, date)?,
        Some(Commands::Next { unit, count }) => {
            commands::nav::shift(&mut app, unit.into(), i32::from(count))?
        }
        Some(Commands::Prev { unit, count }) => {
            commands::nav::shift(&mut app, unit.into(), -i32::from(count))?
        }
        Some(Commands::New {
            title,
            start,
            end,
            duration,
        }) => commands::new::run(&mut app, title, start, end, duration)?,
        Some(Commands::Delete { index, date, yes }) => {
            commands::delete::run(&mut app, index, date, yes)?
        }
        Some(Commands::List) => commands::list::run(&app)?,
    }

    app.save_if_changed()
}
