use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use reading_calendar::{Endpoint, PlanForm};

/// Reading calendar planner.
#[derive(Parser)]
#[command(
    name = "reading-calendar",
    version,
    about = "Plan a Bible-reading calendar and print its renderer links"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML settings file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Date to treat as today (YYYY-MM-DD); defaults to the local date.
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(flatten)]
    pub plan: PlanOverrides,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate the plan and print a summary.
    Check,
    /// Print the months to render, one per line.
    Months,
    /// Print renderer URLs.
    Links(LinksArgs),
    /// Print the gallery grouped by year, with export links.
    Preview,
}

/// Arguments for the `links` subcommand.
#[derive(clap::Args)]
pub struct LinksArgs {
    /// Renderer endpoint: png, svg, pdf or ics.
    #[arg(short, long, default_value = "png")]
    pub endpoint: Endpoint,
}

/// Command-line overrides for the `[plan]` settings table.
#[derive(clap::Args)]
pub struct PlanOverrides {
    /// Coverage type, e.g. new-testament or whole-bible.
    #[arg(long, global = true)]
    pub coverage: Option<String>,

    /// Plan duration: one-year or two-years.
    #[arg(long, global = true)]
    pub duration: Option<String>,

    /// Whole-bible reading order.
    #[arg(long, global = true)]
    pub order: Option<String>,

    /// Rest day for coverages with a single rest day.
    #[arg(long, global = true)]
    pub rest_day: Option<String>,

    /// New-testament rest days, e.g. `--rest-days sunday saturday`.
    #[arg(long, global = true, num_args = 2, value_names = ["FIRST", "SECOND"])]
    pub rest_days: Option<Vec<String>>,

    /// Start date type: today, tomorrow, next-month, next-year or custom.
    #[arg(long, global = true)]
    pub start: Option<String>,

    /// Start date used with `--start custom` (YYYY-MM-DD).
    #[arg(long, global = true)]
    pub custom_date: Option<NaiveDate>,

    /// Display locale, e.g. ko or en-US.
    #[arg(long, global = true)]
    pub locale: Option<String>,
}

impl PlanOverrides {
    /// Writes every given override into `form`.
    pub fn apply(&self, form: &mut PlanForm) {
        if let Some(coverage) = &self.coverage {
            form.set_coverage_type(coverage.as_str());
        }
        if let Some(duration) = &self.duration {
            form.set_duration_type(duration.as_str());
        }
        if let Some(order) = &self.order {
            form.set_order_type(order.as_str());
        }
        if let Some(rest_day) = &self.rest_day {
            form.set_rest_day(rest_day.as_str());
        }
        if let Some([first, second]) = self.rest_days.as_deref() {
            form.set_rest_days(first.as_str(), second.as_str());
        }
        if let Some(date) = self.custom_date {
            form.set_custom_start_date(date);
        }
        if let Some(start) = &self.start {
            form.set_start_date_type(start.as_str());
        }
        if let Some(locale) = &self.locale {
            form.set_locale(locale.as_str());
        }
    }
}
