mod cli;
mod commands;
mod logging;

use std::process;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use reading_calendar::{PlanForm, Settings};
use tracing::debug;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let form = plan_form(settings.plan, cli, today);
    debug!(%today, required = ?form.required_fields(), "finalizing plan");
    let config = form.finalize(today).context("invalid reading plan")?;

    match &cli.command {
        Command::Check => commands::check(&config, today),
        Command::Months => commands::months(&config, today),
        Command::Links(args) => commands::links(&config, today, &settings.renderer, args.endpoint),
        Command::Preview => commands::preview(&config, today, &settings.renderer),
    }
}

/// Settings-file choices with every field given its predefined value, then
/// the command-line overrides on top.
fn plan_form(mut form: PlanForm, cli: &Cli, today: NaiveDate) -> PlanForm {
    form.initialize(today);
    cli.plan.apply(&mut form);
    form
}
