use anyhow::{Context, Result};
use chrono::NaiveDate;
use reading_calendar::{
    Endpoint, Endpoints, PlanConfig, Preview, StartDate, format_custom_start_date, months_to_render,
    resolve_start_date,
};
use tracing::info;

/// Prints a summary of the validated plan.
pub fn check(config: &PlanConfig, today: NaiveDate) -> Result<()> {
    let start = resolve_start_date(config, today).context("resolving start date")?;
    let mut months = months_to_render(config, start).context("listing months")?;
    let coverage = config.coverage();

    println!("coverage: {}", coverage.kind());
    if let Some(duration) = coverage.duration() {
        println!("duration: {duration}");
    }
    if let Some(order) = coverage.order() {
        println!("order: {order}");
    }
    let rest: Vec<String> = coverage.days_to_rest().iter().map(ToString::to_string).collect();
    println!(
        "rest days: {}",
        if rest.is_empty() { "none".to_owned() } else { rest.join(", ") }
    );
    println!("start: {} ({})", start, config.start().kind());
    if let StartDate::Custom(date) = config.start() {
        let display = format_custom_start_date(date, today, config.locale());
        if !display.is_empty() {
            println!("custom date: {display}");
        }
    }
    println!("locale: {}", config.locale());

    let count = months.len();
    let first = months.next();
    let last = months.last().or(first);
    if let (Some(first), Some(last)) = (first, last) {
        println!("months: {count} ({first} to {last})");
    }
    info!(%start, months = count, "plan is valid");
    Ok(())
}

/// Prints each month to render as `YYYY-MM`.
pub fn months(config: &PlanConfig, today: NaiveDate) -> Result<()> {
    let start = resolve_start_date(config, today).context("resolving start date")?;
    for month in months_to_render(config, start).context("listing months")? {
        println!("{month}");
    }
    Ok(())
}

/// Prints the URLs for `endpoint`.
pub fn links(
    config: &PlanConfig,
    today: NaiveDate,
    endpoints: &Endpoints,
    endpoint: Endpoint,
) -> Result<()> {
    let preview = Preview::build(config, today, endpoints).context("building links")?;
    let links = preview.links(endpoint);
    info!(%endpoint, count = links.len(), "printing links");
    for link in links {
        println!("{link}");
    }
    Ok(())
}

/// Prints the gallery grouped by year, followed by the export links.
pub fn preview(config: &PlanConfig, today: NaiveDate, endpoints: &Endpoints) -> Result<()> {
    let preview = Preview::build(config, today, endpoints).context("building preview")?;
    for (year, items) in preview.by_year() {
        println!("{year}");
        for item in items {
            println!("  {:>2}. {} {}", item.index + 1, item.month, item.src);
        }
    }
    println!("pdf: {}", preview.pdf_url());
    println!("ics: {}", preview.ics_url());
    Ok(())
}
