//! Text dashboard for the seasonal tourism dataset
//!
//! Usage:
//!   cargo run --bin tourism_cli -- --month October --state Kerala
//!   cargo run --bin tourism_cli -- --month May --json
//!   cargo run --bin tourism_cli -- --month October --user Asha --email asha@example.com --export trip_plan.csv

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tourism_trends::budget::{estimate_budget, format_inr, TripSummary};
use tourism_trends::session::reconcile;
use tourism_trends::{apply_event, AppConfig, Dashboard, Month, Selection, SelectionEvent, TourismData};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tourism_cli", about = "Seasonal tourism trends in India")]
struct Args {
    /// Dataset path (.csv or .parquet); defaults to DATA_PATH
    #[arg(long)]
    data: Option<PathBuf>,

    /// Travel month
    #[arg(long, default_value = "January", value_parser = parse_month)]
    month: Month,

    /// State (must be one of the month's top states)
    #[arg(long)]
    state: Option<String>,

    /// Place within the state
    #[arg(long)]
    place: Option<String>,

    #[arg(long, default_value_t = 2)]
    travelers: u32,

    #[arg(long, default_value_t = 3)]
    days: u32,

    /// Number of alternative places to suggest
    #[arg(long)]
    alternatives: Option<usize>,

    /// Name for the trip summary
    #[arg(long, requires = "email")]
    user: Option<String>,

    /// Email for the trip summary
    #[arg(long, requires = "user")]
    email: Option<String>,

    /// Write the trip summary CSV to this path
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print the dashboard as JSON
    #[arg(long)]
    json: bool,
}

fn parse_month(raw: &str) -> std::result::Result<Month, String> {
    raw.parse::<Month>().map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "tourism_trends=info,warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(path) = args.data.clone() {
        config.data_path = path;
    }
    if let Some(n) = args.alternatives {
        config.alternatives = n;
    }

    let data = TourismData::load(&config.data_path)?;
    let selection = build_selection(&data, &args, config.top_states)?;
    let dashboard = Dashboard::build(&data, &selection, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print_report(&dashboard, &selection);
    }

    print_budget_and_export(&data, &selection, &args)?;

    Ok(())
}

fn build_selection(data: &TourismData, args: &Args, top_k: usize) -> Result<Selection> {
    let mut events = vec![
        SelectionEvent::SetTravelers { travelers: args.travelers },
        SelectionEvent::SetDays { days: args.days },
        SelectionEvent::SelectMonth { month: args.month },
    ];
    if let (Some(name), Some(email)) = (&args.user, &args.email) {
        events.push(SelectionEvent::SignIn {
            name: name.clone(),
            email: email.clone(),
        });
    }
    if let Some(state) = &args.state {
        events.push(SelectionEvent::SelectState { state: state.clone() });
    }
    if let Some(place) = &args.place {
        events.push(SelectionEvent::SelectPlace { place: place.clone() });
    }

    let mut selection = reconcile(data, Selection::default(), top_k);
    for event in events {
        selection = apply_event(data, &selection, event, top_k)?;
    }
    Ok(selection)
}

fn print_report(dashboard: &Dashboard, selection: &Selection) {
    let month = &dashboard.month;

    println!("\n{}", "=".repeat(70));
    println!("Seasonal Tourism Trends: {}", month.month);
    println!("{}", "=".repeat(70));

    if !month.has_data() {
        println!("No data for this month. Please pick another month.");
        return;
    }

    println!("\nTop {} states", month.top_states.len());
    for (i, s) in month.top_states.iter().enumerate() {
        println!("  {}. {:<25} {:>12} visitors", i + 1, s.state, format_inr(s.avg_visitors));
    }

    println!("\nMonthly visitor trends");
    let header: Vec<&str> = tourism_trends::MONTH_ORDER.iter().map(|m| &m.name()[..3]).collect();
    println!("  {:<20} {}", "", header.join("  "));
    for trend in &month.trends {
        let cells: Vec<String> = trend.visitors.iter().map(|v| format!("{:>3.0}", v / 1000.0)).collect();
        println!("  {:<20} {}  (thousands)", trend.state, cells.join("  "));
    }

    let Some(panel) = &dashboard.place else {
        return;
    };

    println!("\nSelection: {} / {} / {}", panel.month, panel.state, panel.place);

    println!("\nTop places (visitor distribution)");
    for p in &panel.top_places {
        println!("  {:<25} {:>12}  {:>5.1}%", p.place, format_inr(p.avg_visitors), p.share);
    }

    println!("\nBest season & tips");
    match panel.outlook.season {
        Some(season) => {
            let months: Vec<&str> = panel.outlook.top_months.iter().map(|m| m.name()).collect();
            println!("  Best season: {}", season);
            println!("  Top months historically: {}", months.join(", "));
            if !panel.weather_tip.is_empty() {
                println!("  Tip: {}", panel.weather_tip);
            }
        }
        None => println!("  No season info available."),
    }

    if !panel.alternatives.is_empty() {
        println!("\nYou may also like: {}", panel.alternatives.join(", "));
    }

    println!("\nQuick stats");
    match &panel.quick_stats {
        Some(stats) => {
            println!("  Avg visitors (this month): {}", format_inr(stats.avg_visitors));
            println!("  Avg stay days: {}", stats.avg_stay_days.trunc());
            println!("  Avg cost/day: ₹{}", format_inr(stats.avg_cost_per_day));
            println!("  Avg travel cost/person: ₹{}", format_inr(stats.travel_cost_per_person));
        }
        None => println!("  No data to show."),
    }

    if let Some(user) = &selection.user {
        println!("\nPlanning as {} <{}>", user.name, user.email);
    }
}

fn print_budget_and_export(data: &TourismData, selection: &Selection, args: &Args) -> Result<()> {
    let (Some(state), Some(place)) = (selection.state.as_deref(), selection.place.as_deref()) else {
        if args.export.is_some() {
            bail!("Nothing to export: no state/place available for {}", selection.month);
        }
        return Ok(());
    };

    let scope = data.scope(selection.month, state);
    let Some(estimate) = estimate_budget(scope.iter().copied(), place, selection.travelers, selection.days)? else {
        return Ok(());
    };

    if !args.json {
        println!("\nTrip budget ({} travelers, {} days)", estimate.travelers, estimate.days);
        println!("  Estimated total budget: ₹{}", format_inr(estimate.total));
        for line in estimate.breakdown().lines() {
            println!("  {}", line);
        }
    }

    if let Some(path) = &args.export {
        let user = selection
            .user
            .as_ref()
            .context("--user and --email are required to export a trip summary")?;
        let summary = TripSummary::new(&user.name, &user.email, selection.month, state, &estimate);
        summary.write_csv(path)?;
        eprintln!("Trip summary written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["tourism_cli"]).unwrap();
        assert_eq!(args.month, Month::January);
        assert_eq!((args.travelers, args.days), (2, 3));
        assert!(args.user.is_none());
    }

    #[test]
    fn test_user_and_email_require_each_other() {
        assert!(Args::try_parse_from(["tourism_cli", "--user", "Asha"]).is_err());
        assert!(Args::try_parse_from(["tourism_cli", "--email", "asha@example.com"]).is_err());

        let args =
            Args::try_parse_from(["tourism_cli", "--user", "Asha", "--email", "asha@example.com"]).unwrap();
        assert_eq!(args.user.as_deref(), Some("Asha"));
    }

    #[test]
    fn test_month_accepts_abbreviation() {
        let args = Args::try_parse_from(["tourism_cli", "--month", "oct"]).unwrap();
        assert_eq!(args.month, Month::October);
        assert!(Args::try_parse_from(["tourism_cli", "--month", "Smarch"]).is_err());
    }
}
