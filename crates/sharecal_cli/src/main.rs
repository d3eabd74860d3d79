//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `sharecal_core` linkage.
//! - Render one month grid of the demo data as plain text.
//! - Apply `SHARECAL_*` configuration: file logging, theme, data-layer
//!   latency for `--dashboard`.

use chrono::Datelike;
use clap::Parser;
use sharecal_core::grid::{weeks, WEEKDAY_LABELS};
use sharecal_core::{
    init_logging, load_dashboard, local_today, ApiConfig, CalendarService, CancellationToken,
    CoreConfig, DashboardState, DayCell, Loadable, MonthRef, Repositories, SimulatedApi,
};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sharecal")]
#[command(about = "Print a month grid of the demo shared calendar")]
struct Cli {
    /// Year to show (defaults to the current year)
    #[arg(long, allow_negative_numbers = true)]
    year: Option<i32>,

    /// Month to show, 1-12 (defaults to the current month)
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=12))]
    month: Option<i32>,

    /// Also load the dashboard through the simulated data layer
    #[arg(long)]
    dashboard: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = CoreConfig::from_env();
    if let Some(dir) = &config.log_dir {
        if let Err(err) = init_logging(config.log_level, dir) {
            eprintln!("warning: file logging disabled: {err}");
        }
    }

    let today = local_today();
    let year = cli.year.unwrap_or(today.year());
    let month0 = cli.month.map(|m| m - 1).unwrap_or(today.month0() as i32);

    println!("sharecal_core ping={}", sharecal_core::ping());
    println!("sharecal_core version={}", sharecal_core::core_version());
    println!("sharecal_core theme={}", config.theme.as_str());

    let repos = Repositories::demo();
    let service = CalendarService::from_repositories(&repos);
    let cells = match service.month_grid(year, month0) {
        Ok(cells) => cells,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!();
    println!("{}", MonthRef::new(year, month0).title());
    println!("{}", WEEKDAY_LABELS.map(|label| format!("{label:>5}")).concat());
    for week in weeks(&cells) {
        let row: String = week.iter().map(|cell| render_cell(cell, today)).collect();
        println!("{row}");
    }

    let listed: Vec<&DayCell> = cells
        .iter()
        .filter(|cell| cell.is_current_month && !cell.events.is_empty())
        .collect();
    if !listed.is_empty() {
        println!();
    }
    for cell in listed {
        for event in &cell.events {
            let when = match (event.start_time, event.end_time) {
                (Some(start), Some(end)) => {
                    format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
                }
                _ => "all day".to_string(),
            };
            println!("{}  {:<11}  {}", cell.key(), when, event.title);
        }
    }

    if cli.dashboard {
        let api = SimulatedApi::new(&repos, ApiConfig::from(&config));
        match load_dashboard(&api, &CancellationToken::new(), today).await {
            Some(state) => print_dashboard(&state),
            None => {
                eprintln!("error: dashboard load cancelled");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_dashboard(state: &DashboardState) {
    println!();
    println!("Upcoming");
    match &state.upcoming {
        Loadable::Loaded(events) if events.is_empty() => println!("  none"),
        Loadable::Loaded(events) => {
            for event in events {
                println!("  {}  {}", event.date.format("%Y-%m-%d"), event.title);
            }
        }
        Loadable::Failed(message) => println!("  {message}"),
        Loadable::Loading => println!("  loading"),
    }
    if let Some(groups) = state.groups.loaded() {
        println!("Groups: {}", groups.len());
    }
    if let Some(invitations) = state.invitations.loaded() {
        for invitation in invitations {
            println!(
                "Invitation: {} from {}",
                invitation.group_name, invitation.inviter_name
            );
        }
    }
    for toast in &state.toasts {
        eprintln!("warning: {toast}");
    }
}

/// Five-column cell: `[d]` for today, `(d)` outside the month, `*` for
/// days with events.
fn render_cell(cell: &DayCell, today: chrono::NaiveDate) -> String {
    let marker = if cell.events.is_empty() { ' ' } else { '*' };
    let day = if cell.is_today(today) {
        format!("[{}]", cell.day_number)
    } else if cell.is_current_month {
        cell.day_number.to_string()
    } else {
        format!("({})", cell.day_number)
    };
    format!("{day:>4}{marker}")
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn month_must_be_between_1_and_12() {
        let cli = Cli::try_parse_from(["sharecal", "--month", "12", "--year", "-5"]).unwrap();
        assert_eq!(cli.month, Some(12));
        assert_eq!(cli.year, Some(-5));

        for bad in ["0", "13", "-2147483648"] {
            assert!(Cli::try_parse_from(["sharecal", "--month", bad]).is_err(), "{bad}");
        }
    }

    #[test]
    fn dashboard_is_opt_in() {
        assert!(!Cli::try_parse_from(["sharecal"]).unwrap().dashboard);
        assert!(Cli::try_parse_from(["sharecal", "--dashboard"]).unwrap().dashboard);
    }
}
