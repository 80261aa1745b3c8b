use clap::Subcommand;
use protein_tracker_core::MonthCalendar;

use super::open_engine;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Streaks, weekly/monthly counts and completion rate
    Summary,
    /// Completed days, oldest first
    History,
    /// Month calendar (defaults to the current month)
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
        /// Print a text grid instead of JSON
        #[arg(long)]
        grid: bool,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;

    match action {
        StatsAction::Summary => {
            println!("{}", serde_json::to_string_pretty(&engine.stats())?);
        }
        StatsAction::History => {
            let mut history = engine.history();
            history.sort();
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        StatsAction::Calendar { year, month, grid } => {
            let selected = match (year, month) {
                (None, None) => None,
                (y, m) => {
                    use chrono::Datelike;
                    let today = engine.today().date();
                    Some((y.unwrap_or(today.year()), m.unwrap_or(today.month())))
                }
            };
            let calendar = engine.calendar(selected)?;
            if grid {
                print!("{}", render_grid(&calendar));
            } else {
                println!("{}", serde_json::to_string_pretty(&calendar)?);
            }
        }
    }
    Ok(())
}

fn render_grid(calendar: &MonthCalendar) -> String {
    let mut out = format!(
        "{:04}-{:02}  {} done\nSu Mo Tu We Th Fr Sa\n",
        calendar.year, calendar.month, calendar.completed_days
    );
    for week in calendar.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                None => "  ".to_string(),
                Some(day) if day.completed => " x".to_string(),
                Some(day) => {
                    use chrono::Datelike;
                    format!("{:>2}", day.date.date().day())
                }
            })
            .collect();
        out.push_str(row.join(" ").trim_end());
        out.push('\n');
    }
    out
}
