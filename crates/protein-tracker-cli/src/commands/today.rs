use clap::Subcommand;
use protein_tracker_core::DayStatus;
use std::time::Duration;

use super::{open_engine, Engine};

#[derive(Subcommand)]
pub enum TodayAction {
    /// Print today's status as JSON
    Status,
    /// Flip today's status
    Toggle,
    /// Mark today as done
    Done,
    /// Mark today as not done
    Undo,
    /// Re-check periodically and print the status whenever it changes
    Watch {
        /// Seconds between checks (defaults to display.watch_interval_secs)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
        /// Stop after this many checks
        #[arg(long)]
        ticks: Option<u32>,
    },
}

pub fn run(action: TodayAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;

    match action {
        TodayAction::Status => {}
        TodayAction::Toggle => {
            engine.toggle_drank();
        }
        TodayAction::Done => engine.set_drank(true),
        TodayAction::Undo => engine.set_drank(false),
        TodayAction::Watch { interval, ticks } => {
            let secs = interval.unwrap_or(engine.config().display.watch_interval_secs);
            return watch(&engine, Duration::from_secs(secs), ticks);
        }
    }

    println!("{}", serde_json::to_string_pretty(&engine.status())?);
    Ok(())
}

fn watch(
    engine: &Engine,
    period: Duration,
    ticks: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async {
        let mut interval = tokio::time::interval(period);
        let mut last: Option<DayStatus> = None;
        let mut checks = 0u32;

        loop {
            interval.tick().await;
            let status = engine.status();
            if last.as_ref() != Some(&status) {
                if let Some(prev) = &last {
                    if prev.today != status.today {
                        tracing::info!(from = %prev.today, to = %status.today, "app day rolled over");
                    }
                }
                println!("{}", serde_json::to_string(&status)?);
                last = Some(status);
            }

            checks += 1;
            if ticks.is_some_and(|max| checks >= max) {
                break;
            }
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
