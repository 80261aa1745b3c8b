pub mod config;
pub mod export;
pub mod stats;
pub mod theme;
pub mod today;

use protein_tracker_core::{Config, Database, DayStateEngine, SystemClock};

pub type Engine = DayStateEngine<Database, SystemClock>;

/// Open storage and reconcile once for this session.
pub fn open_engine() -> Result<Engine, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let engine = DayStateEngine::with_config(db, SystemClock, config);
    engine.reconcile_and_persist();
    Ok(engine)
}
