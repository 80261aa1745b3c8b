use clap::Subcommand;
use protein_tracker_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "day.reset_hour", "display.time_format")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List {
        /// Print the configuration as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("ok");
        }
        ConfigAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
                return Ok(());
            }
            for (key, value) in config.entries() {
                match note(&config, key) {
                    Some(note) => println!("{key} = {value}  # {note}"),
                    None => println!("{key} = {value}"),
                }
            }
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

fn note(config: &Config, key: &str) -> Option<String> {
    match key {
        "day.reset_hour" => Some(format!(
            "new day starts at {:02}:00 local time",
            config.day.reset_hour
        )),
        "day.retention_days" => Some("completed days kept in history".into()),
        "display.watch_interval_secs" => Some("rollover check period for `today watch`".into()),
        _ => None,
    }
}
