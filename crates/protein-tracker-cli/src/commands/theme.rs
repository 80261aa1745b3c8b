use clap::Subcommand;
use protein_tracker_core::{Database, Theme};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Get,
    /// Set the theme
    Set {
        /// light or dark
        theme: String,
    },
    /// Switch between light and dark
    Toggle,
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    let theme = match action {
        ThemeAction::Get => db.theme(),
        ThemeAction::Set { theme } => {
            let theme: Theme = theme.parse()?;
            db.set_theme(theme)?;
            theme
        }
        ThemeAction::Toggle => db.toggle_theme()?,
    };
    println!("{theme}");
    Ok(())
}
