use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use weatherdash_core::{
    Config, ConfigFile, Coordinate, Dashboard, SettingsStore, ViewHost, ViewKey,
    location::{FixedLocation, Locator},
    render::MemoryScreen,
    services_from_config,
    view::SettingsPanel,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Position override. Without it the `[home]` coordinate from the config is used.
#[derive(Debug, Clone, Copy, Args)]
pub struct Position {
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,
}

impl Position {
    fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.lat?, self.lon?))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the dashboard for the current position.
    Show {
        #[command(flatten)]
        position: Position,

        /// Name used in the greeting.
        #[arg(long)]
        name: Option<String>,
    },

    /// Show only the place name of the current position.
    Locate {
        #[command(flatten)]
        position: Position,
    },

    /// Search for a place and show it on the map.
    Search {
        /// Free-form place query, e.g. "Lyon" or "10 Downing Street".
        query: String,
    },

    /// Switch to a view: dashboard, map, calendar or settings.
    View {
        view: String,

        #[command(flatten)]
        position: Position,
    },

    /// Set a persisted flag, e.g. `tempUnit f`.
    Set { key: String, value: String },

    /// Edit settings interactively.
    Configure,
}

/// The terminal shows one view at a time; remember which.
#[derive(Debug, Default)]
struct TerminalHost {
    visible: Option<ViewKey>,
}

impl ViewHost for TerminalHost {
    fn set_visible(&mut self, view: ViewKey, visible: bool) {
        if visible {
            self.visible = Some(view);
        } else if self.visible == Some(view) {
            self.visible = None;
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };
        tracing::debug!("Using config file {}", config_path.display());
        let config = Config::load_from(&config_path)?;
        let store = ConfigFile::new(config_path);

        match self.command {
            Command::Show { position, name } => {
                let mut dash = dashboard(&config, position, store)?;
                let mut screen = MemoryScreen::new();
                let name = name.or_else(|| config.user_name.clone());

                dash.greet(&mut screen, name.as_deref());
                dash.start(&mut screen, Local::now().naive_local()).await;
                output::print_dashboard(&screen);
            }
            Command::Locate { position } => {
                let mut dash = dashboard(&config, position, store)?;
                let mut screen = MemoryScreen::new();
                if let Some(name) = dash.locate_only(&mut screen).await {
                    println!("{name}");
                }
            }
            Command::Search { query } => {
                let mut dash = dashboard(&config, Position { lat: None, lon: None }, store)?;
                let mut host = TerminalHost::default();
                if let Some(place) = dash.search(&query, &mut host, Local::now().date_naive()).await {
                    println!("{}", place.name);
                    output::print_map(dash.state().map.instance());
                }
            }
            Command::View { view, position } => {
                let mut dash = dashboard(&config, position, store)?;
                let mut host = TerminalHost::default();
                let now = Local::now().naive_local();

                let key = ViewKey::parse_or_default(&view);
                if matches!(key, ViewKey::Dashboard | ViewKey::Map) {
                    dash.locate().await;
                }
                let mut screen = MemoryScreen::new();
                if let (ViewKey::Dashboard, Some(at)) = (key, dash.state().coordinate) {
                    dash.refresh(at, &mut screen, now).await;
                }

                let shown = dash.activate(&view, &mut host, now.date());
                let state = dash.state();
                match shown {
                    ViewKey::Dashboard => output::print_dashboard(&screen),
                    ViewKey::Map => output::print_map(state.map.instance()),
                    ViewKey::Calendar => {
                        if let Some(calendar) = &state.calendar {
                            output::print_calendar(calendar);
                        }
                    }
                    ViewKey::Settings => {
                        if let Some(panel) = &state.settings_panel {
                            output::print_settings(panel);
                        }
                    }
                }
            }
            Command::Set { key, value } => {
                let mut settings = store.load_settings();
                settings.set(&key, &value)?;
                store.save_settings(&settings)?;
                println!("{key} = {value}");
            }
            Command::Configure => configure(&store)?,
        }

        Ok(())
    }
}

fn dashboard(config: &Config, position: Position, store: ConfigFile) -> anyhow::Result<Dashboard> {
    let services = services_from_config(config).context("Failed to set up HTTP clients")?;
    let source = FixedLocation(position.coordinate().or(config.home));
    Ok(Dashboard::new(services, Locator::new(Box::new(source)), Box::new(store)))
}

fn configure(store: &ConfigFile) -> anyhow::Result<()> {
    let mut settings = store.load_settings();
    let panel = SettingsPanel::build(&settings);

    for control in &panel.controls {
        let labels: Vec<&str> = control.options.iter().map(|o| o.label).collect();
        let cursor = control
            .options
            .iter()
            .position(|o| o.value == control.selected)
            .unwrap_or(0);

        let choice = inquire::Select::new(control.label, labels)
            .with_help_message(control.description)
            .with_starting_cursor(cursor)
            .prompt()?;

        if let Some(option) = control.options.iter().find(|o| o.label == choice) {
            settings.set(control.key, option.value)?;
        }
    }

    store.save_settings(&settings)?;
    println!("Saved settings to {}", store.path().display());
    Ok(())
}
