use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use metweather_core::{
    ActionOutcome, Config, Coordinates, OpenWeatherClient, Phase, Session, aggregate::Grouping,
    aggregate::LabelStyle,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "metweather", version, about = "Weather, air quality and forecast for a place")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Show weather for a place name, e.g. "Dublin, IE".
    Show {
        /// Place name to search for.
        place: String,

        #[command(flatten)]
        forecast: ForecastArgs,
    },

    /// Show weather at a point, as if it were tapped on a map.
    #[command(allow_negative_numbers = true)]
    At {
        latitude: f64,
        longitude: f64,

        #[command(flatten)]
        forecast: ForecastArgs,
    },
}

#[derive(Debug, Args)]
pub struct ForecastArgs {
    /// Include the 3-hourly breakdown under each day.
    #[arg(long)]
    hourly: bool,

    /// Use full weekday names.
    #[arg(long)]
    full_names: bool,

    /// Bucket by calendar date instead of weekday name.
    #[arg(long)]
    by_date: bool,
}

impl ForecastArgs {
    fn apply(&self, config: &mut Config) {
        if self.hourly {
            config.forecast.hourly = true;
        }
        if self.full_names {
            config.forecast.labels = LabelStyle::Full;
        }
        if self.by_date {
            config.forecast.grouping = Grouping::CalendarDate;
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { place, forecast } => {
                let (session, config) = open_session(&forecast)?;
                let outcome = session.search(&place).await;
                report(&session, &config, outcome, &place);
                Ok(())
            }
            Command::At {
                latitude,
                longitude,
                forecast,
            } => {
                let (session, config) = open_session(&forecast)?;
                let outcome = session.tap(Coordinates::new(latitude, longitude)).await;
                report(
                    &session,
                    &config,
                    outcome,
                    &format!("{latitude}, {longitude}"),
                );
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.api_key()?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn open_session(args: &ForecastArgs) -> anyhow::Result<(Session, Config)> {
    let mut config = Config::load()?;
    args.apply(&mut config);

    let client = OpenWeatherClient::from_config(&config)?;
    Ok((Session::new(Arc::new(client)), config))
}

fn report(session: &Session, config: &Config, outcome: ActionOutcome, query: &str) {
    match outcome {
        ActionOutcome::Completed(Phase::Found) => {
            let snapshot = session.snapshot();
            let text = render::render(&snapshot, config.forecast, chrono::Utc::now());
            print!("{text}");
        }
        ActionOutcome::Completed(_) => println!("No location found for \"{query}\""),
        ActionOutcome::Superseded => tracing::debug!("Search superseded"),
    }
}
