use std::{fmt, io::IsTerminal};

use anyhow::{Context, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select};
use skywatch_core::{
    Config, Coordinate, DEFAULT_LOCATION_NAME, FixedGeolocator, GeolocationMode, Geolocator, View, WeatherApp,
    config::API_KEY_ENV,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "skywatch",
    version,
    about = "Current weather and safety tips for where you are"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and geolocation preference.
    Configure,

    /// Show current weather and safety tips.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Latitude of a known position, used instead of geolocation.
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of a known position, used instead of geolocation.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Skip geolocation and use the default location (Mumbai).
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub default: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Never ask what to do when location access fails.
    #[arg(long)]
    pub no_prompt: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show(args) => show(args).await,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptChoice {
    Retry,
    UseDefault,
    Quit,
}

impl PromptChoice {
    const ALL: [PromptChoice; 3] = [PromptChoice::Retry, PromptChoice::UseDefault, PromptChoice::Quit];
}

impl fmt::Display for PromptChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptChoice::Retry => f.write_str("Re-attempt location access"),
            PromptChoice::UseDefault => write!(f, "Use default location ({DEFAULT_LOCATION_NAME})"),
            PromptChoice::Quit => f.write_str("Quit"),
        }
    }
}

async fn show(args: ShowArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let api_key = config.resolve_api_key(std::env::var(API_KEY_ENV).ok())?;
    let client = config.weather_client(api_key);

    let geolocator: Box<dyn Geolocator> = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Box::new(FixedGeolocator(Coordinate::new(lat, lon))),
        _ => config.geolocation.geolocator(),
    };

    let mut app = WeatherApp::new(geolocator, Box::new(client));
    if args.default {
        app.use_default_location().await;
    } else {
        app.start().await;
    }

    let interactive = !args.no_prompt && !args.json && std::io::stdin().is_terminal();

    loop {
        let choice = match app.state().view() {
            View::Ready(ready) => {
                if args.json {
                    println!("{}", render::json(app.state(), &ready)?);
                } else {
                    print!("{}", render::ReadyScreen(&ready));
                }
                return Ok(());
            }
            View::PermissionPrompt { message } => {
                eprint!("{}", render::PromptScreen(message));
                if !interactive {
                    bail!("No weather data available: {message}");
                }
                ask_next_step()?
            }
            View::Failed { message } => {
                bail!("{message}\nPlease try again later.");
            }
            View::Loading { .. } | View::Idle => {
                bail!("Weather lookup stopped before producing a result");
            }
        };

        match choice {
            PromptChoice::Retry => {
                app.retry_location().await;
            }
            PromptChoice::UseDefault => {
                app.use_default_location().await;
            }
            PromptChoice::Quit => return Ok(()),
        }
    }
}

fn ask_next_step() -> anyhow::Result<PromptChoice> {
    match Select::new("What would you like to do?", PromptChoice::ALL.to_vec()).prompt() {
        Ok(choice) => Ok(choice),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Ok(PromptChoice::Quit)
        }
        Err(e) => Err(e).context("Failed to read choice"),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Create one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    let modes = GeolocationMode::all().to_vec();
    let start = modes.iter().position(|m| *m == config.geolocation).unwrap_or(0);
    let geolocation = Select::new("How should skywatch find your location?", modes)
        .with_starting_cursor(start)
        .with_help_message("ip: approximate from your public IP, off: always use the default")
        .prompt()
        .context("Failed to read geolocation mode")?;

    config.api_key = Some(api_key.to_string());
    config.geolocation = geolocation;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_negative_coordinates() {
        let cli = Cli::try_parse_from(["skywatch", "show", "--lat", "-33.86", "--lon", "151.2"])
            .unwrap();
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.lat, Some(-33.86));
        assert_eq!(args.lon, Some(151.2));
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["skywatch", "show", "--lat", "10"]).is_err());
    }

    #[test]
    fn default_conflicts_with_coordinates() {
        let res = Cli::try_parse_from(["skywatch", "show", "--default", "--lat", "1", "--lon", "2"]);
        assert!(res.is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["skywatch", "-vv", "show"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn prompt_choices_match_labels() {
        let labels: Vec<String> = PromptChoice::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            ["Re-attempt location access", "Use default location (Mumbai)", "Quit"]
        );
    }
}
