use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use clima_core::{
    Config, OpenWeatherClient, SearchController, SearchOptions, SearchState, ValidationError,
    WeatherClient, cities,
};
use inquire::{InquireError, Password, Select};
use tracing::{debug, warn};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "clima",
    version,
    about = "Current weather for the main cities of Colombia"
)]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Without a subcommand, starts the interactive search.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Look up the current weather once and exit.
    Search {
        /// City name; prompts with the city list when absent.
        city: Option<String>,

        /// Print the raw reading as JSON instead of the card.
        #[arg(long)]
        json: bool,
    },

    /// List the cities offered by the selector.
    Cities,
}

const SEARCH_AGAIN: &str = "Buscar otra ciudad";
const BACK_HOME: &str = "← Volver al inicio";
const QUIT: &str = "Salir";

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Cities) => {
                println!("{}", render::city_list());
                Ok(())
            }
            Some(Command::Search { city, json }) => search_once(city, json).await,
            None => interactive().await,
        }
    }
}

fn configure() -> Result<()> {
    // Only the file is rewritten; environment overrides stay out of it.
    let mut cfg = Config::load_file()?;
    if cfg.is_configured() {
        println!("An API key is already stored; it will be replaced.");
    }

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    cfg.set_api_key(key.trim().to_string());
    let path = cfg.save()?;
    println!("API key saved to {}", path.display());

    Ok(())
}

fn controller_from_config() -> Result<(SearchController<OpenWeatherClient>, SearchOptions)> {
    let cfg = Config::load()?;
    let client = OpenWeatherClient::new(cfg.client_settings()?);
    debug!(settings = ?client.settings(), "loaded configuration");

    let options = client.settings().options.clone();
    Ok((SearchController::new(client), options))
}

async fn search_once(city: Option<String>, json: bool) -> Result<()> {
    let (mut controller, options) = controller_from_config()?;

    let city = match city {
        Some(city) => city,
        None => match prompt_city()? {
            Some(city) => city,
            None => return Ok(()),
        },
    };
    warn_if_unlisted(&city);
    submit_with_progress(&mut controller, &city, |state| {
        if !json {
            eprintln!("{}", render::state(state, &options));
        }
    })
    .await?;

    match controller.state() {
        SearchState::Success(reading) if json => {
            println!("{}", serde_json::to_string_pretty(&reading)?);
            Ok(())
        }
        SearchState::Failed(message) => bail!(message),
        state => {
            println!("{}", render::state(&state, &options));
            Ok(())
        }
    }
}

async fn interactive() -> Result<()> {
    let (mut controller, options) = controller_from_config()?;
    println!("{}\n", render::welcome());

    loop {
        let Some(city) = prompt_city()? else {
            return Ok(());
        };

        warn_if_unlisted(&city);
        let submitted = submit_with_progress(&mut controller, &city, |state| {
            eprintln!("{}", render::state(state, &options));
        })
        .await;
        if let Err(err) = submitted {
            println!("{err}\n");
            continue;
        }
        println!("{}\n", render::state(&controller.state(), &options));

        match prompt_next()? {
            Some(SEARCH_AGAIN) => {}
            Some(BACK_HOME) => {
                controller.reset();
                println!("{}\n", render::state(&controller.state(), &options));
            }
            _ => return Ok(()),
        }
    }
}

/// Submit `city`, calling `on_loading` whenever the published state turns
/// to `Loading` while the request is in flight.
async fn submit_with_progress<C, F>(
    controller: &mut SearchController<C>,
    city: &str,
    mut on_loading: F,
) -> Result<(), ValidationError>
where
    C: WeatherClient,
    F: FnMut(&SearchState),
{
    let mut states = controller.subscribe();
    let submit = controller.submit(city);
    tokio::pin!(submit);

    loop {
        tokio::select! {
            submitted = &mut submit => return submitted,
            Ok(()) = states.changed() => {
                let state = states.borrow_and_update().clone();
                if state.is_loading() {
                    on_loading(&state);
                }
            }
        }
    }
}

/// `Ok(None)` when the user backs out of the prompt.
fn prompt_city() -> Result<Option<String>> {
    let mut options = vec![cities::PLACEHOLDER];
    options.extend_from_slice(cities::CITIES);

    let picked = Select::new("Ciudad:", options).with_page_size(12).prompt();
    Ok(cancelled_as_none(picked)?.map(|choice| selection_to_city(choice).to_string()))
}

fn prompt_next() -> Result<Option<&'static str>> {
    let picked = Select::new("¿Qué deseas hacer?", vec![SEARCH_AGAIN, BACK_HOME, QUIT]).prompt();
    cancelled_as_none(picked)
}

fn cancelled_as_none<T>(picked: Result<T, InquireError>) -> Result<Option<T>> {
    match picked {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Prompt failed"),
    }
}

/// The placeholder entry stands for "nothing selected".
fn selection_to_city(choice: &str) -> &str {
    if choice == cities::PLACEHOLDER { "" } else { choice }
}

fn warn_if_unlisted(city: &str) {
    if !city.trim().is_empty() && !cities::is_listed(city) {
        warn!(city, "city is not in the Colombian city list; searching anyway");
    }
}
