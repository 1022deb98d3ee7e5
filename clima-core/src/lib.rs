//! Core library for the `clima` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the [`WeatherClient`] seam
//! - The search state machine and the condition classifier
//! - The fixed list of Colombian cities
//!
//! It is used by `clima-cli`, but carries no terminal concerns of its own.

pub mod cities;
pub mod condition;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod provider;

pub use condition::{AnimationSpec, ConditionCategory, classify};
pub use config::{ClientSettings, Config, SearchOptions, Units};
pub use controller::{FAILURE_MESSAGE, SearchController, SearchState};
pub use error::{QueryFailure, ValidationError};
pub use model::{CityQuery, MapMarker, WeatherReading};
pub use provider::{OpenWeatherClient, WeatherClient};
