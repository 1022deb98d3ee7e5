use crate::{CityQuery, WeatherReading, error::QueryFailure};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// One outbound lookup per call. Implementations do not validate, retry or cache.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn fetch(&self, query: &CityQuery) -> Result<WeatherReading, QueryFailure>;
}

