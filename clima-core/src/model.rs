use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    condition::{self, ConditionCategory},
    error::ValidationError,
};

/// A city name as submitted by the user, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let city = raw.trim();
        if city.is_empty() {
            return Err(ValidationError::EmptyCity);
        }
        Ok(Self(city.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `"<city>,<country code>"`, as OpenWeather expects in `q`.
    pub fn qualified(&self, country_code: &str) -> String {
        format!("{},{}", self.0, country_code)
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current conditions for one city, kept in the provider's own JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub name: String,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    pub coord: Coordinates,
    /// Observation time, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl WeatherReading {
    fn primary(&self) -> Option<&Condition> {
        self.weather.first()
    }

    /// Primary condition word, e.g. "Rain". Empty when the provider sent none.
    pub fn condition(&self) -> &str {
        self.primary().map(|c| c.main.as_str()).unwrap_or_default()
    }

    /// Localized description, e.g. "lluvia ligera".
    pub fn description(&self) -> &str {
        self.primary().map(|c| c.description.as_str()).unwrap_or_default()
    }

    pub fn icon(&self) -> &str {
        self.primary().map(|c| c.icon.as_str()).unwrap_or_default()
    }

    pub fn icon_url(&self) -> Option<String> {
        let icon = self.icon();
        (!icon.is_empty()).then(|| format!("https://openweathermap.org/img/wn/{icon}@2x.png"))
    }

    pub fn category(&self) -> ConditionCategory {
        condition::classify(self.condition())
    }

    pub fn rounded_temperature(&self) -> i64 {
        round_display(self.main.temp)
    }

    pub fn rounded_feels_like(&self) -> i64 {
        round_display(self.main.feels_like)
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.dt.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    pub fn map_marker(&self) -> MapMarker {
        MapMarker {
            latitude: self.coord.lat,
            longitude: self.coord.lon,
            label: self.name.clone(),
        }
    }
}

fn round_display(value: f64) -> i64 {
    value.round() as i64
}

/// What the map collaborator needs: a centre, a zoom level and a marker label.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl MapMarker {
    pub const ZOOM: u8 = 13;

    pub fn openstreetmap_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={zoom}/{lat}/{lon}",
            lat = self.latitude,
            lon = self.longitude,
            zoom = Self::ZOOM,
        )
    }
}
