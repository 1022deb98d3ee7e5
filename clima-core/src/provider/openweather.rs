use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{
    config::ClientSettings,
    error::QueryFailure,
    model::{CityQuery, WeatherReading},
};

use super::WeatherClient;

/// Current-weather client for `GET <base>/weather`.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    settings: ClientSettings,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            settings,
            http: Client::new(),
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.settings.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip_all, fields(city = %query), err(level = "debug"))]
    async fn fetch(&self, query: &CityQuery) -> Result<WeatherReading, QueryFailure> {
        let options = &self.settings.options;
        let q = query.qualified(&options.country_code);

        let res = self
            .http
            .get(self.endpoint())
            .query(&[
                ("q", q.as_str()),
                ("appid", self.settings.api_key.as_str()),
                ("units", options.units.as_str()),
                ("lang", options.locale.as_str()),
            ])
            .send()
            .await
            .map_err(QueryFailure::Transport)?;

        let status = res.status();
        let body = res.text().await.map_err(QueryFailure::Body)?;
        debug!(%status, bytes = body.len(), "OpenWeather responded");

        if !status.is_success() {
            return Err(QueryFailure::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
