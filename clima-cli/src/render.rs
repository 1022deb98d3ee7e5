//! Plain-text views of the search state.

use clima_core::{SearchOptions, SearchState, WeatherReading, cities};

pub const LOADING: &str = "Cargando satélite...";

pub fn welcome() -> String {
    [
        "CLIMA COLOMBIA",
        "",
        "Bienvenido al Sistema Meteorológico Inteligente",
        "",
        "Accede a información meteorológica en tiempo real de las principales ciudades de Colombia.",
        "  🌡  Temperatura en vivo: temperatura actual y sensación térmica",
        "  📍 Ubicación geográfica: la ciudad en el mapa con coordenadas exactas",
        "  💧 Condiciones climáticas: humedad, estado del cielo y detalles",
        "",
        "Selecciona una ciudad para comenzar tu consulta meteorológica.",
    ]
    .join("\n")
}

pub fn state(state: &SearchState, options: &SearchOptions) -> String {
    match state {
        SearchState::Idle => welcome(),
        SearchState::Loading => LOADING.to_string(),
        SearchState::Success(reading) => card(reading, options),
        SearchState::Failed(message) => format!("✖ {message}"),
    }
}

pub fn card(reading: &WeatherReading, options: &SearchOptions) -> String {
    let category = reading.category();
    let unit = options.units.temperature_suffix();
    let marker = reading.map_marker();

    let mut lines = vec![
        format!(
            "{}, {}  [{}]",
            reading.name,
            country_label(&options.country_code),
            category.theme()
        ),
        format!("{}  {}{unit}", category.symbol(), reading.rounded_temperature()),
        reading.description().to_string(),
        format!("Humedad: {}%", reading.main.humidity),
        format!("Sensación: {}{unit}", reading.rounded_feels_like()),
    ];
    if let Some(anim) = category.animation() {
        let flash = if anim.lightning { " + relámpagos" } else { "" };
        lines.push(format!("Fondo: {} × {:?}{flash}", anim.count, anim.particle));
    }
    if let Some(url) = reading.icon_url() {
        lines.push(format!("Icono: {url}"));
    }
    lines.push(format!("📍 {} ({}, {})", marker.label, marker.latitude, marker.longitude));
    lines.push(format!("Mapa: {}", marker.openstreetmap_url()));
    if let Some(at) = reading.observed_at() {
        lines.push(format!("Actualizado: {}", at.format("%Y-%m-%d %H:%M UTC")));
    }

    lines.join("\n")
}

pub fn city_list() -> String {
    cities::CITIES
        .iter()
        .enumerate()
        .map(|(i, city)| format!("{:>2}. {city}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn country_label(code: &str) -> &str {
    if code.eq_ignore_ascii_case("CO") { "Colombia" } else { code }
}
