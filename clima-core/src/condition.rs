//! Mapping from OpenWeather's primary condition word (`weather[0].main`) to
//! the small set of presentation categories used to theme the result.

use std::{fmt, ops::RangeInclusive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCategory {
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Clear,
    Clouds,
    Fog,
    Default,
}

/// Classify a condition word. Total: anything unrecognised is `Default`.
pub fn classify(condition: &str) -> ConditionCategory {
    match condition.trim().to_lowercase().as_str() {
        "rain" => ConditionCategory::Rain,
        "drizzle" => ConditionCategory::Drizzle,
        "thunderstorm" => ConditionCategory::Thunderstorm,
        "snow" => ConditionCategory::Snow,
        "clear" => ConditionCategory::Clear,
        "clouds" => ConditionCategory::Clouds,
        "mist" | "fog" | "haze" => ConditionCategory::Fog,
        _ => ConditionCategory::Default,
    }
}

impl ConditionCategory {
    pub const fn all() -> &'static [ConditionCategory] {
        &[
            ConditionCategory::Rain,
            ConditionCategory::Drizzle,
            ConditionCategory::Thunderstorm,
            ConditionCategory::Snow,
            ConditionCategory::Clear,
            ConditionCategory::Clouds,
            ConditionCategory::Fog,
            ConditionCategory::Default,
        ]
    }

    /// Name of the visual theme the renderer applies to the result card.
    pub fn theme(&self) -> &'static str {
        match self {
            ConditionCategory::Rain => "clima-lluvia",
            ConditionCategory::Drizzle => "clima-llovizna",
            ConditionCategory::Thunderstorm => "clima-tormenta",
            ConditionCategory::Snow => "clima-nieve",
            ConditionCategory::Clear => "clima-despejado",
            ConditionCategory::Clouds => "clima-nublado",
            ConditionCategory::Fog => "clima-niebla",
            ConditionCategory::Default => "clima-default",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ConditionCategory::Rain => "🌧",
            ConditionCategory::Drizzle => "🌦",
            ConditionCategory::Thunderstorm => "⛈",
            ConditionCategory::Snow => "❄",
            ConditionCategory::Clear => "☀",
            ConditionCategory::Clouds => "☁",
            ConditionCategory::Fog => "🌫",
            ConditionCategory::Default => "🌡",
        }
    }

    /// Declarative background animation for this category.
    ///
    /// Only ranges are described here; the renderer picks the per-particle
    /// values. `Default` has no animation.
    pub fn animation(&self) -> Option<AnimationSpec> {
        let spec = match self {
            ConditionCategory::Rain => AnimationSpec {
                count: 100,
                delay_secs: Timing::Random(0.0..=2.0),
                duration_secs: 0.5..=0.8,
                ..AnimationSpec::still(Particle::RainDrop)
            },
            ConditionCategory::Drizzle => AnimationSpec {
                count: 50,
                delay_secs: Timing::Random(0.0..=3.0),
                duration_secs: 1.0..=1.5,
                ..AnimationSpec::still(Particle::DrizzleDrop)
            },
            ConditionCategory::Thunderstorm => AnimationSpec {
                count: 120,
                delay_secs: Timing::Random(0.0..=1.5),
                duration_secs: 0.3..=0.5,
                lightning: true,
                ..AnimationSpec::still(Particle::StormDrop)
            },
            ConditionCategory::Snow => AnimationSpec {
                count: 50,
                delay_secs: Timing::Random(0.0..=5.0),
                duration_secs: 5.0..=10.0,
                size_px: Some(10.0..=20.0),
                opacity: 0.0..=1.0,
                ..AnimationSpec::still(Particle::Snowflake)
            },
            ConditionCategory::Clear => AnimationSpec {
                count: 1,
                rays: 8,
                ..AnimationSpec::still(Particle::Sun)
            },
            ConditionCategory::Clouds => AnimationSpec {
                count: 5,
                delay_secs: Timing::Staggered(2.0),
                duration_secs: 15.0..=25.0,
                size_px: Some(30.0..=60.0),
                opacity: 0.3..=0.7,
                top_pct: Placement::Random(0.0..=60.0),
                ..AnimationSpec::still(Particle::Cloud)
            },
            ConditionCategory::Fog => AnimationSpec {
                count: 3,
                delay_secs: Timing::Staggered(2.0),
                top_pct: Placement::Spaced(33.0),
                ..AnimationSpec::still(Particle::FogLayer)
            },
            ConditionCategory::Default => return None,
        };

        Some(spec)
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConditionCategory::Rain => "rain",
            ConditionCategory::Drizzle => "drizzle",
            ConditionCategory::Thunderstorm => "thunderstorm",
            ConditionCategory::Snow => "snow",
            ConditionCategory::Clear => "clear",
            ConditionCategory::Clouds => "clouds",
            ConditionCategory::Fog => "fog",
            ConditionCategory::Default => "default",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Particle {
    RainDrop,
    DrizzleDrop,
    StormDrop,
    Snowflake,
    Sun,
    Cloud,
    FogLayer,
}

/// How the i-th particle's start delay is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum Timing {
    None,
    /// Uniformly sampled from the range, in seconds.
    Random(RangeInclusive<f64>),
    /// `i * step` seconds.
    Staggered(f64),
}

/// How the i-th particle's vertical position is chosen, in percent from the top.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// Horizontal spread only; all particles start above the card.
    Top,
    Random(RangeInclusive<f64>),
    /// `i * step` percent.
    Spaced(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    pub particle: Particle,
    pub count: u16,
    pub delay_secs: Timing,
    pub duration_secs: RangeInclusive<f64>,
    pub size_px: Option<RangeInclusive<f64>>,
    pub opacity: RangeInclusive<f64>,
    pub top_pct: Placement,
    /// Rays drawn around a sun, evenly spaced over 360°.
    pub rays: u16,
    pub lightning: bool,
}

impl AnimationSpec {
    fn still(particle: Particle) -> Self {
        Self {
            particle,
            count: 0,
            delay_secs: Timing::None,
            duration_secs: 0.0..=0.0,
            size_px: None,
            opacity: 1.0..=1.0,
            top_pct: Placement::Top,
            rays: 0,
            lightning: false,
        }
    }

    /// Rotation of each sun ray, in degrees.
    pub fn ray_angles(&self) -> impl Iterator<Item = f64> + '_ {
        let step = if self.rays == 0 { 0.0 } else { 360.0 / f64::from(self.rays) };
        (0..self.rays).map(move |i| f64::from(i) * step)
    }
}
