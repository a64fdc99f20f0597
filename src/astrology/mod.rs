//! Birth chart calculation.
//!
//! A chart is the ecliptic longitude of ten bodies at a birth instant, each bucketed into one of
//! twelve 30° zodiac signs.

pub mod ephemeris;
pub mod format;

pub use ephemeris::{
    julian_day, Ephemeris, EphemerisError, KeplerianEphemeris, MAX_JULIAN_DAY, MIN_JULIAN_DAY,
};

use crate::config::HoroscopeSettings;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

/// Bodies included in a chart, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Body {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mars,
        Body::Mercury,
        Body::Jupiter,
        Body::Venus,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Mercury => "Mercury",
            Body::Jupiter => "Jupiter",
            Body::Venus => "Venus",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Body::Sun => "☀️",
            Body::Moon => "🌙",
            Body::Mars => "♂️",
            Body::Mercury => "☿️",
            Body::Jupiter => "♃",
            Body::Venus => "♀️",
            Body::Saturn => "♄",
            Body::Uranus => "♅",
            Body::Neptune => "♆",
            Body::Pluto => "♇",
        }
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The twelve 30° signs, starting at 0° longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Width of one sign in degrees.
    pub const SPAN_DEGREES: f64 = 30.0;

    /// Sign for a 0-based index; indices past 11 clamp to Pisces.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl std::fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where one body sits in the zodiac.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetPosition {
    pub body: Body,
    /// Ecliptic longitude in `[0, 360)`.
    pub longitude_degrees: f64,
    pub sign: ZodiacSign,
    /// Offset into the sign, in `[0, 30)`.
    pub degree_in_sign: f64,
}

impl PlanetPosition {
    /// Bucket a longitude into its sign. The longitude is wrapped into `[0, 360)` first.
    pub fn from_longitude(body: Body, longitude: f64) -> Self {
        let longitude = ephemeris::normalize_degrees(longitude);
        let index = (longitude / ZodiacSign::SPAN_DEGREES).floor() as usize;
        let sign = ZodiacSign::from_index(index);
        let degree_in_sign = longitude - ZodiacSign::SPAN_DEGREES * sign.index() as f64;

        Self {
            body,
            longitude_degrees: longitude,
            sign,
            degree_in_sign,
        }
    }

    pub fn sign_index(&self) -> usize {
        self.sign.index()
    }

    pub fn sign_name(&self) -> &'static str {
        self.sign.name()
    }

    pub fn body_name(&self) -> &'static str {
        self.body.name()
    }
}

/// Positions of all ten bodies for one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub julian_day: f64,
    pub positions: Vec<PlanetPosition>,
}

impl Chart {
    /// Look up a body by name, case-insensitively.
    pub fn get(&self, body_name: &str) -> Option<&PlanetPosition> {
        self.positions
            .iter()
            .find(|p| p.body.name().eq_ignore_ascii_case(body_name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanetPosition> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Message shown when a birth query is missing its name or place.
pub const VALIDATION_MESSAGE: &str = "Please provide both name and birth location.";

/// A request for a birth chart. The datetime is taken as Universal Time.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthQuery {
    pub name: String,
    pub datetime: NaiveDateTime,
    pub location: String,
}

impl BirthQuery {
    pub fn new(name: impl Into<String>, datetime: NaiveDateTime, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datetime,
            location: location.into(),
        }
    }

    /// Both name and location must have non-whitespace content.
    pub fn validate(&self) -> Result<(), HoroscopeError> {
        if self.name.trim().is_empty() || self.location.trim().is_empty() {
            return Err(HoroscopeError::InvalidInput(VALIDATION_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Combine optional `YYYY-MM-DD` and `HH:MM[:SS]` strings, falling back to configured defaults.
pub fn parse_birth_datetime(
    date: Option<&str>,
    time: Option<&str>,
    defaults: &HoroscopeSettings,
) -> Result<NaiveDateTime, HoroscopeError> {
    let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|e| {
            HoroscopeError::InvalidInput(format!("Invalid birth date '{}' (expected YYYY-MM-DD): {}", d, e))
        })?,
        None => defaults.default_birth_date,
    };

    let time = match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => NaiveTime::parse_from_str(t, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
            .map_err(|e| {
                HoroscopeError::InvalidInput(format!("Invalid birth time '{}' (expected HH:MM): {}", t, e))
            })?,
        None => defaults.default_birth_time,
    };

    Ok(date.and_time(time))
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum HoroscopeError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Error calculating position of {body}: {source}")]
    Ephemeris {
        body: Body,
        #[source]
        source: EphemerisError,
    },
}

/// Computes charts from an [`Ephemeris`].
#[derive(Clone)]
pub struct HoroscopeCalculator {
    ephemeris: Arc<dyn Ephemeris>,
}

impl HoroscopeCalculator {
    pub fn new(ephemeris: Arc<dyn Ephemeris>) -> Self {
        Self { ephemeris }
    }

    /// Julian Day for a civil datetime, with seconds folded into the fractional hour.
    pub fn julian_day(&self, datetime: &NaiveDateTime) -> f64 {
        let hour = datetime.hour() as f64
            + datetime.minute() as f64 / 60.0
            + datetime.second() as f64 / 3600.0;
        self.ephemeris
            .julian_day(datetime.year(), datetime.month(), datetime.day(), hour)
    }

    /// Compute all ten positions. Any ephemeris failure fails the whole chart.
    #[instrument(skip(self))]
    pub fn compute_chart(&self, datetime: &NaiveDateTime) -> Result<Chart, HoroscopeError> {
        let julian_day = self.julian_day(datetime);
        debug!("Julian Day {}", julian_day);

        let positions = Body::ALL
            .iter()
            .map(|&body| {
                self.ephemeris
                    .longitude(julian_day, body)
                    .map(|longitude| PlanetPosition::from_longitude(body, longitude))
                    .map_err(|source| HoroscopeError::Ephemeris { body, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Chart {
            julian_day,
            positions,
        })
    }
}

impl Default for HoroscopeCalculator {
    fn default() -> Self {
        Self::new(Arc::new(KeplerianEphemeris::new()))
    }
}
