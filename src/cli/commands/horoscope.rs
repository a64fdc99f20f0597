//! Horoscope command implementation.

use crate::astrology::{parse_birth_datetime, BirthQuery, Chart, HoroscopeCalculator, HoroscopeError};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the horoscope command. Needs nothing beyond the `[horoscope]` settings.
pub fn run_horoscope(
    name: &str,
    location: &str,
    date: Option<&str>,
    time: Option<&str>,
    json: bool,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Horoscope, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    match compute(name, location, date, time, &settings) {
        Ok((_, chart)) if json => {
            println!("{}", serde_json::to_string_pretty(&chart)?);
        }
        Ok((query, chart)) => Output::chart(&query, &chart),
        Err(e @ HoroscopeError::InvalidInput(_)) => {
            Output::warning(&e.to_string());
            return Err(e.into());
        }
        Err(e) => {
            Output::error(&format!("❌ {}. Please try again.", e));
            return Err(e.into());
        }
    }

    Ok(())
}

/// Parse and validate the birth details, then compute the chart.
fn compute(
    name: &str,
    location: &str,
    date: Option<&str>,
    time: Option<&str>,
    settings: &Settings,
) -> std::result::Result<(BirthQuery, Chart), HoroscopeError> {
    let datetime = parse_birth_datetime(date, time, &settings.horoscope)?;
    let query = BirthQuery::new(name, datetime, location);
    query.validate()?;

    let chart = HoroscopeCalculator::default().compute_chart(&query.datetime)?;
    Ok((query, chart))
}
