//! Plain-text rendering of birth charts.

use super::{BirthQuery, Chart, PlanetPosition};
use chrono::NaiveDateTime;

/// Render a birth instant like `January 01, 2000 at 12:00 PM`.
pub fn format_birth_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format("%B %d, %Y at %I:%M %p").to_string()
}

/// The three detail lines for one body, without the heading.
pub fn format_position(position: &PlanetPosition) -> Vec<String> {
    vec![
        format!("Sign: {}", position.sign_name()),
        format!("Position: {:.2}°", position.longitude_degrees),
        format!("Degree in Sign: {:.2}°", position.degree_in_sign),
    ]
}

/// Heading for one body, e.g. `☀️ Sun`.
pub fn format_heading(position: &PlanetPosition) -> String {
    format!("{} {}", position.body.emoji(), position.body_name())
}

/// Full chart as a multi-line string.
pub fn format_chart(query: &BirthQuery, chart: &Chart) -> String {
    let mut out = String::new();
    out.push_str(&format!("Horoscope for {}\n", query.name.trim()));
    out.push_str(&format!("Place: {}\n", query.location.trim()));
    out.push_str(&format!(
        "Date & Time: {}\n",
        format_birth_datetime(&query.datetime)
    ));

    for position in chart.iter() {
        out.push('\n');
        out.push_str(&format_heading(position));
        out.push('\n');
        for line in format_position(position) {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astrology::Body;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_datetime_display() {
        assert_eq!(format_birth_datetime(&noon()), "January 01, 2000 at 12:00 PM");

        let evening = NaiveDate::from_ymd_opt(1987, 7, 4)
            .unwrap()
            .and_hms_opt(21, 5, 0)
            .unwrap();
        assert_eq!(format_birth_datetime(&evening), "July 04, 1987 at 09:05 PM");
    }

    #[test]
    fn test_position_lines() {
        let pos = PlanetPosition::from_longitude(Body::Mars, 47.5);
        assert_eq!(
            format_position(&pos),
            vec!["Sign: Taurus", "Position: 47.50°", "Degree in Sign: 17.50°"]
        );
        assert_eq!(format_heading(&pos), "♂️ Mars");
    }

    #[test]
    fn test_chart_rendering() {
        let chart = Chart {
            julian_day: 2_451_545.0,
            positions: vec![
                PlanetPosition::from_longitude(Body::Sun, 280.37),
                PlanetPosition::from_longitude(Body::Moon, 223.32),
            ],
        };
        let query = BirthQuery::new(" Sita ", noon(), "Mithila");

        let text = format_chart(&query, &chart);
        assert!(text.starts_with("Horoscope for Sita\nPlace: Mithila\n"));
        assert!(text.contains("Date & Time: January 01, 2000 at 12:00 PM"));
        assert!(text.contains("☀️ Sun\n  Sign: Capricorn\n  Position: 280.37°\n  Degree in Sign: 10.37°"));
        assert!(text.contains("🌙 Moon\n  Sign: Scorpio"));
    }
}
