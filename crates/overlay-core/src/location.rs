//! The validated location record built from command-line input.

use chrono::NaiveDate;

use crate::date;
use crate::error::InputError;

/// Maximum number of fact strings shown on one page.
pub const MAX_FACTS: usize = 4;

/// One location to render. Lives only for the duration of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    pub facts: Vec<String>,
}

impl Location {
    /// Validates raw input and parses the freeform date (day-first).
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        date_text: &str,
        facts: Vec<String>,
    ) -> Result<Self, InputError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InputError::EmptyName);
        }
        check_coordinate("latitude", latitude, 90.0)?;
        check_coordinate("longitude", longitude, 180.0)?;
        if facts.len() > MAX_FACTS {
            return Err(InputError::TooManyFacts {
                given: facts.len(),
                max: MAX_FACTS,
            });
        }
        let date = date::parse_date(date_text)?;
        Ok(Self {
            name,
            latitude,
            longitude,
            date,
            facts,
        })
    }

    /// Date as shown on the page, e.g. `Sat 01 Feb 2020`.
    pub fn display_date(&self) -> String {
        date::display_date(self.date)
    }
}

fn check_coordinate(axis: &'static str, value: f64, limit: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::CoordinateNotFinite { axis });
    }
    if !(-limit..=limit).contains(&value) {
        return Err(InputError::CoordinateOutOfRange {
            axis,
            value,
            min: -limit,
            max: limit,
        });
    }
    Ok(())
}
