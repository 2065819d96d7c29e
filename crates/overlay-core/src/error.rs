//! Typed errors for user input and tile fetching.
//!
//! Everything else flows through `anyhow` with context attached at the call site.

use thiserror::Error;

/// The date string matched none of the accepted layouts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("empty date string")]
    Empty,
    #[error("unrecognized date: {0:?}")]
    Unrecognized(String),
}

/// Invalid location input (command line or library caller).
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("location name is empty")]
    EmptyName,
    #[error("{axis} {value} is out of range (expected {min}..={max})")]
    CoordinateOutOfRange {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{axis} is not a finite number")]
    CoordinateNotFinite { axis: &'static str },
    #[error("at most {max} facts are supported, got {given}")]
    TooManyFacts { given: usize, max: usize },
    #[error(transparent)]
    Date(#[from] DateError),
}

/// Failure fetching a single map tile.
#[derive(Debug, Error)]
pub enum TileError {
    /// Curl reported an error (timeout, connection refused, DNS, etc.).
    #[error("tile request {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// The server answered with a non-2xx status.
    #[error("tile request {url} returned HTTP {code}")]
    Http { url: String, code: u32 },
    /// 2xx with an empty body.
    #[error("tile request {url} returned an empty body")]
    Empty { url: String },
}
