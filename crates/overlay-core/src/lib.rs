pub mod config;
pub mod logging;

pub mod date;
pub mod error;
pub mod html;
pub mod location;
pub mod map;
pub mod naming;
pub mod overlay;
pub mod tiles;
