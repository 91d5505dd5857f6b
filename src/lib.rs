//! Greenhouse watering controller.
//!
//! Temperature and humidity readings are fuzzified into Low/Medium/High
//! categories, matched against a two-tier rule table (basic rules before
//! advanced ones) and the chosen watering action is turned back into an
//! amount of added humidity.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod logic;
pub mod models;

pub use error::{GreenhouseError, Result};
