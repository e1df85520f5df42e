//! Client library and command line front end for the Radarr and Sonarr APIs.

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod media;
pub mod models;
pub mod radarr;
pub mod sonarr;

pub use error::{Error, Result};
