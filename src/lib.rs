pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ui;
pub mod version;
pub mod warning;

pub use error::{ImagePublishError, Result};
