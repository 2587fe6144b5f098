//! Error types for setup and configuration
//!
//! The running simulation has no failure modes; only building a playfield or
//! loading settings can fail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid playfield: left={left}, top={top}, right={right}, bottom={bottom}")]
    InvalidPlayfield {
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
    },

    #[error("Ball of radius {radius} does not fit a {width}x{height} playfield")]
    BallTooLarge { radius: f32, width: f32, height: f32 },

    #[error("Invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

/// Result type for fallible setup operations
pub type Result<T> = std::result::Result<T, Error>;
