pub mod config;
pub mod error;
pub mod selection;
pub mod telemetry;
