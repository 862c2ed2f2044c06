pub mod configuration;
pub mod jobs;
pub mod telemetry;
