mod config;

pub use config::{AfterburnerConfig, CameraConfig, FlightModelConfig, StabilizationConfig};
