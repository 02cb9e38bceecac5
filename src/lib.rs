pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{DhlClient, FedExClient, FedExTokenProvider, LocalStorage};
pub use config::TrackerConfig;
pub use crate::core::{export::SummaryExporter, runner::BatchRunner};
pub use domain::model::{BatchSummary, Carrier, TrackingRequest, TrackingResult};
pub use utils::error::{Result, TrackError};
