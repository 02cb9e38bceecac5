pub mod export;
pub mod extractor;
pub mod report;
pub mod runner;
pub mod source;

pub use crate::domain::model::{BatchSummary, Carrier, TrackingRequest, TrackingResult};
pub use crate::domain::ports::{CarrierClient, RecordExtractor, Storage, TokenProvider};
pub use crate::utils::error::Result;
