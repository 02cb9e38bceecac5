// Adapters layer: concrete implementations for external systems (carrier APIs, storage).

pub mod dhl;
pub mod fedex;
pub mod storage;
pub mod token;

mod http;

pub use dhl::DhlClient;
pub use fedex::FedExClient;
pub use storage::LocalStorage;
pub use token::FedExTokenProvider;
