// Domain layer: tracking models and the ports implemented by carrier adapters.

pub mod model;
pub mod ports;
