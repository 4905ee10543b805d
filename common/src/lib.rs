pub mod config;
pub mod error;
pub mod plot;
pub mod ratio;
pub mod resolve;
pub mod table;

/// The strategy every other strategy is compared against
pub const BASELINE: &str = "JoinBase";
