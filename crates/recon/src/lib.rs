//! `payval-recon` — Payment validation reconciliation engine.
//!
//! Pure engine crate: receives normalized payment records, returns
//! classified comparison rows. No CLI or file dependencies.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod report;
pub mod search;

pub use config::ReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{ComparisonRow, PaymentRecord, Reason, ReconInput, ReconResult};
