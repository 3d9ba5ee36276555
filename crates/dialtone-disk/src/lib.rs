pub mod client;
pub mod error;
pub mod smoke;
pub mod store;

pub use client::{token_from_env, DiskClient, DiskSettings};
pub use error::{DiskError, Result};
pub use smoke::{run_smoke, SmokeReport, SmokeStep, SmokeStepKind, DEFAULT_SMOKE_DIR};
pub use store::{DeleteOutcome, ResourceState, ResourceStore};
