pub mod calllog;
pub mod domain;
pub mod error;
pub mod flatten;

pub use calllog::{CallArgs, CallLog, CallRecord, Logged, WithKeywords};
pub use domain::*;
pub use error::{CoreError, Result};
pub use flatten::{flat_iter, FlatIter};
