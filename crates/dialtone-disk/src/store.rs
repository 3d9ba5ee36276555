use crate::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceState {
    Found,
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteOutcome {
    /// Removed before the response was sent.
    Deleted,
    /// The remote side queued the removal.
    Accepted,
}

impl ResourceState {
    pub fn label(self) -> &'static str {
        match self {
            ResourceState::Found => "found",
            ResourceState::Absent => "absent",
        }
    }
}

impl DeleteOutcome {
    pub fn label(self) -> &'static str {
        match self {
            DeleteOutcome::Deleted => "deleted",
            DeleteOutcome::Accepted => "accepted",
        }
    }
}

/// Hierarchical resource store addressed by slash-separated paths.
pub trait ResourceStore {
    fn store_name(&self) -> &'static str;
    fn stat(&self, path: &str) -> Result<ResourceState>;
    fn create_folder(&self, path: &str) -> Result<()>;
    fn delete(&self, path: &str, permanently: bool) -> Result<DeleteOutcome>;
}
