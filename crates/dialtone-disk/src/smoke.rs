use crate::store::{DeleteOutcome, ResourceState, ResourceStore};
use crate::{DiskError, Result};
use serde::Serialize;
use std::fmt;
use tracing::debug;

pub const DEFAULT_SMOKE_DIR: &str = "super_test_dir";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokeStepKind {
    CheckAbsent,
    Create,
    CheckFound,
    Delete,
}

impl SmokeStepKind {
    pub fn label(self) -> &'static str {
        match self {
            SmokeStepKind::CheckAbsent => "check_absent",
            SmokeStepKind::Create => "create",
            SmokeStepKind::CheckFound => "check_found",
            SmokeStepKind::Delete => "delete",
        }
    }
}

impl fmt::Display for SmokeStepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmokeStep {
    pub step: SmokeStepKind,
    pub expected: &'static str,
    pub observed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmokeReport {
    pub store: &'static str,
    pub path: String,
    pub steps: Vec<SmokeStep>,
}

/// Runs the create/inspect/delete round trip against `store`:
/// absent before, created, found after, permanently deleted.
///
/// Stops at the first step whose outcome differs from the expectation.
/// Transport failures are returned as they are.
pub fn run_smoke<S: ResourceStore + ?Sized>(store: &S, path: &str) -> Result<SmokeReport> {
    let mut report = SmokeReport {
        store: store.store_name(),
        path: path.to_string(),
        steps: Vec::with_capacity(4),
    };

    let observed = observe(store.stat(path).map(ResourceState::label))?;
    record(&mut report, SmokeStepKind::CheckAbsent, "absent", observed)?;

    let observed = observe(store.create_folder(path).map(|()| "created"))?;
    record(&mut report, SmokeStepKind::Create, "created", observed)?;

    let observed = observe(store.stat(path).map(ResourceState::label))?;
    record(&mut report, SmokeStepKind::CheckFound, "found", observed)?;

    let observed = observe(store.delete(path, true).map(DeleteOutcome::label))?;
    record(&mut report, SmokeStepKind::Delete, "deleted", observed)?;

    Ok(report)
}

fn observe(outcome: Result<&'static str>) -> Result<String> {
    match outcome {
        Ok(label) => Ok(label.to_string()),
        Err(DiskError::AlreadyExists(_)) => Ok("already exists".to_string()),
        Err(DiskError::NotFound(_)) => Ok("not found".to_string()),
        Err(DiskError::Status { status, .. }) => Ok(format!("status {status}")),
        Err(err) => Err(err),
    }
}

fn record(
    report: &mut SmokeReport,
    step: SmokeStepKind,
    expected: &'static str,
    observed: String,
) -> Result<()> {
    debug!(step = %step, expected, observed = %observed, "smoke step");
    if observed != expected {
        return Err(DiskError::SmokeFailed {
            step,
            expected,
            observed,
        });
    }
    report.steps.push(SmokeStep {
        step,
        expected,
        observed,
    });
    Ok(())
}
