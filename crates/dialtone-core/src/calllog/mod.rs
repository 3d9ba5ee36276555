mod args;

pub use args::{CallArgs, WithKeywords};

use crate::error::{CoreError, Result};
use chrono::{DateTime, Local};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_CALL_LOG: &str = "main.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One line of the call log.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    pub timestamp: DateTime<Local>,
    pub name: String,
    pub positional: String,
    pub keyword: String,
    pub result: String,
}

impl fmt::Display for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - call {}; args={}, kwargs={}; result={}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.name,
            self.positional,
            self.keyword,
            self.result
        )
    }
}

/// Append-only text log at a fixed path.
///
/// The file is reopened for every record and nothing coordinates concurrent
/// writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallLog {
    path: PathBuf,
}

impl CallLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn append(&self, record: &CallRecord) -> Result<()> {
        let to_err = |source| CoreError::CallLog {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(to_err)?;
        writeln!(file, "{record}").map_err(to_err)?;
        Ok(())
    }

    pub fn wrap<F>(&self, name: impl Into<String>, inner: F) -> Logged<F> {
        Logged {
            name: name.into(),
            inner,
            log: self.clone(),
        }
    }
}

/// A callable that records every invocation in a [`CallLog`].
pub struct Logged<F> {
    name: String,
    inner: F,
    log: CallLog,
}

impl<F> fmt::Debug for Logged<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logged")
            .field("name", &self.name)
            .field("log", &self.log)
            .finish_non_exhaustive()
    }
}

impl<F> Logged<F> {
    /// Runs the wrapped callable and logs the call. Log write failures are
    /// traced and otherwise ignored.
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A) -> R,
        A: CallArgs,
        R: fmt::Display,
    {
        let (result, logged) = self.invoke(args);
        if let Err(err) = logged {
            warn!(function = %self.name, error = %err, "call log write failed");
        }
        result
    }

    /// Like [`Logged::call`], but fails when the log line cannot be written.
    pub fn try_call<A, R>(&self, args: A) -> Result<R>
    where
        F: Fn(A) -> R,
        A: CallArgs,
        R: fmt::Display,
    {
        let (result, logged) = self.invoke(args);
        logged?;
        Ok(result)
    }

    fn invoke<A, R>(&self, args: A) -> (R, Result<()>)
    where
        F: Fn(A) -> R,
        A: CallArgs,
        R: fmt::Display,
    {
        let timestamp = Local::now();
        let positional = args.positional();
        let keyword = args.keyword();
        let result = (self.inner)(args);
        let record = CallRecord {
            timestamp,
            name: self.name.clone(),
            positional,
            keyword,
            result: result.to_string(),
        };
        let logged = self.log.append(&record);
        (result, logged)
    }
}
