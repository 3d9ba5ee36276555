use anyhow::Error;
use dialtone_config::ConfigError;
use dialtone_core::CoreError;
use dialtone_disk::DiskError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
            });
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(disk_err) = cause.downcast_ref::<DiskError>() {
            return ExitCode::from(disk_exit_code(disk_err));
        }
        if let Some(_core_err) = cause.downcast_ref::<CoreError>() {
            return ExitCode::from(EXIT_FAILURE);
        }
        if let Some(_json_err) = cause.downcast_ref::<serde_json::Error>() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidCallLogPath(_)
        | ConfigError::InvalidBaseUrl(_)
        | ConfigError::InvalidTokenEnv(_)
        | ConfigError::InvalidTimeout(_)
        | ConfigError::InvalidUserAgent
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn disk_exit_code(err: &DiskError) -> u8 {
    match err {
        DiskError::NotFound(_) => EXIT_NOT_FOUND,
        DiskError::MissingToken(_)
        | DiskError::InvalidToken(_)
        | DiskError::InsecureUrl(_)
        | DiskError::Url(_)
        | DiskError::AlreadyExists(_) => EXIT_INVALID_INPUT,
        DiskError::Http(_) | DiskError::Status { .. } | DiskError::SmokeFailed { .. } => {
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{disk_exit_code, EXIT_FAILURE, EXIT_INVALID_INPUT, EXIT_NOT_FOUND};
    use dialtone_disk::DiskError;

    #[test]
    fn token_errors_are_invalid_input() {
        assert_eq!(
            disk_exit_code(&DiskError::MissingToken("T".to_string())),
            EXIT_INVALID_INPUT
        );
        assert_eq!(
            disk_exit_code(&DiskError::InvalidToken("T".to_string())),
            EXIT_INVALID_INPUT
        );
    }

    #[test]
    fn remote_errors_map_to_failure_or_not_found() {
        assert_eq!(
            disk_exit_code(&DiskError::NotFound("dir".to_string())),
            EXIT_NOT_FOUND
        );
        let status = DiskError::Status {
            method: "GET",
            path: "dir".to_string(),
            status: 500,
        };
        assert_eq!(disk_exit_code(&status), EXIT_FAILURE);
    }
}
