use miette::Diagnostic;
use thiserror::Error;

use crate::remote::RemoteError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Remote(#[from] RemoteError),

    #[error("{message}")]
    #[diagnostic(code(taskboard::cli::usage))]
    Usage { message: String },
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Remote(RemoteError::from(e))
    }
}

pub type CliResult<T> = Result<T, CliError>;
