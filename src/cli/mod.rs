//! Command line front end: argument parsing, dispatch and exit codes.

pub mod args;
mod commands;
mod output;
mod prompt;

pub use commands::run;

use crate::error::Error;
use std::process::ExitCode;

/// Process exit code for a failed command.
///
/// API and domain errors give 1, anything else 2.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(e) if e.is_api_error() => 1,
        _ => 2,
    }
}

/// Print a failed command to stderr and return its exit code.
pub fn report(err: &anyhow::Error, debug: bool) -> ExitCode {
    let code = exit_code(err);
    if code == 1 {
        eprintln!("API error: {}", err);
    } else {
        eprintln!("Unexpected error: {}", err);
    }
    if debug {
        eprintln!("{:?}", err);
    }
    ExitCode::from(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let server = anyhow::Error::new(Error::Server {
            url: "http://localhost:7878/api/v3/movie/9".to_string(),
            status: 404,
            body: "Not Found".to_string(),
        });
        assert_eq!(exit_code(&server), 1);

        let domain = anyhow::Error::new(Error::Radarr("Error, invalid parameters".to_string()));
        assert_eq!(exit_code(&domain), 1);

        let config = anyhow::Error::new(Error::Config("no host".to_string()));
        assert_eq!(exit_code(&config), 2);

        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 2);
    }

    #[test]
    fn test_context_keeps_exit_code() {
        use anyhow::Context;

        let result: std::result::Result<(), Error> = Err(Error::client("No match found for x"));
        let err = result.context("adding movie").unwrap_err();
        assert_eq!(exit_code(&err), 1);
    }
}
