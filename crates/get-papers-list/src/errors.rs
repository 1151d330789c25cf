//! Error types for the get-papers-list CLI application.
//!
//! The CLI itself does very little beyond sequencing library calls, so its error type is
//! a transparent wrapper that keeps the library's messages intact for the `Error: ...`
//! line printed by `main`.

use thiserror::Error;

/// Errors that can occur during a CLI run.
#[derive(Error, Debug)]
pub enum GetPapersListErrors {
  /// Errors from the underlying getpapers library
  #[error(transparent)]
  GetPapers(#[from] getpapers::errors::GetPapersError),
}
