//! Error types for the getpapers library.
//!
//! Every stage of the pipeline returns [`GetPapersError`]. The variants map onto the
//! failure kinds a caller cares about:
//! - the E-utilities service answered with a non-success status
//! - the request never produced a response
//! - the response body was not the XML document we expected
//! - writing the CSV output failed
//!
//! Finding no papers is not an error; it is an empty result.
//!
//! # Examples
//!
//! ```no_run
//! use getpapers::{clients::PubmedClient, errors::GetPapersError};
//!
//! # async fn example() -> Result<(), GetPapersError> {
//! match PubmedClient::new().search("crispr").await {
//!   Ok(ids) => println!("{} ids", ids.len()),
//!   Err(GetPapersError::Transport { status, .. }) => println!("PubMed said {status}"),
//!   Err(GetPapersError::MalformedResponse(msg)) => println!("bad XML: {msg}"),
//!   Err(e) => println!("Other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Errors that can occur while searching, extracting or writing papers.
#[derive(Error, Debug)]
pub enum GetPapersError {
  /// An E-utilities endpoint answered with a non-success HTTP status.
  ///
  /// `endpoint` names what was being fetched ("PubMed IDs" or "paper details").
  #[error("Error fetching {endpoint}: HTTP {status}")]
  Transport {
    /// What the failed request was fetching
    endpoint: &'static str,
    /// The status code the server returned
    status:   reqwest::StatusCode,
  },

  /// A network request failed before a response status was available.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - TLS/SSL errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A response body could not be understood.
  ///
  /// This covers XML that is not well-formed, a document with an unexpected root
  /// element, and a matching article that carries no PMID.
  #[error("Malformed response: {0}")]
  MalformedResponse(String),

  /// The search term was empty or only whitespace.
  #[error("Search query must not be empty")]
  EmptyQuery,

  /// The configured E-utilities base URL is not a valid URL.
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),

  /// Writing or serializing a CSV row failed.
  #[error(transparent)]
  Csv(#[from] csv::Error),

  /// A file system operation failed, e.g. creating the output directory.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

impl GetPapersError {
  /// Builds a [`GetPapersError::MalformedResponse`] from anything printable.
  pub(crate) fn malformed(msg: impl std::fmt::Display) -> Self {
    GetPapersError::MalformedResponse(msg.to_string())
  }
}
