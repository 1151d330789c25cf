//! A library for finding PubMed papers that have at least one author affiliated with a
//! non-academic organization such as a pharmaceutical or biotech company.
//!
//! The pipeline is a short chain of one-shot calls:
//! 1. [`PubmedClient::search`] turns a free-text query into PubMed identifiers
//! 2. [`PubmedClient::fetch_details`] pulls the article records for those identifiers
//! 3. [`paper::extract`] keeps the articles with company affiliations
//! 4. [`output`] renders the result as a grid table or writes it to CSV
//!
//! # Example
//! ```rust,no_run
//! use getpapers::{classify::KeywordClassifier, clients::PubmedClient, output, paper};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let client = PubmedClient::new();
//!   let ids = client.search("cancer treatment").await?;
//!   let articles = client.fetch_details(&ids).await?;
//!   let papers = paper::extract(&articles, &KeywordClassifier::default())?;
//!   println!("{}", output::render_table(&papers));
//!
//!   Ok(())
//! }
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod classify;
pub mod clients;
pub mod errors;
pub mod output;
pub mod paper;
pub mod xml;
#[cfg(test)] mod tests;

use classify::AffiliationClassifier;
pub use clients::PubmedClient;
use errors::GetPapersError;
use paper::PaperRecord;
use xml::Element;
