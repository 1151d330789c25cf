//! Clients for the remote bibliographic services.
//!
//! Only NCBI's E-utilities (PubMed) is supported. [`pubmed::PubmedClient`] implements the
//! two requests of the pipeline:
//! - `esearch` - turns a query into PubMed identifiers
//! - `efetch` - returns the full article records for a list of identifiers
//!
//! # Examples
//!
//! ```no_run
//! use getpapers::clients::PubmedClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PubmedClient::new();
//! let ids = client.search("cancer treatment").await?;
//! let articles = client.fetch_details(&ids).await?;
//! println!("fetched {} articles", articles.len());
//! # Ok(())
//! # }
//! ```

use url::Url;

pub mod pubmed;

pub use pubmed::PubmedClient;

use super::*;
