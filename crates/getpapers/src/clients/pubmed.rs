//! Client implementation for NCBI's E-utilities PubMed interface.
//!
//! This module provides the two requests the pipeline needs:
//! - [`PubmedClient::search`] calls `esearch.fcgi` and returns PubMed identifiers
//! - [`PubmedClient::fetch_details`] calls `efetch.fcgi` and returns the raw
//!   `PubmedArticle` elements for those identifiers
//!
//! Both requests ask for XML. A non-success status is reported as
//! [`GetPapersError::Transport`] and a body that cannot be parsed as
//! [`GetPapersError::MalformedResponse`]. Nothing is retried.
//!
//! # Examples
//!
//! ```no_run
//! use getpapers::clients::PubmedClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PubmedClient::new().with_max_results(5);
//! let ids = client.search("mRNA vaccine").await?;
//! for article in client.fetch_details(&ids).await? {
//!   println!("{}", article.find("ArticleTitle").map(|t| t.text()).unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

use super::*;

/// Root of the public E-utilities service.
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/";

/// Number of identifiers requested from a search.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Root element of an `esearch` response.
const SEARCH_ROOT: &str = "eSearchResult";

/// Client for the PubMed `esearch` and `efetch` endpoints.
///
/// # Examples
///
/// ```
/// # use getpapers::clients::PubmedClient;
/// # fn example() -> Result<(), getpapers::errors::GetPapersError> {
/// // Point the client at a mirror or a local test server
/// let client = PubmedClient::new().with_base_url("http://localhost:8080/eutils")?;
/// assert_eq!(client.base_url(), "http://localhost:8080/eutils/");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PubmedClient {
  /// Internal web client used to connect to the API.
  client:      reqwest::Client,
  /// The E-utilities root, always ending in `/`.
  base_url:    String,
  /// The `retmax` sent with every search.
  max_results: usize,
}

impl PubmedClient {
  /// Creates a client for the public NCBI service returning at most
  /// [`DEFAULT_MAX_RESULTS`] identifiers per search.
  pub fn new() -> Self {
    Self {
      client:      reqwest::Client::new(),
      base_url:    DEFAULT_BASE_URL.to_string(),
      max_results: DEFAULT_MAX_RESULTS,
    }
  }

  /// Uses a different E-utilities root, e.g. a mock server in tests.
  ///
  /// # Errors
  ///
  /// Returns [`GetPapersError::InvalidUrl`] if `base_url` is not an absolute URL.
  pub fn with_base_url(mut self, base_url: &str) -> Result<Self, GetPapersError> {
    let mut base_url = Url::parse(base_url)?.to_string();
    if !base_url.ends_with('/') {
      base_url.push('/');
    }
    self.base_url = base_url;
    Ok(self)
  }

  /// Changes the `retmax` sent with searches.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }

  /// The E-utilities root this client talks to.
  pub fn base_url(&self) -> &str { &self.base_url }

  /// The maximum number of identifiers a search asks for.
  pub fn max_results(&self) -> usize { self.max_results }

  /// Searches PubMed and returns matching identifiers in the order the service lists them.
  ///
  /// # Errors
  ///
  /// This function will return an error if:
  /// - `query` is empty
  /// - The network request fails or returns a non-success status
  /// - The response is not well-formed XML or its root is not `eSearchResult`
  ///
  /// A query with no hits returns an empty vector.
  pub async fn search(&self, query: &str) -> Result<Vec<String>, GetPapersError> {
    if query.trim().is_empty() {
      return Err(GetPapersError::EmptyQuery);
    }

    let url = self.endpoint("esearch.fcgi")?;
    let retmax = self.max_results.to_string();
    debug!("Searching PubMed via {url} for {query:?}");

    let body = self
      .get(
        url,
        &[("db", "pubmed"), ("term", query), ("retmode", "xml"), ("retmax", &retmax)],
        "PubMed IDs",
      )
      .await?;

    let root = Element::parse(&body)?;
    if root.name != SEARCH_ROOT {
      return Err(GetPapersError::malformed(format!(
        "expected <{SEARCH_ROOT}> from esearch, found <{}>",
        root.name
      )));
    }

    if let Some(error) = root.child("ERROR") {
      warn!("PubMed esearch reported an error: {}", error.text());
    }

    let ids: Vec<String> = root
      .children_named("IdList")
      .flat_map(|list| list.children_named("Id"))
      .map(Element::text)
      .collect();
    debug!("esearch returned {} ids", ids.len());
    Ok(ids)
  }

  /// Fetches the full records for `ids` in a single `efetch` request.
  ///
  /// Returns one [`Element`] per `PubmedArticle` in the response, in document order.
  /// An empty `ids` slice returns immediately without touching the network.
  ///
  /// # Errors
  ///
  /// This function will return an error if the request fails, returns a non-success
  /// status, or the body is not well-formed XML.
  pub async fn fetch_details(&self, ids: &[String]) -> Result<Vec<Element>, GetPapersError> {
    if ids.is_empty() {
      debug!("No PubMed ids to fetch");
      return Ok(Vec::new());
    }

    let url = self.endpoint("efetch.fcgi")?;
    let id = ids.join(",");
    debug!("Fetching {} records from PubMed via {url}", ids.len());

    let body =
      self.get(url, &[("db", "pubmed"), ("id", &id), ("retmode", "xml")], "paper details").await?;

    let root = Element::parse(&body)?;
    let articles: Vec<Element> = root.descendants_named("PubmedArticle").cloned().collect();
    debug!("efetch returned {} articles", articles.len());
    Ok(articles)
  }

  /// Resolves an endpoint name against the base URL.
  fn endpoint(&self, name: &str) -> Result<Url, GetPapersError> {
    Ok(Url::parse(&self.base_url)?.join(name)?)
  }

  /// Performs a GET request and returns the body of a successful response.
  ///
  /// `endpoint` describes what is being fetched and ends up in transport errors.
  async fn get(
    &self,
    url: Url,
    params: &[(&str, &str)],
    endpoint: &'static str,
  ) -> Result<String, GetPapersError> {
    let response = self.client.get(url).query(params).send().await?;

    let status = response.status();
    if !status.is_success() {
      return Err(GetPapersError::Transport { endpoint, status });
    }

    let text = response.text().await?;
    trace!("{endpoint} response: {text}");
    Ok(text)
  }
}

impl Default for PubmedClient {
  fn default() -> Self { Self::new() }
}
