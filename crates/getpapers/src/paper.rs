//! Paper records and the extraction step that builds them.
//!
//! [`extract`] walks the raw `PubmedArticle` elements returned by
//! [`PubmedClient::fetch_details`](crate::clients::PubmedClient::fetch_details), pulls out
//! the fields of a [`PaperRecord`], and keeps only the papers where at least one author
//! affiliation is classified as a company.
//!
//! # Examples
//!
//! ```
//! use getpapers::{classify::KeywordClassifier, paper, xml::Element};
//!
//! let article = Element::parse(
//!   "<PubmedArticle><MedlineCitation><PMID>42</PMID><Article>
//!      <ArticleTitle>A trial</ArticleTitle>
//!      <AuthorList><Author>
//!        <LastName>Doe</LastName><ForeName>Jane</ForeName>
//!        <AffiliationInfo><Affiliation>Acme Biotech Inc.</Affiliation></AffiliationInfo>
//!      </Author></AuthorList>
//!    </Article></MedlineCitation></PubmedArticle>",
//! )
//! .unwrap();
//!
//! let papers = paper::extract(&[article], &KeywordClassifier::default()).unwrap();
//! assert_eq!(papers[0].pubmed_id, "42");
//! assert_eq!(papers[0].company_affiliations, "Acme Biotech Inc.");
//! ```

use super::*;

/// Title used when an article has none.
pub const MISSING_TITLE: &str = "N/A";
/// Publication date used when an article has no `PubDate/Year`.
pub const MISSING_DATE: &str = "Unknown";
/// Email used when no affiliation contains an address.
pub const MISSING_EMAIL: &str = "N/A";

/// A paper with at least one non-academic author affiliation.
///
/// The serde names are the column headers of the table and CSV output, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
  /// The PubMed identifier (PMID)
  #[serde(rename = "PubmedID")]
  pub pubmed_id:            String,
  /// The article title, or `"N/A"`
  #[serde(rename = "Title")]
  pub title:                String,
  /// The publication year, or `"Unknown"`
  #[serde(rename = "Publication Date")]
  pub publication_date:     String,
  /// Every author with both a fore name and a last name, joined with `", "`
  #[serde(rename = "Non-academic Author(s)")]
  pub authors:              String,
  /// Affiliations classified as companies, original case, joined with `", "`
  #[serde(rename = "Company Affiliation(s)")]
  pub company_affiliations: String,
  /// The first email found in any affiliation, or `"N/A"`
  #[serde(rename = "Corresponding Author Email")]
  pub corresponding_email:  String,
}

impl PaperRecord {
  /// Column names, in output order.
  pub const HEADERS: [&'static str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
  ];

  /// The field values, in the same order as [`PaperRecord::HEADERS`].
  pub fn fields(&self) -> [&str; 6] {
    [
      self.pubmed_id.as_str(),
      self.title.as_str(),
      self.publication_date.as_str(),
      self.authors.as_str(),
      self.company_affiliations.as_str(),
      self.corresponding_email.as_str(),
    ]
  }
}

/// Builds the result set from raw `PubmedArticle` elements.
///
/// For each article, in order:
/// - the title is the first `ArticleTitle`, defaulting to `"N/A"`
/// - the date is the `Year` of the first `PubDate`, defaulting to `"Unknown"`
/// - every `Author` with a `ForeName` and `LastName` contributes `"{fore} {last}"`
/// - each author's first `AffiliationInfo/Affiliation` is classified, and company
///   affiliations are collected exactly as written, case and surrounding whitespace included
/// - the email is taken from the first affiliation anywhere in the article that contains
///   one, defaulting to `"N/A"`
///
/// Articles without any company affiliation are dropped.
///
/// # Errors
///
/// Returns [`GetPapersError::MalformedResponse`] if an article that would be kept has no
/// `PMID`.
pub fn extract(
  records: &[Element],
  classifier: &impl AffiliationClassifier,
) -> Result<Vec<PaperRecord>, GetPapersError> {
  let mut papers = Vec::new();
  for article in records {
    if let Some(paper) = extract_one(article, classifier)? {
      papers.push(paper);
    }
  }
  debug!("Kept {} of {} articles with company affiliations", papers.len(), records.len());
  Ok(papers)
}

/// Extracts a single article, returning `None` when it has no company affiliation.
fn extract_one(
  article: &Element,
  classifier: &impl AffiliationClassifier,
) -> Result<Option<PaperRecord>, GetPapersError> {
  let mut authors = Vec::new();
  let mut companies = Vec::new();

  for author in article.descendants_named("Author") {
    if let (Some(last), Some(first)) = (author.child("LastName"), author.child("ForeName")) {
      authors.push(format!("{} {}", first.text(), last.text()));
    }

    let affiliation = author
      .children_named("AffiliationInfo")
      .find_map(|info| info.child("Affiliation"))
      .map(Element::raw_text);
    if let Some(affiliation) = affiliation {
      if classifier.classify(&affiliation).is_company {
        companies.push(affiliation);
      }
    }
  }

  if companies.is_empty() {
    trace!("Skipping article without company affiliations");
    return Ok(None);
  }

  let pubmed_id = article
    .find("PMID")
    .map(Element::text)
    .filter(|pmid| !pmid.is_empty())
    .ok_or_else(|| GetPapersError::malformed("article with company affiliations has no PMID"))?;

  let title = article
    .find("ArticleTitle")
    .map(Element::text)
    .filter(|title| !title.is_empty())
    .unwrap_or_else(|| MISSING_TITLE.to_string());

  let publication_date = article
    .descendants_named("PubDate")
    .find_map(|date| date.child("Year"))
    .map(Element::text)
    .filter(|year| !year.is_empty())
    .unwrap_or_else(|| MISSING_DATE.to_string());

  let corresponding_email = article
    .descendants_named("AffiliationInfo")
    .flat_map(|info| info.children_named("Affiliation"))
    .find_map(|affiliation| classifier.classify(&affiliation.text()).email)
    .unwrap_or_else(|| MISSING_EMAIL.to_string());

  Ok(Some(PaperRecord {
    pubmed_id,
    title,
    publication_date,
    authors: authors.join(", "),
    company_affiliations: companies.join(", "),
    corresponding_email,
  }))
}
