//! Affiliation classification heuristics.
//!
//! Deciding whether an author works for a company is a text heuristic over free-form
//! affiliation strings. The extractor only talks to the [`AffiliationClassifier`] trait,
//! so the heuristic can be replaced without touching extraction. The default
//! [`KeywordClassifier`] looks for a fixed set of company keywords and pulls the first
//! email-shaped token out of the text.
//!
//! # Examples
//!
//! ```
//! use getpapers::classify::{AffiliationClassifier, KeywordClassifier};
//!
//! let classifier = KeywordClassifier::default();
//! let result = classifier.classify("Genentech Inc., South San Francisco. jo@gene.com");
//! assert!(result.is_company);
//! assert_eq!(result.email.as_deref(), Some("jo@gene.com"));
//! ```

use lazy_static::lazy_static;
use regex::Regex;

/// Lower-case keywords whose presence marks an affiliation as non-academic.
pub const COMPANY_KEYWORDS: [&str; 4] = ["pharma", "biotech", "laboratories", "inc"];

lazy_static! {
    // local@domain.tld: exactly one "@" and at least one "." after it. Any non-space
    // character other than separators and brackets may appear, so non-ASCII addresses match;
    // the final label cannot contain ".", which drops a sentence-ending period.
    static ref EMAIL: Regex = Regex::new(
        r#"[^\s@<>()\[\],;:"']+@[^\s@<>()\[\],;:"']+\.[^\s@<>()\[\],;:"'.]+"#
    )
    .unwrap();
}

/// What a classifier concluded about one affiliation string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
  /// Whether the affiliation looks like a company rather than an academic institution
  pub is_company: bool,
  /// The email address found in the affiliation text, if any
  pub email:      Option<String>,
}

/// Maps affiliation text to a [`Classification`].
///
/// Any `Fn(&str) -> Classification` closure is a classifier too.
pub trait AffiliationClassifier {
  /// Classifies a single affiliation string.
  fn classify(&self, affiliation: &str) -> Classification;
}

impl<F> AffiliationClassifier for F
where F: Fn(&str) -> Classification
{
  fn classify(&self, affiliation: &str) -> Classification { self(affiliation) }
}

/// Case-insensitive substring matching against a keyword list.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
  /// Keywords, stored lower-cased
  keywords: Vec<String>,
}

impl KeywordClassifier {
  /// Creates a classifier using [`COMPANY_KEYWORDS`].
  pub fn new() -> Self { Self::with_keywords(COMPANY_KEYWORDS) }

  /// Creates a classifier using a custom keyword list.
  ///
  /// Keywords are matched case-insensitively as plain substrings.
  pub fn with_keywords<I, S>(keywords: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>, {
    Self { keywords: keywords.into_iter().map(|k| k.as_ref().to_lowercase()).collect() }
  }

  /// The lower-cased keywords this classifier matches.
  pub fn keywords(&self) -> &[String] { &self.keywords }
}

impl Default for KeywordClassifier {
  fn default() -> Self { Self::new() }
}

impl AffiliationClassifier for KeywordClassifier {
  fn classify(&self, affiliation: &str) -> Classification {
    let lowered = affiliation.to_lowercase();
    Classification {
      is_company: self.keywords.iter().any(|keyword| lowered.contains(keyword.as_str())),
      email:      find_email(affiliation),
    }
  }
}

/// Returns the first email-shaped token in `text`.
pub fn find_email(text: &str) -> Option<String> {
  EMAIL.find(text).map(|m| m.as_str().to_string())
}
