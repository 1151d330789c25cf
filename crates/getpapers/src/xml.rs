//! A small owned XML element tree.
//!
//! PubMed's efetch documents are deeply nested and contain inline markup inside text
//! fields (`<ArticleTitle>Effect of <i>E. coli</i> on ...</ArticleTitle>`), which does not
//! map well onto fixed serde structs. Instead the document is read with the
//! [`quick_xml`] event reader into an [`Element`] tree that the extractor can walk with
//! child and descendant lookups, in document order.
//!
//! # Examples
//!
//! ```
//! use getpapers::xml::Element;
//!
//! let root = Element::parse("<a><b><c>one</c></b><c>two</c></a>").unwrap();
//! let texts: Vec<String> = root.descendants_named("c").map(|c| c.text()).collect();
//! assert_eq!(texts, vec!["one", "two"]);
//! ```

use quick_xml::{events::Event, Reader};

use super::*;

/// A piece of element content: either a nested element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  /// A nested element
  Element(Element),
  /// Unescaped character data
  Text(String),
}

/// An XML element with its name and ordered content. Attributes are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  /// The element's qualified name as written in the document
  pub name:     String,
  /// Child elements and text, in document order
  pub children: Vec<Node>,
}

impl Element {
  /// Creates an empty element with the given name.
  pub fn new(name: impl Into<String>) -> Self { Self { name: name.into(), children: Vec::new() } }

  /// Parses a complete XML document and returns its root element.
  ///
  /// # Errors
  ///
  /// Returns [`GetPapersError::MalformedResponse`] if the document is not well-formed:
  /// mismatched or unclosed tags, bad escapes, no root element, or more than one root.
  pub fn parse(xml: &str) -> Result<Element, GetPapersError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
      match reader.read_event().map_err(GetPapersError::malformed)? {
        Event::Start(start) => {
          let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
          stack.push(Element::new(name));
        },
        Event::Empty(start) => {
          let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
          attach(&mut stack, &mut root, Element::new(name))?;
        },
        Event::End(_) => {
          let element = stack
            .pop()
            .ok_or_else(|| GetPapersError::malformed("closing tag without an open element"))?;
          attach(&mut stack, &mut root, element)?;
        },
        Event::Text(text) => {
          let text = text.unescape().map_err(GetPapersError::malformed)?;
          push_text(&mut stack, &text)?;
        },
        Event::CData(data) => {
          let text = String::from_utf8_lossy(&data).into_owned();
          push_text(&mut stack, &text)?;
        },
        Event::Eof => break,
        // Declarations, comments, processing instructions and doctypes carry no content.
        _ => {},
      }
    }

    if let Some(open) = stack.last() {
      return Err(GetPapersError::malformed(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| GetPapersError::malformed("document has no root element"))
  }

  /// Iterates over the direct child elements.
  pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
    self.children.iter().filter_map(|node| match node {
      Node::Element(element) => Some(element),
      Node::Text(_) => None,
    })
  }

  /// Iterates over the direct child elements called `name`.
  pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
    self.child_elements().filter(move |element| element.name == name)
  }

  /// Returns the first direct child element called `name`.
  pub fn child(&self, name: &str) -> Option<&Element> {
    self.child_elements().find(|element| element.name == name)
  }

  /// Iterates over all descendant elements (not including `self`) in document order.
  pub fn descendants(&self) -> Descendants<'_> {
    Descendants { stack: self.child_elements().collect::<Vec<_>>().into_iter().rev().collect() }
  }

  /// Iterates over all descendant elements called `name` in document order.
  pub fn descendants_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
    self.descendants().filter(move |element| element.name == name)
  }

  /// Returns the first descendant element called `name`.
  pub fn find(&self, name: &str) -> Option<&Element> {
    self.descendants().find(|element| element.name == name)
  }

  /// Returns all text below this element concatenated in document order, trimmed.
  ///
  /// Inline markup is flattened, so `<t>An <i>in vivo</i> study</t>` yields
  /// `"An in vivo study"`.
  pub fn text(&self) -> String { self.raw_text().trim().to_string() }

  /// Returns all text below this element concatenated in document order, untrimmed.
  pub fn raw_text(&self) -> String {
    let mut out = String::new();
    self.collect_text(&mut out);
    out
  }

  /// Appends the text of this element and its descendants to `out`.
  fn collect_text(&self, out: &mut String) {
    for node in &self.children {
      match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => element.collect_text(out),
      }
    }
  }
}

/// Pre-order iterator over the descendants of an [`Element`].
pub struct Descendants<'a> {
  /// Elements still to visit; the next one is on top
  stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
  type Item = &'a Element;

  fn next(&mut self) -> Option<Self::Item> {
    let element = self.stack.pop()?;
    let mut children: Vec<&'a Element> = element.child_elements().collect();
    children.reverse();
    self.stack.extend(children);
    Some(element)
  }
}

/// Adds a finished element to its parent, or makes it the document root.
fn attach(
  stack: &mut [Element],
  root: &mut Option<Element>,
  element: Element,
) -> Result<(), GetPapersError> {
  match stack.last_mut() {
    Some(parent) => parent.children.push(Node::Element(element)),
    None if root.is_none() => *root = Some(element),
    None => return Err(GetPapersError::malformed("document has more than one root element")),
  }
  Ok(())
}

/// Adds character data to the innermost open element.
///
/// Whitespace between top-level constructs is ignored; any other text outside the root
/// element makes the document malformed.
fn push_text(stack: &mut [Element], text: &str) -> Result<(), GetPapersError> {
  match stack.last_mut() {
    Some(parent) => {
      parent.children.push(Node::Text(text.to_string()));
      Ok(())
    },
    None if text.trim().is_empty() => Ok(()),
    None => Err(GetPapersError::malformed("text outside of the root element")),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_nested_document() {
    let root = Element::parse(
      r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet>
<PubmedArticleSet>
  <PubmedArticle><MedlineCitation><PMID Version="1">111</PMID></MedlineCitation></PubmedArticle>
  <PubmedArticle><MedlineCitation><PMID Version="1">222</PMID></MedlineCitation></PubmedArticle>
</PubmedArticleSet>"#,
    )
    .unwrap();

    assert_eq!(root.name, "PubmedArticleSet");
    assert_eq!(root.children_named("PubmedArticle").count(), 2);
    let pmids: Vec<String> = root.descendants_named("PMID").map(Element::text).collect();
    assert_eq!(pmids, vec!["111", "222"]);
  }

  #[test]
  fn test_text_flattens_inline_markup_and_unescapes() {
    let root =
      Element::parse("<ArticleTitle>Effect of <i>E. coli</i> &amp; friends </ArticleTitle>")
        .unwrap();
    assert_eq!(root.text(), "Effect of E. coli & friends");
  }

  #[test]
  fn test_descendants_are_in_document_order() {
    let root = Element::parse("<a><b><d/></b><c/><b/></a>").unwrap();
    let names: Vec<&str> = root.descendants().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["b", "d", "c", "b"]);
    assert!(root.child("d").is_none());
    assert!(root.find("d").is_some());
  }

  #[test]
  fn test_lookups_with_borrowed_names() {
    let root = Element::parse("<a><b> x </b><c><d>y</d></c></a>").unwrap();
    let child = String::from("b");
    let descendant = String::from("d");
    assert_eq!(root.child(&child).map(Element::text), Some("x".to_string()));
    assert_eq!(root.child(&child).map(Element::raw_text), Some(" x ".to_string()));
    assert_eq!(root.find(&descendant).map(Element::text), Some("y".to_string()));
    assert!(root.child(&descendant).is_none());
  }

  #[test]
  fn test_empty_element_has_empty_text() {
    let root = Element::parse("<a><Year/></a>").unwrap();
    assert_eq!(root.child("Year").map(Element::text), Some(String::new()));
  }

  #[test]
  fn test_malformed_documents_are_rejected() {
    for bad in ["", "   ", "not xml at all", "<a><b></a>", "<a>", "<a/><b/>", "<a>&bogus;</a>"] {
      let result = Element::parse(bad);
      assert!(
        matches!(result, Err(GetPapersError::MalformedResponse(_))),
        "expected {bad:?} to be rejected, got {result:?}"
      );
    }
  }
}
