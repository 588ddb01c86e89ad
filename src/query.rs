//! Document-level query helpers.
//!
//! One-line delegations to the global document's native search primitive.
//! The scoped equivalents live on [`ElementExt`](crate::ElementExt) and share
//! the same underlying implementation, so free-function and method-style
//! call sites behave identically.

use crate::dom::{Document, Element};
use crate::error::Result;

/// Returns the first element matching `selector` in the global document, or
/// `None` when nothing matches.
///
/// Malformed selectors error; they are never swallowed.
///
/// ```ignore
/// if let Some(panel) = find_one("#panel")? {
///     panel.set_class("visible", true)?;
/// }
/// ```
pub fn find_one(selector: &str) -> Result<Option<Element>> {
	Document::global().query_selector(selector)
}

/// Returns every element matching `selector` in the global document, in
/// document order.
///
/// The result is a materialized list: mutating the tree afterwards does not
/// affect it.
pub fn find_all(selector: &str) -> Result<Vec<Element>> {
	Document::global().query_selector_all(selector)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::builder::html::{div, span};
	use crate::error::DomError;
	use crate::ops::ElementExt;

	#[test]
	fn test_find_one_returns_first_document_match() {
		let body = Document::global().body().unwrap();
		div()
			.attr("class", "q-first-marker")
			.container(&body)
			.build()
			.unwrap();
		div()
			.attr("class", "q-first-marker second")
			.container(&body)
			.build()
			.unwrap();
		let found = find_one(".q-first-marker").unwrap().unwrap();
		assert!(!found.class("second"));
	}

	#[test]
	fn test_find_one_absent_is_none() {
		assert!(find_one(".q-never-used-anywhere").unwrap().is_none());
	}

	#[test]
	fn test_find_all_is_materialized() {
		let body = Document::global().body().unwrap();
		let host = div().attr("id", "q-materialized").container(&body).build().unwrap();
		for _ in 0..3 {
			host.append(span().attr("class", "q-mat-item")).unwrap();
		}
		let captured = find_all(".q-mat-item").unwrap();
		assert_eq!(captured.len(), 3);
		// mutate the tree after the query; the captured list is unaffected
		host.set_text_content("");
		assert_eq!(captured.len(), 3);
		assert_eq!(find_all(".q-mat-item").unwrap().len(), 0);
	}

	#[test]
	fn test_invalid_selector_errors() {
		assert!(matches!(
			find_one("p:hover"),
			Err(DomError::InvalidSelector { .. })
		));
	}
}
