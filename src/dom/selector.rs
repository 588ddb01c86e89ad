//! Selector parsing and matching for the native backend.
//!
//! Supports the subset of CSS selectors the in-memory host understands:
//! compound selectors built from a tag name, `#id`, `.class`, `[attr]` and
//! `[attr=value]` (quoted or bare), combined with the descendant and child
//! (`>`) combinators, in comma-separated lists. Pseudo-classes, sibling
//! combinators, and attribute operators other than exact match are rejected
//! with [`DomError::InvalidSelector`] so unsupported queries fail loudly
//! instead of silently matching nothing.

use crate::dom::Element;
use crate::error::{DomError, Result};

/// A parsed, comma-separated selector list.
pub(super) struct SelectorList {
	selectors: Vec<ComplexSelector>,
}

/// A single complex selector: compounds joined by combinators, left to right.
struct ComplexSelector {
	/// The combinator in each entry relates the compound to the one before
	/// it; the first entry's combinator is never consulted.
	sequence: Vec<(Combinator, Compound)>,
}

#[derive(Clone, Copy)]
enum Combinator {
	Descendant,
	Child,
}

#[derive(Default)]
struct Compound {
	tag: Option<String>,
	ids: Vec<String>,
	classes: Vec<String>,
	attrs: Vec<AttrTest>,
}

struct AttrTest {
	name: String,
	value: Option<String>,
}

impl SelectorList {
	pub(super) fn matches(&self, element: &Element) -> bool {
		self.selectors.iter().any(|s| s.matches(element))
	}
}

impl ComplexSelector {
	fn matches(&self, element: &Element) -> bool {
		self.matches_at(self.sequence.len() - 1, element)
	}

	/// Right-to-left matching: the compound at `index` must match `element`,
	/// and everything to its left must match along the ancestor chain.
	fn matches_at(&self, index: usize, element: &Element) -> bool {
		if !self.sequence[index].1.matches(element) {
			return false;
		}
		if index == 0 {
			return true;
		}
		match self.sequence[index].0 {
			Combinator::Child => element
				.parent()
				.is_some_and(|parent| self.matches_at(index - 1, &parent)),
			Combinator::Descendant => {
				let mut current = element.parent();
				while let Some(ancestor) = current {
					if self.matches_at(index - 1, &ancestor) {
						return true;
					}
					current = ancestor.parent();
				}
				false
			}
		}
	}
}

impl Compound {
	fn matches(&self, element: &Element) -> bool {
		if let Some(tag) = &self.tag {
			if element.tag_name() != *tag {
				return false;
			}
		}
		for id in &self.ids {
			if element.get_attribute("id").as_deref() != Some(id) {
				return false;
			}
		}
		for class in &self.classes {
			if !element.has_class(class) {
				return false;
			}
		}
		for attr in &self.attrs {
			match element.get_attribute(&attr.name) {
				None => return false,
				Some(actual) => {
					if let Some(expected) = &attr.value {
						if actual != *expected {
							return false;
						}
					}
				}
			}
		}
		true
	}
}

/// Returns the first match in document order below `scope` (exclusive).
pub(super) fn find_first(scope: &Element, selectors: &SelectorList) -> Option<Element> {
	for child in scope.children() {
		if selectors.matches(&child) {
			return Some(child);
		}
		if let Some(found) = find_first(&child, selectors) {
			return Some(found);
		}
	}
	None
}

/// Collects every match in document order below `scope` (exclusive).
pub(super) fn collect(scope: &Element, selectors: &SelectorList, out: &mut Vec<Element>) {
	for child in scope.children() {
		if selectors.matches(&child) {
			out.push(child.clone());
		}
		collect(&child, selectors, out);
	}
}

pub(super) fn parse(input: &str) -> Result<SelectorList> {
	let mut selectors = Vec::new();
	for part in split_selector_list(input) {
		let part = part.trim();
		if part.is_empty() {
			return Err(invalid(input, "empty selector in list"));
		}
		selectors.push(parse_complex(input, part)?);
	}
	if selectors.is_empty() {
		return Err(invalid(input, "empty selector"));
	}
	Ok(SelectorList { selectors })
}

fn invalid(selector: &str, reason: &str) -> DomError {
	DomError::InvalidSelector {
		selector: selector.to_string(),
		reason: reason.to_string(),
	}
}

/// Splits on top-level commas, leaving commas inside `[...]` and quoted
/// attribute values alone.
fn split_selector_list(input: &str) -> Vec<&str> {
	let mut parts = Vec::new();
	let mut start = 0;
	let mut in_brackets = false;
	let mut quote: Option<char> = None;
	for (index, ch) in input.char_indices() {
		match quote {
			Some(q) => {
				if ch == q {
					quote = None;
				}
			}
			None => match ch {
				'"' | '\'' => quote = Some(ch),
				'[' => in_brackets = true,
				']' => in_brackets = false,
				',' if !in_brackets => {
					parts.push(&input[start..index]);
					start = index + 1;
				}
				_ => {}
			},
		}
	}
	parts.push(&input[start..]);
	parts
}

fn parse_complex(original: &str, part: &str) -> Result<ComplexSelector> {
	let mut sequence = Vec::new();
	let mut rest = part;
	let mut pending = Combinator::Descendant;
	loop {
		rest = rest.trim_start();
		if let Some(after) = rest.strip_prefix('>') {
			if sequence.is_empty() {
				return Err(invalid(original, "selector cannot start with a combinator"));
			}
			pending = Combinator::Child;
			rest = after.trim_start();
		}
		if rest.is_empty() {
			break;
		}
		let (compound, remaining) = parse_compound(original, rest)?;
		sequence.push((pending, compound));
		pending = Combinator::Descendant;
		rest = remaining;
	}
	if matches!(pending, Combinator::Child) {
		return Err(invalid(original, "dangling `>` combinator"));
	}
	if sequence.is_empty() {
		return Err(invalid(original, "empty selector"));
	}
	Ok(ComplexSelector { sequence })
}

/// Parses one compound selector, returning it and the unconsumed remainder
/// (which starts at whitespace or a combinator).
fn parse_compound<'a>(original: &str, input: &'a str) -> Result<(Compound, &'a str)> {
	let mut compound = Compound::default();
	let mut matched_any = false;
	let mut rest = input;
	loop {
		let Some(ch) = rest.chars().next() else { break };
		match ch {
			c if c.is_whitespace() => break,
			'>' => break,
			'*' => {
				if matched_any {
					return Err(invalid(original, "`*` must start a compound selector"));
				}
				matched_any = true;
				rest = &rest[1..];
			}
			'#' => {
				let (ident, remaining) = take_identifier(&rest[1..]);
				if ident.is_empty() {
					return Err(invalid(original, "`#` must be followed by an identifier"));
				}
				compound.ids.push(ident.to_string());
				matched_any = true;
				rest = remaining;
			}
			'.' => {
				let (ident, remaining) = take_identifier(&rest[1..]);
				if ident.is_empty() {
					return Err(invalid(original, "`.` must be followed by an identifier"));
				}
				compound.classes.push(ident.to_string());
				matched_any = true;
				rest = remaining;
			}
			'[' => {
				let (attr, remaining) = parse_attr_test(original, &rest[1..])?;
				compound.attrs.push(attr);
				matched_any = true;
				rest = remaining;
			}
			c if c.is_ascii_alphabetic() => {
				if matched_any {
					return Err(invalid(original, "tag name must start a compound selector"));
				}
				let (ident, remaining) = take_identifier(rest);
				compound.tag = Some(ident.to_ascii_lowercase());
				matched_any = true;
				rest = remaining;
			}
			':' | '+' | '~' => {
				return Err(invalid(
					original,
					"pseudo-classes and sibling combinators are not supported by the native backend",
				));
			}
			_ => return Err(invalid(original, "unexpected character in selector")),
		}
	}
	if !matched_any {
		return Err(invalid(original, "empty compound selector"));
	}
	Ok((compound, rest))
}

fn take_identifier(input: &str) -> (&str, &str) {
	let end = input
		.char_indices()
		.find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
		.map_or(input.len(), |(index, _)| index);
	input.split_at(end)
}

/// Parses the inside of `[...]`; the leading `[` is already consumed.
fn parse_attr_test<'a>(original: &str, input: &'a str) -> Result<(AttrTest, &'a str)> {
	let rest = input.trim_start();
	let (name, rest) = take_identifier(rest);
	if name.is_empty() {
		return Err(invalid(original, "attribute selector needs a name"));
	}
	let rest = rest.trim_start();
	if let Some(rest) = rest.strip_prefix(']') {
		return Ok((
			AttrTest {
				name: name.to_string(),
				value: None,
			},
			rest,
		));
	}
	let Some(rest) = rest.strip_prefix('=') else {
		return Err(invalid(
			original,
			"only `[attr]` and `[attr=value]` attribute selectors are supported",
		));
	};
	let rest = rest.trim_start();
	let (value, rest) = match rest.chars().next() {
		Some(quote @ ('"' | '\'')) => {
			let stripped = &rest[1..];
			let Some(end) = stripped.find(quote) else {
				return Err(invalid(original, "unterminated quoted attribute value"));
			};
			(&stripped[..end], &stripped[end + 1..])
		}
		_ => {
			let end = rest.find(']').ok_or_else(|| invalid(original, "unterminated attribute selector"))?;
			(rest[..end].trim_end(), &rest[end..])
		}
	};
	let rest = rest.trim_start();
	let Some(rest) = rest.strip_prefix(']') else {
		return Err(invalid(original, "unterminated attribute selector"));
	};
	Ok((
		AttrTest {
			name: name.to_string(),
			value: Some(value.to_string()),
		},
		rest,
	))
}
