//! Chaining operations installed on every element handle.
//!
//! [`ElementExt`] is implemented once for [`Element`], so construction,
//! mutation, and querying compose fluently without mutating any shared base
//! type:
//!
//! ```ignore
//! use domforge::prelude::*;
//!
//! let panel = find_one("#panel")?.unwrap();
//! panel
//!     .set_attr("data-state", "open")?
//!     .set_class("visible", true)?
//!     .set_style("max-height", "none")?
//!     .on("click", |_| { /* ... */ })
//!     .append(div().attr("class", "row"))?;
//! ```
//!
//! Getters and setters are separate operations (`attr`/`set_attr`,
//! `class`/`set_class`, `style`/`set_style`): whether a call reads or writes
//! is decided by which method is named, never by inspecting the value.
//! Explicitly setting an empty string is a write, and reading never mutates.

use crate::builder::ElementBuilder;
use crate::dom::{Element, Event};
use crate::error::Result;
use crate::value::{ClassEffect, ClassValue, Value};

/// The chaining operation set available on every element handle.
///
/// Setters return the receiver so calls chain; pure getters return the
/// queried value.
pub trait ElementExt {
	/// Builds `target` with the receiver as container and returns the
	/// receiver.
	///
	/// Accepts a tag name, a configured [`ElementBuilder`], or a pre-built
	/// [`Element`] (which is attached as-is).
	fn append(&self, target: impl Into<ElementBuilder>) -> Result<&Self>;

	/// Appends pre-built elements, in order, and returns the receiver.
	fn append_nodes(&self, nodes: impl IntoIterator<Item = Element>) -> Result<&Self>;

	/// Builds `target` unattached, inserts it as the receiver's new first
	/// child, and returns the receiver.
	fn prepend(&self, target: impl Into<ElementBuilder>) -> Result<&Self>;

	/// Reads an attribute. Never mutates.
	fn attr(&self, name: &str) -> Option<String>;

	/// Resolves `value` against the receiver, sets the attribute, and
	/// returns the receiver.
	fn set_attr(&self, name: &str, value: impl Into<Value>) -> Result<&Self>;

	/// Whether the class is currently present. Never mutates.
	fn class(&self, name: &str) -> bool;

	/// Resolves `value` against the receiver, then toggles, adds, or removes
	/// the class; returns the receiver.
	///
	/// [`ClassValue::Toggle`] (or the reserved string token `"toggle"`) flips
	/// membership; otherwise `true` adds and `false` removes.
	fn set_class(&self, name: &str, value: impl Into<ClassValue>) -> Result<&Self>;

	/// Reads an inline style property. Never mutates.
	fn style(&self, name: &str) -> Option<String>;

	/// Resolves `value` against the receiver, assigns the inline style
	/// property, and returns the receiver.
	fn set_style(&self, name: &str, value: impl Into<Value>) -> Result<&Self>;

	/// Registers an event handler and returns the receiver.
	///
	/// No de-duplication: registering the same handler twice yields two
	/// invocations per dispatch, matching the host listener semantics.
	fn on<F>(&self, event_type: &str, handler: F) -> &Self
	where
		F: Fn(Event) + 'static;

	/// Registers a `click` handler.
	#[inline]
	fn on_click<F>(&self, handler: F) -> &Self
	where
		F: Fn(Event) + 'static,
	{
		self.on("click", handler)
	}

	/// Registers an `input` handler.
	#[inline]
	fn on_input<F>(&self, handler: F) -> &Self
	where
		F: Fn(Event) + 'static,
	{
		self.on("input", handler)
	}

	/// Registers a `change` handler.
	#[inline]
	fn on_change<F>(&self, handler: F) -> &Self
	where
		F: Fn(Event) + 'static,
	{
		self.on("change", handler)
	}

	/// Registers a `submit` handler.
	#[inline]
	fn on_submit<F>(&self, handler: F) -> &Self
	where
		F: Fn(Event) + 'static,
	{
		self.on("submit", handler)
	}

	/// First match for `selector` in the subtree below the receiver.
	fn find_one(&self, selector: &str) -> Result<Option<Element>>;

	/// Every match for `selector` below the receiver, in document order,
	/// materialized as a concrete list.
	fn find_all(&self, selector: &str) -> Result<Vec<Element>>;
}

impl ElementExt for Element {
	fn append(&self, target: impl Into<ElementBuilder>) -> Result<&Self> {
		target.into().container(self).build()?;
		Ok(self)
	}

	fn append_nodes(&self, nodes: impl IntoIterator<Item = Element>) -> Result<&Self> {
		for node in nodes {
			self.append_child(&node)?;
		}
		Ok(self)
	}

	fn prepend(&self, target: impl Into<ElementBuilder>) -> Result<&Self> {
		let node = target.into().build()?;
		self.insert_before(&node, self.first_element_child().as_ref())?;
		Ok(self)
	}

	fn attr(&self, name: &str) -> Option<String> {
		self.get_attribute(name)
	}

	fn set_attr(&self, name: &str, value: impl Into<Value>) -> Result<&Self> {
		let resolved = value.into().resolve(self);
		self.set_attribute(name, &resolved)?;
		Ok(self)
	}

	fn class(&self, name: &str) -> bool {
		self.has_class(name)
	}

	fn set_class(&self, name: &str, value: impl Into<ClassValue>) -> Result<&Self> {
		match value.into().resolve(self) {
			ClassEffect::Toggle => {
				self.toggle_class(name)?;
			}
			ClassEffect::Set(true) => self.add_class(name)?,
			ClassEffect::Set(false) => self.remove_class(name)?,
		}
		Ok(self)
	}

	fn style(&self, name: &str) -> Option<String> {
		self.style_property(name)
	}

	fn set_style(&self, name: &str, value: impl Into<Value>) -> Result<&Self> {
		let resolved = value.into().resolve(self);
		self.set_style_property(name, &resolved)?;
		Ok(self)
	}

	fn on<F>(&self, event_type: &str, handler: F) -> &Self
	where
		F: Fn(Event) + 'static,
	{
		self.add_event_listener(event_type, handler).forget();
		self
	}

	fn find_one(&self, selector: &str) -> Result<Option<Element>> {
		self.query_selector(selector)
	}

	fn find_all(&self, selector: &str) -> Result<Vec<Element>> {
		self.query_selector_all(selector)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::builder::html::{div, li, span, ul};
	use crate::dom::Document;

	fn fresh(tag: &str) -> Element {
		Document::global()
			.create_element(tag)
			.expect("standard tags always create")
	}

	#[test]
	fn test_setters_return_the_same_node() {
		let element = fresh("div");
		let chained = element
			.set_attr("a", 1)
			.unwrap()
			.set_style("color", "red")
			.unwrap()
			.on_click(|_| {});
		assert_eq!(*chained, element);
		assert_eq!(element.attr("a").as_deref(), Some("1"));
		assert_eq!(element.style("color").as_deref(), Some("red"));
	}

	#[test]
	fn test_getters_do_not_mutate() {
		let element = fresh("div");
		assert_eq!(element.attr("missing"), None);
		assert_eq!(element.attr("missing"), None);
		assert!(!element.class("ghost"));
		assert_eq!(element.style("color"), None);
	}

	#[test]
	fn test_set_attr_empty_string_is_a_write() {
		let element = fresh("div");
		element.set_attr("data-flag", "").unwrap();
		assert_eq!(element.attr("data-flag").as_deref(), Some(""));
	}

	#[test]
	fn test_set_attr_is_idempotent() {
		let element = fresh("div");
		element.set_attr("x", "v").unwrap();
		element.set_attr("x", "v").unwrap();
		assert_eq!(element.attr("x").as_deref(), Some("v"));
	}

	#[test]
	fn test_class_toggle_twice_restores_membership() {
		let element = fresh("div");
		element.set_class("lit", true).unwrap();
		element.set_class("lit", "toggle").unwrap();
		element.set_class("lit", "toggle").unwrap();
		assert!(element.class("lit"));
	}

	#[test]
	fn test_class_set_and_remove() {
		let element = fresh("div");
		element.set_class("on", true).unwrap();
		assert!(element.class("on"));
		element.set_class("on", false).unwrap();
		assert!(!element.class("on"));
	}

	#[test]
	fn test_computed_class_value_resolves_against_receiver() {
		let element = fresh("div");
		element
			.set_class("by-tag", ClassValue::computed(|el: &Element| el.tag_name() == "div"))
			.unwrap();
		assert!(element.class("by-tag"));
	}

	#[test]
	fn test_append_builds_into_receiver() {
		let parent = fresh("div");
		parent.append(div().attr("id", "x")).unwrap();
		let last = parent.last_element_child().unwrap();
		assert_eq!(last.tag_name(), "div");
		assert_eq!(last.attr("id").as_deref(), Some("x"));
	}

	#[test]
	fn test_append_accepts_bare_tag_and_existing_node() {
		let parent = fresh("div");
		parent.append("span").unwrap();
		let loose = fresh("p");
		parent.append(loose.clone()).unwrap();
		assert_eq!(parent.children().len(), 2);
		assert_eq!(parent.last_element_child(), Some(loose));
	}

	#[test]
	fn test_prepend_becomes_first_child() {
		let parent = fresh("ul");
		parent.append(li().attr("id", "last")).unwrap();
		parent.prepend(li().attr("id", "first")).unwrap();
		let first = parent.first_element_child().unwrap();
		assert_eq!(first.attr("id").as_deref(), Some("first"));
		assert_eq!(parent.children().len(), 2);
	}

	#[test]
	fn test_prepend_on_empty_parent_appends() {
		let parent = fresh("div");
		parent.prepend(span()).unwrap();
		assert_eq!(parent.children().len(), 1);
	}

	#[test]
	fn test_append_nodes_keeps_order() {
		let parent = fresh("div");
		let first = fresh("span");
		let second = fresh("span");
		parent.append_nodes([first.clone(), second.clone()]).unwrap();
		assert_eq!(parent.children(), vec![first, second]);
	}

	#[test]
	fn test_double_registration_fires_twice() {
		use std::cell::Cell;
		use std::rc::Rc;

		let element = fresh("button");
		let count = Rc::new(Cell::new(0u32));
		for _ in 0..2 {
			let count = Rc::clone(&count);
			element.on("click", move |_| count.set(count.get() + 1));
		}
		element.dispatch("click").unwrap();
		assert_eq!(count.get(), 2);
	}

	#[test]
	fn test_scoped_find_searches_descendants_only() {
		let root = fresh("div");
		root.set_attr("class", "scope").unwrap();
		root.append(ul().child(li().attr("class", "scope").build().unwrap()))
			.unwrap();
		let matches = root.find_all(".scope").unwrap();
		assert_eq!(matches.len(), 1);
		assert_eq!(matches[0].tag_name(), "li");
		assert!(root.find_one("ul").unwrap().is_some());
	}
}
