//! Declarative element construction.
//!
//! [`ElementBuilder`] is the construction bundle: a tag name (or an existing
//! element) plus optional channels for attributes, inline styles, event
//! handlers, text, children, and a container to attach to. Nothing touches
//! the host until [`ElementBuilder::build`], which creates the node and
//! applies the channels in a fixed order: attributes, styles, events, text,
//! children, container.
//!
//! Attribute and style values go through [`Value`] resolution, so a value may
//! be computed from the freshly created node itself:
//!
//! ```ignore
//! use domforge::prelude::*;
//!
//! let card = div()
//!     .attr("id", Value::computed(|el| format!("card-{}", el.tag_name())))
//!     .style("color", "rebeccapurple")
//!     .on("click", |_| debug_log!("card clicked"))
//!     .child(span().text("hello").build()?)
//!     .build()?;
//! ```

pub mod html;

use crate::debug_log;
use crate::dom::{Document, Element, Event};
use crate::error::Result;
use crate::value::Value;

/// What `build()` starts from: a fresh element of some tag, or an element
/// that already exists, in which case channels are applied to the node
/// as-is.
enum Target {
	Tag(String),
	Node(Element),
}

/// Fluent element construction bundle.
///
/// Builders are lazy: they hold channels and only touch the host document
/// when [`build`](ElementBuilder::build) runs, so tag errors surface there
/// and computed values see the new node.
pub struct ElementBuilder {
	target: Target,
	attrs: Vec<(String, Value)>,
	styles: Vec<(String, Value)>,
	events: Vec<(String, Box<dyn Fn(Event) + 'static>)>,
	text: Option<String>,
	children: Vec<Element>,
	container: Option<Element>,
}

impl ElementBuilder {
	/// Creates a builder for a new element of the given tag.
	pub fn new(tag: impl Into<String>) -> Self {
		Self::with_target(Target::Tag(tag.into()))
	}

	/// Creates a builder over an existing element; `build()` applies the
	/// channels to it instead of creating a node.
	pub fn from_element(element: Element) -> Self {
		Self::with_target(Target::Node(element))
	}

	fn with_target(target: Target) -> Self {
		ElementBuilder {
			target,
			attrs: Vec::new(),
			styles: Vec::new(),
			events: Vec::new(),
			text: None,
			children: Vec::new(),
			container: None,
		}
	}

	/// Adds an attribute. Values resolve at build time against the new node.
	///
	/// ```ignore
	/// div().attr("data-test-id", "sidebar").attr("tabindex", 2)
	/// ```
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds an inline style property.
	///
	/// ```ignore
	/// div().style("display", "flex").style("gap", "1rem")
	/// ```
	pub fn style(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.styles.push((name.into(), value.into()));
		self
	}

	/// Registers an event handler on the built element.
	///
	/// Handlers are registration data, never value-resolved.
	pub fn on<F>(mut self, event_type: impl Into<String>, handler: F) -> Self
	where
		F: Fn(Event) + 'static,
	{
		self.events.push((event_type.into(), Box::new(handler)));
		self
	}

	/// Sets the element's text content.
	pub fn text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	/// Appends a child element after construction.
	pub fn child(mut self, child: Element) -> Self {
		self.children.push(child);
		self
	}

	/// Appends several child elements, in order.
	pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
		self.children.extend(children);
		self
	}

	/// Attaches the built element as the last child of `parent`.
	pub fn container(mut self, parent: &Element) -> Self {
		self.container = Some(parent.clone());
		self
	}

	/// Creates the element and applies every channel, in order: attributes,
	/// styles, events, text, children, container.
	///
	/// # Errors
	///
	/// [`DomError::InvalidTag`](crate::DomError::InvalidTag) when the host
	/// rejects the tag name; host failures from attribute, style, or tree
	/// mutations propagate unchanged.
	pub fn build(self) -> Result<Element> {
		let ElementBuilder {
			target,
			attrs,
			styles,
			events,
			text,
			children,
			container,
		} = self;

		let element = match target {
			Target::Tag(tag) => Document::global().create_element(&tag)?,
			Target::Node(element) => element,
		};

		for (name, value) in &attrs {
			let resolved = value.resolve(&element);
			element.set_attribute(name, &resolved)?;
		}
		for (name, value) in &styles {
			let resolved = value.resolve(&element);
			element.set_style_property(name, &resolved)?;
		}
		for (event_type, handler) in events {
			element.add_event_listener(&event_type, handler).forget();
		}
		if let Some(text) = text {
			element.set_text_content(&text);
		}
		for child in &children {
			element.append_child(child)?;
		}
		if let Some(parent) = container {
			parent.append_child(&element)?;
		}

		debug_log!("built <{}> element", element.tag_name());
		Ok(element)
	}
}

impl From<&str> for ElementBuilder {
	fn from(tag: &str) -> Self {
		ElementBuilder::new(tag)
	}
}

impl From<String> for ElementBuilder {
	fn from(tag: String) -> Self {
		ElementBuilder::new(tag)
	}
}

impl From<Element> for ElementBuilder {
	fn from(element: Element) -> Self {
		ElementBuilder::from_element(element)
	}
}

impl std::fmt::Debug for ElementBuilder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let target = match &self.target {
			Target::Tag(tag) => tag.as_str(),
			Target::Node(_) => "<existing element>",
		};
		f.debug_struct("ElementBuilder")
			.field("target", &target)
			.field("attrs", &self.attrs.len())
			.field("styles", &self.styles.len())
			.field("events", &self.events.len())
			.field("children", &self.children.len())
			.finish_non_exhaustive()
	}
}
