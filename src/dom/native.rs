//! In-memory host backend for native targets.
//!
//! Server-side twin of the browser backend: a reference-counted element tree
//! implementing the same host primitives, so builders, chaining operations,
//! and queries behave identically in tests and server code. The host model is
//! single-writer on the calling thread, hence `Rc`/`RefCell`; handles are
//! deliberately not `Send`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::dom::selector;
use crate::error::{DomError, Result};

/// The event value passed to listeners on native targets.
///
/// On `wasm32` listeners receive `web_sys::Event` instead; handlers that
/// ignore their argument are source-compatible across both backends.
#[derive(Clone)]
pub struct Event {
	event_type: String,
	target: Option<Element>,
}

impl Event {
	/// The event type name this event was dispatched as.
	pub fn event_type(&self) -> &str {
		&self.event_type
	}

	/// The element the event was dispatched on.
	pub fn target(&self) -> Option<Element> {
		self.target.clone()
	}
}

impl std::fmt::Debug for Event {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Event")
			.field("event_type", &self.event_type)
			.finish()
	}
}

/// Shared handler storage for registered listeners.
pub type EventHandler = Rc<dyn Fn(Event) + 'static>;

struct Listener {
	id: u64,
	event_type: String,
	handler: EventHandler,
}

struct NodeInner {
	tag: String,
	/// Insertion-ordered; attribute enumeration follows assignment order.
	attrs: Vec<(String, String)>,
	styles: Vec<(String, String)>,
	children: Vec<Element>,
	parent: Option<Weak<RefCell<NodeInner>>>,
	listeners: Vec<Listener>,
	text: Option<String>,
	next_listener_id: u64,
}

/// A handle onto one element of the in-memory tree.
///
/// Cloning is cheap and clones refer to the same node; equality is node
/// identity.
#[derive(Clone)]
pub struct Element {
	inner: Rc<RefCell<NodeInner>>,
}

impl PartialEq for Element {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl Eq for Element {}

impl std::fmt::Debug for Element {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner = self.inner.borrow();
		write!(f, "<{}", inner.tag)?;
		for (name, value) in &inner.attrs {
			write!(f, " {name}={value:?}")?;
		}
		write!(f, ">")
	}
}

impl Element {
	fn new_detached(tag: &str) -> Self {
		Element {
			inner: Rc::new(RefCell::new(NodeInner {
				tag: tag.to_ascii_lowercase(),
				attrs: Vec::new(),
				styles: Vec::new(),
				children: Vec::new(),
				parent: None,
				listeners: Vec::new(),
				text: None,
				next_listener_id: 0,
			})),
		}
	}

	/// The element's tag name, lowercase.
	pub fn tag_name(&self) -> String {
		self.inner.borrow().tag.clone()
	}

	/// Reads an attribute; `None` when the attribute is absent.
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.inner
			.borrow()
			.attrs
			.iter()
			.find(|(attr, _)| attr == name)
			.map(|(_, value)| value.clone())
	}

	/// Sets a string attribute, overwriting any previous value.
	pub fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
		validate_attribute_name(name)?;
		let mut inner = self.inner.borrow_mut();
		if let Some(slot) = inner.attrs.iter_mut().find(|(attr, _)| attr == name) {
			slot.1.clear();
			slot.1.push_str(value);
		} else {
			inner.attrs.push((name.to_string(), value.to_string()));
		}
		Ok(())
	}

	/// Removes an attribute; absent attributes are a no-op.
	pub fn remove_attribute(&self, name: &str) -> Result<()> {
		self.inner.borrow_mut().attrs.retain(|(attr, _)| attr != name);
		Ok(())
	}

	/// Whether the `class` attribute contains the given token.
	pub fn has_class(&self, name: &str) -> bool {
		self.get_attribute("class")
			.is_some_and(|classes| classes.split_ascii_whitespace().any(|token| token == name))
	}

	/// Adds a class token; already-present tokens are a no-op.
	pub fn add_class(&self, name: &str) -> Result<()> {
		validate_class_token(name)?;
		if self.has_class(name) {
			return Ok(());
		}
		let rebuilt = match self.get_attribute("class") {
			Some(current) if !current.is_empty() => format!("{current} {name}"),
			_ => name.to_string(),
		};
		self.set_attribute("class", &rebuilt)
	}

	/// Removes a class token; absent tokens are a no-op.
	pub fn remove_class(&self, name: &str) -> Result<()> {
		validate_class_token(name)?;
		if let Some(current) = self.get_attribute("class") {
			let rebuilt = current
				.split_ascii_whitespace()
				.filter(|token| *token != name)
				.collect::<Vec<_>>()
				.join(" ");
			self.set_attribute("class", &rebuilt)?;
		}
		Ok(())
	}

	/// Flips class membership; returns whether the class is present afterwards.
	pub fn toggle_class(&self, name: &str) -> Result<bool> {
		if self.has_class(name) {
			self.remove_class(name)?;
			Ok(false)
		} else {
			self.add_class(name)?;
			Ok(true)
		}
	}

	/// Reads an inline style property; `None` when unset.
	pub fn style_property(&self, name: &str) -> Option<String> {
		self.inner
			.borrow()
			.styles
			.iter()
			.find(|(property, _)| property == name)
			.map(|(_, value)| value.clone())
	}

	/// Assigns an inline style property. Following CSSOM semantics, an empty
	/// value removes the property and an empty property name is ignored.
	pub fn set_style_property(&self, name: &str, value: &str) -> Result<()> {
		if name.trim().is_empty() {
			return Ok(());
		}
		if value.is_empty() {
			self.remove_style_property(name);
			return Ok(());
		}
		let mut inner = self.inner.borrow_mut();
		if let Some(slot) = inner.styles.iter_mut().find(|(property, _)| property == name) {
			slot.1.clear();
			slot.1.push_str(value);
		} else {
			inner.styles.push((name.to_string(), value.to_string()));
		}
		Ok(())
	}

	/// Removes an inline style property.
	pub fn remove_style_property(&self, name: &str) {
		self.inner
			.borrow_mut()
			.styles
			.retain(|(property, _)| property != name);
	}

	/// Registers a listener for the given event type.
	///
	/// The returned [`EventHandle`] detaches the listener when dropped; call
	/// [`EventHandle::forget`] to keep the listener for the node's lifetime.
	/// Listeners are never de-duplicated: registering the same handler twice
	/// means two invocations per dispatch.
	pub fn add_event_listener<F>(&self, event_type: &str, handler: F) -> EventHandle
	where
		F: Fn(Event) + 'static,
	{
		let mut inner = self.inner.borrow_mut();
		let id = inner.next_listener_id;
		inner.next_listener_id += 1;
		inner.listeners.push(Listener {
			id,
			event_type: event_type.to_string(),
			handler: Rc::new(handler),
		});
		EventHandle {
			node: Rc::downgrade(&self.inner),
			id,
			detach_on_drop: true,
		}
	}

	/// Synchronously invokes every listener registered for `event_type`, in
	/// registration order.
	pub fn dispatch(&self, event_type: &str) -> Result<()> {
		if event_type.is_empty() {
			return Err(DomError::Event {
				event_type: event_type.to_string(),
				reason: "event type must not be empty".to_string(),
			});
		}
		let handlers: Vec<EventHandler> = self
			.inner
			.borrow()
			.listeners
			.iter()
			.filter(|listener| listener.event_type == event_type)
			.map(|listener| Rc::clone(&listener.handler))
			.collect();
		for handler in handlers {
			handler(Event {
				event_type: event_type.to_string(),
				target: Some(self.clone()),
			});
		}
		Ok(())
	}

	/// Appends `child` as the last child, detaching it from any previous
	/// parent first (move semantics, as in the browser).
	pub fn append_child(&self, child: &Element) -> Result<()> {
		self.ensure_may_adopt(child)?;
		child.detach();
		child.inner.borrow_mut().parent = Some(Rc::downgrade(&self.inner));
		self.inner.borrow_mut().children.push(child.clone());
		Ok(())
	}

	/// Inserts `new_child` before `reference`; with no reference this is an
	/// append. The reference must be a current child of this element.
	pub fn insert_before(&self, new_child: &Element, reference: Option<&Element>) -> Result<()> {
		let Some(reference) = reference else {
			return self.append_child(new_child);
		};
		self.ensure_may_adopt(new_child)?;
		new_child.detach();
		let index = self
			.inner
			.borrow()
			.children
			.iter()
			.position(|child| child == reference)
			.ok_or_else(|| {
				DomError::Hierarchy("reference node is not a child of this element".to_string())
			})?;
		new_child.inner.borrow_mut().parent = Some(Rc::downgrade(&self.inner));
		self.inner.borrow_mut().children.insert(index, new_child.clone());
		Ok(())
	}

	fn detach(&self) {
		let parent = self.inner.borrow_mut().parent.take();
		if let Some(weak) = parent {
			if let Some(parent_inner) = weak.upgrade() {
				parent_inner
					.borrow_mut()
					.children
					.retain(|child| !Rc::ptr_eq(&child.inner, &self.inner));
			}
		}
	}

	fn ensure_may_adopt(&self, candidate: &Element) -> Result<()> {
		if candidate == self {
			return Err(DomError::Hierarchy(
				"an element cannot be inserted into itself".to_string(),
			));
		}
		let mut current = self.parent();
		while let Some(ancestor) = current {
			if ancestor == *candidate {
				return Err(DomError::Hierarchy(
					"an ancestor cannot be inserted into its descendant".to_string(),
				));
			}
			current = ancestor.parent();
		}
		Ok(())
	}

	/// The element's children, materialized as a list of handles.
	pub fn children(&self) -> Vec<Element> {
		self.inner.borrow().children.clone()
	}

	/// The first child element, if any.
	pub fn first_element_child(&self) -> Option<Element> {
		self.inner.borrow().children.first().cloned()
	}

	/// The last child element, if any.
	pub fn last_element_child(&self) -> Option<Element> {
		self.inner.borrow().children.last().cloned()
	}

	/// The parent element, if attached.
	pub fn parent(&self) -> Option<Element> {
		self.inner
			.borrow()
			.parent
			.as_ref()
			.and_then(Weak::upgrade)
			.map(|inner| Element { inner })
	}

	/// First match for `selector` among this element's descendants.
	pub fn query_selector(&self, selector: &str) -> Result<Option<Element>> {
		let selectors = selector::parse(selector)?;
		Ok(selector::find_first(self, &selectors))
	}

	/// Every match for `selector` among this element's descendants, in
	/// document order, materialized as a concrete list.
	pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>> {
		let selectors = selector::parse(selector)?;
		let mut matches = Vec::new();
		selector::collect(self, &selectors, &mut matches);
		Ok(matches)
	}

	/// The concatenated text content of this subtree.
	pub fn text_content(&self) -> Option<String> {
		Some(self.collect_text())
	}

	fn collect_text(&self) -> String {
		let inner = self.inner.borrow();
		let mut out = String::new();
		if let Some(text) = &inner.text {
			out.push_str(text);
		}
		for child in &inner.children {
			out.push_str(&child.collect_text());
		}
		out
	}

	/// Replaces all children with the given text.
	pub fn set_text_content(&self, text: &str) {
		let children = std::mem::take(&mut self.inner.borrow_mut().children);
		for child in &children {
			child.inner.borrow_mut().parent = None;
		}
		self.inner.borrow_mut().text = Some(text.to_string());
	}
}

/// RAII registration handle returned by [`Element::add_event_listener`].
///
/// Dropping the handle detaches the listener; [`EventHandle::forget`] keeps
/// it registered for the node's lifetime.
pub struct EventHandle {
	node: Weak<RefCell<NodeInner>>,
	id: u64,
	detach_on_drop: bool,
}

impl EventHandle {
	/// Keeps the listener registered for the node's lifetime.
	pub fn forget(mut self) {
		self.detach_on_drop = false;
	}
}

impl Drop for EventHandle {
	fn drop(&mut self) {
		if self.detach_on_drop {
			if let Some(inner) = self.node.upgrade() {
				inner.borrow_mut().listeners.retain(|listener| listener.id != self.id);
			}
		}
	}
}

impl std::fmt::Debug for EventHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventHandle").field("id", &self.id).finish()
	}
}

struct DocumentInner {
	root: Element,
	body: Element,
}

/// A handle onto an in-memory document.
///
/// [`Document::global`] returns a thread-local instance, so parallel test
/// threads see isolated documents; [`Document::new`] creates a fully isolated
/// tree.
#[derive(Clone)]
pub struct Document {
	inner: Rc<DocumentInner>,
}

thread_local! {
	static GLOBAL_DOCUMENT: Document = Document::new();
}

impl Document {
	/// Creates a fresh document with `html`, `head`, and `body` elements.
	pub fn new() -> Self {
		let root = Element::new_detached("html");
		let head = Element::new_detached("head");
		let body = Element::new_detached("body");
		for child in [&head, &body] {
			child.inner.borrow_mut().parent = Some(Rc::downgrade(&root.inner));
			root.inner.borrow_mut().children.push(child.clone());
		}
		Document {
			inner: Rc::new(DocumentInner { root, body }),
		}
	}

	/// Returns this thread's global document.
	pub fn global() -> Self {
		GLOBAL_DOCUMENT.with(Clone::clone)
	}

	/// Creates a detached element of the given tag.
	pub fn create_element(&self, tag: &str) -> Result<Element> {
		validate_tag(tag)?;
		Ok(Element::new_detached(tag))
	}

	/// The document's `body` element.
	pub fn body(&self) -> Option<Element> {
		Some(self.inner.body.clone())
	}

	/// The document's root element.
	pub fn document_element(&self) -> Option<Element> {
		Some(self.inner.root.clone())
	}

	/// First match for `selector` in the whole document.
	pub fn query_selector(&self, selector: &str) -> Result<Option<Element>> {
		let selectors = selector::parse(selector)?;
		let root = &self.inner.root;
		if selectors.matches(root) {
			return Ok(Some(root.clone()));
		}
		Ok(selector::find_first(root, &selectors))
	}

	/// Every match for `selector` in the whole document, in document order.
	pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>> {
		let selectors = selector::parse(selector)?;
		let root = &self.inner.root;
		let mut matches = Vec::new();
		if selectors.matches(root) {
			matches.push(root.clone());
		}
		selector::collect(root, &selectors, &mut matches);
		Ok(matches)
	}
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Document {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Document").finish_non_exhaustive()
	}
}

fn validate_tag(tag: &str) -> Result<()> {
	let mut chars = tag.chars();
	let valid = match chars.next() {
		Some(first) if first.is_ascii_alphabetic() => {
			chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
		}
		_ => false,
	};
	if valid {
		Ok(())
	} else {
		Err(DomError::InvalidTag {
			tag: tag.to_string(),
			reason: "tag names must start with an ASCII letter and contain only letters, digits, `-` or `_`"
				.to_string(),
		})
	}
}

fn validate_attribute_name(name: &str) -> Result<()> {
	if name.is_empty() || name.chars().any(|c| c.is_whitespace() || "\"'>/=".contains(c)) {
		return Err(DomError::InvalidAttribute {
			name: name.to_string(),
			reason: "attribute names must be non-empty and free of whitespace, quotes, `>`, `/`, and `=`"
				.to_string(),
		});
	}
	Ok(())
}

fn validate_class_token(token: &str) -> Result<()> {
	if token.is_empty() {
		return Err(DomError::InvalidClassToken {
			token: token.to_string(),
			reason: "class tokens must not be empty".to_string(),
		});
	}
	if token.chars().any(char::is_whitespace) {
		return Err(DomError::InvalidClassToken {
			token: token.to_string(),
			reason: "class tokens must not contain whitespace".to_string(),
		});
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::Cell;

	#[test]
	fn test_create_element_normalizes_tag_case() {
		let doc = Document::new();
		let element = doc.create_element("DIV").unwrap();
		assert_eq!(element.tag_name(), "div");
	}

	#[test]
	fn test_create_element_rejects_bad_tags() {
		let doc = Document::new();
		for tag in ["", "1div", "di v", "<div>"] {
			assert!(matches!(
				doc.create_element(tag),
				Err(DomError::InvalidTag { .. })
			));
		}
	}

	#[test]
	fn test_attribute_roundtrip_preserves_insertion_order() {
		let doc = Document::new();
		let element = doc.create_element("div").unwrap();
		element.set_attribute("b", "2").unwrap();
		element.set_attribute("a", "1").unwrap();
		element.set_attribute("b", "3").unwrap();
		assert_eq!(element.get_attribute("b").as_deref(), Some("3"));
		assert_eq!(element.get_attribute("a").as_deref(), Some("1"));
		// overwrite keeps the original position
		let debug = format!("{element:?}");
		assert!(debug.starts_with("<div b="), "{debug}");
	}

	#[test]
	fn test_attribute_name_validation() {
		let doc = Document::new();
		let element = doc.create_element("div").unwrap();
		assert!(matches!(
			element.set_attribute("", "x"),
			Err(DomError::InvalidAttribute { .. })
		));
		assert!(matches!(
			element.set_attribute("a b", "x"),
			Err(DomError::InvalidAttribute { .. })
		));
	}

	#[test]
	fn test_class_tokens() {
		let doc = Document::new();
		let element = doc.create_element("div").unwrap();
		element.add_class("alpha").unwrap();
		element.add_class("beta").unwrap();
		element.add_class("alpha").unwrap();
		assert_eq!(element.get_attribute("class").as_deref(), Some("alpha beta"));
		element.remove_class("alpha").unwrap();
		assert!(!element.has_class("alpha"));
		assert!(element.has_class("beta"));
		assert!(element.toggle_class("alpha").unwrap());
		assert!(!element.toggle_class("alpha").unwrap());
		assert!(matches!(
			element.add_class("two words"),
			Err(DomError::InvalidClassToken { .. })
		));
	}

	#[test]
	fn test_style_properties_follow_cssom() {
		let doc = Document::new();
		let element = doc.create_element("div").unwrap();
		element.set_style_property("color", "red").unwrap();
		assert_eq!(element.style_property("color").as_deref(), Some("red"));
		element.set_style_property("color", "").unwrap();
		assert_eq!(element.style_property("color"), None);
		element.set_style_property("", "red").unwrap();
		assert_eq!(element.style_property(""), None);
	}

	#[test]
	fn test_append_child_moves_between_parents() {
		let doc = Document::new();
		let first = doc.create_element("div").unwrap();
		let second = doc.create_element("div").unwrap();
		let child = doc.create_element("span").unwrap();
		first.append_child(&child).unwrap();
		assert_eq!(first.children().len(), 1);
		second.append_child(&child).unwrap();
		assert_eq!(first.children().len(), 0);
		assert_eq!(second.children().len(), 1);
		assert_eq!(child.parent(), Some(second));
	}

	#[test]
	fn test_insert_before_orders_children() {
		let doc = Document::new();
		let parent = doc.create_element("ul").unwrap();
		let first = doc.create_element("li").unwrap();
		let second = doc.create_element("li").unwrap();
		parent.append_child(&second).unwrap();
		parent.insert_before(&first, Some(&second)).unwrap();
		assert_eq!(parent.children(), vec![first, second]);
	}

	#[test]
	fn test_insert_before_rejects_foreign_reference() {
		let doc = Document::new();
		let parent = doc.create_element("div").unwrap();
		let stranger = doc.create_element("div").unwrap();
		let child = doc.create_element("span").unwrap();
		assert!(matches!(
			parent.insert_before(&child, Some(&stranger)),
			Err(DomError::Hierarchy(_))
		));
	}

	#[test]
	fn test_hierarchy_cycles_are_rejected() {
		let doc = Document::new();
		let outer = doc.create_element("div").unwrap();
		let inner = doc.create_element("div").unwrap();
		outer.append_child(&inner).unwrap();
		assert!(matches!(
			inner.append_child(&outer),
			Err(DomError::Hierarchy(_))
		));
		assert!(matches!(
			outer.append_child(&outer),
			Err(DomError::Hierarchy(_))
		));
	}

	#[test]
	fn test_dispatch_runs_listeners_in_registration_order() {
		let doc = Document::new();
		let element = doc.create_element("button").unwrap();
		let count = Rc::new(Cell::new(0));
		let first = {
			let count = Rc::clone(&count);
			element.add_event_listener("click", move |_| count.set(count.get() + 1))
		};
		let second = {
			let count = Rc::clone(&count);
			element.add_event_listener("click", move |_| count.set(count.get() + 10))
		};
		first.forget();
		second.forget();
		element.dispatch("click").unwrap();
		assert_eq!(count.get(), 11);
		element.dispatch("keydown").unwrap();
		assert_eq!(count.get(), 11);
	}

	#[test]
	fn test_dropped_handle_detaches_listener() {
		let doc = Document::new();
		let element = doc.create_element("button").unwrap();
		let count = Rc::new(Cell::new(0));
		{
			let count = Rc::clone(&count);
			let _handle = element.add_event_listener("click", move |_| count.set(count.get() + 1));
		}
		element.dispatch("click").unwrap();
		assert_eq!(count.get(), 0);
	}

	#[test]
	fn test_dispatch_event_carries_type_and_target() {
		let doc = Document::new();
		let element = doc.create_element("input").unwrap();
		let seen = Rc::new(RefCell::new(String::new()));
		{
			let seen = Rc::clone(&seen);
			element
				.add_event_listener("input", move |event: Event| {
					seen.borrow_mut().push_str(event.event_type());
					assert_eq!(event.target().unwrap().tag_name(), "input");
				})
				.forget();
		}
		element.dispatch("input").unwrap();
		assert_eq!(*seen.borrow(), "input");
		assert!(matches!(element.dispatch(""), Err(DomError::Event { .. })));
	}

	#[test]
	fn test_text_content_replaces_children() {
		let doc = Document::new();
		let parent = doc.create_element("p").unwrap();
		let child = doc.create_element("span").unwrap();
		child.set_text_content("inner");
		parent.append_child(&child).unwrap();
		assert_eq!(parent.text_content().as_deref(), Some("inner"));
		parent.set_text_content("replaced");
		assert_eq!(parent.text_content().as_deref(), Some("replaced"));
		assert!(parent.children().is_empty());
		assert_eq!(child.parent(), None);
	}

	#[test]
	fn test_global_document_has_body() {
		let doc = Document::global();
		let body = doc.body().unwrap();
		assert_eq!(body.tag_name(), "body");
		assert_eq!(body.parent().unwrap().tag_name(), "html");
	}
}
