//! Browser host backend (`wasm32`): thin wrappers over `web-sys`.
//!
//! Every operation delegates to the browser; selector matching, attribute
//! storage, and event dispatch are all the host's. Failures coming back over
//! the FFI boundary are translated into typed [`DomError`] variants carrying
//! the browser's reason text, never swallowed.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::error::{DomError, Result};
use crate::{error_log, warn_log};

/// The event value passed to listeners in the browser.
pub type Event = web_sys::Event;

/// Shared handler storage for registered listeners.
pub type EventHandler = std::rc::Rc<dyn Fn(Event) + 'static>;

fn js_reason(value: &wasm_bindgen::JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// A handle onto one browser DOM element.
///
/// Cloning is cheap and clones refer to the same node; equality is node
/// identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
	inner: web_sys::Element,
}

impl Element {
	/// Wraps a raw `web-sys` element.
	pub fn from_web_sys(inner: web_sys::Element) -> Self {
		Element { inner }
	}

	/// Borrows the underlying `web-sys` element.
	pub fn as_web_sys(&self) -> &web_sys::Element {
		&self.inner
	}

	/// Unwraps into the underlying `web-sys` element.
	pub fn into_web_sys(self) -> web_sys::Element {
		self.inner
	}

	/// The element's tag name, lowercase.
	pub fn tag_name(&self) -> String {
		self.inner.tag_name().to_ascii_lowercase()
	}

	/// Reads an attribute; `None` when the attribute is absent.
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.inner.get_attribute(name)
	}

	/// Sets a string attribute, overwriting any previous value.
	pub fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
		self.inner
			.set_attribute(name, value)
			.map_err(|e| DomError::InvalidAttribute {
				name: name.to_string(),
				reason: js_reason(&e),
			})
	}

	/// Removes an attribute; absent attributes are a no-op.
	pub fn remove_attribute(&self, name: &str) -> Result<()> {
		self.inner
			.remove_attribute(name)
			.map_err(|e| DomError::InvalidAttribute {
				name: name.to_string(),
				reason: js_reason(&e),
			})
	}

	/// Whether the `class` attribute contains the given token.
	pub fn has_class(&self, name: &str) -> bool {
		self.inner.class_list().contains(name)
	}

	/// Adds a class token; already-present tokens are a no-op.
	pub fn add_class(&self, name: &str) -> Result<()> {
		self.inner
			.class_list()
			.add_1(name)
			.map_err(|e| DomError::InvalidClassToken {
				token: name.to_string(),
				reason: js_reason(&e),
			})
	}

	/// Removes a class token; absent tokens are a no-op.
	pub fn remove_class(&self, name: &str) -> Result<()> {
		self.inner
			.class_list()
			.remove_1(name)
			.map_err(|e| DomError::InvalidClassToken {
				token: name.to_string(),
				reason: js_reason(&e),
			})
	}

	/// Flips class membership; returns whether the class is present afterwards.
	pub fn toggle_class(&self, name: &str) -> Result<bool> {
		self.inner
			.class_list()
			.toggle(name)
			.map_err(|e| DomError::InvalidClassToken {
				token: name.to_string(),
				reason: js_reason(&e),
			})
	}

	/// The inline style map, present only for HTML elements.
	fn style_declaration(&self) -> Option<web_sys::CssStyleDeclaration> {
		self.inner
			.dyn_ref::<web_sys::HtmlElement>()
			.map(|element| element.style())
	}

	/// Reads an inline style property; `None` when unset.
	pub fn style_property(&self, name: &str) -> Option<String> {
		let declaration = self.style_declaration()?;
		match declaration.get_property_value(name) {
			Ok(value) if !value.is_empty() => Some(value),
			_ => None,
		}
	}

	/// Assigns an inline style property. Following CSSOM semantics, an empty
	/// value removes the property.
	///
	/// Non-HTML elements (e.g. SVG) have no inline style map here; the
	/// assignment warns and leaves the node unchanged.
	pub fn set_style_property(&self, name: &str, value: &str) -> Result<()> {
		let Some(declaration) = self.style_declaration() else {
			warn_log!(
				"inline styles require an HTML element; <{}> has no style map",
				self.tag_name()
			);
			return Ok(());
		};
		if value.is_empty() {
			let _ = declaration.remove_property(name);
			return Ok(());
		}
		declaration
			.set_property(name, value)
			.map_err(|e| DomError::InvalidStyle {
				property: name.to_string(),
				reason: js_reason(&e),
			})
	}

	/// Removes an inline style property.
	pub fn remove_style_property(&self, name: &str) {
		if let Some(declaration) = self.style_declaration() {
			let _ = declaration.remove_property(name);
		}
	}

	/// Registers a listener for the given event type.
	///
	/// The returned [`EventHandle`] detaches the listener when dropped; call
	/// [`EventHandle::forget`] to keep the listener alive for good. Listeners
	/// are never de-duplicated: registering the same handler twice means two
	/// invocations per dispatch.
	pub fn add_event_listener<F>(&self, event_type: &str, handler: F) -> EventHandle
	where
		F: Fn(Event) + 'static,
	{
		let closure: Closure<dyn FnMut(web_sys::Event)> =
			Closure::new(move |event: web_sys::Event| handler(event));
		if let Err(e) = self
			.inner
			.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
		{
			error_log!(
				"failed to register `{}` listener: {}",
				event_type,
				js_reason(&e)
			);
		}
		EventHandle {
			target: self.inner.clone(),
			event_type: event_type.to_string(),
			closure: Some(closure),
		}
	}

	/// Creates and dispatches an event of the given type on this element.
	pub fn dispatch(&self, event_type: &str) -> Result<()> {
		let event = web_sys::Event::new(event_type).map_err(|e| DomError::Event {
			event_type: event_type.to_string(),
			reason: js_reason(&e),
		})?;
		self.inner
			.dispatch_event(&event)
			.map(|_| ())
			.map_err(|e| DomError::Event {
				event_type: event_type.to_string(),
				reason: js_reason(&e),
			})
	}

	/// Appends `child` as the last child, detaching it from any previous
	/// parent first (the browser's move semantics).
	pub fn append_child(&self, child: &Element) -> Result<()> {
		self.inner
			.append_child(&child.inner)
			.map(|_| ())
			.map_err(|e| DomError::Hierarchy(js_reason(&e)))
	}

	/// Inserts `new_child` before `reference`; with no reference this is an
	/// append.
	pub fn insert_before(&self, new_child: &Element, reference: Option<&Element>) -> Result<()> {
		let reference = reference.map(|r| -> &web_sys::Node { r.inner.as_ref() });
		self.inner
			.insert_before(&new_child.inner, reference)
			.map(|_| ())
			.map_err(|e| DomError::Hierarchy(js_reason(&e)))
	}

	/// The element's children, materialized as a list of handles.
	pub fn children(&self) -> Vec<Element> {
		let collection = self.inner.children();
		(0..collection.length())
			.filter_map(|index| collection.item(index))
			.map(Element::from_web_sys)
			.collect()
	}

	/// The first child element, if any.
	pub fn first_element_child(&self) -> Option<Element> {
		self.inner.first_element_child().map(Element::from_web_sys)
	}

	/// The last child element, if any.
	pub fn last_element_child(&self) -> Option<Element> {
		self.inner.last_element_child().map(Element::from_web_sys)
	}

	/// The parent element, if attached.
	pub fn parent(&self) -> Option<Element> {
		self.inner.parent_element().map(Element::from_web_sys)
	}

	/// First match for `selector` among this element's descendants.
	pub fn query_selector(&self, selector: &str) -> Result<Option<Element>> {
		self.inner
			.query_selector(selector)
			.map(|found| found.map(Element::from_web_sys))
			.map_err(|e| DomError::InvalidSelector {
				selector: selector.to_string(),
				reason: js_reason(&e),
			})
	}

	/// Every match for `selector` among this element's descendants, in
	/// document order, materialized as a concrete list.
	pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>> {
		let list = self
			.inner
			.query_selector_all(selector)
			.map_err(|e| DomError::InvalidSelector {
				selector: selector.to_string(),
				reason: js_reason(&e),
			})?;
		Ok((0..list.length())
			.filter_map(|index| list.item(index))
			.filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
			.map(Element::from_web_sys)
			.collect())
	}

	/// The concatenated text content of this subtree.
	pub fn text_content(&self) -> Option<String> {
		self.inner.text_content()
	}

	/// Replaces all children with the given text.
	pub fn set_text_content(&self, text: &str) {
		self.inner.set_text_content(Some(text));
	}
}

/// RAII registration handle returned by [`Element::add_event_listener`].
///
/// Dropping the handle detaches the listener; [`EventHandle::forget`] keeps
/// it registered permanently (the closure is leaked to the JS side, the usual
/// cost of a forever-listener).
pub struct EventHandle {
	target: web_sys::Element,
	event_type: String,
	closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl EventHandle {
	/// Keeps the listener registered permanently.
	pub fn forget(mut self) {
		if let Some(closure) = self.closure.take() {
			closure.forget();
		}
	}
}

impl Drop for EventHandle {
	fn drop(&mut self) {
		if let Some(closure) = self.closure.take() {
			let _ = self
				.target
				.remove_event_listener_with_callback(&self.event_type, closure.as_ref().unchecked_ref());
		}
	}
}

impl std::fmt::Debug for EventHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventHandle")
			.field("event_type", &self.event_type)
			.finish_non_exhaustive()
	}
}

/// A handle onto the browser document.
#[derive(Clone, Debug)]
pub struct Document {
	inner: web_sys::Document,
}

impl Document {
	/// Returns the browser's global document.
	///
	/// # Panics
	///
	/// Panics when no `window`/`document` globals exist: the code is not
	/// running in a browser, which is unrecoverable for this backend.
	pub fn global() -> Self {
		let window = web_sys::window().expect("no global `window`: not running in a browser");
		let inner = window
			.document()
			.expect("global `window` has no `document`");
		Document { inner }
	}

	/// Wraps a raw `web-sys` document.
	pub fn from_web_sys(inner: web_sys::Document) -> Self {
		Document { inner }
	}

	/// Borrows the underlying `web-sys` document.
	pub fn as_web_sys(&self) -> &web_sys::Document {
		&self.inner
	}

	/// Creates a detached element of the given tag.
	pub fn create_element(&self, tag: &str) -> Result<Element> {
		self.inner
			.create_element(tag)
			.map(Element::from_web_sys)
			.map_err(|e| DomError::InvalidTag {
				tag: tag.to_string(),
				reason: js_reason(&e),
			})
	}

	/// The document's `body` element.
	pub fn body(&self) -> Option<Element> {
		self.inner
			.body()
			.map(|body| Element::from_web_sys(body.into()))
	}

	/// The document's root element.
	pub fn document_element(&self) -> Option<Element> {
		self.inner.document_element().map(Element::from_web_sys)
	}

	/// First match for `selector` in the whole document.
	pub fn query_selector(&self, selector: &str) -> Result<Option<Element>> {
		self.inner
			.query_selector(selector)
			.map(|found| found.map(Element::from_web_sys))
			.map_err(|e| DomError::InvalidSelector {
				selector: selector.to_string(),
				reason: js_reason(&e),
			})
	}

	/// Every match for `selector` in the whole document, in document order.
	pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>> {
		let list = self
			.inner
			.query_selector_all(selector)
			.map_err(|e| DomError::InvalidSelector {
				selector: selector.to_string(),
				reason: js_reason(&e),
			})?;
		Ok((0..list.length())
			.filter_map(|index| list.item(index))
			.filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
			.map(Element::from_web_sys)
			.collect())
	}
}
