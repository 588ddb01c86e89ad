//! DOM abstraction layer.
//!
//! One API, two backends. On `wasm32` the types in this module are thin
//! wrappers over `web-sys` and every operation is the browser's own. On
//! native targets the same API is served by an in-memory element tree so the
//! crate stays usable and testable server-side; that backend implements the
//! host primitives itself, including a deliberately small selector engine
//! (compound selectors of tag / `#id` / `.class` / `[attr]` / `[attr=value]`,
//! descendant and child combinators, and comma-separated lists).
//!
//! Handles are cheap to clone and compare by node identity: two handles are
//! equal exactly when they refer to the same element.
//!
//! Tag names are reported lowercase on both backends, matching what HTML
//! element creation normalizes to.

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(not(target_arch = "wasm32"))]
mod selector;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::{Document, Element, Event, EventHandle, EventHandler};
#[cfg(target_arch = "wasm32")]
pub use web::{Document, Element, Event, EventHandle, EventHandler};

/// Returns the global document.
///
/// Shorthand for [`Document::global`].
pub fn document() -> Document {
	Document::global()
}
