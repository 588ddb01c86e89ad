//! Domforge - Fluent DOM Construction and Queries
//!
//! A small convenience layer over the document tree: element lookup helpers
//! and a declarative element builder that assigns attributes, inline styles,
//! and event handlers in one call, then optionally attaches the result to a
//! container and/or a set of children. A chaining operation set is installed
//! on every element handle so construction, mutation, and querying compose
//! fluently.
//!
//! ## Features
//!
//! - **Lazy builders**: nothing touches the document until `build()`, so tag
//!   errors surface exactly there and computed values see the new node
//! - **Computed values**: any attribute, style, or class value may be a
//!   closure over the target element, resolved at assignment time
//! - **Chaining operations**: setters return the receiver; getters and
//!   setters are separate methods, so reads never mutate
//! - **Two backends**: `web-sys` in the browser, an in-memory element tree on
//!   native targets for server-side use and tests
//! - **Low-level only**: built on wasm-bindgen, web-sys, and js-sys (no
//!   framework dependencies)
//!
//! ## Architecture
//!
//! - [`dom`]: DOM abstraction layer ([`Document`], [`Element`], events)
//! - [`builder`]: element builder API and HTML tag helpers
//! - [`ops`]: chaining operations ([`ElementExt`])
//! - [`query`]: document-level lookup helpers
//! - [`value`]: literal-or-computed value resolution
//! - [`error`]: error taxonomy
//!
//! ## Example
//!
//! ```ignore
//! use domforge::prelude::*;
//!
//! let body = document().body().unwrap();
//! let card = div()
//!     .attr("class", "card")
//!     .style("padding", "1rem")
//!     .container(&body)
//!     .build()?;
//!
//! card.append(h2().text("Domforge"))?
//!     .append(p().text("Build, chain, query."))?
//!     .set_class("ready", true)?
//!     .on_click(|_| { /* ... */ });
//!
//! for item in find_all(".card p")? {
//!     item.set_style("margin", "0")?;
//! }
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod dom;
pub mod error;
pub mod logging;
pub mod ops;
pub mod prelude;
pub mod query;
pub mod value;

pub use builder::ElementBuilder;
pub use builder::html;
pub use dom::{Document, Element, Event, EventHandle, EventHandler, document};
pub use error::{DomError, Result};
pub use ops::ElementExt;
pub use query::{find_all, find_one};
pub use value::{ClassValue, Value};
