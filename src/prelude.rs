//! Unified prelude for simplified imports.
//!
//! ```ignore
//! use domforge::prelude::*;
//!
//! let card = div().attr("class", "card").container(&document().body().unwrap()).build()?;
//! card.append(span().text("hello"))?;
//! ```

pub use crate::builder::ElementBuilder;
pub use crate::builder::html::*;
pub use crate::dom::{Document, Element, Event, EventHandle, document};
pub use crate::error::{DomError, Result};
pub use crate::ops::ElementExt;
pub use crate::query::{find_all, find_one};
pub use crate::value::{ClassValue, Value};
