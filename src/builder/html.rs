//! Helper functions for common HTML elements.
//!
//! Each helper returns a fresh [`ElementBuilder`] for its tag. Builders are
//! lazy, so these never touch the host document and never fail; errors, if
//! any, surface from `build()`.
//!
//! ```ignore
//! use domforge::prelude::*;
//!
//! let menu = ul()
//!     .attr("id", "menu")
//!     .child(li().text("Home").build()?)
//!     .child(li().text("About").build()?)
//!     .build()?;
//! ```

use super::ElementBuilder;

/// Macro for defining HTML element helper functions
macro_rules! define_element {
	($(#[$meta:meta])* $name:ident, $tag:literal) => {
		$(#[$meta])*
		pub fn $name() -> ElementBuilder {
			ElementBuilder::new($tag)
		}
	};
}

define_element!(
	/// Create a `<div>` element builder
	///
	/// ```ignore
	/// let container = div()
	///     .attr("class", "container")
	///     .child(p().text("Content").build()?)
	///     .build()?;
	/// ```
	div, "div"
);

define_element!(
	/// Create a `<span>` element builder
	span, "span"
);

define_element!(
	/// Create a `<p>` element builder (paragraph)
	p, "p"
);

define_element!(
	/// Create a `<button>` element builder
	///
	/// ```ignore
	/// let submit = button()
	///     .text("Save")
	///     .on("click", |_| { /* ... */ })
	///     .build()?;
	/// ```
	button, "button"
);

define_element!(
	/// Create an `<input>` element builder
	input, "input"
);

define_element!(
	/// Create a `<form>` element builder
	form, "form"
);

define_element!(
	/// Create an `<a>` element builder (anchor)
	a, "a"
);

define_element!(
	/// Create a `<ul>` element builder (unordered list)
	ul, "ul"
);

define_element!(
	/// Create an `<ol>` element builder (ordered list)
	ol, "ol"
);

define_element!(
	/// Create a `<li>` element builder (list item)
	li, "li"
);

define_element!(
	/// Create a `<label>` element builder
	label, "label"
);

define_element!(
	/// Create a `<select>` element builder
	select, "select"
);

define_element!(
	/// Create an `<option>` element builder
	option, "option"
);

define_element!(
	/// Create a `<textarea>` element builder
	textarea, "textarea"
);

define_element!(
	/// Create an `<img>` element builder
	img, "img"
);

define_element!(
	/// Create an `<h1>` element builder
	h1, "h1"
);

define_element!(
	/// Create an `<h2>` element builder
	h2, "h2"
);

define_element!(
	/// Create an `<h3>` element builder
	h3, "h3"
);

define_element!(
	/// Create a `<section>` element builder
	section, "section"
);
