//! Literal-or-computed value resolution for attributes, styles, and classes.
//!
//! Anywhere the builder or the chaining operations accept a value, the caller
//! may pass a literal or a computation over the target element. Computed
//! values are invoked with the element they are about to be assigned to, so a
//! value can depend on the node's own identity at assignment time (e.g.
//! deriving an `id` from a freshly created element).

use std::borrow::Cow;

use crate::dom::Element;

/// An attribute or style value: a literal string, or a computation that
/// receives the target element and produces the string to assign.
///
/// Conversions exist for string and numeric literals, so call sites stay
/// terse:
///
/// ```ignore
/// builder.attr("id", "sidebar")
/// builder.attr("tabindex", 3)
/// builder.attr("data-tag", Value::computed(|el| el.tag_name()))
/// ```
pub enum Value {
	/// A plain string value, assigned as-is
	Literal(Cow<'static, str>),
	/// A computation invoked with the target element at assignment time
	Computed(Box<dyn Fn(&Element) -> String + 'static>),
}

impl Value {
	/// Creates a computed value from a closure over the target element.
	pub fn computed<F, S>(f: F) -> Self
	where
		F: Fn(&Element) -> S + 'static,
		S: Into<String>,
	{
		Value::Computed(Box::new(move |element| f(element).into()))
	}

	/// Resolves this value against the element it is being assigned to.
	pub fn resolve(&self, target: &Element) -> String {
		match self {
			Value::Literal(literal) => literal.clone().into_owned(),
			Value::Computed(compute) => compute(target),
		}
	}
}

impl std::fmt::Debug for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
			Value::Computed(_) => f.debug_tuple("Computed").field(&"<function>").finish(),
		}
	}
}

impl From<&'static str> for Value {
	fn from(value: &'static str) -> Self {
		Value::Literal(Cow::Borrowed(value))
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Literal(Cow::Owned(value))
	}
}

impl From<Cow<'static, str>> for Value {
	fn from(value: Cow<'static, str>) -> Self {
		Value::Literal(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Literal(Cow::Borrowed(if value { "true" } else { "false" }))
	}
}

/// Numeric literals stringify the way `ToString` renders them
macro_rules! value_from_numeric {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Value::Literal(Cow::Owned(value.to_string()))
				}
			}
		)*
	};
}

value_from_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// A class-membership value for the class setter.
///
/// The setter contract: computed values are resolved first; `Toggle` flips
/// membership, `Set(true)` adds the class, `Set(false)` removes it. The
/// string token `"toggle"` is reserved vocabulary of this contract and
/// converts to [`ClassValue::Toggle`]; any other string converts by
/// non-emptiness.
pub enum ClassValue {
	/// Add the class when `true`, remove it when `false`
	Set(bool),
	/// Flip the current membership
	Toggle,
	/// A computation invoked with the target element, resolved before the
	/// toggle/set decision is made
	Computed(Box<dyn Fn(&Element) -> ClassValue + 'static>),
}

/// A fully resolved class decision (no computation left)
pub(crate) enum ClassEffect {
	/// Add (`true`) or remove (`false`) the class
	Set(bool),
	/// Flip the current membership
	Toggle,
}

impl ClassValue {
	/// Creates a computed class value from a closure over the target element.
	pub fn computed<F, C>(f: F) -> Self
	where
		F: Fn(&Element) -> C + 'static,
		C: Into<ClassValue>,
	{
		ClassValue::Computed(Box::new(move |element| f(element).into()))
	}

	/// Resolves computations against the target element until a concrete
	/// toggle/set decision remains.
	pub(crate) fn resolve(&self, target: &Element) -> ClassEffect {
		match self {
			ClassValue::Set(present) => ClassEffect::Set(*present),
			ClassValue::Toggle => ClassEffect::Toggle,
			ClassValue::Computed(compute) => {
				let mut current = compute(target);
				loop {
					match current {
						ClassValue::Set(present) => return ClassEffect::Set(present),
						ClassValue::Toggle => return ClassEffect::Toggle,
						ClassValue::Computed(compute) => current = compute(target),
					}
				}
			}
		}
	}
}

impl std::fmt::Debug for ClassValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ClassValue::Set(present) => f.debug_tuple("Set").field(present).finish(),
			ClassValue::Toggle => f.write_str("Toggle"),
			ClassValue::Computed(_) => f.debug_tuple("Computed").field(&"<function>").finish(),
		}
	}
}

impl From<bool> for ClassValue {
	fn from(value: bool) -> Self {
		ClassValue::Set(value)
	}
}

impl From<&str> for ClassValue {
	fn from(value: &str) -> Self {
		if value == "toggle" {
			ClassValue::Toggle
		} else {
			ClassValue::Set(!value.is_empty())
		}
	}
}

impl From<String> for ClassValue {
	fn from(value: String) -> Self {
		ClassValue::from(value.as_str())
	}
}
