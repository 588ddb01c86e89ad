//! Error types for domforge

use thiserror::Error;

/// Error type for DOM construction, mutation, and query operations.
///
/// Every variant corresponds to a failure surfaced by the host tree; nothing
/// is retried and nothing is swallowed. Selector and hierarchy failures keep
/// the host's reason text so browser diagnostics survive the wrapper.
#[derive(Debug, Error)]
pub enum DomError {
	/// The host document rejected the tag name during element creation
	#[error("document rejected tag name `{tag}`: {reason}")]
	InvalidTag {
		/// The offending tag name
		tag: String,
		/// Why the host refused it
		reason: String,
	},

	/// The host rejected an attribute name
	#[error("invalid attribute name `{name}`: {reason}")]
	InvalidAttribute {
		/// The offending attribute name
		name: String,
		/// Why the host refused it
		reason: String,
	},

	/// The host rejected a class token (empty, or containing whitespace)
	#[error("invalid class token `{token}`: {reason}")]
	InvalidClassToken {
		/// The offending token
		token: String,
		/// Why the host refused it
		reason: String,
	},

	/// The host rejected an inline style assignment
	#[error("style property `{property}` rejected: {reason}")]
	InvalidStyle {
		/// The offending property name
		property: String,
		/// Why the host refused it
		reason: String,
	},

	/// The selector string failed to parse
	#[error("selector `{selector}` failed to parse: {reason}")]
	InvalidSelector {
		/// The selector as given by the caller
		selector: String,
		/// Why it was rejected
		reason: String,
	},

	/// A tree mutation would produce an invalid hierarchy
	/// (e.g. inserting an element into itself or into its own descendant)
	#[error("hierarchy request rejected: {0}")]
	Hierarchy(String),

	/// An event could not be created or dispatched
	#[error("event `{event_type}` rejected: {reason}")]
	Event {
		/// The event type name
		event_type: String,
		/// Why the host refused it
		reason: String,
	},
}

/// Result type for DOM operations
pub type Result<T> = std::result::Result<T, DomError>;
