//! Segment model for compiled path templates.
//!
//! A template such as `/users/:id/*rest` compiles to an ordered list of
//! segments: literal text and named parameters. Each of the three consumers
//! (regex synthesis, path building and display rendering) dispatches on the
//! variant with an exhaustive `match`.

/// One atomic piece of a compiled template.
///
/// # Examples
///
/// ```
/// use wayfinder_routes::Segment;
///
/// let seg = Segment::parameter("id", false);
/// assert_eq!(seg.parameter_name(), Some("id"));
/// assert!(seg.is_required());
///
/// let seg = Segment::literal("/users/");
/// assert_eq!(seg.parameter_name(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Literal text.
	///
	/// When `required` is false, this text and everything after it may be
	/// missing from the end of a path and is dropped from rendered output.
	Static {
		/// The literal text.
		text: String,
		/// Whether the text must appear.
		required: bool,
	},
	/// A named capture.
	Parameter {
		/// Parameter name, `[A-Za-z0-9_]+`.
		name: String,
		/// Whether a value must be present in the path.
		required: bool,
		/// Whether the value may itself contain `/`.
		allow_slashes: bool,
		/// Overrides the default value-matching expression.
		value_pattern: Option<String>,
	},
}

impl Segment {
	/// Create a required static segment.
	pub fn literal(text: impl Into<String>) -> Self {
		Self::Static {
			text: text.into(),
			required: true,
		}
	}

	/// Create a required parameter segment without a custom value pattern.
	pub fn parameter(name: impl Into<String>, allow_slashes: bool) -> Self {
		Self::Parameter {
			name: name.into(),
			required: true,
			allow_slashes,
			value_pattern: None,
		}
	}

	/// Name of the parameter, or `None` for static text.
	pub fn parameter_name(&self) -> Option<&str> {
		match self {
			Self::Static { .. } => None,
			Self::Parameter { name, .. } => Some(name),
		}
	}

	pub fn is_required(&self) -> bool {
		match self {
			Self::Static { required, .. } | Self::Parameter { required, .. } => *required,
		}
	}

	/// Append the `${name}` display form of this segment.
	pub(crate) fn write_template(&self, out: &mut String) {
		match self {
			Self::Static { text, .. } => out.push_str(text),
			Self::Parameter { name, .. } => {
				out.push_str("${");
				out.push_str(name);
				out.push('}');
			}
		}
	}
}

/// Returns true for characters allowed in parameter names: `[A-Za-z0-9_]`.
pub(crate) fn is_name_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}
