//! Reverse rendering of patterns into concrete paths.

use crate::error::{Result, RouteError};
use crate::pattern::Pattern;
use crate::segment::Segment;
use crate::Params;

/// Accumulates rendered text and remembers where the last piece that must
/// appear ends. Anything past that point is an optional tail.
#[derive(Debug, Default)]
struct PathBuilder {
	path: String,
	required_len: usize,
}

impl PathBuilder {
	fn push(&mut self, text: &str, required: bool) {
		self.path.push_str(text);
		if required {
			self.required_len = self.path.len();
		}
	}

	fn finish(mut self) -> String {
		self.path.truncate(self.required_len);
		self.path
	}
}

/// Render `pattern` into a path.
///
/// Each parameter resolves its value from `explicit`, then `statics`, then
/// `context`. A parameter whose value equals its static value, and any
/// optional literal, may be left off the end of the result.
///
/// # Errors
///
/// Returns [`RouteError::MissingParameterValue`] when no source has a value
/// for a parameter.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use wayfinder_routes::{builder, Pattern};
///
/// let pattern = Pattern::parse("/lectures/:id/:action")
///     .unwrap()
///     .with_optional(["action"]);
/// let explicit = HashMap::from([("id".to_string(), "1".to_string())]);
/// let statics = HashMap::from([("action".to_string(), "show".to_string())]);
///
/// let path = builder::build_path(&pattern, &explicit, &statics, &HashMap::new()).unwrap();
/// assert_eq!(path, "/lectures/1/");
/// ```
pub fn build_path(pattern: &Pattern, explicit: &Params, statics: &Params, context: &Params) -> Result<String> {
	let mut builder = PathBuilder::default();

	for segment in pattern.segments() {
		match segment {
			Segment::Static { text, required } => builder.push(text, *required),
			Segment::Parameter { name, required, .. } => {
				let value = explicit
					.get(name)
					.or_else(|| statics.get(name))
					.or_else(|| context.get(name))
					.ok_or_else(|| RouteError::MissingParameterValue { name: name.clone() })?;
				let differs = statics.get(name) != Some(value);
				builder.push(value, *required || differs);
			}
		}
	}

	Ok(builder.finish())
}
