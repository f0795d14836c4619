//! Regular-expression synthesis and parameter extraction.

use crate::error::{Result, RouteError};
use crate::pattern::Pattern;
use crate::segment::Segment;
use crate::Params;
use regex::{Regex, RegexBuilder};
use std::fmt::Write as _;

/// Upper bound for the compiled program of one matcher.
const MAX_MATCHER_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Value expression for `:name` parameters.
pub const VALUE_WITHOUT_SLASHES: &str = "[^/]+";

/// Value expression for `*name` parameters.
pub const VALUE_WITH_SLASHES: &str = ".+";

/// The anchored expression synthesized from a [`Pattern`], with the mapping
/// from capture groups back to parameter names.
///
/// # Examples
///
/// ```
/// use wayfinder_routes::{PathMatcher, Pattern};
///
/// let pattern = Pattern::parse("/users/:id").unwrap();
/// let matcher = PathMatcher::compile(&pattern).unwrap();
/// assert_eq!(matcher.as_str(), "^/users(?:/|$)(?P<__p0>[^/]+)$");
/// assert!(matcher.is_match("/users/42"));
/// ```
#[derive(Debug, Clone)]
pub struct PathMatcher {
	regex: Regex,
	/// `(group name, parameter name)` in pattern order.
	groups: Vec<(String, String)>,
}

impl PathMatcher {
	/// Synthesize and compile the matcher for a pattern.
	///
	/// # Errors
	///
	/// Returns [`RouteError::MatcherCompilation`] if the synthesized
	/// expression is rejected, for example because a custom value pattern
	/// exceeds the size limit.
	pub fn compile(pattern: &Pattern) -> Result<Self> {
		let mut expr = String::from("^");
		let mut groups = Vec::new();

		for segment in pattern.segments() {
			match segment {
				Segment::Static { text, required } => {
					let literal = escape_literal(text);
					if *required {
						expr.push_str(&literal);
					} else {
						let _ = write!(expr, "(?:{literal}|$)");
					}
				}
				Segment::Parameter {
					name,
					required,
					allow_slashes,
					value_pattern,
				} => {
					let group = format!("__p{}", groups.len());
					let body = match value_pattern {
						Some(custom) => format!("(?:{custom})"),
						None if *allow_slashes => VALUE_WITH_SLASHES.to_string(),
						None => VALUE_WITHOUT_SLASHES.to_string(),
					};
					if *required {
						let _ = write!(expr, "(?P<{group}>{body})");
					} else {
						let _ = write!(expr, "(?P<{group}>{body}|$)");
					}
					groups.push((group, name.clone()));
				}
			}
		}
		expr.push('$');

		let regex = RegexBuilder::new(&expr)
			.size_limit(MAX_MATCHER_REGEX_SIZE)
			.build()
			.map_err(|source| RouteError::MatcherCompilation {
				template: pattern.display_template(),
				source,
			})?;

		Ok(Self { regex, groups })
	}

	/// Match a path, returning the non-empty captured parameters.
	pub fn matches(&self, path: &str) -> Option<Params> {
		let captures = self.regex.captures(path)?;
		let params = self
			.groups
			.iter()
			.filter_map(|(group, name)| {
				captures
					.name(group)
					.map(|m| m.as_str())
					.filter(|value| !value.is_empty())
					.map(|value| (name.clone(), value.to_string()))
			})
			.collect();
		Some(params)
	}

	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// The synthesized expression.
	pub fn as_str(&self) -> &str {
		self.regex.as_str()
	}
}

/// Escape literal text; a trailing `/` may also be absent.
fn escape_literal(text: &str) -> String {
	match text.strip_suffix('/') {
		Some(head) => format!("{}(?:/|$)", regex::escape(head)),
		None => regex::escape(text),
	}
}
