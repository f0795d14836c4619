//! Compiled path templates.
//!
//! A [`Pattern`] is the immutable compiled form of a template string. Every
//! transforming operation (`append`, `with_optional`, `apply`, ...) returns a
//! new, independent pattern; nothing is shared or mutated in place.

use crate::builder;
use crate::compiler;
use crate::error::{Result, RouteError};
use crate::matcher::PathMatcher;
use crate::segment::Segment;
use crate::Params;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::OnceLock;

/// An ordered list of segments compiled from a template.
///
/// The matching expression is derived lazily on first use and memoised for
/// the lifetime of the pattern.
///
/// # Examples
///
/// ```
/// use wayfinder_routes::Pattern;
///
/// let pattern = Pattern::parse("/users/:id/*rest").unwrap();
/// assert_eq!(pattern.display_template(), "/users/${id}/${rest}");
///
/// let params = pattern.match_path("/users/7/a/b").unwrap().unwrap();
/// assert_eq!(params.get("id"), Some(&"7".to_string()));
/// assert_eq!(params.get("rest"), Some(&"a/b".to_string()));
/// ```
#[derive(Clone)]
pub struct Pattern {
	segments: Vec<Segment>,
	parameter_names: BTreeSet<String>,
	matcher: OnceLock<PathMatcher>,
}

impl Pattern {
	/// Compile a template string. See [`compiler::parse`].
	pub fn parse(template: &str) -> Result<Self> {
		compiler::parse(template)
	}

	/// Build a pattern from segments whose parameter names are known to be
	/// unique.
	pub(crate) fn from_parts(segments: Vec<Segment>, parameter_names: BTreeSet<String>) -> Self {
		Self {
			segments,
			parameter_names,
			matcher: OnceLock::new(),
		}
	}

	fn from_segments(segments: Vec<Segment>) -> Self {
		let parameter_names = segments
			.iter()
			.filter_map(|segment| segment.parameter_name().map(str::to_string))
			.collect();
		Self::from_parts(segments, parameter_names)
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Names of all parameters in this pattern.
	pub fn parameter_names(&self) -> &BTreeSet<String> {
		&self.parameter_names
	}

	/// Render the template with parameters shown as `${name}` placeholders.
	///
	/// # Examples
	///
	/// ```
	/// use wayfinder_routes::Pattern;
	///
	/// let pattern = Pattern::parse("/lectures/:id/:action").unwrap();
	/// assert_eq!(pattern.display_template(), "/lectures/${id}/${action}");
	/// ```
	pub fn display_template(&self) -> String {
		let mut out = String::new();
		for segment in &self.segments {
			segment.write_template(&mut out);
		}
		out
	}

	/// Return a new pattern with `other` appended.
	///
	/// Adjacent required literals at the seam are merged into one segment.
	///
	/// # Errors
	///
	/// Returns [`RouteError::DuplicateParameter`] if both patterns declare the
	/// same parameter name.
	///
	/// # Examples
	///
	/// ```
	/// use wayfinder_routes::Pattern;
	///
	/// let base = Pattern::parse("/lectures").unwrap();
	/// let member = base.append(&Pattern::parse("/:id").unwrap()).unwrap();
	/// assert_eq!(member.display_template(), "/lectures/${id}");
	/// assert_eq!(member.segments().len(), 2);
	/// ```
	pub fn append(&self, other: &Pattern) -> Result<Self> {
		if let Some(name) = self.parameter_names.intersection(&other.parameter_names).next() {
			return Err(RouteError::DuplicateParameter {
				template: format!("{}{}", self.display_template(), other.display_template()),
				name: name.clone(),
			});
		}

		let mut segments = self.segments.clone();
		for segment in &other.segments {
			push_merged(&mut segments, segment.clone());
		}
		Ok(Self::from_segments(segments))
	}

	/// Return a new pattern with a required literal appended.
	pub fn append_static(&self, text: &str) -> Self {
		let mut segments = self.segments.clone();
		push_merged(&mut segments, Segment::literal(text));
		Self::from_segments(segments)
	}

	/// Return a new pattern with a required parameter appended.
	///
	/// # Errors
	///
	/// Returns [`RouteError::DuplicateParameter`] if the name is already used.
	pub fn append_parameter(&self, name: &str, allow_slashes: bool) -> Result<Self> {
		self.append(&Self::from_segments(vec![Segment::parameter(
			name,
			allow_slashes,
		)]))
	}

	/// Return a new pattern in which the named parameters are optional.
	///
	/// Names that do not occur in the pattern are ignored.
	pub fn with_optional<I, S>(&self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let optional: BTreeSet<String> = names
			.into_iter()
			.map(|name| name.as_ref().to_string())
			.collect();

		let segments = self
			.segments
			.iter()
			.cloned()
			.map(|segment| match segment {
				Segment::Parameter {
					name,
					allow_slashes,
					value_pattern,
					..
				} if optional.contains(&name) => Segment::Parameter {
					name,
					required: false,
					allow_slashes,
					value_pattern,
				},
				other => other,
			})
			.collect();
		Self::from_parts(segments, self.parameter_names.clone())
	}

	/// Return a new pattern with custom value expressions attached to the
	/// named parameters.
	///
	/// # Errors
	///
	/// Returns [`RouteError::InvalidValuePattern`] if an expression does not
	/// compile.
	pub fn with_value_patterns(&self, patterns: &HashMap<String, String>) -> Result<Self> {
		let mut segments = Vec::with_capacity(self.segments.len());
		for segment in &self.segments {
			let custom = segment.parameter_name().and_then(|name| patterns.get(name));
			let segment = match (segment, custom) {
				(
					Segment::Parameter {
						name,
						required,
						allow_slashes,
						..
					},
					Some(expr),
				) => {
					regex::Regex::new(expr).map_err(|source| RouteError::InvalidValuePattern {
						name: name.clone(),
						source,
					})?;
					Segment::Parameter {
						name: name.clone(),
						required: *required,
						allow_slashes: *allow_slashes,
						value_pattern: Some(expr.clone()),
					}
				}
				(other, _) => other.clone(),
			};
			segments.push(segment);
		}
		Ok(Self::from_parts(segments, self.parameter_names.clone()))
	}

	/// Return a new pattern with the parameters in `fixed` replaced by
	/// literal text.
	///
	/// A substituted literal is required only when its value differs from
	/// the value in `reference`, so a value equal to its static/default value
	/// stays optional at the end of paths.
	///
	/// # Examples
	///
	/// ```
	/// use std::collections::HashMap;
	/// use wayfinder_routes::Pattern;
	///
	/// let pattern = Pattern::parse("before/:parameter").unwrap();
	/// let fixed = HashMap::from([("parameter".to_string(), "value".to_string())]);
	/// let applied = pattern.apply(&fixed, &HashMap::new());
	///
	/// assert!(applied.parameter_names().is_empty());
	/// assert!(applied.match_path("before/value").unwrap().is_some());
	/// assert!(applied.match_path("before/other").unwrap().is_none());
	/// ```
	pub fn apply(&self, fixed: &Params, reference: &Params) -> Self {
		let mut segments = Vec::with_capacity(self.segments.len());
		for segment in &self.segments {
			let segment = match segment {
				Segment::Parameter { name, .. } if fixed.contains_key(name) => {
					let value = &fixed[name];
					Segment::Static {
						text: value.clone(),
						required: reference.get(name) != Some(value),
					}
				}
				other => other.clone(),
			};
			segments.push(segment);
		}
		Self::from_segments(segments)
	}

	/// The compiled matcher, built on first access.
	///
	/// Concurrent first accesses may each compile; the first stored result
	/// wins and all callers observe the same matcher.
	pub fn matcher(&self) -> Result<&PathMatcher> {
		if let Some(matcher) = self.matcher.get() {
			return Ok(matcher);
		}
		let compiled = PathMatcher::compile(self)?;
		Ok(self.matcher.get_or_init(|| compiled))
	}

	/// Match a path against this pattern.
	///
	/// Returns `Ok(None)` when the path does not match. Parameters that
	/// matched the empty continuation are absent from the result.
	pub fn match_path(&self, path: &str) -> Result<Option<Params>> {
		Ok(self.matcher()?.matches(path))
	}

	/// Render a path. See [`builder::build_path`].
	pub fn build_path(&self, explicit: &Params, statics: &Params, context: &Params) -> Result<String> {
		builder::build_path(self, explicit, statics, context)
	}
}

/// Push a segment, merging it into a preceding required literal when both
/// are required literals. An empty literal is never kept alongside others.
fn push_merged(segments: &mut Vec<Segment>, segment: Segment) {
	if let Segment::Static { text, .. } = &segment
		&& text.is_empty()
		&& !segments.is_empty()
	{
		return;
	}
	if let (
		Some(Segment::Static {
			text: previous,
			required: true,
		}),
		Segment::Static {
			text,
			required: true,
		},
	) = (segments.last_mut(), &segment)
	{
		previous.push_str(text);
		return;
	}
	if matches!(segments.as_slice(), [Segment::Static { text, .. }] if text.is_empty()) {
		segments.clear();
	}
	segments.push(segment);
}

impl PartialEq for Pattern {
	fn eq(&self, other: &Self) -> bool {
		self.segments == other.segments
	}
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Pattern")
			.field("segments", &self.segments)
			.finish()
	}
}

impl fmt::Display for Pattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.display_template())
	}
}
