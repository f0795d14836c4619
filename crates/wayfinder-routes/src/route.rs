//! Route definitions and prepared routes.
//!
//! A [`RouteDefinition`] is assembled with builder methods and then turned
//! into a [`Route`] by [`RouteDefinition::prepare`]. Only prepared routes can
//! match or render, so a half-configured route is never used.

use crate::error::Result;
use crate::matcher::PathMatcher;
use crate::pattern::Pattern;
use crate::Params;
use http::Method;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Score returned by [`Route::match_reverse`] when a route cannot render the
/// given parameters.
pub const NO_MATCH: i32 = -1;

/// A route under construction.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use wayfinder_routes::RouteDefinition;
///
/// let route = RouteDefinition::new("/instructor/lectures/:id/:action")
///     .unwrap()
///     .with_name("lecture")
///     .with_static_param("controller", "instructorLecture")
///     .with_static_param("action", "show")
///     .prepare()
///     .unwrap();
///
/// let params = route.match_forward("/instructor/lectures/1", &Method::GET).unwrap();
/// assert_eq!(params.get("action"), Some(&"show".to_string()));
/// assert_eq!(params.get("id"), Some(&"1".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct RouteDefinition {
	name: Option<String>,
	pattern: Pattern,
	static_params: Params,
	default_static_params: Params,
	value_patterns: HashMap<String, String>,
	allowed_methods: Option<HashSet<Method>>,
	excluded_methods: Option<HashSet<Method>>,
}

impl RouteDefinition {
	/// Start a definition from a template string.
	///
	/// # Errors
	///
	/// Fails when the template does not compile.
	pub fn new(template: &str) -> Result<Self> {
		Ok(Self::from_pattern(Pattern::parse(template)?))
	}

	/// Start a definition from an already compiled pattern.
	pub fn from_pattern(pattern: Pattern) -> Self {
		Self {
			name: None,
			pattern,
			static_params: Params::new(),
			default_static_params: Params::new(),
			value_patterns: HashMap::new(),
			allowed_methods: None,
			excluded_methods: None,
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_pattern(mut self, pattern: Pattern) -> Self {
		self.pattern = pattern;
		self
	}

	/// Add a value the route always supplies when matched.
	///
	/// A pattern parameter with a static value becomes optional.
	pub fn with_static_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.static_params.insert(name.into(), value.into());
		self
	}

	pub fn with_static_params<I, K, V>(mut self, params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.static_params
			.extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
		self
	}

	/// Add a default that a caller may omit during reverse matching.
	pub fn with_default_static_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.default_static_params.insert(name.into(), value.into());
		self
	}

	pub fn with_default_static_params<I, K, V>(mut self, params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.default_static_params
			.extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
		self
	}

	/// Restrict the values a parameter accepts with a regular expression.
	///
	/// The expression is validated by [`prepare`](Self::prepare).
	pub fn with_value_pattern(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
		self.value_patterns.insert(name.into(), pattern.into());
		self
	}

	pub fn with_value_patterns<I, K, V>(mut self, patterns: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.value_patterns
			.extend(patterns.into_iter().map(|(k, v)| (k.into(), v.into())));
		self
	}

	/// Accept only these methods. An empty set accepts every method.
	pub fn with_methods<I>(mut self, methods: I) -> Self
	where
		I: IntoIterator<Item = Method>,
	{
		self.allowed_methods = non_empty(methods);
		self
	}

	/// Reject these methods. An empty set rejects nothing.
	pub fn with_excluded_methods<I>(mut self, methods: I) -> Self
	where
		I: IntoIterator<Item = Method>,
	{
		self.excluded_methods = non_empty(methods);
		self
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn pattern(&self) -> &Pattern {
		&self.pattern
	}

	pub fn static_params(&self) -> &Params {
		&self.static_params
	}

	pub fn default_static_params(&self) -> &Params {
		&self.default_static_params
	}

	pub fn value_patterns(&self) -> &HashMap<String, String> {
		&self.value_patterns
	}

	pub fn allowed_methods(&self) -> Option<&HashSet<Method>> {
		self.allowed_methods.as_ref()
	}

	pub fn excluded_methods(&self) -> Option<&HashSet<Method>> {
		self.excluded_methods.as_ref()
	}

	/// Return a copy with the parameters in `fixed` turned into literals.
	///
	/// A fixed value equal to the route's static (or, failing that, default)
	/// value stays optional at the end of paths. The fixed values are added
	/// to the static parameters.
	pub fn apply_with(&self, fixed: &Params) -> Self {
		let mut reference = self.default_static_params.clone();
		reference.extend(
			self.static_params
				.iter()
				.map(|(k, v)| (k.clone(), v.clone())),
		);

		let mut static_params = self.static_params.clone();
		static_params.extend(fixed.iter().map(|(k, v)| (k.clone(), v.clone())));

		Self {
			pattern: self.pattern.apply(fixed, &reference),
			static_params,
			..self.clone()
		}
	}

	/// Finalise the pattern and derive the lookup sets used for matching.
	///
	/// # Errors
	///
	/// Fails when a value pattern or the synthesized matcher does not
	/// compile.
	pub fn prepare(&self) -> Result<Route> {
		let optional = self
			.static_params
			.keys()
			.chain(self.default_static_params.keys());
		let pattern = self
			.pattern
			.with_optional(optional)
			.with_value_patterns(&self.value_patterns)?;
		pattern.matcher()?;

		let names = pattern.parameter_names();
		let required_path_param_names = names
			.iter()
			.filter(|name| {
				!self.static_params.contains_key(*name) && !self.default_static_params.contains_key(*name)
			})
			.cloned()
			.collect();

		let mut required_static_params = Params::new();
		let mut optional_static_params = Params::new();
		for (name, value) in &self.static_params {
			if names.contains(name) {
				continue;
			}
			if self.default_static_params.get(name) == Some(value) {
				optional_static_params.insert(name.clone(), value.clone());
			} else {
				required_static_params.insert(name.clone(), value.clone());
			}
		}

		Ok(Route {
			definition: self.clone(),
			pattern,
			required_path_param_names,
			required_static_params,
			optional_static_params,
		})
	}
}

fn non_empty<I>(methods: I) -> Option<HashSet<Method>>
where
	I: IntoIterator<Item = Method>,
{
	let set: HashSet<Method> = methods.into_iter().collect();
	(!set.is_empty()).then_some(set)
}

/// A prepared route, ready for forward and reverse matching.
#[derive(Debug, Clone)]
pub struct Route {
	definition: RouteDefinition,
	pattern: Pattern,
	required_path_param_names: Vec<String>,
	required_static_params: Params,
	optional_static_params: Params,
}

impl Route {
	/// Match a request path and method.
	///
	/// The result holds the default values, overridden by the static values,
	/// overridden by the values captured from the path.
	pub fn match_forward(&self, path: &str, method: &Method) -> Option<Params> {
		if !self.accepts_method(method) {
			tracing::trace!(
				template = %self.pattern,
				method = %method,
				"route rejected method"
			);
			return None;
		}

		let matched = self.pattern.matcher().ok()?.matches(path)?;
		let mut params = self.definition.default_static_params.clone();
		params.extend(
			self.definition
				.static_params
				.iter()
				.map(|(k, v)| (k.clone(), v.clone())),
		);
		params.extend(matched);
		Some(params)
	}

	/// Whether the method passes both the allowed and the excluded sets.
	pub fn accepts_method(&self, method: &Method) -> bool {
		let allowed = self
			.definition
			.allowed_methods
			.as_ref()
			.is_none_or(|methods| methods.contains(method));
		let excluded = self
			.definition
			.excluded_methods
			.as_ref()
			.is_some_and(|methods| methods.contains(method));
		allowed && !excluded
	}

	/// Score how specifically this route fits the given parameters.
	///
	/// Returns [`NO_MATCH`] if a required path parameter has no value, a
	/// required static value is missing or different, or a supplied
	/// optional static value differs. Otherwise returns the number of
	/// required path parameters plus the number of matched static values.
	///
	/// # Examples
	///
	/// ```
	/// use std::collections::HashMap;
	/// use wayfinder_routes::RouteDefinition;
	///
	/// let route = RouteDefinition::new("/lecture")
	///     .unwrap()
	///     .with_static_param("controller", "lecture")
	///     .with_static_param("action", "index")
	///     .with_default_static_param("action", "index")
	///     .prepare()
	///     .unwrap();
	///
	/// let params = HashMap::from([("controller".to_string(), "lecture".to_string())]);
	/// assert_eq!(route.match_reverse(&params, &HashMap::new()), 1);
	/// ```
	pub fn match_reverse(&self, params: &Params, context: &Params) -> i32 {
		let lookup = |name: &str| params.get(name).or_else(|| context.get(name));

		if self
			.required_path_param_names
			.iter()
			.any(|name| lookup(name).is_none())
		{
			return NO_MATCH;
		}
		let mut score = self.required_path_param_names.len() as i32;

		for (name, expected) in &self.required_static_params {
			if lookup(name) != Some(expected) {
				return NO_MATCH;
			}
			score += 1;
		}

		for (name, expected) in &self.optional_static_params {
			match lookup(name) {
				Some(value) if value != expected => return NO_MATCH,
				Some(_) => score += 1,
				None => {}
			}
		}

		score
	}

	/// Render a path for this route. See [`crate::builder::build_path`].
	pub fn build_path(&self, params: &Params, context: &Params) -> Result<String> {
		self.pattern
			.build_path(params, &self.definition.static_params, context)
	}

	/// Prepare a new route with the parameters in `fixed` turned into
	/// literals. This route is left unchanged.
	pub fn apply_with(&self, fixed: &Params) -> Result<Route> {
		self.definition.apply_with(fixed).prepare()
	}

	pub fn definition(&self) -> &RouteDefinition {
		&self.definition
	}

	pub fn name(&self) -> Option<&str> {
		self.definition.name()
	}

	/// The finalised pattern.
	pub fn pattern(&self) -> &Pattern {
		&self.pattern
	}

	/// The compiled matcher, already built by preparation.
	pub fn matcher(&self) -> Result<&PathMatcher> {
		self.pattern.matcher()
	}

	pub fn parameter_names(&self) -> &BTreeSet<String> {
		self.pattern.parameter_names()
	}

	pub fn display_template(&self) -> String {
		self.pattern.display_template()
	}

	pub fn static_params(&self) -> &Params {
		&self.definition.static_params
	}

	pub fn default_static_params(&self) -> &Params {
		&self.definition.default_static_params
	}

	pub fn allowed_methods(&self) -> Option<&HashSet<Method>> {
		self.definition.allowed_methods()
	}

	pub fn excluded_methods(&self) -> Option<&HashSet<Method>> {
		self.definition.excluded_methods()
	}

	/// Parameters that must be supplied for reverse matching.
	pub fn required_path_param_names(&self) -> &[String] {
		&self.required_path_param_names
	}

	pub fn required_static_params(&self) -> &Params {
		&self.required_static_params
	}

	pub fn optional_static_params(&self) -> &Params {
		&self.optional_static_params
	}
}
