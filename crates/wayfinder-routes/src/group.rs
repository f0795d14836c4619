//! Route groups
//!
//! Builds route tables in code. A group carries a path prefix, a name prefix
//! and parameters that every member route inherits; groups nest, and
//! resources expand into their REST action routes inside the group.

use crate::error::Result;
use crate::pattern::Pattern;
use crate::resources::ResourceRoutes;
use crate::route::RouteDefinition;
use crate::settings::{ResourceSettings, RouterSettings};
use crate::table::RouteTable;
use crate::Params;
use http::Method;
use std::collections::HashMap;
use std::fmt;

type Configure = Box<dyn FnOnce(RouteDefinition) -> RouteDefinition + Send>;

/// Settings a group passes down to its members.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
	pub(crate) path_prefix: String,
	pub(crate) name_prefix: String,
	static_params: Params,
	default_static_params: Params,
	value_patterns: HashMap<String, String>,
	methods: Vec<Method>,
	excluded_methods: Vec<Method>,
}

impl Scope {
	/// Combine with a nested scope. Prefixes concatenate, maps merge with the
	/// inner values winning, and non-empty inner method lists replace the
	/// outer ones.
	fn nest(&self, inner: &Scope) -> Scope {
		let merged = |outer: &HashMap<String, String>, inner: &HashMap<String, String>| {
			let mut map = outer.clone();
			map.extend(inner.iter().map(|(k, v)| (k.clone(), v.clone())));
			map
		};
		let pick = |outer: &Vec<Method>, inner: &Vec<Method>| {
			if inner.is_empty() { outer.clone() } else { inner.clone() }
		};

		Scope {
			path_prefix: format!("{}{}", self.path_prefix, inner.path_prefix),
			name_prefix: format!("{}{}", self.name_prefix, inner.name_prefix),
			static_params: merged(&self.static_params, &inner.static_params),
			default_static_params: merged(&self.default_static_params, &inner.default_static_params),
			value_patterns: merged(&self.value_patterns, &inner.value_patterns),
			methods: pick(&self.methods, &inner.methods),
			excluded_methods: pick(&self.excluded_methods, &inner.excluded_methods),
		}
	}

	/// A definition for `pattern` carrying the inherited settings.
	pub(crate) fn definition(&self, pattern: Pattern) -> RouteDefinition {
		RouteDefinition::from_pattern(pattern)
			.with_static_params(self.static_params.clone())
			.with_default_static_params(self.default_static_params.clone())
			.with_value_patterns(self.value_patterns.clone())
			.with_methods(self.methods.clone())
			.with_excluded_methods(self.excluded_methods.clone())
	}

	pub(crate) fn qualified_name(&self, name: &str) -> String {
		format!("{}{}", self.name_prefix, name)
	}
}

enum Entry {
	Route { template: String, configure: Configure },
	Group(RouteGroup),
	Resources(ResourceRoutes),
}

/// A set of routes sharing a prefix and inherited parameters.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use std::collections::HashMap;
/// use wayfinder_routes::{ResourceRoutes, RouteGroup, RouterSettings};
///
/// let table = RouteGroup::new()
///     .with_prefix("/admin")
///     .with_name_prefix("admin.")
///     .route("/dashboard", |route| {
///         route
///             .with_name("dashboard")
///             .with_static_param("controller", "dashboard")
///     })
///     .resources(ResourceRoutes::new("users"))
///     .build(&RouterSettings::default())
///     .unwrap();
///
/// let matched = table.match_forward(&Method::GET, "/admin/users/4/edit").unwrap();
/// assert_eq!(matched.route.name(), Some("admin.users.edit"));
/// assert_eq!(matched.get_param("id"), Some("4"));
///
/// let path = table
///     .build_path_by_name("admin.dashboard", &HashMap::new(), &HashMap::new())
///     .unwrap();
/// assert_eq!(path, "/admin/dashboard");
/// ```
#[derive(Default)]
pub struct RouteGroup {
	scope: Scope,
	entries: Vec<Entry>,
}

/// Entry point for assembling a whole table: a root group without a prefix.
pub type RouteTableBuilder = RouteGroup;

impl RouteGroup {
	pub fn new() -> Self {
		Self::default()
	}

	/// Prepend `prefix` to the template of every member route.
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.scope.path_prefix = prefix.into();
		self
	}

	/// Prepend `prefix` to the name of every named member route.
	pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.scope.name_prefix = prefix.into();
		self
	}

	pub fn with_static_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.scope.static_params.insert(name.into(), value.into());
		self
	}

	pub fn with_default_static_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.scope.default_static_params.insert(name.into(), value.into());
		self
	}

	pub fn with_value_pattern(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
		self.scope.value_patterns.insert(name.into(), pattern.into());
		self
	}

	pub fn with_methods<I>(mut self, methods: I) -> Self
	where
		I: IntoIterator<Item = Method>,
	{
		self.scope.methods = methods.into_iter().collect();
		self
	}

	pub fn with_excluded_methods<I>(mut self, methods: I) -> Self
	where
		I: IntoIterator<Item = Method>,
	{
		self.scope.excluded_methods = methods.into_iter().collect();
		self
	}

	/// Add a route. `configure` receives a definition that already carries
	/// the group's settings; values it sets override the inherited ones.
	pub fn route<F>(mut self, template: impl Into<String>, configure: F) -> Self
	where
		F: FnOnce(RouteDefinition) -> RouteDefinition + Send + 'static,
	{
		self.entries.push(Entry::Route {
			template: template.into(),
			configure: Box::new(configure),
		});
		self
	}

	/// Add a nested group.
	pub fn group(mut self, group: RouteGroup) -> Self {
		self.entries.push(Entry::Group(group));
		self
	}

	/// Add the REST action routes of a resource.
	pub fn resources(mut self, resources: ResourceRoutes) -> Self {
		self.entries.push(Entry::Resources(resources));
		self
	}

	/// Expand the group into definitions, in declaration order.
	///
	/// # Errors
	///
	/// Fails when a template does not compile or a resource pattern repeats a
	/// parameter name.
	pub fn into_definitions(self, settings: &ResourceSettings) -> Result<Vec<RouteDefinition>> {
		let mut definitions = Vec::new();
		self.collect(&Scope::default(), settings, &mut definitions)?;
		Ok(definitions)
	}

	/// Expand, prepare and assemble the table.
	pub fn build(self, settings: &RouterSettings) -> Result<RouteTable> {
		let definitions = self.into_definitions(&settings.resources)?;
		RouteTable::from_definitions(definitions, settings)
	}

	fn collect(self, parent: &Scope, settings: &ResourceSettings, out: &mut Vec<RouteDefinition>) -> Result<()> {
		let scope = parent.nest(&self.scope);

		for entry in self.entries {
			match entry {
				Entry::Route { template, configure } => {
					let pattern = Pattern::parse(&format!("{}{}", scope.path_prefix, template))?;
					let mut definition = configure(scope.definition(pattern));
					if let Some(name) = definition.name() {
						let name = scope.qualified_name(name);
						definition = definition.with_name(name);
					}
					out.push(definition);
				}
				Entry::Group(group) => group.collect(&scope, settings, out)?,
				Entry::Resources(resources) => out.extend(resources.expand(&scope, settings)?),
			}
		}
		Ok(())
	}
}

impl fmt::Debug for RouteGroup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteGroup")
			.field("scope", &self.scope)
			.field("entries", &self.entries.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::RouteError;
	use rstest::rstest;

	fn params(pairs: &[(&str, &str)]) -> Params {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[rstest]
	fn test_prefix_and_name_prefix() {
		let definitions = RouteGroup::new()
			.with_prefix("/api")
			.with_name_prefix("api.")
			.route("/users/:id", |r| r.with_name("user"))
			.route("/health", |r| r)
			.into_definitions(&ResourceSettings::default())
			.unwrap();

		assert_eq!(definitions.len(), 2);
		assert_eq!(definitions[0].name(), Some("api.user"));
		assert_eq!(definitions[0].pattern().display_template(), "/api/users/${id}");
		assert_eq!(definitions[1].name(), None);
	}

	#[rstest]
	fn test_nested_groups_inherit_and_override() {
		let definitions = RouteGroup::new()
			.with_prefix("/v1")
			.with_name_prefix("v1.")
			.with_static_param("controller", "outer")
			.with_static_param("format", "html")
			.with_methods([Method::GET])
			.group(
				RouteGroup::new()
					.with_prefix("/reports")
					.with_name_prefix("reports.")
					.with_static_param("controller", "reports")
					.route("/:year", |r| r.with_name("by_year").with_static_param("format", "csv")),
			)
			.into_definitions(&ResourceSettings::default())
			.unwrap();

		let definition = &definitions[0];
		assert_eq!(definition.name(), Some("v1.reports.by_year"));
		assert_eq!(definition.pattern().display_template(), "/v1/reports/${year}");
		assert_eq!(
			definition.static_params(),
			&params(&[("controller", "reports"), ("format", "csv")])
		);
		assert!(definition.allowed_methods().is_some_and(|m| m.contains(&Method::GET)));
	}

	#[rstest]
	fn test_inherited_value_pattern() {
		let table = RouteGroup::new()
			.with_value_pattern("id", r"\d+")
			.route("/items/:id", |r| r.with_name("item"))
			.build(&RouterSettings::default())
			.unwrap();

		assert!(table.match_forward(&Method::GET, "/items/12").is_some());
		assert!(table.match_forward(&Method::GET, "/items/abc").is_none());
	}

	#[rstest]
	fn test_invalid_template_surfaces_at_build() {
		let err = RouteGroup::new()
			.route("/users/:", |r| r)
			.build(&RouterSettings::default())
			.unwrap_err();
		assert!(matches!(err, RouteError::PatternSyntax { index: 7, .. }));
	}

	#[rstest]
	fn test_duplicate_names_across_groups() {
		let err = RouteGroup::new()
			.route("/a", |r| r.with_name("same"))
			.group(RouteGroup::new().route("/b", |r| r.with_name("same")))
			.build(&RouterSettings::default())
			.unwrap_err();
		assert!(matches!(err, RouteError::DuplicateRouteName(name) if name == "same"));
	}
}
