//! Ordered route tables.

use crate::error::{Result, RouteError};
use crate::route::{Route, RouteDefinition};
use crate::settings::RouterSettings;
use crate::Params;
use http::Method;
use std::collections::{BTreeMap, HashMap};

/// A successful forward match.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
	/// The route that accepted the request.
	pub route: &'a Route,
	/// Default, static and captured values, later sources winning.
	pub params: Params,
}

impl RouteMatch<'_> {
	pub fn get_param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}
}

/// An immutable, ordered collection of prepared routes with a name index.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use std::collections::HashMap;
/// use wayfinder_routes::{RouteDefinition, RouteTable, RouterSettings};
///
/// let table = RouteTable::from_definitions(
///     vec![
///         RouteDefinition::new("/users/:id").unwrap().with_name("user"),
///         RouteDefinition::new("/about").unwrap().with_name("about"),
///     ],
///     &RouterSettings::default(),
/// )
/// .unwrap();
///
/// let matched = table.match_forward(&Method::GET, "/users/7").unwrap();
/// assert_eq!(matched.route.name(), Some("user"));
/// assert_eq!(matched.get_param("id"), Some("7"));
///
/// let params = HashMap::from([("id".to_string(), "9".to_string())]);
/// let path = table.build_path_by_name("user", &params, &HashMap::new()).unwrap();
/// assert_eq!(path, "/users/9");
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable {
	routes: Vec<Route>,
	named: HashMap<String, usize>,
	context_parameter_names: Vec<String>,
}

impl RouteTable {
	/// Assemble a table from prepared routes with default settings.
	///
	/// # Errors
	///
	/// Returns [`RouteError::DuplicateRouteName`] if two routes share a name.
	pub fn new(routes: Vec<Route>) -> Result<Self> {
		Self::with_settings(routes, &RouterSettings::default())
	}

	pub fn with_settings(routes: Vec<Route>, settings: &RouterSettings) -> Result<Self> {
		let mut named = HashMap::new();
		for (index, route) in routes.iter().enumerate() {
			if let Some(name) = route.name()
				&& named.insert(name.to_string(), index).is_some()
			{
				return Err(RouteError::DuplicateRouteName(name.to_string()));
			}
		}

		tracing::debug!(
			routes = routes.len(),
			named = named.len(),
			"assembled route table"
		);

		Ok(Self {
			routes,
			named,
			context_parameter_names: settings.context_parameter_names.clone(),
		})
	}

	/// Prepare every definition and assemble the table.
	pub fn from_definitions(definitions: Vec<RouteDefinition>, settings: &RouterSettings) -> Result<Self> {
		let routes = definitions
			.iter()
			.map(RouteDefinition::prepare)
			.collect::<Result<Vec<_>>>()?;
		Self::with_settings(routes, settings)
	}

	/// Find the first route, in declaration order, that accepts the request.
	pub fn match_forward(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
		let found = self.routes.iter().find_map(|route| {
			route
				.match_forward(path, method)
				.map(|params| RouteMatch { route, params })
		});

		match &found {
			Some(matched) => tracing::debug!(
				route = matched.route.name().unwrap_or("<unnamed>"),
				template = %matched.route.pattern(),
				%method,
				path,
				"route matched"
			),
			None => tracing::debug!(%method, path, "no route matched"),
		}
		found
	}

	/// Find the route that most specifically fits the parameters.
	///
	/// Only a strictly higher score replaces the current best, so among
	/// equal scores the earliest route wins. A route must score above zero.
	pub fn match_reverse(&self, params: &Params, context: &Params) -> Option<&Route> {
		let mut best = None;
		let mut best_score = 0;

		for route in &self.routes {
			let score = route.match_reverse(params, context);
			tracing::trace!(template = %route.pattern(), score, "reverse candidate");
			if score > best_score {
				best_score = score;
				best = Some(route);
			}
		}

		if let Some(route) = best {
			tracing::debug!(
				route = route.name().unwrap_or("<unnamed>"),
				score = best_score,
				"reverse match selected"
			);
		}
		best
	}

	pub fn get_named_route(&self, name: &str) -> Option<&Route> {
		self.named.get(name).map(|&index| &self.routes[index])
	}

	/// Render a path for the named route.
	///
	/// # Errors
	///
	/// - [`RouteError::NoSuchRoute`] if no route has that name.
	/// - [`RouteError::MissingParameterValue`] if a value cannot be resolved.
	pub fn build_path_by_name(&self, name: &str, params: &Params, context: &Params) -> Result<String> {
		let result = self
			.get_named_route(name)
			.ok_or_else(|| RouteError::NoSuchRoute(name.to_string()))
			.and_then(|route| route.build_path(params, context));
		if let Err(err) = &result {
			tracing::warn!(route = name, error = %err, "failed to build path");
		}
		result
	}

	/// Render a path for the route that best fits the parameters.
	///
	/// # Errors
	///
	/// - [`RouteError::NoRouteMatchesParameters`] if no route scores above
	///   zero.
	/// - [`RouteError::MissingParameterValue`] if a value cannot be resolved.
	pub fn build_path_by_match(&self, params: &Params, context: &Params) -> Result<String> {
		let result = self
			.match_reverse(params, context)
			.ok_or(RouteError::NoRouteMatchesParameters)
			.and_then(|route| route.build_path(params, context));
		if let Err(err) = &result {
			tracing::warn!(error = %err, "failed to build path");
		}
		result
	}

	/// The matched values that should carry over as context when rendering
	/// links during the same request.
	///
	/// # Examples
	///
	/// ```
	/// use http::Method;
	/// use wayfinder_routes::{RouteDefinition, RouteTable, RouterSettings};
	///
	/// let table = RouteTable::from_definitions(
	///     vec![RouteDefinition::new("/lectures/:id")
	///         .unwrap()
	///         .with_static_param("controller", "lecture")],
	///     &RouterSettings::default(),
	/// )
	/// .unwrap();
	///
	/// let matched = table.match_forward(&Method::GET, "/lectures/3").unwrap();
	/// let context = table.context_parameters(&matched);
	/// assert_eq!(context.len(), 1);
	/// assert_eq!(context.get("controller"), Some(&"lecture".to_string()));
	/// ```
	pub fn context_parameters(&self, matched: &RouteMatch<'_>) -> Params {
		self.context_parameter_names
			.iter()
			.filter_map(|name| {
				matched
					.params
					.get(name)
					.map(|value| (name.clone(), value.clone()))
			})
			.collect()
	}

	/// Display templates of all named routes, keyed by name.
	pub fn named_templates(&self) -> BTreeMap<String, String> {
		self.named
			.iter()
			.map(|(name, &index)| (name.clone(), self.routes[index].display_template()))
			.collect()
	}

	pub fn context_parameter_names(&self) -> &[String] {
		&self.context_parameter_names
	}

	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::pattern::Pattern;
	use rstest::rstest;
	use std::sync::Arc;
	use std::thread;

	fn assert_send_sync<T: Send + Sync>() {}

	fn params(pairs: &[(&str, &str)]) -> Params {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	fn table(definitions: Vec<RouteDefinition>) -> RouteTable {
		RouteTable::from_definitions(definitions, &RouterSettings::default()).unwrap()
	}

	#[rstest]
	fn test_first_declared_route_wins_forward() {
		let table = table(vec![
			RouteDefinition::new("/users/new").unwrap().with_name("new"),
			RouteDefinition::new("/users/:id").unwrap().with_name("show"),
		]);
		let matched = table.match_forward(&Method::GET, "/users/new").unwrap();
		assert_eq!(matched.route.name(), Some("new"));
		let matched = table.match_forward(&Method::GET, "/users/5").unwrap();
		assert_eq!(matched.route.name(), Some("show"));
	}

	#[rstest]
	fn test_forward_miss() {
		let table = table(vec![RouteDefinition::new("/users").unwrap()]);
		assert!(table.match_forward(&Method::GET, "/posts").is_none());
	}

	#[rstest]
	fn test_duplicate_names_rejected() {
		let err = RouteTable::from_definitions(
			vec![
				RouteDefinition::new("/a").unwrap().with_name("dup"),
				RouteDefinition::new("/b").unwrap().with_name("dup"),
			],
			&RouterSettings::default(),
		)
		.unwrap_err();
		assert!(matches!(err, RouteError::DuplicateRouteName(name) if name == "dup"));
	}

	#[rstest]
	fn test_reverse_tie_keeps_earliest() {
		let table = table(vec![
			RouteDefinition::new("/first/:id").unwrap().with_name("first"),
			RouteDefinition::new("/second/:id").unwrap().with_name("second"),
		]);
		let route = table.match_reverse(&params(&[("id", "1")]), &Params::new()).unwrap();
		assert_eq!(route.name(), Some("first"));
	}

	#[rstest]
	fn test_reverse_prefers_higher_score() {
		let table = table(vec![
			RouteDefinition::new("/items/:id").unwrap().with_name("item"),
			RouteDefinition::new("/items/:id/:format").unwrap().with_name("formatted"),
		]);
		let path = table
			.build_path_by_match(&params(&[("id", "1"), ("format", "json")]), &Params::new())
			.unwrap();
		assert_eq!(path, "/items/1/json");
	}

	#[rstest]
	fn test_reverse_requires_positive_score() {
		let table = table(vec![RouteDefinition::new("/about").unwrap()]);
		assert!(table.match_reverse(&Params::new(), &Params::new()).is_none());
		let err = table.build_path_by_match(&Params::new(), &Params::new()).unwrap_err();
		assert!(matches!(err, RouteError::NoRouteMatchesParameters));
	}

	#[rstest]
	fn test_unknown_name() {
		let table = table(vec![RouteDefinition::new("/about").unwrap().with_name("about")]);
		let err = table
			.build_path_by_name("missing", &Params::new(), &Params::new())
			.unwrap_err();
		assert!(matches!(err, RouteError::NoSuchRoute(name) if name == "missing"));
	}

	#[rstest]
	fn test_named_templates_skip_unnamed() {
		let table = table(vec![
			RouteDefinition::new("/users/:id").unwrap().with_name("user"),
			RouteDefinition::new("/files/*path").unwrap(),
		]);
		let templates = table.named_templates();
		assert_eq!(templates.len(), 1);
		assert_eq!(templates["user"], "/users/${id}");
		assert_eq!(table.len(), 2);
		assert!(!table.is_empty());
	}

	#[rstest]
	fn test_context_parameters_follow_settings() {
		let settings = RouterSettings {
			context_parameter_names: vec!["controller".to_string(), "locale".to_string()],
			..RouterSettings::default()
		};
		let table = RouteTable::from_definitions(
			vec![
				RouteDefinition::new("/:locale/lectures/:id")
					.unwrap()
					.with_static_param("controller", "lecture"),
			],
			&settings,
		)
		.unwrap();

		let matched = table.match_forward(&Method::GET, "/fr/lectures/2").unwrap();
		assert_eq!(
			table.context_parameters(&matched),
			params(&[("controller", "lecture"), ("locale", "fr")])
		);
	}

	#[rstest]
	fn test_routing_types_are_send_sync() {
		assert_send_sync::<Pattern>();
		assert_send_sync::<Route>();
		assert_send_sync::<RouteTable>();
	}

	#[rstest]
	fn test_table_shared_across_threads() {
		let table = Arc::new(table(vec![
			RouteDefinition::new("/users/:id").unwrap().with_name("user"),
		]));

		thread::scope(|scope| {
			for id in 0..4 {
				let table = Arc::clone(&table);
				scope.spawn(move || {
					let path = format!("/users/{id}");
					let matched = table.match_forward(&Method::GET, &path).unwrap();
					assert_eq!(matched.get_param("id"), Some(id.to_string().as_str()));
				});
			}
		});
	}
}
