//! REST resource expansion.
//!
//! A resource named `lectures` expands into six routes:
//!
//! | Name               | Method | Template                 | Action    |
//! |--------------------|--------|--------------------------|-----------|
//! | `lectures.index`   | GET    | `/lectures/index`        | `index`   |
//! | `lectures.create`  | POST   | `/lectures`              | `create`  |
//! | `lectures.show`    | GET    | `/lectures/${id}/show`   | `show`    |
//! | `lectures.edit`    | GET    | `/lectures/${id}/edit`   | `edit`    |
//! | `lectures.update`  | PUT    | `/lectures/${id}`        | `update`  |
//! | `lectures.destroy` | DELETE | `/lectures/${id}`        | `destroy` |
//!
//! The action literal comes from fixing `:action` in the collection
//! (`:action`) and member (`:id/:action`) patterns appended to the base path.
//! `index` and `show` are optional literals, so
//! `/lectures` and `/lectures/7` reach them and they render without the
//! action.

use crate::error::Result;
use crate::group::Scope;
use crate::pattern::Pattern;
use crate::route::RouteDefinition;
use crate::settings::ResourceSettings;
use crate::Params;
use http::Method;

pub const INDEX_ACTION: &str = "index";
pub const CREATE_ACTION: &str = "create";
pub const SHOW_ACTION: &str = "show";
pub const EDIT_ACTION: &str = "edit";
pub const UPDATE_ACTION: &str = "update";
pub const DESTROY_ACTION: &str = "destroy";

/// A REST resource to expand into action routes.
///
/// # Examples
///
/// ```
/// use wayfinder_routes::{ResourceRoutes, ResourceSettings};
///
/// let definitions = ResourceRoutes::new("lectures")
///     .with_controller("lecture")
///     .definitions(&ResourceSettings::default())
///     .unwrap();
///
/// let names: Vec<_> = definitions.iter().filter_map(|d| d.name()).collect();
/// assert_eq!(
///     names,
///     vec![
///         "lectures.index",
///         "lectures.create",
///         "lectures.show",
///         "lectures.edit",
///         "lectures.update",
///         "lectures.destroy",
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ResourceRoutes {
	name: String,
	path: Option<String>,
	controller: Option<String>,
	collection_pattern: Option<String>,
	member_pattern: Option<String>,
}

impl ResourceRoutes {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			path: None,
			controller: None,
			collection_pattern: None,
			member_pattern: None,
		}
	}

	/// Base path of the resource. Defaults to `/{name}`.
	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	/// Controller value supplied by every route. Defaults to the name.
	pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
		self.controller = Some(controller.into());
		self
	}

	/// Template appended to the base path for collection actions.
	/// Defaults to `:action`.
	pub fn with_collection_pattern(mut self, pattern: impl Into<String>) -> Self {
		self.collection_pattern = Some(pattern.into());
		self
	}

	/// Template appended to the base path for member actions.
	/// Defaults to `:id/:action`.
	pub fn with_member_pattern(mut self, pattern: impl Into<String>) -> Self {
		self.member_pattern = Some(pattern.into());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Expand into route definitions outside of any group.
	///
	/// # Errors
	///
	/// Fails when a template does not compile or the collection or member
	/// pattern repeats a parameter of the base path.
	pub fn definitions(&self, settings: &ResourceSettings) -> Result<Vec<RouteDefinition>> {
		self.expand(&Scope::default(), settings)
	}

	pub(crate) fn expand(&self, scope: &Scope, settings: &ResourceSettings) -> Result<Vec<RouteDefinition>> {
		let action = settings.action_parameter.as_str();
		let id = settings.id_parameter.as_str();
		let controller = self.controller.as_deref().unwrap_or(&self.name);

		let path = match &self.path {
			Some(path) => path.clone(),
			None => format!("/{}", self.name),
		};
		let base = Pattern::parse(&format!(
			"{}{}",
			scope.path_prefix,
			path.trim_end_matches('/')
		))?;

		let collection_pattern = match &self.collection_pattern {
			Some(pattern) => pattern.clone(),
			None => format!(":{action}"),
		};
		let member_pattern = match &self.member_pattern {
			Some(pattern) => pattern.clone(),
			None => format!(":{id}/:{action}"),
		};

		let collection = base
			.append_static("/")
			.append(&Pattern::parse(&collection_pattern)?)?;
		let member = base
			.append_static("/")
			.append(&Pattern::parse(&member_pattern)?)?;
		let member_base = base.append_static("/").append_parameter(id, false)?;

		let resource = |pattern: Pattern, default_action: &str| {
			scope
				.definition(pattern)
				.with_static_param(settings.controller_parameter.as_str(), controller)
				.with_static_param(action, default_action)
				.with_default_static_param(action, default_action)
		};
		let fixed = |value: &str| Params::from([(action.to_string(), value.to_string())]);
		let named = |definition: RouteDefinition, value: &str| {
			definition.with_name(scope.qualified_name(&format!("{}.{value}", self.name)))
		};

		let index = resource(collection, INDEX_ACTION).with_methods([Method::GET]);
		let show_edit = resource(member, SHOW_ACTION).with_methods([Method::GET]);

		Ok(vec![
			named(index.apply_with(&fixed(INDEX_ACTION)), INDEX_ACTION),
			named(
				resource(base, INDEX_ACTION)
					.with_static_param(action, CREATE_ACTION)
					.with_methods([Method::POST]),
				CREATE_ACTION,
			),
			named(show_edit.apply_with(&fixed(SHOW_ACTION)), SHOW_ACTION),
			named(show_edit.apply_with(&fixed(EDIT_ACTION)), EDIT_ACTION),
			named(
				resource(member_base.clone(), SHOW_ACTION)
					.with_static_param(action, UPDATE_ACTION)
					.with_methods([Method::PUT]),
				UPDATE_ACTION,
			),
			named(
				resource(member_base, SHOW_ACTION)
					.with_static_param(action, DESTROY_ACTION)
					.with_methods([Method::DELETE]),
				DESTROY_ACTION,
			),
		])
	}
}
