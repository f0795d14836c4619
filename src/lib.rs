//! # Wayfinder
//!
//! Named URL routes that work in both directions.
//!
//! Requests are matched forward against an ordered table to recover their
//! parameters; links are generated in reverse, either from a route name or
//! from whichever route best fits a set of parameters.
//!
//! ## Quick Example
//!
//! ```
//! use std::collections::HashMap;
//! use wayfinder::prelude::*;
//!
//! let table = RouteGroup::new()
//!     .route("/", |route| route.with_name("home").with_static_param("controller", "home"))
//!     .resources(ResourceRoutes::new("lectures").with_controller("lecture"))
//!     .build(&RouterSettings::default())
//!     .unwrap();
//!
//! let matched = table.match_forward(&Method::GET, "/lectures/12").unwrap();
//! assert_eq!(matched.get_param("action"), Some("show"));
//!
//! // Links rendered while handling this request inherit its controller.
//! let context = table.context_parameters(&matched);
//! let params = HashMap::from([
//!     ("id".to_string(), "12".to_string()),
//!     ("action".to_string(), "edit".to_string()),
//! ]);
//! assert_eq!(table.build_path_by_match(&params, &context).unwrap(), "/lectures/12/edit");
//! ```

pub use wayfinder_routes as routes;

pub use wayfinder_routes::{
	Params, PathMatcher, Pattern, ResourceRoutes, Result, Route, RouteDefinition, RouteError,
	RouteGroup, RouteMatch, RouteTable, RouteTableBuilder, RouterSettings, Segment,
};

/// Common imports for building and querying route tables.
pub mod prelude {
	pub use crate::{
		Params, ResourceRoutes, Route, RouteDefinition, RouteError, RouteGroup, RouteMatch,
		RouteTable, RouterSettings,
	};

	// External
	pub use http::Method;
}
