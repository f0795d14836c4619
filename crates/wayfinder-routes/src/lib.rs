//! # Wayfinder Routes
//!
//! Named URL routes that work in both directions: match an incoming method
//! and path to recover parameters, or pick the best route for a set of
//! parameters and render its path.
//!
//! ## Templates
//!
//! - `:name` matches one path segment (no `/`)
//! - `*name` matches the rest of a path, slashes included
//! - everything else is literal text; a trailing `/` may be omitted
//!
//! Parameters with a static or default value become optional and may be
//! left off the end of a path.
//!
//! ## Example
//!
//! ```
//! use http::Method;
//! use std::collections::HashMap;
//! use wayfinder_routes::{RouteDefinition, RouteTable, RouterSettings};
//!
//! let table = RouteTable::from_definitions(
//!     vec![
//!         RouteDefinition::new("/instructor/lectures/:id/:action")
//!             .unwrap()
//!             .with_name("lecture")
//!             .with_static_param("controller", "instructorLecture")
//!             .with_static_param("action", "show"),
//!     ],
//!     &RouterSettings::default(),
//! )
//! .unwrap();
//!
//! let matched = table.match_forward(&Method::GET, "/instructor/lectures/1/edit").unwrap();
//! assert_eq!(matched.get_param("action"), Some("edit"));
//!
//! let params = HashMap::from([("id".to_string(), "1".to_string())]);
//! let path = table.build_path_by_match(&params, &table.context_parameters(&matched)).unwrap();
//! assert_eq!(path, "/instructor/lectures/1/");
//! ```

pub mod builder;
pub mod compiler;
pub mod error;
pub mod group;
pub mod matcher;
pub mod pattern;
pub mod resources;
pub mod route;
pub mod segment;
pub mod settings;
pub mod table;

pub use error::{Result, RouteError};
pub use group::{RouteGroup, RouteTableBuilder};
pub use matcher::PathMatcher;
pub use pattern::Pattern;
pub use resources::ResourceRoutes;
pub use route::{Route, RouteDefinition, NO_MATCH};
pub use segment::Segment;
pub use settings::{ResourceSettings, RouterSettings, SettingsError};
pub use table::{RouteMatch, RouteTable};

/// Parameter name to value.
pub type Params = std::collections::HashMap<String, String>;
