//! Error types for pattern compilation, route preparation and reverse
//! rendering.
//!
//! Forward matching never produces an error: a path that no route accepts is
//! reported as `None`.

use crate::settings::SettingsError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Errors raised while compiling templates, assembling tables or
/// generating paths.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
	/// A template contains a parameter marker without a valid name.
	#[error("Invalid pattern '{template}' at index {index}: {message}")]
	PatternSyntax {
		/// The offending template.
		template: String,
		/// Byte offset of the marker character.
		index: usize,
		/// What was expected at that position.
		message: String,
	},

	/// The same parameter name appears twice in one pattern.
	#[error("Duplicate parameter '{name}' in pattern '{template}'")]
	DuplicateParameter {
		/// The offending template.
		template: String,
		/// The repeated parameter name.
		name: String,
	},

	/// A custom value pattern failed to compile.
	#[error("Invalid value pattern for parameter '{name}': {source}")]
	InvalidValuePattern {
		/// Parameter the pattern was attached to.
		name: String,
		/// Underlying regex error.
		#[source]
		source: regex::Error,
	},

	/// The synthesized matching expression for a pattern failed to compile.
	#[error("Failed to compile matcher for '{template}': {source}")]
	MatcherCompilation {
		/// Display form of the pattern.
		template: String,
		/// Underlying regex error.
		#[source]
		source: regex::Error,
	},

	/// No value could be resolved for a parameter while rendering a path.
	#[error("No value for [{name}]")]
	MissingParameterValue {
		/// Name of the unresolved parameter.
		name: String,
	},

	/// Reverse lookup by name found nothing.
	#[error("No route named '{0}'")]
	NoSuchRoute(String),

	/// Reverse lookup by parameters found no route scoring above zero.
	#[error("No route matches the given parameters")]
	NoRouteMatchesParameters,

	/// Two routes in one table share a name.
	#[error("Duplicate route name '{0}'")]
	DuplicateRouteName(String),

	/// Settings could not be loaded.
	#[error("Settings error: {0}")]
	Settings(#[from] SettingsError),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_pattern_syntax_display() {
		let err = RouteError::PatternSyntax {
			template: "/users/:".to_string(),
			index: 7,
			message: "expecting name, found end of pattern".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"Invalid pattern '/users/:' at index 7: expecting name, found end of pattern"
		);
	}

	#[rstest]
	fn test_missing_parameter_display() {
		let err = RouteError::MissingParameterValue {
			name: "id".to_string(),
		};
		assert_eq!(err.to_string(), "No value for [id]");
	}

	#[rstest]
	fn test_lookup_errors_display() {
		assert_eq!(
			RouteError::NoSuchRoute("lectures.show".to_string()).to_string(),
			"No route named 'lectures.show'"
		);
		assert_eq!(
			RouteError::NoRouteMatchesParameters.to_string(),
			"No route matches the given parameters"
		);
	}
}
