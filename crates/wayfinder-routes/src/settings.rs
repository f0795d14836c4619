//! Router configuration.
//!
//! Settings are plain serde structures, usually loaded from a TOML file:
//!
//! ```toml
//! context_parameter_names = ["controller", "locale"]
//!
//! [resources]
//! action_parameter = "action"
//! id_parameter = "id"
//! controller_parameter = "controller"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors raised while loading settings.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Top-level router settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterSettings {
	/// Matched parameters carried over as context when rendering links
	/// during the same request.
	#[serde(default = "default_context_parameter_names")]
	pub context_parameter_names: Vec<String>,

	/// Parameter names used when expanding resources.
	#[serde(default)]
	pub resources: ResourceSettings,
}

impl RouterSettings {
	/// Parse settings from a TOML document. Missing keys take their
	/// defaults.
	///
	/// # Examples
	///
	/// ```
	/// use wayfinder_routes::RouterSettings;
	///
	/// let settings = RouterSettings::from_toml_str(r#"context_parameter_names = ["controller", "locale"]"#).unwrap();
	/// assert_eq!(settings.context_parameter_names, vec!["controller", "locale"]);
	/// assert_eq!(settings.resources.id_parameter, "id");
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	/// Read and parse a TOML settings file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path)?;
		let settings = Self::from_toml_str(&content)?;
		tracing::debug!(path = %path.display(), "loaded router settings");
		Ok(settings)
	}
}

impl Default for RouterSettings {
	fn default() -> Self {
		Self {
			context_parameter_names: default_context_parameter_names(),
			resources: ResourceSettings::default(),
		}
	}
}

/// Parameter names used by resource expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSettings {
	#[serde(default = "default_action_parameter")]
	pub action_parameter: String,

	#[serde(default = "default_id_parameter")]
	pub id_parameter: String,

	#[serde(default = "default_controller_parameter")]
	pub controller_parameter: String,
}

impl Default for ResourceSettings {
	fn default() -> Self {
		Self {
			action_parameter: default_action_parameter(),
			id_parameter: default_id_parameter(),
			controller_parameter: default_controller_parameter(),
		}
	}
}

fn default_context_parameter_names() -> Vec<String> {
	vec![default_controller_parameter()]
}

fn default_action_parameter() -> String {
	"action".to_string()
}

fn default_id_parameter() -> String {
	"id".to_string()
}

fn default_controller_parameter() -> String {
	"controller".to_string()
}
