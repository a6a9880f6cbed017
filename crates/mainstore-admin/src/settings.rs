//! Admin site settings
//!
//! Settings come from a TOML document. Every key is optional and falls back
//! to the defaults below.
//!
//! ```toml
//! site_header = "Mainstore administration"
//! url_prefix = "/admin/"
//! app_label = "mainstore"
//! list_per_page = 100
//! max_page_size = 500
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for loading settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid setting: {0}")]
	Invalid(String),
}

/// Site-wide admin settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
	/// Header shown on every admin page
	pub site_header: String,
	/// Mount point of the admin, with leading and trailing slash
	pub url_prefix: String,
	/// Application label used in changelist URLs
	pub app_label: String,
	/// Page size for model admins that do not set their own
	pub list_per_page: usize,
	/// Upper bound on any page size
	pub max_page_size: usize,
}

impl Default for AdminSettings {
	fn default() -> Self {
		Self {
			site_header: "Mainstore administration".to_string(),
			url_prefix: "/admin/".to_string(),
			app_label: "mainstore".to_string(),
			list_per_page: 100,
			max_page_size: 500,
		}
	}
}

impl AdminSettings {
	/// Parse and validate settings from a TOML string
	///
	/// # Examples
	///
	/// ```
	/// use mainstore_admin::AdminSettings;
	///
	/// let settings = AdminSettings::from_toml_str("list_per_page = 25").unwrap();
	/// assert_eq!(settings.list_per_page, 25);
	/// assert_eq!(settings.url_prefix, "/admin/");
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: AdminSettings = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Load and validate settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let source = fs::read_to_string(path.as_ref())?;
		Self::from_toml_str(&source)
	}

	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.list_per_page == 0 {
			return Err(SettingsError::Invalid(
				"list_per_page must be greater than zero".to_string(),
			));
		}
		if self.max_page_size == 0 {
			return Err(SettingsError::Invalid(
				"max_page_size must be greater than zero".to_string(),
			));
		}
		if !self.url_prefix.starts_with('/') || !self.url_prefix.ends_with('/') {
			return Err(SettingsError::Invalid(format!(
				"url_prefix '{}' must start and end with '/'",
				self.url_prefix
			)));
		}
		Ok(())
	}
}
