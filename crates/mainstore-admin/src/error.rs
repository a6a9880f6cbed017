//! Admin error types

use crate::settings::SettingsError;

/// Admin panel error types
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
	/// Model not registered with admin
	#[error("Model '{0}' is not registered with admin")]
	ModelNotRegistered(String),

	/// Invalid action
	#[error("Invalid action: {0}")]
	InvalidAction(String),

	/// Query parameter no list filter owns
	#[error("Unknown filter parameter '{parameter}'. Allowed parameters: {allowed:?}")]
	UnknownFilter {
		parameter: String,
		allowed: Vec<String>,
	},

	/// Requested page outside the result set
	#[error("Invalid page {page}: result has {total_pages} page(s)")]
	InvalidPage { page: usize, total_pages: usize },

	/// Model admin configuration that cannot work
	#[error("Improperly configured: {0}")]
	ImproperlyConfigured(String),

	#[error("Query string error: {0}")]
	QueryString(String),

	#[error("Settings error: {0}")]
	Settings(#[from] SettingsError),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl From<serde_urlencoded::de::Error> for AdminError {
	fn from(err: serde_urlencoded::de::Error) -> Self {
		AdminError::QueryString(err.to_string())
	}
}

impl From<serde_urlencoded::ser::Error> for AdminError {
	fn from(err: serde_urlencoded::ser::Error) -> Self {
		AdminError::QueryString(err.to_string())
	}
}

pub type AdminResult<T> = Result<T, AdminError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_admin_error_display() {
		let err = AdminError::ModelNotRegistered("Coupon".to_string());
		assert_eq!(err.to_string(), "Model 'Coupon' is not registered with admin");

		let err = AdminError::InvalidPage {
			page: 4,
			total_pages: 2,
		};
		assert_eq!(err.to_string(), "Invalid page 4: result has 2 page(s)");

		let err = AdminError::UnknownFilter {
			parameter: "colour".to_string(),
			allowed: vec!["price_range".to_string()],
		};
		assert_eq!(
			err.to_string(),
			"Unknown filter parameter 'colour'. Allowed parameters: [\"price_range\"]"
		);
	}
}
