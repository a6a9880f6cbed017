//! List display columns and changelist links
//!
//! A list column either shows a field of the row or a derived value computed
//! by the store. Count columns can link to the changelist of the related
//! model, pre-filtered on the current row.

use crate::error::AdminResult;
use crate::settings::AdminSettings;
use mainstore_panel::{FieldAccess, FieldValue};

/// Escape HTML special characters
///
/// # Examples
///
/// ```
/// use mainstore_admin::display::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom's\"</b>"), "&lt;b&gt;&quot;Tom&#x27;s&quot;&lt;/b&gt;");
/// ```
pub fn escape_html(input: &str) -> String {
	input
		.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

/// Render an anchor tag with escaped href and text
pub fn format_html_link(url: &str, text: &str) -> String {
	format!("<a href=\"{}\">{}</a>", escape_html(url), escape_html(text))
}

/// URL of a model's changelist with the given query parameters
///
/// # Examples
///
/// ```
/// use mainstore_admin::AdminSettings;
/// use mainstore_admin::display::changelist_url;
///
/// let params = [("collection__id", "3")];
/// let url = changelist_url(&AdminSettings::default(), "product", &params).unwrap();
/// assert_eq!(url, "/admin/mainstore/product/?collection__id=3");
/// ```
pub fn changelist_url(
	settings: &AdminSettings,
	model_name: &str,
	params: &[(&str, &str)],
) -> AdminResult<String> {
	let base = format!(
		"{}{}/{}/",
		settings.url_prefix, settings.app_label, model_name
	);
	if params.is_empty() {
		return Ok(base);
	}
	let query = serde_urlencoded::to_string(params)?;
	Ok(format!("{}?{}", base, query))
}

/// Link from a row to the changelist of a related model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelistLink {
	/// Model whose changelist is linked
	pub model_name: String,
	/// Query parameter receiving the row's primary key
	pub parameter: String,
}

impl ChangelistLink {
	pub fn new(model_name: impl Into<String>, parameter: impl Into<String>) -> Self {
		Self {
			model_name: model_name.into(),
			parameter: parameter.into(),
		}
	}
}

/// A column of a list view
///
/// # Examples
///
/// ```
/// use mainstore_admin::display::DisplayColumn;
///
/// let column = DisplayColumn::new("orders", "order_count").with_ordering("order_count");
/// assert_eq!(column.ordering_field(), Some("order_count"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayColumn {
	name: String,
	source: String,
	ordering: Option<String>,
	link: Option<ChangelistLink>,
}

impl DisplayColumn {
	/// Column `name` showing the row's `source` field
	pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			source: source.into(),
			ordering: None,
			link: None,
		}
	}

	/// Column showing the field of the same name, sortable by it
	pub fn field(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			source: name.clone(),
			ordering: Some(name.clone()),
			name,
			link: None,
		}
	}

	pub fn with_ordering(mut self, field: impl Into<String>) -> Self {
		self.ordering = Some(field.into());
		self
	}

	pub fn with_link(mut self, link: ChangelistLink) -> Self {
		self.link = Some(link);
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn source(&self) -> &str {
		&self.source
	}

	/// Field the column sorts by; `None` means the column is not sortable
	pub fn ordering_field(&self) -> Option<&str> {
		self.ordering.as_deref()
	}

	pub fn link(&self) -> Option<&ChangelistLink> {
		self.link.as_ref()
	}

	/// Value shown for `row`
	///
	/// Linked columns render an anchor to the related changelist filtered on
	/// the row's primary key, with the source value as text.
	pub fn render(
		&self,
		row: &dyn FieldAccess,
		settings: &AdminSettings,
	) -> AdminResult<FieldValue> {
		let value = row.field_value(&self.source);
		let Some(link) = &self.link else {
			return Ok(value);
		};
		let pk = row.field_value("id").to_string();
		let params = [(link.parameter.as_str(), pk.as_str())];
		let url = changelist_url(settings, &link.model_name, &params)?;
		Ok(FieldValue::Text(format_html_link(&url, &value.to_string())))
	}
}
