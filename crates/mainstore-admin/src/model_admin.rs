//! Model admin configuration
//!
//! This module defines how models are displayed and managed in the admin interface.

use crate::display::DisplayColumn;
use crate::error::{AdminError, AdminResult};
use crate::inline::InlineModelAdmin;
use mainstore_panel::{FilterManager, ListFilter};
use std::collections::BTreeMap;

/// Configuration of one registered model
///
/// # Examples
///
/// ```
/// use mainstore_admin::ModelAdminConfig;
/// use mainstore_admin::display::DisplayColumn;
///
/// let admin = ModelAdminConfig::new("promotions")
///     .with_list_display(vec![DisplayColumn::field("description")])
///     .with_search_fields(vec!["description"])
///     .with_list_per_page(15);
///
/// assert_eq!(admin.model_name(), "promotions");
/// assert_eq!(admin.list_per_page(), Some(15));
/// ```
pub struct ModelAdminConfig {
	model_name: String,
	list_display: Vec<DisplayColumn>,
	list_editable: Vec<String>,
	list_per_page: Option<usize>,
	ordering: Vec<String>,
	search_fields: Vec<String>,
	autocomplete_fields: Vec<String>,
	prepopulated_fields: BTreeMap<String, Vec<String>>,
	filters: FilterManager,
	actions: Vec<String>,
	inlines: Vec<InlineModelAdmin>,
}

impl ModelAdminConfig {
	/// Create a new model admin configuration
	pub fn new(model_name: impl Into<String>) -> Self {
		Self {
			model_name: model_name.into(),
			list_display: vec![DisplayColumn::field("id")],
			list_editable: Vec::new(),
			list_per_page: None,
			ordering: Vec::new(),
			search_fields: Vec::new(),
			autocomplete_fields: Vec::new(),
			prepopulated_fields: BTreeMap::new(),
			filters: FilterManager::new(),
			actions: Vec::new(),
			inlines: Vec::new(),
		}
	}

	/// Set list display columns
	pub fn with_list_display(mut self, columns: Vec<DisplayColumn>) -> Self {
		self.list_display = columns;
		self
	}

	/// Set fields editable from the list view
	pub fn with_list_editable(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.list_editable = fields.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_list_per_page(mut self, count: usize) -> Self {
		self.list_per_page = Some(count);
		self
	}

	/// Set default ordering (prefix with "-" for descending)
	pub fn with_ordering(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.ordering = fields.into_iter().map(Into::into).collect();
		self
	}

	/// Set search fields
	pub fn with_search_fields(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.search_fields = fields.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_autocomplete_fields(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.autocomplete_fields = fields.into_iter().map(Into::into).collect();
		self
	}

	/// Fill `field` from `sources` while typing in the form
	pub fn with_prepopulated_field(
		mut self,
		field: impl Into<String>,
		sources: Vec<impl Into<String>>,
	) -> Self {
		self.prepopulated_fields
			.insert(field.into(), sources.into_iter().map(Into::into).collect());
		self
	}

	/// Add a list filter
	pub fn with_filter(mut self, filter: impl ListFilter + 'static) -> Self {
		self.filters = self.filters.add_filter(filter);
		self
	}

	/// Set the names of the actions offered on the list view
	pub fn with_actions(mut self, actions: Vec<impl Into<String>>) -> Self {
		self.actions = actions.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_inline(mut self, inline: InlineModelAdmin) -> Self {
		self.inlines.push(inline);
		self
	}

	pub fn model_name(&self) -> &str {
		&self.model_name
	}

	pub fn list_display(&self) -> &[DisplayColumn] {
		&self.list_display
	}

	/// Column named `name`
	pub fn column(&self, name: &str) -> Option<&DisplayColumn> {
		self.list_display.iter().find(|c| c.name() == name)
	}

	pub fn list_editable(&self) -> &[String] {
		&self.list_editable
	}

	/// Page size (None = use site default)
	pub fn list_per_page(&self) -> Option<usize> {
		self.list_per_page
	}

	pub fn ordering(&self) -> &[String] {
		&self.ordering
	}

	pub fn search_fields(&self) -> &[String] {
		&self.search_fields
	}

	pub fn autocomplete_fields(&self) -> &[String] {
		&self.autocomplete_fields
	}

	pub fn prepopulated_fields(&self) -> &BTreeMap<String, Vec<String>> {
		&self.prepopulated_fields
	}

	pub fn filters(&self) -> &FilterManager {
		&self.filters
	}

	pub fn actions(&self) -> &[String] {
		&self.actions
	}

	pub fn inlines(&self) -> &[InlineModelAdmin] {
		&self.inlines
	}

	/// Check the configuration for combinations that cannot work
	///
	/// `registered_actions` lists the actions known to the site.
	pub fn validate(&self, registered_actions: &[String]) -> AdminResult<()> {
		if self.list_display.is_empty() {
			return Err(AdminError::ImproperlyConfigured(format!(
				"'{}' must display at least one column",
				self.model_name
			)));
		}
		for field in &self.list_editable {
			if self.column(field).is_none() {
				return Err(AdminError::ImproperlyConfigured(format!(
					"'{}' lists '{}' in list_editable but not in list_display",
					self.model_name, field
				)));
			}
		}
		let first = self.list_display[0].name();
		if self.list_editable.iter().any(|f| f == first) {
			return Err(AdminError::ImproperlyConfigured(format!(
				"'{}' cannot edit its first list_display column '{}'",
				self.model_name, first
			)));
		}
		for action in &self.actions {
			if !registered_actions.contains(action) {
				return Err(AdminError::ImproperlyConfigured(format!(
					"'{}' refers to unregistered action '{}'",
					self.model_name, action
				)));
			}
		}
		for field in self.ordering.iter().map(|f| f.trim_start_matches('-')) {
			if field.is_empty() {
				return Err(AdminError::ImproperlyConfigured(format!(
					"'{}' has an empty ordering field",
					self.model_name
				)));
			}
		}
		Ok(())
	}
}
