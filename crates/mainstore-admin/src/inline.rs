//! Inline editing functionality for related models
//!
//! Inlines describe related rows edited on the parent's change page: order
//! items on an order, tags on a product.

use serde::{Deserialize, Serialize};

/// Type of inline formset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InlineType {
	/// Stacked inline - displays each related object in a stacked block
	Stacked,
	/// Tabular inline - displays related objects in a table
	Tabular,
}

/// How the related rows point back at the parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InlineRelation {
	/// Plain foreign key field on the related model
	ForeignKey(String),
	/// Content type and object id pair, as used by tagged items
	Generic {
		content_type_field: String,
		object_id_field: String,
	},
}

/// Configuration for inline model admin
///
/// # Examples
///
/// ```
/// use mainstore_admin::{InlineModelAdmin, InlineType};
///
/// let inline = InlineModelAdmin::new("orderitem", "order")
///     .with_type(InlineType::Tabular)
///     .with_extra(0)
///     .with_autocomplete_fields(vec!["product"]);
///
/// assert_eq!(inline.model_name(), "orderitem");
/// assert_eq!(inline.formset_size(2), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineModelAdmin {
	model_name: String,
	relation: InlineRelation,
	inline_type: InlineType,
	extra: usize,
	max_num: Option<usize>,
	autocomplete_fields: Vec<String>,
}

impl InlineModelAdmin {
	/// Create a new inline over the foreign key `fk_name`
	pub fn new(model_name: impl Into<String>, fk_name: impl Into<String>) -> Self {
		Self::with_relation(model_name, InlineRelation::ForeignKey(fk_name.into()))
	}

	/// Create a new inline over a content type / object id pair
	pub fn generic(model_name: impl Into<String>) -> Self {
		Self::with_relation(
			model_name,
			InlineRelation::Generic {
				content_type_field: "content_type".to_string(),
				object_id_field: "object_id".to_string(),
			},
		)
	}

	fn with_relation(model_name: impl Into<String>, relation: InlineRelation) -> Self {
		Self {
			model_name: model_name.into(),
			relation,
			inline_type: InlineType::Stacked,
			extra: 3,
			max_num: None,
			autocomplete_fields: Vec::new(),
		}
	}

	/// Get the model name
	pub fn model_name(&self) -> &str {
		&self.model_name
	}

	pub fn relation(&self) -> &InlineRelation {
		&self.relation
	}

	/// Set inline display type
	pub fn with_type(mut self, inline_type: InlineType) -> Self {
		self.inline_type = inline_type;
		self
	}

	/// Get inline type
	pub fn inline_type(&self) -> InlineType {
		self.inline_type
	}

	/// Set number of extra forms
	pub fn with_extra(mut self, extra: usize) -> Self {
		self.extra = extra;
		self
	}

	/// Get number of extra forms
	pub fn extra(&self) -> usize {
		self.extra
	}

	/// Set maximum number of forms
	pub fn with_max_num(mut self, max_num: usize) -> Self {
		self.max_num = Some(max_num);
		self
	}

	pub fn with_autocomplete_fields(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.autocomplete_fields = fields.into_iter().map(Into::into).collect();
		self
	}

	pub fn autocomplete_fields(&self) -> &[String] {
		&self.autocomplete_fields
	}

	/// Number of forms shown for a parent with `existing` related rows
	pub fn formset_size(&self, existing: usize) -> usize {
		let total = existing + self.extra;
		match self.max_num {
			Some(max) => total.min(max.max(existing)),
			None => total,
		}
	}
}
