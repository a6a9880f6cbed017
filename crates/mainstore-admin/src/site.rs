//! Admin site: the registry of model admins and actions
//!
//! [`AdminSite::mainstore`] builds the site for the store's models.

use crate::actions::{ActionRegistry, ActionResult, ClearInventoryAction, ClearItemsAction};
use crate::database::AdminDatabase;
use crate::display::{ChangelistLink, DisplayColumn};
use crate::error::{AdminError, AdminResult};
use crate::inline::{InlineModelAdmin, InlineRelation, InlineType};
use crate::list_filters::{self, CollectionFilter};
use crate::model_admin::ModelAdminConfig;
use crate::models::Model;
use crate::settings::AdminSettings;
use mainstore_panel::{FieldAccess, FieldValue};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Related rows shown under a parent object's change form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineFormset {
	pub model_name: String,
	pub inline_type: InlineType,
	pub rows: Vec<serde_json::Value>,
	pub total_forms: usize,
}

/// Admin site
///
/// # Examples
///
/// ```
/// use mainstore_admin::{AdminDatabase, AdminSettings, AdminSite};
/// use std::sync::Arc;
///
/// let db = Arc::new(AdminDatabase::new());
/// let site = AdminSite::mainstore(AdminSettings::default(), &db).unwrap();
/// assert!(site.get_model_admin("product").is_ok());
/// assert!(site.get_model_admin("coupon").is_err());
/// ```
pub struct AdminSite {
	settings: AdminSettings,
	registry: BTreeMap<String, ModelAdminConfig>,
	actions: ActionRegistry,
}

impl AdminSite {
	/// Create an empty site
	pub fn new(settings: AdminSettings) -> Self {
		Self {
			settings,
			registry: BTreeMap::new(),
			actions: ActionRegistry::new(),
		}
	}

	pub fn settings(&self) -> &AdminSettings {
		&self.settings
	}

	pub fn actions(&self) -> &ActionRegistry {
		&self.actions
	}

	/// Register a model admin, replacing any previous one for the same model
	pub fn register(&mut self, admin: ModelAdminConfig) -> AdminResult<()> {
		admin.validate(&self.actions.available_actions())?;
		tracing::debug!(model = admin.model_name(), "registered model admin");
		self.registry.insert(admin.model_name().to_string(), admin);
		Ok(())
	}

	pub fn get_model_admin(&self, model_name: &str) -> AdminResult<&ModelAdminConfig> {
		self.registry
			.get(model_name)
			.ok_or_else(|| AdminError::ModelNotRegistered(model_name.to_string()))
	}

	/// Names of the registered models, sorted
	pub fn registered_models(&self) -> Vec<&str> {
		self.registry.keys().map(String::as_str).collect()
	}

	/// Run an action the model admin lists on the selected rows
	pub fn run_action(
		&self,
		model_name: &str,
		action: &str,
		db: &AdminDatabase,
		item_ids: &[i64],
	) -> AdminResult<ActionResult> {
		let admin = self.get_model_admin(model_name)?;
		if !admin.actions().iter().any(|a| a == action) {
			return Err(AdminError::InvalidAction(format!(
				"Action '{}' is not enabled for model '{}'",
				action, model_name
			)));
		}
		self.actions.run(action, model_name, db, item_ids)
	}

	/// Inline formsets for the change form of `model_name` row `object_id`
	pub fn inline_formsets(
		&self,
		db: &AdminDatabase,
		model_name: &str,
		object_id: i64,
	) -> AdminResult<Vec<InlineFormset>> {
		let admin = self.get_model_admin(model_name)?;
		admin
			.inlines()
			.iter()
			.map(|inline| {
				let rows = related_rows(db, inline, model_name, object_id)?;
				Ok(InlineFormset {
					model_name: inline.model_name().to_string(),
					inline_type: inline.inline_type(),
					total_forms: inline.formset_size(rows.len()),
					rows,
				})
			})
			.collect()
	}

	/// The store's admin site
	///
	/// `db` supplies the collection choices of the product list filter.
	pub fn mainstore(settings: AdminSettings, db: &Arc<AdminDatabase>) -> AdminResult<Self> {
		settings.validate()?;
		let mut site = Self::new(settings);
		site.actions.register(ClearItemsAction);
		site.actions.register(ClearInventoryAction);

		site.register(
			ModelAdminConfig::new("collection")
				.with_list_display(vec![
					DisplayColumn::field("title"),
					DisplayColumn::new("products", "product_count")
						.with_ordering("product_count")
						.with_link(ChangelistLink::new("product", "collection__id")),
				])
				.with_autocomplete_fields(vec!["featured_product"])
				.with_search_fields(vec!["title"]),
		)?;

		site.register(
			ModelAdminConfig::new("customer")
				.with_list_display(vec![
					DisplayColumn::new("customer_name", "full_name").with_ordering("full_name"),
					DisplayColumn::field("membership"),
					DisplayColumn::new("orders", "order_count").with_ordering("order_count"),
				])
				.with_list_editable(vec!["membership"])
				.with_list_per_page(15)
				.with_filter(list_filters::membership_filter())
				.with_filter(list_filters::customer_order_filter())
				.with_ordering(vec!["first_name", "last_name"])
				.with_search_fields(vec!["first_name", "last_name"]),
		)?;

		site.register(
			ModelAdminConfig::new("orderitem")
				.with_list_display(vec![
					DisplayColumn::field("quantity"),
					DisplayColumn::field("product"),
				])
				.with_filter(list_filters::order_item_filter())
				.with_actions(vec!["clear_items"])
				.with_ordering(vec!["product"]),
		)?;

		site.register(
			ModelAdminConfig::new("order")
				.with_list_display(vec![
					DisplayColumn::field("placed_at"),
					DisplayColumn::field("customer"),
					DisplayColumn::new("order_items", "order_items")
						.with_ordering("order_items")
						.with_link(ChangelistLink::new("orderitem", "order__id")),
				])
				.with_list_per_page(15)
				.with_ordering(vec!["customer"])
				.with_autocomplete_fields(vec!["customer"])
				.with_inline(
					InlineModelAdmin::new("orderitem", "order")
						.with_type(InlineType::Tabular)
						.with_extra(0)
						.with_autocomplete_fields(vec!["product"]),
				),
		)?;

		site.register(
			ModelAdminConfig::new("product")
				.with_list_display(vec![
					DisplayColumn::field("title"),
					DisplayColumn::field("collection"),
					DisplayColumn::field("price"),
					DisplayColumn::field("inventory"),
				])
				.with_search_fields(vec!["title"])
				.with_prepopulated_field("slug", vec!["title"])
				.with_autocomplete_fields(vec!["promotions"])
				.with_actions(vec!["clear_inventory"])
				.with_inline(InlineModelAdmin::generic("taggeditem").with_type(InlineType::Tabular))
				.with_list_per_page(20)
				.with_filter(CollectionFilter::new(Arc::clone(db)))
				.with_filter(list_filters::last_update_filter())
				.with_filter(list_filters::product_price_filter())
				.with_filter(list_filters::product_inventory_filter()),
		)?;

		site.register(
			ModelAdminConfig::new("promotions")
				.with_list_display(vec![DisplayColumn::field("description")])
				.with_list_per_page(15)
				.with_search_fields(vec!["description"]),
		)?;

		site.register(
			ModelAdminConfig::new("cartitem")
				.with_list_display(vec![DisplayColumn::field("quantity")]),
		)?;

		site.register(
			ModelAdminConfig::new("cart")
				.with_list_display(vec![DisplayColumn::field("created_at")]),
		)?;

		Ok(site)
	}
}

fn related_rows(
	db: &AdminDatabase,
	inline: &InlineModelAdmin,
	parent_model: &str,
	parent_id: i64,
) -> AdminResult<Vec<serde_json::Value>> {
	let relation = inline.relation();
	match inline.model_name() {
		"orderitem" => related(db.order_items(), relation, parent_model, parent_id),
		"taggeditem" => related(db.tagged_items(), relation, parent_model, parent_id),
		model => Err(AdminError::ImproperlyConfigured(format!(
			"'{}' has no inline rows for '{}'",
			parent_model, model
		))),
	}
}

/// Rows of `rows` pointing at the parent through `relation`, as JSON
fn related<M: Model + Serialize>(
	rows: Vec<M>,
	relation: &InlineRelation,
	parent_model: &str,
	parent_id: i64,
) -> AdminResult<Vec<serde_json::Value>> {
	let parent_key = FieldValue::Integer(parent_id);
	rows.into_iter()
		.filter(|row| match relation {
			InlineRelation::ForeignKey(fk) => row.field_value(fk) == parent_key,
			InlineRelation::Generic {
				content_type_field,
				object_id_field,
			} => {
				row.field_value(content_type_field) == FieldValue::from(parent_model)
					&& row.field_value(object_id_field) == parent_key
			}
		})
		.map(|row| serde_json::to_value(row).map_err(AdminError::from))
		.collect()
}
