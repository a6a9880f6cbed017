//! Admin actions for bulk operations
//!
//! This module provides the infrastructure for admin actions - operations that can be
//! performed on multiple selected items at once.

use crate::database::AdminDatabase;
use crate::error::{AdminError, AdminResult};

/// Result of executing an admin action
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
	/// Action completed successfully for all items
	Success {
		message: String,
		affected_count: usize,
	},
	/// Action completed with warnings
	Warning {
		message: String,
		affected_count: usize,
		warnings: Vec<String>,
	},
}

impl ActionResult {
	/// Check if the action completed without warnings
	pub fn is_success(&self) -> bool {
		matches!(self, ActionResult::Success { .. })
	}

	/// Warnings raised while running the action
	pub fn warnings(&self) -> &[String] {
		match self {
			ActionResult::Success { .. } => &[],
			ActionResult::Warning { warnings, .. } => warnings,
		}
	}

	/// Get the number of items affected by the action
	pub fn affected_count(&self) -> usize {
		match self {
			ActionResult::Success { affected_count, .. } => *affected_count,
			ActionResult::Warning { affected_count, .. } => *affected_count,
		}
	}

	/// Get the main message from the result
	pub fn message(&self) -> &str {
		match self {
			ActionResult::Success { message, .. } => message,
			ActionResult::Warning { message, .. } => message,
		}
	}

	fn nothing_selected() -> Self {
		ActionResult::Warning {
			message: "No items selected".to_string(),
			affected_count: 0,
			warnings: vec!["Please select at least one item".to_string()],
		}
	}
}

/// Trait for admin actions
///
/// # Examples
///
/// ```
/// use mainstore_admin::{ActionResult, AdminAction, AdminDatabase};
///
/// struct CountSelected;
///
/// impl AdminAction for CountSelected {
///     fn name(&self) -> &str {
///         "count_selected"
///     }
///
///     fn description(&self) -> &str {
///         "Count selected items"
///     }
///
///     fn model_name(&self) -> &str {
///         "product"
///     }
///
///     fn execute(&self, _db: &AdminDatabase, item_ids: &[i64]) -> ActionResult {
///         ActionResult::Success {
///             message: format!("{} selected", item_ids.len()),
///             affected_count: 0,
///         }
///     }
/// }
///
/// let result = CountSelected.execute(&AdminDatabase::new(), &[1, 2]);
/// assert_eq!(result.message(), "2 selected");
/// ```
pub trait AdminAction: Send + Sync {
	/// Get the action name (used as identifier)
	fn name(&self) -> &str;

	/// Get the action description (displayed in UI)
	fn description(&self) -> &str;

	/// Model the action operates on
	fn model_name(&self) -> &str;

	/// Execute the action on selected items
	fn execute(&self, db: &AdminDatabase, item_ids: &[i64]) -> ActionResult;
}

/// Zero the quantity of the selected order items
#[derive(Debug, Clone, Default)]
pub struct ClearItemsAction;

impl AdminAction for ClearItemsAction {
	fn name(&self) -> &str {
		"clear_items"
	}

	fn description(&self) -> &str {
		"Remove Items"
	}

	fn model_name(&self) -> &str {
		"orderitem"
	}

	fn execute(&self, db: &AdminDatabase, item_ids: &[i64]) -> ActionResult {
		if item_ids.is_empty() {
			return ActionResult::nothing_selected();
		}
		let updated = db.update_order_item_quantity(item_ids, 0);
		tracing::info!(action = self.name(), updated, "cleared order item quantities");
		ActionResult::Success {
			message: format!("{} orderitems were updated.", updated),
			affected_count: updated,
		}
	}
}

/// Zero the inventory of the selected products
#[derive(Debug, Clone, Default)]
pub struct ClearInventoryAction;

impl AdminAction for ClearInventoryAction {
	fn name(&self) -> &str {
		"clear_inventory"
	}

	fn description(&self) -> &str {
		"clear inventory"
	}

	fn model_name(&self) -> &str {
		"product"
	}

	fn execute(&self, db: &AdminDatabase, item_ids: &[i64]) -> ActionResult {
		if item_ids.is_empty() {
			return ActionResult::nothing_selected();
		}
		let updated = db.update_product_inventory(item_ids, 0);
		tracing::info!(action = self.name(), updated, "cleared product inventory");
		ActionResult::Success {
			message: format!("{} product were updated.", updated),
			affected_count: updated,
		}
	}
}

/// Action registry for managing available actions
///
/// # Examples
///
/// ```
/// use mainstore_admin::{ActionRegistry, ClearInventoryAction};
///
/// let registry = ActionRegistry::new();
/// registry.register(ClearInventoryAction);
///
/// assert!(registry.has_action("clear_inventory"));
/// assert_eq!(registry.available_actions().len(), 1);
/// ```
pub struct ActionRegistry {
	actions: dashmap::DashMap<String, Box<dyn AdminAction>>,
}

impl ActionRegistry {
	/// Create a new action registry
	pub fn new() -> Self {
		Self {
			actions: dashmap::DashMap::new(),
		}
	}

	/// Register an action
	pub fn register(&self, action: impl AdminAction + 'static) {
		self.actions
			.insert(action.name().to_string(), Box::new(action));
	}

	/// Unregister an action
	pub fn unregister(&self, name: &str) -> AdminResult<()> {
		self.actions
			.remove(name)
			.map(|_| ())
			.ok_or_else(|| AdminError::InvalidAction(format!("Action '{}' not found", name)))
	}

	/// Check if an action is registered
	pub fn has_action(&self, name: &str) -> bool {
		self.actions.contains_key(name)
	}

	/// Get all available action names, sorted
	pub fn available_actions(&self) -> Vec<String> {
		let mut names: Vec<String> = self
			.actions
			.iter()
			.map(|entry| entry.key().clone())
			.collect();
		names.sort();
		names
	}

	/// Description of a registered action
	pub fn description(&self, name: &str) -> AdminResult<String> {
		self.actions
			.get(name)
			.map(|action| action.description().to_string())
			.ok_or_else(|| AdminError::InvalidAction(format!("Action '{}' not found", name)))
	}

	/// Run the named action on `item_ids` of `model_name`
	///
	/// Fails when no action has that name or the action belongs to another
	/// model.
	pub fn run(
		&self,
		name: &str,
		model_name: &str,
		db: &AdminDatabase,
		item_ids: &[i64],
	) -> AdminResult<ActionResult> {
		let action = self
			.actions
			.get(name)
			.ok_or_else(|| AdminError::InvalidAction(format!("Action '{}' not found", name)))?;
		if action.model_name() != model_name {
			return Err(AdminError::InvalidAction(format!(
				"Action '{}' does not apply to model '{}'",
				name, model_name
			)));
		}
		Ok(action.execute(db, item_ids))
	}

	/// Get the number of registered actions
	pub fn len(&self) -> usize {
		self.actions.len()
	}

	/// Check if the registry is empty
	pub fn is_empty(&self) -> bool {
		self.actions.is_empty()
	}
}

impl Default for ActionRegistry {
	fn default() -> Self {
		Self::new()
	}
}
