//! # Mainstore Admin
//!
//! Admin site for the mainstore e-commerce models.
//!
//! ## Overview
//!
//! The site registers one [`ModelAdminConfig`] per model: the columns of its
//! changelist, list filters, search fields, bulk actions, and inline editors.
//! Records come from an [`AdminDatabase`], which also computes the
//! annotations the list filters read (order counts, item counts). The site
//! shares the store so that filters built from stored rows, such as the
//! collection choices, see rows saved after registration.
//!
//! ## Quick Start
//!
//! ```
//! use mainstore_admin::{AdminDatabase, AdminSettings, AdminSite, ChangeList, ChangeListQuery};
//! use mainstore_admin::models::{Customer, Membership};
//! use std::sync::Arc;
//!
//! let db = Arc::new(AdminDatabase::new());
//! db.save_customer(Customer {
//!     id: 1,
//!     first_name: "Ada".to_string(),
//!     last_name: "Byron".to_string(),
//!     email: "ada@example.com".to_string(),
//!     phone: String::new(),
//!     birth_date: None,
//!     membership: Membership::Gold,
//! });
//!
//! let site = AdminSite::mainstore(AdminSettings::default(), &db).unwrap();
//! let admin = site.get_model_admin("customer").unwrap();
//! let query = ChangeListQuery::from_query_string("order-range=low").unwrap();
//! let page =
//!     ChangeList::evaluate(admin, site.settings(), db.customers_annotated(), &query).unwrap();
//!
//! assert_eq!(page.count, 1);
//! assert_eq!(page.rows[0].values["customer_name"], "Ada Byron");
//! ```
//!
//! ## Feature Flags
//!
//! None. The crate has no async runtime; every operation is synchronous.

pub mod actions;
pub mod changelist;
pub mod database;
pub mod display;
pub mod error;
pub mod inline;
pub mod list_filters;
pub mod model_admin;
pub mod models;
pub mod settings;
pub mod site;

pub use actions::{
	ActionRegistry, ActionResult, AdminAction, ClearInventoryAction, ClearItemsAction,
};
pub use changelist::{ChangeList, ChangeListPage, ChangeListQuery, ChangeListRow};
pub use database::{AdminDatabase, Annotated};
pub use error::{AdminError, AdminResult};
pub use inline::{InlineModelAdmin, InlineRelation, InlineType};
pub use model_admin::ModelAdminConfig;
pub use models::Model;
pub use settings::{AdminSettings, SettingsError};
pub use site::{AdminSite, InlineFormset};
