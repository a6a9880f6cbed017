//! # Mainstore
//!
//! Django-style admin configuration for the mainstore e-commerce data set.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`panel`]: list filters, including the range-bucket filter behind the
//!   "Orders Range", "Items Range", "Price Range" and "Inventory" sidebars
//! - [`admin`]: models, the record store, model admins, and changelists
//!
//! ## Example
//!
//! ```
//! use mainstore::prelude::*;
//! use std::sync::Arc;
//!
//! let db = Arc::new(AdminDatabase::new());
//! let site = AdminSite::mainstore(AdminSettings::default(), &db).unwrap();
//!
//! let products = site.get_model_admin("product").unwrap();
//! assert!(products.filters().owns("price_range"));
//! ```

pub use mainstore_admin as admin;
pub use mainstore_panel as panel;

pub mod prelude {
	pub use crate::admin::{
		ActionResult, AdminDatabase, AdminError, AdminResult, AdminSettings, AdminSite, ChangeList,
		ChangeListPage, ChangeListQuery, ModelAdminConfig,
	};
	pub use crate::panel::{
		Bucket, BucketSpec, FieldAccess, FieldValue, FilterChoice, ListFilter, RangeBucketFilter,
	};
}
