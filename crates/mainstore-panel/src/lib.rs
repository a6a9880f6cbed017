//! # Mainstore Admin Panel
//!
//! List filters for the mainstore admin list views.
//!
//! Records are read through [`FieldAccess`], so the same filters work on
//! typed models, annotated rows, and plain maps.
//!
//! ## Range buckets
//!
//! ```
//! use mainstore_panel::{Bucket, BucketSpec, FieldValue, RangeBucketFilter};
//! use std::collections::HashMap;
//!
//! let filter = RangeBucketFilter::new(
//!     "Orders Range",
//!     "order-range",
//!     "order_count",
//!     BucketSpec::new()
//!         .with_bucket(Bucket::new("low", "low").lt(2))
//!         .with_bucket(Bucket::new("middle", "middle").gte(2).lt(4))
//!         .with_bucket(Bucket::new("high", "high").gte(4)),
//! );
//!
//! let customers: Vec<HashMap<String, FieldValue>> = (0..6_i64)
//!     .map(|n| HashMap::from([("order_count".to_string(), FieldValue::Integer(n))]))
//!     .collect();
//!
//! assert_eq!(filter.queryset(customers.clone(), Some("middle")).len(), 2);
//! assert_eq!(filter.queryset(customers, None).len(), 6);
//! ```

pub mod buckets;
pub mod filters;
pub mod value;

pub use buckets::{Bucket, BucketSpec, Condition, LookupOperator, RangeBucketFilter};
pub use filters::{
	ChoiceFilter, DateRangeFilter, FilterChoice, FilterManager, ListFilter, filter_records,
};
pub use value::{FieldAccess, FieldValue};
