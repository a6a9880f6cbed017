//! List filters of the mainstore model admins
//!
//! The range-bucket thresholds are fixed per filter and deliberately not
//! aligned with each other. Price leaves 4000..=5000 uncovered; changing that
//! changes which products each choice lists.

use crate::database::AdminDatabase;
use crate::models::Membership;
use mainstore_panel::{
	Bucket, BucketSpec, ChoiceFilter, DateRangeFilter, FieldAccess, FilterChoice, ListFilter,
	RangeBucketFilter,
};
use std::sync::Arc;

/// Customers by number of orders: `< 2`, `2..4`, `>= 4`
pub fn customer_order_filter() -> RangeBucketFilter {
	RangeBucketFilter::new(
		"Orders Range",
		"order-range",
		"order_count",
		BucketSpec::new()
			.with_bucket(Bucket::new("low", "low").lt(2))
			.with_bucket(Bucket::new("middle", "middle").gte(2).lt(4))
			.with_bucket(Bucket::new("high", "high").gte(4)),
	)
}

/// Order items by quantity: `<= 200`, `(200, 400]`, `> 400`
pub fn order_item_filter() -> RangeBucketFilter {
	RangeBucketFilter::new(
		"Items Range",
		"itemrange",
		"quantity",
		BucketSpec::new()
			.with_bucket(Bucket::new("low", "low").lte(200))
			.with_bucket(Bucket::new("middle", "middle").gt(200).lte(400))
			.with_bucket(Bucket::new("high", "high").gt(400)),
	)
}

/// Products by price: `<= 3000`, `(3000, 4000)`, `> 5000`
pub fn product_price_filter() -> RangeBucketFilter {
	RangeBucketFilter::new(
		"Price Range",
		"price_range",
		"price",
		BucketSpec::new()
			.with_bucket(Bucket::new("low", "Low").lte(3000))
			.with_bucket(Bucket::new("middle", "Middle").gt(3000).lt(4000))
			.with_bucket(Bucket::new("high", "High").gt(5000)),
	)
}

/// Products running low on stock: `< 300`
pub fn product_inventory_filter() -> RangeBucketFilter {
	RangeBucketFilter::new(
		"Inventory",
		"inventory",
		"inventory",
		BucketSpec::new().with_bucket(Bucket::new("low", "Low").lt(300)),
	)
}

pub fn membership_filter() -> ChoiceFilter {
	Membership::ALL
		.iter()
		.fold(ChoiceFilter::new("membership", "Membership"), |filter, m| {
			filter.add_choice(m.code(), m.label())
		})
}

/// Products by collection
///
/// Choices are read from the store each time they are asked for, so
/// collections saved after the site was built are selectable too.
#[derive(Debug, Clone)]
pub struct CollectionFilter {
	db: Arc<AdminDatabase>,
}

impl CollectionFilter {
	pub fn new(db: Arc<AdminDatabase>) -> Self {
		Self { db }
	}

	fn current(&self) -> ChoiceFilter {
		self.db
			.collections()
			.iter()
			.fold(ChoiceFilter::new("collection", "Collection"), |filter, c| {
				filter.add_choice(c.id.to_string(), c.title.clone())
			})
	}
}

impl ListFilter for CollectionFilter {
	fn parameter_name(&self) -> &str {
		"collection"
	}

	fn title(&self) -> &str {
		"Collection"
	}

	fn choices(&self) -> Vec<FilterChoice> {
		self.current().choices()
	}

	fn matches(&self, record: &dyn FieldAccess, selection: &str) -> bool {
		self.current().matches(record, selection)
	}

	fn lookups(&self, selection: &str) -> Vec<String> {
		self.current().lookups(selection)
	}
}

/// Products by last update, relative to the local date
pub fn last_update_filter() -> DateRangeFilter {
	DateRangeFilter::new("last_update", "Last update")
}
