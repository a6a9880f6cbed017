//! Range bucket filters of the mainstore model admins
//!
//! Each filter is exercised through the changelist with the query string a
//! list page would send, so the parameter names and bucket boundaries are
//! checked together.

mod common;

use mainstore_admin::list_filters::{
	customer_order_filter, order_item_filter, product_inventory_filter, product_price_filter,
};
use mainstore_admin::{AdminSettings, AdminSite, ChangeList, ChangeListPage, ChangeListQuery};
use mainstore_panel::{FieldValue, ListFilter, RangeBucketFilter};
use proptest::prelude::*;
use rstest::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

fn pks(page: &ChangeListPage) -> Vec<i64> {
	let mut pks: Vec<i64> = page.rows.iter().filter_map(|row| row.pk).collect();
	pks.sort();
	pks
}

fn registered_filters() -> Vec<RangeBucketFilter> {
	vec![
		customer_order_filter(),
		order_item_filter(),
		product_price_filter(),
		product_inventory_filter(),
	]
}

/// Selections of `filter` whose bucket admits `value`
fn selections_matching(filter: &RangeBucketFilter, value: FieldValue) -> Vec<String> {
	let record = HashMap::from([(filter.field().to_string(), value)]);
	filter
		.choices()
		.into_iter()
		.map(|choice| choice.value)
		.filter(|selection| filter.matches(&record, selection))
		.collect()
}

// ==================== ORDERS RANGE ====================

/// **Test Category**: Equivalence partitioning
#[rstest]
#[case("low", vec![1, 2])]
#[case("middle", vec![3, 4])]
#[case("high", vec![5, 6])]
fn test_customer_order_range(#[case] selection: &str, #[case] expected: Vec<i64>) {
	let db = common::customers_with_orders();
	let site = AdminSite::mainstore(AdminSettings::default(), &db).unwrap();
	let admin = site.get_model_admin("customer").unwrap();
	let query = ChangeListQuery::from_query_string(&format!("order-range={}", selection)).unwrap();

	let page =
		ChangeList::evaluate(admin, site.settings(), db.customers_annotated(), &query).unwrap();

	// customer n + 1 placed n orders
	assert_eq!(pks(&page), expected);
}

/// **Test Category**: Boundary value analysis
#[rstest]
#[case(0, Some("low"))]
#[case(1, Some("low"))]
#[case(2, Some("middle"))]
#[case(3, Some("middle"))]
#[case(4, Some("high"))]
#[case(5, Some("high"))]
fn test_customer_order_boundaries(#[case] orders: i64, #[case] bucket: Option<&str>) {
	let filter = customer_order_filter();
	let classified = filter.spec().classify(&FieldValue::Integer(orders));
	assert_eq!(classified.map(|b| b.name()), bucket);
}

// ==================== ITEMS RANGE ====================

/// **Test Category**: Boundary value analysis
#[rstest]
#[case("low", vec![150, 200])]
#[case("middle", vec![300, 400])]
#[case("high", vec![500])]
fn test_order_item_range(#[case] selection: &str, #[case] expected: Vec<i64>) {
	let db = common::catalog();
	let site = AdminSite::mainstore(AdminSettings::default(), &db).unwrap();
	let admin = site.get_model_admin("orderitem").unwrap();
	let query = ChangeListQuery::new().with_param("itemrange", selection);

	let page = ChangeList::evaluate(admin, site.settings(), db.order_items(), &query).unwrap();

	let mut quantities: Vec<i64> = page
		.rows
		.iter()
		.filter_map(|row| row.values["quantity"].as_i64())
		.collect();
	quantities.sort();
	assert_eq!(quantities, expected);
}

#[rstest]
fn test_order_item_lookups() {
	let filter = order_item_filter();
	assert_eq!(
		filter.lookups("middle"),
		vec!["quantity__gt=200", "quantity__lte=400"]
	);
}

// ==================== PRICE RANGE ====================

/// **Test Category**: Boundary value analysis
///
/// Prices of 4000 up to 5000 fall in no bucket.
#[rstest]
#[case("low", vec![1])]
#[case("middle", vec![2])]
#[case("high", vec![6])]
fn test_product_price_range(#[case] selection: &str, #[case] expected: Vec<i64>) {
	let db = common::catalog();
	let site = AdminSite::mainstore(AdminSettings::default(), &db).unwrap();
	let admin = site.get_model_admin("product").unwrap();
	let query = ChangeListQuery::new().with_param("price_range", selection);

	let page = ChangeList::evaluate(admin, site.settings(), db.products(), &query).unwrap();

	assert_eq!(pks(&page), expected);
}

#[rstest]
#[case(4000)]
#[case(4500)]
#[case(5000)]
fn test_product_price_gap(#[case] price: i64) {
	let filter = product_price_filter();
	let value = FieldValue::Decimal(Decimal::from(price));
	assert!(filter.spec().classify(&value).is_none());
}

#[rstest]
fn test_product_inventory_low() {
	let db = common::catalog();
	let site = AdminSite::mainstore(AdminSettings::default(), &db).unwrap();
	let admin = site.get_model_admin("product").unwrap();
	let query = ChangeListQuery::new().with_param("inventory", "low");

	let page = ChangeList::evaluate(admin, site.settings(), db.products(), &query).unwrap();

	// inventory is 100 * id
	assert_eq!(pks(&page), vec![1, 2]);
	assert_eq!(product_inventory_filter().lookups("low"), vec!["inventory__lt=300"]);
}

// ==================== SELECTION EDGE CASES ====================

/// **Test Category**: Error path
///
/// A selection no bucket is named after leaves the list untouched.
#[rstest]
#[case("")]
#[case("LOW")]
#[case("medium")]
fn test_unknown_selection_is_ignored(#[case] selection: &str) {
	let db = common::catalog();
	let site = AdminSite::mainstore(AdminSettings::default(), &db).unwrap();
	let admin = site.get_model_admin("product").unwrap();
	let query = ChangeListQuery::new().with_param("price_range", selection);

	let page = ChangeList::evaluate(admin, site.settings(), db.products(), &query).unwrap();

	assert_eq!(page.count, 6);
	assert!(page.lookups.is_empty());
}

#[rstest]
fn test_filters_combine() {
	let db = common::catalog();
	let site = AdminSite::mainstore(AdminSettings::default(), &db).unwrap();
	let admin = site.get_model_admin("product").unwrap();
	let query =
		ChangeListQuery::from_query_string("price_range=low&inventory=low&collection=1").unwrap();

	let page = ChangeList::evaluate(admin, site.settings(), db.products(), &query).unwrap();

	assert_eq!(pks(&page), vec![1]);
	assert_eq!(
		page.lookups,
		vec!["collection__exact=1", "price__lte=3000", "inventory__lt=300"]
	);
}

// ==================== PROPERTIES ====================

proptest! {
	#[test]
	fn prop_registered_buckets_are_mutually_exclusive(value in -100_000_i64..100_000) {
		for filter in registered_filters() {
			let matching = selections_matching(&filter, FieldValue::Integer(value));
			prop_assert!(
				matching.len() <= 1,
				"{} = {} selected by {:?}",
				filter.parameter_name(),
				value,
				matching
			);
		}
	}

	#[test]
	fn prop_fractional_prices_fall_in_one_bucket_at_most(cents in -1_000_000_i64..1_000_000) {
		let filter = product_price_filter();
		let matching = selections_matching(&filter, FieldValue::Decimal(Decimal::new(cents, 2)));
		prop_assert!(matching.len() <= 1, "{} selected by {:?}", cents, matching);
	}

	#[test]
	fn prop_every_order_count_has_a_bucket(orders in 0_i64..100_000) {
		let matching = selections_matching(&customer_order_filter(), FieldValue::Integer(orders));
		prop_assert_eq!(matching.len(), 1);
	}
}
