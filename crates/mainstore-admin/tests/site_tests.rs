//! Admin site use cases: annotated list columns, bulk actions, inlines, and
//! changelist paging over the mainstore registrations

mod common;

use mainstore_admin::models::Collection;
use mainstore_admin::{
	ActionResult, AdminDatabase, AdminError, AdminSettings, AdminSite, ChangeList, ChangeListQuery,
};
use rstest::*;
use std::sync::Arc;

#[fixture]
fn catalog() -> Arc<AdminDatabase> {
	common::catalog()
}

// ==================== ANNOTATED COLUMNS ====================

#[rstest]
fn test_collection_product_count_links(catalog: Arc<AdminDatabase>) {
	let site = AdminSite::mainstore(AdminSettings::default(), &catalog).unwrap();
	let admin = site.get_model_admin("collection").unwrap();

	let page = ChangeList::evaluate(
		admin,
		site.settings(),
		catalog.collections_with_product_count(),
		&ChangeListQuery::new(),
	)
	.unwrap();

	assert_eq!(page.columns, vec!["title", "products"]);
	assert_eq!(
		page.rows[0].values["products"],
		"<a href=\"/admin/mainstore/product/?collection__id=1\">4</a>"
	);
	assert_eq!(
		page.rows[1].values["products"],
		"<a href=\"/admin/mainstore/product/?collection__id=2\">2</a>"
	);
}

#[rstest]
fn test_order_item_count_link(catalog: Arc<AdminDatabase>) {
	let site = AdminSite::mainstore(AdminSettings::default(), &catalog).unwrap();
	let admin = site.get_model_admin("order").unwrap();

	let page = ChangeList::evaluate(
		admin,
		site.settings(),
		catalog.orders_with_item_count(),
		&ChangeListQuery::new(),
	)
	.unwrap();

	assert_eq!(
		page.rows[0].values["order_items"],
		"<a href=\"/admin/mainstore/orderitem/?order__id=1\">5</a>"
	);
}

#[rstest]
fn test_customers_ordered_by_order_count() {
	let db = common::customers_with_orders();
	let site = AdminSite::mainstore(AdminSettings::default(), &db).unwrap();
	let admin = site.get_model_admin("customer").unwrap();
	let query = ChangeListQuery::from_query_string("o=-orders").unwrap();

	let page =
		ChangeList::evaluate(admin, site.settings(), db.customers_annotated(), &query).unwrap();

	let names: Vec<&str> = page
		.rows
		.iter()
		.filter_map(|row| row.values["customer_name"].as_str())
		.collect();
	assert_eq!(
		names,
		vec![
			"Donald Knuth",
			"Barbara Liskov",
			"Edsger Dijkstra",
			"Alan Turing",
			"Grace Hopper",
			"Ada Byron"
		]
	);
	assert_eq!(page.rows[0].values["orders"], 5);
}

#[rstest]
fn test_customer_default_ordering_and_membership_filter() {
	let db = common::customers_with_orders();
	let site = AdminSite::mainstore(AdminSettings::default(), &db).unwrap();
	let admin = site.get_model_admin("customer").unwrap();
	let query = ChangeListQuery::new().with_param("membership", "G");

	let page =
		ChangeList::evaluate(admin, site.settings(), db.customers_annotated(), &query).unwrap();

	let names: Vec<&str> = page
		.rows
		.iter()
		.filter_map(|row| row.values["customer_name"].as_str())
		.collect();
	assert_eq!(names, vec!["Ada Byron", "Barbara Liskov"]);
	assert_eq!(page.rows[0].values["membership"], "G");
}

// ==================== PAGINATION ====================

#[rstest]
fn test_customer_changelist_pages_of_fifteen() {
	let db = Arc::new(AdminDatabase::new());
	for id in 1..=20 {
		db.save_customer(common::customer(
			id,
			&format!("First{:02}", id),
			"Last",
			Default::default(),
		));
	}
	let site = AdminSite::mainstore(AdminSettings::default(), &db).unwrap();
	let admin = site.get_model_admin("customer").unwrap();

	let first = ChangeList::evaluate(
		admin,
		site.settings(),
		db.customers_annotated(),
		&ChangeListQuery::new(),
	)
	.unwrap();
	let second = ChangeList::evaluate(
		admin,
		site.settings(),
		db.customers_annotated(),
		&ChangeListQuery::new().with_page(2),
	)
	.unwrap();

	assert_eq!(first.per_page, 15);
	assert_eq!(first.total_pages, 2);
	assert_eq!(first.rows.len(), 15);
	assert_eq!(second.rows.len(), 5);
	assert!(matches!(
		ChangeList::evaluate(
			admin,
			site.settings(),
			db.customers_annotated(),
			&ChangeListQuery::new().with_page(3),
		),
		Err(AdminError::InvalidPage {
			page: 3,
			total_pages: 2
		})
	));
}

#[rstest]
fn test_product_search_by_title(catalog: Arc<AdminDatabase>) {
	let site = AdminSite::mainstore(AdminSettings::default(), &catalog).unwrap();
	let admin = site.get_model_admin("product").unwrap();
	let query = ChangeListQuery::from_query_string("q=item+6").unwrap();

	let page = ChangeList::evaluate(admin, site.settings(), catalog.products(), &query).unwrap();

	assert_eq!(page.count, 1);
	assert_eq!(page.rows[0].pk, Some(6));
}

#[rstest]
fn test_collection_saved_after_registration_is_filterable(catalog: Arc<AdminDatabase>) {
	let site = AdminSite::mainstore(AdminSettings::default(), &catalog).unwrap();
	catalog.save_collection(Collection {
		id: 3,
		title: "Garden".to_string(),
		featured_product: None,
	});
	catalog.save_product(common::product(7, "Item 7", 2500, 50, 3));
	let admin = site.get_model_admin("product").unwrap();
	let query = ChangeListQuery::new().with_param("collection", "3");

	let page = ChangeList::evaluate(admin, site.settings(), catalog.products(), &query).unwrap();

	assert_eq!(page.count, 1);
	assert_eq!(page.rows[0].pk, Some(7));
	assert_eq!(page.lookups, vec!["collection__exact=3"]);
	let collection = page
		.filters
		.iter()
		.find(|view| view.parameter == "collection")
		.unwrap();
	let garden = collection.choices.iter().find(|c| c.value == "3").unwrap();
	assert_eq!(garden.display, "Garden");
	assert!(garden.selected);
}

#[rstest]
fn test_unknown_filter_parameter_rejected(catalog: Arc<AdminDatabase>) {
	let site = AdminSite::mainstore(AdminSettings::default(), &catalog).unwrap();
	let admin = site.get_model_admin("orderitem").unwrap();
	// price_range belongs to the product admin
	let query = ChangeListQuery::new().with_param("price_range", "low");

	let result = ChangeList::evaluate(admin, site.settings(), catalog.order_items(), &query);

	match result {
		Err(AdminError::UnknownFilter { parameter, allowed }) => {
			assert_eq!(parameter, "price_range");
			assert_eq!(allowed, vec!["itemrange"]);
		}
		other => panic!("expected UnknownFilter, got {:?}", other.map(|p| p.count)),
	}
}

// ==================== BULK ACTIONS ====================

#[rstest]
fn test_clear_items_action(catalog: Arc<AdminDatabase>) {
	let site = AdminSite::mainstore(AdminSettings::default(), &catalog).unwrap();

	let result = site
		.run_action("orderitem", "clear_items", &catalog, &[1, 2, 99])
		.unwrap();

	assert_eq!(
		result,
		ActionResult::Success {
			message: "2 orderitems were updated.".to_string(),
			affected_count: 2,
		}
	);
	let quantities: Vec<i64> = catalog.order_items().iter().map(|i| i.quantity).collect();
	assert_eq!(quantities, vec![0, 0, 300, 400, 500]);
}

#[rstest]
fn test_clear_inventory_action(catalog: Arc<AdminDatabase>) {
	let site = AdminSite::mainstore(AdminSettings::default(), &catalog).unwrap();

	let result = site
		.run_action("product", "clear_inventory", &catalog, &[5, 6])
		.unwrap();

	assert_eq!(result.message(), "2 product were updated.");
	assert!(
		catalog
			.products()
			.iter()
			.all(|p| (p.id >= 5) == (p.inventory == 0))
	);
}

#[rstest]
fn test_action_without_selection_warns(catalog: Arc<AdminDatabase>) {
	let site = AdminSite::mainstore(AdminSettings::default(), &catalog).unwrap();

	let result = site
		.run_action("product", "clear_inventory", &catalog, &[])
		.unwrap();

	assert!(matches!(result, ActionResult::Warning { .. }));
	assert_eq!(result.message(), "No items selected");
	assert_eq!(result.affected_count(), 0);
}

// ==================== INLINES ====================

#[rstest]
fn test_product_tag_inline(catalog: Arc<AdminDatabase>) {
	let site = AdminSite::mainstore(AdminSettings::default(), &catalog).unwrap();

	let tagged = site.inline_formsets(&catalog, "product", 2).unwrap();
	let untagged = site.inline_formsets(&catalog, "product", 3).unwrap();

	assert_eq!(tagged[0].rows.len(), 1);
	assert!(untagged[0].rows.is_empty());
}

#[rstest]
fn test_inline_formsets_unknown_model(catalog: Arc<AdminDatabase>) {
	let site = AdminSite::mainstore(AdminSettings::default(), &catalog).unwrap();
	assert!(matches!(
		site.inline_formsets(&catalog, "coupon", 1),
		Err(AdminError::ModelNotRegistered(_))
	));
}
