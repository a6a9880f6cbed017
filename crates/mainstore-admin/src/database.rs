//! In-memory record store for admin operations
//!
//! Holds the mainstore tables and provides the read-side aggregates the admin
//! list views display (`product_count`, `order_count`, `order_items`) and the
//! single-statement bulk updates the admin actions run.

use crate::models::{
	Cart, CartItem, Collection, Customer, Model, Order, OrderItem, Product, Promotion, Tag,
	TaggedItem,
};
use mainstore_panel::{FieldAccess, FieldValue};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A record together with values computed for it by the store
///
/// Annotations shadow the record's own fields of the same name.
///
/// # Examples
///
/// ```
/// use mainstore_admin::database::Annotated;
/// use mainstore_panel::{FieldAccess, FieldValue};
/// use std::collections::HashMap;
///
/// let row = HashMap::from([("title".to_string(), FieldValue::from("Beauty"))]);
/// let annotated = Annotated::new(row).annotate("product_count", 4_i64);
///
/// assert_eq!(annotated.field_value("product_count"), FieldValue::Integer(4));
/// assert_eq!(annotated.field_value("title"), FieldValue::from("Beauty"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Annotated<M> {
	record: M,
	annotations: BTreeMap<String, FieldValue>,
}

impl<M> Annotated<M> {
	pub fn new(record: M) -> Self {
		Self {
			record,
			annotations: BTreeMap::new(),
		}
	}

	pub fn annotate(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
		self.annotations.insert(name.into(), value.into());
		self
	}

	pub fn record(&self) -> &M {
		&self.record
	}

	pub fn into_record(self) -> M {
		self.record
	}

	pub fn annotation(&self, name: &str) -> Option<&FieldValue> {
		self.annotations.get(name)
	}
}

impl<M: FieldAccess> FieldAccess for Annotated<M> {
	fn field_value(&self, field: &str) -> FieldValue {
		match self.annotations.get(field) {
			Some(value) => value.clone(),
			None => self.record.field_value(field),
		}
	}
}

impl<M: Model> Model for Annotated<M> {
	fn model_name() -> &'static str {
		M::model_name()
	}

	fn primary_key(&self) -> i64 {
		self.record.primary_key()
	}
}

#[derive(Debug, Default)]
struct Tables {
	promotions: Vec<Promotion>,
	collections: Vec<Collection>,
	products: Vec<Product>,
	customers: Vec<Customer>,
	orders: Vec<Order>,
	order_items: Vec<OrderItem>,
	carts: Vec<Cart>,
	cart_items: Vec<CartItem>,
	tags: Vec<Tag>,
	tagged_items: Vec<TaggedItem>,
}

/// Saving a row whose primary key already exists replaces it.
fn save<M: Model>(table: &mut Vec<M>, row: M) {
	match table
		.iter_mut()
		.find(|existing| existing.primary_key() == row.primary_key())
	{
		Some(existing) => *existing = row,
		None => table.push(row),
	}
}

fn count_by<T>(rows: &[T], key: impl Fn(&T) -> i64) -> HashMap<i64, i64> {
	let mut counts = HashMap::new();
	for row in rows {
		*counts.entry(key(row)).or_insert(0) += 1;
	}
	counts
}

/// Shared store behind the admin site
///
/// # Examples
///
/// ```
/// use mainstore_admin::AdminDatabase;
/// use mainstore_admin::models::Collection;
///
/// let db = AdminDatabase::new();
/// db.save_collection(Collection { id: 1, title: "Beauty".to_string(), featured_product: None });
///
/// let rows = db.collections_with_product_count();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].annotation("product_count").and_then(|v| v.as_i64()), Some(0));
/// ```
#[derive(Debug, Default)]
pub struct AdminDatabase {
	tables: RwLock<Tables>,
}

macro_rules! table_access {
	($($save:ident, $list:ident => $table:ident: $ty:ty;)*) => {
		$(
			pub fn $save(&self, row: $ty) {
				save(&mut self.tables.write().$table, row);
			}

			pub fn $list(&self) -> Vec<$ty> {
				self.tables.read().$table.clone()
			}
		)*
	};
}

impl AdminDatabase {
	pub fn new() -> Self {
		Self::default()
	}

	table_access! {
		save_promotion, promotions => promotions: Promotion;
		save_collection, collections => collections: Collection;
		save_product, products => products: Product;
		save_customer, customers => customers: Customer;
		save_order, orders => orders: Order;
		save_order_item, order_items => order_items: OrderItem;
		save_cart, carts => carts: Cart;
		save_cart_item, cart_items => cart_items: CartItem;
		save_tag, tags => tags: Tag;
		save_tagged_item, tagged_items => tagged_items: TaggedItem;
	}

	/// Collections annotated with `product_count`
	pub fn collections_with_product_count(&self) -> Vec<Annotated<Collection>> {
		let tables = self.tables.read();
		let counts = count_by(&tables.products, |p| p.collection);
		tables
			.collections
			.iter()
			.map(|c| {
				let count = counts.get(&c.id).copied().unwrap_or(0);
				Annotated::new(c.clone()).annotate("product_count", count)
			})
			.collect()
	}

	/// Customers annotated with `full_name` and `order_count`
	pub fn customers_annotated(&self) -> Vec<Annotated<Customer>> {
		let tables = self.tables.read();
		let counts = count_by(&tables.orders, |o| o.customer);
		tables
			.customers
			.iter()
			.map(|c| {
				let count = counts.get(&c.id).copied().unwrap_or(0);
				Annotated::new(c.clone())
					.annotate("full_name", format!("{} {}", c.first_name, c.last_name))
					.annotate("order_count", count)
			})
			.collect()
	}

	/// Orders annotated with `order_items`, the number of their line items
	pub fn orders_with_item_count(&self) -> Vec<Annotated<Order>> {
		let tables = self.tables.read();
		let counts = count_by(&tables.order_items, |i| i.order);
		tables
			.orders
			.iter()
			.map(|o| {
				let count = counts.get(&o.id).copied().unwrap_or(0);
				Annotated::new(o.clone()).annotate("order_items", count)
			})
			.collect()
	}

	/// Set `quantity` on the given order items, returning the rows updated
	pub fn update_order_item_quantity(&self, ids: &[i64], quantity: i64) -> usize {
		let ids: HashSet<i64> = ids.iter().copied().collect();
		let mut tables = self.tables.write();
		let mut updated = 0;
		for item in tables.order_items.iter_mut().filter(|i| ids.contains(&i.id)) {
			item.quantity = quantity;
			updated += 1;
		}
		updated
	}

	/// Set `inventory` on the given products, returning the rows updated
	pub fn update_product_inventory(&self, ids: &[i64], inventory: i64) -> usize {
		let ids: HashSet<i64> = ids.iter().copied().collect();
		let mut tables = self.tables.write();
		let mut updated = 0;
		for product in tables.products.iter_mut().filter(|p| ids.contains(&p.id)) {
			product.inventory = inventory;
			updated += 1;
		}
		updated
	}
}
