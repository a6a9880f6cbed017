//! Store fixtures shared by the admin integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use mainstore_admin::AdminDatabase;
use mainstore_admin::models::{
	Collection, Customer, Membership, Order, OrderItem, PaymentStatus, Product, TaggedItem,
};
use rust_decimal::Decimal;
use std::sync::Arc;

pub fn customer(id: i64, first_name: &str, last_name: &str, membership: Membership) -> Customer {
	Customer {
		id,
		first_name: first_name.to_string(),
		last_name: last_name.to_string(),
		email: format!("{}@example.com", first_name.to_lowercase()),
		phone: String::new(),
		birth_date: None,
		membership,
	}
}

pub fn order(id: i64, customer: i64) -> Order {
	Order {
		id,
		placed_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
		payment_status: PaymentStatus::Complete,
		customer,
	}
}

pub fn order_item(id: i64, order: i64, quantity: i64) -> OrderItem {
	OrderItem {
		id,
		order,
		product: 1,
		quantity,
		unit_price: Decimal::new(1000, 0),
	}
}

pub fn product(id: i64, title: &str, price: i64, inventory: i64, collection: i64) -> Product {
	Product {
		id,
		title: title.to_string(),
		slug: title.to_lowercase().replace(' ', "-"),
		description: String::new(),
		price: Decimal::from(price),
		inventory,
		last_update: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
		collection,
		promotions: Vec::new(),
	}
}

/// Six customers with 0 to 5 orders; customer `n + 1` has `n` orders.
pub fn customers_with_orders() -> Arc<AdminDatabase> {
	let db = AdminDatabase::new();
	let names = [
		("Ada", "Byron", Membership::Gold),
		("Grace", "Hopper", Membership::Silver),
		("Alan", "Turing", Membership::Bronze),
		("Edsger", "Dijkstra", Membership::Bronze),
		("Barbara", "Liskov", Membership::Gold),
		("Donald", "Knuth", Membership::Silver),
	];
	let mut order_id = 1;
	for (idx, (first, last, membership)) in names.into_iter().enumerate() {
		let customer_id = idx as i64 + 1;
		db.save_customer(customer(customer_id, first, last, membership));
		for _ in 0..idx {
			db.save_order(order(order_id, customer_id));
			order_id += 1;
		}
	}
	Arc::new(db)
}

/// Products priced 3000 to 5500 in steps of 500, with items and tags
pub fn catalog() -> Arc<AdminDatabase> {
	let db = AdminDatabase::new();
	db.save_collection(Collection {
		id: 1,
		title: "Furniture".to_string(),
		featured_product: None,
	});
	db.save_collection(Collection {
		id: 2,
		title: "Lighting".to_string(),
		featured_product: Some(4),
	});
	let prices = [3000, 3500, 4000, 4500, 5000, 5500];
	for (idx, price) in prices.into_iter().enumerate() {
		let id = idx as i64 + 1;
		let inventory = 100 * id;
		let collection = if id <= 4 { 1 } else { 2 };
		db.save_product(product(id, &format!("Item {}", id), price, inventory, collection));
	}
	db.save_order(order(1, 1));
	for (idx, quantity) in [150, 200, 300, 400, 500].into_iter().enumerate() {
		db.save_order_item(order_item(idx as i64 + 1, 1, quantity));
	}
	db.save_tagged_item(TaggedItem {
		id: 1,
		tag: 1,
		content_type: "product".to_string(),
		object_id: 2,
	});
	Arc::new(db)
}
