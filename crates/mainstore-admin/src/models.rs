//! Mainstore models as the admin sees them
//!
//! Rows are owned by the store; the admin only reads their fields through
//! [`FieldAccess`]. Foreign keys are exposed under the relation name
//! (`collection`, `customer`, `order`, `product`) and read as the related id.

use chrono::{DateTime, NaiveDate, Utc};
use mainstore_panel::{FieldAccess, FieldValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stored row with a primary key
pub trait Model: FieldAccess + Clone + Send + Sync {
	/// Lowercase model name, as used in admin URLs
	fn model_name() -> &'static str;

	fn primary_key(&self) -> i64;
}

/// Customer membership tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Membership {
	#[default]
	#[serde(rename = "B")]
	Bronze,
	#[serde(rename = "S")]
	Silver,
	#[serde(rename = "G")]
	Gold,
}

impl Membership {
	pub const ALL: [Membership; 3] = [Membership::Bronze, Membership::Silver, Membership::Gold];

	/// Stored code
	pub fn code(&self) -> &'static str {
		match self {
			Membership::Bronze => "B",
			Membership::Silver => "S",
			Membership::Gold => "G",
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Membership::Bronze => "Bronze",
			Membership::Silver => "Silver",
			Membership::Gold => "Gold",
		}
	}
}

/// Order payment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
	#[default]
	#[serde(rename = "P")]
	Pending,
	#[serde(rename = "C")]
	Complete,
	#[serde(rename = "F")]
	Failed,
}

impl PaymentStatus {
	pub fn code(&self) -> &'static str {
		match self {
			PaymentStatus::Pending => "P",
			PaymentStatus::Complete => "C",
			PaymentStatus::Failed => "F",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
	pub id: i64,
	pub description: String,
	pub discount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
	pub id: i64,
	pub title: String,
	pub featured_product: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
	pub id: i64,
	pub title: String,
	pub slug: String,
	pub description: String,
	pub price: Decimal,
	pub inventory: i64,
	pub last_update: NaiveDate,
	pub collection: i64,
	pub promotions: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
	pub id: i64,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub phone: String,
	pub birth_date: Option<NaiveDate>,
	pub membership: Membership,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
	pub id: i64,
	pub placed_at: DateTime<Utc>,
	pub payment_status: PaymentStatus,
	pub customer: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
	pub id: i64,
	pub order: i64,
	pub product: i64,
	pub quantity: i64,
	pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
	pub id: i64,
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
	pub id: i64,
	pub cart: i64,
	pub product: i64,
	pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
	pub id: i64,
	pub label: String,
}

/// Generic tag attachment, keyed by model name and object id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedItem {
	pub id: i64,
	pub tag: i64,
	pub content_type: String,
	pub object_id: i64,
}

macro_rules! impl_model {
	($ty:ty, $name:literal, { $($field:literal => |$row:ident| $value:expr),* $(,)? }) => {
		impl Model for $ty {
			fn model_name() -> &'static str {
				$name
			}

			fn primary_key(&self) -> i64 {
				self.id
			}
		}

		impl FieldAccess for $ty {
			fn field_value(&self, field: &str) -> FieldValue {
				match field {
					"id" | "pk" => FieldValue::Integer(self.id),
					$($field => {
						let $row = self;
						FieldValue::from($value)
					})*
					_ => FieldValue::Null,
				}
			}
		}
	};
}

impl_model!(Promotion, "promotions", {
	"description" => |p| p.description.as_str(),
	"discount" => |p| p.discount,
});

impl_model!(Collection, "collection", {
	"title" => |c| c.title.as_str(),
	"featured_product" => |c| c.featured_product,
});

impl_model!(Product, "product", {
	"title" => |p| p.title.as_str(),
	"slug" => |p| p.slug.as_str(),
	"description" => |p| p.description.as_str(),
	"price" => |p| p.price,
	"inventory" => |p| p.inventory,
	"last_update" => |p| p.last_update,
	"collection" => |p| p.collection,
});

impl_model!(Customer, "customer", {
	"first_name" => |c| c.first_name.as_str(),
	"last_name" => |c| c.last_name.as_str(),
	"email" => |c| c.email.as_str(),
	"phone" => |c| c.phone.as_str(),
	"birth_date" => |c| c.birth_date,
	"membership" => |c| c.membership.code(),
});

impl_model!(Order, "order", {
	"placed_at" => |o| o.placed_at,
	"payment_status" => |o| o.payment_status.code(),
	"customer" => |o| o.customer,
});

impl_model!(OrderItem, "orderitem", {
	"order" => |i| i.order,
	"product" => |i| i.product,
	"quantity" => |i| i.quantity,
	"unit_price" => |i| i.unit_price,
});

impl_model!(Cart, "cart", {
	"created_at" => |c| c.created_at,
});

impl_model!(CartItem, "cartitem", {
	"cart" => |i| i.cart,
	"product" => |i| i.product,
	"quantity" => |i| i.quantity,
});

impl_model!(Tag, "tag", {
	"label" => |t| t.label.as_str(),
});

impl_model!(TaggedItem, "taggeditem", {
	"tag" => |t| t.tag,
	"content_type" => |t| t.content_type.as_str(),
	"object_id" => |t| t.object_id,
});
