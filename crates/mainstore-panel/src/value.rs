//! Dynamic field values exposed by admin records
//!
//! The list filters never see concrete model types. They read named fields
//! through [`FieldAccess`] and get back a [`FieldValue`].

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// A single field value read from a record
///
/// # Examples
///
/// ```
/// use mainstore_panel::FieldValue;
/// use rust_decimal::Decimal;
///
/// assert_eq!(FieldValue::Integer(3).as_decimal(), Some(Decimal::from(3)));
/// assert_eq!(FieldValue::from("gold").as_decimal(), None);
/// assert!(FieldValue::Null.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
	Integer(i64),
	Decimal(Decimal),
	Text(String),
	Boolean(bool),
	Date(NaiveDate),
	DateTime(DateTime<Utc>),
	Null,
}

impl FieldValue {
	/// Numeric view of the value, if it has one
	pub fn as_decimal(&self) -> Option<Decimal> {
		match self {
			FieldValue::Integer(i) => Some(Decimal::from(*i)),
			FieldValue::Decimal(d) => Some(*d),
			_ => None,
		}
	}

	pub fn as_i64(&self) -> Option<i64> {
		match self {
			FieldValue::Integer(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			FieldValue::Text(s) => Some(s),
			_ => None,
		}
	}

	/// Calendar date of the value; timestamps are truncated to their UTC date
	pub fn as_date(&self) -> Option<NaiveDate> {
		match self {
			FieldValue::Date(d) => Some(*d),
			FieldValue::DateTime(dt) => Some(dt.date_naive()),
			_ => None,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, FieldValue::Null)
	}

	fn kind_rank(&self) -> u8 {
		match self {
			FieldValue::Null => 0,
			FieldValue::Boolean(_) => 1,
			FieldValue::Integer(_) | FieldValue::Decimal(_) => 2,
			FieldValue::Date(_) | FieldValue::DateTime(_) => 3,
			FieldValue::Text(_) => 4,
		}
	}

	/// Total order used for list ordering
	///
	/// `Null` sorts first. Integers and decimals compare numerically, dates
	/// and timestamps compare chronologically, text compares
	/// lexicographically. Values of unrelated kinds compare by kind.
	///
	/// # Examples
	///
	/// ```
	/// use mainstore_panel::FieldValue;
	/// use rust_decimal::Decimal;
	/// use std::cmp::Ordering;
	///
	/// let price = FieldValue::Decimal(Decimal::new(25, 1));
	/// assert_eq!(FieldValue::Integer(2).compare(&price), Ordering::Less);
	/// assert_eq!(FieldValue::Null.compare(&price), Ordering::Less);
	/// ```
	pub fn compare(&self, other: &FieldValue) -> Ordering {
		if let (Some(a), Some(b)) = (self.as_decimal(), other.as_decimal()) {
			return a.cmp(&b);
		}
		match (self, other) {
			(FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
			(FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
			(FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
			(
				FieldValue::Date(_) | FieldValue::DateTime(_),
				FieldValue::Date(_) | FieldValue::DateTime(_),
			) => self.as_date().cmp(&other.as_date()),
			_ => self.kind_rank().cmp(&other.kind_rank()),
		}
	}

	/// JSON representation handed to the presentation layer
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			FieldValue::Integer(i) => serde_json::Value::from(*i),
			FieldValue::Decimal(d) => serde_json::Value::String(d.to_string()),
			FieldValue::Text(s) => serde_json::Value::String(s.clone()),
			FieldValue::Boolean(b) => serde_json::Value::Bool(*b),
			FieldValue::Date(d) => serde_json::Value::String(d.to_string()),
			FieldValue::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
			FieldValue::Null => serde_json::Value::Null,
		}
	}
}

impl fmt::Display for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldValue::Integer(i) => write!(f, "{}", i),
			FieldValue::Decimal(d) => write!(f, "{}", d),
			FieldValue::Text(s) => f.write_str(s),
			FieldValue::Boolean(b) => write!(f, "{}", b),
			FieldValue::Date(d) => write!(f, "{}", d),
			FieldValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
			FieldValue::Null => Ok(()),
		}
	}
}

impl From<i64> for FieldValue {
	fn from(value: i64) -> Self {
		FieldValue::Integer(value)
	}
}

impl From<Decimal> for FieldValue {
	fn from(value: Decimal) -> Self {
		FieldValue::Decimal(value)
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		FieldValue::Text(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		FieldValue::Text(value)
	}
}

impl From<bool> for FieldValue {
	fn from(value: bool) -> Self {
		FieldValue::Boolean(value)
	}
}

impl From<NaiveDate> for FieldValue {
	fn from(value: NaiveDate) -> Self {
		FieldValue::Date(value)
	}
}

impl From<DateTime<Utc>> for FieldValue {
	fn from(value: DateTime<Utc>) -> Self {
		FieldValue::DateTime(value)
	}
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(FieldValue::Null)
	}
}

/// Read access to the named fields of a record
///
/// Unknown fields read as [`FieldValue::Null`].
pub trait FieldAccess {
	fn field_value(&self, field: &str) -> FieldValue;
}

impl FieldAccess for HashMap<String, FieldValue> {
	fn field_value(&self, field: &str) -> FieldValue {
		self.get(field).cloned().unwrap_or(FieldValue::Null)
	}
}

impl<T: FieldAccess + ?Sized> FieldAccess for &T {
	fn field_value(&self, field: &str) -> FieldValue {
		(**self).field_value(field)
	}
}
