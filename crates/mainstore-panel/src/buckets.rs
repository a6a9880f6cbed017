//! Range-bucket list filters
//!
//! A [`BucketSpec`] partitions the domain of one numeric field into named
//! buckets, each a conjunction of threshold comparisons. A
//! [`RangeBucketFilter`] binds a spec to a field and a query parameter and
//! narrows a record list down to the selected bucket.
//!
//! Thresholds are fixed per use site. Nothing here checks that a spec covers
//! the whole domain: values falling between buckets simply match none of them.

use crate::filters::{FilterChoice, ListFilter, filter_records};
use crate::value::{FieldAccess, FieldValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Comparison used by a bucket threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupOperator {
	Lt,
	Lte,
	Gt,
	Gte,
}

impl LookupOperator {
	/// Lookup suffix in `field__op=value` notation
	pub fn as_str(&self) -> &'static str {
		match self {
			LookupOperator::Lt => "lt",
			LookupOperator::Lte => "lte",
			LookupOperator::Gt => "gt",
			LookupOperator::Gte => "gte",
		}
	}

	fn evaluate(&self, value: Decimal, threshold: Decimal) -> bool {
		match self {
			LookupOperator::Lt => value < threshold,
			LookupOperator::Lte => value <= threshold,
			LookupOperator::Gt => value > threshold,
			LookupOperator::Gte => value >= threshold,
		}
	}
}

/// One threshold comparison of a bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
	pub operator: LookupOperator,
	pub threshold: Decimal,
}

impl Condition {
	pub fn new(operator: LookupOperator, threshold: impl Into<Decimal>) -> Self {
		Self {
			operator,
			threshold: threshold.into(),
		}
	}

	pub fn matches(&self, value: Decimal) -> bool {
		self.operator.evaluate(value, self.threshold)
	}

	/// Render as a lookup on `field`
	///
	/// # Examples
	///
	/// ```
	/// use mainstore_panel::{Condition, LookupOperator};
	///
	/// let condition = Condition::new(LookupOperator::Gte, 2);
	/// assert_eq!(condition.lookup("order_count"), "order_count__gte=2");
	/// ```
	pub fn lookup(&self, field: &str) -> String {
		format!("{}__{}={}", field, self.operator.as_str(), self.threshold)
	}
}

/// A named sub-range of a numeric field
///
/// A value belongs to the bucket when it satisfies every condition.
///
/// # Examples
///
/// ```
/// use mainstore_panel::{Bucket, FieldValue};
///
/// let middle = Bucket::new("middle", "middle").gte(2).lt(4);
/// assert!(middle.matches(&FieldValue::Integer(3)));
/// assert!(!middle.matches(&FieldValue::Integer(4)));
/// assert!(!middle.matches(&FieldValue::Null));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
	name: String,
	label: String,
	conditions: Vec<Condition>,
}

impl Bucket {
	/// Create a bucket with no thresholds yet
	///
	/// `name` is the selection key sent back by the UI, `label` is what the
	/// choice list displays.
	pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: label.into(),
			conditions: Vec::new(),
		}
	}

	pub fn lt(self, threshold: impl Into<Decimal>) -> Self {
		self.with_condition(Condition::new(LookupOperator::Lt, threshold))
	}

	pub fn lte(self, threshold: impl Into<Decimal>) -> Self {
		self.with_condition(Condition::new(LookupOperator::Lte, threshold))
	}

	pub fn gt(self, threshold: impl Into<Decimal>) -> Self {
		self.with_condition(Condition::new(LookupOperator::Gt, threshold))
	}

	pub fn gte(self, threshold: impl Into<Decimal>) -> Self {
		self.with_condition(Condition::new(LookupOperator::Gte, threshold))
	}

	pub fn with_condition(mut self, condition: Condition) -> Self {
		self.conditions.push(condition);
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn conditions(&self) -> &[Condition] {
		&self.conditions
	}

	/// Non-numeric and null values belong to no bucket.
	pub fn matches(&self, value: &FieldValue) -> bool {
		match value.as_decimal() {
			Some(number) => self.conditions.iter().all(|c| c.matches(number)),
			None => false,
		}
	}

	/// Lookups equivalent to this bucket's predicate on `field`
	pub fn lookups(&self, field: &str) -> Vec<String> {
		self.conditions.iter().map(|c| c.lookup(field)).collect()
	}
}

/// Ordered set of buckets over one numeric field
///
/// # Examples
///
/// ```
/// use mainstore_panel::{Bucket, BucketSpec, FieldValue};
///
/// let spec = BucketSpec::new()
///     .with_bucket(Bucket::new("low", "low").lt(2))
///     .with_bucket(Bucket::new("high", "high").gte(2));
///
/// assert_eq!(spec.len(), 2);
/// assert_eq!(spec.classify(&FieldValue::Integer(5)).map(|b| b.name()), Some("high"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketSpec {
	buckets: Vec<Bucket>,
}

impl BucketSpec {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_bucket(mut self, bucket: Bucket) -> Self {
		self.buckets.push(bucket);
		self
	}

	pub fn buckets(&self) -> &[Bucket] {
		&self.buckets
	}

	pub fn len(&self) -> usize {
		self.buckets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buckets.is_empty()
	}

	/// Bucket selected by `name`
	pub fn get(&self, name: &str) -> Option<&Bucket> {
		self.buckets.iter().find(|b| b.name == name)
	}

	/// First bucket covering `value`, if any
	pub fn classify(&self, value: &FieldValue) -> Option<&Bucket> {
		self.buckets.iter().find(|b| b.matches(value))
	}

	/// Keep the records whose `field` falls into the selected bucket
	///
	/// With no selection, or a selection naming no bucket, the records come
	/// back untouched.
	///
	/// # Examples
	///
	/// ```
	/// use mainstore_panel::{Bucket, BucketSpec, FieldValue};
	/// use std::collections::HashMap;
	///
	/// let spec = BucketSpec::new().with_bucket(Bucket::new("low", "Low").lt(300));
	/// let records: Vec<HashMap<String, FieldValue>> = [120_i64, 450]
	///     .into_iter()
	///     .map(|v| HashMap::from([("inventory".to_string(), FieldValue::Integer(v))]))
	///     .collect();
	///
	/// assert_eq!(spec.apply(records.clone(), "inventory", Some("low")).len(), 1);
	/// assert_eq!(spec.apply(records.clone(), "inventory", Some("high")).len(), 2);
	/// assert_eq!(spec.apply(records, "inventory", None).len(), 2);
	/// ```
	pub fn apply<R: FieldAccess>(
		&self,
		records: Vec<R>,
		field: &str,
		selection: Option<&str>,
	) -> Vec<R> {
		let Some(bucket) = selection.and_then(|name| self.get(name)) else {
			return records;
		};
		records
			.into_iter()
			.filter(|record| bucket.matches(&record.field_value(field)))
			.collect()
	}
}

/// List filter narrowing a numeric field to one bucket
///
/// # Examples
///
/// ```
/// use mainstore_panel::{Bucket, BucketSpec, ListFilter, RangeBucketFilter};
///
/// let filter = RangeBucketFilter::new(
///     "Inventory",
///     "inventory",
///     "inventory",
///     BucketSpec::new().with_bucket(Bucket::new("low", "Low").lt(300)),
/// );
///
/// assert_eq!(filter.parameter_name(), "inventory");
/// assert_eq!(filter.choices()[0].to_query_param().unwrap(), "inventory=low");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RangeBucketFilter {
	title: String,
	parameter_name: String,
	field: String,
	spec: BucketSpec,
}

impl RangeBucketFilter {
	pub fn new(
		title: impl Into<String>,
		parameter_name: impl Into<String>,
		field: impl Into<String>,
		spec: BucketSpec,
	) -> Self {
		Self {
			title: title.into(),
			parameter_name: parameter_name.into(),
			field: field.into(),
			spec,
		}
	}

	/// Field the buckets are evaluated against
	pub fn field(&self) -> &str {
		&self.field
	}

	pub fn spec(&self) -> &BucketSpec {
		&self.spec
	}

	/// Narrow `records` to the selected bucket
	pub fn queryset<R: FieldAccess>(&self, records: Vec<R>, selection: Option<&str>) -> Vec<R> {
		filter_records(self, records, selection)
	}
}

impl ListFilter for RangeBucketFilter {
	fn parameter_name(&self) -> &str {
		&self.parameter_name
	}

	fn title(&self) -> &str {
		&self.title
	}

	fn choices(&self) -> Vec<FilterChoice> {
		self.spec
			.buckets()
			.iter()
			.map(|b| FilterChoice::new(&self.parameter_name, b.name(), b.label()))
			.collect()
	}

	fn recognizes(&self, selection: &str) -> bool {
		self.spec.get(selection).is_some()
	}

	fn matches(&self, record: &dyn FieldAccess, selection: &str) -> bool {
		self.spec
			.get(selection)
			.is_some_and(|b| b.matches(&record.field_value(&self.field)))
	}

	fn lookups(&self, selection: &str) -> Vec<String> {
		self.spec
			.get(selection)
			.map(|b| b.lookups(&self.field))
			.unwrap_or_default()
	}
}
