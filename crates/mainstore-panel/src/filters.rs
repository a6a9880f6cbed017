//! List filtering functionality for admin views
//!
//! This module provides the infrastructure for narrowing record lists in admin
//! list views: the [`ListFilter`] trait, the simple choice and date filters,
//! and the [`FilterManager`] holding the filters of one model admin.

use crate::value::FieldAccess;
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// One selectable option of a list filter
///
/// # Examples
///
/// ```
/// use mainstore_panel::FilterChoice;
///
/// let choice = FilterChoice::new("order-range", "low", "low");
/// assert_eq!(choice.to_query_param().unwrap(), "order-range=low");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterChoice {
	/// Query parameter the choice is sent under
	pub parameter: String,
	/// Value sent back when the choice is picked
	pub value: String,
	/// Display text for the choice
	pub display: String,
}

impl FilterChoice {
	pub fn new(
		parameter: impl Into<String>,
		value: impl Into<String>,
		display: impl Into<String>,
	) -> Self {
		Self {
			parameter: parameter.into(),
			value: value.into(),
			display: display.into(),
		}
	}

	/// Convert to an url-encoded `parameter=value` pair
	pub fn to_query_param(&self) -> Result<String, serde_urlencoded::ser::Error> {
		serde_urlencoded::to_string([(self.parameter.as_str(), self.value.as_str())])
	}
}

/// Trait for list filters
///
/// A filter owns one query parameter. The value of that parameter is the
/// selection; [`filter_records`] keeps the records the filter
/// [`matches`](ListFilter::matches) for it.
///
/// # Examples
///
/// ```
/// use mainstore_panel::{FieldAccess, FilterChoice, ListFilter};
///
/// struct PaidFilter;
///
/// impl ListFilter for PaidFilter {
///     fn parameter_name(&self) -> &str {
///         "paid"
///     }
///
///     fn title(&self) -> &str {
///         "Paid"
///     }
///
///     fn choices(&self) -> Vec<FilterChoice> {
///         vec![FilterChoice::new("paid", "yes", "Yes")]
///     }
///
///     fn matches(&self, record: &dyn FieldAccess, _selection: &str) -> bool {
///         record.field_value("payment_status").as_text() == Some("C")
///     }
///
///     fn lookups(&self, _selection: &str) -> Vec<String> {
///         vec!["payment_status__exact=C".to_string()]
///     }
/// }
///
/// assert!(PaidFilter.recognizes("yes"));
/// assert!(!PaidFilter.recognizes("no"));
/// ```
pub trait ListFilter: Send + Sync {
	/// Query parameter carrying the selection
	fn parameter_name(&self) -> &str;

	/// Get the filter title displayed in UI
	fn title(&self) -> &str;

	/// Get available filter choices
	fn choices(&self) -> Vec<FilterChoice>;

	/// Whether `selection` names one of the choices
	fn recognizes(&self, selection: &str) -> bool {
		self.choices().iter().any(|c| c.value == selection)
	}

	/// Whether `record` passes the filter under a recognized `selection`
	fn matches(&self, record: &dyn FieldAccess, selection: &str) -> bool;

	/// Lookups describing the selected predicate, in `field__op=value` form
	fn lookups(&self, selection: &str) -> Vec<String>;

	/// Check if a value is selected
	fn is_selected(&self, value: &str, current_filters: &HashMap<String, String>) -> bool {
		current_filters
			.get(self.parameter_name())
			.is_some_and(|v| v == value)
	}
}

/// Apply `filter` to `records` under `selection`
///
/// No selection, or a selection the filter does not recognize, leaves the
/// records untouched.
pub fn filter_records<R: FieldAccess>(
	filter: &dyn ListFilter,
	records: Vec<R>,
	selection: Option<&str>,
) -> Vec<R> {
	let Some(selection) = selection else {
		return records;
	};
	if !filter.recognizes(selection) {
		tracing::debug!(
			parameter = filter.parameter_name(),
			selection,
			"ignoring unrecognized filter selection"
		);
		return records;
	}
	records
		.into_iter()
		.filter(|record| filter.matches(record, selection))
		.collect()
}

/// Choice filter for fields with predefined values
///
/// Matches when the field's display string equals the selection, so foreign
/// keys filter by their id.
///
/// # Examples
///
/// ```
/// use mainstore_panel::{ChoiceFilter, ListFilter};
///
/// let filter = ChoiceFilter::new("membership", "Membership")
///     .add_choice("B", "Bronze")
///     .add_choice("S", "Silver")
///     .add_choice("G", "Gold");
///
/// assert_eq!(filter.choices().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ChoiceFilter {
	field: String,
	title: String,
	choices: Vec<(String, String)>, // (value, display)
}

impl ChoiceFilter {
	/// Create a new choice filter; the field name doubles as query parameter
	pub fn new(field: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			title: title.into(),
			choices: Vec::new(),
		}
	}

	/// Add a choice option
	pub fn add_choice(mut self, value: impl Into<String>, display: impl Into<String>) -> Self {
		self.choices.push((value.into(), display.into()));
		self
	}

	/// Set all choices at once
	pub fn with_choices(mut self, choices: Vec<(String, String)>) -> Self {
		self.choices = choices;
		self
	}
}

impl ListFilter for ChoiceFilter {
	fn parameter_name(&self) -> &str {
		&self.field
	}

	fn title(&self) -> &str {
		&self.title
	}

	fn choices(&self) -> Vec<FilterChoice> {
		self.choices
			.iter()
			.map(|(value, display)| FilterChoice::new(&self.field, value, display))
			.collect()
	}

	fn matches(&self, record: &dyn FieldAccess, selection: &str) -> bool {
		let value = record.field_value(&self.field);
		!value.is_null() && value.to_string() == selection
	}

	fn lookups(&self, selection: &str) -> Vec<String> {
		vec![format!("{}__exact={}", self.field, selection)]
	}
}

/// Date range filter
///
/// Periods are computed relative to an anchor date. Unless one is set with
/// [`anchored_at`](DateRangeFilter::anchored_at), the anchor is the local
/// date at the time the filter is evaluated. Each period runs from its start
/// up to and including the anchor date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use mainstore_panel::{DateRangeFilter, ListFilter};
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let filter = DateRangeFilter::new("last_update", "Last update").anchored_at(today);
///
/// assert_eq!(filter.choices().len(), 4);
/// assert_eq!(filter.period_start("this_month"), NaiveDate::from_ymd_opt(2024, 3, 1));
/// ```
#[derive(Debug, Clone)]
pub struct DateRangeFilter {
	field: String,
	title: String,
	anchor: Option<NaiveDate>,
}

const DATE_PERIODS: [(&str, &str); 4] = [
	("today", "Today"),
	("past_7_days", "Past 7 days"),
	("this_month", "This month"),
	("this_year", "This year"),
];

impl DateRangeFilter {
	/// Create a new date range filter following the local date
	pub fn new(field: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			title: title.into(),
			anchor: None,
		}
	}

	/// Pin the periods to `today`
	pub fn anchored_at(mut self, today: NaiveDate) -> Self {
		self.anchor = Some(today);
		self
	}

	/// Date the periods end on
	pub fn today(&self) -> NaiveDate {
		self.anchor.unwrap_or_else(|| Local::now().date_naive())
	}

	/// First day of the period named by `selection`
	pub fn period_start(&self, selection: &str) -> Option<NaiveDate> {
		self.period(selection).map(|(start, _)| start)
	}

	/// `(start, end)` of the period, both inclusive
	fn period(&self, selection: &str) -> Option<(NaiveDate, NaiveDate)> {
		let today = self.today();
		let start = match selection {
			"today" => Some(today),
			"past_7_days" => Some(today - Duration::days(7)),
			"this_month" => NaiveDate::from_ymd_opt(today.year(), today.month(), 1),
			"this_year" => NaiveDate::from_ymd_opt(today.year(), 1, 1),
			_ => None,
		}?;
		Some((start, today))
	}
}

impl ListFilter for DateRangeFilter {
	fn parameter_name(&self) -> &str {
		&self.field
	}

	fn title(&self) -> &str {
		&self.title
	}

	fn choices(&self) -> Vec<FilterChoice> {
		DATE_PERIODS
			.iter()
			.map(|(value, display)| FilterChoice::new(&self.field, *value, *display))
			.collect()
	}

	fn recognizes(&self, selection: &str) -> bool {
		DATE_PERIODS.iter().any(|(value, _)| *value == selection)
	}

	fn matches(&self, record: &dyn FieldAccess, selection: &str) -> bool {
		let Some((start, end)) = self.period(selection) else {
			return false;
		};
		record
			.field_value(&self.field)
			.as_date()
			.is_some_and(|date| start <= date && date <= end)
	}

	fn lookups(&self, selection: &str) -> Vec<String> {
		let Some((start, end)) = self.period(selection) else {
			return Vec::new();
		};
		vec![
			format!("{}__gte={}", self.field, start),
			format!("{}__lt={}", self.field, end + Duration::days(1)),
		]
	}
}

/// Filter manager for handling the filters of one model admin
///
/// # Examples
///
/// ```
/// use mainstore_panel::{ChoiceFilter, FilterManager};
///
/// let manager = FilterManager::new()
///     .add_filter(ChoiceFilter::new("membership", "Membership").add_choice("G", "Gold"))
///     .add_filter(ChoiceFilter::new("collection", "Collection"));
///
/// assert_eq!(manager.filter_count(), 2);
/// assert!(manager.owns("membership"));
/// ```
pub struct FilterManager {
	filters: Vec<Box<dyn ListFilter>>,
	// Cache for filter lookups by parameter name
	filter_cache: Arc<dashmap::DashMap<String, usize>>,
}

impl FilterManager {
	/// Create a new filter manager
	pub fn new() -> Self {
		Self {
			filters: Vec::new(),
			filter_cache: Arc::new(dashmap::DashMap::new()),
		}
	}

	/// Add a filter
	pub fn add_filter(mut self, filter: impl ListFilter + 'static) -> Self {
		let parameter = filter.parameter_name().to_string();
		let index = self.filters.len();
		self.filters.push(Box::new(filter));
		self.filter_cache.insert(parameter, index);
		self
	}

	/// Get all filters, in registration order
	pub fn filters(&self) -> &[Box<dyn ListFilter>] {
		&self.filters
	}

	/// Get number of filters
	pub fn filter_count(&self) -> usize {
		self.filters.len()
	}

	/// Check if any filters are present
	pub fn is_empty(&self) -> bool {
		self.filters.is_empty()
	}

	/// Whether some filter owns `parameter`
	pub fn owns(&self, parameter: &str) -> bool {
		self.get_filter(parameter).is_some()
	}

	/// Get filter by parameter name (cached lookup)
	pub fn get_filter(&self, parameter: &str) -> Option<&dyn ListFilter> {
		if let Some(index) = self.filter_cache.get(parameter) {
			return self.filters.get(*index).map(|b| &**b);
		}

		for (idx, filter) in self.filters.iter().enumerate() {
			if filter.parameter_name() == parameter {
				self.filter_cache.insert(parameter.to_string(), idx);
				return Some(&**filter);
			}
		}

		None
	}

	/// Apply every filter whose parameter appears in `selected`
	///
	/// Parameters no filter owns are skipped here; callers that must reject
	/// them check [`owns`](Self::owns) first.
	pub fn apply<R: FieldAccess>(
		&self,
		records: Vec<R>,
		selected: &HashMap<String, String>,
	) -> Vec<R> {
		self.filters.iter().fold(records, |records, filter| {
			let selection = selected.get(filter.parameter_name()).map(String::as_str);
			filter_records(&**filter, records, selection)
		})
	}

	/// Lookups for the selected choices, in registration order
	pub fn lookup_params(&self, selected: &HashMap<String, String>) -> Vec<String> {
		self.filters
			.iter()
			.filter_map(|filter| {
				selected
					.get(filter.parameter_name())
					.filter(|value| filter.recognizes(value))
					.map(|value| filter.lookups(value))
			})
			.flatten()
			.collect()
	}
}

impl Default for FilterManager {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::FieldValue;

	fn record(pairs: &[(&str, FieldValue)]) -> HashMap<String, FieldValue> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.clone()))
			.collect()
	}

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[test]
	fn test_filter_choice_new() {
		let choice = FilterChoice::new("membership", "G", "Gold");
		assert_eq!(choice.parameter, "membership");
		assert_eq!(choice.value, "G");
		assert_eq!(choice.display, "Gold");
		assert_eq!(choice.to_query_param().unwrap(), "membership=G");
	}

	#[test]
	fn test_filter_choice_query_param_is_encoded() {
		let choice = FilterChoice::new("collection", "Home & Garden", "Home & Garden");
		assert_eq!(choice.to_query_param().unwrap(), "collection=Home+%26+Garden");
	}

	#[test]
	fn test_choice_filter() {
		let filter = ChoiceFilter::new("membership", "Membership")
			.add_choice("B", "Bronze")
			.add_choice("S", "Silver")
			.add_choice("G", "Gold");

		assert_eq!(filter.parameter_name(), "membership");
		assert_eq!(filter.title(), "Membership");

		let choices = filter.choices();
		assert_eq!(choices.len(), 3);
		assert_eq!(choices[0].value, "B");
		assert_eq!(choices[2].display, "Gold");
		assert_eq!(filter.lookups("G"), vec!["membership__exact=G".to_string()]);
	}

	#[test]
	fn test_choice_filter_matches_foreign_key_id() {
		let filter = ChoiceFilter::new("collection", "Collection")
			.with_choices(vec![("3".to_string(), "Beauty".to_string())]);
		let product = record(&[("collection", FieldValue::Integer(3))]);
		let orphan = record(&[("collection", FieldValue::Null)]);

		assert!(filter.matches(&product, "3"));
		assert!(!filter.matches(&orphan, "3"));
	}

	#[test]
	fn test_date_range_filter_periods() {
		let filter =
			DateRangeFilter::new("last_update", "Last update").anchored_at(date(2024, 3, 15));
		assert_eq!(filter.period_start("today"), Some(date(2024, 3, 15)));
		assert_eq!(filter.period_start("past_7_days"), Some(date(2024, 3, 8)));
		assert_eq!(filter.period_start("this_month"), Some(date(2024, 3, 1)));
		assert_eq!(filter.period_start("this_year"), Some(date(2024, 1, 1)));
		assert_eq!(filter.period_start("any"), None);
	}

	#[test]
	fn test_date_range_filter_matches() {
		let filter =
			DateRangeFilter::new("last_update", "Last update").anchored_at(date(2024, 3, 15));
		let early = record(&[("last_update", FieldValue::Date(date(2024, 2, 28)))]);
		let recent = record(&[("last_update", FieldValue::Date(date(2024, 3, 10)))]);
		let future = record(&[("last_update", FieldValue::Date(date(2024, 3, 16)))]);

		assert!(!filter.matches(&early, "this_month"));
		assert!(filter.matches(&recent, "this_month"));
		assert!(filter.matches(&recent, "past_7_days"));
		assert!(!filter.matches(&recent, "today"));
		assert!(!filter.matches(&future, "this_year"));
	}

	#[test]
	fn test_date_range_filter_follows_local_date() {
		let filter = DateRangeFilter::new("last_update", "Last update");
		let before = Local::now().date_naive();
		let today = filter.today();
		let after = Local::now().date_naive();

		assert!(before <= today && today <= after);
		assert_eq!(filter.period_start("today"), Some(filter.today()));

		let pinned = filter.anchored_at(date(2024, 3, 15));
		assert_eq!(pinned.today(), date(2024, 3, 15));
	}

	#[test]
	fn test_date_range_filter_lookups() {
		let filter =
			DateRangeFilter::new("last_update", "Last update").anchored_at(date(2024, 3, 15));
		assert_eq!(
			filter.lookups("this_month"),
			vec![
				"last_update__gte=2024-03-01".to_string(),
				"last_update__lt=2024-03-16".to_string()
			]
		);
	}

	#[test]
	fn test_filter_records_identity_without_selection() {
		let filter = ChoiceFilter::new("membership", "Membership").add_choice("G", "Gold");
		let records = vec![
			record(&[("membership", FieldValue::from("G"))]),
			record(&[("membership", FieldValue::from("B"))]),
		];
		assert_eq!(filter_records(&filter, records.clone(), None), records);
		assert_eq!(filter_records(&filter, records.clone(), Some("X")), records);
		assert_eq!(filter_records(&filter, records, Some("G")).len(), 1);
	}

	#[test]
	fn test_filter_manager_new() {
		let manager = FilterManager::new();
		assert!(manager.is_empty());
		assert_eq!(manager.filter_count(), 0);
	}

	#[test]
	fn test_filter_manager_get_filter() {
		let manager = FilterManager::new()
			.add_filter(ChoiceFilter::new("membership", "Membership"))
			.add_filter(DateRangeFilter::new("last_update", "Last update"));

		let filter = manager.get_filter("last_update");
		assert!(filter.is_some());
		assert_eq!(filter.unwrap().title(), "Last update");
		assert!(manager.get_filter("nonexistent").is_none());
	}

	#[test]
	fn test_filter_manager_apply() {
		let manager = FilterManager::new()
			.add_filter(ChoiceFilter::new("membership", "Membership").add_choice("G", "Gold"))
			.add_filter(ChoiceFilter::new("city", "City").add_choice("Oslo", "Oslo"));

		let records = vec![
			record(&[("membership", "G".into()), ("city", "Oslo".into())]),
			record(&[("membership", "G".into()), ("city", "Rome".into())]),
			record(&[("membership", "B".into()), ("city", "Oslo".into())]),
		];

		let mut selected = HashMap::new();
		selected.insert("membership".to_string(), "G".to_string());
		selected.insert("city".to_string(), "Oslo".to_string());
		selected.insert("unrelated".to_string(), "1".to_string());

		let filtered = manager.apply(records, &selected);
		assert_eq!(filtered.len(), 1);
		assert_eq!(filtered[0].field_value("city"), FieldValue::from("Oslo"));
	}

	#[test]
	fn test_filter_manager_lookup_params() {
		let manager = FilterManager::new()
			.add_filter(ChoiceFilter::new("membership", "Membership").add_choice("G", "Gold"));

		let mut selected = HashMap::new();
		selected.insert("membership".to_string(), "G".to_string());
		assert_eq!(
			manager.lookup_params(&selected),
			vec!["membership__exact=G".to_string()]
		);

		selected.insert("membership".to_string(), "Z".to_string());
		assert!(manager.lookup_params(&selected).is_empty());
	}

	#[test]
	fn test_list_filter_is_selected() {
		let filter = ChoiceFilter::new("membership", "Membership");

		let mut current = HashMap::new();
		current.insert("membership".to_string(), "G".to_string());

		assert!(filter.is_selected("G", &current));
		assert!(!filter.is_selected("B", &current));
	}
}
