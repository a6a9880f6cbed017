//! Changelist evaluation
//!
//! Turns a model's records and the query string of a list page into one page
//! of rendered rows: list filters, then search, then ordering, then
//! pagination.

use crate::error::{AdminError, AdminResult};
use crate::model_admin::ModelAdminConfig;
use crate::settings::AdminSettings;
use mainstore_panel::{FieldAccess, FieldValue};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Query parameter holding the 1-based page number
pub const PAGE_PARAM: &str = "p";
/// Query parameter holding the search text
pub const SEARCH_PARAM: &str = "q";
/// Query parameter holding the ordering column, `-` prefixed for descending
pub const ORDER_PARAM: &str = "o";

/// Parsed changelist query string
///
/// # Examples
///
/// ```
/// use mainstore_admin::ChangeListQuery;
///
/// let query = ChangeListQuery::from_query_string("p=2&o=-orders&order-range=high").unwrap();
/// assert_eq!(query.page, 2);
/// assert_eq!(query.ordering.as_deref(), Some("-orders"));
/// assert_eq!(query.params.get("order-range").map(String::as_str), Some("high"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeListQuery {
	pub page: usize,
	pub search: Option<String>,
	pub ordering: Option<String>,
	/// Filter parameter to selected choice
	pub params: HashMap<String, String>,
}

impl Default for ChangeListQuery {
	fn default() -> Self {
		Self {
			page: 1,
			search: None,
			ordering: None,
			params: HashMap::new(),
		}
	}
}

impl ChangeListQuery {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_query_string(query: &str) -> AdminResult<Self> {
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
		let mut parsed = Self::default();
		for (key, value) in pairs {
			match key.as_str() {
				PAGE_PARAM => {
					parsed.page = value.parse().map_err(|_| {
						AdminError::QueryString(format!("invalid page number '{}'", value))
					})?;
				}
				SEARCH_PARAM => parsed.search = Some(value),
				ORDER_PARAM => parsed.ordering = Some(value),
				_ => {
					parsed.params.insert(key, value);
				}
			}
		}
		Ok(parsed)
	}

	/// Encode back into a query string, filter parameters sorted by name
	pub fn to_query_string(&self) -> AdminResult<String> {
		let mut pairs: Vec<(&str, String)> = Vec::new();
		if self.page != 1 {
			pairs.push((PAGE_PARAM, self.page.to_string()));
		}
		if let Some(search) = &self.search {
			pairs.push((SEARCH_PARAM, search.clone()));
		}
		if let Some(ordering) = &self.ordering {
			pairs.push((ORDER_PARAM, ordering.clone()));
		}
		let mut params: Vec<(&String, &String)> = self.params.iter().collect();
		params.sort();
		pairs.extend(params.into_iter().map(|(k, v)| (k.as_str(), v.clone())));
		Ok(serde_urlencoded::to_string(pairs)?)
	}

	pub fn with_page(mut self, page: usize) -> Self {
		self.page = page;
		self
	}

	pub fn with_search(mut self, search: impl Into<String>) -> Self {
		self.search = Some(search.into());
		self
	}

	pub fn with_ordering(mut self, ordering: impl Into<String>) -> Self {
		self.ordering = Some(ordering.into());
		self
	}

	pub fn with_param(mut self, parameter: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(parameter.into(), value.into());
		self
	}
}

/// One choice of a list filter, as shown in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
	pub value: String,
	pub display: String,
	pub query: String,
	pub selected: bool,
}

/// A list filter with its choices
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterView {
	pub parameter: String,
	pub title: String,
	pub choices: Vec<ChoiceView>,
}

/// A rendered changelist row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeListRow {
	pub pk: Option<i64>,
	pub values: serde_json::Map<String, serde_json::Value>,
}

/// One page of a changelist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeListPage {
	pub model_name: String,
	/// Rows before any filter or search
	pub full_count: usize,
	/// Rows after filters and search
	pub count: usize,
	pub page: usize,
	pub per_page: usize,
	pub total_pages: usize,
	pub columns: Vec<String>,
	pub rows: Vec<ChangeListRow>,
	pub filters: Vec<FilterView>,
	/// Store lookups equivalent to the selected filter choices
	pub lookups: Vec<String>,
}

/// Changelist of one model admin
pub struct ChangeList;

impl ChangeList {
	/// Evaluate `query` against `records` of the model `admin` manages
	///
	/// Filter parameters that no list filter of the admin owns are rejected.
	pub fn evaluate<R: FieldAccess>(
		admin: &ModelAdminConfig,
		settings: &AdminSettings,
		records: Vec<R>,
		query: &ChangeListQuery,
	) -> AdminResult<ChangeListPage> {
		let filters = admin.filters();
		let mut unknown: Vec<&String> = query.params.keys().filter(|p| !filters.owns(p)).collect();
		unknown.sort();
		if let Some(parameter) = unknown.first() {
			let allowed: Vec<String> = filters
				.filters()
				.iter()
				.map(|f| f.parameter_name().to_string())
				.collect();
			tracing::warn!(
				model = admin.model_name(),
				parameter = parameter.as_str(),
				"rejected unknown filter parameter"
			);
			return Err(AdminError::UnknownFilter {
				parameter: parameter.to_string(),
				allowed,
			});
		}

		let full_count = records.len();
		let records = filters.apply(records, &query.params);
		let mut records = search(admin, records, query.search.as_deref());

		let sort_keys = sort_keys(admin, query.ordering.as_deref());
		if !sort_keys.is_empty() {
			records.sort_by(|a, b| compare_rows(a, b, &sort_keys));
		}

		let count = records.len();
		let per_page = admin
			.list_per_page()
			.unwrap_or(settings.list_per_page)
			.min(settings.max_page_size)
			.max(1);
		let total_pages = count.div_ceil(per_page).max(1);
		if query.page == 0 || query.page > total_pages {
			return Err(AdminError::InvalidPage {
				page: query.page,
				total_pages,
			});
		}

		let rows = records
			.iter()
			.skip((query.page - 1) * per_page)
			.take(per_page)
			.map(|record| render_row(admin, settings, record))
			.collect::<AdminResult<Vec<_>>>()?;

		tracing::debug!(
			model = admin.model_name(),
			filters = ?query.params,
			count,
			page = query.page,
			"evaluated changelist"
		);

		Ok(ChangeListPage {
			model_name: admin.model_name().to_string(),
			full_count,
			count,
			page: query.page,
			per_page,
			total_pages,
			columns: admin
				.list_display()
				.iter()
				.map(|c| c.name().to_string())
				.collect(),
			rows,
			filters: filter_views(admin, query)?,
			lookups: filters.lookup_params(&query.params),
		})
	}
}

/// Each whitespace separated term must appear, case-insensitively, in at
/// least one search field.
fn search<R: FieldAccess>(admin: &ModelAdminConfig, records: Vec<R>, text: Option<&str>) -> Vec<R> {
	let terms: Vec<String> = text
		.unwrap_or_default()
		.split_whitespace()
		.map(str::to_lowercase)
		.collect();
	if terms.is_empty() || admin.search_fields().is_empty() {
		return records;
	}
	records
		.into_iter()
		.filter(|record| {
			let haystacks: Vec<String> = admin
				.search_fields()
				.iter()
				.map(|field| record.field_value(field).to_string().to_lowercase())
				.collect();
			terms
				.iter()
				.all(|term| haystacks.iter().any(|h| h.contains(term.as_str())))
		})
		.collect()
}

/// `(field, descending)` pairs; an `o` naming a sortable column wins over
/// the admin's default ordering.
fn sort_keys(admin: &ModelAdminConfig, ordering: Option<&str>) -> Vec<(String, bool)> {
	if let Some(ordering) = ordering {
		let descending = ordering.starts_with('-');
		let name = ordering.trim_start_matches('-');
		match admin.column(name).and_then(|c| c.ordering_field()) {
			Some(field) => return vec![(field.to_string(), descending)],
			None => tracing::debug!(
				model = admin.model_name(),
				ordering,
				"ignoring ordering on unsortable column"
			),
		}
	}
	admin
		.ordering()
		.iter()
		.map(|field| {
			(
				field.trim_start_matches('-').to_string(),
				field.starts_with('-'),
			)
		})
		.collect()
}

fn compare_rows<R: FieldAccess>(a: &R, b: &R, keys: &[(String, bool)]) -> Ordering {
	for (field, descending) in keys {
		let ordering = a.field_value(field).compare(&b.field_value(field));
		let ordering = if *descending {
			ordering.reverse()
		} else {
			ordering
		};
		if ordering != Ordering::Equal {
			return ordering;
		}
	}
	Ordering::Equal
}

fn render_row<R: FieldAccess>(
	admin: &ModelAdminConfig,
	settings: &AdminSettings,
	record: &R,
) -> AdminResult<ChangeListRow> {
	let mut values = serde_json::Map::new();
	for column in admin.list_display() {
		let value: FieldValue = column.render(record, settings)?;
		values.insert(column.name().to_string(), value.to_json());
	}
	Ok(ChangeListRow {
		pk: record.field_value("id").as_i64(),
		values,
	})
}

fn filter_views(admin: &ModelAdminConfig, query: &ChangeListQuery) -> AdminResult<Vec<FilterView>> {
	admin
		.filters()
		.filters()
		.iter()
		.map(|filter| -> AdminResult<FilterView> {
			let current = query.params.get(filter.parameter_name()).map(String::as_str);
			let choices = filter
				.choices()
				.into_iter()
				.map(|choice| -> AdminResult<ChoiceView> {
					Ok(ChoiceView {
						selected: current == Some(choice.value.as_str()),
						query: choice.to_query_param()?,
						value: choice.value,
						display: choice.display,
					})
				})
				.collect::<AdminResult<Vec<_>>>()?;
			Ok(FilterView {
				parameter: filter.parameter_name().to_string(),
				title: filter.title().to_string(),
				choices,
			})
		})
		.collect()
}
