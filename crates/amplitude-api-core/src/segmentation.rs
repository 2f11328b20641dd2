// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Parameters of an event segmentation query.
//!
//! A segmentation query is a GET with these query parameters:
//!
//! | Param | Source | Encoding |
//! |-------|--------|----------|
//! | `e` | [`EventFilter`] | JSON |
//! | `m` | [`SegmentationOptions::metric`] | plain |
//! | `start` / `end` | query dates | `YYYYMMDD` |
//! | `i` | [`SegmentationOptions::interval`] | plain |
//! | `s` | [`SegmentationOptions::segments`] | one JSON param per condition |
//! | `g` | [`SegmentationOptions::group_by`] | plain |
//! | `limit` | [`SegmentationOptions::limit`] | plain |
//! | any other | [`SegmentationOptions::extra`] | plain, after `limit` |
//!
//! Unset options are left out of the query string.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// The `e` parameter: which event to count and how to filter it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
	pub event_type: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub filters: Vec<PropertyFilter>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub group_by: Vec<GroupBy>,
}

impl EventFilter {
	pub fn new(event_type: impl Into<String>) -> Self {
		Self {
			event_type: event_type.into(),
			..Self::default()
		}
	}

	/// Adds a property filter.
	pub fn filter(mut self, filter: PropertyFilter) -> Self {
		self.filters.push(filter);
		self
	}

	pub fn group_by(mut self, group_by: GroupBy) -> Self {
		self.group_by.push(group_by);
		self
	}
}

/// A property filter inside an [`EventFilter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFilter {
	/// `"event"` or `"user"`.
	pub subprop_type: String,
	pub subprop_key: String,
	pub subprop_op: String,
	pub subprop_value: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBy {
	#[serde(rename = "type")]
	pub kind: String,
	pub value: String,
}

/// A user segment condition, sent as one `s` parameter.
///
/// ```
/// use amplitude_api_core::SegmentCondition;
///
/// let cond = SegmentCondition::new("foo", "is", ["bar"]);
/// assert_eq!(
///     serde_json::to_string(&cond).unwrap(),
///     r#"{"prop":"foo","op":"is","values":["bar"]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentCondition {
	pub prop: String,
	pub op: String,
	pub values: Vec<String>,
}

impl SegmentCondition {
	pub fn new<I, S>(prop: impl Into<String>, op: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			prop: prop.into(),
			op: op.into(),
			values: values.into_iter().map(Into::into).collect(),
		}
	}
}

/// Optional pass-through parameters of a segmentation query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentationOptions {
	/// `m`: `uniques`, `totals`, `pct_dau`, `average`, ...
	pub metric: Option<String>,
	/// `i`: `1` daily, `7` weekly, `30` monthly, `-300000` realtime, ...
	pub interval: Option<i32>,
	/// `s`: user segment conditions.
	pub segments: Vec<SegmentCondition>,
	/// `g`: property to group by.
	pub group_by: Option<String>,
	pub limit: Option<u32>,
	/// Any other query parameters, sent verbatim in insertion order.
	pub extra: Vec<(String, String)>,
}

impl SegmentationOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the `m` metric.
	pub fn metric(mut self, metric: impl Into<String>) -> Self {
		self.metric = Some(metric.into());
		self
	}

	/// Sets the `i` interval.
	pub fn interval(mut self, interval: i32) -> Self {
		self.interval = Some(interval);
		self
	}

	/// Adds a user segment condition.
	pub fn segment(mut self, condition: SegmentCondition) -> Self {
		self.segments.push(condition);
		self
	}

	pub fn group_by(mut self, property: impl Into<String>) -> Self {
		self.group_by = Some(property.into());
		self
	}

	/// Caps the number of group-by values returned.
	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);
		self
	}

	/// Adds a pass-through query parameter. Repeated keys are all sent.
	pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra.push((key.into(), value.into()));
		self
	}
}

/// Formats a date as the 8-digit `YYYYMMDD` the query endpoints expect.
///
/// Accepts anything with a calendar date: `NaiveDate`, `DateTime<Utc>`,
/// `DateTime<Local>`, ... Years are clamped to `0000..=9999`, the range
/// an 8-digit date can carry.
pub fn format_query_date<D: Datelike>(date: &D) -> String {
	let year = date.year().clamp(0, 9999);
	format!("{:04}{:02}{:02}", year, date.month(), date.day())
}
