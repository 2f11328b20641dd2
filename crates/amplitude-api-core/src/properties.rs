// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event and user property maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A string-keyed map of JSON values, used for `event_properties` and
/// `user_properties`.
///
/// Always serializes as a JSON object; an empty map is sent as `{}`,
/// never omitted and never `null`.
///
/// ```
/// use amplitude_api_core::Properties;
///
/// let props = Properties::new()
///     .insert("first_name", "John")
///     .insert("last_name", "Doe")
///     .insert("logins", 3);
///
/// assert_eq!(props.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
	inner: Map<String, Value>,
}

impl Properties {
	/// Creates a new empty Properties builder.
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Inserts a property, replacing any previous value under the same key.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Merges `other` into this map; `other` wins on conflicting keys.
	pub fn merge(mut self, other: Properties) -> Self {
		self.inner.extend(other.inner);
		self
	}

	/// Returns true if no properties are set.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Returns the number of properties.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Returns the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	/// Converts into a JSON object value.
	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}
}

impl From<Properties> for Value {
	fn from(props: Properties) -> Self {
		props.into_value()
	}
}

/// Non-object values carry no properties and convert to an empty map.
impl From<Value> for Properties {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => Self { inner: map },
			_ => Self::new(),
		}
	}
}

impl From<Map<String, Value>> for Properties {
	fn from(map: Map<String, Value>) -> Self {
		Self { inner: map }
	}
}

impl<K, V> FromIterator<(K, V)> for Properties
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			inner: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn empty_properties_serialize_as_empty_object() {
		assert_eq!(serde_json::to_string(&Properties::new()).unwrap(), "{}");
	}

	#[test]
	fn insert_mixed_values() {
		let props = Properties::new()
			.insert("test_property", 1)
			.insert("plan", "pro")
			.insert("beta", true);

		assert_eq!(props.len(), 3);
		assert_eq!(props.get("test_property"), Some(&Value::from(1)));
		assert_eq!(props.get("plan"), Some(&Value::from("pro")));
		assert_eq!(props.get("beta"), Some(&Value::Bool(true)));
	}

	#[test]
	fn merge_prefers_other() {
		let merged = Properties::new()
			.insert("a", 1)
			.insert("b", 2)
			.merge(Properties::new().insert("b", 20).insert("c", 3));

		assert_eq!(merged.len(), 3);
		assert_eq!(merged.get("b"), Some(&Value::from(20)));
	}

	#[test]
	fn non_object_value_converts_to_empty() {
		assert!(Properties::from(Value::from("nope")).is_empty());
		assert!(Properties::from(Value::Null).is_empty());
	}

	#[test]
	fn collects_from_pairs() {
		let props: Properties = vec![("first_name", "John"), ("last_name", "Doe")]
			.into_iter()
			.collect();
		assert_eq!(
			serde_json::to_value(&props).unwrap(),
			serde_json::json!({"first_name": "John", "last_name": "Doe"})
		);
	}

	proptest! {
		#[test]
		fn len_counts_distinct_keys(keys in proptest::collection::vec("[a-z]{1,10}", 0..20)) {
			let distinct: std::collections::HashSet<_> = keys.iter().cloned().collect();
			let props = keys.iter().fold(Properties::new(), |p, k| p.insert(k.clone(), "v"));
			prop_assert_eq!(props.len(), distinct.len());
		}

		#[test]
		fn serde_roundtrip(key in "[a-z_]{1,20}", value in "[a-zA-Z0-9 ]{0,40}") {
			let props = Properties::new().insert(key, value);
			let json = serde_json::to_string(&props).unwrap();
			let parsed: Properties = serde_json::from_str(&json).unwrap();
			prop_assert_eq!(props, parsed);
		}
	}
}
