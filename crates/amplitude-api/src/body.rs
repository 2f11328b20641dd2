// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Form bodies of the track and identify requests.
//!
//! Both endpoints take a form with two fields: the API key, and a JSON
//! array of payloads encoded as a string.
//!
//! ```text
//! api_key=<key>&event=[{"event_type":...},...]
//! api_key=<key>&identification=[{"user_id":...},...]
//! ```

use amplitude_api_core::{Event, Identification};
use serde::Serialize;

use crate::error::Result;

/// One or more payloads sent in a single request.
///
/// Built from a single value, a `Vec`, an array or a slice, so `track`
/// accepts any of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T>(Vec<T>);

impl<T> Batch<T> {
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn items(&self) -> &[T] {
		&self.0
	}

	pub fn into_inner(self) -> Vec<T> {
		self.0
	}
}

impl<T: Serialize> Batch<T> {
	/// The JSON array string placed in the form.
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(&self.0)?)
	}
}

impl From<Event> for Batch<Event> {
	fn from(event: Event) -> Self {
		Self(vec![event])
	}
}

impl From<Identification> for Batch<Identification> {
	fn from(identification: Identification) -> Self {
		Self(vec![identification])
	}
}

impl<T> From<Vec<T>> for Batch<T> {
	fn from(items: Vec<T>) -> Self {
		Self(items)
	}
}

impl<T, const N: usize> From<[T; N]> for Batch<T> {
	fn from(items: [T; N]) -> Self {
		Self(items.into())
	}
}

impl<T: Clone> From<&[T]> for Batch<T> {
	fn from(items: &[T]) -> Self {
		Self(items.to_vec())
	}
}

/// Body of a track request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackBody {
	pub api_key: String,
	pub event: String,
}

impl TrackBody {
	pub fn form(&self) -> [(&'static str, &str); 2] {
		[("api_key", self.api_key.as_str()), ("event", self.event.as_str())]
	}
}

/// Body of an identify request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifyBody {
	pub api_key: String,
	pub identification: String,
}

impl IdentifyBody {
	pub fn form(&self) -> [(&'static str, &str); 2] {
		[
			("api_key", self.api_key.as_str()),
			("identification", self.identification.as_str()),
		]
	}
}
