// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The track event payload.
//!
//! Wire shape of a bare [`Event::default()`]:
//!
//! ```json
//! {"event_type":"","user_id":"","event_properties":{},"user_properties":{},"ip":""}
//! ```
//!
//! | Field | Unset | Notes |
//! |-------|-------|-------|
//! | `event_type` | `""` | always present |
//! | `user_id` | `""` | `null` when explicitly cleared |
//! | `device_id` | omitted | |
//! | `event_properties` / `user_properties` | `{}` | always present |
//! | `ip` | `""` | always present |
//! | everything else | omitted | |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::properties::Properties;
use crate::user::{UserId, UserRef};

/// A single analytics event.
///
/// Fields are public so an event can be written as a configuration record
/// with struct-update syntax; the builder methods cover the common fields.
///
/// ```
/// use amplitude_api_core::{Event, UserId};
///
/// // Explicitly clearing the user id sends `"user_id": null`.
/// let event = Event {
///     event_type: "viewed pricing".into(),
///     user_id: None,
///     device_id: Some("abcdef".into()),
///     ..Default::default()
/// };
/// let json = serde_json::to_value(&event).unwrap();
/// assert!(json["user_id"].is_null());
///
/// // Leaving it alone sends the empty string.
/// let json = serde_json::to_value(Event::default()).unwrap();
/// assert_eq!(json["user_id"], "");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
	#[serde(default)]
	pub event_type: String,
	#[serde(default = "default_user_id")]
	pub user_id: Option<UserId>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub device_id: Option<String>,
	#[serde(default)]
	pub event_properties: Properties,
	#[serde(default)]
	pub user_properties: Properties,
	#[serde(default)]
	pub ip: String,

	/// Milliseconds since the Unix epoch.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub time: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub event_id: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub session_id: Option<i64>,
	/// Deduplication key honored by the ingestion endpoint.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub insert_id: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub price: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub quantity: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub revenue: Option<f64>,
	#[serde(default, rename = "productId", skip_serializing_if = "Option::is_none")]
	pub product_id: Option<String>,
	#[serde(default, rename = "revenueType", skip_serializing_if = "Option::is_none")]
	pub revenue_type: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub location_lat: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub location_lng: Option<f64>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub app_version: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub platform: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub os_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub os_version: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub device_brand: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub device_manufacturer: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub device_model: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub carrier: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub country: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dma: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub language: Option<String>,

	/// Google Play Services advertising id.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub adid: Option<String>,
	/// iOS identifier for advertisers.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub idfa: Option<String>,
}

fn default_user_id() -> Option<UserId> {
	Some(UserId::default())
}

impl Default for Event {
	fn default() -> Self {
		Self {
			event_type: String::new(),
			user_id: default_user_id(),
			device_id: None,
			event_properties: Properties::new(),
			user_properties: Properties::new(),
			ip: String::new(),
			time: None,
			event_id: None,
			session_id: None,
			insert_id: None,
			price: None,
			quantity: None,
			revenue: None,
			product_id: None,
			revenue_type: None,
			location_lat: None,
			location_lng: None,
			app_version: None,
			platform: None,
			os_name: None,
			os_version: None,
			device_brand: None,
			device_manufacturer: None,
			device_model: None,
			carrier: None,
			country: None,
			region: None,
			city: None,
			dma: None,
			language: None,
			adid: None,
			idfa: None,
		}
	}
}

impl Event {
	/// Creates an event of the given type with every other field defaulted.
	pub fn new(event_type: impl Into<String>) -> Self {
		Self {
			event_type: event_type.into(),
			..Self::default()
		}
	}

	/// Sets the user id.
	pub fn user_id(mut self, user_id: impl Into<UserId>) -> Self {
		self.user_id = Some(user_id.into());
		self
	}

	/// Sets the user id from a raw id, an entity, or no account at all.
	pub fn user<'a>(mut self, user: impl Into<UserRef<'a>>) -> Self {
		self.user_id = user.into().resolve();
		self
	}

	/// Sends the event for a user without an account (`"user_id": null`).
	pub fn anonymous(mut self) -> Self {
		self.user_id = None;
		self
	}

	/// Sets the device id; omitted from the payload when never set.
	pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
		self.device_id = Some(device_id.into());
		self
	}

	/// Replaces the event properties.
	pub fn event_properties(mut self, properties: impl Into<Properties>) -> Self {
		self.event_properties = properties.into();
		self
	}

	/// Replaces the user properties sent with the event.
	pub fn user_properties(mut self, properties: impl Into<Properties>) -> Self {
		self.user_properties = properties.into();
		self
	}

	/// Sets the client IP address.
	pub fn ip(mut self, ip: impl Into<String>) -> Self {
		self.ip = ip.into();
		self
	}

	/// Sets the event time, sent as epoch milliseconds.
	pub fn time(mut self, time: DateTime<Utc>) -> Self {
		self.time = Some(time.timestamp_millis());
		self
	}

	/// Sets the caller-assigned event id.
	pub fn event_id(mut self, event_id: i64) -> Self {
		self.event_id = Some(event_id);
		self
	}

	/// Sets the session start time in epoch milliseconds.
	pub fn session_id(mut self, session_id: i64) -> Self {
		self.session_id = Some(session_id);
		self
	}

	/// Sets the deduplication id.
	pub fn insert_id(mut self, insert_id: impl Into<String>) -> Self {
		self.insert_id = Some(insert_id.into());
		self
	}

	/// Attaches revenue fields. See [`Revenue`] for the quantity default.
	pub fn revenue(mut self, revenue: Revenue) -> Self {
		if revenue.price.is_some() {
			self.quantity = Some(revenue.quantity.unwrap_or(1));
		} else {
			self.quantity = revenue.quantity;
		}
		self.price = revenue.price;
		self.revenue = revenue.revenue;
		self.product_id = revenue.product_id;
		self.revenue_type = revenue.revenue_type;
		self
	}

	/// Sets latitude and longitude.
	pub fn location(mut self, lat: f64, lng: f64) -> Self {
		self.location_lat = Some(lat);
		self.location_lng = Some(lng);
		self
	}

	/// Sets the application version.
	pub fn app_version(mut self, version: impl Into<String>) -> Self {
		self.app_version = Some(version.into());
		self
	}

	/// Sets the platform (e.g. `iOS`, `Web`).
	pub fn platform(mut self, platform: impl Into<String>) -> Self {
		self.platform = Some(platform.into());
		self
	}

	/// Sets the operating system name and version.
	pub fn os(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
		self.os_name = Some(name.into());
		self.os_version = Some(version.into());
		self
	}
}

/// Revenue fields of an event.
///
/// A `price` without a `quantity` is sent with `quantity: 1`; the service
/// computes revenue as `price * quantity` and ignores a price on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Revenue {
	pub price: Option<f64>,
	pub quantity: Option<i64>,
	pub revenue: Option<f64>,
	pub product_id: Option<String>,
	pub revenue_type: Option<String>,
}

impl Revenue {
	/// Creates revenue with a unit price.
	pub fn price(price: f64) -> Self {
		Self {
			price: Some(price),
			..Self::default()
		}
	}

	/// Sets how many units were bought.
	pub fn quantity(mut self, quantity: i64) -> Self {
		self.quantity = Some(quantity);
		self
	}

	/// Sets the product identifier (`productId`).
	pub fn product_id(mut self, product_id: impl Into<String>) -> Self {
		self.product_id = Some(product_id.into());
		self
	}

	/// Sets the revenue type (`revenueType`), e.g. `refund`.
	pub fn revenue_type(mut self, revenue_type: impl Into<String>) -> Self {
		self.revenue_type = Some(revenue_type.into());
		self
	}
}
