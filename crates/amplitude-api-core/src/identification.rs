// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The identify payload.
//!
//! An identification updates the property set of a user or device without
//! recording an action. It follows the same presence rules as
//! [`Event`](crate::Event): `user_id` defaults to `""` and is `null` when
//! cleared, `device_id` is omitted when unset, `user_properties` is `{}` when
//! empty.

use serde::{Deserialize, Serialize};

use crate::properties::Properties;
use crate::user::{UserId, UserRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identification {
	#[serde(default = "default_user_id")]
	pub user_id: Option<UserId>,
	/// A string or a number; numeric device ids stay numbers on the wire.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub device_id: Option<UserId>,
	#[serde(default)]
	pub user_properties: Properties,
}

fn default_user_id() -> Option<UserId> {
	Some(UserId::default())
}

impl Default for Identification {
	fn default() -> Self {
		Self {
			user_id: default_user_id(),
			device_id: None,
			user_properties: Properties::new(),
		}
	}
}

impl Identification {
	/// Creates an identification with every field defaulted.
	pub fn new() -> Self {
		Self::default()
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

	/// Sets the device id.
	pub fn device_id(mut self, device_id: impl Into<UserId>) -> Self {
		self.device_id = Some(device_id.into());
		self
	}

	/// Replaces the user properties.
	pub fn user_properties(mut self, properties: impl Into<Properties>) -> Self {
		self.user_properties = properties.into();
		self
	}
}
