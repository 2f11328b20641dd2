// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Amplitude HTTP API.
//!
//! This crate holds the value objects that are serialized into request bodies:
//!
//! - [`Event`]: a single user/device action, sent through the track endpoint
//! - [`Identification`]: an update to a user's properties, sent through the
//!   identify endpoint
//! - [`EventFilter`] / [`SegmentationOptions`]: parameters of a segmentation
//!   query
//!
//! The wire shape of [`Event`] and [`Identification`] is exact: absent fields
//! resolve to fixed defaults and some keys are omitted entirely when unset.
//! The remote service treats presence, absence and `null` differently, so
//! these rules are part of the contract.
//!
//! ```
//! use amplitude_api_core::{Event, Properties};
//!
//! let event = Event::new("clicked on sign up")
//!     .user_id(123)
//!     .event_properties(Properties::new().insert("plan", "pro"));
//!
//! let json = serde_json::to_value(&event).unwrap();
//! assert_eq!(json["user_id"], 123);
//! assert!(json.get("device_id").is_none());
//! ```

pub mod event;
pub mod identification;
pub mod properties;
pub mod segmentation;
pub mod user;

pub use event::{Event, Revenue};
pub use identification::Identification;
pub use properties::Properties;
pub use segmentation::{
	format_query_date, EventFilter, GroupBy, PropertyFilter, SegmentCondition, SegmentationOptions,
};
pub use user::{HasIdentity, UserId, UserRef};
