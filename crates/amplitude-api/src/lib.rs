// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust client for the Amplitude HTTP API.
//!
//! Sends events to the track endpoint, user property updates to the identify
//! endpoint, and runs event segmentation queries. Every operation is exactly
//! one HTTP request; nothing is queued, batched across calls, or retried.
//!
//! # Quick Start
//!
//! ```ignore
//! use amplitude_api::{AmplitudeClient, Event, EventOptions, Properties};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AmplitudeClient::builder()
//!         .api_key("api_key")
//!         .secret_key("secret_key")
//!         .build()?;
//!
//!     // Several events in one request
//!     client.track([
//!         Event::new("clicked on sign up").user_id(123),
//!         Event::new("liked a widget").user_id(456),
//!     ]).await?;
//!
//!     // A single event from its parts
//!     client.send_event(
//!         "played a song",
//!         123,
//!         None,
//!         EventOptions::new().event_properties(Properties::new().insert("genre", "jazz")),
//!     ).await?;
//!
//!     // Update user properties
//!     client.send_identify(123, None, Properties::new().insert("plan", "pro")).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Responses
//!
//! The service's reply comes back as an [`ApiResponse`] whatever its
//! status. Only local failures (missing credentials, invalid endpoints,
//! serialization, transport errors) are [`AmplitudeError`]s.
//!
//! # Segmentation
//!
//! ```ignore
//! use amplitude_api::{EventFilter, SegmentCondition, SegmentationOptions};
//! use chrono::{Duration, Utc};
//!
//! let response = client.segmentation(
//!     &EventFilter::new("played a song"),
//!     Utc::now() - Duration::days(7),
//!     Utc::now(),
//!     &SegmentationOptions::new().segment(SegmentCondition::new("country", "is", ["Chile"])),
//! ).await?;
//! let result: serde_json::Value = response.json()?;
//! ```
//!
//! Segmentation authenticates with the project secret key; a client without
//! one fails with [`AmplitudeError::MissingSecretKey`] before any request.

pub mod body;
pub mod client;
pub mod error;
pub mod transport;

pub use body::{Batch, IdentifyBody, TrackBody};
pub use client::{identification_for, AmplitudeClient, AmplitudeClientBuilder, EventOptions};
pub use error::{AmplitudeError, Result};
pub use transport::{user_agent, ApiResponse, BasicAuth, HttpTransport, ReqwestTransport};

pub use amplitude_api_config::{AmplitudeConfig, Endpoints, SecretString};
pub use amplitude_api_core::{
	format_query_date, Event, EventFilter, GroupBy, HasIdentity, Identification, Properties,
	PropertyFilter, Revenue, SegmentCondition, SegmentationOptions, UserId, UserRef,
};
