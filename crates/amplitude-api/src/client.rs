// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for the track, identify and segmentation endpoints.

use std::sync::Arc;
use std::time::Duration;

use amplitude_api_config::{AmplitudeConfig, Endpoints, SecretString, DEFAULT_REQUEST_TIMEOUT};
use amplitude_api_core::{
	format_query_date, Event, EventFilter, Identification, Properties, SegmentationOptions,
	UserId, UserRef,
};
use chrono::Datelike;
use tracing::{debug, info};

use crate::body::{Batch, IdentifyBody, TrackBody};
use crate::error::{AmplitudeError, Result};
use crate::transport::{ApiResponse, BasicAuth, HttpTransport, ReqwestTransport};

/// Builder for constructing an AmplitudeClient.
pub struct AmplitudeClientBuilder {
	api_key: Option<SecretString>,
	secret_key: Option<SecretString>,
	endpoints: Endpoints,
	request_timeout: Duration,
	transport: Option<Arc<dyn HttpTransport>>,
}

impl AmplitudeClientBuilder {
	pub fn new() -> Self {
		Self {
			api_key: None,
			secret_key: None,
			endpoints: Endpoints::default(),
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			transport: None,
		}
	}

	/// Sets the project API key. Required.
	pub fn api_key(mut self, key: impl Into<SecretString>) -> Self {
		self.api_key = Some(key.into());
		self
	}

	/// Sets the project secret key, used only by segmentation queries.
	pub fn secret_key(mut self, key: impl Into<SecretString>) -> Self {
		self.secret_key = Some(key.into());
		self
	}

	pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = endpoints;
		self
	}

	/// Sets the HTTP timeout of the default transport. Ignored when a
	/// custom transport is supplied.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	/// Replaces the default reqwest transport.
	pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
		self.transport = Some(transport);
		self
	}

	/// Validates the configuration and builds the client.
	pub fn build(self) -> Result<AmplitudeClient> {
		let api_key = self
			.api_key
			.filter(|key| !key.expose().is_empty())
			.ok_or(AmplitudeError::MissingApiKey)?;

		self.endpoints.validate()?;

		let transport: Arc<dyn HttpTransport> = match self.transport {
			Some(transport) => transport,
			None => Arc::new(ReqwestTransport::new(self.request_timeout)?),
		};

		info!(
			track = %self.endpoints.track,
			identify = %self.endpoints.identify,
			segmentation = %self.endpoints.segmentation,
			has_secret_key = self.secret_key.is_some(),
			"Amplitude client initialized"
		);

		Ok(AmplitudeClient {
			api_key,
			secret_key: self.secret_key,
			endpoints: self.endpoints,
			transport,
		})
	}
}

impl Default for AmplitudeClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Keyword options of [`AmplitudeClient::send_event`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventOptions {
	pub event_properties: Properties,
	pub user_properties: Properties,
	pub ip: Option<String>,
}

impl EventOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the event properties.
	pub fn event_properties(mut self, properties: impl Into<Properties>) -> Self {
		self.event_properties = properties.into();
		self
	}

	/// Sets the user properties.
	pub fn user_properties(mut self, properties: impl Into<Properties>) -> Self {
		self.user_properties = properties.into();
		self
	}

	/// Sets the client IP address.
	pub fn ip(mut self, ip: impl Into<String>) -> Self {
		self.ip = Some(ip.into());
		self
	}

	/// Assembles the event `send_event` will track.
	pub fn into_event<'a>(
		self,
		event_type: impl Into<String>,
		user: impl Into<UserRef<'a>>,
		device_id: Option<&str>,
	) -> Event {
		Event {
			event_type: event_type.into(),
			user_id: user.into().resolve(),
			device_id: device_id.map(str::to_string),
			event_properties: self.event_properties,
			user_properties: self.user_properties,
			ip: self.ip.unwrap_or_default(),
			..Event::default()
		}
	}
}

fn query_param(key: &str, value: String) -> (String, String) {
	(key.to_string(), value)
}

/// Assembles the identification `send_identify` will submit.
pub fn identification_for<'a>(
	user: impl Into<UserRef<'a>>,
	device_id: Option<&str>,
	user_properties: impl Into<Properties>,
) -> Identification {
	Identification {
		user_id: user.into().resolve(),
		device_id: device_id.map(UserId::from),
		user_properties: user_properties.into(),
	}
}

/// Client for the Amplitude HTTP API.
///
/// Holds one set of credentials and nothing else; every network operation is
/// exactly one request, and the response is returned whatever its status.
///
/// # Example
///
/// ```ignore
/// use amplitude_api::{AmplitudeClient, Event, EventOptions, Properties};
///
/// let client = AmplitudeClient::new("api_key")?;
///
/// // One POST carrying both events
/// client.track([
///     Event::new("clicked on sign up").user_id(123),
///     Event::new("liked a widget").user_id(456),
/// ]).await?;
///
/// // Convenience form; `None` sends the event without an account
/// let response = client.send_event(
///     "test_event",
///     None::<amplitude_api::UserId>,
///     Some("abcdef"),
///     EventOptions::new().event_properties(Properties::new().insert("test_property", 1)),
/// ).await?;
///
/// if !response.is_success() {
///     eprintln!("rejected: {} {}", response.status, response.body);
/// }
/// ```
#[derive(Clone)]
pub struct AmplitudeClient {
	api_key: SecretString,
	secret_key: Option<SecretString>,
	endpoints: Endpoints,
	transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for AmplitudeClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AmplitudeClient")
			.field("api_key", &self.api_key)
			.field("secret_key", &self.secret_key)
			.field("endpoints", &self.endpoints)
			.finish_non_exhaustive()
	}
}

impl AmplitudeClient {
	/// Creates a new builder.
	pub fn builder() -> AmplitudeClientBuilder {
		AmplitudeClientBuilder::new()
	}

	/// Creates a client with default endpoints and no secret key.
	pub fn new(api_key: impl Into<SecretString>) -> Result<Self> {
		Self::builder().api_key(api_key).build()
	}

	/// Creates a client from a loaded configuration.
	pub fn from_config(config: &AmplitudeConfig) -> Result<Self> {
		let mut builder = Self::builder()
			.api_key(config.api_key.clone())
			.endpoints(config.endpoints.clone())
			.request_timeout(config.request_timeout);
		if let Some(secret_key) = &config.secret_key {
			builder = builder.secret_key(secret_key.clone());
		}
		builder.build()
	}

	pub fn api_key(&self) -> &SecretString {
		&self.api_key
	}

	pub fn secret_key(&self) -> Option<&SecretString> {
		self.secret_key.as_ref()
	}

	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	/// Builds the body `track` would send. Pure.
	pub fn track_body(&self, events: impl Into<Batch<Event>>) -> Result<TrackBody> {
		Ok(TrackBody {
			api_key: self.api_key.expose().clone(),
			event: events.into().to_json()?,
		})
	}

	/// Builds the body `identify` would send. Pure.
	pub fn identify_body(
		&self,
		identifications: impl Into<Batch<Identification>>,
	) -> Result<IdentifyBody> {
		Ok(IdentifyBody {
			api_key: self.api_key.expose().clone(),
			identification: identifications.into().to_json()?,
		})
	}

	/// Sends one or more events in a single POST.
	pub async fn track(&self, events: impl Into<Batch<Event>>) -> Result<ApiResponse> {
		let events = events.into();
		let count = events.len();
		let body = self.track_body(events)?;

		debug!(url = %self.endpoints.track, count, "Sending track request");
		let response = self
			.transport
			.post_form(&self.endpoints.track, &body.form())
			.await?;
		debug!(status = response.status.as_u16(), "Track request completed");

		Ok(response)
	}

	/// Sends one or more identifications in a single POST.
	pub async fn identify(
		&self,
		identifications: impl Into<Batch<Identification>>,
	) -> Result<ApiResponse> {
		let identifications = identifications.into();
		let count = identifications.len();
		let body = self.identify_body(identifications)?;

		debug!(url = %self.endpoints.identify, count, "Sending identify request");
		let response = self
			.transport
			.post_form(&self.endpoints.identify, &body.form())
			.await?;
		debug!(status = response.status.as_u16(), "Identify request completed");

		Ok(response)
	}

	/// Tracks a single event built from its parts.
	///
	/// `user` may be a raw id, a reference to a [`HasIdentity`] value, or
	/// `None` for a user without an account.
	///
	/// [`HasIdentity`]: amplitude_api_core::HasIdentity
	pub async fn send_event<'a>(
		&self,
		event_type: impl Into<String>,
		user: impl Into<UserRef<'a>>,
		device_id: Option<&str>,
		options: EventOptions,
	) -> Result<ApiResponse> {
		let event = options.into_event(event_type, user, device_id);
		self.track(event).await
	}

	/// Identifies a single user or device built from its parts.
	pub async fn send_identify<'a>(
		&self,
		user: impl Into<UserRef<'a>>,
		device_id: Option<&str>,
		user_properties: impl Into<Properties>,
	) -> Result<ApiResponse> {
		let identification = identification_for(user, device_id, user_properties);
		self.identify(identification).await
	}

	/// Builds the query string of a segmentation request. Pure.
	///
	/// Pass-through parameters from [`SegmentationOptions::param`] follow the
	/// named ones, in insertion order.
	pub fn segmentation_params<S: Datelike, E: Datelike>(
		&self,
		event: &EventFilter,
		start: &S,
		end: &E,
		options: &SegmentationOptions,
	) -> Result<Vec<(String, String)>> {
		let mut params = vec![query_param("e", serde_json::to_string(event)?)];
		if let Some(metric) = &options.metric {
			params.push(query_param("m", metric.clone()));
		}
		params.push(query_param("start", format_query_date(start)));
		params.push(query_param("end", format_query_date(end)));
		if let Some(interval) = options.interval {
			params.push(query_param("i", interval.to_string()));
		}
		for segment in &options.segments {
			params.push(query_param("s", serde_json::to_string(segment)?));
		}
		if let Some(group_by) = &options.group_by {
			params.push(query_param("g", group_by.clone()));
		}
		if let Some(limit) = options.limit {
			params.push(query_param("limit", limit.to_string()));
		}
		params.extend(options.extra.iter().cloned());
		Ok(params)
	}

	/// Runs an event segmentation query.
	///
	/// Authenticates with `api_key:secret_key`; fails with
	/// [`AmplitudeError::MissingSecretKey`] before sending anything when no
	/// secret key is configured.
	pub async fn segmentation<S: Datelike, E: Datelike>(
		&self,
		event: &EventFilter,
		start: S,
		end: E,
		options: &SegmentationOptions,
	) -> Result<ApiResponse> {
		let secret_key = self
			.secret_key
			.clone()
			.ok_or(AmplitudeError::MissingSecretKey)?;
		let params = self.segmentation_params(event, &start, &end, options)?;
		let auth = BasicAuth {
			username: self.api_key.clone(),
			password: secret_key,
		};

		debug!(
			url = %self.endpoints.segmentation,
			event_type = %event.event_type,
			segments = options.segments.len(),
			"Sending segmentation request"
		);
		let response = self
			.transport
			.get(&self.endpoints.segmentation, &params, &auth)
			.await?;
		debug!(status = response.status.as_u16(), "Segmentation request completed");

		Ok(response)
	}
}
