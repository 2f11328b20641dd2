// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the Amplitude API client.
//!
//! - [`Secret<T>`]: redacting wrapper for the API key and secret key
//! - [`load_secret_env`] / [`require_secret_env`]: `VAR` / `VAR_FILE` loading
//! - [`Endpoints`]: the track, identify and segmentation URLs
//! - [`AmplitudeConfig`]: all of the above, assembled from the environment
//!
//! | Variable | Required | Meaning |
//! |----------|----------|---------|
//! | `AMPLITUDE_API_KEY` / `_FILE` | yes | project API key |
//! | `AMPLITUDE_SECRET_KEY` / `_FILE` | no | needed for segmentation queries |
//! | `AMPLITUDE_ENDPOINT_BASE` | no | route all endpoints under one base URL |
//! | `AMPLITUDE_REQUEST_TIMEOUT_SECS` | no | HTTP client timeout, default 30 |

pub mod endpoints;
pub mod env;
pub mod secret;

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

pub use endpoints::{
	EndpointError, Endpoints, DEFAULT_IDENTIFY_URL, DEFAULT_SEGMENTATION_URL, DEFAULT_TRACK_URL,
};
pub use env::{load_secret_env, require_secret_env, RequiredSecretError, SecretEnvError};
pub use secret::{Secret, SecretString, REDACTED};

pub const API_KEY_VAR: &str = "AMPLITUDE_API_KEY";
pub const SECRET_KEY_VAR: &str = "AMPLITUDE_SECRET_KEY";
pub const ENDPOINT_BASE_VAR: &str = "AMPLITUDE_ENDPOINT_BASE";
pub const REQUEST_TIMEOUT_VAR: &str = "AMPLITUDE_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error(transparent)]
	MissingApiKey(#[from] RequiredSecretError),

	#[error(transparent)]
	SecretKey(#[from] SecretEnvError),

	#[error(transparent)]
	Endpoint(#[from] EndpointError),

	#[error("{var} must be a whole number of seconds, got {value:?}")]
	InvalidTimeout { var: &'static str, value: String },
}

/// Everything needed to build a client.
#[derive(Debug, Clone)]
pub struct AmplitudeConfig {
	pub api_key: SecretString,
	pub secret_key: Option<SecretString>,
	pub endpoints: Endpoints,
	pub request_timeout: Duration,
}

impl AmplitudeConfig {
	pub fn new(api_key: impl Into<SecretString>) -> Self {
		Self {
			api_key: api_key.into(),
			secret_key: None,
			endpoints: Endpoints::default(),
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
		}
	}

	pub fn with_secret_key(mut self, secret_key: impl Into<SecretString>) -> Self {
		self.secret_key = Some(secret_key.into());
		self
	}

	pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = endpoints;
		self
	}

	/// Reads the configuration from the `AMPLITUDE_*` variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		let api_key = require_secret_env(API_KEY_VAR)?;
		let secret_key = load_secret_env(SECRET_KEY_VAR)?;

		let endpoints = match std::env::var(ENDPOINT_BASE_VAR) {
			Ok(base) if !base.is_empty() => Endpoints::rooted_at(&base),
			_ => Endpoints::default(),
		};
		endpoints.validate()?;

		let request_timeout = match std::env::var(REQUEST_TIMEOUT_VAR) {
			Ok(value) => value
				.trim()
				.parse::<u64>()
				.map(Duration::from_secs)
				.map_err(|_| ConfigError::InvalidTimeout {
					var: REQUEST_TIMEOUT_VAR,
					value,
				})?,
			Err(_) => DEFAULT_REQUEST_TIMEOUT,
		};

		debug!(
			track = %endpoints.track,
			identify = %endpoints.identify,
			segmentation = %endpoints.segmentation,
			has_secret_key = secret_key.is_some(),
			timeout_secs = request_timeout.as_secs(),
			"Loaded Amplitude configuration"
		);

		Ok(Self {
			api_key,
			secret_key,
			endpoints,
			request_timeout,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_uses_defaults() {
		let config = AmplitudeConfig::new("stub api key");
		assert_eq!(config.api_key.expose(), "stub api key");
		assert!(config.secret_key.is_none());
		assert_eq!(config.endpoints, Endpoints::default());
		assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
	}

	#[test]
	fn debug_redacts_keys() {
		let config = AmplitudeConfig::new("stub api key").with_secret_key("stub secret");
		let debug = format!("{config:?}");
		assert!(!debug.contains("stub api key"));
		assert!(!debug.contains("stub secret"));
		assert!(debug.contains(REDACTED));
	}

	// All AMPLITUDE_* variables are process-global, so the env-driven cases
	// run sequentially inside one test.
	#[test]
	fn from_env() {
		for var in [
			API_KEY_VAR,
			SECRET_KEY_VAR,
			ENDPOINT_BASE_VAR,
			REQUEST_TIMEOUT_VAR,
		] {
			std::env::remove_var(var);
			std::env::remove_var(format!("{var}_FILE"));
		}

		assert!(matches!(
			AmplitudeConfig::from_env(),
			Err(ConfigError::MissingApiKey(_))
		));

		std::env::set_var(API_KEY_VAR, "env api key");
		let config = AmplitudeConfig::from_env().unwrap();
		assert_eq!(config.api_key.expose(), "env api key");
		assert!(config.secret_key.is_none());
		assert_eq!(config.endpoints, Endpoints::default());

		std::env::set_var(SECRET_KEY_VAR, "env secret");
		std::env::set_var(ENDPOINT_BASE_VAR, "http://localhost:9000");
		std::env::set_var(REQUEST_TIMEOUT_VAR, "5");
		let config = AmplitudeConfig::from_env().unwrap();
		assert_eq!(config.secret_key.unwrap().expose(), "env secret");
		assert_eq!(config.endpoints.track, "http://localhost:9000/httpapi");
		assert_eq!(config.request_timeout, Duration::from_secs(5));

		std::env::set_var(REQUEST_TIMEOUT_VAR, "soon");
		assert!(matches!(
			AmplitudeConfig::from_env(),
			Err(ConfigError::InvalidTimeout { .. })
		));

		std::env::set_var(REQUEST_TIMEOUT_VAR, "5");
		std::env::set_var(ENDPOINT_BASE_VAR, "not a url");
		assert!(matches!(
			AmplitudeConfig::from_env(),
			Err(ConfigError::Endpoint(_))
		));

		for var in [
			API_KEY_VAR,
			SECRET_KEY_VAR,
			ENDPOINT_BASE_VAR,
			REQUEST_TIMEOUT_VAR,
		] {
			std::env::remove_var(var);
		}
	}
}
