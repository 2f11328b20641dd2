// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Amplitude client.
//!
//! Only local failures are errors. A response with a non-2xx status is
//! returned to the caller as an [`ApiResponse`](crate::ApiResponse) and is
//! never turned into an `AmplitudeError`.

use amplitude_api_config::EndpointError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmplitudeError {
	/// No API key was configured.
	#[error("API key is required")]
	MissingApiKey,

	/// Segmentation queries authenticate with the secret key.
	#[error("secret key is required for segmentation queries")]
	MissingSecretKey,

	#[error(transparent)]
	InvalidEndpoint(#[from] EndpointError),

	/// The transport failed before a response arrived (connect, TLS,
	/// timeout, ...).
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	#[error("serialization error: {0}")]
	SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AmplitudeError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages() {
		assert_eq!(AmplitudeError::MissingApiKey.to_string(), "API key is required");
		assert_eq!(
			AmplitudeError::MissingSecretKey.to_string(),
			"secret key is required for segmentation queries"
		);
	}

	#[test]
	fn endpoint_error_is_transparent() {
		let err = AmplitudeError::from(EndpointError {
			name: "track",
			url: "nope".into(),
			reason: "relative URL without a base".into(),
		});
		assert_eq!(
			err.to_string(),
			r#"invalid track endpoint "nope": relative URL without a base"#
		);
	}
}
