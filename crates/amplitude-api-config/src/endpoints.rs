// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Endpoint URLs of the Amplitude HTTP API.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_TRACK_URL: &str = "https://api.amplitude.com/httpapi";
pub const DEFAULT_IDENTIFY_URL: &str = "https://api.amplitude.com/identify";
pub const DEFAULT_SEGMENTATION_URL: &str = "https://amplitude.com/api/2/events/segmentation";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {name} endpoint {url:?}: {reason}")]
pub struct EndpointError {
	pub name: &'static str,
	pub url: String,
	pub reason: String,
}

/// The three URLs the client talks to.
///
/// Resolved once at startup and handed to the client; nothing reads the
/// defaults behind the client's back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
	pub track: String,
	pub identify: String,
	pub segmentation: String,
}

impl Default for Endpoints {
	fn default() -> Self {
		Self {
			track: DEFAULT_TRACK_URL.to_string(),
			identify: DEFAULT_IDENTIFY_URL.to_string(),
			segmentation: DEFAULT_SEGMENTATION_URL.to_string(),
		}
	}
}

impl Endpoints {
	/// Places all three endpoints under one base URL, keeping the default
	/// paths. Used for proxies and mock servers.
	///
	/// ```
	/// use amplitude_api_config::Endpoints;
	///
	/// let endpoints = Endpoints::rooted_at("http://127.0.0.1:8080/");
	/// assert_eq!(endpoints.track, "http://127.0.0.1:8080/httpapi");
	/// assert_eq!(endpoints.segmentation, "http://127.0.0.1:8080/api/2/events/segmentation");
	/// ```
	pub fn rooted_at(base: &str) -> Self {
		let base = base.trim_end_matches('/');
		Self {
			track: format!("{base}/httpapi"),
			identify: format!("{base}/identify"),
			segmentation: format!("{base}/api/2/events/segmentation"),
		}
	}

	/// Checks that every endpoint is an absolute http(s) URL.
	pub fn validate(&self) -> Result<(), EndpointError> {
		for (name, raw) in [
			("track", &self.track),
			("identify", &self.identify),
			("segmentation", &self.segmentation),
		] {
			let parsed = Url::parse(raw).map_err(|e| EndpointError {
				name,
				url: raw.clone(),
				reason: e.to_string(),
			})?;
			if !matches!(parsed.scheme(), "http" | "https") {
				return Err(EndpointError {
					name,
					url: raw.clone(),
					reason: format!("unsupported scheme {}", parsed.scheme()),
				});
			}
		}
		Ok(())
	}
}
