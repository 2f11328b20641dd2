// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The HTTP seam of the client.
//!
//! [`AmplitudeClient`](crate::AmplitudeClient) builds requests and hands
//! them to an [`HttpTransport`]. [`ReqwestTransport`] is the default; tests
//! and embedders can plug in their own.

use std::time::Duration;

use amplitude_api_config::SecretString;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::Result;

/// SDK version for the User-Agent header.
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
/// SDK name for the User-Agent header.
const SDK_NAME: &str = "amplitude-api-rust";

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
	pub status: StatusCode,
	pub body: String,
}

impl ApiResponse {
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Parses the body as JSON (segmentation results).
	pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
		Ok(serde_json::from_str(&self.body)?)
	}
}

/// HTTP basic credentials.
#[derive(Debug, Clone)]
pub struct BasicAuth {
	pub username: SecretString,
	pub password: SecretString,
}

/// Performs one HTTP round trip per call.
///
/// Implementations return transport failures as errors and every received
/// response, including 4xx/5xx, as `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
	/// POSTs `form` as `application/x-www-form-urlencoded`.
	async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<ApiResponse>;

	/// GETs `url` with `query` appended and basic auth attached.
	async fn get(&self, url: &str, query: &[(String, String)], auth: &BasicAuth) -> Result<ApiResponse>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
	client: Client,
}

impl ReqwestTransport {
	/// Builds a client with the SDK User-Agent and the given timeout.
	pub fn new(timeout: Duration) -> Result<Self> {
		let client = Client::builder()
			.user_agent(user_agent())
			.timeout(timeout)
			.build()?;
		Ok(Self { client })
	}

	/// Wraps an already configured client (proxies, custom TLS, ...).
	pub fn with_client(client: Client) -> Self {
		Self { client }
	}

	async fn read(response: reqwest::Response) -> Result<ApiResponse> {
		let status = response.status();
		let body = response.text().await?;
		Ok(ApiResponse { status, body })
	}
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
	async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<ApiResponse> {
		let response = self.client.post(url).form(form).send().await?;
		Self::read(response).await
	}

	async fn get(&self, url: &str, query: &[(String, String)], auth: &BasicAuth) -> Result<ApiResponse> {
		let response = self
			.client
			.get(url)
			.query(query)
			.basic_auth(auth.username.expose(), Some(auth.password.expose()))
			.send()
			.await?;
		Self::read(response).await
	}
}

/// Format: `amplitude-api-rust/{version}`
pub fn user_agent() -> String {
	format!("{SDK_NAME}/{SDK_VERSION}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_name_and_version() {
		let ua = user_agent();
		let (name, version) = ua.split_once('/').unwrap();
		assert_eq!(name, "amplitude-api-rust");
		assert_eq!(version, env!("CARGO_PKG_VERSION"));
	}

	#[test]
	fn response_success_follows_status() {
		let ok = ApiResponse {
			status: StatusCode::OK,
			body: "success".into(),
		};
		let bad = ApiResponse {
			status: StatusCode::BAD_REQUEST,
			body: "invalid_api_key".into(),
		};
		assert!(ok.is_success());
		assert!(!bad.is_success());
	}

	#[test]
	fn response_json() {
		let response = ApiResponse {
			status: StatusCode::OK,
			body: r#"{"data":{"series":[[1,2]]}}"#.into(),
		};
		let value: serde_json::Value = response.json().unwrap();
		assert_eq!(value["data"]["series"][0][1], 2);
	}

	#[test]
	fn builds_with_timeout() {
		assert!(ReqwestTransport::new(Duration::from_secs(5)).is_ok());
	}
}
