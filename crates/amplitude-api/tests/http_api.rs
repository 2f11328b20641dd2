// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end requests against a mock Amplitude server.

use amplitude_api::{
	AmplitudeClient, AmplitudeError, Endpoints, Event, EventFilter, EventOptions, Identification,
	Properties, SegmentCondition, SegmentationOptions, UserId,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use wiremock::matchers::{basic_auth, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_for(server: &MockServer) -> AmplitudeClient {
	AmplitudeClient::builder()
		.api_key("stub api key")
		.secret_key("stub secret key")
		.endpoints(Endpoints::rooted_at(&server.uri()))
		.build()
		.unwrap()
}

fn form_of(request: &Request) -> Vec<(String, String)> {
	url::form_urlencoded::parse(&request.body)
		.map(|(k, v)| (k.into_owned(), v.into_owned()))
		.collect()
}

fn payloads(request: &Request, field: &str) -> Value {
	let form = form_of(request);
	let (_, raw) = form
		.iter()
		.find(|(k, _)| k == field)
		.unwrap_or_else(|| panic!("form has no {field} field"));
	serde_json::from_str(raw).unwrap()
}

async fn mount_ok(server: &MockServer, route: &str, expected: u64) {
	Mock::given(method("POST"))
		.and(path(route))
		.and(header("content-type", "application/x-www-form-urlencoded"))
		.respond_with(ResponseTemplate::new(200).set_body_string("success"))
		.expect(expected)
		.mount(server)
		.await;
}

#[tokio::test]
async fn track_sends_single_event() {
	let server = MockServer::start().await;
	mount_ok(&server, "/httpapi", 1).await;
	let client = client_for(&server);

	let response = client
		.track(Event::new("clicked on sign up").user_id(123))
		.await
		.unwrap();

	assert!(response.is_success());
	assert_eq!(response.body, "success");

	let requests = server.received_requests().await.unwrap();
	let form = form_of(&requests[0]);
	assert_eq!(form[0], ("api_key".to_string(), "stub api key".to_string()));
	assert_eq!(
		payloads(&requests[0], "event"),
		json!([{
			"event_type": "clicked on sign up",
			"user_id": 123,
			"event_properties": {},
			"user_properties": {},
			"ip": ""
		}])
	);
}

#[tokio::test]
async fn track_sends_many_events_in_one_request() {
	let server = MockServer::start().await;
	mount_ok(&server, "/httpapi", 1).await;
	let client = client_for(&server);

	client
		.track([
			Event::new("clicked on sign up").user_id(123),
			Event::new("liked a widget").user_id(456),
		])
		.await
		.unwrap();

	let requests = server.received_requests().await.unwrap();
	let events = payloads(&requests[0], "event");
	assert_eq!(events.as_array().unwrap().len(), 2);
	assert_eq!(events[0]["event_type"], "clicked on sign up");
	assert_eq!(events[1]["user_id"], 456);
}

#[tokio::test]
async fn separate_tracks_are_separate_requests() {
	let server = MockServer::start().await;
	mount_ok(&server, "/httpapi", 2).await;
	let client = client_for(&server);

	client.track(Event::new("clicked on sign up").user_id(123)).await.unwrap();
	client.track(Event::new("liked a widget").user_id(456)).await.unwrap();
}

#[tokio::test]
async fn identify_sends_identifications() {
	let server = MockServer::start().await;
	mount_ok(&server, "/identify", 1).await;
	let client = client_for(&server);

	client
		.identify(vec![
			Identification::new()
				.user_id(123)
				.user_properties(Properties::new().insert("first_name", "John")),
			Identification::new().device_id("abc"),
		])
		.await
		.unwrap();

	let requests = server.received_requests().await.unwrap();
	assert_eq!(
		payloads(&requests[0], "identification"),
		json!([
			{"user_id": 123, "user_properties": {"first_name": "John"}},
			{"user_id": "", "device_id": "abc", "user_properties": {}}
		])
	);
}

#[tokio::test]
async fn send_event_without_account_sends_null_user() {
	let server = MockServer::start().await;
	mount_ok(&server, "/httpapi", 1).await;
	let client = client_for(&server);

	client
		.send_event(
			"test_event",
			None::<UserId>,
			Some("abcdef"),
			EventOptions::new()
				.event_properties(Properties::new().insert("test_property", 1))
				.ip("8.8.8.8"),
		)
		.await
		.unwrap();

	let requests = server.received_requests().await.unwrap();
	assert_eq!(
		payloads(&requests[0], "event"),
		json!([{
			"event_type": "test_event",
			"user_id": null,
			"device_id": "abcdef",
			"event_properties": {"test_property": 1},
			"user_properties": {},
			"ip": "8.8.8.8"
		}])
	);
}

#[tokio::test]
async fn send_identify_posts_one_identification() {
	let server = MockServer::start().await;
	mount_ok(&server, "/identify", 1).await;
	let client = client_for(&server);

	client
		.send_identify(
			123,
			Some("abc"),
			Properties::new().insert("first_name", "John").insert("last_name", "Doe"),
		)
		.await
		.unwrap();

	let requests = server.received_requests().await.unwrap();
	assert_eq!(
		payloads(&requests[0], "identification"),
		json!([{
			"user_id": 123,
			"device_id": "abc",
			"user_properties": {"first_name": "John", "last_name": "Doe"}
		}])
	);
}

#[tokio::test]
async fn segmentation_queries_with_basic_auth() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/api/2/events/segmentation"))
		.and(basic_auth("stub api key", "stub secret key"))
		.and(query_param("e", r#"{"event_type":"my event"}"#))
		.and(query_param("start", "20240501"))
		.and(query_param("end", "20240502"))
		.and(query_param("s", r#"{"prop":"foo","op":"is","values":["bar"]}"#))
		.and(query_param("formula", "UNIQUES(A)"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"data": {"series": [[1, 2]], "xValues": ["2024-05-01", "2024-05-02"]}
		})))
		.expect(1)
		.mount(&server)
		.await;
	let client = client_for(&server);

	let response = client
		.segmentation(
			&EventFilter::new("my event"),
			NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
			NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
			&SegmentationOptions::new()
				.segment(SegmentCondition::new("foo", "is", ["bar"]))
				.param("formula", "UNIQUES(A)"),
		)
		.await
		.unwrap();

	let result: Value = response.json().unwrap();
	assert_eq!(result["data"]["series"][0][1], 2);
}

#[tokio::test]
async fn rejected_request_is_returned_not_raised() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/httpapi"))
		.respond_with(ResponseTemplate::new(400).set_body_string("invalid_api_key"))
		.expect(1)
		.mount(&server)
		.await;
	let client = client_for(&server);

	let response = client.track(Event::new("test_event")).await.unwrap();

	assert!(!response.is_success());
	assert_eq!(response.status.as_u16(), 400);
	assert_eq!(response.body, "invalid_api_key");
}

#[tokio::test]
async fn unreachable_server_is_request_failed() {
	let client = AmplitudeClient::builder()
		.api_key("stub api key")
		.endpoints(Endpoints::rooted_at("http://127.0.0.1:1"))
		.build()
		.unwrap();

	let result = client.track(Event::new("test_event")).await;

	assert!(matches!(result, Err(AmplitudeError::RequestFailed(_))));
}
