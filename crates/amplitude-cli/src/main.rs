// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Amplitude CLI - send events and identifications, run segmentation queries
//!
//! Credentials and endpoints come from the `AMPLITUDE_*` environment
//! variables. The response status goes to stdout on the first line and the
//! body after it; logs go to stderr.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use amplitude_api::{
	AmplitudeClient, ApiResponse, Event, EventFilter, EventOptions, Properties, SegmentCondition,
	SegmentationOptions, UserId, UserRef,
};
use amplitude_api_config::AmplitudeConfig;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
	Compact,
	Json,
}

/// Amplitude - talk to the Amplitude HTTP API
#[derive(Parser, Debug)]
#[command(name = "amplitude", version, about, long_about = None)]
struct Args {
	/// Log output format
	#[arg(long, global = true, value_enum, env = "AMPLITUDE_LOG_FORMAT", default_value = "compact")]
	log_format: LogFormat,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Track a single event
	Track {
		#[arg(long)]
		event_type: String,
		/// Numeric ids are sent as numbers. Omit for a user without an account
		#[arg(long)]
		user_id: Option<String>,
		#[arg(long)]
		device_id: Option<String>,
		/// Event property (repeatable: --event-property KEY=VALUE)
		#[arg(long = "event-property", value_name = "KEY=VALUE", value_parser = parse_property)]
		event_properties: Vec<(String, Value)>,
		/// User property (repeatable: --user-property KEY=VALUE)
		#[arg(long = "user-property", value_name = "KEY=VALUE", value_parser = parse_property)]
		user_properties: Vec<(String, Value)>,
		#[arg(long)]
		ip: Option<String>,
	},
	/// Update a user's properties
	Identify {
		#[arg(long)]
		user_id: Option<String>,
		#[arg(long)]
		device_id: Option<String>,
		/// User property (repeatable: --property KEY=VALUE)
		#[arg(long = "property", value_name = "KEY=VALUE", value_parser = parse_property)]
		properties: Vec<(String, Value)>,
	},
	/// Run an event segmentation query (needs AMPLITUDE_SECRET_KEY)
	Segmentation {
		#[arg(long)]
		event_type: String,
		/// First day, YYYY-MM-DD
		#[arg(long)]
		start: NaiveDate,
		/// Last day, YYYY-MM-DD
		#[arg(long)]
		end: NaiveDate,
		/// Segment condition as JSON (repeatable), e.g. {"prop":"country","op":"is","values":["Chile"]}
		#[arg(long = "segment", value_name = "JSON", value_parser = parse_segment)]
		segments: Vec<SegmentCondition>,
		#[arg(long)]
		metric: Option<String>,
		#[arg(long, allow_negative_numbers = true)]
		interval: Option<i32>,
		#[arg(long)]
		group_by: Option<String>,
		#[arg(long)]
		limit: Option<u32>,
		/// Extra query parameter passed through as-is (repeatable: --param KEY=VALUE)
		#[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_query_param)]
		params: Vec<(String, String)>,
	},
}

fn init_tracing(format: LogFormat) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	match format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
	}
}

/// Splits `KEY=VALUE`. The value is JSON when it parses as JSON, otherwise a
/// plain string.
fn parse_property(raw: &str) -> std::result::Result<(String, Value), String> {
	let (key, value) = raw
		.split_once('=')
		.ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
	if key.is_empty() {
		return Err(format!("empty property name in {raw:?}"));
	}
	let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
	Ok((key.to_string(), value))
}

fn parse_query_param(raw: &str) -> std::result::Result<(String, String), String> {
	match raw.split_once('=') {
		Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
		_ => Err(format!("expected KEY=VALUE, got {raw:?}")),
	}
}

fn parse_segment(raw: &str) -> std::result::Result<SegmentCondition, String> {
	serde_json::from_str(raw).map_err(|e| format!("invalid segment condition: {e}"))
}

/// Only the canonical decimal form becomes a number; `007` or `+42` stay text.
fn user_id_from_arg(raw: &str) -> UserId {
	match raw.parse::<i64>() {
		Ok(id) if id.to_string() == raw => UserId::Number(id),
		_ => UserId::Text(raw.to_string()),
	}
}

fn user_ref_from_arg(raw: Option<&str>) -> UserRef<'static> {
	match raw {
		Some(raw) => UserRef::Id(user_id_from_arg(raw)),
		None => UserRef::Anonymous,
	}
}

fn properties(pairs: Vec<(String, Value)>) -> Properties {
	pairs.into_iter().collect()
}

fn print_response(response: &ApiResponse) {
	println!("{}", response.status);
	println!("{}", response.body);
}

async fn run(client: &AmplitudeClient, command: Command) -> Result<ApiResponse> {
	let response = match command {
		Command::Track {
			event_type,
			user_id,
			device_id,
			event_properties,
			user_properties,
			ip,
		} => {
			let mut options = EventOptions::new()
				.event_properties(properties(event_properties))
				.user_properties(properties(user_properties));
			if let Some(ip) = ip {
				options = options.ip(ip);
			}
			let event: Event =
				options.into_event(event_type, user_ref_from_arg(user_id.as_deref()), device_id.as_deref());
			debug!(event_type = %event.event_type, "tracking event");
			client.track(event).await?
		}
		Command::Identify {
			user_id,
			device_id,
			properties: props,
		} => {
			client
				.send_identify(
					user_ref_from_arg(user_id.as_deref()),
					device_id.as_deref(),
					properties(props),
				)
				.await?
		}
		Command::Segmentation {
			event_type,
			start,
			end,
			segments,
			metric,
			interval,
			group_by,
			limit,
			params,
		} => {
			let options = SegmentationOptions {
				metric,
				interval,
				segments,
				group_by,
				limit,
				extra: params,
			};
			client
				.segmentation(&EventFilter::new(event_type), start, end, &options)
				.await?
		}
	};
	Ok(response)
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing(args.log_format);

	let config = AmplitudeConfig::from_env().context("failed to load Amplitude configuration")?;
	let client = AmplitudeClient::from_config(&config).context("failed to create Amplitude client")?;

	let response = run(&client, args.command).await?;
	info!(status = response.status.as_u16(), "request completed");
	print_response(&response);

	if !response.is_success() {
		std::process::exit(1);
	}
	Ok(())
}
