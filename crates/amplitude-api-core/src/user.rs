// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User identifiers and resolution of "user" arguments.
//!
//! Callers may hand the client either a raw identifier or one of their own
//! domain objects. [`UserRef`] captures both cases, plus the "no account"
//! case, and [`UserRef::resolve`] turns it into the `user_id` that goes on
//! the wire.

use serde::{Deserialize, Serialize};

/// A user identifier as accepted by the Amplitude API.
///
/// Serializes as a bare JSON number or string. The default is the empty
/// string, which is what an event carries when no user was given at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
	Number(i64),
	Text(String),
}

impl UserId {
	/// Returns true for the empty-string default.
	pub fn is_blank(&self) -> bool {
		matches!(self, UserId::Text(s) if s.is_empty())
	}
}

impl Default for UserId {
	fn default() -> Self {
		UserId::Text(String::new())
	}
}

impl std::fmt::Display for UserId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			UserId::Number(n) => write!(f, "{n}"),
			UserId::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for UserId {
	fn from(id: i64) -> Self {
		UserId::Number(id)
	}
}

impl From<i32> for UserId {
	fn from(id: i32) -> Self {
		UserId::Number(id.into())
	}
}

impl From<u32> for UserId {
	fn from(id: u32) -> Self {
		UserId::Number(id.into())
	}
}

impl From<&str> for UserId {
	fn from(id: &str) -> Self {
		UserId::Text(id.to_string())
	}
}

impl From<String> for UserId {
	fn from(id: String) -> Self {
		UserId::Text(id)
	}
}

/// Implemented by application types that carry their own analytics id.
///
/// ```
/// use amplitude_api_core::{HasIdentity, UserId, UserRef};
///
/// struct Account {
///     id: i64,
/// }
///
/// impl HasIdentity for Account {
///     fn identity(&self) -> UserId {
///         self.id.into()
///     }
/// }
///
/// let account = Account { id: 123 };
/// assert_eq!(UserRef::from(&account).resolve(), Some(UserId::Number(123)));
/// ```
pub trait HasIdentity {
	fn identity(&self) -> UserId;
}

/// The "user" argument of the convenience senders.
#[derive(Clone)]
pub enum UserRef<'a> {
	/// A raw identifier, used as-is.
	Id(UserId),
	/// An object exposing its own id.
	Entity(&'a dyn HasIdentity),
	/// No account; the event is sent with a `null` user id.
	Anonymous,
}

impl<'a> UserRef<'a> {
	/// Resolves to the user id that will be serialized.
	pub fn resolve(&self) -> Option<UserId> {
		match self {
			UserRef::Id(id) => Some(id.clone()),
			UserRef::Entity(entity) => Some(entity.identity()),
			UserRef::Anonymous => None,
		}
	}
}

impl std::fmt::Debug for UserRef<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			UserRef::Id(id) => f.debug_tuple("Id").field(id).finish(),
			UserRef::Entity(entity) => f.debug_tuple("Entity").field(&entity.identity()).finish(),
			UserRef::Anonymous => f.write_str("Anonymous"),
		}
	}
}

impl<'a, T: HasIdentity> From<&'a T> for UserRef<'a> {
	fn from(entity: &'a T) -> Self {
		UserRef::Entity(entity)
	}
}

/// `None` is a user without an account.
impl<'a, T: HasIdentity> From<Option<&'a T>> for UserRef<'a> {
	fn from(entity: Option<&'a T>) -> Self {
		match entity {
			Some(entity) => UserRef::Entity(entity),
			None => UserRef::Anonymous,
		}
	}
}

impl From<UserId> for UserRef<'_> {
	fn from(id: UserId) -> Self {
		UserRef::Id(id)
	}
}

impl From<Option<UserId>> for UserRef<'_> {
	fn from(id: Option<UserId>) -> Self {
		id.map(UserRef::Id).unwrap_or(UserRef::Anonymous)
	}
}

impl From<i64> for UserRef<'_> {
	fn from(id: i64) -> Self {
		UserRef::Id(id.into())
	}
}

impl From<i32> for UserRef<'_> {
	fn from(id: i32) -> Self {
		UserRef::Id(id.into())
	}
}

impl From<u32> for UserRef<'_> {
	fn from(id: u32) -> Self {
		UserRef::Id(id.into())
	}
}

impl From<&str> for UserRef<'_> {
	fn from(id: &str) -> Self {
		UserRef::Id(id.into())
	}
}

impl From<String> for UserRef<'_> {
	fn from(id: String) -> Self {
		UserRef::Id(id.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	struct Account {
		id: i64,
	}

	impl HasIdentity for Account {
		fn identity(&self) -> UserId {
			UserId::Number(self.id)
		}
	}

	#[test]
	fn default_user_id_is_blank_string() {
		assert_eq!(UserId::default(), UserId::Text(String::new()));
		assert!(UserId::default().is_blank());
		assert_eq!(serde_json::to_string(&UserId::default()).unwrap(), r#""""#);
	}

	#[test]
	fn numeric_user_id_serializes_as_number() {
		assert_eq!(serde_json::to_string(&UserId::from(123)).unwrap(), "123");
	}

	#[test]
	fn text_user_id_serializes_as_string() {
		assert_eq!(
			serde_json::to_string(&UserId::from("user@example.com")).unwrap(),
			r#""user@example.com""#
		);
	}

	#[test]
	fn entity_resolves_through_identity() {
		let account = Account { id: 123 };
		assert_eq!(UserRef::from(&account).resolve(), Some(UserId::Number(123)));
	}

	#[test]
	fn raw_id_resolves_to_itself() {
		assert_eq!(UserRef::from("abc").resolve(), Some(UserId::from("abc")));
		assert_eq!(UserRef::from(123).resolve(), Some(UserId::Number(123)));
	}

	#[test]
	fn optional_entity_resolves_or_is_anonymous() {
		let account = Account { id: 7 };
		let signed_in: Option<&Account> = Some(&account);
		let signed_out: Option<&Account> = None;

		assert_eq!(UserRef::from(signed_in).resolve(), Some(UserId::Number(7)));
		assert!(matches!(UserRef::from(signed_out), UserRef::Anonymous));
	}

	#[test]
	fn anonymous_resolves_to_none() {
		assert_eq!(UserRef::Anonymous.resolve(), None);
		assert_eq!(UserRef::from(None::<UserId>).resolve(), None);
	}

	proptest! {
		#[test]
		fn user_id_serde_roundtrip_number(n in any::<i64>()) {
			let id = UserId::from(n);
			let json = serde_json::to_string(&id).unwrap();
			let parsed: UserId = serde_json::from_str(&json).unwrap();
			prop_assert_eq!(id, parsed);
		}

		#[test]
		fn user_id_serde_roundtrip_text(s in "[a-zA-Z0-9_@.]{0,40}") {
			let id = UserId::from(s);
			let json = serde_json::to_string(&id).unwrap();
			let parsed: UserId = serde_json::from_str(&json).unwrap();
			prop_assert_eq!(id, parsed);
		}
	}
}
