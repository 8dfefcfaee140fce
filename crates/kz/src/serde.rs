//! Custom [`serde`] helpers for the upstream payload formats.

use std::borrow::Cow;

use serde::Deserialize;

/// Either an integer or a string, whichever the upstream happened to send.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum IntOrStr<'a, Int> {
	Int(Int),
	Str(Cow<'a, str>),
}

/// Timestamps sent by the Global API.
///
/// The Global API omits the UTC offset (`2023-04-08T18:37:20`), while the Profile API sends proper
/// RFC 3339 strings. Both are accepted; offset-less values are interpreted as UTC.
pub mod timestamp {
	use chrono::{DateTime, NaiveDateTime, Utc};
	use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

	/// Serializes `timestamp` as an RFC 3339 string.
	pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		timestamp.serialize(serializer)
	}

	/// Deserializes a timestamp with or without a UTC offset.
	pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value = <String as Deserialize<'de>>::deserialize(deserializer)?;

		parse(&value).ok_or_else(|| {
			de::Error::invalid_value(de::Unexpected::Str(&value), &"a timestamp")
		})
	}

	fn parse(value: &str) -> Option<DateTime<Utc>> {
		if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
			return Some(timestamp.with_timezone(&Utc));
		}

		NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
			.ok()
			.map(|naive| naive.and_utc())
	}

}
