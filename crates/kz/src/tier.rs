use std::str::FromStr;

use derive_more::Display;

use crate::{Error, Result};

/// The difficulty of a map.
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
	/// Tier 1.
	#[display("Very Easy")]
	VeryEasy = 1,

	/// Tier 2.
	Easy = 2,

	/// Tier 3.
	Medium = 3,

	/// Tier 4.
	Hard = 4,

	/// Tier 5.
	#[display("Very Hard")]
	VeryHard = 5,

	/// Tier 6.
	Extreme = 6,

	/// Tier 7, the hardest.
	Death = 7,
}

impl Tier {
	/// Formats the tier in a standardized way that is consistent with the API.
	#[inline]
	pub const fn api(&self) -> &'static str {
		match self {
			Self::VeryEasy => "very_easy",
			Self::Easy => "easy",
			Self::Medium => "medium",
			Self::Hard => "hard",
			Self::VeryHard => "very_hard",
			Self::Extreme => "extreme",
			Self::Death => "death",
		}
	}
}

impl From<Tier> for u8 {
	#[inline]
	fn from(value: Tier) -> Self {
		value as u8
	}
}

impl TryFrom<u8> for Tier {
	type Error = Error;

	fn try_from(value: u8) -> Result<Self> {
		match value {
			1 => Ok(Self::VeryEasy),
			2 => Ok(Self::Easy),
			3 => Ok(Self::Medium),
			4 => Ok(Self::Hard),
			5 => Ok(Self::VeryHard),
			6 => Ok(Self::Extreme),
			7 => Ok(Self::Death),
			_ => Err(Error::InvalidTier { value: value.to_string() }),
		}
	}
}

impl FromStr for Tier {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self> {
		if let Ok(int) = value.parse::<u8>() {
			return Self::try_from(int);
		}

		[
			Self::VeryEasy,
			Self::Easy,
			Self::Medium,
			Self::Hard,
			Self::VeryHard,
			Self::Extreme,
			Self::Death,
		]
		.into_iter()
		.find(|tier| value.eq_ignore_ascii_case(tier.api()))
		.ok_or_else(|| Error::InvalidTier { value: value.to_owned() })
	}
}

#[cfg(feature = "serde")]
mod serde_impls {
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use super::Tier;
	use crate::serde::IntOrStr;

	impl Serialize for Tier {
		fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
			u8::from(*self).serialize(serializer)
		}
	}

	impl<'de> Deserialize<'de> for Tier {
		fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
			match <IntOrStr<'_, u8> as Deserialize<'de>>::deserialize(deserializer)? {
				IntOrStr::Int(value) => value.try_into(),
				IntOrStr::Str(value) => value.parse(),
			}
			.map_err(serde::de::Error::custom)
		}
	}
}
