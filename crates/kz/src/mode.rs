use std::str::FromStr;

use derive_more::Display;

use crate::{Error, Result};

/// The KZ game modes tracked by the Global API.
///
/// The discriminants are the mode IDs used by the Global API's record filters.
#[repr(u16)]
#[derive(Default, Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
	/// The default mode.
	#[default]
	#[display("KZTimer")]
	KZTimer = 200,

	/// The SimpleKZ plugin's movement.
	#[display("SimpleKZ")]
	SimpleKZ = 201,

	/// CS:GO movement without any plugin changes.
	#[display("Vanilla")]
	Vanilla = 202,
}

impl Mode {
	/// All modes, in ID order.
	pub const ALL: [Self; 3] = [Self::KZTimer, Self::SimpleKZ, Self::Vanilla];

	/// Formats the mode in a standardized way that is consistent with the Global API.
	#[inline]
	pub const fn api(&self) -> &'static str {
		match self {
			Self::KZTimer => "kz_timer",
			Self::SimpleKZ => "kz_simple",
			Self::Vanilla => "kz_vanilla",
		}
	}

	/// Formats the mode as an abbreviation.
	#[inline]
	pub const fn short(&self) -> &'static str {
		match self {
			Self::KZTimer => "KZT",
			Self::SimpleKZ => "SKZ",
			Self::Vanilla => "VNL",
		}
	}

	/// The record filter ID of this mode.
	///
	/// A map is ranked in this mode if its filter set contains this value.
	#[inline]
	pub const fn filter_id(&self) -> u16 {
		*self as u16
	}
}

impl From<Mode> for u16 {
	#[inline]
	fn from(value: Mode) -> Self {
		value.filter_id()
	}
}

impl TryFrom<u16> for Mode {
	type Error = Error;

	fn try_from(value: u16) -> Result<Self> {
		match value {
			200 => Ok(Self::KZTimer),
			201 => Ok(Self::SimpleKZ),
			202 => Ok(Self::Vanilla),
			_ => Err(Error::InvalidModeID { value }),
		}
	}
}

impl FromStr for Mode {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self> {
		if let Ok(id) = value.parse::<u16>() {
			return Self::try_from(id);
		}

		Self::ALL
			.into_iter()
			.find(|mode| {
				value.eq_ignore_ascii_case(mode.api()) || value.eq_ignore_ascii_case(mode.short())
			})
			.ok_or_else(|| Error::InvalidMode { value: value.to_owned() })
	}
}

#[cfg(feature = "serde")]
mod serde_impls {
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use super::Mode;
	use crate::serde::IntOrStr;

	impl Serialize for Mode {
		fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
			self.api().serialize(serializer)
		}
	}

	impl<'de> Deserialize<'de> for Mode {
		/// Accepts the API name, the abbreviation, or the numeric mode ID.
		fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
			match <IntOrStr<'_, u16> as Deserialize<'de>>::deserialize(deserializer)? {
				IntOrStr::Int(value) => value.try_into(),
				IntOrStr::Str(value) => value.parse(),
			}
			.map_err(serde::de::Error::custom)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse() {
		assert_eq!("kz_timer".parse::<Mode>(), Ok(Mode::KZTimer));
		assert_eq!("SKZ".parse::<Mode>(), Ok(Mode::SimpleKZ));
		assert_eq!("vnl".parse::<Mode>(), Ok(Mode::Vanilla));
		assert_eq!("202".parse::<Mode>(), Ok(Mode::Vanilla));
		assert_eq!("199".parse::<Mode>(), Err(Error::InvalidModeID { value: 199 }));
		assert!("bhop".parse::<Mode>().is_err());
	}

	#[test]
	fn filter_ids() {
		assert_eq!(Mode::KZTimer.filter_id(), 200);
		assert_eq!(Mode::SimpleKZ.filter_id(), 201);
		assert_eq!(Mode::Vanilla.filter_id(), 202);
	}
}
