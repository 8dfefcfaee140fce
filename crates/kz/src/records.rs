//! Ranked finishes.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::Display;

use crate::{Error, Result};

/// A single ranked completion of a map, as reported by the Global API.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinishRecord {
	/// The ID of the map this record was set on.
	pub map_id: u16,

	/// The name of the map this record was set on.
	pub map_name: String,

	/// The time it took to complete the map, in seconds.
	pub time: f64,

	/// How many teleports were used during the run.
	pub teleports: u32,

	/// How many points this record is worth (0-1000).
	pub points: u16,

	/// When this record was set.
	#[cfg_attr(feature = "serde", serde(with = "crate::serde::timestamp"))]
	pub created_on: DateTime<Utc>,

	/// The name of the server this record was set on.
	#[cfg_attr(feature = "serde", serde(default))]
	pub server_name: Option<String>,
}

impl FinishRecord {
	/// The category this record was set in.
	///
	/// This is never [`RunCategory::Nub`]; that category only exists as an aggregate.
	pub const fn category(&self) -> RunCategory {
		if self.teleports == 0 {
			RunCategory::Pro
		} else {
			RunCategory::TP
		}
	}
}

/// The leaderboard a run counts towards.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RunCategory {
	/// Runs without any teleports.
	#[display("pro")]
	Pro,

	/// Runs with at least one teleport.
	#[display("tp")]
	TP,

	/// The better of a player's pro and TP runs on a map.
	#[display("nub")]
	Nub,
}

impl FromStr for RunCategory {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self> {
		match value.to_ascii_lowercase().as_str() {
			"pro" => Ok(Self::Pro),
			"tp" => Ok(Self::TP),
			"nub" | "overall" => Ok(Self::Nub),
			_ => Err(Error::InvalidRunCategory { value: value.to_owned() }),
		}
	}
}
