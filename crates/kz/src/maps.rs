//! The map catalog.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::{Error, Mode, Result, Tier};

/// A validated KZ map.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameMap {
	/// The map's ID.
	pub id: u16,

	/// The map's name.
	///
	/// Names are unique, and are what records refer to when joining against the catalog.
	pub name: String,

	/// Size of the map's `.bsp` file in bytes.
	pub filesize: u64,

	/// The map's difficulty.
	pub tier: Tier,

	/// When the map was approved.
	pub created_on: DateTime<Utc>,

	/// IDs of the [modes] this map has a ranked filter for.
	///
	/// [modes]: Mode
	pub filter_ids: BTreeSet<u16>,

	/// How many bonus courses the map has.
	pub bonus_count: u8,

	/// The people who made the map.
	pub mappers: Vec<Mapper>,
}

/// Someone who worked on a map.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mapper {
	/// The mapper's display name.
	pub name: String,

	/// The mapper's SteamID, if they have a linked account.
	pub steam_id: Option<String>,
}

impl GameMap {
	/// Whether this map is ranked in the given `mode`.
	pub fn is_ranked_in(&self, mode: Mode) -> bool {
		self.filter_ids.contains(&mode.filter_id())
	}

	/// Whether this map has a teleport category at all.
	///
	/// `kzpro_` maps only have a pro category.
	pub fn has_teleport_category(&self) -> bool {
		!self.name.starts_with("kzpro")
	}
}

impl Mapper {
	/// Builds a list of mappers from the parallel name / id arrays the upstream sends.
	///
	/// Empty ids mean "no linked account".
	pub fn zip(names: Vec<String>, ids: Vec<String>) -> Result<Vec<Self>> {
		if names.len() != ids.len() {
			return Err(Error::MapperLengthMismatch { names: names.len(), ids: ids.len() });
		}

		Ok(names
			.into_iter()
			.zip(ids)
			.map(|(name, id)| Self { name, steam_id: Some(id).filter(|id| !id.is_empty()) })
			.collect())
	}
}

#[cfg(feature = "serde")]
mod serde_impls {
	use std::collections::BTreeSet;

	use chrono::{DateTime, Utc};
	use serde::{Deserialize, Deserializer};

	use super::{GameMap, Mapper};
	use crate::Tier;

	impl<'de> Deserialize<'de> for GameMap {
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			#[derive(Deserialize)]
			struct Helper {
				id: u16,
				name: String,
				#[serde(default)]
				filesize: u64,
				tier: Tier,
				#[serde(with = "crate::serde::timestamp")]
				created_on: DateTime<Utc>,
				#[serde(default)]
				filter_ids: BTreeSet<u16>,
				#[serde(default)]
				bonus_count: u8,
				#[serde(default)]
				mapper_names: Vec<String>,
				#[serde(default)]
				mapper_ids: Vec<String>,
			}

			let map = Helper::deserialize(deserializer)?;
			let mappers =
				Mapper::zip(map.mapper_names, map.mapper_ids).map_err(serde::de::Error::custom)?;

			Ok(Self {
				id: map.id,
				name: map.name,
				filesize: map.filesize,
				tier: map.tier,
				created_on: map.created_on,
				filter_ids: map.filter_ids,
				bonus_count: map.bonus_count,
				mappers,
			})
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing;

	#[test]
	fn ranked_in() {
		let map = testing::map(1, "kz_beginnerblock_go", &[Mode::KZTimer, Mode::SimpleKZ]);

		assert!(map.is_ranked_in(Mode::KZTimer));
		assert!(map.is_ranked_in(Mode::SimpleKZ));
		assert!(!map.is_ranked_in(Mode::Vanilla));
	}

	#[test]
	fn kzpro_has_no_teleport_category() {
		assert!(!testing::map(1, "kzpro_test", &[Mode::KZTimer]).has_teleport_category());
		assert!(testing::map(2, "kz_kzpro_test", &[Mode::KZTimer]).has_teleport_category());
	}

	#[test]
	fn zip_mappers() {
		let mappers = Mapper::zip(
			vec![String::from("GameChaos"), String::from("Sikari")],
			vec![String::from("STEAM_1:1:1"), String::new()],
		)
		.unwrap();

		assert_eq!(mappers[0].steam_id.as_deref(), Some("STEAM_1:1:1"));
		assert_eq!(mappers[1].steam_id, None);

		assert_eq!(
			Mapper::zip(vec![String::from("GameChaos")], Vec::new()),
			Err(Error::MapperLengthMismatch { names: 1, ids: 0 }),
		);
	}

	#[cfg(feature = "serde")]
	#[test]
	fn deserialize() {
		let map = serde_json::from_value::<GameMap>(serde_json::json!({
			"id": 992,
			"name": "kz_lionharder",
			"filesize": 52428800,
			"tier": 6,
			"created_on": "2021-03-22T17:32:51",
			"filter_ids": [200, 201],
			"bonus_count": 1,
			"mapper_names": ["Chuckles", "Mum"],
			"mapper_ids": ["76561198000000000", ""],
		}))
		.unwrap();

		assert_eq!(map.tier, Tier::Extreme);
		assert!(map.is_ranked_in(Mode::SimpleKZ));
		assert!(!map.is_ranked_in(Mode::Vanilla));
		assert_eq!(map.mappers.len(), 2);
		assert_eq!(map.mappers[1].steam_id, None);

		let mismatched = serde_json::from_value::<GameMap>(serde_json::json!({
			"id": 993,
			"name": "kz_broken",
			"tier": 2,
			"created_on": "2021-03-22T17:32:51",
			"mapper_names": ["a", "b"],
			"mapper_ids": ["1"],
		}));

		assert!(mismatched.is_err());
	}
}
