//! Builders for test data.

use chrono::{TimeZone, Utc};

use crate::{FinishRecord, GameMap, Mapper, Mode, Tier};

pub(crate) fn map(id: u16, name: &str, modes: &[Mode]) -> GameMap {
	GameMap {
		id,
		name: name.to_owned(),
		filesize: 1_048_576,
		tier: Tier::Medium,
		created_on: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
		filter_ids: modes.iter().map(Mode::filter_id).collect(),
		bonus_count: 0,
		mappers: vec![Mapper { name: String::from("GameChaos"), steam_id: None }],
	}
}

pub(crate) fn finish(
	map_id: u16,
	map_name: &str,
	time: f64,
	teleports: u32,
	points: u16,
) -> FinishRecord {
	FinishRecord {
		map_id,
		map_name: map_name.to_owned(),
		time,
		teleports,
		points,
		created_on: Utc.with_ymd_and_hms(2023, 4, 8, 18, 37, 20).unwrap(),
		server_name: Some(String::from("Hikari KZ")),
	}
}
