//! A player's progress through the map pool of a single mode.
//!
//! [`PlayerProgress::aggregate()`] takes the full map catalog and every pro / TP finish a player
//! has in some mode, and reduces them into the numbers a profile page displays: total & average
//! points, a [rank], medal counts, and which maps have (not) been finished in each
//! [category].
//!
//! The result is recomputed from scratch every time; nothing in here is incremental.
//!
//! [rank]: crate::Rank
//! [category]: crate::RunCategory

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{FinishRecord, GameMap, Mapper, Mode, Rank, RankTable, RunCategory, Tier};

/// Everything a player has achieved in one mode.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlayerProgress {
	/// The mode this progress was computed for.
	pub mode: Mode,

	/// The player's rank, based on `total_points`.
	pub rank: Rank,

	/// Sum of the points of every pro and TP finish.
	pub total_points: u32,

	/// `total_points` divided by the amount of pro and TP finishes.
	///
	/// This is `0.0` if the player has no finishes at all.
	pub average_points: f64,

	/// Medals earned across pro and TP finishes.
	pub medals: Medals,

	/// Maps (not) finished without teleports.
	pub pro: CategoryProgress,

	/// Maps (not) finished with teleports.
	///
	/// `kzpro_` maps never show up here.
	pub tp: CategoryProgress,

	/// The better of the pro and TP finish on every map.
	pub nub: CategoryProgress,
}

/// Medal counts.
///
/// Pro and TP finishes are counted separately, so a single map can earn two medals.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Medals {
	/// Finishes worth exactly 1000 points.
	pub gold: u32,

	/// Finishes worth 900-999 points.
	pub red: u32,

	/// Finishes worth 800-899 points.
	pub blue: u32,
}

/// Finished and unfinished maps of a single [`RunCategory`].
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CategoryProgress {
	/// Maps with a finish in this category, in catalog order.
	pub finished: Vec<ProgressEntry>,

	/// Maps without one, in catalog order.
	pub unfinished: Vec<ProgressEntry>,
}

/// A map in a player's progress, together with their finish on it (if any).
///
/// Unfinished maps have all of their finish fields zeroed, so they can be displayed the same way
/// as finished ones.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProgressEntry {
	/// The map's ID.
	pub map_id: u16,

	/// The map's name.
	pub map_name: String,

	/// The map's tier.
	pub tier: Tier,

	/// Who made the map.
	pub mappers: Vec<Mapper>,

	/// When the map was added to the catalog.
	pub map_created_on: DateTime<Utc>,

	/// How many bonus courses the map has.
	pub bonus_count: u8,

	/// The finish time in seconds; `0.0` for unfinished maps.
	pub time: f64,

	/// How many teleports were used; `0` for unfinished maps.
	pub teleports: u32,

	/// Points awarded for the finish; `0` for unfinished maps.
	pub points: u16,

	/// When the finish was set.
	pub created_on: Option<DateTime<Utc>>,

	/// The server the finish was set on.
	pub server_name: Option<String>,
}

impl PlayerProgress {
	/// Aggregates a player's finishes in `mode`.
	///
	/// Maps that are not ranked in `mode` are skipped entirely. Finishes are matched to maps by
	/// map ID; if a category contains multiple finishes for the same map, the first one wins.
	#[tracing::instrument(level = "debug", skip_all, fields(%mode))]
	pub fn aggregate(
		mode: Mode,
		maps: &[GameMap],
		pro_finishes: &[FinishRecord],
		tp_finishes: &[FinishRecord],
	) -> Self {
		let pro_finishes = index_by_map(pro_finishes);
		let tp_finishes = index_by_map(tp_finishes);

		let mut total_points = 0_u32;
		let mut finish_count = 0_u32;
		let mut medals = Medals::default();
		let mut pro = CategoryProgress::default();
		let mut tp = CategoryProgress::default();
		let mut nub = CategoryProgress::default();

		for map in maps.iter().filter(|map| map.is_ranked_in(mode)) {
			let pro_finish = pro_finishes.get(&map.id).copied();
			let tp_finish = tp_finishes
				.get(&map.id)
				.copied()
				.filter(|_| map.has_teleport_category());

			for finish in [pro_finish, tp_finish].into_iter().flatten() {
				total_points += u32::from(finish.points);
				finish_count += 1;
				medals.count(finish.points);
			}

			pro.push(map, pro_finish);

			if map.has_teleport_category() {
				tp.push(map, tp_finish);
			}

			nub.push(map, better_finish(pro_finish, tp_finish));
		}

		let average_points = if finish_count == 0 {
			0.0
		} else {
			f64::from(total_points) / f64::from(finish_count)
		};

		let rank = RankTable::for_mode(mode).resolve(total_points);

		tracing::debug!(
			total_points,
			finish_count,
			rank = rank.label,
			pro = pro.finished.len(),
			tp = tp.finished.len(),
			nub = nub.finished.len(),
			"aggregated player progress",
		);

		Self { mode, rank, total_points, average_points, medals, pro, tp, nub }
	}

	/// Returns the progress for the given `category`.
	pub const fn category(&self, category: RunCategory) -> &CategoryProgress {
		match category {
			RunCategory::Pro => &self.pro,
			RunCategory::TP => &self.tp,
			RunCategory::Nub => &self.nub,
		}
	}
}

impl Medals {
	/// Counts a single finish worth `points`.
	fn count(&mut self, points: u16) {
		match points {
			1000 => self.gold += 1,
			900..=999 => self.red += 1,
			800..=899 => self.blue += 1,
			_ => {}
		}
	}

	/// The total amount of medals.
	pub const fn total(&self) -> u32 {
		self.gold + self.red + self.blue
	}
}

impl CategoryProgress {
	fn push(&mut self, map: &GameMap, finish: Option<&FinishRecord>) {
		match finish {
			Some(finish) => self.finished.push(ProgressEntry::finished(map, finish)),
			None => self.unfinished.push(ProgressEntry::unfinished(map)),
		}
	}

	/// How many maps this category covers, finished or not.
	pub fn total(&self) -> usize {
		self.finished.len() + self.unfinished.len()
	}
}

impl ProgressEntry {
	fn finished(map: &GameMap, finish: &FinishRecord) -> Self {
		Self {
			time: finish.time,
			teleports: finish.teleports,
			points: finish.points,
			created_on: Some(finish.created_on),
			server_name: finish.server_name.clone(),
			..Self::unfinished(map)
		}
	}

	fn unfinished(map: &GameMap) -> Self {
		Self {
			map_id: map.id,
			map_name: map.name.clone(),
			tier: map.tier,
			mappers: map.mappers.clone(),
			map_created_on: map.created_on,
			bonus_count: map.bonus_count,
			time: 0.0,
			teleports: 0,
			points: 0,
			created_on: None,
			server_name: None,
		}
	}

	/// Whether this entry has a finish.
	pub const fn is_finished(&self) -> bool {
		self.created_on.is_some()
	}
}

/// Indexes `records` by map ID, keeping the first record for every map.
fn index_by_map(records: &[FinishRecord]) -> HashMap<u16, &FinishRecord> {
	let mut index = HashMap::with_capacity(records.len());

	for record in records {
		index.entry(record.map_id).or_insert(record);
	}

	index
}

/// Picks the faster of a pro and a TP finish. Ties go to the pro finish.
fn better_finish<'a>(
	pro: Option<&'a FinishRecord>,
	tp: Option<&'a FinishRecord>,
) -> Option<&'a FinishRecord> {
	match (pro, tp) {
		(Some(pro), Some(tp)) if tp.time < pro.time => Some(tp),
		(Some(pro), _) => Some(pro),
		(None, tp) => tp,
	}
}
