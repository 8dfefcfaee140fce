//! Player ranks.
//!
//! A player's rank is determined by the sum of the points of all their pro and TP finishes in a
//! given mode. Every mode has its own ladder of point thresholds, but all modes share the same
//! tier labels and colors.

use crate::Mode;

/// How many rank tiers there are.
pub const RANK_COUNT: usize = 23;

/// A single rung on the rank ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RankTier {
	/// The tier's display name.
	pub label: &'static str,

	/// The tier's display color, as a hex string.
	pub color: &'static str,
}

/// The rank ladder for a single mode.
#[derive(Debug, PartialEq, Eq)]
pub struct RankTable {
	mode: Mode,

	/// Minimum amount of points required for each tier in [`TIERS`].
	///
	/// Strictly increasing, starting at 0.
	thresholds: [u32; RANK_COUNT],
}

/// A resolved rank.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rank {
	/// Position on the ladder; 0 is the lowest rank.
	pub index: usize,

	/// The rank's display name.
	pub label: &'static str,

	/// The rank's display color.
	pub color: &'static str,

	/// Points required for this rank.
	pub threshold: u32,

	/// Points required for the next rank, if there is one.
	pub next_threshold: Option<u32>,

	/// How far the player has made it towards the next rank, in the range `0.0..=1.0`.
	///
	/// This is always `1.0` at the top of the ladder.
	pub progress: f64,
}

#[rustfmt::skip]
static TIERS: [RankTier; RANK_COUNT] = [
	RankTier { label: "New",       color: "#a0a0a0" },
	RankTier { label: "Beginner-", color: "#ffffff" },
	RankTier { label: "Beginner",  color: "#ffffff" },
	RankTier { label: "Beginner+", color: "#ffffff" },
	RankTier { label: "Amateur-",  color: "#5e98d9" },
	RankTier { label: "Amateur",   color: "#5e98d9" },
	RankTier { label: "Amateur+",  color: "#5e98d9" },
	RankTier { label: "Casual-",   color: "#99ccff" },
	RankTier { label: "Casual",    color: "#99ccff" },
	RankTier { label: "Casual+",   color: "#99ccff" },
	RankTier { label: "Regular-",  color: "#40fe40" },
	RankTier { label: "Regular",   color: "#40fe40" },
	RankTier { label: "Regular+",  color: "#40fe40" },
	RankTier { label: "Skilled-",  color: "#b66bff" },
	RankTier { label: "Skilled",   color: "#b66bff" },
	RankTier { label: "Skilled+",  color: "#b66bff" },
	RankTier { label: "Expert-",   color: "#ea5ef0" },
	RankTier { label: "Expert",    color: "#ea5ef0" },
	RankTier { label: "Expert+",   color: "#ea5ef0" },
	RankTier { label: "Semipro",   color: "#ff4040" },
	RankTier { label: "Pro",       color: "#ff4040" },
	RankTier { label: "Master",    color: "#e6c800" },
	RankTier { label: "Legend",    color: "#e6c800" },
];

static KZT_RANKS: RankTable = RankTable {
	mode: Mode::KZTimer,
	thresholds: [
		0, 1, 500, 1_000, 2_000, 5_000, 10_000, 20_000, 30_000, 40_000, 60_000, 70_000, 80_000,
		100_000, 120_000, 150_000, 200_000, 230_000, 250_000, 300_000, 400_000, 600_000, 800_000,
	],
};

static SKZ_RANKS: RankTable = RankTable {
	mode: Mode::SimpleKZ,
	thresholds: [
		0, 1, 500, 1_000, 2_000, 5_000, 10_000, 20_000, 30_000, 40_000, 60_000, 70_000, 80_000,
		100_000, 120_000, 150_000, 200_000, 230_000, 250_000, 300_000, 400_000, 600_000, 800_000,
	],
};

static VNL_RANKS: RankTable = RankTable {
	mode: Mode::Vanilla,
	thresholds: [
		0, 1, 500, 1_000, 2_000, 5_000, 10_000, 20_000, 30_000, 40_000, 60_000, 70_000, 80_000,
		100_000, 120_000, 150_000, 160_000, 180_000, 200_000, 250_000, 300_000, 400_000, 600_000,
	],
};

impl RankTable {
	/// Returns the rank ladder for the given `mode`.
	pub fn for_mode(mode: Mode) -> &'static Self {
		match mode {
			Mode::KZTimer => &KZT_RANKS,
			Mode::SimpleKZ => &SKZ_RANKS,
			Mode::Vanilla => &VNL_RANKS,
		}
	}

	/// The mode this ladder belongs to.
	pub const fn mode(&self) -> Mode {
		self.mode
	}

	/// Iterates over every rung of the ladder together with its point threshold, lowest first.
	pub fn tiers(
		&self,
	) -> impl DoubleEndedIterator<Item = (&'static RankTier, u32)> + ExactSizeIterator + '_ {
		TIERS.iter().zip(self.thresholds.iter().copied())
	}

	/// Resolves the rank for the given amount of `points`.
	///
	/// The highest threshold not exceeding `points` wins; progress is interpolated between that
	/// threshold and the next one.
	pub fn resolve(&self, points: u32) -> Rank {
		let Some((index, (tier, threshold))) = self
			.tiers()
			.enumerate()
			.rfind(|&(_, (_, threshold))| threshold <= points)
		else {
			unreachable!("rank ladders start at 0 points");
		};

		let next_threshold = self.thresholds.get(index + 1).copied();

		let progress = match next_threshold {
			None => 1.0,
			Some(next) => f64::from(points - threshold) / f64::from(next - threshold),
		};

		Rank {
			index,
			label: tier.label,
			color: tier.color,
			threshold,
			next_threshold,
			progress,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tables_are_well_formed() {
		for mode in Mode::ALL {
			let table = RankTable::for_mode(mode);

			assert_eq!(table.mode(), mode);
			assert_eq!(table.thresholds[0], 0, "{mode} ladder must start at 0");
			assert!(
				table.thresholds.windows(2).all(|pair| pair[0] < pair[1]),
				"{mode} thresholds must be strictly increasing",
			);
			assert_eq!(table.tiers().count(), RANK_COUNT);
		}
	}

	#[test]
	fn zero_points() {
		let rank = RankTable::for_mode(Mode::KZTimer).resolve(0);

		assert_eq!(rank.index, 0);
		assert_eq!(rank.label, "New");
		assert_eq!(rank.next_threshold, Some(1));
		assert_eq!(rank.progress, 0.0);
	}

	#[test]
	fn exact_threshold() {
		let rank = RankTable::for_mode(Mode::KZTimer).resolve(10_000);

		assert_eq!(rank.label, "Amateur+");
		assert_eq!(rank.threshold, 10_000);
		assert_eq!(rank.progress, 0.0);
	}

	#[test]
	fn progress_is_interpolated() {
		let rank = RankTable::for_mode(Mode::SimpleKZ).resolve(15_000);

		assert_eq!(rank.threshold, 10_000);
		assert_eq!(rank.next_threshold, Some(20_000));
		assert!((rank.progress - 0.5).abs() < f64::EPSILON);
	}

	#[test]
	fn top_of_the_ladder() {
		let rank = RankTable::for_mode(Mode::KZTimer).resolve(1_234_567);

		assert_eq!(rank.index, RANK_COUNT - 1);
		assert_eq!(rank.label, "Legend");
		assert_eq!(rank.next_threshold, None);
		assert_eq!(rank.progress, 1.0);
	}

	#[test]
	fn vanilla_has_its_own_ladder() {
		let kzt = RankTable::for_mode(Mode::KZTimer).resolve(600_000);
		let vnl = RankTable::for_mode(Mode::Vanilla).resolve(600_000);

		assert_eq!(kzt.label, "Master");
		assert_eq!(vnl.label, "Legend");
	}

	#[test]
	fn monotonic() {
		for mode in Mode::ALL {
			let table = RankTable::for_mode(mode);
			let mut previous = table.resolve(0);

			for points in (0..=1_000_000).step_by(997) {
				let rank = table.resolve(points);

				assert!(rank.index >= previous.index, "{mode}: rank dropped at {points} points");

				previous = rank;
			}
		}
	}
}
