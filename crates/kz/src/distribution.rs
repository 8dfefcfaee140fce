//! Completion time distributions.
//!
//! The Global API fits a [Burr Type XII distribution] to the times of every leaderboard (map,
//! mode, stage, and whether teleports are allowed). This module turns those fits into curves that
//! can be charted: the survival function ("what fraction of runs are slower than this?") and the
//! probability density.
//!
//! [Burr Type XII distribution]: https://en.wikipedia.org/wiki/Burr_distribution

use crate::{Error, Result};

/// Once the survival function drops below this value, the remaining runs are negligible and the
/// curve is cut off.
pub const PERCENTILE_CUTOFF: f64 = 0.1;

/// Upper bound (exclusive) for the time axis, in seconds.
pub const MAX_TIME: u32 = 3 * 60 * 60;

/// Raw fit parameters, as sent by the Global API.
///
/// These have not been validated; see [`Burr12::new()`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionFit {
	/// The first shape parameter.
	pub c: f64,

	/// The second shape parameter.
	pub d: f64,

	/// Shifts the distribution along the time axis.
	pub loc: f64,

	/// Stretches the distribution along the time axis.
	pub scale: f64,
}

/// A validated [Burr Type XII] distribution, shifted by `loc` and stretched by `scale`.
///
/// [Burr Type XII]: https://en.wikipedia.org/wiki/Burr_distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burr12 {
	c: f64,
	d: f64,
	loc: f64,
	scale: f64,
}

/// Discretized curves for a single leaderboard.
///
/// Both series contain one point per second, starting at 0.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChartSeries {
	/// The survival function.
	pub percentiles: Vec<PercentilePoint>,

	/// The probability density, annotated with the survival function.
	pub densities: Vec<DensityPoint>,
}

/// A single point on the survival curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PercentilePoint {
	/// Seconds.
	pub time: u32,

	/// The fraction of runs slower than `time`.
	pub percentile: f64,
}

/// A single point on the density curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DensityPoint {
	/// Seconds.
	pub time: u32,

	/// The probability density at `time`.
	pub density: f64,

	/// The fraction of runs slower than `time`.
	pub percentile: f64,
}

/// The pro and TP curves of a single map / mode / stage.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunDistribution {
	/// Runs without teleports.
	pub pro: ChartSeries,

	/// Runs with teleports.
	pub tp: ChartSeries,
}

impl Burr12 {
	/// Validates the given parameters.
	///
	/// `c`, `d`, and `scale` must be positive, and all parameters must be finite.
	pub fn new(DistributionFit { c, d, loc, scale }: DistributionFit) -> Result<Self> {
		for (parameter, value) in [("c", c), ("d", d), ("scale", scale)] {
			if !value.is_finite() || value <= 0.0 {
				return Err(Error::InvalidDistribution { parameter, value });
			}
		}

		if !loc.is_finite() {
			return Err(Error::InvalidDistribution { parameter: "loc", value: loc });
		}

		Ok(Self { c, d, loc, scale })
	}

	/// Standardizes `time` according to `loc` and `scale`.
	fn standardize(&self, time: f64) -> f64 {
		(time - self.loc) / self.scale
	}

	/// The survival function: the probability of a run being slower than `time`.
	pub fn sf(&self, time: f64) -> f64 {
		let y = self.standardize(time);

		if y <= 0.0 {
			return 1.0;
		}

		(1.0 + y.powf(self.c)).powf(-self.d)
	}

	/// The probability density at `time`.
	///
	/// For `c < 1` the density diverges at `loc`; that single point is reported as `0.0` so the
	/// curve stays finite.
	pub fn pdf(&self, time: f64) -> f64 {
		let y = self.standardize(time);

		if y < 0.0 {
			return 0.0;
		}

		let Self { c, d, scale, .. } = *self;

		if y == 0.0 && c < 1.0 {
			return 0.0;
		}

		(c * d * y.powf(c - 1.0)) / (scale * (1.0 + y.powf(c)).powf(d + 1.0))
	}

	/// The fraction of runs that are slower than `time`, in the range `0.0..=1.0`.
	///
	/// Used to place a single run on the curves produced by [`ChartSeries::from_distribution()`].
	pub fn percentile_of(&self, time: f64) -> f64 {
		self.sf(time)
	}
}

impl TryFrom<DistributionFit> for Burr12 {
	type Error = Error;

	fn try_from(fit: DistributionFit) -> Result<Self> {
		Self::new(fit)
	}
}

impl ChartSeries {
	/// Discretizes the given `fit`.
	///
	/// Missing fits produce empty series, and so do invalid ones (after logging a warning).
	/// Otherwise both curves are sampled once per second until the survival function drops below
	/// [`PERCENTILE_CUTOFF`] or [`MAX_TIME`] is reached, whichever happens first.
	pub fn estimate(fit: Option<&DistributionFit>) -> Self {
		let Some(&fit) = fit else {
			return Self::default();
		};

		match Burr12::try_from(fit) {
			Ok(distribution) => Self::from_distribution(&distribution),
			Err(error) => {
				tracing::warn!(%error, ?fit, "ignoring invalid distribution fit");
				Self::default()
			}
		}
	}

	/// Discretizes a validated distribution.
	pub fn from_distribution(distribution: &Burr12) -> Self {
		let mut series = Self::default();

		for time in 0..MAX_TIME {
			let percentile = distribution.sf(f64::from(time));

			if percentile < PERCENTILE_CUTOFF {
				break;
			}

			let density = distribution.pdf(f64::from(time));

			series.percentiles.push(PercentilePoint { time, percentile });
			series.densities.push(DensityPoint { time, density, percentile });
		}

		series
	}

	/// Whether there is anything to draw.
	pub fn is_empty(&self) -> bool {
		self.percentiles.is_empty()
	}

	/// The amount of points on each curve.
	pub fn len(&self) -> usize {
		self.percentiles.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fit(c: f64, d: f64, loc: f64, scale: f64) -> DistributionFit {
		DistributionFit { c, d, loc, scale }
	}

	fn assert_close(left: f64, right: f64) {
		assert!((left - right).abs() < 1e-9, "{left} != {right}");
	}

	#[test]
	fn survival_function() {
		let distribution = Burr12::new(fit(2.0, 1.0, 0.0, 10.0)).unwrap();

		// y = 1 => (1 + 1)^-1
		assert_close(distribution.sf(10.0), 0.5);

		// y = 2 => (1 + 4)^-1
		assert_close(distribution.sf(20.0), 0.2);
	}

	#[test]
	fn density() {
		let distribution = Burr12::new(fit(2.0, 1.0, 0.0, 10.0)).unwrap();

		// (2 * 1 * 1) / (10 * 2^2)
		assert_close(distribution.pdf(10.0), 0.05);
	}

	#[test]
	fn non_integer_exponents() {
		let distribution = Burr12::new(fit(1.5, 0.75, 5.0, 30.0)).unwrap();
		let y = (65.0_f64 - 5.0) / 30.0;

		assert_close(distribution.sf(65.0), (1.0 + y.powf(1.5)).powf(-0.75));
	}

	#[test]
	fn density_at_the_start_of_the_support() {
		// c = 1 => d / scale
		let distribution = Burr12::new(fit(1.0, 2.0, 0.0, 10.0)).unwrap();

		assert_close(distribution.pdf(0.0), 0.2);

		let series = ChartSeries::from_distribution(&distribution);

		assert_eq!(series.densities.first().map(|point| point.time), Some(0));
		assert_close(series.densities[0].density, 0.2);
		assert_eq!(series.densities[0].percentile, 1.0);

		// c > 1 => 0
		let distribution = Burr12::new(fit(2.0, 1.0, 5.0, 10.0)).unwrap();

		assert_eq!(distribution.pdf(5.0), 0.0);

		// c < 1 => infinite
		let distribution = Burr12::new(fit(0.5, 1.0, 5.0, 10.0)).unwrap();

		assert_eq!(distribution.pdf(5.0), 0.0);
		assert!(distribution.pdf(5.5).is_finite());
		assert!(distribution.pdf(5.5) > 0.0);
	}

	#[test]
	fn percentile_of_a_run() {
		let distribution = Burr12::try_from(fit(2.0, 1.0, 0.0, 10.5)).unwrap();

		assert_close(distribution.percentile_of(10.5), 0.5);
		assert_eq!(distribution.percentile_of(0.0), 1.0);
		assert!(distribution.percentile_of(3600.0) < 0.001);
	}

	#[test]
	fn outside_of_support() {
		let distribution = Burr12::new(fit(2.0, 1.0, 100.0, 10.0)).unwrap();

		assert_eq!(distribution.sf(50.0), 1.0);
		assert_eq!(distribution.pdf(50.0), 0.0);
		assert_eq!(distribution.sf(100.0), 1.0);
	}

	#[test]
	fn invalid_parameters() {
		assert_eq!(
			Burr12::new(fit(2.0, 1.0, 0.0, 0.0)),
			Err(Error::InvalidDistribution { parameter: "scale", value: 0.0 }),
		);

		assert!(Burr12::new(fit(-1.0, 1.0, 0.0, 1.0)).is_err());
		assert!(Burr12::new(fit(1.0, 0.0, 0.0, 1.0)).is_err());
		assert!(Burr12::new(fit(1.0, 1.0, f64::NAN, 1.0)).is_err());
		assert!(Burr12::new(fit(1.0, f64::INFINITY, 0.0, 1.0)).is_err());
	}

	#[test]
	fn missing_fit() {
		assert!(ChartSeries::estimate(None).is_empty());
	}

	#[test]
	fn invalid_fit_is_treated_as_missing() {
		let series = ChartSeries::estimate(Some(&fit(2.0, 1.0, 0.0, 0.0)));

		assert!(series.is_empty());
		assert!(series.densities.is_empty());
	}

	#[test]
	fn cut_off_at_the_start() {
		// S(0) = (1 + 1000^2)^-1, way below the cutoff
		let series = ChartSeries::estimate(Some(&fit(2.0, 1.0, -1000.0, 1.0)));

		assert_eq!(series.len(), 0);
		assert!(series.densities.is_empty());
	}

	#[test]
	fn cut_off_below_threshold() {
		// S(t) = 1 / (1 + (t / 10.5)^2) drops below 0.1 once t > 31.5
		let series = ChartSeries::estimate(Some(&fit(2.0, 1.0, 0.0, 10.5)));

		assert_eq!(series.len(), 32);
		assert_eq!(series.percentiles.last().map(|point| point.time), Some(31));
		assert!(series.percentiles.iter().all(|point| point.percentile >= PERCENTILE_CUTOFF));
		assert_eq!(series.percentiles[0].percentile, 1.0);
	}

	#[test]
	fn capped_at_three_hours() {
		// decays so slowly that it never reaches the cutoff
		let series = ChartSeries::estimate(Some(&fit(1.0, 0.01, 0.0, 1000.0)));

		assert_eq!(series.len(), usize::try_from(MAX_TIME).unwrap());
		assert_eq!(series.densities.len(), series.len());
		assert_eq!(series.percentiles.last().map(|point| point.time), Some(MAX_TIME - 1));
	}

	#[test]
	fn series_agree() {
		let distribution = Burr12::new(fit(3.2, 0.8, 12.0, 95.0)).unwrap();
		let series = ChartSeries::from_distribution(&distribution);

		assert!(!series.is_empty());

		for (percentile, density) in series.percentiles.iter().zip(&series.densities) {
			assert_eq!(percentile.time, density.time);
			assert_eq!(percentile.percentile, density.percentile);
			assert_close(density.density, distribution.pdf(f64::from(density.time)));
		}
	}

	#[test]
	fn percentiles_never_increase() {
		let distribution = Burr12::new(fit(4.0, 0.5, 30.0, 200.0)).unwrap();
		let series = ChartSeries::from_distribution(&distribution);

		assert!(series.percentiles.windows(2).all(|pair| pair[1].percentile <= pair[0].percentile));
	}
}
