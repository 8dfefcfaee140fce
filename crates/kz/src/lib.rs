//! Core KZ types and computations.
//!
//! This crate has no I/O of its own. It models the data served by the upstream KZ services
//! (maps, finishes, distribution fits) and turns it into the things a profile page shows:
//!
//!    - [`PlayerProgress`] reduces a player's finishes on every ranked map into medal counts, a
//!      rank, and per-category lists of finished / unfinished maps.
//!    - [`ChartSeries`] discretizes a [Burr Type XII] fit of a map's completion times into
//!      percentile and density curves.
//!
//! [Burr Type XII]: https://en.wikipedia.org/wiki/Burr_distribution

mod error;
pub use error::{Error, Result};

mod mode;
pub use mode::Mode;

mod tier;
pub use tier::Tier;

pub mod maps;
pub use maps::{GameMap, Mapper};

pub mod records;
pub use records::{FinishRecord, RunCategory};

pub mod ranks;
pub use ranks::{Rank, RankTable};

pub mod progress;
pub use progress::PlayerProgress;

pub mod distribution;
pub use distribution::{Burr12, ChartSeries, DistributionFit, RunDistribution};

#[cfg(feature = "serde")]
pub mod serde;

#[cfg(test)]
mod testing;
