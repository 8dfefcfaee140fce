use std::result::Result as StdResult;

use thiserror::Error;

/// Type alias for a [`Result<T, E>`] with its `E` parameter set to [`Error`].
///
/// [`Result<T, E>`]: std::result::Result
pub type Result<T> = StdResult<T, Error>;

/// Errors that can occur when parsing or validating KZ data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
	/// A number that does not map to any [`Mode`](crate::Mode).
	#[error("`{value}` is not a valid Mode ID.")]
	InvalidModeID { value: u16 },

	/// A string that does not name any [`Mode`](crate::Mode).
	#[error("`{value}` is not a valid Mode.")]
	InvalidMode { value: String },

	/// A number or string that is not a [`Tier`](crate::Tier).
	#[error("`{value}` is not a valid Tier.")]
	InvalidTier { value: String },

	/// A string that does not name any [`RunCategory`](crate::RunCategory).
	#[error("`{value}` is not a valid run category.")]
	InvalidRunCategory { value: String },

	/// The upstream sent a different amount of mapper names than mapper IDs.
	#[error("mapper names and ids differ in length ({names} names, {ids} ids)")]
	MapperLengthMismatch { names: usize, ids: usize },

	/// A distribution fit parameter that is out of range; see [`Burr12::new()`].
	///
	/// [`Burr12::new()`]: crate::Burr12::new
	#[error("invalid distribution parameter `{parameter}`: {value}")]
	InvalidDistribution { parameter: &'static str, value: f64 },
}
