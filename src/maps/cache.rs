//! An in-memory cache for the map catalog.
//!
//! The catalog changes rarely, but every progress request needs all of it. Fetching it once per
//! TTL and handing out cheap clones of the same snapshot keeps the Profile API happy.
//!
//! If a refresh fails, the next attempt is postponed by [`RETRY_BACKOFF`] (or the TTL, whichever
//! is shorter). Until then, every caller gets the stale snapshot right away, or an error if there
//! is nothing cached yet.

use std::sync::Arc;
use std::time::{Duration, Instant};

use kz::GameMap;
use tokio::sync::RwLock;

use crate::upstream::ProfileApi;
use crate::{Error, Result};

/// How long to wait before hitting the Profile API again after a failed refresh.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(30);

/// The cached map catalog.
#[derive(Debug)]
pub struct MapCache {
	/// Where we get the catalog from.
	profile_api: ProfileApi,

	/// How long a snapshot stays fresh.
	ttl: Duration,

	/// How long to wait after a failed refresh.
	retry_backoff: Duration,

	/// The cached catalog, and when to refresh it.
	cached: RwLock<Cached>,
}

#[derive(Debug)]
struct Cached {
	/// The last successfully fetched catalog.
	maps: Option<Snapshot>,

	/// Until then, the upstream is left alone.
	refresh_at: Instant,
}

#[derive(Debug)]
struct Snapshot {
	fetched_at: Instant,
	maps: Arc<[GameMap]>,
}

impl Cached {
	/// Returns the cached catalog if it is not due for a refresh yet.
	fn fresh(&self) -> Option<Arc<[GameMap]>> {
		if Instant::now() >= self.refresh_at {
			return None;
		}

		self.maps.as_ref().map(|snapshot| Arc::clone(&snapshot.maps))
	}
}

impl MapCache {
	/// Creates a new, empty, [`MapCache`].
	///
	/// Nothing is fetched until the first call to [`MapCache::get()`].
	pub fn new(profile_api: ProfileApi, ttl: Duration) -> Self {
		Self {
			profile_api,
			ttl,
			retry_backoff: RETRY_BACKOFF.min(ttl),
			cached: RwLock::new(Cached { maps: None, refresh_at: Instant::now() }),
		}
	}

	/// Overrides how long to wait before retrying a failed refresh.
	pub fn with_retry_backoff(self, retry_backoff: Duration) -> Self {
		Self { retry_backoff, ..self }
	}

	/// Returns the current catalog, fetching a new one if the cached snapshot expired.
	///
	/// Concurrent callers wait for a single refresh instead of all hitting the upstream. If the
	/// refresh fails, the stale snapshot is served; the error only surfaces if there is nothing
	/// cached yet.
	pub async fn get(&self) -> Result<Arc<[GameMap]>> {
		if let Some(maps) = self.cached.read().await.fresh() {
			return Ok(maps);
		}

		let mut cached = self.cached.write().await;

		// someone else might have refreshed (or tried to) while we were waiting for the lock
		if Instant::now() < cached.refresh_at {
			return match &cached.maps {
				Some(snapshot) => Ok(Arc::clone(&snapshot.maps)),
				None => Err(Error::unavailable("Profile API")),
			};
		}

		match self.profile_api.maps().await {
			Ok(maps) => {
				let maps = Arc::<[GameMap]>::from(maps);
				let now = Instant::now();

				tracing::info! {
					target: "kzprofile::maps",
					amount = maps.len(),
					"refreshed map catalog",
				};

				cached.maps = Some(Snapshot { fetched_at: now, maps: Arc::clone(&maps) });
				cached.refresh_at = now + self.ttl;

				Ok(maps)
			}
			Err(error) => {
				cached.refresh_at = Instant::now() + self.retry_backoff;

				let Some(stale) = &cached.maps else {
					tracing::warn! {
						target: "kzprofile::maps",
						%error,
						retry_in = ?self.retry_backoff,
						"failed to fetch map catalog",
					};

					return Err(error);
				};

				tracing::warn! {
					target: "kzprofile::maps",
					%error,
					age = ?stale.fetched_at.elapsed(),
					retry_in = ?self.retry_backoff,
					"failed to refresh map catalog; serving stale snapshot",
				};

				Ok(Arc::clone(&stale.maps))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use axum::http::StatusCode;
	use tokio::time::{sleep, Instant};

	use super::*;
	use crate::test::{FakeUpstream, UpstreamHealth};

	const SHORT_TTL: Duration = Duration::from_millis(100);

	fn cache(
		upstream: &FakeUpstream,
		ttl: Duration,
		timeout: Duration,
	) -> anyhow::Result<MapCache> {
		let http_client = reqwest::Client::builder().timeout(timeout).build()?;
		let profile_api = ProfileApi::new(http_client, upstream.url("/profile/")?);

		Ok(MapCache::new(profile_api, ttl).with_retry_backoff(Duration::from_secs(60)))
	}

	#[tokio::test]
	async fn refetch_after_ttl() -> anyhow::Result<()> {
		let upstream = FakeUpstream::spawn().await?;
		let cache = cache(&upstream, SHORT_TTL, Duration::from_secs(5))?;

		assert_eq!(cache.get().await?.len(), 3);
		assert_eq!(cache.get().await?.len(), 3);
		assert_eq!(upstream.map_requests(), 1);

		sleep(SHORT_TTL * 2).await;

		assert_eq!(cache.get().await?.len(), 3);
		assert_eq!(upstream.map_requests(), 2);

		upstream.shutdown().await
	}

	#[tokio::test]
	async fn stale_snapshot_on_failed_refresh() -> anyhow::Result<()> {
		let upstream = FakeUpstream::spawn().await?;
		let cache = cache(&upstream, SHORT_TTL, Duration::from_secs(5))?;

		assert_eq!(cache.get().await?.len(), 3);

		upstream.set_health(UpstreamHealth::Failing);
		sleep(SHORT_TTL * 2).await;

		assert_eq!(cache.get().await?.len(), 3);
		assert_eq!(upstream.map_requests(), 2);

		// the failed refresh is not retried right away
		assert_eq!(cache.get().await?.len(), 3);
		assert_eq!(upstream.map_requests(), 2);

		upstream.shutdown().await
	}

	#[tokio::test]
	async fn nothing_cached() -> anyhow::Result<()> {
		let upstream = FakeUpstream::spawn().await?;
		let cache = cache(&upstream, SHORT_TTL, Duration::from_secs(5))?;

		upstream.set_health(UpstreamHealth::Failing);

		let error = cache.get().await.expect_err("upstream is down");
		assert_eq!(error.status(), StatusCode::BAD_GATEWAY);

		let error = cache.get().await.expect_err("upstream is still down");
		assert_eq!(error.status(), StatusCode::BAD_GATEWAY);
		assert_eq!(upstream.map_requests(), 1);

		upstream.shutdown().await
	}

	#[tokio::test]
	async fn concurrent_callers_share_a_failed_refresh() -> anyhow::Result<()> {
		let upstream = FakeUpstream::spawn().await?;
		let timeout = Duration::from_millis(500);
		let cache = cache(&upstream, SHORT_TTL, timeout)?;

		assert_eq!(cache.get().await?.len(), 3);

		upstream.set_health(UpstreamHealth::Hanging);
		sleep(SHORT_TTL * 2).await;

		let started = Instant::now();
		let (a, b, c, d) = tokio::join!(cache.get(), cache.get(), cache.get(), cache.get());
		let elapsed = started.elapsed();

		for maps in [a, b, c, d] {
			assert_eq!(maps?.len(), 3);
		}

		assert!(elapsed < timeout * 2, "waited {elapsed:?} for a stale snapshot");
		assert_eq!(upstream.map_requests(), 2);

		// the hanging request never finishes, so there is no graceful shutdown
		Ok(())
	}
}
