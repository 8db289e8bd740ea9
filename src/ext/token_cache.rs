//! Token reuse with a jittered preemptive refresh window.
//!
//! The core client mints a fresh token for every call, mirroring the system it talks to. That
//! is wasted signing work in production, so this cache reuses a minted token until a jittered
//! window before its expiry; the jitter decorrelates refreshes across client instances.
//! Minting is local (no network), so a plain mutex around the slot is all the coordination
//! concurrent calls need.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// crates.io
use rand::Rng;
// self
use crate::{
	_prelude::*,
	auth::{SignedToken, TokenIssuer},
	error::TokenError,
};

struct CachedToken {
	token: SignedToken,
	refresh_at: OffsetDateTime,
}

/// Shared token slot that hands out a cached token until near expiry.
///
/// Cloning shares the slot, so one cache can serve every clone of a client.
#[derive(Clone)]
pub struct TokenCache {
	slot: Arc<Mutex<Option<CachedToken>>>,
	minted: Arc<AtomicU64>,
	preemptive_window: Duration,
}
impl TokenCache {
	/// Default preemptive refresh window.
	pub const DEFAULT_PREEMPTIVE_WINDOW: Duration = Duration::seconds(60);

	/// Creates a cache with the default 60-second preemptive window.
	pub fn new() -> Self {
		Self::with_preemptive_window(Self::DEFAULT_PREEMPTIVE_WINDOW)
	}

	/// Creates a cache that refreshes once a token is within `window` of its expiry.
	pub fn with_preemptive_window(window: Duration) -> Self {
		Self {
			slot: Arc::new(Mutex::new(None)),
			minted: Arc::new(AtomicU64::new(0)),
			preemptive_window: if window.is_negative() { Duration::ZERO } else { window },
		}
	}

	/// Returns a valid bearer token, minting through `issuer` only when the cached one is
	/// missing or inside its refresh window.
	pub fn bearer(&self, issuer: &TokenIssuer) -> Result<SignedToken, TokenError> {
		self.bearer_at(issuer, OffsetDateTime::now_utc())
	}

	/// Clock-pinned variant of [`bearer`](Self::bearer).
	pub fn bearer_at(
		&self,
		issuer: &TokenIssuer,
		now: OffsetDateTime,
	) -> Result<SignedToken, TokenError> {
		let mut slot = self.slot.lock();

		if let Some(cached) = slot.as_ref()
			&& now < cached.refresh_at
		{
			return Ok(cached.token.clone());
		}

		let token = issuer.issue_at(now)?;
		let expires_at = now + issuer.ttl();

		*slot = Some(CachedToken {
			token: token.clone(),
			refresh_at: self.refresh_instant(now, expires_at),
		});

		self.minted.fetch_add(1, Ordering::Relaxed);

		Ok(token)
	}

	/// Drops the cached token so the next call mints a fresh one.
	pub fn invalidate(&self) {
		self.slot.lock().take();
	}

	/// Total number of tokens minted through this cache.
	pub fn minted_total(&self) -> u64 {
		self.minted.load(Ordering::Relaxed)
	}

	fn refresh_instant(&self, now: OffsetDateTime, expires_at: OffsetDateTime) -> OffsetDateTime {
		let refresh_at = expires_at - self.jittered_window();

		// A window wider than the TTL would schedule the refresh before the mint.
		if refresh_at <= now { now } else { refresh_at }
	}

	fn jittered_window(&self) -> Duration {
		let window_secs = self.preemptive_window.whole_seconds();

		if window_secs <= 1 {
			return self.preemptive_window;
		}

		let jitter = rand::rng().random_range(0..window_secs);

		self.preemptive_window - Duration::seconds(jitter)
	}
}
impl Default for TokenCache {
	fn default() -> Self {
		Self::new()
	}
}
impl Debug for TokenCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenCache")
			.field("preemptive_window", &self.preemptive_window)
			.field("minted", &self.minted_total())
			.field("populated", &self.slot.lock().is_some())
			.finish()
	}
}
