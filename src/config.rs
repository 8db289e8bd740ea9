//! Immutable partner identity configuration passed into the client constructor.
//!
//! Environment reading stays at the entry point (see the demos); the library only ever sees an
//! explicit, validated [`ClientConfig`], which keeps every component testable.

// self
use crate::{
	_prelude::*,
	auth::{DEFAULT_TTL, PartnerId, SigningSecret},
	error::ConfigError,
};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::seconds(30);

/// Validated partner identity plus call policy, owned exclusively by one client instance.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Partner identifier stamped into every token's `sub` claim.
	pub partner_id: PartnerId,
	/// Shared HMAC key for token signing.
	pub secret: SigningSecret,
	/// Root URL of the partner API server.
	pub base_url: Url,
	/// Validity window of issued tokens.
	pub token_ttl: Duration,
	/// Per-call timeout applied by the transport; `None` disables the explicit deadline.
	pub request_timeout: Option<Duration>,
}
impl ClientConfig {
	/// Returns a builder seeded with the mandatory identity triple.
	pub fn builder(
		partner_id: PartnerId,
		secret: SigningSecret,
		base_url: Url,
	) -> ClientConfigBuilder {
		ClientConfigBuilder {
			partner_id,
			secret,
			base_url,
			token_ttl: DEFAULT_TTL,
			request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
		}
	}
}

/// Builder for [`ClientConfig`].
#[derive(Clone, Debug)]
pub struct ClientConfigBuilder {
	partner_id: PartnerId,
	secret: SigningSecret,
	base_url: Url,
	token_ttl: Duration,
	request_timeout: Option<Duration>,
}
impl ClientConfigBuilder {
	/// Overrides the token validity window (defaults to one hour).
	pub fn token_ttl(mut self, ttl: Duration) -> Self {
		self.token_ttl = ttl;

		self
	}

	/// Overrides the per-call timeout (defaults to 30 seconds).
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = Some(timeout);

		self
	}

	/// Removes the explicit per-call deadline, leaving only transport defaults.
	pub fn no_request_timeout(mut self) -> Self {
		self.request_timeout = None;

		self
	}

	/// Validates the inputs and produces a [`ClientConfig`].
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		if self.secret.is_empty() {
			return Err(ConfigError::EmptySecret);
		}
		if !self.token_ttl.is_positive() {
			return Err(ConfigError::NonPositiveTtl);
		}
		if self.request_timeout.is_some_and(|timeout| !timeout.is_positive()) {
			return Err(ConfigError::NonPositiveTimeout);
		}
		if self.base_url.cannot_be_a_base() {
			return Err(ConfigError::BaseUrlCannotBeBase);
		}

		Ok(ClientConfig {
			partner_id: self.partner_id,
			secret: self.secret,
			base_url: self.base_url,
			token_ttl: self.token_ttl,
			request_timeout: self.request_timeout,
		})
	}
}
