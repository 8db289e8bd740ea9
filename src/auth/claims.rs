//! Credential claim model signed into every issued token.

// self
use crate::{_prelude::*, auth::PartnerId};

/// Fixed `iss` claim expected by the partner API server.
pub const ISSUER: &str = "partner-api-system";
/// Fixed `aud` claim expected by the partner API server.
pub const AUDIENCE: &str = "partner-api";

/// Time-bounded assertion of partner identity carried inside a signed token.
///
/// Field names map directly onto the registered JWT claim names used on the wire.
/// Invariant: `exp > iat`; both are computed client-side at issuance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
	/// Subject: the partner identifier.
	pub sub: String,
	/// Issuer tag identifying the partner API system.
	pub iss: String,
	/// Audience the token is minted for.
	pub aud: String,
	/// Issued-at instant, epoch seconds.
	pub iat: i64,
	/// Expiry instant, epoch seconds.
	pub exp: i64,
}
impl Claims {
	/// Builds a claim set for the partner, valid for `ttl` starting at `now`.
	pub fn issue_at(subject: &PartnerId, ttl: Duration, now: OffsetDateTime) -> Self {
		let iat = now.unix_timestamp();

		Self {
			sub: subject.as_ref().to_owned(),
			iss: ISSUER.into(),
			aud: AUDIENCE.into(),
			iat,
			exp: iat + ttl.whole_seconds(),
		}
	}

	/// Issued-at instant as a calendar time.
	pub fn issued_at(&self) -> OffsetDateTime {
		OffsetDateTime::from_unix_timestamp(self.iat).unwrap_or(OffsetDateTime::UNIX_EPOCH)
	}

	/// Expiry instant as a calendar time.
	pub fn expires_at(&self) -> OffsetDateTime {
		OffsetDateTime::from_unix_timestamp(self.exp).unwrap_or(OffsetDateTime::UNIX_EPOCH)
	}

	/// Validity window length.
	pub fn ttl(&self) -> Duration {
		Duration::seconds(self.exp - self.iat)
	}

	/// Returns `true` once `instant` has reached or passed the expiry instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant.unix_timestamp() >= self.exp
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn issued_claims_preserve_the_validity_window() {
		let subject = PartnerId::new("partner-company-a")
			.expect("Partner identifier fixture should be valid.");
		let now = macros::datetime!(2025-01-01 00:00 UTC);
		let claims = Claims::issue_at(&subject, Duration::seconds(3_600), now);

		assert_eq!(claims.sub, "partner-company-a");
		assert_eq!(claims.iss, ISSUER);
		assert_eq!(claims.aud, AUDIENCE);
		assert_eq!(claims.exp - claims.iat, 3_600);
		assert_eq!(claims.ttl(), Duration::hours(1));
		assert_eq!(claims.issued_at(), now);
		assert_eq!(claims.expires_at(), now + Duration::hours(1));
	}

	#[test]
	fn expiry_check_is_inclusive_at_the_boundary() {
		let subject = PartnerId::new("partner").expect("Partner identifier should be valid.");
		let now = macros::datetime!(2025-01-01 00:00 UTC);
		let claims = Claims::issue_at(&subject, Duration::seconds(60), now);

		assert!(!claims.is_expired_at(now + Duration::seconds(59)));
		assert!(claims.is_expired_at(now + Duration::seconds(60)));
		assert!(claims.is_expired_at(now + Duration::hours(1)));
	}
}
