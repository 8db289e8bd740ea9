//! Redacted wrappers for the shared signing secret and issued tokens.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

const FINGERPRINT_LEN: usize = 12;

/// Symmetric HMAC key shared out-of-band with the partner API server.
///
/// `Debug` and `Display` redact the material; use [`fingerprint`](Self::fingerprint) when a
/// log line needs to distinguish secrets.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(String);
impl SigningSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner key material. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when no key material is present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Short, log-safe fingerprint of the key.
	///
	/// Base64 (no padding) prefix of the SHA-256 digest; two clients configured with different
	/// secrets produce different fingerprints without revealing either key.
	pub fn fingerprint(&self) -> String {
		let digest = Sha256::digest(self.0.as_bytes());
		let mut encoded = STANDARD_NO_PAD.encode(digest);

		encoded.truncate(FINGERPRINT_LEN);

		encoded
	}
}
impl Debug for SigningSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SigningSecret").field(&self.fingerprint()).finish()
	}
}
impl Display for SigningSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Compact three-part signed token (`header.claims.signature`) produced by the issuer.
///
/// Redacted in logs; possession of the string grants access until expiry, so it must never be
/// written to diagnostic output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedToken(String);
impl SignedToken {
	/// Wraps an encoded compact token.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the compact encoding. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Formats the token as an `Authorization` header value.
	pub fn as_bearer(&self) -> String {
		format!("Bearer {}", self.0)
	}
}
impl AsRef<str> for SignedToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for SignedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SignedToken").field(&"<redacted>").finish()
	}
}
impl Display for SignedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
