//! HS256 token issuance and verification.
//!
//! Issuance is fully client-side: the issuer stamps a [`Claims`] window against its own clock
//! and signs the compact encoding with the shared secret. [`decode`] is the verifier-side
//! counterpart used by tests and diagnostics; the partner API server performs the same checks
//! with its copy of the secret.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{
	Algorithm, DecodingKey, EncodingKey, Header, Validation,
	errors::{Error as JwtError, ErrorKind as JwtErrorKind},
};
// self
use crate::{
	_prelude::*,
	auth::{AUDIENCE, Claims, ISSUER, PartnerId, SignedToken, SigningSecret},
	error::{ConfigError, TokenError},
};

/// Default validity window for issued tokens.
pub const DEFAULT_TTL: Duration = Duration::seconds(3_600);

/// Mints short-lived signed assertions of partner identity.
///
/// The issuer owns an immutable `(subject, secret, ttl)` triple; every call to
/// [`issue`](Self::issue) produces a fresh token stamped at the current clock. Given identical
/// inputs and timestamp the output is deterministic.
#[derive(Clone)]
pub struct TokenIssuer {
	subject: PartnerId,
	secret: SigningSecret,
	ttl: Duration,
}
impl TokenIssuer {
	/// Creates an issuer with the default one-hour TTL.
	pub fn new(subject: PartnerId, secret: SigningSecret) -> Result<Self, ConfigError> {
		Self::with_ttl(subject, secret, DEFAULT_TTL)
	}

	/// Creates an issuer with an explicit validity window.
	pub fn with_ttl(
		subject: PartnerId,
		secret: SigningSecret,
		ttl: Duration,
	) -> Result<Self, ConfigError> {
		if secret.is_empty() {
			return Err(ConfigError::EmptySecret);
		}
		if !ttl.is_positive() {
			return Err(ConfigError::NonPositiveTtl);
		}

		Ok(Self { subject, secret, ttl })
	}

	/// Subject stamped into every issued token.
	pub fn subject(&self) -> &PartnerId {
		&self.subject
	}

	/// Configured validity window.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Issues a token valid from now until now plus the configured TTL.
	pub fn issue(&self) -> Result<SignedToken, TokenError> {
		self.issue_at(OffsetDateTime::now_utc())
	}

	/// Issues a token whose validity window starts at `now`.
	///
	/// Pinning the clock keeps issuance deterministic, which tests rely on.
	pub fn issue_at(&self, now: OffsetDateTime) -> Result<SignedToken, TokenError> {
		let claims = Claims::issue_at(&self.subject, self.ttl, now);
		let key = EncodingKey::from_secret(self.secret.expose().as_bytes());
		let compact = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
			.map_err(|e| TokenError::Sign { source: e })?;

		Ok(SignedToken::new(compact))
	}
}
impl Debug for TokenIssuer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenIssuer")
			.field("subject", &self.subject)
			.field("secret", &self.secret)
			.field("ttl", &self.ttl)
			.finish()
	}
}

/// Verifies a compact token against the shared secret and returns its claims.
///
/// Rejects expired tokens with zero leeway and enforces the fixed issuer/audience tags. A
/// token signed with a different secret fails with [`TokenError::SignatureMismatch`] before
/// any claim is inspected.
pub fn decode(token: &SignedToken, secret: &SigningSecret) -> Result<Claims, TokenError> {
	let mut validation = Validation::new(Algorithm::HS256);

	validation.leeway = 0;
	validation.set_audience(&[AUDIENCE]);
	validation.set_issuer(&[ISSUER]);
	validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

	let key = DecodingKey::from_secret(secret.expose().as_bytes());
	let data = jsonwebtoken::decode::<Claims>(token.expose(), &key, &validation)?;

	Ok(data.claims)
}

/// Reads the claim segment without verifying the signature.
///
/// Diagnostics only. The returned claims are attacker-controllable until [`decode`] has
/// confirmed the signature.
pub fn peek(token: &SignedToken) -> Result<Claims, TokenError> {
	let mut segments = token.expose().split('.');
	let claims_segment = match (segments.next(), segments.next(), segments.next()) {
		(Some(_), Some(claims), Some(_)) if segments.next().is_none() => claims,
		_ =>
			return Err(TokenError::Malformed { source: JwtError::from(JwtErrorKind::InvalidToken) }),
	};
	let raw = URL_SAFE_NO_PAD
		.decode(claims_segment)
		.map_err(|_| TokenError::Malformed { source: JwtError::from(JwtErrorKind::InvalidToken) })?;

	serde_json::from_slice(&raw)
		.map_err(|e| TokenError::Malformed { source: JwtError::from(JwtErrorKind::Json(e.into())) })
}
