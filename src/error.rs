//! Client-level error types shared across token issuance, transport, and API calls.

// self
use crate::{_prelude::*, resource::Endpoint};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// API-call variants carry the [`Endpoint`] they were raised for so callers (and the
/// observability layer) can always tell which partner resource failed.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem (bad identity, secret, TTL, or base URL).
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token issuance or verification failure.
	#[error(transparent)]
	Token(#[from] TokenError),

	/// The server rejected the bearer token (HTTP 401): invalid/expired token or secret
	/// mismatch.
	#[error("Authentication failed for {endpoint}: check the shared secret and partner id.")]
	Authentication {
		/// Endpoint the rejected request targeted.
		endpoint: Endpoint,
		/// Raw response body, useful for server-supplied hints.
		body: String,
	},
	/// The token was valid but lacks the scope required by the resource (HTTP 403).
	#[error("Authorization failed for {endpoint}: the partner lacks access to this resource.")]
	Authorization {
		/// Endpoint the rejected request targeted.
		endpoint: Endpoint,
		/// Raw response body, useful for server-supplied hints.
		body: String,
	},
	/// Any other non-2xx response.
	#[error("Server returned status {status} for {endpoint}.")]
	Server {
		/// Endpoint the failing request targeted.
		endpoint: Endpoint,
		/// HTTP status code outside the 2xx range.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// The request was sent but no response arrived (timeout, connection reset, DNS failure).
	#[error("Network error occurred while calling {endpoint}.")]
	Network {
		/// Endpoint the in-flight request targeted.
		endpoint: Endpoint,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request could not even be constructed or handed to the transport.
	#[error("Request for {endpoint} could not be constructed.")]
	ClientFault {
		/// Endpoint the unsendable request targeted.
		endpoint: Endpoint,
		/// Originating construction/serialization error.
		#[source]
		source: BoxError,
	},
	/// A 2xx response carried a body that is not the expected JSON object.
	#[error("Response body from {endpoint} (status {status}) is malformed JSON.")]
	Decode {
		/// Endpoint the malformed response came from.
		endpoint: Endpoint,
		/// HTTP status code of the malformed response.
		status: u16,
		/// Structured parsing failure pointing at the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl Error {
	/// Returns the endpoint an API-call error was raised for, if any.
	pub fn endpoint(&self) -> Option<&Endpoint> {
		match self {
			Self::Authentication { endpoint, .. }
			| Self::Authorization { endpoint, .. }
			| Self::Server { endpoint, .. }
			| Self::Network { endpoint, .. }
			| Self::ClientFault { endpoint, .. }
			| Self::Decode { endpoint, .. } => Some(endpoint),
			Self::Config(_) | Self::Token(_) => None,
		}
	}

	/// Returns the HTTP status that triggered the error, when a response was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Authentication { .. } => Some(401),
			Self::Authorization { .. } => Some(403),
			Self::Server { status, .. } | Self::Decode { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Returns `true` for the scope-bound rejection the demonstration flow treats as
	/// recoverable.
	pub fn is_authorization(&self) -> bool {
		matches!(self, Self::Authorization { .. })
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Partner identifier failed validation.
	#[error("Partner identifier is invalid.")]
	InvalidPartnerId(#[from] crate::auth::IdentifierError),
	/// The shared signing secret is empty.
	#[error("Shared secret must not be empty.")]
	EmptySecret,
	/// Token TTL must be a positive duration.
	#[error("Token TTL must be positive.")]
	NonPositiveTtl,
	/// Request timeout must be a positive duration.
	#[error("Request timeout must be positive.")]
	NonPositiveTimeout,
	/// The base URL cannot serve as a base for resource paths.
	#[error("Base URL cannot be a base for partner endpoint paths.")]
	BaseUrlCannotBeBase,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Token issuance and verification failures.
#[derive(Debug, ThisError)]
pub enum TokenError {
	/// The token's `exp` instant lies in the past.
	#[error("Token has expired.")]
	Expired,
	/// The signature does not match the verification secret.
	#[error("Token signature does not match the shared secret.")]
	SignatureMismatch,
	/// The token is structurally invalid or carries unexpected claims.
	#[error("Token is malformed.")]
	Malformed {
		/// Underlying decoding failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// The claims could not be signed.
	#[error("Token claims could not be signed.")]
	Sign {
		/// Underlying signing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
}
impl From<jsonwebtoken::errors::Error> for TokenError {
	fn from(e: jsonwebtoken::errors::Error) -> Self {
		use jsonwebtoken::errors::ErrorKind;

		match e.kind() {
			ErrorKind::ExpiredSignature => Self::Expired,
			ErrorKind::InvalidSignature => Self::SignatureMismatch,
			_ => Self::Malformed { source: e },
		}
	}
}
