//! Transport primitives for partner API calls.
//!
//! The module exposes [`ApiTransport`] alongside [`ApiRequest`] and [`ApiResponse`] so
//! downstream crates can integrate custom HTTP clients without losing the client's failure
//! classification. A transport reports every failure as a [`TransportFailure`], which keeps the
//! *could-not-send* versus *sent-but-no-response* distinction explicit instead of inferring it
//! from an ambiguous error shape.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, auth::SignedToken};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One fully described outbound call: verb, absolute URL, bearer credential, optional JSON
/// body, and the per-call deadline.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP verb of the call.
	pub method: &'static str,
	/// Absolute request URL.
	pub url: Url,
	/// Bearer credential attached as the `Authorization` header.
	pub bearer: SignedToken,
	/// JSON body for mutating calls; sets `Content-Type: application/json` when present.
	pub json_body: Option<serde_json::Value>,
	/// Explicit per-call deadline, if the configuration defines one.
	pub timeout: Option<Duration>,
}

/// Raw response surfaced by a transport: status plus body bytes.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Lossy text view of the body, used when reporting failures.
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Failure modes a transport can report.
#[derive(Debug, ThisError)]
pub enum TransportFailure {
	/// The request could not be constructed or handed to the transport at all.
	#[error("Request could not be constructed.")]
	Build {
		/// Underlying construction failure.
		#[source]
		source: BoxError,
	},
	/// The request left the client but no response arrived (timeout, reset, DNS).
	#[error("Request was sent but no response arrived.")]
	Send {
		/// Underlying network failure.
		#[source]
		source: BoxError,
	},
}
impl TransportFailure {
	/// Wraps a construction failure.
	pub fn build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Build { source: Box::new(src) }
	}

	/// Wraps a network failure.
	pub fn send(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Send { source: Box::new(src) }
	}
}

/// Boxed future returned by [`ApiTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportFailure>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing partner API calls.
///
/// The trait is the client's only dependency on an HTTP implementation. Implementations must be
/// `Send + Sync + 'static` so one transport can serve concurrent independent calls; the client
/// never shares mutable state between requests.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes the request and resolves with the raw response or a classified failure.
	///
	/// Implementations must read the full body before resolving; a failure while streaming the
	/// body counts as [`TransportFailure::Send`] since the request did go out.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The partner API serves self-signed certificates in local development; configure any custom
/// [`ReqwestClient`] accordingly before wrapping it, because the client passes this transport
/// every outbound call.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let method = reqwest::Method::from_bytes(request.method.as_bytes())
				.map_err(TransportFailure::build)?;
			let mut builder = self
				.0
				.request(method, request.url)
				.header(reqwest::header::AUTHORIZATION, request.bearer.as_bearer());

			if let Some(body) = &request.json_body {
				builder = builder.json(body);
			}
			if let Some(timeout) = request.timeout {
				builder =
					builder.timeout(std::time::Duration::try_from(timeout).map_err(|_| {
						TransportFailure::Build { source: "negative timeout".into() }
					})?);
			}

			let response = builder.send().await.map_err(classify_reqwest_error)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportFailure::send)?.to_vec();

			Ok(ApiResponse { status, body })
		})
	}
}

/// Splits reqwest failures into construction versus in-flight classes.
#[cfg(feature = "reqwest")]
fn classify_reqwest_error(e: ReqwestError) -> TransportFailure {
	if e.is_builder() {
		TransportFailure::build(e)
	} else {
		TransportFailure::send(e)
	}
}
