//! Partner API client: per-call token issuance, dispatch, and failure classification.
//!
//! Every operation is a stateless, independent request/response cycle: mint a token, attach it
//! as a bearer credential, send, then classify the outcome. Concurrent calls are fine since
//! each owns its own token and request; the only shared state is the immutable configuration
//! and (optionally) the token cache.

// self
use crate::{
	_prelude::*,
	auth::{SignedToken, TokenIssuer},
	config::ClientConfig,
	ext::TokenCache,
	http::{ApiRequest, ApiResponse, ApiTransport, TransportFailure},
	obs::{self, CallOutcome, CallSpan},
	resource::{Endpoint, Resource},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Domain-agnostic response body: a JSON object keyed by strings.
pub type ApiBody = serde_json::Map<String, serde_json::Value>;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestPartnerClient = PartnerClient<ReqwestTransport>;

/// Payload accepted by `POST /partner/api/order/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrder {
	/// Product being ordered.
	pub product_id: String,
	/// Number of units.
	pub quantity: u32,
}

/// Calls the partner API on behalf of a single partner identity.
///
/// The client owns its [`ClientConfig`] exclusively and holds the transport behind an `Arc`,
/// so clones share HTTP connection pools while remaining independent callers. By default every
/// call mints a fresh token; [`with_token_cache`](Self::with_token_cache) opts into reuse.
pub struct PartnerClient<T>
where
	T: ApiTransport,
{
	transport: Arc<T>,
	config: ClientConfig,
	issuer: TokenIssuer,
	cache: Option<TokenCache>,
}
impl<T> PartnerClient<T>
where
	T: ApiTransport,
{
	/// Creates a client that dispatches through the caller-provided transport.
	pub fn with_transport(config: ClientConfig, transport: impl Into<Arc<T>>) -> Result<Self> {
		let issuer = TokenIssuer::with_ttl(
			config.partner_id.clone(),
			config.secret.clone(),
			config.token_ttl,
		)?;

		Ok(Self { transport: transport.into(), config, issuer, cache: None })
	}

	/// Reuses minted tokens through the provided cache instead of signing per call.
	pub fn with_token_cache(mut self, cache: TokenCache) -> Self {
		self.cache = Some(cache);

		self
	}

	/// Partner identity configuration backing this client.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Lists a resource collection via `GET /partner/api/{resource}/`.
	pub async fn list(&self, resource: Resource) -> Result<ApiBody> {
		let url = resource.collection_url(&self.config.base_url)?;

		self.call::<serde_json::Value>(resource, Endpoint::list(resource), url, None).await
	}

	/// Creates a resource item via `POST /partner/api/{resource}/` with a JSON payload.
	pub async fn create<P>(&self, resource: Resource, payload: &P) -> Result<ApiBody>
	where
		P: ?Sized + Serialize + Sync,
	{
		let url = resource.collection_url(&self.config.base_url)?;

		self.call(resource, Endpoint::create(resource), url, Some(payload)).await
	}

	/// Updates a resource item via `PUT /partner/api/{resource}/{id}`.
	pub async fn update<P>(&self, resource: Resource, id: &str, payload: &P) -> Result<ApiBody>
	where
		P: ?Sized + Serialize + Sync,
	{
		let url = resource.item_url(&self.config.base_url, id)?;

		self.call(resource, Endpoint::update(resource, id), url, Some(payload)).await
	}

	/// Lists orders; requires the `orders:read` scope.
	pub async fn orders(&self) -> Result<ApiBody> {
		self.list(Resource::Order).await
	}

	/// Creates an order; requires the `orders:write` scope.
	pub async fn create_order(&self, order: &CreateOrder) -> Result<ApiBody> {
		self.create(Resource::Order, order).await
	}

	/// Updates an order; requires the `orders:write` scope.
	pub async fn update_order<P>(&self, id: &str, payload: &P) -> Result<ApiBody>
	where
		P: ?Sized + Serialize + Sync,
	{
		self.update(Resource::Order, id, payload).await
	}

	/// Lists products; requires the `products:read` scope.
	pub async fn products(&self) -> Result<ApiBody> {
		self.list(Resource::Product).await
	}

	/// Creates a product; requires the `products:write` scope.
	pub async fn create_product<P>(&self, payload: &P) -> Result<ApiBody>
	where
		P: ?Sized + Serialize + Sync,
	{
		self.create(Resource::Product, payload).await
	}

	/// Lists users; requires the `users:read` scope.
	pub async fn users(&self) -> Result<ApiBody> {
		self.list(Resource::User).await
	}

	async fn call<P>(
		&self,
		resource: Resource,
		endpoint: Endpoint,
		url: Url,
		payload: Option<&P>,
	) -> Result<ApiBody>
	where
		P: ?Sized + Serialize + Sync,
	{
		let span = CallSpan::new(&endpoint);

		obs::record_call_outcome(resource, CallOutcome::Attempt);

		let result = span.instrument(self.dispatch(&endpoint, url, payload)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(resource, CallOutcome::Success),
			Err(e) => {
				obs::record_call_outcome(resource, CallOutcome::Failure);
				obs::report_call_failure(&endpoint, e);
			},
		}

		result
	}

	async fn dispatch<P>(
		&self,
		endpoint: &Endpoint,
		url: Url,
		payload: Option<&P>,
	) -> Result<ApiBody>
	where
		P: ?Sized + Serialize + Sync,
	{
		let json_body = match payload {
			Some(payload) => Some(serde_json::to_value(payload).map_err(|e| {
				Error::ClientFault { endpoint: endpoint.clone(), source: Box::new(e) }
			})?),
			None => None,
		};
		let request = ApiRequest {
			method: endpoint.verb,
			url,
			bearer: self.bearer()?,
			json_body,
			timeout: self.config.request_timeout,
		};
		let response =
			self.transport.execute(request).await.map_err(|failure| match failure {
				TransportFailure::Build { source } =>
					Error::ClientFault { endpoint: endpoint.clone(), source },
				TransportFailure::Send { source } =>
					Error::Network { endpoint: endpoint.clone(), source },
			})?;

		classify(endpoint, response)
	}

	fn bearer(&self) -> Result<SignedToken> {
		match &self.cache {
			Some(cache) => cache.bearer(&self.issuer),
			None => self.issuer.issue(),
		}
		.map_err(Error::from)
	}
}
#[cfg(feature = "reqwest")]
impl PartnerClient<ReqwestTransport> {
	/// Creates a client with a default reqwest transport.
	pub fn new(config: ClientConfig) -> Result<Self> {
		Self::with_transport(config, ReqwestTransport::default())
	}
}
impl<T> Clone for PartnerClient<T>
where
	T: ApiTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			config: self.config.clone(),
			issuer: self.issuer.clone(),
			cache: self.cache.clone(),
		}
	}
}
impl<T> Debug for PartnerClient<T>
where
	T: ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PartnerClient")
			.field("partner_id", &self.config.partner_id)
			.field("base_url", &self.config.base_url.as_str())
			.field("secret", &self.config.secret)
			.field("cached", &self.cache.is_some())
			.finish()
	}
}

/// Maps a received response onto the error taxonomy: 2xx decodes, 401 is an authentication
/// failure, 403 an authorization failure, anything else a server error.
fn classify(endpoint: &Endpoint, response: ApiResponse) -> Result<ApiBody> {
	match response.status {
		status if response.is_success() => decode_body(endpoint, status, &response.body),
		401 => Err(Error::Authentication { endpoint: endpoint.clone(), body: response.body_text() }),
		403 => Err(Error::Authorization { endpoint: endpoint.clone(), body: response.body_text() }),
		status =>
			Err(Error::Server { endpoint: endpoint.clone(), status, body: response.body_text() }),
	}
}

/// Decodes a successful body into [`ApiBody`]; an empty body is an empty object, matching the
/// server's behavior for operations without content.
fn decode_body(endpoint: &Endpoint, status: u16, body: &[u8]) -> Result<ApiBody> {
	if body.iter().all(u8::is_ascii_whitespace) {
		return Ok(ApiBody::new());
	}

	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { endpoint: endpoint.clone(), status, source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn endpoint() -> Endpoint {
		Endpoint::list(Resource::Order)
	}

	#[test]
	fn classification_follows_the_status_taxonomy() {
		let ok = classify(&endpoint(), ApiResponse { status: 200, body: b"{\"a\":1}".to_vec() })
			.expect("2xx bodies should decode.");

		assert_eq!(ok.get("a").and_then(serde_json::Value::as_i64), Some(1));

		assert!(matches!(
			classify(&endpoint(), ApiResponse { status: 401, body: Vec::new() }),
			Err(Error::Authentication { .. }),
		));
		assert!(matches!(
			classify(&endpoint(), ApiResponse { status: 403, body: Vec::new() }),
			Err(Error::Authorization { .. }),
		));
		assert!(matches!(
			classify(&endpoint(), ApiResponse { status: 500, body: Vec::new() }),
			Err(Error::Server { status: 500, .. }),
		));
		assert!(matches!(
			classify(&endpoint(), ApiResponse { status: 404, body: Vec::new() }),
			Err(Error::Server { status: 404, .. }),
		));
	}

	#[test]
	fn empty_bodies_decode_to_empty_objects() {
		let body = decode_body(&endpoint(), 200, b"").expect("Empty body should decode.");

		assert!(body.is_empty());

		let blank = decode_body(&endpoint(), 204, b"  \n").expect("Blank body should decode.");

		assert!(blank.is_empty());
	}

	#[test]
	fn malformed_bodies_surface_decode_errors() {
		assert!(matches!(
			decode_body(&endpoint(), 200, b"[1, 2, 3]"),
			Err(Error::Decode { status: 200, .. }),
		));
		assert!(matches!(
			decode_body(&endpoint(), 200, b"{ not json"),
			Err(Error::Decode { .. }),
		));
	}
}
