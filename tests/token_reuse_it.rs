#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use url::Url;
// self
use partner_api_client::{
	auth::{PartnerId, SigningSecret},
	client::ReqwestPartnerClient,
	config::ClientConfig,
	ext::TokenCache,
};

#[tokio::test]
async fn cached_clients_reuse_one_token_across_calls() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/partner/api/order/").header_exists("authorization");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let config = ClientConfig::builder(
		PartnerId::new("partner-company-a")
			.expect("Partner identifier fixture should be valid."),
		SigningSecret::new("dev-secret-partner-a-change-in-production-32chars"),
		Url::parse(&server.base_url()).expect("Mock server base URL should parse."),
	)
	.build()
	.expect("Client config fixture should be valid.");
	let cache = TokenCache::new();
	let client = ReqwestPartnerClient::new(config)
		.expect("Client construction should succeed.")
		.with_token_cache(cache.clone());

	for _ in 0..3 {
		client.orders().await.expect("Cached-order listing should succeed.");
	}

	assert_eq!(cache.minted_total(), 1, "All calls inside the window reuse one token.");

	mock.assert_calls_async(3).await;
}
