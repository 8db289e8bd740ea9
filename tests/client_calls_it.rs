#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::Duration;
use url::Url;
// self
use partner_api_client::{
	auth::{PartnerId, SigningSecret},
	client::{CreateOrder, ReqwestPartnerClient},
	config::ClientConfig,
	error::Error,
	resource::Resource,
};

const PARTNER: &str = "partner-company-a";
const SECRET: &str = "dev-secret-partner-a-change-in-production-32chars";

fn build_config(base_url: &str) -> ClientConfig {
	ClientConfig::builder(
		PartnerId::new(PARTNER).expect("Partner identifier fixture should be valid."),
		SigningSecret::new(SECRET),
		Url::parse(base_url).expect("Mock server base URL should parse."),
	)
	.build()
	.expect("Client config fixture should be valid.")
}

fn build_client(server: &MockServer) -> ReqwestPartnerClient {
	ReqwestPartnerClient::new(build_config(&server.base_url()))
		.expect("Test client construction should succeed.")
}

#[tokio::test]
async fn list_orders_sends_a_bearer_token_and_decodes_the_body() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/partner/api/order/")
				.header_matches("authorization", r"^Bearer [\w-]+\.[\w-]+\.[\w-]+$");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"orders\":[{\"id\":\"o-1\"}],\"total\":1}");
		})
		.await;
	let client = build_client(&server);
	let orders = client.orders().await.expect("Order listing should succeed.");

	assert_eq!(orders.get("total").and_then(serde_json::Value::as_i64), Some(1));

	mock.assert_async().await;
}

#[tokio::test]
async fn each_call_mints_a_fresh_token() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/partner/api/product/").header_exists("authorization");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let client = build_client(&server);

	client.products().await.expect("First product listing should succeed.");
	client.products().await.expect("Second product listing should succeed.");

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn create_order_posts_a_json_payload() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/partner/api/order/")
				.header("content-type", "application/json")
				.header_exists("authorization")
				.json_body(json!({ "product_id": "123", "quantity": 5 }));
			then.status(201)
				.header("content-type", "application/json")
				.body("{\"id\":\"o-9\",\"status\":\"created\"}");
		})
		.await;
	let client = build_client(&server);
	let order = CreateOrder { product_id: "123".into(), quantity: 5 };
	let created = client.create_order(&order).await.expect("Order creation should succeed.");

	assert_eq!(
		created.get("status").and_then(serde_json::Value::as_str),
		Some("created"),
		"2xx statuses beyond 200 must count as success.",
	);

	mock.assert_async().await;
}

#[tokio::test]
async fn status_401_surfaces_authentication_failure_without_retry() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/partner/api/order/");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid token\"}");
		})
		.await;
	let client = build_client(&server);
	let err = client.orders().await.expect_err("A 401 response must fail the call.");

	assert!(matches!(err, Error::Authentication { .. }));
	assert_eq!(err.status(), Some(401));
	assert_eq!(
		err.endpoint().map(ToString::to_string).as_deref(),
		Some("GET /partner/api/order/"),
	);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn status_403_surfaces_authorization_failure() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/partner/api/user/");
			then.status(403)
				.header("content-type", "application/json")
				.body("{\"error\":\"insufficient scope\"}");
		})
		.await;
	let client = build_client(&server);
	let err = client.users().await.expect_err("A 403 response must fail the call.");

	assert!(err.is_authorization());
	assert!(matches!(err, Error::Authorization { ref body, .. } if body.contains("scope")));
}

#[tokio::test]
async fn other_statuses_surface_server_errors_with_their_body() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/partner/api/product/");
			then.status(503).body("upstream unavailable");
		})
		.await;
	let client = build_client(&server);
	let err = client.products().await.expect_err("A 503 response must fail the call.");

	assert!(matches!(
		err,
		Error::Server { status: 503, ref body, .. } if body == "upstream unavailable",
	));
}

#[tokio::test]
async fn timeouts_surface_network_failures_distinct_from_server_errors() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/partner/api/order/");
			then.status(200).delay(std::time::Duration::from_secs(5)).body("{}");
		})
		.await;
	let config = ClientConfig::builder(
		PartnerId::new(PARTNER).expect("Partner identifier fixture should be valid."),
		SigningSecret::new(SECRET),
		Url::parse(&server.base_url()).expect("Mock server base URL should parse."),
	)
	.request_timeout(Duration::milliseconds(200))
	.build()
	.expect("Client config fixture should be valid.");
	let client = ReqwestPartnerClient::new(config).expect("Client construction should succeed.");
	let err = client.orders().await.expect_err("A stalled response must fail the call.");

	assert!(matches!(err, Error::Network { .. }), "Timeouts are network failures: {err:?}");
	assert_eq!(err.status(), None);
}

#[tokio::test]
async fn unreachable_servers_surface_network_failures() {
	// Discard-protocol port; nothing listens there in the test environment.
	let client = ReqwestPartnerClient::new(build_config("http://127.0.0.1:9"))
		.expect("Client construction should succeed.");
	let err = client.list(Resource::Order).await.expect_err("The call must fail to connect.");

	assert!(matches!(err, Error::Network { .. }));
}

#[tokio::test]
async fn malformed_success_bodies_surface_decode_errors() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/partner/api/user/");
			then.status(200).header("content-type", "application/json").body("[1,2,3]");
		})
		.await;
	let client = build_client(&server);
	let err = client.users().await.expect_err("A non-object body must fail decoding.");

	assert!(matches!(err, Error::Decode { status: 200, .. }));
}

#[tokio::test]
async fn empty_success_bodies_decode_to_empty_objects() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(PUT).path("/partner/api/order/o-1");
			then.status(200);
		})
		.await;
	let client = build_client(&server);
	let body = client
		.update_order("o-1", &json!({ "quantity": 2 }))
		.await
		.expect("Updates with empty response bodies should succeed.");

	assert!(body.is_empty());
}
