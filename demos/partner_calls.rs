//! Mirrors the partner onboarding walkthrough: list orders and products, then attempt the
//! scope-restricted user listing and order creation, treating 403 rejections as expected.
//!
//! Configuration comes from `PARTNER_ID`, `JWT_SECRET_PARTNER_A`, and `API_BASE_URL`; the
//! fallback values are for local development only and never production-safe.

// std
use std::env;
// crates.io
use color_eyre::Result;
use serde_json::Value;
use url::Url;
// self
use partner_api_client::{
	auth::{PartnerId, SigningSecret},
	client::{CreateOrder, ReqwestPartnerClient},
	config::ClientConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let partner_id = env::var("PARTNER_ID").unwrap_or_else(|_| "partner-company-a".into());
	let secret = env::var("JWT_SECRET_PARTNER_A")
		.unwrap_or_else(|_| "dev-secret-partner-a-change-in-production-32chars".into());
	let base_url = env::var("API_BASE_URL").unwrap_or_else(|_| "https://localhost".into());

	println!("Partner API Client");
	println!("==================");
	println!("Partner ID: {partner_id}");
	println!("Base URL: {base_url}");
	println!();

	let config = ClientConfig::builder(
		PartnerId::new(partner_id)?,
		SigningSecret::new(secret),
		Url::parse(&base_url)?,
	)
	.build()?;
	let client = ReqwestPartnerClient::new(config)?;

	println!("1. Listing orders...");

	let orders = client.orders().await?;

	println!("   Orders: {}", Value::Object(orders));
	println!();
	println!("2. Listing products...");

	let products = client.products().await?;

	println!("   Products: {}", Value::Object(products));
	println!();
	println!("3. Listing users (may be rejected on scope)...");

	match client.users().await {
		Ok(users) => println!("   Users: {}", Value::Object(users)),
		Err(e) if e.is_authorization() => println!("   Skipped: no access to the user API."),
		Err(e) => return Err(e.into()),
	}

	println!();
	println!("4. Creating an order (may be rejected on scope)...");

	let order = CreateOrder { product_id: "123".into(), quantity: 5 };

	match client.create_order(&order).await {
		Ok(created) => println!("   Created: {}", Value::Object(created)),
		Err(e) if e.is_authorization() => println!("   Skipped: no access to order creation."),
		Err(e) => return Err(e.into()),
	}

	Ok(())
}
