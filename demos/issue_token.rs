//! Offline walkthrough of token issuance: mint a short-lived HS256 token, inspect its claims
//! without verification, then verify it against the shared secret.

// crates.io
use color_eyre::Result;
use time::Duration;
// self
use partner_api_client::auth::{self, PartnerId, SigningSecret, TokenIssuer};

fn main() -> Result<()> {
	color_eyre::install()?;

	let secret = SigningSecret::new("dev-secret-partner-a-change-in-production-32chars");
	let issuer = TokenIssuer::with_ttl(
		PartnerId::new("partner-company-a")?,
		secret.clone(),
		Duration::minutes(15),
	)?;
	let token = issuer.issue()?;

	println!("Secret fingerprint: {}", secret.fingerprint());

	let peeked = auth::peek(&token)?;

	println!("Unverified claims: sub={} iat={} exp={}", peeked.sub, peeked.iat, peeked.exp);

	let claims = auth::decode(&token, &secret)?;

	println!(
		"Verified: subject {} is valid for {} seconds.",
		claims.sub,
		(claims.expires_at() - claims.issued_at()).whole_seconds(),
	);

	Ok(())
}
