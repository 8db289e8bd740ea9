//! Partner REST API client: mint short-lived HS256 bearer tokens, call the partner endpoints, and
//! surface strongly typed failure classification.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod ext;
pub mod http;
pub mod obs;
pub mod resource;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{PartnerId, SigningSecret},
		client::{PartnerClient, ReqwestPartnerClient},
		config::ClientConfig,
		http::ReqwestTransport,
	};

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_client() -> ReqwestClient {
		ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.")
	}

	/// Constructs a [`PartnerClient`] pointed at a mock server base URL with the provided
	/// partner identifier and shared secret.
	pub fn build_test_client(
		base_url: &str,
		partner_id: &str,
		secret: &str,
	) -> ReqwestPartnerClient {
		let partner_id =
			PartnerId::new(partner_id).expect("Partner identifier fixture should be valid.");
		let base_url = Url::parse(base_url).expect("Mock server base URL should parse.");
		let config = ClientConfig::builder(partner_id, SigningSecret::new(secret), base_url)
			.build()
			.expect("Client config fixture should be valid.");
		let transport = ReqwestTransport::with_client(test_reqwest_client());

		PartnerClient::with_transport(config, transport)
			.expect("Test client construction should succeed.")
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _, tokio as _};
