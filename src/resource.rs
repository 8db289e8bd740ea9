//! Partner API resources and the endpoint identifiers used in diagnostics.

// self
use crate::{_prelude::*, error::ConfigError};

/// Resources exposed under `/partner/api/` on the partner server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
	/// Order collection; listing requires `orders:read`, creation `orders:write`.
	Order,
	/// Product collection; listing requires `products:read`, creation `products:write`.
	Product,
	/// User collection; listing requires `users:read`.
	User,
}
impl Resource {
	/// Path segment used on the wire.
	pub const fn segment(&self) -> &'static str {
		match self {
			Self::Order => "order",
			Self::Product => "product",
			Self::User => "user",
		}
	}

	/// Collection path relative to the server root, with the trailing slash the server expects.
	pub fn collection_path(&self) -> String {
		format!("/partner/api/{}/", self.segment())
	}

	/// Path of a single item within the collection.
	pub fn item_path(&self, id: &str) -> String {
		format!("/partner/api/{}/{id}", self.segment())
	}

	/// Absolute URL of the collection under `base`.
	pub fn collection_url(&self, base: &Url) -> Result<Url, ConfigError> {
		let mut url = base.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::BaseUrlCannotBeBase)?
			.pop_if_empty()
			.extend(["partner", "api", self.segment(), ""]);

		Ok(url)
	}

	/// Absolute URL of a single item under `base`.
	pub fn item_url(&self, base: &Url, id: &str) -> Result<Url, ConfigError> {
		let mut url = base.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::BaseUrlCannotBeBase)?
			.pop_if_empty()
			.extend(["partner", "api", self.segment(), id]);

		Ok(url)
	}
}
impl Display for Resource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.segment())
	}
}

/// Verb + path pair identifying one outbound call in errors, logs, and metrics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
	/// HTTP verb of the call.
	pub verb: &'static str,
	/// Server-relative request path.
	pub path: String,
}
impl Endpoint {
	/// Endpoint of a collection listing.
	pub fn list(resource: Resource) -> Self {
		Self { verb: "GET", path: resource.collection_path() }
	}

	/// Endpoint of a collection creation.
	pub fn create(resource: Resource) -> Self {
		Self { verb: "POST", path: resource.collection_path() }
	}

	/// Endpoint of a single-item update.
	pub fn update(resource: Resource, id: &str) -> Self {
		Self { verb: "PUT", path: resource.item_path(id) }
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{} {}", self.verb, self.path)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn collection_urls_keep_base_paths_and_trailing_slashes() {
		let bare = Url::parse("https://api.example.com").expect("Base URL should parse.");
		let nested = Url::parse("https://api.example.com/v2/").expect("Base URL should parse.");

		assert_eq!(
			Resource::Order.collection_url(&bare).expect("URL join should succeed.").as_str(),
			"https://api.example.com/partner/api/order/",
		);
		assert_eq!(
			Resource::Product.collection_url(&nested).expect("URL join should succeed.").as_str(),
			"https://api.example.com/v2/partner/api/product/",
		);
		assert_eq!(
			Resource::Order.item_url(&bare, "42").expect("URL join should succeed.").as_str(),
			"https://api.example.com/partner/api/order/42",
		);
	}

	#[test]
	fn endpoints_render_verb_and_path() {
		assert_eq!(Endpoint::list(Resource::User).to_string(), "GET /partner/api/user/");
		assert_eq!(Endpoint::create(Resource::Order).to_string(), "POST /partner/api/order/");
		assert_eq!(
			Endpoint::update(Resource::Order, "o-7").to_string(),
			"PUT /partner/api/order/o-7",
		);
	}
}
