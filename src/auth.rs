//! Auth-domain identifiers, signing material, claims, and the token issuer.

pub mod claims;
pub mod id;
pub mod issuer;
pub mod secret;

pub use claims::*;
pub use id::*;
pub use issuer::*;
pub use secret::*;
