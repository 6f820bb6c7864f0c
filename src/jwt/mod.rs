//! JWT encoding of session claims.
//!
//! Tokens are HS256-signed and carry the session fields next to the standard
//! `iat` and `exp` claims. Signing goes through the [`TokenCodec`] trait so
//! the manager never depends on a concrete primitive.

mod claims;
mod codec;

pub use claims::SessionClaims;
pub use codec::{JwtCodec, TokenCodec};
