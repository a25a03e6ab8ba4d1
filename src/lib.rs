//! RS256 token issuing and verification with PEM-file RSA keys.
//!
//! This crate signs a caller-supplied claim set into a compact JWT
//! (`header.payload.signature`, base64url segments, RSA-SHA256) using a
//! private key loaded from a PKCS#1 PEM file, and verifies such tokens
//! against the matching SPKI PEM public key, enforcing an optional
//! expiration policy.
//!
//! Parsed key material is cached per identifier for the lifetime of the
//! [`JwtIssuer`], so repeated issue/verify calls never re-read or
//! re-parse a key file.
//!
//! ```no_run
//! use chrono::{Duration, Utc};
//! use pem_jwt::{Claims, JwtIssuer};
//!
//! # fn example() -> pem_jwt::JwtResult<()> {
//! let issuer = JwtIssuer::new();
//!
//! let claims = Claims::new()
//!     .claim("hello", "world")
//!     .expire_at(Utc::now() + Duration::minutes(1));
//!
//! let token = issuer.issue(&claims, "keys/private/test.pem")?;
//! let payload = issuer.verify(&token, "keys/public/test.pem")?;
//! assert_eq!(payload["hello"], "world");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod claims;
mod codec;
mod error;
mod expiry;
mod issuer;
mod keystore;

pub use claims::Claims;
pub use codec::JwtHeader;
pub use error::{JwtError, JwtResult};
pub use expiry::{Clock, ExpirationPolicy, SystemClock};
pub use issuer::JwtIssuer;
pub use keystore::{FsKeyStorage, KeyStorage, KeyStore};
