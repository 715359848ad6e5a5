//! Akamai EdgeGrid request signer
//!
//! Resolves EdgeGrid credentials from explicit strings, an `.edgerc`
//! section or `AKAMAI_*` environment variables, signs requests with
//! `EG1-HMAC-SHA256`, and re-signs every hop of a redirect chain.

mod constants;
pub use constants::{DEFAULT_EDGERC_PATH, DEFAULT_MAX_BODY, DEFAULT_MAX_REDIRECTS, DEFAULT_SECTION};

mod config;
pub use config::{Config, CredentialSource};

mod credential;
pub use credential::{normalize_host, Credential};

pub mod edgerc;
pub use edgerc::SectionWindow;

mod request;
pub use request::{Body, HeadersToSign, RequestSpec, SignedRequest};

mod sign_request;
pub use sign_request::RequestSigner;

mod provide_credential;
pub use provide_credential::*;

mod client;
pub use client::{EdgeGrid, PendingRequest};
