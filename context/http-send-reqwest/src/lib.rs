//! Reqwest-based transport for edgegrid.
//!
//! `ReqwestHttpSend` implements the `HttpSend` trait from `edgegrid_core`.
//! The default client never follows redirects: the EdgeGrid client needs
//! to see every 3xx so it can sign the next hop itself.
//!
//! ```no_run
//! use edgegrid_core::Context;
//! use edgegrid_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use edgegrid_core::{Error, HttpSend, Result};
use http_body_util::BodyExt;
use log::debug;
use reqwest::redirect::Policy;
use reqwest::{Client, Request};

/// HttpSend implementation on top of a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl Default for ReqwestHttpSend {
    /// # Panics
    ///
    /// Panics if the TLS backend can't be initialized, use
    /// [`ReqwestHttpSend::try_default`] to handle that case.
    fn default() -> Self {
        Self::try_default().expect("reqwest client with default TLS settings must build")
    }
}

impl ReqwestHttpSend {
    /// Create a ReqwestHttpSend on a fresh client that never follows
    /// redirects.
    pub fn try_default() -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(|e| Error::unexpected("failed to build reqwest client").with_source(e))?;

        Ok(Self { client })
    }

    /// Create a new ReqwestHttpSend with a reqwest::Client.
    ///
    /// The given client should be built with `redirect(Policy::none())`,
    /// otherwise redirects are followed without being re-signed.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        debug!("sending {} {}", req.method(), req.url());

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport("failed to execute request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::transport("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
