use crate::constants::*;
use crate::{Credential, HeadersToSign};
use async_trait::async_trait;
use edgegrid_core::hash::{base64_hmac_sha256, base64_sha256};
use edgegrid_core::time::{format_edgegrid_timestamp, now};
use edgegrid_core::utils::Redact;
use edgegrid_core::{Context, Error, Result, SignRequest};
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::{HeaderValue, Method};
use log::debug;

/// RequestSigner implements the EdgeGrid `EG1-HMAC-SHA256` scheme.
///
/// - [Authenticate with EdgeGrid](https://techdocs.akamai.com/developer/docs/authenticate-with-edgegrid)
#[derive(Debug, Default)]
pub struct RequestSigner {}

impl RequestSigner {
    /// Create a new EdgeGrid request signer.
    pub fn new() -> Self {
        Self {}
    }

    /// Sign with a fixed timestamp and nonce.
    ///
    /// `sign_request` calls this with the current time and a random v4
    /// UUID; it is public so that signatures can be reproduced.
    pub fn sign_at(
        &self,
        req: &mut Parts,
        body: &[u8],
        cred: &Credential,
        timestamp: &str,
        nonce: &str,
    ) -> Result<()> {
        let auth_header = format!(
            "{EDGEGRID_ALGORITHM} client_token={};access_token={};timestamp={timestamp};nonce={nonce};",
            cred.client_token(),
            cred.access_token(),
        );

        let data = [
            req.method.as_str().to_uppercase(),
            req.uri.scheme_str().unwrap_or("https").to_string(),
            req.uri
                .authority()
                .ok_or_else(|| Error::request_invalid("request without host can't be signed"))?
                .as_str()
                .to_string(),
            req.uri
                .path_and_query()
                .map(|paq| paq.as_str().to_string())
                .unwrap_or_else(|| "/".to_string()),
            canonicalize_headers(req)?,
            content_hash(
                &req.method,
                body,
                cred.max_body().unwrap_or(DEFAULT_MAX_BODY),
            ),
        ]
        .join("\t");
        debug!(
            "data to sign: {data:?}, auth header for client_token {:?}",
            Redact::from(cred.client_token())
        );
        let string_to_sign = format!("{data}\t{auth_header}");

        let signing_key = base64_hmac_sha256(cred.client_secret().as_bytes(), timestamp.as_bytes());
        let signature = base64_hmac_sha256(signing_key.as_bytes(), string_to_sign.as_bytes());

        req.headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("{auth_header}signature={signature}"))?,
        );
        Ok(())
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut Parts,
        body: &[u8],
        cred: &Self::Credential,
    ) -> Result<()> {
        let timestamp = format_edgegrid_timestamp(now());
        let nonce = uuid::Uuid::new_v4().to_string();
        self.sign_at(req, body, cred, &timestamp, &nonce)
    }
}

/// `name:value` for every header listed in [`HeadersToSign`] that is
/// present, joined by tabs. Values are trimmed and inner whitespace runs
/// collapse to one space.
fn canonicalize_headers(req: &Parts) -> Result<String> {
    let Some(HeadersToSign(names)) = req.extensions.get::<HeadersToSign>() else {
        return Ok(String::new());
    };

    let mut pairs = Vec::with_capacity(names.len());
    for name in names {
        let Some(value) = req.headers.get(name) else {
            continue;
        };
        let value = value.to_str()?.split_whitespace().collect::<Vec<_>>().join(" ");
        pairs.push(format!("{}:{value}", name.as_str()));
    }
    Ok(pairs.join("\t"))
}

/// Only POST bodies are hashed, truncated to `max_body` bytes.
fn content_hash(method: &Method, body: &[u8], max_body: usize) -> String {
    if *method != Method::POST || body.is_empty() {
        return String::new();
    }

    base64_sha256(&body[..body.len().min(max_body)])
}
