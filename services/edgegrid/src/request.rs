// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use bytes::Bytes;
use edgegrid_core::Result;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, Uri};
use serde::Serialize;

/// Body of a [`RequestSpec`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// Raw bytes, sent as-is.
    Bytes(Bytes),
    /// A structured value, serialized to JSON text when the request is
    /// signed.
    Json(serde_json::Value),
}

impl Body {
    /// Render the body into the exact bytes that will be signed and sent.
    pub fn to_bytes(&self) -> Result<Bytes> {
        match self {
            Body::Empty => Ok(Bytes::new()),
            Body::Bytes(bs) => Ok(bs.clone()),
            Body::Json(v) => Ok(Bytes::from(serde_json::to_vec(v)?)),
        }
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Body::Bytes(Bytes::from_static(s.as_bytes()))
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Bytes(Bytes::from(s))
    }
}

impl From<Bytes> for Body {
    fn from(bs: Bytes) -> Self {
        Body::Bytes(bs)
    }
}

impl From<serde_json::Value> for Body {
    fn from(v: serde_json::Value) -> Self {
        Body::Json(v)
    }
}

/// Ordered list of headers covered by the signature.
///
/// Carried in the request extensions so the signer can find it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadersToSign(pub Vec<HeaderName>);

/// RequestSpec describes one logical API call before it is signed.
///
/// The value is immutable from the client's point of view: every builder
/// method returns a new spec, and a redirect produces a fresh spec through
/// [`RequestSpec::redirected_to`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    path: String,
    method: Option<Method>,
    headers: HeaderMap,
    body: Body,
    url: Option<String>,
    headers_to_sign: Vec<HeaderName>,
}

impl RequestSpec {
    /// Create a spec for `path`, relative to the credential host.
    ///
    /// `path` may carry a query string.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: None,
            headers: HeaderMap::new(),
            body: Body::Empty,
            url: None,
            headers_to_sign: Vec::new(),
        }
    }

    /// Set the method, `GET` if never set.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a header, replacing any previous value.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set a raw body.
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// Set a structured body, serialized to JSON when signed.
    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self> {
        self.body = Body::Json(serde_json::to_value(value)?);
        Ok(self)
    }

    /// Set an absolute url, bypassing `host + path`.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the ordered list of headers to include in the signature.
    pub fn with_headers_to_sign(mut self, names: impl IntoIterator<Item = HeaderName>) -> Self {
        self.headers_to_sign = names.into_iter().collect();
        self
    }

    /// Build the spec for the next hop of a redirect.
    ///
    /// The absolute url is dropped and `path` replaced; method, headers and
    /// body carry over.
    pub fn redirected_to(&self, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: None,
            ..self.clone()
        }
    }

    /// Path of this request.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Method of this request, `GET` if unset.
    pub fn method(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }

    /// Caller provided headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Body of this request.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Absolute url, if the caller set one.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Headers covered by the signature.
    pub fn headers_to_sign(&self) -> &[HeaderName] {
        &self.headers_to_sign
    }

    /// Merge the spec over the EdgeGrid defaults and render it into an
    /// unsigned request.
    ///
    /// `url` wins over `host + path`; `Content-Type: application/json` is
    /// added only when the caller did not set one.
    pub(crate) fn build(&self, host: &str) -> Result<http::Request<Bytes>> {
        let url = match &self.url {
            Some(url) => url.clone(),
            None => format!("{host}{}", self.path),
        };

        let mut headers = self.headers.clone();
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let mut req = http::Request::new(self.body.to_bytes()?);
        *req.method_mut() = self.method();
        *req.uri_mut() = url.parse::<Uri>()?;
        *req.headers_mut() = headers;
        req.extensions_mut()
            .insert(HeadersToSign(self.headers_to_sign.clone()));
        Ok(req)
    }
}

/// SignedRequest is a request with its authorization computed, ready to
/// be dispatched.
///
/// It keeps the [`RequestSpec`] it was built from, so a redirect can be
/// rebuilt and re-signed.
#[derive(Debug)]
pub struct SignedRequest {
    spec: RequestSpec,
    request: http::Request<Bytes>,
}

impl SignedRequest {
    pub(crate) fn new(spec: RequestSpec, request: http::Request<Bytes>) -> Self {
        Self { spec, request }
    }

    /// The spec this request was built from.
    pub fn spec(&self) -> &RequestSpec {
        &self.spec
    }

    /// Method of the signed request.
    pub fn method(&self) -> &Method {
        self.request.method()
    }

    /// Absolute url of the signed request.
    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    /// Headers, including `Authorization`.
    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    /// Serialized body.
    pub fn body(&self) -> &Bytes {
        self.request.body()
    }

    /// Convert into an `http::Request` ready for any transport.
    pub fn into_http(self) -> http::Request<Bytes> {
        self.request
    }

    /// Split into the originating spec and the `http::Request`.
    pub fn into_parts(self) -> (RequestSpec, http::Request<Bytes>) {
        (self.spec, self.request)
    }
}
