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

use crate::constants::*;
use edgegrid_core::utils::Redact;
use edgegrid_core::{Error, Result, SigningCredential};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

/// Credential holds the four values an EdgeGrid request is signed with.
///
/// A `Credential` is always fully populated: every constructor rejects
/// empty fields, and `host` always starts with `https://`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    client_token: String,
    client_secret: String,
    access_token: String,
    host: String,
    max_body: Option<usize>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("client_token", &Redact::from(&self.client_token))
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("access_token", &Redact::from(&self.access_token))
            .field("host", &self.host)
            .field("max_body", &self.max_body)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.client_token.is_empty()
            && !self.client_secret.is_empty()
            && !self.access_token.is_empty()
            && self.host.len() > HTTPS_PREFIX.len()
    }
}

impl Credential {
    /// Build a credential from its four parts.
    ///
    /// Returns `InsufficientCredentials` naming every empty field.
    pub fn new(
        client_token: impl Into<String>,
        client_secret: impl Into<String>,
        access_token: impl Into<String>,
        host: impl Into<String>,
    ) -> Result<Self> {
        let (client_token, client_secret, access_token, host) = (
            client_token.into(),
            client_secret.into(),
            access_token.into(),
            host.into(),
        );

        let missing = missing_fields(&client_token, &client_secret, &access_token, &host);
        if !missing.is_empty() {
            return Err(Error::insufficient_credentials(format!(
                "no defined {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            client_token,
            client_secret,
            access_token,
            host: normalize_host(&host),
            max_body: None,
        })
    }

    /// Build a credential from the key/value mapping of an `.edgerc` section.
    ///
    /// Any missing value is reported as `InvalidSectionData`, since the
    /// section itself was found.
    pub fn from_section(section: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| section.get(key).map(String::as_str).unwrap_or_default();

        let cred = Self::new(
            get(KEY_CLIENT_TOKEN),
            get(KEY_CLIENT_SECRET),
            get(KEY_ACCESS_TOKEN),
            get(KEY_HOST),
        )
        .map_err(|e| {
            Error::invalid_section_data("section is missing required keys").with_source(e)
        })?;

        let max_body = section
            .get(KEY_MAX_BODY)
            .map(String::as_str)
            .map(parse_max_body)
            .transpose()?;
        Ok(cred.with_max_body(max_body))
    }

    /// Set the maximum number of body bytes covered by the content hash.
    pub fn with_max_body(mut self, max_body: Option<usize>) -> Self {
        self.max_body = max_body;
        self
    }

    /// Client token of this credential.
    pub fn client_token(&self) -> &str {
        &self.client_token
    }

    /// Client secret of this credential.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Access token of this credential.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Host with its `https://` prefix.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Maximum body size to hash, if configured.
    pub fn max_body(&self) -> Option<usize> {
        self.max_body
    }
}

/// Prefix `host` with `https://` unless it already starts with it.
pub fn normalize_host(host: &str) -> String {
    if host.starts_with(HTTPS_PREFIX) {
        host.to_string()
    } else {
        format!("{HTTPS_PREFIX}{host}")
    }
}

pub(crate) fn parse_max_body(v: &str) -> Result<usize> {
    v.trim().parse::<usize>().map_err(|e| {
        Error::invalid_section_data(format!("max_body {v:?} is not a byte count")).with_source(e)
    })
}

pub(crate) fn missing_fields(
    client_token: &str,
    client_secret: &str,
    access_token: &str,
    host: &str,
) -> Vec<&'static str> {
    [
        (KEY_CLIENT_TOKEN, client_token),
        (KEY_CLIENT_SECRET, client_secret),
        (KEY_ACCESS_TOKEN, access_token),
        (KEY_HOST, host),
    ]
    .into_iter()
    .filter(|(_, v)| v.is_empty())
    .map(|(k, _)| k)
    .collect()
}
