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

use crate::config::is_test_mode;
use crate::constants::*;
use crate::credential::{missing_fields, parse_max_body};
use crate::Credential;
use async_trait::async_trait;
use edgegrid_core::{Context, Error, ProvideCredential, Result};
use log::{debug, error};

/// EnvCredentialProvider loads EdgeGrid credentials from `AKAMAI_*`
/// environment variables.
///
/// For the `default` section it reads `AKAMAI_<FIELD>`, and lets
/// `AKAMAI_DEFAULT_<FIELD>` override it. For any other section it reads
/// `AKAMAI_<SECTION>_<FIELD>` only. Fields are `HOST`, `ACCESS_TOKEN`,
/// `CLIENT_TOKEN`, `CLIENT_SECRET` and `MAX_BODY`.
///
/// Nothing is returned unless `HOST` resolves to a non-empty value.
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    section: String,
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION)
    }
}

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider for `section`.
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
        }
    }

    fn lookup(&self, ctx: &Context, field: &str) -> Option<String> {
        let get = |key: String| ctx.env_var(&key).filter(|v| !v.is_empty());

        if self.section == DEFAULT_SECTION {
            get(format!("{AKAMAI_ENV_PREFIX}_DEFAULT_{field}"))
                .or_else(|| get(format!("{AKAMAI_ENV_PREFIX}_{field}")))
        } else {
            let section = self.section.to_uppercase().replace('-', "_");
            get(format!("{AKAMAI_ENV_PREFIX}_{section}_{field}"))
        }
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(host) = self.lookup(ctx, FIELD_HOST) else {
            debug!(
                "no host in environment for section [{}], skipping",
                self.section
            );
            return Ok(None);
        };

        let client_token = self.lookup(ctx, FIELD_CLIENT_TOKEN).unwrap_or_default();
        let client_secret = self.lookup(ctx, FIELD_CLIENT_SECRET).unwrap_or_default();
        let access_token = self.lookup(ctx, FIELD_ACCESS_TOKEN).unwrap_or_default();

        let missing = missing_fields(&client_token, &client_secret, &access_token, &host);
        if !missing.is_empty() {
            if !is_test_mode(ctx) {
                for field in &missing {
                    error!("No defined {field} in environment for section [{}]", self.section);
                }
            }
            return Err(Error::insufficient_credentials(format!(
                "environment sets a host for section [{}] but no {}",
                self.section,
                missing.join(", ")
            )));
        }

        let max_body = self
            .lookup(ctx, FIELD_MAX_BODY)
            .as_deref()
            .map(parse_max_body)
            .transpose()?;

        debug!("loading credential from environment for section [{}]", self.section);
        Ok(Some(
            Credential::new(client_token, client_secret, access_token, host)?
                .with_max_body(max_body),
        ))
    }
}
