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
use crate::SectionWindow;
use edgegrid_core::utils::Redact;
use edgegrid_core::Context;
use log::warn;
use std::fmt::{Debug, Formatter};

/// Config is the object form of client construction.
///
/// With a `path`, credentials come from that `.edgerc` section and may be
/// overridden by the environment. Without one, only the environment is
/// consulted.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path of the `.edgerc` file, `~` is expanded.
    pub path: Option<String>,
    /// Section to read, `default` if unset.
    pub section: Option<String>,
    /// Log requests and responses at `info` instead of `debug`.
    pub debug: bool,
    /// How section lines are collected from the file.
    pub section_window: SectionWindow,
    /// Maximum number of redirects to follow, `None` for no limit.
    pub max_redirects: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: None,
            section: None,
            debug: false,
            section_window: SectionWindow::default(),
            max_redirects: Some(DEFAULT_MAX_REDIRECTS),
        }
    }
}

impl Config {
    /// Create a config without path, reading the `default` section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `.edgerc` path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the section name.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Enable request/response logging at `info` level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the section window.
    pub fn with_section_window(mut self, window: SectionWindow) -> Self {
        self.section_window = window;
        self
    }

    /// Set the maximum number of redirects.
    pub fn with_max_redirects(mut self, max_redirects: Option<usize>) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// The section name in effect.
    pub fn section(&self) -> &str {
        self.section.as_deref().unwrap_or(DEFAULT_SECTION)
    }

    /// Decide where credentials come from.
    ///
    /// A missing path is not an error: it is reported and the environment
    /// is used alone.
    pub fn source(&self, ctx: &Context) -> CredentialSource {
        let section = self.section().to_string();
        match &self.path {
            Some(path) => CredentialSource::FromFile {
                path: path.clone(),
                section,
                window: self.section_window,
            },
            None => {
                if !is_test_mode(ctx) {
                    warn!("no .edgerc path, looking up section [{section}] in environment");
                }
                CredentialSource::FromEnvironment { section }
            }
        }
    }
}

/// Where an EdgeGrid client takes its credentials from.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Explicit values. All four must be non-empty.
    FromStrings {
        /// Client token.
        client_token: String,
        /// Client secret.
        client_secret: String,
        /// Access token.
        access_token: String,
        /// API host, with or without `https://`.
        host: String,
    },
    /// A section of an `.edgerc` file, overridable by the environment.
    FromFile {
        /// Path of the file.
        path: String,
        /// Section name.
        section: String,
        /// How section lines are collected.
        window: SectionWindow,
    },
    /// `AKAMAI_*` environment variables only.
    FromEnvironment {
        /// Section name.
        section: String,
    },
}

impl Debug for CredentialSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::FromStrings {
                client_token,
                client_secret,
                access_token,
                host,
            } => f
                .debug_struct("FromStrings")
                .field("client_token", &Redact::from(client_token))
                .field("client_secret", &Redact::from(client_secret))
                .field("access_token", &Redact::from(access_token))
                .field("host", host)
                .finish(),
            CredentialSource::FromFile {
                path,
                section,
                window,
            } => f
                .debug_struct("FromFile")
                .field("path", path)
                .field("section", section)
                .field("window", window)
                .finish(),
            CredentialSource::FromEnvironment { section } => f
                .debug_struct("FromEnvironment")
                .field("section", section)
                .finish(),
        }
    }
}

/// `EDGEGRID_ENV=test` silences credential diagnostics.
pub(crate) fn is_test_mode(ctx: &Context) -> bool {
    ctx.env_var(EDGEGRID_ENV).as_deref() == Some("test")
}
