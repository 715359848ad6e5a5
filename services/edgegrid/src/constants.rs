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

/// Conventional location of the credentials file.
pub const DEFAULT_EDGERC_PATH: &str = "~/.edgerc";
/// Section used when none is given.
pub const DEFAULT_SECTION: &str = "default";

/// Scheme every host is normalized to.
pub const HTTPS_PREFIX: &str = "https://";

/// Prefix of every EdgeGrid environment variable.
pub const AKAMAI_ENV_PREFIX: &str = "AKAMAI";

// Field names, as used in `AKAMAI_<SECTION>_<FIELD>`.
pub const FIELD_HOST: &str = "HOST";
pub const FIELD_ACCESS_TOKEN: &str = "ACCESS_TOKEN";
pub const FIELD_CLIENT_TOKEN: &str = "CLIENT_TOKEN";
pub const FIELD_CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const FIELD_MAX_BODY: &str = "MAX_BODY";

/// Set to `test` to silence credential diagnostics.
pub const EDGEGRID_ENV: &str = "EDGEGRID_ENV";

// Keys inside an `.edgerc` section, after `-` has been mapped to `_`.
pub const KEY_HOST: &str = "host";
pub const KEY_ACCESS_TOKEN: &str = "access_token";
pub const KEY_CLIENT_TOKEN: &str = "client_token";
pub const KEY_CLIENT_SECRET: &str = "client_secret";
pub const KEY_MAX_BODY: &str = "max_body";

/// Window of the legacy section reader.
pub const COMPAT_SECTION_LINES: usize = 5;

/// Bytes of request body covered by the content hash.
pub const DEFAULT_MAX_BODY: usize = 131072;
/// Redirect hops followed before giving up.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

pub const EDGEGRID_ALGORITHM: &str = "EG1-HMAC-SHA256";
