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

use std::fmt::{Debug, Formatter};

use crate::constants::*;
use vuzit_core::{utils::Redact, Context, Error, Result};

/// Config for the vuzit client.
///
/// Built once at process start and never mutated afterwards; every signer,
/// request builder and transport call reads it through a shared reference.
#[derive(Clone)]
pub struct Config {
    /// `public_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VUZIT_PUBLIC_KEY`]
    pub public_key: Option<String>,
    /// `private_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VUZIT_PRIVATE_KEY`]
    ///
    /// Do NOT share this with anyone.
    pub private_key: Option<String>,
    /// Base url of the service, only needs to change for self hosted
    /// deployments.
    ///
    /// - env value: [`VUZIT_SERVICE_URL`]
    /// - default: [`DEFAULT_SERVICE_URL`]
    pub service_url: String,
    /// Log response bodies at debug level.
    ///
    /// - env value: [`VUZIT_DEBUG`]
    pub debug: bool,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Skip TLS certificate verification in the http backend.
    ///
    /// Off by default. The client itself never reads it, the code building
    /// the http backend does.
    ///
    /// - env value: [`VUZIT_ACCEPT_INVALID_CERTS`]
    pub accept_invalid_certs: bool,
    service_url_set: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_key: None,
            private_key: None,
            service_url: DEFAULT_SERVICE_URL.to_string(),
            debug: false,
            user_agent: format!("vuzit-rs/{}", env!("CARGO_PKG_VERSION")),
            accept_invalid_certs: false,
            service_url_set: false,
        }
    }
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set public_key
    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = Some(public_key.into());
        self
    }

    /// Set private_key
    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Set service_url
    pub fn with_service_url(mut self, service_url: impl Into<String>) -> Self {
        self.service_url = service_url.into();
        self.service_url_set = true;
        self
    }

    /// Set debug
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set user_agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set accept_invalid_certs
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Load config from env.
    ///
    /// Only fields that are still unset are filled.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(VUZIT_PUBLIC_KEY) {
            self.public_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(VUZIT_PRIVATE_KEY) {
            self.private_key.get_or_insert(v);
        }
        if !self.service_url_set {
            if let Some(v) = ctx.env_var(VUZIT_SERVICE_URL) {
                self.service_url = v;
                self.service_url_set = true;
            }
        }
        if let Some(v) = ctx.env_var(VUZIT_DEBUG) {
            self.debug |= is_truthy(&v);
        }
        if let Some(v) = ctx.env_var(VUZIT_ACCEPT_INVALID_CERTS) {
            self.accept_invalid_certs |= is_truthy(&v);
        }

        self
    }

    /// Returns the public and private key.
    ///
    /// Fails with a configuration error if either key is unset or empty.
    pub fn keys(&self) -> Result<(&str, &str)> {
        let public_key = self
            .public_key
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("public_key is not set"))?;
        let private_key = self
            .private_key
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("private_key is not set"))?;

        Ok((public_key, private_key))
    }

    /// Service url without trailing slash.
    pub fn base_url(&self) -> &str {
        self.service_url.trim_end_matches('/')
    }
}

fn is_truthy(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("public_key", &self.public_key.as_ref().map(Redact::from))
            .field("private_key", &self.private_key.as_ref().map(Redact::from))
            .field("service_url", &self.service_url)
            .field("debug", &self.debug)
            .field("user_agent", &self.user_agent)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}
