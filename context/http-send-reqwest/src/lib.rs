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

//! Blocking [`HttpSend`] implementation backed by [`reqwest::blocking::Client`].
//!
//! ```no_run
//! use vuzit_core::Context;
//! use vuzit_http_send_reqwest::ReqwestHttpSend;
//!
//! # fn example() -> vuzit_core::Result<()> {
//! let http = ReqwestHttpSend::builder().build()?;
//! let ctx = Context::new().with_http_send(http);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

use bytes::Bytes;
use log::warn;
use reqwest::blocking::{Client, Request};
use std::time::Duration;
use vuzit_core::{Error, HttpSend, RequestTimeout, Result};

/// Connect timeout applied by clients created through [`ReqwestHttpSendBuilder`].
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(60);

/// Read timeout used when a request carries no [`RequestTimeout`].
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// [`HttpSend`] backed by a blocking reqwest client.
///
/// A [`RequestTimeout`] on the request overrides the client's timeout. Send
/// and read failures are transport errors.
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::blocking::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a builder for a client with the service defaults.
    pub fn builder() -> ReqwestHttpSendBuilder {
        ReqwestHttpSendBuilder::default()
    }
}

/// Builder for [`ReqwestHttpSend`].
#[derive(Debug, Clone)]
pub struct ReqwestHttpSendBuilder {
    accept_invalid_certs: bool,
    connect_timeout: Duration,
    read_timeout: Duration,
    user_agent: Option<String>,
}

impl Default for ReqwestHttpSendBuilder {
    fn default() -> Self {
        Self {
            accept_invalid_certs: false,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            user_agent: None,
        }
    }
}

impl ReqwestHttpSendBuilder {
    /// Skip TLS certificate verification.
    ///
    /// # Warning
    ///
    /// This allows any certificate, including expired and self-signed ones,
    /// so a man in the middle can read the keys and documents. Only enable it
    /// for deployments known to serve an invalid certificate.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the read timeout used when a request carries none.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the default user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the http sender.
    pub fn build(self) -> Result<ReqwestHttpSend> {
        if self.accept_invalid_certs {
            warn!("TLS certificate verification is disabled");
        }

        let mut builder = Client::builder()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .connect_timeout(self.connect_timeout)
            .timeout(self.read_timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|e| Error::unexpected("failed to build http client").with_source(e))?;
        Ok(ReqwestHttpSend::new(client))
    }
}

impl HttpSend for ReqwestHttpSend {
    fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let timeout = req.extensions().get::<RequestTimeout>().copied();
        let uri = req.uri().to_string();

        let mut req = Request::try_from(req).map_err(|e| {
            Error::unexpected("failed to convert request")
                .with_source(e)
                .with_context(format!("uri: {uri}"))
        })?;
        if let Some(RequestTimeout(timeout)) = timeout {
            *req.timeout_mut() = Some(timeout);
        }

        let resp = self.client.execute(req).map_err(|e| {
            Error::transport(format!("failed to send request: {e}"))
                .with_source(e)
                .with_context(format!("uri: {uri}"))
        })?;

        let mut builder = http::Response::builder()
            .status(resp.status())
            .version(resp.version());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(resp.headers().clone());
        }

        let body = resp.bytes().map_err(|e| {
            Error::transport(format!("failed to read response body: {e}"))
                .with_source(e)
                .with_context(format!("uri: {uri}"))
        })?;

        builder.body(body).map_err(Error::from)
    }
}
