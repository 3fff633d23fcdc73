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

use std::sync::Arc;

use bytes::Bytes;
use http::Method;
use log::debug;
use vuzit_core::time::now;
use vuzit_core::{send_with_retry, Context, Error, Result, RetryPolicy};

use crate::params::Options;
use crate::request::{build_query_request, path_and_query, signed_params};
use crate::sign_request::SignedRequest;
use crate::Config;

/// Client of the vuzit web service.
///
/// Every operation performs one logical request, blocking the calling thread
/// until the response is decoded or the last attempt failed.
///
/// ```no_run
/// use vuzit::{Client, Config, Options};
/// use vuzit_core::{Context, OsEnv};
///
/// # fn example() -> vuzit_core::Result<()> {
/// let ctx = Context::new().with_env(OsEnv);
/// let config = Config::new().from_env(&ctx);
/// let client = Client::new(ctx, config);
///
/// let doc = client.find_document("DOCUMENT_ID", &Options::new())?;
/// println!("{} has {} pages", doc.id(), doc.page_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    config: Arc<Config>,
    retry: RetryPolicy,
    time: Option<i64>,
}

impl Client {
    /// Create a new client.
    pub fn new(ctx: Context, config: Config) -> Self {
        Self {
            ctx,
            config: Arc::new(config),
            retry: RetryPolicy::default(),
            time: None,
        }
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Specify the signing time in epoch seconds.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, timestamp: i64) -> Self {
        self.time = Some(timestamp);
        self
    }

    /// The config of this client.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn timestamp(&self) -> i64 {
        self.time.unwrap_or_else(|| now().timestamp())
    }

    pub(crate) fn signed_request(&self, method: &str, id: Option<&str>) -> SignedRequest {
        SignedRequest::new(method, id, self.timestamp())
    }

    /// Send a signed query-string request.
    pub(crate) fn send_query(
        &self,
        http_method: Method,
        path: &str,
        req: &SignedRequest,
        options: &Options,
    ) -> Result<http::Response<Bytes>> {
        let params = signed_params(&self.config, req, options)?;
        let paq = path_and_query(path, &params);
        debug!("sending {} request: {} {}", req.method(), http_method, path);

        let req = build_query_request(&self.config, http_method, &paq)?;
        self.send(req)
    }

    pub(crate) fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        send_with_retry(&self.ctx, req, &self.retry)
    }
}

/// Fail with an argument error if `id` is empty.
pub(crate) fn require_id<'a>(id: &'a str, what: &str) -> Result<&'a str> {
    if id.trim().is_empty() {
        return Err(Error::argument_invalid(format!("{what} must not be empty")));
    }
    Ok(id)
}
