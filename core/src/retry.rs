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

use crate::http::RequestTimeout;
use crate::{Context, Error, Result};
use bytes::Bytes;
use log::{debug, warn};
use std::fmt::Debug;
use std::time::Duration;

/// Sleep blocks the calling thread between two attempts.
pub trait Sleep: Debug + Send + Sync + 'static {
    /// Block for the given duration.
    fn sleep(&self, dur: Duration);
}

/// ThreadSleep sleeps with [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&self, dur: Duration) {
        std::thread::sleep(dur)
    }
}

/// RetryPolicy bounds the attempts made for one logical request.
///
/// The policy is fixed: every pause has the same length, there is no jitter
/// and no exponential growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, the first one included.
    pub max_attempts: usize,
    /// Pause between two attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(20),
        }
    }
}

impl RetryPolicy {
    /// Create a new policy.
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

/// Send a request through the context, retrying transport failures.
///
/// Only errors of kind [`crate::ErrorKind::Transport`] are retried. Every
/// response, whatever its status, is returned to the caller as is. After the
/// last failed attempt the transport error is returned with the number of
/// attempts as context.
pub fn send_with_retry(
    ctx: &Context,
    req: http::Request<Bytes>,
    policy: &RetryPolicy,
) -> Result<http::Response<Bytes>> {
    let max_attempts = policy.max_attempts.max(1);
    let (parts, body) = req.into_parts();

    let mut attempt = 0;
    loop {
        attempt += 1;
        let req = rebuild(&parts, body.clone())?;

        match ctx.http_send(req) {
            Ok(resp) => {
                debug!(
                    "{} {} -> {} (attempt {attempt})",
                    parts.method,
                    parts.uri.path(),
                    resp.status()
                );
                return Ok(resp);
            }
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                warn!(
                    "request encountered error, will retry {} more: {}",
                    max_attempts - attempt,
                    err
                );
                ctx.sleep(policy.delay);
            }
            Err(err) if err.is_retryable() => {
                return Err(err
                    .with_context(format!("method: {}", parts.method))
                    .with_context(format!("path: {}", parts.uri.path()))
                    .with_context(format!("attempts: {attempt}")));
            }
            Err(err) => return Err(err),
        }
    }
}

/// http::Request is not Clone, rebuild it from the parts for every attempt.
fn rebuild(parts: &http::request::Parts, body: Bytes) -> Result<http::Request<Bytes>> {
    let mut builder = http::Request::builder()
        .method(parts.method.clone())
        .uri(parts.uri.clone())
        .version(parts.version);
    if let Some(headers) = builder.headers_mut() {
        headers.extend(parts.headers.clone());
    }
    if let Some(timeout) = parts.extensions.get::<RequestTimeout>() {
        builder = builder.extension(*timeout);
    }

    builder.body(body).map_err(Error::from)
}
