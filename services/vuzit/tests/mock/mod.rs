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

//! In-memory service used by the integration tests.

use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use http::HeaderMap;
use vuzit::{Client, Config, Context, Result};
use vuzit_core::{HttpSend, RequestTimeout, Sleep};

pub const SERVICE_URL: &str = "http://vuzit.test";
pub const TIMESTAMP: i64 = 1234567890;

type Handler = dyn Fn(&RecordedRequest) -> Result<http::Response<Bytes>> + Send + Sync;

/// What the mock saw of one physical request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: http::Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub timeout: Option<RequestTimeout>,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn path(&self) -> &str {
        let rest = self.uri.trim_start_matches(SERVICE_URL);
        rest.split('?').next().unwrap_or(rest)
    }
}

#[derive(Clone)]
pub struct MockHttpSend {
    handler: Arc<Handler>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Debug for MockHttpSend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttpSend").finish_non_exhaustive()
    }
}

impl MockHttpSend {
    pub fn new(
        handler: impl Fn(&RecordedRequest) -> Result<http::Response<Bytes>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Arc::new(handler),
            requests: Arc::default(),
        }
    }

    /// Answer every request with the same response.
    pub fn reply(status: u16, body: &'static str) -> Self {
        Self::new(move |_| response(status, body))
    }

    /// Fail the first `failures` requests with a transport error, then reply.
    pub fn flaky(failures: usize, status: u16, body: &'static str) -> Self {
        let count = AtomicUsize::new(0);
        Self::new(move |_| {
            if count.fetch_add(1, Ordering::SeqCst) < failures {
                Err(vuzit::Error::transport("connection reset by peer"))
            } else {
                response(status, body)
            }
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpSend for MockHttpSend {
    fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let recorded = RecordedRequest {
            method: req.method().clone(),
            uri: req.uri().to_string(),
            headers: req.headers().clone(),
            timeout: req.extensions().get::<RequestTimeout>().copied(),
            body: req.body().clone(),
        };
        self.requests.lock().unwrap().push(recorded.clone());
        (self.handler)(&recorded)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSleep {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleep {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Sleep for RecordingSleep {
    fn sleep(&self, dur: Duration) {
        self.sleeps.lock().unwrap().push(dur);
    }
}

pub fn response(status: u16, body: &str) -> Result<http::Response<Bytes>> {
    Ok(http::Response::builder()
        .status(status)
        .body(Bytes::from(body.to_string()))?)
}

pub fn config() -> Config {
    Config::new()
        .with_public_key("pubkey")
        .with_private_key("privkey")
        .with_service_url(SERVICE_URL)
}

/// A client signing at a fixed time against `mock`.
pub fn client(mock: &MockHttpSend, sleep: &RecordingSleep) -> Client {
    client_with_config(mock, sleep, config())
}

pub fn client_with_config(mock: &MockHttpSend, sleep: &RecordingSleep, config: Config) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new()
        .with_http_send(mock.clone())
        .with_sleep(sleep.clone());
    Client::new(ctx, config).with_time(TIMESTAMP)
}
