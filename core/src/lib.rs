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

//! Core components for the Vuzit client.
//!
//! This crate provides the service-agnostic building blocks the `vuzit`
//! crate composes into signed requests.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending,
//!   environment access and sleeping between retries
//! - **Error**: The single error type every operation returns, carrying a
//!   service code and message
//! - **Transport**: [`send_with_retry`] drives a [`Context`] through a bounded
//!   [`RetryPolicy`]
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use vuzit_core::{send_with_retry, Context, RetryPolicy};
//!
//! # fn example() -> vuzit_core::Result<()> {
//! // Plug a real `HttpSend` in with `with_http_send`.
//! let ctx = Context::new();
//!
//! let req = http::Request::get("http://vuzit.com/documents.xml")
//!     .body(Bytes::new())?;
//! let resp = send_with_retry(&ctx, req, &RetryPolicy::default())?;
//! println!("{}", resp.status());
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC-SHA1 and base64 helpers
//! - [`time`]: Time helpers
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
mod http;
pub use self::http::{HttpSend, NoopHttpSend, RequestTimeout};
mod env;
pub use env::{Env, NoopEnv, OsEnv, StaticEnv};
mod retry;
pub use retry::{send_with_retry, RetryPolicy, Sleep, ThreadSleep};

mod error;
pub use error::{Error, ErrorKind, Result};
