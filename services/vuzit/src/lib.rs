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

//! Client for the vuzit document hosting service.
//!
//! Documents are uploaded, loaded, listed and deleted through requests signed
//! with HMAC-SHA1 over `method + id + public key + timestamp`.
//!
//! ## Example
//!
//! ```no_run
//! use vuzit::{Client, Config, ContentSource, UploadOptions};
//! use vuzit_core::{Context, OsEnv, Result};
//! use vuzit_http_send_reqwest::ReqwestHttpSend;
//!
//! fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_env(OsEnv)
//!         .with_http_send(ReqwestHttpSend::default());
//!
//!     let config = Config::new()
//!         .with_public_key("your-public-key")
//!         .with_private_key("your-private-key");
//!     let client = Client::new(ctx, config);
//!
//!     let doc = client.upload_document(
//!         ContentSource::from_path("report.pdf"),
//!         &UploadOptions::default(),
//!     )?;
//!     println!("uploaded {}", doc.id());
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! export VUZIT_PUBLIC_KEY=your-public-key
//! export VUZIT_PRIVATE_KEY=your-private-key
//! export VUZIT_SERVICE_URL=http://vuzit.com
//! ```

mod constants;

mod config;
pub use config::Config;

mod sign_request;
pub use sign_request::sign;
pub use sign_request::SignedRequest;

mod params;
pub use params::{clean, Options, Params, Value};

pub mod request;

mod multipart;
pub use multipart::{mime_type, MultipartEncoder};

mod content;
pub use content::ContentSource;

pub mod decode;

mod client;
pub use client::Client;

mod document;
pub use document::{Document, UploadOptions};

mod page;
pub use page::Page;

mod event;
pub use event::Event;

pub use vuzit_core::{Context, Error, ErrorKind, Result, RetryPolicy};
