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

//! Vuzit request signature.

use std::fmt::Write;

use log::debug;
use vuzit_core::hash::base64_hmac_sha1;
use vuzit_core::Result;

use crate::Config;

/// The triple that determines a signature.
///
/// Signatures are reproducible from this triple plus the keys of a
/// [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    method: String,
    resource_id: Option<String>,
    timestamp: i64,
}

impl SignedRequest {
    /// Create a new signed request.
    pub fn new(method: impl Into<String>, resource_id: Option<&str>, timestamp: i64) -> Self {
        Self {
            method: method.into(),
            resource_id: resource_id.map(str::to_string),
            timestamp,
        }
    }

    /// Remote method name.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Id of the document or event the request is about.
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    /// Epoch seconds the request is signed at.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Sign the request with the keys of `config`.
    ///
    /// Fails with a configuration error before any I/O if a key is unset.
    pub fn sign(&self, config: &Config) -> Result<String> {
        let (public_key, private_key) = config.keys()?;
        let string_to_sign = self.string_to_sign(public_key)?;

        Ok(base64_hmac_sha1(
            private_key.as_bytes(),
            string_to_sign.as_bytes(),
        ))
    }

    /// Construct string to sign
    ///
    /// ## Format
    ///
    /// ```text
    /// Method + ResourceId + PublicKey + Timestamp
    /// ```
    ///
    /// `ResourceId` is empty when the request is not about a single resource.
    fn string_to_sign(&self, public_key: &str) -> Result<String> {
        let mut s = String::new();
        s.write_str(&self.method)?;
        s.write_str(self.resource_id.as_deref().unwrap_or_default())?;
        s.write_str(public_key)?;
        write!(&mut s, "{}", self.timestamp)?;

        debug!("string to sign: {}", &s);
        Ok(s)
    }
}

/// Compute the base64 signature of a request.
///
/// The result is not percent-encoded; callers embedding it in a query string
/// must encode it.
pub fn sign(
    method: &str,
    resource_id: Option<&str>,
    timestamp: i64,
    config: &Config,
) -> Result<String> {
    SignedRequest::new(method, resource_id, timestamp).sign(config)
}
