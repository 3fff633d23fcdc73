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

//! `multipart/form-data` encoding.

use bytes::{BufMut, Bytes, BytesMut};
use rand::distributions::Alphanumeric;
use rand::Rng;

const BOUNDARY_LEN: usize = 16;
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Encoder for a `multipart/form-data` body.
///
/// Every part is preceded by a boundary marker line; [`MultipartEncoder::finish`]
/// appends the closing marker.
///
/// ```
/// use vuzit::MultipartEncoder;
///
/// let mut encoder = MultipartEncoder::with_boundary("XyZ");
/// encoder.text("method", "create");
/// let (content_type, body) = encoder.finish();
///
/// assert_eq!(content_type, "multipart/form-data; boundary=XyZ");
/// assert_eq!(
///     &body[..],
///     b"--XyZ\r\nContent-Disposition: form-data; name=\"method\"\r\n\r\ncreate\r\n--XyZ--\r\n"
/// );
/// ```
#[derive(Debug)]
pub struct MultipartEncoder {
    boundary: String,
    body: BytesMut,
}

impl Default for MultipartEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartEncoder {
    /// Create an encoder with a random boundary token.
    pub fn new() -> Self {
        let boundary: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(BOUNDARY_LEN)
            .map(char::from)
            .collect();
        Self::with_boundary(boundary)
    }

    /// Create an encoder with a fixed boundary token.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: BytesMut::new(),
        }
    }

    /// The boundary token.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value of the `Content-Type` header for this body.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Append a text field.
    pub fn text(&mut self, name: &str, value: &str) {
        self.marker();
        self.body.put_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.body.put_slice(value.as_bytes());
        self.body.put_slice(b"\r\n");
    }

    /// Append a file field.
    ///
    /// The content type is looked up from the extension of `filename`,
    /// falling back to `application/octet-stream`.
    pub fn file(&mut self, name: &str, filename: &str, content: &[u8]) {
        let content_type = mime_type(filename);

        self.marker();
        self.body.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                 Content-Transfer-Encoding: binary\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.put_slice(content);
        self.body.put_slice(b"\r\n");
    }

    /// Close the body, returns the content type and the body.
    pub fn finish(mut self) -> (String, Bytes) {
        self.body
            .put_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (self.content_type(), self.body.freeze())
    }

    fn marker(&mut self) {
        self.body
            .put_slice(format!("--{}\r\n", self.boundary).as_bytes());
    }
}

/// Look up the content type of a file name.
pub fn mime_type(filename: &str) -> &'static str {
    mime_guess::from_path(filename)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
