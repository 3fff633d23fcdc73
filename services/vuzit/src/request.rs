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

//! Request building.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, USER_AGENT};
use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use vuzit_core::{RequestTimeout, Result};

use crate::constants::*;
use crate::params::{clean, Options, Params};
use crate::sign_request::SignedRequest;
use crate::Config;

/// Characters kept as is when an id is used as a path segment.
static PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Build the standard parameters of a signed request.
///
/// The cleaned options come first, then `method`, `key`, `timestamp` and
/// `signature`, which always win over options of the same name.
pub fn signed_params(
    config: &Config,
    req: &SignedRequest,
    options: &Options,
) -> Result<Params> {
    let signature = req.sign(config)?;
    let (public_key, _) = config.keys()?;

    let mut params = clean(options);
    params.insert(PARAM_METHOD, req.method());
    params.insert(PARAM_KEY, public_key);
    params.insert(PARAM_TIMESTAMP, req.timestamp().to_string());
    params.insert(PARAM_SIGNATURE, signature);
    Ok(params)
}

/// Build `/<resource>[/<id>].<extension>`.
///
/// `resource` may contain slashes, `id` is percent-encoded as one segment.
/// The result never carries a scheme or a host.
pub fn resource_path(resource: &str, id: Option<&str>, extension: &str) -> String {
    let mut path = format!("/{}", resource.trim_matches('/'));
    if let Some(id) = id.filter(|v| !v.is_empty()) {
        path.push('/');
        path.push_str(&encode_segment(id));
    }
    if !extension.is_empty() {
        path.push('.');
        path.push_str(extension);
    }
    path
}

/// Percent-encode `s` for use as one path segment.
pub fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, PATH_SEGMENT).to_string()
}

/// Build the query string of a request.
///
/// Keys and values are form-encoded on their own and every pair is terminated
/// by `&`, the trailing one included.
pub fn query_string(params: &Params) -> String {
    let mut s = String::new();
    for (k, v) in params.iter() {
        s.extend(form_urlencoded::byte_serialize(k.as_bytes()));
        s.push('=');
        s.extend(form_urlencoded::byte_serialize(v.as_bytes()));
        s.push('&');
    }
    s
}

/// Build the path and query of a request, without scheme and host.
pub fn path_and_query(path: &str, params: &Params) -> String {
    if params.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", query_string(params))
    }
}

/// Build the absolute url of a request.
pub fn absolute_url(config: &Config, path_and_query: &str) -> String {
    format!("{}{path_and_query}", config.base_url())
}

/// Build a query-string request for show, index and destroy.
pub fn build_query_request(
    config: &Config,
    method: Method,
    path_and_query: &str,
) -> Result<http::Request<Bytes>> {
    let req = http::Request::builder()
        .method(method)
        .uri(absolute_url(config, path_and_query))
        .header(USER_AGENT, config.user_agent.as_str())
        .extension(RequestTimeout(READ_TIMEOUT))
        .body(Bytes::new())?;
    Ok(req)
}

/// Build a multipart POST request for uploads.
pub fn build_multipart_request(
    config: &Config,
    path: &str,
    content_type: &str,
    body: Bytes,
) -> Result<http::Request<Bytes>> {
    let timeout = if body.len() > LARGE_UPLOAD_THRESHOLD {
        LARGE_UPLOAD_READ_TIMEOUT
    } else {
        READ_TIMEOUT
    };

    let req = http::Request::builder()
        .method(Method::POST)
        .uri(absolute_url(config, path))
        .header(USER_AGENT, config.user_agent.as_str())
        .header(CONTENT_TYPE, content_type)
        .extension(RequestTimeout(timeout))
        .body(body)?;
    Ok(req)
}
