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

//! Response decoding.
//!
//! Bodies are deserialized with serde into the struct of each entity. Every
//! response may instead be an error envelope carrying `<code>` and `<msg>`.

use log::debug;
use quick_xml::de;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use vuzit_core::{Error, Result};

/// Message used when a response carries neither an error nor the data asked for.
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct Envelope {
    code: Option<String>,
    msg: Option<String>,
}

impl Envelope {
    fn into_error(self) -> Option<Error> {
        let code = parse_int(&self.code?);
        Some(Error::server(code, self.msg.unwrap_or_default()))
    }
}

fn body_str(body: &[u8]) -> Result<&str> {
    std::str::from_utf8(body).map_err(Error::xml_parse)
}

/// Returns whether `content` opens any element.
///
/// Declarations, comments and bare text before the first tag are skipped.
fn has_root(content: &str) -> Result<bool> {
    let mut reader = Reader::from_str(content);
    loop {
        match reader.read_event().map_err(Error::xml_parse)? {
            Event::Start(_) | Event::Empty(_) => return Ok(true),
            Event::Eof => return Ok(false),
            _ => {}
        }
    }
}

fn from_str<T: DeserializeOwned>(content: &str) -> Result<T> {
    de::from_str(content).map_err(Error::xml_parse)
}

/// Returns the service error carried by `body`, if any.
///
/// A body without any element carries no error. A body that is not valid
/// xml fails with an xml parse error.
pub fn service_error(body: &[u8]) -> Result<Option<Error>> {
    let content = body_str(body)?;
    if !has_root(content)? {
        return Ok(None);
    }

    let envelope: Envelope = from_str(content)?;
    Ok(envelope.into_error())
}

/// Deserialize a response body into `T`, failing on a service error envelope.
///
/// - Invalid utf-8 or xml fails with an xml parse error.
/// - A body without any element fails with `No response from server`.
pub fn decode<T: DeserializeOwned>(body: &[u8], debug: bool) -> Result<T> {
    let content = body_str(body)?;
    if debug {
        debug!("response body: {content}");
    }

    if !has_root(content)? {
        return Err(Error::missing_data("No response from server"));
    }

    let envelope: Envelope = from_str(content)?;
    if let Some(err) = envelope.into_error() {
        return Err(err);
    }
    from_str(content)
}

/// Deserialize an optional element with [`parse_int`].
pub(crate) fn lenient_int<'de, D>(d: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.map(|v| parse_int(&v)))
}

/// Parse an integer the lenient way.
///
/// Leading whitespace and an optional sign are accepted, parsing stops at the
/// first non digit, and text without leading digits yields `0`.
pub fn parse_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}
