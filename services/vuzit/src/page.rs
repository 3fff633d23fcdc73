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

use http::Method;
use serde::Deserialize;
use vuzit_core::Result;

use crate::client::{require_id, Client};
use crate::constants::*;
use crate::decode::{decode, lenient_int};
use crate::params::Options;
use crate::request::{encode_segment, resource_path};

/// Text of one page of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    number: i64,
    text: Option<String>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct PageXml {
    #[serde(deserialize_with = "lenient_int")]
    number: Option<i64>,
    text: Option<String>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct PageList {
    #[serde(rename = "page")]
    pages: Vec<PageXml>,
}

impl Page {
    fn from_xml(v: PageXml) -> Self {
        Self {
            number: v.number.unwrap_or(-1),
            text: v.text,
        }
    }

    /// Page number, `-1` if not reported.
    pub fn number(&self) -> i64 {
        self.number
    }

    /// Page text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl Client {
    /// Load the pages of a document.
    ///
    /// Use the `included_pages` option to select pages, e.g. `"1,3-5"`.
    pub fn find_pages(&self, id: &str, options: &Options) -> Result<Vec<Page>> {
        let id = require_id(id, "document id")?;

        let req = self.signed_request(METHOD_INDEX, Some(id));
        let resource = format!("documents/{}/pages", encode_segment(id));
        let path = resource_path(&resource, None, DEFAULT_EXTENSION);
        let resp = self.send_query(Method::GET, &path, &req, options)?;

        let list: PageList = decode(resp.body(), self.config().debug)?;
        Ok(list.pages.into_iter().map(Page::from_xml).collect())
    }
}
