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
use vuzit_core::time::{from_timestamp, DateTime};
use vuzit_core::{Error, Result};

use crate::client::{require_id, Client};
use crate::constants::*;
use crate::decode::{decode, lenient_int, UNKNOWN_ERROR};
use crate::params::Options;
use crate::request::resource_path;

/// One usage event of a document, such as a page view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    web_id: String,
    event: Option<String>,
    remote_host: Option<String>,
    referer: Option<String>,
    user_agent: Option<String>,
    custom: Option<String>,
    requested_at: Option<DateTime>,
    page: i64,
    duration: i64,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct EventXml {
    web_id: Option<String>,
    event: Option<String>,
    remote_host: Option<String>,
    referer: Option<String>,
    user_agent: Option<String>,
    custom: Option<String>,
    /// Epoch seconds.
    #[serde(deserialize_with = "lenient_int")]
    requested_at: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    page: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    duration: Option<i64>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct EventList {
    #[serde(rename = "event")]
    events: Vec<EventXml>,
}

impl Event {
    fn from_xml(v: EventXml) -> Result<Self> {
        let web_id = v.web_id.ok_or_else(|| Error::missing_data(UNKNOWN_ERROR))?;

        Ok(Self {
            web_id,
            event: v.event,
            remote_host: v.remote_host,
            referer: v.referer,
            user_agent: v.user_agent,
            custom: v.custom,
            requested_at: v.requested_at.and_then(from_timestamp),
            page: v.page.unwrap_or(-1),
            duration: v.duration.unwrap_or(-1),
        })
    }

    /// Web id of the document.
    pub fn web_id(&self) -> &str {
        &self.web_id
    }

    /// Event name, e.g. `page_view`.
    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }

    /// Host the request came from.
    pub fn remote_host(&self) -> Option<&str> {
        self.remote_host.as_deref()
    }

    /// Referring page.
    pub fn referer(&self) -> Option<&str> {
        self.referer.as_deref()
    }

    /// User agent of the viewer.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Custom value attached by the viewer.
    pub fn custom(&self) -> Option<&str> {
        self.custom.as_deref()
    }

    /// When the event happened.
    pub fn requested_at(&self) -> Option<DateTime> {
        self.requested_at
    }

    /// Page number, `-1` if not reported.
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Duration in seconds, `-1` if not reported.
    pub fn duration(&self) -> i64 {
        self.duration
    }
}

impl Client {
    /// Load the usage events of a document.
    pub fn find_events(&self, web_id: &str, options: &Options) -> Result<Vec<Event>> {
        let web_id = require_id(web_id, "web id")?;

        let req = self.signed_request(METHOD_SHOW, Some(web_id));
        let options = options.clone().with(PARAM_WEB_ID, web_id);
        let path = resource_path("events", None, DEFAULT_EXTENSION);
        let resp = self.send_query(Method::GET, &path, &req, &options)?;

        let list: EventList = decode(resp.body(), self.config().debug)?;
        list.events.into_iter().map(Event::from_xml).collect()
    }
}
