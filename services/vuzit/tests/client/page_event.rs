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
use pretty_assertions::assert_eq;
use vuzit::{ErrorKind, Options};

use crate::mock::*;

#[test]
fn test_find_pages() -> anyhow::Result<()> {
    let mock = MockHttpSend::reply(
        200,
        "<pages><page><number>1</number><text>Intro</text></page><page><number>2</number><text>Numbers &amp; more</text></page></pages>",
    );
    let client = client(&mock, &RecordingSleep::default());

    let pages = client.find_pages("doc123", &Options::new().with("included_pages", "1-2"))?;
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].number(), 1);
    assert_eq!(pages[0].text(), Some("Intro"));
    assert_eq!(pages[1].number(), 2);
    assert_eq!(pages[1].text(), Some("Numbers & more"));

    let req = &mock.requests()[0];
    assert_eq!(req.method, Method::GET);
    assert_eq!(
        req.uri,
        "http://vuzit.test/documents/doc123/pages.xml?included_pages=1-2&method=index&key=pubkey&timestamp=1234567890&signature=uErcDKLenEoYGnQ2x5vJHIdZzCg%3D&"
    );
    Ok(())
}

#[test]
fn test_find_events() -> anyhow::Result<()> {
    let mock = MockHttpSend::reply(
        200,
        r#"<events>
  <event>
    <web_id>doc123</web_id>
    <event>page_view</event>
    <remote_host>10.0.0.1</remote_host>
    <requested_at>1234567000</requested_at>
    <page>2</page>
    <duration>31</duration>
  </event>
  <event>
    <web_id>doc123</web_id>
    <event>document_open</event>
  </event>
</events>"#,
    );
    let client = client(&mock, &RecordingSleep::default());

    let events = client.find_events("doc123", &Options::new())?;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event(), Some("page_view"));
    assert_eq!(events[0].remote_host(), Some("10.0.0.1"));
    assert_eq!(events[0].requested_at().map(|v| v.timestamp()), Some(1234567000));
    assert_eq!(events[0].page(), 2);
    assert_eq!(events[0].duration(), 31);
    assert_eq!(events[1].event(), Some("document_open"));
    assert_eq!(events[1].page(), -1);
    assert_eq!(events[1].requested_at(), None);

    assert_eq!(
        mock.requests()[0].uri,
        "http://vuzit.test/events.xml?web_id=doc123&method=show&key=pubkey&timestamp=1234567890&signature=KuqLVkEAOS5%2Bd4Mm7paE%2BJ8VgJ0%3D&"
    );
    Ok(())
}

#[test]
fn test_event_without_web_id() {
    let mock = MockHttpSend::reply(200, "<events><event><event>page_view</event></event></events>");
    let client = client(&mock, &RecordingSleep::default());

    let err = client.find_events("doc123", &Options::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingData);
    assert_eq!(err.message(), "Unknown error occurred");
}

#[test]
fn test_empty_id_sends_nothing() {
    let mock = MockHttpSend::reply(200, "<pages/>");
    let client = client(&mock, &RecordingSleep::default());

    assert_eq!(
        client.find_pages("", &Options::new()).unwrap_err().kind(),
        ErrorKind::ArgumentInvalid
    );
    assert_eq!(
        client.find_events("", &Options::new()).unwrap_err().kind(),
        ErrorKind::ArgumentInvalid
    );
    assert!(mock.requests().is_empty());
}
