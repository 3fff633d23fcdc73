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

use std::io::Write;
use std::time::Duration;

use http::header::{CONTENT_TYPE, USER_AGENT};
use http::Method;
use pretty_assertions::assert_eq;
use vuzit::{ContentSource, ErrorKind, Options, UploadOptions};
use vuzit_core::RequestTimeout;

use crate::mock::*;

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<document>
  <web_id>3lqyf</web_id>
  <title>Quarterly report</title>
  <subject>Finance</subject>
  <page_count>4</page_count>
  <width>612</width>
  <height>792</height>
  <file_size>2048</file_size>
  <status>10</status>
</document>"#;

#[test]
fn test_upload_then_find() -> anyhow::Result<()> {
    let mock = MockHttpSend::new(|req| match (req.method.as_str(), req.path()) {
        ("POST", "/documents") => response(201, "<document><web_id>3lqyf</web_id></document>"),
        ("GET", "/documents/3lqyf.xml") => response(200, DOCUMENT),
        _ => response(404, ""),
    });
    let sleep = RecordingSleep::default();
    let client = client(&mock, &sleep);

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.pdf");
    std::fs::File::create(&path)?.write_all(b"%PDF-1.4 fake")?;

    let uploaded = client.upload_document(ContentSource::from_path(&path), &UploadOptions::default())?;
    assert_eq!(uploaded.id(), "3lqyf");
    assert_eq!(uploaded.title(), None);
    assert_eq!(uploaded.page_count(), -1);

    let found = client.find_document(uploaded.id(), &Options::new())?;
    assert_eq!(found.id(), uploaded.id());
    assert_eq!(found.title(), Some("Quarterly report"));
    assert_eq!(found.subject(), Some("Finance"));
    assert_eq!(found.page_count(), 4);
    assert_eq!(found.page_width(), 612);
    assert_eq!(found.page_height(), 792);
    assert_eq!(found.file_size(), 2048);
    assert_eq!(found.status(), 10);

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[1].uri,
        "http://vuzit.test/documents/3lqyf.xml?method=show&key=pubkey&timestamp=1234567890&signature=9w135A2606hkRq%2BPw%2BlF3PgO6MU%3D&"
    );
    assert!(sleep.sleeps().is_empty());
    Ok(())
}

#[test]
fn test_upload_wire_format() -> anyhow::Result<()> {
    let mock = MockHttpSend::reply(201, "<document><web_id>3lqyf</web_id></document>");
    let client = client(&mock, &RecordingSleep::default());

    let options = UploadOptions::default().with_options(Options::new().with("tag", "q3"));
    client.upload_document(ContentSource::from_bytes("report.pdf", &b"%PDF"[..]), &options)?;

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.uri, "http://vuzit.test/documents");
    assert_eq!(req.timeout, Some(RequestTimeout(Duration::from_secs(15 * 60))));
    assert!(req.headers.get(USER_AGENT).is_some());

    let content_type = req.headers.get(CONTENT_TYPE).unwrap().to_str()?;
    let boundary = content_type
        .strip_prefix("multipart/form-data; boundary=")
        .unwrap();
    assert!(!boundary.is_empty());

    let mut expected = String::new();
    for (name, value) in [
        ("tag", "q3"),
        ("format", "xml"),
        ("secure", "1"),
        ("method", "create"),
        ("key", "pubkey"),
        ("timestamp", "1234567890"),
        ("signature", "zxSsvCzg6iprFfKEVlDv2zDsJv4="),
    ] {
        expected.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    expected.push_str(&format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"upload\"; filename=\"report.pdf\"\r\n\
         Content-Transfer-Encoding: binary\r\nContent-Type: application/pdf\r\n\r\n%PDF\r\n--{boundary}--\r\n"
    ));
    assert_eq!(String::from_utf8(req.body.to_vec())?, expected);
    Ok(())
}

#[test]
fn test_upload_insecure_with_file_type() -> anyhow::Result<()> {
    let mock = MockHttpSend::reply(201, "<document><web_id>3lqyf</web_id></document>");
    let client = client(&mock, &RecordingSleep::default());

    let options = UploadOptions::default().with_secure(false).with_file_type("txt");
    client.upload_document(ContentSource::from_bytes("notes", &b"hi"[..]), &options)?;

    let body = String::from_utf8(mock.requests()[0].body.to_vec())?;
    assert!(body.contains("name=\"secure\"\r\n\r\n0\r\n"));
    assert!(body.contains("name=\"file_type\"\r\n\r\ntxt\r\n"));
    assert!(body.contains("Content-Type: application/octet-stream\r\n"));
    Ok(())
}

#[test]
fn test_upload_missing_file_sends_nothing() {
    let mock = MockHttpSend::reply(201, "<document><web_id>3lqyf</web_id></document>");
    let client = client(&mock, &RecordingSleep::default());

    let err = client
        .upload_document(
            ContentSource::from_path("/definitely/not/here.pdf"),
            &UploadOptions::default(),
        )
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ArgumentInvalid);
    assert_eq!(err.message(), "The file could not be found: /definitely/not/here.pdf");
    assert!(mock.requests().is_empty());
}

#[test]
fn test_upload_without_web_id() {
    let mock = MockHttpSend::reply(201, "<document><status>ok</status></document>");
    let client = client(&mock, &RecordingSleep::default());

    let err = client
        .upload_document(ContentSource::from_bytes("a.pdf", &b"x"[..]), &UploadOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingData);
    assert_eq!(err.message(), "Unknown error occurred");
    assert_eq!(err.code(), 0);
}

#[test]
fn test_find_without_web_id() {
    let mock = MockHttpSend::reply(200, "<document><title>orphan</title></document>");
    let client = client(&mock, &RecordingSleep::default());

    let err = client.find_document("doc123", &Options::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingData);
    assert_eq!(err.message(), "Unknown error occurred");
}

#[test]
fn test_find_passes_options_through() -> anyhow::Result<()> {
    let mock = MockHttpSend::reply(200, DOCUMENT);
    let client = client(&mock, &RecordingSleep::default());

    let options = Options::new()
        .with("included_pages", "1-2")
        .with("excerpt", true)
        .with("unused", "");
    client.find_document("doc123", &options)?;

    assert_eq!(
        mock.requests()[0].uri,
        "http://vuzit.test/documents/doc123.xml?included_pages=1-2&excerpt=1&method=show&key=pubkey&timestamp=1234567890&signature=KuqLVkEAOS5%2Bd4Mm7paE%2BJ8VgJ0%3D&"
    );
    Ok(())
}

#[test]
fn test_find_encodes_id_in_path() -> anyhow::Result<()> {
    let mock = MockHttpSend::reply(200, DOCUMENT);
    let client = client(&mock, &RecordingSleep::default());

    client.find_document("a b/c", &Options::new())?;

    assert_eq!(
        mock.requests()[0].uri,
        "http://vuzit.test/documents/a%20b%2Fc.xml?method=show&key=pubkey&timestamp=1234567890&signature=uTEaZmjMZttU9i5Fl%2B9k9s6U%2Bwg%3D&"
    );
    Ok(())
}

#[test]
fn test_find_documents() -> anyhow::Result<()> {
    let mock = MockHttpSend::reply(
        200,
        "<documents><document><web_id>a</web_id></document><document><web_id>b</web_id><excerpt>Hello</excerpt></document></documents>",
    );
    let client = client(&mock, &RecordingSleep::default());

    let docs = client.find_documents(&Options::new().with("limit", 2))?;
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].id(), "a");
    assert_eq!(docs[1].id(), "b");
    assert_eq!(docs[1].excerpt(), Some("Hello"));

    assert_eq!(
        mock.requests()[0].uri,
        "http://vuzit.test/documents.xml?limit=2&method=index&key=pubkey&timestamp=1234567890&signature=VUkebd25GaC9kUfDvz0Xop1xkrA%3D&"
    );
    Ok(())
}

#[test]
fn test_find_documents_empty_list() -> anyhow::Result<()> {
    let mock = MockHttpSend::reply(200, "<documents></documents>");
    let client = client(&mock, &RecordingSleep::default());

    assert!(client.find_documents(&Options::new())?.is_empty());
    Ok(())
}

#[test]
fn test_find_documents_encodes_option_keys() -> anyhow::Result<()> {
    let mock = MockHttpSend::reply(200, "<documents></documents>");
    let client = client(&mock, &RecordingSleep::default());

    client.find_documents(&Options::new().with("sort by", "title"))?;
    assert_eq!(mock.requests().len(), 1);
    assert_eq!(
        mock.requests()[0].uri,
        "http://vuzit.test/documents.xml?sort+by=title&method=index&key=pubkey&timestamp=1234567890&signature=VUkebd25GaC9kUfDvz0Xop1xkrA%3D&"
    );
    Ok(())
}

#[test]
fn test_destroy() -> anyhow::Result<()> {
    let mock = MockHttpSend::reply(200, "");
    let client = client(&mock, &RecordingSleep::default());

    client.destroy_document("doc123")?;

    let req = &mock.requests()[0];
    assert_eq!(req.method, Method::DELETE);
    assert_eq!(
        req.uri,
        "http://vuzit.test/documents/doc123.xml?method=destroy&key=pubkey&timestamp=1234567890&signature=kRGRzAWlM2X%2BGbSnx85jHttWL9M%3D&"
    );
    Ok(())
}

#[test]
fn test_destroy_not_found() {
    let mock = MockHttpSend::reply(422, "<document><code>422</code><msg>Document not found</msg></document>");
    let client = client(&mock, &RecordingSleep::default());

    let err = client.destroy_document("doc123").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.code(), 422);
    assert_eq!(err.message(), "Document not found");
}

#[test]
fn test_destroy_unknown_error_keeps_status() {
    let mock = MockHttpSend::reply(500, "");
    let client = client(&mock, &RecordingSleep::default());

    let err = client.destroy_document("doc123").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.code(), 500);
    assert_eq!(err.message(), "Unknown error occurred Internal Server Error");
}

#[test]
fn test_destroy_malformed_error_body() {
    let mock = MockHttpSend::reply(500, "<document><code>500</document>");
    let client = client(&mock, &RecordingSleep::default());

    let err = client.destroy_document("doc123").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::XmlParse);
    assert_eq!(err.code(), 0);
}

#[test]
fn test_download_url_is_absolute_and_offline() -> anyhow::Result<()> {
    let mock = MockHttpSend::reply(500, "");
    let client = client(&mock, &RecordingSleep::default());

    let url = client.document_download_url("doc123", "pdf")?;
    assert_eq!(
        url,
        "http://vuzit.test/documents/doc123.pdf?method=show&key=pubkey&timestamp=1234567890&signature=KuqLVkEAOS5%2Bd4Mm7paE%2BJ8VgJ0%3D&"
    );
    assert!(mock.requests().is_empty());
    Ok(())
}

#[test]
fn test_empty_id_sends_nothing() {
    let mock = MockHttpSend::reply(200, DOCUMENT);
    let client = client(&mock, &RecordingSleep::default());

    for err in [
        client.find_document("", &Options::new()).unwrap_err(),
        client.destroy_document(" ").unwrap_err(),
        client.document_download_url("", "pdf").unwrap_err(),
    ] {
        assert_eq!(err.kind(), ErrorKind::ArgumentInvalid);
    }
    assert!(mock.requests().is_empty());
}
