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

use http::{Method, StatusCode};
use log::debug;
use serde::Deserialize;
use vuzit_core::{Error, ErrorKind, Result};

use crate::client::{require_id, Client};
use crate::constants::*;
use crate::content::ContentSource;
use crate::decode::{decode, lenient_int, service_error, UNKNOWN_ERROR};
use crate::multipart::MultipartEncoder;
use crate::params::Options;
use crate::request::{
    absolute_url, build_multipart_request, path_and_query, resource_path, signed_params,
};

const RESOURCE: &str = "documents";
const UNSET: i64 = -1;

/// A document hosted by the service.
///
/// Integer fields are `-1` until the service reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: String,
    title: Option<String>,
    subject: Option<String>,
    page_count: i64,
    page_width: i64,
    page_height: i64,
    file_size: i64,
    status: i64,
    excerpt: Option<String>,
}

impl Document {
    fn with_id(id: String) -> Self {
        Self {
            id,
            title: None,
            subject: None,
            page_count: UNSET,
            page_width: UNSET,
            page_height: UNSET,
            file_size: UNSET,
            status: UNSET,
            excerpt: None,
        }
    }

    fn from_xml(v: DocumentXml) -> Result<Self> {
        let id = v.web_id.ok_or_else(|| Error::missing_data(UNKNOWN_ERROR))?;

        Ok(Self {
            id,
            title: v.title,
            subject: v.subject,
            page_count: v.page_count.unwrap_or(UNSET),
            page_width: v.width.unwrap_or(UNSET),
            page_height: v.height.unwrap_or(UNSET),
            file_size: v.file_size.unwrap_or(UNSET),
            status: v.status.unwrap_or(UNSET),
            excerpt: v.excerpt,
        })
    }

    /// The web id assigned by the service.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Document title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Document subject.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Number of pages.
    pub fn page_count(&self) -> i64 {
        self.page_count
    }

    /// Page width in pixels.
    pub fn page_width(&self) -> i64 {
        self.page_width
    }

    /// Page height in pixels.
    pub fn page_height(&self) -> i64 {
        self.page_height
    }

    /// Size of the original file in bytes.
    pub fn file_size(&self) -> i64 {
        self.file_size
    }

    /// Processing status.
    pub fn status(&self) -> i64 {
        self.status
    }

    /// Text excerpt, present when asked for through options.
    pub fn excerpt(&self) -> Option<&str> {
        self.excerpt.as_deref()
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct DocumentXml {
    web_id: Option<String>,
    title: Option<String>,
    subject: Option<String>,
    #[serde(deserialize_with = "lenient_int")]
    page_count: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    width: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    height: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    file_size: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    status: Option<i64>,
    excerpt: Option<String>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct DocumentList {
    #[serde(rename = "document")]
    documents: Vec<DocumentXml>,
}

/// Options of [`Client::upload_document`].
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Restrict public access to the document, `true` by default.
    pub secure: bool,
    /// Override the type the service infers from the file name.
    pub file_type: Option<String>,
    /// Extra fields sent as is after cleaning.
    pub options: Options,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            secure: true,
            file_type: None,
            options: Options::new(),
        }
    }
}

impl UploadOptions {
    /// Set the secure flag.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the file type.
    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }

    /// Set extra fields.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    fn to_options(&self) -> Options {
        let mut options = self.options.clone();
        options.set(PARAM_FORMAT, DEFAULT_EXTENSION);
        options.set(PARAM_SECURE, self.secure);
        options.set(PARAM_FILE_TYPE, self.file_type.clone());
        options
    }
}

impl Client {
    /// Upload a document.
    ///
    /// The returned document only carries the id, use
    /// [`Client::find_document`] to load the rest.
    pub fn upload_document(
        &self,
        source: ContentSource,
        options: &UploadOptions,
    ) -> Result<Document> {
        let req = self.signed_request(METHOD_CREATE, None);
        let params = signed_params(self.config(), &req, &options.to_options())?;

        let filename = source.name()?;
        let size = source.size()?;
        debug!("uploading {filename} ({} bytes)", size.map_or(-1, |v| v as i64));
        let content = source.read()?;

        let mut encoder = MultipartEncoder::new();
        for (k, v) in params.iter() {
            encoder.text(k, v);
        }
        encoder.file(PARAM_UPLOAD, &filename, &content);
        let (content_type, body) = encoder.finish();

        let path = resource_path(RESOURCE, None, "");
        let req = build_multipart_request(self.config(), &path, &content_type, body)?;
        let resp = self.send(req)?;
        debug!("upload responded {}", resp.status());

        let created: DocumentXml = decode(resp.body(), self.config().debug)?;
        let id = created
            .web_id
            .ok_or_else(|| Error::missing_data(UNKNOWN_ERROR))?;
        Ok(Document::with_id(id))
    }

    /// Load a document by id.
    ///
    /// `options` is passed through, for example `included_pages` together
    /// with an excerpt request.
    pub fn find_document(&self, id: &str, options: &Options) -> Result<Document> {
        let id = require_id(id, "document id")?;

        let req = self.signed_request(METHOD_SHOW, Some(id));
        let path = resource_path(RESOURCE, Some(id), DEFAULT_EXTENSION);
        let resp = self.send_query(Method::GET, &path, &req, options)?;

        Document::from_xml(decode(resp.body(), self.config().debug)?)
    }

    /// List documents, filtered and paginated by `options`.
    pub fn find_documents(&self, options: &Options) -> Result<Vec<Document>> {
        let req = self.signed_request(METHOD_INDEX, None);
        let path = resource_path(RESOURCE, None, DEFAULT_EXTENSION);
        let resp = self.send_query(Method::GET, &path, &req, options)?;

        let list: DocumentList = decode(resp.body(), self.config().debug)?;
        list.documents.into_iter().map(Document::from_xml).collect()
    }

    /// Delete a document.
    ///
    /// A body carrying a service error always fails with it. Otherwise any
    /// status other than `200` is an unknown error with the http status as
    /// code.
    pub fn destroy_document(&self, id: &str) -> Result<()> {
        let id = require_id(id, "document id")?;

        let req = self.signed_request(METHOD_DESTROY, Some(id));
        let path = resource_path(RESOURCE, Some(id), DEFAULT_EXTENSION);
        let resp = self.send_query(Method::DELETE, &path, &req, &Options::new())?;

        let status = resp.status();
        if self.config().debug {
            debug!("destroy responded {status}");
        }
        if status == StatusCode::OK {
            // The body of a successful delete is not needed, but it may still
            // be an error envelope.
            return match service_error(resp.body()).ok().flatten() {
                Some(err) => Err(err),
                None => Ok(()),
            };
        }

        if let Some(err) = service_error(resp.body())? {
            return Err(err);
        }

        let message = match status.canonical_reason() {
            Some(reason) => format!("{UNKNOWN_ERROR} {reason}"),
            None => UNKNOWN_ERROR.to_string(),
        };
        Err(Error::new(ErrorKind::Server, message).with_code(i64::from(status.as_u16())))
    }

    /// Build the signed download url of a document, for example with
    /// extension `pdf`.
    ///
    /// This only builds the url, nothing is sent.
    pub fn document_download_url(&self, id: &str, extension: &str) -> Result<String> {
        let id = require_id(id, "document id")?;

        let req = self.signed_request(METHOD_SHOW, Some(id));
        let params = signed_params(self.config(), &req, &Options::new())?;
        let path = resource_path(RESOURCE, Some(id), extension);
        Ok(absolute_url(self.config(), &path_and_query(&path, &params)))
    }
}
