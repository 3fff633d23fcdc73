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

use std::time::Duration;

// Env values used by the vuzit client.
pub const VUZIT_PUBLIC_KEY: &str = "VUZIT_PUBLIC_KEY";
pub const VUZIT_PRIVATE_KEY: &str = "VUZIT_PRIVATE_KEY";
pub const VUZIT_SERVICE_URL: &str = "VUZIT_SERVICE_URL";
pub const VUZIT_DEBUG: &str = "VUZIT_DEBUG";
pub const VUZIT_ACCEPT_INVALID_CERTS: &str = "VUZIT_ACCEPT_INVALID_CERTS";

/// Service url used when none is configured.
pub const DEFAULT_SERVICE_URL: &str = "http://vuzit.com";

/// Extension of every api response.
pub const DEFAULT_EXTENSION: &str = "xml";

// Remote methods, they are part of the signed message.
pub const METHOD_CREATE: &str = "create";
pub const METHOD_SHOW: &str = "show";
pub const METHOD_INDEX: &str = "index";
pub const METHOD_DESTROY: &str = "destroy";

// Standard request parameters.
pub const PARAM_METHOD: &str = "method";
pub const PARAM_KEY: &str = "key";
pub const PARAM_TIMESTAMP: &str = "timestamp";
pub const PARAM_SIGNATURE: &str = "signature";
pub const PARAM_FORMAT: &str = "format";
pub const PARAM_SECURE: &str = "secure";
pub const PARAM_FILE_TYPE: &str = "file_type";
pub const PARAM_WEB_ID: &str = "web_id";
pub const PARAM_UPLOAD: &str = "upload";

/// Processing a document may be slow, keep the connection open.
pub const READ_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Multipart bodies above this size get [`LARGE_UPLOAD_READ_TIMEOUT`].
pub const LARGE_UPLOAD_THRESHOLD: usize = 3 * 1024 * 1024;
pub const LARGE_UPLOAD_READ_TIMEOUT: Duration = Duration::from_secs(60 * 60);
