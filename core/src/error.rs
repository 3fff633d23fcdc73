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

use std::fmt;
use thiserror::Error;

/// The error type for every vuzit operation.
///
/// Service-reported failures keep the code and message from the response
/// verbatim. Locally synthesized failures use code `0`.
#[derive(Error)]
#[error("[{code}]: {message}")]
pub struct Error {
    kind: ErrorKind,
    code: i64,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
    context: Vec<String>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Public or private key is unset
    ConfigInvalid,

    /// Caller input is invalid (missing file, empty id, etc.)
    ArgumentInvalid,

    /// Network or connection failure after all attempts
    Transport,

    /// Response body is not well-formed XML
    XmlParse,

    /// Error envelope reported by the service
    Server,

    /// Well-formed response lacking the expected data
    MissingData,

    /// Unexpected errors (malformed urls, I/O, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: 0,
            message: message.into(),
            source: None,
            context: Vec::new(),
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the error code.
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    /// Add a line of context, shown by `Debug`.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error code, `0` for locally synthesized errors.
    pub fn code(&self) -> i64 {
        self.code
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context lines.
    pub fn context(&self) -> &[String] {
        &self.context
    }

    /// Check if this error is worth another attempt.
    ///
    /// Only transport failures are retried; a parseable response never is.
    pub fn is_retryable(&self) -> bool {
        self.kind == ErrorKind::Transport
    }
}

// Convenience constructors
impl Error {
    /// Create a configuration error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an argument error
    pub fn argument_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArgumentInvalid, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create an xml parse error, the message becomes `XML error: <cause>`.
    pub fn xml_parse(cause: impl fmt::Display) -> Self {
        Self::new(ErrorKind::XmlParse, format!("XML error: {cause}"))
    }

    /// Create a service-reported error
    pub fn server(code: i64, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Server, message).with_code(code)
    }

    /// Create a missing data error
    pub fn missing_data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingData, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]: {}", self.kind, self.kind_name(), self.code, self.message)?;
        for line in &self.context {
            write!(f, "\n    {line}")?;
        }
        if let Some(source) = &self.source {
            write!(f, "\nsource: {source:?}")?;
        }
        Ok(())
    }
}

impl Error {
    fn kind_name(&self) -> &'static str {
        match self.kind {
            ErrorKind::ConfigInvalid => "ConfigInvalid",
            ErrorKind::ArgumentInvalid => "ArgumentInvalid",
            ErrorKind::Transport => "Transport",
            ErrorKind::XmlParse => "XmlParse",
            ErrorKind::Server => "Server",
            ErrorKind::MissingData => "MissingData",
            ErrorKind::Unexpected => "Unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::ArgumentInvalid => write!(f, "invalid argument"),
            ErrorKind::Transport => write!(f, "transport failure"),
            ErrorKind::XmlParse => write!(f, "malformed response"),
            ErrorKind::Server => write!(f, "service error"),
            ErrorKind::MissingData => write!(f, "missing response data"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
