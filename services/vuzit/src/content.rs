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

use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use vuzit_core::{Error, Result};

/// Source of an upload.
pub enum ContentSource {
    /// A file on disk.
    FromPath(PathBuf),
    /// An already open readable stream.
    FromStream {
        /// File name sent to the service, its extension selects the
        /// content type.
        name: String,
        /// Size in bytes, if known before reading.
        size: Option<u64>,
        /// The stream, read to its end once.
        reader: Box<dyn Read + Send>,
    },
}

impl ContentSource {
    /// Upload the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        ContentSource::FromPath(path.as_ref().to_path_buf())
    }

    /// Upload the content of `reader` under the file name `name`.
    pub fn from_reader(name: impl Into<String>, reader: impl Read + Send + 'static) -> Self {
        ContentSource::FromStream {
            name: name.into(),
            size: None,
            reader: Box::new(reader),
        }
    }

    /// Upload in-memory content under the file name `name`.
    pub fn from_bytes(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let content = content.into();
        ContentSource::FromStream {
            name: name.into(),
            size: Some(content.len() as u64),
            reader: Box::new(std::io::Cursor::new(content)),
        }
    }

    /// File name sent to the service, without directories.
    pub fn name(&self) -> Result<String> {
        let name = match self {
            ContentSource::FromPath(path) => path
                .file_name()
                .map(|v| v.to_string_lossy().to_string())
                .unwrap_or_default(),
            ContentSource::FromStream { name, .. } => Path::new(name)
                .file_name()
                .map(|v| v.to_string_lossy().to_string())
                .unwrap_or_default(),
        };

        if name.is_empty() {
            return Err(Error::argument_invalid("upload source has no file name")
                .with_context(format!("source: {self:?}")));
        }
        Ok(name)
    }

    /// Size in bytes, `None` for a stream of unknown size.
    pub fn size(&self) -> Result<Option<u64>> {
        match self {
            ContentSource::FromPath(path) => {
                let meta = std::fs::metadata(path).map_err(|e| not_found(path).with_source(e))?;
                if !meta.is_file() {
                    return Err(not_found(path));
                }
                Ok(Some(meta.len()))
            }
            ContentSource::FromStream { size, .. } => Ok(*size),
        }
    }

    /// Read the whole content.
    pub fn read(self) -> Result<Vec<u8>> {
        match self {
            ContentSource::FromPath(path) => {
                let mut file = File::open(&path).map_err(|e| not_found(&path).with_source(e))?;
                let mut buf = Vec::new();
                file.read_to_end(&mut buf).map_err(|e| {
                    Error::argument_invalid(format!("The file could not be read: {}", path.display()))
                        .with_source(e)
                })?;
                Ok(buf)
            }
            ContentSource::FromStream { name, mut reader, size } => {
                let mut buf = Vec::with_capacity(size.unwrap_or_default() as usize);
                reader.read_to_end(&mut buf).map_err(|e| {
                    Error::argument_invalid(format!("The stream could not be read: {name}"))
                        .with_source(e)
                })?;
                Ok(buf)
            }
        }
    }
}

fn not_found(path: &Path) -> Error {
    Error::argument_invalid(format!("The file could not be found: {}", path.display()))
}

impl Debug for ContentSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSource::FromPath(path) => f.debug_tuple("FromPath").field(path).finish(),
            ContentSource::FromStream { name, size, .. } => f
                .debug_struct("FromStream")
                .field("name", name)
                .field("size", size)
                .finish_non_exhaustive(),
        }
    }
}
