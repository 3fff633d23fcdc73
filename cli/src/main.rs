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

//! Command line interface for the vuzit document hosting service.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use log::debug;
use vuzit::{Client, Config, ContentSource, Document, Error, Options, UploadOptions};
use vuzit_core::{Context, OsEnv};
use vuzit_http_send_reqwest::ReqwestHttpSend;

/// VuzitCLI - Command line interface
#[derive(Parser, Debug)]
#[command(name = "vuzitcli")]
#[command(version)]
pub struct Args {
    /// Public key, required
    #[arg(short = 'k', long, value_name = "KEY", env = "VUZIT_PUBLIC_KEY")]
    pub public_key: Option<String>,

    /// Private key, required
    #[arg(short = 'p', long, value_name = "KEY", env = "VUZIT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// File to upload
    #[arg(short, long, value_name = "PATH")]
    pub upload: Option<PathBuf>,

    /// File should be secure? (yes/no)
    #[arg(short, long, value_name = "yes/no", default_value = "yes")]
    pub secure: String,

    /// ID of the file to view
    #[arg(short, long, value_name = "ID")]
    pub load: Option<String>,

    /// ID of the file to delete
    #[arg(short, long, value_name = "ID")]
    pub delete: Option<String>,

    /// Prints more messages
    #[arg(short, long)]
    pub verbose: bool,

    /// Base url of the service
    #[arg(long, value_name = "URL", env = "VUZIT_SERVICE_URL")]
    pub service_url: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,
}

impl Args {
    /// Only an explicit `no` turns the secure flag off.
    pub fn is_secure(&self) -> bool {
        self.secure != "no"
    }

    /// Build the client config, printing an error and returning `None` when
    /// a key is missing.
    pub fn config(&self, ctx: &Context, out: &mut impl Write) -> io::Result<Option<Config>> {
        let Some(public_key) = self.public_key.as_deref().filter(|v| !v.is_empty()) else {
            writeln!(out, "ERROR: Public key is required")?;
            return Ok(None);
        };
        let Some(private_key) = self.private_key.as_deref().filter(|v| !v.is_empty()) else {
            writeln!(out, "ERROR: Private key is required")?;
            return Ok(None);
        };

        let mut config = Config::new()
            .with_public_key(public_key)
            .with_private_key(private_key)
            .with_debug(self.verbose)
            .with_accept_invalid_certs(self.insecure);
        if let Some(url) = &self.service_url {
            config = config.with_service_url(url);
        }
        Ok(Some(config.from_env(ctx)))
    }
}

/// Run the selected operation, printing the outcome to `out`.
///
/// Service failures are printed, only a failing `out` is returned as error.
pub fn run(args: &Args, client: &Client, out: &mut impl Write) -> io::Result<()> {
    if let Some(id) = &args.load {
        match client.find_document(id, &Options::new()) {
            Ok(doc) => print_document(out, &doc),
            Err(err) => print_error(out, &err),
        }
    } else if let Some(id) = &args.delete {
        match client.destroy_document(id) {
            Ok(()) => writeln!(out, "DELETED: {id}"),
            Err(err) => print_error(out, &err),
        }
    } else if let Some(path) = &args.upload {
        let options = UploadOptions::default().with_secure(args.is_secure());
        match client.upload_document(ContentSource::from_path(path), &options) {
            Ok(doc) => writeln!(out, "UPLOADED: {}", doc.id()),
            Err(err) => print_error(out, &err),
        }
    } else {
        writeln!(out)?;
        writeln!(out, "Please select an option")
    }
}

fn print_document(out: &mut impl Write, doc: &Document) -> io::Result<()> {
    writeln!(out, "Document")?;
    writeln!(out, "  id: {}", doc.id())?;
    writeln!(out, "  title: {}", doc.title().unwrap_or_default())?;
    writeln!(out, "  subject: {}", doc.subject().unwrap_or_default())?;
    writeln!(out, "  # of pages: {}", doc.page_count())?;
    writeln!(out, "  page width: {}", doc.page_width())?;
    writeln!(out, "  page height: {}", doc.page_height())?;
    writeln!(out, "  file size: {}", doc.file_size())
}

fn print_error(out: &mut impl Write, err: &Error) -> io::Result<()> {
    debug!("operation failed: {err:?}");
    writeln!(out, "Error occurred: {}, {}", err.code(), err.message())
}

fn main() -> anyhow::Result<()> {
    if std::env::args_os().len() <= 1 {
        Args::command().print_help()?;
        return Ok(());
    }

    let args = Args::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "warn" }),
    )
    .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let ctx = Context::new().with_env(OsEnv);
    let Some(config) = args.config(&ctx, &mut out)? else {
        return Ok(());
    };

    let http = ReqwestHttpSend::builder()
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .user_agent(config.user_agent.clone())
        .build()?;
    let client = Client::new(ctx.with_http_send(http), config);

    run(&args, &client, &mut out)?;
    Ok(())
}
