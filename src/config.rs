//! Run configuration resolved from the command line and environment.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use encoding_rs::Encoding;

use crate::api::Credentials;
use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub people_path: PathBuf,
    pub groups_path: PathBuf,
    pub api_url: String,
    pub credentials: Credentials,
    pub country: String,
    pub encoding: &'static Encoding,
    pub dry_run: bool,
}

impl ImportConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let encoding = Encoding::for_label(cli.encoding.as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding: {}", cli.encoding))?;

        Ok(Self {
            people_path: cli.people.clone(),
            groups_path: cli.groups.clone(),
            api_url: cli.api_url.clone(),
            credentials: Credentials {
                email: cli.email.clone(),
                password: cli.password.clone(),
            },
            country: cli.country.clone(),
            encoding,
            dry_run: cli.dry_run,
        })
    }
}
