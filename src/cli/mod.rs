use std::path::PathBuf;

use clap::Parser;

use crate::api::client::DEFAULT_API_URL;
use crate::models::DEFAULT_COUNTRY;

pub mod import;

pub use import::{import_all, run_import, ImportSummary};

pub const DEFAULT_EMAIL: &str = "admin@projectcosi.org";

#[derive(Parser)]
#[command(name = "cosi-import")]
#[command(about = "Replay people and group exports into a COSI record service")]
#[command(version)]
pub struct Cli {
    /// People export (CSV)
    #[arg(long, default_value = "people.csv")]
    pub people: PathBuf,

    /// Group membership export (CSV)
    #[arg(long, default_value = "groups.csv")]
    pub groups: PathBuf,

    /// Base URL of the COSI service
    #[arg(long, env = "COSI_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, env = "COSI_EMAIL", default_value = DEFAULT_EMAIL)]
    pub email: String,

    #[arg(long, env = "COSI_PASSWORD", default_value = "admin", hide_env_values = true)]
    pub password: String,

    /// Country written on every imported address
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// Character encoding of both exports
    #[arg(long, default_value = "iso-8859-1")]
    pub encoding: String,

    /// Run against an in-memory store instead of the service
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}
