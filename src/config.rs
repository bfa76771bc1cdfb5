use std::{
  net::SocketAddr,
  path::{Path, PathBuf},
};

use crate::client::ClientConfig;

pub const DEFAULT_SESSION_TTL_SECS: i64 = 60;

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
  /// Path to the config file (`.ron` or `.toml`)
  #[clap(short, long)]
  pub config: PathBuf,
}

impl Args {
  pub fn parse() -> Self {
    <Self as clap::Parser>::parse()
  }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Ron(#[from] ron::Error),
  #[error(transparent)]
  Toml(#[from] toml::de::Error),
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct Config {
  pub listen_on: SocketAddr,
  #[serde(default)]
  pub api: ClientConfig,
  pub static_directory: PathBuf,
  #[serde(default = "default_session_ttl")]
  pub session_ttl_secs: i64,
}

fn default_session_ttl() -> i64 {
  DEFAULT_SESSION_TTL_SECS
}

impl Config {
  pub async fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await?;

    let is_toml = path
      .extension()
      .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
      Self::from_toml(&contents)
    } else {
      Self::from_ron(&contents)
    }
  }

  pub fn from_ron(contents: &str) -> Result<Self, Error> {
    Ok(ron::from_str(contents)?)
  }

  pub fn from_toml(contents: &str) -> Result<Self, Error> {
    Ok(toml::from_str(contents)?)
  }

  pub fn canonicalize(&mut self) -> Result<(), Error> {
    self.static_directory = self.static_directory.canonicalize()?;

    Ok(())
  }

  pub fn session_ttl(&self) -> time::Duration {
    time::Duration::seconds(self.session_ttl_secs)
  }
}
