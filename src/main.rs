use std::sync::Arc;

use supportsite::{
  client::HttpClient,
  config::{Args, Config},
  route::{self, State},
};

#[tokio::main]
async fn main() -> Result<(), eyre::Report> {
  color_eyre::install()?;
  pretty_env_logger::try_init()?;

  let args = Args::parse();

  let mut config = Config::load(&args.config).await?;

  // We make the directory, so we can canonicalize it!
  tokio::fs::create_dir_all(&config.static_directory).await?;

  config.canonicalize()?;

  let client = HttpClient::new(&config.api)?;
  log::info!("using backend at {}", client.base_url());
  log::info!("session checks are cached for {}s", config.session_ttl_secs);

  let config = Arc::new(config);
  let listen_on = config.listen_on;
  let state = Arc::new(State::new(config, client));

  let app = route::router(state);

  log::info!("listening on {}", listen_on);
  axum::Server::bind(&listen_on)
    .serve(app.into_make_service())
    .await?;

  Ok(())
}
