//! Server-side rendering of the public pages.

use std::{path::Path, sync::Arc};

use axum::{
  extract::Extension,
  http::{header, StatusCode, Uri},
  response::{Html, IntoResponse, Response},
  routing::get,
  Router,
};
use maud::html;

use crate::{
  api::{AboutMeApi, SupportOrgApi, SupportPageApi},
  auth::{AuthApi, SessionCache},
  client::HttpClient,
  config::Config,
  dialog::{SupportOrgListDialog, SupportPageDialog},
  error::Error,
  sanitize::Sanitize,
  template::Template,
  view::{AboutMeCard, SupportPageView},
};

pub struct State {
  pub config: Arc<Config>,
  pub about_me: AboutMeApi,
  pub support_page: SupportPageApi,
  pub support_orgs: SupportOrgApi,
  /// Shared by every controller built from this state.
  pub sessions: SessionCache,
}

impl State {
  pub fn new(config: Arc<Config>, client: HttpClient) -> Self {
    let sessions = SessionCache::new(AuthApi::new(client.clone()), config.session_ttl());

    Self {
      config,
      about_me: AboutMeApi::new(client.clone()),
      support_page: SupportPageApi::new(client.clone()),
      support_orgs: SupportOrgApi::new(client),
      sessions,
    }
  }

  pub fn support_org_list(&self) -> SupportOrgListDialog {
    SupportOrgListDialog::new(self.support_orgs.clone(), self.sessions.clone())
  }

  pub fn support_page_dialog(
    &self,
    on_save: impl Fn() + Send + Sync + 'static,
    on_close: impl Fn() + Send + Sync + 'static,
  ) -> SupportPageDialog {
    SupportPageDialog::new(
      self.support_page.clone(),
      self.sessions.clone(),
      on_save,
      on_close,
    )
  }
}

/// A backend failure, shown to the visitor as a 502 page.
#[derive(Debug)]
pub struct PageError(Error);

impl From<Error> for PageError {
  fn from(err: Error) -> Self {
    Self(err)
  }
}

impl IntoResponse for PageError {
  fn into_response(self) -> Response {
    match self.0.status() {
      Some(status) => log::error!("Backend answered {}: {}", status, self.0),
      None => log::error!("{}", self.0),
    }

    let page = Template::new()
      .title("Error")
      .content(html! {
        .error { "The site backend could not be reached, sorry!" }
        pre { (self.0) }
      })
      .render();

    (StatusCode::BAD_GATEWAY, page).into_response()
  }
}

pub fn router(state: Arc<State>) -> Router {
  Router::new()
    .route("/", get(about_me_handler))
    .route("/support", get(support_handler))
    .fallback(get(static_handler))
    .layer(Extension(state))
}

pub async fn about_me_handler(
  Extension(state): Extension<Arc<State>>,
) -> Result<Html<String>, PageError> {
  let about_me = state.about_me.get_about_me().await?.sanitized();

  Ok(
    Template::new()
      .title("About Me")
      .content(AboutMeCard(&about_me))
      .render(),
  )
}

pub async fn support_handler(
  Extension(state): Extension<Arc<State>>,
) -> Result<Html<String>, PageError> {
  let page = state.support_page.get_support_page_data().await?.sanitized();

  Ok(
    Template::new()
      .title("Support")
      .content(SupportPageView(&page))
      .render(),
  )
}

async fn static_handler(uri: Uri, Extension(state): Extension<Arc<State>>) -> Response {
  let path = uri.path().trim_start_matches('/');
  let root = &state.config.static_directory;

  // Anything that resolves outside the static directory is a 404 too.
  let file = match root.join(path).canonicalize() {
    Ok(file) if file.starts_with(root) && file.is_file() => file,
    _ => return (StatusCode::NOT_FOUND, "Not found").into_response(),
  };

  serve_file(&file).await
}

async fn serve_file(path: &Path) -> Response {
  let mime = mime_guess::from_path(path).first_or_text_plain();

  match tokio::fs::read(path).await {
    Ok(file) => (
      [(header::CONTENT_TYPE, mime.essence_str().to_string())],
      file,
    )
      .into_response(),
    Err(err) => {
      log::error!("Couldn't read {}: {}", path.display(), err);
      (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
    },
  }
}
