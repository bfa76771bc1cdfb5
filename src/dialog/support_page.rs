use std::sync::{Arc, Mutex};

use maud::{html, Markup};

use super::{lock, Callback, Mount};
use crate::{
  api::{SupportPage, SupportPageApi},
  auth::SessionCache,
  sanitize::{self, Sanitize},
};

pub const LOAD_ERROR: &str = "Failed to load support page info";
pub const SAVE_ERROR: &str = "Failed to save changes";

#[derive(Default, Debug)]
struct State {
  open: bool,
  support_page_header: String,
  support_page_intro: String,
  loading: bool,
  error: Option<String>,
}

struct Inner {
  api: SupportPageApi,
  sessions: SessionCache,
  on_save: Callback,
  on_close: Callback,
  mount: Mount,
  state: Mutex<State>,
}

/// Editor for the support page header and intro.
#[derive(Clone)]
pub struct SupportPageDialog {
  inner: Arc<Inner>,
}

impl SupportPageDialog {
  pub fn new(
    api: SupportPageApi,
    sessions: SessionCache,
    on_save: impl Fn() + Send + Sync + 'static,
    on_close: impl Fn() + Send + Sync + 'static,
  ) -> Self {
    Self {
      inner: Arc::new(Inner {
        api,
        sessions,
        on_save: Box::new(on_save),
        on_close: Box::new(on_close),
        mount: Mount::new(),
        state: Mutex::new(State::default()),
      }),
    }
  }

  /// Opening a closed dialog reloads the fields from the backend.
  pub async fn set_open(&self, open: bool) {
    let opened = {
      let mut state = lock(&self.inner.state);
      let was_open = state.open;
      state.open = open;
      open && !was_open
    };

    if opened {
      self.fetch_support_page_info().await;
    }
  }

  async fn fetch_support_page_info(&self) {
    let result = self.inner.api.get_support_page_data().await;

    if !self.inner.mount.is_mounted() {
      return;
    }

    let mut state = lock(&self.inner.state);
    match result {
      Ok(page) => {
        let page = page.sanitized();
        state.support_page_header = page.support_page_header;
        state.support_page_intro = page.support_page_intro;
        state.error = None;
      },
      Err(err) => {
        log::warn!("Failed to load support page: {}", err);
        state.error = Some(LOAD_ERROR.to_string());
      },
    }
  }

  pub fn set_support_page_header(&self, value: impl Into<String>) {
    lock(&self.inner.state).support_page_header = value.into();
  }

  pub fn set_support_page_intro(&self, value: impl Into<String>) {
    lock(&self.inner.state).support_page_intro = value.into();
  }

  /// Ignored while a save is already running. The user id comes from the
  /// session as it is when saving, not when the dialog was built.
  pub async fn save(&self) {
    let mut payload = {
      let mut state = lock(&self.inner.state);
      if state.loading {
        return;
      }
      state.loading = true;

      SupportPage {
        support_page_header: sanitize::clean(&state.support_page_header),
        support_page_intro: sanitize::clean(&state.support_page_intro),
        user_id: None,
      }
    };
    payload.user_id = self.inner.sessions.current().await.user_id();

    let result = self.inner.api.edit_support_page_data(&payload).await;

    if !self.inner.mount.is_mounted() {
      return;
    }

    match result {
      Ok(_) => {
        lock(&self.inner.state).loading = false;
        (self.inner.on_save)();
        self.close();
      },
      Err(err) => {
        log::error!("Failed to update support page: {}", err);
        let mut state = lock(&self.inner.state);
        state.error = Some(SAVE_ERROR.to_string());
        state.loading = false;
      },
    }
  }

  /// Ignored while saving.
  pub fn cancel(&self) {
    if lock(&self.inner.state).loading {
      return;
    }

    self.close();
  }

  fn close(&self) {
    lock(&self.inner.state).open = false;
    (self.inner.on_close)();
  }

  pub fn unmount(&self) {
    self.inner.mount.unmount();
  }

  pub fn is_open(&self) -> bool {
    lock(&self.inner.state).open
  }

  pub fn is_loading(&self) -> bool {
    lock(&self.inner.state).loading
  }

  pub fn error(&self) -> Option<String> {
    lock(&self.inner.state).error.clone()
  }

  pub fn support_page_header(&self) -> String {
    lock(&self.inner.state).support_page_header.clone()
  }

  pub fn support_page_intro(&self) -> String {
    lock(&self.inner.state).support_page_intro.clone()
  }

  pub fn render(&self) -> Markup {
    let state = lock(&self.inner.state);

    if !state.open {
      return html! {};
    }

    html! {
      .dialog #edit-support-page {
        h2 .dialog-title { "Edit Support Page" }

        .dialog-content {
          @if let Some(error) = &state.error {
            .error style="color: red" { (error) }
          }

          label {
            span { "Support Page Header" }
            input type="text" name="supportPageHeader" value=(state.support_page_header);
          }

          label {
            span { "Support Page Introduction" }
            textarea name="supportPageIntro" rows="3" { (state.support_page_intro) }
          }
        }

        .dialog-actions {
          button #cancel disabled[state.loading] { "Cancel" }
          button #save .primary disabled[state.loading] {
            @if state.loading { "Saving..." } @else { "Save" }
          }
        }
      }
    }
  }
}
