use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use maud::{html, Markup};

use super::{lock, Mount};
use crate::{
  api::{SupportOrg, SupportOrgApi},
  sanitize,
};

pub const SAVE_ERROR: &str = "Failed to save organization";

/// Whoever opened a [`SupportOrgDialog`] and wants to hear how it ended.
#[async_trait]
pub trait OrgDialogListener: Send + Sync {
  /// The org was stored; the listener refreshes and closes the editor.
  async fn on_save_org(&self);

  fn on_close_dialog(&self);
}

#[derive(Default, Debug)]
struct State {
  support_org_name: String,
  support_org_description: String,
  saving: bool,
  error: Option<String>,
}

struct Inner {
  api: SupportOrgApi,
  existing: Option<SupportOrg>,
  user_id: Option<i64>,
  listener: Arc<dyn OrgDialogListener>,
  mount: Mount,
  state: Mutex<State>,
}

/// Create/edit form for one support org. Built when it is opened and dropped
/// when it closes.
#[derive(Clone)]
pub struct SupportOrgDialog {
  inner: Arc<Inner>,
}

impl SupportOrgDialog {
  pub fn new(
    api: SupportOrgApi,
    existing: Option<SupportOrg>,
    user_id: Option<i64>,
    listener: Arc<dyn OrgDialogListener>,
  ) -> Self {
    let state = match &existing {
      Some(org) => State {
        support_org_name: org.support_org_name.clone(),
        support_org_description: org.support_org_description.clone(),
        ..State::default()
      },
      None => State::default(),
    };

    Self {
      inner: Arc::new(Inner {
        api,
        existing,
        user_id,
        listener,
        mount: Mount::new(),
        state: Mutex::new(state),
      }),
    }
  }

  pub fn existing_org(&self) -> Option<&SupportOrg> {
    self.inner.existing.as_ref()
  }

  pub fn set_support_org_name(&self, value: impl Into<String>) {
    lock(&self.inner.state).support_org_name = value.into();
  }

  pub fn set_support_org_description(&self, value: impl Into<String>) {
    lock(&self.inner.state).support_org_description = value.into();
  }

  /// Updates the org this dialog was opened with, or creates a new one.
  pub async fn save(&self) {
    let org = {
      let mut state = lock(&self.inner.state);
      if state.saving {
        return;
      }
      state.saving = true;

      let mut org = self.inner.existing.clone().unwrap_or_default();
      org.support_org_name = sanitize::clean(&state.support_org_name);
      org.support_org_description = sanitize::clean(&state.support_org_description);
      if self.inner.user_id.is_some() {
        org.user_id = self.inner.user_id;
      }
      org
    };

    let result = if self.inner.existing.is_some() {
      self.inner.api.update_org(&org).await
    } else {
      self.inner.api.create_org(&org).await
    };

    if !self.inner.mount.is_mounted() {
      return;
    }

    match result {
      Ok(saved) => {
        log::debug!("Saved support org {:?}", saved.id);
        lock(&self.inner.state).saving = false;
        self.inner.listener.on_save_org().await;
      },
      Err(err) => {
        log::error!("Error saving support org: {}", err);
        let mut state = lock(&self.inner.state);
        state.error = Some(SAVE_ERROR.to_string());
        state.saving = false;
      },
    }
  }

  /// Ignored while saving.
  pub fn cancel(&self) {
    if lock(&self.inner.state).saving {
      return;
    }

    self.inner.listener.on_close_dialog();
  }

  pub fn unmount(&self) {
    self.inner.mount.unmount();
  }

  pub fn is_saving(&self) -> bool {
    lock(&self.inner.state).saving
  }

  pub fn error(&self) -> Option<String> {
    lock(&self.inner.state).error.clone()
  }

  pub fn support_org_name(&self) -> String {
    lock(&self.inner.state).support_org_name.clone()
  }

  pub fn support_org_description(&self) -> String {
    lock(&self.inner.state).support_org_description.clone()
  }

  pub fn render(&self) -> Markup {
    let state = lock(&self.inner.state);
    let title = if self.inner.existing.is_some() {
      "Edit Support Organization"
    } else {
      "Add Support Organization"
    };

    html! {
      .dialog #support-org {
        h2 .dialog-title { (title) }

        .dialog-content {
          @if let Some(error) = &state.error {
            .error style="color: red" { (error) }
          }

          label {
            span { "Organization Name" }
            input type="text" name="supportOrgName" value=(state.support_org_name);
          }

          label {
            span { "Description" }
            textarea name="supportOrgDescription" rows="3" { (state.support_org_description) }
          }
        }

        .dialog-actions {
          button #cancel disabled[state.saving] { "Cancel" }
          button #save .primary disabled[state.saving] {
            @if state.saving { "Saving..." } @else { "Save" }
          }
        }
      }
    }
  }
}
