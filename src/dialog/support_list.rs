use std::sync::{
  atomic::{AtomicU64, Ordering},
  Arc,
  Mutex,
};

use async_trait::async_trait;
use maud::{html, Markup};

use super::{lock, Mount, OrgDialogListener, SupportOrgDialog};
use crate::{
  api::{SupportOrg, SupportOrgApi},
  auth::SessionCache,
  sanitize::{self, Sanitize},
};

/// Which org, if any, the editor was opened for.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
  Closed,
  Open(Option<SupportOrg>),
}

#[derive(Debug)]
struct State {
  list_open: bool,
  user_id: Option<i64>,
  orgs: Vec<SupportOrg>,
  editor: EditorState,
  applied_fetch: u64,
}

struct Inner {
  api: SupportOrgApi,
  sessions: SessionCache,
  mount: Mount,
  fetches: AtomicU64,
  state: Mutex<State>,
}

/// The support organizations list, plus the open/closed state of its editor.
///
/// The list is never patched locally: every mutation is followed by a full
/// refetch.
#[derive(Clone)]
pub struct SupportOrgListDialog {
  inner: Arc<Inner>,
}

impl SupportOrgListDialog {
  pub fn new(api: SupportOrgApi, sessions: SessionCache) -> Self {
    Self {
      inner: Arc::new(Inner {
        api,
        sessions,
        mount: Mount::new(),
        fetches: AtomicU64::new(0),
        state: Mutex::new(State {
          list_open: false,
          user_id: None,
          orgs: Vec::new(),
          editor: EditorState::Closed,
          applied_fetch: 0,
        }),
      }),
    }
  }

  /// Initial load: the org list and the current user's id.
  pub async fn mount(&self) {
    tokio::join!(self.fetch_orgs(), self.fetch_user_id());
  }

  pub fn unmount(&self) {
    self.inner.mount.unmount();
  }

  async fn fetch_user_id(&self) {
    let session = self.inner.sessions.current().await;

    if !self.inner.mount.is_mounted() {
      return;
    }

    if let Some(user_id) = session.user_id() {
      lock(&self.inner.state).user_id = Some(user_id);
    }
  }

  /// Replaces the list with the backend's, sanitized. Failures are logged and
  /// leave the current list alone.
  pub async fn fetch_orgs(&self) {
    let generation = self.inner.fetches.fetch_add(1, Ordering::SeqCst) + 1;
    let result = self.inner.api.get_orgs().await;

    if !self.inner.mount.is_mounted() {
      return;
    }

    match result {
      Ok(orgs) => {
        let orgs = orgs.sanitized();
        let mut state = lock(&self.inner.state);

        // An older request finished after a newer one.
        if generation < state.applied_fetch {
          log::debug!("Dropping stale support org list #{}", generation);
          return;
        }

        state.applied_fetch = generation;
        state.orgs = orgs;
      },
      Err(err) => log::error!("Error fetching support orgs: {}", err),
    }
  }

  pub async fn open_list(&self) {
    lock(&self.inner.state).list_open = true;
    self.fetch_orgs().await;
  }

  /// Keeps the fetched orgs around for the next open.
  pub fn close_list(&self) {
    lock(&self.inner.state).list_open = false;
  }

  pub fn open_add_org_dialog(&self) -> SupportOrgDialog {
    self.open_editor(None)
  }

  pub fn handle_edit(&self, org: SupportOrg) -> SupportOrgDialog {
    self.open_editor(Some(org))
  }

  fn open_editor(&self, org: Option<SupportOrg>) -> SupportOrgDialog {
    let user_id = {
      let mut state = lock(&self.inner.state);
      state.editor = EditorState::Open(org.clone());
      state.user_id
    };

    SupportOrgDialog::new(
      self.inner.api.clone(),
      org,
      user_id,
      Arc::new(self.clone()),
    )
  }

  pub fn handle_close_add_org_dialog(&self) {
    lock(&self.inner.state).editor = EditorState::Closed;
  }

  pub async fn handle_delete(&self, org_id: i64) {
    match self.inner.api.delete_org(org_id).await {
      Ok(_) => self.fetch_orgs().await,
      Err(err) => log::error!("Error deleting support org: {}", err),
    }
  }

  pub async fn handle_save_org(&self) {
    self.fetch_orgs().await;
    self.handle_close_add_org_dialog();
  }

  pub fn is_list_open(&self) -> bool {
    lock(&self.inner.state).list_open
  }

  pub fn orgs(&self) -> Vec<SupportOrg> {
    lock(&self.inner.state).orgs.clone()
  }

  pub fn editor(&self) -> EditorState {
    lock(&self.inner.state).editor.clone()
  }

  pub fn user_id(&self) -> Option<i64> {
    lock(&self.inner.state).user_id
  }

  pub fn render(&self) -> Markup {
    let state = lock(&self.inner.state);

    html! {
      button #open-support-orgs .primary { "Open Support Orgs List" }

      @if state.list_open {
        .dialog #support-orgs {
          h2 .dialog-title { "Support Organizations List" }

          .dialog-content {
            ul .org-list {
              @for org in &state.orgs {
                li data-org-id=[org.id] {
                  span .org-name { (sanitize::markup(&org.support_org_name)) }
                  button .edit aria-label="edit" { "Edit" }
                  button .delete aria-label="delete" { "Delete" }
                }
              }
            }
          }

          .dialog-actions {
            button #close-support-orgs { "Close" }
            button #add-support-org .primary { "Add New Org" }
          }
        }
      }
    }
  }
}

#[async_trait]
impl OrgDialogListener for SupportOrgListDialog {
  async fn on_save_org(&self) {
    self.handle_save_org().await;
  }

  fn on_close_dialog(&self) {
    self.handle_close_add_org_dialog();
  }
}
