//! Dialog controllers. Each owns its UI state, talks to the API modules, and
//! reports back to whoever opened it.
//!
//! State sits behind a plain mutex that is only held between awaits, so a
//! handle can be cloned into event handlers and rendered while a request is
//! still in flight.

use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
  Mutex,
  MutexGuard,
};

pub mod support_list;
pub mod support_org;
pub mod support_page;

pub use support_list::{EditorState, SupportOrgListDialog};
pub use support_org::{OrgDialogListener, SupportOrgDialog};
pub use support_page::SupportPageDialog;

/// Plain notification from a dialog to its parent.
pub type Callback = Box<dyn Fn() + Send + Sync>;

/// Tracks whether a dialog is still alive. Requests that resolve after
/// `unmount` must not touch its state.
#[derive(Clone, Debug)]
pub struct Mount(Arc<AtomicBool>);

impl Mount {
  pub fn new() -> Self {
    Self(Arc::new(AtomicBool::new(true)))
  }

  pub fn is_mounted(&self) -> bool {
    self.0.load(Ordering::Acquire)
  }

  pub fn unmount(&self) {
    self.0.store(false, Ordering::Release);
  }
}

impl Default for Mount {
  fn default() -> Self {
    Self::new()
  }
}

pub(crate) fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
  state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
