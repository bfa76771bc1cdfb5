use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{Duration, OffsetDateTime};

use crate::{client::HttpClient, error::Error};

pub const HOME_ROUTE: &str = "/";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub user_id: i64,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Login state as reported by `/auth/check`. The cookie behind it lives in
/// the client's cookie store, never in here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  pub is_logged_in: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user: Option<User>,
}

impl Session {
  pub fn logged_out() -> Self {
    Self {
      is_logged_in: false,
      user: None,
    }
  }

  pub fn user_id(&self) -> Option<i64> {
    if !self.is_logged_in {
      return None;
    }

    self.user.as_ref().map(|user| user.user_id)
  }
}

impl Default for Session {
  fn default() -> Self {
    Self::logged_out()
  }
}

/// Client-side navigation, used to leave the page after signing out.
pub trait Navigator: Send + Sync {
  fn push(&self, route: &str);
}

#[derive(Serialize)]
struct Credentials<'a> {
  email: &'a str,
  password: &'a str,
}

#[derive(Debug, Clone)]
pub struct AuthApi {
  client: HttpClient,
}

impl AuthApi {
  pub fn new(client: HttpClient) -> Self {
    Self { client }
  }

  pub async fn register_user<T: Serialize>(&self, user_info: &T) -> Result<Value, Error> {
    self
      .client
      .post_json("/auth/register", user_info)
      .await
      .map_err(|err| {
        log::error!("Error during registration: {}", err);
        err
      })
  }

  /// Never fails: anything that goes wrong reads as "not logged in".
  pub async fn check_user(&self) -> Session {
    match self.client.get_json::<Session>("/auth/check").await {
      Ok(session) => session,
      Err(err) => {
        log::error!("Error checking login status: {}", err);
        Session::logged_out()
      },
    }
  }

  pub async fn sign_in(&self, email: &str, password: &str) -> Result<Value, Error> {
    self
      .client
      .post_json("/auth/login", &Credentials { email, password })
      .await
      .map_err(|err| {
        log::error!("Error during sign-in: {}", err.detail());
        err
      })
  }

  /// Logs out and goes home. If the backend call fails the error is logged and
  /// the current route is kept.
  pub async fn sign_out(&self, navigator: &dyn Navigator) {
    match self
      .client
      .post_json::<_, Value>("/auth/logout", &Map::new())
      .await
    {
      Ok(_) => navigator.push(HOME_ROUTE),
      Err(err) => log::error!("Error during sign-out: {}", err.detail()),
    }
  }
}

/// A [`Session`] that is re-checked with the backend once it is older than
/// `ttl`.
#[derive(Clone)]
pub struct SessionCache {
  auth: AuthApi,
  ttl: Duration,
  cached: Arc<Mutex<Option<(OffsetDateTime, Session)>>>,
}

impl SessionCache {
  pub fn new(auth: AuthApi, ttl: Duration) -> Self {
    Self {
      auth,
      ttl,
      cached: Arc::new(Mutex::new(None)),
    }
  }

  pub fn auth(&self) -> &AuthApi {
    &self.auth
  }

  pub fn ttl(&self) -> Duration {
    self.ttl
  }

  pub async fn current(&self) -> Session {
    if let Some(session) = self.fresh() {
      return session;
    }

    let session = self.auth.check_user().await;
    *self.lock() = Some((OffsetDateTime::now_utc(), session.clone()));

    session
  }

  /// Forgets the cached value, e.g. after signing in or out.
  pub fn invalidate(&self) {
    *self.lock() = None;
  }

  fn fresh(&self) -> Option<Session> {
    let cached = self.lock();
    let (fetched_at, session) = cached.as_ref()?;

    if OffsetDateTime::now_utc() - *fetched_at < self.ttl {
      Some(session.clone())
    } else {
      None
    }
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, Option<(OffsetDateTime, Session)>> {
    // A poisoned cache is still a valid cache.
    self
      .cached
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}
