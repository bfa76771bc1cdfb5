use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
  client::HttpClient,
  error::Error,
  sanitize::{self, Sanitize},
};

const COLLECTION: &str = "/supportorgs";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupportOrg {
  /// Assigned by the backend; absent on records that were never saved.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(default, deserialize_with = "super::null_as_empty")]
  pub support_org_name: String,
  #[serde(default, deserialize_with = "super::null_as_empty")]
  pub support_org_description: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_id: Option<i64>,
  /// Server-side fields we don't model, sent back untouched on update.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl SupportOrg {
  pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      support_org_name: name.into(),
      support_org_description: description.into(),
      ..Self::default()
    }
  }
}

impl Sanitize for SupportOrg {
  fn sanitize(&mut self) {
    self.support_org_name = sanitize::clean(&self.support_org_name);
    self.support_org_description = sanitize::clean(&self.support_org_description);
  }
}

fn member_path(id: i64) -> String {
  format!("{}/{}", COLLECTION, id)
}

#[derive(Debug, Clone)]
pub struct SupportOrgApi {
  client: HttpClient,
}

impl SupportOrgApi {
  pub fn new(client: HttpClient) -> Self {
    Self { client }
  }

  /// All orgs, in whatever order the backend returns them.
  pub async fn get_orgs(&self) -> Result<Vec<SupportOrg>, Error> {
    self.client.get_json(COLLECTION).await
  }

  pub async fn create_org(&self, org: &SupportOrg) -> Result<SupportOrg, Error> {
    self.client.post_json(COLLECTION, org).await
  }

  pub async fn update_org(&self, org: &SupportOrg) -> Result<SupportOrg, Error> {
    let id = org.id.ok_or(Error::MissingId)?;

    self.client.put_json(&member_path(id), org).await
  }

  /// Returns whatever the backend sends back, `Value::Null` for an empty body.
  pub async fn delete_org(&self, id: i64) -> Result<Value, Error> {
    self.client.delete_json(&member_path(id)).await
  }
}
