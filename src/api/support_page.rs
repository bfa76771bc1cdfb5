use serde::{Deserialize, Serialize};

use crate::{
  client::HttpClient,
  error::Error,
  sanitize::{self, Sanitize},
};

const PATH: &str = "/supportpage";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupportPage {
  #[serde(default, deserialize_with = "super::null_as_empty")]
  pub support_page_header: String,
  #[serde(default, deserialize_with = "super::null_as_empty")]
  pub support_page_intro: String,
  /// Editing user, attached at save time. Omitted from the body when unknown.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_id: Option<i64>,
}

impl Sanitize for SupportPage {
  fn sanitize(&mut self) {
    self.support_page_header = sanitize::clean(&self.support_page_header);
    self.support_page_intro = sanitize::clean(&self.support_page_intro);
  }
}

#[derive(Debug, Clone)]
pub struct SupportPageApi {
  client: HttpClient,
}

impl SupportPageApi {
  pub fn new(client: HttpClient) -> Self {
    Self { client }
  }

  pub async fn get_support_page_data(&self) -> Result<SupportPage, Error> {
    self.client.get_json(PATH).await
  }

  /// Sends `support_page` as-is; a missing `user_id` is not enforced here.
  pub async fn edit_support_page_data(
    &self,
    support_page: &SupportPage,
  ) -> Result<serde_json::Value, Error> {
    self.client.put_json(PATH, support_page).await
  }
}
