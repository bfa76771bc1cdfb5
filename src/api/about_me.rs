use serde::{Deserialize, Serialize};

use crate::{
  client::HttpClient,
  error::Error,
  sanitize::{self, Sanitize},
};

const PATH: &str = "/aboutme";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AboutMe {
  #[serde(default, deserialize_with = "super::null_as_empty")]
  pub about_me_text: String,
  #[serde(default, deserialize_with = "super::null_as_empty")]
  pub about_me_profile_link: String,
  #[serde(default, deserialize_with = "super::null_as_empty")]
  pub about_me_image: String,
}

impl Sanitize for AboutMe {
  fn sanitize(&mut self) {
    self.about_me_text = sanitize::clean(&self.about_me_text);
  }
}

#[derive(Debug, Clone)]
pub struct AboutMeApi {
  client: HttpClient,
}

impl AboutMeApi {
  pub fn new(client: HttpClient) -> Self {
    Self { client }
  }

  pub async fn get_about_me(&self) -> Result<AboutMe, Error> {
    self.client.get_json(PATH).await
  }

  /// Replaces the singleton record. There is no create or delete.
  ///
  /// The text is sanitized before it is sent.
  pub async fn edit_about_me(&self, about_me: &AboutMe) -> Result<AboutMe, Error> {
    let payload = about_me.clone().sanitized();
    self.client.put_json(PATH, &payload).await
  }
}
