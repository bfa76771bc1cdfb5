//! One module per backend resource. Each function maps to exactly one request
//! through the shared [`HttpClient`](crate::client::HttpClient) and hands
//! failures straight back to the caller.

use serde::{Deserialize, Deserializer};

pub mod about_me;
pub mod support_org;
pub mod support_page;

pub use about_me::{AboutMe, AboutMeApi};
pub use support_org::{SupportOrg, SupportOrgApi};
pub use support_page::{SupportPage, SupportPageApi};

/// Text fields come back as `null` when never set; treat that as empty.
pub(crate) fn null_as_empty<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<String, D::Error> {
  Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
