use maud::{html, Markup, Render};

use crate::{api::SupportPage, sanitize};

/// Public rendering of the support page.
pub struct SupportPageView<'a>(pub &'a SupportPage);

impl Render for SupportPageView<'_> {
  fn render(&self) -> Markup {
    html! {
      #support-page {
        h1 { (sanitize::markup(&self.0.support_page_header)) }
        p .intro { (sanitize::markup(&self.0.support_page_intro)) }
      }
    }
  }
}
