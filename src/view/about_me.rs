use maud::{html, Markup, Render};

use crate::{api::AboutMe, sanitize};

const IMAGE_ALT: &str = "About Me Image";

/// The about-me image next to a card with the text and a profile link.
///
/// Urls that aren't http(s) or relative are left out.
pub struct AboutMeCard<'a>(pub &'a AboutMe);

impl Render for AboutMeCard<'_> {
  fn render(&self) -> Markup {
    let about_me = self.0;
    let image = sanitize::safe_url(&about_me.about_me_image);
    let profile = sanitize::safe_url(&about_me.about_me_profile_link);

    html! {
      #about-me {
        #about-me-image {
          @if let Some(src) = image {
            img src=(src) alt=(IMAGE_ALT) width="500" height="450" style="margin-bottom: 20px";
          }
        }

        #about-me-card .card {
          .card-content {
            h5 { (sanitize::markup(&about_me.about_me_text)) }

            hr style="background-color: black; margin: 20px 0";

            div style="display: flex; justify-content: center" {
              @if let Some(href) = profile {
                a .button href=(href) aria-label="Profile" { "𝕏" }
              }
            }
          }
        }
      }
    }
  }
}
