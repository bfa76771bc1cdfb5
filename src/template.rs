use axum::response::Html;
use maud::{html, Markup, Render, DOCTYPE};

pub const SITE_NAME: &str = "Support";

#[derive(Clone, Default)]
pub struct Template {
  title: Option<Markup>,
  content: Option<Markup>,
}

impl Template {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn title(mut self, title: impl Render) -> Self {
    self.title = Some(html! { (title) });
    self
  }

  pub fn content(mut self, content: impl Render) -> Self {
    self.content = Some(html! { (content) });
    self
  }

  pub fn into_markup(self) -> Markup {
    html! {
      (DOCTYPE)
      meta charset="utf-8";
      html lang="en" {
        head {
          title {
            @if let Some(title) = self.title {
              (title) " - "
            }
            (SITE_NAME)
          }
          link rel="stylesheet" type="text/css" href="/bundle.css";
        }

        body {
          #header {
            nav {
              a href="/" { "About Me" }
              "·"
              a href="/support" { "Support" }
            }
          }

          @if let Some(content) = self.content {
            #content { (content) }
          }
        }
      }
    }
  }

  pub fn render(self) -> Html<String> {
    Html(self.into_markup().into_string())
  }
}
