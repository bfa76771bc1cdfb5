//! HTML sanitizing for every user-supplied text field.
//!
//! Text is cleaned twice: once after it comes back from the backend, before it
//! is rendered, and once more before it is sent, so nothing executable is ever
//! stored or replayed.

use std::{collections::HashSet, sync::OnceLock};

use ammonia::Builder;
use maud::PreEscaped;

/// Tags that survive cleaning. Everything else is stripped, keeping its text;
/// `script` and `style` are dropped together with their contents.
const ALLOWED_TAGS: [&str; 16] = [
  "a", "b", "blockquote", "br", "code", "em", "h1", "h2", "h3", "i", "li", "ol", "p", "strong",
  "u", "ul",
];

fn builder() -> &'static Builder<'static> {
  static BUILDER: OnceLock<Builder<'static>> = OnceLock::new();

  BUILDER.get_or_init(|| {
    let mut builder = Builder::empty();
    builder
      .tags(ALLOWED_TAGS.iter().copied().collect::<HashSet<_>>())
      .clean_content_tags(["script", "style"].into_iter().collect::<HashSet<_>>())
      .tag_attributes(
        [("a", ["href"].into_iter().collect::<HashSet<_>>())]
          .into_iter()
          .collect(),
      )
      .url_schemes(["http", "https", "mailto"].into_iter().collect::<HashSet<_>>())
      .link_rel(Some("noopener noreferrer"));
    builder
  })
}

/// Cleans `input` down to the allow-list. `clean(&clean(x)) == clean(x)`.
pub fn clean(input: &str) -> String {
  builder().clean(input).to_string()
}

/// Cleaned text, ready to be rendered as HTML.
pub fn markup(input: &str) -> PreEscaped<String> {
  PreEscaped(clean(input))
}

/// Returns the url when it is safe to put in an `href`/`src`.
pub fn safe_url(url: &str) -> Option<&str> {
  let url = url.trim();
  let lower = url.to_ascii_lowercase();

  if lower.starts_with("https://") || lower.starts_with("http://") {
    return Some(url);
  }

  // Relative paths, but not protocol-relative ones.
  if url.starts_with('/') && !url.starts_with("//") {
    return Some(url);
  }

  None
}

/// Records whose text fields may carry HTML.
pub trait Sanitize {
  fn sanitize(&mut self);

  fn sanitized(mut self) -> Self
  where
    Self: Sized,
  {
    self.sanitize();
    self
  }
}

impl<T: Sanitize> Sanitize for Vec<T> {
  fn sanitize(&mut self) {
    for item in self.iter_mut() {
      item.sanitize();
    }
  }
}
