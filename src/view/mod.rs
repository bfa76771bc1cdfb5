//! Read-only views of backend records.

mod about_me;
mod support_page;

pub use about_me::AboutMeCard;
pub use support_page::SupportPageView;
