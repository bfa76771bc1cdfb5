//! Client layer for a small content site: an about-me page, a support page
//! and a list of support organizations.
//!
//! Everything goes through one credentialed [`client::HttpClient`]; the
//! [`api`] and [`auth`] modules wrap single endpoints, and the [`dialog`]
//! controllers sequence them behind UI events.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod dialog;
pub mod error;
pub mod route;
pub mod sanitize;
pub mod template;
pub mod view;

pub use error::Error;
