//! Render GitHub emojis, user profiles and repository listings into an
//! HTML page using the public GitHub REST API.

pub mod config;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod github;
pub mod models;
pub mod page;
pub mod render;
pub mod transport;

pub use config::Config;
pub use dashboard::{Dashboard, Rendered};
pub use error::{HubError, HubResult};
pub use github::{Endpoint, GithubClient, RepoQuery};
pub use page::{Page, Region};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
