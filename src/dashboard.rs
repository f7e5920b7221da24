//! The three endpoint callers and the page they render into.
//!
//! Each call fetches one resource and, once the response is complete,
//! replaces the page's dynamic content under a single lock. Concurrent calls
//! never interleave their writes; whichever completes last owns the page.

use crate::dates::DateFormat;
use crate::error::{HubError, HubResult};
use crate::github::{Endpoint, GithubClient, Payload, RepoQuery};
use crate::models::{EmojiMap, RepositoryList, UserProfile};
use crate::page::{Page, Region};
use crate::render::{self, FollowUp};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Result of a successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub region: Region,
    /// Number of entries written (emojis, repositories, or 1 for a profile).
    pub entries: usize,
    pub follow_up: Option<FollowUp>,
}

pub struct Dashboard {
    client: GithubClient,
    dates: DateFormat,
    page: Mutex<Page>,
}

impl Dashboard {
    pub fn new(client: GithubClient, dates: DateFormat) -> Self {
        Self {
            client,
            dates,
            page: Mutex::new(Page::bootstrap()),
        }
    }

    /// Fetch the emoji catalog into the emoji region.
    pub async fn get_emojis(&self) -> HubResult<Rendered> {
        self.run(Endpoint::Emojis, Region::Emojis, |payload, _| {
            let emojis: EmojiMap = payload.decode()?;
            Ok((render::render_emojis(&emojis), emojis.len(), None))
        })
        .await
    }

    /// Fetch a profile into the user region. The returned follow-up lists
    /// that user's repositories.
    pub async fn get_user_infos(&self, username: &str) -> HubResult<Rendered> {
        let endpoint = Endpoint::User {
            username: username.to_string(),
        };
        self.run(endpoint, Region::User, |payload, dates| {
            let user: UserProfile = payload.decode()?;
            let card = render::render_user(&user, dates);
            Ok((card.markup, 1, Some(card.follow_up)))
        })
        .await
    }

    /// Fetch one page of a user's repositories into the repos region.
    pub async fn get_user_repos(&self, username: &str, query: &RepoQuery) -> HubResult<Rendered> {
        let endpoint = Endpoint::Repos {
            username: username.to_string(),
            query: query.clone(),
        };
        self.run(endpoint, Region::Repos, |payload, dates| {
            let repos: RepositoryList = payload.decode()?;
            Ok((render::render_repos(username, &repos, dates), repos.len(), None))
        })
        .await
    }

    /// Trigger the action offered by a rendered profile.
    pub async fn follow(&self, action: &FollowUp) -> HubResult<Rendered> {
        self.get_user_repos(&action.username, &RepoQuery::default())
            .await
    }

    pub async fn region_content(&self, region: Region) -> HubResult<String> {
        let page = self.page.lock().await;
        page.region_content(region).map(str::to_string)
    }

    pub async fn to_document(&self, title: &str) -> String {
        self.page.lock().await.to_document(title)
    }

    /// Write the current page to `path` as a standalone HTML document.
    pub async fn write_document(&self, path: &Path, title: &str) -> HubResult<()> {
        let document = self.to_document(title).await;
        tokio::fs::write(path, document).await?;
        info!(path = %path.display(), "page written");
        Ok(())
    }

    async fn run<F>(&self, endpoint: Endpoint, region: Region, build: F) -> HubResult<Rendered>
    where
        F: FnOnce(&Payload, &DateFormat) -> HubResult<(String, usize, Option<FollowUp>)>,
    {
        let payload = match self.client.fetch(&endpoint).await {
            Ok(payload) => payload,
            Err(err) if err.is_upstream_failure() => return Err(self.fail(region, err).await),
            Err(err) => return Err(err),
        };

        let mut page = self.page.lock().await;
        page.clear_dynamic_content()?;

        // a decode failure leaves the regions cleared and nothing rendered
        let (markup, entries, follow_up) = build(&payload, &self.dates)?;
        page.append(&region.selector(), &markup)?;

        info!(url = %payload.url, region = region.id(), entries, "rendered");
        Ok(Rendered {
            region,
            entries,
            follow_up,
        })
    }

    async fn fail(&self, region: Region, err: HubError) -> HubError {
        warn!(region = region.id(), error = %err, "request failed");

        let mut page = self.page.lock().await;
        let notice = render::render_error(&err);
        if let Err(e) = page
            .clear_dynamic_content()
            .and_then(|_| page.append(&region.selector(), &notice))
        {
            warn!(error = %e, "could not render error notice");
        }
        err
    }
}
