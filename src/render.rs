use crate::dates::DateFormat;
use crate::error::HubError;
use crate::models::{EmojiMap, Repository, UserProfile};

// Text used where the API sent null or left a field out
const NULL_TEXT: &str = "null";

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn escape_or_null(value: Option<&str>) -> String {
    escape_html(value.unwrap_or(NULL_TEXT))
}

/// Login as shown on the page: every hyphen becomes a space.
pub fn display_login(login: &str) -> String {
    login.replace('-', " ")
}

/// The action offered under a rendered profile: list that user's repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUp {
    pub username: String,
}

impl FollowUp {
    /// Rebuild the username from its displayed form. Only the first space is
    /// turned back into a hyphen.
    pub fn from_display_name(name: &str) -> Self {
        Self {
            username: name.replacen(' ', "-", 1),
        }
    }
}

pub struct UserCard {
    pub markup: String,
    pub follow_up: FollowUp,
}

pub fn render_emojis(emojis: &EmojiMap) -> String {
    let mut out = String::from(
        r#"<article class="emojis"><h2>emojis</h2><ul class="emoji-list">"#,
    );
    for (name, url) in emojis {
        let name = escape_html(name);
        out.push_str(&format!(
            r#"<li id="{name}" class="emoji-item"><div class="emoji"><img src="{url}" width="50" height="50" alt="{name}"/><small class="emoji-title">{name}</small></div></li>"#,
            url = escape_html(url),
        ));
    }
    out.push_str("</ul></article>");
    out
}

pub fn render_user(user: &UserProfile, dates: &DateFormat) -> UserCard {
    let name = display_login(&user.login);
    let follow_up = FollowUp::from_display_name(&name);
    let created = dates.display(user.created_at.as_deref());
    let updated = dates.display(user.updated_at.as_deref());

    let markup = format!(
        r#"<img src="{avatar}" alt="Profile picture of {name}" height="120" width="120" class="rounded-circle avatar"><div class="user-heading"><h2>{name}</h2><small>since: {created} | last update: {updated}</small></div><div class="user-details"><p class="user-bio">{bio}</p><button id="btnUserRepos" class="btn btn-primary" type="button" data-action="user-repos" data-username="{target}">User Repositories</button></div>"#,
        avatar = escape_or_null(user.avatar_url.as_deref()),
        name = escape_html(&name),
        created = escape_html(&created),
        updated = escape_html(&updated),
        bio = escape_or_null(user.bio.as_deref()),
        target = escape_html(&follow_up.username),
    );

    UserCard { markup, follow_up }
}

fn link_button(id: &str, href: &str, title: &str, label: &str) -> String {
    format!(
        r#"<a id="{id}" class="btn btn-primary" href="{href}" target="_blank" rel="noopener noreferrer" title="{title}">{label}</a>"#,
        href = escape_html(href),
        title = escape_html(title),
    )
}

fn render_repo(repo: &Repository, dates: &DateFormat) -> String {
    let id = repo.id;
    let name = repo.name.replace('-', " ");
    let mut out = format!(
        r#"<li id="{id}" class="repo"><div class="repo-item"><h2>{}</h2>"#,
        escape_html(&name)
    );

    if let Some(language) = &repo.language {
        out.push_str(&format!(
            r#"<span class="badge badge-dark language">{}</span><br/>"#,
            escape_html(language)
        ));
    }

    out.push_str(&format!(
        r#"<span class="badge badge-light">Created {}</span><span class="badge badge-light">Updated {}</span>"#,
        escape_html(&dates.display(repo.created_at.as_deref())),
        escape_html(&dates.display(repo.updated_at.as_deref())),
    ));

    if let Some(description) = &repo.description {
        out.push_str(&format!("<p>{}</p>", escape_html(description)));
    }
    out.push_str("</div>");

    out.push_str(&link_button(
        &format!("btnRepo{id}"),
        &repo.html_url,
        &format!("Open repository {name}"),
        "View Repository",
    ));
    if let Some(clone_url) = &repo.clone_url {
        out.push_str(&link_button(
            &format!("btnRepoClone{id}"),
            clone_url,
            &format!("Clone repository {name}"),
            "Clone Repo",
        ));
    }
    if let Some(homepage) = &repo.homepage {
        out.push_str(&link_button(
            &format!("btnRepoHome{id}"),
            homepage,
            &format!("Open project {name} online"),
            "View Project Online",
        ));
    }

    out.push_str("</li>");
    out
}

/// `username` is shown with its first hyphen turned into a space.
pub fn render_repos(username: &str, repos: &[Repository], dates: &DateFormat) -> String {
    let mut out = format!(
        r#"<article class="repos"><h2>Repositories of {}</h2><ul class="repo-list">"#,
        escape_html(&username.replacen('-', " ", 1))
    );
    for repo in repos {
        out.push_str(&render_repo(repo, dates));
    }
    out.push_str("</ul></article>");
    out
}

/// Notice shown in a region when its request failed.
pub fn render_error(err: &HubError) -> String {
    let headline = match err {
        HubError::Upstream { status: 404, .. } => "Not found on GitHub.".to_string(),
        HubError::Upstream { status: 403, .. } => {
            "GitHub refused the request (possibly rate limited).".to_string()
        }
        HubError::Upstream { status, .. } => format!("GitHub answered with HTTP {status}."),
        HubError::Network { .. } => "Could not reach GitHub.".to_string(),
        _ => "Something went wrong.".to_string(),
    };
    format!(
        r#"<div class="alert alert-danger" role="alert"><strong>{}</strong> <small>{}</small></div>"#,
        escape_html(&headline),
        escape_html(&err.to_string())
    )
}
