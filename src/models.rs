use serde::Deserialize;
use std::collections::BTreeMap;

/// `/emojis`: emoji name to icon URL.
pub type EmojiMap = BTreeMap<String, String>;

/// `/users/{username}`. Only `login` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One entry of `/users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub clone_url: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
}

pub type RepositoryList = Vec<Repository>;
