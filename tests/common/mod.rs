#![allow(dead_code)]

use async_trait::async_trait;
use hubpage::dates::DateFormat;
use hubpage::{Dashboard, GithubClient, HttpResponse, HubError, HubResult, Transport};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const API: &str = "https://api.test";

enum Reply {
    Respond(HttpResponse),
    Unreachable,
}

/// In-memory transport answering from a fixed URL table.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: HashMap<String, (Reply, Duration)>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, status: u16, body: &str) -> Self {
        self.replies.insert(
            format!("{API}{path}"),
            (Reply::Respond(HttpResponse::new(status, body)), Duration::ZERO),
        );
        self
    }

    pub fn respond_after(mut self, path: &str, body: &str, delay: Duration) -> Self {
        self.replies.insert(
            format!("{API}{path}"),
            (Reply::Respond(HttpResponse::new(200, body)), delay),
        );
        self
    }

    pub fn unreachable(mut self, path: &str) -> Self {
        self.replies
            .insert(format!("{API}{path}"), (Reply::Unreachable, Duration::ZERO));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> HubResult<HttpResponse> {
        self.requested.lock().unwrap().push(url.to_string());

        let Some((reply, delay)) = self.replies.get(url) else {
            return Ok(HttpResponse::new(404, r#"{"message":"Not Found"}"#));
        };
        if !delay.is_zero() {
            tokio::time::sleep(*delay).await;
        }
        match reply {
            Reply::Respond(resp) => Ok(resp.clone()),
            Reply::Unreachable => Err(HubError::Network {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}

pub fn dashboard(transport: Arc<ScriptedTransport>) -> Dashboard {
    Dashboard::new(
        GithubClient::new(API, transport),
        DateFormat::new("%m/%d/%Y"),
    )
}

pub fn user_json(login: &str) -> String {
    serde_json::json!({
        "login": login,
        "bio": "Writes code",
        "avatar_url": "https://avatars.test/1",
        "created_at": "2011-01-25T18:44:36Z",
        "updated_at": "2024-06-01T12:00:00Z"
    })
    .to_string()
}

pub fn repos_json() -> String {
    serde_json::json!([
        {
            "id": 1,
            "name": "hello-world",
            "language": "Go",
            "description": "First repo",
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2020-02-01T00:00:00Z",
            "html_url": "https://github.test/o/hello-world",
            "clone_url": "https://github.test/o/hello-world.git",
            "homepage": null
        },
        {
            "id": 2,
            "name": "notes",
            "language": null,
            "description": null,
            "created_at": "2021-01-01T00:00:00Z",
            "updated_at": "2021-02-01T00:00:00Z",
            "html_url": "https://github.test/o/notes",
            "clone_url": null,
            "homepage": "https://notes.test"
        }
    ])
    .to_string()
}
