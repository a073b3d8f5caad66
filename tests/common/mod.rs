#![allow(dead_code)]

use profile_explorer::actors::{ExplorerHandle, ProfileExplorer};
use profile_explorer::config::ExplorerConfig;
use profile_explorer::github::GitHubClient;
use profile_explorer::state::{Notification, ViewState};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestContext {
    pub server: MockServer,
    pub client: GitHubClient,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = ExplorerConfig::new(&server.uri(), 5).expect("valid mock server config");
        let client = GitHubClient::new(&config).expect("Failed to create client");
        TestContext { server, client }
    }

    pub async fn spawn_explorer(&self) -> (ExplorerHandle, mpsc::UnboundedReceiver<Notification>) {
        ProfileExplorer::spawn_with_client(self.client.clone())
            .await
            .expect("Failed to spawn explorer")
    }

    pub fn link_header(&self, login: &str, next: Option<u32>, last: u32) -> String {
        let mut parts = Vec::new();
        if let Some(next) = next {
            parts.push(format!(
                "<{}/users/{}/repos?per_page=3&page={}>; rel=\"next\"",
                self.server.uri(),
                login,
                next
            ));
        }
        parts.push(format!(
            "<{}/users/{}/repos?per_page=3&page={}>; rel=\"last\"",
            self.server.uri(),
            login,
            last
        ));
        parts.join(", ")
    }

    pub async fn mount_user(&self, login: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{}", login)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_repos_page(&self, login: &str, page: u32, count: usize, link: Option<String>) {
        self.mount_slow_repos_page(login, page, count, link, Duration::ZERO)
            .await;
    }

    pub async fn mount_slow_repos_page(
        &self,
        login: &str,
        page: u32,
        count: usize,
        link: Option<String>,
        delay: Duration,
    ) {
        let mut response = ResponseTemplate::new(200)
            .set_body_json(repos_json(login, page, count))
            .set_delay(delay);
        if let Some(link) = link {
            response = response.insert_header("link", link.as_str());
        }

        Mock::given(method("GET"))
            .and(path(format!("/users/{}/repos", login)))
            .and(query_param("per_page", "3"))
            .and(query_param("page", page.to_string()))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }
}

pub fn user_json(login: &str, id: u64, followers: u32, public_repos: u32) -> Value {
    json!({
        "login": login,
        "id": id,
        "name": format!("The {}", login),
        "bio": null,
        "location": "San Francisco",
        "followers": followers,
        "following": 9,
        "public_repos": public_repos,
        "avatar_url": format!("https://avatars.githubusercontent.com/u/{}?v=4", id),
        "html_url": format!("https://github.com/{}", login),
    })
}

pub fn repos_json(login: &str, page: u32, count: usize) -> Value {
    let repos: Vec<Value> = (0..count)
        .map(|i| {
            let id = page as u64 * 100 + i as u64;
            json!({
                "id": id,
                "name": format!("repo-{}", id),
                "full_name": format!("{}/repo-{}", login, id),
                "description": null,
                "language": "Rust",
                "forks": i,
                "watchers": i * 2,
                "html_url": format!("https://github.com/{}/repo-{}", login, id),
            })
        })
        .collect();
    Value::Array(repos)
}

pub async fn mount_failing_repos_page(server: &MockServer, login: &str, page: u32, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/repos", login)))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Poll until the displayed profile belongs to `login`.
pub async fn wait_for_profile(explorer: &ExplorerHandle, login: &str) -> ViewState {
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            let view = explorer.snapshot().await.expect("Failed to read snapshot");
            if view.profile.as_ref().map(|p| p.login.as_str()) == Some(login) {
                return view;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("profile never showed up")
}

/// Wait for every outstanding request to resolve.
pub async fn settle(explorer: &ExplorerHandle) -> ViewState {
    tokio::time::timeout(Duration::from_secs(10), explorer.settled(Duration::from_millis(10)))
        .await
        .expect("explorer did not settle in time")
        .expect("Failed to read snapshot")
}
