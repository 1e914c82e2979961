//! Test utilities for CLI testing
//!
//! Provides a mock CloudCoreo API server for exercising the HTTP client.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use coreo_core::api::{
    ApiResponse, CloudAccount, CloudAccountCreateRequest, CreateTeamRequest, GitKey,
    RoleCreationInfo, Team, Token,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// API key accepted by the mock server
pub const TEST_API_KEY: &str = "test-key";
/// Secret accepted by the mock server
pub const TEST_API_SECRET: &str = "test-secret";
/// `Authorization` header for the test credentials
const TEST_BASIC_AUTH: &str = "Basic dGVzdC1rZXk6dGVzdC1zZWNyZXQ=";

/// Mock server state
#[derive(Debug, Clone)]
pub struct MockServerState {
    /// Cloud accounts by ID
    pub cloud_accounts: Arc<Mutex<BTreeMap<String, CloudAccount>>>,
    /// Teams by ID
    pub teams: Arc<Mutex<BTreeMap<String, Team>>>,
    /// Tokens by ID
    pub tokens: Arc<Mutex<BTreeMap<String, Token>>>,
    /// Git keys by ID
    pub git_keys: Arc<Mutex<BTreeMap<String, GitKey>>>,
    next_id: Arc<AtomicU32>,
}

impl Default for MockServerState {
    fn default() -> Self {
        let mut cloud_accounts = BTreeMap::new();
        for (id, name) in [("cloud-1", "production"), ("cloud-2", "staging")] {
            cloud_accounts.insert(
                id.to_string(),
                CloudAccount {
                    id: id.to_string(),
                    name: name.to_string(),
                    team_id: "team-1".to_string(),
                    tags: vec![format!("env:{}", name)],
                },
            );
        }

        let mut teams = BTreeMap::new();
        teams.insert(
            "team-1".to_string(),
            Team {
                id: "team-1".to_string(),
                team_name: "Security".to_string(),
                team_description: "Security team".to_string(),
            },
        );

        let mut tokens = BTreeMap::new();
        tokens.insert(
            "token-1".to_string(),
            Token {
                id: "token-1".to_string(),
                name: "ci".to_string(),
                description: "CI pipeline".to_string(),
            },
        );

        let mut git_keys = BTreeMap::new();
        git_keys.insert(
            "gitkey-1".to_string(),
            GitKey {
                id: "gitkey-1".to_string(),
                name: "deploy".to_string(),
                team_id: "team-1".to_string(),
            },
        );

        Self {
            cloud_accounts: Arc::new(Mutex::new(cloud_accounts)),
            teams: Arc::new(Mutex::new(teams)),
            tokens: Arc::new(Mutex::new(tokens)),
            git_keys: Arc::new(Mutex::new(git_keys)),
            next_id: Arc::new(AtomicU32::new(100)),
        }
    }
}

impl MockServerState {
    fn new_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

/// Mock server implementation
#[derive(Debug)]
pub struct MockServer {
    state: MockServerState,
    port: u16,
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockServer {
    /// Create a new mock server
    pub fn new() -> Self {
        Self {
            state: MockServerState::default(),
            port: 0, // Will be assigned when server starts
        }
    }

    /// Start the mock server and return the address
    pub async fn start(mut self) -> Result<(Self, String)> {
        let app = self.create_router();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        self.port = addr.port();

        let server_url = format!("http://127.0.0.1:{}", self.port);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock server error: {}", e);
            }
        });

        // Give the server a moment to start and verify it's running
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                break;
            }
        }

        Ok((self, server_url))
    }

    /// Get the server port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the server state
    pub fn state(&self) -> &MockServerState {
        &self.state
    }

    /// Create the mock server router
    fn create_router(&self) -> Router {
        Router::new()
            .route(
                "/teams/:team_id/cloud-accounts",
                get(list_cloud_accounts_handler).post(create_cloud_account_handler),
            )
            .route(
                "/teams/:team_id/cloud-accounts/role-info",
                post(role_info_handler),
            )
            .route(
                "/teams/:team_id/cloud-accounts/:cloud_id",
                get(get_cloud_account_handler).delete(delete_cloud_account_handler),
            )
            .route("/teams", post(create_team_handler))
            .route("/teams/:team_id", get(get_team_handler))
            .route(
                "/tokens/:token_id",
                get(get_token_handler).delete(delete_token_handler),
            )
            .route(
                "/teams/:team_id/git-keys/:git_key_id",
                get(get_git_key_handler).delete(delete_git_key_handler),
            )
            .with_state(self.state.clone())
    }
}

// Handler functions

fn reply<T: Serialize>(status: StatusCode, body: ApiResponse<T>) -> Response {
    (status, Json(body)).into_response()
}

fn ok<T: Serialize>(data: T) -> Response {
    reply(StatusCode::OK, ApiResponse::success(data))
}

fn not_found(what: &str) -> Response {
    reply::<()>(
        StatusCode::NOT_FOUND,
        ApiResponse::error(format!("{} not found", what)),
    )
}

fn unauthorized() -> Response {
    reply::<()>(
        StatusCode::UNAUTHORIZED,
        ApiResponse::error("invalid credentials".to_string()),
    )
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == TEST_BASIC_AUTH)
        .unwrap_or(false)
}

async fn list_cloud_accounts_handler(
    State(state): State<MockServerState>,
    Path(team_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let accounts: Vec<CloudAccount> = state
        .cloud_accounts
        .lock()
        .unwrap()
        .values()
        .filter(|account| account.team_id == team_id)
        .cloned()
        .collect();
    ok(accounts)
}

async fn get_cloud_account_handler(
    State(state): State<MockServerState>,
    Path((_team_id, cloud_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    match state.cloud_accounts.lock().unwrap().get(&cloud_id) {
        Some(account) => ok(account.clone()),
        None => not_found("cloud account"),
    }
}

async fn delete_cloud_account_handler(
    State(state): State<MockServerState>,
    Path((_team_id, cloud_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    match state.cloud_accounts.lock().unwrap().remove(&cloud_id) {
        Some(_) => ok(()),
        None => not_found("cloud account"),
    }
}

async fn role_info_handler(
    Path(_team_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<CloudAccountCreateRequest>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    match request.role_name {
        Some(role_name) => ok(RoleCreationInfo {
            role_name,
            aws_account: "123456789012".to_string(),
            external_id: "generated-external-id".to_string(),
            policy: request.policy,
        }),
        None => ok_error("role_name is required"),
    }
}

fn ok_error(message: &str) -> Response {
    reply::<()>(StatusCode::OK, ApiResponse::error(message.to_string()))
}

async fn create_cloud_account_handler(
    State(state): State<MockServerState>,
    Path(team_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<CloudAccountCreateRequest>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if request.name.is_empty() {
        return ok_error("name must not be empty");
    }

    let account = CloudAccount {
        id: state.new_id("cloud"),
        name: request.name,
        team_id,
        tags: request.tags,
    };
    state
        .cloud_accounts
        .lock()
        .unwrap()
        .insert(account.id.clone(), account.clone());
    ok(account)
}

async fn get_team_handler(
    State(state): State<MockServerState>,
    Path(team_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    match state.teams.lock().unwrap().get(&team_id) {
        Some(team) => ok(team.clone()),
        None => not_found("team"),
    }
}

async fn create_team_handler(
    State(state): State<MockServerState>,
    headers: HeaderMap,
    Json(request): Json<CreateTeamRequest>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let team = Team {
        id: state.new_id("team"),
        team_name: request.team_name,
        team_description: request.team_description,
    };
    state
        .teams
        .lock()
        .unwrap()
        .insert(team.id.clone(), team.clone());
    ok(team)
}

async fn get_token_handler(
    State(state): State<MockServerState>,
    Path(token_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    match state.tokens.lock().unwrap().get(&token_id) {
        Some(token) => ok(token.clone()),
        None => not_found("token"),
    }
}

async fn delete_token_handler(
    State(state): State<MockServerState>,
    Path(token_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    match state.tokens.lock().unwrap().remove(&token_id) {
        Some(_) => ok(()),
        None => not_found("token"),
    }
}

async fn get_git_key_handler(
    State(state): State<MockServerState>,
    Path((_team_id, git_key_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    match state.git_keys.lock().unwrap().get(&git_key_id) {
        Some(key) => ok(key.clone()),
        None => not_found("git key"),
    }
}

async fn delete_git_key_handler(
    State(state): State<MockServerState>,
    Path((_team_id, git_key_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    match state.git_keys.lock().unwrap().remove(&git_key_id) {
        Some(_) => ok(()),
        None => not_found("git key"),
    }
}
