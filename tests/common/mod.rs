#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use rbac_auth::{
    app,
    config::Config,
    repos::{CredentialStore, InMemoryCredentialStore},
    services::auth::{Argon2Hasher, PasswordHashing},
    state::AppState,
};

pub const SIGNING_KEY: &str = "integration-test-signing-key-0123456789";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    /// Value of the `name` cookie set by this response.
    pub fn cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.set_cookies().into_iter().find_map(|c| {
            c.strip_prefix(&prefix)
                .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
        })
    }
}

impl TestApp {
    pub fn new(transport: &str) -> Self {
        let vars = [
            ("AUTH_SIGNING_KEY", SIGNING_KEY),
            ("AUTH_TOKEN_TRANSPORT", transport),
        ];
        let config = Config::from_lookup(|key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        })
        .expect("test config");

        let store: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());
        // Cheap parameters keep the suite fast; production uses the recommended ones.
        let hasher: Arc<dyn PasswordHashing> =
            Arc::new(Argon2Hasher::with_params(64, 1, 1).expect("argon2 params"));

        let state = app::build_state_with_hasher(&config, store, hasher);
        let app = app::build_app(state.clone(), &config);

        Self { app, state, config }
    }

    pub fn header_transport() -> Self {
        Self::new("header")
    }

    pub fn cookie_transport() -> Self {
        Self::new("cookie")
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(req).await
    }

    pub async fn get(&self, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        self.request(Method::GET, uri, headers, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, &[], Some(body)).await
    }

    pub async fn register(&self, username: &str, password: &str, role: &str) -> TestResponse {
        self.post_json(
            "/api/v1/auth/register",
            serde_json::json!({"username": username, "password": password, "role": role}),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.post_json(
            "/api/v1/auth/login",
            serde_json::json!({"username": username, "password": password}),
        )
        .await
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
