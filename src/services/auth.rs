use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;
use crate::http::HttpClient;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User payload of a login response. Ids may arrive as numbers or strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: Value,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub university_id: Option<Value>,
    #[serde(default)]
    pub student_id: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<LoginUser>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MeResponse {
    Wrapped { user: LoginUser },
    Bare(LoginUser),
}

/// `/auth/*` endpoints.
#[derive(Clone)]
pub struct AuthApi {
    http: HttpClient,
}

impl AuthApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Sent without the stored token; a 401 here is a credential rejection, not a session end.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        self.http.post_public("auth/login", request).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.http.post_empty("auth/logout").await
    }

    pub async fn me(&self) -> Result<LoginUser, ClientError> {
        let response: MeResponse = self.http.get("auth/me").await?;
        Ok(match response {
            MeResponse::Wrapped { user } | MeResponse::Bare(user) => user,
        })
    }
}
