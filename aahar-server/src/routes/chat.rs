use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

const SESSION_COOKIE: &str = "aahar_session";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub session_id: String,
}

/// Conversational entry point. Session identity: client-supplied id, else
/// the signed cookie, else a fresh token; whichever wins is set back into
/// the cookie and echoed in the response.
pub async fn chat(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(request): Json<ChatRequest>,
) -> (SignedCookieJar, Json<ChatResponse>) {
    let session_id = request
        .session_id
        .filter(|id| !id.trim().is_empty())
        .or_else(|| {
            jar.get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string())
        })
        .unwrap_or_else(|| format!("session_{}", uuid::Uuid::new_v4().simple()));

    tracing::info!(query = %request.query, session_id = %session_id, "chat query");

    let jar = jar.add(
        Cookie::build((SESSION_COOKIE, session_id.clone()))
            .path("/")
            .build(),
    );

    let answer = state.executor.run(&session_id, &request.query).await;
    (jar, Json(ChatResponse { answer, session_id }))
}
