use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

#[derive(Debug)]
struct Session {
    turns: Vec<ConversationTurn>,
    last_active: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            turns: Vec::new(),
            last_active: Instant::now(),
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for turn in &self.turns {
            match turn.role {
                TurnRole::User => {
                    out.push_str("User: ");
                    out.push_str(&turn.content);
                    out.push('\n');
                }
                TurnRole::Assistant => {
                    out.push_str("AI: ");
                    out.push_str(&turn.content);
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Process-wide conversation history keyed by session id. Sessions for
/// different ids never contend (per-key mutex); concurrent requests on the
/// same id may interleave their appended turns in arrival order. Idle
/// sessions are dropped by [`SessionStore::sweep_expired`].
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    async fn get_or_create(&self, session_id: &str) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(session_id) {
            return session.clone();
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                tracing::info!(session_id, "creating new session");
                Arc::new(Mutex::new(Session::new()))
            })
            .clone()
    }

    /// Record one completed exchange: the user's query and the answer the
    /// user was shown, in that order.
    pub async fn append_exchange(&self, session_id: &str, query: &str, answer: &str) {
        let session = self.get_or_create(session_id).await;
        let mut session = session.lock().await;
        session.turns.push(ConversationTurn {
            role: TurnRole::User,
            content: query.to_string(),
        });
        session.turns.push(ConversationTurn {
            role: TurnRole::Assistant,
            content: answer.to_string(),
        });
        session.last_active = Instant::now();
    }

    /// Chat history rendered as `User:`/`AI:` lines for prompt context.
    pub async fn render_history(&self, session_id: &str) -> String {
        let session = self.get_or_create(session_id).await;
        let session = session.lock().await;
        session.render()
    }

    /// Most recent assistant turn longer than `min_len` characters, if any.
    pub async fn last_substantial_answer(
        &self,
        session_id: &str,
        min_len: usize,
    ) -> Option<String> {
        let session = self.get_or_create(session_id).await;
        let session = session.lock().await;
        session
            .turns
            .iter()
            .rev()
            .find(|turn| turn.role == TurnRole::Assistant && turn.content.len() > min_len)
            .map(|turn| turn.content.clone())
    }

    pub async fn turn_count(&self, session_id: &str) -> usize {
        match self.sessions.read().await.get(session_id) {
            Some(session) => session.lock().await.turns.len(),
            None => 0,
        }
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions idle past the TTL. Returns how many were removed.
    pub async fn sweep_expired(&self) -> usize {
        let cutoff = Instant::now();
        let mut sessions = self.sessions.write().await;
        let mut expired = Vec::new();
        for (id, session) in sessions.iter() {
            let session = session.lock().await;
            if cutoff.duration_since(session.last_active) > self.ttl {
                expired.push(id.clone());
            }
        }
        for id in &expired {
            sessions.remove(id);
        }
        if !expired.is_empty() {
            tracing::info!(count = expired.len(), "swept expired sessions");
        }
        expired.len()
    }
}
