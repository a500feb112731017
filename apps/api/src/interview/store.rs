//! In-memory session store.
//!
//! The map lock is held only long enough to look up or insert a handle; all work on a
//! single session happens under that session's own mutex, so concurrent submits to the
//! same id are serialized rather than racing on the cursor.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::errors::AppError;
use crate::interview::metrics::MetricsSampler;
use crate::interview::questions::QuestionBank;
use crate::interview::state_machine::SubmitOutcome;
use crate::models::interview::{NewSession, Session};

pub type SessionHandle = Arc<Mutex<Session>>;

/// Random suffixes tried before falling back to a counter-qualified id.
const ID_DRAW_ATTEMPTS: usize = 8;

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
    /// Disambiguates ids once the random suffixes for a second are crowded.
    overflow_counter: AtomicU64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session and returns a snapshot of it.
    pub async fn create(
        &self,
        new: NewSession,
        bank: &QuestionBank,
        sampler: &dyn MetricsSampler,
    ) -> Session {
        self.create_at(new, bank, sampler, Utc::now()).await
    }

    async fn create_at(
        &self,
        new: NewSession,
        bank: &QuestionBank,
        sampler: &dyn MetricsSampler,
        now: DateTime<Utc>,
    ) -> Session {
        let mut sessions = self.sessions.write().await;
        let session_id = self.unused_session_id(&sessions, now);

        let session = Session::create(session_id.clone(), new, bank, sampler.sample(), now);
        sessions.insert(session_id.clone(), Arc::new(Mutex::new(session.clone())));

        info!(
            "Started session {session_id} for role '{}' ({} questions)",
            session.job_role,
            session.total_questions()
        );
        session
    }

    /// Tries a few random suffixes, then appends a process-wide counter. Counter-qualified
    /// ids carry an extra `_<n>` segment, so they never clash with plain ones.
    fn unused_session_id(
        &self,
        sessions: &HashMap<String, SessionHandle>,
        now: DateTime<Utc>,
    ) -> String {
        for _ in 0..ID_DRAW_ATTEMPTS {
            let candidate = generate_session_id(now);
            if !sessions.contains_key(&candidate) {
                return candidate;
            }
        }
        loop {
            let n = self.overflow_counter.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("{}_{n}", generate_session_id(now));
            if !sessions.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    async fn handle(&self, session_id: &str) -> Result<SessionHandle, AppError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or(AppError::SessionNotFound)
    }

    /// Records an answer and returns the outcome with a snapshot taken under the same lock.
    pub async fn submit(
        &self,
        session_id: &str,
        answer: String,
        sampler: &dyn MetricsSampler,
    ) -> Result<(SubmitOutcome, Session), AppError> {
        let handle = self.handle(session_id).await?;
        let mut session = handle.lock().await;

        let outcome = session.submit(answer, sampler.sample(), Utc::now())?;
        if session.is_complete() {
            info!(
                "Session {session_id} complete with {} answers",
                session.answers.len()
            );
        }
        Ok((outcome, session.clone()))
    }

    /// Copy of a session. Reads count as activity for idle eviction; nothing
    /// else in the record changes.
    pub async fn snapshot(&self, session_id: &str) -> Result<Session, AppError> {
        let handle = self.handle(session_id).await?;
        let mut session = handle.lock().await;
        session.last_activity = Utc::now();
        Ok(session.clone())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops sessions idle for longer than `ttl`. Returns how many were removed.
    pub async fn evict_idle(&self, ttl: Duration, now: DateTime<Utc>) -> usize {
        let ttl = match chrono::Duration::from_std(ttl) {
            Ok(ttl) => ttl,
            Err(_) => return 0,
        };
        let cutoff = now - ttl;

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        let mut expired = Vec::new();
        for (id, handle) in sessions.iter() {
            // A session busy under its own lock is in use right now; keep it.
            if let Ok(session) = handle.try_lock() {
                if session.last_activity < cutoff {
                    expired.push(id.clone());
                }
            }
        }
        for id in &expired {
            sessions.remove(id);
        }
        before - sessions.len()
    }
}

/// `session_<YYYYmmdd>_<HHMMSS>_<NNNN>` with a random four-digit suffix.
pub fn generate_session_id(now: DateTime<Utc>) -> String {
    let suffix: u16 = rand::thread_rng().gen_range(1000..=9999);
    format!("session_{}_{suffix}", now.format("%Y%m%d_%H%M%S"))
}

/// Background sweep for idle sessions. Runs until the runtime shuts down.
pub fn spawn_eviction_task(store: Arc<SessionStore>, ttl: Duration, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let removed = store.evict_idle(ttl, Utc::now()).await;
            if removed > 0 {
                info!("Evicted {removed} idle sessions ({} remaining)", store.len().await);
            }
        }
    });
}
