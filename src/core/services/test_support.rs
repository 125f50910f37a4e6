//! In-memory doubles for the ports, shared by the controller tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::core::errors::{Result, Smk3Error};
use crate::core::models::user::Role;
use crate::core::services::api_client::ApiClient;
use crate::core::services::session::Session;
use crate::core::traits::notifier::Notifier;
use crate::core::traits::token_store::TokenStore;
use crate::core::traits::transport::{Request, Response, Transport};

pub fn reply(status: u16, body: serde_json::Value) -> Response {
    Response {
        status,
        body: serde_json::to_vec(&body).unwrap(),
    }
}

/// Transport answering from a FIFO script and recording what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<Response>>>,
    sent: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn push(&self, response: Response) {
        self.script.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_unreachable(&self) {
        self.script.lock().unwrap().push_back(Err(Smk3Error::Transport {
            reason: "connection refused".into(),
        }));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.sent.lock().unwrap().clone()
    }

    /// `"METHOD /path"` of every request sent so far.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method.as_str(), r.path))
            .collect()
    }
}

impl Transport for Arc<ScriptedTransport> {
    fn send(&self, request: &Request) -> Result<Response> {
        self.sent.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(Smk3Error::Transport {
                    reason: format!("unscripted request {}", request.path),
                })
            })
    }

    fn url_for(&self, path: &str) -> String {
        format!("http://backend.test/api{path}")
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn current(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    pub fn set(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }
}

impl TokenStore for Arc<MemoryTokenStore> {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.current())
    }

    fn save(&self, token: &str) -> Result<()> {
        self.set(token);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

#[derive(Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<(Level, String)>>,
}

impl RecordingNotifier {
    fn of(&self, level: Level) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.of(Level::Success)
    }

    pub fn infos(&self) -> Vec<String> {
        self.of(Level::Info)
    }

    pub fn errors(&self) -> Vec<String> {
        self.of(Level::Error)
    }

    pub fn errors_matching(&self, message: &str) -> usize {
        self.errors().iter().filter(|m| *m == message).count()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((Level::Success, message.to_string()));
    }

    fn info(&self, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((Level::Info, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((Level::Error, message.to_string()));
    }
}

/// One set of doubles wired the way `main` wires the real adapters.
#[derive(Default)]
pub struct Harness {
    pub transport: Arc<ScriptedTransport>,
    pub tokens: Arc<MemoryTokenStore>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let h = Self::new();
        h.tokens.set(token);
        h
    }

    pub fn api(&self) -> ApiClient {
        ApiClient::new(
            Box::new(self.transport.clone()),
            Box::new(self.tokens.clone()),
            self.notifier.clone(),
        )
    }

    pub fn session(&self) -> Session {
        Session::new(self.api(), self.notifier.clone())
    }

    /// A restored session for a user with `role`; the `/auth/me` call is
    /// consumed so the script starts empty.
    pub fn signed_in(&self, role: Role) -> Session {
        self.tokens.set("tok-test");
        self.transport.push(reply(200, user_json(role)));
        let mut session = self.session();
        session.restore();
        assert!(session.is_authenticated());
        session
    }
}

pub fn user_json(role: Role) -> serde_json::Value {
    serde_json::json!({
        "id": format!("u-{role}"),
        "email": format!("{role}@x.com"),
        "name": format!("Test {}", role.label()),
        "role": role.as_str(),
        "created_at": "2026-01-01T00:00:00+00:00"
    })
}

pub fn criteria_json(id: &str, name: &str, order: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "description": format!("Deskripsi {name}"),
        "order": order
    })
}

pub fn clause_json(id: &str, criteria_id: &str, number: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "criteria_id": criteria_id,
        "clause_number": number,
        "title": format!("Klausul {number}"),
        "description": "Persyaratan",
        "knowledge_base": "Harus ada dokumen kebijakan"
    })
}

pub fn document_json(id: &str, clause_id: &str, filename: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "clause_id": clause_id,
        "filename": filename,
        "file_id": "f-1",
        "mime_type": "application/pdf",
        "size": 2048,
        "uploaded_by": "u-1",
        "uploaded_at": "2026-02-01T08:00:00+00:00"
    })
}

pub fn result_json(clause_id: &str, score: f64) -> serde_json::Value {
    serde_json::json!({
        "id": "r-1",
        "clause_id": clause_id,
        "score": score,
        "status": if score >= 70.0 { "Sesuai" } else { "Belum Sesuai" },
        "reasoning": "Dokumen memadai",
        "feedback": "Baik",
        "improvement_suggestions": "Tinjau tahunan",
        "audited_at": "2026-02-02T08:00:00+00:00"
    })
}
