#![allow(dead_code)]

use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use assert_cmd::cargo::cargo_bin_cmd;
use tiny_http::{Header, Response, Server, StatusCode};

/// Run smk3 against `backend` with its config dir in `home`.
pub fn smk3(backend: &MockBackend, home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("smk3");
    cmd.env("SMK3_HOME", home)
        .env("SMK3_BACKEND_URL", &backend.url)
        .env("NO_COLOR", "1")
        .env_remove("SMK3_PASSWORD")
        .env_remove("SMK3_LOG");
    cmd
}

/// One canned answer of the mock backend.
#[derive(Clone)]
pub struct Stub {
    method: String,
    path: String,
    status: u16,
    body: Vec<u8>,
    content_type: &'static str,
    token: Option<String>,
    once: bool,
}

impl Stub {
    pub fn json(method: &str, path: &str, status: u16, body: serde_json::Value) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            status,
            body: serde_json::to_vec(&body).unwrap(),
            content_type: "application/json",
            token: None,
            once: false,
        }
    }

    pub fn bytes(method: &str, path: &str, body: &[u8]) -> Self {
        Self {
            content_type: "application/octet-stream",
            body: body.to_vec(),
            ..Self::json(method, path, 200, serde_json::Value::Null)
        }
    }

    /// Answer 401 unless the request carries `Bearer <token>`.
    pub fn authorized(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Answer only the first matching request; later ones fall through.
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }
}

/// A request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// In-process HTTP backend answering from a list of stubs.
pub struct MockBackend {
    pub url: String,
    log: Arc<Mutex<Vec<Recorded>>>,
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl MockBackend {
    pub fn start(stubs: Vec<Stub>) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let url = format!("http://{}", server.server_addr());
        let log = Arc::new(Mutex::new(Vec::new()));
        let stop = Arc::new(AtomicBool::new(false));

        let thread_log = Arc::clone(&log);
        let thread_stop = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            let mut stubs: Vec<(Stub, bool)> = stubs.into_iter().map(|s| (s, false)).collect();
            while !thread_stop.load(Ordering::Relaxed) {
                let mut req = match server.recv_timeout(Duration::from_millis(100)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let method = req.method().to_string();
                let url = req.url().to_string();
                let path = url.split('?').next().unwrap_or_default().to_string();
                let authorization = req
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string());
                let mut body = Vec::new();
                let _ = req.as_reader().read_to_end(&mut body);
                thread_log.lock().unwrap().push(Recorded {
                    method: method.clone(),
                    url,
                    authorization: authorization.clone(),
                    body,
                });

                let found = stubs
                    .iter_mut()
                    .find(|(s, used)| s.method == method && s.path == path && !(s.once && *used));
                let response = match found {
                    Some((stub, used)) => {
                        *used = true;
                        let expected = stub.token.as_ref().map(|t| format!("Bearer {t}"));
                        if expected.is_some() && expected != authorization {
                            json_response(401, br#"{"detail":"Could not validate credentials"}"#)
                        } else {
                            Response::from_data(stub.body.clone())
                                .with_status_code(StatusCode(stub.status))
                                .with_header(
                                    Header::from_bytes("Content-Type", stub.content_type).unwrap(),
                                )
                        }
                    }
                    None => json_response(404, br#"{"detail":"Not Found"}"#),
                };
                let _ = req.respond(response);
            }
        });

        Self {
            url,
            log,
            stop,
            handle: Some(handle),
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    /// `"METHOD /path?query"` of every request received.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url))
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn json_response(status: u16, body: &[u8]) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_data(body.to_vec())
        .with_status_code(StatusCode(status))
        .with_header(Header::from_bytes("Content-Type", "application/json").unwrap())
}

pub fn user(role: &str) -> serde_json::Value {
    serde_json::json!({
        "id": format!("u-{role}"),
        "email": format!("{role}@x.com"),
        "name": format!("Budi {role}"),
        "role": role,
        "created_at": "2026-01-05T08:00:00"
    })
}

/// `GET /api/auth/me` for `role`, guarded by `token`.
pub fn me(role: &str, token: &str) -> Stub {
    Stub::json("GET", "/api/auth/me", 200, user(role)).authorized(token)
}

/// Write a session token into the config dir.
pub fn sign_in(home: &Path, token: &str) {
    std::fs::write(home.join("token"), token).unwrap();
}

pub fn clause(id: &str, criteria_id: &str, number: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "criteria_id": criteria_id,
        "clause_number": number,
        "title": title,
        "description": "Persyaratan klausul",
        "knowledge_base": null,
        "created_at": "2026-01-05T08:00:00"
    })
}

/// Same clause with a knowledge base configured, so the AI analysis is offered.
pub fn analyzable_clause(id: &str, criteria_id: &str, number: &str, title: &str) -> serde_json::Value {
    let mut value = clause(id, criteria_id, number, title);
    value["knowledge_base"] = serde_json::json!("Kebijakan K3 tertulis, bertanggal dan ditandatangani pimpinan");
    value
}

/// Reply of the backend's update and delete routes.
pub fn message(text: &str) -> serde_json::Value {
    serde_json::json!({ "message": text })
}

pub fn document(id: &str, clause_id: &str, filename: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "clause_id": clause_id,
        "filename": filename,
        "file_id": "gridfs-1",
        "mime_type": "application/pdf",
        "size": 52_431,
        "uploaded_by": "u-auditee",
        "uploaded_at": "2026-02-10T09:15:00"
    })
}

pub fn audit_result(clause_id: &str, score: f64) -> serde_json::Value {
    serde_json::json!({
        "id": "ar-1",
        "clause_id": clause_id,
        "status": if score >= 70.0 { "Sesuai" } else { "Belum Sesuai" },
        "score": score,
        "reasoning": "Kebijakan K3 ditandatangani pimpinan",
        "feedback": "Dokumen lengkap",
        "improvement_suggestions": "Sosialisasikan ke seluruh pekerja",
        "audited_at": "2026-02-11T10:00:00",
        "audited_by": "u-auditor",
        "auditor_status": null,
        "auditor_notes": null,
        "agreed_date": null
    })
}
