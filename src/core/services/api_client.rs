use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::errors::{Result, Smk3Error};
use crate::core::traits::notifier::Notifier;
use crate::core::traits::token_store::TokenStore;
use crate::core::traits::transport::{Body, Method, Request, Response, Transport};

/// Shown once per process when the backend rejects the stored token.
pub const SESSION_EXPIRED: &str = "Sesi Anda telah berakhir. Silakan login kembali: smk3 auth login";

/// Backend client shared by every page.
///
/// Wraps a `Transport` with the two global interceptors: outgoing requests
/// get `Authorization: Bearer <token>` when a token is stored, and a 401 on
/// an authenticated request clears the token and sends the user back to
/// the auth page. That redirect happens at most once per client.
pub struct ApiClient {
    transport: Box<dyn Transport>,
    tokens: Box<dyn TokenStore>,
    notifier: Arc<dyn Notifier>,
    redirected: AtomicBool,
}

impl ApiClient {
    pub fn new(
        transport: Box<dyn Transport>,
        tokens: Box<dyn TokenStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            transport,
            tokens,
            notifier,
            redirected: AtomicBool::new(false),
        }
    }

    /// Send a request through both interceptors.
    ///
    /// Non-2xx responses come back as `Err`: 401 as `Unauthorized`, other
    /// 4xx as `Rejected` and 5xx as `Server`, each with the server's
    /// `detail` when it sent a string one.
    pub fn send(&self, mut request: Request) -> Result<Response> {
        let token = self.token();
        if let Some(token) = &token {
            request
                .headers
                .push(("Authorization".into(), format!("Bearer {token}")));
        }

        tracing::debug!(
            method = request.method.as_str(),
            path = %request.path,
            authenticated = request.header("Authorization").is_some(),
            "request"
        );
        let response = self.transport.send(&request)?;
        tracing::debug!(
            method = request.method.as_str(),
            path = %request.path,
            status = response.status,
            "response"
        );

        if response.is_success() {
            return Ok(response);
        }

        let detail = error_detail(&response);
        match response.status {
            401 => {
                if token.is_some() {
                    self.redirect_to_auth();
                }
                Err(Smk3Error::Unauthorized { detail })
            }
            status @ 400..=499 => Err(Smk3Error::Rejected { status, detail }),
            status => {
                tracing::warn!(status, path = %request.path, "server error");
                if let Some(detail) = &detail {
                    tracing::debug!(status, %detail, "server error detail");
                }
                Err(Smk3Error::Server { status, detail })
            }
        }
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch(Request::new(Method::Get, path))
    }

    pub fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.fetch(Request::new(Method::Post, path).body(json_body(body)?))
    }

    /// POST without a body (`/audit/analyze/{id}`, `/reports/generate`, ...).
    pub fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch(Request::new(Method::Post, path))
    }

    pub fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.fetch(Request::new(Method::Put, path).body(json_body(body)?))
    }

    pub fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch(Request::new(Method::Delete, path))
    }

    /// Binary GET (previews, downloads, archives).
    pub fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        Ok(self.send(Request::new(Method::Get, path))?.body)
    }

    /// Multipart upload of one file under the `file` field.
    pub fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        filename: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<T> {
        let body = Body::File {
            field: "file".into(),
            filename: filename.into(),
            mime: mime.into(),
            bytes,
        };
        self.fetch(Request::new(Method::Post, path).body(body))
    }

    /// Send any request and decode its JSON body.
    pub fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let path = request.path.clone();
        let response = self.send(request)?;
        serde_json::from_slice(&response.body).map_err(|e| Smk3Error::InvalidPayload {
            endpoint: path,
            reason: e.to_string(),
        })
    }

    /// Absolute URL of an API path, for links opened outside the client.
    pub fn url(&self, path: &str) -> String {
        self.transport.url_for(path)
    }

    pub fn token(&self) -> Option<String> {
        match self.tokens.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored token");
                None
            }
        }
    }

    pub fn store_token(&self, token: &str) -> Result<()> {
        self.tokens.save(token)
    }

    pub fn clear_token(&self) {
        if let Err(e) = self.tokens.clear() {
            tracing::warn!(error = %e, "could not clear stored token");
        }
    }

    /// Whether a 401 already sent the user back to the auth page.
    pub fn redirected_to_auth(&self) -> bool {
        self.redirected.load(Ordering::SeqCst)
    }

    fn redirect_to_auth(&self) {
        if self.redirected.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::debug!("401 on authenticated request, dropping session");
        self.clear_token();
        self.notifier.error(SESSION_EXPIRED);
    }
}

fn json_body<B: Serialize>(body: &B) -> Result<Body> {
    serde_json::to_value(body)
        .map(Body::Json)
        .map_err(|e| Smk3Error::Validation {
            detail: format!("Cannot encode request body: {e}"),
        })
}

/// The `detail` string of an error body, as FastAPI-style backends send it.
/// Structured details (validation arrays) are ignored.
fn error_detail(response: &Response) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(&response.body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::test_support::{Harness, reply};
    use serde_json::json;

    #[test]
    fn attaches_bearer_token_when_stored() {
        let h = Harness::with_token("tok-1");
        h.transport.push(reply(200, json!([])));

        let _: Vec<serde_json::Value> = h.api().get("/criteria").unwrap();

        let sent = h.transport.requests();
        assert_eq!(sent[0].header("authorization"), Some("Bearer tok-1"));
    }

    #[test]
    fn no_header_without_token() {
        let h = Harness::new();
        h.transport.push(reply(200, json!({"ok": true})));

        let _: serde_json::Value = h.api().get("/").unwrap();

        assert_eq!(h.transport.requests()[0].header("Authorization"), None);
    }

    #[test]
    fn unauthorized_clears_token_and_redirects_once() {
        let h = Harness::with_token("stale");
        h.transport
            .push(reply(401, json!({"detail": "Token has expired"})));
        h.transport
            .push(reply(401, json!({"detail": "Token has expired"})));
        let api = h.api();

        let first = api.get::<serde_json::Value>("/criteria").unwrap_err();
        assert!(first.is_unauthorized());
        assert!(api.redirected_to_auth());
        assert_eq!(h.tokens.current(), None);

        // Second failure: token is already gone, no second redirect notice.
        let _ = api.get::<serde_json::Value>("/clauses");
        assert_eq!(h.notifier.errors_matching(SESSION_EXPIRED), 1);
    }

    #[test]
    fn concurrent_401s_redirect_exactly_once() {
        let h = Harness::with_token("stale");
        for _ in 0..3 {
            h.transport.push(reply(401, json!({})));
        }
        let api = h.api();
        // Simulate requests that were all in flight with the old token.
        for _ in 0..3 {
            h.tokens.set("stale");
            let _ = api.get::<serde_json::Value>("/audit/dashboard");
        }
        assert_eq!(h.notifier.errors_matching(SESSION_EXPIRED), 1);
    }

    #[test]
    fn anonymous_401_does_not_redirect() {
        let h = Harness::new();
        h.transport
            .push(reply(401, json!({"detail": "Invalid email or password"})));
        let api = h.api();

        let err = api
            .post::<_, serde_json::Value>("/auth/login", &json!({}))
            .unwrap_err();

        assert_eq!(err.notice("Login gagal"), "Invalid email or password");
        assert!(!api.redirected_to_auth());
        assert_eq!(h.notifier.errors_matching(SESSION_EXPIRED), 0);
    }

    #[test]
    fn client_and_server_errors_are_classified() {
        let h = Harness::new();
        h.transport
            .push(reply(403, json!({"detail": "Only admins can seed data"})));
        h.transport.push(reply(500, json!({"detail": "boom"})));
        let api = h.api();

        let rejected = api.post_empty::<serde_json::Value>("/seed-data").unwrap_err();
        assert!(matches!(rejected, Smk3Error::Rejected { status: 403, .. }));

        let server = api.post_empty::<serde_json::Value>("/reports/generate").unwrap_err();
        assert!(matches!(server, Smk3Error::Server { status: 500, .. }));
        assert_eq!(server.notice("Gagal membuat laporan"), "Gagal membuat laporan");
    }

    #[test]
    fn validation_array_detail_is_ignored() {
        let h = Harness::new();
        h.transport.push(reply(
            422,
            json!({"detail": [{"loc": ["body", "order"], "msg": "field required"}]}),
        ));
        let err = h
            .api()
            .post::<_, serde_json::Value>("/criteria", &json!({}))
            .unwrap_err();
        assert_eq!(err.notice("Gagal menambahkan kriteria"), "Gagal menambahkan kriteria");
    }

    #[test]
    fn upload_sends_multipart_file_field() {
        let h = Harness::new();
        h.transport.push(reply(200, json!({"id": "d-1"})));

        let _: serde_json::Value = h
            .api()
            .upload("/clauses/c-1/upload", "bukti.pdf", "application/pdf", b"%PDF".to_vec())
            .unwrap();

        let sent = h.transport.requests();
        match &sent[0].body {
            Body::File {
                field, filename, ..
            } => {
                assert_eq!(field, "file");
                assert_eq!(filename, "bukti.pdf");
            }
            other => panic!("expected file body, got {other:?}"),
        }
    }

    #[test]
    fn undecodable_body_is_invalid_payload() {
        let h = Harness::new();
        h.transport.push(Response {
            status: 200,
            body: b"<html>".to_vec(),
        });
        let err = h.api().get::<Vec<String>>("/criteria").unwrap_err();
        assert!(matches!(err, Smk3Error::InvalidPayload { .. }));
    }
}
