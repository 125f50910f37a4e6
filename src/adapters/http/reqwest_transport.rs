use reqwest::multipart::{Form, Part};

use crate::core::errors::{Result, Smk3Error};
use crate::core::traits::transport::{Body, Method, Request, Response, Transport};

/// `Transport` backed by `reqwest`, driven on a private current-thread
/// runtime so the rest of the client stays synchronous.
pub struct ReqwestTransport {
    runtime: tokio::runtime::Runtime,
    client: reqwest::Client,
    api_base: String,
}

impl ReqwestTransport {
    /// Create a transport for `<backend_url>/api`.
    pub fn new(backend_url: &str) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Smk3Error::Transport {
                reason: format!("Failed to create async runtime: {e}"),
            })?;

        let client = reqwest::Client::builder()
            .user_agent(format!("smk3/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Smk3Error::Transport {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            runtime,
            client,
            api_base: format!("{}/api", backend_url.trim_end_matches('/')),
        })
    }

    fn build(&self, request: &Request) -> Result<reqwest::RequestBuilder> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, self.url_for(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::File {
                field,
                filename,
                mime,
                bytes,
            } => {
                let part = Part::bytes(bytes.clone())
                    .file_name(filename.clone())
                    .mime_str(mime)
                    .map_err(|e| Smk3Error::Transport {
                        reason: format!("Invalid content type '{mime}': {e}"),
                    })?;
                builder.multipart(Form::new().part(field.clone(), part))
            }
        };
        Ok(builder)
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        let builder = self.build(request)?;
        let url = self.url_for(&request.path);

        self.runtime.block_on(async {
            let resp = builder.send().await.map_err(|e| Smk3Error::Transport {
                reason: format!("{} {url}: {e}", request.method.as_str()),
            })?;
            let status = resp.status().as_u16();
            let body = resp.bytes().await.map_err(|e| Smk3Error::Transport {
                reason: format!("Failed to read response from {url}: {e}"),
            })?;
            Ok::<_, Smk3Error>(Response {
                status,
                body: body.to_vec(),
            })
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}
