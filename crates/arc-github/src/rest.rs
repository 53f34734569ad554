//! REST transport abstraction and its `ureq` implementation.
//!
//! The status client only needs one operation from the transport: GET a path
//! relative to the API root and hand back the decoded JSON document.
//! Authentication and connection handling live behind the [`RestClient`]
//! trait so tests can substitute an in-process fake.

use std::io::Read as _;

use url::Url;

use crate::config::{ClientConfig, API_VERSION};
use crate::error::TransportError;

/// Minimal REST surface needed by [`crate::StatusClient`].
pub trait RestClient: Send + Sync {
    /// GET `path` (relative to the API root, e.g. `repos/owner/name`) and
    /// return the decoded JSON body.
    fn get_json(&self, path: &str) -> Result<serde_json::Value, TransportError>;
}

/// Blocking GitHub REST client.
pub struct GitHubRest {
    agent: ureq::Agent,
    api_url: Url,
    token: Option<String>,
    user_agent: String,
}

impl GitHubRest {
    pub fn new(config: &ClientConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .into();
        GitHubRest {
            agent,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.api_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidUrl {
                url: format!("{}{path}", self.api_url),
                detail: e.to_string(),
            })
    }
}

impl RestClient for GitHubRest {
    fn get_json(&self, path: &str) -> Result<serde_json::Value, TransportError> {
        let url = self.resolve(path)?;

        let mut req = self
            .agent
            .get(url.as_str())
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", &self.user_agent);
        if let Some(token) = &self.token {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }

        tracing::debug!(url = %url, "GET");
        let resp = req.call().map_err(|e| TransportError::Http {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        let status: u16 = resp.status().into();
        let mut reader = resp.into_body().into_reader();
        let mut body = Vec::new();
        reader.read_to_end(&mut body)?;

        if !(200..300).contains(&status) {
            return Err(TransportError::Status {
                status,
                url: url.to_string(),
                body: String::from_utf8_lossy(&body).trim().to_string(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read as _, Write as _};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;

    /// Serve a single HTTP response and report the raw request head.
    fn serve_once(status_line: &str, body: &str) -> (Url, mpsc::Receiver<String>) {
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        let status_line = status_line.to_string();
        let body = body.to_string();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let _ = stream.set_read_timeout(Some(Duration::from_secs(1)));

            let mut buf = Vec::new();
            let mut tmp = [0u8; 4096];
            for _ in 0..64 {
                match stream.read(&mut tmp) {
                    Ok(0) => break,
                    Ok(n) => {
                        buf.extend_from_slice(&tmp[..n]);
                        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
            let _ = tx.send(String::from_utf8_lossy(&buf).to_string());

            let resp = format!(
                "HTTP/1.1 {status_line}\r\n\
Content-Type: application/json\r\n\
Content-Length: {}\r\n\
Connection: close\r\n\
\r\n\
{body}",
                body.len()
            );
            stream.write_all(resp.as_bytes()).unwrap();
            let _ = stream.flush();
        });

        (Url::parse(&format!("http://{addr}/")).unwrap(), rx)
    }

    fn client(api_url: Url, token: Option<&str>) -> GitHubRest {
        GitHubRest::new(&ClientConfig {
            api_url,
            token: token.map(str::to_string),
            user_agent: "arc-test".to_string(),
            timeout: Duration::from_secs(5),
        })
    }

    #[test]
    fn get_json_sends_headers_and_decodes_body() {
        let (url, requests) = serve_once(
            "200 OK",
            r#"{"archived":true,"pushed_at":"2024-01-01T00:00:00Z"}"#,
        );
        let rest = client(url, Some("secret"));

        let value = rest.get_json("repos/x/y").unwrap();
        assert_eq!(value["archived"], serde_json::Value::Bool(true));

        let head = requests.recv().unwrap().to_lowercase();
        assert!(head.starts_with("get /repos/x/y "), "request: {head}");
        assert!(head.contains("authorization: bearer secret"));
        assert!(head.contains("accept: application/vnd.github+json"));
        assert!(head.contains("user-agent: arc-test"));
    }

    #[test]
    fn get_json_without_token_omits_authorization() {
        let (url, requests) = serve_once("200 OK", "{}");
        let rest = client(url, None);

        rest.get_json("/repos/x/y").unwrap();
        let head = requests.recv().unwrap().to_lowercase();
        assert!(!head.contains("authorization:"));
    }

    #[test]
    fn get_json_reports_status_and_body() {
        let body = r#"{"message":"Not Found"}"#;
        let (url, _requests) = serve_once("404 Not Found", body);
        let rest = client(url, None);

        let err = rest.get_json("repos/x/missing").unwrap_err();
        match &err {
            TransportError::Status { status, body, .. } => {
                assert_eq!(*status, 404);
                assert!(body.contains("Not Found"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn get_json_rejects_malformed_body() {
        let (url, _requests) = serve_once("200 OK", "not json");
        let rest = client(url, None);

        assert!(matches!(
            rest.get_json("repos/x/y"),
            Err(TransportError::Json(_))
        ));
    }
}
