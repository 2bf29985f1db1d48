use std::time::Duration;

use reqwest::{
    header::{self, HeaderValue},
    Client, Method, Response, StatusCode,
};

pub const USER_AGENT: &str = concat!("apod-gallery/", env!("CARGO_PKG_VERSION"));

const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Status: {0}")]
    Status(StatusCode),

    #[error("Transport: {0}")]
    Transport(#[from] reqwest::Error),
}

pub fn client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(TIMEOUT)
        .build()
}

pub async fn request(
    client: &Client,
    method: Method,
    url: &str,
    query: &[(&str, &str)],
) -> Result<Response, Error> {
    let resp = client
        .request(method, url)
        .header(header::ACCEPT, HeaderValue::from_static("application/json"))
        .query(query)
        .send()
        .await?;

    let status = resp.status();

    if status.is_success() {
        Ok(resp)
    } else {
        Err(Error::Status(status))
    }
}

/// Renders `url?k=v&..` for logs, masking the values of `secret` keys.
pub fn redacted(url: &str, query: &[(&str, &str)], secret: &[&str]) -> String {
    let params = query
        .iter()
        .map(|(k, v)| {
            if secret.contains(k) {
                format!("{k}=***")
            } else {
                format!("{k}={v}")
            }
        })
        .collect::<Vec<_>>();

    if params.is_empty() {
        url.to_owned()
    } else {
        format!("{url}?{}", params.join("&"))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use super::*;

    pub(crate) fn ok_json(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Answers one request with `response`; the handle yields the request head.
    pub(crate) async fn serve_once(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut buf = Vec::new();
            let mut chunk = [0; 1024];

            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }

            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&buf).into_owned()
        });

        (format!("http://{addr}/planetary/apod"), handle)
    }

    /// A url nothing listens on.
    pub(crate) async fn closed_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        format!("http://{addr}/planetary/apod")
    }

    fn local() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    #[tokio::test]
    async fn non_success_is_status_error() {
        let (url, _) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_owned(),
        )
        .await;

        let err = request(&local(), Method::GET, &url, &[]).await.unwrap_err();

        assert!(matches!(err, Error::Status(status) if status == StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn success_passes_through() {
        let (url, _) = serve_once(ok_json("[]")).await;

        let resp = request(&local(), Method::GET, &url, &[("a", "1")]).await.unwrap();

        assert_eq!(resp.text().await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn refused_is_transport_error() {
        let err = request(&local(), Method::GET, &closed_url().await, &[])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn redacts_secret_params() {
        let url = redacted(
            "https://api.nasa.gov/planetary/apod",
            &[("api_key", "abc"), ("start_date", "2024-01-01")],
            &["api_key"],
        );

        assert_eq!(
            url,
            "https://api.nasa.gov/planetary/apod?api_key=***&start_date=2024-01-01"
        );
    }

    #[test]
    fn no_query() {
        assert_eq!(redacted("https://x", &[], &["api_key"]), "https://x");
    }
}
