//! reqwest 로 데모 서버에 요청을 보내는 세 가지 방법
//!
//! 1. `reqwest::get` 으로 간단히 GET
//! 2. 요청 객체를 직접 만들어 헤더를 붙인 GET
//! 3. 타임아웃/커넥션 풀을 직접 설정한 클라이언트로 POST

use std::time::Duration;

use anyhow::Context;
use reqwest::{header, Client, Method};

pub const GET_QUERY: &str = "param=123&param2=test";
pub const FULL_REQ_QUERY: &str = "id=42&user=rvasily";
pub const RAW_BODY: &str = r#"{"id": 42, "user": "rvasily"}"#;
pub const USER_AGENT: &str = "coursera/reqwest";

/// 세 번째 요청에서 사용하는 클라이언트 설정.
/// 값 자체는 예시용 기본값이다.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub connect_timeout: Duration,
    pub tcp_keepalive: Duration,
    pub max_idle_per_host: usize,
    pub request_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            tcp_keepalive: Duration::from_secs(30),
            max_idle_per_host: 100,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    pub fn build_client(&self) -> anyhow::Result<Client> {
        Client::builder()
            .connect_timeout(self.connect_timeout)
            .tcp_keepalive(self.tcp_keepalive)
            .pool_max_idle_per_host(self.max_idle_per_host)
            .timeout(self.request_timeout)
            .build()
            .context("failed to build http client")
    }
}

/// 기본 설정 클라이언트로 GET `/?param=123&param2=test`
pub async fn run_get(server_url: &str) -> anyhow::Result<String> {
    let url = format!("{server_url}/?{GET_QUERY}");
    tracing::debug!(%url, "simple get");

    let resp = reqwest::get(&url).await.context("GET request failed")?;

    resp.text().await.context("failed to read GET response body")
}

/// 요청을 직접 만들어 `User-Agent` 헤더를 지정한 GET
pub async fn run_get_full_req(server_url: &str) -> anyhow::Result<String> {
    let url = format!("{server_url}/?{FULL_REQ_QUERY}");
    tracing::debug!(%url, "get with custom header");

    let client = Client::new();
    let req = client
        .request(Method::GET, &url)
        .header(header::USER_AGENT, USER_AGENT)
        .build()
        .context("failed to build GET request")?;

    let resp = client
        .execute(req)
        .await
        .context("GET request with header failed")?;

    resp.text()
        .await
        .context("failed to read GET response body")
}

/// `TransportConfig` 로 만든 클라이언트로 `/raw_body` 에 JSON 모양의 raw 바디를 POST
pub async fn run_transport_and_post(server_url: &str) -> anyhow::Result<String> {
    let url = format!("{server_url}/raw_body");
    tracing::debug!(%url, "post with custom transport");

    let client = TransportConfig::default().build_client()?;

    let resp = client
        .post(&url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(RAW_BODY)
        .send()
        .await
        .context("POST request failed")?;

    resp.text()
        .await
        .context("failed to read POST response body")
}
