//! 데모용 HTTP 서버
//!
//! - `/raw_body` : 요청 바디를 그대로 돌려주는 라우트 (모든 메서드)
//! - 그 외 모든 경로 : 요청 URL 의 path / query 를 텍스트로 보여주는 라우트

use std::fmt;

use anyhow::Context;
use axum::{
    body::Body,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use http_body_util::BodyExt; // for `collect`
use tokio::{net::TcpListener, sync::oneshot};
use tower_http::trace::TraceLayer;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// 라우터 구성. 테스트에서도 서버 없이 바로 호출할 수 있도록 함수로 분리
pub fn app() -> Router {
    Router::new()
        // `/raw_body` 는 메서드와 상관없이 바디를 에코
        .route("/raw_body", any(raw_body_handler))
        // 매칭되지 않는 나머지 경로는 전부 root 핸들러가 처리
        .fallback(root_handler)
        .layer(TraceLayer::new_for_http())
}

/// 임시 포트(0번)로 바인딩 후 실제 주소를 `addr_tx` 로 한 번만 알려주고 계속 서비스한다.
pub async fn start_server(addr_tx: oneshot::Sender<String>) -> anyhow::Result<()> {
    let listener = TcpListener::bind("0.0.0.0:0")
        .await
        .context("failed to bind ephemeral port")?;

    let addr = listener
        .local_addr()
        .context("failed to read bound address")?
        .to_string();

    tracing::debug!("listening on {addr}");

    // 받는 쪽이 이미 사라졌어도 서버는 계속 동작
    if let Err(addr) = addr_tx.send(addr) {
        tracing::warn!(%addr, "address receiver dropped before hand-off");
    }

    axum::serve(listener, app())
        .await
        .context("server terminated")?;

    Ok(())
}

/// 요청 URL 중 path 와 query 만 안정적인 형식으로 보여주기 위한 타입
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl {
    pub path: String,
    pub query: String,
}

impl From<&Uri> for RequestUrl {
    fn from(uri: &Uri) -> Self {
        Self {
            path: uri.path().to_owned(),
            query: uri.query().unwrap_or_default().to_owned(),
        }
    }
}

impl fmt::Display for RequestUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path={:?} query={:?}", self.path, self.query)
    }
}

/// GET / (및 fallback) 핸들러
async fn root_handler(uri: Uri) -> impl IntoResponse {
    let url = RequestUrl::from(&uri);
    tracing::debug!(%url, "root request");

    (
        [(header::CONTENT_TYPE, TEXT_PLAIN)],
        format!("getHandler: incoming request\ngetHandler: r.Url {url}\n"),
    )
}

/// 바디 전체를 메모리로 읽은 뒤 그대로 붙여서 응답.
/// 바디는 값으로 소비되므로 성공/실패 어느 경우든 여기서 해제된다.
async fn raw_body_handler(body: Body) -> Result<Response, BodyReadError> {
    let bytes = body.collect().await?.to_bytes();
    tracing::debug!("raw body of {} bytes", bytes.len());

    let prefix = b"postHandler: raw body ";
    let mut echoed = Vec::with_capacity(prefix.len() + bytes.len() + 1);
    echoed.extend_from_slice(prefix);
    echoed.extend_from_slice(&bytes);
    echoed.push(b'\n');

    Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], echoed).into_response())
}

/// 요청 바디 읽기 실패. 500 과 함께 에러 문자열만 그대로 내려준다.
#[derive(Debug)]
pub struct BodyReadError(axum::Error);

impl From<axum::Error> for BodyReadError {
    fn from(err: axum::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for BodyReadError {
    fn into_response(self) -> Response {
        tracing::error!(err = %self.0, "failed to read request body");
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}
