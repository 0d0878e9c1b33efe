//! 로컬에 HTTP 서버를 띄우고, 같은 프로세스에서 reqwest 로 여러 형태의 요청을 보내보는 예제
//!
//! ```not_rust
//! cargo run -p example-http-client-server
//! ```

mod client;
mod server;


use std::future::Future;

use tokio::sync::oneshot;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        // stdout 은 println! 결과 전용, 로그는 stderr 로
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // 서버가 바인딩한 주소를 한 번만 넘겨받는 채널
    let (addr_tx, addr_rx) = oneshot::channel();

    tokio::spawn(async move {
        if let Err(err) = server::start_server(addr_tx).await {
            tracing::error!("server failed: {err:#}");
        }
    });

    // 주소를 받기 전에는 어떤 요청도 보내지 않음
    let server_url = format!("http://{}", addr_rx.await?);
    println!("Server started at: {server_url}");

    report("run_get body", client::run_get(&server_url)).await;
    report("run_get_full_req resp", client::run_get_full_req(&server_url)).await;
    report("run_transport_and_post", client::run_transport_and_post(&server_url)).await;

    Ok(())
}

/// 요청 하나를 끝까지 기다린 뒤 결과를 출력. 실패해도 다음 단계로 넘어간다.
async fn report<F>(label: &str, call: F)
where
    F: Future<Output = anyhow::Result<String>>,
{
    match call.await {
        Ok(body) => println!("{label} {body:?}\n\n"),
        Err(err) => println!("error happened: {err:#}"),
    }
}
