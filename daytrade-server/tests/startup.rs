//! Server lifecycle without a reachable database

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use daytrade_server::serve;

async fn get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, addr
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn serves_health_while_database_is_down() {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy("postgres://daytrade@127.0.0.1:1/unused")
        .unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(serve(listener, pool, false, async move {
        let _ = stopped.await;
    }));

    let response = tokio::time::timeout(Duration::from_secs(5), get(addr, "/health"))
        .await
        .expect("health check timed out");
    assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
    assert!(response.contains(r#""status":"ok""#));

    stop.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("shutdown timed out")
        .unwrap()
        .unwrap();
}
