use std::{net::SocketAddr, time::Duration};

use axum::Router;
use bs_api::{auth::SessionCookie, RequestConfig};
use tokio::net::TcpListener;

pub const SESSION: &str = "session=abc123";

/// Serves `app` on an ephemeral local port for the rest of the test
pub async fn serve(app: Router) -> SocketAddr {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();

	tokio::spawn(async move {
		axum::serve(listener, app).await.unwrap();
	});

	addr
}

pub fn config(addr: SocketAddr) -> RequestConfig {
	RequestConfig::new(format!("http://{addr}/"), Duration::from_secs(5))
		.unwrap()
		.with_session(Some(SessionCookie::new(SESSION)))
}
