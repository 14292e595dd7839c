use crate::{http::create_app, local_appointments::LocalAppointments, types::Slot};
use futures::StreamExt;
use reqwest::Url;
use std::time::Duration;
use tokio::{net::TcpListener, task::JoinHandle, time::timeout};
use tokio_stream::wrappers::WatchStream;

/// Runs the in-memory store on an ephemeral port. Returns the server task, its
/// base URL (with trailing slash) and the backend behind it.
pub async fn spawn_store() -> (JoinHandle<()>, Url, LocalAppointments) {
    let backend = LocalAppointments::default();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let app = create_app(backend.clone());

    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let base_url = Url::parse(&format!("http://{address}/")).unwrap();
    (server, base_url, backend)
}

/// Address on which nothing listens.
pub async fn unreachable_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{address}/")).unwrap()
}

pub async fn read_from_slot_stream(stream: &mut WatchStream<Vec<Slot>>) -> Vec<Slot> {
    timeout(Duration::from_secs(1), stream.next())
        .await
        .expect("no slot update received")
        .expect("slot stream closed")
}
