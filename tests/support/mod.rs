#![allow(dead_code)]

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::Service;
use hyper::{Method, Request, Response};
use hyper_util::client::legacy::Client;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use roadway::{Road, RoadService};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot::{self, Sender};

#[path = "../../demo/app.rs"]
pub mod app;

pub struct Serve {
    addr: SocketAddr,
    tx: Sender<()>,
}

impl Serve {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn request(&self, method: Method, route: &str) -> Response<Incoming> {
        let client = Client::builder(TokioExecutor::new()).build_http::<Full<Bytes>>();
        let req = Request::builder()
            .method(method)
            .uri(format!("http://{}{}", self.addr(), route))
            .body(Full::new(Bytes::new()))
            .unwrap();
        client.request(req).await.unwrap()
    }

    pub async fn get(&self, route: &str) -> Response<Incoming> {
        self.request(Method::GET, route).await
    }

    pub fn shutdown(self) {
        let _ = self.tx.send(());
    }
}

pub async fn serve<E>(road: Road<Incoming, E>) -> Serve
where
    E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static,
{
    // Bind a TCP listener to an available port.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let road_service = Arc::new(RoadService::new(road).unwrap());
    let (tx, mut rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        loop {
            let (stream, _) = tokio::select! {
                conn = listener.accept() => conn.unwrap(),
                _ = &mut rx => break,
            };

            let road_service = road_service.clone();
            tokio::spawn(async move {
                let request_service = road_service.call(&stream).await.expect("RoadService failed");
                let io = TokioIo::new(stream);
                let builder = Builder::new(TokioExecutor::new());
                let _ = builder.serve_connection(io, request_service).await;
            });
        }
    });

    Serve { addr, tx }
}

pub fn demo_views() -> roadway::Views {
    roadway::Views::from_dir(app::views_dir()).unwrap()
}

pub fn content_type<B>(res: &Response<B>) -> &str {
    res.headers()[hyper::header::CONTENT_TYPE].to_str().unwrap()
}

pub async fn into_text<B>(body: B) -> String
where
    B: hyper::body::Body<Data = Bytes> + Send,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    String::from_utf8_lossy(&body.collect().await.unwrap().to_bytes()).to_string()
}
