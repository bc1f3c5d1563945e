use hyper::body::Incoming;
use hyper::service::Service;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use roadway::{Error, Road, RoadService, Views};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[path = "../demo/app.rs"]
mod app;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

fn road() -> roadway::Result<Road<Incoming, Error>> {
    let views = Views::from_dir(app::views_dir())?;

    app::builder(views)
        .on_complete(|done| match done.error {
            Some(err) => tracing::info!(
                method = %done.req_info.method(),
                uri = %done.req_info.uri(),
                status = err.status().as_u16(),
                "request failed"
            ),
            None => tracing::info!(
                method = %done.req_info.method(),
                uri = %done.req_info.uri(),
                status = done.response.status().as_u16(),
                "request done"
            ),
        })
        .build()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "roadway=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = std::env::var("ROADWAY_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_owned())
        .parse()?;

    // Create a Service from the road above to handle incoming requests.
    let service = Arc::new(RoadService::new(road()?)?);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, views = %app::views_dir().display(), "App is running");

    loop {
        let (stream, _) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) => {
                tracing::error!("Error accepting connection: {}", err);
                continue;
            }
        };

        let service = Arc::clone(&service);

        tokio::spawn(async move {
            let request_service = match service.call(&stream).await {
                Ok(request_service) => request_service,
                Err(err) => match err {},
            };

            let io = TokioIo::new(stream);
            let builder = Builder::new(TokioExecutor::new());
            if let Err(err) = builder.serve_connection(io, request_service).await {
                tracing::error!("Error serving connection: {:?}", err);
            }
        });
    }
}
