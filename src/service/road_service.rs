use crate::road::Road;
use crate::service::request_service::{RequestService, RequestServiceBuilder};
use hyper::service::Service;
use std::convert::Infallible;
use std::future::{ready, Ready};
use std::net::SocketAddr;
use tokio::net::TcpStream;

/// A [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) which hands out a [`RequestService`](./struct.RequestService.html)
/// for every accepted connection, remembering the peer address for [`RequestInfo`](./struct.RequestInfo.html).
///
/// The road is shared between all connections. See the [crate example](./index.html#basic-example) for a full server loop.
///
/// ```
/// use hyper::body::Incoming;
/// use roadway::{Controller, Reply, Road, RoadService};
/// use std::convert::Infallible;
///
/// let road: Road<Incoming, Infallible> = Road::builder()
///     .controller(Controller::new("index").action("index", |_| async move { Ok(Reply::text("Home page")) }))
///     .build()
///     .unwrap();
/// let service = RoadService::new(road).unwrap();
/// ```
#[derive(Debug)]
pub struct RoadService<B, E> {
    builder: RequestServiceBuilder<B, E>,
}

impl<B, E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static> RoadService<B, E> {
    /// Creates a new service with the provided road.
    pub fn new(road: Road<B, E>) -> crate::Result<RoadService<B, E>> {
        let builder = RequestServiceBuilder::new(road)?;
        Ok(RoadService { builder })
    }
}

impl<B, E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static> Service<&TcpStream> for RoadService<B, E> {
    type Response = RequestService<B, E>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, conn: &TcpStream) -> Self::Future {
        let addr = conn.peer_addr().unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 0)));
        ready(Ok(self.builder.build(addr)))
    }
}
