use crate::types::{Resolution, RouteParams};
use std::net::SocketAddr;

// Routing metadata carried in the request extensions.
#[derive(Debug, Clone, Default)]
pub(crate) struct RequestMeta {
    route_params: Option<RouteParams>,
    remote_addr: Option<SocketAddr>,
    resolution: Option<Resolution>,
}

impl RequestMeta {
    pub fn with_remote_addr(remote_addr: SocketAddr) -> RequestMeta {
        RequestMeta {
            remote_addr: Some(remote_addr),
            ..Default::default()
        }
    }

    pub fn with_resolution(resolution: Resolution, route_params: RouteParams) -> RequestMeta {
        RequestMeta {
            route_params: Some(route_params),
            resolution: Some(resolution),
            ..Default::default()
        }
    }

    pub fn extend(&mut self, other: RequestMeta) {
        if let Some(other_params) = other.route_params {
            match self.route_params {
                Some(ref mut params) => params.extend(other_params),
                None => self.route_params = Some(other_params),
            }
        }

        if other.remote_addr.is_some() {
            self.remote_addr = other.remote_addr;
        }

        if other.resolution.is_some() {
            self.resolution = other.resolution;
        }
    }

    pub fn route_params(&self) -> Option<&RouteParams> {
        self.route_params.as_ref()
    }

    pub fn remote_addr(&self) -> Option<&SocketAddr> {
        self.remote_addr.as_ref()
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }
}
