pub use self::request_service::{RequestService, RequestServiceBuilder};
pub use self::road_service::RoadService;

mod request_service;
mod road_service;
