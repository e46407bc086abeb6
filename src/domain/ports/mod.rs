mod backend_client;
mod poi_repository;

pub use backend_client::BackendClient;
pub use poi_repository::PoiRepository;
