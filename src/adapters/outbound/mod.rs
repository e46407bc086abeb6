mod memory_poi_repo;
mod postgrest_client;

pub use memory_poi_repo::InMemoryPoiRepository;
pub use postgrest_client::PostgrestClient;
