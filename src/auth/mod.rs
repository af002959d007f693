pub mod cookie;
pub mod extractors;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use extractors::AuthSession;
