pub mod access_token;
pub mod contact;
pub mod memory;
pub mod user;

pub use access_token::PostgresAccessTokenRepository;
pub use contact::PostgresContactRepository;
pub use memory::InMemoryAccessTokenRepository;
pub use memory::InMemoryContactRepository;
pub use memory::InMemoryUserRepository;
pub use user::PostgresUserRepository;
