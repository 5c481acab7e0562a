// Service exports
pub mod auth;
pub mod email;
pub mod llm;
pub mod memory;
pub mod postgres;
pub mod store;

pub use auth::{AuthError, AuthenticatedMatchmaker, Claims, JwtVerifier, Role};
pub use email::{EmailClient, EmailError, EmailMessage, Mailer};
pub use llm::{InsightGenerator, LlmClient, LlmError};
pub use memory::MemoryStore;
pub use postgres::PostgresClient;
pub use store::{CustomerStore, StoreError};
