// almoxa-api: Async Rust client for the almoxa tenant-scoped inventory API

pub mod client;
pub mod context;
pub mod entities;
pub mod error;
pub mod query;
pub mod request;
pub mod resource;
pub mod transport;
pub mod wire;

pub use client::ApiClient;
pub use context::{NoopHooks, RequestContext, SessionHooks};
pub use error::Error;
pub use query::ParamMap;
pub use request::{ActionMethod, Operation};
pub use resource::{Relation, Resource, Sharing};
pub use transport::{TlsMode, TransportConfig};
pub use wire::Document;
