//! HTTP transport adapter for jwrap.
//! Exposes the endpoint over `GET`/`POST` on a configurable path, behind
//! an access gate, plus liveness and readiness probes.

mod error;
pub mod gate;
pub mod router;
pub mod server;

pub use error::HttpTransportError;
pub use gate::AccessPolicy;
pub use router::{build_router, AppState};
pub use server::HttpServer;
