//! Tower Service implementations

pub mod core;
pub mod request;
pub mod response;

pub use self::core::A2AProtocolService;
pub use request::{A2ARequest, RequestContext};
pub use response::A2AResponse;

use tower::util::BoxCloneSyncService;

use crate::protocol::error::A2AError;

/// Type-erased client service stack (protocol service plus the configured layers)
pub type A2AService = BoxCloneSyncService<A2ARequest, A2AResponse, A2AError>;
