pub mod request_context;
pub mod request_id;
pub mod request_source;

pub use request_context::RequestContext;
pub use request_id::RequestId;
pub use request_source::RequestSource;
