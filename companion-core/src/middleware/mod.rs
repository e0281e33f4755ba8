pub mod metrics;
pub mod request_id;
pub mod security_headers;

pub use request_id::{make_request_span, request_id_middleware, REQUEST_ID_HEADER};
pub use security_headers::security_headers_middleware;
