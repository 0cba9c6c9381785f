//! Web layer for the timetable proxy.
//!
//! Provides the timetable endpoints, CORS headers, and the mapping from
//! pipeline failures to JSON error responses.

mod error;
mod reply;
mod routes;
mod state;


pub use error::{ErrorBody, ProxyError, panic_response};
pub use reply::{ProxyReply, XML_CONTENT_TYPE};
pub use routes::create_router;
pub use state::AppState;
