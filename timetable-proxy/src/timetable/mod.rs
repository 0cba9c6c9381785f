//! Inbound timetable queries.
//!
//! The raw query string of an inbound request is parsed into
//! [`QueryParams`] and then validated into one of the typed request
//! records. Validation is pure: it never touches the network or the
//! process environment, so every request type can be trusted once built.

mod error;
mod params;
mod request;

pub use error::ValidationError;
pub use params::QueryParams;
pub use request::{DayCode, IntercityTimetableRequest, ResponseFormat, SubwayTimetableRequest};
