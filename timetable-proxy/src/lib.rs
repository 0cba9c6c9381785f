//! Timetable proxy server.
//!
//! Forwards rail and subway timetable queries to Korean open-data APIs,
//! keeping the access key on the server and normalizing the upstream
//! response for a browser front-end.

pub mod classify;
pub mod config;
pub mod stations;
pub mod timetable;
pub mod upstream;
pub mod web;

#[cfg(test)]
mod test_support;
