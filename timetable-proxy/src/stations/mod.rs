//! Intercity station name lookup.
//!
//! Maps the Korean station names the front-end sends to the place IDs
//! the intercity upstream expects. The table is loaded once at startup,
//! either from the built-in defaults or from a JSON file, and is
//! read-only afterwards.

mod error;
mod table;

pub use error::StationError;
pub use table::StationTable;
