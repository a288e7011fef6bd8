pub mod date;
pub mod location;
pub mod table;

pub use date::{resolve_date, DateParseError, ResolvedDate};
pub use location::{resolve_location, LocationOutcome};
pub use table::{entry_for_code, LocationEntry};
