//! Resource representations returned by KIE Server.
//!
//! Field names follow the server's kebab-case JSON. Unknown fields are
//! ignored so newer servers stay readable.

mod container;
mod date;
mod process;
mod response;
mod task;

pub use container::*;
pub use date::KieDate;
pub use process::*;
pub use response::*;
pub use task::*;
