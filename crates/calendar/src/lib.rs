//! # mrr-calendar
//!
//! Calendar-month arithmetic for monthly revenue series.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["\"2024-12\" / \"2024-12-01\""] -->|".parse()"| B["Period"]
//!     B -->|".next()"| B
//!     B -->|".offset(n)"| B
//!     B -->|"month_sequence()"| C["Vec of Period"]
//!     B -->|"Display"| D["\"2024-12-01\""]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use mrr_calendar::{Period, month_sequence};
//!
//! let last: Period = "2024-12-01".parse().unwrap();
//! let horizon = month_sequence(last.next(), 12);
//! assert_eq!(horizon[0].to_string(), "2025-01-01");
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `period` | Calendar-month newtype with ordering and arithmetic |
//! | `sequence` | Contiguous month sequence generation |
//! | `error` | Error types |

mod error;
mod period;
mod sequence;

pub use error::CalendarError;
pub use period::Period;
pub use sequence::month_sequence;
