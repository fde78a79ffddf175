//! Services module - grade band validation and score classification.
//!
//! - [`GradeThresholds`]: reads the Total, A, B, C and D ranges from a
//!   [`ConfigStore`](crate::config::ConfigStore), validates their ordering and
//!   classifies scores.
//! - [`GradeError`]: validation, lookup and input failures.
//!
//! The services are pure: once thresholds are built they never touch the
//! filesystem again and can be shared across threads.
//!
//! ```ignore
//! use grade_gate::config::ConfigStore;
//! use grade_gate::services::GradeThresholds;
//!
//! let store = ConfigStore::open("grade.ini")?;
//! let thresholds = GradeThresholds::new(store)?;
//! for evaluation in thresholds.evaluate_all(&[95, 72, 12])? {
//!     println!("{evaluation}");
//! }
//! ```

pub mod grading;

pub use grading::{GradeError, GradeThresholds, Relation};
