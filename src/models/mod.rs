//! Data models for grade-gate.
//!
//! - [`Grade`], [`GradeRange`]: the four letter bands and their inclusive score intervals
//! - [`GradeLabel`]: classification outcome, including the `F` and `?` cases
//! - [`Evaluation`]: one classified score with its input position
//! - [`RunSettings`]: driver defaults loaded from `grade-gate.yaml`

pub mod config;
pub mod grade;

pub use config::{RunSettings, SAMPLE_SCORES};
pub use grade::{Evaluation, Grade, GradeLabel, GradeRange};
