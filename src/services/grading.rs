use crate::config::{ConfigError, ConfigStore, ValueSource};
use crate::models::{Evaluation, Grade, GradeLabel, GradeRange};
use std::fmt;
use thiserror::Error;

/// Section holding the overall score bounds.
pub const TOTAL_SECTION: &str = "Total";

pub const DEFAULT_TOTAL_MIN: i32 = 0;
pub const DEFAULT_TOTAL_MAX: i32 = 100;

/// Comparison a validation rule requires between two quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LessThan,
    AtMost,
    GreaterThan,
    AtLeast,
}

impl Relation {
    fn holds(self, left: i32, right: i32) -> bool {
        match self {
            Relation::LessThan => left < right,
            Relation::AtMost => left <= right,
            Relation::GreaterThan => left > right,
            Relation::AtLeast => left >= right,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Relation::LessThan => "less than",
            Relation::AtMost => "at most",
            Relation::GreaterThan => "greater than",
            Relation::AtLeast => "at least",
        };
        f.write_str(text)
    }
}

/// Errors from loading grade bands or evaluating scores.
#[derive(Error, Debug)]
pub enum GradeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid grade range: {left} ({left_value}) is not {relation} {right} ({right_value})")]
    Validation {
        left: &'static str,
        left_value: i32,
        relation: Relation,
        right: &'static str,
        right_value: i32,
    },

    #[error("No scores to evaluate")]
    EmptyScores,
}

/// Validated grade bands read from a grade file.
///
/// Construction checks, in order and stopping at the first failure:
///
/// | # | Rule |
/// |---|------|
/// | 1 | A max <= Total max |
/// | 2 | A min < A max |
/// | 3 | B min < A min |
/// | 4 | B max < A max |
/// | 5 | B min < B max |
/// | 6 | C min < B min |
/// | 7 | C max < B max |
/// | 8 | C min < C max |
/// | 9 | D min < C min |
/// | 10 | D min >= Total min |
/// | 11 | D max < C max |
/// | 12 | D min < D max |
///
/// Once built the value is read-only, so it can be shared across threads and
/// classify concurrently.
#[derive(Debug, Clone)]
pub struct GradeThresholds {
    total_min: i32,
    total_max: i32,
    ranges: [GradeRange; 4],
    store: ConfigStore,
}

/// Bounds read from a [`ValueSource`] before they are attached to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub(crate) total_min: i32,
    pub(crate) total_max: i32,
    pub(crate) ranges: [GradeRange; 4],
}

impl GradeThresholds {
    /// Read and validate the five ranges from `store`, taking ownership of it.
    ///
    /// # Errors
    /// - [`GradeError::Config`] if one of the Total, A, B, C or D sections is missing
    /// - [`GradeError::Validation`] for the first violated ordering rule
    pub fn new(store: ConfigStore) -> Result<Self, GradeError> {
        tracing::info!("Loading grade ranges from {}", store.path());

        let bounds = read_bounds(&store)?;

        tracing::info!(
            "Grade ranges loaded: Total {}-{}, {}",
            bounds.total_min,
            bounds.total_max,
            bounds
                .ranges
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            total_min: bounds.total_min,
            total_max: bounds.total_max,
            ranges: bounds.ranges,
            store,
        })
    }

    /// Open `path` and build thresholds from it in one step.
    pub fn from_file<P: AsRef<camino::Utf8Path>>(path: P) -> Result<Self, GradeError> {
        let store = ConfigStore::open(path)?;
        Self::new(store)
    }

    /// Classify a single score.
    ///
    /// Scores outside the total range are [`GradeLabel::OutOfRange`]. Inside
    /// it, bands are tried in A, B, C, D order and the first match wins; a
    /// score in a gap between bands is [`GradeLabel::Fail`].
    pub fn grade_for(&self, score: i32) -> GradeLabel {
        if score < self.total_min || score > self.total_max {
            return GradeLabel::OutOfRange;
        }

        self.ranges
            .iter()
            .find(|range| range.contains(score))
            .map_or(GradeLabel::Fail, |range| GradeLabel::Pass(range.grade))
    }

    /// Classify a single score as one of `A B C D F ?`.
    pub fn classify(&self, score: i32) -> char {
        self.grade_for(score).as_char()
    }

    /// Classify every score, preserving input order.
    ///
    /// # Errors
    /// [`GradeError::EmptyScores`] when `scores` is empty.
    pub fn evaluate_all(&self, scores: &[i32]) -> Result<Vec<Evaluation>, GradeError> {
        if scores.is_empty() {
            tracing::error!("Score list is empty, nothing to evaluate");
            return Err(GradeError::EmptyScores);
        }

        let evaluations = scores
            .iter()
            .enumerate()
            .map(|(index, &score)| {
                let label = self.grade_for(score);
                if label == GradeLabel::OutOfRange {
                    tracing::warn!(
                        "Score {} is outside the total range {}-{}",
                        score,
                        self.total_min,
                        self.total_max
                    );
                }
                Evaluation {
                    index,
                    score,
                    label,
                }
            })
            .collect();

        Ok(evaluations)
    }

    pub fn total_min(&self) -> i32 {
        self.total_min
    }

    pub fn total_max(&self) -> i32 {
        self.total_max
    }

    pub fn range(&self, grade: Grade) -> GradeRange {
        match grade {
            Grade::A => self.ranges[0],
            Grade::B => self.ranges[1],
            Grade::C => self.ranges[2],
            Grade::D => self.ranges[3],
        }
    }

    /// Bands in A, B, C, D order.
    pub fn ranges(&self) -> &[GradeRange] {
        &self.ranges
    }

    /// The grade file these bands were read from.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }
}

/// Read all ten values from `source`, validating as each pair arrives.
pub(crate) fn read_bounds<S: ValueSource + ?Sized>(source: &S) -> Result<Bounds, GradeError> {
    let total_min = read(source, TOTAL_SECTION, "min", DEFAULT_TOTAL_MIN)?;
    let total_max = read(source, TOTAL_SECTION, "max", DEFAULT_TOTAL_MAX)?;

    let (default_min, default_max) = Grade::A.default_bounds();
    let min_a = read(source, Grade::A.section(), "min", default_min)?;
    let max_a = read(source, Grade::A.section(), "max", default_max)?;
    ensure("A max", max_a, Relation::AtMost, "Total max", total_max)?;
    ensure("A min", min_a, Relation::LessThan, "A max", max_a)?;

    let (default_min, default_max) = Grade::B.default_bounds();
    let min_b = read(source, Grade::B.section(), "min", default_min)?;
    ensure("B min", min_b, Relation::LessThan, "A min", min_a)?;
    let max_b = read(source, Grade::B.section(), "max", default_max)?;
    ensure("B max", max_b, Relation::LessThan, "A max", max_a)?;
    ensure("B min", min_b, Relation::LessThan, "B max", max_b)?;

    let (default_min, default_max) = Grade::C.default_bounds();
    let min_c = read(source, Grade::C.section(), "min", default_min)?;
    ensure("C min", min_c, Relation::LessThan, "B min", min_b)?;
    let max_c = read(source, Grade::C.section(), "max", default_max)?;
    ensure("C max", max_c, Relation::LessThan, "B max", max_b)?;
    ensure("C min", min_c, Relation::LessThan, "C max", max_c)?;

    let (default_min, default_max) = Grade::D.default_bounds();
    let min_d = read(source, Grade::D.section(), "min", default_min)?;
    ensure("D min", min_d, Relation::LessThan, "C min", min_c)?;
    ensure("D min", min_d, Relation::AtLeast, "Total min", total_min)?;
    let max_d = read(source, Grade::D.section(), "max", default_max)?;
    ensure("D max", max_d, Relation::LessThan, "C max", max_c)?;
    ensure("D min", min_d, Relation::LessThan, "D max", max_d)?;

    Ok(Bounds {
        total_min,
        total_max,
        ranges: [
            GradeRange::new(Grade::A, min_a, max_a),
            GradeRange::new(Grade::B, min_b, max_b),
            GradeRange::new(Grade::C, min_c, max_c),
            GradeRange::new(Grade::D, min_d, max_d),
        ],
    })
}

fn read<S: ValueSource + ?Sized>(
    source: &S,
    section: &str,
    key: &str,
    default: i32,
) -> Result<i32, GradeError> {
    let lookup = source.get_value(section, key, default)?;
    if lookup.found {
        tracing::info!("[{}] {} = {}", section, key, lookup.value);
    } else {
        tracing::info!("[{}] {} = {} (default)", section, key, lookup.value);
    }
    Ok(lookup.value)
}

fn ensure(
    left: &'static str,
    left_value: i32,
    relation: Relation,
    right: &'static str,
    right_value: i32,
) -> Result<(), GradeError> {
    if relation.holds(left_value, right_value) {
        return Ok(());
    }

    tracing::error!(
        "Invalid grade range ({}:{}, {}:{})",
        left,
        left_value,
        right,
        right_value
    );
    Err(GradeError::Validation {
        left,
        left_value,
        relation,
        right,
        right_value,
    })
}
