use std::fmt;

/// A passing letter grade backed by a configured score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    /// Grades in classification priority order.
    pub const ALL: [Grade; 4] = [Grade::A, Grade::B, Grade::C, Grade::D];

    pub fn label(self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
        }
    }

    /// Name of the grade file section holding this band.
    pub fn section(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    /// `(min, max)` used when the grade file omits a key.
    pub fn default_bounds(self) -> (i32, i32) {
        match self {
            Grade::A => (90, 100),
            Grade::B => (80, 89),
            Grade::C => (70, 79),
            Grade::D => (60, 69),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outcome of classifying one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeLabel {
    /// Score falls inside a configured band.
    Pass(Grade),
    /// Score is within the total range but matches no band (`F`).
    Fail,
    /// Score lies outside the total range (`?`).
    OutOfRange,
}

impl GradeLabel {
    pub fn as_char(self) -> char {
        match self {
            GradeLabel::Pass(grade) => grade.label(),
            GradeLabel::Fail => 'F',
            GradeLabel::OutOfRange => '?',
        }
    }
}

impl fmt::Display for GradeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Inclusive score interval for one grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeRange {
    pub grade: Grade,
    pub min: i32,
    pub max: i32,
}

impl GradeRange {
    pub fn new(grade: Grade, min: i32, max: i32) -> Self {
        Self { grade, min, max }
    }

    #[inline]
    pub fn contains(&self, score: i32) -> bool {
        score >= self.min && score <= self.max
    }
}

impl fmt::Display for GradeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}-{}", self.grade, self.min, self.max)
    }
}

/// One classified score, keeping its position in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub index: usize,
    pub score: i32,
    pub label: GradeLabel,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} -> {}", self.index, self.score, self.label)
    }
}
