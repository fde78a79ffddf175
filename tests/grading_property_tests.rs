//! Property tests for score classification
//!
//! These tests verify for arbitrary scores and band layouts:
//! - Only the labels A, B, C, D, F and ? are produced
//! - Contiguous bands give exactly one matching band per in-range score
//! - Classification is idempotent
//! - Out-of-range scores are always '?'

use grade_gate::config::ConfigStore;
use grade_gate::{GradeLabel, GradeThresholds};
use proptest::prelude::*;

const DEFAULT_GRADE_FILE: &str = "[Total]\nmin=0\nmax=100\n[A]\nmin=90\nmax=100\n[B]\nmin=80\nmax=89\n[C]\nmin=70\nmax=79\n[D]\nmin=60\nmax=69\n";

fn default_thresholds() -> GradeThresholds {
    GradeThresholds::new(ConfigStore::parse_str("default.ini", DEFAULT_GRADE_FILE).unwrap())
        .unwrap()
}

/// Four contiguous bands of the given widths stacked on top of `d_min`.
fn contiguous_grade_file(total_min: i32, d_min: i32, widths: [i32; 4]) -> String {
    let [wd, wc, wb, wa] = widths;
    let d_max = d_min + wd;
    let c_max = d_max + 1 + wc;
    let b_max = c_max + 1 + wb;
    let a_max = b_max + 1 + wa;
    format!(
        "[Total]\nmin={total_min}\nmax={a_max}\n[A]\nmin={}\nmax={a_max}\n[B]\nmin={}\nmax={b_max}\n[C]\nmin={}\nmax={c_max}\n[D]\nmin={d_min}\nmax={d_max}\n",
        b_max + 1,
        c_max + 1,
        d_max + 1,
    )
}

proptest! {
    #[test]
    fn classify_returns_known_label(score in any::<i32>()) {
        let thresholds = default_thresholds();
        prop_assert!(['A', 'B', 'C', 'D', 'F', '?'].contains(&thresholds.classify(score)));
    }

    #[test]
    fn classify_is_idempotent(score in -1_000i32..1_000) {
        let thresholds = default_thresholds();
        prop_assert_eq!(thresholds.classify(score), thresholds.classify(score));
    }

    #[test]
    fn out_of_range_is_question_mark(score in prop_oneof![i32::MIN..0, 101..i32::MAX]) {
        let thresholds = default_thresholds();
        prop_assert_eq!(thresholds.grade_for(score), GradeLabel::OutOfRange);
    }

    #[test]
    fn contiguous_bands_match_exactly_once(
        total_min in -500i32..0,
        d_offset in 0i32..100,
        widths in prop::array::uniform4(1i32..50),
        pick in 0.0f64..1.0,
    ) {
        let d_min = total_min + d_offset;
        let text = contiguous_grade_file(total_min, d_min, widths);
        let thresholds = GradeThresholds::new(ConfigStore::parse_str("gen.ini", &text).unwrap()).unwrap();

        let span = thresholds.total_max() - d_min;
        let score = d_min + (pick * f64::from(span)).round() as i32;

        let matching = thresholds.ranges().iter().filter(|r| r.contains(score)).count();
        prop_assert_eq!(matching, 1);
        prop_assert!(matches!(thresholds.grade_for(score), GradeLabel::Pass(_)));
    }
}
