//! Slug similarity scoring for "best match" lookups.
//!
//! Tiers: 100 exact slug, 90 prefix, 80 substring, otherwise up to 70 scaled
//! by the share of target words present in the candidate, otherwise 0. The
//! tier values are a fixed contract and must not be re-tuned.

use std::collections::HashSet;

use clinicmap_core::{slugify, Clinic};

const EXACT: f64 = 100.0;
const PREFIX: f64 = 90.0;
const SUBSTRING: f64 = 80.0;
const WORD_OVERLAP_WEIGHT: f64 = 70.0;

/// Scores how well `candidate_name` matches the hyphenated `target_slug`.
/// An empty target matches nothing.
#[must_use]
pub fn score_name_match(candidate_name: &str, target_slug: &str) -> f64 {
    if target_slug.is_empty() {
        return 0.0;
    }
    let derived = slugify(candidate_name);

    if derived == target_slug {
        return EXACT;
    }
    if derived.starts_with(target_slug) {
        return PREFIX;
    }
    if derived.contains(target_slug) {
        return SUBSTRING;
    }

    let candidate_words: HashSet<&str> = derived.split('-').collect();
    let target_words: Vec<&str> = target_slug.split('-').collect();
    let common = target_words
        .iter()
        .filter(|w| !w.is_empty() && candidate_words.contains(*w))
        .count();

    if common == 0 {
        return 0.0;
    }

    // Word counts are tiny; the casts cannot lose precision in practice.
    #[allow(clippy::cast_precision_loss)]
    let ratio = common as f64 / target_words.len() as f64;
    ratio * WORD_OVERLAP_WEIGHT
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch<'a> {
    pub clinic: &'a Clinic,
    pub score: f64,
}

/// Highest-scoring clinic for `target_slug`; ties go to the shorter display
/// name, then to the earlier clinic. Returns `None` when nothing scores
/// above zero.
#[must_use]
pub fn find_best_match<'a>(clinics: &'a [Clinic], target_slug: &str) -> Option<BestMatch<'a>> {
    let mut best: Option<BestMatch<'a>> = None;

    for clinic in clinics {
        let score = score_name_match(&clinic.name, target_slug);
        if score <= 0.0 {
            continue;
        }
        let better = match best {
            None => true,
            Some(current) => {
                score > current.score
                    || (score == current.score
                        && clinic.name.chars().count() < current.clinic.name.chars().count())
            }
        };
        if better {
            best = Some(BestMatch { clinic, score });
        }
    }

    if let Some(found) = &best {
        tracing::debug!(
            target_slug,
            matched = %found.clinic.slug,
            score = found.score,
            "best clinic match"
        );
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clinics(names: &[&str]) -> Vec<Clinic> {
        names
            .iter()
            .zip(1..)
            .map(|(name, id)| Clinic::new(id, *name, vec![]))
            .collect()
    }

    #[test]
    fn exact_slug_scores_100() {
        assert_eq!(score_name_match("Alpha Fertility", "alpha-fertility"), 100.0);
    }

    #[test]
    fn prefix_scores_90() {
        assert_eq!(
            score_name_match("Alpha Fertility Center", "alpha-fertility"),
            90.0
        );
    }

    #[test]
    fn substring_scores_80() {
        assert_eq!(
            score_name_match("The Alpha Fertility Group", "alpha-fertility"),
            80.0
        );
    }

    #[test]
    fn word_overlap_scales_to_70() {
        // one of two target words present
        assert_eq!(score_name_match("Fertility Partners", "alpha-fertility"), 35.0);
        // two of three
        let score = score_name_match("Denver Fertility Institute", "ccrm-fertility-denver");
        assert!((score - 70.0 * 2.0 / 3.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn no_overlap_scores_zero() {
        assert_eq!(score_name_match("Beta Clinic", "alpha-fertility"), 0.0);
    }

    #[test]
    fn empty_target_matches_nothing() {
        assert_eq!(score_name_match("Alpha Fertility", ""), 0.0);
        let list = clinics(&["Alpha Fertility", "Beta Clinic"]);
        assert!(find_best_match(&list, "").is_none());
    }

    #[test]
    fn best_match_prefers_exact_slug() {
        let list = clinics(&[
            "Alpha Fertility Center of Austin",
            "Alpha Fertility",
            "Alpha",
        ]);
        let best = find_best_match(&list, "alpha-fertility").unwrap();
        assert_eq!(best.clinic.name, "Alpha Fertility");
        assert_eq!(best.score, 100.0);
    }

    #[test]
    fn single_exact_match_beats_other_targets() {
        // "beta-clinic" is a prefix of "Beta Clinic Reno" but the exact
        // candidate must still win.
        let list = clinics(&["Beta Clinic Reno", "Beta Clinic", "Reno Beta Clinic Group"]);
        let best = find_best_match(&list, "beta-clinic").unwrap();
        assert_eq!(best.clinic.id, 2);
    }

    #[test]
    fn ties_break_on_shorter_name() {
        let list = clinics(&["Alpha Fertility Center", "Alpha Fertility Inc"]);
        let best = find_best_match(&list, "alpha-fertility").unwrap();
        assert_eq!(best.score, 90.0);
        assert_eq!(best.clinic.name, "Alpha Fertility Inc");
    }

    #[test]
    fn ties_with_equal_length_keep_first() {
        let list = clinics(&["Alpha Fertility AAA", "Alpha Fertility BBB"]);
        let best = find_best_match(&list, "alpha-fertility").unwrap();
        assert_eq!(best.clinic.name, "Alpha Fertility AAA");
    }

    #[test]
    fn no_positive_score_is_none() {
        let list = clinics(&["Beta Clinic"]);
        assert!(find_best_match(&list, "alpha-fertility").is_none());
        assert!(find_best_match(&[], "alpha").is_none());
    }
}
