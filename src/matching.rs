//! Lost/found pair scoring.
//!
//! [`compute_matches`] enumerates every (lost, found) pair from the two
//! active sets, scores each pair on four independent signals, and returns
//! the candidates with a nonzero score ranked best-first. The function is
//! pure: no I/O, no caching, recomputed fresh on every call, and it
//! terminates after exactly |lost| x |found| pair evaluations.
//!
//! Score weights (maximum 100, no negative contributions):
//!
//! | signal                         | points |
//! |--------------------------------|--------|
//! | same category (case-sensitive) | 40     |
//! | similar item name              | 30     |
//! | similar location               | 20     |
//! | event dates within 7 days      | 10     |

use serde::Serialize;

use crate::model::ItemReport;


/// A candidate pairing of one lost and one found report.
///
/// Derived on demand and never persisted; the embedded reports are
/// snapshots of the inputs at computation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub lost: ItemReport,
    pub found: ItemReport,
    /// 0..=100; candidates with score 0 are never emitted.
    pub score: u32,
    /// Human-readable explanation, one entry per satisfied signal, in
    /// signal order (category, name, location, date).
    pub reasons: Vec<String>,
}

/// Score every (lost, found) pair and return the nonzero candidates sorted
/// by score descending.
///
/// The sort is stable, so equal-score candidates keep the enumeration
/// order: lost reports outer, found reports inner. Either input being
/// empty yields an empty result.
pub fn compute_matches(lost: &[ItemReport], found: &[ItemReport]) -> Vec<MatchCandidate> {
    let mut candidates = Vec::new();

    for lost_item in lost {
        for found_item in found {
            let (score, reasons) = score_pair(lost_item, found_item);
            if score > 0 {
                candidates.push(MatchCandidate {
                    lost: lost_item.clone(),
                    found: found_item.clone(),
                    score,
                    reasons,
                });
            }
        }
    }

    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

/// Score one pair. Each signal contributes independently.
fn score_pair(lost: &ItemReport, found: &ItemReport) -> (u32, Vec<String>) {
    let mut score = 0;
    let mut reasons = Vec::new();

    if lost.category == found.category {
        score += 40;
        reasons.push("Same category".to_string());
    }

    if is_similar(&lost.item_name, &found.item_name) {
        score += 30;
        reasons.push("Similar item name".to_string());
    }

    if is_similar(&lost.location, &found.location) {
        score += 20;
        reasons.push("Same or nearby location".to_string());
    }

    // Calendar-date difference; a 0-day gap still counts.
    let days_apart = (lost.date - found.date).num_days().unsigned_abs();
    if days_apart <= 7 {
        score += 10;
        reasons.push(format!("Date within {days_apart} days"));
    }

    (score, reasons)
}

/// Loose string similarity used for item names and locations.
///
/// Both inputs are lowercased and trimmed, then compared three ways:
/// exact equality, substring containment in either direction, or word
/// overlap — at least one token in common and the common count covering
/// at least half of the shorter token sequence.
pub fn is_similar(a: &str, b: &str) -> bool {
    let s1 = a.trim().to_lowercase();
    let s2 = b.trim().to_lowercase();

    if s1 == s2 {
        return true;
    }

    if s1.contains(&s2) || s2.contains(&s1) {
        return true;
    }

    let words1: Vec<&str> = s1.split_whitespace().collect();
    let words2: Vec<&str> = s2.split_whitespace().collect();
    let common = words1.iter().filter(|word| words2.contains(word)).count();

    common >= 1 && common as f64 >= words1.len().min(words2.len()) as f64 * 0.5
}
