use strsim::jaro_winkler;

use crate::models::{MenuAddOn, MenuBase, MenuIngredient};

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
pub const MATCH_THRESHOLD: f64 = 0.8;

/// Menu records that can be looked up by id or display name.
pub trait Named {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

impl Named for MenuBase {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for MenuIngredient {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for MenuAddOn {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// Candidates scoring above MATCH_THRESHOLD, best first.
pub fn rank_matches<'a, T: Named>(items: &'a [T], query: &str) -> Vec<(&'a T, f64)> {
    let query = query.trim().to_lowercase();
    let mut candidates: Vec<(&T, f64)> = items
        .iter()
        .map(|item| (item, jaro_winkler(&item.name().to_lowercase(), &query)))
        .filter(|(_, score)| *score > MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}
