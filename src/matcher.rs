use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32Str};

pub struct FuzzyMatcher {
    matcher: Matcher,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// One score per haystack, `None` for non-matches.
    /// Only case-insensitive substring hits match; the fuzzy score just orders them.
    pub fn score_all(&mut self, query: &str, haystacks: &[&str]) -> Vec<Option<u32>> {
        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        let needle = query.to_lowercase();
        let mut buf = Vec::new();

        haystacks
            .iter()
            .map(|hay| {
                if !hay.to_lowercase().contains(&needle) {
                    return None;
                }
                let fuzzy = pattern.score(Utf32Str::new(hay, &mut buf), &mut self.matcher);
                Some(fuzzy.unwrap_or(0))
            })
            .collect()
    }
}
