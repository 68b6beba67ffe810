//! Challenge title ↔ campaign id lookup

use crate::error::DatasetResult;
use crate::loader::load_challenges;
use crate::records::ChallengeRef;
use catalyst_ideascale::CampaignId;
use std::path::Path;

/// Ordered list of `{title, id}` pairs
///
/// Titles are matched exactly; when a title or id appears more than once
/// the first entry wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeMap {
    entries: Vec<ChallengeRef>,
}

impl ChallengeMap {
    /// Create from entries
    #[inline]
    #[must_use]
    pub fn new(entries: Vec<ChallengeRef>) -> Self {
        Self { entries }
    }

    /// Load a challenge-map (or challenges export) JSON file
    ///
    /// # Errors
    /// See [`load_challenges`]
    pub fn load(path: impl AsRef<Path>) -> DatasetResult<Self> {
        load_challenges(path).map(Self::new)
    }

    /// Campaign id for a local challenge title
    #[must_use]
    pub fn resolve(&self, title: &str) -> Option<CampaignId> {
        self.entries.iter().find(|c| c.title == title).map(|c| c.id)
    }

    /// Title for a campaign id
    #[must_use]
    pub fn title_for(&self, id: CampaignId) -> Option<&str> {
        self.entries
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.title.as_str())
    }

    /// Iterate entries in file order
    pub fn iter(&self) -> impl Iterator<Item = &ChallengeRef> {
        self.entries.iter()
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ChallengeRef> for ChallengeMap {
    fn from_iter<I: IntoIterator<Item = ChallengeRef>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> ChallengeMap {
        [
            ChallengeRef::new("Developer Ecosystem", 25),
            ChallengeRef::new("DApps", 26),
            ChallengeRef::new("DApps", 99),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn resolves_exact_titles_only() {
        let map = map();
        assert_eq!(map.resolve("Developer Ecosystem"), Some(25));
        assert_eq!(map.resolve("developer ecosystem"), None);
        assert_eq!(map.resolve("Developer Ecosystem "), None);
    }

    #[test]
    fn first_duplicate_wins() {
        assert_eq!(map().resolve("DApps"), Some(26));
        assert_eq!(map().title_for(99), Some("DApps"));
        assert_eq!(map().title_for(1), None);
    }
}
