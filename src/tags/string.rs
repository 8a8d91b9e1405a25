//! String Tag Set
//!
//! A sorted, de-duplicated `SmallVec<[String; 5]>` set of labels.

use std::{cmp::Ordering, ops::BitOr, string::ToString};

use serde::{Deserialize, Deserializer};
use smallvec::SmallVec;

/// A sorted set of string tags, such as dish labels or cuisines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTagSet {
    tags: SmallVec<[String; 5]>,
}

impl StringTagSet {
    /// Create a new tag set, sorting and de-duplicating the tags.
    #[must_use]
    pub fn new(tags: SmallVec<[String; 5]>) -> Self {
        let mut set = Self { tags };

        set.tags.sort();
        set.tags.dedup();

        set
    }

    /// Create a new tag set from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        Self::new(tags.iter().map(ToString::to_string).collect())
    }

    /// Check if the set contains a tag (exact match).
    pub fn contains(&self, tag: &str) -> bool {
        self.tags
            .binary_search_by(|probe| probe.as_str().cmp(tag))
            .is_ok()
    }

    /// Check if any tag contains `term`, ignoring case.
    pub fn any_contains_ignore_case(&self, term: &str) -> bool {
        let term = term.to_lowercase();

        self.tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&term))
    }

    /// Add a tag, keeping the set sorted.
    pub fn add(&mut self, tag: &str) {
        if let Err(pos) = self.tags.binary_search_by(|probe| probe.as_str().cmp(tag)) {
            self.tags.insert(pos, tag.to_string());
        }
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Convert the set to a vector of strings.
    #[must_use]
    pub fn to_strs(&self) -> SmallVec<[String; 5]> {
        self.tags.clone()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of tags in the set.
    pub fn len(&self) -> usize {
        self.tags.len()
    }
}

impl BitOr for StringTagSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        let capacity = self.tags.len().saturating_add(rhs.tags.len());
        let mut result = SmallVec::with_capacity(capacity);
        let mut left = self.tags.into_iter().peekable();
        let mut right = rhs.tags.into_iter().peekable();

        // Merge two sorted vectors (union).
        while let (Some(left_tag), Some(right_tag)) = (left.peek(), right.peek()) {
            match left_tag.cmp(right_tag) {
                Ordering::Less => result.extend(left.next()),
                Ordering::Greater => result.extend(right.next()),
                Ordering::Equal => {
                    result.extend(left.next());
                    right.next();
                }
            }
        }

        result.extend(left);
        result.extend(right);

        Self { tags: result }
    }
}

impl FromIterator<String> for StringTagSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for StringTagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tags = Vec::<String>::deserialize(deserializer)?;

        Ok(tags.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_sorts_and_dedups() {
        let tags = StringTagSet::from_strs(&["Popular", "Vegetarian", "Popular"]);

        assert_eq!(tags.len(), 2);
        assert_eq!(tags.iter().collect::<Vec<_>>(), ["Popular", "Vegetarian"]);
    }

    #[test]
    fn contains_is_exact() {
        let tags = StringTagSet::from_strs(&["Spicy", "Raw"]);

        assert!(tags.contains("Spicy"));
        assert!(!tags.contains("spicy"));
        assert!(!tags.contains("Cooked"));
    }

    #[test]
    fn any_contains_ignore_case_matches_substrings() {
        let tags = StringTagSet::from_strs(&["Sushi", "Japanese"]);

        assert!(tags.any_contains_ignore_case("japan"));
        assert!(tags.any_contains_ignore_case("SUSH"));
        assert!(!tags.any_contains_ignore_case("pizza"));
    }

    #[test]
    fn add_keeps_order_and_ignores_duplicates() {
        let mut tags = StringTagSet::from_strs(&["b", "d"]);

        tags.add("c");
        tags.add("a");
        tags.add("c");

        assert_eq!(tags.iter().collect::<Vec<_>>(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn union_merges_sorted_sets() {
        let left = StringTagSet::from_strs(&["Healthy", "Vegetarian"]);
        let right = StringTagSet::from_strs(&["Non-Veg", "Vegetarian"]);

        let union = left | right;

        assert_eq!(
            union.iter().collect::<Vec<_>>(),
            ["Healthy", "Non-Veg", "Vegetarian"]
        );
    }

    #[test]
    fn deserializes_from_yaml_sequence() -> TestResult {
        let tags: StringTagSet = serde_norway::from_str("[Raw, Popular, Raw]")?;

        assert_eq!(tags.to_strs().as_slice(), ["Popular", "Raw"]);

        Ok(())
    }

    #[test]
    fn default_is_empty() {
        assert!(StringTagSet::default().is_empty());
    }
}
