//! Normalized tag sets.

/// Deduplicated, lower-cased, sorted set of tags.
///
/// Construction never fails: blank entries are dropped and duplicates
/// collapse, so the empty set is always a valid value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Normalizes raw tag input.
    #[must_use]
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags: Vec<String> = raw
            .into_iter()
            .map(|tag| normalize(tag.as_ref()))
            .filter(|tag| !tag.is_empty())
            .collect();
        tags.sort_unstable();
        tags.dedup();
        Self(tags)
    }

    /// Returns `true` when the set contains `tag`, compared after trimming
    /// and lower-casing.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        let needle = normalize(tag);
        self.0.binary_search(&needle).is_ok()
    }

    /// Returns the tags in sorted order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` when no tags are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

fn normalize(tag: &str) -> String {
    tag.trim().to_lowercase()
}

impl<'a> IntoIterator for &'a Tags {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
