//! Passthrough storage for header tags a record type does not model.

use indexmap::IndexMap;

use crate::tokens::push_tag;

/// Unrecognized `TAG:VALUE` pairs of one header line, kept in first-seen order.
///
/// Writing them back in the order they were read keeps round trips byte-exact for files this
/// crate did not produce. Equality is order-sensitive for the same reason.
#[derive(Debug, Clone, Default)]
pub struct CustomTags(IndexMap<String, String>);

impl CustomTags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `tag` to `value`.
    ///
    /// A repeated tag keeps its original position and takes the new value.
    pub fn insert(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.0.insert(tag.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.0.get(tag).map(String::as_str)
    }

    /// Removes `tag`, preserving the order of the remaining tags.
    pub fn remove(&mut self, tag: &str) -> Option<String> {
        self.0.shift_remove(tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(tag, value)| (tag.as_str(), value.as_str()))
    }

    /// Appends every tag to `out` as a TAB-prefixed token.
    pub(crate) fn write_sam(&self, out: &mut String) {
        for (tag, value) in self.iter() {
            push_tag(out, tag, value);
        }
    }
}

impl PartialEq for CustomTags {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.iter().eq(other.iter())
    }
}

impl Eq for CustomTags {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CustomTags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Self::new();
        for (tag, value) in iter {
            tags.insert(tag, value);
        }
        tags
    }
}
