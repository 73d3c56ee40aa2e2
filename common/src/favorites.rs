//! お気に入り管理
//!
//! IDの集合のみを保持する（レコードの存在確認はしない）。
//! 永続化はしない。

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorites {
    ids: BTreeSet<String>,
}

impl Favorites {
    /// 所属を反転する。追加された場合 true
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Favorites {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { ids: iter.into_iter().map(Into::into).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut favs = Favorites::default();
        assert!(favs.toggle("a"));
        assert!(favs.contains("a"));
        assert_eq!(favs.count(), 1);

        assert!(!favs.toggle("a"));
        assert!(!favs.contains("a"));
        assert!(favs.is_empty());
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let original: Favorites = ["x", "y"].into_iter().collect();
        for id in ["x", "z"] {
            let mut favs = original.clone();
            favs.toggle(id);
            favs.toggle(id);
            assert_eq!(favs, original, "id={}", id);
        }
    }

    #[test]
    fn test_unknown_ids_are_allowed() {
        let mut favs = Favorites::default();
        favs.toggle("does-not-exist");
        assert_eq!(favs.count(), 1);
        assert_eq!(favs.iter().collect::<Vec<_>>(), vec!["does-not-exist"]);
    }
}
