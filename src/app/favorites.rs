//! Favorites Set.
//!
//! Identifier-keyed membership with insertion order kept for rendering. The
//! set is independent of filtering: a favorite stays a favorite while it is
//! filtered out of view.

use crate::domain::MovieId;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    members: HashSet<MovieId>,
    order: Vec<MovieId>,
}

impl Favorites {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `movie_id` if absent, removes it if present.
    ///
    /// Returns `true` when the id is a member afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinoteka::app::Favorites;
    /// use kinoteka::domain::MovieId;
    ///
    /// let mut favorites = Favorites::new();
    /// assert!(favorites.toggle(MovieId(1)));
    /// assert!(!favorites.toggle(MovieId(1)));
    /// assert!(favorites.is_empty());
    /// ```
    pub fn toggle(&mut self, movie_id: MovieId) -> bool {
        if self.members.remove(&movie_id) {
            self.order.retain(|id| *id != movie_id);
            false
        } else {
            self.members.insert(movie_id);
            self.order.push(movie_id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, movie_id: MovieId) -> bool {
        self.members.contains(&movie_id)
    }

    /// Members in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.order.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_toggle_restores_the_set() {
        let mut favorites = Favorites::new();
        favorites.toggle(MovieId(3));
        let before = favorites.clone();

        for id in [1, 2, 3, 4] {
            favorites.toggle(MovieId(id));
            favorites.toggle(MovieId(id));
            assert_eq!(
                favorites.iter().collect::<HashSet<_>>(),
                before.iter().collect::<HashSet<_>>(),
                "id {id}"
            );
        }
    }

    #[test]
    fn single_toggle_is_not_idempotent() {
        let mut favorites = Favorites::new();
        favorites.toggle(MovieId(1));
        assert!(favorites.contains(MovieId(1)));
        favorites.toggle(MovieId(1));
        assert!(!favorites.contains(MovieId(1)));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut favorites = Favorites::new();
        for id in [5, 1, 3] {
            favorites.toggle(MovieId(id));
        }
        favorites.toggle(MovieId(5));
        favorites.toggle(MovieId(5));
        assert_eq!(favorites.iter().map(|id| id.0).collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(favorites.len(), 3);
    }
}
