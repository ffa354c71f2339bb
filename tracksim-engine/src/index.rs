//! Sparse rating indices in compressed-row form.
//!
//! A [`RatingIndex`] maps a primary id (item or user) to the ratings it
//! received from / gave to its peers. Rows are stored back to back in flat
//! arrays, each row sorted by peer id, so a row is two slices and the
//! scorer can merge-join them without hashing.

use rustc_hash::FxHashMap;
use tracksim_core::types::Rating;

/// Which id of a [`Rating`] keys the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// item → {user → rating}
    ByItem,
    /// user → {item → rating}
    ByUser,
}

/// Immutable sparse index built once per run.
#[derive(Debug, Clone, Default)]
pub struct RatingIndex {
    /// Primary ids, ascending.
    keys: Vec<i64>,
    /// Row `r` spans `offsets[r]..offsets[r + 1]` of `peers` / `ratings`.
    offsets: Vec<usize>,
    peers: Vec<i64>,
    ratings: Vec<i32>,
    rows: FxHashMap<i64, usize>,
}

impl RatingIndex {
    /// item → {user → rating}.
    pub fn by_item(log: &[Rating]) -> Self {
        Self::build(log, Orientation::ByItem)
    }

    /// user → {item → rating}.
    pub fn by_user(log: &[Rating]) -> Self {
        Self::build(log, Orientation::ByUser)
    }

    /// Build both views of the same log.
    pub fn build_pair(log: &[Rating]) -> (Self, Self) {
        (Self::by_item(log), Self::by_user(log))
    }

    /// Build an index over `log`. When the log rates the same pair more than
    /// once, the later fact wins.
    pub fn build(log: &[Rating], orientation: Orientation) -> Self {
        let mut triples: Vec<(i64, i64, i32)> = log
            .iter()
            .map(|r| match orientation {
                Orientation::ByItem => (r.item_id, r.user_id, r.rating),
                Orientation::ByUser => (r.user_id, r.item_id, r.rating),
            })
            .collect();
        // Stable: equal (key, peer) facts keep log order.
        triples.sort_by_key(|&(key, peer, _)| (key, peer));

        let mut index = Self {
            keys: Vec::new(),
            offsets: vec![0],
            peers: Vec::with_capacity(triples.len()),
            ratings: Vec::with_capacity(triples.len()),
            rows: FxHashMap::default(),
        };

        for (key, peer, rating) in triples {
            if index.keys.last() != Some(&key) {
                if !index.keys.is_empty() {
                    index.offsets.push(index.peers.len());
                }
                index.rows.insert(key, index.keys.len());
                index.keys.push(key);
            } else if index.peers.last() == Some(&peer) {
                if let Some(last) = index.ratings.last_mut() {
                    *last = rating;
                }
                continue;
            }
            index.peers.push(peer);
            index.ratings.push(rating);
        }
        if !index.keys.is_empty() {
            index.offsets.push(index.peers.len());
        }

        tracing::debug!(
            orientation = ?orientation,
            keys = index.keys.len(),
            entries = index.peers.len(),
            "built rating index"
        );
        index
    }

    /// Number of primary ids.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of distinct (key, peer) ratings.
    pub fn entry_count(&self) -> usize {
        self.peers.len()
    }

    /// Primary ids in ascending order.
    pub fn keys(&self) -> &[i64] {
        &self.keys
    }

    /// Row of the `position`-th key in ascending order.
    ///
    /// # Panics
    /// If `position >= self.len()`.
    pub fn row(&self, position: usize) -> RatingVector<'_> {
        let span = self.offsets[position]..self.offsets[position + 1];
        RatingVector {
            peers: &self.peers[span.clone()],
            ratings: &self.ratings[span],
        }
    }

    /// Row of `key`, if it has any ratings.
    pub fn get(&self, key: i64) -> Option<RatingVector<'_>> {
        self.rows.get(&key).map(|&position| self.row(position))
    }

    /// Row of `key`, empty when the key is unknown.
    pub fn vector(&self, key: i64) -> RatingVector<'_> {
        self.get(key).unwrap_or_default()
    }

    pub fn contains_key(&self, key: i64) -> bool {
        self.rows.contains_key(&key)
    }

    /// Rating given between `key` and `peer`.
    pub fn rating(&self, key: i64, peer: i64) -> Option<i32> {
        self.get(key).and_then(|row| row.get(peer))
    }

    /// Mean rating of `key`'s row.
    pub fn mean(&self, key: i64) -> Option<f64> {
        self.get(key).and_then(|row| row.mean())
    }

    /// `(key, row)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, RatingVector<'_>)> + '_ {
        self.keys
            .iter()
            .enumerate()
            .map(move |(position, &key)| (key, self.row(position)))
    }
}

/// Read-only view of one index row: peer id → rating, sorted by peer id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingVector<'a> {
    peers: &'a [i64],
    ratings: &'a [i32],
}

impl<'a> RatingVector<'a> {
    pub fn peers(&self) -> &'a [i64] {
        self.peers
    }

    pub fn ratings(&self) -> &'a [i32] {
        self.ratings
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn get(&self, peer: i64) -> Option<i32> {
        self.peers
            .binary_search(&peer)
            .ok()
            .map(|position| self.ratings[position])
    }

    pub fn contains(&self, peer: i64) -> bool {
        self.peers.binary_search(&peer).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, i32)> + 'a {
        let (peers, ratings) = (self.peers, self.ratings);
        peers.iter().copied().zip(ratings.iter().copied())
    }

    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let sum: i64 = self.ratings.iter().map(|&r| i64::from(r)).sum();
        Some(sum as f64 / self.len() as f64)
    }
}

/// Owned rating vector, for building rows outside an index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingRow {
    peers: Vec<i64>,
    ratings: Vec<i32>,
}

impl RatingRow {
    /// Later pairs for the same peer replace earlier ones.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, i32)>,
    {
        let mut pairs: Vec<(i64, i32)> = pairs.into_iter().collect();
        pairs.sort_by_key(|&(peer, _)| peer);

        let mut row = Self::default();
        for (peer, rating) in pairs {
            if row.peers.last() == Some(&peer) {
                if let Some(last) = row.ratings.last_mut() {
                    *last = rating;
                }
            } else {
                row.peers.push(peer);
                row.ratings.push(rating);
            }
        }
        row
    }

    pub fn as_vector(&self) -> RatingVector<'_> {
        RatingVector {
            peers: &self.peers,
            ratings: &self.ratings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> Vec<Rating> {
        vec![
            Rating::new(1, 10, 5),
            Rating::new(2, 10, 3),
            Rating::new(1, 20, 4),
            Rating::new(3, 30, 1),
            Rating::new(2, 20, 2),
        ]
    }

    #[test]
    fn by_item_groups_users_per_item() {
        let index = RatingIndex::by_item(&log());
        assert_eq!(index.keys(), &[10, 20, 30]);
        assert_eq!(index.entry_count(), 5);

        let row = index.get(10).unwrap();
        assert_eq!(row.peers(), &[1, 2]);
        assert_eq!(row.ratings(), &[5, 3]);
        assert_eq!(index.rating(20, 2), Some(2));
        assert_eq!(index.rating(30, 1), None);
        assert!(index.get(99).is_none());
        assert!(index.vector(99).is_empty());
    }

    #[test]
    fn both_views_hold_the_same_pairs() {
        let (by_item, by_user) = RatingIndex::build_pair(&log());
        let mut from_items: Vec<(i64, i64, i32)> = by_item
            .iter()
            .flat_map(|(item, row)| row.iter().map(move |(user, r)| (user, item, r)))
            .collect();
        let mut from_users: Vec<(i64, i64, i32)> = by_user
            .iter()
            .flat_map(|(user, row)| row.iter().map(move |(item, r)| (user, item, r)))
            .collect();
        from_items.sort_unstable();
        from_users.sort_unstable();
        assert_eq!(from_items, from_users);
        assert_eq!(by_user.keys(), &[1, 2, 3]);
    }

    #[test]
    fn later_duplicate_fact_wins() {
        let log = vec![
            Rating::new(1, 10, 2),
            Rating::new(2, 10, 4),
            Rating::new(1, 10, 5),
        ];
        let by_item = RatingIndex::by_item(&log);
        let by_user = RatingIndex::by_user(&log);

        assert_eq!(by_item.get(10).unwrap().len(), 2);
        assert_eq!(by_item.rating(10, 1), Some(5));
        assert_eq!(by_user.rating(1, 10), Some(5));
    }

    #[test]
    fn empty_log_gives_empty_index() {
        let index = RatingIndex::by_user(&[]);
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
        assert_eq!(index.mean(1), None);
    }

    #[test]
    fn row_mean_uses_real_division() {
        let index = RatingIndex::by_item(&log());
        assert_eq!(index.mean(10), Some(4.0));
        assert_eq!(index.mean(20), Some(3.0));

        let row = RatingRow::from_pairs([(1, 1), (2, 2)]);
        assert_eq!(row.as_vector().mean(), Some(1.5));
    }

    #[test]
    fn owned_row_sorts_and_dedups() {
        let row = RatingRow::from_pairs([(3, 1), (1, 5), (3, 4)]);
        let view = row.as_vector();
        assert_eq!(view.peers(), &[1, 3]);
        assert_eq!(view.get(3), Some(4));
        assert!(view.contains(1));
        assert!(!view.contains(2));
    }
}
