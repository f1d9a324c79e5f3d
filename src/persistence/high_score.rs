use tracing::{info, warn};

use super::store::ScoreStore;

/// Tracks the best score and writes it back to a store
///
/// The value only ever goes up. A new record is held as pending until
/// [`HighScoreKeeper::commit`] writes it, so each record is written once.
pub struct HighScoreKeeper<S: ScoreStore> {
    store: S,
    best: u32,
    /// Best score when the current game started
    session_start_best: u32,
    pending: bool,
}

impl<S: ScoreStore> HighScoreKeeper<S> {
    /// Read the stored high score, treating any failure as 0
    pub fn load(store: S) -> Self {
        let best = match store.load() {
            Ok(value) => value.unwrap_or(0),
            Err(err) => {
                warn!(error = %err, "could not read high score, starting from 0");
                0
            }
        };

        Self {
            store,
            best,
            session_start_best: best,
            pending: false,
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// True when the current game beat the high score it started with
    pub fn is_new_record(&self) -> bool {
        self.best > self.session_start_best
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Offer a score; returns true if it raised the high score
    pub fn observe(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.pending = true;
        true
    }

    /// Write a pending record to the store
    ///
    /// Write failures are logged and the record stays pending.
    pub fn commit(&mut self) {
        if !self.pending {
            return;
        }

        match self.store.save(self.best) {
            Ok(()) => {
                self.pending = false;
                info!(high_score = self.best, "high score saved");
            }
            Err(err) => warn!(error = %err, high_score = self.best, "could not save high score"),
        }
    }

    /// Begin a new game: commit anything pending and reset the record marker
    pub fn start_game(&mut self) {
        self.commit();
        self.session_start_best = self.best;
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::store::MemoryStore;
    use anyhow::{Result, bail};

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self) -> Result<Option<u32>> {
            bail!("disk unplugged")
        }

        fn save(&mut self, _high_score: u32) -> Result<()> {
            bail!("disk unplugged")
        }
    }

    #[test]
    fn test_load_defaults_to_zero() {
        let keeper = HighScoreKeeper::load(MemoryStore::new());
        assert_eq!(keeper.best(), 0);
        assert!(!keeper.has_pending());
    }

    #[test]
    fn test_load_reads_stored_value() {
        let keeper = HighScoreKeeper::load(MemoryStore::with_value(14));
        assert_eq!(keeper.best(), 14);
    }

    #[test]
    fn test_observe_never_decreases() {
        let mut keeper = HighScoreKeeper::load(MemoryStore::with_value(10));

        assert!(!keeper.observe(4));
        assert_eq!(keeper.best(), 10);
        assert!(!keeper.observe(10));
        assert!(keeper.observe(11));
        assert_eq!(keeper.best(), 11);
        assert!(!keeper.observe(3));
        assert_eq!(keeper.best(), 11);
        assert!(keeper.is_new_record());
    }

    #[test]
    fn test_commit_writes_once() {
        let mut keeper = HighScoreKeeper::load(MemoryStore::with_value(2));
        keeper.commit();
        assert_eq!(keeper.store().writes(), 0);

        keeper.observe(3);
        keeper.observe(4);
        keeper.commit();
        keeper.commit();

        assert_eq!(keeper.store().writes(), 1);
        assert_eq!(keeper.store().value(), Some(4));
    }

    #[test]
    fn test_start_game_resets_record_marker() {
        let mut keeper = HighScoreKeeper::load(MemoryStore::new());
        keeper.observe(5);
        assert!(keeper.is_new_record());

        keeper.start_game();

        assert!(!keeper.is_new_record());
        assert!(!keeper.has_pending());
        assert_eq!(keeper.store().value(), Some(5));
    }

    #[test]
    fn test_broken_store_is_best_effort() {
        let mut keeper = HighScoreKeeper::load(BrokenStore);
        assert_eq!(keeper.best(), 0);

        keeper.observe(8);
        keeper.commit();

        assert_eq!(keeper.best(), 8);
        assert!(keeper.has_pending());
    }
}
