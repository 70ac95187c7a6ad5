//! Word/phoneme task driver
//!
//! A finite queue of words, each tagged with the phoneme side it belongs to.
//! The queue only moves forward; once it runs dry the run is won.

use serde::{Deserialize, Serialize};

use super::state::PhonemeSide;

/// One word to practice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub side: PhonemeSide,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, side: PhonemeSide) -> Self {
        Self {
            word: word.into(),
            side,
        }
    }
}

/// Forward-only word queue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordTask {
    queue: Vec<WordEntry>,
    /// Index of the next word to hand out
    cursor: usize,
    current: Option<WordEntry>,
}

impl WordTask {
    pub fn new(queue: Vec<WordEntry>) -> Self {
        Self {
            queue,
            cursor: 0,
            current: None,
        }
    }

    /// Word the player is currently answering
    pub fn current(&self) -> Option<&WordEntry> {
        self.current.as_ref()
    }

    /// Phoneme side the player must land on
    pub fn target(&self) -> Option<PhonemeSide> {
        self.current.as_ref().map(|w| w.side)
    }

    /// Move to the next word. Returns `None` once the queue is exhausted,
    /// leaving no current word.
    pub fn advance(&mut self) -> Option<&WordEntry> {
        self.current = self.queue.get(self.cursor).cloned();
        if self.current.is_some() {
            self.cursor += 1;
        }
        self.current.as_ref()
    }

    /// Words not yet handed out
    pub fn remaining(&self) -> usize {
        self.queue.len() - self.cursor
    }

    /// Total words in the run
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.queue.len() && self.current.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> WordTask {
        WordTask::new(vec![
            WordEntry::new("сад", PhonemeSide::First),
            WordEntry::new("шум", PhonemeSide::Second),
        ])
    }

    #[test]
    fn test_advance_walks_queue_once() {
        let mut task = task();
        assert_eq!(task.current(), None);
        assert_eq!(task.remaining(), 2);

        assert_eq!(task.advance().map(|w| w.word.as_str()), Some("сад"));
        assert_eq!(task.target(), Some(PhonemeSide::First));
        assert_eq!(task.advance().map(|w| w.word.as_str()), Some("шум"));
        assert_eq!(task.target(), Some(PhonemeSide::Second));
        assert_eq!(task.remaining(), 0);
        assert!(!task.is_exhausted());

        assert!(task.advance().is_none());
        assert!(task.is_exhausted());
        // Not restartable
        assert!(task.advance().is_none());
        assert_eq!(task.len(), 2);
    }

    #[test]
    fn test_empty_task_is_exhausted_after_first_advance() {
        let mut task = WordTask::new(Vec::new());
        assert!(task.is_empty());
        assert!(task.advance().is_none());
        assert!(task.is_exhausted());
    }
}
