/*!
 * Level Queues
 * Four FIFO ready queues, dispatched in strict priority order
 */

use crate::core::{Pid, QueueLevel};
use std::collections::VecDeque;

/// Ready queues for levels 1..=4
#[derive(Debug, Clone, Default)]
pub struct LevelQueues {
    queues: [VecDeque<Pid>; QueueLevel::COUNT],
}

impl LevelQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the back of `level`
    #[inline]
    pub fn push(&mut self, level: QueueLevel, pid: Pid) {
        self.queues[level.index()].push_back(pid);
    }

    /// Return `pid` to the head of `level`, ahead of everything queued there
    #[inline]
    pub fn push_front(&mut self, level: QueueLevel, pid: Pid) {
        self.queues[level.index()].push_front(pid);
    }

    /// Pop the front of the most urgent nonempty level
    pub fn pop_next(&mut self) -> Option<(QueueLevel, Pid)> {
        QueueLevel::ALL.into_iter().find_map(|level| {
            self.queues[level.index()]
                .pop_front()
                .map(|pid| (level, pid))
        })
    }

    /// Queued pids at `level`, front first
    pub fn iter_level(&self, level: QueueLevel) -> impl Iterator<Item = Pid> + '_ {
        self.queues[level.index()].iter().copied()
    }

    pub fn level_len(&self, level: QueueLevel) -> usize {
        self.queues[level.index()].len()
    }

    pub fn len(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(VecDeque::is_empty)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.queues.iter().any(|queue| queue.contains(&pid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: u8) -> QueueLevel {
        QueueLevel::new(n).unwrap()
    }

    #[test]
    fn test_fifo_within_level() {
        let mut queues = LevelQueues::new();
        queues.push(level(2), 1);
        queues.push(level(2), 2);
        queues.push(level(2), 3);

        assert_eq!(queues.pop_next(), Some((level(2), 1)));
        assert_eq!(queues.pop_next(), Some((level(2), 2)));
        assert_eq!(queues.pop_next(), Some((level(2), 3)));
        assert_eq!(queues.pop_next(), None);
    }

    #[test]
    fn test_strict_priority() {
        let mut queues = LevelQueues::new();
        queues.push(level(4), 40);
        queues.push(level(3), 30);
        queues.push(level(1), 10);

        assert_eq!(queues.pop_next(), Some((level(1), 10)));
        assert_eq!(queues.pop_next(), Some((level(3), 30)));

        queues.push(level(2), 20);
        assert_eq!(queues.pop_next(), Some((level(2), 20)));
        assert_eq!(queues.pop_next(), Some((level(4), 40)));
        assert!(queues.is_empty());
    }

    #[test]
    fn test_push_front_jumps_the_line() {
        let mut queues = LevelQueues::new();
        queues.push(level(2), 1);
        queues.push(level(2), 2);
        queues.push_front(level(2), 3);

        assert_eq!(queues.iter_level(level(2)).collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn test_lengths_and_membership() {
        let mut queues = LevelQueues::new();
        queues.push(level(1), 5);
        queues.push(level(3), 6);

        assert_eq!(queues.len(), 2);
        assert_eq!(queues.level_len(level(3)), 1);
        assert!(queues.contains(6));
        assert!(!queues.contains(7));
        assert_eq!(queues.iter_level(level(1)).collect::<Vec<_>>(), vec![5]);
    }
}
