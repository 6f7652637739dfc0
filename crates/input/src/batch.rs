use arrayvec::ArrayVec;

use crate::types::Command;

/// Commands collected between two frames
pub const BATCH_CAPACITY: usize = 16;

/// Fixed-capacity, allocation-free buffer of pending commands.
///
/// Key repeat can produce more presses than a frame should apply; anything past
/// [`BATCH_CAPACITY`] is dropped and counted.
#[derive(Debug, Clone, Default)]
pub struct CommandBatch {
    commands: ArrayVec<Command, BATCH_CAPACITY>,
    dropped: u32,
}

impl CommandBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `command`; returns false when the batch was full.
    pub fn push(&mut self, command: Command) -> bool {
        if self.commands.try_push(command).is_ok() {
            true
        } else {
            self.dropped = self.dropped.saturating_add(1);
            false
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Presses dropped since the last [`CommandBatch::reset_dropped`]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn reset_dropped(&mut self) {
        self.dropped = 0;
    }

    /// Remove queued commands in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.commands.drain(..)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_keeps_arrival_order() {
        let mut batch = CommandBatch::new();
        batch.push(Command::MoveLeft);
        batch.push(Command::RotateRight);
        batch.push(Command::SoftDrop);

        let drained: Vec<Command> = batch.drain().collect();
        assert_eq!(
            drained,
            vec![Command::MoveLeft, Command::RotateRight, Command::SoftDrop]
        );
        assert!(batch.is_empty());
    }

    #[test]
    fn test_overflow_is_dropped_and_counted() {
        let mut batch = CommandBatch::new();
        for _ in 0..BATCH_CAPACITY {
            assert!(batch.push(Command::MoveRight));
        }
        assert!(!batch.push(Command::MoveLeft));
        assert!(!batch.push(Command::MoveLeft));

        assert_eq!(batch.len(), BATCH_CAPACITY);
        assert_eq!(batch.dropped(), 2);
        assert!(batch.drain().all(|c| c == Command::MoveRight));

        batch.reset_dropped();
        assert_eq!(batch.dropped(), 0);
    }
}
