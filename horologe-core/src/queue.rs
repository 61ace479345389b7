//! Bounded command queue
//!
//! Decouples the intake sources (producers) from the execution loop (the
//! single consumer). Fixed capacity, FIFO, never grows and never
//! overwrites: a push onto a full queue is refused and the caller decides
//! what to drop.

use heapless::Deque;

use horologe_protocol::Command;

/// Default queue depth
pub const QUEUE_CAPACITY: usize = 4;

/// Push refused because the queue is at capacity
///
/// Carries the rejected command back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull(pub Command);

/// Fixed-capacity FIFO of commands
#[derive(Debug, Clone)]
pub struct CommandQueue<const N: usize = QUEUE_CAPACITY> {
    items: Deque<Command, N>,
}

impl<const N: usize> Default for CommandQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CommandQueue<N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            items: Deque::new(),
        }
    }

    /// Append a command at the tail
    pub fn try_push(&mut self, command: Command) -> Result<(), QueueFull> {
        self.items.push_back(command).map_err(QueueFull)
    }

    /// Remove and return the head command, or `None` when empty
    pub fn try_pop(&mut self) -> Option<Command> {
        self.items.pop_front()
    }

    /// Look at the head command without removing it
    pub fn peek(&self) -> Option<&Command> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Discard every queued command
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate queued commands head to tail
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horologe_protocol::{AdjustDirection, SelectDirection};

    #[test]
    fn test_fifo_order() {
        let mut queue: CommandQueue = CommandQueue::new();
        queue.try_push(Command::lamp_test()).unwrap();
        queue.try_push(Command::brightness(10)).unwrap();

        assert_eq!(queue.try_pop(), Some(Command::lamp_test()));
        assert_eq!(queue.try_pop(), Some(Command::brightness(10)));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn test_push_onto_full_queue_fails() {
        let mut queue: CommandQueue = CommandQueue::new();
        let originals = [
            Command::reset(),
            Command::enter_setup(),
            Command::select(SelectDirection::Next),
            Command::adjust(AdjustDirection::Up),
        ];
        for cmd in originals {
            queue.try_push(cmd).unwrap();
        }
        assert!(queue.is_full());

        let extra = Command::brightness(200);
        assert_eq!(queue.try_push(extra), Err(QueueFull(extra)));
        assert_eq!(queue.len(), 4);

        for cmd in originals {
            assert_eq!(queue.try_pop(), Some(cmd));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_space_frees_after_pop() {
        let mut queue: CommandQueue<2> = CommandQueue::new();
        queue.try_push(Command::reset()).unwrap();
        queue.try_push(Command::reset()).unwrap();
        assert!(queue.try_push(Command::lamp_test()).is_err());

        queue.try_pop();
        queue.try_push(Command::lamp_test()).unwrap();
        assert_eq!(queue.peek(), Some(&Command::reset()));
        assert_eq!(queue.capacity(), 2);
    }
}
