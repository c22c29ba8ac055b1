//! Module for containing the Snake Game Player.
use std::collections::VecDeque;

use super::snake_game::{Cell, Direction, SnakeError};

/// Number of direction commands a player can buffer ahead of the ticks.
pub const MAX_QUEUE_SIZE: usize = 3;

/// Snake player in the [`crate::models::snake::snake_game::SnakeGame`].
#[derive(Clone, Debug)]
pub struct SnakePlayer {
    pub player_id: usize,
    pub score: u32,
    squares_taken: VecDeque<Cell>,
    direction: Direction,
    move_queue: VecDeque<Direction>,
}

impl SnakePlayer {
    /// Creates a new one cell long player at the specified cell.
    #[must_use]
    pub fn new(player_id: usize, head: Cell, direction: Direction) -> Self {
        let mut squares_taken = VecDeque::new();
        squares_taken.push_front(head);
        Self {
            player_id,
            score: 0,
            squares_taken,
            direction,
            move_queue: VecDeque::with_capacity(MAX_QUEUE_SIZE),
        }
    }

    /// Creates a player from an explicit body, head first.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::EmptySnake`] if `cells` is empty.
    pub fn from_cells(
        player_id: usize,
        cells: impl IntoIterator<Item = Cell>,
        direction: Direction,
    ) -> Result<Self, SnakeError> {
        let squares_taken: VecDeque<Cell> = cells.into_iter().collect();
        if squares_taken.is_empty() {
            return Err(SnakeError::EmptySnake);
        }
        Ok(Self {
            player_id,
            score: 0,
            squares_taken,
            direction,
            move_queue: VecDeque::with_capacity(MAX_QUEUE_SIZE),
        })
    }

    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.squares_taken.front().copied()
    }

    #[must_use]
    pub fn cells(&self) -> &VecDeque<Cell> {
        &self.squares_taken
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.squares_taken.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.squares_taken.is_empty()
    }

    /// Heading the snake travelled on its last tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_moves(&self) -> usize {
        self.move_queue.len()
    }

    #[must_use]
    pub fn get_name(&self) -> String {
        match self.player_id {
            0 => "Blue Snake".to_owned(),
            1 => "Red Snake".to_owned(),
            other => format!("Snake {}", other + 1),
        }
    }

    /// True if any cell of the body, head included, is `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.squares_taken.contains(&cell)
    }

    /// True if `cell` is part of the body behind the head.
    #[must_use]
    pub fn body_collides(&self, cell: Cell) -> bool {
        self.squares_taken.iter().skip(1).any(|c| *c == cell)
    }

    /// Buffers a direction command.
    ///
    /// Returns false and drops the command if the buffer is full or if the
    /// command shares an axis with the last accepted one (or with the current
    /// heading when nothing is buffered).
    pub fn push_move(&mut self, direction: Direction) -> bool {
        if self.move_queue.len() >= MAX_QUEUE_SIZE {
            return false;
        }
        let reference = self.move_queue.back().copied().unwrap_or(self.direction);
        if reference.same_axis(direction) {
            return false;
        }
        self.move_queue.push_back(direction);
        true
    }

    /// Consumes the next buffered command, or keeps the heading.
    pub fn pop_next_move(&mut self) -> Direction {
        if let Some(next) = self.move_queue.pop_front() {
            self.direction = next;
        }
        self.direction
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.squares_taken.push_front(cell);
    }

    pub(crate) fn drop_tail(&mut self) -> Option<Cell> {
        // never shrink below the head
        if self.squares_taken.len() > 1 {
            self.squares_taken.pop_back()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cells_rejects_empty_body() {
        let result = SnakePlayer::from_cells(0, Vec::new(), Direction::Right);
        assert!(matches!(result, Err(SnakeError::EmptySnake)));
    }

    #[test]
    fn test_body_collides_skips_head() {
        let snake = SnakePlayer::from_cells(
            0,
            [Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)],
            Direction::Right,
        )
        .unwrap();
        assert!(!snake.body_collides(Cell::new(5, 5)));
        assert!(snake.body_collides(Cell::new(4, 5)));
        assert!(snake.body_collides(Cell::new(3, 5)));
        assert!(snake.occupies(Cell::new(5, 5)));
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut snake = SnakePlayer::new(0, Cell::new(5, 5), Direction::Right);
        assert!(!snake.push_move(Direction::Left));
        assert!(!snake.push_move(Direction::Right));
        assert_eq!(snake.pending_moves(), 0);
        assert_eq!(snake.pop_next_move(), Direction::Right);

        let mut snake = SnakePlayer::new(0, Cell::new(5, 5), Direction::Up);
        assert!(!snake.push_move(Direction::Down));
        assert_eq!(snake.pop_next_move(), Direction::Up);
    }

    #[test]
    fn test_queued_turns_apply_one_per_pop() {
        let mut snake = SnakePlayer::new(0, Cell::new(5, 5), Direction::Right);
        assert!(snake.push_move(Direction::Up));
        // checked against the buffered Up, not the Right heading
        assert!(!snake.push_move(Direction::Down));
        assert!(snake.push_move(Direction::Left));

        assert_eq!(snake.pop_next_move(), Direction::Up);
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.pop_next_move(), Direction::Left);
        assert_eq!(snake.pop_next_move(), Direction::Left);
    }

    #[test]
    fn test_queue_is_capped() {
        let mut snake = SnakePlayer::new(0, Cell::new(5, 5), Direction::Right);
        assert!(snake.push_move(Direction::Up));
        assert!(snake.push_move(Direction::Left));
        assert!(snake.push_move(Direction::Down));
        assert!(!snake.push_move(Direction::Right));
        assert_eq!(snake.pending_moves(), MAX_QUEUE_SIZE);
    }

    #[test]
    fn test_drop_tail_keeps_head() {
        let mut snake = SnakePlayer::new(1, Cell::new(2, 2), Direction::Left);
        assert_eq!(snake.drop_tail(), None);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.get_name(), "Red Snake");
    }
}
