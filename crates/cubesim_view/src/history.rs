use cubesim_core::Move;

/// Undo and redo stacks of moves.
///
/// The undo stack is the only record of how the cube got to its current
/// state; undo and solve both replay it backwards.
#[derive(Debug, Default, Clone)]
pub struct MoveHistory {
    /// Moves to undo, oldest first.
    undo_stack: Vec<Move>,
    /// Moves to redo, most recently undone last.
    redo_stack: Vec<Move>,
}
impl MoveHistory {
    /// Constructs an empty history.
    pub fn new() -> Self {
        Self::default()
    }
    /// Constructs a history from a list of moves, with nothing to redo.
    pub fn from_moves(moves: Vec<Move>) -> Self {
        Self {
            undo_stack: moves,
            redo_stack: vec![],
        }
    }

    /// Returns the moves on the undo stack, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.undo_stack
    }
    /// Returns the number of moves on the undo stack.
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }
    /// Returns whether the undo stack is empty.
    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }
    /// Returns the most recent move.
    pub fn last(&self) -> Option<Move> {
        self.undo_stack.last().copied()
    }
    /// Returns the move that would be redone next.
    pub fn next_redo(&self) -> Option<Move> {
        self.redo_stack.last().copied()
    }
    /// Returns whether there is a move to redo.
    pub fn has_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Records a new move and clears the redo stack.
    pub fn push(&mut self, mv: Move) {
        self.redo_stack.clear();
        self.undo_stack.push(mv);
    }
    /// Removes the most recent move without making it redoable.
    pub fn pop(&mut self) -> Option<Move> {
        self.undo_stack.pop()
    }
    /// Moves the most recent move onto the redo stack.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.undo_stack.pop()?;
        self.redo_stack.push(mv);
        Some(mv)
    }
    /// Moves the next redo move back onto the undo stack.
    pub fn redo(&mut self) -> Option<Move> {
        let mv = self.redo_stack.pop()?;
        self.undo_stack.push(mv);
        Some(mv)
    }

    /// Clears the redo stack.
    pub fn clear_redo(&mut self) {
        self.redo_stack.clear();
    }
    /// Clears both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
