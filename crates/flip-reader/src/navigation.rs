/// Direction of the transition currently in flight, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    None,
    Forward,
    Backward,
}

/// Pagination state machine. Two states: idle (`direction == None`) and
/// transitioning. A step command locks the machine until the caller reports
/// the animation finished; commands arriving while locked are dropped, not
/// queued. The animation timer lives with whoever drives the visible
/// transition, keeping this machine time-free.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    index: usize,
    len: usize,
    direction: Direction,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the bound when a sequence is published. The sequence only ever
    /// grows, so an index accepted against an empty sequence stays valid.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len > 0 && self.index >= len {
            self.index = len - 1;
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_transitioning(&self) -> bool {
        self.direction != Direction::None
    }

    /// Starts a forward transition. Returns false (and changes nothing) while
    /// locked or already at the last page.
    pub fn step_forward(&mut self) -> bool {
        if self.is_transitioning() || self.len == 0 || self.index + 1 >= self.len {
            return false;
        }
        self.direction = Direction::Forward;
        true
    }

    /// Starts a backward transition. Returns false (and changes nothing)
    /// while locked or at the first page.
    pub fn step_backward(&mut self) -> bool {
        if self.is_transitioning() || self.index == 0 {
            return false;
        }
        self.direction = Direction::Backward;
        true
    }

    /// Applies the pending index delta and unlocks. Returns the new index.
    /// A no-op when idle. A backward step clamps at 0: `set_len` may have
    /// pulled the index down to the first page while the step was pending.
    pub fn finish_transition(&mut self) -> usize {
        match self.direction {
            Direction::Forward => self.index += 1,
            Direction::Backward => self.index = self.index.saturating_sub(1),
            Direction::None => {}
        }
        self.direction = Direction::None;
        self.index
    }
}
