use std::time::Instant;

use rand::Rng;

use crate::maze::{Grid, Pos};
use crate::score::RecordBook;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    NotStarted,
    Ready,
    Playing,
    Won,
}

#[derive(Clone, Copy, Debug)]
pub struct WinInfo {
    pub elapsed_secs: u64,
    pub new_record: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct MoveOutcome {
    pub moved: bool,
    pub phase: Phase,
    pub win: Option<WinInfo>,
}

/// One game of maze escape. The grid is fixed for the lifetime of a round;
/// every mutation goes through `new_game` and `move_player`. Invalid input
/// never errors, it degrades to a no-op.
pub struct GameSession {
    grid: Grid,
    player: Pos,
    exit: Pos,
    started_at: Option<Instant>,
    phase: Phase,
    won: Option<WinInfo>,
    records: RecordBook,
}

impl GameSession {
    pub fn new(size: usize, records: RecordBook, rng: &mut impl Rng) -> Self {
        let grid = Grid::generate(size, rng);
        Self {
            player: Pos { x: 1, y: 1 },
            exit: Pos {
                x: size - 2,
                y: size - 2,
            },
            grid,
            started_at: None,
            phase: Phase::NotStarted,
            won: None,
            records,
        }
    }

    pub fn new_game(&mut self, rng: &mut impl Rng) {
        let size = self.grid.size();
        self.grid = Grid::generate(size, rng);
        self.player = Pos { x: 1, y: 1 };
        self.started_at = None;
        self.won = None;
        self.phase = Phase::Ready;
    }

    pub fn move_player(&mut self, dir: Dir) -> MoveOutcome {
        if !matches!(self.phase, Phase::Ready | Phase::Playing) {
            return self.rejected();
        }

        let (dx, dy) = dir.delta();
        let nx = self.player.x as isize + dx;
        let ny = self.player.y as isize + dy;
        if !self.grid.contains(nx, ny) {
            return self.rejected();
        }
        let candidate = Pos {
            x: nx as usize,
            y: ny as usize,
        };
        if !self.grid.is_path(candidate) {
            return self.rejected();
        }

        self.player = candidate;
        if self.phase == Phase::Ready {
            self.started_at = Some(Instant::now());
            self.phase = Phase::Playing;
        }

        if self.player == self.exit {
            let elapsed_secs = self
                .started_at
                .map(|start| start.elapsed().as_secs())
                .unwrap_or(0);
            let new_record = self.records.submit(elapsed_secs);
            let win = WinInfo {
                elapsed_secs,
                new_record,
            };
            self.phase = Phase::Won;
            self.won = Some(win);
            return MoveOutcome {
                moved: true,
                phase: self.phase,
                win: Some(win),
            };
        }

        MoveOutcome {
            moved: true,
            phase: self.phase,
            win: None,
        }
    }

    fn rejected(&self) -> MoveOutcome {
        MoveOutcome {
            moved: false,
            phase: self.phase,
            win: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn exit(&self) -> Pos {
        self.exit
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_win(&self) -> Option<WinInfo> {
        self.won
    }

    pub fn best_secs(&self) -> Option<u64> {
        self.records.best()
    }

    /// Whole seconds since the first move of the round; frozen once won.
    pub fn elapsed_secs(&self) -> u64 {
        match self.phase {
            Phase::Won => self.won.map(|w| w.elapsed_secs).unwrap_or(0),
            Phase::Playing => self
                .started_at
                .map(|start| start.elapsed().as_secs())
                .unwrap_or(0),
            Phase::NotStarted | Phase::Ready => 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_grid(grid: Grid, records: RecordBook) -> Self {
        let size = grid.size();
        Self {
            player: Pos { x: 1, y: 1 },
            exit: Pos {
                x: size - 2,
                y: size - 2,
            },
            grid,
            started_at: None,
            phase: Phase::Ready,
            won: None,
            records,
        }
    }
}
