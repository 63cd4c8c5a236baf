//! Core game state and logic
//!
//! A [`Game`] owns the board, the falling piece and the score, and only
//! changes in response to [`Action`]s and elapsed time passed to
//! [`Game::tick`]. Anything the host should react to (sounds, overlays) is
//! queued as a [`GameEvent`] and collected with [`Game::poll_events`].

use crate::board::Board;
use crate::kick::rotate_with_kick;
use crate::piece::{Piece, Position};
use crate::randomizer::Randomizer;
use crate::score::Score;
use crate::settings::GameConfig;
use crate::tetromino::RotationDirection;
use std::time::Duration;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    NotStarted,
    Running,
    Paused,
    Over,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    TogglePause,
    Restart,
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCW,
    RotateCCW,
    /// Handled by the host loop; the session ignores it
    Quit,
}

/// Feedback for audio and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh session began (start or restart)
    GameStarted,
    /// One sweep removed this many rows
    LinesCleared(u32),
    PausedChanged(bool),
    /// A new piece could not be placed
    GameOver,
}

/// Read-only copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Locked cells, [row][col], row 0 at the top
    pub grid: Vec<Vec<u8>>,
    pub piece: Option<Piece>,
    pub position: Position,
    pub score: u64,
    pub lines: u32,
    pub state: GameState,
}

impl GameSnapshot {
    /// The grid with the active piece drawn over it (cells above the top are cut off)
    pub fn composited(&self) -> Vec<Vec<u8>> {
        let mut grid = self.grid.clone();
        if let Some(piece) = &self.piece {
            for (x, y, value) in piece.cells() {
                let col = self.position.x + x;
                let row = self.position.y + y;
                if col < 0 || row < 0 {
                    continue;
                }
                if let Some(cell) = grid
                    .get_mut(row as usize)
                    .and_then(|cells| cells.get_mut(col as usize))
                {
                    *cell = value;
                }
            }
        }
        grid
    }
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    /// The game board
    board: Board,
    /// Current falling piece, a private copy of its template
    current_piece: Option<Piece>,
    /// Top-left corner of the current piece's matrix
    position: Position,
    /// Piece randomizer
    randomizer: Randomizer,
    /// Score tracking
    score: Score,
    /// Current game state
    state: GameState,
    /// Time between automatic drops
    drop_interval: Duration,
    /// Time accumulated since the last drop
    drop_counter: Duration,
    /// Timestamp of the previous tick; `None` until the first tick after a reset
    last_tick: Option<Duration>,
    /// Undelivered feedback events
    events: Vec<GameEvent>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    /// Create a new game with randomly chosen pieces
    pub fn new(config: GameConfig) -> Self {
        Self::with_randomizer(config, Randomizer::new())
    }

    /// Create a new game whose piece sequence is fixed by `seed`
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_randomizer(config, Randomizer::with_seed(seed))
    }

    pub fn with_randomizer(config: GameConfig, randomizer: Randomizer) -> Self {
        Self {
            config,
            board: Board::new(config.cols, config.rows),
            current_piece: None,
            position: Position::default(),
            randomizer,
            score: Score::new(),
            state: GameState::NotStarted,
            drop_interval: config.drop_interval(),
            drop_counter: Duration::ZERO,
            last_tick: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current_piece.as_ref()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn score(&self) -> u64 {
        self.score.points
    }

    /// Total rows cleared this session
    pub fn lines(&self) -> u32 {
        self.score.lines
    }

    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    /// Change the automatic drop pace; it is restored from the config on reset
    pub fn set_drop_interval(&mut self, interval: Duration) {
        self.drop_interval = interval;
    }

    /// Take all events queued since the last poll
    pub fn poll_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.board.cells().to_vec(),
            piece: self.current_piece.clone(),
            position: self.position,
            score: self.score.points,
            lines: self.score.lines,
            state: self.state,
        }
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        match action {
            Action::Start => self.start(),
            Action::TogglePause => self.toggle_pause(),
            Action::Restart => self.restart(),
            Action::MoveLeft => {
                self.move_piece(-1);
            }
            Action::MoveRight => {
                self.move_piece(1);
            }
            Action::SoftDrop => {
                self.drop_piece();
            }
            Action::HardDrop => self.hard_drop(),
            Action::RotateCW => {
                self.rotate(RotationDirection::Clockwise);
            }
            Action::RotateCCW => {
                self.rotate(RotationDirection::CounterClockwise);
            }
            Action::Quit => {}
        }
    }

    /// Begin the first session; ignored once the game has started
    pub fn start(&mut self) {
        if self.state != GameState::NotStarted {
            return;
        }
        tracing::info!("Game started");
        self.reset();
    }

    /// Throw away the current session and begin a fresh one, from any state
    pub fn restart(&mut self) {
        tracing::info!(
            "Game restarted from {:?} with score {}",
            self.state,
            self.score.points
        );
        self.reset();
    }

    /// Pause or resume; ignored before the start and after game over
    pub fn toggle_pause(&mut self) {
        let paused = match self.state {
            GameState::Running => true,
            GameState::Paused => false,
            GameState::NotStarted | GameState::Over => return,
        };
        self.state = if paused {
            GameState::Paused
        } else {
            GameState::Running
        };
        tracing::debug!("Paused: {}", paused);
        self.events.push(GameEvent::PausedChanged(paused));
    }

    /// Advance the drop clock to the host's monotonic timestamp `now`
    ///
    /// While not running the baseline just follows `now`, so time spent paused
    /// or game over never turns into a burst of drops.
    pub fn tick(&mut self, now: Duration) {
        let previous = self.last_tick.replace(now);
        if self.state != GameState::Running {
            return;
        }
        let elapsed = previous.map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.advance(elapsed);
    }

    /// Add `elapsed` to the drop counter and drop once if it passed the interval
    pub fn advance(&mut self, elapsed: Duration) {
        if self.state != GameState::Running {
            return;
        }
        self.drop_counter += elapsed;
        if self.drop_counter > self.drop_interval {
            self.drop_piece();
        }
    }

    /// Shift the piece one column (`dir` is -1 or +1); returns false if blocked
    pub fn move_piece(&mut self, dir: i32) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        let Some(piece) = &self.current_piece else {
            return false;
        };

        let target = Position::new(self.position.x + dir, self.position.y);
        if self.board.collides(piece, target) {
            return false;
        }
        self.position = target;
        true
    }

    /// Rotate the piece, kicking it sideways if needed; returns false if it stayed put
    pub fn rotate(&mut self, direction: RotationDirection) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        let Some(piece) = &mut self.current_piece else {
            return false;
        };
        rotate_with_kick(&self.board, piece, &mut self.position, direction)
    }

    /// Move the piece down one row, locking it if it cannot move
    ///
    /// Shared by soft drop and gravity. Resets the drop counter either way.
    /// Returns true if the piece locked.
    pub fn drop_piece(&mut self) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        let Some(piece) = &self.current_piece else {
            return false;
        };

        let below = Position::new(self.position.x, self.position.y + 1);
        let locked = if self.board.collides(piece, below) {
            self.lock_piece();
            true
        } else {
            self.position = below;
            false
        };

        self.drop_counter = Duration::ZERO;
        locked
    }

    /// Drop the piece until it locks
    pub fn hard_drop(&mut self) {
        if self.state != GameState::Running || self.current_piece.is_none() {
            return;
        }
        while !self.drop_piece() {}
    }

    /// Commit the current piece to the board, sweep, and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(piece) = self.current_piece.take() else {
            return;
        };

        self.board.merge(&piece, self.position);
        tracing::debug!(
            "Locked {} at ({}, {})",
            piece.kind.name(),
            self.position.x,
            self.position.y
        );

        let lines_cleared = self.board.sweep();
        if lines_cleared > 0 {
            let delta = self
                .score
                .add_sweep(lines_cleared, self.config.line_clear_base);
            tracing::debug!(
                "Cleared {} lines for {} points (score {})",
                lines_cleared,
                delta,
                self.score.points
            );
            self.events.push(GameEvent::LinesCleared(lines_cleared));
        }

        self.spawn_piece();
    }

    /// Place a fresh piece at the top center; a collision there ends the game
    fn spawn_piece(&mut self) {
        let piece = Piece::new(self.randomizer.next_kind());
        let x = (self.board.cols() as i32 - piece.width() as i32).div_euclid(2);
        self.position = Position::new(x, 0);

        let topped_out = self.board.collides(&piece, self.position);
        self.current_piece = Some(piece);

        if topped_out {
            self.state = GameState::Over;
            tracing::info!(
                "Game over: score {}, lines {}",
                self.score.points,
                self.score.lines
            );
            self.events.push(GameEvent::GameOver);
        }
    }

    /// Fresh board, zero score, default pace, new piece, running
    fn reset(&mut self) {
        self.board = Board::new(self.config.cols, self.config.rows);
        self.score = Score::new();
        self.drop_interval = self.config.drop_interval();
        self.drop_counter = Duration::ZERO;
        self.last_tick = None;
        self.state = GameState::Running;
        self.events.push(GameEvent::GameStarted);
        self.spawn_piece();
    }
}
