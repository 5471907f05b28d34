use log::info;
use rand::Rng;
use shared::{
    rects_overlap, Rect, StateUpdate, BALL_RADIUS, MAX_BALL_SPEED, PADDLE1_X, PADDLE2_X,
    PADDLE_HEIGHT, PADDLE_WIDTH, WORLD_HEIGHT, WORLD_WIDTH,
};

/// Paddles start centered on the board.
pub const DEFAULT_PADDLE_Y: i32 = ((WORLD_HEIGHT - PADDLE_HEIGHT) / 2.0) as i32;
/// Largest paddle offset that keeps the paddle fully on the board.
pub const PADDLE_MAX_Y: i32 = (WORLD_HEIGHT - PADDLE_HEIGHT) as i32;
/// Initial serve velocity, pixels per tick on both axes.
pub const SERVE_SPEED: f32 = 5.0;

/// The authoritative game state. Owned exclusively by the simulation task;
/// paddle writes arrive through the command channel and are applied between
/// ticks, so no reader ever observes a half-updated snapshot.
#[derive(Debug, Clone)]
pub struct GameState {
    pub paddle1_y: i32,
    pub paddle2_y: i32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_vel_x: f32,
    pub ball_vel_y: f32,
    pub score1: u32,
    pub score2: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            paddle1_y: DEFAULT_PADDLE_Y,
            paddle2_y: DEFAULT_PADDLE_Y,
            ball_x: WORLD_WIDTH / 2.0,
            ball_y: WORLD_HEIGHT / 2.0,
            ball_vel_x: SERVE_SPEED,
            ball_vel_y: SERVE_SPEED,
            score1: 0,
            score2: 0,
        }
    }

    /// Records a paddle offset as sent by the owning client. The value is
    /// clamped into the board by the next tick, not here.
    pub fn set_paddle(&mut self, slot: u8, y: i32) {
        match slot {
            1 => self.paddle1_y = y,
            2 => self.paddle2_y = y,
            _ => {}
        }
    }

    /// Advances the simulation by one tick: clamp paddles, integrate the
    /// ball, bounce off the rails and paddles, score, clamp velocity.
    /// Every effect is applied before the caller broadcasts the snapshot.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        self.paddle1_y = self.paddle1_y.clamp(0, PADDLE_MAX_Y);
        self.paddle2_y = self.paddle2_y.clamp(0, PADDLE_MAX_Y);

        // Velocities are pixels per tick, so integration has no dt term.
        self.ball_x += self.ball_vel_x;
        self.ball_y += self.ball_vel_y;

        if self.ball_y <= BALL_RADIUS || self.ball_y >= WORLD_HEIGHT - BALL_RADIUS {
            self.ball_vel_y = -self.ball_vel_y;
        }

        let ball = Rect::new(
            self.ball_x - BALL_RADIUS,
            self.ball_y - BALL_RADIUS,
            BALL_RADIUS * 2.0,
            BALL_RADIUS * 2.0,
        );
        let paddle1 = Rect::new(PADDLE1_X, self.paddle1_y as f32, PADDLE_WIDTH, PADDLE_HEIGHT);
        let paddle2 = Rect::new(PADDLE2_X, self.paddle2_y as f32, PADDLE_WIDTH, PADDLE_HEIGHT);

        // The velocity-sign condition keeps the ball from re-inverting on
        // consecutive ticks while still overlapping the same paddle.
        if rects_overlap(&ball, &paddle1) && self.ball_vel_x < 0.0 {
            self.ball_vel_x = -self.ball_vel_x;
            self.ball_vel_y += rng.gen_range(-2.0..2.0);
        } else if rects_overlap(&ball, &paddle2) && self.ball_vel_x > 0.0 {
            self.ball_vel_x = -self.ball_vel_x;
            self.ball_vel_y += rng.gen_range(-2.0..2.0);
        }

        if self.ball_x < 0.0 {
            self.score2 += 1;
            info!("Player 2 scores ({} - {})", self.score1, self.score2);
            self.serve(rng);
            self.ball_vel_x = self.ball_vel_x.abs();
        } else if self.ball_x > WORLD_WIDTH {
            self.score1 += 1;
            info!("Player 1 scores ({} - {})", self.score1, self.score2);
            self.serve(rng);
            self.ball_vel_x = -self.ball_vel_x.abs();
        }

        self.ball_vel_x = self.ball_vel_x.clamp(-MAX_BALL_SPEED, MAX_BALL_SPEED);
        self.ball_vel_y = self.ball_vel_y.clamp(-MAX_BALL_SPEED, MAX_BALL_SPEED);
    }

    /// Recenters the ball after a point with a fresh vertical velocity.
    /// The caller fixes the horizontal serve direction.
    fn serve(&mut self, rng: &mut impl Rng) {
        self.ball_x = WORLD_WIDTH / 2.0;
        self.ball_y = WORLD_HEIGHT / 2.0;
        self.ball_vel_y = rng.gen_range(-5.0..5.0);
    }

    pub fn snapshot(&self) -> StateUpdate {
        StateUpdate {
            paddle1_y: self.paddle1_y,
            paddle2_y: self.paddle2_y,
            ball_x: self.ball_x,
            ball_y: self.ball_y,
            ball_vel_x: self.ball_vel_x,
            ball_vel_y: self.ball_vel_y,
            score1: self.score1,
            score2: self.score2,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
