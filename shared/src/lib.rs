//! Protocol and geometry definitions shared by the server and client tools.
//!
//! The wire format is a newline-terminated text protocol. Clients send
//! `PADDLE<n>_Y:<int>` lines; the server broadcasts one colon-delimited
//! state line per tick with a fixed tag/field order (see [`StateUpdate`]).

/// Board width in pixels.
pub const WORLD_WIDTH: f32 = 1000.0;
/// Board height in pixels.
pub const WORLD_HEIGHT: f32 = 600.0;
pub const BALL_RADIUS: f32 = 10.0;
pub const PADDLE_WIDTH: f32 = 10.0;
pub const PADDLE_HEIGHT: f32 = 100.0;
/// Left edge of paddle 1.
pub const PADDLE1_X: f32 = 20.0;
/// Left edge of paddle 2.
pub const PADDLE2_X: f32 = WORLD_WIDTH - PADDLE_WIDTH - 20.0;
/// Per-component ball velocity bound, pixels per tick.
pub const MAX_BALL_SPEED: f32 = 10.0;

/// Session-termination token reserved by the protocol grammar. The server
/// emits it when refusing a connection beyond the two player slots.
pub const GAME_OVER: &str = "GAME_OVER";

/// A parsed inbound client command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `PADDLE<slot>_Y:<y>` — move the given paddle to a new y offset.
    PaddleY { slot: u8, y: i32 },
}

impl Command {
    /// Parses one inbound line. Only `PADDLE1_Y:<int>` and `PADDLE2_Y:<int>`
    /// are recognized; anything else (including `GAME_OVER`) yields `None`.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim_end_matches(['\r', '\n']);
        let rest = line.strip_prefix("PADDLE")?;
        let (slot, value) = match rest.strip_prefix("1_Y:") {
            Some(v) => (1, v),
            None => (2, rest.strip_prefix("2_Y:")?),
        };
        let y = value.parse::<i32>().ok()?;
        Some(Command::PaddleY { slot, y })
    }
}

/// One authoritative state snapshot, in broadcast field order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateUpdate {
    pub paddle1_y: i32,
    pub paddle2_y: i32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_vel_x: f32,
    pub ball_vel_y: f32,
    pub score1: u32,
    pub score2: u32,
}

impl StateUpdate {
    /// Formats the newline-terminated broadcast line. Tag names, field
    /// order and the `:` delimiter are fixed; compatible clients parse by
    /// splitting on the delimiter and reading fixed offsets.
    pub fn to_line(&self) -> String {
        format!(
            "PADDLE1_Y:{}:PADDLE2_Y:{}:BALL_X:{}:BALL_Y:{}:BALL_VEL_X:{}:BALL_VEL_Y:{}:SCORE1:{}:SCORE2:{}\n",
            self.paddle1_y,
            self.paddle2_y,
            self.ball_x,
            self.ball_y,
            self.ball_vel_x,
            self.ball_vel_y,
            self.score1,
            self.score2,
        )
    }

    /// Parses a broadcast line back into a snapshot. Used by client-side
    /// tooling; the server never consumes this direction.
    pub fn parse_line(line: &str) -> Option<StateUpdate> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() != 16 {
            return None;
        }
        let tags = [
            "PADDLE1_Y",
            "PADDLE2_Y",
            "BALL_X",
            "BALL_Y",
            "BALL_VEL_X",
            "BALL_VEL_Y",
            "SCORE1",
            "SCORE2",
        ];
        for (i, tag) in tags.iter().enumerate() {
            if fields[i * 2] != *tag {
                return None;
            }
        }
        Some(StateUpdate {
            paddle1_y: fields[1].parse().ok()?,
            paddle2_y: fields[3].parse().ok()?,
            ball_x: fields[5].parse().ok()?,
            ball_y: fields[7].parse().ok()?,
            ball_vel_x: fields[9].parse().ok()?,
            ball_vel_y: fields[11].parse().ok()?,
            score1: fields[13].parse().ok()?,
            score2: fields[15].parse().ok()?,
        })
    }
}

/// Axis-aligned rectangle used for ball/paddle collision.
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// AABB intersection test. Edge-touching rectangles do not overlap.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.x + a.width <= b.x
        || b.x + b.width <= a.x
        || a.y + a.height <= b.y
        || b.y + b.height <= a.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_parse_paddle_commands() {
        assert_eq!(
            Command::parse("PADDLE1_Y:250"),
            Some(Command::PaddleY { slot: 1, y: 250 })
        );
        assert_eq!(
            Command::parse("PADDLE2_Y:-40\n"),
            Some(Command::PaddleY { slot: 2, y: -40 })
        );
        assert_eq!(
            Command::parse("PADDLE1_Y:0\r\n"),
            Some(Command::PaddleY { slot: 1, y: 0 })
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("PADDLE1_Y:"), None);
        assert_eq!(Command::parse("PADDLE1_Y:abc"), None);
        assert_eq!(Command::parse("PADDLE3_Y:100"), None);
        assert_eq!(Command::parse("PADDLE1_X:100"), None);
        assert_eq!(Command::parse("paddle1_y:100"), None);
        assert_eq!(Command::parse("GAME_OVER"), None);
        assert_eq!(Command::parse("BALL_X:5"), None);
    }

    #[test]
    fn test_parse_rejects_trailing_junk() {
        assert_eq!(Command::parse("PADDLE1_Y:10:extra"), None);
        assert_eq!(Command::parse("PADDLE1_Y:1.5"), None);
    }

    #[test]
    fn test_state_line_format() {
        let state = StateUpdate {
            paddle1_y: 250,
            paddle2_y: 300,
            ball_x: 505.5,
            ball_y: 305.0,
            ball_vel_x: 5.5,
            ball_vel_y: -5.0,
            score1: 2,
            score2: 7,
        };

        let expected = "PADDLE1_Y:250:PADDLE2_Y:300:BALL_X:505.5:BALL_Y:305:BALL_VEL_X:5.5:BALL_VEL_Y:-5:SCORE1:2:SCORE2:7\n";
        assert_eq!(state.to_line(), expected);
    }

    #[test]
    fn test_state_line_roundtrip() {
        let state = StateUpdate {
            paddle1_y: 0,
            paddle2_y: 500,
            ball_x: 500.0,
            ball_y: 300.0,
            ball_vel_x: -7.25,
            ball_vel_y: 3.5,
            score1: 0,
            score2: 1,
        };

        let parsed = StateUpdate::parse_line(&state.to_line()).unwrap();
        assert_eq!(parsed.paddle1_y, 0);
        assert_eq!(parsed.paddle2_y, 500);
        assert_approx_eq!(parsed.ball_x, 500.0);
        assert_approx_eq!(parsed.ball_y, 300.0);
        assert_approx_eq!(parsed.ball_vel_x, -7.25);
        assert_approx_eq!(parsed.ball_vel_y, 3.5);
        assert_eq!(parsed.score1, 0);
        assert_eq!(parsed.score2, 1);
    }

    #[test]
    fn test_state_line_parse_rejects_malformed() {
        assert_eq!(StateUpdate::parse_line("GAME_OVER"), None);
        assert_eq!(StateUpdate::parse_line(""), None);
        assert_eq!(StateUpdate::parse_line("PADDLE1_Y:1:PADDLE2_Y:2"), None);

        // Right shape, wrong tag
        let wrong_tag = "PADDLE1_Y:1:PADDLE2_Y:2:BALL_Z:3:BALL_Y:4:BALL_VEL_X:5:BALL_VEL_Y:6:SCORE1:7:SCORE2:8";
        assert_eq!(StateUpdate::parse_line(wrong_tag), None);
    }

    #[test]
    fn test_rects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(10.0, 0.0, 10.0, 10.0);
        let d = Rect::new(20.0, 20.0, 5.0, 5.0);

        assert!(rects_overlap(&a, &b));
        assert!(rects_overlap(&b, &a));
        // Exact edge touch is not an overlap
        assert!(!rects_overlap(&a, &c));
        assert!(!rects_overlap(&a, &d));
    }

    #[test]
    fn test_paddle_geometry_constants() {
        assert_approx_eq!(PADDLE2_X, 970.0);
        assert!(PADDLE1_X + PADDLE_WIDTH < WORLD_WIDTH / 2.0);
        assert!(PADDLE2_X > WORLD_WIDTH / 2.0);
    }
}
