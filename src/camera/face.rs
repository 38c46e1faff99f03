use serde::{Deserialize, Serialize};
use std::fmt;

/// Cube faces in the order they are photographed and sent to the solver.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    Up,
    Front,
    Left,
    Back,
    Right,
    Down,
}

pub const FACE_COUNT: usize = 6;

impl CubeFace {
    pub const CAPTURE_ORDER: [CubeFace; FACE_COUNT] = [
        CubeFace::Up,
        CubeFace::Front,
        CubeFace::Left,
        CubeFace::Back,
        CubeFace::Right,
        CubeFace::Down,
    ];

    pub fn at(index: usize) -> Option<Self> {
        Self::CAPTURE_ORDER.get(index).copied()
    }

    /// Center color under the standard color scheme.
    pub fn color(&self) -> &'static str {
        match self {
            CubeFace::Up => "White",
            CubeFace::Front => "Green",
            CubeFace::Left => "Red",
            CubeFace::Back => "Blue",
            CubeFace::Right => "Orange",
            CubeFace::Down => "Yellow",
        }
    }

    pub fn side(&self) -> &'static str {
        match self {
            CubeFace::Up => "Up",
            CubeFace::Front => "Front",
            CubeFace::Left => "Left",
            CubeFace::Back => "Back",
            CubeFace::Right => "Right",
            CubeFace::Down => "Down",
        }
    }
}

impl fmt::Display for CubeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.color(), self.side())
    }
}
