use thiserror::Error;

use crate::face::Face;

/// Reasons a set of net faces cannot be folded into a cube.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum NetError {
    #[error("a cube net has 6 faces, found {0}")]
    WrongFaceCount(usize),
    #[error("face {0} is not a square")]
    NotSquare(Face),
    #[error("face {face} has side {side}, expected {expected}")]
    UnevenFaces { face: Face, side: i16, expected: i16 },
    #[error("face {0} appears more than once in the net")]
    DuplicateFace(Face),
    #[error("root face {0} is not part of the net")]
    UnknownRoot(Face),
    #[error("face {0} can be reached twice: the net contains a loop")]
    Loop(Face),
    #[error("only {visited} out of {total} faces are connected to the root")]
    Disconnected { visited: usize, total: usize },
    #[error("faces {0} and {1} stopped touching while folding")]
    Detached(Face, Face),
    #[error("faces {0} and {1} fold onto the same square")]
    Overlapping(Face, Face),
    #[error("folded face {face} touches {neighbours} other faces instead of 4")]
    NotClosed { face: Face, neighbours: usize },
}
