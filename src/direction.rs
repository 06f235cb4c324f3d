use std::fmt::Display;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use strum::{EnumCount, EnumIter};

use crate::point::Point2;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(i8)]
pub enum Rotate {
    Left = -1,
    Right = 1,
}

/// Facing on the map (or on a face, in its local frame). The discriminants are the facing
/// values used by the password.
#[repr(u8)]
#[derive(Clone, Copy, Debug, EnumCount, EnumIter, Eq, FromPrimitive, Hash, PartialEq)]
pub enum Direction {
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

impl Direction {
    pub const fn opposite(self) -> Self {
        use Direction::*;

        match self {
            North => South,
            East => West,
            South => North,
            West => East,
        }
    }

    pub fn turn(self, rot: Rotate) -> Self {
        Self::from_isize((self as isize + rot as isize).rem_euclid(Self::COUNT as isize))
            .expect("rem_euclid keeps the index in range")
    }

    pub const fn versor(self) -> Point2 {
        use Direction::*;

        match self {
            North => Point2(0, -1),
            East => Point2(1, 0),
            South => Point2(0, 1),
            West => Point2(-1, 0),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Direction::*;

        match self {
            East => '>',
            South => 'v',
            West => '<',
            North => '^',
        }
        .fmt(f)
    }
}
