use std::{
    fmt::Display,
    num::TryFromIntError,
    ops::{Add, AddAssign, Mul, Sub},
};

use crate::direction::Direction;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Point2(pub i16, pub i16);

impl Add for Point2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(
            self.0.checked_add(rhs.0).unwrap(),
            self.1.checked_add(rhs.1).unwrap(),
        )
    }
}

impl AddAssign for Point2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl AddAssign<Direction> for Point2 {
    fn add_assign(&mut self, rhs: Direction) {
        *self += rhs.versor()
    }
}

impl Add<Direction> for Point2 {
    type Output = Self;

    fn add(self, rhs: Direction) -> Self::Output {
        self + rhs.versor()
    }
}

impl Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self(x, y) = self;

        write!(f, "({x}, {y})")
    }
}

impl Sub for Point2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(
            self.0.checked_sub(rhs.0).unwrap(),
            self.1.checked_sub(rhs.1).unwrap(),
        )
    }
}

impl TryFrom<(usize, usize)> for Point2 {
    type Error = TryFromIntError;

    fn try_from((x, y): (usize, usize)) -> Result<Self, Self::Error> {
        Ok(Self(x.try_into()?, y.try_into()?))
    }
}

/// A point (or vector) in the space the cube is folded in.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Point3(pub i16, pub i16, pub i16);

impl Point3 {
    pub const fn sum(self) -> i16 {
        self.0 + self.1 + self.2
    }

    pub const fn dot(self, Self(x, y, z): Self) -> i16 {
        self.0 * x + self.1 * y + self.2 * z
    }

    pub const fn is_axis_aligned(self) -> bool {
        let Self(x, y, z) = self;

        (x != 0) as u8 + (y != 0) as u8 + (z != 0) as u8 == 1
    }

    /// Scales an axis-aligned vector down to unit length.
    ///
    /// Panics if more or less than one component is nonzero: every vector normalised while
    /// folding or mapping is an edge of a square face, so anything else is a bug.
    pub fn normalise(self) -> Self {
        assert!(
            self.is_axis_aligned(),
            "only axis-aligned vectors can be normalised, got {self}"
        );

        let Self(x, y, z) = self;

        Self(x.signum(), y.signum(), z.signum())
    }

    /// Drops the z component. Only meaningful for points lying on the net's plane.
    pub fn flatten(self) -> Point2 {
        assert_eq!(self.2, 0, "{self} is not on the z = 0 plane");

        Point2(self.0, self.1)
    }
}

impl Display for Point3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self(x, y, z) = self;

        write!(f, "({x}, {y}, {z})")
    }
}

impl From<Point2> for Point3 {
    fn from(Point2(x, y): Point2) -> Self {
        Self(x, y, 0)
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Self) -> Self::Output {
        self.0
            .checked_add(rhs.0)
            .zip(self.1.checked_add(rhs.1))
            .zip(self.2.checked_add(rhs.2))
            .map(|((x, y), z)| Self(x, y, z))
            .expect("integer overflow")
    }
}

impl Add<Point2> for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point2) -> Self::Output {
        self + Self::from(rhs)
    }
}

impl Sub for Point3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.0
            .checked_sub(rhs.0)
            .zip(self.1.checked_sub(rhs.1))
            .zip(self.2.checked_sub(rhs.2))
            .map(|((x, y), z)| Self(x, y, z))
            .expect("integer overflow")
    }
}

impl Mul<i16> for Point3 {
    type Output = Point3;

    fn mul(self, rhs: i16) -> Self::Output {
        let Self(x, y, z) = self;

        x.checked_mul(rhs)
            .zip(y.checked_mul(rhs))
            .zip(z.checked_mul(rhs))
            .map(|((x, y), z)| Self(x, y, z))
            .expect("integer overflow")
    }
}

/// A directed edge. `a -> b` and `b -> a` are different lines.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Line {
    pub from: Point3,
    pub to: Point3,
}

impl Line {
    pub const fn new(from: Point3, to: Point3) -> Self {
        Self { from, to }
    }

    pub const fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    pub fn as_vector(self) -> Point3 {
        self.to - self.from
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { from, to } = self;

        write!(f, "{from} -> {to}")
    }
}
