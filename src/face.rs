use std::{fmt::Display, ops::Index};

use itertools::Itertools;

use crate::{
    direction::Direction,
    point::{Line, Point2, Point3},
};

/// A square face, either laid flat on the net or folded somewhere on the cube.
///
/// Vertices are wound counter-clockwise as seen from the net's side, with y pointing down:
///
/// ```text
///   [0] (0, 0)      [3] (T, 0)
///
///   [1] (0, T)      [2] (T, T)
/// ```
///
/// Two faces with the same vertices but a different starting point or winding are
/// different faces.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Face([Point3; 4]);

/// The local frame of a face: `x` runs along the face's columns, `y` along its rows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame {
    pub origin: Point3,
    pub x: Point3,
    pub y: Point3,
}

impl Face {
    pub const fn new(points: [Point3; 4]) -> Self {
        Self(points)
    }

    /// The net face of the `side`-long tile whose top-left cell is `top_left`. Neighbouring
    /// tiles share their border coordinates.
    pub fn tile(top_left: Point2, side: i16) -> Self {
        let Point2(x, y) = top_left;

        Self([
            Point3(x, y, 0),
            Point3(x, y + side, 0),
            Point3(x + side, y + side, 0),
            Point3(x + side, y, 0),
        ])
    }

    pub const fn points(&self) -> &[Point3; 4] {
        &self.0
    }

    pub fn at(&self, ix: isize) -> Point3 {
        self.0[ix.rem_euclid(self.0.len() as isize) as usize]
    }

    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        (0..self.0.len() as isize).map(move |i| Line::new(self.at(i), self.at(i + 1)))
    }

    pub fn side(&self) -> i16 {
        let Point3(x, y, z) = self.edge(Direction::West).as_vector();

        x.abs() + y.abs() + z.abs()
    }

    /// Whether the four points form an axis-aligned square with a nonzero side.
    pub fn is_square(&self) -> bool {
        let side = self.side();
        let sides: Vec<_> = self.edges().map(Line::as_vector).collect();

        side > 0
            && sides
                .iter()
                .circular_tuple_windows()
                .all(|(a, b)| a.is_axis_aligned() && a.dot(*b) == 0 && a.dot(*a) == side * side)
    }

    /// The edge crossed when leaving the face towards `dir` in its local frame, in this
    /// face's winding.
    pub fn edge(&self, dir: Direction) -> Line {
        use Direction::*;

        let start = match dir {
            West => 0,
            South => 1,
            East => 2,
            North => 3,
        };

        Line::new(self.at(start), self.at(start + 1))
    }

    pub fn frame(&self) -> Frame {
        let origin = self[0];

        Frame {
            origin,
            x: (self[3] - origin).normalise(),
            y: (self[1] - origin).normalise(),
        }
    }

    // faces of a consistently wound solid run along a shared edge in opposite directions,
    // so edge (self[i], self[i + 1]) matches (other[j], other[j - 1])
    fn shared_edge(&self, other: &Self) -> Option<(isize, isize)> {
        let n = self.0.len() as isize;

        (0..n).cartesian_product(0..n).find(|&(i, j)| {
            self.at(i) == other.at(j) && self.at(i + 1) == other.at(j - 1)
        })
    }

    /// Returns the first edge shared with `other`, expressed in this face's winding.
    pub fn touches(&self, other: &Self) -> Option<Line> {
        self.shared_edge(other)
            .map(|(i, _)| Line::new(self.at(i), self.at(i + 1)))
    }

    /// The unit direction pointing from the shared edge into `other`, along `other`'s side.
    pub fn dir_on_touching_face(&self, other: &Self) -> Option<Point3> {
        self.shared_edge(other)
            .map(|(_, j)| (other.at(j + 1) - other.at(j)).normalise())
    }

    /// Rotates the face by 90° around `hinge`, right-handed with respect to the hinge's
    /// direction.
    ///
    /// The hinge is always an axis-aligned edge, so the axis-angle rotation matrix
    ///
    /// ```text
    ///  [ x²       xy - z   xz + y ]
    ///  [ xy + z   y²       yz - x ]
    ///  [ xz - y   yz + x   z²     ]
    /// ```
    ///
    /// only ever has entries in {-1, 0, 1} and the result is exact.
    pub fn turn_around(&self, hinge: Line) -> Self {
        let Point3(x, y, z) = hinge.as_vector().normalise();
        let origin = hinge.from;

        Self(self.0.map(|pt| {
            let Point3(px, py, pz) = pt - origin;

            origin
                + Point3(
                    px * x * x + py * (x * y - z) + pz * (x * z + y),
                    px * (x * y + z) + py * y * y + pz * (y * z - x),
                    px * (x * z - y) + py * (y * z + x) + pz * z * z,
                )
        }))
    }
}

impl Index<isize> for Face {
    type Output = Point3;

    fn index(&self, ix: isize) -> &Self::Output {
        &self.0[ix.rem_euclid(self.0.len() as isize) as usize]
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.iter().format(", "))
    }
}
