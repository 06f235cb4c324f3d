use std::{
    collections::HashMap,
    fmt::Display,
    ops::Index,
};

use num::integer::Roots;

use crate::{
    direction::Direction,
    face::Face,
    fold::CUBE_FACES,
    point::Point2,
};

#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Material {
    #[default]
    Outside,
    Open,
    Wall,
}

impl Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Material::*;

        match self {
            Outside => ' ',
            Open => '.',
            Wall => '#',
        }
        .fmt(f)
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dimension {
    X,
    Y,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug)]
pub enum RowDirection {
    Start,
    End,
}

impl From<Direction> for RowDirection {
    fn from(value: Direction) -> Self {
        use Direction::*;
        use RowDirection::*;

        match value {
            North | West => Start,
            South | East => End,
        }
    }
}

impl Direction {
    /// The dimension that stays fixed while moving this way.
    pub const fn locked_dim(self) -> Dimension {
        use Dimension::*;
        use Direction::*;

        match self {
            North | South => X,
            East | West => Y,
        }
    }
}

impl Point2 {
    pub const fn get(self, dim: Dimension) -> i16 {
        match dim {
            Dimension::X => self.0,
            Dimension::Y => self.1,
        }
    }
}

/// A row (or column, when locked on X) of the grid.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    grid: &'a Grid,
    locked_on: Dimension,
    ix: usize,
}

impl Row<'_> {
    pub fn iter(
        &self,
    ) -> impl ExactSizeIterator<Item = Material> + DoubleEndedIterator<Item = Material> + '_ {
        let (dim_w, dim_h) = self.grid.dims();

        use Dimension::*;

        match self.locked_on {
            X => 0..dim_h,
            Y => 0..dim_w,
        }
        .map(move |ix| self[ix])
    }

    fn point_at(&self, n: usize) -> Point2 {
        use Dimension::*;

        match self.locked_on {
            X => (self.ix, n),
            Y => (n, self.ix),
        }
        .try_into()
        .expect("this should never overflow an i16")
    }

    pub fn start(&self) -> Option<Point2> {
        self.iter()
            .position(|m| m != Material::Outside)
            .map(|n| self.point_at(n))
    }

    pub fn end(&self) -> Option<Point2> {
        self.iter()
            .rposition(|m| m != Material::Outside)
            .map(|n| self.point_at(n))
    }

    pub fn first_at(&self, dir: RowDirection) -> Option<Point2> {
        use RowDirection::*;

        match dir {
            Start => self.start(),
            End => self.end(),
        }
    }

    /// How many cells of this row are on the map.
    pub fn span(&self) -> usize {
        self.iter().filter(|&m| m != Material::Outside).count()
    }
}

impl Index<usize> for Row<'_> {
    type Output = Material;

    fn index(&self, a: usize) -> &Self::Output {
        use Dimension::*;

        let coord = match self.locked_on {
            X => (self.ix, a),
            Y => (a, self.ix),
        };

        &self.grid[coord]
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    grid: Vec<Vec<Material>>,
    dim: (usize, usize),
}

impl Grid {
    pub fn new(mut grid: Vec<Vec<Material>>, dim_x: usize) -> Self {
        for row in &mut grid {
            row.resize(dim_x, Material::Outside);
        }

        let dim_y = grid.len();

        assert!(i16::try_from(dim_x).and(i16::try_from(dim_y)).is_ok());

        Self {
            grid,
            dim: (dim_x, dim_y),
        }
    }

    pub const fn dims(&self) -> (usize, usize) {
        self.dim
    }

    fn in_bounds(&self, Point2(x, y): Point2) -> bool {
        let (dim_x, dim_y) = (self.dims().0 as i16, self.dims().1 as i16);

        (0..dim_x).contains(&x) && (0..dim_y).contains(&y)
    }

    pub fn is_inside(&self, p: Point2) -> bool {
        self.in_bounds(p) && self[p] != Material::Outside
    }

    pub fn is_outside(&self, p: Point2) -> bool {
        !self.is_inside(p)
    }

    /// `None` when `p` is off the map.
    pub fn is_wall(&self, p: Point2) -> Option<bool> {
        self.is_inside(p).then(|| self[p] == Material::Wall)
    }

    pub fn row_on(&self, dim: Dimension, ix: usize) -> Row<'_> {
        Row {
            grid: self,
            locked_on: dim,
            ix,
        }
    }

    pub fn row(&self, ix: usize) -> Row<'_> {
        self.row_on(Dimension::Y, ix)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows_on(Dimension::Y)
    }

    pub fn rows_on(&self, dim: Dimension) -> impl Iterator<Item = Row<'_>> {
        let (dim_x, dim_y) = self.dims();

        use Dimension::*;

        match dim {
            X => 0..dim_x,
            Y => 0..dim_y,
        }
        .map(move |ix| self.row_on(dim, ix))
    }

    /// Side of the cube this map folds into: six faces cover `6 * side²` cells.
    pub fn face_len(&self) -> Option<i16> {
        let cells: usize = self.rows().map(|r| r.span()).sum();
        let side = (cells / CUBE_FACES).sqrt();

        (side > 0 && side * side * CUBE_FACES == cells)
            .then(|| i16::try_from(side).ok())
            .flatten()
    }

    /// Net faces for every `side`-long tile on the map, in row-major order.
    pub fn net_faces(&self, side: i16) -> Vec<Face> {
        let (dim_x, dim_y) = self.dims();
        let step = side.max(1) as usize;

        (0..dim_y)
            .step_by(step)
            .flat_map(|y| (0..dim_x).step_by(step).map(move |x| (x, y)))
            .filter_map(|p| Point2::try_from(p).ok())
            .filter(|&p| self.is_inside(p))
            .map(|p| Face::tile(p, side))
            .collect()
    }

    /// Draws the map, with the last direction taken on every traversed cell.
    pub fn render(&self, traversed: &HashMap<Point2, Direction>) -> String {
        let mut ret = String::new();

        for (j, row) in self.rows().enumerate() {
            for (i, m) in row.iter().enumerate() {
                let p = Point2::try_from((i, j)).expect("map is too big");

                match traversed.get(&p) {
                    Some(dir) => ret.push_str(&dir.to_string()),
                    None => ret.push_str(&m.to_string()),
                }
            }

            ret.push('\n');
        }

        ret
    }
}

impl Index<Point2> for Grid {
    type Output = Material;

    fn index(&self, Point2(i, j): Point2) -> &Self::Output {
        &self[(i as usize, j as usize)]
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Material;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.grid[j][i]
    }
}
