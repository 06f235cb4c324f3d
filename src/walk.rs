use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    direction::{Direction, Rotate},
    error::NetError,
    face::Face,
    fold::Cube,
    grid::{Grid, Material},
    mapping::{
        map_cube_dir_to_dir_in_net, map_cube_point_to_coords_in_face,
        map_relative_face_point_to_cube,
    },
    parse::Command,
    point::Point2,
};

/// A position on the map, in the map's own coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pos {
    pub pos: Point2,
    pub dir: Direction,
}

impl Pos {
    pub const fn password(self) -> isize {
        let Self {
            pos: Point2(x, y),
            dir,
        } = self;

        let (x, y, dir) = (x as isize + 1, y as isize + 1, dir as isize);

        1000 * y + 4 * x + dir
    }

    pub fn rotate(self, rot: Rotate) -> Self {
        Self {
            pos: self.pos,
            dir: self.dir.turn(rot),
        }
    }
}

/// Finds the leftmost open spot on the top row, facing East.
pub fn spawn_in(g: &Grid) -> Option<Pos> {
    let (i, _) = g
        .row(0)
        .iter()
        .enumerate()
        .find(|&(_, m)| m == Material::Open)?;

    Some(Pos {
        pos: (i, 0).try_into().expect("map is too big"),
        dir: Direction::East,
    })
}

pub trait Walker {
    fn grid(&self) -> &Grid;

    fn spawn(&self) -> Option<Pos> {
        spawn_in(self.grid())
    }

    /// Moves forward up to `count` cells, stopping in front of walls. Every cell entered is
    /// recorded in `traversed`.
    fn advance(&self, from: Pos, count: usize, traversed: &mut HashMap<Point2, Direction>)
        -> Pos;

    /// Follows `cmds` from the spawn point, returning where it ends up and the path taken.
    /// `None` if the map has nowhere to spawn.
    fn execute(&self, cmds: &[Command]) -> Option<(Pos, HashMap<Point2, Direction>)> {
        let mut cur = self.spawn()?;

        let mut traversed = HashMap::from_iter([(cur.pos, cur.dir)]);

        for cmd in cmds {
            cur = match *cmd {
                Command::Forward(count) => self.advance(cur, count, &mut traversed),
                Command::Turn(rot) => cur.rotate(rot),
            };

            traversed.insert(cur.pos, cur.dir);
        }

        Some((cur, traversed))
    }
}

/// Walks the map as a flat surface: leaving it wraps to the other end of the row or column.
#[derive(Clone, Copy, Debug)]
pub struct FlatWalker<'a> {
    grid: &'a Grid,
}

impl<'a> FlatWalker<'a> {
    pub const fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }
}

impl Walker for FlatWalker<'_> {
    fn grid(&self) -> &Grid {
        self.grid
    }

    fn advance(
        &self,
        Pos { mut pos, dir }: Pos,
        count: usize,
        traversed: &mut HashMap<Point2, Direction>,
    ) -> Pos {
        let g = self.grid;

        assert!(g.is_inside(pos));

        for _ in 0..count {
            let mut next = pos + dir;

            if g.is_outside(next) {
                // we are outside the map, roll over
                let dim = dir.locked_dim();

                next = g
                    .row_on(dim, pos.get(dim) as usize)
                    .first_at(dir.opposite().into())
                    .expect("a value on the other side");
            }

            if g[next] == Material::Wall {
                break;
            }

            pos = next;

            traversed.insert(pos, dir);
        }

        Pos { pos, dir }
    }
}

/// Where the walker is on the cube: a cell in the local frame of `face` (a folded cube
/// face), and the direction it's facing in that same frame.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Cursor {
    pub point: Point2,
    pub dir: Direction,
    pub face: Face,
}

/// Walks the map as the surface of the cube its faces fold into.
#[derive(Clone, Debug)]
pub struct CubeWalker<'a> {
    grid: &'a Grid,
    cube: Cube,
}

impl<'a> CubeWalker<'a> {
    pub fn new(grid: &'a Grid, side: i16) -> Result<Self, NetError> {
        let net = grid.net_faces(side);

        for face in &net {
            debug!("net face {face}");
        }

        Ok(Self::with_cube(grid, Cube::fold(&net)?))
    }

    pub const fn with_cube(grid: &'a Grid, cube: Cube) -> Self {
        Self { grid, cube }
    }

    pub const fn cube(&self) -> &Cube {
        &self.cube
    }

    fn net_face(&self, face: &Face) -> Face {
        self.cube
            .net_face(face)
            .unwrap_or_else(|| panic!("{face} is not a face of the cube"))
    }

    /// Brings a cell of a cube face back onto the map.
    pub fn to_global(&self, point: Point2, face: &Face) -> Point2 {
        (self.net_face(face)[0] + point).flatten()
    }

    /// The cube face holding `pos`, if it's on the map.
    pub fn locate(&self, Pos { pos, dir }: Pos) -> Option<Cursor> {
        let side = self.cube.side();

        self.cube.pairs().find_map(|(net, face)| {
            let point = pos - net[0].flatten();
            let Point2(x, y) = point;

            ((0..side).contains(&x) && (0..side).contains(&y))
                .then_some(Cursor { point, dir, face })
        })
    }

    pub fn pos_of(&self, Cursor { point, dir, face }: Cursor) -> Pos {
        Pos {
            pos: self.to_global(point, &face),
            dir,
        }
    }

    // moves over the edge `cur` is facing, onto the next face
    fn cross(&self, Cursor { point, dir, face }: Cursor) -> Cursor {
        use Direction::*;

        let edge = face.edge(dir);

        // West and North edges sit on the first row/column, East and South one past the last
        let exit = match dir {
            East | South => point + dir,
            West | North => point,
        };

        let on_cube = map_relative_face_point_to_cube(exit, &self.net_face(&face), &face, edge);

        let next = self
            .cube
            .neighbour(&face, edge)
            .unwrap_or_else(|| panic!("no face on the other side of {edge}"));

        let point =
            map_cube_point_to_coords_in_face(on_cube, &next, &self.net_face(&next), edge.reversed());

        let dir = map_cube_dir_to_dir_in_net(
            face.dir_on_touching_face(&next)
                .expect("neighbouring faces share an edge"),
            &next,
        );

        trace!("crossing {edge} onto {next} at {point}, facing {dir:?}");

        Cursor {
            point,
            dir,
            face: next,
        }
    }

    /// Moves one cell forward, possibly onto another face. Walls leave `cur` as it is.
    pub fn step(&self, cur: Cursor) -> Cursor {
        let side = self.cube.side();
        let next = cur.point + cur.dir;

        let dest = if (0..side).contains(&next.0) && (0..side).contains(&next.1) {
            Cursor { point: next, ..cur }
        } else {
            self.cross(cur)
        };

        let global = self.to_global(dest.point, &dest.face);

        match self.grid.is_wall(global) {
            Some(true) => cur,
            Some(false) => dest,
            None => panic!("{dest:?} is at {global}, which is not on the map"),
        }
    }

    /// Takes up to `steps` steps, stopping at the first wall.
    pub fn steps(&self, mut cur: Cursor, steps: usize) -> Cursor {
        for _ in 0..steps {
            let next = self.step(cur);

            if next == cur {
                break;
            }

            cur = next;
        }

        cur
    }
}

impl Walker for CubeWalker<'_> {
    fn grid(&self) -> &Grid {
        self.grid
    }

    fn advance(
        &self,
        from: Pos,
        count: usize,
        traversed: &mut HashMap<Point2, Direction>,
    ) -> Pos {
        let mut cur = self.locate(from).expect("walkers never leave the map");

        for _ in 0..count {
            let next = self.step(cur);

            if next == cur {
                break;
            }

            cur = next;

            let Pos { pos, dir } = self.pos_of(cur);
            traversed.insert(pos, dir);
        }

        self.pos_of(cur)
    }
}
