// shared fixtures for the unit tests: net layouts drawn with '#', and ways to turn them into
// faces and grids

use proptest::prelude::*;

use crate::{
    direction::Direction,
    face::Face,
    grid::{Grid, Material},
    point::Point2,
};

pub const CROSS: [&str; 3] = [".#..", "####", ".#.."];

// the 11 nets of a cube, one per symmetry class
pub const NETS: [&[&str]; 11] = [
    &["#...", "####", "#..."],
    &["#.", "#.", "##", ".#", ".#"],
    &["#..", "###", ".#.", ".#."],
    &["#..", "##.", ".##", ".#."],
    &["#..", "##.", ".#.", ".##"],
    &["#...", "####", ".#.."],
    &["#..", "##.", ".##", "..#"],
    &["#...", "####", "..#."],
    &["#...", "####", "...#"],
    &[".#.", "###", ".#.", ".#."],
    &[".#.", "##.", ".##", ".#."],
];

pub const SAMPLE: &str = "        ...#
        .#..
        #...
        ....
...#.......#
........#...
..#....#....
..........#.
        ...#....
        .....#..
        .#......
        ......#.

10R5L5R10L4R5L5
";

/// Tile coordinates of every '#', row-major.
pub fn cells(layout: &[&str]) -> Vec<Point2> {
    layout
        .iter()
        .enumerate()
        .flat_map(|(y, row)| {
            row.chars()
                .enumerate()
                .filter(|&(_, c)| c == '#')
                .map(move |(x, _)| Point2(x as i16, y as i16))
        })
        .collect()
}

/// Rotates the layout `k % 4` quarter turns, mirrors it when `k >= 4`, and moves it back
/// next to the origin.
pub fn transformed(cells: &[Point2], k: u8) -> Vec<Point2> {
    let moved: Vec<_> = cells
        .iter()
        .map(|&Point2(x, y)| {
            let (mut x, mut y) = (x, y);

            for _ in 0..k % 4 {
                (x, y) = (-y, x);
            }

            if k >= 4 {
                x = -x;
            }

            Point2(x, y)
        })
        .collect();

    let min_x = moved.iter().map(|p| p.0).min().unwrap_or_default();
    let min_y = moved.iter().map(|p| p.1).min().unwrap_or_default();

    let mut ret: Vec<_> = moved
        .into_iter()
        .map(|Point2(x, y)| Point2(x - min_x, y - min_y))
        .collect();

    ret.sort_by_key(|&Point2(x, y)| (y, x));

    ret
}

pub fn net_of(cells: &[Point2], side: i16) -> Vec<Face> {
    cells
        .iter()
        .map(|&Point2(x, y)| Face::tile(Point2(x * side, y * side), side))
        .collect()
}

/// A grid where every tile of the layout is open ground.
pub fn open_grid(cells: &[Point2], side: i16) -> Grid {
    let dim_x = cells.iter().map(|p| p.0 + 1).max().unwrap_or_default() * side;
    let dim_y = cells.iter().map(|p| p.1 + 1).max().unwrap_or_default() * side;

    let rows = (0..dim_y)
        .map(|y| {
            (0..dim_x)
                .map(|x| {
                    if cells.contains(&Point2(x / side, y / side)) {
                        Material::Open
                    } else {
                        Material::Outside
                    }
                })
                .collect()
        })
        .collect();

    Grid::new(rows, dim_x as usize)
}

/// The cell just inside the border a walker leaving towards `dir` crosses, `a` cells along it.
pub fn border_cell(side: i16, a: i16, dir: Direction) -> Point2 {
    use Direction::*;

    match dir {
        West => Point2(0, a),
        North => Point2(a, 0),
        East => Point2(side - 1, a),
        South => Point2(a, side - 1),
    }
}

/// Any cube net, in any orientation, with a small tile size: (cells, side).
pub fn any_layout() -> impl Strategy<Value = (Vec<Point2>, i16)> {
    (0..NETS.len(), 0u8..8, 1i16..6)
        .prop_map(|(n, k, side)| (transformed(&cells(NETS[n]), k), side))
}

pub fn any_net() -> impl Strategy<Value = (Vec<Face>, i16)> {
    any_layout().prop_map(|(cells, side)| (net_of(&cells, side), side))
}

/// Any net, along with the same faces in another order where the first face stays in place.
pub fn any_reordered_net() -> impl Strategy<Value = (Vec<Face>, Vec<Face>)> {
    any_net().prop_flat_map(|(net, _)| {
        let root = net[0];
        let tail = Just(net[1..].to_vec()).prop_shuffle();

        (
            Just(net),
            tail.prop_map(move |tail| std::iter::once(root).chain(tail).collect::<Vec<_>>()),
        )
    })
}
