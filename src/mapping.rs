//! Moving points and directions between a face's local 2D frame and the folded cube.
//!
//! Cells of a face live in `0..T` on both axes, while its vertices sit on the `0..=T`
//! lattice shared with the neighbouring faces. Two faces sharing an edge may count along
//! it in opposite directions: the coordinate along the crossed edge is always stored as
//! the lattice point with the lowest absolute coordinate, so that both sides agree on it.

use crate::{
    direction::Direction,
    face::{Face, Frame},
    point::{Line, Point2, Point3},
};

/// Maps `p`, given relative to `net`'s top-left corner, onto the cube face `net` folded
/// into. `edge` is the edge of `cube` being crossed.
///
/// Points leaving towards West or North are still inside the face; points leaving towards
/// East or South are one past it, on the edge itself.
pub fn map_relative_face_point_to_cube(p: Point2, net: &Face, cube: &Face, edge: Line) -> Point3 {
    let Frame { x: net_x, y: net_y, .. } = net.frame();

    let local = Point3::from(p);
    let (mut x, mut y) = (local.dot(net_x), local.dot(net_y));

    let dst = cube.frame();

    if edge.as_vector().dot(dst.x) != 0 {
        if dst.x.sum() < 0 {
            x += 1;
        }
    } else if dst.y.sum() < 0 {
        y += 1;
    }

    dst.origin + dst.x * x + dst.y * y
}

/// Inverse of [`map_relative_face_point_to_cube`]: brings a point lying on `edge` of
/// `cube` back into the local frame of `net`, as the cell just inside the edge.
pub fn map_cube_point_to_coords_in_face(
    pt: Point3,
    cube: &Face,
    net: &Face,
    edge: Line,
) -> Point2 {
    let src = cube.frame();

    let offset = pt - src.origin;
    let (mut x, mut y) = (offset.dot(src.x), offset.dot(src.y));

    if edge.as_vector().dot(src.x) != 0 {
        if src.x.sum() < 0 {
            x -= 1;
        }
    } else if src.y.sum() < 0 {
        y -= 1;
    }

    // South and East edges lie at T, one past the last row/column
    if edge == cube.edge(Direction::South) {
        y -= 1;
    } else if edge == cube.edge(Direction::East) {
        x -= 1;
    }

    let Frame { x: net_x, y: net_y, .. } = net.frame();

    (net_x * x + net_y * y).flatten()
}

/// Converts a unit direction lying on `cube` into a facing in the face's local frame.
pub fn map_cube_dir_to_dir_in_net(dir: Point3, cube: &Face) -> Direction {
    use Direction::*;

    let Frame { x, y, .. } = cube.frame();

    match (dir.dot(x), dir.dot(y)) {
        (1, 0) => East,
        (-1, 0) => West,
        (0, 1) => South,
        (0, -1) => North,
        (dx, dy) => panic!("{dir} is not a unit direction on {cube} (got ({dx}, {dy}))"),
    }
}
