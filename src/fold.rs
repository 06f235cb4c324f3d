use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::debug;

use crate::{error::NetError, face::Face, point::Line};

pub const CUBE_FACES: usize = 6;

/// Spanning tree of a net, rooted at the face that stays put while folding.
///
/// Children are listed in net order, so the fold order only depends on the order the
/// faces were given in.
#[derive(Clone, Debug)]
pub struct FoldTree {
    root: Face,
    children: HashMap<Face, Vec<Face>>,
}

impl FoldTree {
    pub fn new(net: &[Face], root: Face) -> Result<Self, NetError> {
        if !net.contains(&root) {
            return Err(NetError::UnknownRoot(root));
        }

        // DFS from the root, never going back to the face we just came from. Meeting an
        // already visited face again means the net has a loop (i.e. a 2x2 block somewhere)
        fn walk(
            net: &[Face],
            face: Face,
            parent: Option<Face>,
            children: &mut HashMap<Face, Vec<Face>>,
            visited: &mut HashSet<Face>,
        ) -> Result<(), NetError> {
            if !visited.insert(face) {
                return Err(NetError::Loop(face));
            }

            for &other in net {
                if other == face || Some(other) == parent || face.touches(&other).is_none() {
                    continue;
                }

                children.entry(face).or_default().push(other);

                walk(net, other, Some(face), children, visited)?;
            }

            Ok(())
        }

        let mut children = HashMap::new();
        let mut visited = HashSet::new();

        walk(net, root, None, &mut children, &mut visited)?;

        if visited.len() != net.len() {
            return Err(NetError::Disconnected {
                visited: visited.len(),
                total: net.len(),
            });
        }

        Ok(Self { root, children })
    }

    pub const fn root(&self) -> Face {
        self.root
    }

    pub fn children(&self, face: &Face) -> &[Face] {
        self.children.get(face).map_or(&[], Vec::as_slice)
    }

    /// `face` followed by all of its descendants, depth first.
    pub fn subtree(&self, face: Face) -> Vec<Face> {
        let mut ret = vec![];
        let mut stack = vec![face];

        while let Some(cur) = stack.pop() {
            ret.push(cur);

            stack.extend(self.children(&cur).iter().rev());
        }

        ret
    }
}

fn check_net(net: &[Face]) -> Result<i16, NetError> {
    let (first, rest) = match net {
        [first, rest @ ..] if net.len() == CUBE_FACES => (first, rest),
        _ => return Err(NetError::WrongFaceCount(net.len())),
    };

    if let Some(&face) = net.iter().find(|f| !f.is_square()) {
        return Err(NetError::NotSquare(face));
    }

    let expected = first.side();

    if let Some(&face) = rest.iter().find(|f| f.side() != expected) {
        return Err(NetError::UnevenFaces {
            face,
            side: face.side(),
            expected,
        });
    }

    if let Some(&face) = net.iter().duplicates().next() {
        return Err(NetError::DuplicateFace(face));
    }

    Ok(expected)
}

// rotate `face` and everything hanging from it around `hinge`, as a single rigid body
fn rotate_subtree(tree: &FoldTree, face: Face, hinge: Line, folded: &mut HashMap<Face, Face>) {
    for dep in tree.subtree(face) {
        if let Some(cur) = folded.get_mut(&dep) {
            *cur = cur.turn_around(hinge);
        }
    }
}

fn fold_from(
    tree: &FoldTree,
    parent: Face,
    folded: &mut HashMap<Face, Face>,
) -> Result<(), NetError> {
    for &child in tree.children(&parent) {
        // the hinge is where the two faces are now, not where they were on the net
        let hinge = folded[&parent]
            .touches(&folded[&child])
            .ok_or(NetError::Detached(parent, child))?;

        rotate_subtree(tree, child, hinge, folded);

        fold_from(tree, child, folded)?;
    }

    Ok(())
}

fn check_is_cube(faces: &[Face]) -> Result<(), NetError> {
    let squares: Vec<_> = faces
        .iter()
        .map(|f| {
            let mut pts = *f.points();
            pts.sort();

            pts
        })
        .collect();

    for ((i, a), (j, b)) in squares.iter().enumerate().tuple_combinations() {
        if a == b {
            return Err(NetError::Overlapping(faces[i], faces[j]));
        }
    }

    for face in faces {
        let neighbours = faces
            .iter()
            .filter(|&other| other != face && face.touches(other).is_some())
            .count();

        if neighbours != 4 {
            return Err(NetError::NotClosed {
                face: *face,
                neighbours,
            });
        }
    }

    Ok(())
}

/// Folds a net into a cube, returning where every net face ended up (in net order).
///
/// The first face is the root of the fold and keeps its position; every other face gets
/// rotated up from its parent, so that the side the net is drawn on ends up inside the
/// cube.
pub fn build_cube(net: &[Face]) -> Result<Vec<Face>, NetError> {
    check_net(net)?;

    let tree = FoldTree::new(net, net[0])?;

    debug!(
        "fold tree: {}",
        net.iter()
            .filter(|f| !tree.children(f).is_empty())
            .map(|f| format!("{f} -> [{}]", tree.children(f).iter().format(", ")))
            .format("; ")
    );

    let mut folded: HashMap<_, _> = net.iter().map(|&f| (f, f)).collect();

    fold_from(&tree, tree.root(), &mut folded)?;

    let cube: Vec<_> = net.iter().map(|f| folded[f]).collect();

    check_is_cube(&cube)?;

    Ok(cube)
}

/// The bijection between the faces of a net and the faces of the cube it folds into.
#[derive(Clone, Debug)]
pub struct Cube {
    side: i16,
    net: Vec<Face>,
    faces: Vec<Face>,
    to_net: HashMap<Face, Face>,
    to_cube: HashMap<Face, Face>,
}

impl Cube {
    pub fn fold(net: &[Face]) -> Result<Self, NetError> {
        let faces = build_cube(net)?;

        for (n, c) in net.iter().zip(&faces) {
            debug!("net face {n} folds into {c}");
        }

        Ok(Self {
            side: net[0].side(),
            net: net.to_vec(),
            to_net: faces.iter().copied().zip(net.iter().copied()).collect(),
            to_cube: net.iter().copied().zip(faces.iter().copied()).collect(),
            faces,
        })
    }

    pub const fn side(&self) -> i16 {
        self.side
    }

    pub fn net_faces(&self) -> &[Face] {
        &self.net
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// (net face, cube face) pairs, in net order.
    pub fn pairs(&self) -> impl Iterator<Item = (Face, Face)> + '_ {
        self.net.iter().copied().zip(self.faces.iter().copied())
    }

    pub fn net_face(&self, cube_face: &Face) -> Option<Face> {
        self.to_net.get(cube_face).copied()
    }

    pub fn cube_face(&self, net_face: &Face) -> Option<Face> {
        self.to_cube.get(net_face).copied()
    }

    /// The cube face on the other side of `edge`, given in `face`'s winding.
    pub fn neighbour(&self, face: &Face, edge: Line) -> Option<Face> {
        self.faces
            .iter()
            .find(|other| face.touches(other) == Some(edge))
            .copied()
    }

    /// The only face not sharing an edge with `face`.
    pub fn opposite(&self, face: &Face) -> Option<Face> {
        self.faces
            .iter()
            .filter(|&other| other != face && face.touches(other).is_none())
            .exactly_one()
            .ok()
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::{
        direction::Direction,
        point::{Point2, Point3},
        testing::{any_net, any_reordered_net, cells, net_of, CROSS, NETS},
    };

    #[test]
    fn tree_of_the_cross() {
        let net = net_of(&cells(&CROSS), 1);
        // row-major: top, left, centre, right, far right, bottom
        let &[top, left, centre, right, far, bottom] = &net[..] else {
            panic!("six faces")
        };

        let tree = FoldTree::new(&net, top).unwrap();

        assert_eq!(tree.root(), top);
        assert_eq!(tree.children(&top), &[centre]);
        assert_eq!(tree.children(&centre), &[left, right, bottom]);
        assert_eq!(tree.children(&right), &[far]);
        assert!(tree.children(&far).is_empty());
        assert_eq!(
            tree.subtree(centre),
            vec![centre, left, right, far, bottom]
        );
    }

    #[test]
    fn trees_reject_loops_and_islands() {
        let block = net_of(&cells(&["##", "##"]), 3);

        assert!(matches!(
            FoldTree::new(&block, block[0]),
            Err(NetError::Loop(_))
        ));

        let islands = net_of(&cells(&["#.#"]), 3);

        assert_eq!(
            FoldTree::new(&islands, islands[0]).unwrap_err(),
            NetError::Disconnected {
                visited: 1,
                total: 2
            }
        );

        let stray = Face::tile(Point2(40, 40), 3);

        assert_eq!(
            FoldTree::new(&islands, stray).unwrap_err(),
            NetError::UnknownRoot(stray)
        );
    }

    #[test]
    fn sample_net_folds() {
        let net = net_of(&cells(&["..#.", "###.", "..##"]), 4);
        let cube = build_cube(&net).unwrap();

        // the root never moves
        assert_eq!(cube[0], net[0]);
        assert_eq!(
            cube[1],
            Face::new([
                Point3(12, 0, 0),
                Point3(12, 0, 4),
                Point3(8, 0, 4),
                Point3(8, 0, 0)
            ])
        );
        assert_eq!(
            cube[5],
            Face::new([
                Point3(12, 4, 4),
                Point3(12, 0, 4),
                Point3(12, 0, 0),
                Point3(12, 4, 0)
            ])
        );
    }

    #[test]
    fn cross_pairs_opposite_faces_like_a_die() {
        let net = net_of(&cells(&CROSS), 1);
        let cube = Cube::fold(&net).unwrap();
        let &[top, left, centre, right, far, bottom] = cube.faces() else {
            panic!("six faces")
        };

        // two steps in a straight line: opposite
        assert_eq!(cube.opposite(&top), Some(bottom));
        assert_eq!(cube.opposite(&left), Some(right));
        assert_eq!(cube.opposite(&centre), Some(far));

        // two steps around a corner: adjacent, on exactly one edge
        for (a, b) in [(top, left), (top, right), (left, bottom), (far, top)] {
            assert!(a.touches(&b).is_some());
            assert_eq!(
                a.edges()
                    .filter(|&e| b.edges().any(|o| o == e.reversed()))
                    .count(),
                1
            );
        }
    }

    #[test]
    fn bad_nets_are_rejected() {
        let five = net_of(&cells(&["#####"]), 2);

        assert_eq!(build_cube(&five), Err(NetError::WrongFaceCount(5)));

        let strip = net_of(&cells(&["######"]), 2);

        assert!(matches!(build_cube(&strip), Err(NetError::Overlapping(..))));

        let mut stretched = net_of(&cells(&CROSS), 2);
        stretched[5] = Face::new([
            Point3(2, 4, 0),
            Point3(2, 6, 0),
            Point3(3, 6, 0),
            Point3(3, 4, 0),
        ]);

        assert_eq!(
            build_cube(&stretched),
            Err(NetError::NotSquare(stretched[5]))
        );

        let mut flat = net_of(&cells(&CROSS), 2);
        flat[2] = Face::tile(Point2(2, 2), 0);

        assert_eq!(build_cube(&flat), Err(NetError::NotSquare(flat[2])));

        // both side flaps end up on the same face
        let flaps = net_of(&cells(&["##.#", ".###"]), 2);

        assert!(matches!(build_cube(&flaps), Err(NetError::Overlapping(..))));

        let block = net_of(&cells(&["###", "###"]), 2);

        assert!(matches!(build_cube(&block), Err(NetError::Loop(_))));

        let apart = net_of(&cells(&["###", "#..", "..#", "..#"]), 2);

        assert!(matches!(
            build_cube(&apart),
            Err(NetError::Disconnected { .. })
        ));

        let mut dup = net_of(&cells(NETS[0]), 2);
        dup[5] = dup[0];

        assert_eq!(build_cube(&dup), Err(NetError::DuplicateFace(dup[0])));

        let mut uneven = net_of(&cells(&CROSS), 2);
        uneven[5] = Face::tile(Point2(2, 4), 3);

        assert!(matches!(
            build_cube(&uneven),
            Err(NetError::UnevenFaces { side: 3, expected: 2, .. })
        ));
    }

    #[test]
    fn neighbours_follow_the_edges() {
        let cube = Cube::fold(&net_of(&cells(&CROSS), 3)).unwrap();

        for &face in cube.faces() {
            for dir in Direction::iter() {
                let edge = face.edge(dir);
                let next = cube.neighbour(&face, edge).unwrap();

                assert_ne!(next, face);
                assert_eq!(next.touches(&face), Some(edge.reversed()));
                assert_eq!(cube.neighbour(&next, edge.reversed()), Some(face));
            }
        }
    }

    #[test]
    fn cube_maps_both_ways() {
        let net = net_of(&cells(NETS[3]), 5);
        let cube = Cube::fold(&net).unwrap();

        assert_eq!(cube.side(), 5);
        assert_eq!(cube.net_faces(), &net[..]);

        for (n, c) in cube.pairs() {
            assert_eq!(cube.cube_face(&n), Some(c));
            assert_eq!(cube.net_face(&c), Some(n));
        }
    }

    proptest! {
        #[test]
        fn every_net_closes_into_a_cube((net, _) in any_net()) {
            let cube = Cube::fold(&net).unwrap();

            let corners: HashSet<_> = cube.faces().iter().flat_map(|f| *f.points()).collect();
            prop_assert_eq!(corners.len(), 8);

            for face in cube.faces() {
                let touching = cube.faces().iter().filter(|o| face.touches(o).is_some()).count();

                prop_assert_eq!(touching, 4);
                prop_assert!(cube.opposite(face).is_some());
            }
        }

        #[test]
        fn fold_order_does_not_matter((net, reordered) in any_reordered_net()) {
            let cube = build_cube(&net).unwrap();

            prop_assert_eq!(reordered[0], net[0]);

            let refolded = build_cube(&reordered).unwrap();

            let by_face: HashMap<_, _> = reordered.iter().zip(refolded).collect();

            for (n, c) in net.iter().zip(cube) {
                prop_assert_eq!(by_face[n], c);
            }
        }
    }
}
