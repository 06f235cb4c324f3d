//! Folding a flat map into a cube, and walking on it.
//!
//! The map's tiles are laid out as a net of a cube. [`fold::Cube`] folds them in 3D by
//! rotating faces around the edges they share, and [`walk::CubeWalker`] uses the folded
//! geometry to know where a walker ends up when it steps off a face.

pub mod direction;
pub mod error;
pub mod face;
pub mod fold;
pub mod grid;
pub mod mapping;
pub mod parse;
pub mod point;
pub mod walk;

#[cfg(test)]
mod testing;

pub use error::NetError;
pub use fold::{build_cube, Cube, FoldTree};
pub use walk::{CubeWalker, FlatWalker, Pos, Walker};
