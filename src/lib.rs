// Copyright 2025 geortree Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! A dynamic, in-memory R-tree over geographic coordinates.
//!
//! [`GeoRTree`] indexes arbitrary domain objects by a `(latitude, longitude)`
//! position obtained through a caller-supplied extractor function, and
//! answers nearest-neighbor queries by branch-and-bound descent over
//! minimum bounding rectangles. Insertion and removal restructure the tree
//! in place; nothing ever touches disk.
//!
//! All geometry is planar Cartesian. That approximation keeps the math
//! cheap and is good enough for short distances that stay clear of the
//! antimeridian; it is not a geodesic index.
//!
//! ```
//! use geortree::{Coordinates, GeoRTree};
//!
//! let mut tree = GeoRTree::of_points();
//! tree.insert(Coordinates::new(48.8566, 2.3522)); // Paris
//! tree.insert(Coordinates::new(41.9028, 12.4964)); // Rome
//!
//! let nearest = tree.get_nearest(Coordinates::new(45.0, 5.0));
//! assert_eq!(nearest, Some(&Coordinates::new(48.8566, 2.3522)));
//! ```

#[macro_use]
extern crate log;

extern crate itertools;
extern crate ordered_float;
extern crate parking_lot;
extern crate rand;

#[cfg(feature = "geo")]
extern crate geo;

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod geometry;
pub mod tree;

pub use geometry::{Coordinates, Rectangle};
pub use tree::{GeoNode, GeoRTree};
