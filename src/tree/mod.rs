// Copyright 2025 geortree Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The geographic R-tree: a minimum bounding rectangle tree over
//! latitude/longitude positions.
//!
//! References:
//!
//! * A. Guttman, "R-trees: a dynamic index structure for spatial
//!   searching", SIGMOD 1984
//! * N. Roussopoulos, S. Kelley, F. Vincent, "Nearest neighbor queries",
//!   SIGMOD 1995

mod index;
mod map;
mod node;
mod query;

pub use tree::map::{GeoRTree, Iter};
pub use tree::node::GeoNode;
