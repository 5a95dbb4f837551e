// Copyright 2025 geortree Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Insert and remove algorithms for the tree

pub mod r;

pub use tree::index::r::{GeoInsert, GeoRemove, InsertResult};
