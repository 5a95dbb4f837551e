// Copyright 2025 geortree Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use geometry::Coordinates;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use rand::Rng;
use tree::GeoNode;

/// Branch-and-bound nearest-neighbor search over a node graph.
///
/// The best distance found anywhere so far is threaded through every
/// visited subtree as the `limit`, so a branch whose bounding rectangle
/// cannot possibly beat it is never descended into.
pub struct GeoNearest<'a, F: 'a, R: 'a> {
    coords_of: &'a F,
    rng: &'a mut R,
}

impl<'a, F, R> GeoNearest<'a, F, R>
    where R: Rng
{
    pub fn new(coords_of: &'a F, rng: &'a mut R) -> GeoNearest<'a, F, R> {
        GeoNearest {
            coords_of: coords_of,
            rng: rng,
        }
    }

/// Find the entry nearest to `point` in the subtree under `node`,
/// skipping anything in `exclude` and anything at or beyond `limit`.
/// Returns the entry together with its distance; `(None, limit)` when
/// nothing in the subtree beats the limit.
    pub fn nearest<'t, T>(&mut self,
                          node: &'t GeoNode<T>,
                          point: Coordinates,
                          exclude: &[T],
                          limit: f64)
                          -> (Option<&'t T>, f64)
        where T: PartialEq,
              F: Fn(&T) -> Coordinates
    {
        match *node {
            GeoNode::Leaf { ref elements, .. } => {
                self.nearest_in_leaf(elements, point, exclude, limit)
            }
            GeoNode::Internal { ref children, .. } => {
                let mut nearest = None;
                let mut min_dist = limit;
                let branches = children.iter()
                    .sorted_by_key(|branch| OrderedFloat(branch.bounds().distance_to_point(point)));
                for branch in branches {
                    // Branches come closest-first; past this one, no
                    // rectangle can hold anything nearer than the
                    // incumbent.
                    if branch.bounds().distance_to_point(point) > min_dist {
                        break;
                    }
                    let (candidate, distance) = self.nearest(branch, point, exclude, min_dist);
                    if distance < min_dist {
                        nearest = candidate;
                        min_dist = distance;
                    }
                }
                (nearest, min_dist)
            }
        }
    }

    fn nearest_in_leaf<'t, T>(&mut self,
                              elements: &'t [T],
                              point: Coordinates,
                              exclude: &[T],
                              limit: f64)
                              -> (Option<&'t T>, f64)
        where T: PartialEq,
              F: Fn(&T) -> Coordinates
    {
        let mut nearest = None;
        let mut min_dist = limit;
        for entry in elements {
            if exclude.contains(entry) {
                continue;
            }
            let distance = (self.coords_of)(entry).distance_to(point);
            if distance < min_dist {
                nearest = Some(entry);
                min_dist = distance;
            } else if distance == min_dist && self.rng.gen_bool(0.5) {
                // An exact tie gets a coin flip, so insertion order
                // carries no bias.
                nearest = Some(entry);
            }
        }
        (nearest, min_dist)
    }
}
