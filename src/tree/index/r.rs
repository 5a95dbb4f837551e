// Copyright 2025 geortree Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use geometry::{Coordinates, Rectangle};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::f64;
use tree::GeoNode;

/// Fraction of capacity each side of a split must retain
const D_SPLIT_P: f64 = 0.40;

#[derive(Debug)]
#[must_use]
pub enum InsertResult<T> {
    /// Inserted without touching this node's bounds
    Ok,
    /// Inserted; bounds along the path grew and every ancestor must
    /// recompute its own
    Expanded,
    /// The node overflowed and split off a sibling for the caller to adopt
    Split(GeoNode<T>),
}

/// R-tree insertion: least-enlargement subtree choice, with overflow
/// resolved by the axis bisection of smallest summed area.
pub struct GeoInsert<'a, F: 'a> {
    capacity: usize,
    min_split: usize,
    coords_of: &'a F,
}

impl<'a, F> GeoInsert<'a, F> {
    pub fn new(capacity: usize, coords_of: &'a F) -> GeoInsert<'a, F> {
        let min_split = (D_SPLIT_P * capacity as f64).ceil() as usize;
        GeoInsert {
            capacity: capacity,
            min_split: min_split,
            coords_of: coords_of,
        }
    }

/// Insert the entry below the given root, growing a new root level when
/// the old root overflows. Returns the root to install.
    pub fn insert_into_root<T>(&self, mut root: GeoNode<T>, entry: T) -> GeoNode<T>
        where F: Fn(&T) -> Coordinates
    {
        match self.insert_into_node(&mut root, entry) {
            InsertResult::Split(sibling) => {
                debug!("root overflowed; growing a new root level");
                GeoNode::internal_with(self.capacity, vec![root, sibling])
            }
            _ => root,
        }
    }

    fn insert_into_node<T>(&self, node: &mut GeoNode<T>, entry: T) -> InsertResult<T>
        where F: Fn(&T) -> Coordinates
    {
        let point = (self.coords_of)(&entry);
        match *node {
            GeoNode::Leaf { ref mut bounds, ref mut elements } => {
                let grew = !bounds.contains(point);
                elements.push(entry);
                if elements.len() <= self.capacity {
                    if !grew {
                        // An insertion inside the current bounds cannot
                        // change them.
                        return InsertResult::Ok;
                    }
                    let coords: Vec<Coordinates> =
                        elements.iter().map(self.coords_of).collect();
                    *bounds = Rectangle::enclosing(&coords);
                    return InsertResult::Expanded;
                }
            }
            GeoNode::Internal { ref mut bounds, ref mut children } => {
                let subtree = children.iter()
                    .position_min_by_key(|child| OrderedFloat(child.area_increase(point)))
                    .unwrap();
                match self.insert_into_node(&mut children[subtree], entry) {
                    InsertResult::Ok => return InsertResult::Ok,
                    InsertResult::Expanded => {
                        *bounds = Rectangle::enclosing_rects(children.iter()
                            .map(|child| child.bounds()));
                        return InsertResult::Expanded;
                    }
                    InsertResult::Split(sibling) => {
                        children.push(sibling);
                        if children.len() <= self.capacity {
                            *bounds = Rectangle::enclosing_rects(children.iter()
                                .map(|child| child.bounds()));
                            return InsertResult::Expanded;
                        }
                    }
                }
            }
        }
        // The node is one over capacity; give the surplus to a sibling.
        InsertResult::Split(self.split(node))
    }

/// Split an overflowing node, leaving the lower bisection half in place
/// and returning the new sibling
    fn split<T>(&self, node: &mut GeoNode<T>) -> GeoNode<T>
        where F: Fn(&T) -> Coordinates
    {
        match *node {
            GeoNode::Leaf { ref mut bounds, ref mut elements } => {
                trace!("splitting leaf of {} elements", elements.len());
                // Points only need the two straight axes, latitude and
                // longitude.
                elements.sort_by_key(|e| OrderedFloat((self.coords_of)(e).lat));
                let (lat_index, lat_sum) =
                    self.best_axis_bisection(&self.element_coords(elements));
                elements.sort_by_key(|e| OrderedFloat((self.coords_of)(e).lng));
                let (lng_index, lng_sum) =
                    self.best_axis_bisection(&self.element_coords(elements));

                let split_index = if lat_sum <= lng_sum {
                    elements.sort_by_key(|e| OrderedFloat((self.coords_of)(e).lat));
                    lat_index
                } else {
                    lng_index
                };
                let split_elements = elements.split_off(split_index);
                let coords: Vec<Coordinates> =
                    elements.iter().map(self.coords_of).collect();
                *bounds = Rectangle::enclosing(&coords);
                GeoNode::leaf_with(self.capacity, split_elements, self.coords_of)
            }
            GeoNode::Internal { ref mut bounds, ref mut children } => {
                trace!("splitting internal node of {} children", children.len());
                // Rectangles need four axes: each corner on each
                // coordinate, with that corner standing in for the child.
                let mut best_axis = 0;
                let mut best_index = 0;
                let mut best_sum = f64::INFINITY;
                for axis in 0..4 {
                    Self::sort_children_by_axis(children, axis);
                    let corners: Vec<Coordinates> = children.iter()
                        .map(|child| Self::axis_corner(child.bounds(), axis))
                        .collect();
                    let (index, sum) = self.best_axis_bisection(&corners);
                    if sum < best_sum {
                        best_axis = axis;
                        best_index = index;
                        best_sum = sum;
                    }
                }
                Self::sort_children_by_axis(children, best_axis);
                let split_children = children.split_off(best_index);
                *bounds = Rectangle::enclosing_rects(children.iter()
                    .map(|child| child.bounds()));
                GeoNode::internal_with(self.capacity, split_children)
            }
        }
    }

/// Evaluate every permissible split point over positions already sorted
/// along one axis. The bisection whose two enclosing rectangles have the
/// smallest summed area wins; earlier split points win exact ties.
    fn best_axis_bisection(&self, coords: &[Coordinates]) -> (usize, f64) {
        let mut best_index = self.min_split;
        let mut best_sum = f64::INFINITY;
        for index in self.min_split..(coords.len() - self.min_split) {
            let sum = Rectangle::enclosing(&coords[..index]).area()
                + Rectangle::enclosing(&coords[index..]).area();
            if sum < best_sum {
                best_index = index;
                best_sum = sum;
            }
        }
        (best_index, best_sum)
    }

    fn element_coords<T>(&self, elements: &[T]) -> Vec<Coordinates>
        where F: Fn(&T) -> Coordinates
    {
        elements.iter().map(self.coords_of).collect()
    }

    // Axis order: sw.lat, ne.lat, sw.lng, ne.lng.
    fn sort_children_by_axis<T>(children: &mut Vec<GeoNode<T>>, axis: usize) {
        children.sort_by_key(|child| {
            let corner = Self::axis_corner(child.bounds(), axis);
            OrderedFloat(if axis < 2 { corner.lat } else { corner.lng })
        });
    }

    fn axis_corner(bounds: &Rectangle, axis: usize) -> Coordinates {
        if axis % 2 == 0 { bounds.sw } else { bounds.ne }
    }
}

/// Equality-based removal. Descends into every child whose bounds cover
/// the entry's position; a miss anywhere is an expected outcome because
/// sibling bounds overlap, so nothing is reported for one.
pub struct GeoRemove<'a, F: 'a> {
    coords_of: &'a F,
}

impl<'a, F> GeoRemove<'a, F> {
    pub fn new(coords_of: &'a F) -> GeoRemove<'a, F> {
        GeoRemove { coords_of: coords_of }
    }

/// Remove entries equal to `entry`, returning how many were removed.
/// At most one occurrence is removed per leaf that holds one. Nodes left
/// empty stay in place with degenerate bounds; the tree never shrinks.
    pub fn remove_from_node<T>(&self, node: &mut GeoNode<T>, entry: &T) -> usize
        where T: PartialEq,
              F: Fn(&T) -> Coordinates
    {
        let point = (self.coords_of)(entry);
        let removed = match *node {
            GeoNode::Leaf { ref mut elements, .. } => {
                match elements.iter().position(|element| element == entry) {
                    Some(index) => {
                        elements.remove(index);
                        1
                    }
                    None => 0,
                }
            }
            GeoNode::Internal { ref mut children, .. } => {
                let mut removed = 0;
                for child in children.iter_mut() {
                    if child.contains_point(point) {
                        removed += self.remove_from_node(child, entry);
                    }
                }
                removed
            }
        };
        if removed > 0 {
            node.update_bounds(self.coords_of);
        }
        removed
    }
}
