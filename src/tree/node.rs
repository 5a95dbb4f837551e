// Copyright 2025 geortree Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use geometry::{Coordinates, Rectangle};

/// A node of the tree. Either stores domain entries directly, or a level
/// of child nodes.
#[derive(Debug, Clone)]
pub enum GeoNode<T> {
    /// Contains entries
    Leaf {
        bounds: Rectangle,
        elements: Vec<T>,
    },
    /// Contains only other nodes
    Internal {
        bounds: Rectangle,
        children: Vec<GeoNode<T>>,
    },
}

impl<T> GeoNode<T> {
/// Create an empty leaf with a degenerate bounding rectangle
    pub fn new_leaf() -> GeoNode<T> {
        GeoNode::Leaf {
            bounds: Rectangle::zero(),
            elements: Vec::new(),
        }
    }

/// Create an empty leaf with no capacity for elements.
/// Only used for passing ownership of the root into the index functions
    pub fn new_no_alloc() -> GeoNode<T> {
        GeoNode::Leaf {
            bounds: Rectangle::zero(),
            elements: Vec::with_capacity(0),
        }
    }

/// A leaf holding `elements`, with its bounds computed up front.
/// Initializing a node over capacity is a programming error.
    pub fn leaf_with<F>(capacity: usize, elements: Vec<T>, coords_of: &F) -> GeoNode<T>
        where F: Fn(&T) -> Coordinates
    {
        assert!(elements.len() <= capacity,
                "leaf initialized with {} elements over capacity {}",
                elements.len(),
                capacity);
        let coords: Vec<Coordinates> = elements.iter().map(coords_of).collect();
        GeoNode::Leaf {
            bounds: Rectangle::enclosing(&coords),
            elements: elements,
        }
    }

/// An internal node holding `children`, with its bounds computed up
/// front. Initializing a node over capacity is a programming error.
    pub fn internal_with(capacity: usize, children: Vec<GeoNode<T>>) -> GeoNode<T> {
        assert!(children.len() <= capacity,
                "internal node initialized with {} children over capacity {}",
                children.len(),
                capacity);
        GeoNode::Internal {
            bounds: Rectangle::enclosing_rects(children.iter().map(|child| child.bounds())),
            children: children,
        }
    }

/// Does the node store entries?
    pub fn is_leaf(&self) -> bool {
        match *self {
            GeoNode::Leaf { .. } => true,
            GeoNode::Internal { .. } => false,
        }
    }

/// Borrow the node's minimum bounding rectangle
    pub fn bounds(&self) -> &Rectangle {
        match *self {
            GeoNode::Leaf { ref bounds, .. } => bounds,
            GeoNode::Internal { ref bounds, .. } => bounds,
        }
    }

/// The node's load: entry count for a leaf, child count otherwise
    pub fn len(&self) -> usize {
        match *self {
            GeoNode::Leaf { ref elements, .. } => elements.len(),
            GeoNode::Internal { ref children, .. } => children.len(),
        }
    }

/// Does the node have any load?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

/// Levels below this node; a leaf has height 0
    pub fn height(&self) -> usize {
        match *self {
            GeoNode::Leaf { .. } => 0,
            GeoNode::Internal { ref children, .. } => {
                1 + children.iter().map(|child| child.height()).max().unwrap_or(0)
            }
        }
    }

/// Is `point` inside the node's bounding rectangle?
    pub fn contains_point(&self, point: Coordinates) -> bool {
        self.bounds().contains(point)
    }

/// The growth in bounding rectangle area if `point` were added to this
/// node; zero when the point is already covered.
///
/// This is a strictly local metric over the node's own bounds. Overlap
/// with sibling subtrees is not considered.
    pub fn area_increase(&self, point: Coordinates) -> f64 {
        let bounds = self.bounds();
        if bounds.contains(point) {
            return 0.0;
        }
        bounds.expanded_to(point).area() - bounds.area()
    }

/// Recompute the bounding rectangle from the node's current load.
/// A node with nothing in it degenerates to `Rectangle::zero()`.
    pub fn update_bounds<F>(&mut self, coords_of: &F)
        where F: Fn(&T) -> Coordinates
    {
        match *self {
            GeoNode::Leaf { ref mut bounds, ref elements } => {
                let coords: Vec<Coordinates> = elements.iter().map(coords_of).collect();
                *bounds = Rectangle::enclosing(&coords);
            }
            GeoNode::Internal { ref mut bounds, ref children } => {
                *bounds = Rectangle::enclosing_rects(children.iter().map(|child| child.bounds()));
            }
        }
    }
}
