// Copyright 2025 geortree Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use geometry::{Coordinates, Rectangle};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::f64;
use std::mem;
use std::slice;
use tree::GeoNode;
use tree::index::{GeoInsert, GeoRemove};
use tree::query::GeoNearest;

const D_MAX_CAPACITY: usize = 10;

/// An R-tree adapted to geographic coordinates.
///
/// Any entry type can be indexed (and even mixed, behind an enum) as long
/// as the supplied extractor can produce [`Coordinates`] for every entry.
/// All geometry is planar Cartesian, which is good enough for short
/// distances that stay clear of the antimeridian.
///
/// The tree is not synchronized; share it across threads behind a single
/// lock or confine it to one thread.
pub struct GeoRTree<T, F = fn(&T) -> Coordinates> {
    root: GeoNode<T>,
    capacity: usize,
    coords_of: F,
    len: usize,
    rng: Mutex<SmallRng>,
}

fn coordinates_identity(point: &Coordinates) -> Coordinates {
    *point
}

impl GeoRTree<Coordinates> {
/// A tree over bare `Coordinates`, located by themselves
    pub fn of_points() -> GeoRTree<Coordinates> {
        GeoRTree::of_points_with_max(D_MAX_CAPACITY)
    }

/// A tree over bare `Coordinates` with the given maximum node load
    pub fn of_points_with_max(max: usize) -> GeoRTree<Coordinates> {
        GeoRTree::new_with_max(max, coordinates_identity)
    }
}

impl<T, F> GeoRTree<T, F>
    where F: Fn(&T) -> Coordinates
{
/// Create a new tree with the default maximum node load of 10
    pub fn new(coords_extractor: F) -> GeoRTree<T, F> {
        GeoRTree::new_with_max(D_MAX_CAPACITY, coords_extractor)
    }

/// Create a new tree with the given maximum node load
    pub fn new_with_max(max: usize, coords_extractor: F) -> GeoRTree<T, F> {
        GeoRTree::with_rng(max, coords_extractor, SmallRng::from_entropy())
    }

/// Create a new tree whose tie-breaking random source is seeded, for
/// reproducible query behavior
    pub fn new_with_options(max: usize, coords_extractor: F, seed: u64) -> GeoRTree<T, F> {
        GeoRTree::with_rng(max, coords_extractor, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(max: usize, coords_extractor: F, rng: SmallRng) -> GeoRTree<T, F> {
        assert!(max >= 2, "max({:?}) must be at least 2.", max);
        GeoRTree {
            root: GeoNode::new_leaf(),
            capacity: max,
            coords_of: coords_extractor,
            len: 0,
            rng: Mutex::new(rng),
        }
    }

/// Insert an entry. Never fails; a full node splits and the tree grows
/// a level instead.
    pub fn insert(&mut self, entry: T) {
        let root = mem::replace(&mut self.root, GeoNode::new_no_alloc());
        self.root = GeoInsert::new(self.capacity, &self.coords_of).insert_into_root(root, entry);
        self.len += 1;
    }

/// Insert every entry of a collection, one by one. No atomicity across
/// the batch beyond that of the individual inserts.
    pub fn insert_all<I>(&mut self, entries: I)
        where I: IntoIterator<Item = T>
    {
        for entry in entries {
            self.insert(entry);
        }
    }

/// Remove an entry, comparing by equality. Does nothing if no equal
/// entry is present.
    pub fn remove(&mut self, entry: &T)
        where T: PartialEq
    {
        let remover = GeoRemove::new(&self.coords_of);
        let removed = remover.remove_from_node(&mut self.root, entry);
        self.len -= removed;
    }

/// The entry nearest to `point`, or `None` for an empty tree
    pub fn get_nearest(&self, point: Coordinates) -> Option<&T>
        where T: PartialEq
    {
        self.get_nearest_excluding(point, &[])
    }

/// The entry nearest to `point`, ignoring every entry equal to one in
/// `excluding`. `None` when nothing remains. Exact distance ties are
/// broken at random.
    pub fn get_nearest_excluding(&self, point: Coordinates, excluding: &[T]) -> Option<&T>
        where T: PartialEq
    {
        let mut rng = self.rng.lock();
        GeoNearest::new(&self.coords_of, &mut *rng)
            .nearest(&self.root, point, excluding, f64::INFINITY)
            .0
    }

/// Number of entries in the tree
    pub fn len(&self) -> usize {
        self.len
    }

/// Whether the tree holds no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

/// The maximum node load the tree was built with
    pub fn capacity(&self) -> usize {
        self.capacity
    }

/// Levels below the root. A tree that is a single leaf has height 0.
    pub fn height(&self) -> usize {
        self.root.height()
    }

/// The minimum bounding rectangle over every entry. Degenerate at the
/// origin when the tree is empty.
    pub fn bounds(&self) -> Rectangle {
        *self.root.bounds()
    }

/// Drop every entry, keeping the capacity and the extractor
    pub fn clear(&mut self) {
        self.root = GeoNode::new_leaf();
        self.len = 0;
    }

/// Iterate over every entry, in depth-first node order
    pub fn iter(&self) -> Iter<T> {
        Iter::new(&self.root)
    }
}

/// Depth-first iterator over all entries of a tree
pub struct Iter<'tree, T: 'tree> {
    stack: Vec<&'tree GeoNode<T>>,
    leaf_iter: slice::Iter<'tree, T>,
}

impl<'tree, T> Iter<'tree, T> {
    fn new(root: &'tree GeoNode<T>) -> Iter<'tree, T> {
        Iter {
            stack: vec![root],
            leaf_iter: [].iter(),
        }
    }
}

impl<'tree, T> Iterator for Iter<'tree, T> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<&'tree T> {
        loop {
            if let Some(entry) = self.leaf_iter.next() {
                return Some(entry);
            }
            match self.stack.pop() {
                None => return None,
                Some(&GeoNode::Leaf { ref elements, .. }) => {
                    self.leaf_iter = elements.iter();
                }
                Some(&GeoNode::Internal { ref children, .. }) => {
                    self.stack.extend(children.iter());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geometry::{Coordinates, Rectangle};
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tree::GeoNode;

    fn point(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng)
    }

    fn random_points(seed: u64, count: usize) -> Vec<Coordinates> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| point(rng.gen_range(-90.0..90.0), rng.gen_range(-180.0..180.0)))
            .collect()
    }

    // Walk the node graph and check the structural invariants: load never
    // exceeds capacity, a leaf's rectangle exactly encloses its elements,
    // and an internal rectangle exactly encloses its children's. Emptied
    // leaves legitimately contribute their degenerate origin rectangle,
    // so internal bounds are checked against child bounds, not raw
    // points. Returns the coordinates below the node.
    fn check_node(node: &GeoNode<Coordinates>, capacity: usize) -> Vec<Coordinates> {
        assert!(node.len() <= capacity,
                "load {} exceeds capacity {}",
                node.len(),
                capacity);
        match *node {
            GeoNode::Leaf { ref bounds, ref elements } => {
                assert_eq!(Rectangle::enclosing(elements), *bounds);
                elements.clone()
            }
            GeoNode::Internal { ref bounds, ref children } => {
                assert!(!children.is_empty(), "internal node with no children");
                let expected =
                    Rectangle::enclosing_rects(children.iter().map(|child| child.bounds()));
                assert_eq!(expected, *bounds);
                let mut points = Vec::new();
                for child in children {
                    points.extend(check_node(child, capacity));
                }
                points
            }
        }
    }

    fn check_invariants(tree: &GeoRTree<Coordinates>) {
        let points = check_node(&tree.root, tree.capacity);
        assert_eq!(tree.len(), points.len());
    }

    #[test]
    #[should_panic(expected = "at least 2")]
    fn rejects_degenerate_capacity() {
        GeoRTree::of_points_with_max(1);
    }

    #[test]
    fn empty_tree() {
        let tree = GeoRTree::of_points();
        assert!(tree.is_empty());
        assert_eq!(0, tree.len());
        assert_eq!(0, tree.height());
        assert_eq!(Rectangle::zero(), tree.bounds());
        assert_eq!(None, tree.get_nearest(point(0.0, 0.0)));
        assert_eq!(0, tree.iter().count());
    }

    #[test]
    fn invariants_hold_under_random_churn() {
        let mut tree = GeoRTree::of_points_with_max(4);
        let points = random_points(42, 200);

        for (i, p) in points.iter().enumerate() {
            tree.insert(*p);
            if i % 17 == 0 {
                check_invariants(&tree);
            }
        }
        check_invariants(&tree);
        assert_eq!(200, tree.len());
        assert!(tree.height() >= 2);
        assert_eq!(200, tree.iter().count());

        for (i, p) in points.iter().take(150).enumerate() {
            tree.remove(p);
            if i % 13 == 0 {
                check_invariants(&tree);
            }
        }
        check_invariants(&tree);
        assert_eq!(50, tree.len());
        assert_eq!(50, tree.iter().count());
    }

    #[test]
    fn smallest_capacities_still_split_validly() {
        for max in 2..6 {
            let mut tree = GeoRTree::of_points_with_max(max);
            tree.insert_all(random_points(max as u64, 60));
            check_invariants(&tree);
            assert_eq!(60, tree.len());
        }
    }

    #[test]
    fn bounds_track_content() {
        let mut tree = GeoRTree::of_points();
        tree.insert(point(1.0, 1.0));
        tree.insert(point(-3.0, 8.0));
        let bounds = tree.bounds();
        assert_eq!(point(-3.0, 1.0), bounds.sw);
        assert_eq!(point(1.0, 8.0), bounds.ne);

        tree.remove(&point(-3.0, 8.0));
        assert_eq!(point(1.0, 1.0), tree.bounds().sw);
        assert_eq!(point(1.0, 1.0), tree.bounds().ne);
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut tree = GeoRTree::of_points_with_max(4);
        tree.insert_all(random_points(7, 50));
        assert_eq!(50, tree.len());
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(0, tree.height());
        assert_eq!(None, tree.get_nearest(point(0.0, 0.0)));
    }

    #[test]
    fn iter_visits_every_entry_once() {
        let mut tree = GeoRTree::of_points_with_max(4);
        let points = random_points(3, 60);
        tree.insert_all(points.iter().cloned());
        for p in &points {
            assert_eq!(1,
                       tree.iter().filter(|&&seen| seen == *p).count(),
                       "{:?} must be visited exactly once",
                       p);
        }
    }

    #[test]
    fn removal_leaves_skeleton_but_hides_entries() {
        let mut tree = GeoRTree::of_points_with_max(4);
        let points = random_points(11, 40);
        tree.insert_all(points.iter().cloned());
        let grown_height = tree.height();
        for p in &points {
            tree.remove(p);
        }
        assert!(tree.is_empty());
        // Deletion never merges nodes, so the skeleton keeps its height.
        assert_eq!(grown_height, tree.height());
        assert_eq!(None, tree.get_nearest(point(0.0, 0.0)));
        assert_eq!(0, tree.iter().count());
    }
}
