// Copyright 2025 geortree Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Geometric primitives consumed by the spatial tree

use std::f64;

/// A geographic position as a (latitude, longitude) pair.
///
/// Values are never validated; non-finite coordinates propagate through
/// every computation unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// New Coordinates from a latitude/longitude pair
    pub fn new(lat: f64, lng: f64) -> Coordinates {
        Coordinates { lat: lat, lng: lng }
    }

    /// Straight-line distance to another position, with both treated as
    /// points on a plane
    pub fn distance_to(&self, other: Coordinates) -> f64 {
        ((self.lat - other.lat).powi(2) + (self.lng - other.lng).powi(2)).sqrt()
    }
}

/// An axis-aligned rectangle spanned by its southwest and northeast
/// corners. Degenerate (zero-area) rectangles are valid; they describe
/// single points and the bounds of empty nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub sw: Coordinates,
    pub ne: Coordinates,
}

impl Rectangle {
    /// New Rectangle from two opposing corners, given in either order
    pub fn new(a: Coordinates, b: Coordinates) -> Rectangle {
        Rectangle {
            sw: Coordinates::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            ne: Coordinates::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    /// The degenerate rectangle at the origin
    pub fn zero() -> Rectangle {
        Rectangle {
            sw: Coordinates::new(0.0, 0.0),
            ne: Coordinates::new(0.0, 0.0),
        }
    }

    // An inverted rectangle with corners at (inf, inf) and (-inf, -inf).
    // Expanding it to fit any point yields exactly that point, which
    // simplifies fold-style bounds computation.
    fn max_inverted() -> Rectangle {
        Rectangle {
            sw: Coordinates::new(f64::INFINITY, f64::INFINITY),
            ne: Coordinates::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// The minimal rectangle covering every position in `points`.
    /// An empty slice yields `Rectangle::zero()`.
    pub fn enclosing(points: &[Coordinates]) -> Rectangle {
        if points.is_empty() {
            return Rectangle::zero();
        }
        let mut bounds = Rectangle::max_inverted();
        for point in points {
            bounds.expand_to_fit(*point);
        }
        bounds
    }

    /// The minimal rectangle covering every rectangle yielded by `rects`.
    /// An empty iterator yields `Rectangle::zero()`.
    pub fn enclosing_rects<'a, I>(rects: I) -> Rectangle
        where I: IntoIterator<Item = &'a Rectangle>
    {
        let mut bounds = Rectangle::max_inverted();
        let mut saw_any = false;
        for rect in rects {
            saw_any = true;
            bounds.expand_to_fit(rect.sw);
            bounds.expand_to_fit(rect.ne);
        }
        if saw_any { bounds } else { Rectangle::zero() }
    }

    /// Grow the rectangle in place until it covers `point`
    pub fn expand_to_fit(&mut self, point: Coordinates) {
        self.sw.lat = self.sw.lat.min(point.lat);
        self.sw.lng = self.sw.lng.min(point.lng);
        self.ne.lat = self.ne.lat.max(point.lat);
        self.ne.lng = self.ne.lng.max(point.lng);
    }

    /// A copy of the rectangle grown to cover `point`
    pub fn expanded_to(&self, point: Coordinates) -> Rectangle {
        let mut expanded = *self;
        expanded.expand_to_fit(point);
        expanded
    }

    /// Area of the rectangle in squared coordinate units
    pub fn area(&self) -> f64 {
        (self.ne.lat - self.sw.lat) * (self.ne.lng - self.sw.lng)
    }

    /// Is `point` inside the rectangle? Points on an edge count as inside.
    pub fn contains(&self, point: Coordinates) -> bool {
        self.sw.lat <= point.lat && point.lat <= self.ne.lat
            && self.sw.lng <= point.lng && point.lng <= self.ne.lng
    }

    /// Distance from `point` to the nearest edge of the rectangle; zero
    /// when the point lies inside
    pub fn distance_to_point(&self, point: Coordinates) -> f64 {
        let dlat = (self.sw.lat - point.lat).max(point.lat - self.ne.lat).max(0.0);
        let dlng = (self.sw.lng - point.lng).max(point.lng - self.ne.lng).max(0.0);
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

#[cfg(feature = "geo")]
mod geo_interop {
    use geo::Point;
    use geometry::Coordinates;

    impl From<Point<f64>> for Coordinates {
        fn from(point: Point<f64>) -> Coordinates {
            Coordinates::new(point.y(), point.x())
        }
    }

    impl From<Coordinates> for Point<f64> {
        fn from(coords: Coordinates) -> Point<f64> {
            Point::new(coords.lng, coords.lat)
        }
    }
}
