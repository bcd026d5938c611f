//! Quadtree over static level geometry for broad-phase queries.
//!
//! A box lives in the deepest node that fully contains it. Boxes that
//! straddle a quadrant boundary stay in the parent's own bucket, so a
//! bucket may exceed its capacity after subdivision.

use alien_core::constants::{QUADTREE_BUCKET_CAPACITY, QUADTREE_MIN_NODE_SIZE};
use alien_core::types::Aabb;

const NW: usize = 0;
const NE: usize = 1;
const SW: usize = 2;
const SE: usize = 3;

/// Order children are offered a new box.
const INSERT_ORDER: [usize; 4] = [NW, NE, SE, SW];

/// Order children are visited by queries.
const QUERY_ORDER: [usize; 4] = [NW, NE, SW, SE];

#[derive(Debug, Clone)]
pub struct QuadTree {
    boundary: Aabb,
    capacity: usize,
    bucket: Vec<Aabb>,
    children: Option<Box<[QuadTree; 4]>>,
}

impl QuadTree {
    pub fn new(boundary: Aabb) -> Self {
        Self::with_capacity(boundary, QUADTREE_BUCKET_CAPACITY)
    }

    /// Tree with a custom bucket capacity (minimum 1).
    pub fn with_capacity(boundary: Aabb, capacity: usize) -> Self {
        Self {
            boundary,
            capacity: capacity.max(1),
            bucket: Vec::new(),
            children: None,
        }
    }

    pub fn boundary(&self) -> &Aabb {
        &self.boundary
    }

    /// Insert a box. Returns false if the box is not fully inside this node.
    pub fn insert(&mut self, item: Aabb) -> bool {
        if !self.boundary.contains(&item) {
            return false;
        }

        if self.bucket.len() >= self.capacity {
            self.subdivide();
        }

        if let Some(children) = self.children.as_mut() {
            for idx in INSERT_ORDER {
                if children[idx].insert(item) {
                    return true;
                }
            }
        }

        self.bucket.push(item);
        true
    }

    fn can_subdivide(&self) -> bool {
        self.boundary.w / 2.0 >= QUADTREE_MIN_NODE_SIZE
            && self.boundary.h / 2.0 >= QUADTREE_MIN_NODE_SIZE
    }

    fn subdivide(&mut self) {
        if self.children.is_some() || !self.can_subdivide() {
            return;
        }

        let b = self.boundary;
        let (x0, y0) = (b.x, b.y);
        let (x1, y1) = (b.x + b.w / 2.0, b.y + b.h / 2.0);
        let (x2, y2) = (b.right(), b.bottom());

        let capacity = self.capacity;
        let child =
            |x: f64, y: f64, w: f64, h: f64| QuadTree::with_capacity(Aabb::new(x, y, w, h), capacity);
        self.children = Some(Box::new([
            child(x0, y0, x1 - x0, y1 - y0),
            child(x1, y0, x2 - x1, y1 - y0),
            child(x0, y1, x1 - x0, y2 - y1),
            child(x1, y1, x2 - x1, y2 - y1),
        ]));

        for item in std::mem::take(&mut self.bucket) {
            // Always fits here; it either sinks into a child or stays.
            self.insert(item);
        }
    }

    /// Boxes overlapping `area` (`partials`) or fully inside it.
    pub fn query(&self, area: &Aabb, partials: bool) -> Vec<Aabb> {
        let mut found = Vec::new();
        self.query_into(area, partials, &mut found);
        found
    }

    /// Union of `query` over several areas. A box matching more than one
    /// area is reported once per area.
    pub fn query_many(&self, areas: &[Aabb], partials: bool) -> Vec<Aabb> {
        let mut found = Vec::new();
        for area in areas {
            self.query_into(area, partials, &mut found);
        }
        found
    }

    fn query_into(&self, area: &Aabb, partials: bool, found: &mut Vec<Aabb>) {
        if !self.boundary.intersects(area) {
            return;
        }

        found.extend(self.bucket.iter().filter(|item| {
            if partials {
                area.intersects(item)
            } else {
                area.contains(item)
            }
        }));

        if let Some(children) = &self.children {
            for idx in QUERY_ORDER {
                children[idx].query_into(area, partials, found);
            }
        }
    }

    /// Total number of boxes stored in this subtree.
    pub fn len(&self) -> usize {
        let below = self
            .children
            .as_ref()
            .map_or(0, |children| children.iter().map(QuadTree::len).sum());
        self.bucket.len() + below
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Levels below and including this node.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .as_ref()
            .map_or(0, |children| children.iter().map(QuadTree::depth).max().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> Aabb {
        Aabb::new(0.0, 0.0, 256.0, 256.0)
    }

    #[test]
    fn test_insert_outside_boundary_fails() {
        let mut tree = QuadTree::new(world());
        assert!(!tree.insert(Aabb::new(250.0, 0.0, 10.0, 10.0)));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_subdivides_when_bucket_full() {
        let mut tree = QuadTree::with_capacity(world(), 2);
        tree.insert(Aabb::new(0.0, 0.0, 8.0, 8.0));
        tree.insert(Aabb::new(200.0, 0.0, 8.0, 8.0));
        assert_eq!(tree.depth(), 1);
        tree.insert(Aabb::new(0.0, 200.0, 8.0, 8.0));
        assert!(tree.depth() > 1, "third insert must subdivide");
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_straddling_box_stays_in_parent() {
        let mut tree = QuadTree::with_capacity(world(), 1);
        tree.insert(Aabb::new(0.0, 0.0, 8.0, 8.0));
        // Crosses the vertical midline.
        tree.insert(Aabb::new(120.0, 10.0, 16.0, 8.0));
        assert_eq!(tree.bucket.len(), 1);
        assert_eq!(tree.bucket[0].x, 120.0);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_identical_points_terminate() {
        let mut tree = QuadTree::with_capacity(Aabb::new(0.0, 0.0, 64.0, 64.0), 1);
        for _ in 0..50 {
            assert!(tree.insert(Aabb::new(10.0, 10.0, 0.0, 0.0)));
        }
        assert_eq!(tree.len(), 50);
        assert!(tree.depth() <= 8, "depth bounded by minimum node size");
    }

    #[test]
    fn test_query_contained_only() {
        let mut tree = QuadTree::new(world());
        tree.insert(Aabb::new(10.0, 10.0, 10.0, 10.0));
        tree.insert(Aabb::new(15.0, 15.0, 40.0, 40.0));
        let area = Aabb::new(0.0, 0.0, 32.0, 32.0);
        assert_eq!(tree.query(&area, true).len(), 2);
        let inside = tree.query(&area, false);
        assert_eq!(inside.len(), 1);
        assert_eq!(inside[0].x, 10.0);
    }

    #[test]
    fn test_query_many() {
        let mut tree = QuadTree::new(world());
        tree.insert(Aabb::new(10.0, 10.0, 10.0, 10.0));
        tree.insert(Aabb::new(200.0, 200.0, 10.0, 10.0));
        let areas = [
            Aabb::new(0.0, 0.0, 32.0, 32.0),
            Aabb::new(190.0, 190.0, 32.0, 32.0),
        ];
        assert_eq!(tree.query_many(&areas, true).len(), 2);
    }
}
