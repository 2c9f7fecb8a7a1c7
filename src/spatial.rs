//! Delaunay adjacency over a point set, plus Voronoi cell membership.
//!
//! Wraps `spade`'s triangulation and reads the result back into flat index
//! buffers: triangles, unique undirected edges, and per-vertex neighbor
//! lists. Voronoi cells are never constructed explicitly; membership is
//! decided by perpendicular-bisector half-plane tests against a generator's
//! Delaunay neighbors, which is the same partition the cell polygons would
//! describe and stays well-defined for unbounded cells.

use glam::DVec2;
use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::error::LinkError;
use crate::types::IndexPair;

/// Triangulated adjacency graph over a fixed point set.
#[derive(Debug, Clone)]
pub struct SpatialGraph {
    positions: Vec<DVec2>,
    triangles: Vec<[usize; 3]>,
    edges: Vec<IndexPair>,
    neighbors: Vec<Vec<usize>>,
}

impl SpatialGraph {
    /// Triangulate `positions` and extract the adjacency structure.
    ///
    /// Indices in the result refer to `positions` order. Exactly coincident
    /// positions are rejected: spade would silently fold them into one
    /// vertex and the index mapping would no longer cover every point.
    /// Near-coincident points are legal (the pre-merge handles them).
    pub fn build(positions: &[DVec2]) -> Result<Self, LinkError> {
        if positions.len() < 2 {
            return Err(LinkError::InsufficientPoints {
                needed: 2,
                got: positions.len(),
            });
        }

        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
        for (i, p) in positions.iter().enumerate() {
            let handle = triangulation
                .insert(Point2::new(p.x, p.y))
                .map_err(|e| LinkError::GeometricDefect(format!("point {}: {:?}", i, e)))?;
            if handle.index() != i {
                return Err(LinkError::GeometricDefect(format!(
                    "points {} and {} are coincident",
                    handle.index(),
                    i
                )));
            }
        }

        let triangles: Vec<[usize; 3]> = triangulation
            .inner_faces()
            .map(|face| {
                let [a, b, c] = face.vertices();
                [a.fix().index(), b.fix().index(), c.fix().index()]
            })
            .collect();

        let mut edges = Vec::with_capacity(triangulation.num_undirected_edges());
        let mut neighbors = vec![Vec::new(); positions.len()];
        for edge in triangulation.undirected_edges() {
            let [a, b] = edge.vertices();
            let (ia, ib) = (a.fix().index(), b.fix().index());
            edges.push(IndexPair::new(ia, ib));
            neighbors[ia].push(ib);
            neighbors[ib].push(ia);
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        Ok(Self {
            positions: positions.to_vec(),
            triangles,
            edges,
            neighbors,
        })
    }

    /// Inner Delaunay faces as vertex index triples.
    ///
    /// Empty for collinear input; the edge list still covers such sets.
    #[inline]
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Unique undirected Delaunay edges.
    #[inline]
    pub fn edges(&self) -> &[IndexPair] {
        &self.edges
    }

    /// Delaunay-adjacent vertex indices of `i`, sorted ascending.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.neighbors[i]
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.positions.len()
    }

    /// True iff `query` lies in generator `cell`'s Voronoi region: it is at
    /// least as close to the generator as to every Delaunay neighbor.
    /// Boundary points count as inside; callers that scan cells in order
    /// keep assignment exclusive by removing a point once claimed.
    pub fn cell_contains(&self, cell: usize, query: DVec2) -> bool {
        let to_generator = query.distance_squared(self.positions[cell]);
        self.neighbors[cell]
            .iter()
            .all(|&n| to_generator <= query.distance_squared(self.positions[n]))
    }
}

/// Diagonal length of the axis-aligned bounding box of `positions`.
///
/// The normalization term for the pre-merge threshold and the resistance
/// model. Zero for a single point or fully coincident input.
pub fn aabb_diagonal(positions: &[DVec2]) -> f64 {
    let Some(&first) = positions.first() else {
        return 0.0;
    };
    let mut min = first;
    let mut max = first;
    for &p in &positions[1..] {
        min = min.min(p);
        max = max.max(p);
    }
    (max - min).length()
}
