//! Implementation of a simple, undirected graph data structure given as a vertex count and an
//! edge list, as it is built up by the `V` and `E` commands.

use crate::cust_error::GraphError;
use crate::edge_parser::parse_edge_list;
use fxhash::FxHashSet;
use rand::Rng;

/// A simple undirected graph on the vertices `0..num_vertices`.
///
/// Edges are kept in input order and duplicates are kept as well. Every endpoint lies in
/// `0..num_vertices` and no edge is a self-loop.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct UGraph {
    num_vertices: usize,
    edges: Vec<(usize, usize)>,
}

// Static functions
impl UGraph {

    /// Creates a graph with `num_vertices` vertices and no edges.
    pub fn new(num_vertices: usize) -> Self {
        UGraph {
            num_vertices,
            edges: Vec::new(),
        }
    }

    /// Returns the number of vertices of `self`.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Returns the number of edges of `self`, duplicates included.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edges of `self` (0-indexed) in the order they were given.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Checks if `self` has no edges.
    pub fn has_no_edges(&self) -> bool {
        self.edges.is_empty()
    }

    /// Checks if `cover` is a vertex cover of `self`, i.e. every edge has at least one endpoint
    /// in `cover` and `cover` only holds vertices of `self`.
    pub fn is_cover(&self, cover: &FxHashSet<usize>) -> bool {
        if cover.iter().any(|vertex| *vertex >= self.num_vertices) {
            return false
        }
        self.edges
            .iter()
            .all(|(u, v)| cover.contains(u) || cover.contains(v))
    }

    /// Returns a random graph on `num_vertices` vertices, where each of the possible edges exists
    /// with probability `edge_prob`.
    pub fn random<R: Rng>(num_vertices: usize, edge_prob: f64, rng: &mut R) -> Self {
        let mut edges = Vec::new();
        for u in 0..num_vertices {
            for v in (u + 1)..num_vertices {
                if rng.gen_bool(edge_prob) {
                    edges.push((u, v));
                }
            }
        }
        UGraph {
            num_vertices,
            edges,
        }
    }
}

// Dynamic functions
impl UGraph {

    /// Resets `self` to `num_vertices` vertices and no edges.
    /// Fails with `GraphError::InvalidSize` if `num_vertices` is negative, leaving `self`
    /// untouched.
    pub fn set_vertex_count(&mut self, num_vertices: i64) -> Result<(), GraphError> {
        let n = usize::try_from(num_vertices).map_err(|_| GraphError::InvalidSize(num_vertices))?;
        self.num_vertices = n;
        self.edges.clear();
        Ok(())
    }

    /// Replaces the edges of `self` by the edges listed in `raw` (`{<a,b>,...}`, 1-indexed).
    ///
    /// The whole list is rejected if any pair is malformed, out of range or a self-loop. In that
    /// case `self` is left without any edges.
    pub fn set_edges(&mut self, raw: &str) -> Result<(), GraphError> {
        self.edges.clear();
        let pairs = parse_edge_list(raw)?;
        let edges = pairs
            .into_iter()
            .map(|(a, b)| self.to_edge(a, b))
            .collect::<Result<Vec<_>, _>>()?;
        self.edges = edges;
        Ok(())
    }

    /// Converts a 1-indexed pair into a 0-indexed edge of `self`.
    fn to_edge(&self, a: i64, b: i64) -> Result<(usize, usize), GraphError> {
        let invalid = || GraphError::InvalidEdge {
            a,
            b,
            num_vertices: self.num_vertices,
        };
        let in_range = |x: i64| {
            usize::try_from(x)
                .ok()
                .filter(|x| (1..=self.num_vertices).contains(x))
                .map(|x| x - 1)
        };
        match (in_range(a), in_range(b)) {
            (Some(u), Some(v)) if u != v => Ok((u, v)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn set_vertex_count_test() {
        let mut graph = UGraph::new(3);
        assert!(graph.set_edges("{<1,2>}").is_ok());
        assert!(graph.set_vertex_count(5).is_ok());
        assert_eq!(graph.num_vertices(), 5);
        assert!(graph.has_no_edges());
        assert!(matches!(
            graph.set_vertex_count(-1),
            Err(GraphError::InvalidSize(-1))
        ));
        assert_eq!(graph.num_vertices(), 5);
        assert!(graph.set_vertex_count(0).is_ok());
        assert_eq!(graph.num_vertices(), 0);
    }

    #[test]
    fn set_edges_test() {
        let mut graph = UGraph::new(5);
        assert!(graph.set_edges("{<1,5>,<5,2>,<1,4>,<4,5>,<4,3>,<2,4>,<1,5>}").is_ok());
        assert_eq!(
            graph.edges(),
            &[(0, 4), (4, 1), (0, 3), (3, 4), (3, 2), (1, 3), (0, 4)]
        );
        assert_eq!(graph.num_edges(), 7);
        assert!(graph.set_edges("{}").is_ok());
        assert!(graph.has_no_edges());
    }

    #[test]
    fn invalid_edges_discard_batch_test() {
        let mut graph = UGraph::new(3);
        assert!(graph.set_edges("{<1,2>}").is_ok());
        assert!(matches!(
            graph.set_edges("{<1,2>,<1,4>}"),
            Err(GraphError::InvalidEdge { a: 1, b: 4, num_vertices: 3 })
        ));
        assert!(graph.has_no_edges());
        assert!(matches!(
            graph.set_edges("{<2,2>}"),
            Err(GraphError::InvalidEdge { a: 2, b: 2, .. })
        ));
        assert!(matches!(
            graph.set_edges("{<0,1>}"),
            Err(GraphError::InvalidEdge { a: 0, .. })
        ));
        assert!(matches!(
            graph.set_edges("{<-1,1>}"),
            Err(GraphError::InvalidEdge { a: -1, .. })
        ));
        assert!(graph.set_edges("{<1,2>}").is_ok());
        assert!(matches!(
            graph.set_edges("{<1,a>}"),
            Err(GraphError::Malformed(_))
        ));
        assert!(graph.has_no_edges());
        assert!(graph.set_edges("{<2,3>}").is_ok());
        assert_eq!(graph.edges(), &[(1, 2)]);
    }

    #[test]
    fn is_cover_test() {
        let mut graph = UGraph::new(4);
        assert!(graph.set_edges("{<1,2>,<1,3>,<1,4>}").is_ok());
        assert!(graph.is_cover(&vec![0].into_iter().collect()));
        assert!(graph.is_cover(&vec![1, 2, 3].into_iter().collect()));
        assert!(!graph.is_cover(&vec![1, 2].into_iter().collect()));
        assert!(!graph.is_cover(&FxHashSet::default()));
        assert!(!graph.is_cover(&vec![0, 4].into_iter().collect()));
        assert!(UGraph::new(4).is_cover(&FxHashSet::default()));
    }

    #[test]
    fn random_graph_test() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = UGraph::random(6, 0.5, &mut rng);
        assert_eq!(graph.num_vertices(), 6);
        assert!(graph.edges().iter().all(|(u, v)| u < v && *v < 6));
        assert_eq!(UGraph::random(6, 1.0, &mut rng).num_edges(), 15);
        assert!(UGraph::random(6, 0.0, &mut rng).has_no_edges());
    }
}
