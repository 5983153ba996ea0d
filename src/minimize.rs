//! Computes a minimum vertex cover by a binary search over the cover size `k`, asking the oracle
//! for every tried `k` whether a cover of exactly that size exists.
//!
//! Feasibility is monotone in `k`: a cover of size `k` extended by any unused vertex is a cover
//! of size `k + 1`. Hence the smallest feasible `k` in `0..=n` is found with `O(log n)` oracle
//! calls.

use crate::cnf::{CnfFormula, Var};
use crate::cust_error::ProcessingError;
use crate::encoder::{decode, encode, order_positions};
use crate::graph::UGraph;
use crate::oracle::{SatOracle, SolveOutcome};
use fxhash::FxHashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// A vertex cover, kept as 0-indexed vertices in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    vertices: Vec<usize>,
}

impl Cover {
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn to_set(&self) -> FxHashSet<usize> {
        self.vertices.iter().copied().collect()
    }
}

impl From<FxHashSet<usize>> for Cover {
    fn from(set: FxHashSet<usize>) -> Self {
        let mut vertices: Vec<usize> = set.into_iter().collect();
        vertices.sort_unstable();
        Cover { vertices }
    }
}

/// 1-indexed vertices separated by single spaces.
impl fmt::Display for Cover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, vertex) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", vertex + 1)?;
        }
        Ok(())
    }
}

/// Counters of the last `minimize` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimizeStats {
    pub oracle_calls: usize,
    pub clauses: usize,
}

/// Drives the search for a minimum vertex cover with the oracle `O`.
#[derive(Debug, Clone, Default)]
pub struct Minimizer<O: SatOracle> {
    oracle: O,
    /// If set, every formula handed to the oracle is written there in DIMACS format.
    dump_dir: Option<PathBuf>,
    stats: MinimizeStats,
}

impl<O: SatOracle> Minimizer<O> {
    pub fn new(oracle: O) -> Self {
        Minimizer {
            oracle,
            dump_dir: None,
            stats: MinimizeStats::default(),
        }
    }

    pub fn with_dump_dir(mut self, dump_dir: PathBuf) -> Self {
        self.dump_dir = Some(dump_dir);
        self
    }

    pub fn stats(&self) -> MinimizeStats {
        self.stats
    }

    /// Returns a minimum vertex cover of `graph`.
    ///
    /// A graph without edges gets the empty cover without consulting the oracle. The result is
    /// checked against `graph` before it is returned.
    pub fn minimize(&mut self, graph: &UGraph) -> Result<Cover, ProcessingError> {
        self.stats = MinimizeStats::default();
        if graph.has_no_edges() {
            return Ok(Cover::default())
        }
        let n = graph.num_vertices();
        let mut low = 0;
        let mut high = n;
        let mut best = None;
        while low <= high {
            let mid = (low + high) / 2;
            match self.cover_of_size(graph, mid)? {
                Some(cover) => {
                    best = Some(cover);
                    if mid == 0 {
                        break
                    }
                    high = mid - 1;
                }
                None => low = mid + 1,
            }
        }
        let cover = best.ok_or(ProcessingError::NoCoverFound { num_vertices: n })?;
        if !graph.is_cover(&cover) {
            return Err(ProcessingError::InvalidSolution(format!(
                "{:?} does not cover every edge",
                cover
            )))
        }
        info!(
            size = cover.len(),
            oracle_calls = self.stats.oracle_calls,
            clauses = self.stats.clauses,
            "minimum cover found"
        );
        Ok(Cover::from(cover))
    }

    /// Asks the oracle for a cover of exactly `k` vertices of `graph`.
    /// Returns `None` if there is none.
    ///
    /// The oracle gets the encoding with its positions in ascending vertex order.
    pub fn cover_of_size(
        &mut self,
        graph: &UGraph,
        k: usize,
    ) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
        let n = graph.num_vertices();
        if n.checked_mul(k).map_or(true, |vars| vars > Var::LIMIT) {
            return Err(ProcessingError::TooLarge { num_vertices: n, k })
        }
        let mut encoding = encode(graph, k);
        order_positions(&mut encoding);
        self.dump(&encoding.formula, n, k)?;
        self.stats.oracle_calls += 1;
        self.stats.clauses += encoding.formula.num_clauses();
        let outcome = self.oracle.solve(&encoding.formula);
        debug!(
            k,
            vars = encoding.formula.num_vars(),
            clauses = encoding.formula.num_clauses(),
            sat = matches!(outcome, SolveOutcome::Sat(_)),
            "tried cover size"
        );
        match outcome {
            SolveOutcome::Sat(model) => Ok(Some(decode(&encoding.grid, &model))),
            SolveOutcome::Unsat => Ok(None),
            SolveOutcome::Interrupted => {
                warn!(k, "oracle interrupted");
                Err(ProcessingError::Interrupted { k })
            }
            SolveOutcome::Failed(reason) => {
                warn!(k, %reason, "oracle failed");
                Err(ProcessingError::OracleFailed { k, reason })
            }
        }
    }

    fn dump(&self, formula: &CnfFormula, n: usize, k: usize) -> Result<(), ProcessingError> {
        if let Some(dir) = &self.dump_dir {
            let file = File::create(dir.join(format!("cover-n{}-k{}.cnf", n, k)))?;
            let mut out = BufWriter::new(file);
            formula.write_dimacs(&mut out)?;
            out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::CdclSolver;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    fn graph(n: i64, edges: &str) -> UGraph {
        let mut graph = UGraph::default();
        graph.set_vertex_count(n).unwrap();
        graph.set_edges(edges).unwrap();
        graph
    }

    fn brute_force_min(graph: &UGraph) -> usize {
        let n = graph.num_vertices();
        (0..(1u32 << n))
            .filter(|mask| {
                graph
                    .edges()
                    .iter()
                    .all(|(u, v)| mask & (1 << u) != 0 || mask & (1 << v) != 0)
            })
            .map(|mask| mask.count_ones() as usize)
            .min()
            .expect("the full vertex set is a cover")
    }

    /// Counts calls and never finds anything.
    struct Refuser {
        calls: Cell<usize>,
    }

    impl SatOracle for Refuser {
        fn solve(&self, _formula: &CnfFormula) -> SolveOutcome {
            self.calls.set(self.calls.get() + 1);
            SolveOutcome::Unsat
        }
    }

    struct Stopper;

    impl SatOracle for Stopper {
        fn solve(&self, _formula: &CnfFormula) -> SolveOutcome {
            SolveOutcome::Interrupted
        }
    }

    #[test]
    fn empty_graph_test() {
        let mut minimizer = Minimizer::new(Refuser { calls: Cell::new(0) });
        let cover = minimizer.minimize(&graph(5, "{}"));
        assert_eq!(cover.unwrap(), Cover::default());
        assert_eq!(minimizer.oracle.calls.get(), 0);
        assert_eq!(minimizer.stats().oracle_calls, 0);
    }

    #[test]
    fn triangle_test() {
        let mut minimizer = Minimizer::new(CdclSolver::new());
        let triangle = graph(3, "{<1,2>,<2,3>,<1,3>}");
        let cover = minimizer.minimize(&triangle).unwrap();
        assert_eq!(cover.len(), 2);
        assert!(triangle.is_cover(&cover.to_set()));
        assert!(minimizer.stats().oracle_calls <= 3);
    }

    #[test]
    fn star_test() {
        let mut minimizer = Minimizer::new(CdclSolver::new());
        let cover = minimizer.minimize(&graph(4, "{<1,2>,<1,3>,<1,4>}")).unwrap();
        assert_eq!(cover.vertices(), &[0]);
        assert_eq!(cover.to_string(), "1");
    }

    #[test]
    fn example_graph_test() {
        let mut minimizer = Minimizer::new(CdclSolver::new());
        let g = graph(5, "{<1,5>,<5,2>,<1,4>,<4,5>,<4,3>,<2,4>}");
        let cover = minimizer.minimize(&g).unwrap();
        assert_eq!(cover.to_string(), "4 5");
    }

    #[test]
    fn no_cover_found_test() {
        let mut minimizer = Minimizer::new(Refuser { calls: Cell::new(0) });
        let result = minimizer.minimize(&graph(8, "{<1,2>}"));
        assert!(matches!(
            result,
            Err(ProcessingError::NoCoverFound { num_vertices: 8 })
        ));
        // tries 4, 6, 7, 8
        assert_eq!(minimizer.oracle.calls.get(), 4);
    }

    #[test]
    fn interrupted_test() {
        let mut minimizer = Minimizer::new(Stopper);
        assert!(matches!(
            minimizer.minimize(&graph(4, "{<1,2>}")),
            Err(ProcessingError::Interrupted { k: 2 })
        ));
    }

    #[test]
    fn failed_oracle_test() {
        struct Broken;

        impl SatOracle for Broken {
            fn solve(&self, _formula: &CnfFormula) -> SolveOutcome {
                SolveOutcome::Failed("out of memory".to_owned())
            }
        }

        let result = Minimizer::new(Broken).minimize(&graph(2, "{<1,2>}"));
        match result {
            Err(ProcessingError::OracleFailed { k: 1, reason }) => {
                assert_eq!(reason, "out of memory")
            }
            other => panic!("expected OracleFailed, got {:?}", other),
        }
    }

    #[test]
    fn too_large_test() {
        let mut minimizer = Minimizer::new(Refuser { calls: Cell::new(0) });
        // the first size tried, 35000, would need 70000 * 35000 variables
        let result = minimizer.minimize(&graph(70000, "{<1,2>}"));
        assert!(matches!(
            result,
            Err(ProcessingError::TooLarge { num_vertices: 70000, k: 35000 })
        ));
        assert_eq!(minimizer.oracle.calls.get(), 0);
    }

    #[test]
    fn complete_graph_test() {
        let mut g = UGraph::new(15);
        let edges: Vec<String> = (1..=15)
            .flat_map(|a| ((a + 1)..=15).map(move |b| format!("<{},{}>", a, b)))
            .collect();
        g.set_edges(&format!("{{{}}}", edges.join(","))).unwrap();
        assert_eq!(g.num_edges(), 105);
        let mut minimizer = Minimizer::new(CdclSolver::new());
        let cover = minimizer.minimize(&g).unwrap();
        assert_eq!(cover.len(), 14);
        assert!(g.is_cover(&cover.to_set()));
    }

    #[test]
    fn dense_random_graph_test() {
        let mut rng = StdRng::seed_from_u64(20);
        let g = UGraph::random(20, 0.5, &mut rng);
        let mut minimizer = Minimizer::new(CdclSolver::new());
        let cover = minimizer.minimize(&g).unwrap();
        assert!(g.is_cover(&cover.to_set()));
        assert!(minimizer.cover_of_size(&g, cover.len() - 1).unwrap().is_none());
    }

    #[test]
    fn idempotent_test() {
        let mut minimizer = Minimizer::new(CdclSolver::new());
        let g = graph(6, "{<1,2>,<2,3>,<3,4>,<4,5>,<5,6>,<6,1>,<1,4>}");
        let first = minimizer.minimize(&g).unwrap();
        let second = minimizer.minimize(&g).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn random_graphs_test() {
        let mut rng = StdRng::seed_from_u64(650);
        let mut minimizer = Minimizer::new(CdclSolver::new());
        for n in 2..8 {
            for _ in 0..4 {
                let g = UGraph::random(n, 0.4, &mut rng);
                let cover = minimizer.minimize(&g).unwrap();
                assert!(g.is_cover(&cover.to_set()));
                if g.has_no_edges() {
                    assert!(cover.is_empty());
                } else {
                    assert_eq!(cover.len(), brute_force_min(&g));
                }
            }
        }
    }

    #[test]
    fn cover_format_test() {
        let cover = Cover::from(vec![4, 0, 2].into_iter().collect::<FxHashSet<usize>>());
        assert_eq!(cover.vertices(), &[0, 2, 4]);
        assert_eq!(cover.to_string(), "1 3 5");
        assert_eq!(Cover::default().to_string(), "");
    }

    #[test]
    fn dump_dir_test() {
        let dir = std::env::temp_dir().join(format!("sat_cover_dump_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut minimizer = Minimizer::new(CdclSolver::new()).with_dump_dir(dir.clone());
        minimizer.minimize(&graph(3, "{<1,2>}")).unwrap();
        let dimacs = std::fs::read_to_string(dir.join("cover-n3-k1.cnf")).unwrap();
        assert!(dimacs.starts_with("p cnf 3 5\n"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
