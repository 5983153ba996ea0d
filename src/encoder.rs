//! Reduction of "does `graph` have a vertex cover of size `k`?" to satisfiability.
//!
//! The formula ranges over a grid of variables `x[i][j]`, meaning "vertex `i` takes position `j`
//! of the cover", for every vertex `i` and every position `j` in `0..k`. Four clause families
//! are generated:
//! 1. Every position is taken by at least one vertex.
//! 2. No vertex takes two positions.
//! 3. No position is taken by two vertices.
//! 4. Every edge has an endpoint on some position.
//!
//! 1 to 3 select exactly `k` distinct vertices and 4 makes the selection a cover. For `k = 0`
//! every edge yields an empty clause.

use crate::cnf::{CnfFormula, Lit, Model, Var};
use crate::graph::UGraph;
use fxhash::FxHashSet;

/// The `num_vertices x k` grid of position variables of one encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarGrid {
    num_vertices: usize,
    k: usize,
    vars: Vec<Var>,
}

impl VarGrid {
    fn new(formula: &mut CnfFormula, num_vertices: usize, k: usize) -> Self {
        let vars = (0..num_vertices * k).map(|_| formula.new_var()).collect();
        VarGrid {
            num_vertices,
            k,
            vars,
        }
    }

    /// Returns the variable "vertex `vertex` takes position `position`".
    pub fn var(&self, vertex: usize, position: usize) -> Var {
        self.vars[vertex * self.k + position]
    }

    fn lit(&self, vertex: usize, position: usize) -> Lit {
        Lit::positive(self.var(vertex, position))
    }
}

/// A formula together with the grid its variables belong to.
#[derive(Debug, Clone)]
pub struct Encoding {
    pub formula: CnfFormula,
    pub grid: VarGrid,
}

/// Builds the formula that is satisfiable iff `graph` has a vertex cover of exactly `k`
/// vertices.
pub fn encode(graph: &UGraph, k: usize) -> Encoding {
    let n = graph.num_vertices();
    let mut formula = CnfFormula::new();
    let grid = VarGrid::new(&mut formula, n, k);

    // 1. position coverage
    for j in 0..k {
        formula.add_clause((0..n).map(|i| grid.lit(i, j)));
    }
    // 2. vertex single-occupancy
    for i in 0..n {
        for j in 0..k {
            for other in (j + 1)..k {
                formula.add_clause([!grid.lit(i, j), !grid.lit(i, other)]);
            }
        }
    }
    // 3. position single-occupant
    for i in 0..n {
        for other in (i + 1)..n {
            for m in 0..k {
                formula.add_clause([!grid.lit(i, m), !grid.lit(other, m)]);
            }
        }
    }
    // 4. edge coverage
    for &(u, v) in graph.edges() {
        formula.add_clause((0..k).flat_map(|m| [grid.lit(u, m), grid.lit(v, m)]));
    }
    Encoding { formula, grid }
}

/// Adds clauses that put the vertices on positions `0..k` in ascending order: the vertex on
/// position `j` must be greater than the one on position `j - 1`.
///
/// Satisfiability is unchanged. Each cover of size `k` keeps exactly one model, the sorted one,
/// so refuting a `k` no longer means ruling out every permutation of the positions.
pub fn order_positions(encoding: &mut Encoding) {
    let Encoding { formula, grid } = encoding;
    for j in 1..grid.k {
        for i in 0..grid.num_vertices {
            // same vertex on both positions is excluded by family 2
            for lower in 0..i {
                formula.add_clause([!grid.lit(i, j - 1), !grid.lit(lower, j)]);
            }
        }
    }
}

/// Reads the selected vertices off a model of an encoding with grid `grid`.
pub fn decode(grid: &VarGrid, model: &Model) -> FxHashSet<usize> {
    let mut cover = FxHashSet::default();
    for i in 0..grid.num_vertices {
        for j in 0..grid.k {
            if model.value(grid.var(i, j)) {
                cover.insert(i);
            }
        }
    }
    cover
}
