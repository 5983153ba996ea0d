//! Boolean formulas in conjunctive normal form, as handed to a `SatOracle`.

use std::io;
use std::io::Write;

/// A boolean variable, identified by its index in the formula it was created in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(u32);

impl Var {
    /// Number of distinct variables. Both literals of every variable must fit in a `u32`.
    pub const LIMIT: usize = 1 << 31;

    /// Panics if `index` is not below `Var::LIMIT`.
    pub fn from_index(index: usize) -> Self {
        assert!(index < Var::LIMIT, "variable index {} out of range", index);
        Var(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A variable or its negation.
///
/// Encoded as `2 * var` for the positive and `2 * var + 1` for the negative literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit(u32);

impl Lit {
    #[inline]
    pub fn positive(var: Var) -> Self {
        Lit(var.0 << 1)
    }

    #[inline]
    pub fn negative(var: Var) -> Self {
        Lit((var.0 << 1) | 1)
    }

    #[inline]
    pub fn var(self) -> Var {
        Var(self.0 >> 1)
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 & 1 == 0
    }

    #[inline]
    pub fn negated(self) -> Self {
        Lit(self.0 ^ 1)
    }

    /// Index into per-literal tables (watch lists).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The literal in DIMACS notation (1-based, sign for polarity).
    pub fn to_dimacs(self) -> i64 {
        let var = self.var().0 as i64 + 1;
        if self.is_positive() {
            var
        } else {
            -var
        }
    }
}

impl std::ops::Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        self.negated()
    }
}

/// A conjunction of clauses over the variables `0..num_vars`.
///
/// Every formula owns its own variable universe; variables of one formula mean nothing to
/// another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CnfFormula {
    num_vars: usize,
    clauses: Vec<Vec<Lit>>,
}

impl CnfFormula {
    pub fn new() -> Self {
        CnfFormula::default()
    }

    /// Creates a fresh variable. Panics once `Var::LIMIT` variables exist.
    pub fn new_var(&mut self) -> Var {
        let var = Var::from_index(self.num_vars);
        self.num_vars += 1;
        var
    }

    /// Adds the disjunction of `lits`. An empty clause makes the formula unsatisfiable.
    pub fn add_clause<I: IntoIterator<Item = Lit>>(&mut self, lits: I) {
        let clause: Vec<Lit> = lits.into_iter().collect();
        debug_assert!(clause.iter().all(|lit| lit.var().index() < self.num_vars));
        self.clauses.push(clause);
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[Vec<Lit>] {
        &self.clauses
    }

    /// Writes `self` in DIMACS CNF format.
    pub fn write_dimacs<W: Write>(&self, mut out: W) -> Result<(), io::Error> {
        writeln!(out, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            for lit in clause {
                write!(out, "{} ", lit.to_dimacs())?;
            }
            writeln!(out, "0")?;
        }
        Ok(())
    }
}

/// A total assignment of the variables of one formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    pub fn new(values: Vec<bool>) -> Self {
        Model { values }
    }

    pub fn value(&self, var: Var) -> bool {
        self.values[var.index()]
    }

    pub fn lit_value(&self, lit: Lit) -> bool {
        self.value(lit.var()) == lit.is_positive()
    }

    /// Checks if `self` satisfies every clause of `formula`.
    pub fn satisfies(&self, formula: &CnfFormula) -> bool {
        self.values.len() == formula.num_vars()
            && formula
                .clauses()
                .iter()
                .all(|clause| clause.iter().any(|lit| self.lit_value(*lit)))
    }
}
