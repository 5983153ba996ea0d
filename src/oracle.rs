//! The satisfiability oracle the cover search consults, and its implementation on top of the
//! `splr` CDCL solver.
//!
//! An oracle call must not depend on any earlier call: every `solve` starts from nothing but
//! the formula it is given. Formulas for different cover sizes live in different variable
//! universes, so nothing learned on one of them could be reused on the next.

use crate::cnf::{CnfFormula, Model};
use splr::{Certificate, Config, SolveIF, Solver, SolverError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// The outcome of a single oracle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Sat(Model),
    Unsat,
    /// The timeout passed or the cancel flag was raised before the search finished.
    Interrupted,
    /// The solver gave up for a reason of its own.
    Failed(String),
}

/// A decision procedure for CNF formulas.
pub trait SatOracle {
    /// Decides `formula`. Must be stateless with respect to earlier calls.
    fn solve(&self, formula: &CnfFormula) -> SolveOutcome;
}

/// Limits of a single `solve` call.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Wall clock budget of one call, enforced in whole seconds (rounded up). `None` searches
    /// until done.
    pub timeout: Option<Duration>,
    /// Once raised, every later call returns `Interrupted` without searching. A call that is
    /// already running still ends at its timeout.
    pub cancel: Option<Arc<AtomicBool>>,
}

/// Time limit handed to `splr` for calls without a timeout.
const UNBOUNDED_SECS: f64 = u32::MAX as f64;

/// CDCL search by `splr`, with its progress output switched off.
///
/// The search has no random choices, so equal formulas give equal models.
#[derive(Debug, Clone, Default)]
pub struct CdclSolver {
    config: SolverConfig,
}

impl CdclSolver {
    pub fn new() -> Self {
        CdclSolver::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        CdclSolver { config }
    }

    fn splr_config(&self) -> Config {
        let mut config = Config::default();
        config.quiet_mode = true;
        config.c_timeout = self
            .config
            .timeout
            .map_or(UNBOUNDED_SECS, |timeout| timeout.as_secs_f64().ceil());
        config
    }

    fn cancelled(&self) -> bool {
        self.config
            .cancel
            .as_deref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }
}

impl SatOracle for CdclSolver {
    fn solve(&self, formula: &CnfFormula) -> SolveOutcome {
        if self.cancelled() {
            return SolveOutcome::Interrupted
        }
        if formula.clauses().iter().any(|clause| clause.is_empty()) {
            return SolveOutcome::Unsat
        }
        let clauses = match to_splr_clauses(formula) {
            Ok(clauses) => clauses,
            Err(reason) => return SolveOutcome::Failed(reason),
        };
        if clauses.is_empty() {
            return SolveOutcome::Sat(Model::new(vec![false; formula.num_vars()]))
        }
        let result = match Solver::try_from((self.splr_config(), clauses.as_slice())) {
            Ok(mut solver) => solver.solve(),
            Err(result) => result,
        };
        trace!(
            vars = formula.num_vars(),
            clauses = formula.num_clauses(),
            sat = matches!(result, Ok(Certificate::SAT(_))),
            "splr finished"
        );
        match result {
            Ok(Certificate::SAT(lits)) => SolveOutcome::Sat(to_model(formula.num_vars(), &lits)),
            Ok(Certificate::UNSAT) => SolveOutcome::Unsat,
            Err(SolverError::TimeOut) => SolveOutcome::Interrupted,
            Err(e) => SolveOutcome::Failed(format!("{:?}", e)),
        }
    }
}

/// The clauses of `formula` as DIMACS literals, with duplicate literals merged and tautologies
/// left out.
fn to_splr_clauses(formula: &CnfFormula) -> Result<Vec<Vec<i32>>, String> {
    let mut clauses = Vec::with_capacity(formula.num_clauses());
    for clause in formula.clauses() {
        let mut lits = clause
            .iter()
            .map(|lit| {
                i32::try_from(lit.to_dimacs()).map_err(|_| {
                    format!("{} variables are more than splr takes", formula.num_vars())
                })
            })
            .collect::<Result<Vec<i32>, String>>()?;
        lits.sort_unstable_by_key(|lit| (lit.unsigned_abs(), *lit));
        lits.dedup();
        // sorted by variable, so `l` and `-l` are neighbours
        if lits.windows(2).any(|w| w[0] == -w[1]) {
            continue
        }
        clauses.push(lits);
    }
    Ok(clauses)
}

/// Variables `splr` did not report are false.
fn to_model(num_vars: usize, lits: &[i32]) -> Model {
    let mut values = vec![false; num_vars];
    for &lit in lits {
        let slot = (lit.unsigned_abs() as usize)
            .checked_sub(1)
            .and_then(|index| values.get_mut(index));
        if let Some(value) = slot {
            *value = lit > 0;
        }
    }
    Model::new(values)
}
