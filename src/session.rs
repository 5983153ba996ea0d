//! The line protocol: `V <n>` sets the vertex count, `E {<a,b>,...}` installs edges and prints a
//! minimum vertex cover. Failures of a command are printed as an `Error:` line and the session
//! goes on with the next line.

use crate::cust_error::CommandError;
use crate::graph::UGraph;
use crate::minimize::{Cover, Minimizer};
use crate::oracle::SatOracle;
use std::io;
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Vertex count in effect before the first `V` command.
pub const DEFAULT_VERTEX_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Vertices(i64),
    /// The raw edge list, parsed when the command is executed.
    Edges(String),
}

impl Command {
    /// Parses one input line. Returns `None` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let mut tokens = line.split_whitespace();
        let head = match tokens.next() {
            Some(head) => head,
            None => return Ok(None),
        };
        let args: Vec<&str> = tokens.collect();
        let bad_args = |command| CommandError::Arguments {
            command,
            found: args.iter().map(|arg| arg.to_string()).collect(),
        };
        // whole tokens: "V5" is an unsupported command, not `V` with a missing argument
        match (head, args.as_slice()) {
            ("V", [n]) => n
                .parse()
                .map(|n| Some(Command::Vertices(n)))
                .map_err(|_| bad_args('V')),
            ("V", _) => Err(bad_args('V')),
            ("E", [edges]) => Ok(Some(Command::Edges(edges.to_string()))),
            ("E", _) => Err(bad_args('E')),
            (other, _) => Err(CommandError::Unsupported(other.to_owned())),
        }
    }
}

/// The state carried from one command to the next: the current graph and the cover search.
pub struct Session<O: SatOracle> {
    graph: UGraph,
    minimizer: Minimizer<O>,
}

impl<O: SatOracle> Session<O> {
    pub fn new(minimizer: Minimizer<O>) -> Self {
        Session {
            graph: UGraph::new(DEFAULT_VERTEX_COUNT),
            minimizer,
        }
    }

    pub fn graph(&self) -> &UGraph {
        &self.graph
    }

    /// Executes `command`. Returns the minimum cover for an `E` command.
    pub fn execute(&mut self, command: Command) -> Result<Option<Cover>, CommandError> {
        match command {
            Command::Vertices(n) => {
                self.graph.set_vertex_count(n)?;
                info!(vertices = n, "vertex count set");
                Ok(None)
            }
            Command::Edges(raw) => {
                if let Err(e) = self.graph.set_edges(&raw) {
                    warn!(error = %e, "edge list rejected");
                    return Err(e.into())
                }
                info!(
                    vertices = self.graph.num_vertices(),
                    edges = self.graph.num_edges(),
                    "edges installed"
                );
                let cover = self.minimizer.minimize(&self.graph)?;
                Ok(Some(cover))
            }
        }
    }

    /// Handles one input line and writes its output (if any) to `out`.
    pub fn process_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<(), io::Error> {
        let result = match Command::parse(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };
        match result {
            Ok(Some(cover)) => writeln!(out, "{}", cover),
            Ok(None) => Ok(()),
            Err(e) => writeln!(out, "Error: {}", e),
        }
    }

    /// Processes `input` line by line until it ends. Bytes that are not UTF-8 are replaced by
    /// U+FFFD, so such a line fails as a command of its own.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<(), io::Error> {
        for line in input.split(b'\n') {
            let line = line?;
            self.process_line(&String::from_utf8_lossy(&line), &mut out)?;
            out.flush()?;
        }
        Ok(())
    }
}
