//! DIMACS CNF output and solver model input

use super::encoder::CnfFormula;
use crate::error::{EncodingError, EncodingResult};
use anyhow::{Context, Result};
use itertools::Itertools;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write `formula` in DIMACS CNF format, preceded by optional `c` comment lines
pub fn write_dimacs<W: Write>(writer: W, formula: &CnfFormula, comments: &[String]) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);

    for comment in comments {
        writeln!(writer, "c {}", comment)?;
    }
    writeln!(writer, "p cnf {} {}", formula.num_variables, formula.num_clauses())?;

    for clause in &formula.clauses {
        for lit in &clause.literals {
            write!(writer, "{} ", lit)?;
        }
        writeln!(writer, "0")?;
    }

    writer.flush()
}

/// Result line reported by a solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

/// Assignment read from solver output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverModel {
    /// Status from the `s` line, if one was present
    pub status: Option<SolverStatus>,
    /// Truth value of variable `i + 1` at index `i`
    pub values: Vec<bool>,
}

impl SolverModel {
    pub fn is_satisfiable(&self) -> bool {
        self.status != Some(SolverStatus::Unsatisfiable) && !self.values.is_empty()
    }
}

/// Parse solver output: `c` comments, an optional `s` status line and `v`
/// lines of signed literals. Literal `0` ends the model. Every variable from
/// 1 up to the largest one mentioned must be assigned exactly once.
pub fn parse_solver_output(content: &str) -> EncodingResult<SolverModel> {
    let mut status = None;
    let mut slots: Vec<Option<bool>> = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let line_no = line_idx + 1;
        let mut words = line.split_whitespace();

        match words.next() {
            Some("s") => {
                let text = words.join(" ");
                status = Some(match text.as_str() {
                    "SATISFIABLE" => SolverStatus::Satisfiable,
                    "UNSATISFIABLE" => SolverStatus::Unsatisfiable,
                    _ => SolverStatus::Unknown,
                });
            }
            Some("v") => {
                for word in words {
                    let lit: i64 = word.parse().map_err(|_| EncodingError::MalformedSolverOutput {
                        line: line_no,
                        reason: format!("'{}' is not a literal", word),
                    })?;
                    if lit == 0 {
                        continue;
                    }
                    if lit.unsigned_abs() > i32::MAX as u64 {
                        return Err(EncodingError::MalformedSolverOutput {
                            line: line_no,
                            reason: format!("literal {} is out of range", lit),
                        });
                    }

                    let var = lit.unsigned_abs() as usize;
                    if var > slots.len() {
                        slots.resize(var, None);
                    }
                    if slots[var - 1].replace(lit > 0).is_some() {
                        return Err(EncodingError::MalformedSolverOutput {
                            line: line_no,
                            reason: format!("variable {} assigned twice", var),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    let values = slots
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            value.ok_or_else(|| {
                EncodingError::malformed_assignment(format!("solver output omits variable {}", i + 1))
            })
        })
        .collect::<EncodingResult<Vec<_>>>()?;

    Ok(SolverModel { status, values })
}

/// Read and parse a solver output file
pub fn load_solver_output<P: AsRef<Path>>(path: P) -> Result<SolverModel> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read solver output: {}", path.as_ref().display()))?;

    parse_solver_output(&content)
        .with_context(|| format!("Failed to parse solver output: {}", path.as_ref().display()))
}
