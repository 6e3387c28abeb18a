//! SAT encoding of maze reachability

pub mod constraints;
pub mod dimacs;
pub mod encoder;
pub mod tseitin;
pub mod variables;

#[cfg(test)]
pub(crate) mod testing;

pub use constraints::{Clause, Conjunction, Slot, TemplateClause, TransitionTemplate};
pub use dimacs::{parse_solver_output, write_dimacs, SolverModel, SolverStatus};
pub use encoder::{BmcEncoder, CnfFormula, EncodingStatistics, Unrolling};
pub use tseitin::{dnf_to_cnf, TseitinOutput};
pub use variables::{bits_for_size, EncodingContext, Literal, PositionCodec};
