//! Tseitin transformation of a DNF transition formula into CNF
//!
//! Each conjunction `C_j` gets an auxiliary variable `p_j` with `p_j <-> C_j`:
//!
//! - `p_j -> C_j` becomes one binary clause `(-p_j | l)` per literal `l` of `C_j`
//! - `C_j -> p_j` becomes `(-l_1 | ... | -l_m | p_j)`
//!
//! and a final clause `(p_0 | ... | p_{k-1})` asserts the disjunction. The
//! result is equisatisfiable with the DNF, and any model of it restricted to
//! the original variables is a model of the DNF.

use super::constraints::{Clause, Conjunction};
use super::variables::make_literal;
use crate::error::EncodingResult;

/// CNF produced for one DNF formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TseitinOutput {
    /// Auxiliary variables consumed, always one per conjunction
    pub auxiliaries: usize,
    pub clauses: Vec<Clause>,
}

/// Transform `dnf` with auxiliaries numbered from `offset`
pub fn dnf_to_cnf(dnf: &[Conjunction], offset: usize) -> EncodingResult<TseitinOutput> {
    let mut clauses = Vec::with_capacity(cnf_clause_count(dnf));
    let auxiliaries = dnf_to_cnf_into(dnf, offset, &mut clauses)?;
    Ok(TseitinOutput { auxiliaries, clauses })
}

/// Same as [`dnf_to_cnf`], appending into an existing clause list.
///
/// Returns the number of auxiliary variables consumed.
pub fn dnf_to_cnf_into(
    dnf: &[Conjunction],
    offset: usize,
    clauses: &mut Vec<Clause>,
) -> EncodingResult<usize> {
    let mut selectors = Vec::with_capacity(dnf.len());

    for (j, conjunction) in dnf.iter().enumerate() {
        let p = make_literal(offset + j, true)?;

        for &lit in &conjunction.literals {
            clauses.push(Clause::binary(-p, lit));
        }

        let mut reverse: Vec<_> = conjunction.literals.iter().map(|&lit| -lit).collect();
        reverse.push(p);
        clauses.push(Clause::new(reverse));

        selectors.push(p);
    }

    // Empty for an empty DNF, which is exactly "false"
    clauses.push(Clause::new(selectors));

    Ok(dnf.len())
}

/// Number of clauses [`dnf_to_cnf`] emits for `dnf`
pub fn cnf_clause_count(dnf: &[Conjunction]) -> usize {
    dnf.iter().map(|c| c.literals.len() + 1).sum::<usize>() + 1
}
