//! Model search used by the encoding tests

use super::constraints::{Clause, Conjunction};
use super::variables::Literal;

fn literal_value(lit: Literal, assignment: &[bool]) -> bool {
    let value = assignment[lit.unsigned_abs() as usize - 1];
    if lit > 0 {
        value
    } else {
        !value
    }
}

/// Whether `assignment` (index 0 is variable 1) satisfies every clause
pub fn satisfies(clauses: &[Clause], assignment: &[bool]) -> bool {
    clauses
        .iter()
        .all(|clause| clause.literals.iter().any(|&lit| literal_value(lit, assignment)))
}

pub fn evaluate_dnf(dnf: &[Conjunction], assignment: &[bool]) -> bool {
    dnf.iter()
        .any(|c| c.literals.iter().all(|&lit| literal_value(lit, assignment)))
}

/// Exhaustive search with unit propagation. Decisions follow variable
/// order, so position blocks are fixed before the auxiliaries.
pub fn find_model(num_variables: usize, clauses: &[Clause]) -> Option<Vec<bool>> {
    search(vec![None; num_variables], clauses)
}

fn literal_state(lit: Literal, partial: &[Option<bool>]) -> Option<bool> {
    partial[lit.unsigned_abs() as usize - 1].map(|value| value == (lit > 0))
}

/// Assign every forced literal; `false` on conflict
fn propagate(partial: &mut [Option<bool>], clauses: &[Clause]) -> bool {
    loop {
        let mut changed = false;
        for clause in clauses {
            let mut open = None;
            let mut open_count = 0;
            let mut satisfied = false;
            for &lit in &clause.literals {
                match literal_state(lit, partial) {
                    Some(true) => {
                        satisfied = true;
                        break;
                    }
                    Some(false) => {}
                    None => {
                        open = Some(lit);
                        open_count += 1;
                    }
                }
            }
            if satisfied {
                continue;
            }
            match (open_count, open) {
                (0, _) => return false,
                (1, Some(lit)) => {
                    partial[lit.unsigned_abs() as usize - 1] = Some(lit > 0);
                    changed = true;
                }
                _ => {}
            }
        }
        if !changed {
            return true;
        }
    }
}

fn search(mut partial: Vec<Option<bool>>, clauses: &[Clause]) -> Option<Vec<bool>> {
    if !propagate(&mut partial, clauses) {
        return None;
    }
    let Some(next) = partial.iter().position(Option::is_none) else {
        return Some(partial.into_iter().map(|v| v.unwrap_or(false)).collect());
    };
    for value in [false, true] {
        let mut branch = partial.clone();
        branch[next] = Some(value);
        if let Some(model) = search(branch, clauses) {
            return Some(model);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_model() {
        let clauses = vec![Clause::binary(1, 2), Clause::unit(-1)];
        let model = find_model(2, &clauses).unwrap();
        assert_eq!(model, vec![false, true]);
        assert!(satisfies(&clauses, &model));

        let contradiction = vec![Clause::unit(1), Clause::unit(-1)];
        assert!(find_model(1, &contradiction).is_none());
        assert!(find_model(0, &[Clause::new(vec![])]).is_none());
    }
}
