//! Clauses and the maze transition relation in DNF

use super::variables::{make_literal, EncodingContext, Literal};
use crate::error::{EncodingError, EncodingResult};

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    pub fn unit(literal: Literal) -> Self {
        Self { literals: vec![literal] }
    }

    pub fn binary(lit1: Literal, lit2: Literal) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// An empty clause can never be satisfied
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Largest variable index mentioned by the clause
    pub fn max_variable(&self) -> usize {
        self.literals
            .iter()
            .map(|lit| lit.unsigned_abs() as usize)
            .max()
            .unwrap_or(0)
    }
}

/// A conjunction of literals; one disjunct of a DNF formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conjunction {
    pub literals: Vec<Literal>,
}

impl Conjunction {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }
}

/// A slot of a transition template, not yet bound to a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Bit is unconstrained; produces no literal
    Omit,
    Positive,
    Negative,
}

impl Slot {
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Slot::Positive
        } else {
            Slot::Negative
        }
    }

    /// Bind the slot to a 1-based variable index
    pub fn bind(self, variable: usize) -> EncodingResult<Option<Literal>> {
        match self {
            Slot::Omit => Ok(None),
            Slot::Positive => make_literal(variable, true).map(Some),
            Slot::Negative => make_literal(variable, false).map(Some),
        }
    }
}

/// One move `current -> next`: `2 * num_bits` slots, current position bits
/// first, then next position bits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateClause {
    pub slots: Vec<Slot>,
}

/// Step-independent transition relation of a maze.
///
/// Holds one clause for every free cell and every free neighbour of it, in
/// row-major cell order and up/down/left/right neighbour order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTemplate {
    num_bits: usize,
    clauses: Vec<TemplateClause>,
}

impl TransitionTemplate {
    /// Build the template for the maze held by `context`
    pub fn build(context: &EncodingContext<'_>) -> EncodingResult<Self> {
        let maze = context.maze();
        let codec = context.codec();
        let mut clauses = Vec::new();

        for (row, col) in maze.free_cells() {
            let current = codec.encode(row, col)?;
            for (next_row, next_col) in maze.free_neighbors(row, col) {
                let next = codec.encode(next_row, next_col)?;
                let slots = current
                    .iter()
                    .chain(next.iter())
                    .map(|&bit| Slot::from_bit(bit))
                    .collect();
                clauses.push(TemplateClause { slots });
            }
        }

        Ok(Self {
            num_bits: context.num_bits(),
            clauses,
        })
    }

    /// Template with explicit clauses, e.g. for partially constrained moves
    pub fn from_clauses(num_bits: usize, clauses: Vec<TemplateClause>) -> EncodingResult<Self> {
        let expected = 2 * num_bits;
        if let Some((clause, bad)) = clauses
            .iter()
            .enumerate()
            .find(|(_, c)| c.slots.len() != expected)
        {
            return Err(EncodingError::MalformedTemplate {
                clause,
                expected,
                found: bad.slots.len(),
            });
        }
        Ok(Self { num_bits, clauses })
    }

    pub fn clauses(&self) -> &[TemplateClause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Bind the template to time step `step`: current-position slots go to
    /// block `step`, next-position slots to block `step + 1`.
    pub fn instantiate(&self, step: usize) -> EncodingResult<Vec<Conjunction>> {
        let current_base = step * self.num_bits + 1;
        let next_base = (step + 1) * self.num_bits + 1;

        self.clauses
            .iter()
            .map(|clause| {
                let mut literals = Vec::with_capacity(clause.slots.len());
                for (k, slot) in clause.slots.iter().enumerate() {
                    let base = if k < self.num_bits { current_base } else { next_base };
                    if let Some(lit) = slot.bind(base + k % self.num_bits)? {
                        literals.push(lit);
                    }
                }
                Ok(Conjunction::new(literals))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{parse_maze_from_string, Maze};

    use super::Slot::{Negative as N, Omit as O, Positive as P};

    #[test]
    fn test_clause_creation() {
        let clause = Clause::new(vec![1, -2, 3]);
        assert_eq!(clause.literals, vec![1, -2, 3]);
        assert!(!clause.is_empty());
        assert!(!clause.is_unit());
        assert_eq!(clause.max_variable(), 3);

        let unit_clause = Clause::unit(-5);
        assert!(unit_clause.is_unit());
        assert_eq!(unit_clause.max_variable(), 5);
        assert_eq!(Clause::binary(1, -4).literals, vec![1, -4]);
    }

    #[test]
    fn test_template_two_by_two() {
        let maze = Maze::open(2).unwrap();
        let context = EncodingContext::new(&maze).unwrap();
        let template = TransitionTemplate::build(&context).unwrap();

        // every cell has exactly two neighbours
        assert_eq!(template.len(), 8);
        // (0,0) -> down (1,0), then (0,0) -> right (0,1)
        assert_eq!(template.clauses()[0].slots, vec![N, N, P, N]);
        assert_eq!(template.clauses()[1].slots, vec![N, N, N, P]);
        // (1,1) -> up (0,1), then left (1,0)
        assert_eq!(template.clauses()[6].slots, vec![P, P, N, P]);
        assert_eq!(template.clauses()[7].slots, vec![P, P, P, N]);
    }

    #[test]
    fn test_template_skips_blocked_cells() {
        let maze = parse_maze_from_string("2\n01\n00\n").unwrap();
        let context = EncodingContext::new(&maze).unwrap();
        let template = TransitionTemplate::build(&context).unwrap();

        // (0,0)<->(1,0) and (1,0)<->(1,1)
        assert_eq!(template.len(), 4);
        assert!(template
            .clauses()
            .iter()
            .all(|c| c.slots[..2] != [N, P] && c.slots[2..] != [N, P]));
    }

    #[test]
    fn test_template_determinism() {
        let maze = parse_maze_from_string("4\n0000\n1010\n0000\n0110\n").unwrap();
        let context = EncodingContext::new(&maze).unwrap();
        let first = TransitionTemplate::build(&context).unwrap();
        let second = TransitionTemplate::build(&context).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_instantiate_offsets() {
        let maze = Maze::open(2).unwrap();
        let context = EncodingContext::new(&maze).unwrap();
        let template = TransitionTemplate::build(&context).unwrap();

        let step0 = template.instantiate(0).unwrap();
        assert_eq!(step0.len(), 8);
        assert_eq!(step0[0].literals, vec![-1, -2, 3, -4]);
        assert_eq!(step0[1].literals, vec![-1, -2, -3, 4]);

        let step2 = template.instantiate(2).unwrap();
        assert_eq!(step2[0].literals, vec![-5, -6, 7, -8]);
    }

    #[test]
    fn test_instantiate_drops_omitted_slots() {
        let template = TransitionTemplate::from_clauses(
            2,
            vec![TemplateClause { slots: vec![P, O, O, N] }],
        )
        .unwrap();
        let dnf = template.instantiate(1).unwrap();
        assert_eq!(dnf, vec![Conjunction::new(vec![3, -6])]);
        assert!(dnf[0].literals.iter().all(|&lit| lit != 0));
    }

    #[test]
    fn test_from_clauses_checks_slot_count() {
        // a sixth slot would spill past block step + 1
        let result = TransitionTemplate::from_clauses(
            2,
            vec![
                TemplateClause { slots: vec![P, O, O, N] },
                TemplateClause { slots: vec![P, O, O, N, P, P] },
            ],
        );
        assert!(matches!(
            result,
            Err(EncodingError::MalformedTemplate { clause: 1, expected: 4, found: 6 })
        ));
        assert!(TransitionTemplate::from_clauses(2, vec![TemplateClause { slots: vec![P] }]).is_err());
    }
}
