//! Bounded model checking encoder for maze reachability

use super::constraints::{Clause, Slot, TransitionTemplate};
use super::tseitin::dnf_to_cnf_into;
use super::variables::{EncodingContext, Literal, PositionCodec};
use crate::error::{EncodingError, EncodingResult};
use crate::maze::Maze;
use std::ops::Range;
use tracing::{debug, info, warn};

/// A CNF formula ready for DIMACS serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnfFormula {
    /// Declared variable count; every literal's magnitude is at most this
    pub num_variables: usize,
    pub clauses: Vec<Clause>,
}

impl CnfFormula {
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
}

/// Raw result of unrolling the transition relation
#[derive(Debug, Clone)]
pub struct Unrolling {
    /// One past the highest variable used
    pub final_offset: usize,
    pub clauses: Vec<Clause>,
    /// Auxiliary variables introduced for each step, in step order
    pub step_auxiliaries: Vec<Range<usize>>,
}

impl Unrolling {
    pub fn into_formula(self) -> CnfFormula {
        CnfFormula {
            num_variables: self.final_offset - 1,
            clauses: self.clauses,
        }
    }
}

/// Unrolls a maze's transition relation over a fixed number of steps
pub struct BmcEncoder<'m> {
    context: EncodingContext<'m>,
    template: TransitionTemplate,
    num_steps: usize,
    statistics: EncodingStatistics,
}

impl<'m> BmcEncoder<'m> {
    /// Create an encoder asking for a path of exactly `num_steps` moves.
    ///
    /// Fails with `TooManyVariables` when the unrolled formula would need a
    /// variable past the `i32` literal range; nothing is allocated for the
    /// formula before this check.
    pub fn new(maze: &'m Maze, num_steps: usize) -> EncodingResult<Self> {
        let context = EncodingContext::new(maze)?;
        let template = TransitionTemplate::build(&context)?;
        let statistics = Self::count(&context, &template, num_steps)?;
        if statistics.total_variables > Literal::MAX as usize {
            return Err(EncodingError::TooManyVariables {
                required: statistics.total_variables,
            });
        }

        debug!(
            size = maze.size,
            num_bits = context.num_bits(),
            template_clauses = template.len(),
            "built transition template"
        );
        if template.is_empty() && num_steps > 0 {
            warn!("maze has no legal moves; every step will be unsatisfiable");
        }
        if !maze.is_free(0, 0) {
            warn!("start cell (0, 0) is blocked");
        }
        let goal = maze.goal();
        if !maze.is_free(goal.0, goal.1) {
            warn!(row = goal.0, col = goal.1, "goal cell is blocked");
        }

        Ok(Self {
            context,
            template,
            num_steps,
            statistics,
        })
    }

    pub fn context(&self) -> &EncodingContext<'m> {
        &self.context
    }

    pub fn codec(&self) -> &PositionCodec {
        self.context.codec()
    }

    pub fn template(&self) -> &TransitionTemplate {
        &self.template
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// First auxiliary variable, just past every position block
    pub fn first_auxiliary(&self) -> usize {
        self.statistics.position_variables + 1
    }

    /// Unroll the transition relation and append the boundary clauses
    pub fn unroll(&self) -> EncodingResult<Unrolling> {
        let mut clauses: Vec<Clause> = Vec::new();
        if clauses.try_reserve_exact(self.statistics.total_clauses).is_err() {
            debug!(
                clauses = self.statistics.total_clauses,
                "clause buffer not reserved up front"
            );
        }
        let mut step_auxiliaries = Vec::new();
        let mut tseitin_offset = self.first_auxiliary();

        for step in 0..self.num_steps {
            let dnf = self.template.instantiate(step)?;
            let used = dnf_to_cnf_into(&dnf, tseitin_offset, &mut clauses)?;
            step_auxiliaries.push(tseitin_offset..tseitin_offset + used);
            tseitin_offset += used;
            debug!(step, auxiliaries = used, clauses = clauses.len(), "unrolled step");
        }

        clauses.extend(self.initial_state_clauses()?);
        clauses.extend(self.goal_state_clauses()?);

        info!(
            steps = self.num_steps,
            variables = tseitin_offset - 1,
            clauses = clauses.len(),
            "encoded maze reachability"
        );

        Ok(Unrolling {
            final_offset: tseitin_offset,
            clauses,
            step_auxiliaries,
        })
    }

    /// Build the complete formula
    pub fn encode(&self) -> EncodingResult<CnfFormula> {
        Ok(self.unroll()?.into_formula())
    }

    /// Unit clauses pinning block 0 to the start cell `(0, 0)`
    pub fn initial_state_clauses(&self) -> EncodingResult<Vec<Clause>> {
        let (row, col) = self.context.maze().start();
        Ok(self
            .codec()
            .pin_literals(0, row, col)?
            .into_iter()
            .map(Clause::unit)
            .collect())
    }

    /// Unit clauses pinning block `num_steps` to the goal cell `(n-1, n-1)`
    pub fn goal_state_clauses(&self) -> EncodingResult<Vec<Clause>> {
        let (row, col) = self.context.maze().goal();
        Ok(self
            .codec()
            .pin_literals(self.num_steps, row, col)?
            .into_iter()
            .map(Clause::unit)
            .collect())
    }

    /// Sizes of the formula, computed without building it
    pub fn statistics(&self) -> EncodingStatistics {
        self.statistics.clone()
    }

    fn count(
        context: &EncodingContext<'_>,
        template: &TransitionTemplate,
        num_steps: usize,
    ) -> EncodingResult<EncodingStatistics> {
        let too_many = EncodingError::TooManyVariables { required: usize::MAX };
        let maze = context.maze();
        let num_bits = context.num_bits();
        let dnf_clauses = template.len();
        let per_step_clauses = template
            .clauses()
            .iter()
            .map(|c| c.slots.iter().filter(|&&slot| slot != Slot::Omit).count() + 1)
            .sum::<usize>()
            + 1;
        let position_variables = context.codec().position_variable_count(num_steps)?;
        let auxiliary_variables = dnf_clauses.checked_mul(num_steps).ok_or(too_many.clone())?;
        let total_variables = position_variables
            .checked_add(auxiliary_variables)
            .ok_or(too_many.clone())?;
        let total_clauses = per_step_clauses
            .checked_mul(num_steps)
            .and_then(|clauses| clauses.checked_add(2 * num_bits))
            .ok_or(too_many)?;

        Ok(EncodingStatistics {
            maze_size: maze.size,
            free_cells: maze.free_count(),
            num_bits,
            steps: num_steps,
            template_clauses: dnf_clauses,
            position_variables,
            auxiliary_variables,
            total_variables,
            total_clauses,
        })
    }

    /// Human-readable description of the variable layout, one line per entry
    pub fn layout_description(&self) -> Vec<String> {
        let codec = self.codec();
        let mut lines = vec![format!(
            "maze {}x{}, {} bits per position, {} steps",
            codec.size(),
            codec.size(),
            codec.num_bits(),
            self.num_steps
        )];
        for step in 0..=self.num_steps {
            let range = codec.block_range(step);
            lines.push(format!(
                "step {} position: variables {}..={}",
                step,
                range.start(),
                range.end()
            ));
        }
        if self.num_steps > 0 && !self.template.is_empty() {
            lines.push(format!(
                "transition auxiliaries: variables {}..={}",
                self.first_auxiliary(),
                self.statistics.total_variables
            ));
        }
        lines
    }
}

/// Statistics about the SAT encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingStatistics {
    pub maze_size: usize,
    pub free_cells: usize,
    pub num_bits: usize,
    pub steps: usize,
    pub template_clauses: usize,
    pub position_variables: usize,
    pub auxiliary_variables: usize,
    pub total_variables: usize,
    pub total_clauses: usize,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics:")?;
        writeln!(f, "  Maze: {}x{} ({} free cells)", self.maze_size, self.maze_size, self.free_cells)?;
        writeln!(f, "  Bits per position: {}", self.num_bits)?;
        writeln!(f, "  Steps: {}", self.steps)?;
        writeln!(f, "  Transition clauses per step: {}", self.template_clauses)?;
        writeln!(f, "  Position variables: {}", self.position_variables)?;
        writeln!(f, "  Auxiliary variables: {}", self.auxiliary_variables)?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::parse_maze_from_string;
    use crate::sat::testing::find_model;
    use std::collections::HashSet;

    #[test]
    fn test_two_by_two_single_step() {
        let maze = Maze::open(2).unwrap();
        let encoder = BmcEncoder::new(&maze, 1).unwrap();
        let unrolling = encoder.unroll().unwrap();

        // 2 blocks of 2 bits, then one auxiliary per template clause
        assert_eq!(encoder.first_auxiliary(), 5);
        assert_eq!(unrolling.final_offset, 13);
        assert_eq!(unrolling.step_auxiliaries, vec![5..13]);
        // 8 conjunctions of 4 literals: 8 * 5 + 1, plus 4 boundary units
        assert_eq!(unrolling.clauses.len(), 45);

        let tail: Vec<_> = unrolling.clauses[41..].to_vec();
        assert_eq!(
            tail,
            vec![Clause::unit(-1), Clause::unit(-2), Clause::unit(3), Clause::unit(4)]
        );

        // (0,0) and (1,1) are not adjacent
        let formula = unrolling.into_formula();
        assert_eq!(formula.num_variables, 12);
        assert!(find_model(formula.num_variables, &formula.clauses).is_none());
    }

    #[test]
    fn test_two_by_two_two_steps_is_satisfiable() {
        let maze = Maze::open(2).unwrap();
        let encoder = BmcEncoder::new(&maze, 2).unwrap();
        let formula = encoder.encode().unwrap();

        assert_eq!(formula.num_variables, 3 * 2 + 2 * 8);
        let model = find_model(formula.num_variables, &formula.clauses).unwrap();

        let codec = encoder.codec();
        let positions: Vec<_> = (0..=2)
            .map(|step| {
                let bits = &model[(codec.block_base(step) - 1)..codec.block_base(step + 1) - 1];
                codec.decode(bits).unwrap()
            })
            .collect();
        assert_eq!(positions[0], (0, 0));
        assert_eq!(positions[2], (1, 1));
        assert!(positions[1] == (0, 1) || positions[1] == (1, 0));
    }

    #[test]
    fn test_boundary_clauses() {
        let maze = Maze::open(3).unwrap();
        let encoder = BmcEncoder::new(&maze, 4).unwrap();

        // (0, 0) = 0000 in block 0
        let initial: Vec<_> = encoder
            .initial_state_clauses()
            .unwrap()
            .into_iter()
            .map(|c| c.literals)
            .collect();
        assert_eq!(initial, vec![vec![-1], vec![-2], vec![-3], vec![-4]]);

        // (2, 2) = 1000 in block 4
        let goal: Vec<_> = encoder
            .goal_state_clauses()
            .unwrap()
            .into_iter()
            .map(|c| c.literals)
            .collect();
        assert_eq!(goal, vec![vec![17], vec![-18], vec![-19], vec![-20]]);
    }

    #[test]
    fn test_variable_roles_are_disjoint() {
        let maze = parse_maze_from_string("3\n000\n010\n000\n").unwrap();
        let steps = 3;
        let encoder = BmcEncoder::new(&maze, steps).unwrap();
        let unrolling = encoder.unroll().unwrap();

        let mut seen = HashSet::new();
        for step in 0..=steps {
            for var in encoder.codec().block_range(step) {
                assert!(seen.insert(var), "variable {} reused by block {}", var, step);
            }
        }
        for range in &unrolling.step_auxiliaries {
            assert_eq!(range.len(), encoder.template().len());
            for var in range.clone() {
                assert!(seen.insert(var), "auxiliary {} collides", var);
            }
        }

        // every variable below the final offset has exactly one role
        assert_eq!(seen.len(), unrolling.final_offset - 1);
        assert!(seen.iter().all(|&v| v >= 1 && v < unrolling.final_offset));
        assert!(unrolling
            .clauses
            .iter()
            .all(|c| c.max_variable() < unrolling.final_offset && !c.literals.contains(&0)));
    }

    #[test]
    fn test_statistics_match_formula() {
        let maze = parse_maze_from_string("4\n0000\n1110\n0000\n0110\n").unwrap();
        let encoder = BmcEncoder::new(&maze, 6).unwrap();
        let stats = encoder.statistics();
        let formula = encoder.encode().unwrap();

        assert_eq!(stats.num_bits, 4);
        assert_eq!(stats.free_cells, 11);
        assert_eq!(stats.total_variables, formula.num_variables);
        assert_eq!(stats.total_clauses, formula.num_clauses());
    }

    #[test]
    fn test_corridor_needs_six_moves() {
        let maze = parse_maze_from_string("4\n0000\n1110\n0000\n0110\n").unwrap();

        let short = BmcEncoder::new(&maze, 5).unwrap().encode().unwrap();
        assert!(find_model(short.num_variables, &short.clauses).is_none());

        let exact = BmcEncoder::new(&maze, 6).unwrap().encode().unwrap();
        assert!(find_model(exact.num_variables, &exact.clauses).is_some());
    }

    #[test]
    fn test_zero_steps() {
        // start and goal coincide only on a 1x1 maze
        let single = Maze::open(1).unwrap();
        let formula = BmcEncoder::new(&single, 0).unwrap().encode().unwrap();
        assert_eq!(formula.num_variables, 1);
        assert_eq!(formula.clauses, vec![Clause::unit(-1), Clause::unit(-1)]);

        let maze = Maze::open(2).unwrap();
        let formula = BmcEncoder::new(&maze, 0).unwrap().encode().unwrap();
        assert_eq!(formula.num_variables, 2);
        assert!(find_model(formula.num_variables, &formula.clauses).is_none());
    }

    #[test]
    fn test_step_count_past_literal_range() {
        let maze = Maze::open(2).unwrap();
        assert!(matches!(
            BmcEncoder::new(&maze, usize::MAX),
            Err(EncodingError::TooManyVariables { .. })
        ));

        // 2 position bits plus 8 auxiliaries per step, 2 bits for the start
        let limit = (i32::MAX as usize - 2) / 10;
        let largest = BmcEncoder::new(&maze, limit).unwrap();
        assert!(largest.statistics().total_variables <= i32::MAX as usize);
        assert!(matches!(
            BmcEncoder::new(&maze, limit + 1),
            Err(EncodingError::TooManyVariables { required }) if required > i32::MAX as usize
        ));
    }

    #[test]
    fn test_layout_description() {
        let maze = Maze::open(2).unwrap();
        let encoder = BmcEncoder::new(&maze, 1).unwrap();
        let lines = encoder.layout_description();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "step 0 position: variables 1..=2");
        assert_eq!(lines[3], "transition auxiliaries: variables 5..=12");
    }
}
