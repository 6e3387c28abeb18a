//! Move-by-move checks on a decoded path

use super::MazePath;
use crate::maze::Maze;
use std::fmt;

/// Checks a decoded path against the maze it was encoded from
pub struct PathValidator<'m> {
    maze: &'m Maze,
}

/// A single problem found in a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathViolation {
    SizeMismatch { path_size: usize, maze_size: usize },
    Empty,
    WrongStart { found: (usize, usize) },
    WrongGoal { found: (usize, usize) },
    OutOfBounds { step: usize, position: (usize, usize) },
    BlockedCell { step: usize, position: (usize, usize) },
    IllegalMove { step: usize, from: (usize, usize), to: (usize, usize) },
}

impl fmt::Display for PathViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathViolation::SizeMismatch { path_size, maze_size } => write!(
                f,
                "path was decoded for a {}x{} maze, maze is {}x{}",
                path_size, path_size, maze_size, maze_size
            ),
            PathViolation::Empty => write!(f, "path has no positions"),
            PathViolation::WrongStart { found } => {
                write!(f, "path starts at {:?} instead of (0, 0)", found)
            }
            PathViolation::WrongGoal { found } => write!(f, "path ends at {:?}", found),
            PathViolation::OutOfBounds { step, position } => {
                write!(f, "step {} is outside the maze at {:?}", step, position)
            }
            PathViolation::BlockedCell { step, position } => {
                write!(f, "step {} stands on blocked cell {:?}", step, position)
            }
            PathViolation::IllegalMove { step, from, to } => {
                write!(f, "move {} jumps from {:?} to {:?}", step, from, to)
            }
        }
    }
}

/// Result of path validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub steps_checked: usize,
    pub violations: Vec<PathViolation>,
}

impl<'m> PathValidator<'m> {
    pub fn new(maze: &'m Maze) -> Self {
        Self { maze }
    }

    /// Check that the path starts at `(0, 0)`, ends at `(n-1, n-1)`, stays on
    /// free cells and makes one orthogonal move per step
    pub fn validate(&self, path: &MazePath) -> ValidationResult {
        let mut violations = Vec::new();

        if path.size != self.maze.size {
            violations.push(PathViolation::SizeMismatch {
                path_size: path.size,
                maze_size: self.maze.size,
            });
        }

        match (path.start(), path.end()) {
            (Some(start), Some(end)) => {
                if start != self.maze.start() {
                    violations.push(PathViolation::WrongStart { found: start });
                }
                if end != self.maze.goal() {
                    violations.push(PathViolation::WrongGoal { found: end });
                }
            }
            _ => violations.push(PathViolation::Empty),
        }

        for (step, &position) in path.positions.iter().enumerate() {
            match self.maze.get(position.0, position.1) {
                None => violations.push(PathViolation::OutOfBounds { step, position }),
                Some(cell) if !cell.is_free() => {
                    violations.push(PathViolation::BlockedCell { step, position })
                }
                Some(_) => {}
            }
        }

        for (i, pair) in path.positions.windows(2).enumerate() {
            if !self.maze.are_adjacent(pair[0], pair[1]) {
                violations.push(PathViolation::IllegalMove {
                    step: i + 1,
                    from: pair[0],
                    to: pair[1],
                });
            }
        }

        ValidationResult {
            is_valid: violations.is_empty(),
            steps_checked: path.steps(),
            violations,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path Validation: {}", if self.is_valid { "VALID" } else { "INVALID" })?;
        writeln!(f, "  Steps checked: {}", self.steps_checked)?;

        if !self.violations.is_empty() {
            writeln!(f, "  Violations:")?;
            for violation in &self.violations {
                writeln!(f, "    - {}", violation)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::parse_maze_from_string;

    fn corridor() -> Maze {
        parse_maze_from_string("3\n000\n110\n000\n").unwrap()
    }

    #[test]
    fn test_valid_path() {
        let maze = corridor();
        let path = MazePath::new(3, vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]);
        let result = PathValidator::new(&maze).validate(&path);

        assert!(result.is_valid, "{}", result);
        assert_eq!(result.steps_checked, 4);
    }

    #[test]
    fn test_blocked_and_jumping_path() {
        let maze = corridor();
        let path = MazePath::new(3, vec![(0, 0), (1, 0), (2, 2)]);
        let result = PathValidator::new(&maze).validate(&path);

        assert!(!result.is_valid);
        assert!(result
            .violations
            .contains(&PathViolation::BlockedCell { step: 1, position: (1, 0) }));
        assert!(result.violations.contains(&PathViolation::IllegalMove {
            step: 2,
            from: (1, 0),
            to: (2, 2)
        }));
    }

    #[test]
    fn test_standing_still_is_illegal() {
        let maze = corridor();
        let path = MazePath::new(3, vec![(0, 0), (0, 0)]);
        let result = PathValidator::new(&maze).validate(&path);
        assert!(result
            .violations
            .iter()
            .any(|v| matches!(v, PathViolation::IllegalMove { step: 1, .. })));
        assert!(result.violations.contains(&PathViolation::WrongGoal { found: (0, 0) }));
    }

    #[test]
    fn test_empty_and_mismatched_path() {
        let maze = corridor();
        let result = PathValidator::new(&maze).validate(&MazePath::new(2, vec![]));

        assert_eq!(
            result.violations,
            vec![
                PathViolation::SizeMismatch { path_size: 2, maze_size: 3 },
                PathViolation::Empty,
            ]
        );
        assert!(result.to_string().contains("INVALID"));
    }
}
