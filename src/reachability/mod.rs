//! Maze reachability: problem driver, decoded paths and their validation

pub mod decoder;
pub mod path;
pub mod problem;
pub mod validator;

pub use decoder::AssignmentDecoder;
pub use path::MazePath;
pub use problem::{decode_solver_model, MazeProblem};
pub use validator::{PathValidator, PathViolation, ValidationResult};
