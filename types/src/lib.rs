//! Core domain types for the MoSIS interview.
//!
//! This crate contains pure domain types with no IO and minimal dependencies:
//! the stage identifiers that drive the interview, the problem model the
//! interview fills in, and the two error kinds every stage is allowed to raise.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod error;
mod problem;
mod stage;

pub use error::{InterviewError, StoreError};
pub use problem::{
    AssertedProperty, AxisInterval, BoundaryCondition, BoundaryConditions, BoundaryKind, Domain,
    OperatorProperties, Parameter, Pde, ProblemModel, PropertyKind, QualitativeProperties,
    SolveConfig, SolveMethod, Unknown,
};
pub use stage::{Stage, Trigger};
