//! Interview stages and the triggers that move between them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One phase of the guided interview, in canonical order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Dimensions,
    Domain,
    Unknowns,
    Parameters,
    Pdes,
    BoundaryConditions,
    Properties,
    Solve,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Dimensions,
        Stage::Domain,
        Stage::Unknowns,
        Stage::Parameters,
        Stage::Pdes,
        Stage::BoundaryConditions,
        Stage::Properties,
        Stage::Solve,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Dimensions => "dimensions",
            Stage::Domain => "domain",
            Stage::Unknowns => "unknowns",
            Stage::Parameters => "parameters",
            Stage::Pdes => "pdes",
            Stage::BoundaryConditions => "boundary_conditions",
            Stage::Properties => "properties",
            Stage::Solve => "solve",
        }
    }

    /// The stage immediately before this one in canonical order.
    ///
    /// This ignores how the current stage was reached.
    #[must_use]
    pub const fn predecessor(self) -> Option<Stage> {
        match self {
            Stage::Dimensions => None,
            Stage::Domain => Some(Stage::Dimensions),
            Stage::Unknowns => Some(Stage::Domain),
            Stage::Parameters => Some(Stage::Unknowns),
            Stage::Pdes => Some(Stage::Parameters),
            Stage::BoundaryConditions => Some(Stage::Pdes),
            Stage::Properties => Some(Stage::BoundaryConditions),
            Stage::Solve => Some(Stage::Properties),
        }
    }

    /// The forward trigger whose source is this stage.
    #[must_use]
    pub const fn forward_trigger(self) -> Trigger {
        match self {
            Stage::Dimensions => Trigger::DimensionsParsed,
            Stage::Domain => Trigger::DomainParsed,
            Stage::Unknowns => Trigger::UnknownsParsed,
            Stage::Parameters => Trigger::ParametersParsed,
            Stage::Pdes => Trigger::PdesParsed,
            Stage::BoundaryConditions => Trigger::BoundaryConditionsParsed,
            Stage::Properties => Trigger::PropertiesParsed,
            Stage::Solve => Trigger::SolveFinished,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named transition event.
///
/// Each forward trigger is wired from exactly one source stage to exactly one
/// destination. `Undo` is wired over the reverse of the whole ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    DimensionsParsed,
    DomainParsed,
    UnknownsParsed,
    ParametersParsed,
    PdesParsed,
    BoundaryConditionsParsed,
    PropertiesParsed,
    SolveFinished,
    Undo,
}

impl Trigger {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Trigger::DimensionsParsed => "dimensions_parsed",
            Trigger::DomainParsed => "domain_parsed",
            Trigger::UnknownsParsed => "unknowns_parsed",
            Trigger::ParametersParsed => "parameters_parsed",
            Trigger::PdesParsed => "pdes_parsed",
            Trigger::BoundaryConditionsParsed => "boundary_conditions_parsed",
            Trigger::PropertiesParsed => "properties_parsed",
            Trigger::SolveFinished => "solve_finished",
            Trigger::Undo => "undo",
        }
    }

    /// Source and destination of a forward trigger. `None` for `Undo`.
    #[must_use]
    pub const fn edge(self) -> Option<(Stage, Stage)> {
        let edge = match self {
            Trigger::DimensionsParsed => (Stage::Dimensions, Stage::Domain),
            Trigger::DomainParsed => (Stage::Domain, Stage::Unknowns),
            Trigger::UnknownsParsed => (Stage::Unknowns, Stage::Parameters),
            Trigger::ParametersParsed => (Stage::Parameters, Stage::Pdes),
            Trigger::PdesParsed => (Stage::Pdes, Stage::BoundaryConditions),
            Trigger::BoundaryConditionsParsed => (Stage::BoundaryConditions, Stage::Properties),
            Trigger::PropertiesParsed => (Stage::Properties, Stage::Solve),
            Trigger::SolveFinished => (Stage::Solve, Stage::Solve),
            Trigger::Undo => return None,
        };
        Some(edge)
    }

    /// Where this trigger leads when fired from `current`, if it is wired there.
    #[must_use]
    pub const fn destination_from(self, current: Stage) -> Option<Stage> {
        match self.edge() {
            Some((source, destination)) if source as usize == current as usize => {
                Some(destination)
            }
            Some(_) => None,
            None => current.predecessor(),
        }
    }

    /// Whether firing this trigger first emits a blank line for display pacing.
    #[must_use]
    pub const fn paces_output(self) -> bool {
        !matches!(
            self,
            Trigger::UnknownsParsed | Trigger::ParametersParsed | Trigger::Undo
        )
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
