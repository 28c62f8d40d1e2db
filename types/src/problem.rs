//! The problem model an interview fills in, one sub-structure per stage.
//!
//! All records are ordered `Vec`s keyed by a `name` field: declaration order
//! matters for includes and parameter expansion.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::{InterviewError, Stage};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemModel {
    pub dimension_count: Option<NonZeroU32>,
    pub domain: Domain,
    pub unknowns: Vec<Unknown>,
    pub parameters: Vec<Parameter>,
    pub pdes: Vec<Pde>,
    pub boundary_conditions: BoundaryConditions,
    pub qualitative_properties: QualitativeProperties,
    pub solve_config: SolveConfig,
}

impl ProblemModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total boundary measure needed before the boundary stage may exit.
    #[must_use]
    pub fn required_boundary_measure(&self) -> u32 {
        2 * self.unknowns.len() as u32
    }

    /// Every view created so far, in stage order.
    #[must_use]
    pub fn view_refs(&self) -> Vec<&str> {
        let mut views = Vec::new();
        views.extend(self.domain.view_ref.as_deref());
        views.extend(self.unknowns.iter().filter_map(|u| u.view_ref.as_deref()));
        views.extend(self.parameters.iter().filter_map(|p| p.view_ref.as_deref()));
        views.extend(self.pdes.iter().filter_map(|p| p.view_ref.as_deref()));
        views.extend(self.boundary_conditions.view_ref.as_deref());
        views.extend(self.qualitative_properties.view_ref.as_deref());
        views
    }

    /// JSON rendering of one stage's sub-structure, for recaps.
    #[must_use]
    pub fn stage_summary(&self, stage: Stage) -> Option<String> {
        let rendered = match stage {
            Stage::Dimensions => serde_json::to_string(&self.dimension_count),
            Stage::Domain => serde_json::to_string(&self.domain),
            Stage::Unknowns => serde_json::to_string(&self.unknowns),
            Stage::Parameters => serde_json::to_string(&self.parameters),
            Stage::Pdes => serde_json::to_string(&self.pdes),
            Stage::BoundaryConditions => serde_json::to_string(&self.boundary_conditions),
            Stage::Properties => serde_json::to_string(&self.qualitative_properties),
            Stage::Solve => serde_json::to_string(&self.solve_config),
        };
        rendered.ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: Option<String>,
    pub store_ref: Option<String>,
    pub view_ref: Option<String>,
    pub axis_intervals: Vec<AxisInterval>,
    pub lower_bound: Option<String>,
    pub upper_bound: Option<String>,
    /// Only set once the domain stage's exit hook has run.
    pub boundary_name: Option<String>,
}

impl Domain {
    pub fn declared_name(&self) -> Result<&str, InterviewError> {
        self.name
            .as_deref()
            .ok_or_else(|| InterviewError::new("No domain has been declared yet."))
    }

    pub fn boundary(&self) -> Result<&str, InterviewError> {
        self.boundary_name
            .as_deref()
            .ok_or_else(|| InterviewError::new("The domain's boundary is not known yet."))
    }

    #[must_use]
    pub fn interval(&self, axis: &str) -> Option<&str> {
        self.axis_intervals
            .iter()
            .find(|entry| entry.axis == axis)
            .map(|entry| entry.interval.as_str())
    }

    /// Set an axis interval, keeping the axis' original position if present.
    pub fn set_interval(&mut self, axis: impl Into<String>, interval: impl Into<String>) {
        let axis = axis.into();
        let interval = interval.into();
        match self.axis_intervals.iter_mut().find(|entry| entry.axis == axis) {
            Some(entry) => entry.interval = interval,
            None => self.axis_intervals.push(AxisInterval { axis, interval }),
        }
    }

    #[must_use]
    pub fn is_bound(&self, point: &str) -> bool {
        self.lower_bound.as_deref() == Some(point) || self.upper_bound.as_deref() == Some(point)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisInterval {
    pub axis: String,
    pub interval: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unknown {
    pub name: String,
    pub store_ref: String,
    pub view_ref: Option<String>,
    pub declaration_string: String,
    pub inferred_type: String,
    pub codomain: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub store_ref: String,
    pub view_ref: Option<String>,
    pub raw_string: String,
    pub normalized_string: String,
    pub inferred_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pde {
    pub store_ref: String,
    pub view_ref: Option<String>,
    pub raw_string: String,
    pub lhs: String,
    pub rhs: String,
    pub rhs_expanded: String,
    pub differential_operator: String,
    /// Left-hand side as submitted to the store, binders included.
    pub lhs_normalized: String,
    pub rhs_normalized: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryConditions {
    pub store_ref: Option<String>,
    pub view_ref: Option<String>,
    pub conditions: Vec<BoundaryCondition>,
    pub measure_given: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryCondition {
    pub name: String,
    pub raw_string: String,
    pub lhs: String,
    pub rhs: String,
    pub rhs_expanded: String,
    pub kind: Option<BoundaryKind>,
    /// The evaluation point, or the bound variable for whole-boundary data.
    pub location: Option<String>,
    pub measure_weight: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryKind {
    Dirichlet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitativeProperties {
    pub store_ref: Option<String>,
    pub view_ref: Option<String>,
    pub operators: Vec<OperatorProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorProperties {
    pub operator: String,
    pub properties: Vec<AssertedProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertedProperty {
    pub kind: PropertyKind,
    pub negated: bool,
    pub statement: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Linear,
    Elliptic,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 2] = [PropertyKind::Linear, PropertyKind::Elliptic];

    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            PropertyKind::Linear => "linear",
            PropertyKind::Elliptic => "elliptic",
        }
    }

    /// Name of the view constant an asserted (non-negated) property is assigned to.
    #[must_use]
    pub const fn view_constant(self) -> &'static str {
        match self {
            PropertyKind::Linear => "isLinear",
            PropertyKind::Elliptic => "isElliptic",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveConfig {
    pub method: Option<SolveMethod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveMethod {
    FiniteDifferences,
}
