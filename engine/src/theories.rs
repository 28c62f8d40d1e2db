//! Names of the theories the interview builds on.

use mosis_types::Stage;

pub const REAL_ARITHMETICS: &str = "http://mathhub.info/MitM/smglom/arithmetics?RealArithmetics";
pub const STRINGS: &str = "http://mathhub.info/MitM/Foundation?Strings";
pub const MATH: &str = "http://mathhub.info/MitM/Foundation?Math";
pub const INTERVAL: &str = "mInterval";
pub const DIFFERENTIAL_OPERATORS: &str = "mDifferentialOperators";
pub const FUNCTION_ARITHMETICS: &str = "mFunctionArithmetics";
pub const LINEARITY: &str = "mLinearity";
pub const BC_TYPES: &str = "mBCTypes";

pub const DOMAIN_THEORY: &str = "ephdomain";
pub const BCS_THEORY: &str = "ephbcs";
pub const PROBLEM_THEORY: &str = "ephBoundaryValueProblem";

pub const DOMAIN_VIEW: &str = "mDomain";
pub const UNKNOWN_VIEW: &str = "mUnknown";
pub const PARAMETER_VIEW: &str = "mParameter";
pub const PDE_VIEW: &str = "mPDE";
pub const BCS_VIEW: &str = "mBCsRequired";
pub const PROPERTIES_VIEW: &str = "mEllipticLinearDirichletBoundaryValueProblem";
pub const SOLVE_VIEW: &str = "mSolvability";

/// Included into every theory a stage creates.
#[must_use]
pub fn background(stage: Stage) -> &'static [&'static str] {
    match stage {
        Stage::Dimensions => &[],
        Stage::Domain => &[INTERVAL, REAL_ARITHMETICS],
        Stage::Unknowns => &[STRINGS, DOMAIN_THEORY],
        Stage::Parameters => &[REAL_ARITHMETICS, DOMAIN_THEORY, MATH],
        Stage::Pdes => &[DIFFERENTIAL_OPERATORS, FUNCTION_ARITHMETICS],
        Stage::BoundaryConditions => &[
            DOMAIN_THEORY,
            LINEARITY,
            DIFFERENTIAL_OPERATORS,
            REAL_ARITHMETICS,
        ],
        Stage::Properties => &[LINEARITY, STRINGS],
        Stage::Solve => &[STRINGS],
    }
}

/// The template theory a stage's views start from.
#[must_use]
pub fn view_template(stage: Stage) -> Option<&'static str> {
    match stage {
        Stage::Dimensions => None,
        Stage::Domain => Some(DOMAIN_VIEW),
        Stage::Unknowns => Some(UNKNOWN_VIEW),
        Stage::Parameters => Some(PARAMETER_VIEW),
        Stage::Pdes => Some(PDE_VIEW),
        Stage::BoundaryConditions => Some(BCS_VIEW),
        Stage::Properties => Some(PROPERTIES_VIEW),
        Stage::Solve => Some(SOLVE_VIEW),
    }
}
