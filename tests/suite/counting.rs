//! "Enough input yet?" rules of the counting stages.

use mosis_engine::Stage;

use crate::common::{Session, UP_TO_SOLVE, error_texts, stdout_texts};

fn at_boundary_conditions() -> Session {
    let mut session = Session::scripted();
    session.start();
    session.say_all(&UP_TO_SOLVE[..5]);
    assert_eq!(session.interview.stage(), Stage::BoundaryConditions);
    session
}

#[test]
fn two_point_conditions_are_enough_for_one_unknown() {
    let mut session = at_boundary_conditions();

    let output = session.say("u(0) = 0");
    assert_eq!(session.interview.stage(), Stage::BoundaryConditions);
    assert!(stdout_texts(&output).contains(&"Please enter more boundary conditions"));

    let output = session.say("u(1) = 0");
    assert_eq!(session.interview.stage(), Stage::Properties);
    assert!(stdout_texts(&output).contains(&"These are all the boundary conditions needed."));
}

#[test]
fn a_dirichlet_function_counts_twice() {
    let mut session = at_boundary_conditions();

    session.say("u = 0");

    assert_eq!(session.interview.stage(), Stage::Properties);
    let conditions = &session.interview.model().boundary_conditions;
    assert_eq!(conditions.measure_given, 2);
    assert_eq!(conditions.conditions.len(), 1);
}

#[test]
fn overshooting_the_measure_ignores_the_last_condition() {
    let mut session = at_boundary_conditions();
    session.say("u(0) = 0");

    let output = session.say("u = 0");

    assert_eq!(session.interview.stage(), Stage::BoundaryConditions);
    let conditions = &session.interview.model().boundary_conditions;
    assert_eq!(conditions.measure_given, 1);
    assert_eq!(conditions.conditions.len(), 1);
    assert!(error_texts(&output)[0].contains("now that's too many boundary conditions. ignoring last input."));
    assert!(!stdout_texts(&output).contains(&"Ok "));
}

#[test]
fn points_inside_the_domain_are_not_boundary_conditions() {
    let mut session = at_boundary_conditions();

    let output = session.say("u(0.5) = 0");

    assert!(session.interview.model().boundary_conditions.conditions.is_empty());
    assert!(error_texts(&output)[0].contains("0.5 is not on the boundary!"));
}

#[test]
fn more_parameters_can_follow_a_yes_or_come_straight_away() {
    let mut session = Session::scripted();
    session.start();
    session.say_all(&["Ω = [0;1]", "u : Ω → ℝ", "c : ℝ = 2", "y"]);
    assert!(session.interview.pending_confirmation().is_none());

    session.say("d : ℝ = 3");
    assert!(session.interview.pending_confirmation().is_some());
    session.say("f : ℝ = c");
    session.say("no");

    assert_eq!(session.interview.stage(), Stage::Pdes);
    let names: Vec<&str> = session
        .interview
        .model()
        .parameters
        .iter()
        .map(|parameter| parameter.name.as_str())
        .collect();
    assert_eq!(names, vec!["c", "d", "f"]);
    assert!(
        session
            .interview
            .store()
            .declarations_in("f")
            .contains(&"include ?c❙".to_owned())
    );
}

#[test]
fn only_one_dimension_is_supported() {
    let mut session = Session::scripted();
    session.start();
    session.say("undo");

    assert_eq!(stdout_texts(&session.say("three")), vec!["Please enter a number."]);
    assert!(stdout_texts(&session.say("0")).contains(&"Trying to be funny, huh?"));
    assert!(
        stdout_texts(&session.say("2"))[0].starts_with("Sorry, cannot handle 2 dimensions")
    );
    assert_eq!(session.interview.stage(), Stage::Dimensions);

    session.say("1");
    assert_eq!(session.interview.stage(), Stage::Domain);
}
