//! Going back one stage at a time.

use mosis_engine::Stage;

use crate::common::{Session, UP_TO_SOLVE, stdout_texts};

#[test]
fn undo_from_unknowns_asks_for_the_domain_again() {
    let mut session = Session::scripted();
    session.start();
    session.say("Ω = [0;1]");

    session.say("undo");

    assert_eq!(session.interview.stage(), Stage::Domain);
    let domain = &session.interview.model().domain;
    assert_eq!(domain.name, None);
    assert_eq!(domain.store_ref.as_deref(), Some("ephdomain"));

    session.say("Ω = [0;1]");
    assert_eq!(session.interview.stage(), Stage::Unknowns);
    assert_eq!(session.interview.model().domain.name.as_deref(), Some("Ω"));
}

#[test]
fn undo_back_to_dimensions_waits_for_an_answer() {
    let mut session = Session::scripted();
    session.start();

    let output = session.say("undo");

    assert_eq!(session.interview.stage(), Stage::Dimensions);
    assert_eq!(session.interview.model().dimension_count, None);
    assert!(stdout_texts(&output).contains(&"## Modeling"));

    session.say("1");
    assert_eq!(session.interview.stage(), Stage::Domain);
}

#[test]
fn undo_is_case_insensitive_and_clamped_at_the_start() {
    let mut session = Session::scripted();
    session.start();
    session.say("UNDO");
    assert_eq!(session.interview.stage(), Stage::Dimensions);

    let output = session.say("Undo");

    assert_eq!(session.interview.stage(), Stage::Dimensions);
    assert_eq!(stdout_texts(&output), vec!["We are already at the first question."]);
}

#[test]
fn undo_drops_the_pending_question_about_more_parameters() {
    let mut session = Session::scripted();
    session.start();
    session.say_all(&UP_TO_SOLVE[..3]);
    assert!(session.interview.pending_confirmation().is_some());

    session.say("undo");

    assert!(session.interview.pending_confirmation().is_none());
    assert_eq!(session.interview.stage(), Stage::Unknowns);
    assert!(session.interview.model().unknowns.is_empty());
}

#[test]
fn undo_from_solve_reopens_the_properties() {
    let mut session = Session::scripted();
    session.start();
    session.say_all(UP_TO_SOLVE);

    session.say("undo");

    assert_eq!(session.interview.stage(), Stage::Properties);
    assert!(session.interview.pending_confirmation().is_none());
    let operators = &session.interview.model().qualitative_properties.operators;
    assert_eq!(operators.len(), 1);
    assert!(operators[0].properties.is_empty());
}
