//! Failed turns leave the problem model as it was.

use std::cell::Cell;
use std::rc::Rc;

use mosis_engine::Stage;
use mosis_store::{StoreCall, StoreReply};
use mosis_types::StoreError;

use crate::common::{Session, error_texts, scripted_store};

const REPHRASE: &str = "I did not catch that. Could you please rephrase?";

#[test]
fn store_failure_while_declaring_an_unknown_rolls_it_back() {
    let store = scripted_store().on_declaration(|theory, declaration| {
        if theory == "u" && declaration.starts_with("myUnkType") {
            Err(StoreError::with_detail("unbound token", "<div>myUnkType</div>"))
        } else {
            Ok(StoreReply::empty())
        }
    });
    let mut session = Session::new(store);
    session.start();
    session.say("Ω = [0;1]");

    let output = session.say("u : Ω → ℝ");

    assert_eq!(session.interview.stage(), Stage::Unknowns);
    assert!(session.interview.model().unknowns.is_empty());
    let errors = error_texts(&output);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with(REPHRASE));
    assert!(errors[0].contains("Theory store error: unbound token. <div>myUnkType</div>"));
}

#[test]
fn accepted_declarations_stay_on_the_store() {
    let store = scripted_store().on_declaration(|theory, declaration| {
        if theory == "u" && declaration.starts_with("myUnkType") {
            Err(StoreError::new("unbound token"))
        } else {
            Ok(StoreReply::empty())
        }
    });
    let mut session = Session::new(store);
    session.start();
    session.say("Ω = [0;1]");

    session.say("u : Ω → ℝ");

    let calls = session.interview.store().calls();
    assert!(calls.contains(&StoreCall::AddDeclaration {
        theory: "u_to_go_to_trash".into(),
        declaration: "u : Ω → ℝ❙".into(),
    }));
}

#[test]
fn a_rejected_domain_view_keeps_the_interview_at_the_domain() {
    let failed_once = Rc::new(Cell::new(false));
    let flag = Rc::clone(&failed_once);
    let store = scripted_store().on_declaration(move |theory, declaration| {
        if theory == "ephdomainASmDomain" && declaration.starts_with("domain =") && !flag.replace(true) {
            Err(StoreError::new("view rejected"))
        } else {
            Ok(StoreReply::empty())
        }
    });
    let mut session = Session::new(store);
    session.start();

    let output = session.say("Ω = [0;1]");

    assert!(failed_once.get());
    assert_eq!(session.interview.stage(), Stage::Domain);
    let domain = &session.interview.model().domain;
    assert_eq!(domain.boundary_name, None);
    assert_eq!(domain.view_ref, None);
    let errors = error_texts(&output);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with(REPHRASE));

    session.say("Ω = [0;1]");
    assert_eq!(session.interview.stage(), Stage::Unknowns);
    assert_eq!(session.interview.model().domain.boundary_name.as_deref(), Some("Ω"));

    session.say_all(&["u : Ω → ℝ", "n", "Δu = 0.0"]);
    let output = session.say("u(0) = 0");
    assert!(error_texts(&output).is_empty(), "{output:?}");
    assert_eq!(session.interview.model().boundary_conditions.measure_given, 1);
}

#[test]
fn a_domain_that_is_not_an_interval_is_not_kept() {
    let store = scripted_store().on_query(|_| Ok(StoreReply::empty()));
    let mut session = Session::new(store);
    session.start();

    let output = session.say("Ω = ℝ");

    assert_eq!(session.interview.stage(), Stage::Domain);
    let domain = &session.interview.model().domain;
    assert_eq!(domain.name, None);
    assert!(domain.axis_intervals.is_empty());
    let errors = error_texts(&output);
    assert!(errors[0].contains("Ω does not look like an interval [a;b]."));
}

#[test]
fn inner_parameter_failure_drops_the_whole_record() {
    let store = scripted_store().on_declaration(|theory, declaration| {
        if theory == "cASmParameter" && declaration.starts_with("ptype") {
            Err(StoreError::new("type mismatch"))
        } else {
            Ok(StoreReply::empty())
        }
    });
    let mut session = Session::new(store);
    session.start();
    session.say_all(&["Ω = [0;1]", "u : Ω → ℝ"]);

    let output = session.say("c : ℝ = 2");

    assert_eq!(session.interview.stage(), Stage::Parameters);
    assert!(session.interview.model().parameters.is_empty());
    assert!(session.interview.pending_confirmation().is_none());
    assert_eq!(error_texts(&output).len(), 1);
}

#[test]
fn malformed_pde_is_not_recorded() {
    let mut session = Session::scripted();
    session.start();
    session.say_all(&["Ω = [0;1]", "u : Ω → ℝ", "c : ℝ = 2", "n"]);

    let output = session.say("Δu");

    assert_eq!(session.interview.stage(), Stage::Pdes);
    assert!(session.interview.model().pdes.is_empty());
    assert!(error_texts(&output)[0].contains("This does not look like an equation."));
}

#[test]
fn failed_explain_is_reported_and_nothing_changes() {
    let store = scripted_store().on_query(|name| {
        if name == "mNothing" {
            Err(StoreError::new("no such declaration"))
        } else {
            Ok(StoreReply::empty())
        }
    });
    let mut session = Session::new(store);
    session.start();

    let output = session.say("explain mNothing");

    assert_eq!(session.interview.stage(), Stage::Domain);
    assert!(error_texts(&output)[0].contains("no such declaration"));
}
