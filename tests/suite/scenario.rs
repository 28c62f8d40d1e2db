//! A whole interview, from the greeting to the exported problem.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use mosis_engine::{ExportSnapshot, Stage};
use mosis_types::{BoundaryKind, PropertyKind, SolveMethod};

use crate::common::{Session, UP_TO_SOLVE, error_texts, scripted_store, stdout_texts};

#[test]
fn poisson_problem_walks_every_stage_and_exports() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut session = Session::scripted();
    session.interview = session
        .interview
        .with_state_change_hook(move |stage| sink.borrow_mut().push(stage));

    session.start();
    for line in UP_TO_SOLVE {
        let output = session.say(line);
        assert!(error_texts(&output).is_empty(), "{line}: {output:?}");
    }
    assert_eq!(session.interview.stage(), Stage::Solve);
    assert!(session.interview.pending_confirmation().is_some());

    let output = session.say("y");
    let said = stdout_texts(&output);
    let exported = session.export_dir.path().join("ada.json");
    assert!(said.contains(&format!("Exported your problem to {}", exported.display()).as_str()));

    assert_eq!(
        *seen.borrow(),
        vec![
            Stage::Dimensions,
            Stage::Domain,
            Stage::Unknowns,
            Stage::Parameters,
            Stage::Pdes,
            Stage::BoundaryConditions,
            Stage::Properties,
            Stage::Solve,
            Stage::Solve,
        ]
    );

    let snapshot: ExportSnapshot = serde_json::from_str(&fs::read_to_string(exported).unwrap()).unwrap();
    assert_eq!(snapshot.problem_name, "ada");
    assert_eq!(snapshot.domain.name.as_deref(), Some("Ω"));
    assert_eq!(snapshot.domain.boundary_name.as_deref(), Some("Ω"));
    assert_eq!(snapshot.unknowns[0].codomain, "ℝ");
    assert_eq!(snapshot.parameters[0].raw_string, "c : ℝ = 2");
    assert_eq!(snapshot.pdes[0].differential_operator, "Δ");
    assert_eq!(snapshot.boundary_conditions.measure_given, 2);
    assert!(
        snapshot
            .boundary_conditions
            .conditions
            .iter()
            .all(|condition| condition.kind == Some(BoundaryKind::Dirichlet))
    );
    let operators = &snapshot.qualitative_properties.operators;
    assert_eq!(operators[0].properties[0].kind, PropertyKind::Linear);
    assert_eq!(snapshot.solve_config.method, Some(SolveMethod::FiniteDifferences));
}

#[test]
fn one_unknown_without_parameters_exports_the_interval_bounds() {
    let mut session = Session::scripted();
    session.start();

    session.say_all(&["Ω = [0;1]", "u : Ω → ℝ", "no"]);
    assert_eq!(session.interview.stage(), Stage::Pdes);
    session.say("Δu = 0.0");
    assert_eq!(session.interview.stage(), Stage::BoundaryConditions);
    session.say("u(0) = 0");
    assert_eq!(session.interview.model().boundary_conditions.measure_given, 1);
    session.say("u(1) = 0");
    assert_eq!(session.interview.model().boundary_conditions.measure_given, 2);
    assert_eq!(session.interview.stage(), Stage::Properties);
    session.say("no");
    assert_eq!(session.interview.stage(), Stage::Solve);
    let output = session.say("y");
    assert!(error_texts(&output).is_empty(), "{output:?}");

    let exported = session.export_dir.path().join("ada.json");
    let snapshot: ExportSnapshot = serde_json::from_str(&fs::read_to_string(exported).unwrap()).unwrap();
    assert_eq!(snapshot.domain.lower_bound.as_deref(), Some("0"));
    assert_eq!(snapshot.domain.upper_bound.as_deref(), Some("1"));
    assert_eq!(snapshot.pdes.len(), 1);
    assert!(snapshot.parameters.is_empty());

    assert_eq!(session.interview.stage(), Stage::Solve);
    assert_eq!(
        session.interview.model().solve_config.method,
        Some(SolveMethod::FiniteDifferences)
    );
}

#[test]
fn a_named_configuration_becomes_the_problem_name() {
    let mut session = Session::scripted();
    session.start();
    session.say_all(UP_TO_SOLVE);

    session.say("poisson1d");

    assert!(session.export_dir.path().join("poisson1d.json").exists());
    assert!(!session.export_dir.path().join("ada.json").exists());
}

#[test]
fn declining_the_export_stays_in_solve() {
    let mut session = Session::scripted();
    session.start();
    session.say_all(UP_TO_SOLVE);

    let output = session.say("n");

    assert!(output.is_empty());
    assert_eq!(session.interview.stage(), Stage::Solve);
    assert_eq!(fs::read_dir(session.export_dir.path()).unwrap().count(), 0);
}

#[test]
fn domain_exit_ties_the_domain_into_the_view_ladder() {
    let mut session = Session::scripted();
    session.start();

    session.say("Ω = [0;1]");

    let store = session.interview.store();
    assert_eq!(
        store.declarations_in("ephdomainASmDomain"),
        vec!["domain = Ω❙", "boundary = Ω❙"]
    );
    assert_eq!(session.interview.model().domain.interval("x"), Some("[0;1]"));
    assert_eq!(session.interview.stage(), Stage::Unknowns);
}

#[test]
fn recap_lists_the_stages_so_far() {
    let mut session = Session::new(scripted_store());
    session.start();
    session.say("Ω = [0;1]");

    let output = session.say("recap");

    let said = stdout_texts(&output);
    assert_eq!(said[0], "These are the things we know so far about your problem:");
    assert!(said[1].starts_with("dimensions: "));
    assert!(said[2].starts_with("domain: "));
    assert!(said[3].starts_with("unknowns: "));
    assert!(!said.iter().any(|line| line.starts_with("parameters: ")));
}
