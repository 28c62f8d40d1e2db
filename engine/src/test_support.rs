//! Shared setup for the engine's unit tests.

use mosis_store::RecordingStore;
use mosis_types::{Parameter, Pde, ProblemModel, Unknown};
use tempfile::TempDir;

use crate::export::JsonExporter;
use crate::settings::InterviewSettings;
use crate::transcript::Transcript;
use crate::StageCtx;

pub(crate) struct Fixture {
    pub store: RecordingStore,
    pub transcript: Transcript,
    pub settings: InterviewSettings,
    pub exporter: JsonExporter,
    _dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_store(RecordingStore::new())
    }

    pub fn with_store(store: RecordingStore) -> Self {
        let dir = tempfile::tempdir().unwrap();
        Self {
            store,
            transcript: Transcript::new(),
            settings: InterviewSettings::new("ada"),
            exporter: JsonExporter::new(dir.path()),
            _dir: dir,
        }
    }

    pub fn ctx(&mut self) -> StageCtx<'_> {
        StageCtx {
            store: &self.store,
            out: &mut self.transcript,
            settings: &self.settings,
            exporter: &mut self.exporter,
        }
    }

    pub fn said(&self) -> Vec<&str> {
        self.transcript
            .lines()
            .iter()
            .map(|line| line.text.as_str())
            .collect()
    }
}

/// What the store answers when `ephdomain` holds `Ω = [0;1]`.
pub(crate) const DOMAIN_REPLY: &str = r#"<omdoc xmlns:om="http://www.openmath.org/OpenMath">
  <theory name="ephdomain">
    <constant name="Ω">
      <type><om:OMOBJ><om:OMS name="type"/></om:OMOBJ></type>
      <definition><om:OMOBJ><om:OMA>
        <om:OMS name="interval"/>
        <om:OMLIT value="0" type="real"/>
        <om:OMLIT value="1" type="real"/>
      </om:OMA></om:OMOBJ></definition>
    </constant>
  </theory>
</omdoc>"#;

/// `Ω = [0;1]` with one unknown `u : Ω → ℝ`, as left by the unknowns stage.
pub(crate) fn model_with_unknown() -> ProblemModel {
    let mut model = ProblemModel::new();
    model.domain.name = Some("Ω".into());
    model.domain.store_ref = Some("ephdomain".into());
    model.domain.view_ref = Some("ephdomainASmDomain".into());
    model.domain.set_interval("x", "[0;1]");
    model.domain.lower_bound = Some("0".into());
    model.domain.upper_bound = Some("1".into());
    model.domain.boundary_name = Some("Ω".into());
    model.unknowns.push(Unknown {
        name: "u".into(),
        store_ref: "u".into(),
        view_ref: Some("uASmUnknown".into()),
        declaration_string: "u : Ω → ℝ".into(),
        inferred_type: "Ω → ℝ".into(),
        codomain: "ℝ".into(),
    });
    model
}

/// [`model_with_unknown`] plus the constant parameter `c : ℝ = 2`.
pub(crate) fn model_with_parameter() -> ProblemModel {
    let mut model = model_with_unknown();
    model.parameters.push(Parameter {
        name: "c".into(),
        store_ref: "c".into(),
        view_ref: Some("cASmParameter".into()),
        raw_string: "c : ℝ = 2".into(),
        normalized_string: "c : ℝ ❘= 2".into(),
        inferred_type: "ℝ".into(),
    });
    model
}

/// [`model_with_unknown`] plus the accepted PDE `Δu = 0.0`.
pub(crate) fn model_with_pde() -> ProblemModel {
    let mut model = model_with_unknown();
    model.pdes.push(Pde {
        store_ref: "ephemeral_pde1".into(),
        view_ref: Some("ephemeral_pde1ASmPDE".into()),
        raw_string: "Δu = 0.0".into(),
        lhs: "Δu".into(),
        rhs: "0.0".into(),
        rhs_expanded: "0.0".into(),
        differential_operator: "Δ".into(),
        lhs_normalized: " [ anyu : Ω → ℝ ] Δ anyu ".into(),
        rhs_normalized: " [ x : Ω ]  0.0".into(),
    });
    model
}
