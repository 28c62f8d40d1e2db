//! What a stage handler may touch besides the problem model, and the store
//! helpers every stage shares.

use mosis_rewrite::{
    include, terminate_declaration, trivial_assignment, view_assignment, view_name,
    view_template_of,
};
use mosis_store::{StoreReply, TheoryStore};
use mosis_types::{Stage, StoreError};

use crate::export::ExportTarget;
use crate::settings::InterviewSettings;
use crate::theories;
use crate::transcript::Transcript;

pub struct StageCtx<'a> {
    pub store: &'a dyn TheoryStore,
    pub out: &'a mut Transcript,
    pub settings: &'a InterviewSettings,
    pub exporter: &'a mut dyn ExportTarget,
}

impl StageCtx<'_> {
    /// Create `name` and include the background theories of `stage`.
    pub fn new_theory(&self, stage: Stage, name: &str) -> Result<(), StoreError> {
        tracing::debug!(theory = name, stage = %stage, "creating theory");
        self.store.create_theory(name)?;
        for background in theories::background(stage) {
            self.include_in(name, background)?;
        }
        Ok(())
    }

    /// `include ?what` in `theory`.
    pub fn include_in(&self, theory: &str, what: &str) -> Result<StoreReply, StoreError> {
        self.declare(theory, &include(what))
    }

    pub fn declare(&self, theory: &str, declaration: &str) -> Result<StoreReply, StoreError> {
        self.store
            .add_declaration(theory, &terminate_declaration(declaration))
    }

    pub fn declare_all<S: AsRef<str>>(&self, theory: &str, declarations: &[S]) -> Result<(), StoreError> {
        for declaration in declarations {
            self.declare(theory, declaration.as_ref())?;
        }
        Ok(())
    }

    pub fn infer_type(&self, theory: &str, term: &str) -> Result<String, StoreError> {
        let inferred = self.store.infer_type(theory, term)?;
        tracing::debug!(theory, term, inferred = %inferred, "inferred type");
        Ok(inferred)
    }

    pub fn query(&self, name: &str) -> Result<StoreReply, StoreError> {
        self.store.query(name)
    }

    /// Create the view from `template` onto `theory`, reusing every former
    /// view that applies. Returns the view's name.
    pub fn new_view<S: AsRef<str>>(
        &self,
        template: &str,
        theory: &str,
        former_views: &[S],
    ) -> Result<String, StoreError> {
        let view = view_name(theory, template);
        tracing::debug!(view = %view, template, "creating view");
        self.store.create_view(&view, template, theory)?;
        self.include_former_views(&view, former_views)?;
        Ok(view)
    }

    /// Assign every former view inside `view`.
    ///
    /// The store refuses former views its template does not reference; those
    /// refusals are expected and skipped.
    pub fn include_former_views<S: AsRef<str>>(
        &self,
        view: &str,
        former_views: &[S],
    ) -> Result<(), StoreError> {
        let not_applicable = format!(
            "no backend available that is applicable to {}?{}?",
            self.store.namespace(),
            view_template_of(view)
        );
        for former in former_views.iter().map(AsRef::as_ref) {
            if former == view {
                continue;
            }
            match self.include_in(view, &view_assignment(former)) {
                Ok(_) => {}
                Err(err) if err.message().contains(&not_applicable) => {
                    tracing::debug!(view, former, "former view not applicable");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// `?theory = ?theory` inside `view`.
    pub fn include_trivial_assignment(&self, view: &str, theory: &str) -> Result<StoreReply, StoreError> {
        self.include_in(view, &trivial_assignment(theory))
    }
}
