//! An in-memory [`TheoryStore`] that records every call.
//!
//! Answers are scripted with closures; by default every call succeeds, type
//! inference answers `ℝ` and queries answer an empty reply.

use std::cell::RefCell;
use std::fmt;

use crate::{StoreError, StoreReply, TheoryStore, mpath};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    CreateTheory { name: String },
    CreateView { name: String, from: String, to: String },
    AddDeclaration { theory: String, declaration: String },
    InferType { theory: String, term: String },
    Query { name: String },
}

type DeclarationHandler = Box<dyn Fn(&str, &str) -> Result<StoreReply, StoreError>>;
type InferenceHandler = Box<dyn Fn(&str, &str) -> Result<String, StoreError>>;
type QueryHandler = Box<dyn Fn(&str) -> Result<StoreReply, StoreError>>;

pub struct RecordingStore {
    namespace: String,
    calls: RefCell<Vec<StoreCall>>,
    on_declaration: DeclarationHandler,
    on_infer: InferenceHandler,
    on_query: QueryHandler,
}

impl RecordingStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            namespace: crate::DEFAULT_NAMESPACE.to_owned(),
            calls: RefCell::new(Vec::new()),
            on_declaration: Box::new(|_, _| Ok(StoreReply::empty())),
            on_infer: Box::new(|_, _| Ok("ℝ".to_owned())),
            on_query: Box::new(|_| Ok(StoreReply::empty())),
        }
    }

    /// Answer `add_declaration(theory, declaration)`.
    #[must_use]
    pub fn on_declaration(
        mut self,
        handler: impl Fn(&str, &str) -> Result<StoreReply, StoreError> + 'static,
    ) -> Self {
        self.on_declaration = Box::new(handler);
        self
    }

    /// Answer `infer_type(theory, term)`.
    #[must_use]
    pub fn on_infer(
        mut self,
        handler: impl Fn(&str, &str) -> Result<String, StoreError> + 'static,
    ) -> Self {
        self.on_infer = Box::new(handler);
        self
    }

    /// Answer `query(name)`; `name` is passed unqualified.
    #[must_use]
    pub fn on_query(mut self, handler: impl Fn(&str) -> Result<StoreReply, StoreError> + 'static) -> Self {
        self.on_query = Box::new(handler);
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    /// Declarations sent to `theory`, in order.
    #[must_use]
    pub fn declarations_in(&self, theory: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                StoreCall::AddDeclaration {
                    theory: target,
                    declaration,
                } if target == theory => Some(declaration.clone()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn theories(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                StoreCall::CreateTheory { name } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn views(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                StoreCall::CreateView { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: StoreCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for RecordingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingStore")
            .field("namespace", &self.namespace)
            .field("calls", &self.calls.borrow().len())
            .finish_non_exhaustive()
    }
}

impl TheoryStore for RecordingStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn create_theory(&self, name: &str) -> Result<StoreReply, StoreError> {
        self.record(StoreCall::CreateTheory {
            name: name.to_owned(),
        });
        Ok(StoreReply::empty())
    }

    fn create_view(&self, name: &str, from: &str, to: &str) -> Result<StoreReply, StoreError> {
        self.record(StoreCall::CreateView {
            name: name.to_owned(),
            from: from.to_owned(),
            to: to.to_owned(),
        });
        Ok(StoreReply::empty())
    }

    fn add_declaration(&self, theory: &str, declaration: &str) -> Result<StoreReply, StoreError> {
        self.record(StoreCall::AddDeclaration {
            theory: theory.to_owned(),
            declaration: declaration.to_owned(),
        });
        (self.on_declaration)(theory, declaration)
    }

    fn infer_type(&self, theory: &str, term: &str) -> Result<String, StoreError> {
        self.record(StoreCall::InferType {
            theory: theory.to_owned(),
            term: term.to_owned(),
        });
        (self.on_infer)(theory, term)
    }

    fn query(&self, name: &str) -> Result<StoreReply, StoreError> {
        tracing::debug!(mpath = %mpath(&self.namespace, name), "recorded query");
        self.record(StoreCall::Query {
            name: name.to_owned(),
        });
        (self.on_query)(name)
    }
}
