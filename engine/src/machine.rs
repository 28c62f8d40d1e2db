//! The phase state machine driving one interview session.

use std::mem;

use mosis_store::TheoryStore;
use mosis_types::{ProblemModel, Stage, Trigger};

use crate::commands::{Command, command_specs};
use crate::confirm::{Answer, ConfirmationRequest, Continuation};
use crate::export::ExportTarget;
use crate::settings::InterviewSettings;
use crate::stages::{self, Direction, StageOutcome};
use crate::transcript::{OutputLine, Transcript};
use crate::{StageCtx, TurnError, scope, theories};

const GREETING: &str = "Hello! I am MoSIS, your partial differential equations and simulations \
                        expert. Let's set up a simulation together.";
const FIRST_QUESTION: &str = "We are already at the first question.";
const ANSWER_YES_OR_NO: &str = "Please answer with y/n";

type StateChangeHook = Box<dyn FnMut(Stage)>;

// ============================================================================
// Mode - how the next line is interpreted
// ============================================================================

#[derive(Debug)]
enum Mode {
    Dispatch,
    /// The next line answers this question before any stage sees it.
    AwaitingConfirmation(ConfirmationRequest),
}

// ============================================================================
// Interview
// ============================================================================

/// One interview session: the problem model, the current stage and the
/// store it talks to.
///
/// Each call to [`Interview::handle_input`] processes one line to
/// completion. Text for the user accumulates until
/// [`Interview::take_output`] drains it.
pub struct Interview<S: TheoryStore> {
    stage: Stage,
    started: bool,
    model: ProblemModel,
    store: S,
    mode: Mode,
    transcript: Transcript,
    settings: InterviewSettings,
    exporter: Box<dyn ExportTarget>,
    on_state_change: Option<StateChangeHook>,
}

impl<S: TheoryStore> Interview<S> {
    pub fn new(store: S, settings: InterviewSettings, exporter: impl ExportTarget + 'static) -> Self {
        Self {
            stage: Stage::Dimensions,
            started: false,
            model: ProblemModel::new(),
            store,
            mode: Mode::Dispatch,
            transcript: Transcript::new(),
            settings,
            exporter: Box::new(exporter),
            on_state_change: None,
        }
    }

    /// Called with the new stage after every transition, once the stage's
    /// begin hook has run.
    #[must_use]
    pub fn with_state_change_hook(mut self, hook: impl FnMut(Stage) + 'static) -> Self {
        self.on_state_change = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn model(&self) -> &ProblemModel {
        &self.model
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// The pending yes/no question, if the next line answers one.
    #[must_use]
    pub fn pending_confirmation(&self) -> Option<&ConfirmationRequest> {
        match &self.mode {
            Mode::AwaitingConfirmation(request) => Some(request),
            Mode::Dispatch => None,
        }
    }

    pub fn take_output(&mut self) -> Vec<OutputLine> {
        self.transcript.drain()
    }

    /// Greet the user and enter the first stage. Does nothing once started.
    pub fn start(&mut self) -> Result<(), TurnError> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        tracing::info!(user = %self.settings.user_name, "interview started");

        self.transcript.say(GREETING);
        self.transcript.blank();
        self.print_keywords();
        self.transcript.blank();

        self.stage = Stage::Dimensions;
        let outcome = self.run_begin(Direction::Forward)?;
        self.notify_state_change();
        self.apply(outcome)
    }

    /// Process one line of user input.
    ///
    /// Keywords come first, then a pending confirmation, then the current
    /// stage's handler. Recoverable errors never reach the caller.
    pub fn handle_input(&mut self, input: &str) -> Result<(), TurnError> {
        if !self.started {
            self.start()?;
        }
        tracing::debug!(stage = %self.stage, input, "handling input");

        if let Some(command) = Command::parse(input) {
            return self.run_command(command);
        }

        if let Mode::AwaitingConfirmation(request) = mem::replace(&mut self.mode, Mode::Dispatch) {
            match request.answer(input) {
                Answer::Continue(continuation) => return self.continue_with(continuation),
                Answer::PassThrough => {}
                Answer::Repeat => {
                    self.transcript.say(ANSWER_YES_OR_NO);
                    self.transcript.say(request.prompt());
                    self.mode = Mode::AwaitingConfirmation(request);
                    return Ok(());
                }
            }
        }

        let stage = self.stage;
        let outcome = {
            let (model, mut ctx) = self.split();
            stages::handler(stage).handle_input(model, &mut ctx, input)?
        };
        self.apply(outcome)
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Fire `trigger` from the current stage: exit hook, stage change, begin
    /// hook, state change hook, then whatever the new stage asked for.
    ///
    /// A recovered failure in the exit hook cancels the transition.
    fn fire(&mut self, trigger: Trigger) -> Result<(), TurnError> {
        let source = self.stage;
        let Some(destination) = trigger.destination_from(source) else {
            return Err(TurnError::InvalidTransition {
                trigger,
                stage: source,
            });
        };
        let direction = if trigger == Trigger::Undo {
            Direction::Backward
        } else if destination == source {
            Direction::Reentry
        } else {
            Direction::Forward
        };

        if trigger.paces_output() {
            self.transcript.blank();
        }
        let exited = {
            let (model, mut ctx) = self.split();
            scope::outermost(&mut (), &mut ctx, |_, ctx| {
                stages::handler(source).exit(model, ctx, direction)
            })?
        };
        if exited.is_none() {
            tracing::debug!(stage = %source, trigger = %trigger, "exit hook failed, staying");
            return Ok(());
        }

        self.stage = destination;
        tracing::info!(from = %source, to = %destination, trigger = %trigger, "stage changed");

        let outcome = self.run_begin(direction)?;
        self.notify_state_change();
        self.apply(outcome)
    }

    fn run_begin(&mut self, entered: Direction) -> Result<StageOutcome, TurnError> {
        let stage = self.stage;
        let (model, mut ctx) = self.split();
        stages::handler(stage).begin(model, &mut ctx, entered)
    }

    fn notify_state_change(&mut self) {
        if let Some(hook) = self.on_state_change.as_mut() {
            hook(self.stage);
        }
    }

    fn apply(&mut self, outcome: StageOutcome) -> Result<(), TurnError> {
        match outcome {
            StageOutcome::Stay => Ok(()),
            StageOutcome::Advance => self.fire(self.stage.forward_trigger()),
            StageOutcome::Confirm(request) => {
                self.transcript.say(request.prompt());
                self.mode = Mode::AwaitingConfirmation(request);
                Ok(())
            }
        }
    }

    fn continue_with(&mut self, continuation: Continuation) -> Result<(), TurnError> {
        match continuation {
            Continuation::Stay => Ok(()),
            Continuation::Advance => self.fire(self.stage.forward_trigger()),
            Continuation::Export => {
                let outcome = {
                    let (model, mut ctx) = self.split();
                    stages::solve::export(model, &mut ctx, None)?
                };
                self.apply(outcome)
            }
        }
    }

    fn split(&mut self) -> (&mut ProblemModel, StageCtx<'_>) {
        let ctx = StageCtx {
            store: &self.store,
            out: &mut self.transcript,
            settings: &self.settings,
            exporter: self.exporter.as_mut(),
        };
        (&mut self.model, ctx)
    }

    // ------------------------------------------------------------------------
    // Keywords
    // ------------------------------------------------------------------------

    fn run_command(&mut self, command: Command<'_>) -> Result<(), TurnError> {
        tracing::debug!(?command, stage = %self.stage, "keyword");
        match command {
            Command::Undo => self.undo(),
            Command::Recap => {
                stages::recap(&self.model, self.stage, &mut self.transcript);
                Ok(())
            }
            Command::Explain(name) => self.explain(name),
            Command::Help => {
                self.print_keywords();
                Ok(())
            }
        }
    }

    fn undo(&mut self) -> Result<(), TurnError> {
        self.mode = Mode::Dispatch;
        if self.stage.predecessor().is_none() {
            self.transcript.say(FIRST_QUESTION);
            return Ok(());
        }
        self.fire(Trigger::Undo)
    }

    fn explain(&mut self, name: Option<&str>) -> Result<(), TurnError> {
        let Some(target) = name.or_else(|| theories::view_template(self.stage)) else {
            self.transcript
                .say("There is nothing to explain yet. Try \"explain <name>\".");
            return Ok(());
        };
        let target = target.to_owned();
        let (_, mut ctx) = self.split();
        scope::outermost(&mut (), &mut ctx, |_, ctx| {
            let reply = ctx.query(&target)?;
            ctx.out.say(reply.raw());
            if let Some(declared) = reply.constant_type(&target) {
                ctx.out.say(format!("{target} : {declared}"));
            }
            Ok(())
        })?;
        Ok(())
    }

    fn print_keywords(&mut self) {
        self.transcript.say("You can use these keywords at any time:");
        for spec in command_specs() {
            self.transcript
                .say(format!("  {:<16}{}", spec.palette_label, spec.description));
        }
    }
}
