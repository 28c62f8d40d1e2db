use std::num::NonZeroU32;

use mosis_types::ProblemModel;

use super::{Direction, StageHandler, StageOutcome};
use crate::{StageCtx, TurnError};

const QUESTION: &str = "How many dimensions does your model have?";
const ASSUMPTION: &str = "I am just assuming it's 1, since that is all we can currently handle.";
const SUPPORTED: u32 = 1;

pub(super) struct Dimensions;

impl Dimensions {
    fn ask(ctx: &mut StageCtx<'_>) {
        ctx.out.subheading("Modeling");
        ctx.out.say(QUESTION);
        ctx.out.blank();
    }
}

impl StageHandler for Dimensions {
    fn begin(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        entered: Direction,
    ) -> Result<StageOutcome, TurnError> {
        Self::ask(ctx);
        match entered {
            Direction::Forward => {
                ctx.out.say(ASSUMPTION);
                ctx.out.blank();
                model.dimension_count = NonZeroU32::new(SUPPORTED);
                Ok(StageOutcome::Advance)
            }
            Direction::Backward | Direction::Reentry => {
                model.dimension_count = None;
                Ok(StageOutcome::Stay)
            }
        }
    }

    fn handle_input(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        input: &str,
    ) -> Result<StageOutcome, TurnError> {
        let Ok(count) = input.trim().parse::<i64>() else {
            ctx.out.say("Please enter a number.");
            return Ok(StageOutcome::Stay);
        };
        if count < 1 {
            ctx.out.say("Trying to be funny, huh?");
            Self::ask(ctx);
            return Ok(StageOutcome::Stay);
        }
        if count > i64::from(SUPPORTED) {
            ctx.out.say(format!(
                "Sorry, cannot handle {count} dimensions as of now. Please try less than that."
            ));
            return Ok(StageOutcome::Stay);
        }
        model.dimension_count = NonZeroU32::new(SUPPORTED);
        Ok(StageOutcome::Advance)
    }
}
