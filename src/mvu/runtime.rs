use crate::mvu::error::AppError;
use crate::mvu::game::{Deps, GameModel, Msg, run_effect, update};

/// Runs the MVU loop for one message: applies it and drains the effects it
/// produces. Effect failures are recorded on the model and do not stop the
/// loop.
///
/// # Errors
///
/// Returns the rejection or failure raised while handling `msg`. An error
/// already showing from an earlier action is kept on the model but not
/// returned again for store callbacks.
pub fn run_game(model: &mut GameModel, msg: Msg, deps: Deps<'_>) -> Result<(), AppError> {
    let carried = if msg.is_user_action() {
        None
    } else {
        model.error.take()
    };

    let mut effects = update(model, msg);
    while let Some(effect) = effects.pop() {
        let next = run_effect(effect, model, deps);
        effects.extend(update(model, next));
    }

    let raised = model.error.clone();
    if raised.is_none() {
        model.error = carried;
    }
    raised.map_or(Ok(()), Err)
}
