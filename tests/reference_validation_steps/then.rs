//! Then steps for reference validation BDD scenarios.

use super::world::{ValidationWorld, identifiers};
use rstest_bdd_macros::then;
use trackline::reference::adapters::memory::TrackerCall;

#[then("the result is valid")]
fn the_result_is_valid(world: &ValidationWorld) -> Result<(), eyre::Report> {
    let result = world.result()?;
    if !result.is_valid() {
        return Err(eyre::eyre!("expected a valid result, got {result:?}"));
    }
    Ok(())
}

#[then("the result is invalid")]
fn the_result_is_invalid(world: &ValidationWorld) -> Result<(), eyre::Report> {
    let result = world.result()?;
    if result.is_valid() {
        return Err(eyre::eyre!("expected an invalid result, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the message is "{message}""#)]
fn the_message_is(world: &ValidationWorld, message: String) -> Result<(), eyre::Report> {
    let actual = world.result()?.message();
    if actual != message {
        return Err(eyre::eyre!("expected message '{message}', got '{actual}'"));
    }
    Ok(())
}

#[then(r#"the work items are "{list}""#)]
fn the_work_items_are(world: &ValidationWorld, list: String) -> Result<(), eyre::Report> {
    let actual: Vec<String> = world
        .result()?
        .work_items()
        .iter()
        .map(|reference| reference.issue_id().to_owned())
        .collect();
    let expected = identifiers(&list);
    if actual != expected {
        return Err(eyre::eyre!("expected work items {expected:?}, got {actual:?}"));
    }
    Ok(())
}

#[then(r#"the errors include "{error}""#)]
fn the_errors_include(world: &ValidationWorld, error: String) -> Result<(), eyre::Report> {
    let errors = world.result()?.errors();
    if !errors.contains(&error) {
        return Err(eyre::eyre!("expected '{error}' among {errors:?}"));
    }
    Ok(())
}

#[then("the tracker received {count:usize} lookups")]
fn the_tracker_received(world: &ValidationWorld, count: usize) -> Result<(), eyre::Report> {
    let lookups = world
        .tracker
        .calls()
        .map_err(|err| eyre::eyre!("call log unavailable: {err}"))?
        .into_iter()
        .filter(|call| matches!(call, TrackerCall::Lookup(_)))
        .count();
    if lookups != count {
        return Err(eyre::eyre!("expected {count} lookups, got {lookups}"));
    }
    Ok(())
}
