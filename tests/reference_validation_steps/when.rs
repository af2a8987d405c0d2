//! When steps for reference validation BDD scenarios.

use std::sync::Arc;

use super::world::{ValidationWorld, run_async};
use rstest_bdd_macros::when;
use trackline::reference::services::ReferenceValidationService;

#[when(r#"the text "{text}" is validated"#)]
fn the_text_is_validated(world: &mut ValidationWorld, text: String) {
    let service = ReferenceValidationService::new(Arc::clone(&world.tracker));
    world.result = Some(run_async(service.validate_text(&text)));
}
