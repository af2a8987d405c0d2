//! Behaviour tests for reference extraction and validation.

mod reference_validation_steps;

use reference_validation_steps::world::{ValidationWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/reference_validation.feature",
    name = "Every reference resolves"
)]
#[tokio::test(flavor = "multi_thread")]
async fn every_reference_resolves(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reference_validation.feature",
    name = "Partially valid text stays invalid"
)]
#[tokio::test(flavor = "multi_thread")]
async fn partially_valid_text_stays_invalid(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reference_validation.feature",
    name = "Text without references"
)]
#[tokio::test(flavor = "multi_thread")]
async fn text_without_references(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reference_validation.feature",
    name = "Unconfigured tracker short-circuits"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unconfigured_tracker_short_circuits(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reference_validation.feature",
    name = "Tracker failures are reported per reference"
)]
#[tokio::test(flavor = "multi_thread")]
async fn tracker_failures_are_reported(world: ValidationWorld) {
    let _ = world;
}
