//! Given steps for settings fallback BDD scenarios.

use super::world::{SettingsWorld, config_value, run_async};
use rstest_bdd_macros::given;
use trackline::settings::{domain::SETTINGS_KEY, ports::SettingsStore};

#[given("the host store fails {count:u32} times")]
fn host_store_fails(world: &mut SettingsWorld, count: u32) -> Result<(), eyre::Report> {
    world
        .host
        .fail_next(count)
        .map_err(|err| eyre::eyre!("failure injection failed: {err}"))
}

#[given("the host store is unavailable")]
fn host_store_unavailable(world: &mut SettingsWorld) -> Result<(), eyre::Report> {
    world
        .host
        .fail_always("host store offline")
        .map_err(|err| eyre::eyre!("failure injection failed: {err}"))
}

#[given(r#"the host store holds the API key "{api_key}""#)]
fn host_store_holds(world: &mut SettingsWorld, api_key: String) -> Result<(), eyre::Report> {
    world
        .host
        .insert(&world.scope, SETTINGS_KEY, config_value(&api_key)?)
        .map_err(|err| eyre::eyre!("seeding host store failed: {err}"))
}

#[given(r#"the local store holds the API key "{api_key}""#)]
fn local_store_holds(world: &mut SettingsWorld, api_key: String) -> Result<(), eyre::Report> {
    run_async(
        world
            .local
            .set_value(&world.scope, SETTINGS_KEY, config_value(&api_key)?),
    )
    .map_err(|err| eyre::eyre!("seeding local store failed: {err}"))
}
