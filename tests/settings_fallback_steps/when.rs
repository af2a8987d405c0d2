//! When steps for settings fallback BDD scenarios.

use super::world::{SettingsWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use trackline::settings::domain::IntegrationConfig;

#[when("settings are loaded")]
fn settings_are_loaded(world: &mut SettingsWorld) -> Result<(), eyre::Report> {
    let loaded = run_async(world.service.load(&world.scope)).wrap_err("load settings")?;
    world.loaded = Some(loaded);
    Ok(())
}

#[when(r#"the API key "{api_key}" is saved"#)]
fn api_key_is_saved(world: &mut SettingsWorld, api_key: String) -> Result<(), eyre::Report> {
    let config = IntegrationConfig::with_api_key(api_key);
    let source = run_async(world.service.save(&world.scope, &config)).wrap_err("save settings")?;
    world.saved = Some(source);
    Ok(())
}
