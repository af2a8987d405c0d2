//! Then steps for settings fallback BDD scenarios.

use super::world::SettingsWorld;
use rstest_bdd_macros::then;
use trackline::settings::services::SettingsSource;

fn loaded_from(
    world: &SettingsWorld,
    api_key: &str,
    source: SettingsSource,
) -> Result<(), eyre::Report> {
    let loaded = world
        .loaded
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no settings were loaded in this scenario"))?;
    let actual = loaded.config().map(|config| config.api_key.expose());
    if actual != Some(api_key) || loaded.source() != source {
        return Err(eyre::eyre!(
            "expected '{api_key}' from {source:?}, got {actual:?} from {:?}",
            loaded.source()
        ));
    }
    Ok(())
}

#[then(r#"the API key "{api_key}" comes from the host store"#)]
fn key_from_host(world: &SettingsWorld, api_key: String) -> Result<(), eyre::Report> {
    loaded_from(world, &api_key, SettingsSource::Host)
}

#[then(r#"the API key "{api_key}" comes from the local fallback"#)]
fn key_from_fallback(world: &SettingsWorld, api_key: String) -> Result<(), eyre::Report> {
    loaded_from(world, &api_key, SettingsSource::LocalFallback)
}

#[then("the save landed in the local fallback")]
fn save_landed_locally(world: &SettingsWorld) -> Result<(), eyre::Report> {
    if world.saved != Some(SettingsSource::LocalFallback) {
        return Err(eyre::eyre!(
            "expected a local fallback save, got {:?}",
            world.saved
        ));
    }
    Ok(())
}

#[then(r#"the local file holds the API key "{api_key}""#)]
fn local_store_has_key(world: &SettingsWorld, api_key: String) -> Result<(), eyre::Report> {
    let stored = world.stored_key(world.local.as_ref())?;
    if stored.as_deref() != Some(api_key.as_str()) {
        return Err(eyre::eyre!("expected local key '{api_key}', got {stored:?}"));
    }
    Ok(())
}
