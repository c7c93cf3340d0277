//! CLI configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use game_content::bundled_data_dir;

/// Where to find battle content, plus the optional RNG seed.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub encounter: PathBuf,
    pub skills: PathBuf,
    /// Battle tunables; defaults apply when absent.
    pub battle_config: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        let data = bundled_data_dir();
        Self {
            encounter: data.join("encounters/goblin_den.ron"),
            skills: data.join("skills.ron"),
            battle_config: Some(data.join("battle.toml")),
            seed: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `BATTLE_ENCOUNTER`
    /// - `BATTLE_SKILLS`
    /// - `BATTLE_CONFIG`
    /// - `BATTLE_SEED`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("BATTLE_ENCOUNTER") {
            config.encounter = path.into();
        }
        if let Some(path) = lookup("BATTLE_SKILLS") {
            config.skills = path.into();
        }
        if let Some(path) = lookup("BATTLE_CONFIG") {
            config.battle_config = Some(path.into());
        }
        config.seed = lookup("BATTLE_SEED").and_then(|seed| seed.parse().ok());

        config
    }
}
