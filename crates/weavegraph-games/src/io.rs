use std::{fs, path::Path};

use crate::{CompiledGame, GameSpec, GameSpecError};

/// Load a table game spec from YAML on disk.
pub fn load_yaml(path: impl AsRef<Path>) -> Result<GameSpec, GameSpecError> {
    let yaml = fs::read_to_string(path)?;
    let spec: GameSpec = serde_yaml::from_str(&yaml)?;
    Ok(spec)
}

/// Load and compile a table game from a YAML file.
pub fn compile_yaml(path: impl AsRef<Path>) -> Result<CompiledGame, GameSpecError> {
    let spec = load_yaml(path)?;
    spec.compile()
}

/// Serialize and write a table game spec to YAML.
pub fn save_yaml(path: impl AsRef<Path>, spec: &GameSpec) -> Result<(), GameSpecError> {
    let yaml = serde_yaml::to_string(spec)?;
    fs::write(path, yaml)?;
    Ok(())
}
