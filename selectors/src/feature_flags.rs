use {
  serde::{Deserialize, Serialize},
  serde_json::Value,
  std::path::Path,
  thiserror::Error,
  tracing::info,
  vantage_primitives::FlagMap,
};

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("Failed to read manifest flags: {0}")]
  Io(#[from] std::io::Error),

  #[error("Malformed manifest flags: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("Manifest flags must be a JSON object")]
  NotAnObject,
}

/// Flags baked into the build. They take precedence over the flags
/// delivered at runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestFlags {
  #[serde(default)]
  pub remote_feature_flags: FlagMap,
}

impl ManifestFlags {
  pub fn from_json(json: &str) -> Result<Self, ManifestError> {
    match serde_json::from_str(json)? {
      value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
      _ => Err(ManifestError::NotAnObject),
    }
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
    let path = path.as_ref();
    let flags = Self::from_json(&std::fs::read_to_string(path)?)?;
    info!(
      "loaded {} manifest flags from {}",
      flags.remote_feature_flags.len(),
      path.display()
    );
    Ok(flags)
  }
}

/// Overlays static flags on runtime flags.
///
/// Static values win on collision, except when both sides hold an
/// object, then the two objects are merged the same way. Keys present
/// only at runtime are kept.
pub fn merge_flags(statics: &FlagMap, runtime: &FlagMap) -> FlagMap {
  let mut merged = runtime.clone();
  for (key, value) in statics {
    let combined = match (value, merged.get(key)) {
      (Value::Object(ours), Some(Value::Object(theirs))) => {
        Value::Object(merge_flags(ours, theirs))
      }
      _ => value.clone(),
    };
    merged.insert(key.clone(), combined);
  }
  merged
}

/// True when the flag is present and set to `true`.
pub fn flag_enabled(flags: &FlagMap, name: &str) -> bool {
  matches!(flags.get(name), Some(Value::Bool(true)))
}
