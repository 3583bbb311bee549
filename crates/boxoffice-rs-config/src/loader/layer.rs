//! Reading single config layers from disk.

use super::{ConfigLayer, ConfigLayerSource, PROJECT_MARKER, schema};
use crate::ConfigError;
use log::debug;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Parsed layer contents plus where they came from.
pub(super) struct LoadedLayer {
    pub(super) meta: ConfigLayer,
    pub(super) value: Value,
}

/// Read a discovered layer, returning `None` when no file is there.
pub(super) fn read_optional(
    source: ConfigLayerSource,
    path: &Path,
) -> Result<Option<LoadedLayer>, ConfigError> {
    if !path.is_file() {
        debug!("no {} config at {}", source.label(), path.display());
        return Ok(None);
    }
    read(source, path).map(Some)
}

/// Read, parse and schema-check one layer.
pub(super) fn read(source: ConfigLayerSource, path: &Path) -> Result<LoadedLayer, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path: path.to_path_buf(),
        source: err,
    })?;
    let value: Value = json5::from_str(&contents).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        source: err,
    })?;
    let label = format!("{}({})", source.label(), path.display());
    schema::validate_layer_schema(&value, &label)?;
    debug!("read config layer {label}");
    Ok(LoadedLayer {
        meta: ConfigLayer {
            source,
            path: path.to_path_buf(),
        },
        value,
    })
}

/// Canonical form of a layer path, so one file reached twice loads once.
pub(super) fn identity(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Nearest ancestor of `cwd` that holds the project marker.
pub(super) fn project_root(cwd: &Path) -> Option<&Path> {
    cwd.ancestors()
        .find(|dir| dir.join(PROJECT_MARKER).exists())
}

#[cfg(test)]
mod tests {
    use super::{identity, project_root};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn project_root_is_nearest_marked_ancestor() {
        let temp = TempDir::new().expect("tmp");
        let outer = temp.path().join("outer");
        let inner = outer.join("inner");
        let deep = inner.join("a").join("b");
        fs::create_dir_all(outer.join(".git")).expect("outer git");
        fs::create_dir_all(inner.join(".git")).expect("inner git");
        fs::create_dir_all(&deep).expect("deep");
        assert_eq!(project_root(&deep), Some(inner.as_path()));
    }

    #[test]
    fn identity_keeps_missing_paths_as_given() {
        let temp = TempDir::new().expect("tmp");
        let missing = temp.path().join("nope.json5");
        assert_eq!(identity(&missing), missing);
    }
}
