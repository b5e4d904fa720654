use std::env;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::map::HospitalMap;

/// Environment variable that points at a map data file.
pub const MAP_ENV_VAR: &str = "WAYFINDER_MAP";

/// Default filename for the map data file in the platform data directory.
pub const MAP_FILENAME: &str = "hospital_map.json";

/// Map bundled with the library, used when no map data has been installed.
const SAMPLE_MAP_JSON: &str = include_str!("../data/sample_hospital.json");

static DEFAULT_MAP_PATH: Lazy<Option<PathBuf>> = Lazy::new(|| {
    ProjectDirs::from("org", "wayfinder", "wayfinder")
        .map(|dirs| dirs.data_dir().join(MAP_FILENAME))
});

/// Where map data is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapSource {
    File(PathBuf),
    BundledSample,
}

impl fmt::Display for MapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapSource::File(path) => write!(f, "{}", path.display()),
            MapSource::BundledSample => f.write_str("bundled sample map"),
        }
    }
}

/// Resolve the default map location using platform-specific project directories.
pub fn default_map_path() -> Result<PathBuf> {
    DEFAULT_MAP_PATH.clone().ok_or(Error::ProjectDirsUnavailable)
}

/// Decide which map data to load.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `WAYFINDER_MAP` environment variable.
/// 3. `hospital_map.json` in the platform data directory.
/// 4. The bundled sample map.
///
/// Paths requested through 1 or 2 must exist.
pub fn resolve_map_source(target: Option<&Path>) -> Result<MapSource> {
    resolve_with(target, env::var_os(MAP_ENV_VAR), default_map_path())
}

fn resolve_with(
    target: Option<&Path>,
    env_path: Option<OsString>,
    default: Result<PathBuf>,
) -> Result<MapSource> {
    if let Some(explicit) = target {
        return existing(explicit.to_path_buf());
    }

    if let Some(env_path) = env_path.filter(|value| !value.is_empty()) {
        debug!("using map data from {}", MAP_ENV_VAR);
        return existing(PathBuf::from(env_path));
    }

    match default {
        Ok(path) if path.is_file() => Ok(MapSource::File(path)),
        Ok(path) => {
            warn!(
                "no map data at {}; falling back to the bundled sample map",
                path.display()
            );
            Ok(MapSource::BundledSample)
        }
        Err(error) => {
            warn!(%error, "falling back to the bundled sample map");
            Ok(MapSource::BundledSample)
        }
    }
}

fn existing(path: PathBuf) -> Result<MapSource> {
    if path.is_file() {
        Ok(MapSource::File(path))
    } else {
        Err(Error::MapNotFound { path })
    }
}

/// Load and validate the map from `source`.
pub fn load_map(source: &MapSource) -> Result<HospitalMap> {
    let map = match source {
        MapSource::File(path) => parse_map(&fs::read_to_string(path)?)?,
        MapSource::BundledSample => sample_map()?,
    };
    info!(
        map = %map.name,
        floors = map.floors.len(),
        "loaded map data from {}",
        source
    );
    Ok(map)
}

/// Parse map JSON, attach floor ids to locations and validate the result.
pub fn parse_map(json: &str) -> Result<HospitalMap> {
    let mut map: HospitalMap = serde_json::from_str(json)?;
    map.assign_floor_ids();
    map.validate()?;
    Ok(map)
}

/// The bundled "General Hospital" sample map.
pub fn sample_map() -> Result<HospitalMap> {
    parse_map(SAMPLE_MAP_JSON)
}
