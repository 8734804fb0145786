use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "tree-builder.yaml";

const INPUT_KEY: &str = "input";
const OUTPUT_KEY: &str = "output";
const KNOWN_KEYS: [&str; 2] = [INPUT_KEY, OUTPUT_KEY];

fn get_config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Settings read from the optional config file. Unset fields fall back to
/// command line flags or built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuilderConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl BuilderConfig {
    pub async fn read(root: &Path) -> Result<Self, ConfigError> {
        Self::from_path(get_config_file_path(root)).await
    }

    /// A missing file is not an error and yields the default config.
    pub async fn from_path(path: PathBuf) -> Result<Self, ConfigError> {
        debug!("Opening config file: {}", path.display());
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).context(ReadSnafu {
                    file_path: path.display().to_string(),
                });
            }
        };
        debug!("Successfully read config file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.display().to_string(),
        })?;
        contents.as_str().try_into()
    }

    fn path_value(
        top_level: &LinkedHashMap<Yaml, Yaml>,
        key: &'static str,
    ) -> Result<Option<PathBuf>, ConfigError> {
        match top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(key)))) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|path| Some(PathBuf::from(path)))
                .context(InvalidValueSnafu { key }),
        }
    }

    fn warn_unknown_keys(top_level: &LinkedHashMap<Yaml, Yaml>) {
        for key in top_level.keys() {
            match key.as_str() {
                Some(name) if KNOWN_KEYS.contains(&name) => {}
                Some(name) => warn!("Ignoring unknown config key '{}'", name),
                None => warn!("Ignoring non-string config key: {:?}", key),
            }
        }
    }
}

impl TryFrom<&str> for BuilderConfig {
    type Error = ConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;

        // A file holding only comments has no document at all.
        let Some(document) = documents.first() else {
            return Ok(Self::default());
        };

        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;
        Self::warn_unknown_keys(top_level);

        Ok(BuilderConfig {
            input: Self::path_value(top_level, INPUT_KEY)?,
            output: Self::path_value(top_level, OUTPUT_KEY)?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("The config file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config key '{}' should be a string path", key))]
    InvalidValue { key: String },
}
