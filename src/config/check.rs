//! `config --check`: find keys missing from the configuration file and
//! fill them with their defaults.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys present in the defaults but absent from `content`.
pub fn missing_keys(content: &str) -> AppResult<Vec<String>> {
    let current = parse_mapping(content)?;
    let defaults = defaults_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(String::from))
        .collect())
}

/// Add missing keys with default values to the file. Existing values are
/// never changed. Returns the keys that were added.
pub fn fill_missing(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let mut current = parse_mapping(&content)?;
    let defaults = defaults_mapping()?;

    let mut added = Vec::new();
    for (k, v) in defaults {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            current.insert(k, v);
        }
    }

    if !added.is_empty() {
        let yaml = serde_yaml::to_string(&current).map_err(|_| AppError::ConfigSave)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
    }

    Ok(added)
}

fn parse_mapping(content: &str) -> AppResult<Mapping> {
    match serde_yaml::from_str::<Value>(content) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(AppError::Config("configuration root must be a mapping".into())),
        Err(e) => Err(AppError::Config(e.to_string())),
    }
}

fn defaults_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default()) {
        Ok(Value::Mapping(m)) => Ok(m),
        _ => Err(AppError::Config("cannot build default configuration".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_and_fills_missing_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pec.conf");
        fs::write(&path, "database: /tmp/x.sqlite\noperator: bia\n").unwrap();

        let missing = missing_keys(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(missing, vec!["access_log_dir", "separator_char"]);

        let added = fill_missing(&path).unwrap();
        assert_eq!(added, missing);

        let cfg: Config = serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cfg.operator, "bia");
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert!(fill_missing(&path).unwrap().is_empty());
    }
}
