//! Runtime settings read from the environment (and `.env`, loaded in `main`).

use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "flipkart_com-ecommerce_sample.csv";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// How each request seeds its random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Fresh OS entropy per request.
    Entropy,
    /// Every request starts from the same seed. Useful for demos and tests.
    Fixed(u64),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// File name of the catalog CSV.
    pub data_file: String,
    /// Extra directory searched before the working directory and its parent.
    pub data_dir: Option<PathBuf>,
    pub bind_addr: String,
    pub seed: SeedPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            data_dir: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            seed: SeedPolicy::Entropy,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let seed = match get("PREDICT_SEED") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(seed) => SeedPolicy::Fixed(seed),
                Err(_) => {
                    tracing::warn!("Ignoring invalid PREDICT_SEED {:?}; using entropy", raw);
                    SeedPolicy::Entropy
                }
            },
            None => SeedPolicy::Entropy,
        };

        Self {
            data_file: get("TREND_DATA_FILE").unwrap_or(defaults.data_file),
            data_dir: get("TREND_DATA_DIR").map(PathBuf::from),
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            seed,
        }
    }

    /// Directories searched for the data file, in priority order.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(dir) = &self.data_dir {
            dirs.push(dir.clone());
        }
        if let Ok(cwd) = std::env::current_dir() {
            let parent = cwd.join("..");
            dirs.push(cwd);
            dirs.push(parent);
        }
        dirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.data_file, DEFAULT_DATA_FILE);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.data_dir, None);
        assert_eq!(config.seed, SeedPolicy::Entropy);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("TREND_DATA_FILE", "catalog.csv"),
            ("TREND_DATA_DIR", "/srv/data"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("PREDICT_SEED", "42"),
        ]));
        assert_eq!(config.data_file, "catalog.csv");
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/data")));
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.seed, SeedPolicy::Fixed(42));
    }

    #[test]
    fn test_invalid_seed_falls_back() {
        let config = Config::from_lookup(lookup(&[("PREDICT_SEED", "soon"), ("BIND_ADDR", "  ")]));
        assert_eq!(config.seed, SeedPolicy::Entropy);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_search_dirs_order() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/data")),
            ..Config::default()
        };
        let dirs = config.search_dirs();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(dirs, vec![PathBuf::from("/srv/data"), cwd.clone(), cwd.join("..")]);
    }
}
