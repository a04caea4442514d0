use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Flags accepted both on the command line and in config files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_lint: bool,
    pub debounce_ms: Option<u64>,
}

impl ConfigFlags {
    /// Merge with `other` taking precedence for valued options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_lint: self.no_lint || other.no_lint,
            debounce_ms: other.debounce_ms.or(self.debounce_ms),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("htmlive").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("htmlive")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("htmlive").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("htmlive")
                .join("config");
        }
    }

    PathBuf::from(".htmliverc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".htmliverc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-lint" {
            flags.no_lint = true;
        } else if token == "--debounce-ms" {
            if let Some(next) = tokens.get(i + 1) {
                flags.debounce_ms = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--debounce-ms=") {
            flags.debounce_ms = value.parse().ok();
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "htmlive".to_string(),
            "--no-lint".to_string(),
            "--debounce-ms".to_string(),
            "150".to_string(),
            "page.html".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert!(flags.no_lint);
        assert_eq!(flags.debounce_ms, Some(150));
    }

    #[test]
    fn test_parse_flag_tokens_equals_form() {
        let args = vec!["--debounce-ms=500".to_string()];
        assert_eq!(parse_flag_tokens(&args).debounce_ms, Some(500));
    }

    #[test]
    fn test_parse_flag_tokens_ignores_bad_value() {
        let args = vec!["--debounce-ms".to_string(), "soon".to_string()];
        assert_eq!(parse_flag_tokens(&args).debounce_ms, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file() {
        let file = ConfigFlags {
            no_lint: true,
            debounce_ms: Some(200),
        };
        let cli = ConfigFlags {
            no_lint: false,
            debounce_ms: Some(500),
        };
        let merged = file.union(&cli);
        assert!(merged.no_lint);
        assert_eq!(merged.debounce_ms, Some(500));
    }

    #[test]
    fn test_load_config_skips_comments_and_blanks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".htmliverc");
        fs::write(&path, "# defaults\n\n--no-lint\n--debounce-ms 100\n").unwrap();
        let flags = load_config_flags(&path).unwrap();
        assert!(flags.no_lint);
        assert_eq!(flags.debounce_ms, Some(100));
    }

    #[test]
    fn test_load_missing_config_is_default() {
        let flags = load_config_flags(Path::new("/nonexistent/.htmliverc")).unwrap();
        assert_eq!(flags, ConfigFlags::default());
    }
}
