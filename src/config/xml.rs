//! XML configuration support.
//! Loads settings from config.xml (quick_xml) and writes a template with
//! conservative permissions at the default location when nothing exists yet.
//! The file is optional: a missing or malformed config leaves the built-in
//! defaults in effect.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::types::{Config, LogLevel};
use super::{CONFIG_ENV, paths::default_config_path};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    source_base: Option<String>,
    target_base: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    dry_run: Option<bool>,
}

/// Read the config file if one exists and fold it into `cfg`.
///
/// When no file exists at the default location (and `FILE_MOVER_CONFIG` is
/// unset) a template is written there so users get a starting point; the
/// current run continues with defaults either way. Unknown fields and parse
/// errors are logged and the file is ignored.
pub fn load_config(cfg: &mut Config) {
    let env_set = env::var_os(CONFIG_ENV).is_some();
    let Some(cfg_path) = default_config_path() else {
        return;
    };

    if !cfg_path.exists() {
        if !env_set {
            if let Err(e) = create_template_config(&cfg_path) {
                debug!(path = %cfg_path.display(), error = %e, "Could not write template config");
            }
        }
        return;
    }

    let content = match fs::read_to_string(&cfg_path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %cfg_path.display(), error = %e, "Could not read config file; using defaults");
            return;
        }
    };

    let parsed: XmlConfig = match from_xml_str(&content) {
        Ok(x) => x,
        Err(e) => {
            warn!(path = %cfg_path.display(), error = %e, "Malformed config file; using defaults");
            return;
        }
    };

    if let Some(sb) = parsed.source_base.as_deref().map(str::trim)
        && !sb.is_empty()
    {
        cfg.source_base = Some(PathBuf::from(sb));
    }
    if let Some(tb) = parsed.target_base.as_deref().map(str::trim)
        && !tb.is_empty()
    {
        cfg.target_base = Some(PathBuf::from(tb));
    }
    if let Some(lvl) = parsed.log_level.as_deref().and_then(LogLevel::parse) {
        cfg.log_level = lvl;
    }
    if let Some(lf) = parsed.log_file.as_deref().map(str::trim)
        && !lf.is_empty()
    {
        cfg.log_file = Some(PathBuf::from(lf));
    }
    if let Some(dr) = parsed.dry_run {
        cfg.dry_run = dr;
    }

    debug!(path = %cfg_path.display(), "Loaded config file");
}

/// Write a commented starter config. On Unix the directory gets 0700 and the
/// file 0600.
pub fn create_template_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let content = "<config>\n  \
        <!-- Defaults offered by interactive mode; leave empty to always ask. -->\n  \
        <source_base></source_base>\n  \
        <target_base></target_base>\n  \
        <log_level>normal</log_level>\n\
        </config>\n";

    fs::write(path, content).with_context(|| format!("write '{}'", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }

    info!(path = %path.display(), "Created template config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn load_from(path: &Path) -> Config {
        // SAFETY: tests are serialized; no other thread reads the environment.
        unsafe { env::set_var(CONFIG_ENV, path) };
        let mut cfg = Config::default();
        load_config(&mut cfg);
        unsafe { env::remove_var(CONFIG_ENV) };
        cfg
    }

    #[test]
    #[serial]
    fn reads_bases_and_level() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(
            &path,
            "<config>\n  <source_base>/tmp/in</source_base>\n  \
             <target_base>/tmp/out</target_base>\n  <log_level>debug</log_level>\n</config>",
        )
        .unwrap();

        let cfg = load_from(&path);
        assert_eq!(cfg.source_base.as_deref(), Some(Path::new("/tmp/in")));
        assert_eq!(cfg.target_base.as_deref(), Some(Path::new("/tmp/out")));
        assert_eq!(cfg.log_level, LogLevel::Debug);
    }

    #[test]
    #[serial]
    fn malformed_file_falls_back_to_defaults() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(&path, "<config><source_base>/tmp/in").unwrap();

        let cfg = load_from(&path);
        assert!(cfg.source_base.is_none());
        assert_eq!(cfg.log_level, LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn unknown_fields_are_rejected_not_fatal() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(
            &path,
            "<config><mystery>1</mystery><log_level>debug</log_level></config>",
        )
        .unwrap();

        let cfg = load_from(&path);
        // deny_unknown_fields makes the whole file invalid; defaults remain.
        assert_eq!(cfg.log_level, LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn missing_explicit_file_creates_no_template() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        let cfg = load_from(&path);
        assert!(cfg.source_base.is_none());
        assert!(!path.exists(), "no template at an explicit location");
    }

    #[test]
    fn template_is_parseable() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        create_template_config(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let parsed: Result<XmlConfig, _> = from_xml_str(&content);
        assert!(parsed.is_ok(), "template must parse: {parsed:?}");
    }
}
