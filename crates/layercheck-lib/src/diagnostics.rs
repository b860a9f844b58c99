//! Packaging diagnostics for the driver layer.
//!
//! Collects the library search path, the contents of the driver installation
//! directory and the dynamic dependencies of the driver binary. None of this
//! influences the probe result; each part records its own failure as text.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use tracing::info;

use crate::config::{env_value, ProbeConfig};
use crate::error::{Error, Result};

/// Environment variable consulted by the dynamic loader.
pub const LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// Tracing target of the diagnostic events. Lambda logging keeps this target
/// at `info` whatever `RUST_LOG` says.
pub const DIAGNOSTICS_TARGET: &str = "layercheck::diagnostics";

const DEPENDENCY_TOOL: &str = "ldd";

/// Kind of a directory entry in a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Other,
}

/// One line of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntrySummary {
    pub name: String,
    pub kind: EntryKind,
    pub len: u64,
    /// Link target, for symlinks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
}

impl fmt::Display for DirEntrySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            EntryKind::File => '-',
            EntryKind::Dir => 'd',
            EntryKind::Symlink => 'l',
            EntryKind::Other => '?',
        };
        write!(f, "{marker} {:>12} {}", self.len, self.name)?;
        if let Some(target) = &self.target {
            write!(f, " -> {}", target.display())?;
        }
        Ok(())
    }
}

/// Everything the diagnostic probe reports before connecting.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub library_path: Option<String>,
    pub driver_dir: PathBuf,
    pub driver_dir_listing: std::result::Result<Vec<DirEntrySummary>, String>,
    pub driver_path: PathBuf,
    pub driver_dependencies: std::result::Result<String, String>,
}

impl DiagnosticReport {
    /// Emit the report as tracing events.
    pub fn log(&self) {
        info!(
            target: DIAGNOSTICS_TARGET,
            variable = LIBRARY_PATH_VAR,
            library_path = self.library_path.as_deref().unwrap_or("<unset>"),
            "library search path"
        );

        match &self.driver_dir_listing {
            Ok(entries) => info!(
                target: DIAGNOSTICS_TARGET,
                dir = %self.driver_dir.display(),
                entries = entries.len(),
                listing = %render_listing(entries),
                "driver directory listing"
            ),
            Err(e) => info!(
                target: DIAGNOSTICS_TARGET,
                dir = %self.driver_dir.display(),
                error = %e,
                "driver directory listing unavailable"
            ),
        }

        match &self.driver_dependencies {
            Ok(deps) => info!(
                target: DIAGNOSTICS_TARGET,
                driver = %self.driver_path.display(),
                dependencies = %deps.trim_end(),
                "driver dependency listing"
            ),
            Err(e) => info!(
                target: DIAGNOSTICS_TARGET,
                driver = %self.driver_path.display(),
                error = %e,
                "driver dependency listing unavailable"
            ),
        }
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{LIBRARY_PATH_VAR}: {}",
            self.library_path.as_deref().unwrap_or("<unset>")
        )?;

        writeln!(f, "Driver directory {}:", self.driver_dir.display())?;
        match &self.driver_dir_listing {
            Ok(entries) if entries.is_empty() => writeln!(f, "  (empty)")?,
            Ok(entries) => {
                for entry in entries {
                    writeln!(f, "  {entry}")?;
                }
            }
            Err(e) => writeln!(f, "  error: {e}")?,
        }

        writeln!(f, "Driver dependencies {}:", self.driver_path.display())?;
        match &self.driver_dependencies {
            Ok(deps) => {
                for line in deps.lines() {
                    writeln!(f, "  {}", line.trim())?;
                }
            }
            Err(e) => writeln!(f, "  error: {e}")?,
        }
        Ok(())
    }
}

/// Gather the diagnostic report for the configured driver.
pub fn collect_diagnostics(config: &ProbeConfig) -> DiagnosticReport {
    let driver_dir = config.driver_dir().to_path_buf();
    DiagnosticReport {
        library_path: env_value(LIBRARY_PATH_VAR),
        driver_dir_listing: list_directory(&driver_dir).map_err(|e| e.to_string()),
        driver_dir,
        driver_path: config.driver_path.clone(),
        driver_dependencies: dependency_listing(&config.driver_path).map_err(|e| e.to_string()),
    }
}

/// List a directory, sorted by entry name. Symlinks are not followed.
pub fn list_directory(dir: &Path) -> Result<Vec<DirEntrySummary>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = fs::symlink_metadata(entry.path())?;
        let file_type = metadata.file_type();
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        let target = if kind == EntryKind::Symlink {
            fs::read_link(entry.path()).ok()
        } else {
            None
        };
        entries.push(DirEntrySummary {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
            len: metadata.len(),
            target,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Run `ldd` against a binary and return its standard output.
pub fn dependency_listing(binary: &Path) -> Result<String> {
    let output = Command::new(DEPENDENCY_TOOL).arg(binary).output()?;
    if !output.status.success() {
        return Err(Error::CommandFailed {
            command: DEPENDENCY_TOOL.to_string(),
            target: binary.to_path_buf(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn render_listing(entries: &[DirEntrySummary]) -> String {
    entries
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_directory_sorted_with_kinds() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("libb.so"), b"12345").unwrap();
        fs::write(dir.path().join("liba.so"), b"1").unwrap();
        fs::create_dir(dir.path().join("include")).unwrap();

        let entries = list_directory(dir.path()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["include", "liba.so", "libb.so"]);
        assert_eq!(entries[0].kind, EntryKind::Dir);
        assert_eq!(entries[2].kind, EntryKind::File);
        assert_eq!(entries[2].len, 5);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_report_their_target() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("libdriver.so.1.1"), b"elf").unwrap();
        std::os::unix::fs::symlink("libdriver.so.1.1", dir.path().join("libdriver.so")).unwrap();

        let entries = list_directory(dir.path()).unwrap();
        let link = entries.iter().find(|e| e.name == "libdriver.so").unwrap();
        assert_eq!(link.kind, EntryKind::Symlink);
        assert_eq!(link.target.as_deref(), Some(Path::new("libdriver.so.1.1")));
        assert!(link.to_string().contains("-> libdriver.so.1.1"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("lib64");
        assert!(matches!(list_directory(&missing), Err(Error::Io(_))));
    }

    #[test]
    fn dependency_listing_of_missing_binary_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("libmissing.so");
        // Either ldd reports the missing file or ldd itself is absent.
        assert!(dependency_listing(&missing).is_err());
    }

    #[test]
    fn report_records_failures_as_text() {
        let dir = tempdir().unwrap();
        let config = ProbeConfig {
            driver_path: dir.path().join("lib64").join("libmissing.so"),
            ..ProbeConfig::default()
        };

        let report = collect_diagnostics(&config);
        assert_eq!(report.driver_dir, dir.path().join("lib64"));
        assert!(report.driver_dir_listing.is_err());
        assert!(report.driver_dependencies.is_err());

        let text = report.to_string();
        assert!(text.contains("Driver directory"));
        assert!(text.contains("error:"));
        report.log();
    }

    #[test]
    fn report_serializes_listing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("libdriver.so"), b"").unwrap();
        let config = ProbeConfig {
            driver_path: dir.path().join("libdriver.so"),
            ..ProbeConfig::default()
        };

        let report = collect_diagnostics(&config);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json["driver_dir_listing"]["Ok"][0]["name"],
            serde_json::json!("libdriver.so")
        );
        assert_eq!(
            json["driver_dir_listing"]["Ok"][0]["kind"],
            serde_json::json!("file")
        );
    }
}
