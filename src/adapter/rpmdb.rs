//! Installed-package enumeration through the `rpm` query interface.

use std::process::Command;

use crate::config::RpmConfig;
use crate::error::{ProvenanceError, Result};
use crate::ir::Provider;

/// Placeholder `rpm` prints for a tag the header does not carry.
const NONE: &str = "(none)";

/// Headers `rpm --import` writes for trusted keys. Neither dnf nor yum
/// lists them as installed packages.
const PUBKEY_NAME: &str = "gpg-pubkey";

/// One tab-separated record per installed package, in database order.
const QUERY_FORMAT: &str =
    "%{NAME}\t%{EPOCH}\t%{VERSION}\t%{RELEASE}\t%{ARCH}\t%{VENDOR}\t%{SHA1HEADER}\n";

const COLUMNS: [&str; 7] = [
    "name",
    "epoch",
    "version",
    "release",
    "arch",
    "vendor",
    "sha1header",
];

/// Header fields of one installed package, as `rpm` reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpmRecord {
    pub name: String,
    /// `None` when the header has no epoch tag.
    pub epoch: Option<String>,
    pub version: String,
    pub release: String,
    pub arch: String,
    /// Empty when the header has no vendor tag.
    pub vendor: String,
    /// Hex SHA1 of the package header; `None` when absent.
    pub sha1header: Option<String>,
}

/// Handle on the host's (or a configured root's) rpm database.
#[derive(Debug, Clone)]
pub struct RpmDatabase {
    provider: Provider,
    config: RpmConfig,
}

impl RpmDatabase {
    /// Check that any configured root or database directory exists.
    ///
    /// The database itself is only read when `query` runs.
    pub fn open(provider: Provider, config: &RpmConfig) -> Result<Self> {
        for dir in [&config.root, &config.dbpath].into_iter().flatten() {
            if !dir.is_dir() {
                return Err(ProvenanceError::unavailable(
                    provider,
                    format!("{} is not a directory", dir.display()),
                ));
            }
        }
        Ok(Self {
            provider,
            config: config.clone(),
        })
    }

    /// Run `rpm -qa` and parse every installed package.
    pub fn query(&self) -> Result<Vec<RpmRecord>> {
        let mut cmd = Command::new(&self.config.command);
        if let Some(root) = &self.config.root {
            cmd.arg("--root").arg(root);
        }
        if let Some(dbpath) = &self.config.dbpath {
            cmd.arg("--dbpath").arg(dbpath);
        }
        cmd.arg("-qa").arg("--queryformat").arg(QUERY_FORMAT);

        tracing::debug!(command = ?cmd, "querying rpm database");

        let output = cmd.output().map_err(|e| {
            ProvenanceError::unavailable(
                self.provider,
                format!("failed to run {}: {}", self.config.command.display(), e),
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProvenanceError::unavailable(
                self.provider,
                format!(
                    "{} exited with {}: {}",
                    self.config.command.display(),
                    output.status,
                    stderr.trim()
                ),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let records = parse_query_output(&stdout)?;
        tracing::debug!(count = records.len(), "rpm database query complete");
        Ok(records)
    }
}

/// Parse the output of `rpm -qa --queryformat QUERY_FORMAT`.
///
/// Imported signing keys are skipped.
pub fn parse_query_output(output: &str) -> Result<Vec<RpmRecord>> {
    let mut records = Vec::new();
    for line in output.lines().filter(|line| !line.trim().is_empty()) {
        let record = parse_record(line)?;
        if record.name == PUBKEY_NAME {
            tracing::debug!(
                version = %record.version,
                release = %record.release,
                "skipping imported signing key"
            );
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

fn parse_record(line: &str) -> Result<RpmRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    let package = fields.first().copied().unwrap_or_default().to_string();
    if fields.len() < COLUMNS.len() {
        return Err(ProvenanceError::MissingField {
            package,
            field: COLUMNS[fields.len()],
        });
    }
    // A tab inside any value would shift every later column.
    if fields.len() > COLUMNS.len() {
        return Err(ProvenanceError::InvalidField {
            package,
            field: "record",
            value: line.to_string(),
        });
    }

    Ok(RpmRecord {
        name: fields[0].to_string(),
        epoch: present(fields[1]),
        version: fields[2].to_string(),
        release: fields[3].to_string(),
        arch: fields[4].to_string(),
        vendor: present(fields[5]).unwrap_or_default(),
        sha1header: present(fields[6]),
    })
}

fn present(field: &str) -> Option<String> {
    if field == NONE {
        None
    } else {
        Some(field.to_string())
    }
}
