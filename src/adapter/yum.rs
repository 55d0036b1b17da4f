use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::RpmConfig;
use crate::error::{ProvenanceError, Result};
use crate::ir::{Epoch, PackageChecksum, PackageDescriptor, Provider};

use super::rpmdb::{RpmDatabase, RpmRecord};

/// Legacy yum source.
///
/// Checksums come from the yumdb, where yum records the repository
/// checksum of each package it installed. Epochs are strings.
pub struct YumSource {
    db: RpmDatabase,
    yumdb: PathBuf,
}

impl YumSource {
    pub fn open(config: &RpmConfig, yumdb: &Path) -> Result<Self> {
        if !yumdb.is_dir() {
            return Err(ProvenanceError::unavailable(
                Provider::Yum,
                format!("yumdb {} is not a directory", yumdb.display()),
            ));
        }
        Ok(Self {
            db: RpmDatabase::open(Provider::Yum, config)?,
            yumdb: yumdb.to_path_buf(),
        })
    }

    fn descriptor_from_record(&self, record: RpmRecord) -> Result<PackageDescriptor> {
        let dir = self.package_dir(&record)?;
        let checksum = read_value(&dir, "checksum_data")?.ok_or_else(|| {
            ProvenanceError::MissingField {
                package: record.name.clone(),
                field: "checksum_data",
            }
        })?;

        if let Some(kind) = read_value(&dir, "checksum_type")? {
            if kind.trim() != "sha256" {
                tracing::warn!(
                    package = %record.name,
                    checksum_type = %kind.trim(),
                    "yumdb checksum is not sha256, reporting it under sha256 anyway"
                );
            }
        }

        Ok(PackageDescriptor {
            name: record.name,
            vendor: record.vendor,
            epoch: Epoch::Text(record.epoch.unwrap_or_else(|| "0".into())),
            version: record.version,
            release: record.release,
            arch: record.arch,
            checksum: PackageChecksum::sha256_text(checksum),
        })
    }

    /// `{yumdb}/{n[0]}/{pkgid}-{n}-{v}-{r}-{a}`, keyed by the header SHA1.
    fn package_dir(&self, record: &RpmRecord) -> Result<PathBuf> {
        let pkgid = record
            .sha1header
            .as_deref()
            .ok_or_else(|| ProvenanceError::MissingField {
                package: record.name.clone(),
                field: "sha1header",
            })?;
        let initial = record.name.chars().next().ok_or(ProvenanceError::MissingField {
            package: String::new(),
            field: "name",
        })?;
        Ok(self.yumdb.join(initial.to_string()).join(format!(
            "{}-{}-{}-{}-{}",
            pkgid, record.name, record.version, record.release, record.arch
        )))
    }
}

impl super::PackageSource for YumSource {
    fn provider(&self) -> Provider {
        Provider::Yum
    }

    fn installed_packages(&self) -> Result<Vec<PackageDescriptor>> {
        self.db
            .query()?
            .into_iter()
            .map(|record| self.descriptor_from_record(record))
            .collect()
    }
}

fn read_value(dir: &Path, key: &str) -> Result<Option<String>> {
    match std::fs::read_to_string(dir.join(key)) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
