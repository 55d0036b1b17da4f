use crate::config::RpmConfig;
use crate::error::{ProvenanceError, Result};
use crate::ir::{Epoch, PackageChecksum, PackageDescriptor, Provider};

use super::rpmdb::{RpmDatabase, RpmRecord};

/// dnf-style source.
///
/// Installed packages carry no content checksum, so the SHA1 of the
/// package header stands in for one. Epochs are integers.
pub struct DnfSource {
    db: RpmDatabase,
}

impl DnfSource {
    pub fn open(config: &RpmConfig) -> Result<Self> {
        Ok(Self {
            db: RpmDatabase::open(Provider::Dnf, config)?,
        })
    }
}

impl super::PackageSource for DnfSource {
    fn provider(&self) -> Provider {
        Provider::Dnf
    }

    fn installed_packages(&self) -> Result<Vec<PackageDescriptor>> {
        self.db
            .query()?
            .into_iter()
            .map(descriptor_from_record)
            .collect()
    }
}

pub(crate) fn descriptor_from_record(record: RpmRecord) -> Result<PackageDescriptor> {
    let epoch = match record.epoch.as_deref() {
        None => 0,
        Some(text) => text.parse::<u32>().map_err(|_| ProvenanceError::InvalidField {
            package: record.name.clone(),
            field: "epoch",
            value: text.to_string(),
        })?,
    };

    let header = record
        .sha1header
        .as_deref()
        .ok_or_else(|| ProvenanceError::MissingField {
            package: record.name.clone(),
            field: "sha1header",
        })?;
    let bytes = hex::decode(header).map_err(|_| ProvenanceError::InvalidField {
        package: record.name.clone(),
        field: "sha1header",
        value: header.to_string(),
    })?;

    Ok(PackageDescriptor {
        name: record.name,
        vendor: record.vendor,
        epoch: Epoch::Number(epoch),
        version: record.version,
        release: record.release,
        arch: record.arch,
        checksum: PackageChecksum::sha1_raw(bytes),
    })
}
