//! rpm-provenance: installed RPM packages as in-toto material provenance.
//!
//! Enumerates the packages installed on a host through a dnf- or yum-style
//! package source and records each as a package URL plus digest, so a build
//! can capture what was installed on the machine that produced it.
//!
//! # Quick Start
//!
//! ```no_run
//! use rpm_provenance::config::Config;
//! use rpm_provenance::ir::Provider;
//! use rpm_provenance::output::Destination;
//! use rpm_provenance::{run, RunOptions};
//!
//! let options = RunOptions {
//!     config: Config::default(),
//!     destination: Destination::Stdout,
//! };
//! let written = run(Provider::Dnf, &options).unwrap();
//! eprintln!("{} packages recorded", written);
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod ir;
pub mod output;
pub mod provenance;

use adapter::PackageSource;
use config::Config;
use error::Result;
use ir::Provider;
use output::Destination;
use provenance::ProvenanceDocument;

/// Options for one provenance run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Package database locations.
    pub config: Config,
    /// Output file, or standard output.
    pub destination: Destination,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: Config::default(),
            destination: Destination::Stdout,
        }
    }
}

/// Enumerate installed packages and build their provenance document.
pub fn generate(source: &dyn PackageSource) -> Result<ProvenanceDocument> {
    let packages = source.installed_packages()?;
    tracing::debug!(
        provider = %source.provider(),
        packages = packages.len(),
        "enumerated installed packages"
    );
    Ok(provenance::build_document(&packages))
}

/// Open the provider's package source, build the document, and write it.
///
/// Returns the number of entries written.
pub fn run(provider: Provider, options: &RunOptions) -> Result<usize> {
    let source = adapter::open_source(provider, &options.config)?;
    let document = generate(source.as_ref())?;
    output::emit(&document, &options.destination)?;
    Ok(document.len())
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::error::ProvenanceError;
    use crate::ir::{Epoch, PackageChecksum, PackageDescriptor};
    use pretty_assertions::assert_eq;

    struct StaticSource(Vec<PackageDescriptor>);

    impl PackageSource for StaticSource {
        fn provider(&self) -> Provider {
            Provider::Dnf
        }

        fn installed_packages(&self) -> Result<Vec<PackageDescriptor>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    impl PackageSource for BrokenSource {
        fn provider(&self) -> Provider {
            Provider::Yum
        }

        fn installed_packages(&self) -> Result<Vec<PackageDescriptor>> {
            Err(ProvenanceError::MissingField {
                package: "bash".into(),
                field: "checksum_data",
            })
        }
    }

    fn package(name: &str, epoch: Epoch, checksum: PackageChecksum) -> PackageDescriptor {
        PackageDescriptor {
            name: name.into(),
            vendor: "Fedora Project".into(),
            epoch,
            version: "1.0".into(),
            release: "1.fc39".into(),
            arch: "x86_64".into(),
            checksum,
        }
    }

    #[test]
    fn generate_then_emit_to_file() {
        let source = StaticSource(vec![
            package("zlib", Epoch::Number(0), PackageChecksum::sha1_raw(vec![0xaa])),
            package("bind", Epoch::Number(32), PackageChecksum::sha1_raw(vec![0x0b])),
        ]);
        let document = generate(&source).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("materials.json");
        output::emit(&document, &Destination::File(path.clone())).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!([
                {
                    "uri": "pkg:rpm/Fedora%20Project/zlib@1.0-1.fc39?arch=x86_64",
                    "digest": {"sha1": "aa"}
                },
                {
                    "uri": "pkg:rpm/Fedora%20Project/bind@32:1.0-1.fc39?arch=x86_64",
                    "digest": {"sha1": "0b"}
                }
            ])
        );
    }

    #[test]
    fn empty_database_yields_empty_document() {
        let document = generate(&StaticSource(Vec::new())).unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn source_errors_propagate() {
        let err = generate(&BrokenSource).unwrap_err();
        assert!(matches!(err, ProvenanceError::MissingField { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn dnf_run_writes_installed_packages() {
        use crate::adapter::testutil::{fake_rpm, QUERY_OUTPUT};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("materials.json");
        let mut options = RunOptions {
            destination: Destination::File(path.clone()),
            ..RunOptions::default()
        };
        options.config.rpm = fake_rpm(dir.path(), QUERY_OUTPUT);

        assert_eq!(run(Provider::Dnf, &options).unwrap(), 2);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[{\"uri\": \"pkg:rpm/Red%20Hat%2C%20Inc./bash@4.4.20-3.el8?arch=x86_64\", \
             \"digest\": {\"sha1\": \"deadbeef\"}}, \
             {\"uri\": \"pkg:rpm/Red%20Hat%2C%20Inc./perl-IO@1:1.38-416.el8?arch=x86_64\", \
             \"digest\": {\"sha1\": \"00ff\"}}]"
        );
    }

    #[cfg(unix)]
    #[test]
    fn yum_run_writes_installed_packages() {
        use crate::adapter::testutil::{fake_rpm, QUERY_OUTPUT};

        let dir = tempfile::tempdir().unwrap();
        let yumdb = dir.path().join("yumdb");
        for (pkg, checksum) in [
            ("b/deadbeef-bash-4.4.20-3.el8-x86_64", "9f86d081"),
            ("p/00ff-perl-IO-1.38-416.el8-x86_64", "60303ae2"),
        ] {
            let pkg_dir = yumdb.join(pkg);
            std::fs::create_dir_all(&pkg_dir).unwrap();
            std::fs::write(pkg_dir.join("checksum_data"), checksum).unwrap();
            std::fs::write(pkg_dir.join("checksum_type"), "sha256").unwrap();
        }

        let path = dir.path().join("materials.json");
        let mut options = RunOptions {
            destination: Destination::File(path.clone()),
            ..RunOptions::default()
        };
        options.config.rpm = fake_rpm(dir.path(), QUERY_OUTPUT);
        options.config.yumdb_path = yumdb;

        assert_eq!(run(Provider::Yum, &options).unwrap(), 2);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[{\"uri\": \"pkg:rpm/Red%20Hat%2C%20Inc./bash@4.4.20-3.el8?arch=x86_64\", \
             \"digest\": {\"sha256\": \"9f86d081\"}}, \
             {\"uri\": \"pkg:rpm/Red%20Hat%2C%20Inc./perl-IO@1:1.38-416.el8?arch=x86_64\", \
             \"digest\": {\"sha256\": \"60303ae2\"}}]"
        );
    }

    #[test]
    fn run_fails_before_writing_when_database_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("materials.json");
        let mut options = RunOptions {
            destination: Destination::File(path.clone()),
            ..RunOptions::default()
        };
        options.config.yumdb_path = dir.path().join("no-yumdb");

        let err = run(Provider::Yum, &options).unwrap_err();
        assert!(matches!(
            err,
            ProvenanceError::CollaboratorUnavailable { .. }
        ));
        assert!(!path.exists());
    }
}
