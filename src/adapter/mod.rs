pub mod dnf;
pub mod rpmdb;
pub mod yum;

#[cfg(all(test, unix))]
pub(crate) mod testutil;

use crate::config::Config;
use crate::error::Result;
use crate::ir::{PackageDescriptor, Provider};

/// A package source enumerates installed packages into the common
/// descriptor shape.
///
/// Any cache or database the underlying package manager keeps is opened
/// when the source is constructed and is never managed from here.
pub trait PackageSource {
    /// The binding this source reads through.
    fn provider(&self) -> Provider;

    /// All installed packages, in the order the database reports them.
    fn installed_packages(&self) -> Result<Vec<PackageDescriptor>>;
}

/// Open the package source for a provider.
pub fn open_source(provider: Provider, config: &Config) -> Result<Box<dyn PackageSource>> {
    let source: Box<dyn PackageSource> = match provider {
        Provider::Dnf => Box::new(dnf::DnfSource::open(&config.rpm)?),
        Provider::Yum => Box::new(yum::YumSource::open(&config.rpm, &config.yumdb_path)?),
    };
    tracing::debug!(provider = %source.provider(), "package source opened");
    Ok(source)
}
