//! Package URLs for RPM packages.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::ir::PackageDescriptor;

/// Everything outside the URI unreserved set is escaped, `/` included,
/// so the origin always stays a single path segment.
const ORIGIN: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// `pkg:rpm/{origin}/{name}@{epoch:}{version}-{release}?arch={arch}`
pub fn package_url(desc: &PackageDescriptor) -> String {
    let epoch = if desc.epoch.is_zero() {
        String::new()
    } else {
        format!("{}:", desc.epoch)
    };
    format!(
        "pkg:rpm/{}/{}@{}{}-{}?arch={}",
        encode_origin(&desc.vendor),
        desc.name,
        epoch,
        desc.version,
        desc.release,
        desc.arch
    )
}

pub fn encode_origin(vendor: &str) -> String {
    utf8_percent_encode(vendor, ORIGIN).to_string()
}
