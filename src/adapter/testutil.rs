//! Stand-in `rpm` executables for exercising the query path.

use std::fs::OpenOptions;
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use crate::config::RpmConfig;

/// Two real packages around an imported key, as `rpm -qa` lists them.
pub(crate) const QUERY_OUTPUT: &str = "\
bash\t(none)\t4.4.20\t3.el8\tx86_64\tRed Hat, Inc.\tdeadbeef
gpg-pubkey\t(none)\tfd431d51\t4ae0493b\t(none)\t(none)\t0011aabb
perl-IO\t1\t1.38\t416.el8\tx86_64\tRed Hat, Inc.\t00ff
";

/// Write an executable shell script to `dir` that ignores its arguments
/// and prints `output`, and return an `RpmConfig` that runs it.
pub(crate) fn fake_rpm(dir: &Path, output: &str) -> RpmConfig {
    let script: PathBuf = dir.join("rpm");
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o755)
        .open(&script)
        .unwrap();
    write!(file, "#!/bin/sh\ncat <<'RPM_EOF'\n{}RPM_EOF\n", output).unwrap();
    file.sync_all().unwrap();
    drop(file);

    RpmConfig {
        command: script,
        ..RpmConfig::default()
    }
}
