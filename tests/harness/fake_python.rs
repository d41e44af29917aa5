//! A stand-in interpreter that records its arguments instead of installing anything.

use std::fs;
use std::path::{Path, PathBuf};

pub(crate) struct FakePython {
    pub(crate) program: PathBuf,
    pub(crate) log: PathBuf,
}

impl FakePython {
    /// Install the stub under `dir`. When `fail_on` is set, any invocation whose
    /// arguments contain it exits with status 3.
    #[cfg(unix)]
    pub(crate) fn install(dir: &Path, fail_on: Option<&str>) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let program = dir.join("fake-python");
        let log = dir.join("fake-python.log");
        let failure = match fail_on {
            Some(needle) => format!(
                "case \"$*\" in *'{}'*) exit 3 ;; esac\n",
                needle
            ),
            None => String::new(),
        };
        let script = format!(
            "#!/bin/sh\necho \"$PWD|$*\" >> '{}'\n{}exit 0\n",
            log.display(),
            failure
        );
        fs::write(&program, script).expect("Failed to write fake interpreter");
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake interpreter executable");

        Self { program, log }
    }

    /// Recorded invocations as `cwd|args` lines.
    pub(crate) fn invocations(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
