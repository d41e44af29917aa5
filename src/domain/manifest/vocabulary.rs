//! Identifiers recognized by the documentation-hosting build service.

/// The only manifest schema version this tool understands.
pub const SUPPORTED_VERSION: u64 = 2;

/// Keyword accepted in place of a list for `formats` and `submodules`.
pub const ALL_KEYWORD: &str = "all";

pub const OS_IMAGES: &[&str] =
    &["ubuntu-20.04", "ubuntu-22.04", "ubuntu-24.04", "ubuntu-lts-latest"];

pub const PYTHON_VERSIONS: &[&str] = &[
    "2.7",
    "3",
    "3.6",
    "3.7",
    "3.8",
    "3.9",
    "3.10",
    "3.11",
    "3.12",
    "3.13",
    "latest",
    "miniconda3-4.7",
    "miniconda3-3.12-24.1",
    "miniconda-latest",
    "mambaforge-4.10",
    "mambaforge-22.9",
    "mambaforge-23.11",
    "mambaforge-latest",
];

const NODEJS_VERSIONS: &[&str] = &["14", "16", "18", "19", "20", "22", "23", "latest"];

const RUST_VERSIONS: &[&str] =
    &["1.55", "1.61", "1.64", "1.70", "1.75", "1.78", "1.82", "latest"];

const GOLANG_VERSIONS: &[&str] =
    &["1.17", "1.18", "1.19", "1.20", "1.21", "1.22", "1.23", "latest"];

/// Runtime name under `build.tools` paired with its accepted versions.
pub const TOOLS: &[(&str, &[&str])] = &[
    ("python", PYTHON_VERSIONS),
    ("nodejs", NODEJS_VERSIONS),
    ("rust", RUST_VERSIONS),
    ("golang", GOLANG_VERSIONS),
];

/// Hook names accepted under `build.jobs`, in execution order.
pub const BUILD_JOBS: &[&str] = &[
    "post_checkout",
    "pre_system_dependencies",
    "post_system_dependencies",
    "pre_create_environment",
    "post_create_environment",
    "pre_install",
    "post_install",
    "pre_build",
    "post_build",
];

/// Files that mark a directory as an installable Python package.
pub const PACKAGE_MARKERS: &[&str] = &["pyproject.toml", "setup.py", "setup.cfg"];

pub fn is_supported_os(os: &str) -> bool {
    OS_IMAGES.contains(&os)
}

/// Accepted versions for a runtime, or `None` when the runtime is unknown.
pub fn tool_versions(tool: &str) -> Option<&'static [&'static str]> {
    TOOLS.iter().find(|(name, _)| *name == tool).map(|(_, versions)| *versions)
}

pub fn tool_names() -> Vec<&'static str> {
    TOOLS.iter().map(|(name, _)| *name).collect()
}

/// Conda-capable runtimes provide the `conda` section with an interpreter.
pub fn is_conda_runtime(python: &str) -> bool {
    python.starts_with("miniconda") || python.starts_with("mambaforge")
}

/// Debian package names: alphanumeric start, then alphanumerics and `.+-`.
pub fn is_valid_apt_package(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'))
}
