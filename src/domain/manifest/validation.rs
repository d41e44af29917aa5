//! Semantic checks over a parsed manifest.
//!
//! Every problem is recorded in `Diagnostics`; nothing here stops at the
//! first finding. Fail-fast behavior for installs lives in the install plan.

use crate::domain::diagnostics::Diagnostics;
use crate::domain::search::PathPattern;
use crate::ports::RepositoryFilesystem;

use super::model::{AllOr, Build, InstallMethod, InstallStep, Manifest};
use super::vocabulary::{
    self, BUILD_JOBS, OS_IMAGES, PACKAGE_MARKERS, SUPPORTED_VERSION, is_conda_runtime,
    is_supported_os, is_valid_apt_package,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathKind {
    File,
    Dir,
}

struct Checker<'a, R: RepositoryFilesystem + ?Sized> {
    file: &'a str,
    repo: &'a R,
    diagnostics: &'a mut Diagnostics,
}

impl<R: RepositoryFilesystem + ?Sized> Checker<'_, R> {
    fn error(&mut self, message: String) {
        self.diagnostics.push_error(self.file, message);
    }

    fn warning(&mut self, message: String) {
        self.diagnostics.push_warning(self.file, message);
    }

    /// Returns true when the path exists inside the repository.
    fn check_path(&mut self, field: &str, path: &str, kind: PathKind) -> bool {
        if path.trim().is_empty() {
            self.error(format!("{}: path is empty", field));
            return false;
        }
        if self.repo.ensure_within_root(path).is_err() {
            self.error(format!("{}: '{}' escapes the repository root", field, path));
            return false;
        }
        if !self.repo.file_exists(path) {
            self.error(format!("{}: '{}' does not exist", field, path));
            return false;
        }

        match (kind, self.repo.is_dir(path)) {
            (PathKind::File, true) => {
                self.error(format!("{}: '{}' is a directory, expected a file", field, path));
            }
            (PathKind::Dir, false) => {
                self.warning(format!(
                    "{}: '{}' is a file, expected a package directory",
                    field, path
                ));
            }
            _ => {}
        }
        true
    }
}

/// Run every semantic check, recording findings against `file`.
pub fn validate_manifest<R: RepositoryFilesystem + ?Sized>(
    manifest: &Manifest,
    file: &str,
    repo: &R,
    diagnostics: &mut Diagnostics,
) {
    let mut checker = Checker { file, repo, diagnostics };

    if manifest.version != SUPPORTED_VERSION {
        checker.error(format!(
            "version: unsupported value {} (expected {})",
            manifest.version, SUPPORTED_VERSION
        ));
    }

    match &manifest.build {
        Some(build) => check_build(&mut checker, build),
        None => checker.error("build: section is required".into()),
    }

    check_generator(&mut checker, manifest);
    check_formats(&mut checker, manifest);
    check_conda(&mut checker, manifest);
    check_install(&mut checker, manifest);
    check_search(&mut checker, manifest);
}

fn check_build<R: RepositoryFilesystem + ?Sized>(checker: &mut Checker<'_, R>, build: &Build) {
    if !is_supported_os(&build.os) {
        checker.error(format!(
            "build.os: '{}' is not a supported image (expected one of: {})",
            build.os,
            OS_IMAGES.join(", ")
        ));
    }

    if build.tools.is_empty() {
        checker.error("build.tools: at least one runtime is required".into());
    }
    for (tool, version) in &build.tools {
        match vocabulary::tool_versions(tool) {
            None => checker.error(format!(
                "build.tools.{}: unknown runtime (expected one of: {})",
                tool,
                vocabulary::tool_names().join(", ")
            )),
            Some(versions) if !versions.contains(&version.as_str()) => checker.error(format!(
                "build.tools.{}: '{}' is not a supported version",
                tool, version
            )),
            Some(_) => {}
        }
    }

    for (index, package) in build.apt_packages.iter().enumerate() {
        if !is_valid_apt_package(package) {
            checker.error(format!(
                "build.apt_packages[{}]: invalid package name '{}'",
                index, package
            ));
        }
    }

    for (job, commands) in &build.jobs {
        if !BUILD_JOBS.contains(&job.as_str()) {
            checker.error(format!(
                "build.jobs.{}: unknown job (expected one of: {})",
                job,
                BUILD_JOBS.join(", ")
            ));
        } else if commands.is_empty() {
            checker.warning(format!("build.jobs.{}: no commands listed", job));
        }
    }
}

fn check_generator<R: RepositoryFilesystem + ?Sized>(
    checker: &mut Checker<'_, R>,
    manifest: &Manifest,
) {
    match (&manifest.sphinx, &manifest.mkdocs) {
        (Some(_), Some(_)) => {
            checker.error("sphinx, mkdocs: only one documentation generator may be set".into());
        }
        (None, None) => {
            checker.warning(
                "sphinx: section absent; the generator entry point will be auto-detected".into(),
            );
        }
        _ => {}
    }

    if let Some(path) = manifest.sphinx.as_ref().and_then(|s| s.configuration.as_deref()) {
        checker.check_path("sphinx.configuration", path, PathKind::File);
    }
    if let Some(path) = manifest.mkdocs.as_ref().and_then(|m| m.configuration.as_deref()) {
        checker.check_path("mkdocs.configuration", path, PathKind::File);
    }
}

fn check_formats<R: RepositoryFilesystem + ?Sized>(
    checker: &mut Checker<'_, R>,
    manifest: &Manifest,
) {
    let Some(formats) = &manifest.formats else {
        return;
    };

    if let AllOr::Items(items) = formats {
        if items.is_empty() {
            checker.warning("formats: empty list; only HTML will be built".into());
        }
        for (index, format) in items.iter().enumerate() {
            if items[..index].contains(format) {
                checker.warning(format!("formats: '{}' listed more than once", format));
            }
        }
    }

    if manifest.mkdocs.is_some() && !manifest.resolved_formats().is_empty() {
        checker.warning("formats: additional formats are not built for mkdocs projects".into());
    }
}

fn check_conda<R: RepositoryFilesystem + ?Sized>(
    checker: &mut Checker<'_, R>,
    manifest: &Manifest,
) {
    let Some(conda) = &manifest.conda else {
        return;
    };

    checker.check_path("conda.environment", &conda.environment, PathKind::File);

    match manifest.tool_version("python") {
        Some(python) if is_conda_runtime(python) => {}
        _ => checker.error(
            "conda: requires build.tools.python to be a miniconda or mambaforge runtime".into(),
        ),
    }
}

fn check_install<R: RepositoryFilesystem + ?Sized>(
    checker: &mut Checker<'_, R>,
    manifest: &Manifest,
) {
    let steps = manifest.install_steps();
    if steps.is_empty() {
        return;
    }

    if manifest.tool_version("python").is_none() {
        checker.error("build.tools.python: required when python.install is set".into());
    }

    for (index, step) in steps.iter().enumerate() {
        let field = format!("python.install[{}].{}", index, step.path_key());

        if let Some(first) = steps[..index].iter().position(|earlier| earlier == step) {
            checker.warning(format!(
                "python.install[{}]: duplicate of python.install[{}] ({})",
                index, first, step
            ));
        }

        match step {
            InstallStep::Requirements(requirements) => {
                checker.check_path(&field, &requirements.requirements, PathKind::File);
            }
            InstallStep::Package(package) => {
                let present = checker.check_path(&field, &package.path, PathKind::Dir);
                if present && checker.repo.is_dir(&package.path) {
                    let has_marker = PACKAGE_MARKERS.iter().any(|marker| {
                        checker.repo.file_exists(&join_relative(&package.path, marker))
                    });
                    if !has_marker {
                        checker.warning(format!(
                            "{}: '{}' has none of {}",
                            field,
                            package.path,
                            PACKAGE_MARKERS.join(", ")
                        ));
                    }
                }

                if package.method == InstallMethod::Setuptools {
                    checker.warning(format!(
                        "python.install[{}].method: setuptools is deprecated; use pip",
                        index
                    ));
                    if !package.extra_requirements.is_empty() {
                        checker.error(format!(
                            "python.install[{}].extra_requirements: only supported with method pip",
                            index
                        ));
                    }
                }
            }
        }
    }
}

fn check_search<R: RepositoryFilesystem + ?Sized>(
    checker: &mut Checker<'_, R>,
    manifest: &Manifest,
) {
    let Some(search) = &manifest.search else {
        return;
    };

    for rule in search.ranking.iter() {
        if let Err(err) = PathPattern::new(&rule.pattern) {
            checker.error(format!("search.ranking: {}", err));
        }
    }
    for (index, pattern) in search.ignore.iter().enumerate() {
        if let Err(err) = PathPattern::new(pattern) {
            checker.error(format!("search.ignore[{}]: {}", index, err));
        }
    }
}

/// Join a root-relative directory and a file name without doubling separators.
pub(crate) fn join_relative(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." { name.to_string() } else { format!("{}/{}", dir, name) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manifest::parse_manifest_content;
    use crate::testing::fixtures::{RASTERVISION_MANIFEST, RepoFixture};

    fn run(content: &str, fixture: &RepoFixture) -> Diagnostics {
        let manifest = parse_manifest_content(".readthedocs.yaml", content).unwrap();
        let mut diagnostics = Diagnostics::default();
        validate_manifest(&manifest, ".readthedocs.yaml", &fixture.store(), &mut diagnostics);
        diagnostics
    }

    fn messages(diagnostics: &Diagnostics) -> Vec<String> {
        diagnostics.iter().map(|d| d.message.clone()).collect()
    }

    #[test]
    fn complete_repository_passes() {
        let fixture = RepoFixture::rastervision();
        let diagnostics = run(RASTERVISION_MANIFEST, &fixture);
        assert_eq!(diagnostics.error_count(), 0, "{:?}", messages(&diagnostics));
        assert_eq!(diagnostics.warning_count(), 0, "{:?}", messages(&diagnostics));
    }

    #[test]
    fn reports_every_missing_path() {
        let fixture = RepoFixture::rastervision();
        fixture.remove("rastervision_aws_s3");
        fixture.remove("docs/conf.py");

        let diagnostics = run(RASTERVISION_MANIFEST, &fixture);
        let messages = messages(&diagnostics);

        assert_eq!(diagnostics.error_count(), 2, "{:?}", messages);
        assert!(messages.contains(&"sphinx.configuration: 'docs/conf.py' does not exist".into()));
        assert!(messages.contains(
            &"python.install[2].path: 'rastervision_aws_s3/' does not exist".to_string()
        ));
    }

    #[test]
    fn rejects_unknown_environment_identifiers() {
        let fixture = RepoFixture::empty();
        let content = "version: 1\nbuild:\n  os: ubuntu-18.04\n  tools:\n    python: '3.1'\n    ruby: '3'\nsphinx: {}\n";

        let diagnostics = run(content, &fixture);
        let messages = messages(&diagnostics);

        assert_eq!(diagnostics.error_count(), 4, "{:?}", messages);
        assert!(messages[0].starts_with("version: unsupported value 1"));
        assert!(messages.iter().any(|m| m.starts_with("build.os: 'ubuntu-18.04'")));
        assert!(messages.iter().any(|m| m == "build.tools.python: '3.1' is not a supported version"));
        assert!(messages.iter().any(|m| m.starts_with("build.tools.ruby: unknown runtime")));
    }

    #[test]
    fn missing_build_section_is_an_error() {
        let fixture = RepoFixture::empty();
        let diagnostics = run("version: 2\nsphinx: {}\n", &fixture);
        assert_eq!(messages(&diagnostics), vec!["build: section is required".to_string()]);
    }

    #[test]
    fn install_requires_python_runtime() {
        let fixture = RepoFixture::empty();
        fixture.write("docs/requirements.txt", "sphinx\n");
        let content = "version: 2\nbuild:\n  os: ubuntu-22.04\n  tools:\n    nodejs: '20'\nsphinx: {}\npython:\n  install:\n    - requirements: docs/requirements.txt\n";

        let diagnostics = run(content, &fixture);
        assert_eq!(
            messages(&diagnostics),
            vec!["build.tools.python: required when python.install is set".to_string()]
        );
    }

    #[test]
    fn warns_on_duplicates_and_package_shape() {
        let fixture = RepoFixture::empty();
        fixture.write("docs/requirements.txt", "sphinx\n");
        fixture.write("pkg/README.md", "no build files here\n");
        let content = r#"
version: 2
build:
  os: ubuntu-22.04
  tools:
    python: "3.11"
sphinx: {}
formats: [pdf, pdf]
python:
  install:
    - requirements: docs/requirements.txt
    - requirements: docs/requirements.txt
    - path: pkg
    - path: docs/requirements.txt
"#;

        let diagnostics = run(content, &fixture);
        let messages = messages(&diagnostics);

        assert_eq!(diagnostics.error_count(), 0, "{:?}", messages);
        assert!(messages.contains(&"formats: 'pdf' listed more than once".to_string()));
        assert!(messages.iter().any(|m| m.starts_with("python.install[1]: duplicate of python.install[0]")));
        assert!(messages.iter().any(|m| m.starts_with("python.install[2].path: 'pkg' has none of")));
        assert!(messages.contains(
            &"python.install[3].path: 'docs/requirements.txt' is a file, expected a package directory"
                .to_string()
        ));
    }

    #[test]
    fn requirements_must_be_a_file() {
        let fixture = RepoFixture::empty();
        fixture.write("docs/index.rst", "");
        let content = "version: 2\nbuild:\n  os: ubuntu-22.04\n  tools:\n    python: '3.11'\nsphinx: {}\npython:\n  install:\n    - requirements: docs\n";

        let diagnostics = run(content, &fixture);
        assert_eq!(
            messages(&diagnostics),
            vec!["python.install[0].requirements: 'docs' is a directory, expected a file".to_string()]
        );
    }

    #[test]
    fn traversal_is_reported() {
        let fixture = RepoFixture::empty();
        let content = "version: 2\nbuild:\n  os: ubuntu-22.04\n  tools:\n    python: '3.11'\nsphinx:\n  configuration: ../conf.py\n";

        let diagnostics = run(content, &fixture);
        assert_eq!(
            messages(&diagnostics),
            vec!["sphinx.configuration: '../conf.py' escapes the repository root".to_string()]
        );
    }

    #[test]
    fn setuptools_with_extras_is_rejected() {
        let fixture = RepoFixture::empty();
        fixture.write("pkg/setup.py", "");
        let content = "version: 2\nbuild:\n  os: ubuntu-22.04\n  tools:\n    python: '3.11'\nsphinx: {}\npython:\n  install:\n    - method: setuptools\n      path: pkg\n      extra_requirements: [docs]\n";

        let diagnostics = run(content, &fixture);
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn generator_sections_are_exclusive() {
        let fixture = RepoFixture::empty();
        let content =
            "version: 2\nbuild:\n  os: ubuntu-22.04\n  tools:\n    python: '3.11'\nsphinx: {}\nmkdocs: {}\n";

        let diagnostics = run(content, &fixture);
        assert_eq!(
            messages(&diagnostics),
            vec!["sphinx, mkdocs: only one documentation generator may be set".to_string()]
        );
    }

    #[test]
    fn conda_needs_conda_runtime() {
        let fixture = RepoFixture::empty();
        fixture.write("environment.yml", "name: docs\n");
        let content = "version: 2\nbuild:\n  os: ubuntu-22.04\n  tools:\n    python: '3.11'\nsphinx: {}\nconda:\n  environment: environment.yml\n";

        let diagnostics = run(content, &fixture);
        assert_eq!(diagnostics.error_count(), 1);
        assert!(messages(&diagnostics)[0].starts_with("conda: requires build.tools.python"));
    }

    #[test]
    fn invalid_search_patterns_are_errors() {
        let fixture = RepoFixture::empty();
        let content = "version: 2\nbuild:\n  os: ubuntu-22.04\n  tools:\n    python: '3.11'\nsphinx: {}\nsearch:\n  ranking:\n    'api/[v': 2\n  ignore: ['']\n";

        let diagnostics = run(content, &fixture);
        let messages = messages(&diagnostics);
        assert_eq!(diagnostics.error_count(), 2, "{:?}", messages);
        assert!(messages[0].starts_with("search.ranking: Invalid search pattern 'api/[v'"));
        assert!(messages[1].starts_with("search.ignore[0]:"));
    }

    #[test]
    fn unknown_job_and_bad_apt_package() {
        let fixture = RepoFixture::empty();
        let content = "version: 2\nbuild:\n  os: ubuntu-22.04\n  tools:\n    python: '3.11'\n  apt_packages: [libgdal-dev, '-y']\n  jobs:\n    pre_deploy: [echo hi]\nsphinx: {}\n";

        let diagnostics = run(content, &fixture);
        let messages = messages(&diagnostics);
        assert_eq!(diagnostics.error_count(), 2, "{:?}", messages);
        assert!(messages.contains(&"build.apt_packages[1]: invalid package name '-y'".to_string()));
        assert!(messages.iter().any(|m| m.starts_with("build.jobs.pre_deploy: unknown job")));
    }

    #[test]
    fn join_relative_handles_trailing_slash_and_dot() {
        assert_eq!(join_relative("rastervision_core/", "setup.py"), "rastervision_core/setup.py");
        assert_eq!(join_relative(".", "pyproject.toml"), "pyproject.toml");
        assert_eq!(join_relative("pkg", "setup.cfg"), "pkg/setup.cfg");
    }
}
