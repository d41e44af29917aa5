//! Typed model of the documentation-build manifest.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::vocabulary::ALL_KEYWORD;

/// The manifest document read from `.readthedocs.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<Build>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sphinx: Option<Sphinx>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mkdocs: Option<Mkdocs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formats: Option<AllOr<OutputFormat>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conda: Option<Conda>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python: Option<Python>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<Search>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submodules: Option<Submodules>,
}

impl Manifest {
    /// Install steps in declaration order.
    pub fn install_steps(&self) -> &[InstallStep] {
        self.python.as_ref().map(|python| python.install.as_slice()).unwrap_or_default()
    }

    /// Runtime version requested for `tool` under `build.tools`.
    pub fn tool_version(&self, tool: &str) -> Option<&str> {
        self.build.as_ref().and_then(|build| build.tools.get(tool)).map(String::as_str)
    }

    /// Output formats with `all` expanded and duplicates dropped, first occurrence wins.
    pub fn resolved_formats(&self) -> Vec<OutputFormat> {
        match &self.formats {
            None => Vec::new(),
            Some(AllOr::All) => OutputFormat::ALL.to_vec(),
            Some(AllOr::Items(items)) => {
                let mut resolved = Vec::with_capacity(items.len());
                for format in items {
                    if !resolved.contains(format) {
                        resolved.push(*format);
                    }
                }
                resolved
            }
        }
    }
}

/// Build environment: OS image, runtimes, system packages and job hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Build {
    pub os: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tools: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apt_packages: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub jobs: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sphinx {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
    #[serde(default, skip_serializing_if = "SphinxBuilder::is_default")]
    pub builder: SphinxBuilder,
    #[serde(default, skip_serializing_if = "is_false")]
    pub fail_on_warning: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SphinxBuilder {
    #[default]
    Html,
    Dirhtml,
    Singlehtml,
}

impl SphinxBuilder {
    fn is_default(&self) -> bool {
        *self == SphinxBuilder::Html
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mkdocs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub fail_on_warning: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Conda {
    pub environment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Htmlzip,
    Pdf,
    Epub,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] =
        [OutputFormat::Htmlzip, OutputFormat::Pdf, OutputFormat::Epub];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Htmlzip => "htmlzip",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Epub => "epub",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Python {
    #[serde(default)]
    pub install: Vec<InstallStep>,
}

/// One entry of `python.install`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstallStep {
    Requirements(RequirementsStep),
    Package(PackageStep),
}

impl InstallStep {
    /// The repository-relative path this step consumes.
    pub fn path(&self) -> &str {
        match self {
            InstallStep::Requirements(step) => &step.requirements,
            InstallStep::Package(step) => &step.path,
        }
    }

    /// Manifest key holding the path, used when reporting locations.
    pub fn path_key(&self) -> &'static str {
        match self {
            InstallStep::Requirements(_) => "requirements",
            InstallStep::Package(_) => "path",
        }
    }
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallStep::Requirements(step) => write!(f, "requirements: {}", step.requirements),
            InstallStep::Package(step) => write!(f, "{}: {}", step.method, step.path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequirementsStep {
    pub requirements: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageStep {
    #[serde(default)]
    pub method: InstallMethod,
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_requirements: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMethod {
    #[default]
    Pip,
    Setuptools,
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallMethod::Pip => f.write_str("pip"),
            InstallMethod::Setuptools => f.write_str("setuptools"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Search {
    #[serde(default, skip_serializing_if = "RankingRules::is_empty")]
    pub ranking: RankingRules,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Submodules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<AllOr<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<AllOr<String>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub recursive: bool,
}

/// Either the keyword `all` or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllOr<T> {
    All,
    Items(Vec<T>),
}

impl<T: Serialize> Serialize for AllOr<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AllOr::All => serializer.serialize_str(ALL_KEYWORD),
            AllOr::Items(items) => items.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for AllOr<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AllOrVisitor(PhantomData))
    }
}

struct AllOrVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for AllOrVisitor<T> {
    type Value = AllOr<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the string \"{}\" or a list", ALL_KEYWORD)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        if value == ALL_KEYWORD {
            Ok(AllOr::All)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        Vec::<T>::deserialize(de::value::SeqAccessDeserializer::new(seq)).map(AllOr::Items)
    }
}

/// Ranking weight bounded to `-10..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RankingWeight(i8);

impl RankingWeight {
    pub const MIN: i8 = -10;
    pub const MAX: i8 = 10;

    pub fn value(self) -> i8 {
        self.0
    }
}

impl TryFrom<i64> for RankingWeight {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(RankingWeight(value as i8))
        } else {
            Err(format!(
                "ranking weight {} out of range ({}..={})",
                value,
                Self::MIN,
                Self::MAX
            ))
        }
    }
}

impl From<RankingWeight> for i64 {
    fn from(weight: RankingWeight) -> Self {
        i64::from(weight.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRule {
    pub pattern: String,
    pub weight: RankingWeight,
}

/// `search.ranking` entries in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingRules(Vec<RankingRule>);

impl RankingRules {
    pub fn new(rules: Vec<RankingRule>) -> Self {
        Self(rules)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankingRule> {
        self.0.iter()
    }
}

impl Serialize for RankingRules {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|rule| (&rule.pattern, rule.weight)))
    }
}

impl<'de> Deserialize<'de> for RankingRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RankingRulesVisitor)
    }
}

struct RankingRulesVisitor;

impl<'de> Visitor<'de> for RankingRulesVisitor {
    type Value = RankingRules;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping from path pattern to ranking weight")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut rules: Vec<RankingRule> = Vec::new();
        while let Some((pattern, weight)) = map.next_entry::<String, RankingWeight>()? {
            if rules.iter().any(|rule| rule.pattern == pattern) {
                return Err(de::Error::custom(format!("duplicate ranking pattern '{}'", pattern)));
            }
            rules.push(RankingRule { pattern, weight });
        }
        Ok(RankingRules(rules))
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
