//! Platform-gated compiler flag and definition accumulation.
//!
//! Flags are kept as ordered tokens per language and build type and only
//! joined into strings when a command line is built. Nothing is
//! deduplicated: adding `-Wall` twice yields `-Wall -Wall`.

use serde::{Deserialize, Serialize};

use crate::builder::cache::ResolvedEnvironment;
use crate::builder::errors::EnvError;
use crate::builder::toolchain::ToolchainIdentity;

/// Source language of a flag list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    C,
    Cxx,
}

/// Which language lists a flag is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LangSelector {
    C,
    Cxx,
    #[default]
    Both,
}

impl LangSelector {
    pub fn languages(&self) -> &'static [Language] {
        match self {
            LangSelector::C => &[Language::C],
            LangSelector::Cxx => &[Language::Cxx],
            LangSelector::Both => &[Language::C, Language::Cxx],
        }
    }
}

/// Build type selecting the extra flag segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Debug,
    Release,
}

impl BuildType {
    /// Spelling used by CMake (`CMAKE_BUILD_TYPE`, `_DEBUG` suffixes).
    pub fn as_cmake(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }
}

/// Toolchain a flag applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetPlatform {
    Gcc,
    Clang,
    Msvc,
    All,
}

impl TargetPlatform {
    /// Whether a flag for this selector applies to `identity`.
    ///
    /// `Gcc` covers every GCC-compatible compiler, Clang included; `Clang`
    /// needs the Clang tag.
    pub fn matches(&self, identity: &ToolchainIdentity) -> bool {
        match self {
            TargetPlatform::All => true,
            TargetPlatform::Gcc => identity.is_gcc_compatible(),
            TargetPlatform::Clang => identity.is_clang(),
            TargetPlatform::Msvc => identity.is_msvc(),
        }
    }
}

impl std::str::FromStr for TargetPlatform {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcc" => Ok(TargetPlatform::Gcc),
            "clang" => Ok(TargetPlatform::Clang),
            "msvc" => Ok(TargetPlatform::Msvc),
            "all" => Ok(TargetPlatform::All),
            _ => Err(EnvError::InvalidPlatformSelector(s.to_string())),
        }
    }
}

/// The six flag lists: C and C++, each with debug and release extras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagSet {
    pub c: Vec<String>,
    pub cxx: Vec<String>,
    pub c_debug: Vec<String>,
    pub cxx_debug: Vec<String>,
    pub c_release: Vec<String>,
    pub cxx_release: Vec<String>,
}

impl FlagSet {
    /// Tokens for one language, base list when `config` is `None`.
    pub fn tokens(&self, lang: Language, config: Option<BuildType>) -> &[String] {
        match (lang, config) {
            (Language::C, None) => &self.c,
            (Language::Cxx, None) => &self.cxx,
            (Language::C, Some(BuildType::Debug)) => &self.c_debug,
            (Language::Cxx, Some(BuildType::Debug)) => &self.cxx_debug,
            (Language::C, Some(BuildType::Release)) => &self.c_release,
            (Language::Cxx, Some(BuildType::Release)) => &self.cxx_release,
        }
    }

    fn tokens_mut(&mut self, lang: Language, config: Option<BuildType>) -> &mut Vec<String> {
        match (lang, config) {
            (Language::C, None) => &mut self.c,
            (Language::Cxx, None) => &mut self.cxx,
            (Language::C, Some(BuildType::Debug)) => &mut self.c_debug,
            (Language::Cxx, Some(BuildType::Debug)) => &mut self.cxx_debug,
            (Language::C, Some(BuildType::Release)) => &mut self.c_release,
            (Language::Cxx, Some(BuildType::Release)) => &mut self.cxx_release,
        }
    }

    /// Space-joined string for one list.
    pub fn joined(&self, lang: Language, config: Option<BuildType>) -> String {
        self.tokens(lang, config).join(" ")
    }
}

/// Mutable flag and definition state of a configuration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagAccumulator {
    flags: FlagSet,
    definitions: Vec<String>,
}

impl FlagAccumulator {
    /// Start from the toolchain's default flags.
    pub fn new(defaults: FlagSet) -> Self {
        FlagAccumulator {
            flags: defaults,
            definitions: Vec::new(),
        }
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Definition flags in toolchain syntax (`-DFOO` or `/DFOO`).
    pub fn definitions(&self) -> &[String] {
        &self.definitions
    }

    /// Flags for one language as they go on a compile command.
    ///
    /// Definitions lead the base list; the build-type lists carry only
    /// their own extras.
    pub fn command_line(&self, lang: Language, config: Option<BuildType>) -> String {
        let tokens = self.flags.tokens(lang, config);
        match config {
            None => self
                .definitions
                .iter()
                .chain(tokens)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" "),
            Some(_) => tokens.join(" "),
        }
    }

    /// Replace every flag list with the snapshot taken at resolution.
    ///
    /// Definitions are left alone.
    pub fn restore_defaults(&mut self, env: &ResolvedEnvironment) {
        tracing::debug!("restoring default compiler flags");
        self.flags = env.defaults.clone();
    }
}

/// Adds flags and definitions gated on the resolved toolchain.
pub struct FlagComposer<'a> {
    env: &'a ResolvedEnvironment,
    acc: &'a mut FlagAccumulator,
}

impl<'a> FlagComposer<'a> {
    pub fn new(env: &'a ResolvedEnvironment, acc: &'a mut FlagAccumulator) -> Self {
        FlagComposer { env, acc }
    }

    /// Add a preprocessor definition (`NAME` or `NAME=VALUE`).
    pub fn add_definition(&mut self, name: &str) -> &mut Self {
        let flag = self.env.toolchain.define_flag(name);
        tracing::debug!("adding definition {}", flag);
        self.acc.definitions.push(flag);
        self
    }

    /// Add definitions in order.
    pub fn add_definitions<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add_definition(name.as_ref());
        }
        self
    }

    /// Add flags to both the C and C++ lists.
    pub fn add_flag<I, S>(&mut self, target: TargetPlatform, flags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.append(LangSelector::Both, None, target, flags)
    }

    /// Add flags to the C list only.
    pub fn add_c_flag<I, S>(&mut self, target: TargetPlatform, flags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.append(LangSelector::C, None, target, flags)
    }

    /// Add flags to the C++ list only.
    pub fn add_cxx_flag<I, S>(&mut self, target: TargetPlatform, flags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.append(LangSelector::Cxx, None, target, flags)
    }

    /// Add flags to the debug or release extras.
    pub fn add_config_flag<I, S>(
        &mut self,
        config: BuildType,
        lang: LangSelector,
        target: TargetPlatform,
        flags: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.append(lang, Some(config), target, flags)
    }

    /// Drop every flag added since resolution.
    pub fn restore_defaults(&mut self) -> &mut Self {
        self.acc.restore_defaults(self.env);
        self
    }

    fn append<I, S>(
        &mut self,
        lang: LangSelector,
        config: Option<BuildType>,
        target: TargetPlatform,
        flags: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !target.matches(&self.env.toolchain) {
            return self;
        }

        // "-Wall -Wextra" counts as two flags
        let tokens: Vec<String> = flags
            .into_iter()
            .flat_map(|f| {
                f.as_ref()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();

        for &language in lang.languages() {
            self.acc
                .flags
                .tokens_mut(language, config)
                .extend(tokens.iter().cloned());
        }
        self
    }
}
