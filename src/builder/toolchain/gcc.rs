//! GCC-compatible compiler probing.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::builder::errors::EnvError;
use crate::util::process::ProcessProbe;

/// Definition prefix for GNU-style drivers.
pub(super) const DEFINE_PREFIX: &str = "-D";

/// Leading major digit, optional dot, second digit.
///
/// "4.8.2" gives "48", "10.2.1" gives "10", a bare "5" gives "5".
const VERSION_PATTERN: &str = r"^[^0-9]*([0-9])\.?([0-9])?";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version pattern is valid"))
}

/// Collapse a dumped compiler version to its two leading digits.
///
/// Returns `None` when the text carries no digit at all.
pub fn normalize_version(raw: &str) -> Option<String> {
    let caps = version_regex().captures(raw.trim())?;
    let mut token = caps[1].to_string();
    if let Some(second) = caps.get(2) {
        token.push_str(second.as_str());
    }
    Some(token)
}

/// Whether the driver name looks like a GNU-style (MinGW) compiler.
///
/// Only consulted on Windows, where the GNU convention is not the default.
pub(super) fn is_gnu_driver(cc: &Path) -> bool {
    if super::msvc::is_clang_cl(cc) {
        return false;
    }

    let name = cc
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();

    name.contains("mingw")
        || name.contains("gcc")
        || name.contains("g++")
        || name.starts_with("clang")
        || name == "cc"
        || name == "c++"
}

/// Run `<cc> -dumpversion` and normalize the answer.
///
/// `Ok(None)` means the compiler ran but printed nothing version-like.
pub(super) fn dump_version<P: ProcessProbe + ?Sized>(
    cc: &Path,
    probe: &P,
) -> Result<Option<String>, EnvError> {
    let output = probe.probe(cc, &["-dumpversion"])?;
    let first = output.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    Ok(normalize_version(first))
}

/// Run `<cc> --version` and look for the Clang front-end.
///
/// The match is case-sensitive: Apple and LLVM builds both print
/// lowercase "clang". A failed probe leaves the tag unset.
pub(super) fn probe_clang<P: ProcessProbe + ?Sized>(cc: &Path, probe: &P) -> bool {
    match probe.probe(cc, &["--version"]) {
        Ok(output) => output.contains("clang"),
        Err(e) => {
            tracing::warn!("could not check for clang: {}", e);
            false
        }
    }
}
