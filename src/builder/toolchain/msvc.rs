//! MSVC front-end probing.

use std::path::Path;

use crate::util::process::ProcessProbe;

/// Definition prefix for cl.exe.
pub(super) const DEFINE_PREFIX: &str = "/D";

const VS_GENERATOR_PREFIX: &str = "Visual Studio ";

/// Target triple suffix printed by `clang-cl --version`.
const CLANG_CL_TARGET: &str = "windows-msvc";

/// Whether the driver is clang-cl, the MSVC-compatible Clang front-end.
pub(super) fn is_clang_cl(cc: &Path) -> bool {
    cc.file_stem()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case("clang-cl"))
}

/// Generation marker from a `Visual Studio <N> [year]` generator name.
pub(super) fn generation_from_generator(generator: &str) -> Option<String> {
    let rest = generator.strip_prefix(VS_GENERATOR_PREFIX)?;
    let marker = rest.split_whitespace().next()?;
    marker
        .chars()
        .all(|c| c.is_ascii_digit())
        .then(|| marker.to_string())
}

/// Map a cl.exe `major.minor` version to its Visual Studio generation.
///
/// cl 16.00 shipped with Visual Studio 2010, which is generation "10".
/// From VS2015 on every release reports major 19 and the minor picks
/// the generation.
pub fn generation_from_cl_version(major: u32, minor: u32) -> Option<&'static str> {
    let generation = match (major, minor) {
        (14, _) => "8",
        (15, _) => "9",
        (16, _) => "10",
        (17, _) => "11",
        (18, _) => "12",
        (19, 0..=9) => "14",
        (19, 10..=19) => "15",
        (19, 20..=29) => "16",
        (19, _) => "17",
        _ => return None,
    };
    Some(generation)
}

/// Pull `major.minor` out of a cl.exe banner.
///
/// `Microsoft (R) 32-bit C/C++ Optimizing Compiler Version 16.00.30319.01 for 80x86`
fn banner_version(banner: &str) -> Option<(u32, u32)> {
    let line = banner.lines().find(|l| l.contains("Microsoft"))?;
    let (_, after) = line.split_once("Version ")?;
    let version = after.split_whitespace().next()?;
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().and_then(|m| m.parse().ok()).unwrap_or(0);
    Some((major, minor))
}

/// Result of asking whether the active compiler is MSVC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct MsvcDetection {
    pub generation: Option<String>,
}

/// Detect the MSVC front-end.
///
/// A Visual Studio generator is enough on its own; otherwise the compiler
/// must answer a bare invocation with the Microsoft banner. clang-cl has
/// no such banner and is asked for `--version` instead.
pub(super) fn detect<P: ProcessProbe + ?Sized>(
    cc: &Path,
    generator: &str,
    probe: &P,
) -> Option<MsvcDetection> {
    let from_generator = generation_from_generator(generator);

    let (args, marker): (&[&str], &str) = if is_clang_cl(cc) {
        (&["--version"], CLANG_CL_TARGET)
    } else {
        (&[], "Microsoft")
    };

    let banner = match probe.probe(cc, args) {
        Ok(out) if out.contains(marker) => Some(out),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("no MSVC banner: {}", e);
            None
        }
    };

    if banner.is_none() && !generator.starts_with(VS_GENERATOR_PREFIX) {
        return None;
    }

    let generation = from_generator.or_else(|| {
        banner
            .as_deref()
            .and_then(banner_version)
            .and_then(|(major, minor)| generation_from_cl_version(major, minor))
            .map(str::to_string)
    });

    Some(MsvcDetection { generation })
}
