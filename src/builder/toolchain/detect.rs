//! Toolchain classification.

use crate::builder::environment::SystemInfo;
use crate::builder::errors::EnvError;
use crate::util::process::ProcessProbe;

use super::{gcc, msvc, ToolchainFamily, ToolchainIdentity};

/// Classify the compiler named by `system`.
///
/// Tries the GNU convention first (platform default or MinGW-style
/// driver, confirmed by `-dumpversion`), then the MSVC front-end. A
/// compiler that fits neither is a hard error.
pub fn classify<P: ProcessProbe + ?Sized>(
    system: &SystemInfo,
    probe: &P,
) -> Result<ToolchainIdentity, EnvError> {
    let cc = &system.compiler;
    let forced = system.forced_family;

    let try_gcc = match forced {
        Some(family) => family.is_gcc_compatible(),
        None => system.follows_unix_convention() || gcc::is_gnu_driver(cc),
    };

    // Kept so a compiler that could not even be spawned is reported as such
    let mut probe_error = None;

    if try_gcc {
        match gcc::dump_version(cc, probe) {
            Ok(Some(token)) => {
                let is_clang = gcc::probe_clang(cc, probe);
                let mut identity = ToolchainIdentity::gcc(cc.clone(), token, is_clang);
                if let Some(family) = forced {
                    identity.family = family;
                }
                tracing::debug!("classified `{}` as {}", cc.display(), identity);
                return Ok(identity);
            }
            Ok(None) => {
                tracing::debug!("`{}` printed no GCC version", cc.display());
            }
            Err(e) => {
                tracing::debug!("`{}` is not GCC-compatible: {}", cc.display(), e);
                probe_error = Some(e);
            }
        }
    }

    let try_msvc = forced.map_or(true, |family| family == ToolchainFamily::Msvc);
    if try_msvc {
        if let Some(found) = msvc::detect(cc, &system.generator, probe) {
            let identity = ToolchainIdentity::msvc(cc.clone(), found.generation);
            tracing::debug!("classified `{}` as {}", cc.display(), identity);
            return Ok(identity);
        }
    }

    match probe_error {
        Some(e) => Err(e),
        None => Err(ToolchainIdentity::unsupported(cc.clone(), &system.system_name)),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::test_support::{linux_gcc_system, windows_msvc_system, MockProbe};

    #[test]
    fn test_classify_gcc() {
        let probe = MockProbe::new()
            .output("gcc -dumpversion", "4.8.2\n")
            .output("gcc --version", "gcc (GCC) 4.8.2\n");

        let identity = classify(&linux_gcc_system(), &probe).unwrap();
        assert_eq!(identity.family, ToolchainFamily::GccCompatible);
        assert_eq!(identity.version_token.as_deref(), Some("48"));
        assert!(!identity.is_clang);
        assert_eq!(identity.msvc_generation, None);
    }

    #[test]
    fn test_classify_clang_as_tagged_gcc() {
        let mut system = linux_gcc_system();
        system.compiler = PathBuf::from("cc");
        system.system_name = "Darwin".to_string();

        let probe = MockProbe::new()
            .output("cc -dumpversion", "4.2.1\n")
            .output("cc --version", "Apple clang version 14.0.0\n");

        let identity = classify(&system, &probe).unwrap();
        assert_eq!(identity.family, ToolchainFamily::GccCompatible);
        assert_eq!(identity.version_token.as_deref(), Some("42"));
        assert!(identity.is_clang);
    }

    #[test]
    fn test_classify_clang_probe_failure_is_not_fatal() {
        let probe = MockProbe::new()
            .output("gcc -dumpversion", "4.8.2\n")
            .failing("gcc --version");

        let identity = classify(&linux_gcc_system(), &probe).unwrap();
        assert!(!identity.is_clang);
    }

    #[test]
    fn test_classify_msvc() {
        let probe = MockProbe::new().output(
            "cl",
            "Microsoft (R) 32-bit C/C++ Optimizing Compiler Version 16.00.30319.01 for 80x86\n",
        );

        let identity = classify(&windows_msvc_system(), &probe).unwrap();
        assert_eq!(identity.family, ToolchainFamily::Msvc);
        assert_eq!(identity.msvc_generation.as_deref(), Some("10"));
        assert_eq!(identity.version_token, None);
        // No GNU probe on Windows for a non-GNU driver
        assert!(!probe.calls().iter().any(|c| c.contains("-dumpversion")));
    }

    #[test]
    fn test_classify_clang_cl_as_msvc() {
        let mut system = windows_msvc_system();
        system.compiler = PathBuf::from("clang-cl");
        system.generator = "Ninja".to_string();

        let probe = MockProbe::new().output(
            "clang-cl --version",
            "clang version 17.0.6\nTarget: x86_64-pc-windows-msvc\n",
        );

        let identity = classify(&system, &probe).unwrap();
        assert_eq!(identity.family, ToolchainFamily::Msvc);
        assert_eq!(identity.define_flag("FOO"), "/DFOO");
        assert!(!probe.calls().iter().any(|c| c.contains("-dumpversion")));
    }

    #[test]
    fn test_classify_mingw_on_windows() {
        let mut system = windows_msvc_system();
        system.compiler = PathBuf::from("x86_64-w64-mingw32-gcc");

        let probe = MockProbe::new()
            .output("x86_64-w64-mingw32-gcc -dumpversion", "4.9.3\n")
            .output("x86_64-w64-mingw32-gcc --version", "x86_64-w64-mingw32-gcc (GCC) 4.9.3\n");

        let identity = classify(&system, &probe).unwrap();
        assert_eq!(identity.family, ToolchainFamily::GccCompatible);
        assert_eq!(identity.version_token.as_deref(), Some("49"));
    }

    #[test]
    fn test_classify_unsupported() {
        let mut system = linux_gcc_system();
        system.compiler = PathBuf::from("tcc");

        let probe = MockProbe::new()
            .output("tcc -dumpversion", "\n")
            .output("tcc", "tcc: error: no input files\n");

        let err = classify(&system, &probe).unwrap_err();
        assert!(matches!(err, EnvError::UnsupportedToolchain { .. }));
    }

    #[test]
    fn test_classify_missing_compiler_reports_probe_failure() {
        let probe = MockProbe::new();

        let err = classify(&linux_gcc_system(), &probe).unwrap_err();
        assert!(matches!(err, EnvError::ProbeFailed { .. }));
    }

    #[test]
    fn test_classify_forced_clang() {
        let mut system = linux_gcc_system();
        system.compiler = PathBuf::from("clang");
        system.forced_family = Some(ToolchainFamily::Clang);

        let probe = MockProbe::new()
            .output("clang -dumpversion", "4.2.1\n")
            .output("clang --version", "clang version 3.4\n");

        let identity = classify(&system, &probe).unwrap();
        assert_eq!(identity.family, ToolchainFamily::Clang);
        assert!(identity.is_clang());
    }

    #[test]
    fn test_classify_forced_msvc_skips_gnu_probe() {
        let mut system = linux_gcc_system();
        system.forced_family = Some(ToolchainFamily::Msvc);
        system.generator = "Visual Studio 10".to_string();

        let probe = MockProbe::new();

        let identity = classify(&system, &probe).unwrap();
        assert_eq!(identity.family, ToolchainFamily::Msvc);
        assert_eq!(identity.msvc_generation.as_deref(), Some("10"));
        assert!(!probe.calls().iter().any(|c| c.contains("-dumpversion")));
    }
}
