//! Test utilities and mocks for ccenv unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use ccenv::test_support::{linux_gcc_system, MockProbe};
//!
//! #[test]
//! fn test_example() {
//!     let probe = MockProbe::new().output("gcc -dumpversion", "4.8.2\n");
//!     let identity = classify(&linux_gcc_system(), &probe).unwrap();
//!     assert_eq!(probe.calls()[0], "gcc -dumpversion");
//! }
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::builder::environment::SystemInfo;
use crate::builder::errors::EnvError;
use crate::util::process::ProcessProbe;

/// Canned answer for one command line.
#[derive(Debug, Clone)]
enum MockResponse {
    Output(String),
    Fail,
}

/// Mock [`ProcessProbe`] answering from a table of command lines.
///
/// Commands are matched on `"<program> <args...>"`. Anything without an
/// expectation fails as if the program did not exist.
#[derive(Debug, Default)]
pub struct MockProbe {
    expectations: Vec<(String, MockResponse)>,
    calls: RefCell<Vec<String>>,
}

impl MockProbe {
    /// Create a probe with no expectations.
    pub fn new() -> Self {
        MockProbe::default()
    }

    /// Answer `cmd` with `stdout`.
    pub fn output(mut self, cmd: &str, stdout: impl Into<String>) -> Self {
        self.expectations
            .push((cmd.to_string(), MockResponse::Output(stdout.into())));
        self
    }

    /// Make `cmd` fail to spawn.
    pub fn failing(mut self, cmd: &str) -> Self {
        self.expectations.push((cmd.to_string(), MockResponse::Fail));
        self
    }

    /// Every command line probed so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn command_line(program: &Path, args: &[&str]) -> String {
        if args.is_empty() {
            program.display().to_string()
        } else {
            format!("{} {}", program.display(), args.join(" "))
        }
    }
}

impl ProcessProbe for MockProbe {
    fn probe(&self, program: &Path, args: &[&str]) -> Result<String, EnvError> {
        let cmd = Self::command_line(program, args);
        self.calls.borrow_mut().push(cmd.clone());

        match self.expectations.iter().find(|(c, _)| *c == cmd) {
            Some((_, MockResponse::Output(out))) => Ok(out.clone()),
            Some((_, MockResponse::Fail)) | None => {
                Err(EnvError::probe_failed(cmd, "program not found"))
            }
        }
    }
}

/// 64-bit Linux with `gcc` and the Makefile generator.
pub fn linux_gcc_system() -> SystemInfo {
    SystemInfo {
        system_name: "Linux".to_string(),
        pointer_size: 8,
        generator: "Unix Makefiles".to_string(),
        compiler: PathBuf::from("gcc"),
        forced_family: None,
    }
}

/// 32-bit Windows with `cl` and the NMake generator.
pub fn windows_msvc_system() -> SystemInfo {
    SystemInfo {
        system_name: "Windows".to_string(),
        pointer_size: 4,
        generator: "NMake Makefiles".to_string(),
        compiler: PathBuf::from("cl"),
        forced_family: None,
    }
}

/// Probe answering like GCC 4.8.2.
pub fn gcc_48_probe() -> MockProbe {
    MockProbe::new()
        .output("gcc -dumpversion", "4.8.2\n")
        .output("gcc --version", "gcc version 4.8.2 (GCC)\n")
}

/// Probe answering like the Visual Studio 2010 compiler.
pub fn msvc_2010_probe() -> MockProbe {
    MockProbe::new().output(
        "cl",
        "Microsoft (R) 32-bit C/C++ Optimizing Compiler Version 16.00.30319.01 for 80x86\n",
    )
}
