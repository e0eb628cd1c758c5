//! Invocation tokens and their translation into SCons flags.

use serde::{Deserialize, Serialize};

/// Order-independent tokens accepted on the command line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuildToken {
    /// Non-debug build (`debug=0`).
    Release,

    /// 64-bit target (`x64=yes`).
    X64,

    /// Skip addon packaging (`noaddon=yes`).
    Noaddon,

    /// Remove prior output and run a clean invocation (`-c`); classification
    /// and packaging are bypassed.
    Clean,
}

/// Resolved build options, derived once from the full token list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildOptions {
    /// Debug build unless `release` was given.
    pub debug: bool,

    /// 64-bit target requested.
    pub x64: bool,

    /// Addon packaging requested. On by default; only `noaddon` turns it
    /// off, regardless of token order.
    pub build_addon: bool,

    /// Clean invocation requested.
    pub clean: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            debug: true,
            x64: false,
            build_addon: true,
            clean: false,
        }
    }
}

impl BuildOptions {
    /// Derive options from the full token list. Scanning the whole list
    /// before deciding anything keeps the result order-independent.
    pub fn from_tokens(tokens: &[BuildToken]) -> Self {
        let mut options = Self::default();
        for token in tokens {
            match token {
                BuildToken::Release => options.debug = false,
                BuildToken::X64 => options.x64 = true,
                BuildToken::Noaddon => options.build_addon = false,
                BuildToken::Clean => options.clean = true,
            }
        }
        options
    }

    /// SCons mode flag: keep-going for builds, clean for `clean`.
    pub fn mode_flag(&self) -> &'static str {
        if self.clean {
            "-c"
        } else {
            "-k"
        }
    }

    /// Full SCons argument list, mode flag first.
    pub fn scons_args(&self) -> Vec<String> {
        let mut args = vec![self.mode_flag().to_string(), "runscons=yes".to_string()];
        if !self.debug {
            args.push("debug=0".to_string());
        }
        if self.x64 {
            args.push("x64=yes".to_string());
        }
        if !self.build_addon {
            args.push("noaddon=yes".to_string());
        }
        args
    }
}
