//! `stencil version` -- print version, build and platform.

use std::fmt;

use anyhow::Result;
use serde::Serialize;

use crate::output::output_json;

/// Build identifier, taken from `STENCIL_BUILD` at compile time.
const BUILD: &str = match option_env!("STENCIL_BUILD") {
    Some(b) => b,
    None => "dev",
};

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: &'static str,
    build: &'static str,
    os: &'static str,
    arch: &'static str,
}

impl VersionInfo {
    fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            build: BUILD,
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stencil {} ({}) {}/{}",
            self.version, self.build, self.os, self.arch
        )
    }
}

/// Execute the `stencil version` command.
pub fn run(json: bool) -> Result<()> {
    let info = VersionInfo::current();
    if json {
        output_json(&info);
    } else {
        println!("{}", info);
    }
    Ok(())
}
