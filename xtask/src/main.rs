// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Single entry point for the checks that gate a ShiftGrid change. Local
//! runs and CI invoke the same subcommands, so a green `cargo xtask ci`
//! locally means a green pipeline.
//!
//! The important ones:
//!
//! - `cargo xtask ci` — lint, dependency checks, build, test
//! - `cargo xtask lint` — formatting, typos, clippy, docs
//! - `cargo xtask test` — lib tests, then doc tests
//!
//! Every subcommand shells out to the toolchain via `duct`; nothing here
//! needs a database, a network, or any other service.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{io, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Everything CI runs: lint, dependency checks, build, test
    CI,

    /// Build all targets with all features
    #[command(visible_alias = "b")]
    Build,

    /// Type-check all targets without producing artifacts
    #[command(visible_alias = "c")]
    Check,

    /// Audit dependency licenses and advisories
    #[command(visible_alias = "deps")]
    Deny,

    /// Flag dependencies nothing imports
    #[command(visible_alias = "m")]
    Machete,

    /// All lint passes: clippy, docs, formatting, typos
    #[command(visible_alias = "l")]
    Lint,

    /// Clippy with warnings promoted to errors
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Build rustdoc for every workspace crate under docs.rs flags
    #[command(visible_alias = "d")]
    LintDocs,

    /// Verify rustfmt has nothing to change
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Lint the markdown files
    #[command(visible_alias = "md")]
    LintMarkdown,

    /// Scan the tree for typos
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Apply clippy's machine-applicable fixes
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Reformat the tree
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Rewrite the typos the scanner is sure about
    #[command(visible_alias = "ft")]
    FixTypos,

    /// Lib tests, then doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Doc tests only
    #[command(visible_alias = "td")]
    TestDocs,

    /// Lib tests only
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Coverage report in lcov format under target/
    #[command(visible_alias = "cov")]
    Coverage,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Deny => deny(),
            Self::Machete => machete(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintMarkdown => lint_markdown(),
            Self::LintTypos => lint_typos(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::FixTypos => fix_typos(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::Coverage => coverage(),
        }
    }
}

/// The full gate, in the order CI runs it.
fn ci() -> Result<()> {
    lint()?;
    deny()?;
    machete()?;
    build()?;
    test()?;
    Ok(())
}

/// Every lint pass. Markdown lint failures only warn; the other passes
/// fail the run.
fn lint() -> Result<()> {
    lint_format()?;
    lint_typos()?;
    lint_clippy()?;
    lint_docs()?;
    if let Err(err) = lint_markdown() {
        tracing::warn!("markdownlint reported issues (non-blocking): {err}");
    }
    Ok(())
}

fn lint_clippy() -> Result<()> {
    cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

fn fix_clippy() -> Result<()> {
    cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Builds each workspace crate's docs the way docs.rs would, with rustdoc
/// warnings promoted to errors.
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to read cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_logged()?;
    }

    Ok(())
}

fn lint_format() -> Result<()> {
    cargo_nightly(vec!["fmt", "--all", "--check"])
}

fn fix_format() -> Result<()> {
    cargo_nightly(vec!["fmt", "--all"])
}

/// Markdown lint via [markdownlint-cli2](https://github.com/DavidAnson/markdownlint-cli2).
fn lint_markdown() -> Result<()> {
    cmd!("markdownlint-cli2", "**/*.md", "!target", "!**/target").run_logged()?;
    Ok(())
}

/// Typo scan via [typos-cli](https://github.com/crate-ci/typos/).
fn lint_typos() -> Result<()> {
    cmd!("typos").run_logged()?;
    Ok(())
}

fn fix_typos() -> Result<()> {
    cmd!("typos", "-w").run_logged()?;
    Ok(())
}

fn deny() -> Result<()> {
    cargo(vec!["deny", "check"])
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_logged()?;
    Ok(())
}

fn build() -> Result<()> {
    cargo(vec!["build", "--all-targets", "--all-features"])
}

fn check() -> Result<()> {
    cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Lib tests first so the slow doc-test pass only runs on a healthy tree.
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?;
    Ok(())
}

fn test_docs() -> Result<()> {
    cargo(vec!["test", "--doc", "--all-features"])
}

fn test_libs() -> Result<()> {
    cargo(vec!["test", "--all-targets", "--all-features"])
}

fn coverage() -> Result<()> {
    cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Runs a cargo subcommand on the default toolchain.
fn cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_logged()?;
    Ok(())
}

/// Runs a cargo subcommand on the nightly toolchain. Unsetting CARGO
/// matters: it is set because xtask itself runs as a cargo subcommand,
/// and it would otherwise pin the child to the default toolchain.
fn cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_logged()?;
    Ok(())
}

trait RunLogged {
    /// Run the expression, logging it before and again on failure.
    fn run_logged(&self) -> io::Result<Output>;
}

impl RunLogged for duct::Expression {
    fn run_logged(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // Repeated because the original line may have scrolled away.
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
