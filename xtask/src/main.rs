use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for cubewalk")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// fmt, clippy, tests, docs, then the headless smoke run
    Check,
    /// cargo fmt --check on all crates
    Fmt,
    /// clippy with warnings denied
    Clippy,
    /// Run tests, optionally for one package
    Test {
        #[arg(short, long)]
        package: Option<String>,
    },
    /// Build rustdoc for the workspace
    Doc,
    /// Print a frame of each scene through cubewalk-cli
    Smoke,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            fmt()?;
            clippy()?;
            test(None)?;
            doc()?;
            smoke()?;
        }
        Commands::Fmt => fmt()?,
        Commands::Clippy => clippy()?,
        Commands::Test { package } => test(package.as_deref())?,
        Commands::Doc => doc()?,
        Commands::Smoke => smoke()?,
    }

    Ok(())
}

/// Run `cargo <args>`, failing with `what` if it exits non-zero.
fn cargo(what: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{what} failed");
    }
    Ok(())
}

fn fmt() -> Result<()> {
    cargo("fmt check", &["fmt", "--all", "--", "--check"])
}

fn clippy() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn test(package: Option<&str>) -> Result<()> {
    match package {
        Some(p) => cargo("tests", &["test", "-p", p]),
        None => cargo("tests", &["test", "--workspace"]),
    }
}

fn doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}

fn smoke() -> Result<()> {
    for scene in ["cubes", "maze"] {
        cargo(
            "smoke run",
            &["run", "-q", "-p", "cubewalk-cli", "--", "frame", "--scene", scene],
        )?;
    }
    cargo("smoke run", &["run", "-q", "-p", "cubewalk-cli", "--", "maze"])
}
