use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use baseball_elimination::{Division, Standings};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Reports which teams are mathematically eliminated from first place", long_about = None)]
struct Cli {
    /// Standings file, or `-` for stdin
    #[arg(value_name = "PATH")]
    path: PathBuf,
    /// Only report these teams
    #[arg(short, long = "team", value_name = "NAME")]
    teams: Vec<String>,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "ELIMINATION_LOG", default_value = "warn")]
    log: String,
}

fn init_tracing(default: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Standings> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("reading standings from stdin")?;
        return Ok(input.parse::<Standings>()?);
    }
    Standings::from_path(path).with_context(|| format!("loading {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    let division = Division::new(load(&cli.path)?);
    let teams: Vec<&str> = if cli.teams.is_empty() {
        division.teams().collect()
    } else {
        cli.teams.iter().map(String::as_str).collect()
    };
    for team in teams {
        match division.certificate_of_elimination(team)? {
            Some(certificate) => {
                println!("{} is eliminated by the subset R = {}", team, certificate)
            }
            None => println!("{} is not eliminated", team),
        }
    }
    Ok(())
}
