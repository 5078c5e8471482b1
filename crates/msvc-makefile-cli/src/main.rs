use anyhow::{Context, Result, bail};
use clap::Parser;
use msvc_makefile_config::Config;
use msvc_makefile_engine::{Document, FlagSet, Linkage, io, msvc_script};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "msvc-makefile",
    version,
    about = "Rewrite the samtools Makefile for an MSVC build"
)]
struct Cli {
    /// Link third-party libraries statically
    #[arg(long = "static")]
    static_link: bool,

    /// Unix Makefile to translate [default: Makefile]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file [default: Makefile.msvc, plus the static suffix with --static]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file [default: ~/.config/msvc-makefile/config.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the translated Makefile instead of writing it
    #[arg(long, conflicts_with = "dump")]
    stdout: bool,

    /// Print the translated Makefile with line numbers instead of writing it
    #[arg(long)]
    dump: bool,

    /// List the translation steps and exit
    #[arg(long)]
    list_steps: bool,
}

/// What a successful run produced.
#[derive(Debug)]
enum Outcome {
    Listed(String),
    Printed(String),
    Written(PathBuf),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version requests land here too; none of them touch the filesystem
            let _ = e.print();
            process::exit(1);
        }
    };

    match run(&cli) {
        Ok(Outcome::Listed(text)) | Ok(Outcome::Printed(text)) => print!("{text}"),
        Ok(Outcome::Written(path)) => log::info!("translation written to {}", path.display()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => Ok(config),
            None => bail!("config file '{}' does not exist", path.display()),
        },
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let config = load_config(cli)?;
    let linkage = Linkage::from_static_flag(cli.static_link);
    let script = msvc_script(&FlagSet::new(linkage, &config.third_party_var));

    if cli.list_steps {
        let listing = script
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| format!("{index:>3} {}\n", step.name))
            .collect();
        return Ok(Outcome::Listed(listing));
    }

    let input = cli.input.clone().unwrap_or_else(|| config.input.clone());
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| config.output_path(cli.static_link));

    let mut doc: Document = io::read_document(&input)
        .with_context(|| format!("cannot load '{}'", input.display()))?;

    let report = script
        .run(&mut doc)
        .with_context(|| format!("cannot translate '{}'", input.display()))?;
    log::info!(
        "{} steps applied, {} without a match",
        report.applied.len(),
        report.unchanged.len()
    );
    for name in &report.unchanged {
        log::debug!("step '{name}' matched nothing");
    }

    if cli.stdout {
        return Ok(Outcome::Printed(doc.text()));
    }
    if cli.dump {
        return Ok(Outcome::Printed(doc.dump()));
    }

    io::write_document(&output, &doc)
        .with_context(|| format!("cannot write '{}'", output.display()))?;
    Ok(Outcome::Written(output))
}
