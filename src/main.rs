use clap::{Parser, Subcommand};
use profile_page::load::Secrets;
use profile_page::{config, generate, output};
use std::path::PathBuf;
use std::process::ExitCode;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "profile-page")]
#[command(about = "Static site generator for a single profile page")]
#[command(long_about = "\
Static site generator for a single profile page

Reads a JSON profile and an HTML template, writes one page plus its
stylesheet. Contact email and phone are never read from the data file:
set PII_EMAIL and PII_PHONE in the environment.

Source structure:

  profile/
  ├── config.toml          # Optional, see 'profile-page gen-config'
  ├── data.json            # Name, contact.location, sections → blocks → rows
  ├── template.html        # Must contain {{name}} and {{content}}
  ├── style.css            # Copied to the output directory
  └── assets/              # Optional, copied to the output root

Row types:
  text     Formatted text, or raw HTML if the value contains '<'
  plain    Always formatted: *bold*, _italic_, newlines → <br>
  html     Emitted verbatim
  table    Array of arrays of cells, each cell formatted")]
#[command(version = version_string())]
struct Cli {
    /// Source directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the profile page into the output directory
    Build,
    /// Load and render without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print a minimal template with both markers and the reveal script
    GenTemplate,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build => {
            let secrets = Secrets::from_env()?;
            println!("==> Building {}", cli.source.display());
            let report = generate::build(&cli.source, &cli.output, secrets)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let secrets = Secrets::from_env()?;
            println!("==> Checking {}", cli.source.display());
            let site = generate::prepare(&cli.source, secrets)?;
            output::print_check_output(&site.sections, &site.page.missing_markers);
            println!("==> Profile is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenTemplate => {
            println!("{}", generate::stock_template());
        }
    }

    Ok(())
}
