//! Interaction Template CLI
//!
//! Usage:
//!   interaction-template id <FILE>
//!   interaction-template verify <FILE>...
//!   interaction-template generate <MANIFEST> [--compact]
//!   interaction-template resolve <FILE> --network <NAME>
//!
//! Set `RUST_LOG` (or pass `-v`) for diagnostic output.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;

use interaction_template::{
    generate_from_manifest, resolve, template_id, verify_id, Error, Template,
};

#[derive(Parser)]
#[command(name = "interaction-template")]
#[command(about = "Generate, verify, and resolve interaction templates")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the recomputed id of a template file
    Id {
        /// Template JSON file
        file: PathBuf,
    },

    /// Verify the stored id of one or more template files
    Verify {
        /// Template JSON files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Generate a template from a TOML manifest and print it as JSON
    Generate {
        /// Manifest file
        manifest: PathBuf,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Print a template's source resolved for one network
    Resolve {
        /// Template JSON file
        file: PathBuf,

        /// Network name (e.g. mainnet, testnet)
        #[arg(short, long)]
        network: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let code = match cli.command {
        Command::Id { file } => run_id(&file),
        Command::Verify { files } => run_verify(&files),
        Command::Generate { manifest, compact } => run_generate(&manifest, compact),
        Command::Resolve { file, network } => run_resolve(&file, &network),
    };
    std::process::exit(code);
}

fn read_file(path: &Path) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("Error reading file '{}': {}", path.display(), e);
        1
    })
}

fn run_id(path: &Path) -> i32 {
    let json = match read_file(path) {
        Ok(json) => json,
        Err(code) => return code,
    };
    match template_id(&json) {
        Ok(id) => {
            println!("{}", id);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn run_verify(paths: &[PathBuf]) -> i32 {
    let mut failures = 0;
    for path in paths {
        let result = read_file(path).and_then(|json| {
            Template::from_json(&json)
                .map_err(Error::from)
                .and_then(|template| Ok(verify_id(&template)?))
                .map_err(|e| {
                    eprintln!("{}: FAILED: {}", path.display(), e);
                    1
                })
        });
        match result {
            Ok(id) => println!("{}: OK {}", path.display(), id),
            Err(_) => failures += 1,
        }
    }
    info!("verified {} templates, {} failed", paths.len(), failures);
    if failures == 0 {
        0
    } else {
        1
    }
}

fn run_generate(manifest: &Path, compact: bool) -> i32 {
    let output = generate_from_manifest(manifest).and_then(|template| Ok(template.to_json(!compact)?));
    match output {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error generating template from '{}': {}", manifest.display(), e);
            1
        }
    }
}

fn run_resolve(path: &Path, network: &str) -> i32 {
    let json = match read_file(path) {
        Ok(json) => json,
        Err(code) => return code,
    };
    let template = match Template::from_json(&json) {
        Ok(template) => template,
        Err(e) => {
            eprintln!("Error: {}", Error::from(e));
            return 1;
        }
    };
    match resolve(&template, network) {
        Ok(source) => {
            println!("{}", source);
            0
        }
        Err(e) => {
            let filename = path.display().to_string();
            eprintln!("{}", e.format(&template.data().cadence, &filename));
            1
        }
    }
}
