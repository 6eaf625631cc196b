// RigMatch CLI - skeleton rename planning, headless

mod exit_codes;
mod fetch;
mod report;

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use rigmatch_engine::{MappingDictionary, MatchError, PlanReport};

use exit_codes::{EXIT_DICT_INVALID, EXIT_DICT_MISSING, EXIT_FILE_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "rigmatch")]
#[command(about = "Transfer one skeleton's bone naming onto another")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan renames: match target bone names against a reference list
    #[command(after_help = "\
Examples:
  rigmatch plan -t mixamo_bones.txt -r game_rig.txt
  rigmatch plan -t bones.txt -r rig.txt --include-fingers --json
  rigmatch plan -t bones.txt -r rig.txt --dict custom.json -o plan.json")]
    Plan {
        /// Target name list, one bone per line (the rig being renamed)
        #[arg(long, short = 't')]
        target: PathBuf,

        /// Reference name list, one bone per line (the naming to adopt)
        #[arg(long, short = 'r')]
        reference: PathBuf,

        /// Dictionary file (omit to use the fetched cache)
        #[arg(long)]
        dict: Option<PathBuf>,

        /// Also plan finger bones
        #[arg(long)]
        include_fingers: bool,

        /// Print the JSON report to stdout instead of the table
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Rewrite a name list according to a saved plan
    #[command(after_help = "\
Examples:
  rigmatch plan -t bones.txt -r rig.txt -o plan.json
  rigmatch apply plan.json -n bones.txt -o renamed.txt")]
    Apply {
        /// Plan report produced by `rigmatch plan -o`
        plan: PathBuf,

        /// Name list to rewrite
        #[arg(long, short = 'n')]
        names: PathBuf,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Download the mapping dictionary into the local cache
    Fetch {
        /// Dictionary URL (defaults to the community feed)
        #[arg(long, env = "RIGMATCH_DICT_URL")]
        url: Option<String>,

        /// Write to a file instead of the cache
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Download and validate only; leave the cache untouched
        #[arg(long)]
        no_cache: bool,
    },

    /// Show dictionary version, regions and bone counts
    Dict {
        /// Dictionary file (omit to use the fetched cache)
        #[arg(long)]
        dict: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too; those are not errors.
            let code = if err.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    let result = match cli.command {
        Commands::Plan {
            target,
            reference,
            dict,
            include_fingers,
            json,
            output,
        } => cmd_plan(target, reference, dict, include_fingers, json, output),
        Commands::Apply { plan, names, output } => cmd_apply(plan, names, output),
        Commands::Fetch {
            url,
            output,
            no_cache,
        } => fetch::cmd_fetch(url, output, no_cache),
        Commands::Dict { dict } => cmd_dict(dict),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_FILE_IO,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn with_code(code: u8, msg: impl Into<String>) -> Self {
        Self {
            code,
            message: msg.into(),
            hint: None,
        }
    }
}

/// Load the dictionary: explicit file when given, the cache otherwise.
fn load_dict(dict: Option<&PathBuf>) -> Result<MappingDictionary, CliError> {
    match dict {
        Some(path) => rigmatch_io::load_dictionary(path).map_err(dict_error),
        None => match rigmatch_io::load_cached_dictionary().map_err(dict_error)? {
            Some(dict) => Ok(dict),
            None => Err(CliError {
                code: EXIT_DICT_MISSING,
                message: "no dictionary cached".into(),
                hint: Some("run `rigmatch fetch`, or pass --dict <file>".into()),
            }),
        },
    }
}

fn dict_error(err: MatchError) -> CliError {
    let code = match err {
        MatchError::Io(_) => EXIT_DICT_MISSING,
        MatchError::DictionaryParse(_) | MatchError::DictionaryValidation(_) => EXIT_DICT_INVALID,
    };
    CliError::with_code(code, err.to_string())
}

fn cmd_plan(
    target: PathBuf,
    reference: PathBuf,
    dict: Option<PathBuf>,
    include_fingers: bool,
    json: bool,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let dict = load_dict(dict.as_ref())?;
    let targets = rigmatch_io::read_name_list(&target).map_err(|e| CliError::io(e.to_string()))?;
    let references =
        rigmatch_io::read_name_list(&reference).map_err(|e| CliError::io(e.to_string()))?;

    let report = rigmatch_engine::run(&dict, &targets, &references, include_fingers);

    if let Some(path) = &output {
        fs::write(path, report_json(&report)?)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        eprintln!("wrote {}", path.display());
    }

    if json {
        println!("{}", report_json(&report)?);
    } else {
        report::print_plan(&dict, &report);
    }

    let s = &report.summary;
    eprintln!(
        "plan: {} bones, {} matched, {} kept as-is, {} fingers skipped",
        s.total_targets, s.matched, s.kept, s.peripheral_skipped
    );
    Ok(())
}

fn report_json(report: &PlanReport) -> Result<String, CliError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| CliError::io(format!("cannot serialize report: {e}")))
}

fn cmd_apply(
    plan_path: PathBuf,
    names: PathBuf,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let data = fs::read_to_string(&plan_path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", plan_path.display())))?;
    let report: PlanReport = serde_json::from_str(&data)
        .map_err(|e| CliError::io(format!("{} is not a plan report: {e}", plan_path.display())))?;

    let renames: HashMap<&str, &str> = report
        .results
        .iter()
        .filter(|r| r.is_rename())
        .map(|r| (r.original_name.as_str(), r.proposed_name.as_str()))
        .collect();

    let bones = rigmatch_io::read_name_list(&names).map_err(|e| CliError::io(e.to_string()))?;
    let mut renamed = 0usize;
    let lines: Vec<&str> = bones
        .iter()
        .map(|name| match renames.get(name.as_str()) {
            Some(proposed) => {
                renamed += 1;
                *proposed
            }
            None => name.as_str(),
        })
        .collect();

    let body = if lines.is_empty() {
        String::new()
    } else {
        lines.join("\n") + "\n"
    };
    match &output {
        Some(path) => fs::write(path, &body)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?,
        None => print!("{body}"),
    }
    eprintln!("renamed {renamed} of {} bones", bones.len());
    Ok(())
}

fn cmd_dict(dict: Option<PathBuf>) -> Result<(), CliError> {
    let source = match &dict {
        Some(path) => path.display().to_string(),
        None => rigmatch_io::cache_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(no config directory)".into()),
    };
    let dict = load_dict(dict.as_ref())?;

    let version = if dict.version.is_empty() {
        "(unversioned)"
    } else {
        &dict.version
    };
    println!("version:      {version}");
    if !dict.last_updated.is_empty() {
        println!("last updated: {}", dict.last_updated);
    }
    println!("source:       {source}");
    println!(
        "side tokens:  left [{}]  right [{}]",
        dict.left_tokens.join(" "),
        dict.right_tokens.join(" ")
    );
    println!("regions:");
    for region in &dict.regions {
        let synonyms: usize = region.bones.iter().map(|(_, v)| v.len()).sum();
        println!(
            "  {:<12} {:>3} bones  {:>3} synonyms",
            region.display_name,
            region.bones.len(),
            synonyms
        );
    }
    println!(
        "total: {} bones, {} synonyms",
        dict.bone_count(),
        dict.synonym_count()
    );
    Ok(())
}
