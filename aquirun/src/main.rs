//! CLI for running AquiMod2 scenarios and inspecting their configuration and
//! result files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use aquirun::core::table::{Column, OutputTable};
use aquirun::exit_codes;
use aquirun::io::config::{AquirunConfig, load_config};
use aquirun::io::directive::{apply_output_flags, lookup_value, replace_value, summarize};
use aquirun::io::output::OutputLoader;
use aquirun::io::process::{CallingConvention, run_model};
use aquirun::io::scenario::Scenario;

#[derive(Parser)]
#[command(
    name = "aquirun",
    version,
    about = "Run AquiMod2 scenarios and inspect their configuration and output"
)]
struct Cli {
    /// Path to the tool configuration file.
    #[arg(long, global = true, default_value = "aquirun.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the model executable against a scenario directory.
    Run {
        scenario: PathBuf,
        /// Model executable (overrides `exe_path` from the config file).
        #[arg(long)]
        exe: Option<PathBuf>,
        /// Rely on the working directory alone instead of also passing the
        /// scenario directory as an argument.
        #[arg(long)]
        workdir_only: bool,
        /// Print the captured outcome as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the value of a configuration directive.
    Get { scenario: PathBuf, label: String },
    /// Replace the value of a configuration directive.
    Set {
        scenario: PathBuf,
        label: String,
        value: String,
    },
    /// Set the "Write model output files" flags (e.g. "N Y Y").
    Flags { scenario: PathBuf, flags: String },
    /// Report current values for a set of directives, best effort.
    Summary {
        scenario: PathBuf,
        /// Labels to report; defaults to the configured summary labels.
        labels: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// List result files in the scenario's Output directory.
    Outputs { scenario: PathBuf },
    /// Load a result file and print its columns.
    Show {
        scenario: PathBuf,
        file: String,
        /// Treat the file as headerless and name its columns positionally.
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,
        /// Print only the plottable column names (date components excluded).
        #[arg(long)]
        plottable: bool,
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    aquirun::logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let cfg = load_config(&cli.config)
        .with_context(|| format!("load config {}", cli.config.display()))?;

    match cli.command {
        Command::Run {
            scenario,
            exe,
            workdir_only,
            json,
        } => cmd_run(&cfg, &scenario, exe, workdir_only, json),
        Command::Get { scenario, label } => {
            let input = open_input(&cfg, &scenario)?;
            println!("{}", lookup_value(&input, &label)?);
            Ok(exit_codes::OK)
        }
        Command::Set {
            scenario,
            label,
            value,
        } => {
            let input = open_input(&cfg, &scenario)?;
            replace_value(&input, &label, &value)?;
            Ok(exit_codes::OK)
        }
        Command::Flags { scenario, flags } => {
            let input = open_input(&cfg, &scenario)?;
            apply_output_flags(&input, &flags)?;
            Ok(exit_codes::OK)
        }
        Command::Summary {
            scenario,
            labels,
            json,
        } => {
            let input = open_input(&cfg, &scenario)?;
            let labels = if labels.is_empty() {
                cfg.summary_labels.clone()
            } else {
                labels
            };
            let summary = summarize(&input, &labels);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary.render());
            }
            Ok(exit_codes::OK)
        }
        Command::Outputs { scenario } => {
            let scenario = open_scenario(&cfg, &scenario)?;
            for name in loader(&cfg).load_any(&scenario)? {
                println!("{name}");
            }
            Ok(exit_codes::OK)
        }
        Command::Show {
            scenario,
            file,
            columns,
            plottable,
            json,
        } => {
            let scenario = open_scenario(&cfg, &scenario)?;
            let table = loader(&cfg).load_named(&scenario, &file, columns.as_deref())?;
            if plottable {
                for name in table.plottable_columns(&cfg.date_columns) {
                    println!("{name}");
                }
            } else if json {
                println!("{}", serde_json::to_string_pretty(&table_json(&table))?);
            } else {
                print!("{}", render_table(&table));
            }
            Ok(exit_codes::OK)
        }
    }
}

fn open_scenario(cfg: &AquirunConfig, root: &Path) -> Result<Scenario> {
    Ok(Scenario::open(root)?.with_input_file(&cfg.input_file_name))
}

fn open_input(cfg: &AquirunConfig, root: &Path) -> Result<PathBuf> {
    Ok(open_scenario(cfg, root)?.input_path())
}

fn loader(cfg: &AquirunConfig) -> OutputLoader {
    OutputLoader {
        date_columns: cfg.date_columns.clone(),
        output_suffix: cfg.output_suffix.clone(),
    }
}

fn cmd_run(
    cfg: &AquirunConfig,
    scenario: &Path,
    exe: Option<PathBuf>,
    workdir_only: bool,
    json: bool,
) -> Result<i32> {
    let exe = exe.or_else(|| cfg.exe_path.clone()).ok_or_else(|| {
        anyhow!("no model executable configured; pass --exe or set exe_path in aquirun.toml")
    })?;
    let convention = if workdir_only {
        CallingConvention::WorkdirOnly
    } else {
        cfg.calling_convention
    };
    let scenario = open_scenario(cfg, scenario)?;

    let result = run_model(&exe, scenario.root(), convention)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", result.stdout);
        eprint!("{}", result.stderr);
        match result.exit_code {
            Some(0) => {}
            Some(code) => eprintln!("model exited with code {code}"),
            None => eprintln!("model terminated by signal"),
        }
    }
    if result.success() {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::MODEL_FAILED)
    }
}

/// Render a table as header plus tab-separated rows; derived dates print as
/// `YYYY-MM-DD`.
fn render_table(table: &OutputTable) -> String {
    let mut out = String::new();
    out.push_str(&table.names().join("\t"));
    out.push('\n');
    for row in 0..table.row_count() {
        let cells: Vec<String> = table.columns().map(|(_, column)| cell(column, row)).collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

fn cell(column: &Column, row: usize) -> String {
    match column {
        Column::Int(values) => values[row].to_string(),
        Column::Float(values) => values[row].to_string(),
        Column::Text(values) => values[row].clone(),
        Column::Date(values) => values[row].format("%Y-%m-%d").to_string(),
    }
}

/// Map columns to JSON arrays keyed by column name.
fn table_json(table: &OutputTable) -> Value {
    let mut map = serde_json::Map::new();
    for (name, column) in table.columns() {
        let values: Vec<Value> = match column {
            Column::Int(v) => v.iter().map(|x| json!(x)).collect(),
            Column::Float(v) => v.iter().map(|x| json!(x)).collect(),
            Column::Text(v) => v.iter().map(|x| json!(x)).collect(),
            Column::Date(v) => v
                .iter()
                .map(|d| json!(d.format("%Y-%m-%d").to_string()))
                .collect(),
        };
        map.insert(name.to_string(), Value::Array(values));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquirun::core::table::{DateColumns, parse_table};

    #[test]
    fn parse_run() {
        let cli = Cli::parse_from(["aquirun", "run", "./scenario"]);
        assert!(matches!(
            cli.command,
            Command::Run {
                exe: None,
                workdir_only: false,
                json: false,
                ..
            }
        ));
    }

    #[test]
    fn parse_run_workdir_only() {
        let cli = Cli::parse_from(["aquirun", "run", "./scenario", "--workdir-only"]);
        assert!(matches!(
            cli.command,
            Command::Run {
                workdir_only: true,
                ..
            }
        ));
    }

    #[test]
    fn parse_show_with_columns() {
        let cli = Cli::parse_from([
            "aquirun",
            "show",
            "./scenario",
            "raw.out",
            "--columns",
            "step,gwl",
        ]);
        match cli.command {
            Command::Show { columns, .. } => {
                assert_eq!(
                    columns,
                    Some(vec!["step".to_string(), "gwl".to_string()])
                );
            }
            _ => panic!("expected show command"),
        }
    }

    #[test]
    fn render_table_formats_dates() {
        let table = parse_table(
            "Day Month Year GWL\n15 6 2020 12.34\n",
            None,
            &DateColumns::default(),
        )
        .expect("parse");
        let rendered = render_table(&table);
        assert_eq!(
            rendered,
            "Day\tMonth\tYear\tGWL\tDate\n15\t6\t2020\t12.34\t2020-06-15\n"
        );
    }

    #[test]
    fn table_json_keys_columns_by_name() {
        let table = parse_table(
            "Day Month Year GWL\n15 6 2020 12.34\n",
            None,
            &DateColumns::default(),
        )
        .expect("parse");
        let value = table_json(&table);
        assert_eq!(value["GWL"], json!([12.34]));
        assert_eq!(value["Date"], json!(["2020-06-15"]));
    }
}
