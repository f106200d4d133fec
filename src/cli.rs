//! Minimal CLI: load schema documents → emit descriptors
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// translate typed schema documents into JSON-Schema descriptors for tool contracts
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// translate schema documents and print their descriptors
    Translate(TranslateOut),
    /// print the built-in sample contract's descriptor
    Demo(DemoOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /tools/0/schema)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct TranslateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted; requires a single input)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct DemoOut {
    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Resolve inputs and translate every document. Translation runs per-file
    /// in parallel (the translator is reentrant); results come back in input
    /// order.
    fn translate_all(&self) -> anyhow::Result<Vec<(PathBuf, serde_json::Value)>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        source_paths
            .into_par_iter()
            .map(|source_path| {
                let descriptor = self
                    .translate_one(&source_path)
                    .with_context(|| source_path.display().to_string())?;
                Ok((source_path, descriptor))
            })
            .collect()
    }

    fn translate_one(&self, source_path: &Path) -> anyhow::Result<serde_json::Value> {
        let source =
            std::fs::read_to_string(source_path).context("failed to read source file")?;
        let mut document = serde_json::from_str::<serde_json::Value>(&source)
            .context("failed to parse JSON source file")?;
        if let Some(pointer) = self.json_pointer.as_deref() {
            document = document
                .pointer(pointer)
                .cloned()
                .with_context(|| format!("JSON pointer matched nothing: {pointer}"))?;
        }
        let node = crate::wire::node_from_value(document)?;
        Ok(crate::emit::emit_descriptor(&node))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Translate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let results = target.input_settings.translate_all()?;
                match target.out.as_ref() {
                    Some(out) => {
                        if results.len() != 1 {
                            bail!("--out expects exactly one input, got {}", results.len());
                        }
                        write_pretty(out, &results[0].1)
                    }
                    None => {
                        for (source_path, descriptor) in &results {
                            if results.len() > 1 {
                                eprintln!(
                                    "{} {}",
                                    "──".dimmed(),
                                    source_path.display().to_string().dimmed()
                                );
                            }
                            println!("{}", serde_json::to_string_pretty(descriptor)?);
                        }
                        Ok(())
                    }
                }
            }
            Command::Demo(target) => {
                let node = crate::samples::sample_tool_contract();
                let descriptor = crate::emit::emit_descriptor(&node);
                match target.out.as_ref() {
                    Some(out) => write_pretty(out, &descriptor),
                    None => {
                        println!("{}", serde_json::to_string_pretty(&descriptor)?);
                        Ok(())
                    }
                }
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_pretty(out: &Path, descriptor: &serde_json::Value) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_string_pretty(descriptor)?)?;
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // Treat as a literal path
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
