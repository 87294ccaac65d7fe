//! Minimal CLI: load model → project → (ts | ast)
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::{EntityArrayNullability, ProjectionOptions};
use crate::error::{Error, Result};
use crate::ir::Declaration;
use crate::model::Model;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// project a parsed data model into typed interface declarations
#[derive(Parser, Debug)]
#[command(name = "schema-typer")]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit TypeScript-style interface declarations
    Ts(TsOut),
    /// print the projected AST as JSON
    Ast(AstOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more model files (JSON). May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// projection options as JSON (e.g. {"entity_arrays": "wrapped"})
    #[arg(long)]
    config: Option<PathBuf>,

    /// how nullable array properties on entities are typed (overrides --config)
    #[arg(long, value_enum)]
    entity_arrays: Option<EntityArrayNullability>,
}

#[derive(clap::Parser, Debug)]
struct TsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct AstOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn options(&self) -> Result<ProjectionOptions> {
        let mut options = match &self.config {
            Some(path) => ProjectionOptions::from_path(path)?,
            None => ProjectionOptions::default(),
        };
        if let Some(policy) = self.entity_arrays {
            options = options.with_entity_arrays(policy);
        }
        Ok(options)
    }

    fn load_project(&self) -> anyhow::Result<Vec<Declaration>> {
        let paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let options = self.options().context("failed to load projection options")?;
        let model = load_models(&paths)?;
        let projector = crate::project::Projector::new(options);
        let decls = projector.project_model(&model);
        tracing::info!(files = paths.len(), declarations = decls.len(), "model projected");
        Ok(decls)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Ts(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let decls = target.input_settings.load_project()?;
                let mut cg = crate::codegen::Codegen::new();
                cg.emit_all(&decls);
                write_output(target.out.as_deref(), &cg.into_string(), &mut std::io::stdout())
            }
            Command::Ast(target) => {
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let decls = target.input_settings.load_project()?;
                let mut src = serde_json::to_string_pretty(&decls)?;
                src.push('\n');
                write_output(target.out.as_deref(), &src, &mut std::io::stdout())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Read and merge models in the given order.
pub fn load_models(paths: &[PathBuf]) -> Result<Model> {
    let mut model = Model::default();
    for path in paths {
        let bytes = std::fs::read(path).map_err(|source| Error::Io { path: path.clone(), source })?;
        let part: Model = crate::path_de::from_slice_with_path(&bytes)?;
        tracing::debug!(path = %path.display(), definitions = part.definitions.len(), "model loaded");
        model.merge(part)?;
    }
    Ok(model)
}

/// Write `src` verbatim to `out`, or to `stdout` when no file is given.
fn write_output(out: Option<&Path>, src: &str, stdout: &mut impl Write) -> anyhow::Result<()> {
    if let Some(out) = out {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
    } else {
        stdout.write_all(src.as_bytes()).context("failed to write to stdout")?;
    }
    Ok(())
}

pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
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
                return Err(Error::NoMatch(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
