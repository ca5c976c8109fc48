use crate::config::Config;
use anyhow::{anyhow, Context as _, Result};
use clap::Args;
use colored::Colorize;
use mailcraft_compiler_html::{compile_template, CompileOptions};
use mailcraft_model::EmailTemplate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Template file or directory (defaults to the configured source directory)
    pub path: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Emit HTML without newlines or indentation
    #[arg(long)]
    pub compact: bool,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let src_dir = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_src_dir(cwd),
    };

    if !src_dir.exists() {
        return Err(anyhow!("Source path does not exist: {:?}", src_dir));
    }

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    let mut options = config.compiler_options.to_compile_options();
    if args.compact {
        options.pretty = false;
    }

    println!("{}", "🔨 Compiling email templates...".bright_blue().bold());

    let template_files = find_template_files(&src_dir);

    if template_files.is_empty() {
        println!("{}", "⚠️  No template files found".yellow());
        return Ok(());
    }

    info!(count = template_files.len(), src = %src_dir.display(), "Found templates");

    let root = if src_dir.is_file() {
        src_dir.parent().unwrap_or(src_dir.as_path()).to_path_buf()
    } else {
        src_dir.clone()
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for template_file in &template_files {
        let relative_path = template_file.strip_prefix(&root).unwrap_or(template_file);
        let target = if args.stdout {
            None
        } else {
            Some(out_dir.join(relative_path).with_extension("html"))
        };

        match compile_file(template_file, target.as_deref(), options.clone()) {
            Ok(output_path) => {
                success_count += 1;
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    output_path
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    format!("{:#}", e).red()
                );
            }
        }
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Compiled {} files successfully",
            "✅".green(),
            success_count
        );
        Ok(())
    } else {
        println!(
            "{} Compiled {} files, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
        Err(anyhow!("{} template(s) failed to compile", error_count))
    }
}

/// `.json` files under `path`, or `path` itself when it is a file
fn find_template_files(path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();

    files.sort();
    files
}

/// Compile one template. Writes to `target`, or stdout when there is none.
fn compile_file(
    file_path: &Path,
    target: Option<&Path>,
    options: CompileOptions,
) -> Result<String> {
    let source = fs::read_to_string(file_path)
        .with_context(|| format!("reading {}", file_path.display()))?;
    let template = EmailTemplate::from_json(&source)?;

    let html = compile_template(&template, options);

    let Some(output_file) = target else {
        println!("{}", html);
        return Ok("stdout".to_string());
    };

    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_file, html)?;
    debug!(path = %output_file.display(), "Wrote HTML");

    Ok(output_file.display().to_string())
}
