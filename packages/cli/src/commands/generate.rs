use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mapgen_dom::{render_java, render_xml, RenderOptions};
use mapgen_generator::{GenerationOutput, Generator, GeneratorConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project directory holding the config (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Print generated sources to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Root the target projects are resolved against (overrides the project directory)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub fn generate(args: GenerateArgs, cwd: &Path) -> Result<()> {
    let project_dir = cwd.join(&args.path);
    let config = GeneratorConfig::load(&project_dir)?;

    let tables_path = config.tables_path(&project_dir);
    if !tables_path.exists() {
        return Err(anyhow!(
            "Table descriptor file does not exist: {}",
            tables_path.display()
        ));
    }
    let tables = config.load_tables(&project_dir)?;

    if !args.stdout {
        println!("{}", "🔨 Generating mappers...".bright_blue().bold());
        println!("Found {} tables", tables.len());
    }

    let generator = Generator::new(&config)?;
    let output = generator.run(tables)?;

    for warning in &output.warnings {
        eprintln!("  {} {}", "⚠️".yellow(), warning.yellow());
    }

    if args.stdout {
        print_output(&output);
        return Ok(());
    }

    let out_root = args
        .out_dir
        .as_ref()
        .map(|dir| cwd.join(dir))
        .unwrap_or(project_dir);
    let written = write_output(&output, &out_root)?;

    println!();
    println!(
        "{} Generated {} files into {}",
        "✅".green(),
        written,
        out_root.display()
    );
    Ok(())
}

fn print_output(output: &GenerationOutput) {
    let options = RenderOptions::default();
    for file in &output.java_files {
        println!("// {}", file.relative_path().display());
        println!("{}", render_java(&file.unit, &options));
    }
    for file in &output.xml_files {
        println!("<!-- {} -->", file.relative_path().display());
        println!("{}", render_xml(&file.document, &options));
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    debug!(path = %path.display(), "wrote file");
    Ok(())
}

fn write_output(output: &GenerationOutput, out_root: &Path) -> Result<usize> {
    let options = RenderOptions::default();
    let mut written = 0;

    for file in &output.java_files {
        let relative: PathBuf = Path::new(&file.target_project).join(file.relative_path());
        write_file(&out_root.join(&relative), &render_java(&file.unit, &options))?;
        println!("  {} {}", "✓".green(), relative.display());
        written += 1;
    }

    for file in &output.xml_files {
        let relative: PathBuf = Path::new(&file.target_project).join(file.relative_path());
        write_file(&out_root.join(&relative), &render_xml(&file.document, &options))?;
        println!("  {} {}", "✓".green(), relative.display());
        written += 1;
    }

    Ok(written)
}
