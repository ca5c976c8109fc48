use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailcraft_model::{
    CanvasSettings, ComponentKind, ComponentPreset, EmailComponent, EmailTemplate, SequentialIds,
};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Source directory
    #[arg(short, long, default_value = "templates")]
    pub src_dir: String,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Mailcraft project...".bright_blue().bold()
    );

    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join("welcome.json");
    if !example_file.exists() {
        fs::write(&example_file, welcome_template()?.to_json_pretty()?)?;
        println!("  {} Created welcome.json", "✓".green());
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        out_dir: args.out_dir.clone(),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    debug!(path = %config_path.display(), "Wrote config");

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/welcome.json", args.src_dir);
    println!("  2. Run: mailcraft compile");
    println!("  3. Check output in {}/", args.out_dir);

    Ok(())
}

/// Heading, copy and a two-column call to action
fn welcome_template() -> Result<EmailTemplate> {
    let mut ids = SequentialIds::new("welcome");
    let mut build = |name: &str| -> Result<EmailComponent> {
        Ok(name.parse::<ComponentPreset>()?.build(&mut ids))
    };

    let mut heading = build("heading")?;
    if let ComponentKind::Heading { content, .. } = &mut heading.kind {
        *content = "Welcome aboard".to_string();
    }

    let mut text = build("text")?;
    if let ComponentKind::Text { content } = &mut text.kind {
        *content = "Thanks for signing up. Here is what to do next.".to_string();
    }

    let mut columns = build("column2")?;
    let image = build("image")?;
    let mut button = build("button")?;
    if let ComponentKind::Button { text, href } = &mut button.kind {
        *text = "Get started".to_string();
        *href = "https://example.com".to_string();
    }
    if let ComponentKind::Column { children, .. } = &mut columns.kind {
        children[0].push(image);
        children[1].push(button);
    }

    let mut template = EmailTemplate::new(
        vec![heading, text, columns, build("divider")?],
        CanvasSettings::default(),
    );
    template.name = Some("Welcome".to_string());
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_in(dir: &std::path::Path, force: bool) -> Result<()> {
        init(
            InitArgs {
                src_dir: "emails".to_string(),
                out_dir: "out".to_string(),
                force,
            },
            &dir.display().to_string(),
        )
    }

    #[test]
    fn test_init_writes_config_and_example() {
        let dir = tempfile::tempdir().unwrap();
        init_in(dir.path(), false).unwrap();

        let config = Config::load(&dir.path().display().to_string()).unwrap();
        assert_eq!(config.src_dir, "emails");
        assert_eq!(config.out_dir, "out");

        let json = fs::read_to_string(dir.path().join("emails/welcome.json")).unwrap();
        let template = EmailTemplate::from_json(&json).unwrap();
        assert_eq!(template.name.as_deref(), Some("Welcome"));
        assert_eq!(template.components.len(), 4);
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{}").unwrap();

        init_in(dir.path(), false).unwrap();
        let content = fs::read_to_string(dir.path().join(DEFAULT_CONFIG_NAME)).unwrap();
        assert_eq!(content, "{}");
        assert!(!dir.path().join("emails").exists());

        init_in(dir.path(), true).unwrap();
        let config = Config::load(&dir.path().display().to_string()).unwrap();
        assert_eq!(config.src_dir, "emails");
    }
}
