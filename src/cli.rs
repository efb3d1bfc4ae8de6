// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::core::{ConfigManager, FsOps, TemplateEngine};
use crate::generator::ResumeGenerator;
use crate::render::Renderer;
use crate::types::resume::Customizations;
use crate::web::start_web_server;

#[derive(Parser, Debug)]
#[command(name = "cvrender")]
#[command(about = "Render resumes from profile data through fixed or configured templates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a profile to an HTML page
    Render {
        /// Profile data (JSON or YAML)
        #[arg(short, long)]
        profile: PathBuf,
        /// Template id; ignored when --config or --resume is given
        #[arg(short, long)]
        template: Option<String>,
        /// Explicit template configuration (JSON or YAML)
        #[arg(short, long, conflicts_with = "resume")]
        config: Option<PathBuf>,
        /// Customizations applied on top of the template
        #[arg(long, conflicts_with = "resume")]
        customizations: Option<PathBuf>,
        /// Resume record carrying its own template and customizations
        #[arg(short, long)]
        resume: Option<PathBuf>,
        /// Name used in the output file instead of the profile name
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// List available templates
    Templates,
    /// Validate a template configuration file
    CheckConfig { file: PathBuf },
    /// Start the HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    match cli.command {
        Command::Render {
            profile,
            template,
            config: configuration,
            customizations,
            resume,
            name,
            output_dir,
        } => {
            let engine = load_engine(&config).await?;
            let render_config = config.create_render_config(template, name, output_dir);
            let generator = ResumeGenerator::with_engine(render_config, engine);

            let profile = FsOps::load_profile(&profile).await?;
            let customizations = match customizations {
                Some(path) => FsOps::load_customizations(&path).await?,
                None => Customizations::default(),
            };

            let output_path = if let Some(path) = resume {
                let resume = FsOps::load_resume(&path).await?;
                info!("Rendering resume '{}' ({})", resume.name, resume.id);
                let document = generator.render_resume(&resume, &profile);
                let template = generator.engine().normalize_template_id(&resume.template_id);
                generator.write(&document, &profile, &template).await?
            } else if let Some(path) = configuration {
                let configuration = FsOps::load_configuration(&path).await?;
                let document = generator.engine().renderer().render_dynamic(
                    &profile,
                    &customizations,
                    &configuration,
                );
                generator.write(&document, &profile, "custom").await?
            } else {
                generator.generate(&profile, &customizations).await?
            };

            println!("{}", output_path.display());
        }

        Command::Templates => {
            let engine = load_engine(&config).await?;
            for summary in engine.summaries() {
                let origin = if summary.builtin { "built-in" } else { "disk" };
                println!(
                    "{:<16} {:<8} {:<9} {}",
                    summary.id, summary.kind, origin, summary.description
                );
            }
        }

        Command::CheckConfig { file } => {
            let configuration = FsOps::load_configuration(&file)
                .await
                .with_context(|| format!("Configuration check failed: {}", file.display()))?;

            let fonts = config.font_validator().await?;
            let mut families = vec![configuration.fonts.family.as_str()];
            if let Some(heading) = configuration.fonts.heading_family.as_deref() {
                families.push(heading);
            }
            let result = fonts.validate(&families);
            for warning in &result.warnings {
                warn!("{}", warning);
            }
            if !result.unknown_fonts.is_empty() {
                info!("Known fonts: {}", fonts.known_fonts().join(", "));
            }

            println!(
                "{}: {} layout, {} sections",
                file.display(),
                configuration.layout.layout_type.as_str(),
                configuration.sections.len()
            );
        }

        Command::Serve { port } => start_web_server(config, port).await?,
    }

    Ok(())
}

async fn load_engine(config: &ConfigManager) -> Result<TemplateEngine> {
    let fonts = config.font_validator().await?;
    Ok(TemplateEngine::new(config.environment.templates_path.clone())?
        .with_renderer(Renderer::new(fonts)))
}
