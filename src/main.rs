use std::io::{Read, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use eighty::cli::{CliArgs, OutputFormat};
use eighty::config::EngineConfig;
use eighty::render::{self, CanvasPool, FontFace, HtmlOptions, RasterOptions, Rendered, Target};
use eighty::theme::{self, ThemeSource};

fn main() -> Result<()> {
    eighty::tracing::init();

    let args = CliArgs::parse();

    if args.list_themes {
        for info in theme::list_available_themes() {
            let source = match info.source {
                ThemeSource::Builtin => "builtin",
                ThemeSource::User => "user",
            };
            println!("{:<16} {:<24} {}", info.id, info.name, source);
        }
        return Ok(());
    }

    let mut config = EngineConfig::load();
    args.apply_to(&mut config);

    let source = read_input(&args)?;
    let options = config.format_options(args.id);
    let theme = theme::load_theme(&config.theme)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Failed to load theme '{}'", config.theme))?;

    let bytes = match args.format {
        OutputFormat::Json => {
            let doc = eighty::layout(&source, config.columns, &options)?;
            serde_json::to_vec_pretty(&doc).context("Failed to serialize layout")?
        }
        OutputFormat::Html => {
            let title = args
                .input
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned());
            let target = Target::Html(HtmlOptions {
                standalone: args.standalone,
                title,
                theme,
            });
            match render::format(&source, config.columns, &options, target)? {
                Rendered::Html(html) => html.into_bytes(),
                Rendered::Raster(_) => bail!("HTML target produced a raster"),
            }
        }
        OutputFormat::Png => {
            let Some(font_path) = &config.font else {
                bail!("PNG output needs a font: pass --font or set `font` in config.yaml");
            };
            let face = FontFace::load(font_path)?;

            let mut raster = RasterOptions::new(Arc::new(face));
            raster.theme = theme;
            raster.font_size = config.font_size;
            raster.line_height = config.line_height;
            raster.margin = config.margin;
            raster.line_numbers = config.line_numbers;
            raster.syntax_coloring = config.syntax_coloring;

            let pool = CanvasPool::new(
                config.pool_size.max(1),
                config.canvas_width as usize,
                config.canvas_height as usize,
                Duration::from_millis(config.pool_wait_ms),
            );
            let target = Target::Raster {
                pool: &pool,
                options: &raster,
            };
            match render::format(&source, config.columns, &options, target)? {
                Rendered::Raster(output) => {
                    if output.truncated {
                        eprintln!(
                            "warning: output truncated to {} rows; raise canvas_height in config.yaml",
                            output.rows
                        );
                    }
                    output.encode_png()?
                }
                Rendered::Html(_) => bail!("Raster target produced HTML"),
            }
        }
    };

    write_output(&args, &bytes)
}

fn read_input(args: &CliArgs) -> Result<Vec<u8>> {
    match &args.input {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(args: &CliArgs, bytes: &[u8]) -> Result<()> {
    match &args.output {
        Some(path) => {
            std::fs::write(path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes).context("Failed to write stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
