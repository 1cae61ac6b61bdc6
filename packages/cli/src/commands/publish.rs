use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecanvas_config::{site_from_json, PageConfig};
use pagecanvas_renderer::{render_page_html, RenderOptions};
use std::fs;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Site configuration JSON file
    pub file: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "./public")]
    pub out_dir: PathBuf,
}

pub fn publish(args: PublishArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.file)
        .map_err(|err| anyhow!("cannot read {}: {}", args.file.display(), err))?;
    let site = site_from_json(&raw)?;

    println!("{}", "🔨 Rendering pages...".bright_blue().bold());

    let options = RenderOptions::default();
    for page in &site.pages {
        let target = args.out_dir.join(output_path(page)?);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let html = render_page_html(&site, page, &options);
        fs::write(&target, html)?;
        tracing::debug!(page = %page.uuid, path = %page.path, "page rendered");
        println!("   {} {} → {}", "✓".green(), page.path, target.display());
    }

    println!();
    println!(
        "✨ {} {} page(s) written to {}",
        "Done!".green().bold(),
        site.pages.len(),
        args.out_dir.display()
    );
    Ok(())
}

/// Map a page path to its output file: "/" becomes index.html, every
/// other path drops the leading slash and gains .html. Validation already
/// rejects '..' segments; a path that would still land outside the output
/// directory is refused here rather than written.
fn output_path(page: &PageConfig) -> Result<PathBuf> {
    if page.path == "/" {
        return Ok(PathBuf::from("index.html"));
    }

    let relative = Path::new(page.path.trim_start_matches('/')).with_extension("html");
    if relative
        .components()
        .any(|component| !matches!(component, Component::Normal(_)))
    {
        return Err(anyhow!(
            "page path {:?} escapes the output directory",
            page.path
        ));
    }
    Ok(relative)
}
