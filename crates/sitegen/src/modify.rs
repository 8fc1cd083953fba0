use crate::prelude::{eprintln, *};
use sitegen_core::config::ClientConfig;
use std::path::{Path, PathBuf};

use crate::client::GenerationClient;
use crate::output::{self, OutputOptions, Progress};

#[derive(Debug, clap::Parser)]
#[command(name = "modify")]
#[command(about = "Modify an existing website")]
pub struct App {
    /// The changes to make
    pub description: String,

    /// Directory holding index.html, styles.css and script.js from a previous run
    #[arg(long, conflicts_with_all = ["html", "css", "js"])]
    pub from: Option<PathBuf>,

    /// File with the current HTML
    #[arg(long, required_unless_present = "from")]
    pub html: Option<PathBuf>,

    /// File with the current CSS
    #[arg(long)]
    pub css: Option<PathBuf>,

    /// File with the current JavaScript
    #[arg(long)]
    pub js: Option<PathBuf>,

    #[clap(flatten)]
    pub output: OutputOptions,
}

/// Current sources the modification starts from
#[derive(Debug)]
struct CurrentSite {
    html: String,
    css: Option<String>,
    js: Option<String>,
}

pub async fn run(app: App, global: crate::Global, config: ClientConfig) -> Result<()> {
    let current = load_current(&app).await?;
    let client = GenerationClient::new(config);
    let mut progress = Progress::new(app.output.quiet);

    client
        .modify_website(
            &app.description,
            &current.html,
            current.css.as_deref(),
            current.js.as_deref(),
            |artifact| progress.update(artifact),
        )
        .await?;

    if global.verbose {
        eprintln!("Received {} updates", progress.updates());
    }

    output::finish(progress.into_latest(), &app.output)
}

async fn load_current(app: &App) -> Result<CurrentSite> {
    if let Some(dir) = &app.from {
        let (html, css, js) = output::read_artifact(dir)?;
        return Ok(CurrentSite { html, css, js });
    }

    let html_path = app
        .html
        .as_deref()
        .ok_or_else(|| eyre!("Either --from or --html is required"))?;

    Ok(CurrentSite {
        html: read_file(html_path).await?,
        css: read_optional(app.css.as_deref()).await?,
        js: read_optional(app.js.as_deref()).await?,
    })
}

async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| eyre!("Failed to read file '{}': {}", path.display(), e))
}

async fn read_optional(path: Option<&Path>) -> Result<Option<String>> {
    match path {
        Some(path) => read_file(path).await.map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_load_current_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("page.html");
        let css = dir.path().join("page.css");
        std::fs::write(&html, "<p>x</p>").unwrap();
        std::fs::write(&css, "p {}").unwrap();

        let app = App::try_parse_from([
            "modify",
            "make it red",
            "--html",
            html.to_str().unwrap(),
            "--css",
            css.to_str().unwrap(),
        ])
        .unwrap();

        let current = load_current(&app).await.unwrap();
        assert_eq!(current.html, "<p>x</p>");
        assert_eq!(current.css.as_deref(), Some("p {}"));
        assert_eq!(current.js, None);
    }

    #[tokio::test]
    async fn test_load_current_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = sitegen_core::Artifact::new("<h1>x</h1>", "h1 {}", "go();");
        output::write_artifact(dir.path(), &artifact).unwrap();

        let app = App::try_parse_from(["modify", "tweak", "--from", dir.path().to_str().unwrap()]).unwrap();

        let current = load_current(&app).await.unwrap();
        assert_eq!(current.html, "<h1>x</h1>");
        assert_eq!(current.css.as_deref(), Some("h1 {}"));
        assert_eq!(current.js.as_deref(), Some("go();"));
    }

    #[test]
    fn test_html_or_from_is_required() {
        assert!(App::try_parse_from(["modify", "tweak"]).is_err());
    }

    #[tokio::test]
    async fn test_missing_html_file() {
        let app = App::try_parse_from(["modify", "tweak", "--html", "/nonexistent/index.html"]).unwrap();
        let err = load_current(&app).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
