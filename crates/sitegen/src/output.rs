use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use sitegen_core::Artifact;
use std::fs;
use std::path::{Path, PathBuf};

pub const HTML_FILE: &str = "index.html";
pub const CSS_FILE: &str = "styles.css";
pub const JS_FILE: &str = "script.js";

#[derive(Debug, clap::Args, Clone)]
pub struct OutputOptions {
    /// Directory to write index.html, styles.css and script.js into
    #[arg(short, long, env = "SITEGEN_OUT_DIR")]
    pub out: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not print progress while the response streams in
    #[arg(short, long)]
    pub quiet: bool,
}

/// Collects the updates of one request and reports progress on stderr
#[derive(Debug, Default)]
pub struct Progress {
    quiet: bool,
    updates: usize,
    latest: Option<Artifact>,
}

impl Progress {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            ..Default::default()
        }
    }

    pub fn update(&mut self, artifact: &Artifact) {
        self.updates += 1;
        if !self.quiet {
            eprintln!(
                "{} {}",
                format!("update #{}", self.updates).cyan(),
                summary(artifact)
            );
        }
        self.latest = Some(artifact.clone());
    }

    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn into_latest(self) -> Option<Artifact> {
        self.latest
    }
}

/// Size of each source, counted in characters
pub fn summary(artifact: &Artifact) -> String {
    format!(
        "html: {} chars, css: {} chars, js: {} chars",
        artifact.html.chars().count(),
        artifact.css.chars().count(),
        artifact.js.chars().count()
    )
}

/// Print the final artifact and write it to disk when requested.
///
/// An artifact with all three sources empty is reported like a missing one
/// and nothing is written.
pub fn finish(artifact: Option<Artifact>, options: &OutputOptions) -> Result<()> {
    let Some(artifact) = artifact.filter(|artifact| !artifact.is_empty()) else {
        eprintln!("{}", "The backend did not return any code blocks".yellow());
        return Ok(());
    };

    if let Some(dir) = &options.out {
        let written = write_artifact(dir, &artifact)?;
        for path in written {
            eprintln!("{} {}", "Wrote".green().bold(), path.display());
        }
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&artifact)?);
    } else {
        println!("{}", artifact.to_markdown());
    }

    Ok(())
}

/// Write the three sources into `dir`, creating it if needed
pub fn write_artifact(dir: &Path, artifact: &Artifact) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let files = [
        (HTML_FILE, &artifact.html),
        (CSS_FILE, &artifact.css),
        (JS_FILE, &artifact.js),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = dir.join(name);
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

/// Sources previously written by [`write_artifact`]. Missing CSS or JS files are `None`.
pub fn read_artifact(dir: &Path) -> Result<(String, Option<String>, Option<String>)> {
    let html_path = dir.join(HTML_FILE);
    let html = fs::read_to_string(&html_path)
        .with_context(|| format!("Failed to read {}", html_path.display()))?;

    let optional = |name: &str| -> Result<Option<String>> {
        let path = dir.join(name);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("Failed to read {}", path.display()))
    };

    Ok((html, optional(CSS_FILE)?, optional(JS_FILE)?))
}
