use crate::prelude::{eprintln, *};
use sitegen_core::config::ClientConfig;

use crate::client::GenerationClient;
use crate::output::{self, OutputOptions, Progress};

#[derive(Debug, clap::Parser)]
#[command(name = "generate")]
#[command(about = "Generate a website from a description")]
pub struct App {
    /// What the website should look like and do
    pub description: String,

    #[clap(flatten)]
    pub output: OutputOptions,
}

pub async fn run(app: App, global: crate::Global, config: ClientConfig) -> Result<()> {
    let client = GenerationClient::new(config);
    let mut progress = Progress::new(app.output.quiet);

    client
        .generate_website(&app.description, |artifact| progress.update(artifact))
        .await?;

    if global.verbose {
        eprintln!("Received {} updates", progress.updates());
    }

    output::finish(progress.into_latest(), &app.output)
}
