use crate::prelude::{eprintln, *};
use clap::Parser;
use sitegen_core::config::{resolve_base_url, BaseUrlSources, ClientConfig, Deployment};

mod client;
mod error;
mod generate;
mod modify;
mod output;
mod prelude;
mod stream;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate and modify websites from natural-language descriptions"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Backend base URL
    #[clap(long, env = "SITEGEN_BACKEND_URL", global = true)]
    backend_url: Option<String>,

    /// Host name injected by the deployment platform, used as https://<host>
    #[clap(long, env = "VERCEL_URL", global = true)]
    deploy_host: Option<String>,

    /// Origin the application is served from. Replaces the backend URL in production
    #[clap(long, env = "SITEGEN_PUBLIC_ORIGIN", global = true)]
    public_origin: Option<String>,

    /// Run as a production deployment. Disables the fallback endpoints
    #[clap(long, env = "SITEGEN_PRODUCTION", global = true, default_value = "false")]
    production: bool,

    /// Whether to display additional information.
    #[clap(long, env = "SITEGEN_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    pub fn deployment(&self) -> Deployment {
        Deployment::from_production_flag(self.production)
    }

    /// Resolve the client configuration once; it is read-only afterwards.
    pub fn client_config(&self) -> ClientConfig {
        let base_url = resolve_base_url(&BaseUrlSources {
            backend_url: self.backend_url.as_deref(),
            deploy_host: self.deploy_host.as_deref(),
            public_origin: self.public_origin.as_deref(),
            deployment: self.deployment(),
        });
        log::info!("Using backend URL: {base_url}");

        ClientConfig::for_deployment(base_url, self.deployment())
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Generate a website from a description
    Generate(crate::generate::App),

    /// Modify an existing website
    Modify(crate::modify::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    let config = app.global.client_config();

    if app.global.verbose {
        eprintln!("Backend: {}", config.base_url);
        eprintln!("Deployment: {:?}", app.global.deployment());
    }

    match app.command {
        SubCommands::Generate(sub_app) => crate::generate::run(sub_app, app.global, config).await,
        SubCommands::Modify(sub_app) => crate::modify::run(sub_app, app.global, config).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
