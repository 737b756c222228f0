// Reel Scout Main Entry Point
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use reel_scout::agent::manifest::Manifest;
use reel_scout::config::{Config, Credentials};
use reel_scout::desktop;
use reel_scout::script_input::ScriptSource;
use reel_scout::ReelPipeline;

use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reel-scout")]
#[command(about = "Turn a reel script into a folder of portrait stock photos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract terms, search both providers, and download the images
    Run {
        #[command(flatten)]
        opts: ScriptOpts,

        /// Open the run folder when done
        #[arg(long)]
        open: bool,
    },

    /// Print the extracted search terms only
    Terms {
        #[command(flatten)]
        opts: ScriptOpts,
    },

    /// Print terms and the selected images without downloading
    Preview {
        #[command(flatten)]
        opts: ScriptOpts,
    },

    /// Check a run folder against its manifest
    Verify {
        /// Run folder containing manifest.json
        folder: PathBuf,
    },
}

#[derive(Args)]
struct ScriptOpts {
    /// Script text (otherwise --file, otherwise stdin)
    #[arg(short, long)]
    script: Option<String>,

    /// Read the script from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Maximum number of images
    #[arg(short, long, default_value_t = 10)]
    count: usize,

    /// Maximum number of search terms
    #[arg(short, long, default_value_t = 5)]
    terms: usize,

    /// Root directory for run folders
    #[arg(short, long, env = "REEL_OUTPUT_DIR")]
    output: Option<PathBuf>,

    /// Parallel downloads
    #[arg(long, default_value_t = 4)]
    concurrency: usize,

    /// Chat model used for term extraction
    #[arg(long, env = "REEL_LLM_MODEL")]
    model: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "REEL_LLM_URL")]
    llm_url: Option<String>,
}

impl ScriptOpts {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::new(Credentials::from_env()?);
        config.pool_cap = self.count;
        config.max_terms = self.terms;
        config.download_concurrency = self.concurrency;
        if let Some(output) = &self.output {
            config.output_root = output.clone();
        }
        if let Some(model) = &self.model {
            config.llm_model = model.clone();
        }
        if let Some(url) = &self.llm_url {
            config.llm_base_url = url.clone();
        }
        Ok(config)
    }

    fn script(&self) -> anyhow::Result<String> {
        Ok(ScriptSource::pick(self.script.clone(), self.file.clone()).read()?)
    }

    fn pipeline(&self) -> anyhow::Result<ReelPipeline> {
        Ok(ReelPipeline::from_config(&self.config()?)?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Keep HTTP client internals quiet unless explicitly overridden by the user.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("🚨 [REEL SCOUT PANIC] at {}: {}", location, message);
    }));

    info!("--- REEL SCOUT v{} ---", env!("CARGO_PKG_VERSION"));

    let args = Cli::parse();

    match args.command {
        Commands::Run { opts, open } => {
            let pipeline = opts.pipeline()?;
            let script = opts.script()?;
            let report = pipeline.run(&script).await?;

            println!("🔎 Search terms:");
            for term in &report.terms {
                println!("   - {}", term);
            }
            for failed in report.failures() {
                println!(
                    "   ✗ {:02} {} {}: {}",
                    failed.index,
                    failed.candidate.provider,
                    failed.candidate.id,
                    failed.failure.as_deref().unwrap_or("unknown error")
                );
            }
            println!("📁 {}", report.folder.display());
            println!("✅ {}", report.summary());

            if open {
                desktop::open_folder(&report.folder);
            }
        }
        Commands::Terms { opts } => {
            let pipeline = opts.pipeline()?;
            let script = opts.script()?;
            for term in pipeline.extract_terms(&script).await? {
                println!("{}", term);
            }
        }
        Commands::Preview { opts } => {
            let pipeline = opts.pipeline()?;
            let script = opts.script()?;
            let (terms, pool) = pipeline.preview(&script).await?;

            println!("🔎 Search terms:");
            for term in &terms {
                println!("   - {}", term);
            }
            println!("🖼️ {} images selected:", pool.len());
            for (i, candidate) in pool.iter().enumerate() {
                println!(
                    "   {:02} {:<8} {}x{} {}",
                    i + 1,
                    candidate.provider.as_str(),
                    candidate.width,
                    candidate.height,
                    candidate.url
                );
            }
        }
        Commands::Verify { folder } => {
            let manifest = Manifest::read(&folder).await?;
            let violations = manifest.verify(&folder).await;
            if violations.is_empty() {
                println!("✅ {} files intact", manifest.images.len());
            } else {
                for v in &violations {
                    error!("{}", v);
                }
                anyhow::bail!("{} of {} files failed verification", violations.len(), manifest.images.len());
            }
        }
    }

    Ok(())
}
