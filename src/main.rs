//! `cvspruce` 바이너리 진입점.

use anyhow::Result;

use cvspruce::application::ports::ResponseRenderer;
use cvspruce::interface::cli::{AppComposition, Cli, CliAction};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let action = Cli::parse_action();
    if let Err(err) = run(action).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(action: CliAction) -> Result<()> {
    match action {
        CliAction::InspectConfig => {
            let composition = AppComposition::new(true)?;
            println!("{}", composition.inspect_config_usecase().execute()?);
        }
        CliAction::FetchUrl(url) => {
            let composition = AppComposition::new(false)?;
            let text = composition.fetch_job_spec_usecase().execute(&url).await?;
            println!("{text}");
        }
        CliAction::PreloadDecoders => {
            let composition = AppComposition::new(false)?;
            for status in composition.preload_decoders_usecase().execute().await? {
                println!("{}\t{} bytes", status.library, status.bytes);
            }
        }
        CliAction::Generate { options, json } => {
            let composition = AppComposition::new(json)?;
            let outcome = composition.generate_usecase().execute(options).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.response)?);
            } else {
                let markdown = composition.renderer().render(
                    &outcome.response,
                    outcome.provider,
                    outcome.workload,
                );
                print!("{markdown}");
            }
        }
    }
    Ok(())
}
