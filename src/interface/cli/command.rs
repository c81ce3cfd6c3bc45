//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::generation::{RunOptions, TextSource};
use crate::domain::options::{ApiWorkload, CoverLetterStyle, ProviderKind, TailorStyle};

#[derive(Debug, Parser)]
#[command(name = "cvspruce", version)]
#[command(about = "Tailor a CV to a job spec with Gemini, Claude or GPT-4o")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Match a CV against a job spec and generate tailored documents
    Generate(GenerateArgs),
    /// Print the plain text extracted from a job spec URL
    FetchUrl {
        /// Public http(s) URL of the job posting
        url: String,
    },
    /// Show effective merged config and API key sources
    Config,
    /// Download and verify the PDF/DOCX decoder libraries
    Decoders,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// CV file (.txt, .md; .pdf and .docx need an embedded document decoder)
    #[arg(long, value_name = "FILE")]
    cv: PathBuf,

    /// Job spec file (.txt, .md)
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with = "job_url",
        required_unless_present = "job_url"
    )]
    job_spec: Option<PathBuf>,

    /// Job spec URL, fetched through the CORS proxy
    #[arg(long, value_name = "URL")]
    job_url: Option<String>,

    /// gemini | claude | openai (default from config)
    #[arg(long)]
    provider: Option<ProviderKind>,

    /// Extra keywords to weave into the tailored CV
    #[arg(long, default_value = "")]
    keywords: String,

    /// precision | ruthless | ambitious (repeatable)
    #[arg(long = "style", value_name = "STYLE")]
    styles: Vec<TailorStyle>,

    /// short | middle | long
    #[arg(long = "cover-letter", value_name = "STYLE")]
    cover_letter: Option<CoverLetterStyle>,

    /// normal | reduced | minimal
    #[arg(long)]
    workload: Option<ApiWorkload>,

    /// API key (otherwise read from the provider's api_key_env)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Print the raw response JSON instead of Markdown
    #[arg(long)]
    json: bool,
}

pub enum CliAction {
    Generate { options: RunOptions, json: bool },
    FetchUrl(String),
    InspectConfig,
    PreloadDecoders,
}

impl Cli {
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        match self.command {
            Commands::Generate(args) => {
                let json = args.json;
                CliAction::Generate {
                    options: args.into_options(),
                    json,
                }
            }
            Commands::FetchUrl { url } => CliAction::FetchUrl(url),
            Commands::Config => CliAction::InspectConfig,
            Commands::Decoders => CliAction::PreloadDecoders,
        }
    }
}

impl GenerateArgs {
    fn into_options(self) -> RunOptions {
        let job_spec = match (self.job_spec, self.job_url) {
            (Some(path), _) => TextSource::File(path),
            (None, Some(url)) => TextSource::Url(url),
            // clap이 둘 중 하나를 강제한다.
            (None, None) => TextSource::Inline(String::new()),
        };

        let mut options = RunOptions::new(TextSource::File(self.cv), job_spec);
        options.provider = self.provider;
        options.keywords = self.keywords;
        options.styles = (!self.styles.is_empty()).then_some(self.styles);
        options.cover_letter_style = self.cover_letter;
        options.workload = self.workload;
        options.api_key = self.api_key;
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliAction, clap::Error> {
        Cli::try_parse_from(args).map(Cli::into_action)
    }

    #[test]
    fn generate_collects_styles_in_order() {
        let action = parse(&[
            "cvspruce",
            "generate",
            "--cv",
            "cv.pdf",
            "--job-url",
            "https://example.com/job",
            "--provider",
            "Claude",
            "--style",
            "ruthless",
            "--style",
            "precision",
            "--workload",
            "minimal",
            "--json",
        ])
        .unwrap();

        let CliAction::Generate { options, json } = action else {
            panic!("expected generate");
        };
        assert!(json);
        assert_eq!(options.cv, TextSource::File(PathBuf::from("cv.pdf")));
        assert_eq!(
            options.job_spec,
            TextSource::Url("https://example.com/job".to_string())
        );
        assert_eq!(options.provider, Some(ProviderKind::Claude));
        assert_eq!(
            options.styles,
            Some(vec![TailorStyle::Ruthless, TailorStyle::Precision])
        );
        assert_eq!(options.workload, Some(ApiWorkload::Minimal));
        assert_eq!(options.cover_letter_style, None);
    }

    #[test]
    fn omitted_styles_defer_to_config() {
        let action = parse(&["cvspruce", "generate", "--cv", "a.txt", "--job-spec", "b.txt"]).unwrap();
        let CliAction::Generate { options, json } = action else {
            panic!("expected generate");
        };
        assert!(!json);
        assert_eq!(options.styles, None);
        assert_eq!(options.job_spec, TextSource::File(PathBuf::from("b.txt")));
    }

    #[test]
    fn job_spec_sources_are_exclusive_and_required() {
        assert!(parse(&["cvspruce", "generate", "--cv", "a.txt"]).is_err());
        assert!(
            parse(&[
                "cvspruce",
                "generate",
                "--cv",
                "a.txt",
                "--job-spec",
                "b.txt",
                "--job-url",
                "https://example.com"
            ])
            .is_err()
        );
    }

    #[test]
    fn generate_help_lists_only_built_in_formats() {
        use clap::CommandFactory;

        let command = Cli::command();
        let generate = command.find_subcommand("generate").unwrap();
        let cv_help = generate
            .get_arguments()
            .find(|arg| arg.get_id() == "cv")
            .and_then(|arg| arg.get_help())
            .unwrap()
            .to_string();
        assert!(cv_help.starts_with("CV file (.txt, .md;"), "{cv_help}");
        assert!(cv_help.contains("need an embedded document decoder"), "{cv_help}");
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!(
            parse(&[
                "cvspruce",
                "generate",
                "--cv",
                "a.txt",
                "--job-spec",
                "b.txt",
                "--provider",
                "llama"
            ])
            .is_err()
        );
    }
}
