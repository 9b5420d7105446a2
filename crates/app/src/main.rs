use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use exam_core::model::{PaperId, ParseIdError, UserProfile};
use services::{
    AdminService, ApiClient, ApiConfig, AppServices, AuthService, Credentials, DownloadVariant,
    FileDownloader, FsDownloader, GeneratorService, PaperLibraryService, PaperService,
    ProfileService, ResultsService, SubscriptionService, TransactionsService,
};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingPaperId,
    InvalidPaperId(ParseIdError),
    MissingCredentials,
    EmptyValue { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingPaperId => write!(f, "download requires a paper id"),
            ArgsError::InvalidPaperId(err) => write!(f, "invalid paper id: {err}"),
            ArgsError::MissingCredentials => {
                write!(f, "provide --token, or --email and --password")
            }
            ArgsError::EmptyValue { flag } => write!(f, "{flag} must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyValue { flag });
    }
    Ok(value)
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui       [options]");
    eprintln!("  cargo run -p app -- download <paper-id> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --api-url <url>          backend base url (default http://localhost:8000)");
    eprintln!("  --token <token>          bearer token of a signed-in user");
    eprintln!("  --email <email>          sign in with email and password instead");
    eprintln!("  --password <password>");
    eprintln!("  --download-dir <dir>     where downloaded PDFs are stored (default downloads)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EXAM_API_URL, EXAM_API_TIMEOUT_SECS, EXAM_API_TOKEN,");
    eprintln!("  EXAM_EMAIL, EXAM_PASSWORD, EXAM_DOWNLOAD_DIR, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Ui,
    Download(PaperId),
}

enum Login {
    Token(String),
    Password { email: String, password: String },
}

struct Args {
    api: ApiConfig,
    login: Login,
    download_dir: PathBuf,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api = ApiConfig::from_env();
        let mut token = env_value("EXAM_API_TOKEN");
        let mut email = env_value("EXAM_EMAIL");
        let mut password = env_value("EXAM_PASSWORD");
        let mut download_dir = env_value("EXAM_DOWNLOAD_DIR")
            .map_or_else(|| PathBuf::from("downloads"), PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => api.base_url = require_value(args, "--api-url")?,
                "--token" => token = Some(require_value(args, "--token")?),
                "--email" => email = Some(require_value(args, "--email")?),
                "--password" => password = Some(require_value(args, "--password")?),
                "--download-dir" => {
                    download_dir = PathBuf::from(require_value(args, "--download-dir")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let login = match (token, email, password) {
            (Some(token), _, _) => Login::Token(token),
            (None, Some(email), Some(password)) => Login::Password { email, password },
            _ => return Err(ArgsError::MissingCredentials),
        };

        Ok(Self {
            api,
            login,
            download_dir,
        })
    }
}

fn parse_command(argv: &mut Vec<String>) -> Result<Command, ArgsError> {
    let Some(first) = argv.first().map(String::as_str) else {
        return Ok(Command::Ui);
    };
    if first.starts_with('-') {
        return Ok(Command::Ui);
    }
    match first {
        "ui" => {
            argv.remove(0);
            Ok(Command::Ui)
        }
        "download" => {
            argv.remove(0);
            if argv.first().is_none_or(|value| value.starts_with('-')) {
                return Err(ArgsError::MissingPaperId);
            }
            let paper_id = argv
                .remove(0)
                .parse::<PaperId>()
                .map_err(ArgsError::InvalidPaperId)?;
            Ok(Command::Download(paper_id))
        }
        other => Err(ArgsError::UnknownArg(other.to_string())),
    }
}

struct DesktopApp {
    user: UserProfile,
    services: AppServices,
    downloader: Arc<FsDownloader>,
}

impl UiApp for DesktopApp {
    fn user(&self) -> Option<UserProfile> {
        Some(self.user.clone())
    }

    fn papers(&self) -> Arc<dyn PaperService> {
        self.services.papers()
    }

    fn library(&self) -> Arc<PaperLibraryService> {
        self.services.library()
    }

    fn generator(&self) -> Arc<GeneratorService> {
        self.services.generator()
    }

    fn results(&self) -> Arc<ResultsService> {
        self.services.results()
    }

    fn subscriptions(&self) -> Arc<SubscriptionService> {
        self.services.subscriptions()
    }

    fn transactions(&self) -> Arc<TransactionsService> {
        self.services.transactions()
    }

    fn profile(&self) -> Arc<ProfileService> {
        self.services.profile()
    }

    fn admin(&self) -> Arc<AdminService> {
        self.services.admin()
    }

    fn downloader(&self) -> Arc<dyn FileDownloader> {
        self.downloader.clone()
    }
}

async fn sign_in(
    auth: &AuthService,
    login: Login,
) -> Result<(Credentials, UserProfile), Box<dyn std::error::Error>> {
    match login {
        Login::Token(token) => {
            let credentials = Credentials::bearer(token);
            let user = auth.me(&credentials).await?;
            Ok((credentials, user))
        }
        Login::Password { email, password } => {
            let session = auth.login(&email, &password).await?;
            Ok((session.credentials, session.user))
        }
    }
}

async fn download_both(
    services: &AppServices,
    downloader: &FsDownloader,
    paper_id: &PaperId,
) -> Result<(), Box<dyn std::error::Error>> {
    let library = services.library();
    let papers = library.list().await?;
    let title = papers
        .iter()
        .find(|paper| &paper.id == paper_id)
        .map(|paper| paper.title.clone())
        .ok_or_else(|| format!("no paper with id {paper_id}"))?;

    for variant in [DownloadVariant::Paper, DownloadVariant::AnswerKey] {
        let file = library
            .download(paper_id, &title, variant, downloader)
            .await?;
        println!("{} ({} bytes)", file.path.display(), file.bytes);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();
    if matches!(argv.first().map(String::as_str), Some("--help" | "-h")) {
        print_usage();
        return Ok(());
    }

    let parsed = parse_command(&mut argv).and_then(|cmd| {
        let mut iter = argv.into_iter();
        Args::parse(&mut iter).map(|args| (cmd, args))
    });
    let (cmd, args) = parsed.map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let api = ApiClient::new(&args.api)?;
    tracing::info!(base_url = %api.base_url(), "using exam api");
    let auth = AuthService::new(api.clone());
    let (credentials, user) = sign_in(&auth, args.login).await?;
    tracing::info!(email = %user.email, "signed in");

    let services = AppServices::from_client(api, credentials);
    let downloader = Arc::new(FsDownloader::new(args.download_dir));

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                user,
                services,
                downloader,
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Exam Prep")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Download(paper_id) => download_both(&services, &downloader, &paper_id).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
