use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use session_client::{ApiClient, ApiOutcome, ApiRequest, ClientConfig, ClientError, FileStore, SocialProvider};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
    #[error("invalid JSON in --data: {0}")]
    InvalidData(#[from] serde_json::Error),
    #[error("failed to read upload file: {0}")]
    ReadFile(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "session-client", about = "Authenticated API client with a persisted session token")]
struct Cli {
    #[arg(long, env = "SESSION_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "SESSION_STORE_PATH", help = "Session storage file")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store the token returned by a successful login.
    Login {
        #[arg(long)]
        token: String,
    },
    /// Clear the stored token.
    Logout,
    /// Show login state and the navigation links it implies.
    Status,
    /// Send one authenticated request to the API.
    Call {
        endpoint: String,
        #[arg(long, default_value = "GET")]
        method: String,
        #[arg(long, conflicts_with = "file", help = "JSON request body")]
        data: Option<String>,
        #[arg(long, help = "Upload this file as multipart form data")]
        file: Option<PathBuf>,
        #[arg(long, default_value = "file", help = "Form field name for --file")]
        field: String,
    },
    /// Print the social login redirect for a provider.
    Social { provider: SocialProvider },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    let store = FileStore::new(config.store_path.clone());
    let client = ApiClient::new(config, store)?;

    match cli.command {
        Command::Login { token } => {
            client.login(&token)?;
            tracing::info!(store = %client.store().path().display(), "logged in");
            println!("logged in");
        }
        Command::Logout => {
            let redirect = client.logout()?;
            tracing::info!("logged out");
            println!("{redirect}");
        }
        Command::Status => run_status(&client)?,
        Command::Call { endpoint, method, data, file, field } => {
            let request = build_request(endpoint, &method, data, file, field)?;
            run_call(&client, request).await?;
        }
        Command::Social { provider } => {
            println!("{}", provider.login_redirect(client.config()));
        }
    }
    Ok(())
}

fn run_status(client: &ApiClient<FileStore>) -> Result<(), CliError> {
    let state = if client.is_logged_in()? { "logged in" } else { "logged out" };
    println!("{state}");
    for link in client.nav_links()? {
        match link.href {
            Some(href) => println!("  {} -> {href}", link.label),
            None => println!("  [{}]", link.label),
        }
    }
    Ok(())
}

fn build_request(
    endpoint: String,
    method: &str,
    data: Option<String>,
    file: Option<PathBuf>,
    field: String,
) -> Result<ApiRequest, CliError> {
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| CliError::InvalidMethod(method.to_owned()))?;
    let request = ApiRequest::new(endpoint).method(method);

    if let Some(path) = file {
        let bytes = std::fs::read(&path)?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
        let form = Form::new().part(field, Part::bytes(bytes).file_name(file_name));
        return Ok(request.multipart(form));
    }

    match data {
        Some(raw) => Ok(request.json(serde_json::from_str(&raw)?)),
        None => Ok(request),
    }
}

async fn run_call(client: &ApiClient<FileStore>, request: ApiRequest) -> Result<(), CliError> {
    match client.call(request).await? {
        ApiOutcome::Response(response) => {
            let status = response.status();
            let body = response.text().await.map_err(ClientError::from)?;
            println!("HTTP {}", status.as_u16());
            if !body.is_empty() {
                println!("{body}");
            }
        }
        ApiOutcome::LoggedOut(redirect) => {
            eprintln!("session expired");
            println!("{redirect}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use session_client::Encoding;

    use super::*;

    #[test]
    fn build_request_parses_method_and_json() {
        let req = build_request("/history".into(), "post", Some(r#"{"a":1}"#.into()), None, "file".into()).unwrap();
        assert_eq!(req.method, Method::POST);
        assert!(matches!(req.encoding, Encoding::Json(Some(_))));
    }

    #[test]
    fn build_request_rejects_bad_method() {
        let err = build_request("/x".into(), "NOT A METHOD", None, None, "file".into()).unwrap_err();
        assert!(matches!(err, CliError::InvalidMethod(_)));
    }

    #[test]
    fn build_request_rejects_bad_json() {
        let err = build_request("/x".into(), "POST", Some("{nope".into()), None, "file".into()).unwrap_err();
        assert!(matches!(err, CliError::InvalidData(_)));
    }

    #[test]
    fn build_request_file_uses_file_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        std::fs::write(&path, "a,b\n").unwrap();

        let req = build_request("/upload".into(), "POST", None, Some(path), "file".into()).unwrap();
        assert!(req.is_file_mode());
    }

    #[test]
    fn cli_parses_social_provider() {
        let cli = Cli::try_parse_from(["session-client", "social", "google"]).unwrap();
        assert!(matches!(cli.command, Command::Social { provider: SocialProvider::Google }));
    }
}
