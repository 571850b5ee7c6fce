use anyhow::Result;
use clap::{Arg, Command};
use std::error::Error as _;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};

use ncdav::{config::Config, DirectoryEntry, NextcloudClient, NextcloudError};

const MENU: &str = "Select Option:\n\t1: List Folder\n\t2: Get File\n\t3: Delete File\n\t4: Move File or Folder\n\t5: Copy File or Folder\n\t6: Upload File\n\t7: Create Folder\n\t8: Exit\n\nSelect: ";

/// Line-based prompts, on stdin outside of tests
struct Console {
    lines: Lines<Box<dyn AsyncBufRead + Unpin + Send>>,
    json: bool,
}

impl Console {
    fn new(input: Box<dyn AsyncBufRead + Unpin + Send>, json: bool) -> Self {
        Self { lines: input.lines(), json }
    }

    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(label.as_bytes()).await?;
        stdout.flush().await?;
        Ok(self.lines.next_line().await?.map(|line| line.trim().to_string()))
    }

    /// Prompts for a value that must not be empty or whitespace
    async fn required(&mut self, label: &str) -> Result<Option<String>> {
        Ok(self.prompt(label).await?.filter(|value| !value.is_empty()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,ncdav=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("ncdav")
        .about("Interactive console for a Nextcloud WebDAV account")
        .arg(
            Arg::new("url")
                .help("Server URL without trailing slash, e.g. https://nc.example.com")
                .long("url")
                .value_name("URL"),
        )
        .arg(
            Arg::new("username")
                .help("Nextcloud user name")
                .long("username")
                .short('u')
                .value_name("USER"),
        )
        .arg(
            Arg::new("json")
                .help("Print folder listings as JSON")
                .long("json")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let mut config = Config::from_env()?;
    if let Some(url) = matches.get_one::<String>("url") {
        config.server_url = Some(url.clone());
    }
    if let Some(username) = matches.get_one::<String>("username") {
        config.username = Some(username.clone());
    }

    let mut console = Console::new(
        Box::new(BufReader::new(tokio::io::stdin())),
        matches.get_flag("json"),
    );

    if config.server_url.is_none() {
        config.server_url = console.required("Enter URL (e.g.: https://nc.example.com): ").await?;
    }
    if config.username.is_none() {
        config.username = console.required("Enter Username: ").await?;
    }
    if config.app_password.is_none() {
        config.app_password = console.required("Enter App Password: ").await?;
    }

    let webdav_config = match config.webdav_config() {
        Ok(webdav_config) => webdav_config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let client = NextcloudClient::new(webdav_config)?;
    let outcome = run_menu(&client, &mut console).await;
    client.close();

    outcome
}

async fn run_menu(client: &NextcloudClient, console: &mut Console) -> Result<()> {
    loop {
        let Some(selection) = console.prompt(MENU).await? else {
            return Ok(());
        };

        let result = match selection.as_str() {
            "1" => list_folder(client, console).await,
            "2" => get_file(client, console).await,
            "3" => delete_element(client, console).await,
            "4" => transfer(client, console, false).await,
            "5" => transfer(client, console, true).await,
            "6" => upload_file(client, console).await,
            "7" => create_folder(client, console).await,
            "8" => return Ok(()),
            _ => {
                println!("Unknown Option.");
                continue;
            }
        };

        match result {
            Ok(Some(done)) => println!("{}", done),
            Ok(None) => println!("Paths not provided."),
            // Client failures are reported and the menu continues; console I/O failures end it
            Err(e) => match e.downcast_ref::<NextcloudError>() {
                Some(error) => report(error),
                None => return Err(e),
            },
        }
    }
}

/// Operations return `Ok(None)` when a required path was left empty
type Step = Result<Option<String>>;

async fn list_folder(client: &NextcloudClient, console: &mut Console) -> Step {
    let path = console
        .prompt("\n------ List Folder ------\nEnter Remote Path: ")
        .await?
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| "/".to_string());

    let entries = client.list_directory(&path).await?;
    if console.json {
        let rendered = serde_json::to_string_pretty(&entries)
            .unwrap_or_else(|e| format!("Failed to render listing: {}", e));
        return Ok(Some(rendered));
    }

    let mut out = String::from("Contents:");
    for entry in &entries {
        out.push('\n');
        out.push_str(&describe(entry));
    }
    Ok(Some(out))
}

fn describe(entry: &DirectoryEntry) -> String {
    let mut text = format!(
        "{}:\n\tSize: {}\n\tEtag: {}\n\tPath: {}\n\tLast Modified: {}",
        entry.name,
        entry.size,
        entry.etag.as_deref().unwrap_or(""),
        entry.path().unwrap_or_default(),
        entry.last_modified
    );

    if entry.is_folder() {
        text.push_str(&format!(
            "\n\tType: Folder\n\tContained Folders: {}\n\tContained Files: {}",
            entry.contained_folder_count, entry.contained_file_count
        ));
    } else {
        text.push_str(&format!("\n\tType: File\n\tMime Type: {}", entry.mime_type));
    }
    text
}

async fn get_file(client: &NextcloudClient, console: &mut Console) -> Step {
    let remote = console.required("\n------ Get File ------\nEnter Remote Path: ").await?;
    let local = console.required("\nEnter Local Path: ").await?;
    let (Some(remote), Some(local)) = (remote, local) else {
        return Ok(None);
    };

    client.download(&remote, &local).await?;
    Ok(Some(format!("Saved {} to {}", remote, local)))
}

async fn delete_element(client: &NextcloudClient, console: &mut Console) -> Step {
    let Some(path) = console
        .required("\n------ Delete Folder/File ------\nEnter Path: ")
        .await?
    else {
        return Ok(None);
    };

    client.delete(&path).await?;
    Ok(Some(format!("Deleted {}", path)))
}

async fn create_folder(client: &NextcloudClient, console: &mut Console) -> Step {
    let Some(path) = console
        .required("\n------ Create Folder ------\nEnter Path: ")
        .await?
    else {
        return Ok(None);
    };

    client.create_folder(&path).await?;
    Ok(Some(format!("Created {}", path)))
}

async fn transfer(client: &NextcloudClient, console: &mut Console, copy: bool) -> Step {
    let title = if copy { "Copy" } else { "Move" };
    let source = console
        .required(&format!("\n------ {} Folder/File ------\nEnter Source Path: ", title))
        .await?;
    let destination = console.required("\nEnter Target Path: ").await?;
    let (Some(source), Some(destination)) = (source, destination) else {
        return Ok(None);
    };

    if copy {
        client.copy_item(&source, &destination, false).await?;
    } else {
        client.move_item(&source, &destination, false).await?;
    }
    Ok(Some(format!("{} {} -> {} done", title, source, destination)))
}

async fn upload_file(client: &NextcloudClient, console: &mut Console) -> Step {
    let local = console.required("\n------ Upload File ------\nEnter Local Path: ").await?;
    let remote = console.required("\nEnter Remote Path: ").await?;
    let (Some(local), Some(remote)) = (local, remote) else {
        return Ok(None);
    };

    client.upload(&local, &remote).await?;
    Ok(Some(format!("Uploaded {} to {}", local, remote)))
}

fn report(error: &NextcloudError) {
    println!("Error: {}", error);
    println!("\tReason: {}", error.reason());

    let mut cause = error.source();
    while let Some(inner) = cause {
        println!("\tCaused by: {}", inner);
        cause = inner.source();
    }
}
