use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "storegate")]
#[command(about = "Uniform put/get/upload/download over S3, a remote file service, and local disk")]
pub struct Cli {
    /// Backend host identity ("Amazon", "Render", anything else is local).
    /// Defaults to the host resolved from the running environment.
    #[arg(long, global = true)]
    pub host: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a value under a key
    Put {
        name: String,
        data: String,
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the value stored under a key
    Get {
        name: String,
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Copy a local file to the backend
    Upload { local_path: String, name: String },
    /// Fetch a backend object into a local file
    Download { name: String, local_path: String },
    /// Check whether a key exists
    Exists { name: String },
    /// Print the resolved host identity
    Host,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_put_with_format() {
        let cli = Cli::parse_from([
            "storegate", "put", "report.json", "{}", "--format", "json", "--host", "Render",
        ]);
        assert_eq!(cli.host.as_deref(), Some("Render"));
        match cli.command {
            Command::Put { name, data, format } => {
                assert_eq!(name, "report.json");
                assert_eq!(data, "{}");
                assert_eq!(format, "json");
            }
            other => panic!("expected put, got {other:?}"),
        }
    }

    #[test]
    fn test_format_defaults_to_text() {
        let cli = Cli::parse_from(["storegate", "get", "notes.txt"]);
        match cli.command {
            Command::Get { format, .. } => assert_eq!(format, "text"),
            other => panic!("expected get, got {other:?}"),
        }
        assert_eq!(cli.host, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_upload_arguments_in_order() {
        let cli = Cli::parse_from(["storegate", "upload", "./report.pdf", "reports/today.pdf"]);
        match cli.command {
            Command::Upload { local_path, name } => {
                assert_eq!(local_path, "./report.pdf");
                assert_eq!(name, "reports/today.pdf");
            }
            other => panic!("expected upload, got {other:?}"),
        }
    }
}
