//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::decode::{DecodedRecord, StructuredDecoder};
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClient;
use crate::shape::load_shape;
use crate::types::ContentFormat;
use std::fs;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let output = self.execute().await?;
        println!("{output}");
        Ok(())
    }

    /// Run the CLI command and return what it would print
    pub async fn execute(&self) -> Result<String> {
        match &self.cli.command {
            Commands::Decode {
                input,
                url,
                format,
                shape,
                pretty,
            } => {
                let format = format.map(ContentFormat::from);
                let record = match (input, url) {
                    (Some(path), _) => decode_file(path, format, shape)?,
                    (None, Some(url)) => decode_url(url, format, shape).await?,
                    (None, None) => {
                        return Err(Error::config("either --input or --url is required"))
                    }
                };
                render_record(&record, *pretty)
            }
            Commands::Shape { shape } => {
                let shape = load_shape(shape)?;
                serde_yaml::to_string(&shape.to_definition()).map_err(Error::from)
            }
        }
    }
}

fn decode_file(path: &Path, format: Option<ContentFormat>, shape: &str) -> Result<DecodedRecord> {
    let shape = load_shape(shape)?;
    let raw = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    let format = format
        .or_else(|| ContentFormat::from_path(path))
        .or_else(|| ContentFormat::sniff(&raw))
        .ok_or_else(|| {
            Error::config(format!(
                "Cannot tell whether '{}' is XML or JSON; pass --format",
                path.display()
            ))
        })?;

    info!("Decoding {} as {} with shape {}", path.display(), format, shape.name());
    StructuredDecoder::new()
        .decode(&raw, format, &shape)
        .with_context(|| format!("Failed to decode {}", path.display()))
}

async fn decode_url(url: &str, format: Option<ContentFormat>, shape: &str) -> Result<DecodedRecord> {
    let shape = load_shape(shape)?;
    let client = HttpClient::new()?;

    info!("Fetching {} with shape {}", url, shape.name());
    client.get_decoded(url, &shape, format).await
}

fn render_record(record: &DecodedRecord, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(record)
    } else {
        serde_json::to_string(record)
    };
    rendered.map_err(|e| Error::Other(format!("Failed to render record: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runner(args: &[&str]) -> Runner {
        let mut full = vec!["bodymap"];
        full.extend_from_slice(args);
        Runner::new(Cli::try_parse_from(full).unwrap())
    }

    fn body_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_decode_xml_file() {
        let file = body_file(
            ".xml",
            "<CAT><name>Izzy</name><breed>Siamese</breed><age>6</age>\
             <children><child><name>A</name></child></children></CAT>",
        );
        let path = file.path().to_string_lossy().to_string();

        let output = runner(&["decode", "--input", &path]).execute().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value,
            json!({"name": "Izzy", "breed": "Siamese", "age": 6, "children": [{"name": "A"}]})
        );
    }

    #[tokio::test]
    async fn test_decode_sniffs_format_without_extension() {
        let file = body_file(
            ".txt",
            r#"{"name": "Izzy", "breed": "Siamese", "age": 6, "children": []}"#,
        );
        let path = file.path().to_string_lossy().to_string();

        let output = runner(&["decode", "--input", &path, "--pretty"])
            .execute()
            .await
            .unwrap();
        assert!(output.contains('\n'));
        assert!(output.contains("\"breed\": \"Siamese\""));
    }

    #[tokio::test]
    async fn test_decode_reports_missing_field_with_context() {
        let file = body_file(".json", r#"{"name": "Izzy", "breed": "Siamese"}"#);
        let path = file.path().to_string_lossy().to_string();

        let err = runner(&["decode", "--input", &path]).execute().await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to decode"));
        assert!(message.contains("Missing required field: age"));
    }

    #[tokio::test]
    async fn test_decode_missing_input_file() {
        let err = runner(&["decode", "--input", "/nonexistent/cat.xml"])
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_decode_url() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cat"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"name": "Izzy", "breed": "Siamese", "age": 6, "children": []}"#,
                "application/json",
            ))
            .mount(&mock_server)
            .await;

        let url = format!("{}/cat", mock_server.uri());
        let output = runner(&["decode", "--url", &url]).execute().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["age"], 6);
    }

    #[tokio::test]
    async fn test_shape_command_prints_yaml() {
        let output = runner(&["shape"]).execute().await.unwrap();
        assert!(output.contains("name: Pet"));
        assert!(output.contains("type: record"));
    }
}
