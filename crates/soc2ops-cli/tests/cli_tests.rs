//! Tests for the soc2ops CLI

use clap::Parser;
use mockito::{Matcher, Server};
use soc2ops_cli::commands::{Cli, CommandExecutor, CommandResult, Commands, OutputFormat};
use soc2ops_cli::interactive::Prompt;
use std::io::{self, BufReader, Cursor, Read};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Reader that counts how often it is read from
struct CountingReader {
    inner: Cursor<Vec<u8>>,
    reads: Arc<AtomicUsize>,
}

impl Read for CountingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(buf)
    }
}

fn generate_command(dir: PathBuf, seed: Option<u64>) -> Commands {
    Commands::GenerateEvidence {
        output_dir: Some(dir),
        employees: Some(4),
        access_days: Some(10),
        audit_days: Some(10),
        incidents: Some(3),
        risks: Some(2),
        seed,
        config: None,
        format: OutputFormat::Json,
    }
}

#[test]
fn test_cli_parsing_seed_issues_defaults() {
    let cli = Cli::try_parse_from(["soc2ops", "seed-issues"]).unwrap();

    match cli.command {
        Commands::SeedIssues { repo, token_env, api_url, catalog, timeout, format } => {
            assert_eq!(repo, None);
            assert_eq!(token_env, "GITHUB_TOKEN");
            assert_eq!(api_url, "https://api.github.com");
            assert_eq!(catalog, None);
            assert_eq!(timeout, 30);
            assert_eq!(format, OutputFormat::Text);
        }
        _ => panic!("Expected SeedIssues command"),
    }
}

#[test]
fn test_cli_parsing_seed_issues_with_repo() {
    let args = ["soc2ops", "seed-issues", "--repo", "saasx/soc2", "--catalog", "issues.json", "--format", "json-pretty"];
    let cli = Cli::try_parse_from(args).unwrap();

    match cli.command {
        Commands::SeedIssues { repo, catalog, format, .. } => {
            assert_eq!(repo, Some("saasx/soc2".to_string()));
            assert_eq!(catalog, Some(PathBuf::from("issues.json")));
            assert_eq!(format, OutputFormat::JsonPretty);
        }
        _ => panic!("Expected SeedIssues command"),
    }
}

#[test]
fn test_cli_parsing_generate_evidence() {
    let args = [
        "soc2ops", "generate-evidence",
        "--output-dir", "out",
        "--employees", "87",
        "--access-days", "30",
        "--incidents", "15",
        "--seed", "7",
    ];
    let cli = Cli::try_parse_from(args).unwrap();

    match cli.command {
        Commands::GenerateEvidence { output_dir, employees, access_days, audit_days, incidents, risks, seed, config, format } => {
            assert_eq!(output_dir, Some(PathBuf::from("out")));
            assert_eq!(employees, Some(87));
            assert_eq!(access_days, Some(30));
            assert_eq!(audit_days, None);
            assert_eq!(incidents, Some(15));
            assert_eq!(risks, None);
            assert_eq!(seed, Some(7));
            assert_eq!(config, None);
            assert_eq!(format, OutputFormat::Text);
        }
        _ => panic!("Expected GenerateEvidence command"),
    }
}

#[test]
fn test_cli_invalid_args() {
    assert!(Cli::try_parse_from(["soc2ops", "generate-evidence", "--employees", "many"]).is_err());
    assert!(Cli::try_parse_from(["soc2ops", "unknown"]).is_err());
}

#[test]
fn test_command_result_creation() {
    let result = CommandResult {
        success: false,
        message: "Created 0 issues".to_string(),
        data: None,
    };
    assert!(!result.success);
    assert!(result.data.is_none());
}

#[tokio::test]
async fn test_generate_evidence_writes_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let mut executor = CommandExecutor::new();

    let result = executor
        .execute(generate_command(dir.path().join("audit_evidence"), Some(3)))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.message, "Generated 4 evidence files");
    let data = result.data.unwrap();
    assert_eq!(data["employees"], 4);
    assert_eq!(data["seed"], 3);

    let files = std::fs::read_dir(dir.path().join("audit_evidence")).unwrap().count();
    assert_eq!(files, 4);
}

#[tokio::test]
async fn test_generate_evidence_config_file_with_override() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("generator.json");
    std::fs::write(&config_path, r#"{"employee_count": 2, "incident_count": 1, "risk_count": 1, "seed": 11}"#).unwrap();

    let mut executor = CommandExecutor::new();
    let result = executor
        .execute(Commands::GenerateEvidence {
            output_dir: Some(dir.path().join("out")),
            employees: None,
            access_days: Some(1),
            audit_days: Some(1),
            incidents: Some(5),
            risks: None,
            seed: None,
            config: Some(config_path),
            format: OutputFormat::Text,
        })
        .await
        .unwrap();

    let data = result.data.unwrap();
    assert_eq!(data["employees"], 2);
    assert_eq!(data["seed"], 11);
    let incidents = data["files"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["kind"] == "incident_reports")
        .unwrap();
    assert_eq!(incidents["records"], 5);
}

#[tokio::test]
async fn test_catalog_command() {
    let mut executor = CommandExecutor::new();
    let result = executor
        .execute(Commands::Catalog { catalog: None, format: OutputFormat::Text })
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.message, "Catalog contains 21 issues");
    assert_eq!(result.data.unwrap()["milestones"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_seed_issues_without_token_fails_before_prompt() {
    let reads = Arc::new(AtomicUsize::new(0));
    let input = CountingReader {
        inner: Cursor::new(b"saasx/soc2\n".to_vec()),
        reads: Arc::clone(&reads),
    };
    let mut executor = CommandExecutor::with_prompt(Prompt::new(BufReader::new(input), io::sink()));

    let result = executor
        .execute(Commands::SeedIssues {
            repo: None,
            token_env: "SOC2OPS_CLI_TEST_TOKEN_UNSET".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
            catalog: None,
            timeout: 1,
            format: OutputFormat::Text,
        })
        .await;

    let err = result.err().expect("missing token must fail");
    assert!(err.to_string().contains("SOC2OPS_CLI_TEST_TOKEN_UNSET not set"));
    assert_eq!(reads.load(Ordering::SeqCst), 0, "repository prompt was read");
}

#[tokio::test]
async fn test_seed_issues_prompts_for_repository() {
    std::env::set_var("SOC2OPS_CLI_TEST_TOKEN", "cli-token");

    let mut server = Server::new_async().await;
    server
        .mock("GET", "/repos/saasx/soc2")
        .match_header("authorization", "Bearer cli-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"name": "soc2", "owner": {"login": "saasx"}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/repos/saasx/soc2/milestones")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;
    server
        .mock("GET", "/repos/saasx/soc2/issues")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"number": 1, "title": "[GAP] Conduct SOC 2 Readiness Assessment"}]"#)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/repos/saasx/soc2/issues")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"number": 2, "title": "new"}"#)
        .expect(20)
        .create_async()
        .await;

    let mut executor = CommandExecutor::with_prompt(Prompt::new(Cursor::new("saasx/soc2\n"), io::sink()));
    let result = executor
        .execute(Commands::SeedIssues {
            repo: None,
            token_env: "SOC2OPS_CLI_TEST_TOKEN".to_string(),
            api_url: server.url(),
            catalog: None,
            timeout: 5,
            format: OutputFormat::Json,
        })
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.message, "Created 20 issues\nSkipped 1 existing issues");
    let data = result.data.unwrap();
    assert_eq!(data["unresolved_milestones"].as_array().unwrap().len(), 3);
    create.assert_async().await;
}
