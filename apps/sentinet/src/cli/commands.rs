//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, AppState};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::records::{load_records, sample_records};
use sentinet_core::{LexiconScorer, NetworkEngine, NetworkSelection, TextRecord};
use std::path::{Path, PathBuf};

// =============================================================================
// LOADING
// =============================================================================

/// Configuration, engine and sampled records, ready to compute.
pub struct Workspace {
    pub config: AppConfig,
    pub engine: NetworkEngine,
    pub records: Vec<TextRecord>,
}

impl Workspace {
    /// Load the configuration, build the engine and read the records.
    ///
    /// `records` overrides the record path of the configuration.
    pub fn load(config_path: &Path, records: Option<&Path>) -> Result<Self, AppError> {
        let config = AppConfig::load(config_path)?;
        let engine = config.engine()?;

        let path = records
            .map(Path::to_path_buf)
            .or_else(|| config.records.path.clone())
            .ok_or_else(|| {
                AppError::Config(
                    "no record source: pass --records or set records.path".to_string(),
                )
            })?;

        let scorer = LexiconScorer::from_keywords(engine.keywords());
        let loaded = load_records(&path, &scorer)?;
        let total = loaded.len();
        let records = sample_records(
            loaded,
            config.records.sample_fraction,
            config.records.sample_seed,
        );
        tracing::info!(total, sampled = records.len(), "record set ready");

        Ok(Self {
            config,
            engine,
            records,
        })
    }
}

/// Validate output path for writing.
///
/// The parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, AppError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        AppError::Io(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    let filename = path
        .file_name()
        .ok_or_else(|| AppError::Io("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(
    config_path: &Path,
    records: Option<&Path>,
    host: &str,
    port: u16,
) -> Result<(), AppError> {
    let workspace = Workspace::load(config_path, records)?;

    println!("Sentinet Network Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Config:   {}", config_path.display());
    println!("  Records:  {}", workspace.records.len());
    println!();
    println!("Endpoints:");
    println!("  GET  /health  - Health check");
    println!("  GET  /config  - Keyword lists and layout settings");
    println!("  POST /network - Compute a network render payload");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    let state = AppState::new(workspace.engine, workspace.records);
    api::run_server(&addr, state).await
}

// =============================================================================
// BUILD COMMAND
// =============================================================================

/// Compute one network and emit its render payload as JSON.
pub fn cmd_build(
    config_path: &Path,
    records: Option<&Path>,
    selection: &NetworkSelection,
    output: Option<&Path>,
) -> Result<(), AppError> {
    let workspace = Workspace::load(config_path, records)?;
    let payload = workspace.engine.render(&workspace.records, selection)?;

    if payload.empty {
        tracing::warn!(?selection, "no records match the selection, payload is empty");
    }
    if !payload.converged {
        tracing::info!("layout stopped at the iteration budget before converging");
    }

    let json = serde_json::to_string_pretty(&payload)
        .map_err(|e| AppError::Io(format!("Cannot encode payload: {}", e)))?;

    match output {
        Some(path) => {
            let path = validate_output_path(path)?;
            std::fs::write(&path, json)
                .map_err(|e| AppError::Io(format!("Cannot write '{}': {}", path.display(), e)))?;
            println!(
                "Wrote {} nodes and {} edges to {}",
                payload.nodes.len(),
                payload.edges.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

// =============================================================================
// CHECK-CONFIG COMMAND
// =============================================================================

/// Validate the configuration and record source and print a summary.
pub fn cmd_check_config(config_path: &Path, records: Option<&Path>) -> Result<(), AppError> {
    let workspace = Workspace::load(config_path, records)?;
    let keywords = workspace.engine.keywords();
    let layout = workspace.engine.layout_config();

    println!("Sentinet Configuration");
    println!("======================");
    println!("Config:   {}", config_path.display());
    println!();
    println!("Energy:   {}", keywords.energy().as_slice().join(", "));
    println!("Positive: {}", keywords.positive().as_slice().join(", "));
    println!("Negative: {}", keywords.negative().as_slice().join(", "));
    println!();
    println!(
        "Layout:   k={} seed={} iterations={} threshold={} scale={}",
        layout.k, layout.seed, layout.iterations, layout.threshold, layout.scale
    );
    println!(
        "Records:  {} (sample fraction {}, seed {})",
        workspace.records.len(),
        workspace.config.records.sample_fraction,
        workspace.config.records.sample_seed
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(contents.as_bytes()).expect("write");
        path
    }

    #[test]
    fn workspace_requires_record_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = Workspace::load(&dir.path().join("absent.toml"), None);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn workspace_samples_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let records: Vec<String> = (0..10)
            .map(|i| format!(r#"{{"text": "solar {}", "category": "UK"}}"#, i))
            .collect();
        let records_path = write_file(dir.path(), "records.json", &format!("[{}]", records.join(",")));
        let config_path = write_file(
            dir.path(),
            "sentinet.toml",
            "[records]\npath = \"records.json\"\nsample_fraction = 0.5\n",
        );

        let workspace = Workspace::load(&config_path, None).expect("load");
        assert_eq!(workspace.records.len(), 5);

        let overridden = Workspace::load(&dir.path().join("absent.toml"), Some(records_path.as_path()))
            .expect("load");
        assert_eq!(overridden.records.len(), 2);
    }

    #[test]
    fn build_writes_payload_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let records_path = write_file(
            dir.path(),
            "records.json",
            r#"[{"text": "wind growth", "category": "UK", "sentiment": 0.5}]"#,
        );
        let config_path = write_file(dir.path(), "sentinet.toml", "[records]\nsample_fraction = 1.0\n");
        let output = dir.path().join("payload.json");

        cmd_build(
            &config_path,
            Some(records_path.as_path()),
            &NetworkSelection::all(),
            Some(output.as_path()),
        )
        .expect("build");

        let written = std::fs::read_to_string(&output).expect("read");
        let payload: serde_json::Value = serde_json::from_str(&written).expect("json");
        assert_eq!(payload["nodes"].as_array().map(Vec::len), Some(3));
        assert_eq!(payload["empty"], false);
    }

    #[test]
    fn output_path_needs_existing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = validate_output_path(&dir.path().join("missing").join("out.json"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
