use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::ChartConfig;

/// Why a chart file could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid chart file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a chart configuration from JSON text.
pub fn parse_chart(json: &str) -> Result<ChartConfig, LoadError> {
    Ok(serde_json::from_str::<ChartConfig>(json)?.normalized())
}

/// Load a chart configuration from a JSON file.
pub fn load_chart(path: &Path) -> Result<ChartConfig, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_chart(&json)?;
    tracing::info!(
        path = %path.display(),
        tasks = config.tasks.len(),
        relationships = config.relationships.len(),
        "loaded chart"
    );
    Ok(config)
}

/// `chart.json` in the OS config directory, when one can be determined.
pub fn default_chart_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "GanttCanvas")
        .map(|dirs| dirs.config_dir().join("chart.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RelationshipKind, ViewMode};

    #[test]
    fn parses_a_full_chart() {
        let json = r#"{
            "view_mode": "week",
            "row_height": 32,
            "tasks": [
                { "id": "A", "name": "Design", "start": "2024-01-01", "end": "2024-01-10" },
                { "id": "B", "name": "Build", "start": "2024-01-11", "end": "2024-02-01", "progress": 20 }
            ],
            "relationships": [
                { "id": "r1", "source": "A", "target": "B", "kind": "finish_to_start", "lag": 1 }
            ]
        }"#;
        let config = parse_chart(json).unwrap();
        assert_eq!(config.view_mode, ViewMode::Week);
        assert_eq!(config.row_height, 32.0);
        assert_eq!(config.tasks.len(), 2);
        assert_eq!(config.relationships[0].kind, RelationshipKind::FinishToStart);
    }

    #[test]
    fn reports_missing_files_and_bad_json() {
        let missing = load_chart(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(missing, LoadError::Io { .. }));
        assert!(missing.to_string().contains("here.json"));

        let bad = parse_chart("{ \"tasks\": 3 }").unwrap_err();
        assert!(matches!(bad, LoadError::Parse(_)));
    }
}
