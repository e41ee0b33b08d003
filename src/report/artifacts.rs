//! Downloadable artifacts: raw chart JSON and the readable summary

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::birth::BirthInput;
use crate::client::ChartResults;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to serialize chart results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Person name reduced to alphanumerics, `-` and `_`; `chart` when nothing is left
pub fn safe_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if cleaned.is_empty() {
        "chart".to_string()
    } else {
        cleaned
    }
}

/// `<safe-name>-DD-MM-YYYY`
pub fn file_stem(birth: &BirthInput) -> String {
    format!(
        "{}-{:02}-{:02}-{}",
        safe_name(&birth.name),
        birth.date,
        birth.month,
        birth.year
    )
}

/// Both downloads for one fetch, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub json_name: String,
    pub json: String,
    pub text_name: String,
    pub text: String,
}

impl Artifacts {
    pub fn build(birth: &BirthInput, results: &ChartResults) -> Result<Self, ArtifactError> {
        let stem = file_stem(birth);
        Ok(Self {
            json_name: format!("{}-ChartData.json", stem),
            json: results.to_pretty_json()?,
            text_name: format!("{}-ReadableSummary.txt", stem),
            text: super::generate(birth, results),
        })
    }

    /// Write both files into `dir`, creating it if needed
    pub fn write_to(&self, dir: &Path) -> Result<(PathBuf, PathBuf), ArtifactError> {
        fs::create_dir_all(dir).map_err(|source| ArtifactError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let json_path = dir.join(&self.json_name);
        let text_path = dir.join(&self.text_name);
        for (path, contents) in [(&json_path, &self.json), (&text_path, &self.text)] {
            fs::write(path, contents).map_err(|source| ArtifactError::Io {
                path: path.clone(),
                source,
            })?;
        }

        info!(json = %json_path.display(), text = %text_path.display(), "Artifacts written");
        Ok((json_path, text_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::birth::{Ayanamsha, ObservationPoint};
    use crate::client::ChartResult;
    use serde_json::json;
    use tempfile::TempDir;

    fn birth(name: &str) -> BirthInput {
        BirthInput {
            name: name.to_string(),
            year: 1987,
            month: 3,
            date: 9,
            hours: 4,
            minutes: 30,
            seconds: 0,
            latitude: 19.076,
            longitude: 72.8777,
            timezone: 5.5,
            observation_point: ObservationPoint::Topocentric,
            ayanamsha: Ayanamsha::Lahiri,
        }
    }

    #[test]
    fn test_safe_name_strips_everything_else() {
        assert_eq!(safe_name("Anu Priya"), "AnuPriya");
        assert_eq!(safe_name("o'brien_j-2"), "obrien_j-2");
        assert_eq!(safe_name("Zoë"), "Zoë");
        assert_eq!(safe_name("../.."), "chart");
        assert_eq!(safe_name(""), "chart");
    }

    #[test]
    fn test_names_use_day_month_year() {
        let artifacts = Artifacts::build(&birth("Anu Priya"), &ChartResults::new()).unwrap();
        assert_eq!(artifacts.json_name, "AnuPriya-09-03-1987-ChartData.json");
        assert_eq!(artifacts.text_name, "AnuPriya-09-03-1987-ReadableSummary.txt");
    }

    #[test]
    fn test_raw_json_keeps_non_ascii_unescaped() {
        let mut results = ChartResults::new();
        results.insert(
            "D1 (Rasi Chart)",
            ChartResult::Success(json!({"statusCode": 200, "output": {"note": "नमस्ते"}})),
        );

        let artifacts = Artifacts::build(&birth("A"), &results).unwrap();
        assert!(artifacts.json.contains("नमस्ते"));
        assert!(artifacts.json.contains("\n  \"D1 (Rasi Chart)\": {"));
    }

    #[test]
    fn test_write_to_creates_both_files() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("nested/out");

        let artifacts = Artifacts::build(&birth("Anu"), &ChartResults::new()).unwrap();
        let (json_path, text_path) = artifacts.write_to(&out).unwrap();

        assert_eq!(fs::read_to_string(json_path).unwrap(), "{}");
        assert!(fs::read_to_string(text_path).unwrap().contains("BIRTH JSON:"));
    }
}
