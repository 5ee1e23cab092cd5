//! Builds the lesson catalog from built-in lessons and authored bank files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use practice_core::{parse, Catalog};

/// Built-in lessons plus every `<lesson-id>.md` file in `dir`.
///
/// Files that fail to parse are skipped with a warning so one bad bank does
/// not take the service down.
pub fn load_catalog(dir: Option<&Path>) -> Result<Catalog> {
    let mut catalog = Catalog::builtin();

    let Some(dir) = dir else {
        return Ok(catalog);
    };

    let mut paths: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read question bank directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();

    for path in paths {
        let Some(lesson_id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Could not read {}: {}", path.display(), e);
                continue;
            }
        };

        match parse(&content) {
            Ok(bank) => {
                let questions: Vec<_> = bank
                    .questions
                    .into_iter()
                    .map(|q| q.into_question(&lesson_id))
                    .collect();
                tracing::info!(
                    "Loaded {} authored questions for lesson {}",
                    questions.len(),
                    lesson_id
                );
                catalog.add_authored(&lesson_id, bank.title, questions);
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
            }
        }
    }

    Ok(catalog)
}
