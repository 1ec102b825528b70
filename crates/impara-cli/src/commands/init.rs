//! The `impara init` command.

use std::path::Path;

use anyhow::{Context, Result};

const SAMPLE_FILES: [(&str, &str); 5] = [
    ("data/themes.json", include_str!("../../../../data/themes.json")),
    ("data/verbs.json", include_str!("../../../../data/verbs.json")),
    ("data/nouns.json", include_str!("../../../../data/nouns.json")),
    (
        "data/adjectives.json",
        include_str!("../../../../data/adjectives.json"),
    ),
    (
        "data/viaggio.jsonl",
        include_str!("../../../../data/viaggio.jsonl"),
    ),
];

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("impara.toml"), SAMPLE_CONFIG)?;
    for (path, content) in SAMPLE_FILES {
        write_if_missing(Path::new(path), content)?;
    }

    println!("\nNext steps:");
    println!("  1. Add your own verbs to data/verbs.json (or a .jsonl file listed in data/themes.json)");
    println!("  2. Run: impara validate --data data");
    println!("  3. Run: impara practice");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# impara configuration

# Directory holding themes.json and the datasets it lists.
data_dir = "data"

# Where answers are recorded. ${VAR} references are expanded.
progress_path = "progress.json"

# Items per drill batch.
batch_size = 10

# Correct answers needed in each direction (it→en, en→it) to pass the lexical gate.
lexical_gate = 3

# Refuse to start conjugation until every warm-up verb passed the gate.
enforce_lexical_gate = false

clear_screen = true
"#;
