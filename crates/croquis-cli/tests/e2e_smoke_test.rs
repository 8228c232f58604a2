use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use croquis_cli::{Args, run};

/// Collects all .toml scene files from a directory
fn collect_scene_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo scenes live at the workspace root, not in the crate
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &Path, output: &Path, preview: bool) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        preview,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_scene_files(demos_dir());

    assert!(!demos.is_empty(), "No demo scenes found in demos/");

    let mut failed = Vec::new();

    for demo in &demos {
        let stem = demo.file_stem().unwrap().to_string_lossy().to_string();
        let output = temp_dir.path().join(format!("{stem}.svg"));

        match run(&args(demo, &output, false)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output).unwrap();
                assert!(svg.starts_with("<svg"), "{stem}: output is not SVG");
                assert!(svg.trim_end().ends_with("</svg>"), "{stem}: output is truncated");
            }
            Err(e) => failed.push((demo.clone(), e)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemo scenes that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo scene(s) failed unexpectedly", failed.len());
    }

    println!("✅ All {} demo scenes exported", demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_scene_files(demos_dir().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error scenes found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo in &error_demos {
        let output = temp_dir.path().join(format!(
            "error_{}.svg",
            demo.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args(demo, &output, false)).is_ok() {
            unexpectedly_succeeded.push(demo.clone());
        }
        assert!(!output.exists(), "No output is written for a failing scene");
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError scenes that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error scene(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_preview_contains_controls() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("preview.svg");

    run(&args(&demos_dir().join("intersection.toml"), &output, true)).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("croquis-preview"));
    assert!(svg.contains("rotate-control"));
    assert!(svg.contains("delete-control"));
}

#[test]
fn e2e_explicit_config_is_applied() {
    let temp_dir = tempdir().unwrap();
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[style]\nbackground_color = \"#101010\"\n").unwrap();
    let output = temp_dir.path().join("styled.svg");

    let mut args = args(&demos_dir().join("empty.toml"), &output, false);
    args.config = Some(config.to_string_lossy().to_string());
    run(&args).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("#101010"));
}
