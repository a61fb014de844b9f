/*!
 * Tests for file utility functions
 */

use std::path::Path;

use anyhow::Result;
use papervoice::file_utils::FileManager;

use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file =
        common::create_test_file(&temp_dir.path().to_path_buf(), "exists.tmp", "content")?;

    assert!(FileManager::file_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that dir_exists distinguishes directories from files
#[test]
fn test_dir_exists_withFileAndDir_shouldDistinguish() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file =
        common::create_test_file(&temp_dir.path().to_path_buf(), "a_file.tmp", "content")?;

    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that ensure_dir creates nested directories
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested)?;
    assert!(FileManager::dir_exists(&nested));

    // A second call on an existing directory is a no-op
    FileManager::ensure_dir(&nested)?;

    Ok(())
}

/// Test that generate_output_path swaps directory and extension
#[test]
fn test_generate_output_path_withPdfInput_shouldBuildMp3Path() {
    let input_file = Path::new("/tmp/input/paper.pdf");
    let output_dir = Path::new("/tmp/audios");

    let output_path = FileManager::generate_output_path(input_file, output_dir, "mp3");

    assert_eq!(output_path, Path::new("/tmp/audios/paper.mp3"));
}

/// Test that find_files matches the extension case-insensitively
#[test]
fn test_find_files_withMixedCaseExtensions_shouldMatchAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "one.pdf", "x")?;
    common::create_test_file(&dir, "two.PDF", "x")?;
    common::create_test_file(&dir, "other.txt", "x")?;

    let mut found = FileManager::find_files(temp_dir.path(), "pdf")?;
    found.sort();

    let names: Vec<String> = found
        .iter()
        .filter_map(|p| p.file_name().map(|f| f.to_string_lossy().to_string()))
        .collect();
    assert_eq!(names, vec!["one.pdf", "two.PDF"]);

    Ok(())
}

/// Test that find_files recurses into subdirectories
#[test]
fn test_find_files_withSubdirectories_shouldRecurse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let sub = temp_dir.path().join("sub");
    FileManager::ensure_dir(&sub)?;
    common::create_test_file(&sub, "nested.pdf", "x")?;

    let found = FileManager::find_files(temp_dir.path(), "pdf")?;
    assert_eq!(found.len(), 1);

    Ok(())
}

/// Test that file_size reports zero for unreadable paths
#[test]
fn test_file_size_withExistingAndMissingFile_shouldReportBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file =
        common::create_test_file(&temp_dir.path().to_path_buf(), "sized.tmp", "12345")?;

    assert_eq!(FileManager::file_size(&test_file), 5);
    assert_eq!(FileManager::file_size("missing.tmp"), 0);

    Ok(())
}
