use std::fs;
use std::path::PathBuf;
use storep::data::{ModTimeValue, SizeValue};
use storep::utils::{
    build_exclude_matcher, classify_file, expand_exclude_patterns, format_mod_time_value,
    format_size_value, human_readable_size, path_depth,
};
use tempfile::TempDir;

#[test]
fn test_human_readable_size_unit_boundaries() {
    // Values below 1024 stay in bytes; 1024 rolls into the next unit
    assert_eq!(human_readable_size(0), "0 b");
    assert_eq!(human_readable_size(1023), "1023 b");
    assert_eq!(human_readable_size(1024), "1 KB");
    assert_eq!(human_readable_size(1536), "1.5 KB");
    assert_eq!(human_readable_size(1024 * 1024), "1 MB");
    assert_eq!(human_readable_size(1024 * 1024 * 1024), "1 GB");
}

#[test]
fn test_human_readable_size_below_threshold_stays_in_lower_unit() {
    // One byte below a megabyte is still kilobytes
    assert_eq!(human_readable_size(1024 * 1024 - 1), "1023.999 KB");
}

#[test]
fn test_human_readable_size_caps_at_petabytes() {
    let pb = 1024u64.pow(5);
    assert_eq!(human_readable_size(pb), "1 PB");
    // No unit beyond PB, however large the value
    assert_eq!(human_readable_size(pb * 1024), "1024 PB");
}

#[test]
fn test_format_size_value_sentinels_are_literal_tags() {
    assert_eq!(format_size_value(&SizeValue::Resolved(2048)), "2 KB");
    assert_eq!(format_size_value(&SizeValue::Symlink), "SYMLINK");
    assert_eq!(format_size_value(&SizeValue::Missing), "MISSING");
}

#[test]
fn test_format_mod_time_value_sentinels_are_literal_tags() {
    assert_eq!(format_mod_time_value(&ModTimeValue::Symlink), "SYMLINK");
    assert_eq!(format_mod_time_value(&ModTimeValue::Missing), "MISSING");
}

#[test]
fn test_classify_file_resolves_size_and_mod_time() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("data.bin");
    fs::write(&file_path, vec![0u8; 256]).expect("Failed to write data.bin");

    let (size, mod_time) = classify_file(&file_path);
    assert_eq!(size, SizeValue::Resolved(256));
    assert!(matches!(mod_time, ModTimeValue::Resolved(_)));
}

#[test]
fn test_classify_file_missing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let gone = temp_dir.path().join("gone.bin");

    let (size, mod_time) = classify_file(&gone);
    assert_eq!(size, SizeValue::Missing);
    assert_eq!(mod_time, ModTimeValue::Missing);
}

#[cfg(unix)]
#[test]
fn test_classify_file_symlink() {
    use std::os::unix::fs::symlink;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let target = temp_dir.path().join("target.bin");
    let link = temp_dir.path().join("link.bin");
    fs::write(&target, vec![0u8; 64]).expect("Failed to write target.bin");
    symlink(&target, &link).expect("Failed to create symlink");

    let (size, mod_time) = classify_file(&link);
    assert_eq!(size, SizeValue::Symlink);
    assert_eq!(mod_time, ModTimeValue::Symlink);
}

#[cfg(unix)]
#[test]
fn test_classify_file_broken_symlink_reports_missing() {
    use std::os::unix::fs::symlink;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let link = temp_dir.path().join("dangling.bin");
    symlink(temp_dir.path().join("nowhere.bin"), &link).expect("Failed to create symlink");

    // A broken link no longer resolves to a regular file
    let (size, _) = classify_file(&link);
    assert_eq!(size, SizeValue::Missing);
}

#[test]
fn test_path_depth() {
    let root = PathBuf::from("/home/user");
    let path1 = PathBuf::from("/home/user/documents");
    let path2 = PathBuf::from("/home/user/documents/work/project");

    assert_eq!(path_depth(&root, &path1), 1);
    assert_eq!(path_depth(&root, &path2), 3);
    assert_eq!(path_depth(&root, &root), 0);
}

#[test]
fn test_expand_exclude_patterns() {
    let patterns = vec![
        "node_modules".to_string(),
        "*.log".to_string(),
        "temp/".to_string(),
    ];

    let expanded = expand_exclude_patterns(&patterns);

    // Should expand "node_modules" to multiple patterns
    assert!(expanded.contains(&"**/node_modules".to_string()));
    assert!(expanded.contains(&"**/node_modules/**".to_string()));

    // Should keep "*.log" as-is (contains glob)
    assert!(expanded.contains(&"*.log".to_string()));

    // Should keep "temp/" as-is (ends with slash)
    assert!(expanded.contains(&"temp/".to_string()));
}

#[test]
fn test_build_exclude_matcher() {
    let patterns = vec!["*.log".to_string(), "**/node_modules/**".to_string()];

    let matcher = build_exclude_matcher(&patterns);
    assert!(matcher.is_ok());

    let matcher = matcher.unwrap();
    assert!(matcher.is_match("debug.log"));
    assert!(matcher.is_match("project/node_modules/package.json"));
    assert!(!matcher.is_match("src/main.rs"));
}

#[test]
fn test_build_exclude_matcher_invalid_pattern() {
    let patterns = vec![
        "[invalid".to_string(), // Invalid glob pattern
    ];

    let matcher = build_exclude_matcher(&patterns);
    assert!(matcher.is_err());
}
