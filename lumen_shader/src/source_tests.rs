use super::*;
use crate::error::Error;
use std::fs;

/// Fresh scratch directory under the system temp dir
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lumen_source_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// ShaderSources
// ============================================================================

#[test]
fn test_sources_keep_first_insertion_order() {
    let mut sources = ShaderSources::new();
    sources.insert(StageKind::Fragment, "f");
    sources.insert(StageKind::Vertex, "v");
    sources.insert(StageKind::Geometry, "g");

    assert_eq!(
        sources.stage_kinds(),
        vec![StageKind::Fragment, StageKind::Vertex, StageKind::Geometry]
    );
}

#[test]
fn test_sources_replace_in_place() {
    let mut sources = ShaderSources::new();
    sources.insert(StageKind::Vertex, "v1");
    sources.insert(StageKind::Fragment, "f");
    let previous = sources.insert(StageKind::Vertex, "v2");

    assert_eq!(previous.as_deref(), Some("v1"));
    assert_eq!(sources.len(), 2);
    assert_eq!(sources.get(StageKind::Vertex), Some("v2"));
    assert_eq!(sources.stage_kinds()[0], StageKind::Vertex);
}

#[test]
fn test_sources_lookup() {
    let sources: ShaderSources = vec![(StageKind::Vertex, "v")].into_iter().collect();
    assert!(sources.contains(StageKind::Vertex));
    assert!(!sources.contains(StageKind::Fragment));
    assert!(!sources.is_empty());
    assert_eq!(sources.iter().collect::<Vec<_>>(), vec![(StageKind::Vertex, "v")]);
}

// ============================================================================
// Text and map strategies
// ============================================================================

#[test]
fn test_from_text_is_vertex_stage() {
    let sources = from_text("void main() {}");
    assert_eq!(sources.stage_kinds(), vec![StageKind::Vertex]);
    assert_eq!(sources.get(StageKind::Vertex), Some("void main() {}"));
}

#[test]
fn test_from_text_keeps_empty_text() {
    // Empty text is rejected at compile time, not here
    let sources = from_text("");
    assert_eq!(sources.len(), 1);
}

#[test]
fn test_from_map_passes_through_in_order() {
    let sources = from_map([
        (StageKind::Fragment, "f".to_string()),
        (StageKind::Vertex, "v".to_string()),
    ]);
    assert_eq!(sources.stage_kinds(), vec![StageKind::Fragment, StageKind::Vertex]);
}

// ============================================================================
// Path strategy
// ============================================================================

#[test]
fn test_from_paths_reads_files_in_caller_order() {
    let dir = scratch_dir("paths_order");
    let frag = write(&dir, "a.frag", "frag source");
    let vert = write(&dir, "a.vert", "vert source");

    let sources = from_paths(&[&frag, &vert]).unwrap();

    assert_eq!(sources.stage_kinds(), vec![StageKind::Fragment, StageKind::Vertex]);
    assert_eq!(sources.get(StageKind::Vertex), Some("vert source"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_from_paths_rejects_unknown_extension() {
    let dir = scratch_dir("paths_ext");
    let txt = write(&dir, "a.txt", "not a shader");

    let err = from_paths(&[txt]).unwrap_err();
    assert!(matches!(err, Error::SourceResolutionFailure(_)));
    assert!(err.message().contains("unsupported"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_from_paths_rejects_missing_extension() {
    let err = from_paths(&["shader"]).unwrap_err();
    assert!(matches!(err, Error::SourceResolutionFailure(_)));
}

#[test]
fn test_from_paths_missing_file_fails() {
    let dir = scratch_dir("paths_missing");
    let err = from_paths(&[dir.join("nope.vert")]).unwrap_err();
    assert!(matches!(err, Error::SourceResolutionFailure(_)));
    assert!(err.message().contains("nope.vert"));
    let _ = fs::remove_dir_all(&dir);
}

// ============================================================================
// Directory strategy
// ============================================================================

#[test]
fn test_from_directory_selects_base_name_and_known_extensions() {
    let dir = scratch_dir("dir_select");
    write(&dir, "basic.vert", "basic vertex");
    write(&dir, "basic.frag", "basic fragment");
    write(&dir, "basic.txt", "notes");
    write(&dir, "other.vert", "other vertex");

    let sources = from_directory("basic", &dir).unwrap();

    assert_eq!(sources.len(), 2);
    assert_eq!(sources.get(StageKind::Vertex), Some("basic vertex"));
    assert_eq!(sources.get(StageKind::Fragment), Some("basic fragment"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_from_directory_orders_by_pipeline() {
    let dir = scratch_dir("dir_order");
    write(&dir, "mesh.frag", "f");
    write(&dir, "mesh.geom", "g");
    write(&dir, "mesh.vert", "v");

    let sources = from_directory("mesh", &dir).unwrap();
    assert_eq!(
        sources.stage_kinds(),
        vec![StageKind::Vertex, StageKind::Geometry, StageKind::Fragment]
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_from_directory_skips_subdirectories() {
    let dir = scratch_dir("dir_subdir");
    fs::create_dir_all(dir.join("basic.geom")).unwrap();
    write(&dir, "basic.vert", "v");

    let sources = from_directory("basic", &dir).unwrap();
    assert_eq!(sources.stage_kinds(), vec![StageKind::Vertex]);
    let _ = fs::remove_dir_all(&dir);
}

#[cfg(unix)]
#[test]
fn test_from_directory_skips_dangling_symlink() {
    let dir = scratch_dir("dir_dangling");
    write(&dir, "basic.vert", "v");
    std::os::unix::fs::symlink(dir.join("nowhere.frag"), dir.join("basic.frag")).unwrap();

    let sources = from_directory("basic", &dir).unwrap();
    assert_eq!(sources.stage_kinds(), vec![StageKind::Vertex]);
    let _ = fs::remove_dir_all(&dir);
}

#[cfg(unix)]
#[test]
fn test_from_directory_follows_live_symlink() {
    let dir = scratch_dir("dir_symlink");
    write(&dir, "basic.vert", "v");
    let target = write(&dir, "shared_fragment.glsl", "f");
    std::os::unix::fs::symlink(&target, dir.join("basic.frag")).unwrap();

    let sources = from_directory("basic", &dir).unwrap();
    assert_eq!(sources.get(StageKind::Fragment), Some("f"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_from_directory_no_match_is_empty_not_error() {
    let dir = scratch_dir("dir_empty");
    write(&dir, "other.vert", "v");

    let sources = from_directory("basic", &dir).unwrap();
    assert!(sources.is_empty());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_from_directory_missing_directory_fails() {
    let dir = std::env::temp_dir().join(format!("lumen_source_absent_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let err = from_directory("basic", &dir).unwrap_err();
    assert!(matches!(err, Error::SourceResolutionFailure(_)));
}

// ============================================================================
// SourceResolver enum
// ============================================================================

#[test]
fn test_resolver_variants_match_free_functions() {
    let dir = scratch_dir("resolver");
    write(&dir, "basic.vert", "v");

    let by_dir = SourceResolver::Directory {
        base_name: "basic".to_string(),
        directory: dir.clone(),
    };
    assert_eq!(by_dir.resolve().unwrap(), from_directory("basic", &dir).unwrap());

    let by_paths = SourceResolver::Paths(vec![dir.join("basic.vert")]);
    assert_eq!(by_paths.resolve().unwrap().get(StageKind::Vertex), Some("v"));

    let by_text = SourceResolver::Text("t".to_string());
    assert_eq!(by_text.resolve().unwrap(), from_text("t"));

    let by_map = SourceResolver::Map(vec![(StageKind::Compute, "c".to_string())]);
    assert_eq!(by_map.resolve().unwrap().stage_kinds(), vec![StageKind::Compute]);
    let _ = fs::remove_dir_all(&dir);
}
