use super::*;
use crate::foundation::log::{LogLevel, MemoryLog};

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_text_font").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn isolated_resolver(dir: &Path) -> FontResolver {
    FontResolver::with_search(vec!["DejaVuSans.ttf".to_string()], vec![dir.to_path_buf()])
}

fn host_font() -> Option<PathBuf> {
    let platform = Platform::current();
    platform.font_names().iter().find_map(|name| {
        platform
            .font_dirs()
            .iter()
            .find_map(|dir| find_font_file(dir, name, MAX_SEARCH_DEPTH))
    })
}

#[test]
fn falls_back_to_builtin_when_nothing_loads() {
    let dir = scratch("fallback");
    let mut cfg = RenderConfig::default();
    cfg.text.font_path = Some("definitely-missing.ttf".to_string());
    cfg.paths.assets = dir.clone();

    let log = MemoryLog::new();
    let font = isolated_resolver(&dir).resolve(&cfg, &log);
    assert!(font.is_builtin());
    assert_eq!(font.origin(), &FontOrigin::Builtin);
    assert!(log.contains(LogLevel::Warn, "Could not load user font"));
    assert!(log.contains(LogLevel::Warn, "built-in bitmap font"));
}

#[test]
fn corrupt_candidate_is_skipped() {
    let dir = scratch("corrupt");
    std::fs::write(dir.join("dejavusans.TTF"), b"garbage").unwrap();

    let log = MemoryLog::new();
    let font = isolated_resolver(&dir).resolve(&RenderConfig::default(), &log);
    assert!(font.is_builtin());
    assert_eq!(log.count(LogLevel::Warn), 1);
}

#[test]
fn resolution_never_fails() {
    let dir = scratch("never_fails");
    let resolver = isolated_resolver(&dir);
    for font_path in [None, Some(""), Some("   "), Some("x.ttf"), Some("/no/such/dir/y.otf")] {
        let mut cfg = RenderConfig::default();
        cfg.text.font_path = font_path.map(str::to_string);
        let mut font = resolver.resolve(&cfg, &MemoryLog::new());
        assert!(font.measure_width("abc") > 0.0);
    }
}

#[test]
fn host_resolution_yields_usable_face() {
    let mut font = resolve_font(&RenderConfig::default(), &MemoryLog::new());
    assert!(font.measure_width("Hello") > 0.0);
    assert!(font.bbox_height("Hello") > 0.0);
}

#[test]
fn find_font_file_matches_case_insensitively_below_depth_limit() {
    let dir = scratch("search");
    let nested = dir.join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(nested.join("Arial.TTF"), b"x").unwrap();

    assert_eq!(find_font_file(&dir, "arial.ttf", 2), Some(nested.join("Arial.TTF")));
    assert_eq!(find_font_file(&dir, "arial.ttf", 1), None);
    assert_eq!(find_font_file(&dir.join("missing"), "arial.ttf", 4), None);
}

#[test]
fn relative_user_font_is_found_under_assets_fonts() {
    let Some(src) = host_font() else {
        return;
    };
    let dir = scratch("assets_fonts");
    let fonts = dir.join("fonts");
    std::fs::create_dir_all(&fonts).unwrap();
    std::fs::copy(&src, fonts.join("Custom.ttf")).unwrap();

    let mut cfg = RenderConfig::default();
    cfg.paths.assets = dir.clone();
    cfg.text.font_path = Some("Custom.ttf".to_string());

    let log = MemoryLog::new();
    let font = isolated_resolver(&dir.join("empty")).resolve(&cfg, &log);
    assert_eq!(font.origin(), &FontOrigin::UserPath(fonts.join("Custom.ttf")));
    assert!(log.contains(LogLevel::Info, "Successfully loaded user-specified font"));
}

#[test]
fn platform_tables_are_populated() {
    for p in [Platform::Windows, Platform::MacOs, Platform::Other] {
        assert!(!p.font_names().is_empty());
        assert!(!p.font_dirs().is_empty());
    }
    assert_eq!(Platform::Other.font_names()[0], "DejaVuSans.ttf");
}
