use std::path::PathBuf;

use folio::config::{ConfigFlags, ThemeMode, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".foliorc");
    let content = r#"
# comment
--watch

--theme light

--close-delay=300
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.watch);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.close_delay_ms, Some(300));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".foliorc");
    let content = "--watch\n--theme light\n--render-debug-log file.log\n--close-delay 400\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "folio".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
        "--close-delay".to_string(),
        "50".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.watch, "file flags should remain enabled");
    assert_eq!(effective.theme, Some(ThemeMode::Dark), "cli should override theme");
    assert_eq!(effective.close_delay_ms, Some(50), "cli should override delay");
    assert_eq!(
        effective.render_debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_global_then_local_then_cli_layering() {
    let global = ConfigFlags {
        perf: true,
        close_delay_ms: Some(1_000),
        ..ConfigFlags::default()
    };
    let local = ConfigFlags {
        close_delay_ms: Some(250),
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        watch: true,
        ..ConfigFlags::default()
    };
    let effective = global.union(&local).union(&cli);
    assert!(effective.perf);
    assert!(effective.watch);
    assert_eq!(effective.close_delay_ms, Some(250));
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}
