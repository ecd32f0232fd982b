use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use photoloop::Error;
use photoloop::config::{Configuration, PlaybackConfig};

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
photo-library-path: "/photos"
delay: 12s
shuffle: false
shuffle-seed: 7
fullscreen: false
scan:
  max-depth: 3
  skip-hidden: true
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.photo_library_path, Some(PathBuf::from("/photos")));
    assert_eq!(cfg.delay, Duration::from_secs(12));
    assert!(!cfg.shuffle);
    assert_eq!(cfg.shuffle_seed, Some(7));
    assert!(!cfg.fullscreen);
    assert_eq!(cfg.scan.max_depth, Some(3));
    assert!(cfg.scan.skip_hidden);
    assert!(!cfg.scan.follow_links);
}

#[test]
fn empty_document_uses_defaults() {
    let cfg: Configuration = serde_yaml::from_str("{}").unwrap();
    assert_eq!(cfg.photo_library_path, None);
    assert_eq!(cfg.delay, Duration::from_secs(5));
    assert!(cfg.shuffle);
    assert!(cfg.fullscreen);
    assert_eq!(cfg.playback(), PlaybackConfig::default());
}

#[test]
fn humantime_delay_accepts_minutes() {
    let cfg: Configuration = serde_yaml::from_str("delay: 1m").unwrap();
    let cfg = cfg.validated().unwrap();
    assert_eq!(cfg.playback().delay, Duration::from_secs(60));
}

#[test]
fn validation_rejects_out_of_range_delay() {
    for delay in ["0s", "61s", "1500ms"] {
        let cfg: Configuration = serde_yaml::from_str(&format!("delay: {delay}")).unwrap();
        assert!(cfg.validated().is_err(), "{delay} should be rejected");
    }
}

#[test]
fn malformed_delay_is_rejected() {
    assert!(serde_yaml::from_str::<Configuration>("delay: soon").is_err());
}

#[test]
fn playback_from_secs_bounds() {
    assert!(PlaybackConfig::from_secs(0, true).is_err());
    assert!(PlaybackConfig::from_secs(61, true).is_err());
    let one = PlaybackConfig::from_secs(1, false).unwrap();
    assert_eq!(one.delay, Duration::from_secs(1));
    assert!(!one.shuffle);
    assert_eq!(
        PlaybackConfig::from_secs(60, true).unwrap().delay,
        Duration::from_secs(60)
    );
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "photo-library-path: /srv/pictures\ndelay: 3s").unwrap();

    let cfg = Configuration::from_yaml_file(file.path())
        .unwrap()
        .validated()
        .unwrap();
    assert_eq!(cfg.photo_library_path, Some(PathBuf::from("/srv/pictures")));
    assert_eq!(cfg.delay, Duration::from_secs(3));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Configuration::from_yaml_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn malformed_file_is_a_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "shuffle: [not, a, bool]").unwrap();

    let err = Configuration::from_yaml_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
