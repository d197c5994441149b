// ABOUTME: Integration tests for configuration parsing and validation.
// ABOUTME: Tests YAML parsing, humantime durations and config file discovery.

use dockhand::config::*;
use dockhand::error::Error;
use dockhand::runtime::RuntimeType;
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.connect_timeout, Duration::from_secs(120));
        assert_eq!(config.call_timeout, None);
        assert_eq!(config.on_start_failure, StartFailurePolicy::Leave);
        assert!(config.runtime.runtime.is_none());
        assert!(config.runtime.socket.is_none());
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
runtime:
  runtime: podman
  socket: /run/user/1000/podman/podman.sock
connect_timeout: 30s
call_timeout: 2m 30s
on_start_failure: remove
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.runtime.runtime, Some(RuntimeType::Podman));
        assert_eq!(
            config.runtime.socket.as_deref(),
            Some("/run/user/1000/podman/podman.sock")
        );
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.call_timeout, Some(Duration::from_secs(150)));
        assert_eq!(config.on_start_failure, StartFailurePolicy::Remove);
    }

    #[test]
    fn default_matches_empty_document() {
        let parsed = Config::from_yaml("{}").unwrap();
        let default = Config::default();
        assert_eq!(parsed.connect_timeout, default.connect_timeout);
        assert_eq!(parsed.call_timeout, default.call_timeout);
        assert_eq!(parsed.on_start_failure, default.on_start_failure);
    }
}

mod validation {
    use super::*;

    #[test]
    fn rejects_unknown_fields() {
        let err = Config::from_yaml("retries: 3\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)), "got {:?}", err);
    }

    #[test]
    fn rejects_unknown_start_failure_policy() {
        let err = Config::from_yaml("on_start_failure: explode\n").unwrap_err();
        assert!(err.to_string().contains("leave or remove"), "got {}", err);
    }

    #[test]
    fn rejects_malformed_duration() {
        let err = Config::from_yaml("call_timeout: soon\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn rejects_zero_timeouts() {
        let err = Config::from_yaml("connect_timeout: 0s\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = Config::from_yaml("call_timeout: 0s\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_blank_socket() {
        let yaml = "runtime:\n  socket: \"  \"\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(msg) if msg.contains("socket")));
    }
}

mod start_failure_policy {
    use super::*;

    #[test]
    fn parses_and_displays() {
        assert_eq!("leave".parse(), Ok(StartFailurePolicy::Leave));
        assert_eq!("remove".parse(), Ok(StartFailurePolicy::Remove));
        assert!("Remove".parse::<StartFailurePolicy>().is_err());
        assert_eq!(StartFailurePolicy::Remove.to_string(), "remove");
    }
}

mod discovery {
    use super::*;
    use std::fs;

    #[test]
    fn finds_primary_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "call_timeout: 10s\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.call_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn primary_file_wins_over_alternatives() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "call_timeout: 10s\n").unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_ALT), "call_timeout: 20s\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.call_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn finds_dotdir_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".dockhand")).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME_DIR),
            "on_start_failure: remove\n",
        )
        .unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.on_start_failure, StartFailurePolicy::Remove);
    }

    #[test]
    fn missing_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::discover(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(path) if path == dir.path()));
    }

    #[test]
    fn load_propagates_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
