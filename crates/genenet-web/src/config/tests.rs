#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8000");
        assert!(config.server.cors_origins.is_empty());
        assert_eq!(config.data.links_file, "links_achilles.xlsx");
        assert_eq!(config.analysis.threshold, 0.2);
        assert_eq!(config.analysis.num, 3);
        assert!(config.analysis.positive);
        assert_eq!(config.analysis.min_citations, 2);
        assert!(config.analysis.interaction_type.is_some());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [server]
            cors_origins = ["https://batchnetwork.netlify.app"]

            [data]
            dir = "/srv/genenet"
            orthologs_file = "human_to_mouse.xlsx"

            [analysis]
            num = 5
            positive = false
            threshold = -0.2
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8000");
        assert_eq!(config.server.cors_origins.len(), 1);
        assert_eq!(config.data.dir, std::path::PathBuf::from("/srv/genenet"));
        assert_eq!(config.data.biogrid_file, "biogrid_human_processed_4_4_212.xlsx");
        assert_eq!(config.data.orthologs_file.as_deref(), Some("human_to_mouse.xlsx"));
        assert_eq!(config.analysis.num, 5);
        assert!(!config.analysis.positive);
        assert_eq!(config.analysis.min_citations, 2);
    }

    #[test]
    fn test_invalid_analysis_defaults_rejected() {
        let err = Config::from_toml_str("[analysis]\nnum = 0\n").unwrap_err();
        assert!(matches!(err, GenenetError::Config(_)), "got {err}");
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = Config::from_toml_str("[server\nbind = 1").unwrap_err();
        assert!(matches!(err, GenenetError::Toml(_)));
    }

    fn write_config(dir: &tempfile::TempDir, content: &str) -> String {
        let path = dir.path().join("genenet.toml");
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[server]\nbind = \"127.0.0.1:9000\"\n[analysis]\nnum = 4\n");
        let config = Config::load_from(Some(path), None).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.analysis.num, 4);
    }

    #[test]
    fn test_bind_override_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[server]\nbind = \"127.0.0.1:9000\"\n");
        let config = Config::load_from(Some(path), Some("0.0.0.0:8080".into())).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
    }

    #[test]
    fn test_no_file_uses_defaults() {
        // No genenet.toml in the crate directory tests run from.
        let config = Config::load_from(None, None).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8000");
        assert_eq!(config.analysis.num, 3);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml").to_string_lossy().into_owned();
        let err = Config::load_from(Some(missing), None).unwrap_err();
        assert!(matches!(err, GenenetError::Config(ref msg) if msg.contains("absent.toml")), "got {err}");
    }

    #[test]
    fn test_load_reads_environment() {
        // The only test touching GENENET_CONFIG / GENENET_BIND.
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[analysis]\nthreshold = 0.35\n");
        std::env::set_var(CONFIG_ENV, &path);
        std::env::set_var(BIND_ENV, "127.0.0.1:18000");
        let result = Config::load();
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var(BIND_ENV);

        let config = result.unwrap();
        assert_eq!(config.analysis.threshold, 0.35);
        assert_eq!(config.server.bind, "127.0.0.1:18000");
    }
}
