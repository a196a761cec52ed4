use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use typefinder::config::ConfigLoader;
use typefinder::error::FinderError;
use typefinder::tooling::cli::{CliContext, Commands};

use crate::integration::support::{context, site_workspace, with_xdg_env};

const JSON_SNAPSHOT: &str = r#"{
  "node_types": {
    "Example:Page": { "super_types": ["Neos.Neos:Document"] },
    "Example:Banner": { "super_types": ["Neos.Neos:Content"] }
  },
  "nodes": [
    { "identifier": "site", "type": "Example:Page" },
    { "identifier": "shop", "type": "Example:Page", "parent": "site", "uri_path_segment": "shop", "label": "Shop" },
    { "identifier": "banner", "type": "Example:Banner", "parent": "shop" }
  ]
}"#;

#[test]
fn defaults_without_config_files() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let workspace = site_workspace(&temp_dir);
        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.site.snapshot, std::path::PathBuf::from("site.yaml"));
        assert_eq!(config.site.user, None);
        assert_eq!(config.search.document_type, "Neos.Neos:Document");
        assert_eq!(config.search.content_type, "Neos.Neos:Content");
        assert_eq!(config.search.timeout_ms, None);
        assert_eq!(config.serve.port, 8081);
        assert_eq!(config.serve.interface.to_string(), "127.0.0.1");
        assert_eq!(config.logging.output, "stderr");
    });
}

#[test]
fn workspace_file_overrides_global_file() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let workspace = site_workspace(&temp_dir);
        let global_dir = temp_dir.path().join("config").join("typefinder");
        fs::create_dir_all(&global_dir).unwrap();
        fs::write(
            global_dir.join("config.toml"),
            "[site]\nuser = \"admin\"\nbase_uri = \"https://global.example\"\n",
        )
        .unwrap();
        fs::write(
            workspace.join("typefinder.toml"),
            "[site]\nuser = \"editor\"\n\n[search]\ntimeout_ms = 5000\n",
        )
        .unwrap();

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.site.user.as_deref(), Some("editor"));
        assert_eq!(config.site.base_uri.as_deref(), Some("https://global.example"));
        assert_eq!(
            config.search.to_options().timeout,
            Some(Duration::from_millis(5000))
        );
    });
}

#[test]
fn environment_overrides_files() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let workspace = site_workspace(&temp_dir);
        fs::write(workspace.join("typefinder.toml"), "[serve]\nport = 9000\n").unwrap();

        std::env::set_var("TYPEFINDER__SERVE__PORT", "9100");
        std::env::set_var("TYPEFINDER__SITE__USER", "editor");
        let result = ConfigLoader::load(&workspace);
        std::env::remove_var("TYPEFINDER__SERVE__PORT");
        std::env::remove_var("TYPEFINDER__SITE__USER");

        let config = result.unwrap();
        assert_eq!(config.serve.port, 9100);
        assert_eq!(config.site.user.as_deref(), Some("editor"));
    });
}

#[test]
fn configured_user_applies_to_search() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let workspace = site_workspace(&temp_dir);
        fs::write(workspace.join("typefinder.toml"), "[site]\nuser = \"editor\"\n").unwrap();
        let cli = context(&workspace);
        let output = cli
            .execute(&Commands::ListOccurrences {
                node_type: "Example:Text".to_string(),
                format: "json".to_string(),
                user: None,
                base_uri: None,
            })
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["occurrences"][0]["url"], "en/preview");
    });
}

#[test]
fn explicit_config_file_selects_json_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let workspace = temp_dir.path().join("workspace");
        fs::create_dir_all(workspace.join("content")).unwrap();
        fs::write(workspace.join("content").join("export.json"), JSON_SNAPSHOT).unwrap();
        let config_path = temp_dir.path().join("finder.toml");
        fs::write(&config_path, "[site]\nsnapshot = \"content/export.json\"\n").unwrap();

        let cli = CliContext::new(workspace, Some(config_path)).unwrap();
        let output = cli
            .execute(&Commands::ListOccurrences {
                node_type: "Example:Banner".to_string(),
                format: "json".to_string(),
                user: None,
                base_uri: None,
            })
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["occurrences"][0]["url"], "shop");
        assert_eq!(parsed["occurrences"][0]["label"], "Shop");
    });
}

#[test]
fn missing_config_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let workspace = site_workspace(&temp_dir);
        let result = CliContext::new(workspace, Some(temp_dir.path().join("absent.toml")));
        assert!(matches!(result, Err(FinderError::ConfigError(_))));
    });
}

#[test]
fn missing_snapshot_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let workspace = temp_dir.path().join("empty");
        fs::create_dir_all(&workspace).unwrap();
        let result = CliContext::new(workspace, None);
        assert!(matches!(result, Err(FinderError::Snapshot(_))));
    });
}

#[test]
fn config_command_renders_effective_toml() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let workspace = site_workspace(&temp_dir);
        fs::write(workspace.join("typefinder.toml"), "[search]\ntimeout_ms = 750\n").unwrap();
        let output = context(&workspace).execute(&Commands::Config).unwrap();
        let parsed: toml::Value = toml::from_str(&output).unwrap();
        assert_eq!(parsed["search"]["timeout_ms"].as_integer(), Some(750));
        assert_eq!(
            parsed["search"]["document_type"].as_str(),
            Some("Neos.Neos:Document")
        );
        assert_eq!(parsed["site"]["snapshot"].as_str(), Some("site.yaml"));
    });
}
