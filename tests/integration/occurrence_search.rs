use tempfile::TempDir;
use typefinder::config::FinderConfig;
use typefinder::content::{ContentRepository, SnapshotRepository};
use typefinder::error::FinderError;
use typefinder::finder::{
    OccurrenceFinder, RepositoryUserService, RouteLinkBuilder, SearchOptions, StaticDimensions,
};
use typefinder::tooling::cli::{CliContext, Commands};
use typefinder::types::DimensionCombination;
use std::sync::Arc;

use crate::integration::support::{context, site_workspace, with_xdg_env, write_workspace, SITE_FIXTURE};

fn list(node_type: &str, format: &str) -> Commands {
    Commands::ListOccurrences {
        node_type: node_type.to_string(),
        format: format.to_string(),
        user: None,
        base_uri: None,
    }
}

fn occurrences_json(cli: &CliContext, command: &Commands) -> Vec<serde_json::Value> {
    let output = cli.execute(command).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    parsed["occurrences"].as_array().unwrap().clone()
}

#[test]
fn banner_occurrences_across_languages() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&site_workspace(&temp_dir));
        let occurrences = occurrences_json(&cli, &list("Example:Banner", "json"));

        let urls: Vec<&str> = occurrences.iter().map(|o| o["url"].as_str().unwrap()).collect();
        let labels: Vec<&str> = occurrences.iter().map(|o| o["label"].as_str().unwrap()).collect();
        assert_eq!(urls, vec!["en/page-a", "de/page-b"]);
        assert_eq!(labels, vec!["Page A", "Page B"]);
        assert!(occurrences.iter().all(|o| o["visible"] == true));
    });
}

#[test]
fn text_output_lists_pages_in_table() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&site_workspace(&temp_dir));
        let output = cli.execute(&list("Example:Banner", "text")).unwrap();
        assert!(output.contains("Occurrence on page"));
        let first = output.find("en/page-a").unwrap();
        let second = output.find("de/page-b").unwrap();
        assert!(first < second);
    });
}

#[test]
fn subtype_pages_match_supertype_query() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&site_workspace(&temp_dir));
        let occurrences = occurrences_json(&cli, &list("Example:Page", "json"));
        let urls: Vec<&str> = occurrences.iter().map(|o| o["url"].as_str().unwrap()).collect();
        assert!(urls.contains(&"de/page-b"), "landing page missing: {urls:?}");
        assert!(urls.contains(&"en/page-a"));
    });
}

#[test]
fn hidden_page_resolves_in_personal_workspace() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&site_workspace(&temp_dir));

        let anonymous = occurrences_json(&cli, &list("Example:Text", "json"));
        let urls: Vec<&str> = anonymous.iter().map(|o| o["url"].as_str().unwrap()).collect();
        assert_eq!(urls, vec!["en/draft", "de/draft"]);
        assert!(anonymous.iter().all(|o| o["visible"] == false));

        let editor = occurrences_json(
            &cli,
            &Commands::ListOccurrences {
                node_type: "Example:Text".to_string(),
                format: "json".to_string(),
                user: Some("editor".to_string()),
                base_uri: None,
            },
        );
        let urls: Vec<&str> = editor.iter().map(|o| o["url"].as_str().unwrap()).collect();
        assert_eq!(urls, vec!["en/preview", "de/preview"]);
    });
}

#[test]
fn base_uri_makes_urls_absolute() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&site_workspace(&temp_dir));
        let occurrences = occurrences_json(
            &cli,
            &Commands::ListOccurrences {
                node_type: "Example:Banner".to_string(),
                format: "json".to_string(),
                user: None,
                base_uri: Some("https://example.com/site".to_string()),
            },
        );
        assert_eq!(occurrences[0]["url"], "https://example.com/site/en/page-a");
    });
}

#[test]
fn invalid_type_name_fails_every_dimension() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&site_workspace(&temp_dir));
        let result = cli.execute(&list("not a type", "json"));
        assert!(matches!(result, Err(FinderError::SearchFailed(_))));
    });
}

#[test]
fn unknown_type_finds_nothing() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&site_workspace(&temp_dir));
        let output = cli.execute(&list("Example:Missing", "text")).unwrap();
        assert_eq!(output, "No occurrences of Example:Missing found.\n");
    });
}

#[test]
fn empty_combination_set_equals_default_combination() {
    let repository: Arc<dyn ContentRepository> =
        Arc::new(SnapshotRepository::from_yaml_str(SITE_FIXTURE).unwrap());
    let links = RouteLinkBuilder::new(
        repository.node_types(),
        repository.dimensions(),
        "Neos.Neos:Document",
    );
    let users = RepositoryUserService::new(Arc::clone(&repository));

    let empty = StaticDimensions(Vec::new());
    let default = StaticDimensions(vec![DimensionCombination::new()]);
    let search = |dimensions: &StaticDimensions| {
        OccurrenceFinder::new(
            repository.as_ref(),
            dimensions,
            &links,
            &users,
            SearchOptions::default(),
        )
        .find_occurrences("Example:Banner", &Default::default())
        .unwrap()
    };

    let from_empty = search(&empty);
    let from_default = search(&default);
    assert_eq!(from_empty.occurrences, from_default.occurrences);
    assert_eq!(from_empty.searched_dimensions, 1);
    // Default combination fills lang=en.
    assert_eq!(from_empty.occurrences[0].url, "en/page-a");
}

#[test]
fn node_types_command_lists_searchable_types() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&site_workspace(&temp_dir));
        let output = cli
            .execute(&Commands::NodeTypes {
                format: "json".to_string(),
            })
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let names: Vec<&str> = parsed
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["Example:Banner", "Example:LandingPage", "Example:Page", "Example:Text"]
        );
    });
}

#[test]
fn dimensions_command_lists_combinations() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&site_workspace(&temp_dir));
        let output = cli
            .execute(&Commands::Dimensions {
                format: "json".to_string(),
            })
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, serde_json::json!([{ "lang": "en" }, { "lang": "de" }]));
    });
}

#[test]
fn site_without_dimensions_searches_default_combination() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let workspace = write_workspace(
            &temp_dir,
            r#"
node_types:
  "Example:Page": { super_types: ["Neos.Neos:Document"] }
  "Example:Banner": { super_types: ["Neos.Neos:Content"] }
nodes:
  - { identifier: site, type: "Example:Page" }
  - { identifier: about, type: "Example:Page", parent: site, uri_path_segment: about, label: About }
  - { identifier: banner, type: "Example:Banner", parent: about }
  - { identifier: home-banner, type: "Example:Banner", parent: site }
"#,
        );
        let cli = context(&workspace);
        let occurrences = occurrences_json(&cli, &list("Example:Banner", "json"));
        let urls: Vec<&str> = occurrences.iter().map(|o| o["url"].as_str().unwrap()).collect();
        assert_eq!(urls, vec!["about", "/"]);

        let output = cli
            .execute(&Commands::Dimensions {
                format: "text".to_string(),
            })
            .unwrap();
        assert!(output.contains("default"));
    });
}

#[test]
fn context_from_repository_uses_configured_document_type() {
    let repository = SnapshotRepository::from_yaml_str(SITE_FIXTURE).unwrap();
    let mut config = FinderConfig::default();
    config.search.document_type = "Example:LandingPage".to_string();
    let cli = CliContext::from_repository(config, Arc::new(repository));
    let occurrences = occurrences_json(&cli, &list("Example:Banner", "json"));
    let labels: Vec<&str> = occurrences.iter().map(|o| o["label"].as_str().unwrap()).collect();
    // Only landing pages count as documents; page-a's banner has none.
    assert_eq!(labels, vec!["Page B"]);
}
