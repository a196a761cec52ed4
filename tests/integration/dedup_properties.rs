use std::sync::Arc;

use proptest::prelude::*;
use typefinder::content::{ContentRepository, RenderContext, SnapshotRepository};
use typefinder::finder::{
    OccurrenceFinder, RepositoryUserService, RouteLinkBuilder, SearchOptions, StaticDimensions,
};

/// Site with `pages` pages; banner `i` is placed on page `placements[i]`.
fn snapshot(pages: usize, placements: &[usize]) -> String {
    let mut yaml = String::from(
        "node_types:\n  \"Example:Page\": { super_types: [\"Neos.Neos:Document\"] }\n  \"Example:Banner\": { super_types: [\"Neos.Neos:Content\"] }\nnodes:\n  - { identifier: site, type: \"Example:Page\" }\n",
    );
    for page in 0..pages {
        yaml.push_str(&format!(
            "  - {{ identifier: page-{page}, type: \"Example:Page\", parent: site, uri_path_segment: p{page}, label: \"Page {page}\" }}\n"
        ));
    }
    for (index, page) in placements.iter().enumerate() {
        yaml.push_str(&format!(
            "  - {{ identifier: banner-{index}, type: \"Example:Banner\", parent: page-{page} }}\n"
        ));
    }
    yaml
}

proptest! {
    #[test]
    fn each_page_reported_once_in_discovery_order(
        (pages, placements) in (1usize..6).prop_flat_map(|pages| {
            (Just(pages), proptest::collection::vec(0..pages, 0..12))
        })
    ) {
        let repository: Arc<dyn ContentRepository> =
            Arc::new(SnapshotRepository::from_yaml_str(&snapshot(pages, &placements)).unwrap());
        let links = RouteLinkBuilder::new(
            repository.node_types(),
            repository.dimensions(),
            "Neos.Neos:Document",
        );
        let users = RepositoryUserService::new(Arc::clone(&repository));
        let dimensions = StaticDimensions(Vec::new());
        let finder = OccurrenceFinder::new(
            repository.as_ref(),
            &dimensions,
            &links,
            &users,
            SearchOptions::default(),
        );
        let report = finder
            .find_occurrences("Example:Banner", &RenderContext::new())
            .unwrap();

        // Traversal visits pages in declaration order, so each used page
        // appears once, ordered by page number.
        let mut expected: Vec<usize> = placements.clone();
        expected.sort_unstable();
        expected.dedup();
        let urls: Vec<String> = report.occurrences.iter().map(|o| o.url.clone()).collect();
        let expected_urls: Vec<String> = expected.iter().map(|p| format!("p{p}")).collect();
        prop_assert_eq!(urls, expected_urls);

        for occurrence in &report.occurrences {
            let page = occurrence.url.trim_start_matches('p');
            prop_assert_eq!(&occurrence.label, &format!("Page {page}"));
        }
    }
}
