//! URI resolution with the personal workspace override for hidden documents.

use crate::content::context::{ContentContext, RenderContext};
use crate::content::node::NodeTree;
use crate::content::repository::ContentRepository;
use crate::error::FinderError;
use crate::finder::linking::LinkBuilder;
use crate::types::LIVE_WORKSPACE;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Knows the current user's personal workspace.
pub trait UserService: Send + Sync {
    /// Personal workspace of the user in `render`, if there is one.
    fn personal_workspace_name(&self, render: &RenderContext) -> Option<String>;
}

/// Maps user `alice` to workspace `user-alice` when the repository has it.
pub struct RepositoryUserService {
    repository: Arc<dyn ContentRepository>,
}

impl RepositoryUserService {
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self { repository }
    }

    pub fn workspace_name_for(user: &str) -> String {
        format!("user-{}", user)
    }
}

impl UserService for RepositoryUserService {
    fn personal_workspace_name(&self, render: &RenderContext) -> Option<String> {
        let user = render.user.as_deref()?;
        let workspace = Self::workspace_name_for(user);
        self.repository
            .has_workspace(&workspace)
            .then_some(workspace)
    }
}

/// Remove the root-relative `./` prefix from a built URL.
pub fn strip_relative_prefix(uri: &str) -> &str {
    uri.strip_prefix("./").unwrap_or(uri)
}

/// Resolves document URLs; caches the override trees of one search.
pub struct UriResolver<'a> {
    repository: &'a dyn ContentRepository,
    links: &'a dyn LinkBuilder,
    users: &'a dyn UserService,
    override_trees: Mutex<HashMap<ContentContext, Arc<NodeTree>>>,
}

impl<'a> UriResolver<'a> {
    pub fn new(
        repository: &'a dyn ContentRepository,
        links: &'a dyn LinkBuilder,
        users: &'a dyn UserService,
    ) -> Self {
        Self {
            repository,
            links,
            users,
            override_trees: Mutex::new(HashMap::new()),
        }
    }

    /// URL of `document` as found in `tree`.
    ///
    /// Visible documents are linked in `tree`'s own context. Hidden ones are
    /// re-read in the user's personal workspace (or `live` without one) and
    /// linked there; `Ok(None)` when the document is missing in that context
    /// or has no route.
    pub fn resolve(
        &self,
        tree: &NodeTree,
        document: &str,
        visible: bool,
        render: &RenderContext,
    ) -> Result<Option<String>, FinderError> {
        let uri = if visible {
            self.links.node_uri(tree, document, render)?
        } else {
            let workspace = self
                .users
                .personal_workspace_name(render)
                .unwrap_or_else(|| LIVE_WORKSPACE.to_string());
            let context = tree.context().with_workspace(workspace);
            let override_tree = self.override_tree(&context)?;
            if !override_tree.contains(document) {
                debug!(document, context = %context, "Document missing in override context");
                return Ok(None);
            }
            self.links.node_uri(&override_tree, document, render)?
        };
        Ok(uri.map(|u| strip_relative_prefix(&u).to_string()))
    }

    fn override_tree(&self, context: &ContentContext) -> Result<Arc<NodeTree>, FinderError> {
        if let Some(tree) = self.override_trees.lock().get(context) {
            return Ok(Arc::clone(tree));
        }
        let tree = Arc::new(self.repository.tree(context)?);
        self.override_trees
            .lock()
            .insert(context.clone(), Arc::clone(&tree));
        Ok(tree)
    }
}
