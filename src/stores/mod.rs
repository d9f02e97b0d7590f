mod engagement;
mod feed;
mod graph;
mod identity;
mod posts;

pub use engagement::*;
pub use feed::*;
pub use graph::*;
pub use identity::*;
pub use posts::*;

use std::sync::Arc;
use tokio::sync::RwLock;

/// All mutable tables, owned in one place and handed to handlers through an
/// `Extension`. The single lock serializes whole request mutations, which is
/// the mutual exclusion the counter updates rely on.
pub struct AppState {
    pub users: IdentityStore,
    pub graph: SocialGraph,
    pub posts: PostStore,
    pub engagement: EngagementStore,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            users: IdentityStore::new(),
            graph: SocialGraph::new(),
            posts: PostStore::new(),
            engagement: EngagementStore::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub type SharedState = Arc<RwLock<AppState>>;
