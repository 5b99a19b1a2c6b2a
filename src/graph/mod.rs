mod builder;
mod weights;

pub use builder::GraphBuilder;
pub use weights::{WeightBand, WeightTable};

use std::collections::{HashMap, HashSet};

/// Weighted bipartite graph between users and products, built once per
/// batch from the full interaction snapshot. Read-only after
/// construction; both adjacency maps hold the same accumulated weights.
#[derive(Debug, Clone, Default)]
pub struct InteractionGraph {
    user_to_products: HashMap<String, HashMap<String, f64>>,
    product_to_users: HashMap<String, HashMap<String, f64>>,
    users: HashSet<String>,
    products: HashSet<String>,
    display_names: HashMap<String, String>,
}

impl InteractionGraph {
    pub(crate) fn new(
        user_to_products: HashMap<String, HashMap<String, f64>>,
        product_to_users: HashMap<String, HashMap<String, f64>>,
        users: HashSet<String>,
        products: HashSet<String>,
        display_names: HashMap<String, String>,
    ) -> Self {
        Self {
            user_to_products,
            product_to_users,
            users,
            products,
            display_names,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains_user(&self, user: &str) -> bool {
        self.user_to_products.contains_key(user)
    }

    /// Product id → accumulated weight for one user's interactions.
    pub fn user_products(&self, user: &str) -> Option<&HashMap<String, f64>> {
        self.user_to_products.get(user)
    }

    /// User → accumulated weight for one product's interactions.
    pub fn product_users(&self, product_id: &str) -> Option<&HashMap<String, f64>> {
        self.product_to_users.get(product_id)
    }

    pub fn users(&self) -> &HashSet<String> {
        &self.users
    }

    pub fn products(&self) -> &HashSet<String> {
        &self.products
    }

    /// Display name last seen for the product in the interaction log.
    pub fn display_name(&self, product_id: &str) -> Option<&str> {
        self.display_names.get(product_id).map(String::as_str)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Number of distinct (user, product) edges.
    pub fn edge_count(&self) -> usize {
        self.user_to_products.values().map(HashMap::len).sum()
    }
}
