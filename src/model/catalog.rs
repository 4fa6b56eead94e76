use serde::{Deserialize, Serialize};

use crate::model::common::{deserialize_slug, Id};

/// A product whose builds and releases are tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, always held in slug form.
    #[serde(deserialize_with = "deserialize_slug")]
    pub id: Id,
    /// Short name for the product family (plaintext).
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Roles allowed to see the details of this product.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// A deployment target such as "test" or "production".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Unique identifier, always held in slug form.
    #[serde(deserialize_with = "deserialize_slug")]
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Roles allowed to see the details of this environment.
    #[serde(default)]
    pub roles: Vec<String>,
    /// A link to the environment.
    #[serde(default)]
    pub link: String,
}

/// An ordered sequence of environments a build is promoted through on the
/// way to production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pathway {
    /// Unique identifier, always held in slug form.
    #[serde(deserialize_with = "deserialize_slug")]
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// The product this pathway belongs to.
    #[serde(default)]
    pub product_id: Id,
    /// Roles allowed to see the details of this pathway.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Sequential environment IDs, first to last.
    #[serde(default)]
    pub environments: Vec<Id>,
}

/// The catalog of everything the server manages: products, environments and
/// the pathways connecting them. Loaded once at startup and treated as
/// immutable for the process lifetime; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub environments: Vec<Environment>,
    #[serde(default)]
    pub pathways: Vec<Pathway>,
}

impl Catalog {
    pub fn find_product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// The pathway owned by the given product, if one is configured.
    pub fn pathway_for_product(&self, product_id: &str) -> Option<&Pathway> {
        self.pathways.iter().find(|p| p.product_id == product_id)
    }

    /// Resolves a pathway's environment IDs to full records, preserving the
    /// pathway's promotion order. Unknown IDs are skipped.
    pub fn pathway_environments(&self, pathway: &Pathway) -> Vec<Environment> {
        pathway
            .environments
            .iter()
            .filter_map(|id| self.environments.iter().find(|e| &e.id == id))
            .cloned()
            .collect()
    }

    /// Trims the catalog down to the resources visible to a caller holding
    /// the given roles. A resource is visible when any of its roles matches
    /// any of the caller's.
    pub fn filter_by_roles(&self, caller_roles: &[String]) -> Catalog {
        Catalog {
            products: self
                .products
                .iter()
                .filter(|p| any_role_match(&p.roles, caller_roles))
                .cloned()
                .collect(),
            environments: self
                .environments
                .iter()
                .filter(|e| any_role_match(&e.roles, caller_roles))
                .cloned()
                .collect(),
            pathways: self
                .pathways
                .iter()
                .filter(|p| any_role_match(&p.roles, caller_roles))
                .cloned()
                .collect(),
        }
    }
}

fn any_role_match(resource_roles: &[String], caller_roles: &[String]) -> bool {
    resource_roles
        .iter()
        .any(|role| caller_roles.iter().any(|held| held == role))
}
