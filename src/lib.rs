//! Domain Tree - a concurrency-safe wildcard domain tree for Rust
//!
//! This library maps hierarchical, dot-separated keys (hostnames) to
//! arbitrary values with wildcard fallback, for embedding in request
//! routers and certificate selectors:
//! - Exact matching (`www.example.com`)
//! - Single-level wildcard matching (`*.example.com`)
//! - Suffix catch-all matching (`**.example.com`)
//! - Parallel lookups under one reader/writer lock
//! - Batch loading and batch lookup through lock guards
//!
//! # Example
//!
//! ```rust
//! use domain_tree_r::DomainTree;
//!
//! let tree = DomainTree::default();
//! tree.store("api.example.com", "backend-api");
//! tree.store("*.example.com", "backend-web");
//! tree.store("**.internal.example.com", "backend-internal");
//!
//! // Exact entry wins over the wildcard at the same depth
//! assert_eq!(tree.load("api.example.com"), Some("backend-api"));
//! // One extra label falls back to "*"
//! assert_eq!(tree.load("www.example.com"), Some("backend-web"));
//! // "**" catches any remaining depth
//! assert_eq!(tree.load("a.b.internal.example.com"), Some("backend-internal"));
//! // No entry covers this host
//! assert_eq!(tree.load("example.org"), None);
//! ```
//!
//! # Key Syntax
//!
//! Keys are split on the separator (`"."` by default) and stored right to
//! left, mirroring domain-name hierarchy.
//!
//! | Pattern | Example key | Matches |
//! |---------|-------------|---------|
//! | Exact | `www.example.com` | only `www.example.com` |
//! | Single-level | `*.example.com` | `foo.example.com`, and `example.com` itself |
//! | Suffix | `**.example.com` | `example.com` and everything under it, any depth |
//!
//! At every depth the precedence is exact, then `*`, then `**`. A `*` label
//! consumes exactly one segment and keeps matching; `**` ends the match
//! immediately no matter how many segments remain.
//!
//! Storing a key whose leftmost segment is a wildcard also places the value
//! on the wildcard's parent node, which is why `*.example.com` and
//! `**.example.com` match bare `example.com` as well.
//!
//! The tree never deletes nodes and never fails: empty or degenerate keys
//! degrade to no-ops on store and misses on load.

mod node;
pub mod tree;

// Re-export commonly used items
pub use node::{SUFFIX_WILDCARD, WILDCARD};
pub use tree::{
    DomainTree, DomainTreeReadGuard, DomainTreeWriteGuard, DEFAULT_SEPARATOR,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_workflow() {
        // A routing table the way an embedding proxy would build one.
        let tree = DomainTree::new(".");
        tree.extend([
            ("www.example.com", "frontend"),
            ("api.example.com", "api-gateway"),
            ("*.example.com", "default-pool"),
            ("**.staging.example.com", "staging-pool"),
            ("example.org", "legacy"),
        ]);

        // Exact entries win
        assert_eq!(tree.load("www.example.com"), Some("frontend"));
        assert_eq!(tree.load("api.example.com"), Some("api-gateway"));

        // Unknown single-label hosts under example.com hit the wildcard
        assert_eq!(tree.load("mail.example.com"), Some("default-pool"));

        // Anything under staging, however deep, hits the catch-all
        assert_eq!(tree.load("a.staging.example.com"), Some("staging-pool"));
        assert_eq!(tree.load("x.y.z.staging.example.com"), Some("staging-pool"));

        // Separate apex
        assert_eq!(tree.load("example.org"), Some("legacy"));

        // No match at all
        assert_eq!(tree.load("unrelated.net"), None);
    }
}
