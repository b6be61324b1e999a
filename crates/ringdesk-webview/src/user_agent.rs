//! User agent handling.
//!
//! The hosted app gates features on the browser it sees, so the shell's
//! own product token never reaches it.

/// Product token the shell would otherwise advertise.
pub const SHELL_PRODUCT: &str = "ringdesk";

/// Remove every `product/version` token for `product` from `ua`.
pub fn strip_product_token(ua: &str, product: &str) -> String {
    let prefix = format!("{product}/");
    ua.split_whitespace()
        .filter(|token| !token.starts_with(&prefix))
        .collect::<Vec<_>>()
        .join(" ")
}

/// User agent applied to every surface, or `None` to keep the engine default.
pub fn effective_user_agent(configured: Option<&str>) -> Option<String> {
    configured
        .map(|ua| strip_product_token(ua, SHELL_PRODUCT))
        .filter(|ua| !ua.is_empty())
}
