//! Full configuration validation.
//!
//! Each section has its own check; all errors are collected into a single
//! `ConfigError`.

mod helpers;


use crate::schema::RingdeskConfig;
use ringdesk_common::ConfigError;

use helpers::{validate_http_url, validate_non_empty, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &RingdeskConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_app(&mut errors, config);
    validate_window(&mut errors, config);
    validate_links(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_app(errors: &mut Vec<String>, config: &RingdeskConfig) {
    validate_http_url(errors, "app.url", &config.app.url);
    if let Some(ua) = &config.app.user_agent {
        if ua.trim().is_empty() {
            errors.push("app.user_agent must not be blank".into());
        }
    }
}

fn validate_window(errors: &mut Vec<String>, config: &RingdeskConfig) {
    let w = &config.window;
    validate_range(errors, "window.width", w.width, 320, 8192);
    validate_range(errors, "window.height", w.height, 240, 8192);
    if w.min_width > w.width {
        errors.push(format!(
            "window.min_width = {} exceeds window.width = {}",
            w.min_width, w.width
        ));
    }
    if w.min_height > w.height {
        errors.push(format!(
            "window.min_height = {} exceeds window.height = {}",
            w.min_height, w.height
        ));
    }
}

fn validate_links(errors: &mut Vec<String>, config: &RingdeskConfig) {
    for (i, prefix) in config.links.in_app_prefixes.iter().enumerate() {
        validate_http_url(errors, &format!("links.in_app_prefixes[{i}]"), prefix);
    }
    for (i, pattern) in config.links.external_patterns.iter().enumerate() {
        validate_non_empty(errors, &format!("links.external_patterns[{i}]"), pattern);
    }
}
