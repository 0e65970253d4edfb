//! Company discovery from JSON responses captured while the directory loads.
//!
//! Payload shapes are unknown, so the walk is a breadth-first search over
//! [`serde_json::Value`] with an explicit queue.

use iasme_browser::CapturedResponse;
use iasme_core::{resolve_url, unique, DirectoryEntry, DirectoryHost};
use serde_json::{Map, Value};
use std::collections::VecDeque;

const NAME_FIELDS: &[&str] = &["name", "company", "title"];
const PROFILE_FIELDS: &[&str] = &["url", "link"];
const EXTERNAL_FIELDS: &[&str] = &["website", "external_link"];

/// First of `fields` that is present and not null.
fn first_present<'a>(item: &'a Map<String, Value>, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .find_map(|field| item.get(*field).filter(|value| !value.is_null()))
}

fn company_name(item: &Map<String, Value>) -> Option<&str> {
    first_present(item, NAME_FIELDS)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// Whether a JSON value is shaped like a directory listing.
///
/// Needs a string name (`name`, `company` or `title`) and either
/// certifications (`certifications` array or `certification` string) or a
/// link (`url` or `link` string).
pub fn looks_like_company(value: &Value) -> bool {
    let Some(item) = value.as_object() else {
        return false;
    };
    if company_name(item).is_none() {
        return false;
    }

    let has_certifications = item.get("certifications").is_some_and(Value::is_array)
        || item.get("certification").is_some_and(Value::is_string);
    let has_url = PROFILE_FIELDS
        .iter()
        .any(|field| item.get(*field).is_some_and(Value::is_string));

    has_certifications || has_url
}

/// Every company-shaped object in a payload, in breadth-first order.
///
/// Company-shaped array elements are not descended into; company-shaped
/// objects reached directly still are.
pub fn walk_for_items(payload: &Value) -> Vec<&Map<String, Value>> {
    let mut queue = VecDeque::from([payload]);
    let mut items = Vec::new();

    while let Some(current) = queue.pop_front() {
        match current {
            Value::Array(elements) => {
                for element in elements {
                    if looks_like_company(element) {
                        if let Some(item) = element.as_object() {
                            items.push(item);
                        }
                    } else if element.is_object() || element.is_array() {
                        queue.push_back(element);
                    }
                }
            }
            Value::Object(object) => {
                if looks_like_company(current) {
                    items.push(object);
                }
                queue.extend(
                    object
                        .values()
                        .filter(|value| value.is_object() || value.is_array()),
                );
            }
            _ => {}
        }
    }

    items
}

/// Turn one captured feed into directory entries.
///
/// Links are resolved against the index URL, then reclassified by host so
/// that `profile_url` is always directory-hosted and `external_url` never is.
pub fn entries_from_feed(
    feed: &CapturedResponse,
    index_url: &str,
    host: &DirectoryHost,
) -> Vec<DirectoryEntry> {
    let link = |item: &Map<String, Value>, fields: &[&str]| {
        first_present(item, fields)
            .and_then(Value::as_str)
            .and_then(|href| resolve_url(index_url, href))
    };

    walk_for_items(&feed.body)
        .into_iter()
        .filter_map(|item| {
            let company = company_name(item)?;
            let mut profile_url = link(item, PROFILE_FIELDS);
            let mut external_url = link(item, EXTERNAL_FIELDS);

            if profile_url.as_deref().is_some_and(|url| !host.contains(url)) {
                external_url = external_url.or(profile_url.take());
            }
            if external_url.as_deref().is_some_and(|url| host.contains(url)) {
                profile_url = profile_url.or(external_url.take());
                external_url = None;
            }

            let mut certifications: Vec<String> = item
                .get("certifications")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|cert| !cert.is_empty())
                .map(String::from)
                .collect();
            if let Some(cert) = item.get("certification").and_then(Value::as_str) {
                let cert = cert.trim();
                if !cert.is_empty() {
                    certifications.push(cert.to_string());
                }
            }

            let mut entry = DirectoryEntry::new(company);
            entry.profile_url = profile_url;
            entry.external_url = external_url;
            entry.certifications = unique(certifications);
            entry.filters = vec![feed.url.clone()];
            Some(entry)
        })
        .collect()
}
