//! Query expansion and relevance ranking for catalog search.
//!
//! A raw query is tokenized, each token is broadened one hop through the
//! synonym tables, and candidate products are scored against both the raw
//! query and the expanded terms. Ranking happens in memory after the
//! structural filters have been applied by the repository.

pub mod synonyms;

use crate::domain::product::Product;
use crate::search::synonyms::{BRAND_ALIASES, FRAGRANCE_FAMILIES, PERFUME_SYNONYMS};

/// Expands a raw query into a deduplicated set of lowercase search terms.
///
/// The original tokens always come first. Each token is matched against the
/// synonym tables exactly once; terms added by expansion are not expanded
/// again.
pub fn expand_query(query: &str) -> Vec<String> {
    let tokens: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut terms: Vec<String> = Vec::new();
    for token in &tokens {
        push_unique(&mut terms, token.clone());
    }

    for token in &tokens {
        for (key, values) in PERFUME_SYNONYMS.iter() {
            if *key == token {
                for value in values {
                    push_unique(&mut terms, (*value).to_string());
                }
            } else if values.contains(&token.as_str()) {
                push_unique(&mut terms, (*key).to_string());
                for value in values {
                    push_unique(&mut terms, (*value).to_string());
                }
            }
        }

        for (family, notes) in FRAGRANCE_FAMILIES.iter() {
            if *family == token {
                for note in notes {
                    push_unique(&mut terms, (*note).to_string());
                }
            } else if notes.contains(&token.as_str()) {
                push_unique(&mut terms, (*family).to_string());
            }
        }

        for (alias, full_name) in BRAND_ALIASES.iter() {
            if *alias == token {
                push_unique(&mut terms, full_name.to_lowercase());
            } else if full_name.to_lowercase().contains(token.as_str()) {
                push_unique(&mut terms, (*alias).to_string());
            }
        }
    }

    terms
}

fn push_unique(terms: &mut Vec<String>, term: String) {
    if !terms.contains(&term) {
        terms.push(term);
    }
}

/// Returns true when any expanded term appears in one of the searchable
/// product fields.
pub fn matches_any_term(product: &Product, terms: &[String]) -> bool {
    let name = product.name.to_lowercase();
    let brand = product.brand.to_lowercase();
    let fragrance_type = product
        .fragrance_type
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let description = product
        .description
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();

    terms.iter().any(|term| {
        name.contains(term)
            || brand.contains(term)
            || fragrance_type.contains(term)
            || description.contains(term)
    })
}

/// Scores a product against the raw query and its expansion.
///
/// Each signal is weighted and summed independently, so an exact name match
/// also collects the prefix and substring weights. Field weights favor the
/// name over the brand, and both over the fragrance type and the
/// description. Matches on expanded terms contribute a smaller bonus per
/// term so that direct hits always outrank synonym hits.
pub fn relevance_score(product: &Product, query: &str, terms: &[String]) -> i32 {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 0;
    }

    let name = product.name.to_lowercase();
    let brand = product.brand.to_lowercase();
    let fragrance_type = product
        .fragrance_type
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let description = product
        .description
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();

    let mut score = 0;

    if name == query {
        score += 100;
    }
    if brand == query {
        score += 90;
    }
    if name.starts_with(&query) {
        score += 50;
    }
    if brand.starts_with(&query) {
        score += 45;
    }
    if name.contains(&query) {
        score += 30;
    }
    if brand.contains(&query) {
        score += 25;
    }
    if fragrance_type.contains(&query) {
        score += 20;
    }
    if description.contains(&query) {
        score += 10;
    }

    for term in terms {
        if *term == query {
            continue;
        }
        if name.contains(term) {
            score += 15;
        }
        if brand.contains(term) {
            score += 12;
        }
        if fragrance_type.contains(term) {
            score += 10;
        }
        if description.contains(term) {
            score += 5;
        }
    }

    score
}

/// Filters and orders products by descending relevance to the query.
///
/// A blank query returns the input unchanged. The sort is stable, so
/// products with equal scores keep their incoming order.
pub fn rank_products(products: Vec<Product>, query: &str) -> Vec<Product> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return products;
    }

    let terms = expand_query(trimmed);

    let mut scored: Vec<(i32, Product)> = products
        .into_iter()
        .filter(|product| matches_any_term(product, &terms))
        .map(|product| (relevance_score(&product, trimmed, &terms), product))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, product)| product).collect()
}
