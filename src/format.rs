//! Plain-text rendering of search output for the terminal.

use crate::search::SearchResult;

/// Format search results into a readable listing.
pub fn format_search_results(result: &SearchResult, query: &str, limit: usize) -> String {
    if result.products.is_empty() {
        return format_no_results(result, query);
    }

    let mut output = if query.trim().is_empty() {
        format!("Newest listings ({} in catalog):\n\n", result.total_count)
    } else {
        format!(
            "{} results for '{}' ({:.1} ms):\n\n",
            result.total_count,
            query,
            result.search_time.as_secs_f64() * 1000.0
        )
    };

    for (idx, ranked) in result.products.iter().take(limit).enumerate() {
        let item = &ranked.item;
        output.push_str(&format!(
            "{}. {} - KSh {}",
            idx + 1,
            item.title,
            format_price(item.price)
        ));
        if item.discount() > 0.0 {
            output.push_str(&format!(" ({:.0}% off)", item.discount() * 100.0));
        }
        if item.is_hot_deal {
            output.push_str(" [hot deal]");
        }
        output.push('\n');
        output.push_str(&format!(
            "   {} / {} · {} · {}{}\n",
            item.category,
            item.subcategory,
            item.condition,
            item.location,
            if item.seller.verified { " · verified seller" } else { "" }
        ));
    }

    if result.products.len() > limit {
        output.push_str(&format!("\n... and {} more\n", result.products.len() - limit));
    }

    if !result.suggestions.is_empty() {
        output.push_str(&format!("\nRelated: {}\n", result.suggestions.join(", ")));
    }

    output
}

fn format_no_results(result: &SearchResult, query: &str) -> String {
    let mut msg = format!("No listings found for '{}'.\n\n", query);

    if !result.suggestions.is_empty() {
        msg.push_str(&format!("Did you mean: {}?\n\n", result.suggestions.join(", ")));
    }

    msg.push_str("Search tips:\n");
    msg.push_str("• Try a shorter or more general term\n");
    msg.push_str("• Widen the price range or clear the category\n");
    msg.push_str("• Search uses stemming: 'phones' matches 'phone'\n");
    msg
}

/// Whole currency units with thousands separators, e.g. `185,000`.
pub fn format_price(price: f64) -> String {
    let digits = format!("{:.0}", price.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if price < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}
