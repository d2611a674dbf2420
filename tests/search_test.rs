mod common;

use assert2::check;
use common::{catalog, engine, listing, now};
use rstest::rstest;
use sokoni_search::search::{
    BROWSE_LIMIT, Choice, DateRange, PriceRange, SortBy, age_in_days, edit_distance,
};
use sokoni_search::{FilterState, Item, QueryEngine};
use std::time::Duration;

/// Re-checks every active predicate on its own, without going through the engine.
fn satisfies(item: &Item, filters: &FilterState) -> bool {
    let age = age_in_days(item.date_added, now());
    let category = match &filters.category {
        Choice::All => true,
        Choice::Only(value) => &item.category == value,
    };
    let subcategory = match &filters.subcategory {
        Choice::All => true,
        Choice::Only(value) => &item.subcategory == value,
    };
    let condition = match &filters.condition {
        Choice::All => true,
        Choice::Only(value) => item.condition.as_str() == value,
    };
    let location = match &filters.location {
        Choice::All => true,
        Choice::Only(value) => item.location.to_lowercase().contains(&value.to_lowercase()),
    };
    let date = match filters.date_range {
        DateRange::Today => age <= 1,
        DateRange::Week => age <= 7,
        DateRange::Month => age <= 30,
        DateRange::All | DateRange::Unrecognized => true,
    };

    category
        && subcategory
        && condition
        && location
        && date
        && item.price >= filters.price_range.min
        && item.price <= filters.price_range.max
        && (!filters.is_hot_deal || item.is_hot_deal)
        && (!filters.is_featured || item.featured)
        && (!filters.verified_sellers_only || item.seller.verified)
}

// --- Scenarios ---

#[rstest]
fn exact_category_filter(engine: QueryEngine) {
    let filters = FilterState {
        category: Choice::only("electronics"),
        ..FilterState::default()
    };
    let result = engine.search_at(&filters, now());

    check!(result.total_count == 3);
    check!(result.items().all(|item| item.category == "electronics"));
    check!(result.categories.get("electronics") == Some(&3));
}

#[rstest]
#[case("Mobile Phones", vec!["hd1", "e2"])]
#[case("Laptops", vec!["e3"])]
#[case("mobile phones", vec![])]
#[case("Mobile", vec![])]
fn subcategory_filter_is_exact_and_case_sensitive(
    engine: QueryEngine,
    #[case] subcategory: &str,
    #[case] expected: Vec<&str>,
) {
    let filters = FilterState {
        subcategory: Choice::only(subcategory),
        ..FilterState::default()
    };
    let result = engine.search_at(&filters, now());
    check!(result.ids() == expected);
}

#[rstest]
#[case("")]
#[case("iphone")]
fn price_range_excludes_expensive_listing(engine: QueryEngine, #[case] term: &str) {
    let filters = FilterState {
        search_term: term.to_string(),
        price_range: PriceRange::new(0.0, 100_000.0),
        ..FilterState::default()
    };
    let result = engine.search_at(&filters, now());

    check!(!result.ids().contains(&"hd1"));
    check!(result.items().all(|item| item.price <= 100_000.0));
}

#[rstest]
fn empty_query_browses_newest(engine: QueryEngine) {
    let result = engine.search_at(&FilterState::default(), now());

    check!(result.products.len() <= BROWSE_LIMIT);
    check!(result.products.len() == 10);
    check!(result.total_count == 10);
    check!(result.search_time == Duration::ZERO);
    check!(result.suggestions.is_empty());
    let dates: Vec<_> = result.items().map(|item| item.date_added).collect();
    check!(dates.windows(2).all(|pair| pair[0] >= pair[1]));
    check!(result.ids()[0] == "fa1");
}

#[test]
fn browse_caps_at_limit() {
    let corpus = (0..30u64).map(|i| listing(&format!("l{i}"), "Plain listing", "misc", 100.0, i));
    let engine = QueryEngine::new(corpus);
    let result = engine.search_at(&FilterState::default(), now());
    check!(result.products.len() == BROWSE_LIMIT);
    check!(result.total_count == 30);
    check!(result.ids()[0] == "l0");
}

#[test]
fn typo_with_no_matches_suggests_corrections() {
    let engine = QueryEngine::new(vec![
        listing("old1", "iPhone 15 Pro Max", "electronics", 185_000.0, 200),
        listing("old2", "Office Chair", "furniture", 8_000.0, 200),
    ]);
    let result = engine.search_at(&FilterState::with_term("iphoen"), now());

    check!(result.products.is_empty());
    check!(result.suggestions.contains(&"iphone".to_string()));
    check!(
        result
            .suggestions
            .iter()
            .all(|suggestion| edit_distance("iphoen", suggestion) <= 2)
    );
}

#[rstest]
fn close_typo_matches_directly(engine: QueryEngine) {
    // one substitution away from "iphone": close enough for the title fuzzy bonus
    let result = engine.search_at(&FilterState::with_term("iphohe"), now());
    check!(result.ids().contains(&"hd1"));
    check!(!result.ids().contains(&"e2"));
}

#[test]
fn discount_sort_puts_bigger_discount_first() {
    let plain = listing("plain", "Samsung Galaxy S23", "electronics", 95_000.0, 5);
    let mut discounted = listing("deal", "iPhone 15 Pro Max", "electronics", 185_000.0, 5);
    discounted.original_price = Some(220_000.0);

    let engine = QueryEngine::new(vec![plain, discounted]);
    let filters = FilterState {
        sort_by: SortBy::Discount,
        ..FilterState::default()
    };
    let result = engine.search_at(&filters, now());
    check!(result.ids() == vec!["deal", "plain"]);
}

// --- Properties ---

#[rstest]
#[case(FilterState::with_term("laptop"))]
#[case(FilterState::with_term("phone"))]
#[case(FilterState { sort_by: SortBy::Popularity, ..FilterState::default() })]
fn search_is_idempotent(engine: QueryEngine, #[case] filters: FilterState) {
    let first = engine.search_at(&filters, now());
    let second = engine.search_at(&filters, now());

    check!(first.products == second.products);
    check!(first.facets == second.facets);
    check!(first.categories == second.categories);
    check!(first.suggestions == second.suggestions);
}

#[rstest]
#[case(FilterState { category: Choice::only("furniture"), ..FilterState::default() })]
#[case(FilterState { subcategory: Choice::only("Mobile Phones"), ..FilterState::default() })]
#[case(FilterState { condition: Choice::only("new"), ..FilterState::default() })]
#[case(FilterState { location: Choice::only("mombasa"), ..FilterState::default() })]
#[case(FilterState { is_hot_deal: true, ..FilterState::default() })]
#[case(FilterState { is_featured: true, ..FilterState::default() })]
#[case(FilterState { verified_sellers_only: true, ..FilterState::default() })]
#[case(FilterState { date_range: DateRange::Week, ..FilterState::default() })]
#[case(FilterState { date_range: DateRange::Today, ..FilterState::default() })]
#[case(FilterState {
    search_term: "phone".to_string(),
    price_range: PriceRange::new(50_000.0, 200_000.0),
    verified_sellers_only: true,
    ..FilterState::default()
})]
#[case(FilterState {
    category: Choice::only("vehicles"),
    date_range: DateRange::Month,
    ..FilterState::default()
})]
fn every_result_satisfies_every_filter(
    engine: QueryEngine,
    catalog: Vec<Item>,
    #[case] filters: FilterState,
) {
    let result = engine.search_at(&filters, now());

    for item in result.items() {
        check!(catalog.contains(item), "{} is not in the corpus", item.id);
        check!(satisfies(item, &filters), "{} violates {:?}", item.id, filters);
    }
}

#[rstest]
fn filters_without_term_keep_every_match(engine: QueryEngine, catalog: Vec<Item>) {
    let filters = FilterState {
        location: Choice::only("Nairobi"),
        ..FilterState::default()
    };
    let result = engine.search_at(&filters, now());
    let expected = catalog.iter().filter(|item| satisfies(item, &filters)).count();
    check!(result.total_count == expected);
}

#[rstest]
#[case("")]
#[case("phone")]
fn price_low_sort_is_non_decreasing(engine: QueryEngine, #[case] term: &str) {
    let filters = FilterState {
        search_term: term.to_string(),
        sort_by: SortBy::PriceLow,
        ..FilterState::default()
    };
    let prices: Vec<f64> = engine.search_at(&filters, now()).items().map(|item| item.price).collect();
    check!(!prices.is_empty());
    check!(prices.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[rstest]
fn newest_sort_is_non_increasing(engine: QueryEngine) {
    let filters = FilterState {
        sort_by: SortBy::Newest,
        ..FilterState::default()
    };
    let result = engine.search_at(&filters, now());
    check!(result.total_count == 10);
    let dates: Vec<_> = result.items().map(|item| item.date_added).collect();
    check!(dates.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[rstest]
fn relevance_ranks_title_match_first(engine: QueryEngine) {
    let result = engine.search_at(&FilterState::with_term("laptop"), now());

    check!(result.ids().first() == Some(&"e3"));
    let scores: Vec<f64> = result.products.iter().map(|r| r.relevance_score).collect();
    check!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    check!(result.products.iter().all(|r| r.relevance_score >= 1.0));
}

#[rstest]
fn stemmed_query_matches_plural(engine: QueryEngine) {
    let result = engine.search_at(&FilterState::with_term("sofas"), now());
    check!(result.ids().first() == Some(&"f1"));
}

#[rstest]
fn facets_count_the_filtered_set(engine: QueryEngine) {
    let filters = FilterState {
        category: Choice::only("electronics"),
        ..FilterState::default()
    };
    let facets = engine.search_at(&filters, now()).facets;

    check!(facets.categories.get("electronics") == Some(&3));
    check!(facets.conditions.get("new") == Some(&1));
    check!(facets.conditions.get("used") == Some(&2));
    check!(facets.locations.get("Nairobi") == Some(&2));
    check!(facets.locations.get("Mombasa") == Some(&1));
    check!(facets.price_ranges.values().sum::<usize>() == 3);
}

#[rstest]
fn results_serialize_in_camel_case(engine: QueryEngine) {
    let result = engine.search_at(&FilterState::with_term("sofa"), now());
    let json = serde_json::to_value(&result).unwrap();

    check!(json["totalCount"].as_u64() == Some(result.total_count as u64));
    check!(json["products"][0]["relevanceScore"].is_number());
    check!(json["products"][0]["isHotDeal"] == serde_json::Value::Bool(true));
}
