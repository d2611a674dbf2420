//! Shared test fixtures for integration tests.
//!
//! # Available Fixtures
//!
//! - `catalog`: ten listings across five categories, three of them electronics
//! - `engine`: a [`QueryEngine`] over `catalog`
//!
//! Listing dates are relative to [`now`], a fixed evaluation time, so recency
//! boosts and date-range filters are deterministic. Pass `now()` to
//! `search_at` rather than calling `search`.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use rstest::fixture;
use sokoni_search::{Condition, Item, QueryEngine, Seller};

/// Fixed evaluation time for every integration test.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn days_ago(days: u64) -> NaiveDate {
    now().date_naive() - Days::new(days)
}

/// A plain listing: used, unverified seller, no flags, no images.
pub fn listing(id: &str, title: &str, category: &str, price: f64, age: u64) -> Item {
    Item {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        price,
        original_price: None,
        condition: Condition::Used,
        category: category.to_string(),
        subcategory: String::new(),
        location: "Nairobi, Kenya".to_string(),
        images: vec![],
        seller: Seller {
            name: format!("Seller {id}"),
            phone: "+254700000000".to_string(),
            whatsapp: "+254700000000".to_string(),
            email: format!("{id}@sokoni.test"),
            verified: false,
        },
        is_hot_deal: false,
        featured: false,
        date_added: days_ago(age),
    }
}

#[fixture]
pub fn catalog() -> Vec<Item> {
    let mut iphone = listing("hd1", "iPhone 15 Pro Max", "electronics", 185_000.0, 10);
    iphone.description = "Brand new, sealed in box with one year warranty".to_string();
    iphone.subcategory = "Mobile Phones".to_string();
    iphone.original_price = Some(220_000.0);
    iphone.condition = Condition::New;
    iphone.images = vec!["front.jpg".to_string(), "back.jpg".to_string()];
    iphone.seller.verified = true;
    iphone.is_hot_deal = true;

    let mut galaxy = listing("e2", "Samsung Galaxy S23", "electronics", 95_000.0, 40);
    galaxy.description = "Clean phone, minor scratches on the frame".to_string();
    galaxy.subcategory = "Mobile Phones".to_string();
    galaxy.location = "Mombasa, Kenya".to_string();

    let mut laptop = listing("e3", "Dell XPS 13 Laptop", "electronics", 150_000.0, 3);
    laptop.description = "Core i7 laptop with 16GB RAM, great for programming".to_string();
    laptop.subcategory = "Laptops".to_string();
    laptop.original_price = Some(170_000.0);
    laptop.featured = true;

    let mut corolla = listing("v1", "Toyota Corolla 2015", "vehicles", 1_450_000.0, 60);
    corolla.description = "Well maintained, low mileage, automatic".to_string();
    corolla.subcategory = "Cars".to_string();
    corolla.location = "Nakuru, Kenya".to_string();
    corolla.seller.verified = true;

    let mut motorcycle = listing("v2", "Honda Motorcycle", "vehicles", 180_000.0, 5);
    motorcycle.subcategory = "Motorcycles".to_string();
    motorcycle.location = "Kisumu, Kenya".to_string();

    let mut sofa = listing("f1", "Leather Sofa Set", "furniture", 65_000.0, 1);
    sofa.description = "Seven seater leather sofa in brown".to_string();
    sofa.subcategory = "Living Room".to_string();
    sofa.original_price = Some(80_000.0);
    sofa.condition = Condition::New;
    sofa.is_hot_deal = true;

    let mut table = listing("f2", "Wooden Dining Table", "furniture", 32_000.0, 90);
    table.subcategory = "Dining".to_string();
    table.location = "Eldoret, Kenya".to_string();

    let mut apartment = listing("p1", "Two Bedroom Apartment for Rent", "property", 35_000.0, 15);
    apartment.subcategory = "Rentals".to_string();
    apartment.seller.verified = true;

    let mut land = listing("p2", "Land for Sale in Kitengela", "property", 2_500_000.0, 120);
    land.subcategory = "Land".to_string();
    land.location = "Kajiado, Kenya".to_string();

    let mut dress = listing("fa1", "Wedding Dress", "fashion", 25_000.0, 0);
    dress.subcategory = "Women".to_string();
    dress.original_price = Some(40_000.0);
    dress.location = "Mombasa, Kenya".to_string();
    dress.featured = true;

    vec![
        iphone, galaxy, laptop, corolla, motorcycle, sofa, table, apartment, land, dress,
    ]
}

#[allow(dead_code)] // Not every integration test crate uses the engine fixture
#[fixture]
pub fn engine(catalog: Vec<Item>) -> QueryEngine {
    QueryEngine::new(catalog)
}
