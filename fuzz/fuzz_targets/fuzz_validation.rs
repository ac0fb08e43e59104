//! Fuzz testing for request validation and listing queries.
//!
//! Ensures that payload validation and pagination never panic, whatever
//! the client sends.
//!
//! # Running the Fuzz Tests
//!
//! ```bash
//! cargo +nightly install cargo-fuzz
//! cargo +nightly fuzz run fuzz_validation -- -max_total_time=60
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use product_catalog::models::{ProductPayload, ProductQuery, seed_products};
use product_catalog::query::{PageLimits, filter_and_paginate};
use product_catalog::validation::validate_product_payload;

fuzz_target!(|data: &[u8]| {
    // Arbitrary JSON bodies: deserialize, then validate
    if let Ok(payload) = serde_json::from_slice::<ProductPayload>(data) {
        let _ = validate_product_payload(payload);
    }

    if let Ok(s) = std::str::from_utf8(data) {
        // Split the input into the four query values
        let mut parts = s.splitn(4, '&').map(|p| Some(p.to_string()));
        let query = ProductQuery {
            category: parts.next().flatten(),
            search: parts.next().flatten(),
            page: parts.next().flatten(),
            limit: parts.next().flatten(),
        };
        let limits = PageLimits {
            default_limit: 10,
            max_limit: Some(2),
        };
        let page = filter_and_paginate(seed_products(), &query, limits);
        assert!(page.len() <= 2);
    }
});
