//! Fuzz target for the filter parser and WHERE compiler.
//!
//! Filters arrive from API clients, so any byte string must either compile or
//! return a `CompileError`: no panics, and a compiled result always keeps
//! placeholder/parameter parity in both styles.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pgwhere_core::config::LimitsConfig;
use pgwhere_core::sql::count_placeholders;
use pgwhere_core::{PlaceholderStyle, WhereClauseBuilder};

/// Small limits keep pathological inputs fast.
const LIMITS: LimitsConfig = LimitsConfig {
    max_depth: 16,
    max_conditions: 128,
    max_list_len: 64,
};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(filter) = serde_json::from_str::<serde_json::Value>(text) else {
        return;
    };

    for style in [PlaceholderStyle::Format, PlaceholderStyle::Numbered] {
        let builder = WhereClauseBuilder::new()
            .with_placeholder(style)
            .with_limits(LIMITS);

        if let Ok(Some(compiled)) = builder.build_json(&filter) {
            assert_eq!(
                count_placeholders(&compiled.sql, style),
                compiled.params.len(),
                "parity broken for {text}"
            );
        }
    }
});
