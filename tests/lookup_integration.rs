//! Integration tests for the lookup engine.
//!
//! These exercise the full normalize → structural → fuzzy → merge → cache
//! pipeline through the public API only.

use std::sync::Arc;

use fuzzylookup::algorithms::{jaro_winkler, levenshtein, levenshtein_similarity};
use fuzzylookup::{
    normalize, Algorithm, EngineConfig, FieldAliases, FieldScope, LookupEngine, MatchType, RawRow,
    Record,
};

fn sample_engine() -> LookupEngine {
    LookupEngine::new(vec![
        Record::new("M10A", "Đào đất"),
        Record::new("M10B", "Đắp đất nền đường"),
        Record::new("B20", "Bê tông lót móng"),
        Record::new("C15", "Cốt thép móng"),
    ])
}

fn row(cells: &[(&str, &str)]) -> RawRow {
    cells
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ── Algorithms ───────────────────────────────────────────────────────────────

#[test]
fn normalize_is_idempotent_and_strips_marks() {
    for text in ["Đường", "  Bê   TÔNG  ", "M10A", "Ångström – 1½", ""] {
        let once = normalize(text);
        assert_eq!(normalize(&once), once, "not idempotent for {text:?}");
    }
    let road = normalize("Đường");
    assert_eq!(road, "duong");
    assert!(road.chars().all(|c| c.is_ascii()));
}

#[test]
fn identity_scores() {
    for text in ["", "a", "m10a", "dao dat"] {
        assert_eq!(levenshtein(text, text), 0);
        assert_eq!(levenshtein_similarity(text, text), 100);
        assert_eq!(jaro_winkler(text, text, 0.1), 100);
    }
}

// ── Structural tier ─────────────────────────────────────────────────────────

#[test]
fn exact_code_ranks_first() {
    let results = sample_engine().search("m10a", FieldScope::Both);
    assert_eq!(results[0].record.code(), "M10A");
    assert_eq!(results[0].score, 100);
    assert_eq!(results[0].match_type, MatchType::Exact);
    assert_eq!(results[0].algorithm, Algorithm::Exact);
}

#[test]
fn accentless_query_matches_description() {
    let results = sample_engine().search("dao dat", FieldScope::Both);
    assert_eq!(results[0].index, 0);
    assert_eq!(results[0].score, 100);
    assert_eq!(results[0].match_type, MatchType::Exact);
}

#[test]
fn word_hits_outrank_contains_hits() {
    let results = sample_engine().search("mong", FieldScope::DescriptionOnly);
    let found: Vec<(usize, u8)> = results.iter().map(|r| (r.index, r.score)).collect();
    assert_eq!(found[..2], [(2, 90), (3, 90)]);
}

#[test]
fn scope_limits_matched_fields() {
    let engine = sample_engine();
    assert!(engine
        .search("m10a", FieldScope::DescriptionOnly)
        .iter()
        .all(|r| r.match_type == MatchType::Fuzzy));
    assert!(engine.search("dao dat", FieldScope::CodeOnly).is_empty());
}

// ── Fuzzy tier ───────────────────────────────────────────────────────────────

#[test]
fn one_substitution_found_by_fuzzy_tier() {
    assert_eq!(levenshtein_similarity("m1oa", "m10a"), 75);

    let results = sample_engine().search("M1OA", FieldScope::Both);
    let hit = results
        .iter()
        .find(|r| r.record.code() == "M10A")
        .expect("M10A should be found");
    assert_eq!(hit.match_type, MatchType::Fuzzy);
    assert!(hit.score >= 75);
}

#[test]
fn simple_mode_skips_fuzzy_tier() {
    let engine = LookupEngine::with_config(
        vec![Record::new("M10A", "Đào đất")],
        EngineConfig::simple(),
    )
    .unwrap();
    assert!(engine.search("M1OA", FieldScope::Both).is_empty());
    assert_eq!(engine.search("M10A", FieldScope::Both).len(), 1);
}

/// `structural` rows whose description holds the word "dat", plus one row
/// ("DAX") that only fuzzy scoring reaches for the query "dat".
fn short_circuit_corpus(structural: usize) -> LookupEngine {
    let mut records: Vec<Record> = (0..structural)
        .map(|i| Record::new(format!("X{i}"), "Đào đất"))
        .collect();
    records.push(Record::new("DAX", ""));
    LookupEngine::new(records)
}

#[test]
fn fuzzy_tier_runs_below_short_circuit() {
    let engine = short_circuit_corpus(9);
    let results = engine.search("dat", FieldScope::Both);

    let structural = results
        .iter()
        .filter(|r| r.match_type != MatchType::Fuzzy)
        .count();
    assert_eq!(structural, 9);

    let fuzzy = results
        .iter()
        .find(|r| r.record.code() == "DAX")
        .expect("DAX should come from the fuzzy tier");
    assert_eq!(fuzzy.match_type, MatchType::Fuzzy);
    assert!(fuzzy.score >= 75);
}

#[test]
fn fuzzy_tier_skipped_at_short_circuit() {
    let engine = short_circuit_corpus(10);
    let results = engine.search("dat", FieldScope::Both);

    assert_eq!(results.len(), 10);
    assert!(results.iter().all(|r| r.match_type == MatchType::Word));
    assert!(results.iter().all(|r| r.record.code() != "DAX"));
}

#[test]
fn duplicate_rows_returned_once() {
    let engine = LookupEngine::new(vec![
        Record::new("M10A", "Đào đất"),
        Record::new("M10A", "Đào đất"),
        Record::new("M1OB", "Khác"),
    ]);
    let results = engine.search("m1oa", FieldScope::Both);
    let mut indices: Vec<usize> = results.iter().map(|r| r.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 2]);
}

// ── Empty input ──────────────────────────────────────────────────────────────

#[test]
fn empty_query_returns_all_rows() {
    let engine = sample_engine();
    for query in ["", "   ", "\t\n"] {
        let results = engine.search(query, FieldScope::Both);
        assert_eq!(results.len(), 4);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.index, i);
            assert_eq!(result.score, 100);
            assert_eq!(result.match_type, MatchType::All);
        }
    }
}

#[test]
fn empty_corpus_never_fails() {
    let engine = LookupEngine::new(Vec::new());
    assert!(engine.is_empty());
    for query in ["", "m10a", "dao dat", "*", "?"] {
        assert!(engine.search(query, FieldScope::Both).is_empty());
    }
    assert!(engine.suggestions("dao", 10).is_empty());
    assert_eq!(engine.stats().total_rows, 0);
}

// ── Result cap ───────────────────────────────────────────────────────────────

#[test]
fn structural_results_capped_at_1000() {
    let records: Vec<Record> = (0..3000)
        .map(|i| Record::new(format!("A{i}"), "Đào đất"))
        .collect();
    let engine = LookupEngine::new(records);

    let results = engine.search("dao dat", FieldScope::Both);
    assert_eq!(results.len(), 1000);
    assert!(results.windows(2).all(|w| w[0].index < w[1].index));

    assert_eq!(engine.search("", FieldScope::Both).len(), 1000);
}

#[test]
fn merged_results_capped_at_1000() {
    let records: Vec<Record> = (0..2000)
        .map(|i| Record::new(format!("ab{i:04}"), ""))
        .collect();
    let config = EngineConfig::default().with_fuzzy_threshold(0);
    let engine = LookupEngine::with_config(records, config).unwrap();

    let results = engine.search("abq", FieldScope::Both);
    assert_eq!(results.len(), 1000);
    assert!(results.iter().all(|r| r.match_type == MatchType::Fuzzy));
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

// ── Cache ────────────────────────────────────────────────────────────────────

#[test]
fn repeated_search_is_deterministic() {
    let engine = sample_engine();
    let first = engine.search("dat", FieldScope::Both);
    let second = engine.search("  DAT ", FieldScope::Both);
    assert_eq!(first, second);
    assert_eq!(engine.stats().cache_size, 1);

    engine.clear_cache();
    assert_eq!(engine.stats().cache_size, 0);

    let recomputed = engine.search("dat", FieldScope::Both);
    assert_eq!(first, recomputed);
    assert_eq!(engine.stats().cache_size, 1);
}

#[test]
fn engines_do_not_share_cache() {
    let a = sample_engine();
    let b = sample_engine();
    a.search("dat", FieldScope::Both);
    assert_eq!(a.stats().cache_size, 1);
    assert_eq!(b.stats().cache_size, 0);
}

#[test]
fn disabled_cache_stays_empty() {
    let config = EngineConfig::default().with_cache_capacity(Some(0));
    let engine = LookupEngine::with_config(vec![Record::new("M10A", "Đào đất")], config).unwrap();
    let first = engine.search("m10a", FieldScope::Both);
    assert_eq!(engine.search("m10a", FieldScope::Both), first);
    assert_eq!(engine.stats().cache_size, 0);
}

#[test]
fn concurrent_searches_agree() {
    let engine = Arc::new(sample_engine());
    let expected = engine.search("mong", FieldScope::Both);
    engine.clear_cache();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                s.spawn(move || engine.search("mong", FieldScope::Both))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

// ── Rows, suggestions, stats ─────────────────────────────────────────────────

#[test]
fn rows_resolved_through_aliases() {
    let rows = vec![
        row(&[("Mã hiệu", "M10A"), ("Tên công việc", "Đào đất"), ("Đơn vị", "m3")]),
        row(&[("MA HIEU", "B20"), ("Ten cong viec", "Bê tông")]),
        row(&[("Đơn vị", "kg")]),
    ];
    let engine = LookupEngine::from_rows(rows, EngineConfig::default()).unwrap();
    assert_eq!(engine.len(), 3);

    let results = engine.search("be tong", FieldScope::Both);
    assert_eq!(results[0].record.code(), "B20");

    let first = engine.record(0).unwrap();
    assert_eq!(first.get("Đơn vị"), Some("m3"));
    let bare = engine.record(2).unwrap();
    assert!(!bare.has_code());
    assert_eq!(bare.description(), "");
}

#[test]
fn custom_aliases() {
    let config = EngineConfig::default().with_aliases(FieldAliases::new(["SKU"], ["Label"]));
    let rows = vec![row(&[("sku", "X1"), ("label", "Widget")])];
    let engine = LookupEngine::from_rows(rows, config).unwrap();
    assert_eq!(engine.search("x1", FieldScope::CodeOnly)[0].score, 100);
}

#[test]
fn suggestions_return_original_text() {
    let engine = sample_engine();
    assert_eq!(
        engine.suggestions("dat", 10),
        vec!["Đào đất", "Đắp đất nền đường"]
    );
    assert_eq!(engine.suggestions("dat", 1), vec!["Đào đất"]);
    assert!(engine.suggestions("d", 10).is_empty());
}

#[test]
fn stats_reflect_index() {
    let engine = sample_engine();
    let stats = engine.stats();
    assert_eq!(stats.total_rows, 4);
    assert_eq!(stats.fuzzy_threshold, 75);
    assert_eq!(stats.exact_entries, 8);
    assert!(stats.word_entries > 0);
    assert!(stats.bigram_entries > 0);
    assert!(stats.trigram_entries > 0);
}

#[test]
fn results_serialize_to_json() {
    let results = sample_engine().search("m10a", FieldScope::Both);
    let json = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(json["match_type"], "exact");
    assert_eq!(json["algorithm"], "exact");
    assert_eq!(json["score"], 100);
    assert_eq!(json["record"]["code"], "M10A");
}

#[test]
fn invalid_config_rejected() {
    let config = EngineConfig {
        max_results: 0,
        ..Default::default()
    };
    let err = LookupEngine::with_config(Vec::new(), config).unwrap_err();
    assert!(err.to_string().contains("max_results"));
}
