//! End-to-end tests for key-deserializer resolution and conversion

use std::collections::HashMap;

use mapkey_core::{
    construct_all, construct_enum_key_deserializer, find_string_based_key_deserializer,
    CandidateRegistry, CreatorCandidate, EnumKey, EnumTable, KeyConversionError, KeyDeserializer,
    KeyType, PrimitiveKind,
};

#[derive(Debug, Clone, PartialEq)]
enum Currency {
    Usd,
    Eur,
}

impl EnumKey for Currency {
    fn symbols() -> EnumTable {
        EnumTable::builder::<Currency>()
            .constant("USD", Currency::Usd)
            .constant("EUR", Currency::Eur)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct InvoiceId(u64);

impl InvoiceId {
    fn new(raw: &str) -> Result<Self, std::num::ParseIntError> {
        raw.parse().map(InvoiceId)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CountryCode(String);

impl CountryCode {
    fn parse(raw: &str) -> Result<Self, String> {
        if raw.len() == 2 && raw.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(CountryCode(raw.to_string()))
        } else {
            Err(format!("'{raw}' is not a two-letter country code"))
        }
    }
}

enum Opaque {}

#[test]
fn test_builtin_registry_covers_every_primitive_key() {
    let registry = construct_all();

    assert_eq!(registry.len(), 8);
    assert_eq!(
        registry[&KeyType::of::<i32>()]
            .deserialize_key("42")
            .unwrap()
            .downcast::<i32>(),
        Some(42)
    );
    assert_eq!(
        registry[&KeyType::of::<bool>()]
            .deserialize_key("true")
            .unwrap()
            .downcast::<bool>(),
        Some(true)
    );
    assert_eq!(
        registry[&KeyType::of::<i8>()]
            .deserialize_key("-128")
            .unwrap()
            .downcast::<i8>(),
        Some(i8::MIN)
    );
    assert_eq!(
        registry[&KeyType::of::<f32>()]
            .deserialize_key("1.5")
            .unwrap()
            .downcast::<f32>(),
        Some(1.5)
    );
}

#[test]
fn test_builtin_construction_is_idempotent() {
    let first = construct_all();
    let second = construct_all();

    assert_eq!(first.len(), second.len());
    for key_type in first.keys() {
        assert!(second.contains_key(key_type));
    }
}

#[test]
fn test_primitive_values_round_trip_through_downcast() {
    let registry = construct_all();

    for kind in PrimitiveKind::ALL {
        let strategy = &registry[&kind.key_type()];
        let raw = match kind {
            PrimitiveKind::Bool => "false",
            PrimitiveKind::Char => "q",
            PrimitiveKind::F32 | PrimitiveKind::F64 => "3.25",
            _ => "17",
        };
        let value = strategy.deserialize_key(raw).unwrap();
        let recovered = match kind {
            PrimitiveKind::Bool => value.downcast::<bool>().map(|v| v.to_string()),
            PrimitiveKind::I8 => value.downcast::<i8>().map(|v| v.to_string()),
            PrimitiveKind::Char => value.downcast::<char>().map(|v| v.to_string()),
            PrimitiveKind::I16 => value.downcast::<i16>().map(|v| v.to_string()),
            PrimitiveKind::I32 => value.downcast::<i32>().map(|v| v.to_string()),
            PrimitiveKind::I64 => value.downcast::<i64>().map(|v| v.to_string()),
            PrimitiveKind::F32 => value.downcast::<f32>().map(|v| v.to_string()),
            PrimitiveKind::F64 => value.downcast::<f64>().map(|v| v.to_string()),
        };
        assert_eq!(recovered, Some(raw.to_string()), "round trip for {kind:?}");
    }
}

#[test]
fn test_primitive_edge_semantics() {
    let registry = construct_all();

    let boolean = &registry[&KeyType::of::<bool>()];
    assert!(boolean.deserialize_key("True").is_err());
    assert!(boolean.deserialize_key("1").is_err());

    let character = &registry[&KeyType::of::<char>()];
    assert!(character.deserialize_key("ab").is_err());
    assert!(character.deserialize_key("").is_err());

    let byte = &registry[&KeyType::of::<i8>()];
    let error = byte.deserialize_key("300").unwrap_err();
    assert!(matches!(error, KeyConversionError::InvalidLiteral { .. }));
    assert_eq!(error.input(), "300");
}

#[test]
fn test_enum_keys_resolve_constants() {
    let strategy = construct_enum_key_deserializer::<Currency>();

    assert_eq!(strategy.key_type(), KeyType::of::<Currency>());
    assert_eq!(
        strategy
            .deserialize_key("EUR")
            .unwrap()
            .downcast::<Currency>(),
        Some(Currency::Eur)
    );
}

#[test]
fn test_unknown_enum_key_reports_input_type_and_expected() {
    let strategy = construct_enum_key_deserializer::<Currency>();

    let error = strategy.deserialize_key("GBP").unwrap_err();
    assert!(matches!(error, KeyConversionError::UnknownVariant { .. }));
    assert_eq!(error.input(), "GBP");
    assert_eq!(error.key_type(), KeyType::of::<Currency>());

    let message = error.to_string();
    assert!(message.contains("\"USD\""));
    assert!(message.contains("\"EUR\""));
}

#[test]
fn test_case_insensitive_enum_tables_match_any_casing() {
    #[derive(Debug, Clone, PartialEq)]
    enum Relaxed {
        On,
    }

    impl EnumKey for Relaxed {
        fn symbols() -> EnumTable {
            EnumTable::builder::<Relaxed>()
                .case_insensitive()
                .constant("On", Relaxed::On)
                .build()
        }
    }

    let strategy = construct_enum_key_deserializer::<Relaxed>();
    for raw in ["On", "on", "ON"] {
        assert_eq!(
            strategy.deserialize_key(raw).unwrap().downcast::<Relaxed>(),
            Some(Relaxed::On)
        );
    }

    // Exact tables stay strict
    let exact = construct_enum_key_deserializer::<Currency>();
    assert!(exact.deserialize_key("usd").is_err());
}

#[test]
fn test_constructor_only_type_matches_direct_construction() {
    let candidates = CandidateRegistry::new();
    candidates.register_constructor(InvoiceId::new);

    let strategy = find_string_based_key_deserializer(&KeyType::of::<InvoiceId>(), &candidates)
        .expect("constructor registered");

    assert!(matches!(strategy, KeyDeserializer::Constructor(_)));
    assert_eq!(
        strategy
            .deserialize_key("9001")
            .unwrap()
            .downcast::<InvoiceId>(),
        Some(InvoiceId::new("9001").unwrap())
    );
}

#[test]
fn test_factory_only_type_matches_direct_factory_call() {
    let candidates = CandidateRegistry::new();
    candidates.register_factory("parse", CountryCode::parse);

    let strategy = find_string_based_key_deserializer(&KeyType::of::<CountryCode>(), &candidates)
        .expect("factory registered");

    assert!(matches!(strategy, KeyDeserializer::Factory(_)));
    assert_eq!(
        strategy
            .deserialize_key("DE")
            .unwrap()
            .downcast::<CountryCode>(),
        Some(CountryCode::parse("DE").unwrap())
    );
}

#[test]
fn test_constructor_wins_when_both_are_available() {
    let candidates = CandidateRegistry::new();
    candidates.register_factory("parse", |raw: &str| {
        raw.parse::<u64>().map(|n| InvoiceId(n + 1_000_000))
    });
    candidates.register_constructor(InvoiceId::new);

    let strategy = find_string_based_key_deserializer(&KeyType::of::<InvoiceId>(), &candidates)
        .expect("two candidates registered");

    assert!(matches!(strategy, KeyDeserializer::Constructor(_)));
    assert_eq!(
        strategy
            .deserialize_key("5")
            .unwrap()
            .downcast::<InvoiceId>(),
        Some(InvoiceId(5))
    );
}

#[test]
fn test_type_without_creators_resolves_to_none() {
    let candidates = CandidateRegistry::new();

    let resolved = find_string_based_key_deserializer(&KeyType::of::<Opaque>(), &candidates);
    assert!(resolved.is_none());
}

#[test]
fn test_ignored_constructor_is_skipped() {
    let candidates = CandidateRegistry::new();
    candidates.register(CreatorCandidate::constructor(InvoiceId::new).ignored());
    candidates.register_factory("parse", |raw: &str| raw.parse::<u64>().map(InvoiceId));

    let strategy = find_string_based_key_deserializer(&KeyType::of::<InvoiceId>(), &candidates)
        .expect("factory still qualifies");
    assert!(matches!(strategy, KeyDeserializer::Factory(_)));

    let all_ignored = CandidateRegistry::new();
    all_ignored.register(CreatorCandidate::constructor(InvoiceId::new).ignored());
    assert!(
        find_string_based_key_deserializer(&KeyType::of::<InvoiceId>(), &all_ignored).is_none()
    );
}

#[test]
fn test_designated_factory_wins_despite_unconventional_name() {
    let candidates = CandidateRegistry::new();
    candidates.register_factory("parse", CountryCode::parse);
    candidates.register(
        CreatorCandidate::factory("wire_decode", CountryCode::parse).designated(),
    );

    let strategy = find_string_based_key_deserializer(&KeyType::of::<CountryCode>(), &candidates)
        .expect("two factories registered");

    match strategy {
        KeyDeserializer::Factory(handle) => assert_eq!(handle.name(), "wire_decode"),
        other => panic!("expected factory, got {other:?}"),
    }
}

#[test]
fn test_creator_failure_surfaces_input_type_and_source() {
    let candidates = CandidateRegistry::new();
    candidates.register_factory("parse", CountryCode::parse);

    let strategy = find_string_based_key_deserializer(&KeyType::of::<CountryCode>(), &candidates)
        .expect("factory registered");

    let error = strategy.deserialize_key("deutschland").unwrap_err();
    assert!(matches!(error, KeyConversionError::CreatorFailed { .. }));
    assert_eq!(error.input(), "deutschland");
    assert_eq!(error.key_type(), KeyType::of::<CountryCode>());

    let source = std::error::Error::source(&error).expect("wrapped source");
    assert!(source.to_string().contains("two-letter"));
}

#[test]
fn test_host_resolution_order_over_all_three_paths() {
    let builtins = construct_all();
    let candidates = CandidateRegistry::new();
    candidates.register_constructor(InvoiceId::new);

    // Primitive key: served by the built-in registry
    let int_key = KeyType::of::<i64>();
    let strategy = builtins
        .get(&int_key)
        .expect("primitive keys are built in");
    assert_eq!(
        strategy.deserialize_key("-9").unwrap().downcast::<i64>(),
        Some(-9)
    );

    // Enum key: registry miss, served by the enum path
    let enum_key = KeyType::of::<Currency>();
    assert!(!builtins.contains_key(&enum_key));
    let strategy = construct_enum_key_deserializer::<Currency>();
    assert_eq!(
        strategy
            .deserialize_key("USD")
            .unwrap()
            .downcast::<Currency>(),
        Some(Currency::Usd)
    );

    // Domain key: registry miss, not an enum, served by dynamic resolution
    let domain_key = KeyType::of::<InvoiceId>();
    assert!(!builtins.contains_key(&domain_key));
    let strategy = find_string_based_key_deserializer(&domain_key, &candidates)
        .expect("constructor registered");
    assert_eq!(
        strategy
            .deserialize_key("3")
            .unwrap()
            .downcast::<InvoiceId>(),
        Some(InvoiceId(3))
    );

    // Unknown key: every path declines, host decides what that means
    let unknown = KeyType::of::<Opaque>();
    assert!(!builtins.contains_key(&unknown));
    assert!(find_string_based_key_deserializer(&unknown, &candidates).is_none());
}

#[test]
fn test_resolved_strategies_are_shareable_across_threads() {
    let registry = std::sync::Arc::new(construct_all());

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let registry = std::sync::Arc::clone(&registry);
            scope.spawn(move || {
                let strategy = &registry[&KeyType::of::<i32>()];
                for n in 0..100 {
                    let value = strategy.deserialize_key(&n.to_string()).unwrap();
                    assert_eq!(value.downcast::<i32>(), Some(n));
                }
            });
        }
    });
}

#[test]
fn test_reconstructing_a_string_keyed_map() {
    let wire: HashMap<String, &str> = HashMap::from([
        ("1".to_string(), "one"),
        ("2".to_string(), "two"),
        ("3".to_string(), "three"),
    ]);

    let registry = construct_all();
    let strategy = &registry[&KeyType::of::<i32>()];

    let mut typed: HashMap<i32, &str> = HashMap::new();
    for (raw_key, value) in wire {
        let key = strategy
            .deserialize_key(&raw_key)
            .unwrap()
            .downcast::<i32>()
            .unwrap();
        typed.insert(key, value);
    }

    assert_eq!(typed[&1], "one");
    assert_eq!(typed[&2], "two");
    assert_eq!(typed[&3], "three");
}
