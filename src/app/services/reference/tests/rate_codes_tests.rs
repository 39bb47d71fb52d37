//! Tests for rate-code resolution and the fallback asymmetry

use crate::app::services::reference::RateCodeRegistry;
use crate::app::services::reference::rate_codes::RateCodeResolution;

#[test]
fn test_registry_contains_fixed_enumeration() {
    let registry = RateCodeRegistry::default();
    assert_eq!(registry.len(), 6);
    for id in 1..=6 {
        assert!(registry.contains(id), "rate code {id}");
    }
    assert!(!registry.contains(0));
    assert!(!registry.contains(7));

    let descriptions: Vec<&str> = registry
        .codes()
        .iter()
        .map(|c| c.description.as_str())
        .collect();
    assert_eq!(descriptions[0], "Standard rate");
    assert_eq!(descriptions[1], "JFK");
}

#[test]
fn test_known_code_resolves_to_itself() {
    let registry = RateCodeRegistry::default();
    let resolution = registry.resolve(Some(3));
    assert_eq!(resolution, RateCodeResolution::Known(3));
    assert_eq!(resolution.code(), 3);
    assert!(!resolution.is_fallback());
}

#[test]
fn test_unknown_code_falls_back_never_rejects() {
    let registry = RateCodeRegistry::default();

    let resolution = registry.resolve(Some(99));
    assert_eq!(resolution, RateCodeResolution::Fallback(1));
    assert!(resolution.is_fallback());

    let resolution = registry.resolve(None);
    assert_eq!(resolution, RateCodeResolution::Fallback(1));
    assert_eq!(resolution.code(), 1);
}
