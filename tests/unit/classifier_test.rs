//! Unit tests for implementation classification.

use fitquest::gamification::catalog;
use fitquest::gamification::classifier::{self, Implementation};

#[test]
fn test_known_examples() {
    assert!(classifier::is_implemented("Repas Complet"));
    assert_eq!(classifier::classify("Repas Complet"), Implementation::Implemented);

    assert!(!classifier::is_implementable("Hydratation Parfaite"));
    assert!(classifier::unimplementation_reason("Hydratation Parfaite").is_some());
    assert_eq!(
        classifier::classify("Hydratation Parfaite"),
        Implementation::Unimplementable
    );
}

#[test]
fn test_partition_covers_catalog_exactly_once() {
    let parts = classifier::partition();
    let total = parts.implemented.len() + parts.pending.len() + parts.unimplementable.len();
    assert_eq!(total, catalog::challenge_definitions().len());

    for def in &parts.implemented {
        assert!(classifier::is_implemented(&def.title));
        assert!(classifier::is_implementable(&def.title));
    }
    for def in &parts.pending {
        assert!(!classifier::is_implemented(&def.title));
        assert!(classifier::is_implementable(&def.title));
    }
    for def in &parts.unimplementable {
        assert!(!classifier::is_implementable(&def.title));
    }
}

#[test]
fn test_lists_are_disjoint() {
    for title in classifier::IMPLEMENTED_CHALLENGES {
        assert!(
            classifier::unimplementation_reason(title).is_none(),
            "{} is in both lists",
            title
        );
    }
}

#[test]
fn test_stats() {
    let stats = classifier::stats();
    assert_eq!(stats.total, catalog::challenge_definitions().len());
    assert_eq!(stats.implementable + stats.unimplementable, stats.total);
    assert!(stats.implemented <= stats.implementable);

    let expected = stats.implemented as f64 / stats.implementable as f64 * 100.0;
    assert!((stats.implementation_rate - expected).abs() < 1e-9);
}

#[test]
fn test_unknown_title_is_pending() {
    assert_eq!(classifier::classify("Défi Inventé"), Implementation::Pending);
    assert!(classifier::is_implementable("Défi Inventé"));
}

#[test]
fn test_lists_match_catalog() {
    assert!(classifier::catalog_drift().is_empty());
}
