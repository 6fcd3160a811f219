//! Which catalog challenges can be tracked automatically.
//!
//! Challenges are matched by title against two lists kept next to the catalog.
//! Anything in neither list is implementable but not yet automated.

use serde::Serialize;

use super::catalog;
use super::types::ChallengeDefinition;

/// Titles whose progress is computed from activity the app already records.
pub const IMPLEMENTED_CHALLENGES: &[&str] = &[
    "Repas Complet",
    "Petit-Déjeuner Champion",
    "Objectif Protéines",
    "Semaine Équilibrée",
    "Première Séance",
    "Séance du Jour",
    "Guerrier de la Semaine",
    "Marathon Mensuel",
    "Série de 3 Jours",
    "Journal Quotidien",
    "Coach Connecté",
    "Mensurations Régulières",
];

/// Titles that cannot be tracked with the data the app collects, with the reason.
pub const UNIMPLEMENTABLE_CHALLENGES: &[(&str, &str)] = &[
    (
        "Hydratation Parfaite",
        "Nécessite le suivi de l'hydratation, qui n'est pas encore collecté",
    ),
    (
        "Cinq Fruits et Légumes",
        "Les portions de fruits et légumes ne sont pas distinguées dans les repas",
    ),
    (
        "Zéro Sucre Ajouté",
        "La teneur en sucres ajoutés des aliments n'est pas connue",
    ),
    (
        "10 000 Pas",
        "Aucun podomètre ni source de nombre de pas n'est connecté",
    ),
    (
        "Partage de Progrès",
        "Le partage de résultats avec le coach n'existe pas dans l'application",
    ),
    (
        "Esprit d'Équipe",
        "Les défis de groupe ne sont pas pris en charge",
    ),
    ("Nuit Réparatrice", "Le sommeil n'est pas enregistré"),
];

/// Classification of a single title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Implementation {
    /// Tracked automatically
    Implemented,
    /// Could be tracked, not automated yet
    Pending,
    /// Cannot be tracked with current data
    Unimplementable,
}

pub fn is_implemented(title: &str) -> bool {
    IMPLEMENTED_CHALLENGES.contains(&title)
}

/// True unless the title is explicitly listed as unimplementable.
pub fn is_implementable(title: &str) -> bool {
    unimplementation_reason(title).is_none()
}

pub fn unimplementation_reason(title: &str) -> Option<&'static str> {
    UNIMPLEMENTABLE_CHALLENGES
        .iter()
        .find(|(t, _)| *t == title)
        .map(|(_, reason)| *reason)
}

pub fn classify(title: &str) -> Implementation {
    if is_implemented(title) {
        Implementation::Implemented
    } else if !is_implementable(title) {
        Implementation::Unimplementable
    } else {
        Implementation::Pending
    }
}

/// Catalog challenges split by classification, in catalog order.
#[derive(Debug, Default, Clone)]
pub struct ImplementationPartition {
    pub implemented: Vec<&'static ChallengeDefinition>,
    pub pending: Vec<&'static ChallengeDefinition>,
    pub unimplementable: Vec<&'static ChallengeDefinition>,
}

pub fn partition() -> ImplementationPartition {
    let mut result = ImplementationPartition::default();
    for def in catalog::challenge_definitions() {
        match classify(&def.title) {
            Implementation::Implemented => result.implemented.push(def),
            Implementation::Pending => result.pending.push(def),
            Implementation::Unimplementable => result.unimplementable.push(def),
        }
    }
    result
}

/// Aggregate counts over the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImplementationStats {
    pub total: usize,
    pub implemented: usize,
    pub implementable: usize,
    pub unimplementable: usize,
    /// Share of implementable challenges that are implemented (0..100)
    pub implementation_rate: f64,
}

pub fn stats() -> ImplementationStats {
    let definitions = catalog::challenge_definitions();
    let total = definitions.len();
    let implemented = definitions
        .iter()
        .filter(|d| is_implemented(&d.title))
        .count();
    let implementable = definitions
        .iter()
        .filter(|d| is_implementable(&d.title))
        .count();

    let implementation_rate = if implementable == 0 {
        0.0
    } else {
        implemented as f64 / implementable as f64 * 100.0
    };

    ImplementationStats {
        total,
        implemented,
        implementable,
        unimplementable: total - implementable,
        implementation_rate,
    }
}

/// Titles in either list that no catalog definition carries.
///
/// These silently never match; a non-empty result usually means a title was
/// renamed in the catalog but not here.
pub fn catalog_drift() -> Vec<&'static str> {
    let drift: Vec<&'static str> = IMPLEMENTED_CHALLENGES
        .iter()
        .copied()
        .chain(UNIMPLEMENTABLE_CHALLENGES.iter().map(|(t, _)| *t))
        .filter(|title| catalog::find_challenge(title).is_none())
        .collect();

    for title in &drift {
        tracing::warn!("Classifier lists '{}' which is not in the catalog", title);
    }
    drift
}
