//! Challenge definitions.

use crate::gamification::types::{
    ChallengeCategory, ChallengeDefinition, ChallengeType, Difficulty,
};

/// Get all challenge definitions
pub fn all_challenges() -> Vec<ChallengeDefinition> {
    let mut challenges = Vec::new();

    challenges.extend(nutrition_challenges());
    challenges.extend(training_challenges());
    challenges.extend(streak_challenges());
    challenges.extend(social_challenges());
    challenges.extend(special_challenges());

    challenges
}

#[allow(clippy::too_many_arguments)]
fn challenge(
    challenge_type: ChallengeType,
    title: &str,
    description: &str,
    icon: &str,
    category: ChallengeCategory,
    target: f64,
    unit: &str,
    xp_reward: u32,
    is_repeatable: bool,
    difficulty: Difficulty,
) -> ChallengeDefinition {
    ChallengeDefinition {
        challenge_type,
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        category,
        target,
        unit: unit.to_string(),
        xp_reward,
        is_repeatable,
        difficulty,
    }
}

fn nutrition_challenges() -> Vec<ChallengeDefinition> {
    use ChallengeCategory::*;
    vec![
        challenge(
            ChallengeType::Nutrition,
            "Repas Complet",
            "Enregistrer 3 repas dans la journée",
            "🍽️",
            Daily,
            3.0,
            "repas",
            50,
            true,
            Difficulty::Easy,
        ),
        challenge(
            ChallengeType::Nutrition,
            "Hydratation Parfaite",
            "Boire 2 litres d'eau dans la journée",
            "💧",
            Daily,
            2.0,
            "litres",
            50,
            true,
            Difficulty::Easy,
        ),
        challenge(
            ChallengeType::Nutrition,
            "Petit-Déjeuner Champion",
            "Enregistrer un petit-déjeuner avant 10h",
            "🥐",
            Daily,
            1.0,
            "repas",
            30,
            true,
            Difficulty::Easy,
        ),
        challenge(
            ChallengeType::Nutrition,
            "Objectif Protéines",
            "Atteindre votre objectif quotidien de protéines",
            "🥩",
            Daily,
            1.0,
            "jour",
            60,
            true,
            Difficulty::Medium,
        ),
        challenge(
            ChallengeType::Nutrition,
            "Cinq Fruits et Légumes",
            "Consommer 5 portions de fruits et légumes dans la journée",
            "🍎",
            Daily,
            5.0,
            "portions",
            60,
            true,
            Difficulty::Medium,
        ),
        challenge(
            ChallengeType::Nutrition,
            "Semaine Équilibrée",
            "Enregistrer 3 repas par jour pendant 7 jours",
            "🥗",
            Weekly,
            21.0,
            "repas",
            200,
            true,
            Difficulty::Medium,
        ),
        challenge(
            ChallengeType::Nutrition,
            "Zéro Sucre Ajouté",
            "Éviter tout aliment avec sucre ajouté pendant 7 jours",
            "🚫",
            Weekly,
            7.0,
            "jours",
            300,
            true,
            Difficulty::Hard,
        ),
        challenge(
            ChallengeType::Nutrition,
            "Maître des Macros",
            "Respecter vos objectifs de macronutriments 20 jours dans le mois",
            "📊",
            Monthly,
            20.0,
            "jours",
            500,
            true,
            Difficulty::Hard,
        ),
    ]
}

fn training_challenges() -> Vec<ChallengeDefinition> {
    use ChallengeCategory::*;
    vec![
        challenge(
            ChallengeType::Training,
            "Première Séance",
            "Enregistrer votre premier entraînement",
            "🏋️",
            Special,
            1.0,
            "séance",
            100,
            false,
            Difficulty::Easy,
        ),
        challenge(
            ChallengeType::Training,
            "Séance du Jour",
            "Compléter un entraînement aujourd'hui",
            "💪",
            Daily,
            1.0,
            "séance",
            40,
            true,
            Difficulty::Easy,
        ),
        challenge(
            ChallengeType::Training,
            "10 000 Pas",
            "Marcher 10 000 pas dans la journée",
            "👟",
            Daily,
            10_000.0,
            "pas",
            50,
            true,
            Difficulty::Medium,
        ),
        challenge(
            ChallengeType::Training,
            "Guerrier de la Semaine",
            "Compléter 4 entraînements cette semaine",
            "🔥",
            Weekly,
            4.0,
            "séances",
            250,
            true,
            Difficulty::Medium,
        ),
        challenge(
            ChallengeType::Training,
            "Cardio Addict",
            "Cumuler 150 minutes de cardio dans la semaine",
            "🏃",
            Weekly,
            150.0,
            "minutes",
            250,
            true,
            Difficulty::Medium,
        ),
        challenge(
            ChallengeType::Training,
            "Marathon Mensuel",
            "Compléter 16 entraînements dans le mois",
            "🏅",
            Monthly,
            16.0,
            "séances",
            600,
            true,
            Difficulty::Hard,
        ),
        challenge(
            ChallengeType::Training,
            "Force Brute",
            "Soulever un volume total de 50 000 kg dans le mois",
            "🦾",
            Monthly,
            50_000.0,
            "kg",
            700,
            true,
            Difficulty::Legendary,
        ),
    ]
}

fn streak_challenges() -> Vec<ChallengeDefinition> {
    use ChallengeCategory::*;
    vec![
        challenge(
            ChallengeType::Streak,
            "Série de 3 Jours",
            "Enregistrer une activité 3 jours consécutifs",
            "📅",
            Weekly,
            3.0,
            "jours",
            100,
            true,
            Difficulty::Easy,
        ),
        challenge(
            ChallengeType::Streak,
            "Journal Quotidien",
            "Écrire dans votre journal 7 jours de suite",
            "📓",
            Weekly,
            7.0,
            "jours",
            200,
            true,
            Difficulty::Medium,
        ),
        challenge(
            ChallengeType::Streak,
            "Semaine Parfaite",
            "Enregistrer repas et entraînement 7 jours d'affilée",
            "⭐",
            Weekly,
            7.0,
            "jours",
            350,
            true,
            Difficulty::Hard,
        ),
        challenge(
            ChallengeType::Streak,
            "Mois de Fer",
            "Enregistrer une activité 30 jours consécutifs",
            "🏆",
            Monthly,
            30.0,
            "jours",
            1000,
            true,
            Difficulty::Legendary,
        ),
    ]
}

fn social_challenges() -> Vec<ChallengeDefinition> {
    use ChallengeCategory::*;
    vec![
        challenge(
            ChallengeType::Social,
            "Coach Connecté",
            "Recevoir un premier commentaire de votre coach",
            "💬",
            Special,
            1.0,
            "commentaire",
            100,
            false,
            Difficulty::Easy,
        ),
        challenge(
            ChallengeType::Social,
            "Partage de Progrès",
            "Partager 3 résultats avec votre coach dans la semaine",
            "🤝",
            Weekly,
            3.0,
            "partages",
            150,
            true,
            Difficulty::Easy,
        ),
        challenge(
            ChallengeType::Social,
            "Esprit d'Équipe",
            "Participer à un défi de groupe",
            "👥",
            Monthly,
            1.0,
            "défi",
            300,
            true,
            Difficulty::Medium,
        ),
    ]
}

fn special_challenges() -> Vec<ChallengeDefinition> {
    use ChallengeCategory::*;
    vec![
        challenge(
            ChallengeType::Special,
            "Nuit Réparatrice",
            "Dormir au moins 8 heures",
            "😴",
            Daily,
            8.0,
            "heures",
            40,
            true,
            Difficulty::Easy,
        ),
        challenge(
            ChallengeType::Special,
            "Plan Suivi",
            "Suivre le plan diététique de votre coach 5 jours dans la semaine",
            "📋",
            Weekly,
            5.0,
            "jours",
            300,
            true,
            Difficulty::Medium,
        ),
        challenge(
            ChallengeType::Special,
            "Mensurations Régulières",
            "Enregistrer vos mensurations 4 fois dans le mois",
            "📏",
            Monthly,
            4.0,
            "mesures",
            200,
            true,
            Difficulty::Easy,
        ),
        challenge(
            ChallengeType::Special,
            "Transformation",
            "Perdre 2 kg par rapport à votre première pesée",
            "🦋",
            Special,
            2.0,
            "kg",
            800,
            false,
            Difficulty::Hard,
        ),
        challenge(
            ChallengeType::Special,
            "Légende FitQuest",
            "Atteindre le niveau 10",
            "👑",
            Special,
            10.0,
            "niveau",
            2000,
            false,
            Difficulty::Legendary,
        ),
    ]
}
