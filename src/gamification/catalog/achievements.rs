//! Achievement definitions.

use crate::gamification::types::{AchievementDefinition, AchievementType, Rarity};

/// Get all achievement definitions
pub fn all_achievements() -> Vec<AchievementDefinition> {
    let mut achievements = Vec::new();

    achievements.extend(milestone_achievements());
    achievements.extend(streak_achievements());
    achievements.extend(performance_achievements());
    achievements.extend(special_achievements());

    achievements
}

fn achievement(
    achievement_type: AchievementType,
    name: &str,
    description: &str,
    icon: &str,
    rarity: Rarity,
    xp_reward: u32,
    condition: &str,
) -> AchievementDefinition {
    AchievementDefinition {
        achievement_type,
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        rarity,
        xp_reward,
        condition: condition.to_string(),
    }
}

fn milestone_achievements() -> Vec<AchievementDefinition> {
    vec![
        achievement(
            AchievementType::Milestone,
            "Premier Pas",
            "Votre tout premier repas enregistré",
            "🌱",
            Rarity::Common,
            50,
            "Enregistrer 1 repas",
        ),
        achievement(
            AchievementType::Milestone,
            "Centurion des Repas",
            "Cent repas enregistrés",
            "🍱",
            Rarity::Rare,
            200,
            "Enregistrer 100 repas au total",
        ),
        achievement(
            AchievementType::Milestone,
            "Athlète Confirmé",
            "Cinquante entraînements au compteur",
            "🏋️",
            Rarity::Epic,
            500,
            "Compléter 50 entraînements au total",
        ),
        achievement(
            AchievementType::Milestone,
            "Défi Relevé",
            "Votre premier défi terminé",
            "🎯",
            Rarity::Common,
            100,
            "Terminer 1 défi",
        ),
        achievement(
            AchievementType::Milestone,
            "Collectionneur",
            "Dix défis terminés",
            "🗂️",
            Rarity::Rare,
            300,
            "Terminer 10 défis",
        ),
        achievement(
            AchievementType::Milestone,
            "Niveau 5",
            "Vous progressez vite",
            "🚀",
            Rarity::Rare,
            250,
            "Atteindre le niveau 5",
        ),
    ]
}

fn streak_achievements() -> Vec<AchievementDefinition> {
    vec![
        achievement(
            AchievementType::Streak,
            "Régulier",
            "Une semaine sans interruption",
            "📆",
            Rarity::Common,
            100,
            "Enregistrer une activité 7 jours consécutifs",
        ),
        achievement(
            AchievementType::Streak,
            "Inarrêtable",
            "Un mois sans interruption",
            "⚡",
            Rarity::Rare,
            400,
            "Enregistrer une activité 30 jours consécutifs",
        ),
        achievement(
            AchievementType::Streak,
            "Discipline de Fer",
            "Cent jours sans interruption",
            "🛡️",
            Rarity::Legendary,
            2000,
            "Enregistrer une activité 100 jours consécutifs",
        ),
    ]
}

fn performance_achievements() -> Vec<AchievementDefinition> {
    vec![
        achievement(
            AchievementType::Performance,
            "Record Personnel",
            "Vous avez battu votre record",
            "📈",
            Rarity::Rare,
            200,
            "Battre un record personnel sur un exercice",
        ),
        achievement(
            AchievementType::Performance,
            "Volume Monstre",
            "Une séance hors norme",
            "🦍",
            Rarity::Epic,
            600,
            "Soulever 10 000 kg en une seule séance",
        ),
        achievement(
            AchievementType::Performance,
            "Objectif Atteint",
            "Le poids cible est atteint",
            "🎉",
            Rarity::Epic,
            1000,
            "Atteindre le poids objectif fixé avec votre coach",
        ),
    ]
}

fn special_achievements() -> Vec<AchievementDefinition> {
    vec![
        achievement(
            AchievementType::Special,
            "Lève-Tôt",
            "Entraînement à l'aube",
            "🌅",
            Rarity::Common,
            75,
            "Enregistrer un entraînement avant 7h",
        ),
        achievement(
            AchievementType::Special,
            "Oiseau de Nuit",
            "Entraînement tardif",
            "🦉",
            Rarity::Common,
            75,
            "Enregistrer un entraînement après 22h",
        ),
        achievement(
            AchievementType::Special,
            "Fidèle au Coach",
            "Un mois entier de plan respecté",
            "🤝",
            Rarity::Epic,
            800,
            "Suivre le plan diététique du coach pendant un mois complet",
        ),
        achievement(
            AchievementType::Special,
            "Légende",
            "Tous les défis légendaires terminés",
            "👑",
            Rarity::Legendary,
            5000,
            "Terminer chaque défi de difficulté légendaire",
        ),
    ]
}
