//! Built-in word lists for realistic-looking text.
//!
//! The synthesis engine does not consult these lists; they back the
//! `vocabulary` CLI command and callers that want names instead of random
//! letters.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Source of realistic values, one method per category. Every method
/// returns exactly `count` items drawn with replacement.
pub trait VocabularyProvider {
    fn first_names(&mut self, count: usize) -> Vec<String>;
    fn last_names(&mut self, count: usize) -> Vec<String>;
    fn cities(&mut self, count: usize) -> Vec<String>;
    fn professions(&mut self, count: usize) -> Vec<String>;
    fn emails(&mut self, count: usize) -> Vec<String>;
    fn phone_numbers(&mut self, count: usize) -> Vec<String>;
    fn product_names(&mut self, count: usize) -> Vec<String>;
    fn company_names(&mut self, count: usize) -> Vec<String>;
}

const FIRST_NAMES: &[&str] = &[
    "Jean", "Marie", "Pierre", "Paul", "Jacques", "Philippe", "Michel", "Alain", "André",
    "Bernard", "Claude", "Daniel", "Henri", "Louis", "Robert", "Roger", "Marcel", "Maurice",
    "René", "Georges", "Julien", "François", "Antoine", "Camille", "Sophie", "Isabelle",
    "Catherine", "Sylvie", "Françoise", "Monique", "Nathalie", "Valérie", "Sandrine", "Céline",
    "Stéphanie", "Laurence", "Martine", "Brigitte", "Chantal", "Nicole", "Véronique",
    "Dominique", "Pascale", "Corinne",
];

const LAST_NAMES: &[&str] = &[
    "Martin", "Bernard", "Thomas", "Petit", "Robert", "Richard", "Durand", "Dubois", "Moreau",
    "Laurent", "Simon", "Michel", "Lefebvre", "Leroy", "Roux", "David", "Bertrand", "Morel",
    "Fournier", "Girard", "Bonnet", "Dupont", "Lambert", "Fontaine", "Rousseau", "Vincent",
    "Muller", "Lefevre", "Faure", "Andre", "Mercier", "Blanc", "Guerin", "Boyer", "Garnier",
    "Chevalier", "Francois", "Legrand", "Gauthier", "Garcia", "Perrin", "Robin", "Clement",
    "Morin",
];

const CITIES: &[&str] = &[
    "Paris", "Marseille", "Lyon", "Toulouse", "Nice", "Nantes", "Strasbourg", "Montpellier",
    "Bordeaux", "Lille", "Rennes", "Reims", "Le Havre", "Saint-Étienne", "Toulon", "Grenoble",
    "Dijon", "Angers", "Nîmes", "Villeurbanne", "Saint-Denis", "Le Mans", "Aix-en-Provence",
    "Clermont-Ferrand", "Brest", "Limoges", "Tours", "Amiens", "Perpignan", "Metz",
    "Besançon", "Boulogne-Billancourt", "Orléans", "Mulhouse", "Rouen", "Pau", "Caen",
    "La Rochelle", "Nancy", "Argenteuil",
];

const PROFESSIONS: &[&str] = &[
    "Développeur", "Ingénieur", "Médecin", "Professeur", "Avocat", "Architecte", "Comptable",
    "Designer", "Consultant", "Manager", "Technicien", "Infirmier", "Pharmacien", "Dentiste",
    "Vétérinaire", "Journaliste", "Photographe", "Cuisinier", "Mécanicien", "Électricien",
    "Plombier", "Menuisier", "Maçon", "Vendeur", "Commercial", "Marketing", "RH", "Finance",
    "Logistique", "Secrétaire", "Assistant", "Directeur", "Chef de projet", "Analyste",
    "Chercheur", "Scientifique", "Artiste", "Musicien", "Écrivain", "Traducteur",
];

const COMPANY_NAMES: &[&str] = &[
    "TechCorp", "InnovSoft", "DataSolutions", "WebServices", "CloudTech", "DigitalFirst",
    "SmartSystems", "FutureTech", "NextGen", "ProActive", "GlobalTech", "MegaCorp",
    "UltraSoft", "PowerSystems", "EliteTech", "PrimeSoft", "AlphaTech", "BetaSystems",
    "GammaCorp", "DeltaSoft", "EpsilonTech", "ZetaSystems", "EtaCorp", "ThetaSoft", "IotaTech",
];

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Super", "Ultra", "Mega", "Pro", "Premium", "Elite", "Smart", "Advanced",
];

const PRODUCT_NOUNS: &[&str] = &[
    "Widget", "Gadget", "Tool", "Device", "System", "Solution", "Platform", "Service",
];

const EMAIL_DOMAIN: &str = "example.com";
const PHONE_MIN: u32 = 100_000_000;
const PHONE_MAX: u32 = 999_999_999;

/// Provider backed by fixed French-flavoured word lists.
#[derive(Debug, Clone)]
pub struct StaticVocabulary {
    rng: ChaCha8Rng,
}

impl StaticVocabulary {
    pub fn new() -> Self {
        Self::seeded(rand::rng().random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw `count` items of one category.
    pub fn sample(&mut self, category: VocabularyCategory, count: usize) -> Vec<String> {
        match category {
            VocabularyCategory::FirstNames => self.first_names(count),
            VocabularyCategory::LastNames => self.last_names(count),
            VocabularyCategory::Cities => self.cities(count),
            VocabularyCategory::Professions => self.professions(count),
            VocabularyCategory::Emails => self.emails(count),
            VocabularyCategory::PhoneNumbers => self.phone_numbers(count),
            VocabularyCategory::ProductNames => self.product_names(count),
            VocabularyCategory::CompanyNames => self.company_names(count),
        }
    }

    fn pick(&mut self, source: &'static [&'static str]) -> &'static str {
        source[self.rng.random_range(0..source.len())]
    }

    fn pick_many(&mut self, source: &'static [&'static str], count: usize) -> Vec<String> {
        (0..count).map(|_| self.pick(source).to_string()).collect()
    }
}

impl Default for StaticVocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabularyProvider for StaticVocabulary {
    fn first_names(&mut self, count: usize) -> Vec<String> {
        self.pick_many(FIRST_NAMES, count)
    }

    fn last_names(&mut self, count: usize) -> Vec<String> {
        self.pick_many(LAST_NAMES, count)
    }

    fn cities(&mut self, count: usize) -> Vec<String> {
        self.pick_many(CITIES, count)
    }

    fn professions(&mut self, count: usize) -> Vec<String> {
        self.pick_many(PROFESSIONS, count)
    }

    fn emails(&mut self, count: usize) -> Vec<String> {
        (0..count)
            .map(|_| format!("{}@{EMAIL_DOMAIN}", self.pick(FIRST_NAMES).to_lowercase()))
            .collect()
    }

    fn phone_numbers(&mut self, count: usize) -> Vec<String> {
        (0..count)
            .map(|_| format_phone(self.rng.random_range(PHONE_MIN..PHONE_MAX)))
            .collect()
    }

    fn product_names(&mut self, count: usize) -> Vec<String> {
        (0..count)
            .map(|_| {
                let adjective = self.pick(PRODUCT_ADJECTIVES);
                let noun = self.pick(PRODUCT_NOUNS);
                format!("{adjective} {noun}")
            })
            .collect()
    }

    fn company_names(&mut self, count: usize) -> Vec<String> {
        self.pick_many(COMPANY_NAMES, count)
    }
}

/// `0D DD DD DD DD` from a nine-digit number.
fn format_phone(number: u32) -> String {
    let digits = number.to_string();
    format!(
        "0{} {} {} {} {}",
        &digits[0..1],
        &digits[1..3],
        &digits[3..5],
        &digits[5..7],
        &digits[7..9]
    )
}

/// Named vocabulary categories, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyCategory {
    FirstNames,
    LastNames,
    Cities,
    Professions,
    Emails,
    PhoneNumbers,
    ProductNames,
    CompanyNames,
}

impl VocabularyCategory {
    pub const ALL: &'static [VocabularyCategory] = &[
        VocabularyCategory::FirstNames,
        VocabularyCategory::LastNames,
        VocabularyCategory::Cities,
        VocabularyCategory::Professions,
        VocabularyCategory::Emails,
        VocabularyCategory::PhoneNumbers,
        VocabularyCategory::ProductNames,
        VocabularyCategory::CompanyNames,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VocabularyCategory::FirstNames => "first_names",
            VocabularyCategory::LastNames => "last_names",
            VocabularyCategory::Cities => "cities",
            VocabularyCategory::Professions => "professions",
            VocabularyCategory::Emails => "emails",
            VocabularyCategory::PhoneNumbers => "phone_numbers",
            VocabularyCategory::ProductNames => "product_names",
            VocabularyCategory::CompanyNames => "company_names",
        }
    }
}

impl fmt::Display for VocabularyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VocabularyCategory {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        VocabularyCategory::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| {
                GenerationError::InvalidArgument(format!("unknown vocabulary category '{value}'"))
            })
    }
}
