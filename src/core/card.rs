//! Card types and definitions

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;

/// Discriminant of a card's kind, as stored in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    BaseCreature,
    Mutation,
    Evolution,
    Spell,
    Environment,
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardType::BaseCreature => "base_creature",
            CardType::Mutation => "mutation",
            CardType::Evolution => "evolution",
            CardType::Spell => "spell",
            CardType::Environment => "environment",
        };
        f.write_str(name)
    }
}

/// Attack / health / armor block shared by creatures and evolutions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub attack: i32,
    pub health: i32,
    #[serde(default)]
    pub armor: i32,
}

impl BaseStats {
    pub fn new(attack: i32, health: i32, armor: i32) -> Self {
        BaseStats {
            attack,
            health,
            armor,
        }
    }

    /// Look up a stat by its wire name
    pub fn stat_mut(&mut self, name: &str) -> Option<&mut i32> {
        match name {
            "attack" => Some(&mut self.attack),
            "health" => Some(&mut self.health),
            "armor" => Some(&mut self.armor),
            _ => None,
        }
    }

    /// Add each named delta; names that aren't stats are ignored
    pub fn apply_changes(&mut self, changes: &BTreeMap<String, i32>) {
        for (stat, delta) in changes {
            if let Some(value) = self.stat_mut(stat) {
                *value += delta;
            }
        }
    }
}

/// A single parameter of a procedural effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EffectValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl EffectValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            EffectValue::Int(v) => Some(*v as f64),
            EffectValue::Float(v) => Some(*v),
            EffectValue::Text(_) => None,
        }
    }
}

/// Randomized secondary effect attached to a mutation or an evolved creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProceduralModifier {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub effect: BTreeMap<String, EffectValue>,
}

impl ProceduralModifier {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        ProceduralModifier {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            effect: BTreeMap::new(),
        }
    }

    pub fn with_effect(mut self, key: impl Into<String>, value: EffectValue) -> Self {
        self.effect.insert(key.into(), value);
        self
    }

    /// Numeric effect parameter, if present
    pub fn number(&self, key: &str) -> Option<f64> {
        self.effect.get(key).and_then(EffectValue::as_f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureCard {
    pub stats: BaseStats,
    pub dna_slots: SmallVec<[String; 4]>,
    pub max_mutations: u32,
}

impl CreatureCard {
    pub fn has_slot(&self, slot: &str) -> bool {
        self.dna_slots.iter().any(|s| s == slot)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryEffect {
    #[serde(default)]
    pub stat_changes: BTreeMap<String, i32>,
    #[serde(default)]
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationCard {
    pub mutation_type: String,
    pub target_slot: String,
    #[serde(default)]
    pub primary_effect: PrimaryEffect,
    #[serde(default)]
    pub procedural_modifiers: Vec<ProceduralModifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionCard {
    pub required_mutations: Vec<String>,
    pub base_creature_type: String,
    pub evolved_stats: BaseStats,
    #[serde(default)]
    pub evolved_abilities: Vec<String>,
    #[serde(default)]
    pub procedural_traits: Vec<ProceduralModifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellTarget {
    Creature,
    Player,
    All,
    Environment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellEffect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healing: Option<i32>,
    pub target_type: SpellTarget,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellCard {
    pub effect: SpellEffect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalEffect {
    pub description: String,
    #[serde(default)]
    pub modifiers: BTreeMap<String, EffectValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptationRule {
    pub mutation_type: String,
    pub adapted_trait: ProceduralModifier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentCard {
    pub global_effect: GlobalEffect,
    #[serde(default)]
    pub adaptation_rules: Vec<AdaptationRule>,
}

/// Kind-specific payload, tagged by the card's `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardKind {
    BaseCreature(CreatureCard),
    Mutation(MutationCard),
    Evolution(EvolutionCard),
    Spell(SpellCard),
    Environment(EnvironmentCard),
}

/// A card definition
///
/// Cards are immutable catalog data. Hands, decks and creatures hold their own
/// copies, so a persisted game never depends on the catalog it was dealt from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub cost: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art_url: Option<String>,
    #[serde(flatten)]
    pub kind: CardKind,
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cost: u32,
        description: impl Into<String>,
        kind: CardKind,
    ) -> Self {
        Card {
            id: id.into(),
            name: name.into(),
            cost,
            description: description.into(),
            art_url: None,
            kind,
        }
    }

    pub fn card_type(&self) -> CardType {
        match self.kind {
            CardKind::BaseCreature(_) => CardType::BaseCreature,
            CardKind::Mutation(_) => CardType::Mutation,
            CardKind::Evolution(_) => CardType::Evolution,
            CardKind::Spell(_) => CardType::Spell,
            CardKind::Environment(_) => CardType::Environment,
        }
    }

    pub fn is_type(&self, card_type: CardType) -> bool {
        self.card_type() == card_type
    }

    pub fn as_creature(&self) -> Option<&CreatureCard> {
        match &self.kind {
            CardKind::BaseCreature(creature) => Some(creature),
            _ => None,
        }
    }

    pub fn as_mutation(&self) -> Option<&MutationCard> {
        match &self.kind {
            CardKind::Mutation(mutation) => Some(mutation),
            _ => None,
        }
    }

    pub fn as_evolution(&self) -> Option<&EvolutionCard> {
        match &self.kind {
            CardKind::Evolution(evolution) => Some(evolution),
            _ => None,
        }
    }
}
