//! Built-in sample card set

use crate::core::{
    BaseStats, Card, CardKind, CreatureCard, EffectValue, EvolutionCard, MutationCard,
    PrimaryEffect, ProceduralModifier,
};
use smallvec::smallvec;
use std::collections::BTreeMap;

pub fn grub() -> Card {
    Card::new(
        "grub_001",
        "Grub",
        1,
        "A simple larval creature with great potential for growth",
        CardKind::BaseCreature(CreatureCard {
            stats: BaseStats::new(1, 3, 0),
            dna_slots: smallvec!["body".into(), "attack".into(), "defense".into()],
            max_mutations: 3,
        }),
    )
}

pub fn spore() -> Card {
    Card::new(
        "spore_001",
        "Spore",
        1,
        "A fungal organism that can adapt to various environments",
        CardKind::BaseCreature(CreatureCard {
            stats: BaseStats::new(0, 2, 0),
            dna_slots: smallvec!["essence".into(), "defense".into(), "mind".into()],
            max_mutations: 2,
        }),
    )
}

pub fn spikes() -> Card {
    Card::new(
        "spikes_001",
        "Spikes",
        2,
        "Sharp protrusions that increase attack and provide thorns",
        CardKind::Mutation(MutationCard {
            mutation_type: "spikes".into(),
            target_slot: "attack".into(),
            primary_effect: PrimaryEffect {
                stat_changes: BTreeMap::from([("attack".to_string(), 2)]),
                abilities: vec!["thorns".into()],
            },
            procedural_modifiers: vec![ProceduralModifier::new(
                "poison_spikes",
                "Poison Spikes",
                "Chance for spikes to be poisonous",
            )
            .with_effect("poison_chance", EffectValue::Float(0.3))],
        }),
    )
}

pub fn carapace() -> Card {
    Card::new(
        "carapace_001",
        "Carapace",
        3,
        "Hardened shell that provides armor and durability",
        CardKind::Mutation(MutationCard {
            mutation_type: "carapace".into(),
            target_slot: "defense".into(),
            primary_effect: PrimaryEffect {
                stat_changes: BTreeMap::from([
                    ("armor".to_string(), 3),
                    ("health".to_string(), 1),
                ]),
                abilities: vec!["armored".into()],
            },
            procedural_modifiers: vec![ProceduralModifier::new(
                "reinforced_armor",
                "Reinforced Armor",
                "Extra durability against physical attacks",
            )
            .with_effect("physical_resistance", EffectValue::Float(0.2))],
        }),
    )
}

pub fn beetle_warrior() -> Card {
    Card::new(
        "beetle_warrior_001",
        "Beetle Warrior",
        0,
        "A grub evolved with spikes and carapace into a formidable warrior",
        CardKind::Evolution(EvolutionCard {
            required_mutations: vec!["spikes".into(), "carapace".into()],
            base_creature_type: "grub_001".into(),
            evolved_stats: BaseStats::new(5, 6, 2),
            evolved_abilities: vec!["thorns".into(), "armored".into(), "charge".into()],
            procedural_traits: vec![ProceduralModifier::new(
                "battle_fury",
                "Battle Fury",
                "Gains attack when damaged",
            )
            .with_effect("fury_trigger", EffectValue::Text("on_damage".into()))
            .with_effect("attack_bonus", EffectValue::Int(1))],
        }),
    )
}

/// Base creatures, then mutations, then evolutions
pub fn all() -> Vec<Card> {
    vec![grub(), spore(), spikes(), carapace(), beetle_warrior()]
}
