//! Core game types and entities

pub mod card;
pub mod creature;
pub mod entity;
pub mod player;
pub mod rng;

pub use card::{
    AdaptationRule, BaseStats, Card, CardKind, CardType, CreatureCard, EffectValue,
    EnvironmentCard, EvolutionCard, GlobalEffect, MutationCard, PrimaryEffect,
    ProceduralModifier, SpellCard, SpellEffect, SpellTarget,
};
pub use creature::{CreatureInstance, CreatureUpdate, Position};
pub use entity::{CreatureId, GameId, PlayerId};
pub use player::Player;
pub use rng::{GameRng, RandomSource};
