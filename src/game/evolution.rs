//! Automatic evolution and procedural effect rolls
//!
//! Both run for each creature of the acting player when the mutation phase
//! resolves. Evolution is deterministic given the applied mutations; the
//! trait and poison rolls draw from the engine's [`RandomSource`].

use crate::core::{
    Card, CreatureInstance, EffectValue, EvolutionCard, ProceduralModifier, RandomSource,
};
use crate::loader::CardCatalog;

/// Effect parameter read by the poison roll
pub const POISON_CHANCE: &str = "poison_chance";

/// Ability granted by a successful poison roll
pub const POISON_ABILITY: &str = "poison";

/// First catalog evolution this creature qualifies for
///
/// Evolved creatures never qualify. An evolution qualifies when it names the
/// creature's base card and every required mutation type has been applied.
pub fn find_evolution<'c>(
    creature: &CreatureInstance,
    catalog: &'c CardCatalog,
) -> Option<(&'c Card, &'c EvolutionCard)> {
    if creature.is_evolved {
        return None;
    }
    catalog.evolutions().find(|(_, evolution)| {
        evolution.base_creature_type == creature.base_card.id
            && evolution
                .required_mutations
                .iter()
                .all(|required| creature.has_mutation_type(required))
    })
}

/// Apply an evolution: record it, replace stats, add abilities
pub fn evolve(creature: &mut CreatureInstance, card: &Card, evolution: &EvolutionCard) {
    creature.evolution_history.push(card.clone());
    creature.current_stats = evolution.evolved_stats;
    creature
        .active_abilities
        .extend(evolution.evolved_abilities.iter().cloned());
    creature.is_evolved = true;
}

/// Trait that an evolution may grant on top of its fixed effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvolutionTrait {
    Enhanced { stat_bonus: i64 },
    Adaptive,
}

impl EvolutionTrait {
    /// Id prefix for the minted trait
    pub fn id_prefix(&self) -> &'static str {
        match self {
            EvolutionTrait::Enhanced { .. } => "enhanced",
            EvolutionTrait::Adaptive => "adaptive",
        }
    }

    pub fn into_modifier(self, id: String) -> ProceduralModifier {
        match self {
            EvolutionTrait::Enhanced { stat_bonus } => ProceduralModifier::new(
                id,
                "Enhanced Evolution",
                "This evolution gained unexpected enhancements",
            )
            .with_effect("stat_bonus", EffectValue::Int(stat_bonus)),
            EvolutionTrait::Adaptive => ProceduralModifier::new(
                id,
                "Adaptive Trait",
                "Evolved to better suit the environment",
            )
            .with_effect("environmental_bonus", EffectValue::Float(0.1)),
        }
    }
}

/// Roll for an evolution trait; `chance` is a percentage
pub fn roll_evolution_trait(rng: &mut dyn RandomSource, chance: u32) -> Option<EvolutionTrait> {
    if rng.roll_percent() > chance {
        return None;
    }
    match rng.index(2) {
        0 => Some(EvolutionTrait::Enhanced {
            stat_bonus: rng.range_inclusive(1, 2),
        }),
        _ => Some(EvolutionTrait::Adaptive),
    }
}

/// Roll every poison-chance modifier on the creature's applied mutations
///
/// Runs on every mutation phase, so the odds compound until poison is
/// granted. Returns true if poison was granted by this call.
pub fn roll_procedural_modifiers(
    creature: &mut CreatureInstance,
    rng: &mut dyn RandomSource,
) -> bool {
    let chances: Vec<f64> = creature
        .applied_mutations
        .iter()
        .filter_map(Card::as_mutation)
        .flat_map(|mutation| mutation.procedural_modifiers.iter())
        .filter_map(|modifier| modifier.number(POISON_CHANCE))
        .collect();

    let mut granted = false;
    for chance in chances {
        let roll = rng.roll_percent();
        if f64::from(roll) <= chance * 100.0 && !creature.has_ability(POISON_ABILITY) {
            creature.active_abilities.push(POISON_ABILITY.to_string());
            granted = true;
        }
    }
    granted
}
