//! Party roster and dex update rules.

use std::collections::BTreeSet;

use tallgrass_core::{RejectionReason, SpeciesId};

/// Ordered party of distinct species bounded by a capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartyRoster {
    members: Vec<SpeciesId>,
    capacity: usize,
}

impl PartyRoster {
    /// Creates an empty roster that holds at most `capacity` species.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            members: Vec::new(),
            capacity,
        }
    }

    /// Creates a roster from stored members, dropping duplicates and overflow.
    #[must_use]
    pub fn from_members(members: impl IntoIterator<Item = SpeciesId>, capacity: usize) -> Self {
        let mut roster = Self::new(capacity);
        for species in members {
            let _ = roster.add(species);
        }
        roster
    }

    /// Adds a species to the end of the party.
    ///
    /// Returns `false` without changing anything when the species is already a
    /// member or the party is full.
    pub fn add(&mut self, species: SpeciesId) -> bool {
        if self.is_full() || self.contains(&species) {
            return false;
        }
        self.members.push(species);
        true
    }

    /// Overwrites the species stored in `slot`.
    pub fn replace(&mut self, slot: usize, species: SpeciesId) -> Result<(), RejectionReason> {
        let current = self.members.get(slot).ok_or(RejectionReason::SlotOutOfRange)?;
        if *current == species {
            return Ok(());
        }
        if self.contains(&species) {
            return Err(RejectionReason::DuplicateSpecies);
        }
        self.members[slot] = species;
        Ok(())
    }

    /// Exchanges the members stored in two slots.
    pub fn swap(&mut self, first: usize, second: usize) -> Result<(), RejectionReason> {
        if first >= self.members.len() || second >= self.members.len() {
            return Err(RejectionReason::SlotOutOfRange);
        }
        self.members.swap(first, second);
        Ok(())
    }

    /// Removes and returns the member stored in `slot`.
    pub fn remove(&mut self, slot: usize) -> Result<SpeciesId, RejectionReason> {
        if slot >= self.members.len() {
            return Err(RejectionReason::SlotOutOfRange);
        }
        Ok(self.members.remove(slot))
    }

    /// Reports whether the species is a member of the party.
    #[must_use]
    pub fn contains(&self, species: &SpeciesId) -> bool {
        self.members.contains(species)
    }

    /// Members in slot order.
    #[must_use]
    pub fn members(&self) -> &[SpeciesId] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Reports whether the party has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Reports whether the party reached its capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    /// Largest number of members the party accepts.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Set of every species caught so far. It only ever grows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pokedex {
    species: BTreeSet<SpeciesId>,
}

impl Pokedex {
    /// Creates a dex holding the provided species.
    #[must_use]
    pub fn from_species(species: impl IntoIterator<Item = SpeciesId>) -> Self {
        Self {
            species: species.into_iter().collect(),
        }
    }

    /// Records a caught species, returning `false` if it was already present.
    pub fn add(&mut self, species: SpeciesId) -> bool {
        self.species.insert(species)
    }

    /// Reports whether the species has been caught.
    #[must_use]
    pub fn contains(&self, species: &SpeciesId) -> bool {
        self.species.contains(species)
    }

    /// Caught species in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &SpeciesId> {
        self.species.iter()
    }

    /// Caught species in sorted order, collected.
    #[must_use]
    pub fn to_vec(&self) -> Vec<SpeciesId> {
        self.species.iter().cloned().collect()
    }

    /// Number of caught species.
    #[must_use]
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Reports whether nothing has been caught yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{PartyRoster, Pokedex};
    use tallgrass_core::{RejectionReason, SpeciesId, MAX_PARTY_SIZE};

    fn full_party() -> PartyRoster {
        PartyRoster::from_members(
            ["bulbasaur", "charmander", "squirtle", "pidgey", "rattata", "pikachu"]
                .into_iter()
                .map(SpeciesId::new),
            MAX_PARTY_SIZE,
        )
    }

    #[test]
    fn full_party_ignores_new_species() {
        let mut party = full_party();
        assert!(party.is_full());
        assert!(!party.add(SpeciesId::new("eevee")));
        assert_eq!(party.len(), MAX_PARTY_SIZE);
        assert!(!party.contains(&SpeciesId::new("eevee")));
    }

    #[test]
    fn duplicates_are_never_added() {
        let mut party = PartyRoster::new(MAX_PARTY_SIZE);
        assert!(party.add(SpeciesId::new("pikachu")));
        assert!(!party.add(SpeciesId::new("Pikachu")));
        assert_eq!(party.len(), 1);
    }

    #[test]
    fn stored_members_are_deduplicated_and_truncated() {
        let party = PartyRoster::from_members(
            ["a", "b", "a", "c"].into_iter().map(SpeciesId::new),
            2,
        );
        assert_eq!(party.members(), &[SpeciesId::new("a"), SpeciesId::new("b")]);
    }

    #[test]
    fn slot_operations_are_bounds_checked() {
        let mut party = full_party();
        let before = party.clone();
        assert_eq!(
            party.replace(6, SpeciesId::new("eevee")),
            Err(RejectionReason::SlotOutOfRange)
        );
        assert_eq!(party.swap(0, 9), Err(RejectionReason::SlotOutOfRange));
        assert_eq!(party.remove(6), Err(RejectionReason::SlotOutOfRange));
        assert_eq!(party, before);
    }

    #[test]
    fn replace_refuses_a_second_copy() {
        let mut party = full_party();
        assert_eq!(
            party.replace(0, SpeciesId::new("pikachu")),
            Err(RejectionReason::DuplicateSpecies)
        );
        assert_eq!(party.replace(0, SpeciesId::new("eevee")), Ok(()));
        assert_eq!(party.members()[0], SpeciesId::new("eevee"));
    }

    #[test]
    fn dex_only_grows() {
        let mut dex = Pokedex::default();
        assert!(dex.add(SpeciesId::new("mew")));
        assert!(!dex.add(SpeciesId::new("mew")));
        assert!(dex.add(SpeciesId::new("abra")));
        assert_eq!(dex.to_vec(), vec![SpeciesId::new("abra"), SpeciesId::new("mew")]);
    }
}
