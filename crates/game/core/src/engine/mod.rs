//! Mod application and full-sheet rebuilds.
//!
//! [`SheetEngine`] is the only writer of a character's node map. Every
//! successful mutation (placing a mod, removing one, choosing a breed) ends
//! with a full rebuild: a fresh [`LiveSheet`] is created, every filled
//! non-managed node is replayed in graph order, and the housekeeping pass
//! runs on the result. Removal is never a reverse delta.
//!
//! Rule violations are not errors. They come back as
//! [`ApplyOutcome::Refused`] / [`RemoveOutcome::Refused`] with the character
//! untouched.
mod effects;
mod validation;

use bitflags::bitflags;
use tracing::{debug, warn};

use crate::breed::Breed;
use crate::catalog::{CatalogOracle, Mod, ModCategory};
use crate::config::RulesConfig;
use crate::error::Refusal;
use crate::graph::NodeGraph;
use crate::housekeeping;
use crate::schema::Schema;
use crate::sheet::{CharacterRecord, LiveSheet, NoteKind};

bitflags! {
    /// Modifiers for [`SheetEngine::apply_mod`] and [`SheetEngine::remove_mod`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ApplyFlags: u8 {
        /// Skip prerequisite, restriction and duplicate-copy checks.
        const IGNORE_PREREQS = 1;
        /// GM override: bypass every placement rule except breed locks on
        /// the incoming mod, and allow touching breed-locked placements.
        const OVERRIDE = 1 << 1;
    }
}

/// A request to place one mod at one location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplyRequest {
    pub mod_id: String,
    pub location: String,
    pub flags: ApplyFlags,
    /// Free text for mods that ask for it.
    pub replace_text: Option<String>,
}

impl ApplyRequest {
    pub fn new(mod_id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            mod_id: mod_id.into(),
            location: location.into(),
            flags: ApplyFlags::empty(),
            replace_text: None,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ApplyFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.replace_text = Some(text.into());
        self
    }
}

/// Result of [`SheetEngine::apply_mod`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum ApplyOutcome {
    /// Placed through the normal rules; `charged` talent points were spent.
    Placed { charged: i32 },
    /// Placed under a GM override; nothing was charged.
    Overridden,
    Refused(Refusal),
}

impl ApplyOutcome {
    pub const fn is_placed(&self) -> bool {
        !matches!(self, Self::Refused(_))
    }

    pub const fn refusal(&self) -> Option<&Refusal> {
        match self {
            Self::Refused(refusal) => Some(refusal),
            _ => None,
        }
    }
}

/// Result of [`SheetEngine::remove_mod`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum RemoveOutcome {
    Removed { refunded: i32 },
    Refused(Refusal),
}

impl RemoveOutcome {
    pub const fn is_removed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }

    pub const fn refusal(&self) -> Option<&Refusal> {
        match self {
            Self::Refused(refusal) => Some(refusal),
            Self::Removed { .. } => None,
        }
    }
}

/// Applies, removes and replays mods against a character.
///
/// The engine borrows its collaborators and holds no state of its own, so one
/// engine can serve any number of characters.
#[derive(Clone, Copy)]
pub struct SheetEngine<'a> {
    catalog: &'a dyn CatalogOracle,
    graph: &'a NodeGraph,
    schema: &'a Schema,
    rules: &'a RulesConfig,
}

impl<'a> SheetEngine<'a> {
    /// An engine over the built-in graph, schema and rules.
    pub fn new(catalog: &'a dyn CatalogOracle) -> Self {
        Self {
            catalog,
            graph: NodeGraph::standard(),
            schema: Schema::standard(),
            rules: &RulesConfig::STANDARD,
        }
    }

    #[must_use]
    pub fn with_graph(mut self, graph: &'a NodeGraph) -> Self {
        self.graph = graph;
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: &'a Schema) -> Self {
        self.schema = schema;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: &'a RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    pub fn catalog(&self) -> &'a dyn CatalogOracle {
        self.catalog
    }

    pub fn graph(&self) -> &'a NodeGraph {
        self.graph
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn rules(&self) -> &'a RulesConfig {
        self.rules
    }

    /// True if the character's breed template pins `mod_id` at `location`.
    pub fn is_breed_locked(
        &self,
        character: &CharacterRecord,
        location: &str,
        mod_id: &str,
    ) -> bool {
        character
            .breed
            .is_some_and(|breed| breed.locks(location, mod_id))
    }

    /// Places a mod and rebuilds the live sheet.
    ///
    /// A breed mod is never written on its own: at the breed's root location
    /// it applies the whole template through [`SheetEngine::apply_breed`],
    /// anywhere else it is refused. On refusal neither `character` nor
    /// `live` is modified.
    pub fn apply_mod(
        &self,
        character: &mut CharacterRecord,
        live: &mut LiveSheet,
        request: &ApplyRequest,
    ) -> ApplyOutcome {
        let result = match self.requested_breed(request) {
            Some(breed) => breed.map(|breed| {
                self.apply_breed(character, live, breed);
                ApplyOutcome::Placed { charged: 0 }
            }),
            None => self.place(character, request).map(|outcome| {
                character.touch();
                *live = self.rebuild(character);
                outcome
            }),
        };
        match result {
            Ok(outcome) => {
                debug!(
                    target: "sheet::engine",
                    character = character.id,
                    mod_id = %request.mod_id,
                    location = %request.location,
                    ?outcome,
                    "mod placed"
                );
                outcome
            }
            Err(refusal) => {
                warn!(
                    target: "sheet::engine",
                    character = character.id,
                    mod_id = %request.mod_id,
                    location = %request.location,
                    severity = refusal.severity().as_str(),
                    "{refusal}"
                );
                ApplyOutcome::Refused(refusal)
            }
        }
    }

    /// `None` unless the request names a breed mod. Otherwise the breed it
    /// selects, or a refusal when it is not a template root placed at
    /// [`Breed::ROOT_LOCATION`].
    fn requested_breed(&self, request: &ApplyRequest) -> Option<Result<Breed, Refusal>> {
        let candidate = self.catalog.lookup(&request.mod_id)?;
        if candidate.category != ModCategory::Breed {
            return None;
        }
        Some(match Breed::from_root_mod(&candidate.id) {
            Some(breed) if request.location == Breed::ROOT_LOCATION => Ok(breed),
            _ => Err(Refusal::NotAllowed {
                mod_id: candidate.id.clone(),
                location: request.location.clone(),
            }),
        })
    }

    fn place(
        &self,
        character: &mut CharacterRecord,
        request: &ApplyRequest,
    ) -> Result<ApplyOutcome, Refusal> {
        let candidate = self
            .catalog
            .lookup(&request.mod_id)
            .ok_or_else(|| Refusal::UnknownMod(request.mod_id.clone()))?;
        let node = self
            .graph
            .node(&request.location)
            .ok_or_else(|| Refusal::UnknownLocation(request.location.clone()))?;
        let location = node.location_id.as_str();
        let overriding = request.flags.contains(ApplyFlags::OVERRIDE);

        if node.managed {
            return Err(Refusal::NotAllowed {
                mod_id: candidate.id.clone(),
                location: location.to_string(),
            });
        }
        if let Some(existing) = character.nodes.get(location)
            && !overriding
            && self.is_breed_locked(character, location, existing)
        {
            return Err(Refusal::BreedLocked {
                mod_id: existing.to_string(),
                location: location.to_string(),
            });
        }

        if overriding && !self.is_breed_locked(character, location, &candidate.id) {
            self.refund_occupant(character, location);
            self.write_node(character, candidate, location, request.replace_text.as_deref());
            if !character.is_override(&candidate.id) {
                character.stored_overrides.push(candidate.id.clone());
            }
            return Ok(ApplyOutcome::Overridden);
        }

        validation::check_placement(self, character, candidate, node, request.flags)?;

        // Breed grants are never charged, on either path.
        let charged = if self.is_breed_locked(character, location, &candidate.id) {
            0
        } else {
            candidate.talent_cost
        };
        self.refund_occupant(character, location);
        character.talent.spent = character.talent.spent.saturating_add(charged);
        character.talent.unspent = character.talent.unspent.saturating_sub(charged);
        self.write_node(character, candidate, location, request.replace_text.as_deref());
        Ok(ApplyOutcome::Placed { charged })
    }

    fn write_node(
        &self,
        character: &mut CharacterRecord,
        candidate: &Mod,
        location: &str,
        text: Option<&str>,
    ) {
        if let Some(previous) = character.nodes.clear(location) {
            character.discard_text(location, &previous);
        }
        character.nodes.set(location, candidate.id.clone());
        if candidate.choose_text {
            match text {
                Some(text) => character.store_text(location, &candidate.id, text),
                None if character.text_for(location, &candidate.id).is_none() => {
                    character.store_text(location, &candidate.id, "");
                }
                None => {}
            }
        }
    }

    /// Gives back the cost of whatever sits at `location`, if it was charged.
    fn refund_occupant(&self, character: &mut CharacterRecord, location: &str) -> i32 {
        let Some(existing) = character.nodes.get(location).map(str::to_string) else {
            return 0;
        };
        if self.is_breed_locked(character, location, &existing) {
            return 0;
        }
        if character.is_override(&existing) {
            if character.nodes.count(&existing) <= 1 {
                character.stored_overrides.retain(|id| *id != existing);
            }
            return 0;
        }
        let refund = self
            .catalog
            .lookup(&existing)
            .map_or(0, |occupant| occupant.talent_cost);
        character.talent.spent = character.talent.spent.saturating_sub(refund);
        character.talent.unspent = character.talent.unspent.saturating_add(refund);
        refund
    }

    /// Removes `mod_id` from `location` and rebuilds the live sheet.
    ///
    /// Only [`ApplyFlags::OVERRIDE`] is consulted.
    pub fn remove_mod(
        &self,
        character: &mut CharacterRecord,
        live: &mut LiveSheet,
        mod_id: &str,
        location: &str,
        flags: ApplyFlags,
    ) -> RemoveOutcome {
        let result = self.take(character, mod_id, location, flags);
        match result {
            Ok(refunded) => {
                character.touch();
                *live = self.rebuild(character);
                debug!(
                    target: "sheet::engine",
                    character = character.id,
                    mod_id,
                    location,
                    refunded,
                    "mod removed"
                );
                RemoveOutcome::Removed { refunded }
            }
            Err(refusal) => {
                warn!(
                    target: "sheet::engine",
                    character = character.id,
                    mod_id,
                    location,
                    severity = refusal.severity().as_str(),
                    "{refusal}"
                );
                RemoveOutcome::Refused(refusal)
            }
        }
    }

    fn take(
        &self,
        character: &mut CharacterRecord,
        mod_id: &str,
        location: &str,
        flags: ApplyFlags,
    ) -> Result<i32, Refusal> {
        if !self.graph.contains(location) {
            return Err(Refusal::UnknownLocation(location.to_string()));
        }
        let found = character.nodes.get(location);
        if found != Some(mod_id) {
            return Err(Refusal::NotAtLocation {
                mod_id: mod_id.to_string(),
                location: location.to_string(),
                found: found.map(str::to_string),
            });
        }
        if self.is_breed_locked(character, location, mod_id)
            && !flags.contains(ApplyFlags::OVERRIDE)
        {
            return Err(Refusal::BreedLocked {
                mod_id: mod_id.to_string(),
                location: location.to_string(),
            });
        }

        let refunded = self.refund_occupant(character, location);
        character.nodes.clear(location);
        character.discard_text(location, mod_id);
        Ok(refunded)
    }

    /// Chooses a breed, force-inserting its template.
    ///
    /// Returns `false` without touching anything when the breed's root mod
    /// already sits at its root location.
    pub fn apply_breed(
        &self,
        character: &mut CharacterRecord,
        live: &mut LiveSheet,
        breed: Breed,
    ) -> bool {
        if character.nodes.get(Breed::ROOT_LOCATION) == Some(breed.root_mod()) {
            return false;
        }

        if let Some(previous) = character.breed {
            for grant in previous.grants() {
                if character.nodes.get(grant.location) == Some(grant.mod_id) {
                    character.nodes.clear(grant.location);
                    character.discard_text(grant.location, grant.mod_id);
                }
            }
        }

        character.breed = Some(breed);
        for grant in breed.grants() {
            if !self.catalog.contains(grant.mod_id) {
                warn!(
                    target: "sheet::engine",
                    %breed,
                    mod_id = grant.mod_id,
                    "breed grant missing from catalog"
                );
                continue;
            }
            self.refund_occupant(character, grant.location);
            if let Some(previous) = character.nodes.clear(grant.location) {
                character.discard_text(grant.location, &previous);
            }
            character.nodes.set(grant.location, grant.mod_id);
        }
        character.talent.breed_bonus = breed.talent_bonus();
        character.touch();
        *live = self.rebuild(character);
        debug!(target: "sheet::engine", character = character.id, %breed, "breed applied");
        true
    }

    /// Regenerates the live sheet from the character's node map.
    ///
    /// Replays every filled, non-managed node in graph order without
    /// re-validation, then runs housekeeping. Housekeeping may write managed
    /// nodes and talent totals back into `character`.
    pub fn rebuild(&self, character: &mut CharacterRecord) -> LiveSheet {
        let mut live = LiveSheet::new(self.schema, character);
        for node in self.graph.nodes().filter(|node| !node.managed) {
            let Some(mod_id) = character.nodes.get(&node.location_id) else {
                continue;
            };
            match self.catalog.lookup(mod_id) {
                Some(found) => {
                    self.apply_effects(character, &mut live, found, &node.location_id);
                }
                None => live.note(
                    NoteKind::Warnings,
                    format!("Unknown mod {mod_id} at {}", node.location_id),
                ),
            }
        }
        self.note_overrides(character, &mut live);
        housekeeping::run(self, character, &mut live);
        live
    }

    fn note_overrides(&self, character: &CharacterRecord, live: &mut LiveSheet) {
        for mod_id in &character.stored_overrides {
            if character.nodes.count(mod_id) == 0 {
                continue;
            }
            let name = self.display_name(mod_id);
            live.note(
                NoteKind::Warnings,
                format!("{name} was placed by GM override"),
            );
        }
        let Some(breed) = character.breed else {
            return;
        };
        for grant in breed.grants() {
            if !self.catalog.contains(grant.mod_id) {
                continue;
            }
            if character.nodes.get(grant.location) != Some(grant.mod_id) {
                let name = self.display_name(grant.mod_id);
                live.note(
                    NoteKind::Warnings,
                    format!(
                        "{name} granted by {breed} is missing from {}",
                        grant.location
                    ),
                );
            }
        }
    }

    fn display_name(&self, mod_id: &str) -> String {
        self.catalog
            .lookup(mod_id)
            .map_or_else(|| mod_id.to_string(), |found| found.name.clone())
    }

    /// Writes `mod_id` into a managed node and applies its effects.
    ///
    /// Returns `false` if the mod or the location is unknown.
    pub(crate) fn force_apply(
        &self,
        character: &mut CharacterRecord,
        live: &mut LiveSheet,
        mod_id: &str,
        location: &str,
    ) -> bool {
        let Some(found) = self.catalog.lookup(mod_id) else {
            return false;
        };
        if !self.graph.contains(location) {
            return false;
        }
        if character.nodes.get(location) != Some(mod_id) {
            character.nodes.set(location, mod_id);
        }
        self.apply_effects(character, live, found, location);
        true
    }
}
