//! Character service: load, mutate, rebuild, save.
//!
//! Every mutating operation follows the same cycle: load the record, run the
//! change through the [`SheetEngine`], let it rebuild the live sheet, then
//! persist both the record and the live sheet before returning. Refused
//! changes are returned to the caller and nothing is written.

mod error;
mod transfer;

pub use error::{ImportError, Result, ServiceError};
pub use transfer::{CharacterExport, FORMAT_VERSION};

use std::collections::BTreeSet;

use sheet_content::Content;
use sheet_core::{
    ApplyFlags, ApplyOutcome, ApplyRequest, Breed, CatalogOracle, CharacterId, CharacterRecord,
    LiveSheet, Mod, ModQuery, NoteKind, PlayerId, PlayerRecord, RemoveOutcome, SheetEngine,
};
use tracing::{info, warn};

use crate::repository::Repositories;

/// Where granted talent points come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TalentGrant {
    /// Earned on a mission.
    Mission,
    /// Awarded by the GM outside missions.
    Bonus,
}

pub struct CharacterService {
    content: Content,
    repos: Repositories,
}

impl CharacterService {
    pub fn new(content: Content, repos: Repositories) -> Self {
        Self { content, repos }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// An engine over this service's catalog, graph and rules.
    pub fn engine(&self) -> SheetEngine<'_> {
        SheetEngine::new(&self.content.catalog)
            .with_graph(self.content.graph())
            .with_rules(&self.content.rules)
    }

    // ------------------------------------------------------------------
    // Players
    // ------------------------------------------------------------------

    pub fn create_player(&self, name: &str) -> Result<PlayerRecord> {
        let player = PlayerRecord::new(self.repos.players.next_id()?, name.trim());
        self.repos.players.save(&player)?;
        info!(player = player.id, name = %player.name, "player created");
        Ok(player)
    }

    /// Players not marked deleted, in id order.
    pub fn list_players(&self) -> Result<Vec<PlayerRecord>> {
        Ok(self
            .repos
            .players
            .list()?
            .into_iter()
            .filter(|player| !player.deleted)
            .collect())
    }

    pub fn load_player(&self, id: PlayerId) -> Result<PlayerRecord> {
        match self.repos.players.load(id)? {
            Some(player) if !player.deleted => Ok(player),
            _ => Err(ServiceError::PlayerNotFound(id)),
        }
    }

    /// Marks the player deleted. Their characters are kept.
    pub fn delete_player(&self, id: PlayerId) -> Result<()> {
        let mut player = self.load_player(id)?;
        player.deleted = true;
        self.repos.players.save(&player)?;
        info!(player = id, "player deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Characters
    // ------------------------------------------------------------------

    /// Creates a character with every location present and empty, applies
    /// `breed` if given, and saves it with its first live sheet.
    pub fn create_character(
        &self,
        player_id: PlayerId,
        name: &str,
        breed: Option<Breed>,
    ) -> Result<(CharacterRecord, LiveSheet)> {
        self.load_player(player_id)?;
        let engine = self.engine();
        let mut character = CharacterRecord::new(
            self.repos.characters.next_id()?,
            name.trim(),
            player_id,
            engine.graph(),
        )
        .with_creation_points(self.content.rules.creation_talent_points);

        let mut live = engine.rebuild(&mut character);
        if let Some(breed) = breed {
            engine.apply_breed(&mut character, &mut live, breed);
        }
        self.save(&character, &live)?;
        info!(character = character.id, player = player_id, name = %character.name, "character created");
        Ok((character, live))
    }

    /// Characters not marked deleted, optionally only those of one player.
    pub fn list_characters(&self, player_id: Option<PlayerId>) -> Result<Vec<CharacterRecord>> {
        Ok(self
            .repos
            .characters
            .list()?
            .into_iter()
            .filter(|character| !character.deleted)
            .filter(|character| player_id.is_none_or(|id| character.player_id == id))
            .collect())
    }

    pub fn load_character(&self, id: CharacterId) -> Result<CharacterRecord> {
        let mut character = match self.repos.characters.load(id)? {
            Some(character) if !character.deleted => character,
            _ => return Err(ServiceError::CharacterNotFound(id)),
        };
        // Records saved before a graph change may miss new locations.
        character.nodes.extend_for_graph(self.content.graph());
        Ok(character)
    }

    /// The stored live sheet, rebuilt and saved first if none exists.
    pub fn load_live(&self, id: CharacterId) -> Result<LiveSheet> {
        if let Some(live) = self.repos.live.load(id)? {
            return Ok(live);
        }
        warn!(character = id, "no live sheet stored, rebuilding");
        self.rebuild(id)
    }

    /// Places a mod. A refusal is returned as the outcome and saves nothing.
    pub fn add_mod(&self, id: CharacterId, request: &ApplyRequest) -> Result<ApplyOutcome> {
        let mut character = self.load_character(id)?;
        let mut live = self.load_live(id)?;
        let outcome = self.engine().apply_mod(&mut character, &mut live, request);
        if outcome.is_placed() {
            self.save(&character, &live)?;
            info!(character = id, mod_id = %request.mod_id, location = %request.location, "mod added");
        }
        Ok(outcome)
    }

    pub fn remove_mod(
        &self,
        id: CharacterId,
        mod_id: &str,
        location: &str,
        flags: ApplyFlags,
    ) -> Result<RemoveOutcome> {
        let mut character = self.load_character(id)?;
        let mut live = self.load_live(id)?;
        let outcome = self
            .engine()
            .remove_mod(&mut character, &mut live, mod_id, location, flags);
        if outcome.is_removed() {
            self.save(&character, &live)?;
            info!(character = id, mod_id, location, "mod removed");
        }
        Ok(outcome)
    }

    /// Applies a breed template. Returns `false` if it was already applied.
    pub fn set_breed(&self, id: CharacterId, breed: Breed) -> Result<bool> {
        let mut character = self.load_character(id)?;
        let mut live = self.load_live(id)?;
        let changed = self.engine().apply_breed(&mut character, &mut live, breed);
        if changed {
            self.save(&character, &live)?;
            info!(character = id, %breed, "breed set");
        }
        Ok(changed)
    }

    pub fn grant_talent_points(
        &self,
        id: CharacterId,
        grant: TalentGrant,
        amount: i32,
    ) -> Result<LiveSheet> {
        let mut character = self.load_character(id)?;
        match grant {
            TalentGrant::Mission => character.talent.missions += amount,
            TalentGrant::Bonus => character.talent.bonus += amount,
        }
        character.touch();
        let live = self.engine().rebuild(&mut character);
        self.save(&character, &live)?;
        info!(character = id, ?grant, amount, "talent points granted");
        Ok(live)
    }

    /// Adds a note that survives every rebuild.
    pub fn add_note(&self, id: CharacterId, kind: NoteKind, note: &str) -> Result<LiveSheet> {
        let mut character = self.load_character(id)?;
        character.add_custom_note(kind, note.trim());
        character.touch();
        let live = self.engine().rebuild(&mut character);
        self.save(&character, &live)?;
        Ok(live)
    }

    /// Recomputes the live sheet from the stored record and saves both.
    pub fn rebuild(&self, id: CharacterId) -> Result<LiveSheet> {
        let mut character = self.load_character(id)?;
        let live = self.engine().rebuild(&mut character);
        self.save(&character, &live)?;
        Ok(live)
    }

    /// Marks the character deleted; its rows stay in the store.
    pub fn delete_character(&self, id: CharacterId) -> Result<()> {
        let mut character = self.load_character(id)?;
        character.deleted = true;
        character.touch();
        self.repos.characters.save(&character)?;
        info!(character = id, "character deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Import / export
    // ------------------------------------------------------------------

    pub fn export_character(&self, id: CharacterId) -> Result<String> {
        let character = self.load_character(id)?;
        CharacterExport::new(character)
            .to_json()
            .map_err(|source| ServiceError::Export { id, source })
    }

    /// Imports an exported document as a new character.
    ///
    /// The character is attached to `player_id`, or to the player named in
    /// the document when `None`. The document is fully validated before
    /// anything is written, and the character gets a fresh id.
    pub fn import_character(
        &self,
        document: &str,
        player_id: Option<PlayerId>,
    ) -> Result<(CharacterRecord, LiveSheet)> {
        let export = CharacterExport::from_json(document)?;
        if let Err(err) = export.validate(&self.content.catalog, self.content.graph()) {
            warn!(%err, "import rejected");
            return Err(err.into());
        }
        let owner = player_id.unwrap_or(export.character.player_id);
        match self.load_player(owner) {
            Ok(_) => {}
            Err(ServiceError::PlayerNotFound(_)) => {
                return Err(ImportError::MissingPlayer(owner).into());
            }
            Err(err) => return Err(err),
        }

        let mut character = export.character;
        let original_id = character.id;
        character.id = self.repos.characters.next_id()?;
        character.player_id = owner;
        character.deleted = false;
        character.nodes.extend_for_graph(self.content.graph());
        character.touch();

        let live = self.engine().rebuild(&mut character);
        self.save(&character, &live)?;
        info!(character = character.id, original_id, player = owner, "character imported");
        Ok((character, live))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn search_mods(&self, query: &ModQuery) -> Vec<Mod> {
        self.content
            .catalog
            .search(query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Locations the character could fill next.
    pub fn free_locations(&self, id: CharacterId) -> Result<BTreeSet<String>> {
        let character = self.load_character(id)?;
        Ok(self.content.graph().free_locations(&character))
    }

    fn save(&self, character: &CharacterRecord, live: &LiveSheet) -> Result<()> {
        self.repos.characters.save(character)?;
        self.repos.live.save(live)?;
        Ok(())
    }
}
