//! Numbered menus over the character service.

mod prompt;

pub use prompt::Prompt;

use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use sheet_core::{
    ApplyFlags, ApplyOutcome, ApplyRequest, Breed, CatalogOracle, CharacterId, ModCategory,
    ModQuery, NoteKind, RemoveOutcome,
};
use sheet_runtime::{CharacterService, TalentGrant};
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use crate::presentation;

const MAIN_OPTIONS: [&str; 7] = [
    "List players",
    "New player",
    "Delete player",
    "List characters",
    "New character",
    "Open character",
    "Import character",
];

const CHARACTER_OPTIONS: [&str; 12] = [
    "Show sheet",
    "Free locations",
    "Search mods",
    "Add mod",
    "Remove mod",
    "Set breed",
    "Grant talent points",
    "Add note",
    "Rebuild",
    "Export to file",
    "Delete character",
    "Show record",
];

/// What a character screen hands back to the main loop.
enum Screen {
    Stay,
    Leave,
}

pub struct Menu<'a, R, W> {
    service: &'a CharacterService,
    prompt: Prompt<R, W>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(service: &'a CharacterService, input: R, output: W) -> Self {
        Self {
            service,
            prompt: Prompt::new(input, output),
        }
    }

    /// Runs until the user quits or the input ends.
    pub fn run(&mut self) -> Result<()> {
        info!("menu started");
        while let Some(choice) = self.prompt.choose("Main menu", &MAIN_OPTIONS)? {
            debug!(choice = MAIN_OPTIONS[choice], "main menu");
            let result = match choice {
                0 => self.list_players(),
                1 => self.new_player(),
                2 => self.delete_player(),
                3 => self.list_characters(),
                4 => self.new_character(),
                5 => self.open_character(),
                _ => self.import_character(),
            };
            self.report(result)?;
        }
        self.prompt.say("Bye.")?;
        info!("menu closed");
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.prompt.into_output()
    }

    /// Prints a failed action and keeps going. Terminal I/O errors end the
    /// loop.
    fn report(&mut self, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(err) if err.is::<std::io::Error>() => Err(err),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "action failed");
                self.prompt.say(format!("Error: {err:#}"))
            }
        }
    }

    // ------------------------------------------------------------------
    // Main menu
    // ------------------------------------------------------------------

    fn list_players(&mut self) -> Result<()> {
        let players = self.service.list_players()?;
        if players.is_empty() {
            return self.prompt.say("No players yet.");
        }
        for player in &players {
            self.prompt.say(presentation::player_line(player))?;
        }
        Ok(())
    }

    fn new_player(&mut self) -> Result<()> {
        let Some(name) = self.ask_text("Player name:")? else {
            return Ok(());
        };
        let player = self.service.create_player(&name)?;
        self.prompt
            .say(format!("Created player #{} {}", player.id, player.name))
    }

    fn delete_player(&mut self) -> Result<()> {
        let Some(id) = self.prompt.ask_parsed::<i64>("Player id:")? else {
            return Ok(());
        };
        let player = self.service.load_player(id)?;
        if self.prompt.confirm(&format!("Delete {}?", player.name))? {
            self.service.delete_player(id)?;
            self.prompt.say("Deleted.")?;
        }
        Ok(())
    }

    fn list_characters(&mut self) -> Result<()> {
        let owner = self.prompt.ask_parsed::<i64>("Player id (blank for all):")?;
        let characters = self.service.list_characters(owner)?;
        if characters.is_empty() {
            return self.prompt.say("No characters.");
        }
        for character in &characters {
            self.prompt.say(presentation::character_line(character))?;
        }
        Ok(())
    }

    fn new_character(&mut self) -> Result<()> {
        let Some(player_id) = self.prompt.ask_parsed::<i64>("Player id:")? else {
            return Ok(());
        };
        let Some(name) = self.ask_text("Character name:")? else {
            return Ok(());
        };
        let breed = self.pick_breed()?;
        let (character, live) = self.service.create_character(player_id, &name, breed)?;
        self.prompt
            .say(format!("Created character #{}", character.id))?;
        self.prompt
            .say(presentation::render_sheet(&character, &live))
    }

    fn open_character(&mut self) -> Result<()> {
        let Some(id) = self.prompt.ask_parsed::<i64>("Character id:")? else {
            return Ok(());
        };
        let character = self.service.load_character(id)?;
        let title = format!("{} (#{id})", character.name);
        while let Some(choice) = self.prompt.choose(&title, &CHARACTER_OPTIONS)? {
            debug!(character = id, choice = CHARACTER_OPTIONS[choice], "character menu");
            let result = self.character_action(id, choice);
            let leave = matches!(result, Ok(Screen::Leave));
            self.report(result.map(|_| ()))?;
            if leave {
                break;
            }
        }
        Ok(())
    }

    fn import_character(&mut self) -> Result<()> {
        let Some(path) = self.ask_text("File to import:")? else {
            return Ok(());
        };
        let document = std::fs::read_to_string(&path)
            .map_err(|err| anyhow::anyhow!("could not read {path}: {err}"))?;
        let owner = self
            .prompt
            .ask_parsed::<i64>("Attach to player id (blank keeps the stored one):")?;
        let (character, _) = self.service.import_character(&document, owner)?;
        self.prompt.say(format!(
            "Imported {} as character #{}",
            character.name, character.id
        ))
    }

    // ------------------------------------------------------------------
    // Character menu
    // ------------------------------------------------------------------

    fn character_action(&mut self, id: CharacterId, choice: usize) -> Result<Screen> {
        match choice {
            0 => self.show_sheet(id)?,
            1 => self.show_free_locations(id)?,
            2 => self.search_mods()?,
            3 => self.add_mod(id)?,
            4 => self.remove_mod(id)?,
            5 => self.set_breed(id)?,
            6 => self.grant_talent(id)?,
            7 => self.add_note(id)?,
            8 => {
                self.service.rebuild(id)?;
                self.prompt.say("Rebuilt.")?;
            }
            9 => self.export(id)?,
            10 => {
                if self.prompt.confirm("Delete this character?")? {
                    self.service.delete_character(id)?;
                    self.prompt.say("Deleted.")?;
                    return Ok(Screen::Leave);
                }
            }
            _ => {
                let character = self.service.load_character(id)?;
                for (location, mod_id) in character.nodes.filled() {
                    self.prompt.say(format!("  {location:<28} {mod_id}"))?;
                }
            }
        }
        Ok(Screen::Stay)
    }

    fn show_sheet(&mut self, id: CharacterId) -> Result<()> {
        let character = self.service.load_character(id)?;
        let live = self.service.load_live(id)?;
        self.prompt
            .say(presentation::render_sheet(&character, &live))
    }

    fn show_free_locations(&mut self, id: CharacterId) -> Result<()> {
        let free = self.service.free_locations(id)?;
        self.prompt.say(format!("{} free locations", free.len()))?;
        for location in free {
            self.prompt.say(format!("  {location}"))?;
        }
        Ok(())
    }

    fn search_mods(&mut self) -> Result<()> {
        let mut query = ModQuery::new();
        if let Some(category) = self.ask_text("Category (blank for any):")? {
            match ModCategory::from_str(&category) {
                Ok(category) => query = query.category(category),
                Err(_) => {
                    let known: Vec<String> =
                        ModCategory::iter().map(|category| category.to_string()).collect();
                    return self
                        .prompt
                        .say(format!("Unknown category. Known: {}", known.join(", ")));
                }
            }
        }
        if let Some(prefix) = self.ask_text("Name starts with (blank for any):")? {
            query = query.name_prefix(prefix);
        }
        let found = self.service.search_mods(&query);
        self.prompt.say(format!("{} mods", found.len()))?;
        for candidate in &found {
            self.prompt.say(presentation::mod_line(candidate))?;
        }
        Ok(())
    }

    fn add_mod(&mut self, id: CharacterId) -> Result<()> {
        let Some(mod_id) = self.ask_text("Mod id:")? else {
            return Ok(());
        };
        let Some(location) = self.ask_text("Location:")? else {
            return Ok(());
        };
        let service = self.service;
        let mut request = ApplyRequest::new(&mod_id, &location);
        if let Some(candidate) = service.content().catalog.lookup(&mod_id)
            && candidate.choose_text
            && let Some(text) = self.ask_text("Text:")?
        {
            request = request.with_text(text);
        }
        if self.prompt.confirm("Ignore prerequisites?")? {
            request = request.with_flags(ApplyFlags::IGNORE_PREREQS);
        }
        if self.prompt.confirm("GM override?")? {
            request = request.with_flags(ApplyFlags::OVERRIDE);
        }

        match self.service.add_mod(id, &request)? {
            ApplyOutcome::Placed { charged } => self
                .prompt
                .say(format!("Placed {mod_id} at {location} for {charged} talent points")),
            ApplyOutcome::Overridden => self
                .prompt
                .say(format!("Placed {mod_id} at {location} under override")),
            ApplyOutcome::Refused(refusal) => self.prompt.say(format!("Refused: {refusal}")),
        }
    }

    fn remove_mod(&mut self, id: CharacterId) -> Result<()> {
        let character = self.service.load_character(id)?;
        let filled: Vec<(String, String)> = character
            .nodes
            .filled()
            .map(|(location, mod_id)| (location.to_string(), mod_id.to_string()))
            .collect();
        let labels: Vec<String> = filled
            .iter()
            .map(|(location, mod_id)| format!("{mod_id} at {location}"))
            .collect();
        let Some(picked) = self.prompt.choose("Remove which mod?", &labels)? else {
            return Ok(());
        };
        let (location, mod_id) = &filled[picked];
        let flags = if self.prompt.confirm("GM override?")? {
            ApplyFlags::OVERRIDE
        } else {
            ApplyFlags::empty()
        };
        match self.service.remove_mod(id, mod_id, location, flags)? {
            RemoveOutcome::Removed { refunded } => self
                .prompt
                .say(format!("Removed {mod_id}, refunded {refunded} talent points")),
            RemoveOutcome::Refused(refusal) => self.prompt.say(format!("Refused: {refusal}")),
        }
    }

    fn set_breed(&mut self, id: CharacterId) -> Result<()> {
        let Some(breed) = self.pick_breed()? else {
            return Ok(());
        };
        if self.service.set_breed(id, breed)? {
            self.prompt.say(format!("Breed set to {breed}"))
        } else {
            self.prompt.say(format!("Already {breed}"))
        }
    }

    fn grant_talent(&mut self, id: CharacterId) -> Result<()> {
        let Some(source) = self.prompt.choose("Source", &["Mission", "Bonus"])? else {
            return Ok(());
        };
        let grant = if source == 0 {
            TalentGrant::Mission
        } else {
            TalentGrant::Bonus
        };
        let Some(amount) = self.prompt.ask_parsed::<i32>("Points:")? else {
            return Ok(());
        };
        let live = self.service.grant_talent_points(id, grant, amount)?;
        self.prompt.say(format!(
            "Talent points: {} total, {} unspent",
            live.int("tp_total"),
            live.int("tp_unspent")
        ))
    }

    fn add_note(&mut self, id: CharacterId) -> Result<()> {
        let kinds: Vec<NoteKind> = NoteKind::iter().collect();
        let labels: Vec<String> = kinds.iter().map(ToString::to_string).collect();
        let Some(picked) = self.prompt.choose("Note kind", &labels)? else {
            return Ok(());
        };
        let Some(note) = self.ask_text("Note:")? else {
            return Ok(());
        };
        self.service.add_note(id, kinds[picked], &note)?;
        self.prompt.say("Noted.")
    }

    fn export(&mut self, id: CharacterId) -> Result<()> {
        let Some(path) = self.ask_text("Export to file:")? else {
            return Ok(());
        };
        let document = self.service.export_character(id)?;
        write_document(Path::new(&path), &document)?;
        self.prompt.say(format!("Exported to {path}"))
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// A non-empty answer, or `None` for blank input and end of input.
    fn ask_text(&mut self, question: &str) -> Result<Option<String>> {
        Ok(self
            .prompt
            .ask(question)?
            .filter(|answer| !answer.is_empty()))
    }

    fn pick_breed(&mut self) -> Result<Option<Breed>> {
        let breeds: Vec<Breed> = Breed::iter().collect();
        let labels: Vec<String> = breeds.iter().map(ToString::to_string).collect();
        Ok(self
            .prompt
            .choose("Breed", &labels)?
            .map(|picked| breeds[picked]))
    }
}

fn write_document(path: &Path, document: &str) -> Result<()> {
    std::fs::write(path, document)
        .map_err(|err| anyhow::anyhow!("could not write {}: {err}", path.display()))
}
