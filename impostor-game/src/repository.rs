//! Authoritative ordered list of word packs
use crate::catalog;
use crate::pack::{PackColor, PackId, WordPack};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("pack text is not a valid pack: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Fields an imported pack must carry. Identity and flags in the payload are
/// ignored.
#[derive(Debug, Deserialize)]
struct ImportedPack {
    name: String,
    icon: String,
    color: PackColor,
    words: Vec<String>,
    #[serde(default)]
    is_adult: bool,
}

/// Generated packs lead the list; user and built-in packs follow in insertion
/// order. Generated entries are replaced wholesale by the synthesizer and are
/// never edited here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackRepository {
    packs: Vec<WordPack>,
}

impl PackRepository {
    #[must_use]
    pub fn new(packs: Vec<WordPack>) -> Self {
        Self { packs }
    }

    #[must_use]
    pub fn packs(&self) -> &[WordPack] {
        &self.packs
    }

    #[must_use]
    pub fn get(&self, id: PackId) -> Option<&WordPack> {
        self.packs.iter().find(|p| p.id == id)
    }

    pub fn selected(&self) -> impl Iterator<Item = &WordPack> {
        self.packs.iter().filter(|p| p.is_selected)
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    /// Packs that are neither synthesized nor ephemeral.
    pub fn user_packs(&self) -> impl Iterator<Item = &WordPack> {
        self.packs.iter().filter(|p| !p.is_generated)
    }

    /// Swap in a freshly synthesized list.
    pub fn replace_all(&mut self, packs: Vec<WordPack>) {
        self.packs = packs;
    }

    fn insertion_index(&self) -> usize {
        self.packs
            .iter()
            .rposition(|p| p.is_generated)
            .map_or(0, |idx| idx + 1)
    }

    fn insert_user_pack(&mut self, mut pack: WordPack) -> PackId {
        pack.is_generated = false;
        let id = pack.id;
        let idx = self.insertion_index();
        self.packs.insert(idx, pack);
        id
    }

    pub fn add_pack(
        &mut self,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: PackColor,
        words: Vec<String>,
    ) -> PackId {
        self.insert_user_pack(WordPack::new(name, icon, color, words))
    }

    /// Add an editable placeholder pack.
    pub fn create_pack(&mut self) -> PackId {
        self.insert_user_pack(catalog::new_pack_template())
    }

    /// Replace the pack with the same id. Unknown ids and generated packs are
    /// left alone and report `false`.
    pub fn update_pack(&mut self, pack: WordPack) -> bool {
        match self
            .packs
            .iter_mut()
            .find(|p| p.id == pack.id && !p.is_generated)
        {
            Some(slot) => {
                *slot = WordPack {
                    is_generated: false,
                    ..pack
                };
                true
            }
            None => false,
        }
    }

    pub fn delete_pack(&mut self, id: PackId) -> bool {
        let before = self.packs.len();
        self.packs.retain(|p| p.id != id);
        self.packs.len() != before
    }

    /// Flip the selection flag of any pack, generated ones included.
    pub fn toggle_selection(&mut self, id: PackId) -> Option<bool> {
        let pack = self.packs.iter_mut().find(|p| p.id == id)?;
        pack.is_selected = !pack.is_selected;
        Some(pack.is_selected)
    }

    /// Replace every non-generated pack with the built-in catalog.
    pub fn reset_to_defaults(&mut self) {
        self.packs.retain(|p| p.is_generated);
        self.packs.extend(catalog::default_packs());
        log::info!("pack list reset to {} built-in packs", self.user_packs().count());
    }

    /// Parse `text` as a single pack and insert it with a fresh id, unselected.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Malformed`] if `text` is not a pack object; the
    /// list is untouched in that case.
    pub fn import_pack(&mut self, text: &str) -> Result<PackId, ImportError> {
        let imported: ImportedPack = serde_json::from_str(text)?;
        let mut pack = WordPack::new(imported.name, imported.icon, imported.color, imported.words);
        pack.is_adult = imported.is_adult;
        log::info!("imported pack {} with {} words", pack.name, pack.word_count());
        Ok(self.insert_user_pack(pack))
    }
}

/// Serialize `pack` for sharing. Generated packs and serialization failures
/// yield an empty string.
#[must_use]
pub fn export_pack(pack: &WordPack) -> String {
    if pack.is_generated {
        return String::new();
    }
    serde_json::to_string_pretty(pack).unwrap_or_else(|err| {
        log::warn!("failed to export pack {}: {err}", pack.name);
        String::new()
    })
}
