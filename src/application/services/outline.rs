//! Outline service
//!
//! Loads and saves outlines (outline text or JSON documents), and derives
//! card decks and practice sessions from them.

use std::path::Path;
use std::sync::Arc;

use generational_arena::Index;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    extract_title, generate, parse_to_outline, to_text, Outline, OutlineDocument,
    OutlineEditor, PracticeSession, SpeechCard,
};
use crate::infrastructure::traits::FileSystem;

/// One structural edit, applied to the node selected by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Add,
    AddChild,
    Remove,
    Promote,
    Demote,
    MoveUp,
    MoveDown,
    Rename(String),
}

/// Service for outline persistence and derived views.
pub struct OutlineService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl OutlineService {
    /// Create a new outline service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Load an outline from disk.
    ///
    /// Text extensions are parsed as outline text and named after their
    /// `# ` title, else the file stem. Everything else is a JSON document.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Outline> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read outline", path)?;

        let mut outline = if self.settings.is_text_file(path) {
            let name = extract_title(&content)
                .or_else(|| {
                    path.file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                })
                .unwrap_or_else(|| self.settings.default_name.clone());
            parse_to_outline(&content, name)
        } else {
            let doc: OutlineDocument =
                serde_json::from_str(&content).map_err(|e| ApplicationError::Persistence {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
            Outline::from(doc)
        };

        outline.file_path = Some(path.to_path_buf());
        debug!(
            name = %outline.name,
            nodes = outline.tree.total_nodes(),
            "loaded outline"
        );
        Ok(outline)
    }

    /// Save an outline as a JSON document, refreshing its modification time.
    #[instrument(level = "debug", skip(self, outline))]
    pub fn save(&self, outline: &mut Outline, path: &Path) -> ApplicationResult<()> {
        outline.touch();
        outline.file_path = Some(path.to_path_buf());
        let doc = outline.to_document();
        let json = if self.settings.pretty_json {
            serde_json::to_string_pretty(&doc)
        } else {
            serde_json::to_string(&doc)
        }
        .map_err(|e| ApplicationError::Persistence {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        self.fs
            .write(path, &json)
            .with_path_context("write outline", path)?;
        info!("saved {}", path.display());
        Ok(())
    }

    /// Write an outline in the format its extension calls for.
    pub fn write(&self, outline: &mut Outline, path: &Path) -> ApplicationResult<()> {
        if self.settings.is_text_file(path) {
            let text = self.export_text(outline);
            outline.touch();
            outline.file_path = Some(path.to_path_buf());
            self.fs
                .write(path, &text)
                .with_path_context("write outline", path)?;
            info!("exported {}", path.display());
            Ok(())
        } else {
            self.save(outline, path)
        }
    }

    pub fn export_text(&self, outline: &Outline) -> String {
        to_text(&outline.tree)
    }

    pub fn cards(&self, path: &Path) -> ApplicationResult<Vec<SpeechCard>> {
        let outline = self.load(path)?;
        Ok(generate(&outline.tree))
    }

    pub fn practice(&self, path: &Path, start: usize) -> ApplicationResult<PracticeSession> {
        Ok(PracticeSession::new(self.cards(path)?, start))
    }

    /// Applies one edit to the node at `node_path` (empty path: no selection).
    ///
    /// Returns the edited outline and the resulting selection.
    #[instrument(level = "debug", skip(self, outline))]
    pub fn edit(
        &self,
        outline: Outline,
        node_path: &[String],
        command: &EditCommand,
    ) -> ApplicationResult<(Outline, Option<Index>)> {
        let Outline {
            name,
            file_path,
            tree,
            created_at,
            modified_at,
        } = outline;

        let selection = if node_path.is_empty() {
            None
        } else {
            let segments: Vec<&str> = node_path.iter().map(String::as_str).collect();
            let idx = tree
                .find_by_path(&segments)
                .ok_or_else(|| ApplicationError::NodeNotFound(node_path.join(" > ")))?;
            Some(idx)
        };

        let mut editor = OutlineEditor::with_tree(tree, self.settings.new_item_title.clone());
        editor.select(selection)?;
        match command {
            EditCommand::Add => {
                editor.add_item()?;
            }
            EditCommand::AddChild => {
                editor.add_child()?;
            }
            EditCommand::Remove => editor.remove_item()?,
            EditCommand::Promote => editor.promote()?,
            EditCommand::Demote => editor.demote()?,
            EditCommand::MoveUp => editor.move_up()?,
            EditCommand::MoveDown => editor.move_down()?,
            EditCommand::Rename(title) => editor.rename(title.clone())?,
        }
        debug!(status = %editor.status(), "edited outline");

        let selection = editor.selection();
        let outline = Outline {
            name,
            file_path,
            tree: editor.into_tree(),
            created_at,
            modified_at,
        };
        Ok((outline, selection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::RealFileSystem;
    use tempfile::TempDir;

    fn service() -> OutlineService {
        OutlineService::new(Arc::new(RealFileSystem), Arc::new(Settings::default()))
    }

    #[test]
    fn test_text_outline_without_title_is_named_after_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("keynote.md");
        std::fs::write(&path, "Intro\n   Hook").unwrap();

        let outline = service().load(&path).unwrap();

        assert_eq!(outline.name, "keynote");
        assert_eq!(outline.file_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_invalid_json_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = service().load(&path).unwrap_err();
        assert!(matches!(err, ApplicationError::Persistence { .. }));
    }

    #[test]
    fn test_edit_unknown_path_is_rejected() {
        let outline = parse_to_outline("A", "t");
        let err = service()
            .edit(outline, &["B".to_string()], &EditCommand::Remove)
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NodeNotFound(p) if p == "B"));
    }
}
