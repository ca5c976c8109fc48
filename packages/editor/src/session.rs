//! # Edit Session
//!
//! Owns the state of one open template: the component tree, canvas
//! settings, the selected node, and undo/redo history. The hosting UI drives
//! it through the methods below and reads the current tree back.
//!
//! Operations that reference missing ids or unknown types do nothing; the
//! reason is logged at debug level and the previous state stays current.

use crate::errors::EditorError;
use crate::mutations::{Mutation, MutationError};
use crate::patch::ComponentPatch;
use crate::spacing::SpacingControl;
use crate::tree::{self, ComponentRef, Direction, DropTarget};
use crate::undo_stack::UndoStack;
use mailcraft_compiler_html::{compile_template, CompileOptions};
use mailcraft_model::{
    effective_style, CanvasSettings, EmailComponent, EmailTemplate, IDGenerator, IdSource,
    StyleMap, StyleProperty,
};
use tracing::{debug, info, instrument};

type SaveSink = Box<dyn FnMut(&EmailTemplate)>;
type ExportSink = Box<dyn FnMut(&str)>;

pub struct EditSession {
    template_id: Option<String>,
    name: Option<String>,

    components: Vec<EmailComponent>,
    canvas_settings: CanvasSettings,

    /// Mirror of the selected node, refreshed after every edit
    selected: Option<EmailComponent>,

    history: UndoStack,
    ids: Box<dyn IdSource>,

    on_save: Option<SaveSink>,
    on_export: Option<ExportSink>,
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("template_id", &self.template_id)
            .field("components", &self.components.len())
            .field("selected", &self.selected_id())
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(IDGenerator::new())
    }
}

impl EditSession {
    /// Empty session using `ids` for new components
    pub fn new(ids: impl IdSource + 'static) -> Self {
        Self::from_template(EmailTemplate::default(), ids)
    }

    /// Session seeded from an existing template
    pub fn from_template(template: EmailTemplate, ids: impl IdSource + 'static) -> Self {
        Self {
            template_id: template.id,
            name: template.name,
            components: template.components,
            canvas_settings: template.canvas_settings,
            selected: None,
            history: UndoStack::new(),
            ids: Box::new(ids),
            on_save: None,
            on_export: None,
        }
    }

    /// Session seeded from template JSON
    pub fn from_json(json: &str, ids: impl IdSource + 'static) -> Result<Self, EditorError> {
        let template = EmailTemplate::from_json(json)?;
        info!(components = template.components.len(), "Template loaded");
        Ok(Self::from_template(template, ids))
    }

    pub fn with_history(mut self, history: UndoStack) -> Self {
        self.history = history;
        self
    }

    /// Register the persistence sink used by `save`
    pub fn on_save(&mut self, sink: impl FnMut(&EmailTemplate) + 'static) {
        self.on_save = Some(Box::new(sink));
    }

    /// Register the sink used by `export`
    pub fn on_export(&mut self, sink: impl FnMut(&str) + 'static) {
        self.on_export = Some(Box::new(sink));
    }

    pub fn components(&self) -> &[EmailComponent] {
        &self.components
    }

    pub fn canvas_settings(&self) -> &CanvasSettings {
        &self.canvas_settings
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn find(&self, id: &str) -> Option<&EmailComponent> {
        tree::find_component(&self.components, id)
    }

    /// Current state as a template value
    pub fn template(&self) -> EmailTemplate {
        EmailTemplate {
            id: self.template_id.clone(),
            name: self.name.clone(),
            components: self.components.clone(),
            canvas_settings: self.canvas_settings.clone(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Replace canvas settings wholesale
    pub fn set_canvas_settings(&mut self, settings: CanvasSettings) {
        self.canvas_settings = settings;
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn selected(&self) -> Option<&EmailComponent> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|component| component.id.as_str())
    }

    /// Select a node by id. Returns false (and keeps the old selection) when
    /// the id is unknown.
    pub fn select(&mut self, id: &str) -> bool {
        match tree::find_component(&self.components, id) {
            Some(component) => {
                self.selected = Some(component.clone());
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Re-read the selected node from the current tree, dropping it if gone
    fn sync_selection(&mut self) {
        if let Some(id) = self.selected_id().map(str::to_string) {
            self.selected = tree::find_component(&self.components, &id).cloned();
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Apply a mutation.
    ///
    /// Structural mutations snapshot the tree first. On error the session is
    /// unchanged.
    #[instrument(skip(self), fields(op = %mutation.describe()))]
    pub fn apply(&mut self, mutation: Mutation) -> Result<Option<String>, MutationError> {
        let result = mutation.apply(&self.components, self.ids.as_mut())?;

        if mutation.is_undoable() {
            self.history
                .snapshot_with_description(&self.components, Some(mutation.describe()));
        }

        self.components = result.components;
        self.sync_selection();

        debug!(
            components = self.components.len(),
            undo_levels = self.history.undo_levels(),
            "Mutation applied"
        );

        Ok(result.created_id)
    }

    fn apply_quietly(&mut self, mutation: Mutation) -> Option<String> {
        match self.apply(mutation) {
            Ok(created) => created,
            Err(e) => {
                debug!(error = %e, "Mutation ignored");
                None
            }
        }
    }

    /// Add a component of `component_type`. Returns the new id, or `None` when
    /// the type or parent is unknown.
    pub fn add_component(
        &mut self,
        component_type: &str,
        index: Option<usize>,
        parent_id: Option<&str>,
        column_index: Option<usize>,
    ) -> Option<String> {
        let target = DropTarget {
            parent_id: parent_id.map(str::to_string),
            column_index,
            index,
        };
        self.drop_component(component_type, target)
    }

    /// Add a component where a palette item was dropped
    pub fn drop_component(&mut self, component_type: &str, target: DropTarget) -> Option<String> {
        self.apply_quietly(Mutation::add(component_type, target))
    }

    /// Live field edit. Not recorded in history.
    pub fn update_component(&mut self, id: &str, patch: ComponentPatch) {
        self.apply_quietly(Mutation::Update {
            id: id.to_string(),
            patch,
        });
    }

    /// Style patch from an editing control, merged per key
    pub fn apply_style_patch(&mut self, id: &str, styles: StyleMap) {
        self.update_component(id, ComponentPatch::styles(styles));
    }

    pub fn delete_component(&mut self, id: &str) {
        self.apply_quietly(Mutation::Delete { id: id.to_string() });
    }

    pub fn move_component(&mut self, target: impl Into<ComponentRef>, direction: Direction) {
        self.apply_quietly(Mutation::Move {
            target: target.into(),
            direction,
        });
    }

    /// Returns the id of the copy
    pub fn duplicate_component(&mut self, target: impl Into<ComponentRef>) -> Option<String> {
        self.apply_quietly(Mutation::Duplicate {
            target: target.into(),
        })
    }

    /// Drag an existing component to a new place
    pub fn relocate_component(&mut self, id: &str, target: DropTarget) {
        self.apply_quietly(Mutation::Relocate {
            id: id.to_string(),
            target,
        });
    }

    /// Flip a spacing control's mode, writing the unified patch if one results
    pub fn toggle_spacing_mode(&mut self, id: &str, control: &mut SpacingControl) {
        let Some(component) = self.find(id) else {
            debug!(id, "Spacing toggle on missing component");
            return;
        };

        if let Some(patch) = control.toggle(component) {
            self.apply_style_patch(id, patch);
        }
    }

    pub fn effective_style(&self, id: &str, property: StyleProperty) -> String {
        self.find(id)
            .map(|component| effective_style(component, property))
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.components) {
            Some(previous) => {
                self.components = previous;
                self.sync_selection();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.components) {
            Some(next) => {
                self.components = next;
                self.sync_selection();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Group the following structural edits into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// Hand the current template to the save sink
    pub fn save(&mut self) -> EmailTemplate {
        let template = self.template();
        if let Some(sink) = self.on_save.as_mut() {
            sink(&template);
        }
        info!(components = template.components.len(), "Template saved");
        template
    }

    /// Compile the current state and hand it to the export sink. The
    /// template name, when set, becomes the document title.
    pub fn export(&mut self) -> String {
        let html = compile_template(&self.template(), CompileOptions::default());
        if let Some(sink) = self.on_export.as_mut() {
            sink(&html);
        }
        info!(bytes = html.len(), "Template exported");
        html
    }
}
