//! # Component Mutations
//!
//! Intent-level operations on the component tree.
//!
//! ## Mutation Semantics
//!
//! ### Add
//! - Builds the node from the type's default payload and styles
//! - Column parents are backfilled up to the addressed column
//!
//! ### Update
//! - Shallow merge at node level, per-key merge for styles
//! - Not recorded in history (live typing and slider drags)
//!
//! ### Delete
//! - Removes the node and all descendants from wherever it lives
//!
//! ### Move / Duplicate
//! - Stay within the node's own list; duplication inserts right after the source
//!
//! ### Relocate
//! - Drag of an existing node to a new parent/column/index
//! - Fails if the target lies inside the node itself

use crate::patch::ComponentPatch;
use crate::tree::{self, ComponentRef, Direction, DropTarget};
use mailcraft_model::{ComponentKind, ComponentPreset, EmailComponent, IdSource, ModelError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Insert a new component built from a type name (`text`, `column3`, ...)
    #[serde(rename_all = "camelCase")]
    Add {
        component_type: String,
        #[serde(default)]
        target: DropTarget,
    },

    /// Merge a patch into an existing component
    Update { id: String, patch: ComponentPatch },

    /// Remove a component and its subtree
    Delete { id: String },

    /// Swap with the previous/next sibling
    Move {
        target: ComponentRef,
        direction: Direction,
    },

    /// Deep copy placed after the source
    Duplicate { target: ComponentRef },

    /// Move an existing component to a new location
    Relocate { id: String, target: DropTarget },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("No component at index {index}")]
    IndexOutOfRange { index: usize },

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

impl From<ModelError> for MutationError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::UnknownComponentType(name) => MutationError::UnknownComponentType(name),
            other => MutationError::InvalidStructure(other.to_string()),
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// The new tree
    pub components: Vec<EmailComponent>,

    /// Id of the node created by Add or Duplicate
    pub created_id: Option<String>,
}

impl Mutation {
    pub fn add(component_type: impl Into<String>, target: DropTarget) -> Self {
        Mutation::Add {
            component_type: component_type.into(),
            target,
        }
    }

    /// Whether the edit session records a history snapshot before applying
    pub fn is_undoable(&self) -> bool {
        !matches!(self, Mutation::Update { .. })
    }

    /// Short label used for history entries and logs
    pub fn describe(&self) -> String {
        match self {
            Mutation::Add { component_type, .. } => format!("Add {}", component_type),
            Mutation::Update { id, .. } => format!("Update {}", id),
            Mutation::Delete { id } => format!("Delete {}", id),
            Mutation::Move { direction, .. } => format!("Move {:?}", direction),
            Mutation::Duplicate { .. } => "Duplicate".to_string(),
            Mutation::Relocate { id, .. } => format!("Relocate {}", id),
        }
    }

    /// Apply to `tree`, returning the new tree. `tree` itself is untouched.
    pub fn apply(
        &self,
        tree: &[EmailComponent],
        ids: &mut dyn IdSource,
    ) -> Result<MutationResult, MutationError> {
        self.validate(tree)?;

        let result = match self {
            Mutation::Add {
                component_type,
                target,
            } => {
                let component = component_type.parse::<ComponentPreset>()?.build(ids);
                let created_id = component.id.clone();
                MutationResult {
                    components: tree::add_component(tree, component, target),
                    created_id: Some(created_id),
                }
            }

            Mutation::Update { id, patch } => MutationResult {
                components: tree::update_component(tree, id, patch),
                created_id: None,
            },

            Mutation::Delete { id } => MutationResult {
                components: tree::delete_component(tree, id),
                created_id: None,
            },

            Mutation::Move { target, direction } => {
                let id = Self::resolve(tree, target)?;
                MutationResult {
                    components: tree::move_component(tree, &id, *direction),
                    created_id: None,
                }
            }

            Mutation::Duplicate { target } => {
                let id = Self::resolve(tree, target)?;
                let components = tree::duplicate_component(tree, &id, ids);
                let created_id = Self::sibling_after(&components, &id);
                MutationResult {
                    components,
                    created_id,
                }
            }

            Mutation::Relocate { id, target } => MutationResult {
                components: tree::relocate_component(tree, id, target),
                created_id: None,
            },
        };

        Ok(result)
    }

    /// Validate without applying
    pub fn validate(&self, tree: &[EmailComponent]) -> Result<(), MutationError> {
        match self {
            Mutation::Add {
                component_type,
                target,
            } => {
                component_type.parse::<ComponentPreset>()?;
                Self::validate_target(tree, target)
            }

            Mutation::Update { id, .. } | Mutation::Delete { id } => {
                Self::require(tree, id)
            }

            Mutation::Move { target, .. } | Mutation::Duplicate { target } => {
                Self::resolve(tree, target).map(|_| ())
            }

            Mutation::Relocate { id, target } => {
                Self::require(tree, id)?;
                Self::validate_target(tree, target)?;

                if let Some(parent_id) = target.parent_id.as_deref() {
                    if tree::is_within(tree, id, parent_id) {
                        return Err(MutationError::CycleDetected);
                    }
                }
                Ok(())
            }
        }
    }

    fn require(tree: &[EmailComponent], id: &str) -> Result<(), MutationError> {
        if tree::contains_component(tree, id) {
            Ok(())
        } else {
            Err(MutationError::NodeNotFound(id.to_string()))
        }
    }

    fn validate_target(tree: &[EmailComponent], target: &DropTarget) -> Result<(), MutationError> {
        let Some(parent_id) = target.parent_id.as_deref() else {
            return Ok(());
        };

        let parent = tree::find_component(tree, parent_id)
            .ok_or_else(|| MutationError::ParentNotFound(parent_id.to_string()))?;

        match &parent.kind {
            ComponentKind::Column { column_widths, .. } => {
                let column = target.column_index.unwrap_or(0);
                if column < column_widths.len() {
                    Ok(())
                } else {
                    Err(MutationError::InvalidStructure(format!(
                        "column {} out of range for {} columns",
                        column,
                        column_widths.len()
                    )))
                }
            }
            _ if parent.accepts_children() => Ok(()),
            _ => Err(MutationError::InvalidStructure(format!(
                "{} cannot have children",
                parent.component_type()
            ))),
        }
    }

    fn resolve(tree: &[EmailComponent], target: &ComponentRef) -> Result<String, MutationError> {
        tree::resolve_ref(tree, target).ok_or_else(|| match target {
            ComponentRef::Id(id) => MutationError::NodeNotFound(id.clone()),
            ComponentRef::Index { index, .. } => MutationError::IndexOutOfRange { index: *index },
        })
    }

    fn sibling_after(tree: &[EmailComponent], id: &str) -> Option<String> {
        let parent_list = Self::list_containing(tree, id)?;
        let position = parent_list.iter().position(|c| c.id == id)?;
        parent_list.get(position + 1).map(|c| c.id.clone())
    }

    fn list_containing<'a>(tree: &'a [EmailComponent], id: &str) -> Option<&'a [EmailComponent]> {
        if tree.iter().any(|c| c.id == id) {
            return Some(tree);
        }
        tree.iter().find_map(|component| match &component.kind {
            ComponentKind::Container { children } => {
                Self::list_containing(children, id)
            }
            ComponentKind::Column { children, .. } => children
                .iter()
                .find_map(|column| Self::list_containing(column, id)),
            _ => None,
        })
    }
}
