//! # Mailcraft Model
//!
//! The email-template document model shared by the editor and the compilers.
//!
//! ```text
//! EmailTemplate
//!   ├── canvas_settings: CanvasSettings
//!   └── components: Vec<EmailComponent>
//!         ├── id, styles: StyleMap
//!         └── kind: ComponentKind (text | heading | image | button | divider
//!                                  | spacer | list | column | container)
//! ```
//!
//! Trees are plain owned values. Every edit produces a new tree, so holding
//! an older `Vec<EmailComponent>` is always safe.

pub mod canvas;
pub mod component;
pub mod error;
pub mod id_generator;
pub mod styles;
pub mod template;
pub mod units;

pub use canvas::CanvasSettings;
pub use component::{ComponentKind, ComponentPreset, ComponentType, EmailComponent, ListType};
pub use error::ModelError;
pub use id_generator::{IDGenerator, IdSource, SequentialIds};
pub use styles::{default_styles, effective_style, resolved_styles, StyleMap, StyleProperty};
pub use template::EmailTemplate;
pub use units::{format_value, parse_value, try_parse_value, ParsedValue, UnitPolicy};
