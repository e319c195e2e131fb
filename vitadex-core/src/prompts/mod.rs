//! Prompt templates for extraction and image synthesis.

pub mod extract;
pub mod images;

pub use extract::{extract_tool_spec, render_extract_system_prompt, render_scan_user_text};
pub use images::{render_background_prompt, render_subject_prompt};
