//! Recipient-data extraction from free-text order notes.
//!
//! Order notes arrive as human-written text pasted from WhatsApp or typed by
//! hand, with labels in wildly varying spellings ("DIRECCIÓN", "direccion de
//! envio", "Dir"). [`extract`] turns such a note into a
//! [`pedidos_core::RecipientRecord`], or `None` when the note carries nothing
//! actionable. Extraction never fails: unrecognized lines are skipped.

pub mod extract;
pub mod labels;

pub use extract::{extract, extract_str};
