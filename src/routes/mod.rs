//! Route modules for the Image OCR server

pub mod health;
pub mod notes;
pub mod ocr;
pub mod settings;
