//! File dialog utilities

use confold_core::FieldId;
use std::fs;
use std::path::{Path, PathBuf};

/// Open a file picker dialog
pub fn pick_file(title: &str, filter_name: &str, extensions: &[&str]) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter(filter_name, extensions)
        .add_filter("All Files", &["*"])
        .pick_file()
}

/// Pick an input file for a multi-line field
pub fn pick_input_for(field: FieldId) -> Option<PathBuf> {
    match field {
        FieldId::Sequence => pick_file("Select Sequence File", "FASTA", &["fasta", "fa", "seq", "txt"]),
        FieldId::SecondaryStructure => {
            pick_file("Select Secondary Structure File", "SS Files", &["ss", "txt"])
        }
        FieldId::Contacts => pick_file("Select Contact Map", "RR Files", &["rr", "txt"]),
        FieldId::Pairing => pick_file("Select Strand Pairing File", "Pairing Files", &["txt", "pair"]),
        _ => None,
    }
}

/// Read a picked file as field text, trimming trailing newlines
pub fn read_field_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path)
        .map(|text| text.trim_end_matches(['\r', '\n']).to_string())
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

/// Save the server response page
pub fn save_response_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save Server Response")
        .add_filter("HTML Files", &["html", "htm"])
        .set_file_name("confold-response.html")
        .save_file()
}
