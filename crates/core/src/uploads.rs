//! Naming rules for entity icon and cover images.
//!
//! Every entity has at most one icon and one cover on disk, stored as
//! `{kind}_{entity_id}{ext}`. Uploading a new file replaces the old one even
//! when the extension changes.

use std::str::FromStr;

use crate::error::CoreError;

/// Extensions accepted for uploaded images (lower-case, with leading dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg"];

/// Which image slot an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Icon,
    Cover,
}

impl FileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Icon => "icon",
            FileKind::Cover => "cover",
        }
    }

    /// Message returned when no file of this kind exists.
    pub fn not_found_message(self) -> &'static str {
        match self {
            FileKind::Icon => "Ícone não encontrado.",
            FileKind::Cover => "Capa não encontrado.",
        }
    }

    /// Message returned after a successful delete.
    pub fn deleted_message(self) -> &'static str {
        match self {
            FileKind::Icon => "Ícone excluído com sucesso.",
            FileKind::Cover => "Imagem de capa excluída com sucesso.",
        }
    }
}

impl FromStr for FileKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "icon" => Ok(FileKind::Icon),
            "cover" => Ok(FileKind::Cover),
            other => Err(CoreError::Validation(format!(
                "Unknown file kind '{other}', expected 'icon' or 'cover'"
            ))),
        }
    }
}

/// Extract and validate the extension of an uploaded file name.
pub fn image_extension(file_name: &str) -> Result<String, CoreError> {
    let ext = file_name
        .rfind('.')
        .map(|i| file_name[i..].to_ascii_lowercase())
        .ok_or_else(|| CoreError::Validation(format!("File '{file_name}' has no extension")))?;

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported file type '{ext}'"
        )));
    }
    Ok(ext)
}

/// Prefix shared by every stored file of a kind for one entity.
pub fn stored_file_stem(kind: FileKind, entity_id: &str) -> String {
    format!("{}_{entity_id}", kind.as_str())
}

/// Full stored file name: `{kind}_{entity_id}{ext}`.
pub fn stored_file_name(kind: FileKind, entity_id: &str, ext: &str) -> String {
    format!("{}{ext}", stored_file_stem(kind, entity_id))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn file_kind_parses_path_segment() {
        assert_eq!("icon".parse::<FileKind>().unwrap(), FileKind::Icon);
        assert_eq!("cover".parse::<FileKind>().unwrap(), FileKind::Cover);
        assert_matches!("banner".parse::<FileKind>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn extension_is_lowercased_and_checked() {
        assert_eq!(image_extension("Logo.PNG").unwrap(), ".png");
        assert_eq!(image_extension("a.b.jpeg").unwrap(), ".jpeg");
        assert_matches!(image_extension("notes.txt"), Err(CoreError::Validation(_)));
        assert_matches!(image_extension("README"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn stored_name_follows_kind_id_ext() {
        assert_eq!(stored_file_name(FileKind::Cover, "42", ".jpg"), "cover_42.jpg");
        assert_eq!(stored_file_stem(FileKind::Icon, "abc"), "icon_abc");
    }

    #[test]
    fn messages_differ_per_kind() {
        assert_eq!(FileKind::Icon.not_found_message(), "Ícone não encontrado.");
        assert_eq!(
            FileKind::Cover.deleted_message(),
            "Imagem de capa excluída com sucesso."
        );
    }
}
