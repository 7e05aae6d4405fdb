//! Logical file name handling.
//!
//! The tree indexes files by `(extension, path, filename)`. Valve's tools
//! write a single space for an empty component, so the resolver does the
//! same. A side effect is that the empty name and `" / . "` map to the same
//! key; lookups depend on that, so it is kept as is.

use crate::entry::EntryKey;

/// Stand-in for an empty name component.
pub const PLACEHOLDER: &str = " ";

/// Split a logical file name into the key used by the tree.
///
/// The name is lower-cased first. The extension is whatever follows the last
/// `.` after the last `/`; the path is whatever precedes the last `/`.
///
/// ```
/// use vpk_archive::path::resolve;
///
/// let key = resolve("Materials/Brick/Wall01.VMT");
/// assert_eq!(key.extension, "vmt");
/// assert_eq!(key.path, "materials/brick");
/// assert_eq!(key.filename, "wall01");
/// ```
pub fn resolve(name: &str) -> EntryKey {
    let name = name.to_lowercase();

    // A '/' seen before any '.' means the dot belongs to a directory.
    let (rest, extension) = match name.rfind(|c: char| c == '.' || c == '/') {
        Some(index) if name.as_bytes()[index] == b'.' => (&name[..index], &name[index + 1..]),
        _ => (name.as_str(), PLACEHOLDER),
    };

    let (path, filename) = match rest.rfind('/') {
        Some(index) => (&rest[..index], &rest[index + 1..]),
        None => ("", rest),
    };

    EntryKey::new(extension, or_placeholder(path), or_placeholder(filename))
}

/// Rebuild the canonical name of a key, dropping placeholder components.
pub fn join(key: &EntryKey) -> String {
    let mut name =
        String::with_capacity(key.path.len() + key.filename.len() + key.extension.len() + 2);

    if key.path != PLACEHOLDER {
        name.push_str(&key.path);
        name.push('/');
    }
    if key.filename != PLACEHOLDER {
        name.push_str(&key.filename);
    }
    if key.extension != PLACEHOLDER {
        name.push('.');
        name.push_str(&key.extension);
    }

    name
}

fn or_placeholder(component: &str) -> &str {
    if component.is_empty() {
        PLACEHOLDER
    } else {
        component
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_full_name() {
        assert_eq!(
            resolve("scripts/items/items_game.txt"),
            EntryKey::new("txt", "scripts/items", "items_game")
        );
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(resolve("Some/File.TXT"), resolve("some/file.txt"));
    }

    #[test]
    fn test_resolve_root_file() {
        assert_eq!(resolve("empty.vpk"), EntryKey::new("vpk", " ", "empty"));
    }

    #[test]
    fn test_resolve_without_extension() {
        assert_eq!(resolve("bin/readme"), EntryKey::new(" ", "bin", "readme"));
        // The dot belongs to the directory, not the file.
        assert_eq!(
            resolve("cfg.d/autoexec"),
            EntryKey::new(" ", "cfg.d", "autoexec")
        );
    }

    #[test]
    fn test_resolve_empty_components() {
        assert_eq!(resolve("dir/.txt"), EntryKey::new("txt", "dir", " "));
        assert_eq!(resolve("/file.txt"), EntryKey::new("txt", " ", "file"));
        assert_eq!(resolve("dir/"), EntryKey::new(" ", "dir", " "));
        assert_eq!(resolve("dir/name."), EntryKey::new("", "dir", "name"));
    }

    #[test]
    fn test_empty_name_collides_with_placeholders() {
        assert_eq!(resolve(""), EntryKey::new(" ", " ", " "));
        assert_eq!(resolve(""), resolve(" / . "));
    }

    #[test]
    fn test_join_drops_placeholders() {
        assert_eq!(join(&EntryKey::new("vpk", " ", "empty")), "empty.vpk");
        assert_eq!(join(&EntryKey::new(" ", "bin", "readme")), "bin/readme");
        assert_eq!(
            join(&EntryKey::new("txt", "scripts/items", "items_game")),
            "scripts/items/items_game.txt"
        );
    }

    #[test]
    fn test_join_then_resolve() {
        for key in [
            EntryKey::new("vmt", "materials/brick", "wall01"),
            EntryKey::new(" ", "bin", "readme"),
            EntryKey::new("vpk", " ", "empty"),
            EntryKey::new("txt", "dir", " "),
        ] {
            assert_eq!(resolve(&join(&key)), key);
        }
    }
}
