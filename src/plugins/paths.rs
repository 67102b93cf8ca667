//! Lexical path arithmetic used to rewrite plugin entry points.
//!
//! Nothing here touches the filesystem: `.` and `..` are resolved on the
//! components alone, the same way the entry point would be resolved by a
//! loader reading the rewritten string.

use std::path::{Component, Path, PathBuf};

pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::ParentDir => match components.last() {
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                Some(Component::ParentDir) | None => components.push(component),
                Some(_) => {
                    components.pop();
                }
            },
            Component::CurDir => {}
            c => components.push(c),
        }
    }

    if components.is_empty() {
        PathBuf::from(".")
    } else {
        components.iter().collect()
    }
}

/// Joins an entry filename onto `dir`.
///
/// Backslashes are treated as separators on every host and a leading root
/// is dropped, so the entry always lands below `dir`.
pub(crate) fn join_entry(dir: &Path, entry: &str) -> PathBuf {
    let entry = entry.replace('\\', "/");
    let mut joined = dir.to_path_buf();
    for component in Path::new(&entry).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            c => joined.push(c),
        }
    }
    joined
}

/// Returns `target` relative to `base`, both normalized first.
///
/// The result may start with `..` when `target` lies outside `base`.
/// Returns `None` when one path is absolute and the other is not, or when
/// they sit on different prefixes.
pub(crate) fn relative_path(base: &Path, target: &Path) -> Option<PathBuf> {
    let base = normalize_path(base);
    let target = normalize_path(target);

    if base.is_absolute() != target.is_absolute() {
        return None;
    }

    let base_parts: Vec<Component<'_>> = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let target_parts: Vec<Component<'_>> = target
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let remaining_base = &base_parts[common..];
    if remaining_base
        .iter()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_) | Component::RootDir))
    {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in remaining_base {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part);
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}

/// Drops leading `..` segments so a relative path stays below its base.
pub(crate) fn clamp_to_base(relative: &Path) -> PathBuf {
    relative
        .components()
        .skip_while(|c| matches!(c, Component::ParentDir))
        .collect()
}

/// Renders a relative path with `/` separators regardless of host.
pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
