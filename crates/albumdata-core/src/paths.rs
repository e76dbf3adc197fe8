/// Final component of a `/`-separated media path, verbatim.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// File name without its extension, so that `IMG_0042.CR2` and its edited
/// `IMG_0042.jpg` sibling share a base name. A leading dot is part of the
/// name, not an extension.
pub fn base_name(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}
