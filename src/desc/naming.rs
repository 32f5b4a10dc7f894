//! Shader function names derived from a block's type identity.
//!
//! Identities may carry generic arguments (`fx::Noise<fx::Perlin>`), as
//! produced by [`std::any::type_name`]. Namespace separators are `::` and `.`.

/// Identity without its generic arguments and trailing separators.
fn base_path(type_identity: &str) -> &str {
    let path = type_identity
        .find('<')
        .map_or(type_identity, |i| &type_identity[..i]);
    path.trim_end_matches(['.', ':'])
}

/// Last path segment of a type identity (`a::b::Name<T>` or `a.b.Name` → `Name`).
pub fn short_type_name(type_identity: &str) -> &str {
    let path = base_path(type_identity);
    let tail = path.rfind("::").map_or(path, |i| &path[i + 2..]);
    tail.rfind('.').map_or(tail, |i| &tail[i + 1..])
}

/// The whole identity as a shader identifier: each `::` becomes one `_`, and
/// every other character outside `[A-Za-z0-9_]` becomes `_` as well.
pub fn qualified_function_name(type_identity: &str) -> String {
    type_identity
        .replace("::", "_")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Function name for a block: the short type name, or the qualified one when
/// `collision_safe` is set.
pub fn function_name(type_identity: &str, collision_safe: bool) -> String {
    if collision_safe {
        qualified_function_name(type_identity)
    } else {
        short_type_name(type_identity).to_string()
    }
}
