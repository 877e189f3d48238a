/// Reads a variable from the process environment as-is.
pub fn lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Resolves `key` through `lookup`. This and [`var_or`] are the only places
/// that treat an empty value as unset.
pub fn var_opt<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.is_empty())
}

/// Resolves `key` through `lookup`, falling back to `default` when unset or empty.
pub fn var_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    var_opt(lookup, key).unwrap_or_else(|| default.to_string())
}
