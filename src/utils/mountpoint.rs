const SEPARATOR: char = '/';

/// Strips trailing separators so `/data/` and `/data` name the same mount.
/// A path made only of separators is the root mount and normalizes to `/`.
pub fn normalize_mountpoint(mountpoint: &str) -> String {
    let trimmed = mountpoint.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() && mountpoint.starts_with(SEPARATOR) {
        return SEPARATOR.to_string();
    }
    trimmed.to_string()
}
