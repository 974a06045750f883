/// Extracts the checked-out branch from `git branch --contains HEAD`.
///
/// Returns `None` when HEAD is detached (`* (HEAD detached at ...)`) or the
/// listing has no current entry.
pub fn parse_current_branch(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("* "))
        .map(str::trim)
        .filter(|name| !name.is_empty() && !name.starts_with('('))
        .map(str::to_string)
}
