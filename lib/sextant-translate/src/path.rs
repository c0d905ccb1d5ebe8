const SEPARATOR: char = '/';

/// Joins hierarchical name segments with `/`.
///
/// Each part may itself contain separators. Leading, trailing, and repeated separators are collapsed, and empty parts
/// are skipped, so the result never starts or ends with a separator and never contains `//`. Segments such as `.` or
/// `..` are kept verbatim: these are metric names, not filesystem paths.
pub fn join_path<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for part in parts {
        for segment in part.as_ref().split(SEPARATOR).filter(|segment| !segment.is_empty()) {
            if !joined.is_empty() {
                joined.push(SEPARATOR);
            }
            joined.push_str(segment);
        }
    }

    joined
}
