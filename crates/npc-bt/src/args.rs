use std::str::FromStr;

/// Ordered string arguments handed to a factory.
///
/// Missing or unparsable positions read as the type default, so factories
/// never fail on their arguments.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    values: &'a [String],
}

impl<'a> Args<'a> {
    pub fn new(values: &'a [String]) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw argument, `""` when missing.
    pub fn str(&self, index: usize) -> &'a str {
        self.values.get(index).map_or("", |s| s.trim())
    }

    pub fn get<T: FromStr + Default>(&self, index: usize) -> T {
        self.str(index).parse().unwrap_or_default()
    }

    /// `true`/`yes`/`on`/non-zero integers read as true, case-insensitively.
    pub fn flag(&self, index: usize) -> bool {
        let raw = self.str(index);
        match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" => true,
            _ => raw.parse::<i64>().is_ok_and(|n| n != 0),
        }
    }

    /// Every argument that parses as `T`, in order.
    pub fn parse_all<T: FromStr>(&self) -> Vec<T> {
        self.iter().filter_map(|s| s.parse().ok()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.values.iter().map(|s| s.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_index_reads_as_default() {
        let values = owned(&["3"]);
        let args = Args::new(&values);
        assert_eq!(args.get::<u32>(0), 3);
        assert_eq!(args.get::<u32>(1), 0);
        assert_eq!(args.get::<f32>(5), 0.0);
        assert_eq!(args.str(2), "");
        assert!(!args.flag(4));
    }

    #[test]
    fn unparsable_reads_as_default() {
        let values = owned(&["abc", " 12 "]);
        let args = Args::new(&values);
        assert_eq!(args.get::<i32>(0), 0);
        assert_eq!(args.get::<i32>(1), 12);
    }

    #[test]
    fn flags_accept_common_spellings() {
        let values = owned(&["true", "YES", "1", "0", "false", "maybe"]);
        let args = Args::new(&values);
        let flags: Vec<bool> = (0..values.len()).map(|i| args.flag(i)).collect();
        assert_eq!(flags, vec![true, true, true, false, false, false]);
    }

    #[test]
    fn parse_all_skips_garbage() {
        let values = owned(&["4", "x", "7"]);
        assert_eq!(Args::new(&values).parse_all::<u64>(), vec![4, 7]);
    }
}
