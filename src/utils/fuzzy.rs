// Fuzzy matching for field-name and task-name suggestions

/// Calculate Levenshtein distance between two strings
/// Returns the minimum number of single-character edits (insertions, deletions, substitutions)
/// needed to transform one string into another
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let s1_len = s1_chars.len();
    let s2_len = s2_chars.len();

    if s1_len == 0 {
        return s2_len;
    }
    if s2_len == 0 {
        return s1_len;
    }

    // Two rolling rows instead of the full matrix
    let mut prev: Vec<usize> = (0..=s2_len).collect();
    let mut curr = vec![0; s2_len + 1];

    for i in 1..=s1_len {
        curr[0] = i;
        for j in 1..=s2_len {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[s2_len]
}

/// Find the candidate closest to `word` within `max_distance` (case-insensitive)
pub fn closest_match<'a>(word: &str, candidates: &[&'a str], max_distance: usize) -> Option<&'a str> {
    let word_lower = word.to_lowercase();
    candidates
        .iter()
        .map(|c| (*c, levenshtein_distance(&word_lower, &c.to_lowercase())))
        .filter(|(_, d)| *d <= max_distance)
        .min_by_key(|(_, d)| *d)
        .map(|(c, _)| c)
}

/// Find near matches for a task name
///
/// Names within `max_distance` edits match, as do names containing the
/// search text. Returns up to 5 matches, closest first.
pub fn find_near_name_matches(search: &str, names: &[&str], max_distance: usize) -> Vec<(String, usize)> {
    let search_lower = search.to_lowercase();
    let mut matches: Vec<(String, usize)> = Vec::new();

    for name in names {
        let name_lower = name.to_lowercase();
        let distance = levenshtein_distance(&search_lower, &name_lower);

        if distance <= max_distance {
            matches.push((name.to_string(), distance));
        } else if search_lower.len() < name_lower.len() && name_lower.contains(&search_lower) {
            // Prefix matches rank ahead of other substring matches
            let penalty = if name_lower.starts_with(&search_lower) { 0 } else { 1 };
            let substring_distance = name_lower.len() - search_lower.len() + penalty;
            matches.push((name.to_string(), substring_distance.min(max_distance + 1)));
        }
    }

    matches.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    matches.dedup_by(|a, b| a.0 == b.0);
    matches.into_iter().take(5).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("same", "same"), 0);
        assert_eq!(levenshtein_distance("abc", "def"), 3);
    }

    #[test]
    fn test_closest_match() {
        let fields = ["time", "priority", "deadline"];
        assert_eq!(closest_match("tme", &fields, 3), Some("time"));
        assert_eq!(closest_match("PRIORTY", &fields, 3), Some("priority"));
        assert_eq!(closest_match("dedline", &fields, 3), Some("deadline"));
        assert_eq!(closest_match("colour", &fields, 3), None);
    }

    #[test]
    fn test_find_near_name_matches() {
        let names = ["Write report", "Email Bob", "Write tests", "Groceries"];

        let matches = find_near_name_matches("write reprt", &names, 3);
        assert_eq!(matches[0].0, "Write report");
        assert_eq!(matches[0].1, 1);

        let matches = find_near_name_matches("write", &names, 3);
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|(n, _)| n.starts_with("Write")));

        let matches = find_near_name_matches("taxes", &names, 2);
        assert!(matches.is_empty());
    }
}
