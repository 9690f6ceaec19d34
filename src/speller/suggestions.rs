use crate::speller::Dictionary;

/// Ordered, duplicate-free suggestion list with a fixed capacity.
struct Suggestions {
    words: Vec<String>,
    max: usize,
}

impl Suggestions {
    fn new(max: usize) -> Self {
        Self {
            words: Vec::with_capacity(max),
            max,
        }
    }

    fn is_full(&self) -> bool {
        self.words.len() >= self.max
    }

    /// Returns true once the list is full.
    fn push(&mut self, word: String) -> bool {
        if !self.is_full() && !self.words.contains(&word) {
            self.words.push(word);
        }
        self.is_full()
    }
}

/// Generate spelling suggestions using edit distance
pub fn generate(word: &str, dictionary: &Dictionary, max_suggestions: usize) -> Vec<String> {
    let mut suggestions = Suggestions::new(max_suggestions);
    if max_suggestions == 0 {
        return suggestions.words;
    }

    let length = word.chars().count();

    // 1. Close matches sharing the first three letters
    if length >= 3 {
        for candidate in ranked_by_prefix(word, dictionary, 3) {
            if edit_distance(word, &candidate) <= 2 && suggestions.push(candidate) {
                return suggestions.words;
            }
        }
    }

    // 2. Common typing mistakes
    for transform in generate_transformations(word) {
        if dictionary.contains(&transform) && suggestions.push(transform) {
            return suggestions.words;
        }
    }

    // 3. Looser matches sharing the first two letters
    if length >= 2 {
        for candidate in ranked_by_prefix(word, dictionary, 2) {
            if edit_distance(word, &candidate) <= 3 && suggestions.push(candidate) {
                return suggestions.words;
            }
        }
    }

    // 4. Full scan, only for very short words where prefixes say little
    if length <= 3 {
        let mut candidates: Vec<(usize, String)> = dictionary
            .words_near_length(length, 1)
            .into_iter()
            .take(100)
            .filter_map(|w| {
                let dist = edit_distance(word, &w);
                (dist <= 2).then_some((dist, w))
            })
            .collect();

        candidates.sort_by_key(|(dist, _)| *dist);

        for (_, candidate) in candidates {
            if suggestions.push(candidate) {
                break;
            }
        }
    }

    suggestions.words
}

fn ranked_by_prefix(word: &str, dictionary: &Dictionary, chars: usize) -> Vec<String> {
    let prefix: String = word.chars().take(chars).collect();
    let mut matches = dictionary.words_with_prefix(&prefix);
    matches.sort_by_key(|w| edit_distance(word, w));
    matches
}

/// Calculate Levenshtein distance between two strings
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}

/// Generate common transformations of a word
fn generate_transformations(word: &str) -> Vec<String> {
    let mut transformations = Vec::new();
    let chars: Vec<char> = word.chars().collect();

    // Deletions
    for i in 0..chars.len() {
        let mut new_word = chars.clone();
        new_word.remove(i);
        transformations.push(new_word.iter().collect());
    }

    // Transpositions (swap adjacent)
    for i in 0..chars.len().saturating_sub(1) {
        let mut new_word = chars.clone();
        new_word.swap(i, i + 1);
        transformations.push(new_word.iter().collect());
    }

    // Replacements (common typos)
    let common_replacements = [
        ('a', 'e'),
        ('e', 'i'),
        ('i', 'o'),
        ('o', 'u'),
        ('b', 'v'),
        ('c', 'k'),
        ('f', 'v'),
        ('g', 'j'),
        ('m', 'n'),
        ('s', 'z'),
        ('t', 'd'),
    ];

    for (i, &ch) in chars.iter().enumerate() {
        for &(from, to) in &common_replacements {
            if ch == from {
                let mut new_word = chars.clone();
                new_word[i] = to;
                transformations.push(new_word.iter().collect());
            }
        }
    }

    transformations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("hello", "hello"), 0);
        assert_eq!(edit_distance("hello", "hallo"), 1);
        assert_eq!(edit_distance("hello", "hullo"), 1);
        assert_eq!(edit_distance("hello", "world"), 4);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("métohd", "méthod"), 2);
    }

    #[test]
    fn test_transformations() {
        let transforms = generate_transformations("hello");
        assert!(transforms.contains(&"hllo".to_string())); // deletion
        assert!(transforms.contains(&"ehllo".to_string())); // transposition
    }

    #[test]
    fn test_generate_ranks_and_caps() {
        let dictionary = Dictionary::from_words([
            "method", "methods", "metro", "meteor", "methane", "mouth",
        ])
        .unwrap();

        let suggestions = generate("metohd", &dictionary, 2);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0], "method");
    }

    #[test]
    fn test_generate_non_ascii_prefix() {
        let dictionary = Dictionary::from_words(["éclair", "écran"]).unwrap();
        let suggestions = generate("éclari", &dictionary, 4);
        assert_eq!(suggestions.first().map(String::as_str), Some("éclair"));
    }

    #[test]
    fn test_generate_short_word_fallback() {
        let dictionary = Dictionary::from_words(["to", "at", "it"]).unwrap();
        let suggestions = generate("ot", &dictionary, 4);
        assert!(suggestions.contains(&"to".to_string()));
    }

    #[test]
    fn test_generate_no_room() {
        let dictionary = Dictionary::from_words(["method"]).unwrap();
        assert!(generate("metohd", &dictionary, 0).is_empty());
    }
}
