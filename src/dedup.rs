use std::cmp::Ordering;
use std::collections::HashSet;

use crate::history::Entry;

/// Keeps the most recent occurrence of every command and orders the result
/// newest-first. Entries without a timestamp trail everything else.
///
/// `entries` must be in file (append) order. The full command text, embedded
/// newlines included, is the identity of an entry.
pub fn dedup_and_sort(entries: Vec<Entry>) -> Vec<Entry> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for entry in entries.into_iter().rev() {
        if seen.insert(entry.command.clone()) {
            unique.push(entry);
        }
    }

    // Back to file order so ties keep a stable, repeatable order.
    unique.reverse();
    unique.sort_by(newest_first);
    unique
}

fn newest_first(a: &Entry, b: &Entry) -> Ordering {
    match (a.timestamp, b.timestamp) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn entry(secs: Option<i64>, command: &str) -> Entry {
        Entry {
            timestamp: secs.and_then(|s| DateTime::from_timestamp(s, 0)),
            command: command.to_string(),
        }
    }

    fn commands(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.command.as_str()).collect()
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry(Some(100), "ls"),
            entry(None, "orphan one"),
            entry(Some(200), "git status"),
            entry(Some(300), "ls"),
            entry(Some(150), "cargo build"),
            entry(None, "orphan two"),
            entry(Some(400), "git status"),
            entry(Some(50), "echo a\nline2"),
            entry(Some(60), "echo a\nline3"),
        ]
    }

    #[test]
    fn keeps_most_recent_occurrence_newest_first() {
        let out = dedup_and_sort(sample());
        assert_eq!(
            commands(&out),
            vec![
                "git status",
                "ls",
                "cargo build",
                "echo a\nline3",
                "echo a\nline2",
                "orphan one",
                "orphan two",
            ]
        );
        assert_eq!(out[0].timestamp, DateTime::from_timestamp(400, 0));
        assert_eq!(out[1].timestamp, DateTime::from_timestamp(300, 0));
    }

    #[test]
    fn output_has_no_duplicate_commands() {
        let out = dedup_and_sort(sample());
        let distinct: HashSet<_> = out.iter().map(|e| &e.command).collect();
        assert_eq!(distinct.len(), out.len());
    }

    #[test]
    fn retained_entry_is_the_latest_of_its_command() {
        let input = sample();
        let out = dedup_and_sort(input.clone());
        for kept in &out {
            for other in input.iter().filter(|e| e.command == kept.command) {
                if let (Some(k), Some(o)) = (kept.timestamp, other.timestamp) {
                    assert!(k >= o, "{:?} kept over newer {:?}", kept, other);
                }
            }
        }
    }

    #[test]
    fn later_duplicate_wins_even_without_timestamp() {
        let out = dedup_and_sort(vec![entry(Some(10), "make"), entry(None, "make")]);
        assert_eq!(out, vec![entry(None, "make")]);
    }

    #[test]
    fn timestampless_entries_trail() {
        let out = dedup_and_sort(vec![
            entry(None, "a"),
            entry(Some(1), "b"),
            entry(None, "c"),
            entry(Some(0), "d"),
        ]);
        assert_eq!(commands(&out), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn is_idempotent() {
        let mut input = sample();
        input.push(entry(Some(150), "tie with cargo build"));

        let once = dedup_and_sort(input);
        let twice = dedup_and_sort(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(dedup_and_sort(Vec::new()).is_empty());
    }
}
