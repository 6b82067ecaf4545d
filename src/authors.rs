// Author registry: every author seen in the training corpus, sorted by name.
//
// Indices into the registry are the coordinate space of the relation
// matrix and of the per-author score vectors, so they are only meaningful
// until the registry is cleared for the next corpus.

use serde::Serialize;

/// One author and the training submissions they took part in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    name: String,
    submissions: Vec<usize>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            submissions: Vec::new(),
        }
    }

    pub fn with_submission(name: impl Into<String>, submission: usize) -> Self {
        let mut author = Self::new(name);
        author.add_submission(submission);
        author
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Training-submission indices, ascending.
    pub fn submissions(&self) -> &[usize] {
        &self.submissions
    }

    /// Record a submission. Recording the same index twice is a no-op.
    ///
    /// Ids recorded in increasing order (as training does) are appended
    /// without a search.
    pub fn add_submission(&mut self, submission: usize) {
        match self.submissions.last() {
            Some(&last) if last < submission => self.submissions.push(submission),
            None => self.submissions.push(submission),
            Some(_) => {
                if let Err(at) = self.submissions.binary_search(&submission) {
                    self.submissions.insert(at, submission);
                }
            }
        }
    }

    fn absorb(&mut self, other: Author) {
        for submission in other.submissions {
            self.add_submission(submission);
        }
    }
}

/// Where a name sits relative to the registry contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found(usize),
    /// Not present. `after` is the index of the greatest name strictly
    /// less than the one searched for, `None` when every name is greater.
    Missing { after: Option<usize> },
}

/// Outcome of [`AuthorRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Merged(usize),
    Inserted(usize),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorRegistry {
    authors: Vec<Author>,
}

impl AuthorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    /// Binary search for `name`.
    ///
    /// Narrows to the last entry whose name is `<= name`; that entry is
    /// either the match or the insertion anchor.
    pub fn find(&self, name: &str) -> Lookup {
        let mut head = 0usize;
        let mut tail = self.authors.len();
        while head < tail {
            let mid = head + (tail - head) / 2;
            if self.authors[mid].name.as_str() <= name {
                head = mid + 1;
            } else {
                tail = mid;
            }
        }

        match head.checked_sub(1) {
            Some(i) if self.authors[i].name == name => Lookup::Found(i),
            after => Lookup::Missing { after },
        }
    }

    /// Registry index of `name`, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        match self.find(name) {
            Lookup::Found(i) => Some(i),
            Lookup::Missing { .. } => None,
        }
    }

    /// Add an author, merging submission lists when the name already exists.
    pub fn add(&mut self, author: Author) -> Insertion {
        match self.find(&author.name) {
            Lookup::Found(i) => {
                self.authors[i].absorb(author);
                Insertion::Merged(i)
            }
            Lookup::Missing { after } => {
                let at = after.map_or(0, |i| i + 1);
                self.authors.insert(at, author);
                Insertion::Inserted(at)
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&Author> {
        self.authors.get(index)
    }

    /// Name at `index`. Panics if out of range, like slice indexing.
    pub fn name(&self, index: usize) -> &str {
        &self.authors[index].name
    }

    pub fn iter(&self) -> impl Iterator<Item = &Author> {
        self.authors.iter()
    }

    /// Drop every author. Must run before training on a new corpus.
    pub fn clear(&mut self) {
        self.authors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> AuthorRegistry {
        let mut reg = AuthorRegistry::new();
        for name in names {
            reg.add(Author::new(*name));
        }
        reg
    }

    #[test]
    fn test_find_on_empty() {
        let reg = AuthorRegistry::new();
        assert_eq!(reg.find("alice"), Lookup::Missing { after: None });
    }

    #[test]
    fn test_find_reports_insertion_anchor() {
        let reg = registry(&["bob", "dave", "frank"]);
        assert_eq!(reg.find("alice"), Lookup::Missing { after: None });
        assert_eq!(reg.find("carol"), Lookup::Missing { after: Some(0) });
        assert_eq!(reg.find("dave"), Lookup::Found(1));
        assert_eq!(reg.find("zed"), Lookup::Missing { after: Some(2) });
    }

    #[test]
    fn test_insert_keeps_order() {
        let reg = registry(&["mallory", "alice", "zed", "bob", "carol"]);
        let names: Vec<&str> = reg.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol", "mallory", "zed"]);
    }

    #[test]
    fn test_merge_unions_submissions() {
        let mut reg = AuthorRegistry::new();
        assert_eq!(reg.add(Author::with_submission("alice", 0)), Insertion::Inserted(0));
        assert_eq!(reg.add(Author::with_submission("bob", 0)), Insertion::Inserted(1));
        assert_eq!(reg.add(Author::with_submission("alice", 2)), Insertion::Merged(0));
        assert_eq!(reg.add(Author::with_submission("alice", 2)), Insertion::Merged(0));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(0).unwrap().submissions(), &[0, 2]);
    }

    #[test]
    fn test_submissions_stay_sorted_and_unique() {
        let mut author = Author::new("alice");
        for id in [3, 7, 7, 1, 5, 3, 9] {
            author.add_submission(id);
        }
        assert_eq!(author.submissions(), &[1, 3, 5, 7, 9]);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let reg = registry(&["Alice", "alice"]);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.index_of("Alice"), Some(0));
        assert_eq!(reg.index_of("alice"), Some(1));
    }

    #[test]
    fn test_clear() {
        let mut reg = registry(&["alice", "bob"]);
        reg.clear();
        assert!(reg.is_empty());
        assert_eq!(reg.index_of("alice"), None);
    }
}
