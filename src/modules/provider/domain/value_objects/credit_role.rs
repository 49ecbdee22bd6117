/// Role of a credited person, derived from free-form role labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditRole {
    Author,
    Artist,
}

impl CreditRole {
    /// Classify a role label such as "Story & Art" or "Illustrator".
    ///
    /// Writing keywords win over art keywords, so "Story & Art" credits an
    /// author. Labels matching neither default to author.
    pub fn classify(role: &str) -> Self {
        let role = role.to_lowercase();

        let writes = ["author", "story", "writer", "creator"]
            .iter()
            .any(|keyword| role.contains(keyword));
        if writes {
            return CreditRole::Author;
        }

        if role.contains("art") || role.contains("illust") {
            return CreditRole::Artist;
        }

        CreditRole::Author
    }
}

/// Split `(name, role)` credits into author and artist name lists, keeping order
pub fn split_credits<I, N, R>(credits: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = (N, R)>,
    N: Into<String>,
    R: AsRef<str>,
{
    let mut authors = Vec::new();
    let mut artists = Vec::new();

    for (name, role) in credits {
        match CreditRole::classify(role.as_ref()) {
            CreditRole::Author => authors.push(name.into()),
            CreditRole::Artist => artists.push(name.into()),
        }
    }

    (authors, artists)
}
