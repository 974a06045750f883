use serde::Serialize;

/// A configured remote and the directions it was listed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteInfo {
    pub name: String,
    pub fetch_url: Option<String>,
    pub push_url: Option<String>,
}

impl RemoteInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fetch_url: None,
            push_url: None,
        }
    }

    pub fn is_fetchable(&self) -> bool {
        self.fetch_url.is_some()
    }

    pub fn is_pushable(&self) -> bool {
        self.push_url.is_some()
    }
}

/// Remotes in the order `git remote -v` lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteSet {
    remotes: Vec<RemoteInfo>,
}

impl RemoteSet {
    /// Parses `<name>\t<url> (fetch|push)` lines.
    pub fn parse(output: &str) -> Self {
        let mut remotes: Vec<RemoteInfo> = Vec::new();

        for line in output.lines() {
            let mut fields = line.split_whitespace();
            let (Some(name), Some(url), Some(direction)) =
                (fields.next(), fields.next(), fields.next())
            else {
                continue;
            };

            let index = match remotes.iter().position(|r| r.name == name) {
                Some(index) => index,
                None => {
                    remotes.push(RemoteInfo::new(name));
                    remotes.len() - 1
                }
            };

            let remote = &mut remotes[index];
            match direction {
                "(fetch)" => remote.fetch_url = Some(url.to_string()),
                "(push)" => remote.push_url = Some(url.to_string()),
                _ => {}
            }
        }

        Self { remotes }
    }

    /// `origin` if present, otherwise the first remote usable both ways.
    pub fn select(&self) -> Option<&RemoteInfo> {
        self.remotes
            .iter()
            .find(|r| r.name == "origin")
            .or_else(|| {
                self.remotes
                    .iter()
                    .find(|r| r.is_fetchable() && r.is_pushable())
            })
    }

    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }
}
