//! Entry filtering for tree walking

use std::path::Path;

use glob::Pattern;
use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, trace, warn};

use super::config::ScanConfig;
use super::source::DirSource;

/// Marker that makes an entry hidden.
const HIDDEN_PREFIX: char = '.';

/// Name-based filter: hidden entries and ignore patterns.
pub struct EntryFilter {
    show_hidden: bool,
    patterns: Vec<(String, Option<Pattern>)>,
}

impl EntryFilter {
    pub fn new(config: &ScanConfig) -> Self {
        let patterns = config
            .ignore_patterns
            .iter()
            .map(|raw| {
                let compiled = Pattern::new(raw)
                    .inspect_err(|e| warn!(pattern = %raw, "invalid ignore pattern: {e}"))
                    .ok();
                (raw.clone(), compiled)
            })
            .collect();
        Self {
            show_hidden: config.show_hidden,
            patterns,
        }
    }

    /// Check if an entry name should be left out of the graph.
    pub fn is_excluded(&self, name: &str) -> bool {
        if !self.show_hidden && is_hidden(name) {
            return true;
        }
        self.patterns.iter().any(|(raw, compiled)| {
            name == raw || compiled.as_ref().is_some_and(|p| p.matches(name))
        })
    }
}

pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_PREFIX)
}

/// Per-folder ignore file.
const GITIGNORE: &str = ".gitignore";
/// Marks the top of a repository.
const GIT_DIR: &str = ".git";

/// Stack of gitignore matchers, outermost first.
///
/// The bottom of the stack holds rules that apply above the scanned root:
/// the global excludes file, the repository's `info/exclude` and every
/// `.gitignore` between the repository top and the root. On top of that sits
/// one matcher per folder on the current walk path.
#[derive(Default)]
pub struct GitignoreStack {
    matchers: Vec<Gitignore>,
}

impl GitignoreStack {
    /// Load the rules inherited from the repository that contains `root`.
    ///
    /// Does nothing when `root` is not inside a repository. Folder-level
    /// `.gitignore` files below the root are honored either way.
    pub fn seed<S: DirSource>(&mut self, source: &S, root: &Path) {
        let Some(repo) = root
            .ancestors()
            .filter(|dir| !dir.as_os_str().is_empty())
            .find(|dir| source.kind_of(&dir.join(GIT_DIR)).is_ok())
        else {
            return;
        };
        debug!(repo = %repo.display(), "found repository");

        if let Some(global) = source.global_gitignore() {
            self.matchers.push(global);
        }
        let exclude = repo.join(GIT_DIR).join("info").join("exclude");
        self.push_file(source, repo, &exclude);

        let above: Vec<&Path> = root
            .ancestors()
            .skip(1)
            .take_while(|dir| dir.starts_with(repo))
            .collect();
        for dir in above.into_iter().rev() {
            self.push_file(source, dir, &dir.join(GITIGNORE));
        }
    }

    /// Push the `.gitignore` of `dir` if it has one. Returns whether a matcher
    /// was pushed, so the caller knows to pop it.
    pub fn enter<S: DirSource>(&mut self, source: &S, dir: &Path) -> bool {
        self.push_file(source, dir, &dir.join(GITIGNORE))
    }

    pub fn leave(&mut self) {
        self.matchers.pop();
    }

    /// Innermost matcher with an opinion wins.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        for matcher in self.matchers.iter().rev() {
            match matcher.matched(path, is_dir) {
                Match::Ignore(_) => return true,
                Match::Whitelist(_) => return false,
                Match::None => {}
            }
        }
        false
    }

    /// Build a matcher rooted at `root` from the ignore file at `file`.
    fn push_file<S: DirSource>(&mut self, source: &S, root: &Path, file: &Path) -> bool {
        let Some(contents) = source.read_text(file) else {
            return false;
        };
        let mut builder = GitignoreBuilder::new(root);
        for line in contents.lines() {
            if let Err(e) = builder.add_line(Some(file.to_path_buf()), line) {
                warn!(path = %file.display(), "bad ignore rule: {e}");
            }
        }
        match builder.build() {
            Ok(matcher) => {
                trace!(path = %file.display(), rules = matcher.num_ignores(), "loaded ignore file");
                self.matchers.push(matcher);
                true
            }
            Err(e) => {
                warn!(path = %file.display(), "problem reading ignore file: {e}");
                false
            }
        }
    }
}
