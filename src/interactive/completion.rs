use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// Method names advertised by the endpoint, in the order it listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodCatalog {
    methods: Vec<String>,
}

impl MethodCatalog {
    pub fn new(methods: Vec<String>) -> Self {
        Self { methods }
    }

    pub fn names(&self) -> &[String] {
        &self.methods
    }

    pub fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.methods
            .iter()
            .map(String::as_str)
            .filter(move |m| m.starts_with(prefix))
    }
}

/// Tab completion of method names for the line editor.
#[derive(Debug, Clone, Default)]
pub struct MethodCompleter {
    catalog: MethodCatalog,
}

impl MethodCompleter {
    pub fn new(catalog: MethodCatalog) -> Self {
        Self { catalog }
    }
}

impl Completer for MethodCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, word) = word_before(line, pos);
        let candidates = self
            .catalog
            .matching(word)
            .map(|m| Pair {
                display: m.to_string(),
                replacement: m.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for MethodCompleter {
    type Hint = String;
}

impl Highlighter for MethodCompleter {}

impl Validator for MethodCompleter {}

impl Helper for MethodCompleter {}

/// Start offset and text of the word ending at `pos`.
pub(crate) fn word_before(line: &str, pos: usize) -> (usize, &str) {
    let head = line.get(..pos).unwrap_or(line);
    let start = head
        .char_indices()
        .filter(|(_, c)| c.is_whitespace() || *c == '(' || *c == ',')
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    (start, &head[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MethodCatalog {
        MethodCatalog::new(vec![
            "system.listMethods".to_string(),
            "add".to_string(),
            "system.methodHelp".to_string(),
            "addAll".to_string(),
        ])
    }

    #[test]
    fn test_matching_keeps_catalog_order() {
        let c = catalog();
        let found: Vec<_> = c.matching("system.").collect();
        assert_eq!(found, vec!["system.listMethods", "system.methodHelp"]);
        let found: Vec<_> = c.matching("add").collect();
        assert_eq!(found, vec!["add", "addAll"]);
        assert_eq!(c.matching("").count(), 4);
        assert_eq!(c.matching("zzz").count(), 0);
    }

    #[test]
    fn test_word_before_cursor() {
        assert_eq!(word_before("sys", 3), (0, "sys"));
        assert_eq!(word_before("help sys", 8), (5, "sys"));
        assert_eq!(word_before("help sys", 6), (5, "s"));
        assert_eq!(word_before("f(1, ad", 7), (5, "ad"));
        assert_eq!(word_before("", 0), (0, ""));
    }

    #[test]
    fn test_empty_catalog_offers_nothing() {
        let c = MethodCatalog::default();
        assert!(c.names().is_empty());
        assert_eq!(c.matching("a").count(), 0);
    }
}
